#![warn(missing_docs)]

//!
//! A crate that makes any probabilistic classifier cost-sensitive.
//!
//! [`MetaCost`] implements the MetaCost procedure.
//! It estimates class probabilities of the training rows
//! with a bagged ensemble of base models,
//! relabels every row with the class of minimum expected cost,
//! and trains a final model on the relabeled data.
//! The final model then predicts as usual,
//! with the cost structure baked into its training labels.
//!
//! The crate consists of the following parts.
//!
//! - [`Sample`] and [`SampleReader`]
//!     Column-major training data with a nominal class attribute.
//!     Reads CSV files and `polars` data frames.
//!
//! - [`Classifier`]
//!     The trait a base learner implements.
//!     [`PriorClassifier`] is a ready-made baseline.
//!
//! - [`CostMatrix`] and [`CostMatrixSource`]
//!     Misclassification costs, supplied directly or
//!     loaded from `<relation>.cost` when the build starts.
//!
//! - [`BootstrapSampler`] and [`BaggedEnsemble`]
//!     Seeded resampling with replacement and
//!     parallel training of the ensemble members.
//!
//! - [`MetaCost`] and [`MetaCostConfig`]
//!     The relabeling procedure and its parameters.

pub mod error;
pub mod common;
pub mod sample;
pub mod base_learner;
pub mod cost_matrix;
pub mod bagging;
pub mod meta_cost;

pub mod prelude;


pub use error::{Error, Result, ModelError};

pub use sample::{
    Sample,
    SampleReader,
    Attribute,
    AttributeKind,
    Feature,
    MISSING,
    is_missing,
};

pub use base_learner::{
    Classifier,
    PriorClassifier,
    PriorError,
};

pub use cost_matrix::{CostMatrix, CostMatrixSource};

pub use bagging::{
    Bootstrap,
    BootstrapSampler,
    BaggedEnsemble,
    BaggingParams,
    derive_seeds,
};

pub use meta_cost::{MetaCost, MetaCostConfig, relabel};
