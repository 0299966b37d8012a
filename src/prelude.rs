//! Exports the cost-sensitive procedure, the base learner trait,
//! and the data structures they work on.
//!
pub use crate::sample::{
    // Data
    Sample,
    SampleReader,
    Attribute,
};


pub use crate::base_learner::{
    // Base learner trait
    Classifier,


    // Baseline learner
    PriorClassifier,
};


pub use crate::cost_matrix::{
    CostMatrix,
    CostMatrixSource,
};


pub use crate::bagging::{
    BaggedEnsemble,
    BaggingParams,
};


pub use crate::meta_cost::{
    MetaCost,
    MetaCostConfig,
};


pub use crate::error::Error;
