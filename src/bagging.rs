//! Bootstrap aggregation.
//!
//! [`BootstrapSampler`] draws resampled training sets with replacement
//! and [`BaggedEnsemble`] trains one model per resampled set
//! and averages their class distributions.

mod bootstrap;
mod ensemble;

pub use bootstrap::{Bootstrap, BootstrapSampler};
pub use ensemble::{BaggedEnsemble, BaggingParams, derive_seeds};
