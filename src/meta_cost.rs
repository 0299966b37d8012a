//! Cost-sensitive classification by relabeling.
//!
//! [`MetaCost`] bags the base learner, relabels each training row
//! with the class of minimum expected cost under the bagged
//! class distribution, and trains a single classifier
//! on the relabeled sample.

mod config;
mod relabel;
mod metacost_algorithm;

pub use config::MetaCostConfig;
pub use relabel::relabel;
pub use metacost_algorithm::MetaCost;
