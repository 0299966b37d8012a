//! The trainable-model abstraction and a reference base learner.

/// Provides the `Classifier` trait.
pub mod core;

/// Defines the class-prior learner.
pub mod prior;

pub use self::core::Classifier;
pub use self::prior::{PriorClassifier, PriorError};
