//! Misclassification costs.
//!
//! A [`CostMatrix`] holds the cost of predicting class `j`
//! when the true class is `i`, and turns a class distribution
//! into the expected cost of each prediction.
//! [`CostMatrixSource`] tells where the matrix of a build comes from.

mod matrix;
mod source;

pub use matrix::CostMatrix;
pub use source::CostMatrixSource;
