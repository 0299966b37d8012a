//! The contract between the cost-sensitive protocol
//! and the base learning algorithm.
//!
//! The protocol never needs to know which algorithm it runs.
//! A base learner trains on a [`Sample`] and, once trained,
//! returns a class distribution for any row of a [`Sample`]
//! sharing the training schema.
//! Fresh, untrained models are obtained from a factory closure
//! `Fn() -> C`.

use crate::Sample;
use crate::common::utils;


/// A trait that defines the behavior of a trainable
/// probabilistic classifier.
/// You only need to implement [`Classifier::train`]
/// and [`Classifier::distribution`].
pub trait Classifier {
    /// The error raised by training or prediction.
    type Error: std::error::Error + Send + Sync + 'static;


    /// Trains `self` on `sample`, replacing any previous state.
    fn train(&mut self, sample: &Sample) -> Result<(), Self::Error>;


    /// Returns the class distribution of the `row`-th instance of `sample`.
    /// The output has one nonnegative entry per class value
    /// and sums to `1`.
    fn distribution(&self, sample: &Sample, row: usize)
        -> Result<Vec<f64>, Self::Error>;


    /// Predicts the class index of the `row`-th instance of `sample`.
    /// Ties go to the lowest class index.
    fn predict(&self, sample: &Sample, row: usize)
        -> Result<usize, Self::Error>
    {
        let dist = self.distribution(sample, row)?;
        Ok(utils::max_index(&dist))
    }


    /// Computes the class distributions of all rows in `sample`.
    fn distribution_all(&self, sample: &Sample)
        -> Result<Vec<Vec<f64>>, Self::Error>
    {
        let n_sample = sample.shape().0;
        (0..n_sample).map(|row| self.distribution(sample, row))
            .collect()
    }


    /// Predicts the class indices of all rows in `sample`.
    fn predict_all(&self, sample: &Sample)
        -> Result<Vec<usize>, Self::Error>
    {
        let n_sample = sample.shape().0;
        (0..n_sample).map(|row| self.predict(sample, row))
            .collect()
    }
}
