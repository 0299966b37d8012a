use std::fmt;

use serde::{Serialize, Deserialize};
use thiserror::Error;

use crate::{Classifier, Sample};
use crate::common::utils;


/// Errors raised by [`PriorClassifier`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PriorError {
    /// `distribution` was called before `train`.
    #[error("PriorClassifier: no model built yet")]
    NotTrained,
    /// The class attribute has no discrete values.
    #[error("PriorClassifier: class attribute \"{0}\" must be nominal")]
    NumericClass(String),
}


/// The class-prior learner.
/// It ignores the features and predicts
/// the weighted class frequencies of its training sample,
/// with one pseudo-count per class.
///
/// This is the default base learner of the cost-sensitive protocol
/// and a convenient baseline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriorClassifier {
    labels: Vec<String>,
    prior: Option<Vec<f64>>,
}


impl PriorClassifier {
    /// Construct an untrained instance.
    pub fn new() -> Self {
        Self::default()
    }


    /// The trained class distribution, if any.
    pub fn prior(&self) -> Option<&[f64]> {
        self.prior.as_deref()
    }
}


impl Classifier for PriorClassifier {
    type Error = PriorError;


    fn train(&mut self, sample: &Sample) -> Result<(), Self::Error> {
        let class = sample.class_attribute();
        if !class.is_nominal() {
            return Err(PriorError::NumericClass(class.name().to_string()));
        }

        let n_class = sample.n_class();
        let mut counts = vec![1f64; n_class];
        (0..sample.shape().0).for_each(|row| {
            if let Some(k) = sample.class_index(row) {
                counts[k] += sample.weight(row);
            }
        });
        utils::normalize(&mut counts);

        self.labels = (0..n_class).filter_map(|k| class.value(k))
            .map(|v| v.to_string())
            .collect();
        self.prior = Some(counts);
        Ok(())
    }


    fn distribution(&self, _sample: &Sample, _row: usize)
        -> Result<Vec<f64>, Self::Error>
    {
        self.prior.clone()
            .ok_or(PriorError::NotTrained)
    }
}


impl fmt::Display for PriorClassifier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.prior {
            None => write!(f, "PriorClassifier: no model built yet."),
            Some(prior) => {
                let k = utils::max_index(prior);
                let label = self.labels.get(k)
                    .map(|s| s.as_str())
                    .unwrap_or("?");
                writeln!(f, "PriorClassifier predicts class value: {label}")?;
                for (label, p) in self.labels.iter().zip(prior) {
                    writeln!(f, "  {label}: {p:.4}")?;
                }
                Ok(())
            },
        }
    }
}
