use std::fmt;

use colored::Colorize;

use crate::{Classifier, Sample};
use crate::bagging::BaggedEnsemble;
use crate::common::checker;
use crate::common::constants::PRINT_WIDTH;
use crate::cost_matrix::CostMatrix;
use crate::error::{Error, Result};
use super::config::MetaCostConfig;
use super::relabel::relabel;


/// MetaCost makes an arbitrary classifier cost-sensitive
/// by relabeling its training data.
///
/// [`MetaCost::build`] proceeds as follows:
///
/// 1. Resolve the cost matrix for the relation name of the sample.
/// 2. Train `n_iterations` base models, each on a bootstrap sample,
///    and average their class distributions.
/// 3. Replace the class of every training row
///    by the class of minimum expected cost.
/// 4. Train the final model on the relabeled copy.
///
/// Predictions come from the final model alone.
/// The cost matrix plays no role at prediction time.
///
/// See:
/// Pedro Domingos.
/// MetaCost: A general method for making classifiers cost-sensitive.
/// In Proceedings of the Fifth International Conference on
/// Knowledge Discovery and Data Mining, 155-164, 1999.
///
/// # Example
/// ```
/// use metacost::prelude::*;
///
/// let mut sample = Sample::new(
///     "toy",
///     vec![Attribute::numeric("x")],
///     Attribute::nominal("class", &["ok", "fraud"]),
/// );
/// for i in 0..20 {
///     let y = if i % 4 == 0 { 1.0 } else { 0.0 };
///     sample.push(vec![i as f64], y, 1.0).unwrap();
/// }
///
/// // Missing a fraud is ten times as bad as a false alarm.
/// let cost = CostMatrix::new(vec![
///     vec![ 0.0, 1.0],
///     vec![10.0, 0.0],
/// ]).unwrap();
/// let config = MetaCostConfig::default()
///     .n_iterations(5)
///     .seed(7)
///     .cost_matrix(cost);
///
/// let mut meta = MetaCost::init(config, PriorClassifier::new());
/// meta.build(&sample, PriorClassifier::new).unwrap();
///
/// assert_eq!(meta.classify(&sample, 0).unwrap(), 1);
/// assert_eq!(meta.n_relabeled(), 15);
/// ```
#[derive(Debug, Clone)]
pub struct MetaCost<M> {
    config: MetaCostConfig,
    classifier: M,

    // Filled by a successful build.
    cost_matrix: Option<CostMatrix>,
    relabeled_classes: Vec<usize>,
    n_relabeled: usize,
    base_learner: String,
    built: bool,
}


impl<M> MetaCost<M> {
    /// Initialize `MetaCost` with a configuration
    /// and the untrained final model.
    pub fn init(config: MetaCostConfig, classifier: M) -> Self {
        Self {
            config,
            classifier,
            cost_matrix: None,
            relabeled_classes: Vec::new(),
            n_relabeled: 0,
            base_learner: String::new(),
            built: false,
        }
    }


    /// Returns the configuration.
    pub fn config(&self) -> &MetaCostConfig {
        &self.config
    }


    /// Returns `true` after a successful build.
    pub fn is_built(&self) -> bool {
        self.built
    }


    /// The cost matrix of the last successful build.
    pub fn cost_matrix(&self) -> Option<&CostMatrix> {
        self.cost_matrix.as_ref()
    }


    /// The class index of each training row after relabeling.
    pub fn relabeled_classes(&self) -> &[usize] {
        &self.relabeled_classes[..]
    }


    /// Number of training rows whose class was changed.
    pub fn n_relabeled(&self) -> usize {
        self.n_relabeled
    }


    /// The final model.
    pub fn final_model(&self) -> &M {
        &self.classifier
    }


    /// Decompose `self` into the final model.
    pub fn into_final_model(self) -> M {
        self.classifier
    }
}


impl<M> MetaCost<M>
    where M: Classifier,
{
    /// Build the cost-sensitive classifier on `sample`.
    /// Base models are obtained from `factory`.
    ///
    /// On failure, `self` is left unbuilt
    /// even if a previous build succeeded.
    pub fn build<F, B>(&mut self, sample: &Sample, factory: F) -> Result<()>
        where F: Fn() -> B + Sync,
              B: Classifier + Send + Sync,
    {
        self.built = false;
        self.cost_matrix = None;
        self.relabeled_classes.clear();
        self.n_relabeled = 0;

        checker::nominal_class(sample)?;

        let cost = self.config.cost_source.resolve(sample.name())?;
        if cost.size() != sample.n_class() {
            return Err(Error::DimensionMismatch {
                context: "cost matrix vs. class values",
                expected: sample.n_class(),
                got: cost.size(),
            });
        }
        self.config.validate()?;


        let params = self.config.bagging_params();
        let mut ensemble = BaggedEnsemble::new();
        ensemble.build(sample, factory, &params)?;


        let relabeled = relabel(sample, &ensemble, &cost)?;
        let n_sample = sample.shape().0;
        let classes = (0..n_sample).filter_map(|row| relabeled.class_index(row))
            .collect::<Vec<_>>();
        let n_relabeled = (0..n_sample)
            .filter(|&row| sample.class_index(row) != relabeled.class_index(row))
            .count();

        if self.config.verbose {
            println!(
                "{}",
                format!(
                    "  [RELABELED {:>PRINT_WIDTH$} / {:>PRINT_WIDTH$}]",
                    n_relabeled,
                    n_sample,
                ).bold().cyan(),
            );
        }


        self.classifier.train(&relabeled)
            .map_err(Error::model)?;

        self.cost_matrix = Some(cost);
        self.relabeled_classes = classes;
        self.n_relabeled = n_relabeled;
        self.base_learner = std::any::type_name::<B>().to_string();
        self.built = true;
        Ok(())
    }


    /// Predicts the class index of the `row`-th instance of `sample`.
    pub fn classify(&self, sample: &Sample, row: usize) -> Result<usize> {
        if !self.built {
            return Err(Error::NotBuilt);
        }
        self.classifier.predict(sample, row)
            .map_err(Error::model)
    }


    /// Returns the class distribution of the `row`-th instance of `sample`
    /// according to the final model.
    pub fn distribution(&self, sample: &Sample, row: usize)
        -> Result<Vec<f64>>
    {
        if !self.built {
            return Err(Error::NotBuilt);
        }
        self.classifier.distribution(sample, row)
            .map_err(Error::model)
    }


    /// Predicts the class indices of all rows in `sample`.
    pub fn classify_all(&self, sample: &Sample) -> Result<Vec<usize>> {
        if !self.built {
            return Err(Error::NotBuilt);
        }
        self.classifier.predict_all(sample)
            .map_err(Error::model)
    }
}


impl<M> fmt::Display for MetaCost<M>
    where M: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let cost = match (&self.cost_matrix, self.built) {
            (Some(cost), true) => cost,
            _ => return write!(f, "MetaCost: No model built yet."),
        };

        writeln!(f, "MetaCost cost sensitive classifier induction")?;
        writeln!(f, "Base learner: {}", self.base_learner)?;
        writeln!(f, "Options:")?;
        for (name, value) in self.config.info() {
            writeln!(f, "  {name:<24}{value}")?;
        }
        writeln!(f)?;
        writeln!(f, "Classifier Model")?;
        writeln!(f, "{}", self.classifier)?;
        writeln!(f)?;
        writeln!(f, "Cost Matrix")?;
        write!(f, "{cost}")
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Attribute, CostMatrixSource, PriorClassifier};

    fn toy() -> Sample {
        let mut sample = Sample::new(
            "toy",
            vec![Attribute::numeric("x")],
            Attribute::nominal("class", &["a", "b"]),
        );
        for i in 0..8 {
            let y = if i < 6 { 0.0 } else { 1.0 };
            sample.push(vec![i as f64], y, 1.0).unwrap();
        }
        sample
    }

    fn config() -> MetaCostConfig {
        MetaCostConfig::default()
            .n_iterations(4)
            .seed(5)
            .cost_matrix(CostMatrix::new(vec![
                vec![  0.0, 1.0],
                vec![100.0, 0.0],
            ]).unwrap())
    }

    #[test]
    fn not_built_before_build() {
        let sample = toy();
        let meta = MetaCost::init(config(), PriorClassifier::new());
        assert!(!meta.is_built());
        assert!(matches!(meta.classify(&sample, 0), Err(Error::NotBuilt)));
        assert!(matches!(meta.distribution(&sample, 0), Err(Error::NotBuilt)));
        assert_eq!(meta.to_string(), "MetaCost: No model built yet.");
    }

    #[test]
    fn build_relabels_and_trains_final_model() {
        let sample = toy();
        let mut meta = MetaCost::init(config(), PriorClassifier::new());
        meta.build(&sample, PriorClassifier::new).unwrap();

        assert!(meta.is_built());
        assert_eq!(meta.relabeled_classes(), &[1; 8]);
        assert_eq!(meta.n_relabeled(), 6);
        assert_eq!(meta.classify(&sample, 0).unwrap(), 1);
        assert_eq!(meta.classify_all(&sample).unwrap(), vec![1; 8]);

        let report = meta.to_string();
        assert!(report.starts_with("MetaCost cost sensitive classifier induction"));
        assert!(report.contains("PriorClassifier predicts class value: b"));
        assert!(report.contains("Cost Matrix"));
    }

    #[test]
    fn failed_build_resets_state() {
        let sample = toy();
        let mut meta = MetaCost::init(config(), PriorClassifier::new());
        meta.build(&sample, PriorClassifier::new).unwrap();

        meta.config.cost_source = CostMatrixSource::Supplied(
            CostMatrix::uniform(3)
        );
        assert!(meta.build(&sample, PriorClassifier::new).is_err());
        assert!(!meta.is_built());
        assert!(meta.cost_matrix().is_none());
        assert!(matches!(meta.classify(&sample, 0), Err(Error::NotBuilt)));
    }
}
