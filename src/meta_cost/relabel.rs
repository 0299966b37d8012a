use rayon::prelude::*;

use crate::{Classifier, Sample};
use crate::bagging::BaggedEnsemble;
use crate::common::checker;
use crate::cost_matrix::CostMatrix;
use crate::error::{Error, Result};


/// Returns a copy of `sample` whose class values are replaced
/// by the class of minimum expected cost.
///
/// For each row, the expected cost of predicting class `j` is
/// `sum_i p[i] * cost[i][j]`, where `p` is the ensemble distribution.
/// The first class attaining the minimum wins.
/// Rows are processed in parallel and written back in row order.
/// `sample` itself is left untouched.
pub fn relabel<M>(
    sample: &Sample,
    ensemble: &BaggedEnsemble<M>,
    cost: &CostMatrix,
) -> Result<Sample>
    where M: Classifier + Sync,
{
    checker::nominal_class(sample)?;
    let n_class = sample.n_class();
    if cost.size() != n_class {
        return Err(Error::DimensionMismatch {
            context: "cost matrix vs. class values",
            expected: n_class,
            got: cost.size(),
        });
    }

    let n_sample = sample.shape().0;
    let classes = (0..n_sample).into_par_iter()
        .map(|row| {
            let dist = ensemble.distribution(sample, row)?;
            cost.min_cost_class(&dist)
        })
        .collect::<Result<Vec<usize>>>()?;

    let mut relabeled = sample.clone();
    classes.into_iter()
        .enumerate()
        .for_each(|(row, k)| { relabeled.set_class_index(row, k); });
    Ok(relabeled)
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Attribute, BaggingParams, PriorClassifier};

    fn toy() -> Sample {
        let mut sample = Sample::new(
            "toy",
            vec![Attribute::numeric("x")],
            Attribute::nominal("class", &["a", "b"]),
        );
        // prior with pseudo-counts: a = 4/7, b = 3/7
        sample.push(vec![0.0], 0.0, 1.0).unwrap();
        sample.push(vec![1.0], 0.0, 1.0).unwrap();
        sample.push(vec![2.0], 0.0, 1.0).unwrap();
        sample.push(vec![3.0], 1.0, 1.0).unwrap();
        sample.push(vec![4.0], 1.0, 1.0).unwrap();
        sample
    }

    fn ensemble(sample: &Sample) -> BaggedEnsemble<PriorClassifier> {
        let mut ensemble = BaggedEnsemble::new();
        let params = BaggingParams::default().n_iterations(3);
        ensemble.build(sample, PriorClassifier::new, &params).unwrap();
        ensemble
    }

    #[test]
    fn costly_class_takes_every_row() {
        let sample = toy();
        let ensemble = ensemble(&sample);

        // Missing a "b" costs 100, so predicting "b" is always cheaper.
        let cost = CostMatrix::new(vec![
            vec![0.0, 1.0],
            vec![100.0, 0.0],
        ]).unwrap();
        let relabeled = relabel(&sample, &ensemble, &cost).unwrap();
        assert!((0..5).all(|row| relabeled.class_index(row) == Some(1)));

        // The input keeps its classes.
        assert_eq!(sample.class_index(0), Some(0));
    }

    #[test]
    fn wrong_matrix_size() {
        let sample = toy();
        let ensemble = ensemble(&sample);
        let err = relabel(&sample, &ensemble, &CostMatrix::uniform(3))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::DimensionMismatch { expected: 2, got: 3, .. }
        ));
    }

    #[test]
    fn unbuilt_ensemble() {
        let sample = toy();
        let ensemble = BaggedEnsemble::<PriorClassifier>::new();
        let err = relabel(&sample, &ensemble, &CostMatrix::uniform(2))
            .unwrap_err();
        assert!(matches!(err, Error::NotBuilt));
    }
}
