//! This file defines some functions that checks some pre-conditions
//! E.g., the length of a class distribution.

use crate::error::{Error, Result};
use crate::Sample;


/// Check that the class attribute of `sample` is nominal.
#[inline(always)]
pub(crate) fn nominal_class(sample: &Sample) -> Result<()> {
    let class = sample.class_attribute();
    if class.is_nominal() {
        Ok(())
    } else {
        Err(Error::UnsupportedClassType {
            attribute: class.name().to_string(),
        })
    }
}


/// Check that a distribution has one entry per class.
#[inline(always)]
pub(crate) fn distribution_length(
    context: &'static str,
    dist: &[f64],
    n_class: usize,
) -> Result<()>
{
    if dist.len() == n_class {
        Ok(())
    } else {
        Err(Error::DimensionMismatch {
            context,
            expected: n_class,
            got: dist.len(),
        })
    }
}


/// Check that every entry of `dist` is a finite nonnegative real.
#[inline(always)]
pub(crate) fn distribution_values(context: &'static str, dist: &[f64])
    -> Result<()>
{
    match dist.iter().position(|p| !(p.is_finite() && *p >= 0f64)) {
        None => Ok(()),
        Some(index) => Err(Error::InvalidDistribution {
            context,
            index,
            value: dist[index],
        }),
    }
}


/// Check the bagging parameters.
#[inline(always)]
pub(crate) fn bagging_parameters(n_iterations: usize, bag_size_percent: usize)
    -> Result<()>
{
    if n_iterations == 0 {
        return Err(Error::configuration(
            "the number of bagging iterations must be positive"
        ));
    }
    if bag_size_percent == 0 {
        return Err(Error::configuration(
            "the bag size percentage must be positive"
        ));
    }
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bagging_parameters() {
        assert!(bagging_parameters(10, 100).is_ok());
        assert!(bagging_parameters(1, 1).is_ok());
        assert!(matches!(
            bagging_parameters(0, 100),
            Err(Error::Configuration { .. })
        ));
        assert!(matches!(
            bagging_parameters(10, 0),
            Err(Error::Configuration { .. })
        ));
    }

    #[test]
    fn test_distribution_values() {
        assert!(distribution_values("test", &[0.0, 0.25, 0.75]).is_ok());
        assert!(distribution_values("test", &[]).is_ok());

        let err = distribution_values("test", &[0.5, f64::NAN]).unwrap_err();
        assert!(matches!(err, Error::InvalidDistribution { index: 1, .. }));

        let err = distribution_values("test", &[-0.1, 1.1]).unwrap_err();
        assert!(matches!(err, Error::InvalidDistribution { index: 0, .. }));

        let err = distribution_values("test", &[f64::INFINITY]).unwrap_err();
        assert!(matches!(err, Error::InvalidDistribution { index: 0, .. }));
    }

    #[test]
    fn test_distribution_length() {
        assert!(distribution_length("test", &[0.5, 0.5], 2).is_ok());
        let err = distribution_length("test", &[1.0], 2).unwrap_err();
        assert!(matches!(
            err,
            Error::DimensionMismatch { expected: 2, got: 1, .. }
        ));
    }
}
