use fixedbitset::FixedBitSet;
use rand::Rng;
use rand::distributions::{Distribution, WeightedIndex};

use crate::Sample;
use crate::error::{Error, Result};


/// A bootstrap sample together with the rows it was drawn from.
#[derive(Debug, Clone)]
pub struct Bootstrap {
    /// The resampled rows, in draw order.
    pub sample: Sample,
    /// `indices[k]` is the original row of the `k`-th drawn row.
    pub indices: Vec<usize>,
    /// Rows of the original sample drawn at least once.
    pub in_bag: FixedBitSet,
}


/// Draws samples with replacement.
///
/// The size of a bootstrap sample is
/// `round(bag_size_percent / 100 * n_sample)`, and at least `1`.
/// Rows are drawn uniformly or, with [`BootstrapSampler::with_weights`],
/// proportionally to the instance weights.
/// A drawn row keeps its weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BootstrapSampler {
    bag_size_percent: usize,
    with_weights: bool,
}


impl BootstrapSampler {
    /// Construct a new sampler drawing `bag_size_percent` percent
    /// of the rows.
    pub fn new(bag_size_percent: usize) -> Self {
        Self { bag_size_percent, with_weights: false, }
    }


    /// Draw rows proportionally to the instance weights.
    /// Default is `false`.
    pub fn with_weights(mut self, flag: bool) -> Self {
        self.with_weights = flag;
        self
    }


    /// Number of rows drawn from a sample of `n_sample` rows.
    #[inline]
    pub fn target_size(&self, n_sample: usize) -> usize {
        let size = self.bag_size_percent as f64 / 100f64 * n_sample as f64;
        (size.round() as usize).max(1)
    }


    /// Draw the row indices of a bootstrap sample.
    /// `rng` is consumed sequentially,
    /// so the same generator state gives the same indices.
    pub fn draw_indices<R>(&self, sample: &Sample, rng: &mut R)
        -> Result<Vec<usize>>
        where R: Rng,
    {
        let n_sample = sample.shape().0;
        if n_sample == 0 {
            return Err(Error::EmptyDataset);
        }
        let size = self.target_size(n_sample);

        if self.with_weights {
            let dist = WeightedIndex::new(sample.weights())
                .map_err(|e| Error::configuration(
                    format!("cannot resample with weights: {e}")
                ))?;
            Ok((0..size).map(|_| dist.sample(rng)).collect())
        } else {
            Ok((0..size).map(|_| rng.gen_range(0..n_sample)).collect())
        }
    }


    /// Draw a bootstrap sample from `sample`.
    pub fn sample<R>(&self, sample: &Sample, rng: &mut R) -> Result<Bootstrap>
        where R: Rng,
    {
        let indices = self.draw_indices(sample, rng)?;

        let mut in_bag = FixedBitSet::with_capacity(sample.shape().0);
        indices.iter()
            .for_each(|&i| { in_bag.insert(i); });

        let sample = sample.subsample(&indices);
        Ok(Bootstrap { sample, indices, in_bag })
    }
}
