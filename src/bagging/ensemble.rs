use colored::Colorize;
use fixedbitset::FixedBitSet;
use rand::prelude::*;
use rayon::prelude::*;
use serde::{Serialize, Deserialize};

use crate::{Classifier, Sample};
use crate::common::{checker, utils};
use crate::common::constants::{
    DEFAULT_ITERATIONS,
    DEFAULT_BAG_SIZE_PERCENT,
    DEFAULT_SEED,
    PRINT_WIDTH,
};
use crate::error::{Error, Result};
use super::bootstrap::BootstrapSampler;


/// Parameters of a bagging run.
///
/// ```
/// use metacost::BaggingParams;
/// let params = BaggingParams::default()
///     .n_iterations(25)
///     .bag_size_percent(80)
///     .seed(777);
/// assert_eq!(params.seed, 777);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaggingParams {
    /// Number of bagging iterations, that is, ensemble members.
    pub n_iterations: usize,
    /// Size of each bag, as a percentage of the training set size.
    pub bag_size_percent: usize,
    /// Seed of the random number generator.
    pub seed: u64,
    /// Draw rows proportionally to the instance weights.
    pub with_weights: bool,
    /// Print one line per trained bag.
    pub verbose: bool,
}


impl Default for BaggingParams {
    fn default() -> Self {
        Self {
            n_iterations: DEFAULT_ITERATIONS,
            bag_size_percent: DEFAULT_BAG_SIZE_PERCENT,
            seed: DEFAULT_SEED,
            with_weights: false,
            verbose: false,
        }
    }
}


impl BaggingParams {
    /// Set the number of bagging iterations.
    /// Default value is `10`.
    pub fn n_iterations(mut self, n_iterations: usize) -> Self {
        self.n_iterations = n_iterations;
        self
    }


    /// Set the bag size percentage.
    /// Default value is `100`.
    pub fn bag_size_percent(mut self, percent: usize) -> Self {
        self.bag_size_percent = percent;
        self
    }


    /// Set the seed.
    /// Default value is `1`.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }


    /// Resample with instance weights.
    /// Default value is `false`.
    pub fn with_weights(mut self, flag: bool) -> Self {
        self.with_weights = flag;
        self
    }


    /// Set the verbose parameter.
    /// Default value is `false`.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}


/// Derive one seed per bagging iteration from `seed`.
///
/// A single generator seeded by `seed` is consumed sequentially,
/// so iteration `i` always gets the `i`-th output
/// regardless of the order in which bags are trained.
pub fn derive_seeds(seed: u64, n_iterations: usize) -> Vec<u64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n_iterations).map(|_| rng.gen::<u64>())
        .collect()
}


/// An ensemble of models, each trained on its own bootstrap sample.
/// The ensemble predicts the unweighted mean of the
/// members' class distributions.
///
/// Every member takes part in every prediction,
/// including predictions for rows that were in its bag.
///
/// # Example
/// ```
/// use metacost::prelude::*;
///
/// let mut sample = Sample::new(
///     "toy",
///     vec![Attribute::numeric("x")],
///     Attribute::nominal("class", &["a", "b"]),
/// );
/// for i in 0..10 {
///     sample.push(vec![i as f64], (i % 2) as f64, 1.0).unwrap();
/// }
///
/// let mut ensemble = BaggedEnsemble::new();
/// let params = BaggingParams::default().n_iterations(5).seed(3);
/// ensemble.build(&sample, PriorClassifier::new, &params).unwrap();
///
/// let dist = ensemble.distribution(&sample, 0).unwrap();
/// assert_eq!(dist.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct BaggedEnsemble<M> {
    models: Vec<M>,
    in_bag: Vec<FixedBitSet>,
}


impl<M> Default for BaggedEnsemble<M> {
    fn default() -> Self {
        Self { models: Vec::new(), in_bag: Vec::new(), }
    }
}


impl<M> BaggedEnsemble<M> {
    /// Construct an empty ensemble.
    pub fn new() -> Self {
        Self::default()
    }


    /// Number of members.
    pub fn len(&self) -> usize {
        self.models.len()
    }


    /// Returns `true` if the ensemble has not been built.
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }


    /// Returns the members in iteration order.
    pub fn models(&self) -> &[M] {
        &self.models[..]
    }


    /// Rows drawn into the bag of the `i`-th member.
    pub fn in_bag(&self, i: usize) -> &FixedBitSet {
        &self.in_bag[i]
    }


    /// Number of members whose bag does not contain `row`.
    pub fn out_of_bag_count(&self, row: usize) -> usize {
        self.in_bag.iter()
            .filter(|bits| !bits.contains(row))
            .count()
    }


    /// Decompose the ensemble into its members.
    pub fn into_models(self) -> Vec<M> {
        self.models
    }
}


impl<M> BaggedEnsemble<M>
    where M: Classifier,
{
    /// Train `params.n_iterations` fresh models from `factory`,
    /// each on its own bootstrap sample of `sample`.
    ///
    /// Bags are trained in parallel.
    /// The first failure aborts the build and leaves the ensemble empty.
    pub fn build<F>(
        &mut self,
        sample: &Sample,
        factory: F,
        params: &BaggingParams,
    ) -> Result<()>
        where F: Fn() -> M + Sync,
              M: Send,
    {
        self.models.clear();
        self.in_bag.clear();

        checker::bagging_parameters(
            params.n_iterations,
            params.bag_size_percent,
        )?;
        if sample.is_empty() {
            return Err(Error::EmptyDataset);
        }

        let sampler = BootstrapSampler::new(params.bag_size_percent)
            .with_weights(params.with_weights);
        let seeds = derive_seeds(params.seed, params.n_iterations);

        let bags = seeds.into_par_iter()
            .map(|seed| -> Result<(M, FixedBitSet)> {
                let mut rng = StdRng::seed_from_u64(seed);
                let bag = sampler.sample(sample, &mut rng)?;

                let mut model = factory();
                model.train(&bag.sample)
                    .map_err(Error::model)?;
                Ok((model, bag.in_bag))
            })
            .collect::<Result<Vec<_>>>()?;

        let (models, in_bag): (Vec<_>, Vec<_>) = bags.into_iter().unzip();
        self.models = models;
        self.in_bag = in_bag;

        if params.verbose {
            self.print_bags(sample.shape().0);
        }
        Ok(())
    }


    /// The mean of the members' class distributions
    /// for the `row`-th instance of `sample`.
    ///
    /// Every member output must be finite and nonnegative.
    /// The mean is rescaled to sum to `1`
    /// unless all members return zeros.
    pub fn distribution(&self, sample: &Sample, row: usize)
        -> Result<Vec<f64>>
    {
        if self.models.is_empty() {
            return Err(Error::NotBuilt);
        }

        let n_class = sample.n_class();
        let mut mean = vec![0f64; n_class];
        for model in &self.models {
            let dist = model.distribution(sample, row)
                .map_err(Error::model)?;
            checker::distribution_length(
                "ensemble member distribution",
                &dist,
                n_class,
            )?;
            checker::distribution_values(
                "ensemble member distribution",
                &dist,
            )?;
            utils::accumulate(&mut mean, &dist);
        }

        utils::normalize(&mut mean);
        Ok(mean)
    }


    fn print_bags(&self, n_sample: usize) {
        let n_models = self.models.len();
        for (i, bits) in self.in_bag.iter().enumerate() {
            let n_in = bits.count_ones(..);
            println!(
                "{}    {}    {}",
                format!("  [BAG {:>PRINT_WIDTH$}/{n_models}]", i + 1).bold().red(),
                format!("[IN-BAG {:>PRINT_WIDTH$}]", n_in).bold().green(),
                format!("[OOB {:>PRINT_WIDTH$}]", n_sample - n_in).bold().yellow(),
            );
        }
    }
}


impl<M> BaggedEnsemble<M>
    where M: Classifier + Sync,
{
    /// The mean class distribution of every row in `sample`,
    /// computed in parallel.
    pub fn distribution_all(&self, sample: &Sample) -> Result<Vec<Vec<f64>>> {
        let n_sample = sample.shape().0;
        (0..n_sample).into_par_iter()
            .map(|row| self.distribution(sample, row))
            .collect()
    }
}
