use std::fs;
use std::path::Path;

use serde::{Serialize, Deserialize};

use crate::bagging::BaggingParams;
use crate::common::checker;
use crate::common::constants::{
    DEFAULT_ITERATIONS,
    DEFAULT_BAG_SIZE_PERCENT,
    DEFAULT_SEED,
};
use crate::cost_matrix::{CostMatrix, CostMatrixSource};
use crate::error::Result;


/// Parameters of [`MetaCost`](crate::MetaCost).
///
/// The configuration is a plain value fixed before the build starts.
/// The cost matrix comes from exactly one [`CostMatrixSource`].
///
/// # Example
/// ```
/// use metacost::{CostMatrix, MetaCostConfig};
///
/// let cost = CostMatrix::new(vec![vec![0.0, 1.0], vec![5.0, 0.0]]).unwrap();
/// let config = MetaCostConfig::default()
///     .n_iterations(20)
///     .bag_size_percent(80)
///     .seed(42)
///     .cost_matrix(cost);
/// assert_eq!(config.n_iterations, 20);
///
/// let json = r#"{ "n_iterations": 5, "cost_source": { "OnDemand": { "directory": "costs" } } }"#;
/// let config = MetaCostConfig::from_json(json).unwrap();
/// assert_eq!(config.n_iterations, 5);
/// assert_eq!(config.bag_size_percent, 100);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetaCostConfig {
    /// Number of bagging iterations. Default is `10`.
    pub n_iterations: usize,
    /// Size of each bag, as a percentage of the training set size.
    /// Default is `100`.
    pub bag_size_percent: usize,
    /// Seed of the random number generator. Default is `1`.
    pub seed: u64,
    /// Where the cost matrix comes from.
    /// Default is on-demand loading from the current directory.
    pub cost_source: CostMatrixSource,
    /// Draw bootstrap rows proportionally to the instance weights.
    /// Default is `false`.
    pub resample_with_weights: bool,
    /// Print the progress of the build. Default is `false`.
    pub verbose: bool,
}


impl Default for MetaCostConfig {
    fn default() -> Self {
        Self {
            n_iterations: DEFAULT_ITERATIONS,
            bag_size_percent: DEFAULT_BAG_SIZE_PERCENT,
            seed: DEFAULT_SEED,
            cost_source: CostMatrixSource::default(),
            resample_with_weights: false,
            verbose: false,
        }
    }
}


impl MetaCostConfig {
    /// Set the number of bagging iterations.
    pub fn n_iterations(mut self, n_iterations: usize) -> Self {
        self.n_iterations = n_iterations;
        self
    }


    /// Set the size of each bag, as a percentage of the training set size.
    pub fn bag_size_percent(mut self, percent: usize) -> Self {
        self.bag_size_percent = percent;
        self
    }


    /// Set the seed of the random number generator.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }


    /// Use the cost matrix `matrix`.
    pub fn cost_matrix(mut self, matrix: CostMatrix) -> Self {
        self.cost_source = CostMatrixSource::Supplied(matrix);
        self
    }


    /// Load the cost file `path` at build time.
    /// The file name shows up in the model report.
    pub fn cost_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.cost_source = CostMatrixSource::file(path);
        self
    }


    /// Load `<directory>/<relation name>.cost` at build time.
    pub fn on_demand_directory<P: AsRef<Path>>(mut self, directory: P) -> Self {
        self.cost_source = CostMatrixSource::on_demand(directory);
        self
    }


    /// Set the cost matrix source.
    pub fn cost_source(mut self, source: CostMatrixSource) -> Self {
        self.cost_source = source;
        self
    }


    /// Resample with instance weights.
    pub fn resample_with_weights(mut self, flag: bool) -> Self {
        self.resample_with_weights = flag;
        self
    }


    /// Set the verbose parameter.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }


    /// Parse a configuration from JSON.
    /// Missing fields take their default values.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }


    /// Read a JSON configuration file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }


    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }


    /// Check the numeric parameters.
    pub fn validate(&self) -> Result<()> {
        checker::bagging_parameters(self.n_iterations, self.bag_size_percent)
    }


    /// The parameters handed to the bagged ensemble.
    pub fn bagging_params(&self) -> BaggingParams {
        BaggingParams::default()
            .n_iterations(self.n_iterations)
            .bag_size_percent(self.bag_size_percent)
            .seed(self.seed)
            .with_weights(self.resample_with_weights)
            .verbose(self.verbose)
    }


    /// Returns the parameters as `(name, value)` pairs.
    pub fn info(&self) -> Vec<(&str, String)> {
        let source = match &self.cost_source {
            CostMatrixSource::Supplied(_) => "supplied".to_string(),
            CostMatrixSource::OnDemand { directory } => {
                format!("on demand from {}", directory.display())
            },
            CostMatrixSource::File { path } => {
                format!("file {}", path.display())
            },
        };
        vec![
            ("# of iterations", self.n_iterations.to_string()),
            ("Bag size [%]", self.bag_size_percent.to_string()),
            ("Seed", self.seed.to_string()),
            ("Cost matrix", source),
            ("Weighted resampling", self.resample_with_weights.to_string()),
        ]
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::path::PathBuf;

    #[test]
    fn defaults() {
        let config = MetaCostConfig::default();
        assert_eq!(config.n_iterations, 10);
        assert_eq!(config.bag_size_percent, 100);
        assert_eq!(config.seed, 1);
        assert!(matches!(config.cost_source, CostMatrixSource::OnDemand { .. }));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn setting_a_matrix_selects_supplied_source() {
        let config = MetaCostConfig::default()
            .cost_matrix(CostMatrix::uniform(2));
        assert_eq!(
            config.cost_source,
            CostMatrixSource::Supplied(CostMatrix::uniform(2)),
        );
    }

    #[test]
    fn cost_file_is_reported() {
        let config = MetaCostConfig::default()
            .cost_file("costs/credit.cost");
        let info = config.info();
        let (_, source) = info.iter()
            .find(|(name, _)| *name == "Cost matrix")
            .unwrap();
        assert!(source.starts_with("file "));
        assert!(source.ends_with("credit.cost"));

        let config = MetaCostConfig::default()
            .cost_matrix(CostMatrix::uniform(2));
        assert!(config.info().contains(&("Cost matrix", "supplied".to_string())));
    }

    #[test]
    fn json_roundtrip() {
        let config = MetaCostConfig::default()
            .seed(9)
            .cost_matrix(CostMatrix::uniform(3));
        let json = config.to_json().unwrap();
        let back = MetaCostConfig::from_json(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn json_on_demand_source() {
        let json = r#"{"cost_source": {"OnDemand": {"directory": "/costs"}}}"#;
        let config = MetaCostConfig::from_json(json).unwrap();
        assert_eq!(
            config.cost_source.cost_file("credit"),
            Some(PathBuf::from("/costs/credit.cost")),
        );
    }

    #[test]
    fn invalid_json() {
        let err = MetaCostConfig::from_json("{ n_iterations: }").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn bagging_params_follow_config() {
        let params = MetaCostConfig::default()
            .n_iterations(3)
            .bag_size_percent(50)
            .seed(11)
            .resample_with_weights(true)
            .bagging_params();
        assert_eq!(params.n_iterations, 3);
        assert_eq!(params.bag_size_percent, 50);
        assert_eq!(params.seed, 11);
        assert!(params.with_weights);
    }
}
