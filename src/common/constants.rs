//! Constants shared by the crate.

/// Initial capacity of a feature column.
pub const BUFFER_SIZE: usize = 256;

/// Default number of bagging iterations.
pub const DEFAULT_ITERATIONS: usize = 10;

/// Default bag size, as a percentage of the training set size.
pub const DEFAULT_BAG_SIZE_PERCENT: usize = 100;

/// Default seed of the random number generator.
pub const DEFAULT_SEED: u64 = 1;

/// Extension of the cost files loaded on demand.
pub const COST_FILE_EXTENSION: &str = ".cost";

/// Column width used in verbose output.
pub(crate) const PRINT_WIDTH: usize = 6;
