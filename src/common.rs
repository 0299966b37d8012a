//! Defines some common functions used in this library.

/// Defines numerical constants.
pub mod constants;

/// Defines some useful functions such as arg-min/arg-max.
pub mod utils;

/// Defines some checker functions.
pub(crate) mod checker;
