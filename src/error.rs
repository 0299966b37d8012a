//! Error type shared by every component of this crate.

use std::io;
use std::path::PathBuf;
use thiserror::Error;


/// A boxed error raised by a base model.
pub type ModelError = Box<dyn std::error::Error + Send + Sync + 'static>;


/// `Result` specialized to [`enum@Error`].
pub type Result<T> = std::result::Result<T, Error>;


/// Errors raised while building or querying a cost-sensitive model.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid parameter, e.g., zero bagging iterations.
    #[error("Configuration error: {message}")]
    Configuration {
        /// What is wrong.
        message: String,
    },

    /// The on-demand cost file does not exist.
    #[error("On-demand cost file doesn't exist: {}", path.display())]
    CostMatrixNotFound {
        /// The file that was searched for.
        path: PathBuf,
    },

    /// Cost matrices are defined over discrete classes only.
    #[error("Class attribute \"{attribute}\" must be nominal")]
    UnsupportedClassType {
        /// Name of the class attribute.
        attribute: String,
    },

    /// Two sizes that must agree do not.
    #[error("Dimension mismatch ({context}): expected {expected}, got {got}")]
    DimensionMismatch {
        /// Which sizes were compared.
        context: &'static str,
        /// The required size.
        expected: usize,
        /// The actual size.
        got: usize,
    },

    /// A class distribution has an entry that is
    /// negative, infinite or NaN.
    #[error("Invalid class distribution ({context}): entry {index} is {value}")]
    InvalidDistribution {
        /// Where the distribution came from.
        context: &'static str,
        /// Position of the first invalid entry.
        index: usize,
        /// The invalid entry.
        value: f64,
    },

    /// Bootstrap sampling from a sample without rows.
    #[error("Cannot draw a bootstrap sample from an empty sample")]
    EmptyDataset,

    /// A prediction was requested before a successful build.
    #[error("No model built yet")]
    NotBuilt,

    /// An error raised by a base model, passed through as is.
    #[error(transparent)]
    Model(ModelError),

    /// Malformed cost file or CSV input.
    #[error("Parse error at line {line}: {message}")]
    Parse {
        /// 1-based line number, `0` if unknown.
        line: usize,
        /// What is wrong.
        message: String,
    },

    /// File access failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The configuration file is not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A `DataFrame` column could not be converted.
    #[error("DataFrame error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),
}


impl Error {
    /// Wraps a base model error without altering its message or source.
    pub fn model<E>(error: E) -> Self
        where E: std::error::Error + Send + Sync + 'static
    {
        Self::Model(Box::new(error))
    }


    pub(crate) fn configuration<S: ToString>(message: S) -> Self {
        Self::Configuration { message: message.to_string() }
    }


    /// Returns the underlying base model error, if any.
    pub fn model_error(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            Self::Model(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}
