use std::path::{Path, PathBuf};

use serde::{Serialize, Deserialize};

use crate::common::constants::COST_FILE_EXTENSION;
use crate::error::{Error, Result};
use super::matrix::CostMatrix;


/// Where the cost matrix of a build comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CostMatrixSource {
    /// Use this matrix.
    Supplied(CostMatrix),
    /// Load `<directory>/<relation name>.cost` when the build starts.
    OnDemand {
        /// Directory searched for cost files.
        directory: PathBuf,
    },
    /// Load this cost file when the build starts,
    /// whatever the relation name.
    File {
        /// Path to the cost file.
        path: PathBuf,
    },
}


impl Default for CostMatrixSource {
    fn default() -> Self {
        Self::OnDemand { directory: PathBuf::from("."), }
    }
}


impl From<CostMatrix> for CostMatrixSource {
    fn from(matrix: CostMatrix) -> Self {
        Self::Supplied(matrix)
    }
}


impl CostMatrixSource {
    /// Search `directory` for cost files.
    /// If `directory` is not a directory, its parent is searched instead.
    pub fn on_demand<P: AsRef<Path>>(directory: P) -> Self {
        let directory = directory.as_ref();
        let directory = if directory.is_dir() {
            directory.to_path_buf()
        } else {
            directory.parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."))
        };
        Self::OnDemand { directory }
    }


    /// Always load the cost file `path`.
    pub fn file<P: AsRef<Path>>(path: P) -> Self {
        Self::File { path: path.as_ref().to_path_buf() }
    }


    /// The file loaded for the relation `relation`.
    /// Returns `None` for a supplied matrix.
    pub fn cost_file(&self, relation: &str) -> Option<PathBuf> {
        match self {
            Self::Supplied(_) => None,
            Self::OnDemand { directory } => {
                Some(on_demand_file(directory, relation))
            },
            Self::File { path } => Some(path.clone()),
        }
    }


    /// Returns the cost matrix for the relation `relation`.
    pub fn resolve(&self, relation: &str) -> Result<CostMatrix> {
        match self {
            Self::Supplied(matrix) => Ok(matrix.clone()),
            Self::OnDemand { directory } => {
                load(on_demand_file(directory, relation))
            },
            Self::File { path } => load(path.clone()),
        }
    }
}


fn on_demand_file(directory: &Path, relation: &str) -> PathBuf {
    directory.join(format!("{relation}{COST_FILE_EXTENSION}"))
}


fn load(path: PathBuf) -> Result<CostMatrix> {
    if !path.is_file() {
        return Err(Error::CostMatrixNotFound { path });
    }
    CostMatrix::from_file(path)
}
