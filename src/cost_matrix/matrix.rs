use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use serde::{Serialize, Deserialize};

use crate::common::{checker, utils};
use crate::error::{Error, Result};


/// A square table of misclassification costs.
/// Entry `(i, j)` is the cost of predicting class `j`
/// when the true class is `i`.
///
/// The diagonal is not required to be zero,
/// but every entry must be a finite nonnegative real.
///
/// # Example
/// ```
/// use metacost::CostMatrix;
/// let cost = CostMatrix::new(vec![
///     vec![0.0, 1.0],
///     vec![5.0, 0.0],
/// ]).unwrap();
/// let expected = cost.expected_costs(&[0.6, 0.4]).unwrap();
/// assert_eq!(expected, vec![2.0, 0.6]);
/// assert_eq!(cost.min_cost_class(&[0.6, 0.4]).unwrap(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct CostMatrix {
    n_class: usize,
    // Row-major, `costs[i * n_class + j]`.
    costs: Vec<f64>,
}


impl CostMatrix {
    /// Construct a cost matrix from its rows.
    pub fn new(rows: Vec<Vec<f64>>) -> Result<Self> {
        let n_class = rows.len();
        if n_class == 0 {
            return Err(Error::DimensionMismatch {
                context: "cost matrix size",
                expected: 1,
                got: 0,
            });
        }

        let mut costs = Vec::with_capacity(n_class * n_class);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != n_class {
                return Err(Error::DimensionMismatch {
                    context: "cost matrix row length",
                    expected: n_class,
                    got: row.len(),
                });
            }
            if let Some(c) = row.iter().find(|c| !(c.is_finite() && **c >= 0f64)) {
                return Err(Error::configuration(
                    format!("cost must be a nonnegative real, got {c} in row {i}")
                ));
            }
            costs.extend(row);
        }

        Ok(Self { n_class, costs })
    }


    /// The all-zero matrix of size `n_class`.
    pub fn zeros(n_class: usize) -> Self {
        assert!(n_class > 0, "cost matrix must have at least one class");
        Self { n_class, costs: vec![0f64; n_class * n_class], }
    }


    /// The 0/1 matrix of size `n_class`:
    /// `0` on the diagonal, `1` elsewhere.
    pub fn uniform(n_class: usize) -> Self {
        let mut matrix = Self::zeros(n_class);
        for i in 0..n_class {
            for j in 0..n_class {
                if i != j { matrix.costs[i * n_class + j] = 1f64; }
            }
        }
        matrix
    }


    /// Read a cost matrix in text format.
    ///
    /// ```txt
    /// % comments start with a percent sign
    /// 2 2
    /// 0 1
    /// 5 0
    /// ```
    /// The first line holds the number of rows and columns,
    /// the following lines hold the costs row by row.
    pub fn from_reader<R: Read>(reader: BufReader<R>) -> Result<Self> {
        let mut header: Option<(usize, usize)> = None;
        let mut values = Vec::new();

        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.split('%').next().unwrap_or("").trim();
            if line.is_empty() { continue; }

            let lineno = i + 1;
            match header {
                None => {
                    let dims = line.split_whitespace()
                        .map(|w| w.parse::<usize>())
                        .collect::<std::result::Result<Vec<_>, _>>()
                        .map_err(|e| Error::Parse {
                            line: lineno,
                            message: format!("invalid matrix size: {e}"),
                        })?;
                    if dims.len() != 2 {
                        return Err(Error::Parse {
                            line: lineno,
                            message: "expected `<rows> <columns>`".to_string(),
                        });
                    }
                    header = Some((dims[0], dims[1]));
                },
                Some((_, n_cols)) => {
                    let row = line.split_whitespace()
                        .map(|w| w.parse::<f64>())
                        .collect::<std::result::Result<Vec<_>, _>>()
                        .map_err(|e| Error::Parse {
                            line: lineno,
                            message: format!("invalid cost: {e}"),
                        })?;
                    if row.len() != n_cols {
                        return Err(Error::Parse {
                            line: lineno,
                            message: format!(
                                "expected {n_cols} costs, got {}",
                                row.len(),
                            ),
                        });
                    }
                    values.push(row);
                },
            }
        }

        let (n_rows, n_cols) = header.ok_or(Error::Parse {
            line: 0,
            message: "empty cost matrix".to_string(),
        })?;
        if n_rows != n_cols {
            return Err(Error::DimensionMismatch {
                context: "cost matrix must be square",
                expected: n_rows,
                got: n_cols,
            });
        }
        if values.len() != n_rows {
            return Err(Error::DimensionMismatch {
                context: "cost matrix rows",
                expected: n_rows,
                got: values.len(),
            });
        }
        Self::new(values)
    }


    /// Read a cost matrix file. See [`CostMatrix::from_reader`].
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }


    /// Number of classes.
    pub fn size(&self) -> usize {
        self.n_class
    }


    /// Cost of predicting `predicted` when the truth is `actual`.
    pub fn get(&self, actual: usize, predicted: usize) -> f64 {
        assert!(actual < self.n_class && predicted < self.n_class);
        self.costs[actual * self.n_class + predicted]
    }


    /// Returns the rows of the matrix.
    pub fn rows(&self) -> Vec<Vec<f64>> {
        self.costs.chunks(self.n_class)
            .map(|row| row.to_vec())
            .collect()
    }


    /// Expected cost of each prediction under `distribution`:
    /// `out[j] = sum_i distribution[i] * cost[i][j]`.
    /// Entries of `distribution` must be finite and nonnegative.
    pub fn expected_costs(&self, distribution: &[f64]) -> Result<Vec<f64>> {
        checker::distribution_length(
            "distribution vs. cost matrix",
            distribution,
            self.n_class,
        )?;
        checker::distribution_values(
            "distribution vs. cost matrix",
            distribution,
        )?;

        let mut out = vec![0f64; self.n_class];
        self.costs.chunks(self.n_class)
            .zip(distribution)
            .for_each(|(row, &p)| {
                out.iter_mut()
                    .zip(row)
                    .for_each(|(o, c)| { *o += p * c; });
            });
        Ok(out)
    }


    /// The class with the minimum expected cost under `distribution`.
    /// Ties go to the lowest class index.
    pub fn min_cost_class(&self, distribution: &[f64]) -> Result<usize> {
        let costs = self.expected_costs(distribution)?;
        Ok(utils::min_index(&costs))
    }
}


impl TryFrom<Vec<Vec<f64>>> for CostMatrix {
    type Error = Error;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self> {
        Self::new(rows)
    }
}


impl From<CostMatrix> for Vec<Vec<f64>> {
    fn from(matrix: CostMatrix) -> Self {
        matrix.rows()
    }
}


impl fmt::Display for CostMatrix {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let cells = self.costs.iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>();
        let width = cells.iter()
            .map(|c| c.len())
            .max()
            .unwrap_or(1);

        for row in cells.chunks(self.n_class) {
            let line = row.iter()
                .map(|c| format!("{c:>width$}"))
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(f, " {line}")?;
        }
        Ok(())
    }
}
