use std::path::Path;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::collections::HashMap;
use std::ops::Index;

use polars::prelude::*;
use rayon::prelude::*;

use crate::error::{Error, Result};
use super::feature::*;


/// Token that marks a missing cell in a CSV file.
const MISSING_TOKEN: &str = "?";


/// Struct `Sample` holds a batch sample in column-major format.
///
/// Each row has a feature vector, a class value and a weight.
/// The class value is stored as `f64`;
/// for a nominal class it is the index of the class label.
#[derive(Debug, Clone)]
pub struct Sample {
    pub(super) name: String,
    pub(super) name_to_index: HashMap<String, usize>,
    pub(super) features: Vec<Feature>,
    pub(super) class_attribute: Attribute,
    pub(super) target: Vec<f64>,
    pub(super) weights: Vec<f64>,
    pub(super) n_sample: usize,
    pub(super) n_feature: usize,
}


impl Sample {
    /// Construct an empty sample with the given schema.
    /// Rows are added by [`Sample::push`].
    pub fn new<T: ToString>(
        name: T,
        attributes: Vec<Attribute>,
        class_attribute: Attribute,
    ) -> Self
    {
        let features = attributes.into_iter()
            .map(Feature::new)
            .collect::<Vec<_>>();
        let n_feature = features.len();
        let name_to_index = index_by_name(&features);

        Self {
            name: name.to_string(),
            name_to_index,
            features,
            class_attribute,
            target: Vec::new(),
            weights: Vec::new(),
            n_sample: 0,
            n_feature,
        }
    }


    /// Append a row `(x, y)` with weight `weight`.
    ///
    /// For a nominal class, `y` must be a valid class index
    /// or [`MISSING`].
    pub fn push(&mut self, x: Vec<f64>, y: f64, weight: f64) -> Result<()> {
        if x.len() != self.n_feature {
            return Err(Error::DimensionMismatch {
                context: "feature vector length",
                expected: self.n_feature,
                got: x.len(),
            });
        }
        if !(weight.is_finite() && weight >= 0f64) {
            return Err(Error::configuration(
                format!("instance weight must be nonnegative, got {weight}")
            ));
        }
        if self.class_attribute.is_nominal() && !is_missing(y) {
            let n_class = self.class_attribute.n_values();
            if y.trunc() != y || y < 0f64 || y as usize >= n_class {
                return Err(Error::configuration(
                    format!(
                        "class value {y} is not an index into \
                        {n_class} class values"
                    )
                ));
            }
        }

        self.features.iter_mut()
            .zip(x)
            .for_each(|(col, v)| { col.append(v); });
        self.target.push(y);
        self.weights.push(weight);
        self.n_sample += 1;
        Ok(())
    }


    /// Read a CSV format file to [`Sample`] type.
    /// The relation name is the file stem.
    pub(crate) fn from_csv<P>(file: P, has_header: bool, target: &str)
        -> Result<Self>
        where P: AsRef<Path>,
    {
        let path = file.as_ref();
        let name = path.file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        Ok(Self::from_reader(reader, has_header, target)?.with_name(name))
    }


    /// Read a CSV from [`BufReader`].
    ///
    /// If the CSV has no header row,
    /// the columns are named `Feat. [1]`, `Feat. [2]`, ...
    /// A column becomes nominal if some cell is not a number.
    /// The class column `target` is always nominal;
    /// its labels are indexed in order of first appearance.
    /// Cells `?` or empty cells are missing values.
    pub fn from_reader<R>(reader: BufReader<R>, has_header: bool, target: &str)
        -> Result<Self>
        where R: Read,
    {
        let mut lines = reader.lines().enumerate();

        let mut names = Vec::new();
        if has_header {
            let (_, line) = lines.next()
                .ok_or(Error::Parse {
                    line: 1,
                    message: "missing header row".to_string(),
                })?;
            names = line?.split(',')
                .map(|name| name.trim().to_string())
                .collect::<Vec<_>>();
        }

        let mut rows: Vec<Vec<String>> = Vec::new();
        for (i, line) in lines {
            let line = line?;
            if line.trim().is_empty() { continue; }

            let cells = line.split(',')
                .map(|x| x.trim().to_string())
                .collect::<Vec<_>>();

            if names.is_empty() {
                names = (1..=cells.len()).map(|k| format!("Feat. [{k}]"))
                    .collect();
            }
            if cells.len() != names.len() {
                return Err(Error::Parse {
                    line: i + 1,
                    message: format!(
                        "expected {} cells, got {}",
                        names.len(),
                        cells.len(),
                    ),
                });
            }
            rows.push(cells);
        }

        let class_col = names.iter()
            .position(|name| name == target)
            .ok_or_else(|| Error::Parse {
                line: 1,
                message: format!("the target class \"{target}\" does not exist"),
            })?;

        let mut columns = (0..names.len()).into_par_iter()
            .map(|j| {
                let cells = rows.iter()
                    .map(|row| row[j].as_str())
                    .collect::<Vec<_>>();
                column_from_cells(&names[j], &cells, j == class_col)
            })
            .collect::<Vec<_>>();

        let (class_attribute, target) = columns.remove(class_col);
        let features = columns.into_iter()
            .map(|(attribute, vals)| Feature { attribute, vals })
            .collect::<Vec<_>>();

        let n_sample = target.len();
        let n_feature = features.len();
        let name_to_index = index_by_name(&features);
        let sample = Self {
            name: String::new(),
            name_to_index,
            features,
            class_attribute,
            target,
            weights: vec![1f64; n_sample],
            n_sample,
            n_feature,
        };
        Ok(sample)
    }


    /// Convert `polars::DataFrame` and `polars::Series` into `Sample`.
    /// This method takes the ownership for the given pair
    /// `data` and `target`.
    /// Every column of `data` is cast to `f64`;
    /// `target` is read as nominal labels in order of first appearance.
    /// Nulls become missing values.
    pub fn from_dataframe<T: ToString>(
        name: T,
        data: DataFrame,
        target: Series,
    ) -> Result<Self>
    {
        let (n_sample, n_feature) = data.shape();
        if target.len() != n_sample {
            return Err(Error::DimensionMismatch {
                context: "target length",
                expected: n_sample,
                got: target.len(),
            });
        }

        let features = data.get_columns()
            .iter()
            .map(|series| -> Result<Feature> {
                let vals = series.cast(&DataType::Float64)?
                    .f64()?
                    .into_iter()
                    .map(|v| v.unwrap_or(MISSING))
                    .collect::<Vec<_>>();
                let attribute = Attribute::numeric(series.name());
                Ok(Feature { attribute, vals })
            })
            .collect::<Result<Vec<_>>>()?;

        let labels = target.cast(&DataType::Utf8)?;
        let labels = labels.utf8()?
            .into_iter()
            .map(|v| v.unwrap_or(MISSING_TOKEN))
            .collect::<Vec<_>>();
        let (class_attribute, target) = nominal_column(target.name(), &labels);

        let name_to_index = index_by_name(&features);
        let sample = Self {
            name: name.to_string(),
            name_to_index,
            features,
            class_attribute,
            target,
            weights: vec![1f64; n_sample],
            n_sample,
            n_feature,
        };
        Ok(sample)
    }


    /// Set the relation name.
    pub fn with_name<T: ToString>(mut self, name: T) -> Self {
        self.name = name.to_string();
        self
    }


    /// The relation name of this sample.
    /// On-demand cost files are looked up by this name.
    pub fn name(&self) -> &str {
        &self.name
    }


    /// Returns the pair of the number of examples and
    /// the number of features
    pub fn shape(&self) -> (usize, usize) {
        (self.n_sample, self.n_feature)
    }


    /// Returns `true` if the sample has no row.
    pub fn is_empty(&self) -> bool {
        self.n_sample == 0
    }


    /// Returns a slice of the features.
    pub fn features(&self) -> &[Feature] {
        &self.features[..]
    }


    /// Returns the class attribute.
    pub fn class_attribute(&self) -> &Attribute {
        &self.class_attribute
    }


    /// Number of class values; `0` if the class is numeric.
    pub fn n_class(&self) -> usize {
        self.class_attribute.n_values()
    }


    /// Returns the slice of class values.
    pub fn target(&self) -> &[f64] {
        &self.target[..]
    }


    /// Returns the class index of the `row`-th instance,
    /// or `None` if the class is missing or numeric.
    pub fn class_index(&self, row: usize) -> Option<usize> {
        let y = self.target[row];
        if !self.class_attribute.is_nominal() || is_missing(y) {
            None
        } else {
            Some(y as usize)
        }
    }


    /// Overwrite the class of the `row`-th instance
    /// with the class index `class`.
    pub fn set_class_index(&mut self, row: usize, class: usize) {
        assert!(
            class < self.n_class(),
            "class index {class} out of range for {} classes",
            self.n_class(),
        );
        self.target[row] = class as f64;
    }


    /// Returns the slice of instance weights.
    pub fn weights(&self) -> &[f64] {
        &self.weights[..]
    }


    /// Returns the weight of the `row`-th instance.
    pub fn weight(&self, row: usize) -> f64 {
        self.weights[row]
    }


    /// Sum of the instance weights.
    pub fn total_weight(&self) -> f64 {
        self.weights.iter().sum()
    }


    /// Returns the `idx`-th instance `(x, y)`.
    pub fn at(&self, idx: usize) -> (Vec<f64>, f64) {
        let x = self.features.iter()
            .map(|feat| feat[idx])
            .collect::<Vec<f64>>();
        let y = self.target[idx];

        (x, y)
    }


    /// Construct a new sample from the rows `ix`, in that order.
    /// A row may appear more than once.
    /// Features, class values and weights are copied.
    pub fn subsample<T>(&self, ix: T) -> Sample
        where T: AsRef<[usize]>
    {
        let ix = ix.as_ref();
        let features = self.features.par_iter()
            .map(|feat| {
                let vals = ix.iter()
                    .map(|&i| feat[i])
                    .collect::<Vec<_>>();
                Feature { attribute: feat.attribute.clone(), vals }
            })
            .collect::<Vec<_>>();
        let target = ix.iter()
            .map(|&i| self.target[i])
            .collect::<Vec<_>>();
        let weights = ix.iter()
            .map(|&i| self.weights[i])
            .collect::<Vec<_>>();

        Self {
            name: self.name.clone(),
            name_to_index: self.name_to_index.clone(),
            features,
            class_attribute: self.class_attribute.clone(),
            target,
            weights,
            n_sample: ix.len(),
            n_feature: self.n_feature,
        }
    }
}


fn index_by_name(features: &[Feature]) -> HashMap<String, usize> {
    features.iter()
        .enumerate()
        .map(|(i, f)| (f.name().to_string(), i))
        .collect()
}


fn is_missing_token(cell: &str) -> bool {
    cell.is_empty() || cell == MISSING_TOKEN
}


/// Convert a column of CSV cells into an attribute and its values.
fn column_from_cells(name: &str, cells: &[&str], is_class: bool)
    -> (Attribute, Vec<f64>)
{
    if !is_class {
        let numeric = cells.iter()
            .filter(|cell| !is_missing_token(cell))
            .map(|cell| cell.parse::<f64>())
            .collect::<std::result::Result<Vec<_>, _>>();
        if numeric.is_ok() {
            let vals = cells.iter()
                .map(|cell| {
                    if is_missing_token(cell) {
                        MISSING
                    } else {
                        cell.parse::<f64>().unwrap_or(MISSING)
                    }
                })
                .collect();
            return (Attribute::numeric(name), vals);
        }
    }
    nominal_column(name, cells)
}


/// Index the labels in order of first appearance.
fn nominal_column(name: &str, cells: &[&str]) -> (Attribute, Vec<f64>) {
    let mut values: Vec<String> = Vec::new();
    let vals = cells.iter()
        .map(|&cell| {
            if is_missing_token(cell) { return MISSING; }
            let k = values.iter()
                .position(|v| v == cell)
                .unwrap_or_else(|| {
                    values.push(cell.to_string());
                    values.len() - 1
                });
            k as f64
        })
        .collect();
    (Attribute::nominal(name, &values), vals)
}


impl<S> Index<S> for Sample
    where S: AsRef<str>
{
    type Output = Feature;

    fn index(&self, name: S) -> &Self::Output {
        let name: &str = name.as_ref();
        let k = *self.name_to_index.get(name)
            .unwrap_or_else(|| panic!("The feature \"{name}\" does not exist"));
        &self.features[k]
    }
}
