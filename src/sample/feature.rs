use std::ops::Index;
use std::slice::Iter;

use serde::{Serialize, Deserialize};

use crate::common::constants::BUFFER_SIZE;


/// The sentinel for a missing value.
/// Missing values are never treated as `0`.
pub const MISSING: f64 = f64::NAN;


/// Returns `true` if `value` is the missing-value sentinel.
#[inline(always)]
pub fn is_missing(value: f64) -> bool {
    value.is_nan()
}


/// The value type of an attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttributeKind {
    /// Real-valued attribute.
    Numeric,
    /// Discrete attribute. A value is stored as the index into this list.
    Nominal(Vec<String>),
}


/// Name and value type of a column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    name: String,
    kind: AttributeKind,
}


impl Attribute {
    /// Construct a numeric attribute.
    pub fn numeric<T: ToString>(name: T) -> Self {
        Self { name: name.to_string(), kind: AttributeKind::Numeric, }
    }


    /// Construct a nominal attribute with the given values.
    pub fn nominal<T, S>(name: T, values: &[S]) -> Self
        where T: ToString,
              S: ToString,
    {
        let values = values.iter()
            .map(|v| v.to_string())
            .collect();
        Self { name: name.to_string(), kind: AttributeKind::Nominal(values), }
    }


    /// Attribute name.
    pub fn name(&self) -> &str {
        &self.name
    }


    /// Attribute kind.
    pub fn kind(&self) -> &AttributeKind {
        &self.kind
    }


    /// Returns `true` if the attribute is nominal.
    pub fn is_nominal(&self) -> bool {
        matches!(self.kind, AttributeKind::Nominal(_))
    }


    /// Number of nominal values; `0` for a numeric attribute.
    pub fn n_values(&self) -> usize {
        match &self.kind {
            AttributeKind::Numeric => 0,
            AttributeKind::Nominal(values) => values.len(),
        }
    }


    /// Returns the label of the `index`-th nominal value.
    pub fn value(&self, index: usize) -> Option<&str> {
        match &self.kind {
            AttributeKind::Numeric => None,
            AttributeKind::Nominal(values) => values.get(index)
                .map(|v| v.as_str()),
        }
    }


    /// Returns the index of the nominal value `label`.
    pub fn index_of(&self, label: &str) -> Option<usize> {
        match &self.kind {
            AttributeKind::Numeric => None,
            AttributeKind::Nominal(values) => values.iter()
                .position(|v| v == label),
        }
    }
}


/// Dense column of feature values.
#[derive(Debug, Clone)]
pub struct Feature {
    pub(super) attribute: Attribute,
    pub(super) vals: Vec<f64>,
}


impl Feature {
    /// Construct an empty column for `attribute`.
    pub fn new(attribute: Attribute) -> Self {
        Self { attribute, vals: Vec::with_capacity(BUFFER_SIZE), }
    }


    /// Construct an empty numeric column.
    pub fn numeric<T: ToString>(name: T) -> Self {
        Self::new(Attribute::numeric(name))
    }


    /// Get the feature name.
    pub fn name(&self) -> &str {
        self.attribute.name()
    }


    /// Get the attribute describing this column.
    pub fn attribute(&self) -> &Attribute {
        &self.attribute
    }


    pub(super) fn append(&mut self, val: f64) {
        self.vals.push(val);
    }


    /// Returns an iterator over the values.
    pub fn iter(&self) -> Iter<'_, f64> {
        self.vals.iter()
    }


    /// Returns the number of values.
    pub fn len(&self) -> usize {
        self.vals.len()
    }


    /// Returns `true` if the column has no value.
    pub fn is_empty(&self) -> bool {
        self.vals.is_empty()
    }


    /// Number of missing values in this column.
    pub fn missing_count(&self) -> usize {
        self.vals.iter()
            .filter(|&&v| is_missing(v))
            .count()
    }
}


impl Index<usize> for Feature {
    type Output = f64;

    fn index(&self, idx: usize) -> &Self::Output {
        &self.vals[idx]
    }
}
