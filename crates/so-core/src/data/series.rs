//! Series data structure for holding a column of observed values
//!
//! A Series is a one-dimensional typed array. Crosstab input is usually
//! supplied as two Series (row and column variable) plus an optional
//! numeric weight Series.

use std::collections::BTreeSet;

use ndarray::Array1;

use super::*;

/// A Series is a typed, one-dimensional array of data
#[derive(Clone, Debug, PartialEq)]
pub enum Series {
    /// Floating point numbers (f64); NaN marks system-missing
    Float(FloatArray),
    /// Integer numbers (i64)
    Int(IntArray),
    /// String values
    String(StringArray),
    /// Categorical data (encoded as u32)
    Categorical(Array1<u32>, Vec<String>), // values, categories
}

impl Series {
    /// Create a new Float series
    pub fn float(data: impl Into<FloatArray>) -> Self {
        Series::Float(data.into())
    }

    /// Create a new Int series
    pub fn int(data: impl Into<IntArray>) -> Self {
        Series::Int(data.into())
    }

    /// Create a new String series
    pub fn string(data: impl Into<StringArray>) -> Self {
        Series::String(data.into())
    }

    /// Create a new Categorical series with sorted categories
    pub fn categorical<T: AsRef<str>>(data: &[T]) -> Self {
        let categories: Vec<String> = data
            .iter()
            .map(|s| s.as_ref().to_string())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let encoded: Array1<u32> = data
            .iter()
            .map(|s| {
                categories
                    .binary_search_by(|c| c.as_str().cmp(s.as_ref()))
                    .map_or(0, |code| code as u32)
            })
            .collect();

        Series::Categorical(encoded, categories)
    }

    /// Get the length of the series
    pub fn len(&self) -> usize {
        match self {
            Series::Float(arr) => arr.len(),
            Series::Int(arr) => arr.len(),
            Series::String(arr) => arr.len(),
            Series::Categorical(arr, _) => arr.len(),
        }
    }

    /// Check if the series is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the type name of the series
    pub fn dtype(&self) -> &'static str {
        match self {
            Series::Float(_) => "float64",
            Series::Int(_) => "int64",
            Series::String(_) => "string",
            Series::Categorical(_, _) => "categorical",
        }
    }

    /// Check if the series holds numbers
    pub fn is_numeric(&self) -> bool {
        matches!(self, Series::Float(_) | Series::Int(_))
    }

    /// Get a value at index
    pub fn get(&self, idx: usize) -> Option<Value> {
        match self {
            Series::Float(arr) => arr.get(idx).map(|&v| Value::Number(v)),
            Series::Int(arr) => arr.get(idx).map(|&v| Value::from(v)),
            Series::String(arr) => arr.get(idx).map(|v| Value::Text(v.clone())),
            Series::Categorical(arr, cats) => arr
                .get(idx)
                .and_then(|&code| cats.get(code as usize))
                .map(|cat| Value::Text(cat.clone())),
        }
    }

    /// Get a numeric value at index
    pub fn get_f64(&self, idx: usize) -> Option<f64> {
        match self {
            Series::Float(arr) => arr.get(idx).copied(),
            Series::Int(arr) => arr.get(idx).map(|&v| v as f64),
            Series::String(_) | Series::Categorical(_, _) => None,
        }
    }
}
