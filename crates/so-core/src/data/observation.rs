//! Weighted paired observations

use serde::{Deserialize, Serialize};

use super::Value;

/// One case: a row-variable value, a column-variable value and a weight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Value of the row variable
    pub row: Value,
    /// Value of the column variable
    pub col: Value,
    /// Case weight
    #[serde(default = "default_weight")]
    pub weight: f64,
}

fn default_weight() -> f64 {
    1.0
}

impl Observation {
    /// Create an observation with unit weight
    pub fn new(row: impl Into<Value>, col: impl Into<Value>) -> Self {
        Self {
            row: row.into(),
            col: col.into(),
            weight: default_weight(),
        }
    }

    /// Create a weighted observation
    pub fn weighted(row: impl Into<Value>, col: impl Into<Value>, weight: f64) -> Self {
        Self {
            row: row.into(),
            col: col.into(),
            weight,
        }
    }

    /// Check whether the weight allows this case to be counted
    pub fn has_usable_weight(&self) -> bool {
        self.weight.is_finite() && self.weight > 0.0
    }
}
