//! Variable metadata: measurement level and missing-value rules

use serde::{Deserialize, Serialize};

use super::Value;

/// Measurement level of a classified variable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Level {
    /// Ordered numeric values; categories are scored by their value
    #[default]
    Numeric,
    /// Unordered labels; categories are scored by their sorted position
    Nominal,
}

/// User-missing value rule
///
/// A value is missing when it is system-missing, equals one of the sentinel
/// codes, or is a number inside one of the inclusive ranges.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MissingRule {
    /// Sentinel codes
    pub codes: Vec<Value>,
    /// Inclusive numeric ranges `(low, high)`
    pub ranges: Vec<(f64, f64)>,
}

impl MissingRule {
    /// Rule with no user-missing values
    pub fn none() -> Self {
        Self::default()
    }

    /// Add a sentinel code
    pub fn with_code(mut self, code: impl Into<Value>) -> Self {
        self.codes.push(code.into());
        self
    }

    /// Add an inclusive range
    pub fn with_range(mut self, low: f64, high: f64) -> Self {
        let (low, high) = if low <= high { (low, high) } else { (high, low) };
        self.ranges.push((low, high));
        self
    }

    /// Check whether a value is missing under this rule
    pub fn is_missing(&self, value: &Value) -> bool {
        if value.is_sysmis() {
            return true;
        }
        if self.codes.iter().any(|code| code == value) {
            return true;
        }
        match value.as_number() {
            Some(v) => self.ranges.iter().any(|&(lo, hi)| v >= lo && v <= hi),
            None => false,
        }
    }
}

/// Description of one classified variable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableSpec {
    /// Variable name
    pub name: String,
    /// Measurement level
    pub level: Level,
    /// Missing-value rule
    pub missing: MissingRule,
}

impl VariableSpec {
    /// Create a spec for a numeric-ordered variable
    pub fn numeric(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: Level::Numeric,
            missing: MissingRule::none(),
        }
    }

    /// Create a spec for a nominal variable
    pub fn nominal(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: Level::Nominal,
            missing: MissingRule::none(),
        }
    }

    /// Replace the missing-value rule
    pub fn with_missing(mut self, missing: MissingRule) -> Self {
        self.missing = missing;
        self
    }

    /// Add a user-missing sentinel code
    pub fn with_missing_code(mut self, code: impl Into<Value>) -> Self {
        self.missing = self.missing.with_code(code);
        self
    }

    /// Add a user-missing inclusive range
    pub fn with_missing_range(mut self, low: f64, high: f64) -> Self {
        self.missing = self.missing.with_range(low, high);
        self
    }

    /// Check whether a value is missing for this variable
    pub fn is_missing(&self, value: &Value) -> bool {
        self.missing.is_missing(value)
    }

    /// Check if the variable is numeric-ordered
    pub fn is_numeric(&self) -> bool {
        self.level == Level::Numeric
    }
}
