//! Contingency table construction
//!
//! The table is built once from the full observation set and is read-only
//! afterwards; every measure is a pure function of it.

use std::collections::BTreeSet;

use ndarray::{Array1, Array2, Axis};
use serde::{Deserialize, Serialize};

use so_core::data::{Level, Observation, Value, VariableSpec};

use crate::base::{CrosstabError, Result};

/// Frequency table cross-classifying two variables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContingencyTable {
    /// Row variable name
    pub row_variable: String,
    /// Column variable name
    pub col_variable: String,
    /// Row variable measurement level
    pub row_level: Level,
    /// Column variable measurement level
    pub col_level: Level,
    /// Distinct valid row values, ascending
    pub row_categories: Vec<Value>,
    /// Distinct valid column values, ascending
    pub col_categories: Vec<Value>,
    /// Accumulated weight per (row, column) cell
    pub counts: Array2<f64>,
    /// Row marginals
    pub row_totals: Array1<f64>,
    /// Column marginals
    pub col_totals: Array1<f64>,
    /// Grand total (W)
    pub total: f64,
    /// Cases dropped for missing values or unusable weights
    pub excluded_cases: usize,
    /// Positive weight carried by the dropped cases
    pub excluded_weight: f64,
}

impl ContingencyTable {
    /// Build a table from raw observations
    ///
    /// Cases with a non-positive (or non-finite) weight, or with a value that
    /// is missing for its variable, take no part in category discovery or in
    /// any total.
    pub fn build(
        observations: &[Observation],
        row_spec: &VariableSpec,
        col_spec: &VariableSpec,
    ) -> Self {
        let is_valid = |obs: &Observation| {
            obs.has_usable_weight()
                && !row_spec.is_missing(&obs.row)
                && !col_spec.is_missing(&obs.col)
        };

        let mut row_set = BTreeSet::new();
        let mut col_set = BTreeSet::new();
        let mut excluded_cases = 0;
        let mut excluded_weight = 0.0;

        for obs in observations {
            if is_valid(obs) {
                row_set.insert(&obs.row);
                col_set.insert(&obs.col);
            } else {
                excluded_cases += 1;
                if obs.has_usable_weight() {
                    excluded_weight += obs.weight;
                }
            }
        }

        let row_categories: Vec<Value> = row_set.into_iter().cloned().collect();
        let col_categories: Vec<Value> = col_set.into_iter().cloned().collect();

        let mut counts = Array2::zeros((row_categories.len(), col_categories.len()));
        for obs in observations {
            if !is_valid(obs) {
                continue;
            }
            if let (Ok(i), Ok(j)) = (
                row_categories.binary_search(&obs.row),
                col_categories.binary_search(&obs.col),
            ) {
                counts[[i, j]] += obs.weight;
            }
        }

        let table = Self::assemble(
            row_spec.name.clone(),
            col_spec.name.clone(),
            (row_spec.level, col_spec.level),
            row_categories,
            col_categories,
            counts,
        );

        tracing::debug!(
            rows = table.n_rows(),
            cols = table.n_cols(),
            total = table.total,
            excluded_cases,
            "built contingency table"
        );
        if !table.has_finite_total() {
            tracing::warn!("accumulated weight overflows, no statistic is defined");
        }

        Self {
            excluded_cases,
            excluded_weight,
            ..table
        }
    }

    /// Build a table from a frequency matrix
    ///
    /// Categories are the 0-based row and column positions. Rows and columns
    /// with no weight are dropped, matching tables built from observations
    /// where only observed values become categories.
    pub fn from_counts(counts: Array2<f64>) -> Result<Self> {
        if let Some(bad) = counts.iter().find(|v| !v.is_finite() || **v < 0.0) {
            return Err(CrosstabError::InvalidTable {
                message: format!("cell frequencies must be finite and non-negative, got {}", bad),
            });
        }

        let row_keep: Vec<usize> = counts
            .axis_iter(Axis(0))
            .enumerate()
            .filter(|(_, row)| row.sum() > 0.0)
            .map(|(i, _)| i)
            .collect();
        let col_keep: Vec<usize> = counts
            .axis_iter(Axis(1))
            .enumerate()
            .filter(|(_, col)| col.sum() > 0.0)
            .map(|(j, _)| j)
            .collect();

        let (row_keep, col_keep, kept) = if row_keep.is_empty() || col_keep.is_empty() {
            (Vec::new(), Vec::new(), Array2::zeros((0, 0)))
        } else {
            let kept = counts.select(Axis(0), &row_keep).select(Axis(1), &col_keep);
            (row_keep, col_keep, kept)
        };

        let table = Self::assemble(
            "rows".to_string(),
            "columns".to_string(),
            (Level::Numeric, Level::Numeric),
            row_keep.into_iter().map(|i| Value::from(i as f64)).collect(),
            col_keep.into_iter().map(|j| Value::from(j as f64)).collect(),
            kept,
        );
        if !table.has_finite_total() {
            return Err(CrosstabError::InvalidTable {
                message: format!("cell frequencies overflow the grand total, got {}", table.total),
            });
        }
        Ok(table)
    }

    fn assemble(
        row_variable: String,
        col_variable: String,
        (row_level, col_level): (Level, Level),
        row_categories: Vec<Value>,
        col_categories: Vec<Value>,
        counts: Array2<f64>,
    ) -> Self {
        let row_totals = counts.sum_axis(Axis(1));
        let col_totals = counts.sum_axis(Axis(0));
        let total = row_totals.sum();

        Self {
            row_variable,
            col_variable,
            row_level,
            col_level,
            row_categories,
            col_categories,
            counts,
            row_totals,
            col_totals,
            total,
            excluded_cases: 0,
            excluded_weight: 0.0,
        }
    }

    /// Rename the variables
    pub fn with_names(mut self, row: impl Into<String>, col: impl Into<String>) -> Self {
        self.row_variable = row.into();
        self.col_variable = col.into();
        self
    }

    /// Set the measurement levels used for scoring
    pub fn with_levels(mut self, row: Level, col: Level) -> Self {
        self.row_level = row;
        self.col_level = col;
        self
    }

    /// Number of row categories (R)
    pub fn n_rows(&self) -> usize {
        self.row_categories.len()
    }

    /// Number of column categories (C)
    pub fn n_cols(&self) -> usize {
        self.col_categories.len()
    }

    /// Check if no valid observations were tabulated
    pub fn is_empty(&self) -> bool {
        self.n_rows() == 0 || self.n_cols() == 0
    }

    /// Check that the grand total and every marginal are finite
    ///
    /// Weights that are individually finite can still overflow when summed;
    /// such a table has no defined statistic.
    pub fn has_finite_total(&self) -> bool {
        self.total.is_finite()
            && self.row_totals.iter().all(|t| t.is_finite())
            && self.col_totals.iter().all(|t| t.is_finite())
    }

    /// Expected count under independence
    pub fn expected(&self, i: usize, j: usize) -> Option<f64> {
        if self.total <= 0.0 || !self.has_finite_total() {
            return None;
        }
        let expected = self.row_totals.get(i)? * self.col_totals.get(j)? / self.total;
        expected.is_finite().then_some(expected)
    }

    /// Swap the roles of rows and columns
    pub fn transpose(&self) -> Self {
        Self {
            row_variable: self.col_variable.clone(),
            col_variable: self.row_variable.clone(),
            row_level: self.col_level,
            col_level: self.row_level,
            row_categories: self.col_categories.clone(),
            col_categories: self.row_categories.clone(),
            counts: self.counts.t().to_owned(),
            row_totals: self.col_totals.clone(),
            col_totals: self.row_totals.clone(),
            total: self.total,
            excluded_cases: self.excluded_cases,
            excluded_weight: self.excluded_weight,
        }
    }

    /// Numeric scores of the row categories
    pub fn row_scores(&self) -> Vec<f64> {
        scores(&self.row_categories, self.row_level)
    }

    /// Numeric scores of the column categories
    pub fn col_scores(&self) -> Vec<f64> {
        scores(&self.col_categories, self.col_level)
    }
}

/// Category value for numeric variables, sorted position otherwise
fn scores(categories: &[Value], level: Level) -> Vec<f64> {
    categories
        .iter()
        .enumerate()
        .map(|(pos, value)| match (level, value) {
            (Level::Numeric, Value::Number(v)) => *v,
            _ => pos as f64,
        })
        .collect()
}
