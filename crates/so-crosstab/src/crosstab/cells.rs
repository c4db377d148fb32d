//! Per-cell derived statistics

use serde::{Deserialize, Serialize};

use super::table::ContingencyTable;
use crate::base::{finite, ratio};

/// Derived statistics for one table cell
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellStatistics {
    /// Observed weight
    pub observed: f64,
    /// Expected count under independence
    pub expected: Option<f64>,
    /// Percentage of the row total
    pub row_percent: Option<f64>,
    /// Percentage of the column total
    pub col_percent: Option<f64>,
    /// Percentage of the grand total
    pub total_percent: Option<f64>,
    /// Observed minus expected
    pub residual: Option<f64>,
    /// Residual over the square root of the expected count
    pub standardized_residual: Option<f64>,
    /// Residual over its estimated standard error
    pub adjusted_residual: Option<f64>,
}

impl CellStatistics {
    fn compute(table: &ContingencyTable, i: usize, j: usize) -> Self {
        let observed = table.counts[[i, j]];
        let row_total = table.row_totals[i];
        let col_total = table.col_totals[j];
        let w = table.total;

        let expected = table.expected(i, j);
        let residual = expected.and_then(|e| finite(observed - e));
        let standardized_residual = match (residual, expected) {
            (Some(r), Some(e)) if e > 0.0 => finite(r / e.sqrt()),
            _ => None,
        };
        let adjusted_residual = match (residual, expected) {
            (Some(r), Some(e)) => {
                let variance = e * (1.0 - row_total / w) * (1.0 - col_total / w);
                if variance > 0.0 {
                    finite(r / variance.sqrt())
                } else {
                    None
                }
            }
            _ => None,
        };

        Self {
            observed,
            expected,
            row_percent: ratio(100.0 * observed, row_total),
            col_percent: ratio(100.0 * observed, col_total),
            total_percent: ratio(100.0 * observed, w),
            residual,
            standardized_residual,
            adjusted_residual,
        }
    }
}

/// Derived statistics for every cell, indexed `[row][col]`
pub fn cell_statistics(table: &ContingencyTable) -> Vec<Vec<CellStatistics>> {
    (0..table.n_rows())
        .map(|i| {
            (0..table.n_cols())
                .map(|j| CellStatistics::compute(table, i, j))
                .collect()
        })
        .collect()
}
