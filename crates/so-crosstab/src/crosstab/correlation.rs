//! Correlation over category scores
//!
//! Cases are never expanded: every sum is taken over cells and marginals,
//! weighted by frequency.

use ndarray::Array1;

use super::table::ContingencyTable;
use crate::base::{CorrelationMeasures, Directional, finite};

fn weighted_mean(totals: &Array1<f64>, scores: &[f64], total: f64) -> f64 {
    totals.iter().zip(scores).map(|(t, s)| t * s).sum::<f64>() / total
}

/// Weighted Pearson correlation of row scores `x` and column scores `y`
fn weighted_correlation(table: &ContingencyTable, x: &[f64], y: &[f64]) -> Option<f64> {
    if table.n_rows() < 2 || table.n_cols() < 2 || table.total <= 0.0 {
        return None;
    }
    let w = table.total;
    let mean_x = weighted_mean(&table.row_totals, x, w);
    let mean_y = weighted_mean(&table.col_totals, y, w);

    let sxx: f64 = table
        .row_totals
        .iter()
        .zip(x)
        .map(|(t, xi)| t * (xi - mean_x).powi(2))
        .sum();
    let syy: f64 = table
        .col_totals
        .iter()
        .zip(y)
        .map(|(t, yj)| t * (yj - mean_y).powi(2))
        .sum();
    if sxx <= 0.0 || syy <= 0.0 {
        return None;
    }

    let sxy: f64 = table
        .counts
        .indexed_iter()
        .map(|((i, j), f)| f * (x[i] - mean_x) * (y[j] - mean_y))
        .sum();

    finite((sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0))
}

/// Mid-rank of each category: weight before it plus half its block
pub fn mid_ranks(totals: &Array1<f64>) -> Vec<f64> {
    let mut before = 0.0;
    totals
        .iter()
        .map(|&t| {
            let rank = before + (t + 1.0) / 2.0;
            before += t;
            rank
        })
        .collect()
}

/// Pearson's r over category scores
pub fn pearson_r(table: &ContingencyTable) -> Option<f64> {
    weighted_correlation(table, &table.row_scores(), &table.col_scores())
}

/// Spearman's rho over marginal mid-ranks
pub fn spearman_rho(table: &ContingencyTable) -> Option<f64> {
    weighted_correlation(
        table,
        &mid_ranks(&table.row_totals),
        &mid_ranks(&table.col_totals),
    )
}

/// Eta with the column scores dependent on row groups
fn eta_col_dependent(table: &ContingencyTable, y: &[f64]) -> Option<f64> {
    if table.is_empty() || table.total <= 0.0 {
        return None;
    }
    let mean_y = weighted_mean(&table.col_totals, y, table.total);
    let ss_total: f64 = table
        .col_totals
        .iter()
        .zip(y)
        .map(|(t, yj)| t * (yj - mean_y).powi(2))
        .sum();
    if ss_total <= 0.0 {
        return None;
    }

    let mut ss_within = 0.0;
    for (i, row) in table.counts.outer_iter().enumerate() {
        let row_total = table.row_totals[i];
        if row_total <= 0.0 {
            continue;
        }
        let group_mean = row.iter().zip(y).map(|(f, yj)| f * yj).sum::<f64>() / row_total;
        ss_within += row
            .iter()
            .zip(y)
            .map(|(f, yj)| f * (yj - group_mean).powi(2))
            .sum::<f64>();
    }

    finite((1.0 - ss_within / ss_total).clamp(0.0, 1.0).sqrt())
}

/// Eta in both directions
pub fn eta(table: &ContingencyTable) -> Directional {
    let col_dependent = eta_col_dependent(table, &table.col_scores());
    let transposed = table.transpose();
    let row_dependent = eta_col_dependent(&transposed, &transposed.col_scores());
    Directional::new(row_dependent, col_dependent)
}

/// All correlation measures, reusing a memoized Pearson's r
pub fn measures(table: &ContingencyTable, pearson_r: Option<f64>) -> CorrelationMeasures {
    CorrelationMeasures {
        pearson_r,
        spearman_rho: spearman_rho(table),
        eta: eta(table),
    }
}
