//! Proportional-reduction-in-error measures
//!
//! A zero denominator on a non-empty table means one marginal already
//! predicts its variable perfectly; such variants report 0. On an empty
//! table every variant is undefined.

use ndarray::Axis;

use super::table::ContingencyTable;
use crate::base::{Directional, PreMeasures, finite};

fn max_of<'a>(values: impl IntoIterator<Item = &'a f64>) -> f64 {
    values.into_iter().copied().fold(0.0, f64::max)
}

/// PRE ratio with the zero-denominator convention
fn pre_ratio(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 {
        return Some(0.0);
    }
    finite(numerator / denominator)
}

/// Goodman and Kruskal's lambda
pub fn lambda(table: &ContingencyTable) -> Directional {
    if table.is_empty() {
        return Directional::default();
    }
    let w = table.total;
    let f = &table.counts;

    // modal cell of each row / each column
    let row_modes: f64 = f.axis_iter(Axis(0)).map(|row| max_of(row.iter())).sum();
    let col_modes: f64 = f.axis_iter(Axis(1)).map(|col| max_of(col.iter())).sum();
    let max_row_total = max_of(table.row_totals.iter());
    let max_col_total = max_of(table.col_totals.iter());

    let col_dependent = pre_ratio(row_modes - max_col_total, w - max_col_total);
    let row_dependent = pre_ratio(col_modes - max_row_total, w - max_row_total);
    let symmetric = pre_ratio(
        row_modes + col_modes - max_col_total - max_row_total,
        2.0 * w - max_col_total - max_row_total,
    );

    Directional::new(row_dependent, col_dependent).with_symmetric(symmetric)
}

/// Goodman and Kruskal's tau
pub fn goodman_kruskal_tau(table: &ContingencyTable) -> Directional {
    if table.is_empty() {
        return Directional::default();
    }
    let w = table.total;
    let f = &table.counts;
    let sum_sq_rows: f64 = table.row_totals.iter().map(|t| t * t).sum();
    let sum_sq_cols: f64 = table.col_totals.iter().map(|t| t * t).sum();

    let mut by_row_total = 0.0;
    let mut by_col_total = 0.0;
    for ((i, j), &count) in f.indexed_iter() {
        if count > 0.0 {
            by_row_total += count * count / table.row_totals[i];
            by_col_total += count * count / table.col_totals[j];
        }
    }

    let col_dependent = pre_ratio(w * by_row_total - sum_sq_cols, w * w - sum_sq_cols);
    let row_dependent = pre_ratio(w * by_col_total - sum_sq_rows, w * w - sum_sq_rows);

    Directional::new(row_dependent, col_dependent)
}

/// Shannon entropy (natural log) of a set of weights summing to `total`
fn entropy<'a>(weights: impl IntoIterator<Item = &'a f64>, total: f64) -> f64 {
    weights
        .into_iter()
        .filter(|&&v| v > 0.0)
        .map(|&v| {
            let p = v / total;
            -p * p.ln()
        })
        .sum()
}

/// Uncertainty coefficient (Theil's U)
pub fn uncertainty_coefficient(table: &ContingencyTable) -> Directional {
    if table.is_empty() || table.total <= 0.0 {
        return Directional::default();
    }
    let w = table.total;
    let h_row = entropy(table.row_totals.iter(), w);
    let h_col = entropy(table.col_totals.iter(), w);
    let h_joint = entropy(table.counts.iter(), w);
    let mutual = (h_row + h_col - h_joint).max(0.0);

    Directional::new(pre_ratio(mutual, h_row), pre_ratio(mutual, h_col))
        .with_symmetric(pre_ratio(2.0 * mutual, h_row + h_col))
}

/// All PRE measures
pub fn measures(table: &ContingencyTable) -> PreMeasures {
    PreMeasures {
        lambda: lambda(table),
        goodman_kruskal_tau: goodman_kruskal_tau(table),
        uncertainty_coefficient: uncertainty_coefficient(table),
    }
}
