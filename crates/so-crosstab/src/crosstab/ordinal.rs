//! Ordinal association measures
//!
//! All measures read the memoized [`PairCounts`]; none revisits the table
//! except tau-c, which needs W and min(R, C).

use super::pairs::PairCounts;
use super::table::ContingencyTable;
use crate::base::{Directional, OrdinalMeasures, ratio};

/// Goodman and Kruskal's gamma
pub fn gamma(pairs: &PairCounts) -> Option<f64> {
    ratio(pairs.difference(), pairs.concordant + pairs.discordant)
}

/// Kendall's tau-b
pub fn tau_b(pairs: &PairCounts) -> Option<f64> {
    if pairs.row_untied <= 0.0 || pairs.col_untied <= 0.0 {
        return None;
    }
    ratio(pairs.difference(), (pairs.row_untied * pairs.col_untied).sqrt())
}

/// Kendall's tau-c (Stuart's tau-c)
pub fn tau_c(table: &ContingencyTable, pairs: &PairCounts) -> Option<f64> {
    let q = table.n_rows().min(table.n_cols());
    if q <= 1 || table.total <= 0.0 {
        return None;
    }
    let q = q as f64;
    ratio(
        2.0 * q * pairs.difference(),
        table.total * table.total * (q - 1.0),
    )
}

/// Somers' d, each variant undefined independently
pub fn somers_d(pairs: &PairCounts) -> Directional {
    let diff = pairs.difference();
    Directional::new(ratio(diff, pairs.col_untied), ratio(diff, pairs.row_untied)).with_symmetric(
        ratio(diff, 0.5 * (pairs.row_untied + pairs.col_untied)),
    )
}

/// All ordinal measures; everything undefined without pair counts
pub fn measures(table: &ContingencyTable, pairs: Option<&PairCounts>) -> OrdinalMeasures {
    let Some(pairs) = pairs else {
        return OrdinalMeasures::default();
    };

    OrdinalMeasures {
        concordant: Some(pairs.concordant),
        discordant: Some(pairs.discordant),
        gamma: gamma(pairs),
        tau_b: tau_b(pairs),
        tau_c: tau_c(table, pairs),
        somers_d: somers_d(pairs),
    }
}
