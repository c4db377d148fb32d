//! Inter-rater agreement

use super::table::ContingencyTable;
use crate::base::{AgreementMeasures, ratio};

/// Cohen's kappa; rows and columns must pair up by position
pub fn kappa(table: &ContingencyTable) -> Option<f64> {
    let n = table.n_rows();
    if n != table.n_cols() || table.total <= 0.0 {
        return None;
    }
    let w = table.total;
    let agreement: f64 = (0..n).map(|i| table.counts[[i, i]]).sum();
    let chance: f64 = (0..n)
        .map(|i| table.row_totals[i] * table.col_totals[i])
        .sum();

    ratio(w * agreement - chance, w * w - chance)
}

/// All agreement measures
pub fn measures(table: &ContingencyTable) -> AgreementMeasures {
    AgreementMeasures {
        kappa: kappa(table),
    }
}
