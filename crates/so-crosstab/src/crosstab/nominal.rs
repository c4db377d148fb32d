//! Chi-square based association for nominal variables

use super::table::ContingencyTable;
use crate::base::{ChiSquareTest, NominalMeasures, finite};

/// Phi, contingency coefficient and Cramér's V from the Pearson statistic
pub fn measures(table: &ContingencyTable, pearson: Option<&ChiSquareTest>) -> NominalMeasures {
    let Some(chi2) = pearson.map(|t| t.statistic) else {
        return NominalMeasures::default();
    };
    let w = table.total;
    let q = table.n_rows().min(table.n_cols());

    NominalMeasures {
        phi: finite((chi2 / w).sqrt()),
        contingency_coefficient: finite((chi2 / (chi2 + w)).sqrt()),
        cramers_v: if q > 1 {
            finite((chi2 / (w * (q - 1) as f64)).sqrt())
        } else {
            None
        },
    }
}
