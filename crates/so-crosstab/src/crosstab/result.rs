//! Crosstab result structure
//!
//! The result is a plain record: the table, per-cell statistics and one
//! group per measure family. It holds no reference back into the
//! computation and serializes as-is.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::cells::CellStatistics;
use super::table::ContingencyTable;
use crate::base::{
    AgreementMeasures, ChiSquareStatistics, ChiSquareTest, CorrelationMeasures, Directional,
    NominalMeasures, OrdinalMeasures, PreMeasures, finite,
};

/// Everything computed for one crosstabulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrosstabResult {
    /// The frequency table
    pub table: ContingencyTable,
    /// Per-cell statistics, indexed `[row][col]`; empty when disabled
    pub cells: Vec<Vec<CellStatistics>>,
    /// Chi-square tests
    pub chi_square: ChiSquareStatistics,
    /// Nominal association
    pub nominal: NominalMeasures,
    /// Ordinal association
    pub ordinal: OrdinalMeasures,
    /// Proportional reduction in error
    pub pre: PreMeasures,
    /// Correlation
    pub correlation: CorrelationMeasures,
    /// Agreement
    pub agreement: AgreementMeasures,
}

impl CrosstabResult {
    /// Number of valid cases (sum of weights), `None` if it overflowed
    pub fn n_valid(&self) -> Option<f64> {
        finite(self.table.total)
    }

    /// Check if no valid observations were tabulated
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

struct Opt(Option<f64>);

impl fmt::Display for Opt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(v) => write!(f, "{:>10.4}", v),
            None => write!(f, "{:>10}", "n/a"),
        }
    }
}

fn write_test(f: &mut fmt::Formatter<'_>, name: &str, test: Option<&ChiSquareTest>) -> fmt::Result {
    match test {
        Some(t) => writeln!(
            f,
            "  {:<28} {:>10.4} {:>4} {}",
            name,
            t.statistic,
            t.df,
            Opt(t.p_value)
        ),
        None => writeln!(f, "  {:<28} {:>10}", name, "n/a"),
    }
}

fn write_directional(f: &mut fmt::Formatter<'_>, name: &str, d: &Directional) -> fmt::Result {
    writeln!(
        f,
        "  {:<28} {} {} {}",
        name,
        Opt(d.symmetric),
        Opt(d.row_dependent),
        Opt(d.col_dependent)
    )
}

impl fmt::Display for CrosstabResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let table = &self.table;
        writeln!(f, "Crosstabulation: {} by {}", table.row_variable, table.col_variable)?;
        writeln!(f, "================")?;
        writeln!(
            f,
            "Valid: {}  Excluded cases: {}",
            table.total, table.excluded_cases
        )?;
        writeln!(f)?;

        write!(f, "{:<12}", "")?;
        for category in &table.col_categories {
            write!(f, " {:>10}", category.to_string())?;
        }
        writeln!(f, " {:>10}", "Total")?;
        for (i, category) in table.row_categories.iter().enumerate() {
            write!(f, "{:<12}", category.to_string())?;
            for count in table.counts.row(i) {
                write!(f, " {:>10}", count)?;
            }
            writeln!(f, " {:>10}", table.row_totals[i])?;
        }
        write!(f, "{:<12}", "Total")?;
        for total in &table.col_totals {
            write!(f, " {:>10}", total)?;
        }
        writeln!(f, " {:>10}", table.total)?;
        writeln!(f)?;

        writeln!(f, "Chi-Square Tests:")?;
        write_test(f, "Pearson Chi-Square", self.chi_square.pearson.as_ref())?;
        write_test(f, "Likelihood Ratio", self.chi_square.likelihood_ratio.as_ref())?;
        write_test(
            f,
            "Continuity Correction",
            self.chi_square.continuity_corrected.as_ref(),
        )?;
        write_test(
            f,
            "Linear-by-Linear Association",
            self.chi_square.linear_by_linear.as_ref(),
        )?;
        if let Some(fisher) = &self.chi_square.fisher_exact {
            writeln!(
                f,
                "  {:<28} two-sided {:.4}, left {:.4}, right {:.4}",
                "Fisher's Exact Test", fisher.two_sided, fisher.left, fisher.right
            )?;
        }
        writeln!(f)?;

        writeln!(f, "Symmetric Measures:")?;
        writeln!(f, "  {:<28} {}", "Phi", Opt(self.nominal.phi))?;
        writeln!(
            f,
            "  {:<28} {}",
            "Contingency Coefficient",
            Opt(self.nominal.contingency_coefficient)
        )?;
        writeln!(f, "  {:<28} {}", "Cramer's V", Opt(self.nominal.cramers_v))?;
        writeln!(f, "  {:<28} {}", "Gamma", Opt(self.ordinal.gamma))?;
        writeln!(f, "  {:<28} {}", "Kendall's tau-b", Opt(self.ordinal.tau_b))?;
        writeln!(f, "  {:<28} {}", "Kendall's tau-c", Opt(self.ordinal.tau_c))?;
        writeln!(f, "  {:<28} {}", "Pearson's R", Opt(self.correlation.pearson_r))?;
        writeln!(
            f,
            "  {:<28} {}",
            "Spearman Correlation",
            Opt(self.correlation.spearman_rho)
        )?;
        writeln!(f, "  {:<28} {}", "Kappa", Opt(self.agreement.kappa))?;
        writeln!(f)?;

        writeln!(
            f,
            "Directional Measures: {:>28} {:>10} {:>10}",
            "Symmetric", "Row dep.", "Col dep."
        )?;
        write_directional(f, "Lambda", &self.pre.lambda)?;
        write_directional(f, "Goodman and Kruskal tau", &self.pre.goodman_kruskal_tau)?;
        write_directional(
            f,
            "Uncertainty Coefficient",
            &self.pre.uncertainty_coefficient,
        )?;
        write_directional(f, "Somers' d", &self.ordinal.somers_d)?;
        write_directional(f, "Eta", &self.correlation.eta)?;

        Ok(())
    }
}
