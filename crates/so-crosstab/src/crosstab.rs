//! Crosstabulation
//!
//! This module builds a contingency table from paired observations and
//! computes the standard families of measures over it:
//! - Chi-square tests (Pearson, likelihood ratio, continuity correction,
//!   linear-by-linear, Fisher's exact test)
//! - Nominal association (phi, contingency coefficient, Cramér's V)
//! - Ordinal association (gamma, Kendall's tau-b and tau-c, Somers' d)
//! - Proportional reduction in error (lambda, Goodman and Kruskal's tau,
//!   uncertainty coefficient)
//! - Correlation (Pearson's r, Spearman's rho, eta)
//! - Agreement (Cohen's kappa)
//!
//! Each invocation computes its shared intermediates (Pearson chi-square,
//! pair counts, Pearson's r) once and passes them down; nothing is cached
//! between calls.

pub mod agreement;
pub mod cells;
pub mod chi_square;
pub mod correlation;
pub mod nominal;
pub mod ordinal;
pub mod pairs;
pub mod pre;
pub mod result;
pub mod table;

#[cfg(test)]
mod tests;

// Re-exports
pub use cells::CellStatistics;
pub use pairs::PairCounts;
pub use result::CrosstabResult;
pub use table::ContingencyTable;

use serde::{Deserialize, Serialize};
use so_core::data::{Observation, ObservationBuilder, Series, VariableSpec};

use crate::base::{CrosstabError, Result};

/// Which measure families to compute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatisticsSelection {
    /// Chi-square tests
    pub chi_square: bool,
    /// Phi, contingency coefficient, Cramér's V
    pub nominal: bool,
    /// Gamma, tau-b, tau-c, Somers' d
    pub ordinal: bool,
    /// Lambda, Goodman and Kruskal's tau, uncertainty coefficient
    pub pre: bool,
    /// Pearson's r, Spearman's rho, eta
    pub correlation: bool,
    /// Cohen's kappa
    pub agreement: bool,
}

impl StatisticsSelection {
    /// Every family
    pub fn all() -> Self {
        Self {
            chi_square: true,
            nominal: true,
            ordinal: true,
            pre: true,
            correlation: true,
            agreement: true,
        }
    }

    /// No family
    pub fn none() -> Self {
        Self {
            chi_square: false,
            nominal: false,
            ordinal: false,
            pre: false,
            correlation: false,
            agreement: false,
        }
    }

    /// Check if at least one family is selected
    pub fn any(&self) -> bool {
        self.chi_square
            || self.nominal
            || self.ordinal
            || self.pre
            || self.correlation
            || self.agreement
    }
}

impl Default for StatisticsSelection {
    fn default() -> Self {
        Self::all()
    }
}

/// Crosstab configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrosstabConfig {
    /// Measure families to compute
    pub statistics: StatisticsSelection,
    /// Whether to compute per-cell statistics
    pub cell_statistics: bool,
    /// Whether to run Fisher's exact test on 2x2 tables
    pub fisher_exact: bool,
}

impl Default for CrosstabConfig {
    fn default() -> Self {
        Self {
            statistics: StatisticsSelection::all(),
            cell_statistics: true,
            fisher_exact: true,
        }
    }
}

impl CrosstabConfig {
    /// Check that the configuration asks for some output
    pub fn validate(&self) -> Result<()> {
        if !self.statistics.any() && !self.cell_statistics {
            return Err(CrosstabError::InvalidConfig {
                message: "no statistics and no cell statistics requested".to_string(),
            });
        }
        Ok(())
    }
}

/// Crosstabulation of two variables
#[derive(Debug, Clone)]
pub struct Crosstab {
    /// Row variable
    row: VariableSpec,
    /// Column variable
    col: VariableSpec,
    /// Configuration
    config: CrosstabConfig,
}

impl Crosstab {
    /// Create a new crosstabulation
    pub fn new(row: VariableSpec, col: VariableSpec) -> Self {
        Self {
            row,
            col,
            config: CrosstabConfig::default(),
        }
    }

    /// Set configuration
    pub fn config(mut self, config: CrosstabConfig) -> Self {
        self.config = config;
        self
    }

    /// Restrict the measure families
    pub fn statistics(mut self, statistics: StatisticsSelection) -> Self {
        self.config.statistics = statistics;
        self
    }

    /// Compute from observations
    pub fn compute(&self, observations: &[Observation]) -> Result<CrosstabResult> {
        self.config.validate()?;
        let table = ContingencyTable::build(observations, &self.row, &self.col);
        Ok(analyze(table, &self.config))
    }

    /// Compute from parallel columns, validating their shapes first
    pub fn compute_series(
        &self,
        rows: &Series,
        cols: &Series,
        weights: Option<&Series>,
    ) -> Result<CrosstabResult> {
        let mut builder = ObservationBuilder::new().rows(rows).cols(cols);
        if let Some(weights) = weights {
            builder = builder.weights(weights);
        }
        let observations = builder.build()?;
        self.compute(&observations)
    }
}

/// Compute every statistic for a set of observations
pub fn compute_all(
    observations: &[Observation],
    row_spec: &VariableSpec,
    col_spec: &VariableSpec,
) -> CrosstabResult {
    let table = ContingencyTable::build(observations, row_spec, col_spec);
    analyze(table, &CrosstabConfig::default())
}

/// Compute the configured statistics for an already built table
pub fn analyze(table: ContingencyTable, config: &CrosstabConfig) -> CrosstabResult {
    // an overflowed grand total leaves every measure undefined
    if !table.has_finite_total() {
        return CrosstabResult {
            table,
            cells: Vec::new(),
            chi_square: Default::default(),
            nominal: Default::default(),
            ordinal: Default::default(),
            pre: Default::default(),
            correlation: Default::default(),
            agreement: Default::default(),
        };
    }
    let selected = config.statistics;

    // shared intermediates, computed once per call
    let pearson = if selected.chi_square || selected.nominal {
        chi_square::pearson(&table)
    } else {
        None
    };
    let pairs = if selected.ordinal {
        PairCounts::from_table(&table)
    } else {
        None
    };
    let pearson_r = if selected.chi_square || selected.correlation {
        correlation::pearson_r(&table)
    } else {
        None
    };
    tracing::trace!(?pearson, ?pairs, ?pearson_r, "memoized intermediates");

    let result = CrosstabResult {
        cells: if config.cell_statistics {
            cells::cell_statistics(&table)
        } else {
            Vec::new()
        },
        chi_square: if selected.chi_square {
            chi_square::statistics(&table, pearson, pearson_r, config.fisher_exact)
        } else {
            Default::default()
        },
        nominal: if selected.nominal {
            nominal::measures(&table, pearson.as_ref())
        } else {
            Default::default()
        },
        ordinal: ordinal::measures(&table, pairs.as_ref()),
        pre: if selected.pre {
            pre::measures(&table)
        } else {
            Default::default()
        },
        correlation: if selected.correlation {
            correlation::measures(&table, pearson_r)
        } else {
            Default::default()
        },
        agreement: if selected.agreement {
            agreement::measures(&table)
        } else {
            Default::default()
        },
        table,
    };

    tracing::debug!(
        rows = result.table.n_rows(),
        cols = result.table.n_cols(),
        total = result.table.total,
        "computed crosstab statistics"
    );
    result
}

/// Convenience function for crosstabulating two columns
pub fn crosstab(
    rows: &Series,
    cols: &Series,
    weights: Option<&Series>,
    row_spec: VariableSpec,
    col_spec: VariableSpec,
) -> Result<CrosstabResult> {
    Crosstab::new(row_spec, col_spec).compute_series(rows, cols, weights)
}
