//! Statistical structures for crosstab results
//!
//! Every field is either a finite number or `None` ("not applicable").

use serde::{Deserialize, Serialize};

use super::Directional;

/// A chi-square test statistic
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChiSquareTest {
    /// Test statistic
    pub statistic: f64,
    /// Degrees of freedom
    pub df: usize,
    /// Upper-tail p-value
    pub p_value: Option<f64>,
}

/// Fisher's exact test p-values for a 2x2 table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FisherExact {
    /// P(X <= a)
    pub left: f64,
    /// P(X >= a)
    pub right: f64,
    /// Sum of outcomes no more likely than the observed one
    pub two_sided: f64,
}

/// Chi-square family
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ChiSquareStatistics {
    /// Pearson chi-square
    pub pearson: Option<ChiSquareTest>,
    /// Likelihood-ratio chi-square
    pub likelihood_ratio: Option<ChiSquareTest>,
    /// Yates continuity-corrected chi-square (2x2 only)
    pub continuity_corrected: Option<ChiSquareTest>,
    /// Linear-by-linear association
    pub linear_by_linear: Option<ChiSquareTest>,
    /// Fisher's exact test (2x2 with whole-number counts)
    pub fisher_exact: Option<FisherExact>,
    /// Smallest expected count
    pub min_expected: Option<f64>,
    /// Number of cells with expected count below 5
    pub cells_expected_below_5: usize,
}

/// Nominal association measures
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NominalMeasures {
    /// Phi coefficient
    pub phi: Option<f64>,
    /// Contingency coefficient
    pub contingency_coefficient: Option<f64>,
    /// Cramér's V
    pub cramers_v: Option<f64>,
}

/// Ordinal association measures
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OrdinalMeasures {
    /// Weight of concordant pairs
    pub concordant: Option<f64>,
    /// Weight of discordant pairs
    pub discordant: Option<f64>,
    /// Goodman and Kruskal's gamma
    pub gamma: Option<f64>,
    /// Kendall's tau-b
    pub tau_b: Option<f64>,
    /// Kendall's tau-c
    pub tau_c: Option<f64>,
    /// Somers' d
    pub somers_d: Directional,
}

/// Proportional-reduction-in-error measures
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PreMeasures {
    /// Lambda
    pub lambda: Directional,
    /// Goodman and Kruskal's tau (no symmetric form)
    pub goodman_kruskal_tau: Directional,
    /// Uncertainty coefficient
    pub uncertainty_coefficient: Directional,
}

/// Correlation measures over category scores
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMeasures {
    /// Pearson's r
    pub pearson_r: Option<f64>,
    /// Spearman's rho
    pub spearman_rho: Option<f64>,
    /// Eta (no symmetric form)
    pub eta: Directional,
}

/// Agreement measures
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AgreementMeasures {
    /// Cohen's kappa
    pub kappa: Option<f64>,
}
