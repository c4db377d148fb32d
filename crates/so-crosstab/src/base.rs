//! Core types shared by the crosstab measure families
//!
//! This module defines the result records every measure family fills in and
//! the guard that keeps non-finite numbers out of them.

// Re-export core types
pub use directional::Directional;
pub use statistics::{
    AgreementMeasures, ChiSquareStatistics, ChiSquareTest, CorrelationMeasures, FisherExact,
    NominalMeasures, OrdinalMeasures, PreMeasures,
};

pub use crate::error::CrosstabError;

pub mod directional;
pub mod statistics;

/// Result type for crosstab operations
pub type Result<T> = std::result::Result<T, CrosstabError>;

/// Keep a computed value only if it is a finite number
pub(crate) fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

/// Divide, reporting `None` for a zero or non-finite quotient
pub(crate) fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 {
        return None;
    }
    finite(numerator / denominator)
}
