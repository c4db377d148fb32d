//! Crosstab-related error types
//!
//! Only malformed input fails. A statistic that cannot be computed for a
//! given table is reported as `None`, never as an error.

use thiserror::Error;

use so_core::data::DataError;

/// Crosstab-related errors
#[derive(Debug, Error)]
pub enum CrosstabError {
    /// Data-related error
    #[error("Data error: {0}")]
    Data(#[from] DataError),

    /// Frequency matrix that cannot form a contingency table
    #[error("Invalid frequency table: {message}")]
    InvalidTable {
        /// Error message
        message: String,
    },

    /// Invalid crosstab configuration
    #[error("Invalid crosstab configuration: {message}")]
    InvalidConfig {
        /// Configuration error message
        message: String,
    },
}
