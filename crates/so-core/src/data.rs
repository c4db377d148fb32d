//! Core data structures for StatOxide
//!
//! This module provides the input side of the statistical engines: typed
//! columns, the values they hold, the metadata describing each classified
//! variable, and the weighted observations built from them.

mod builder;
mod observation;
mod series;
mod value;
mod variable;


// Re-exports
pub use builder::ObservationBuilder;
pub use observation::Observation;
pub use series::Series;
pub use value::Value;
pub use variable::{Level, MissingRule, VariableSpec};

// Type aliases for common use cases
pub type FloatArray = ndarray::Array1<f64>;
pub type IntArray = ndarray::Array1<i64>;
pub type StringArray = Vec<String>;

/// Error types specific to data operations
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum DataError {
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: String, actual: String },

    #[error("Operation requires numeric data, got {0}")]
    NonNumericData(&'static str),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type for data operations
pub type Result<T> = std::result::Result<T, DataError>;
