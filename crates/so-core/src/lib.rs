//! StatOxide core
//!
//! Data structures shared by the StatOxide statistical engines: observed
//! values, variable metadata with missing-value rules, weighted observations
//! and the typed columns they are assembled from.

pub mod data;

pub use data::{DataError, Level, MissingRule, Observation, Series, Value, VariableSpec};
