//! StatOxide crosstabulation
//!
//! Contingency tables and the association, correlation, agreement and
//! significance measures computed from them.
//!
//! ```no_run
//! use so_core::data::{Observation, VariableSpec};
//! use so_crosstab::compute_all;
//!
//! let observations = vec![
//!     Observation::new(1, "yes"),
//!     Observation::new(2, "no"),
//!     Observation::weighted(2, "yes", 2.0),
//! ];
//! let result = compute_all(
//!     &observations,
//!     &VariableSpec::numeric("grade"),
//!     &VariableSpec::nominal("passed"),
//! );
//! println!("{}", result);
//! ```

pub mod base;
pub mod crosstab;
pub mod error;

pub use base::{CrosstabError, Directional, Result};
pub use crosstab::{
    ContingencyTable, Crosstab, CrosstabConfig, CrosstabResult, StatisticsSelection, analyze,
    compute_all, crosstab,
};
