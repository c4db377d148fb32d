//! Directional measure definition

use serde::{Deserialize, Serialize};

/// A measure with symmetric and dependent-variable variants
///
/// `row_dependent` treats the row variable as the one being predicted,
/// `col_dependent` the column variable. Measures without a symmetric form
/// leave `symmetric` as `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Directional {
    /// Symmetric variant
    pub symmetric: Option<f64>,
    /// Row variable dependent
    pub row_dependent: Option<f64>,
    /// Column variable dependent
    pub col_dependent: Option<f64>,
}

impl Directional {
    /// Create from the two dependent variants
    pub fn new(row_dependent: Option<f64>, col_dependent: Option<f64>) -> Self {
        Self {
            symmetric: None,
            row_dependent,
            col_dependent,
        }
    }

    /// Set the symmetric variant
    pub fn with_symmetric(mut self, symmetric: Option<f64>) -> Self {
        self.symmetric = symmetric;
        self
    }
}
