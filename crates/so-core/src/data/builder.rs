//! Builder pattern for assembling observations from parallel columns

use super::*;

/// Builder for creating weighted observations from parallel Series
///
/// All supplied columns must have the same length; the weight column, when
/// present, must be numeric. Shape problems are reported here, before any
/// table is built.
#[derive(Debug, Default)]
pub struct ObservationBuilder<'a> {
    rows: Option<&'a Series>,
    cols: Option<&'a Series>,
    weights: Option<&'a Series>,
}

impl<'a> ObservationBuilder<'a> {
    /// Create a new ObservationBuilder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the row-variable column
    pub fn rows(mut self, series: &'a Series) -> Self {
        self.rows = Some(series);
        self
    }

    /// Set the column-variable column
    pub fn cols(mut self, series: &'a Series) -> Self {
        self.cols = Some(series);
        self
    }

    /// Set the case-weight column
    pub fn weights(mut self, series: &'a Series) -> Self {
        self.weights = Some(series);
        self
    }

    /// Build the observations
    pub fn build(self) -> Result<Vec<Observation>> {
        let rows = self
            .rows
            .ok_or_else(|| DataError::InvalidParameter("row variable not set".to_string()))?;
        let cols = self
            .cols
            .ok_or_else(|| DataError::InvalidParameter("column variable not set".to_string()))?;

        let n = rows.len();
        if cols.len() != n {
            return Err(DataError::DimensionMismatch {
                expected: format!("{} rows", n),
                actual: format!("{} rows", cols.len()),
            });
        }

        if let Some(weights) = self.weights {
            if !weights.is_numeric() {
                return Err(DataError::NonNumericData(weights.dtype()));
            }
            if weights.len() != n {
                return Err(DataError::DimensionMismatch {
                    expected: format!("{} weights", n),
                    actual: format!("{} weights", weights.len()),
                });
            }
        }

        let observations: Vec<Observation> = (0..n)
            .map(|i| {
                let row = rows.get(i).unwrap_or(Value::SYSMIS);
                let col = cols.get(i).unwrap_or(Value::SYSMIS);
                let weight = self
                    .weights
                    .and_then(|w| w.get_f64(i))
                    .unwrap_or(1.0);
                Observation::weighted(row, col, weight)
            })
            .collect();

        tracing::trace!(cases = observations.len(), "assembled observations");
        Ok(observations)
    }
}
