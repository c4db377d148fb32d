//! Concordant and discordant pair counts
//!
//! Every ordinal measure depends on the weight of concordant (P) and
//! discordant (Q) case pairs. Enumerating case pairs is O(N²); here both are
//! derived from the R×C table in O(R·C) with two suffix-sum grids of shape
//! (R+1)×(C+1):
//!
//! - `below_right[i][j]`: weight in rows ≥ i and columns ≥ j,
//! - `below_left[i][j + 1]`: weight in rows ≥ i and columns ≤ j
//!   (column index shifted by one so column "−1" is the zero border).
//!
//! A cell pairs concordantly with everything strictly below and to the
//! right, and discordantly with everything strictly below and to the left.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use super::table::ContingencyTable;

/// Pair counts shared by the ordinal measures
///
/// `concordant` and `discordant` count unordered pairs. `row_untied` is the
/// number of unordered pairs not tied on the row variable,
/// `(W² − Σ rowTotals²) / 2`; `col_untied` likewise for columns.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PairCounts {
    /// Concordant pairs (P)
    pub concordant: f64,
    /// Discordant pairs (Q)
    pub discordant: f64,
    /// Pairs not tied on the row variable (D_r)
    pub row_untied: f64,
    /// Pairs not tied on the column variable (D_c)
    pub col_untied: f64,
}

impl PairCounts {
    /// Count pairs from the table; `None` for an empty table
    pub fn from_table(table: &ContingencyTable) -> Option<Self> {
        if table.is_empty() {
            return None;
        }

        let f = &table.counts;
        let (r, c) = f.dim();

        let mut below_right = Array2::<f64>::zeros((r + 1, c + 1));
        for i in (0..r).rev() {
            for j in (0..c).rev() {
                below_right[[i, j]] = f[[i, j]] + below_right[[i + 1, j]]
                    + below_right[[i, j + 1]]
                    - below_right[[i + 1, j + 1]];
            }
        }

        let mut below_left = Array2::<f64>::zeros((r + 1, c + 1));
        for i in (0..r).rev() {
            for j in 0..c {
                below_left[[i, j + 1]] = f[[i, j]] + below_left[[i + 1, j + 1]]
                    + below_left[[i, j]]
                    - below_left[[i + 1, j]];
            }
        }

        let mut concordant = 0.0;
        let mut discordant = 0.0;
        for i in 0..r {
            for j in 0..c {
                let weight = f[[i, j]];
                if weight > 0.0 {
                    concordant += weight * below_right[[i + 1, j + 1]];
                    discordant += weight * below_left[[i + 1, j]];
                }
            }
        }

        let w2 = table.total * table.total;
        let row_untied = 0.5 * (w2 - table.row_totals.iter().map(|t| t * t).sum::<f64>());
        let col_untied = 0.5 * (w2 - table.col_totals.iter().map(|t| t * t).sum::<f64>());

        let counts = Self {
            concordant,
            discordant,
            row_untied,
            col_untied,
        };
        tracing::trace!(?counts, "pair counts");
        Some(counts)
    }

    /// P − Q
    pub fn difference(&self) -> f64 {
        self.concordant - self.discordant
    }
}
