//! Chi-square family
//!
//! Pearson and likelihood-ratio statistics share the expected counts
//! `rowTotal · colTotal / W` and the df `(R − 1)(C − 1)`. The 2x2-only tests
//! (continuity correction, Fisher's exact test) and the linear-by-linear
//! association test are computed alongside.

use statrs::distribution::{ChiSquared, ContinuousCDF, Discrete, Hypergeometric};

use super::table::ContingencyTable;
use crate::base::{ChiSquareStatistics, ChiSquareTest, FisherExact, finite};

/// Relative tolerance when comparing hypergeometric probabilities
const FISHER_TOLERANCE: f64 = 1e-7;

/// Degrees of freedom, `None` when the table cannot be tested
fn degrees_of_freedom(table: &ContingencyTable) -> Option<usize> {
    if table.total <= 0.0 || table.is_empty() || !table.has_finite_total() {
        return None;
    }
    let df = (table.n_rows() - 1) * (table.n_cols() - 1);
    (df > 0).then_some(df)
}

/// Upper-tail probability of χ²(df)
fn p_value(statistic: f64, df: usize) -> Option<f64> {
    let dist = ChiSquared::new(df as f64).ok()?;
    finite(dist.sf(statistic))
}

fn test(statistic: f64, df: usize) -> Option<ChiSquareTest> {
    let statistic = finite(statistic)?;
    Some(ChiSquareTest {
        statistic,
        df,
        p_value: p_value(statistic, df),
    })
}

/// Sum a per-cell term over the table
///
/// `None` when any cell lacks a positive expected count, so an unusable
/// marginal never turns into a silently smaller statistic.
fn sum_cells(table: &ContingencyTable, term: impl Fn(f64, f64) -> f64) -> Option<f64> {
    let mut sum = 0.0;
    for ((i, j), &observed) in table.counts.indexed_iter() {
        let expected = table.expected(i, j).filter(|&e| e > 0.0)?;
        sum += term(observed, expected);
    }
    finite(sum)
}

/// Pearson chi-square
pub fn pearson(table: &ContingencyTable) -> Option<ChiSquareTest> {
    let df = degrees_of_freedom(table)?;
    let statistic = sum_cells(table, |o, e| (o - e).powi(2) / e)?;
    test(statistic, df)
}

/// Likelihood-ratio chi-square; empty cells contribute nothing
pub fn likelihood_ratio(table: &ContingencyTable) -> Option<ChiSquareTest> {
    let df = degrees_of_freedom(table)?;
    let statistic = 2.0
        * sum_cells(table, |o, e| {
            if o > 0.0 { o * (o / e).ln() } else { 0.0 }
        })?;
    test(statistic.max(0.0), df)
}

fn is_two_by_two(table: &ContingencyTable) -> bool {
    table.n_rows() == 2 && table.n_cols() == 2
}

/// Yates continuity-corrected chi-square, 2x2 tables only
pub fn continuity_corrected(table: &ContingencyTable) -> Option<ChiSquareTest> {
    if !is_two_by_two(table) {
        return None;
    }
    let df = degrees_of_freedom(table)?;
    let statistic = sum_cells(table, |o, e| ((o - e).abs() - 0.5).max(0.0).powi(2) / e)?;
    test(statistic, df)
}

/// Linear-by-linear association `(W − 1) · r²` with one df
pub fn linear_by_linear(table: &ContingencyTable, pearson_r: Option<f64>) -> Option<ChiSquareTest> {
    degrees_of_freedom(table)?;
    let r = pearson_r?;
    if table.total <= 1.0 {
        return None;
    }
    test((table.total - 1.0) * r * r, 1)
}

/// Sum hypergeometric probabilities along `xs`, which must be non-increasing
///
/// Terms are taken relative to the first one so that tails of tables with
/// thousands of cases stay finite; the walk stops once a term no longer
/// moves the sum.
fn decreasing_sum(dist: &Hypergeometric, xs: impl IntoIterator<Item = u64>) -> f64 {
    let mut xs = xs.into_iter();
    let Some(first) = xs.next() else {
        return 0.0;
    };
    let ln_first = dist.ln_pmf(first);
    if !ln_first.is_finite() {
        return 0.0;
    }

    let mut sum = 1.0;
    for x in xs {
        let term = (dist.ln_pmf(x) - ln_first).exp();
        sum += term;
        if term <= f64::EPSILON * sum {
            break;
        }
    }
    sum * ln_first.exp()
}

/// First `x` in `[start, end)` where `pred` fails, `pred` holding on a prefix
fn partition_point(mut start: u64, mut end: u64, pred: impl Fn(u64) -> bool) -> u64 {
    while start < end {
        let mid = start + (end - start) / 2;
        if pred(mid) {
            start = mid + 1;
        } else {
            end = mid;
        }
    }
    start
}

/// Fisher's exact test, 2x2 tables of whole-number counts only
///
/// The hypergeometric distribution is unimodal, so each tail is summed
/// walking away from the mode and the two-sided cut points are found by
/// bisection on either side of it. Probabilities are compared on the log
/// scale.
pub fn fisher_exact(table: &ContingencyTable) -> Option<FisherExact> {
    if !is_two_by_two(table) || !table.has_finite_total() {
        return None;
    }
    let whole = |x: f64| x >= 0.0 && (x - x.round()).abs() < 1e-9 && x.round() < u64::MAX as f64;
    if !table.counts.iter().all(|&x| whole(x)) {
        return None;
    }

    let a = table.counts[[0, 0]].round() as u64;
    let population = table.total.round() as u64;
    let successes = table.row_totals[0].round() as u64;
    let draws = table.col_totals[0].round() as u64;

    let dist = Hypergeometric::new(population, successes, draws).ok()?;
    let lo = (successes + draws).saturating_sub(population);
    let hi = successes.min(draws);
    let mode = ((u128::from(draws) + 1) * (u128::from(successes) + 1)
        / (u128::from(population) + 2)) as u64;
    let mode = mode.clamp(lo, hi);

    let ln_observed = dist.ln_pmf(a);
    if !ln_observed.is_finite() {
        return None;
    }
    let p_observed = ln_observed.exp().min(1.0);

    let left = if a <= mode {
        decreasing_sum(&dist, (lo..=a).rev())
    } else {
        1.0 - decreasing_sum(&dist, a + 1..=hi)
    };
    let right = if a >= mode {
        decreasing_sum(&dist, a..=hi)
    } else {
        1.0 - decreasing_sum(&dist, (lo..a).rev())
    };

    // outcomes no more likely than the observed one
    let ln_cutoff = ln_observed + FISHER_TOLERANCE.ln_1p();
    let below_mode = partition_point(lo, mode + 1, |x| dist.ln_pmf(x) <= ln_cutoff);
    let above_mode = partition_point(mode + 1, hi + 1, |x| dist.ln_pmf(x) > ln_cutoff);
    let mut two_sided = decreasing_sum(&dist, (lo..below_mode).rev());
    two_sided += decreasing_sum(&dist, above_mode..=hi);

    Some(FisherExact {
        left: finite(left)?.clamp(p_observed, 1.0),
        right: finite(right)?.clamp(p_observed, 1.0),
        two_sided: finite(two_sided)?.clamp(p_observed, 1.0),
    })
}

/// Smallest expected count and number of cells expected below 5
fn expected_counts(table: &ContingencyTable) -> (Option<f64>, usize) {
    let mut min_expected: Option<f64> = None;
    let mut below_5 = 0;
    for i in 0..table.n_rows() {
        for j in 0..table.n_cols() {
            if let Some(e) = table.expected(i, j) {
                min_expected = Some(min_expected.map_or(e, |m| m.min(e)));
                if e < 5.0 {
                    below_5 += 1;
                }
            }
        }
    }
    (min_expected, below_5)
}

/// Assemble the chi-square family from the memoized Pearson statistic
pub fn statistics(
    table: &ContingencyTable,
    pearson: Option<ChiSquareTest>,
    pearson_r: Option<f64>,
    with_fisher: bool,
) -> ChiSquareStatistics {
    let (min_expected, cells_expected_below_5) = expected_counts(table);

    ChiSquareStatistics {
        pearson,
        likelihood_ratio: likelihood_ratio(table),
        continuity_corrected: continuity_corrected(table),
        linear_by_linear: linear_by_linear(table, pearson_r),
        fisher_exact: if with_fisher { fisher_exact(table) } else { None },
        min_expected,
        cells_expected_below_5,
    }
}
