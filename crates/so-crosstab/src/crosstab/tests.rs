//! Tests for crosstabulation
//!
//! Known values come from hand-computed 2x2 tables, where phi, tau-b,
//! Goodman and Kruskal's tau and Pearson's r have closed forms that
//! cross-check each other.

use approx::assert_abs_diff_eq;
use ndarray::{Array2, array};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::*;
use crate::base::{
    AgreementMeasures, ChiSquareStatistics, CorrelationMeasures, CrosstabError, NominalMeasures,
    OrdinalMeasures, PreMeasures,
};
use so_core::data::{DataError, Level, Value};

// ==================== Test Fixtures ====================

/// Perfect positive association: [[10, 0], [0, 10]]
fn perfect_table() -> ContingencyTable {
    ContingencyTable::from_counts(array![[10.0, 0.0], [0.0, 10.0]]).unwrap()
}

/// Exact independence: [[5, 5], [5, 5]]
fn independent_table() -> ContingencyTable {
    ContingencyTable::from_counts(array![[5.0, 5.0], [5.0, 5.0]]).unwrap()
}

/// Moderate association: [[20, 5], [10, 15]], W = 50
fn moderate_table() -> ContingencyTable {
    ContingencyTable::from_counts(array![[20.0, 5.0], [10.0, 15.0]]).unwrap()
}

/// Asymmetric 3x3 table
fn three_by_three() -> ContingencyTable {
    ContingencyTable::from_counts(array![
        [12.0, 5.0, 3.0],
        [4.0, 10.0, 6.0],
        [2.0, 3.0, 9.0]
    ])
    .unwrap()
}

fn run(table: ContingencyTable) -> CrosstabResult {
    analyze(table, &CrosstabConfig::default())
}

fn survey_observations() -> Vec<Observation> {
    vec![
        Observation::new(10, "yes"),
        Observation::new(2, "no"),
        Observation::new(9, "yes"),
        Observation::new(2, "yes"),
        Observation::weighted(10, "no", 2.5),
        Observation::new(99, "yes"),
        Observation::new(9, "refused"),
        Observation::weighted(2, "no", 0.0),
        Observation::weighted(9, "no", -1.0),
        Observation::weighted(Value::SYSMIS, "no", 1.0),
    ]
}

fn survey_specs() -> (VariableSpec, VariableSpec) {
    (
        VariableSpec::numeric("score").with_missing_code(99),
        VariableSpec::nominal("answer").with_missing_code("refused"),
    )
}

/// Expand a table of whole-number counts into (row, col) cases
fn expand_cases(counts: &Array2<f64>) -> Vec<(usize, usize)> {
    let mut cases = Vec::new();
    for ((i, j), &n) in counts.indexed_iter() {
        for _ in 0..(n as usize) {
            cases.push((i, j));
        }
    }
    cases
}

/// O(N²) pair enumeration: (P, Q, pairs untied on rows, pairs untied on cols)
fn brute_force_pairs(cases: &[(usize, usize)]) -> (f64, f64, f64, f64) {
    let (mut p, mut q, mut dr, mut dc) = (0.0, 0.0, 0.0, 0.0);
    for a in 0..cases.len() {
        for b in (a + 1)..cases.len() {
            let (ra, ca) = cases[a];
            let (rb, cb) = cases[b];
            let dir = (ra as i64 - rb as i64) * (ca as i64 - cb as i64);
            if dir > 0 {
                p += 1.0;
            } else if dir < 0 {
                q += 1.0;
            }
            if ra != rb {
                dr += 1.0;
            }
            if ca != cb {
                dc += 1.0;
            }
        }
    }
    (p, q, dr, dc)
}

/// Mid-ranks of individual cases, computed by sorting
fn case_ranks(values: &[usize]) -> Vec<f64> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by_key(|&k| values[k]);
    let mut ranks = vec![0.0; values.len()];
    let mut start = 0;
    while start < order.len() {
        let mut end = start;
        while end + 1 < order.len() && values[order[end + 1]] == values[order[start]] {
            end += 1;
        }
        let mid = (start + end) as f64 / 2.0 + 1.0;
        for &k in &order[start..=end] {
            ranks[k] = mid;
        }
        start = end + 1;
    }
    ranks
}

fn plain_correlation(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len() as f64;
    let mx = x.iter().sum::<f64>() / n;
    let my = y.iter().sum::<f64>() / n;
    let sxy: f64 = x.iter().zip(y).map(|(a, b)| (a - mx) * (b - my)).sum();
    let sxx: f64 = x.iter().map(|a| (a - mx).powi(2)).sum();
    let syy: f64 = y.iter().map(|b| (b - my).powi(2)).sum();
    sxy / (sxx * syy).sqrt()
}

fn random_table(rng: &mut StdRng) -> Array2<f64> {
    let r = rng.random_range(1..=4);
    let c = rng.random_range(1..=4);
    Array2::from_shape_fn((r, c), |_| rng.random_range(0..6) as f64)
}

// ==================== Table Builder ====================

#[test]
fn test_build_excludes_missing_and_bad_weights() {
    let (row, col) = survey_specs();
    let table = ContingencyTable::build(&survey_observations(), &row, &col);

    assert_eq!(
        table.row_categories,
        vec![Value::from(2), Value::from(9), Value::from(10)]
    );
    assert_eq!(table.col_categories, vec![Value::from("no"), Value::from("yes")]);
    assert_eq!(table.counts, array![[1.0, 1.0], [0.0, 1.0], [2.5, 1.0]]);
    assert_abs_diff_eq!(table.total, 6.5, epsilon = 1e-12);
    assert_eq!(table.excluded_cases, 5);
    assert_abs_diff_eq!(table.excluded_weight, 3.0, epsilon = 1e-12);
    assert_eq!(table.row_variable, "score");
    assert_eq!(table.col_variable, "answer");
}

#[test]
fn test_build_sorts_numbers_numerically() {
    let observations = vec![
        Observation::new(10, 1),
        Observation::new(9, 1),
        Observation::new(100, 2),
    ];
    let spec = VariableSpec::numeric("x");
    let table = ContingencyTable::build(&observations, &spec, &spec);

    assert_eq!(
        table.row_categories,
        vec![Value::from(9), Value::from(10), Value::from(100)]
    );
    assert_eq!(table.row_scores(), vec![9.0, 10.0, 100.0]);
}

#[test]
fn test_marginal_consistency() {
    let (row, col) = survey_specs();
    let table = ContingencyTable::build(&survey_observations(), &row, &col);

    for (i, row) in table.counts.outer_iter().enumerate() {
        assert_abs_diff_eq!(row.sum(), table.row_totals[i], epsilon = 1e-12);
    }
    for (j, col) in table.counts.columns().into_iter().enumerate() {
        assert_abs_diff_eq!(col.sum(), table.col_totals[j], epsilon = 1e-12);
    }
    assert_abs_diff_eq!(table.row_totals.sum(), table.total, epsilon = 1e-12);
    assert_abs_diff_eq!(table.col_totals.sum(), table.total, epsilon = 1e-12);
}

#[test]
fn test_from_counts_drops_empty_categories() {
    let table = ContingencyTable::from_counts(array![[1.0, 0.0, 2.0], [0.0, 0.0, 0.0]]).unwrap();
    assert_eq!(table.n_rows(), 1);
    assert_eq!(table.n_cols(), 2);
    assert_eq!(table.col_categories, vec![Value::from(0), Value::from(2)]);

    let empty = ContingencyTable::from_counts(Array2::zeros((3, 3))).unwrap();
    assert!(empty.is_empty());
    assert_eq!(empty.total, 0.0);
}

#[test]
fn test_from_counts_rejects_negative_cells() {
    let err = ContingencyTable::from_counts(array![[1.0, -2.0]]).unwrap_err();
    assert!(matches!(err, CrosstabError::InvalidTable { .. }));
}

#[test]
fn test_scores_follow_measurement_level() {
    let table = ContingencyTable::from_counts(array![[1.0, 0.0], [0.0, 1.0]])
        .unwrap()
        .with_levels(Level::Nominal, Level::Numeric);
    assert_eq!(table.row_scores(), vec![0.0, 1.0]);

    let observations = vec![Observation::new(5, "b"), Observation::new(7, "a")];
    let table = ContingencyTable::build(
        &observations,
        &VariableSpec::nominal("x"),
        &VariableSpec::numeric("y"),
    );
    // positions for nominal numbers and for text in a numeric variable
    assert_eq!(table.row_scores(), vec![0.0, 1.0]);
    assert_eq!(table.col_scores(), vec![0.0, 1.0]);
}

// ==================== Pair Counts ====================

#[test]
fn test_pair_counts_match_brute_force() {
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..200 {
        let counts = random_table(&mut rng);
        let table = ContingencyTable::from_counts(counts.clone()).unwrap();
        let Some(pairs) = PairCounts::from_table(&table) else {
            assert_eq!(counts.sum(), 0.0);
            continue;
        };

        let (p, q, dr, dc) = brute_force_pairs(&expand_cases(&counts));
        assert_abs_diff_eq!(pairs.concordant, p, epsilon = 1e-9);
        assert_abs_diff_eq!(pairs.discordant, q, epsilon = 1e-9);
        assert_abs_diff_eq!(pairs.row_untied, dr, epsilon = 1e-9);
        assert_abs_diff_eq!(pairs.col_untied, dc, epsilon = 1e-9);
    }
}

#[test]
fn test_pair_counts_empty_table() {
    let table = ContingencyTable::from_counts(Array2::zeros((0, 0))).unwrap();
    assert!(PairCounts::from_table(&table).is_none());
}

// ==================== Known Cases ====================

#[test]
fn test_perfect_association() {
    let result = run(perfect_table());

    let pearson = result.chi_square.pearson.unwrap();
    assert_abs_diff_eq!(pearson.statistic, 20.0, epsilon = 1e-10);
    assert_eq!(pearson.df, 1);
    assert!(pearson.p_value.unwrap() < 1e-4);

    assert_abs_diff_eq!(result.ordinal.gamma.unwrap(), 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(result.ordinal.tau_b.unwrap(), 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(result.ordinal.tau_c.unwrap(), 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(result.nominal.phi.unwrap(), 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(result.nominal.cramers_v.unwrap(), 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(
        result.nominal.contingency_coefficient.unwrap(),
        0.5f64.sqrt(),
        epsilon = 1e-12
    );
    assert_abs_diff_eq!(result.agreement.kappa.unwrap(), 1.0, epsilon = 1e-12);

    let somers = result.ordinal.somers_d;
    assert_abs_diff_eq!(somers.symmetric.unwrap(), 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(somers.row_dependent.unwrap(), 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(somers.col_dependent.unwrap(), 1.0, epsilon = 1e-12);

    assert_abs_diff_eq!(result.pre.lambda.symmetric.unwrap(), 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(
        result.pre.goodman_kruskal_tau.col_dependent.unwrap(),
        1.0,
        epsilon = 1e-12
    );
    assert_abs_diff_eq!(
        result.pre.uncertainty_coefficient.symmetric.unwrap(),
        1.0,
        epsilon = 1e-12
    );
    assert_abs_diff_eq!(result.correlation.pearson_r.unwrap(), 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(result.correlation.spearman_rho.unwrap(), 1.0, epsilon = 1e-12);

    let lr = result.chi_square.likelihood_ratio.unwrap();
    assert_abs_diff_eq!(lr.statistic, 40.0 * 2f64.ln(), epsilon = 1e-10);
    let yates = result.chi_square.continuity_corrected.unwrap();
    assert_abs_diff_eq!(yates.statistic, 16.2, epsilon = 1e-10);
}

#[test]
fn test_independence() {
    let result = run(independent_table());

    let pearson = result.chi_square.pearson.unwrap();
    assert_abs_diff_eq!(pearson.statistic, 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(pearson.p_value.unwrap(), 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(
        result.chi_square.likelihood_ratio.unwrap().statistic,
        0.0,
        epsilon = 1e-12
    );
    assert_abs_diff_eq!(result.nominal.cramers_v.unwrap(), 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(result.ordinal.gamma.unwrap(), 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(result.ordinal.tau_b.unwrap(), 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(result.agreement.kappa.unwrap(), 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(result.correlation.pearson_r.unwrap(), 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(result.pre.lambda.col_dependent.unwrap(), 0.0, epsilon = 1e-12);
}

#[test]
fn test_moderate_two_by_two() {
    let result = run(moderate_table());
    let phi = (1.0f64 / 6.0).sqrt();

    assert_abs_diff_eq!(
        result.chi_square.pearson.unwrap().statistic,
        25.0 / 3.0,
        epsilon = 1e-10
    );
    assert_abs_diff_eq!(result.nominal.phi.unwrap(), phi, epsilon = 1e-12);

    assert_eq!(result.ordinal.concordant, Some(300.0));
    assert_eq!(result.ordinal.discordant, Some(50.0));
    assert_abs_diff_eq!(result.ordinal.gamma.unwrap(), 250.0 / 350.0, epsilon = 1e-12);
    assert_abs_diff_eq!(result.ordinal.tau_b.unwrap(), phi, epsilon = 1e-12);
    assert_abs_diff_eq!(result.ordinal.tau_c.unwrap(), 0.4, epsilon = 1e-12);

    let somers = result.ordinal.somers_d;
    assert_abs_diff_eq!(somers.row_dependent.unwrap(), 250.0 / 600.0, epsilon = 1e-12);
    assert_abs_diff_eq!(somers.col_dependent.unwrap(), 0.4, epsilon = 1e-12);
    assert_abs_diff_eq!(somers.symmetric.unwrap(), 250.0 / 612.5, epsilon = 1e-12);

    let lambda = result.pre.lambda;
    assert_abs_diff_eq!(lambda.col_dependent.unwrap(), 0.25, epsilon = 1e-12);
    assert_abs_diff_eq!(lambda.row_dependent.unwrap(), 0.4, epsilon = 1e-12);
    assert_abs_diff_eq!(lambda.symmetric.unwrap(), 1.0 / 3.0, epsilon = 1e-12);

    // Goodman and Kruskal's tau equals phi² on a 2x2 table
    let tau = result.pre.goodman_kruskal_tau;
    assert_abs_diff_eq!(tau.col_dependent.unwrap(), 1.0 / 6.0, epsilon = 1e-12);
    assert_abs_diff_eq!(tau.row_dependent.unwrap(), 1.0 / 6.0, epsilon = 1e-12);
    assert!(tau.symmetric.is_none());

    assert_abs_diff_eq!(result.agreement.kappa.unwrap(), 0.4, epsilon = 1e-12);
    assert_abs_diff_eq!(result.correlation.pearson_r.unwrap(), phi, epsilon = 1e-12);
    assert_abs_diff_eq!(result.correlation.spearman_rho.unwrap(), phi, epsilon = 1e-12);
    assert_abs_diff_eq!(result.correlation.eta.row_dependent.unwrap(), phi, epsilon = 1e-12);
    assert_abs_diff_eq!(result.correlation.eta.col_dependent.unwrap(), phi, epsilon = 1e-12);

    let linear = result.chi_square.linear_by_linear.unwrap();
    assert_abs_diff_eq!(linear.statistic, 49.0 / 6.0, epsilon = 1e-10);
    assert_eq!(linear.df, 1);
}

#[test]
fn test_cell_statistics() {
    let result = run(moderate_table());
    let cell = result.cells[0][0];

    assert_eq!(cell.observed, 20.0);
    assert_abs_diff_eq!(cell.expected.unwrap(), 15.0, epsilon = 1e-12);
    assert_abs_diff_eq!(cell.row_percent.unwrap(), 80.0, epsilon = 1e-12);
    assert_abs_diff_eq!(cell.col_percent.unwrap(), 200.0 / 3.0, epsilon = 1e-12);
    assert_abs_diff_eq!(cell.total_percent.unwrap(), 40.0, epsilon = 1e-12);
    assert_abs_diff_eq!(cell.residual.unwrap(), 5.0, epsilon = 1e-12);
    assert_abs_diff_eq!(
        cell.standardized_residual.unwrap(),
        5.0 / 15f64.sqrt(),
        epsilon = 1e-12
    );
    assert_abs_diff_eq!(
        cell.adjusted_residual.unwrap(),
        5.0 / 3f64.sqrt(),
        epsilon = 1e-12
    );

    let total: f64 = result
        .cells
        .iter()
        .flatten()
        .map(|c| c.total_percent.unwrap())
        .sum();
    assert_abs_diff_eq!(total, 100.0, epsilon = 1e-10);
}

#[test]
fn test_fisher_exact_tea_tasting() {
    let table = ContingencyTable::from_counts(array![[3.0, 1.0], [1.0, 3.0]]).unwrap();
    let fisher = chi_square::fisher_exact(&table).unwrap();

    assert_abs_diff_eq!(fisher.left, 69.0 / 70.0, epsilon = 1e-10);
    assert_abs_diff_eq!(fisher.right, 17.0 / 70.0, epsilon = 1e-10);
    assert_abs_diff_eq!(fisher.two_sided, 34.0 / 70.0, epsilon = 1e-10);
}

#[test]
fn test_fisher_exact_large_samples() {
    // W = 2410, beyond where plain hypergeometric probabilities overflow
    let table = ContingencyTable::from_counts(array![[600.0, 600.0], [600.0, 610.0]]).unwrap();
    let fisher = chi_square::fisher_exact(&table).unwrap();
    assert_abs_diff_eq!(fisher.left, 0.5962263892523312, epsilon = 1e-8);
    assert_abs_diff_eq!(fisher.right, 0.43560863838729075, epsilon = 1e-8);
    assert_abs_diff_eq!(fisher.two_sided, 0.8705519658851826, epsilon = 1e-8);

    // symmetric margins: the two-sided p-value is twice the smaller tail
    let table =
        ContingencyTable::from_counts(array![[1020.0, 980.0], [980.0, 1020.0]]).unwrap();
    let fisher = chi_square::fisher_exact(&table).unwrap();
    assert_abs_diff_eq!(fisher.left, 0.9026073440075923, epsilon = 1e-8);
    assert_abs_diff_eq!(fisher.right, 0.10873162515754252, epsilon = 1e-8);
    assert_abs_diff_eq!(fisher.two_sided, 0.21746325031508504, epsilon = 1e-8);

    let result = run(table);
    assert!(result.chi_square.fisher_exact.is_some());
}

#[test]
fn test_fisher_exact_huge_weights() {
    let table = ContingencyTable::from_counts(array![[2e6, 2e6], [2e6, 2e6]]).unwrap();
    let fisher = chi_square::fisher_exact(&table).unwrap();

    assert_abs_diff_eq!(fisher.two_sided, 1.0, epsilon = 1e-6);
    assert_abs_diff_eq!(fisher.left, fisher.right, epsilon = 1e-6);
    assert!(fisher.left + fisher.right >= 1.0 - 1e-6);
    assert!(fisher.left < 0.51);
}

#[test]
fn test_fisher_exact_requires_whole_two_by_two() {
    let fractional = ContingencyTable::from_counts(array![[3.5, 1.0], [1.0, 3.0]]).unwrap();
    assert!(chi_square::fisher_exact(&fractional).is_none());
    assert!(chi_square::fisher_exact(&three_by_three()).is_none());
    assert!(chi_square::continuity_corrected(&three_by_three()).is_none());
}

#[test]
fn test_chi_square_summary_counts() {
    let result = run(perfect_table());
    assert_eq!(result.chi_square.min_expected, Some(5.0));
    assert_eq!(result.chi_square.cells_expected_below_5, 0);

    let result = run(ContingencyTable::from_counts(array![[3.0, 1.0], [1.0, 3.0]]).unwrap());
    assert_eq!(result.chi_square.cells_expected_below_5, 4);
}

// ==================== Symmetry ====================

#[test]
fn test_transpose_symmetry() {
    for table in [three_by_three(), moderate_table()] {
        let a = run(table.clone());
        let b = run(table.transpose());

        let same = |x: Option<f64>, y: Option<f64>| {
            assert_abs_diff_eq!(x.unwrap(), y.unwrap(), epsilon = 1e-12);
        };
        same(a.ordinal.gamma, b.ordinal.gamma);
        same(a.ordinal.tau_b, b.ordinal.tau_b);
        same(a.ordinal.tau_c, b.ordinal.tau_c);
        same(a.nominal.phi, b.nominal.phi);
        same(a.nominal.cramers_v, b.nominal.cramers_v);
        same(
            a.nominal.contingency_coefficient,
            b.nominal.contingency_coefficient,
        );
        same(a.ordinal.somers_d.symmetric, b.ordinal.somers_d.symmetric);
        same(a.ordinal.somers_d.row_dependent, b.ordinal.somers_d.col_dependent);
        same(a.ordinal.somers_d.col_dependent, b.ordinal.somers_d.row_dependent);
        same(a.pre.lambda.row_dependent, b.pre.lambda.col_dependent);
        same(
            a.pre.goodman_kruskal_tau.row_dependent,
            b.pre.goodman_kruskal_tau.col_dependent,
        );
        same(a.correlation.pearson_r, b.correlation.pearson_r);
        same(a.agreement.kappa, b.agreement.kappa);
    }
}

// ==================== Correlation ====================

#[test]
fn test_numeric_scores_drive_pearson_r() {
    let observations = vec![
        Observation::new(1, "a"),
        Observation::new(2, "b"),
        Observation::new(10, "c"),
    ];
    let numeric = compute_all(
        &observations,
        &VariableSpec::numeric("x"),
        &VariableSpec::nominal("y"),
    );
    let nominal = compute_all(
        &observations,
        &VariableSpec::nominal("x"),
        &VariableSpec::nominal("y"),
    );

    assert_abs_diff_eq!(
        numeric.correlation.pearson_r.unwrap(),
        9.0 / (146.0f64 / 3.0 * 2.0).sqrt(),
        epsilon = 1e-12
    );
    assert_abs_diff_eq!(nominal.correlation.pearson_r.unwrap(), 1.0, epsilon = 1e-12);
    // ranks ignore the spacing of the scores
    assert_abs_diff_eq!(numeric.correlation.spearman_rho.unwrap(), 1.0, epsilon = 1e-12);
}

#[test]
fn test_spearman_matches_case_ranks() {
    let counts = three_by_three().counts;
    let cases = expand_cases(&counts);
    let rows: Vec<usize> = cases.iter().map(|c| c.0).collect();
    let cols: Vec<usize> = cases.iter().map(|c| c.1).collect();
    let expected = plain_correlation(&case_ranks(&rows), &case_ranks(&cols));

    let rho = correlation::spearman_rho(&three_by_three()).unwrap();
    assert_abs_diff_eq!(rho, expected, epsilon = 1e-12);
}

#[test]
fn test_uncertainty_and_eta_three_by_three() {
    let result = run(three_by_three());

    let u = result.pre.uncertainty_coefficient;
    assert_abs_diff_eq!(u.row_dependent.unwrap(), 0.1277457934932764, epsilon = 1e-12);
    assert_abs_diff_eq!(u.col_dependent.unwrap(), 0.12624704327125538, epsilon = 1e-12);
    assert_abs_diff_eq!(u.symmetric.unwrap(), 0.1269919965012069, epsilon = 1e-12);

    let eta = result.correlation.eta;
    assert_abs_diff_eq!(eta.row_dependent.unwrap(), 0.46188021535170065, epsilon = 1e-12);
    assert_abs_diff_eq!(eta.col_dependent.unwrap(), 0.4639803635691685, epsilon = 1e-12);
}

#[test]
fn test_mid_ranks() {
    let ranks = correlation::mid_ranks(&ndarray::arr1(&[3.0, 1.0, 2.0]));
    assert_eq!(ranks, vec![2.0, 4.0, 5.5]);
}

// ==================== Degenerate Input ====================

#[test]
fn test_empty_input_reports_undefined() {
    let observations = vec![
        Observation::weighted(1, 1, 0.0),
        Observation::new(Value::SYSMIS, 1),
    ];
    let spec = VariableSpec::numeric("x");
    let result = compute_all(&observations, &spec, &spec);

    assert!(result.is_empty());
    assert_eq!(result.n_valid(), Some(0.0));
    assert!(result.cells.is_empty());
    assert_eq!(result.chi_square, ChiSquareStatistics::default());
    assert_eq!(result.nominal, NominalMeasures::default());
    assert_eq!(result.ordinal, OrdinalMeasures::default());
    assert_eq!(result.pre, PreMeasures::default());
    assert_eq!(result.correlation, CorrelationMeasures::default());
    assert_eq!(result.agreement, AgreementMeasures::default());

    let json = serde_json::to_value(&result).unwrap();
    assert!(json["ordinal"]["gamma"].is_null());
    assert!(json["pre"]["lambda"]["symmetric"].is_null());
}

#[test]
fn test_overflowing_total_reports_undefined() {
    let observations = vec![
        Observation::weighted(1, 1, 1e308),
        Observation::weighted(2, 2, 1e308),
    ];
    let spec = VariableSpec::numeric("x");
    let table = ContingencyTable::build(&observations, &spec, &spec);
    assert!(!table.has_finite_total());
    assert!(table.expected(0, 0).is_none());
    assert!(chi_square::pearson(&table).is_none());
    assert!(chi_square::likelihood_ratio(&table).is_none());
    assert!(chi_square::fisher_exact(&table).is_none());

    let result = compute_all(&observations, &spec, &spec);
    assert_eq!(result.n_valid(), None);
    assert!(result.cells.is_empty());
    assert_eq!(result.chi_square, ChiSquareStatistics::default());
    assert_eq!(result.nominal, NominalMeasures::default());
    assert_eq!(result.ordinal, OrdinalMeasures::default());
    assert_eq!(result.pre, PreMeasures::default());
    assert_eq!(result.correlation, CorrelationMeasures::default());
    assert_eq!(result.agreement, AgreementMeasures::default());

    let err = ContingencyTable::from_counts(array![[1e308, 0.0], [0.0, 1e308]]).unwrap_err();
    assert!(matches!(err, CrosstabError::InvalidTable { .. }));
}

#[test]
fn test_single_row_table() {
    let result = run(ContingencyTable::from_counts(array![[4.0, 6.0]]).unwrap());

    assert!(result.chi_square.pearson.is_none());
    assert!(result.nominal.phi.is_none());
    assert!(result.nominal.cramers_v.is_none());
    assert!(result.ordinal.tau_b.is_none());
    assert!(result.ordinal.tau_c.is_none());
    assert!(result.ordinal.gamma.is_none());
    assert!(result.correlation.pearson_r.is_none());
    assert!(result.agreement.kappa.is_none());

    // the row marginal alone predicts the row perfectly
    assert_eq!(result.pre.lambda.row_dependent, Some(0.0));
    assert_eq!(result.pre.goodman_kruskal_tau.row_dependent, Some(0.0));
}

#[test]
fn test_kappa_requires_square_table() {
    let table = ContingencyTable::from_counts(array![[1.0, 2.0, 3.0], [3.0, 2.0, 1.0]]).unwrap();
    assert!(agreement::kappa(&table).is_none());
}

#[test]
fn test_fractional_weights() {
    let observations = vec![
        Observation::weighted(1, 1, 0.5),
        Observation::weighted(1, 1, 0.25),
        Observation::weighted(2, 2, 1.25),
    ];
    let spec = VariableSpec::numeric("x");
    let result = compute_all(&observations, &spec, &spec);

    assert_eq!(result.table.counts, array![[0.75, 0.0], [0.0, 1.25]]);
    assert_abs_diff_eq!(result.ordinal.gamma.unwrap(), 1.0, epsilon = 1e-12);
    assert!(result.chi_square.fisher_exact.is_none());
}

// ==================== Assembly ====================

#[test]
fn test_idempotence() {
    let (row, col) = survey_specs();
    let observations = survey_observations();

    let first = compute_all(&observations, &row, &col);
    let second = compute_all(&observations, &row, &col);

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_disabled_families_are_undefined() {
    let (row, col) = survey_specs();
    let crosstab = Crosstab::new(row, col).statistics(StatisticsSelection {
        ordinal: false,
        pre: false,
        ..StatisticsSelection::all()
    });
    let result = crosstab.compute(&survey_observations()).unwrap();

    assert_eq!(result.ordinal, OrdinalMeasures::default());
    assert_eq!(result.pre, PreMeasures::default());
    assert!(result.nominal.phi.is_some());
}

#[test]
fn test_invalid_config() {
    let config = CrosstabConfig {
        statistics: StatisticsSelection::none(),
        cell_statistics: false,
        fisher_exact: true,
    };
    let (row, col) = survey_specs();
    let err = Crosstab::new(row, col)
        .config(config)
        .compute(&survey_observations())
        .unwrap_err();
    assert!(matches!(err, CrosstabError::InvalidConfig { .. }));
}

#[test]
fn test_crosstab_from_series() {
    let rows = Series::int(vec![1, 1, 2, 2, 2]);
    let cols = Series::categorical(&["a", "a", "b", "b", "a"]);
    let weights = Series::float(vec![1.0, 1.0, 1.0, 1.0, 2.0]);

    let result = crosstab(
        &rows,
        &cols,
        Some(&weights),
        VariableSpec::numeric("x"),
        VariableSpec::nominal("y"),
    )
    .unwrap();

    assert_eq!(result.table.counts, array![[2.0, 0.0], [2.0, 2.0]]);
    assert_eq!(result.table.total, 6.0);
}

#[test]
fn test_crosstab_rejects_mismatched_lengths() {
    let rows = Series::int(vec![1, 2, 3]);
    let cols = Series::int(vec![1, 2]);

    let err = crosstab(
        &rows,
        &cols,
        None,
        VariableSpec::numeric("x"),
        VariableSpec::numeric("y"),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        CrosstabError::Data(DataError::DimensionMismatch { .. })
    ));
}

#[test]
fn test_summary_display() {
    let result = run(perfect_table().with_names("treatment", "outcome"));
    let text = result.to_string();
    assert!(text.contains("treatment by outcome"));
    assert!(text.contains("Pearson Chi-Square"));
    assert!(text.contains("Fisher's Exact Test"));

    let empty = run(ContingencyTable::from_counts(Array2::zeros((0, 0))).unwrap());
    assert!(empty.to_string().contains("n/a"));
}

// ==================== Property-Based Tests ====================

#[cfg(feature = "proptest")]
mod proptest_tests {
    use super::*;
    use proptest::collection::vec;
    use proptest::prelude::*;

    fn observations() -> impl Strategy<Value = Vec<Observation>> {
        vec((0i64..4, 0i64..4, 0.0f64..3.0), 0..60).prop_map(|cases| {
            cases
                .into_iter()
                .map(|(r, c, w)| Observation::weighted(r, c, w))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn test_marginals_and_bounds(observations in observations()) {
            let spec = VariableSpec::numeric("x");
            let result = compute_all(&observations, &spec, &spec);
            let table = &result.table;

            prop_assert!((table.row_totals.sum() - table.total).abs() < 1e-9);
            prop_assert!((table.col_totals.sum() - table.total).abs() < 1e-9);

            for value in [
                result.ordinal.gamma,
                result.ordinal.tau_b,
                result.ordinal.tau_c,
                result.correlation.pearson_r,
                result.correlation.spearman_rho,
            ]
            .into_iter()
            .flatten()
            {
                prop_assert!((-1.0 - 1e-9..=1.0 + 1e-9).contains(&value));
            }
            if let Some(v) = result.nominal.cramers_v {
                prop_assert!((-1e-9..=1.0 + 1e-9).contains(&v));
            }
        }

        #[test]
        fn test_transpose_invariance(observations in observations()) {
            let spec = VariableSpec::numeric("x");
            let table = ContingencyTable::build(&observations, &spec, &spec);
            let a = run(table.clone());
            let b = run(table.transpose());

            let close = |x: Option<f64>, y: Option<f64>| match (x, y) {
                (Some(x), Some(y)) => (x - y).abs() < 1e-9,
                (None, None) => true,
                _ => false,
            };
            prop_assert!(close(a.ordinal.gamma, b.ordinal.gamma));
            prop_assert!(close(a.ordinal.tau_b, b.ordinal.tau_b));
            prop_assert!(close(a.nominal.cramers_v, b.nominal.cramers_v));
            prop_assert!(close(a.ordinal.somers_d.row_dependent, b.ordinal.somers_d.col_dependent));
        }
    }
}
