//! End-to-end checks of the model builders against the reference solver.

use proptest::prelude::*;
use u_mipgen::covering::{binomial, build_covering_design, CoveringParams};
use u_mipgen::format::write_problem;
use u_mipgen::knapsack::{build_knapsack, example, EXAMPLE_OPTIMUM};
use u_mipgen::mip::{EnumerationSolver, MipModel, MipSolver, SolverConfig, SolverStatus};
use u_mipgen::noise::{build_noise_dosage, symmetry_base, NoiseDosage, SymmetryHandling};

const TOL: f64 = 1e-6;

#[test]
fn knapsack_example_solves_to_42() {
    let model = build_knapsack(&example()).unwrap();
    let solution = EnumerationSolver::new().solve(&model, &SolverConfig::default());
    assert_eq!(solution.status, SolverStatus::Optimal);
    assert_eq!(solution.objective_value, Some(EXAMPLE_OPTIMUM));
    assert!(model.is_feasible(&solution.values, TOL));
}

#[test]
fn knapsack_problem_file_is_written() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mkp.mps");
    write_problem(&build_knapsack(&example()).unwrap(), &path).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("NAME"));
    assert!(text.lines().next().unwrap().ends_with(" mkp"));
    assert!(text.contains("OBJSENSE"));
    assert!(text.contains("Capacity(2)"));
    assert!(text.trim_end().ends_with("ENDATA"));
}

#[test]
fn covering_optimum_matches_schonheim_bound() {
    // C(5, 3, 2) = 4 blocks; the Schonheim bound is ceil(5/3 * ceil(4/2)) = 4
    let params = CoveringParams::new(1, 5, 3, 2).unwrap();
    let model = build_covering_design(&params);
    let solution = EnumerationSolver::new().solve(&model, &SolverConfig::default());
    assert_eq!(solution.status, SolverStatus::Optimal);
    assert_eq!(solution.objective_value, Some(4.0));
}

// ---------------------------------------------------------------------------
// Noise-dosage symmetry breaking
// ---------------------------------------------------------------------------

/// Values vector with `x[i,j] = cols[j][i]` and `z` at the largest dose.
fn assignment(model: &MipModel, inst: &NoiseDosage, cols: &[Vec<u64>]) -> Vec<f64> {
    let mut values = vec![0.0; model.variable_count()];
    let mut worst = 0.0f64;
    for (j, col) in cols.iter().enumerate() {
        let mut dose = 0.0;
        for (i, &x) in col.iter().enumerate() {
            let id = model.var_by_name(&format!("x[{i},{j}]")).unwrap();
            values[id.index()] = x as f64;
            dose += inst.alpha()[i] * x as f64;
        }
        worst = worst.max(dose);
    }
    values[model.var_by_name("z").unwrap().index()] = worst;
    values
}

/// Sorts worker columns by their positional encoding, largest first.
fn sort_workers(cols: &mut [Vec<u64>], base: u64) {
    let encode = |col: &Vec<u64>| {
        col.iter()
            .enumerate()
            .map(|(i, &x)| x * base.pow(i as u32))
            .sum::<u64>()
    };
    cols.sort_by_key(|col| std::cmp::Reverse(encode(col)));
}

#[test]
fn sorted_workers_satisfy_lex_rows() {
    let inst =
        NoiseDosage::new("tiny", 2, 3, vec![10.0, 4.0], vec![3, 5], vec![2.0, 3.0], 8).unwrap();
    let plain = build_noise_dosage(&inst, SymmetryHandling::None);
    let sym = build_noise_dosage(&inst, SymmetryHandling::SheraliSmith);

    let mut cols = vec![vec![1, 1], vec![1, 2], vec![1, 2]];
    let unsorted = assignment(&plain, &inst, &cols);
    assert!(plain.is_feasible(&unsorted, TOL));
    assert!(!sym.is_feasible(&unsorted, TOL));

    sort_workers(&mut cols, symmetry_base(&inst));
    assert_eq!(cols, vec![vec![1, 2], vec![1, 2], vec![1, 1]]);
    let sorted = assignment(&sym, &inst, &cols);
    assert!(sym.is_feasible(&sorted, TOL));
    assert_eq!(sym.objective_value(&sorted), plain.objective_value(&unsorted));
    assert_eq!(sym.objective_value(&sorted), Some(18.0));
}

proptest! {
    #[test]
    fn covering_model_counts(v in 3usize..=8, k_off in 0usize..6, t_off in 0usize..6) {
        let k = 1 + k_off % (v - 1);
        prop_assume!(k >= 2);
        let t = 1 + t_off % (k - 1);
        let params = CoveringParams::new(1, v, k, t).unwrap();
        let model = build_covering_design(&params);
        prop_assert_eq!(model.variable_count() as u64, binomial(v, k));
        prop_assert_eq!(model.constraint_count() as u64, binomial(v, t));
        prop_assert!(model.validate().is_ok());
    }

    #[test]
    fn any_feasible_schedule_sorts_into_symmetric_model(
        cols in (1usize..=3, 1usize..=4).prop_flat_map(|(m, n)| {
            prop::collection::vec(prop::collection::vec(0u64..=3, m), n)
        })
    ) {
        let m = cols[0].len();
        let n = cols.len();
        let d: Vec<u64> = (0..m).map(|i| cols.iter().map(|c| c[i]).sum()).collect();
        let alpha: Vec<f64> = (0..m).map(|i| 1.0 + i as f64).collect();
        // every worker fits: at most 3 machines * 3 cycles * 1 hour
        let inst = NoiseDosage::new("prop", m, n, alpha, d, vec![1.0; m], 12).unwrap();
        let plain = build_noise_dosage(&inst, SymmetryHandling::None);
        let sym = build_noise_dosage(&inst, SymmetryHandling::SheraliSmith);

        let original = assignment(&plain, &inst, &cols);
        prop_assert!(plain.is_feasible(&original, TOL));

        let mut sorted_cols = cols.clone();
        sort_workers(&mut sorted_cols, symmetry_base(&inst));
        let sorted = assignment(&sym, &inst, &sorted_cols);
        prop_assert!(sym.is_feasible(&sorted, TOL));
        prop_assert_eq!(sym.objective_value(&sorted), plain.objective_value(&original));
    }
}
