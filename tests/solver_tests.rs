/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Tests for the Numerov shooting eigenvalue solver

use approx::assert_relative_eq;
use hydrogen_radial::grid::{build_grid, MeshParameters, RadialGrid};
use hydrogen_radial::potential::evaluate_potential;
use hydrogen_radial::solver::{count_nodes, solve_eigenstate, QuantumState, SolverConfig, SolverError};
use hydrogen_radial::utils::hydrogenic_energy;
use hydrogen_radial::RadialSolver;
use rstest::rstest;

/// Grid and bare Coulomb potential for a nucleus of charge `zeta`
fn coulomb_setup(params: MeshParameters<f64>, zeta: f64) -> (RadialGrid<f64>, Vec<f64>) {
    let grid = build_grid(&params).unwrap();
    let v = evaluate_potential(zeta, grid.r()).unwrap();
    (grid, v)
}

fn solve_default(n: u32, l: u32, zeta: f64) -> (RadialGrid<f64>, hydrogen_radial::Eigenstate<f64>) {
    let (grid, v) = coulomb_setup(MeshParameters::for_charge(zeta), zeta);
    let state = QuantumState::new(n, l, zeta).unwrap();
    let solution = solve_eigenstate(&state, &grid, &v, &SolverConfig::default()).unwrap();
    (grid, solution)
}

#[rstest]
#[case(1, 0, 1.0)]
#[case(2, 0, 1.0)]
#[case(2, 1, 1.0)]
#[case(3, 0, 1.0)]
#[case(3, 1, 1.0)]
#[case(3, 2, 1.0)]
#[case(4, 3, 1.0)]
#[case(1, 0, 2.0)]
#[case(2, 1, 3.0)]
fn test_hydrogenic_levels(#[case] n: u32, #[case] l: u32, #[case] zeta: f64) {
    let (grid, solution) = solve_default(n, l, zeta);
    let exact = hydrogenic_energy(n, zeta);

    // Same relative accuracy for every charge since the mesh scales with zeta
    assert_relative_eq!(solution.energy / (zeta * zeta), exact / (zeta * zeta), epsilon = 1e-4);

    // Unit norm under sum y² r² dx
    let dx = grid.dx();
    let norm: f64 = solution
        .wavefunction
        .iter()
        .zip(grid.r2())
        .map(|(y, r2)| y * y * r2 * dx)
        .sum();
    assert_relative_eq!(norm, 1.0, epsilon = 1e-8);

    // Node count on the outward branch
    let icl = solution.turning_point;
    assert!(icl > 0 && icl < grid.mesh() - 2);
    assert_eq!(count_nodes(&solution.wavefunction[..=icl]), (n - l - 1) as usize);
    assert_eq!(solution.count_nodes(), solution.nodes);
}

#[test]
fn test_ground_state_default_mesh() {
    let (grid, solution) = solve_default(1, 0, 1.0);
    assert_eq!(grid.mesh(), 1260);
    assert_relative_eq!(solution.energy, -1.0, epsilon = 1e-4);
}

#[test]
fn test_degenerate_n2_levels() {
    let (_, s) = solve_default(2, 0, 1.0);
    let (_, p) = solve_default(2, 1, 1.0);
    assert_relative_eq!(s.energy, -0.25, epsilon = 1e-4);
    assert_relative_eq!(p.energy, -0.25, epsilon = 1e-4);
    assert_relative_eq!(s.energy, p.energy, epsilon = 2e-4);
}

#[test]
fn test_converges_with_grid_refinement() {
    let errors: Vec<f64> = [0.04, 0.02, 0.01]
        .iter()
        .map(|&dx| {
            let params = MeshParameters::new(-8.0, dx, 100.0, 1.0);
            let (grid, v) = coulomb_setup(params, 1.0);
            let state = QuantumState::new(1, 0, 1.0).unwrap();
            let solution = solve_eigenstate(&state, &grid, &v, &SolverConfig::default()).unwrap();
            (solution.energy - hydrogenic_energy(1, 1.0)).abs()
        })
        .collect();

    assert!(errors[0] > errors[1], "errors: {:?}", errors);
    assert!(errors[1] > errors[2], "errors: {:?}", errors);
    assert!(errors[2] < 1e-4);
}

#[test]
fn test_solve_is_deterministic() {
    let (grid, v) = coulomb_setup(MeshParameters::for_charge(1.0), 1.0);
    let state = QuantumState::new(3, 1, 1.0).unwrap();
    let config = SolverConfig::default();

    let first = solve_eigenstate(&state, &grid, &v, &config).unwrap();
    let second = solve_eigenstate(&state, &grid, &v, &config).unwrap();

    assert_eq!(first.energy.to_bits(), second.energy.to_bits());
    assert_eq!(first, second);
}

#[test]
fn test_no_radial_nodes_converges_faster() {
    for n in [2, 3] {
        let (_, highest_l) = solve_default(n, n - 1, 1.0);
        let (_, s_state) = solve_default(n, 0, 1.0);
        assert!(
            highest_l.iterations <= s_state.iterations,
            "n = {}: l = n-1 took {} iterations, l = 0 took {}",
            n,
            highest_l.iterations,
            s_state.iterations
        );
    }
}

#[test]
fn test_nonpositive_charge_rejected() {
    for zeta in [0.0, -1.0] {
        assert!(matches!(
            QuantumState::new(1, 0, zeta),
            Err(SolverError::InvalidParameter(_))
        ));

        let state = QuantumState { n: 1, l: 0, zeta };
        assert!(matches!(
            RadialSolver::<f64>::new().solve(&state),
            Err(SolverError::InvalidParameter(_))
        ));
    }
}

#[test]
fn test_invalid_quantum_numbers() {
    let (grid, v) = coulomb_setup(MeshParameters::default(), 1.0);
    let state = QuantumState { n: 2, l: 2, zeta: 1.0 };
    assert!(matches!(
        solve_eigenstate(&state, &grid, &v, &SolverConfig::default()),
        Err(SolverError::InvalidParameter(_))
    ));
}

#[test]
fn test_short_grid_stops_when_bracket_collapses() {
    // On a grid ending at r = 1.5 the confined 1s level lies above the edge of
    // the potential, so the search is squeezed against the top of the bracket
    let params = MeshParameters::new(-8.0, 0.01, 1.5, 1.0);
    let (grid, v) = coulomb_setup(params, 1.0);
    let state = QuantumState::new(1, 0, 1.0).unwrap();

    match solve_eigenstate(&state, &grid, &v, &SolverConfig::default()) {
        Err(SolverError::ConvergenceFailure {
            iterations,
            lower,
            upper,
            ..
        }) => {
            assert!(iterations < SolverConfig::default().max_iterations);
            assert!(upper - lower < 1e-10, "bracket [{}, {}]", lower, upper);
        }
        other => panic!("expected convergence failure, got {:?}", other),
    }
}

#[test]
fn test_turning_point_in_last_points() {
    let (grid, _) = coulomb_setup(MeshParameters::default(), 1.0);
    let mesh = grid.mesh();
    // Well everywhere except a barrier on the outermost two points
    let mut v = vec![-1.0; grid.len()];
    v[mesh - 1] = 1.0;
    v[mesh] = 1.0;

    let state = QuantumState::new(2, 1, 1.0).unwrap();
    let result = solve_eigenstate(&state, &grid, &v, &SolverConfig::default());
    assert!(
        matches!(
            result,
            Err(SolverError::ClassicalTurningPointNotFound { turning_point: Some(icl), .. })
                if icl == mesh - 1
        ),
        "unexpected result: {:?}",
        result
    );
}

#[test]
fn test_single_precision_ground_state() {
    let state = QuantumState::new(1, 0, 1.0f32).unwrap();
    let solution = RadialSolver::<f32>::new().solve(&state).unwrap();

    assert!((solution.energy + 1.0).abs() < 5e-3, "e = {}", solution.energy);
    assert_eq!(solution.r.len(), 1261);
}

#[rstest]
#[case(1, 0)]
#[case(2, 1)]
#[case(3, 0)]
#[case(3, 1)]
#[case(5, 4)]
fn test_single_precision_heavy_ion(#[case] n: u32, #[case] l: u32) {
    let state = QuantumState::new(n, l, 30.0f32).unwrap();
    let solution = RadialSolver::<f32>::new().solve(&state).unwrap();

    let exact = -900.0 / (n * n) as f32;
    assert!(
        ((solution.energy - exact) / exact).abs() < 5e-3,
        "n = {}, l = {}: e = {}, exact = {}",
        n,
        l,
        solution.energy,
        exact
    );
}

#[test]
fn test_batch_matches_sequential() {
    let solver = RadialSolver::<f64>::new();
    let states: Vec<_> = [(1, 0), (2, 0), (2, 1), (3, 2)]
        .iter()
        .map(|&(n, l)| QuantumState::new(n, l, 1.0).unwrap())
        .collect();

    let batch = solver.solve_batch(&states);
    assert_eq!(batch.len(), states.len());

    for (state, result) in states.iter().zip(batch) {
        let parallel = result.unwrap();
        let sequential = solver.solve(state).unwrap();
        assert_eq!(parallel.state, *state);
        assert_eq!(parallel.energy.to_bits(), sequential.energy.to_bits());
    }
}
