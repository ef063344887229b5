/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Command Line Interface (CLI) module
//!
//! Solves one hydrogenic state (or every state up to a principal quantum
//! number) and prints the eigenvalues. The potential table and the full
//! solution can be written to files.

mod config;

pub use config::{MeshSettings, RunConfig, SolverSettings};

use crate::potential::TableSink;
use crate::radial::RadialSolver;
use crate::solver::QuantumState;
use crate::utils::{hydrogenic_energy, Real};
use anyhow::Context;
use clap::{Parser, ValueEnum};
use log::warn;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Working precision of the calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Precision {
    /// Single precision
    F32,
    /// Double precision
    F64,
}

/// Bound states of hydrogen-like atoms by Numerov shooting on a logarithmic grid
#[derive(Debug, Parser)]
#[command(name = "hydrogen-radial", version, about)]
pub struct Cli {
    /// Principal quantum number
    #[arg(short = 'n', long, default_value_t = 2)]
    pub n: u32,

    /// Angular momentum quantum number
    #[arg(short = 'l', long, default_value_t = 1)]
    pub l: u32,

    /// Nuclear charge
    #[arg(short = 'z', long, default_value_t = 1.0)]
    pub zeta: f64,

    /// Log-coordinate of the first grid point
    #[arg(long, allow_hyphen_values = true)]
    pub xmin: Option<f64>,

    /// Step of the log-coordinate
    #[arg(long)]
    pub dx: Option<f64>,

    /// Outer radius of the grid in Bohr
    #[arg(long)]
    pub rmax: Option<f64>,

    /// Convergence threshold on the energy correction (Ry)
    #[arg(long)]
    pub tolerance: Option<f64>,

    /// Maximum number of trial energies
    #[arg(long)]
    pub max_iterations: Option<usize>,

    /// JSON file with mesh and solver settings
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Floating-point precision
    #[arg(long, value_enum, default_value_t = Precision::F64)]
    pub precision: Precision,

    /// Write the r / V(r) table to this file
    #[arg(long)]
    pub potential_out: Option<PathBuf>,

    /// Write the solution as JSON to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Solve every (n', l) with n' <= n in parallel instead of a single state
    #[arg(long)]
    pub all_levels: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Settings given on the command line, as a config overlay
    pub fn overrides(&self) -> RunConfig {
        RunConfig {
            mesh: MeshSettings {
                xmin: self.xmin,
                dx: self.dx,
                rmax: self.rmax,
            },
            solver: SolverSettings {
                tolerance: self.tolerance,
                max_iterations: self.max_iterations,
                relative_tolerance: None,
            },
        }
    }

    /// Configuration file (if any) with command-line overrides applied
    pub fn run_config(&self) -> anyhow::Result<RunConfig> {
        let mut config = match &self.config {
            Some(path) => RunConfig::load(path)?,
            None => RunConfig::default(),
        };
        config.merge(&self.overrides());
        Ok(config)
    }
}

/// Run the command-line tool
pub fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = cli.run_config()?;
    match cli.precision {
        Precision::F32 => run_with::<f32>(cli, &config),
        Precision::F64 => run_with::<f64>(cli, &config),
    }
}

fn build_solver<T: Real>(config: &RunConfig) -> anyhow::Result<RadialSolver<T>> {
    let mesh = config.mesh_parameters::<T>();
    let mut solver = RadialSolver::new();
    solver
        .set_mesh(mesh.xmin, mesh.dx, mesh.rmax)?
        .set_config(config.solver_config::<T>())?;
    Ok(solver)
}

fn run_with<T: Real + Serialize>(cli: &Cli, config: &RunConfig) -> anyhow::Result<()> {
    let solver = build_solver::<T>(config)?;
    let zeta = T::real(cli.zeta);

    if cli.all_levels {
        return run_levels(cli, &solver, zeta);
    }

    let state = QuantumState::new(cli.n, cli.l, zeta)?;
    let solution = match &cli.potential_out {
        Some(path) => {
            let mut sink = TableSink::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            solver.solve_with_sink(&state, &mut sink)?
        }
        None => solver.solve(&state)?,
    };

    println!(
        "eigenvalue = {:16.8e}, eig*(n/zeta)^2 = {:16.8e}",
        solution.energy, solution.scaled_energy
    );
    println!(
        "exact      = {:16.8e}, iterations = {}",
        hydrogenic_energy(state.n, cli.zeta),
        solution.iterations
    );

    if let Some(path) = &cli.output {
        write_json(path, &solution)?;
    }

    Ok(())
}

fn run_levels<T: Real + Serialize>(
    cli: &Cli,
    solver: &RadialSolver<T>,
    zeta: T,
) -> anyhow::Result<()> {
    if cli.potential_out.is_some() {
        warn!("--potential-out is ignored with --all-levels");
    }

    let states = (1..=cli.n)
        .flat_map(|n| (0..n).map(move |l| QuantumState::new(n, l, zeta)))
        .collect::<crate::solver::Result<Vec<_>>>()?;

    let mut solutions = Vec::with_capacity(states.len());
    println!("   n   l      eigenvalue          exact   iterations");
    for (state, result) in states.iter().zip(solver.solve_batch(&states)) {
        let solution =
            result.with_context(|| format!("Failed to solve n = {}, l = {}", state.n, state.l))?;
        println!(
            "{:4} {:3} {:16.8e} {:16.8e} {:6}",
            state.n,
            state.l,
            solution.energy,
            hydrogenic_energy(state.n, cli.zeta),
            solution.iterations
        );
        solutions.push(solution);
    }

    if let Some(path) = &cli.output {
        write_json(path, &solutions)?;
    }

    Ok(())
}

fn write_json<S: Serialize + ?Sized>(path: &Path, value: &S) -> anyhow::Result<()> {
    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), value)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
