/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Main executable for hydrogen-radial

use clap::Parser;
use hydrogen_radial::cli::{self, Cli};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging; RUST_LOG takes precedence over --verbose
    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    println!("hydrogen-radial v{}", hydrogen_radial::VERSION);
    println!(
        "n = {}, l = {}, zeta = {}, precision = {:?}",
        cli.n, cli.l, cli.zeta, cli.precision
    );
    println!("-----------------------------------------------------------");

    cli::run(&cli)?;

    Ok(())
}
