pub mod battle;
pub mod matrix;
pub mod model;

use crate::battle::SimulationOptions;
use crate::matrix::{compute_matrix, validate_roster};
use crate::model::RosterFile;
use anyhow::Context;
use robot_duel_core::engine::TieBreak;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct CliOptions {
    pub roster_path: PathBuf,
    pub sims_per_cell: usize,
    pub seed: u64,
    pub output_path: PathBuf,
    pub max_rounds: u32,
    pub tie_break: TieBreak,
}

pub fn load_roster(path: &Path) -> anyhow::Result<RosterFile> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read roster file at {}", path.display()))?;
    let parsed: RosterFile = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse JSON from {}", path.display()))?;
    validate_roster(&parsed)?;
    Ok(parsed)
}

pub fn run(opts: CliOptions) -> anyhow::Result<()> {
    if opts.sims_per_cell == 0 {
        anyhow::bail!("--sims-per-cell must be > 0");
    }
    if opts.max_rounds == 0 {
        anyhow::bail!("--max-rounds must be > 0");
    }
    let roster = load_roster(&opts.roster_path)?;
    let sim_options = SimulationOptions {
        max_rounds: opts.max_rounds,
        tie_break: opts.tie_break,
    };
    tracing::info!(
        robots = roster.robots.len(),
        sims_per_cell = opts.sims_per_cell,
        seed = opts.seed,
        "computing win-rate matrix"
    );
    let matrix = compute_matrix(&roster, opts.sims_per_cell, opts.seed, &sim_options)?;
    matrix::write_csv(&roster.names(), &matrix, &opts.output_path)?;
    println!(
        "Wrote {}x{} matrix to {}",
        matrix.len(),
        matrix.first().map(|r| r.len()).unwrap_or(0),
        opts.output_path.display()
    );
    Ok(())
}
