use crate::battle::{simulate_duel, DuelResult, SimulationOptions};
use crate::model::RosterFile;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use robot_duel_core::sim::Robot;

/// Win rate of every row robot against every column robot.
///
/// Diagonal cells pit a robot against a copy of itself. A draw counts as
/// half a win.
pub fn compute_matrix(
    roster: &RosterFile,
    sims_per_cell: usize,
    seed: u64,
    options: &SimulationOptions,
) -> anyhow::Result<Vec<Vec<f64>>> {
    let robots: Vec<Robot> = roster
        .robots
        .iter()
        .enumerate()
        .map(|(idx, config)| config.build(&format!("robot-{idx}")))
        .collect::<anyhow::Result<_>>()?;
    let tasks: Vec<(usize, usize)> = (0..robots.len())
        .flat_map(|a| (0..robots.len()).map(move |b| (a, b)))
        .collect();
    let cell_results: Vec<CellResult> = tasks
        .par_iter()
        .map(|(a_idx, b_idx)| -> anyhow::Result<CellResult> {
            let mut cell_rng =
                SmallRng::seed_from_u64(seed ^ ((*a_idx as u64) << 32) ^ (*b_idx as u64));
            let mut a_wins = 0u64;
            let mut draws = 0u64;
            for _ in 0..sims_per_cell {
                let duel_seed = cell_rng.gen();
                match simulate_duel(
                    robots[*a_idx].clone(),
                    robots[*b_idx].clone(),
                    duel_seed,
                    options,
                )? {
                    DuelResult::AWins => a_wins += 1,
                    DuelResult::BWins => {}
                    DuelResult::Draw => draws += 1,
                }
            }
            let total = sims_per_cell as f64;
            let win_rate = (a_wins as f64 + 0.5 * draws as f64) / total;
            Ok(CellResult {
                a_idx: *a_idx,
                b_idx: *b_idx,
                win_rate,
            })
        })
        .collect::<anyhow::Result<_>>()?;

    let mut matrix = vec![vec![0.0; robots.len()]; robots.len()];
    for cell in cell_results {
        matrix[cell.a_idx][cell.b_idx] = cell.win_rate;
    }
    Ok(matrix)
}

/// Writes the matrix with a header row of robot names. Each data row starts
/// with the row robot's name.
pub fn write_csv(names: &[&str], matrix: &[Vec<f64>], path: &std::path::Path) -> anyhow::Result<()> {
    let mut out = String::from("robot");
    for name in names {
        out.push(',');
        out.push_str(name);
    }
    for (row_idx, row) in matrix.iter().enumerate() {
        out.push('\n');
        out.push_str(names.get(row_idx).copied().unwrap_or(""));
        for value in row {
            out.push_str(&format!(",{value:.4}"));
        }
    }
    out.push('\n');
    std::fs::write(path, out)?;
    Ok(())
}

struct CellResult {
    a_idx: usize,
    b_idx: usize,
    win_rate: f64,
}

pub fn validate_roster(roster: &RosterFile) -> anyhow::Result<()> {
    if roster.robots.len() < 2 {
        anyhow::bail!("Expected at least 2 robots in the roster");
    }
    Ok(())
}
