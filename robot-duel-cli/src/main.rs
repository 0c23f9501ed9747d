mod ui;

use anyhow::{anyhow, Context};
use robot_duel_core::data::presets::sorted_presets;
use robot_duel_core::engine::{BattleEngine, Seat};
use robot_duel_core::sim::{BattleAI, RandomAI, Robot, RobotStats};
use std::env;
use std::fs;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Usage: robot-duel-cli demo [--seed N] [--rounds N] [--log-json out.json]\n       \
robot-duel-cli play [--seed N] [--preset NAME]\n       robot-duel-cli presets";

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()))
        .with_writer(std::io::stderr)
        .init();

    let mut args = env::args().skip(1);
    match args.next().as_deref() {
        Some("demo") => {
            let mut seed = 0u64;
            let mut rounds = 100u32;
            let mut log_path: Option<String> = None;
            while let Some(arg) = args.next() {
                match arg.as_str() {
                    "--seed" => seed = next_number(&mut args, "--seed")?,
                    "--rounds" => rounds = next_number(&mut args, "--rounds")?,
                    "--log-json" => {
                        log_path = Some(
                            args.next()
                                .ok_or_else(|| anyhow!("--log-json requires a path"))?,
                        )
                    }
                    other => return Err(anyhow!("Unknown arg '{}' for demo", other)),
                }
            }
            run_demo(seed, rounds, log_path.as_deref())
        }
        Some("play") => {
            let mut seed = 0u64;
            let mut preset = "default".to_string();
            while let Some(arg) = args.next() {
                match arg.as_str() {
                    "--seed" => seed = next_number(&mut args, "--seed")?,
                    "--preset" => {
                        preset = args
                            .next()
                            .ok_or_else(|| anyhow!("--preset requires a name"))?
                    }
                    other => return Err(anyhow!("Unknown arg '{}' for play", other)),
                }
            }
            run_play(seed, &preset)
        }
        Some("presets") => list_presets(),
        Some("--help" | "-h") | None => {
            println!("{USAGE}");
            Ok(())
        }
        Some(cmd) => Err(anyhow!("Unknown command '{}'\n{}", cmd, USAGE)),
    }
}

fn next_number<T>(args: &mut impl Iterator<Item = String>, flag: &str) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw = args
        .next()
        .ok_or_else(|| anyhow!("{flag} requires a number"))?;
    raw.parse()
        .with_context(|| format!("{flag} expects a number, got '{raw}'"))
}

fn run_demo(seed: u64, max_rounds: u32, log_path: Option<&str>) -> anyhow::Result<()> {
    let a = Robot::new("Steel Warrior", "player1", RobotStats::preset("steel-warrior")?);
    let b = Robot::new("Lightning Raider", "player2", RobotStats::preset("lightning-raider")?);
    let mut engine = BattleEngine::new(a, b, seed)?;
    engine.start()?;
    ui::print_status(&engine.status());

    let mut policies = [RandomAI::new(seed), RandomAI::new(seed.wrapping_add(1))];
    for _ in 0..max_rounds {
        if engine.is_terminal() {
            break;
        }
        for (seat, policy) in Seat::BOTH.into_iter().zip(policies.iter_mut()) {
            let legal = engine.legal_actions(seat);
            if legal.is_empty() {
                continue;
            }
            let action = policy.choose_action(&engine.status(), seat, &legal);
            let owner = engine.robot(seat).owner_id().to_string();
            engine.submit(&owner, action)?;
        }
        let outcome = engine.process_round()?;
        ui::print_round(&outcome);
    }

    let status = engine.status();
    ui::print_status(&status);
    ui::print_result(&status, None);
    println!();
    println!("=== Battle log ===");
    for entry in engine.log() {
        println!("[round {:>3}] {}", entry.round, entry.message);
    }

    if let Some(path) = log_path {
        let json = serde_json::to_string_pretty(&engine.battle_log().to_json())?;
        fs::write(path, json + "\n").with_context(|| format!("failed to write {}", path))?;
        println!("Wrote battle log to {path}");
    }
    Ok(())
}

fn run_play(seed: u64, preset: &str) -> anyhow::Result<()> {
    let you = Robot::new("Your Robot", "you", RobotStats::preset(preset)?);
    let rival = Robot::new("Rival", "rival", RobotStats::preset("default")?);
    let mut engine = BattleEngine::new(you, rival, seed)?;
    engine.start()?;
    let mut rival_ai = RandomAI::new(seed);

    while !engine.is_terminal() {
        let status = engine.status();
        ui::render(&status, Seat::A);

        let legal = engine.legal_actions(Seat::A);
        if !legal.is_empty() {
            let choice = ui::prompt_action(&legal)?;
            engine.submit("you", choice)?;
        }
        let rival_legal = engine.legal_actions(Seat::B);
        if !rival_legal.is_empty() {
            let choice = rival_ai.choose_action(&status, Seat::B, &rival_legal);
            engine.submit("rival", choice)?;
        }

        let outcome = engine.process_round()?;
        ui::print_round(&outcome);
    }

    ui::print_result(&engine.status(), Some(Seat::A));
    Ok(())
}

fn list_presets() -> anyhow::Result<()> {
    for (id, info) in sorted_presets() {
        println!(
            "{:<16} {:<18} HP {:>3} ATK {:>3} DEF {:>3} SPD {:>3}  {}",
            id,
            info.name,
            info.stats.hp,
            info.stats.attack,
            info.stats.defense,
            info.stats.speed,
            info.description
        );
    }
    Ok(())
}
