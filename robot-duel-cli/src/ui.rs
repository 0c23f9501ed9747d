use anyhow::{bail, Result};
use robot_duel_core::engine::{RoundOutcome, Seat, StatusSnapshot};
use robot_duel_core::sim::{Action, RobotStatus, SKILL_BOOK};
use std::io::{self, Write};

pub fn render(status: &StatusSnapshot, human: Seat) {
    let (you, opp) = match human {
        Seat::A => (&status.robots[0], &status.robots[1]),
        Seat::B => (&status.robots[1], &status.robots[0]),
    };
    println!();
    println!("=== Round {} ===", status.current_round);
    print_robot("Opponent", opp);
    print_robot("You", you);
}

pub fn print_status(status: &StatusSnapshot) {
    println!("--- status: {} (next round {}) ---", status.status, status.current_round);
    for robot in &status.robots {
        print_robot(&robot.owner_id, robot);
    }
}

fn print_robot(label: &str, robot: &RobotStatus) {
    let stance = if robot.is_defending { " [guard]" } else { "" };
    let down = if robot.is_alive { "" } else { " [down]" };
    println!(
        " {:<10} {:<18} HP {} {:>3}/{:<3} EN {} {:>3}/{}{}{}",
        label,
        robot.name,
        bar(robot.hp, robot.max_hp),
        robot.hp,
        robot.max_hp,
        bar(robot.energy, robot.max_energy),
        robot.energy,
        robot.max_energy,
        stance,
        down
    );
}

pub fn print_round(outcome: &RoundOutcome) {
    println!("Round {}:", outcome.round);
    if outcome.results.is_empty() {
        println!("  (no actions)");
    }
    for result in &outcome.results {
        let mark = if result.success { ' ' } else { '!' };
        println!(" {mark} {}", result.message);
    }
}

pub fn print_result(status: &StatusSnapshot, human: Option<Seat>) {
    let you = human.map(|seat| match seat {
        Seat::A => status.robots[0].name.as_str(),
        Seat::B => status.robots[1].name.as_str(),
    });
    let text = match (status.winner.as_deref(), you) {
        (Some(winner), Some(you)) if winner == you => "You win!".to_string(),
        (Some(_), Some(_)) => "You lose...".to_string(),
        (Some(winner), None) => format!("{winner} wins"),
        (None, _) => "No winner".to_string(),
    };
    println!();
    println!("=== Result: {} ===", text);
}

/// Asks until the player types one of `legal`.
pub fn prompt_action(legal: &[Action]) -> Result<Action> {
    loop {
        println!("Choose an action:");
        for action in legal {
            match action {
                Action::Skill { index } => {
                    if let Some(skill) = SKILL_BOOK.get(*index) {
                        println!("  {action:<9} {} ({} energy): {}", skill.name, skill.cost, skill.description);
                    }
                }
                other => println!("  {other}"),
            }
        }
        print!("> ");
        let input = read_line()?;
        match parse_command(&input, legal) {
            Ok(action) => return Ok(action),
            Err(reason) => println!("{reason}"),
        }
    }
}

pub fn parse_command(input: &str, legal: &[Action]) -> std::result::Result<Action, String> {
    let action: Action = input
        .trim()
        .parse()
        .map_err(|err| format!("{err}. Try attack, defend, charge or skill <n>."))?;
    if !legal.contains(&action) {
        return Err(format!("'{action}' is not available right now."));
    }
    Ok(action)
}

fn bar(value: u32, max: u32) -> String {
    let width = 20usize;
    let max = max.max(1) as f32;
    let filled = ((value as f32 / max) * width as f32).round() as usize;
    let filled = filled.min(width);
    let mut bar = String::with_capacity(width + 2);
    bar.push('[');
    for _ in 0..filled {
        bar.push('=');
    }
    for _ in filled..width {
        bar.push('.');
    }
    bar.push(']');
    bar
}

fn read_line() -> Result<String> {
    let mut buf = String::new();
    io::stdout().flush()?;
    if io::stdin().read_line(&mut buf)? == 0 {
        bail!("stdin closed before the battle ended");
    }
    Ok(buf)
}
