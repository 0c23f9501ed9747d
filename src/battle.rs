use robot_duel_core::engine::{BattleEngine, EngineOptions, Seat, TieBreak};
use robot_duel_core::sim::{BattleAI, RandomAI, Robot};

pub const DEFAULT_MAX_ROUNDS: u32 = 500;

#[derive(Debug, Eq, PartialEq)]
pub enum DuelResult {
    AWins,
    BWins,
    Draw,
}

#[derive(Clone, Debug)]
pub struct SimulationOptions {
    /// Rounds to play before calling the duel a draw.
    pub max_rounds: u32,
    pub tie_break: TieBreak,
}

impl Default for SimulationOptions {
    fn default() -> Self {
        Self {
            max_rounds: DEFAULT_MAX_ROUNDS,
            tie_break: TieBreak::default(),
        }
    }
}

/// Plays one duel with a random policy on both seats.
///
/// A mirror match (both robots with the same owner) gets a derived owner id
/// for seat B so the engine can tell the two apart.
pub fn simulate_duel(
    robot_a: Robot,
    robot_b: Robot,
    seed: u64,
    options: &SimulationOptions,
) -> anyhow::Result<DuelResult> {
    let robot_b = if robot_a.owner_id() == robot_b.owner_id() {
        let owner = format!("{}#mirror", robot_b.owner_id());
        Robot::new(robot_b.name(), owner, robot_b.stats())
    } else {
        robot_b
    };
    let mut engine = BattleEngine::with_options(
        robot_a,
        robot_b,
        seed,
        EngineOptions {
            tie_break: options.tie_break,
        },
    )?;
    engine.start()?;

    let mut policies = [
        RandomAI::new(seed.rotate_left(17) ^ 0xA5A5),
        RandomAI::new(seed.rotate_left(31) ^ 0x5A5A),
    ];
    for _round in 0..options.max_rounds {
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
        engine.process_round()?;
    }

    Ok(match engine.winner_seat() {
        Some(Seat::A) => DuelResult::AWins,
        Some(Seat::B) => DuelResult::BWins,
        None => DuelResult::Draw,
    })
}
