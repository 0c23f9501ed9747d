//! Round-based duel engine.
//!
//! Each owner submits one action per round; once both are in (or a robot is
//! already down) [`BattleEngine::process_round`] resolves them in speed order,
//! checking for a knockout after every single action.

use crate::battle_logger::{BattleLog, LogEntry};
use crate::error::{EngineError, ParseError, ProcessError, StartError, SubmitError};
use crate::sim::skill::{scaled_damage, SkillEffect, SKILL_BOOK};
use crate::sim::{Action, ActionKind, ActionResult, DamageRoll, Robot, RobotStatus};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::fmt;
use std::str::FromStr;
use std::time::SystemTime;

/// Attack damage varies by up to this much either way.
pub const ATTACK_JITTER: i32 = 3;
pub const DEFEND_ENERGY: u32 = 10;
pub const CHARGE_ENERGY: u32 = 25;
/// Energy every surviving robot regains when a round ends without a knockout.
pub const ROUND_REGEN: u32 = 5;

/// Seat of a robot in the duel. `A` is the first robot passed to the engine.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Seat {
    A,
    B,
}

impl Seat {
    pub const BOTH: [Seat; 2] = [Seat::A, Seat::B];

    pub fn opponent(self) -> Seat {
        match self {
            Seat::A => Seat::B,
            Seat::B => Seat::A,
        }
    }

    fn index(self) -> usize {
        match self {
            Seat::A => 0,
            Seat::B => 1,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BattleStatus {
    Waiting,
    InProgress,
    Finished,
}

impl BattleStatus {
    pub fn label(self) -> &'static str {
        match self {
            BattleStatus::Waiting => "waiting",
            BattleStatus::InProgress => "in_progress",
            BattleStatus::Finished => "finished",
        }
    }
}

impl fmt::Display for BattleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which robot acts first when both have the same speed.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Seat A first.
    #[default]
    SeatOrder,
    /// Lexicographically smaller owner id first.
    OwnerId,
    /// A coin from the engine's roller, flipped once per tied round.
    Coin,
}

impl FromStr for TieBreak {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "seat" | "seat_order" | "seat-order" => Ok(TieBreak::SeatOrder),
            "owner" | "owner_id" | "owner-id" => Ok(TieBreak::OwnerId),
            "coin" => Ok(TieBreak::Coin),
            _ => Err(ParseError::new("tie-break", s)),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct EngineOptions {
    pub tie_break: TieBreak,
}

/// A submitted choice, held until the round resolves.
#[derive(Clone, Debug)]
struct ActionIntent {
    seat: Seat,
    action: Action,
    // Accepted for callers that send one; the opponent is always the target.
    target_id: Option<String>,
    submitted_at: SystemTime,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    pub status: BattleStatus,
    pub current_round: u32,
    pub robots: [RobotStatus; 2],
    pub winner: Option<String>,
    /// Owner ids with an action waiting for this round.
    pub pending: Vec<String>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundOutcome {
    /// The round that was just resolved.
    pub round: u32,
    /// Executed actions in resolution order.
    pub results: Vec<ActionResult>,
    pub status: StatusSnapshot,
}

/// Owns both robots for the lifetime of a duel and is the only thing that
/// mutates them once constructed.
pub struct BattleEngine<R: DamageRoll = SmallRng> {
    robots: [Robot; 2],
    current_round: u32,
    status: BattleStatus,
    log: BattleLog,
    winner: Option<Seat>,
    pending: [Option<ActionIntent>; 2],
    roller: R,
    options: EngineOptions,
}

impl BattleEngine<SmallRng> {
    /// Create an engine whose attack rolls come from a `SmallRng` seeded with `seed`.
    pub fn new(robot_a: Robot, robot_b: Robot, seed: u64) -> Result<Self, EngineError> {
        Self::with_options(robot_a, robot_b, seed, EngineOptions::default())
    }

    pub fn with_options(
        robot_a: Robot,
        robot_b: Robot,
        seed: u64,
        options: EngineOptions,
    ) -> Result<Self, EngineError> {
        Self::with_roller(robot_a, robot_b, SmallRng::seed_from_u64(seed), options)
    }
}

impl<R: DamageRoll> BattleEngine<R> {
    pub fn with_roller(
        robot_a: Robot,
        robot_b: Robot,
        roller: R,
        options: EngineOptions,
    ) -> Result<Self, EngineError> {
        if robot_a.owner_id() == robot_b.owner_id() {
            return Err(EngineError::DuplicateOwner(robot_a.owner_id().to_string()));
        }
        Ok(Self {
            robots: [robot_a, robot_b],
            current_round: 1,
            status: BattleStatus::Waiting,
            log: BattleLog::new(),
            winner: None,
            pending: [None, None],
            roller,
            options,
        })
    }

    pub fn start(&mut self) -> Result<(), StartError> {
        if self.status != BattleStatus::Waiting {
            return Err(StartError::AlreadyStarted);
        }
        self.status = BattleStatus::InProgress;
        let round = self.current_round;
        self.log.log_start(round);
        self.log
            .log_matchup(round, self.robots[0].name(), self.robots[1].name());
        Ok(())
    }

    /// Records `owner_id`'s choice for this round, replacing any earlier one.
    ///
    /// Skills are checked against the current energy here, but the energy is
    /// only spent when the round resolves. `target_id` is kept with the intent
    /// and never redirects the action: the opponent is always the target.
    pub fn submit_action(
        &mut self,
        owner_id: &str,
        kind: ActionKind,
        target_id: Option<&str>,
        skill_index: Option<usize>,
    ) -> Result<(), SubmitError> {
        let result = self.validate(owner_id, kind, skill_index);
        match result {
            Ok((seat, action)) => {
                tracing::debug!(owner = owner_id, %action, round = self.current_round, "action accepted");
                self.pending[seat.index()] = Some(ActionIntent {
                    seat,
                    action,
                    target_id: target_id.map(str::to_string),
                    submitted_at: SystemTime::now(),
                });
                Ok(())
            }
            Err(err) => {
                tracing::warn!(owner = owner_id, %kind, error = %err, "action rejected");
                Err(err)
            }
        }
    }

    /// Shorthand for [`submit_action`](Self::submit_action) with a prebuilt action.
    pub fn submit(&mut self, owner_id: &str, action: Action) -> Result<(), SubmitError> {
        self.submit_action(owner_id, action.kind(), None, action.skill_index())
    }

    fn validate(
        &self,
        owner_id: &str,
        kind: ActionKind,
        skill_index: Option<usize>,
    ) -> Result<(Seat, Action), SubmitError> {
        if self.status != BattleStatus::InProgress {
            return Err(SubmitError::NotInProgress);
        }
        let seat = self
            .seat_of(owner_id)
            .ok_or_else(|| SubmitError::UnknownOwner(owner_id.to_string()))?;
        let robot = self.robot(seat);
        if !robot.is_alive() {
            return Err(SubmitError::ActorDead);
        }
        let action = Action::from_parts(kind, skill_index)?;
        if let Action::Skill { index } = action {
            let skill = robot
                .skill(index)
                .ok_or(SubmitError::InvalidSkill(Some(index)))?;
            if !robot.can_afford(skill) {
                return Err(SubmitError::InsufficientEnergy {
                    required: skill.cost,
                    available: robot.energy(),
                });
            }
        }
        Ok((seat, action))
    }

    /// Both owners have submitted, or someone is already down.
    pub fn ready_to_resolve(&self) -> bool {
        self.pending.iter().all(Option::is_some) || self.robots.iter().any(|r| !r.is_alive())
    }

    pub fn process_round(&mut self) -> Result<RoundOutcome, ProcessError> {
        match self.status {
            BattleStatus::Waiting => return Err(ProcessError::NotStarted),
            BattleStatus::Finished => return Err(ProcessError::Finished),
            BattleStatus::InProgress => {}
        }
        if !self.ready_to_resolve() {
            return Err(ProcessError::WaitingOnPlayers);
        }

        let round = self.current_round;
        for robot in &mut self.robots {
            robot.set_defending(false);
        }

        let intents = self.take_ordered_intents();
        let mut results = Vec::with_capacity(intents.len());
        let mut finished = false;
        for intent in &intents {
            if !self.robot(intent.seat).is_alive() {
                tracing::debug!(seat = ?intent.seat, round, "skipping action of defeated robot");
                continue;
            }
            results.push(self.execute(intent));
            if self.check_battle_end() {
                finished = true;
                break;
            }
        }
        // A robot may have entered the round already at 0 hp.
        if !finished {
            finished = self.check_battle_end();
        }

        if !finished {
            for robot in self.robots.iter_mut().filter(|r| r.is_alive()) {
                robot.gain_energy(ROUND_REGEN);
            }
        }
        self.current_round += 1;

        Ok(RoundOutcome {
            round,
            results,
            status: self.status(),
        })
    }

    /// Drains the pending intents, fastest robot first.
    fn take_ordered_intents(&mut self) -> Vec<ActionIntent> {
        let mut intents: Vec<ActionIntent> =
            self.pending.iter_mut().filter_map(Option::take).collect();
        let speed_tied = intents.len() == 2
            && self.robot(Seat::A).speed() == self.robot(Seat::B).speed();
        let first_on_tie = if speed_tied {
            self.tie_winner()
        } else {
            Seat::A
        };
        let robots = &self.robots;
        intents.sort_by_key(|intent| {
            (
                Reverse(robots[intent.seat.index()].speed()),
                intent.seat != first_on_tie,
            )
        });
        for intent in &intents {
            tracing::trace!(
                seat = ?intent.seat,
                action = %intent.action,
                target = ?intent.target_id,
                submitted_at = ?intent.submitted_at,
                "resolving intent"
            );
        }
        intents
    }

    fn tie_winner(&mut self) -> Seat {
        match self.options.tie_break {
            TieBreak::SeatOrder => Seat::A,
            TieBreak::OwnerId => {
                if self.robot(Seat::A).owner_id() <= self.robot(Seat::B).owner_id() {
                    Seat::A
                } else {
                    Seat::B
                }
            }
            TieBreak::Coin => {
                if self.roller.coin() {
                    Seat::A
                } else {
                    Seat::B
                }
            }
        }
    }

    fn execute(&mut self, intent: &ActionIntent) -> ActionResult {
        let round = self.current_round;
        let kind = intent.action.kind();
        let seat = intent.seat;
        let roll = match intent.action {
            Action::Attack => self.roller.roll_inclusive(-ATTACK_JITTER, ATTACK_JITTER),
            _ => 0,
        };
        let (actor, target) = pair_mut(&mut self.robots, seat);
        let log = &mut self.log;

        match intent.action {
            Action::Attack => {
                let raw = i64::from(actor.attack()) + i64::from(roll);
                let raw = u32::try_from(raw.max(0)).unwrap_or(u32::MAX);
                let dealt = target.take_damage(raw);
                let message = log.log_attack(round, actor.name(), target.name(), dealt);
                ActionResult {
                    damage: dealt,
                    ..ActionResult::new(actor.name(), kind, message)
                }
            }
            Action::Defend => {
                actor.set_defending(true);
                actor.gain_energy(DEFEND_ENERGY);
                let message = log.log_defend(round, actor.name());
                ActionResult::new(actor.name(), kind, message)
            }
            Action::Charge => {
                actor.gain_energy(CHARGE_ENERGY);
                let message = log.log_charge(round, actor.name(), CHARGE_ENERGY);
                ActionResult::new(actor.name(), kind, message)
            }
            Action::Skill { index } => {
                let Some(skill) = SKILL_BOOK.get(index) else {
                    let message = log.push(round, format!("{} has no skill {index}", actor.name()));
                    return ActionResult::new(actor.name(), kind, message).failed();
                };
                if !actor.use_energy(skill.cost) {
                    let message = log.log_skill_failed(round, actor.name(), skill.name);
                    return ActionResult::new(actor.name(), kind, message).failed();
                }

                let mut damage = None;
                let mut healed = None;
                let mut energy = None;
                for effect in skill.ordered_effects() {
                    match effect {
                        SkillEffect::Damage { percent } => {
                            damage = Some(target.take_damage(scaled_damage(actor.attack(), percent)));
                        }
                        SkillEffect::Heal { amount } => {
                            healed = Some(actor.heal(amount));
                        }
                        SkillEffect::EnergyGain { amount } => {
                            actor.gain_energy(amount);
                            energy = Some(amount);
                        }
                    }
                }

                let message = match (damage, healed, energy) {
                    (Some(dealt), _, _) => {
                        log.log_skill_damage(round, actor.name(), skill.name, target.name(), dealt)
                    }
                    (None, Some(restored), _) => {
                        log.log_skill_heal(round, actor.name(), skill.name, restored)
                    }
                    (None, None, Some(gained)) => {
                        log.log_skill_energy(round, actor.name(), skill.name, gained)
                    }
                    (None, None, None) => {
                        log.push(round, format!("{} uses {}", actor.name(), skill.name))
                    }
                };
                ActionResult {
                    damage: damage.unwrap_or(0),
                    heal: healed.unwrap_or(0),
                    ..ActionResult::new(actor.name(), kind, message)
                }
            }
        }
    }

    /// Finishes the battle if a robot is down. Seat A is checked first.
    fn check_battle_end(&mut self) -> bool {
        let Some(fallen) = Seat::BOTH
            .into_iter()
            .find(|seat| !self.robot(*seat).is_alive())
        else {
            return false;
        };
        let winner = fallen.opponent();
        self.winner = Some(winner);
        self.status = BattleStatus::Finished;
        let name = self.robots[winner.index()].name().to_string();
        self.log.log_win(self.current_round, &name);
        true
    }

    /// Actions `submit_action` would accept for `seat` right now.
    pub fn legal_actions(&self, seat: Seat) -> Vec<Action> {
        let robot = self.robot(seat);
        if self.status != BattleStatus::InProgress || !robot.is_alive() {
            return Vec::new();
        }
        let mut actions = vec![Action::Attack, Action::Defend, Action::Charge];
        actions.extend(
            robot
                .skills()
                .iter()
                .enumerate()
                .filter(|(_, skill)| robot.can_afford(skill))
                .map(|(index, _)| Action::Skill { index }),
        );
        actions
    }

    pub fn status(&self) -> StatusSnapshot {
        StatusSnapshot {
            status: self.status,
            current_round: self.current_round,
            robots: [self.robots[0].status(), self.robots[1].status()],
            winner: self.winner().map(|robot| robot.name().to_string()),
            pending: Seat::BOTH
                .into_iter()
                .filter(|seat| self.has_pending(*seat))
                .map(|seat| self.robot(seat).owner_id().to_string())
                .collect(),
        }
    }

    pub fn log(&self) -> &[LogEntry] {
        self.log.entries()
    }

    pub fn battle_log(&self) -> &BattleLog {
        &self.log
    }

    pub fn phase(&self) -> BattleStatus {
        self.status
    }

    pub fn is_terminal(&self) -> bool {
        self.status == BattleStatus::Finished
    }

    pub fn current_round(&self) -> u32 {
        self.current_round
    }

    pub fn robot(&self, seat: Seat) -> &Robot {
        &self.robots[seat.index()]
    }

    pub fn seat_of(&self, owner_id: &str) -> Option<Seat> {
        Seat::BOTH
            .into_iter()
            .find(|seat| self.robot(*seat).owner_id() == owner_id)
    }

    pub fn winner(&self) -> Option<&Robot> {
        self.winner.map(|seat| self.robot(seat))
    }

    pub fn winner_seat(&self) -> Option<Seat> {
        self.winner
    }

    pub fn has_pending(&self, seat: Seat) -> bool {
        self.pending[seat.index()].is_some()
    }

    pub fn options(&self) -> EngineOptions {
        self.options
    }
}

fn pair_mut(robots: &mut [Robot; 2], actor: Seat) -> (&mut Robot, &mut Robot) {
    let [a, b] = robots;
    match actor {
        Seat::A => (a, b),
        Seat::B => (b, a),
    }
}
