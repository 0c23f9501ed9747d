use crate::engine::{Seat, StatusSnapshot};
use crate::sim::action::Action;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

pub trait BattleAI {
    fn choose_action(&mut self, status: &StatusSnapshot, seat: Seat, valid_actions: &[Action]) -> Action;
}

/// Picks uniformly among the legal actions.
pub struct RandomAI {
    rng: SmallRng,
}

impl RandomAI {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl BattleAI for RandomAI {
    fn choose_action(&mut self, _status: &StatusSnapshot, _seat: Seat, valid_actions: &[Action]) -> Action {
        *valid_actions.choose(&mut self.rng).unwrap_or(&Action::Attack)
    }
}
