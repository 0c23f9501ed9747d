use rand::Rng;

/// Source of the attack-damage jitter and tie-break coin.
pub trait DamageRoll {
    /// Uniform integer in `low..=high`.
    fn roll_inclusive(&mut self, low: i32, high: i32) -> i32;

    fn coin(&mut self) -> bool {
        self.roll_inclusive(0, 1) == 1
    }
}

impl<R: Rng + ?Sized> DamageRoll for R {
    fn roll_inclusive(&mut self, low: i32, high: i32) -> i32 {
        self.gen_range(low..=high)
    }
}

/// Always rolls the same value, clamped into the requested range.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct FixedRoll(pub i32);

impl DamageRoll for FixedRoll {
    fn roll_inclusive(&mut self, low: i32, high: i32) -> i32 {
        self.0.clamp(low, high)
    }
}
