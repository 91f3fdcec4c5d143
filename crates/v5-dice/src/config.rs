//! Configuration for a dice engine and its hunger tracker.

/// Highest hunger a character can reach.
pub const MAX_HUNGER: u8 = 5;

/// Lowest die value that passes a rouse check.
pub const ROUSE_THRESHOLD: u8 = 6;

/// Configuration for a [`DiceEngine`](crate::DiceEngine).
#[derive(Debug, Clone)]
pub struct DiceConfig {
    /// RNG seed for reproducible rolls. `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Hunger a user starts with the first time they are seen.
    pub initial_hunger: u8,
    /// Hunger ceiling; a failed rouse check at this level is a frenzy.
    pub max_hunger: u8,
    /// A rouse die at or above this value succeeds.
    pub rouse_threshold: u8,
}

impl Default for DiceConfig {
    fn default() -> Self {
        Self {
            seed: None,
            initial_hunger: 1,
            max_hunger: MAX_HUNGER,
            rouse_threshold: ROUSE_THRESHOLD,
        }
    }
}

impl DiceConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the starting hunger (clamped to `0..=max_hunger`).
    pub fn with_initial_hunger(mut self, hunger: u8) -> Self {
        self.initial_hunger = hunger.min(self.max_hunger);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = DiceConfig::default();
        assert_eq!(cfg.seed, None);
        assert_eq!(cfg.initial_hunger, 1);
        assert_eq!(cfg.max_hunger, 5);
        assert_eq!(cfg.rouse_threshold, 6);
    }

    #[test]
    fn builder_methods() {
        let cfg = DiceConfig::default().with_seed(7).with_initial_hunger(3);
        assert_eq!(cfg.seed, Some(7));
        assert_eq!(cfg.initial_hunger, 3);
    }

    #[test]
    fn initial_hunger_clamped() {
        let cfg = DiceConfig::default().with_initial_hunger(9);
        assert_eq!(cfg.initial_hunger, MAX_HUNGER);
        let cfg = DiceConfig::default().with_initial_hunger(0);
        assert_eq!(cfg.initial_hunger, 0);
    }
}
