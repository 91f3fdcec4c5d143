//! Pool rolls, rerolls, and rouse checks.
//!
//! [`DiceEngine`] owns the random source and every user's last roll, and
//! consults a shared [`HungerTracker`] to decide how many dice of a pool
//! are hunger dice.
//!
//! Each operation is atomic for its own state only. `roll` reads hunger
//! and then writes the roll cache under separate locks, so a rouse check
//! landing in between may leave a roll drawn with the previous hunger.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::UserId;
use crate::config::DiceConfig;
use crate::die::{roll_d10, roll_d10_pool};
use crate::error::{DiceError, DiceResult};
use crate::hunger::HungerTracker;
use crate::roll::RollResult;

/// Most normal dice a player may reroll at once.
///
/// Callers enforce this; the engine only checks that indices exist.
pub const MAX_REROLL_DICE: usize = 3;

/// The result of asking to reroll part of a cached roll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RerollOutcome {
    /// The cached roll after the selected normal dice were replaced.
    Rerolled(RollResult),
    /// The user has not rolled yet, so there is nothing to reroll.
    NoPriorRoll,
}

impl RerollOutcome {
    /// The updated roll, if there was one to reroll.
    pub fn into_roll(self) -> Option<RollResult> {
        match self {
            Self::Rerolled(roll) => Some(roll),
            Self::NoPriorRoll => None,
        }
    }
}

/// The result of a rouse check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouseOutcome {
    /// True if the die met the rouse threshold; hunger is then unchanged.
    pub success: bool,
    /// Hunger after a failed check. `None` on success.
    pub new_hunger: Option<u8>,
    /// True if the failure happened at full hunger.
    pub frenzy: bool,
    /// The value rolled.
    pub die: u8,
}

/// Rolls dice for many users and remembers each user's last roll.
pub struct DiceEngine {
    rng: Mutex<StdRng>,
    rolls: Mutex<HashMap<UserId, RollResult>>,
    hunger: Arc<HungerTracker>,
    rouse_threshold: u8,
}

impl DiceEngine {
    /// Create an engine that draws hunger from a shared tracker.
    pub fn new(config: &DiceConfig, hunger: Arc<HungerTracker>) -> Self {
        let rng = config
            .seed
            .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
        Self {
            rng: Mutex::new(rng),
            rolls: Mutex::new(HashMap::new()),
            hunger,
            rouse_threshold: config.rouse_threshold,
        }
    }

    /// Create an engine with its own hunger tracker.
    pub fn from_config(config: &DiceConfig) -> Self {
        Self::new(config, Arc::new(HungerTracker::from_config(config)))
    }

    /// The hunger tracker this engine consults.
    pub fn hunger(&self) -> &HungerTracker {
        &self.hunger
    }

    /// Roll `count` dice for a user and cache the result.
    ///
    /// The first `min(hunger, count)` dice are hunger dice, the rest are
    /// normal dice. Both groups come back sorted ascending. The previous
    /// cached roll for the user is replaced.
    pub fn roll(&self, user: UserId, count: usize) -> RollResult {
        let hunger = usize::from(self.hunger.get_hunger(user));
        let hunger_count = hunger.min(count);
        let normal_count = count.saturating_sub(hunger);

        let result = {
            let mut rng = self.rng();
            RollResult {
                hunger_dice: roll_d10_pool(&mut *rng, hunger_count),
                normal_dice: roll_d10_pool(&mut *rng, normal_count),
            }
        };

        tracing::debug!(%user, count, hunger, roll = %result, "rolled pool");
        self.rolls().insert(user, result.clone());
        result
    }

    /// Reroll selected normal dice of the user's cached roll.
    ///
    /// `indices` are zero-based positions into the cached normal dice as
    /// they currently stand; rerolled dice are not re-sorted, so a second
    /// reroll addresses the same positions. Every index is checked before
    /// any die changes. A repeated index is rerolled once per occurrence.
    /// Hunger dice are never touched.
    pub fn reroll(&self, user: UserId, indices: &[usize]) -> DiceResult<RerollOutcome> {
        let mut rolls = self.rolls();
        let Some(roll) = rolls.get_mut(&user) else {
            tracing::debug!(%user, "reroll without a prior roll");
            return Ok(RerollOutcome::NoPriorRoll);
        };

        let len = roll.normal_dice.len();
        if let Some(&index) = indices.iter().find(|&&i| i >= len) {
            return Err(DiceError::IndexOutOfRange { index, len });
        }

        let mut rng = self.rng();
        for &index in indices {
            roll.normal_dice[index] = roll_d10(&mut *rng);
        }

        tracing::debug!(%user, ?indices, roll = %roll, "rerolled dice");
        Ok(RerollOutcome::Rerolled(roll.clone()))
    }

    /// Roll one die; on a failure, raise the user's hunger.
    pub fn rouse_check(&self, user: UserId) -> RouseOutcome {
        let die = roll_d10(&mut *self.rng());

        if die >= self.rouse_threshold {
            tracing::debug!(%user, die, "rouse check passed");
            return RouseOutcome {
                success: true,
                new_hunger: None,
                frenzy: false,
                die,
            };
        }

        let increment = self.hunger.increment_hunger(user);
        if increment.frenzy {
            tracing::info!(%user, die, "rouse check failed at full hunger, frenzy");
        } else {
            tracing::debug!(%user, die, hunger = increment.hunger, "rouse check failed");
        }

        RouseOutcome {
            success: false,
            new_hunger: Some(increment.hunger),
            frenzy: increment.frenzy,
            die,
        }
    }

    /// The user's cached roll, if any.
    pub fn last_roll(&self, user: UserId) -> Option<RollResult> {
        self.rolls().get(&user).cloned()
    }

    fn rng(&self) -> MutexGuard<'_, StdRng> {
        self.rng.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn rolls(&self) -> MutexGuard<'_, HashMap<UserId, RollResult>> {
        self.rolls.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for DiceEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiceEngine")
            .field("hunger", &self.hunger)
            .field("rouse_threshold", &self.rouse_threshold)
            .finish_non_exhaustive()
    }
}
