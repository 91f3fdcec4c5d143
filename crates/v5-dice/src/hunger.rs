//! Per-user hunger tracking.
//!
//! Hunger is a clamped track from 0 to the configured maximum. It only
//! ever rises, through failed rouse checks. Once it is full, a further
//! increase is reported as a frenzy and the value stays pinned at the
//! maximum.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};

use crate::UserId;
use crate::config::{DiceConfig, MAX_HUNGER};

/// The result of raising a user's hunger by one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HungerIncrement {
    /// Hunger after the increment.
    pub hunger: u8,
    /// True if hunger was already full and the beast took over.
    pub frenzy: bool,
}

/// Owns the hunger level of every user seen so far.
#[derive(Debug)]
pub struct HungerTracker {
    levels: Mutex<HashMap<UserId, u8>>,
    initial: u8,
    max: u8,
}

impl Default for HungerTracker {
    fn default() -> Self {
        Self::from_config(&DiceConfig::default())
    }
}

impl HungerTracker {
    /// Create a tracker where unseen users start at `initial` hunger.
    ///
    /// `initial` is clamped to `max`.
    pub fn new(initial: u8, max: u8) -> Self {
        Self {
            levels: Mutex::new(HashMap::new()),
            initial: initial.min(max),
            max,
        }
    }

    /// A tracker using the domain maximum of five.
    pub fn with_initial(initial: u8) -> Self {
        Self::new(initial, MAX_HUNGER)
    }

    /// Create a tracker from an engine configuration.
    pub fn from_config(config: &DiceConfig) -> Self {
        Self::new(config.initial_hunger, config.max_hunger)
    }

    /// Current hunger for a user. Unseen users report the initial hunger.
    pub fn get_hunger(&self, user: UserId) -> u8 {
        self.lock().get(&user).copied().unwrap_or(self.initial)
    }

    /// Raise a user's hunger by one, pinning it at the maximum.
    pub fn increment_hunger(&self, user: UserId) -> HungerIncrement {
        let mut levels = self.lock();
        let level = levels.entry(user).or_insert(self.initial);

        let result = if *level >= self.max {
            *level = self.max;
            HungerIncrement {
                hunger: self.max,
                frenzy: true,
            }
        } else {
            *level += 1;
            HungerIncrement {
                hunger: *level,
                frenzy: false,
            }
        };

        tracing::debug!(%user, hunger = result.hunger, frenzy = result.frenzy, "hunger increased");
        result
    }

    /// Number of users with a stored hunger level.
    pub fn tracked_users(&self) -> usize {
        self.lock().len()
    }

    /// The hunger ceiling.
    pub fn max_hunger(&self) -> u8 {
        self.max
    }

    // A panicking holder cannot leave a half-written `u8`, so a poisoned
    // map is still consistent.
    fn lock(&self) -> MutexGuard<'_, HashMap<UserId, u8>> {
        self.levels.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
