//! Dice engine for a Vampire: the Masquerade (5th edition) chat dice roller.
//!
//! Rolls pools of d10s split between normal and hunger dice, caches each
//! user's last roll so selected normal dice can be rerolled, and resolves
//! rouse checks against a per-user hunger track that saturates in frenzy.
//!
//! All state lives in memory for the lifetime of the engine. Both
//! [`DiceEngine`] and [`HungerTracker`] are `Sync` and can be shared
//! between concurrent command handlers.

pub mod config;
pub mod die;
pub mod engine;
pub mod error;
pub mod hunger;
pub mod roll;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use config::DiceConfig;
pub use engine::{DiceEngine, RerollOutcome, RouseOutcome};
pub use error::{DiceError, DiceResult};
pub use hunger::{HungerIncrement, HungerTracker};
pub use roll::RollResult;

/// Opaque identifier of a chat user, stable across calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl From<u64> for UserId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
