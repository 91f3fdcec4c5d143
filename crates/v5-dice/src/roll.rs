//! The result of one pool roll.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One user's roll, split into normal and hunger dice.
///
/// Both groups are sorted ascending when rolled. Rerolls replace normal
/// dice in place without re-sorting, so positions stay addressable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollResult {
    /// Dice the player may reroll.
    pub normal_dice: Vec<u8>,
    /// Dice drawn for the character's hunger; never rerolled.
    pub hunger_dice: Vec<u8>,
}

impl RollResult {
    /// Number of dice across both groups.
    pub fn total_dice(&self) -> usize {
        self.normal_dice.len() + self.hunger_dice.len()
    }

    /// Returns true if nothing was rolled.
    pub fn is_empty(&self) -> bool {
        self.normal_dice.is_empty() && self.hunger_dice.is_empty()
    }
}

impl fmt::Display for RollResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "normal {:?} hunger {:?}",
            self.normal_dice, self.hunger_dice
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_result() {
        let r = RollResult::default();
        assert!(r.is_empty());
        assert_eq!(r.total_dice(), 0);
    }

    #[test]
    fn total_counts_both_groups() {
        let r = RollResult {
            normal_dice: vec![2, 5, 7],
            hunger_dice: vec![10],
        };
        assert_eq!(r.total_dice(), 4);
        assert!(!r.is_empty());
    }

    #[test]
    fn display() {
        let r = RollResult {
            normal_dice: vec![3, 5],
            hunger_dice: vec![1],
        };
        assert_eq!(r.to_string(), "normal [3, 5] hunger [1]");
    }

    #[test]
    fn serde_field_names() {
        let r = RollResult {
            normal_dice: vec![4],
            hunger_dice: vec![],
        };
        let json = serde_json::to_string(&r).unwrap();
        assert_eq!(json, r#"{"normal_dice":[4],"hunger_dice":[]}"#);
        let back: RollResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, r);
    }
}
