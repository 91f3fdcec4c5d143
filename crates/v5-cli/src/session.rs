//! Chat-style command handling on top of the dice engine.
//!
//! This is the caller side of the engine: it parses arguments, enforces
//! the pool ceiling and the three-dice reroll limit, converts the
//! one-based die positions players type into engine indices, and renders
//! results as text.

use thiserror::Error;
use v5_dice::engine::MAX_REROLL_DICE;
use v5_dice::{DiceConfig, DiceEngine, DiceError, RerollOutcome, RollResult, UserId};

const HELP: &str = "\
Commands:
  roll <n>          Roll a pool of n dice (hunger dice are drawn first)
  reroll <i> [j k]  Reroll up to three normal dice by position (1 = first)
  rouse             Make a rouse check
  hunger            Show your current hunger
  user <id>         Act as another user
  help              Show this help
  quit              Exit";

/// Errors a command can report back to the player.
#[derive(Debug, Error)]
pub enum CommandError {
    /// A roll asked for no dice or a negative count.
    #[error("You must at least roll a single die.")]
    EmptyPool,

    /// A roll asked for more dice than the ceiling allows.
    #[error("That's too much work! (at most {0} dice)")]
    PoolTooLarge(usize),

    /// A reroll named no dice.
    #[error(
        "You need to tell me which normal dice you want to reroll. You can choose up to \
         three, for example `reroll 1 2 3` to reroll the first three normal dice."
    )]
    NothingToReroll,

    /// A reroll named more dice than allowed.
    #[error("You can at most reroll three dice.")]
    TooManyRerolls,

    /// A die position below 1.
    #[error("die positions start at 1, got {0}")]
    InvalidPosition(i64),

    /// An argument was not a whole number.
    #[error("'{0}' is not a number")]
    NotANumber(String),

    /// A command was missing its argument.
    #[error("usage: {0}")]
    Usage(&'static str),

    /// The first word was not a known command.
    #[error("unknown command: {0} (type 'help')")]
    UnknownCommand(String),

    /// The engine rejected the request.
    #[error("{0}")]
    Dice(#[from] DiceError),
}

/// Result type for command handling.
pub type CommandResult<T> = Result<T, CommandError>;

/// Returns true if the input's command word ends the session.
pub fn is_quit(input: &str) -> bool {
    input
        .split_whitespace()
        .next()
        .is_some_and(|cmd| cmd.eq_ignore_ascii_case("quit") || cmd.eq_ignore_ascii_case("q"))
}

/// An interactive dice session acting on behalf of one user at a time.
pub struct Session {
    engine: DiceEngine,
    user: UserId,
    max_dice: usize,
}

impl Session {
    /// Create a session with a fresh engine.
    pub fn new(config: &DiceConfig, user: UserId, max_dice: usize) -> Self {
        Self {
            engine: DiceEngine::from_config(config),
            user,
            max_dice,
        }
    }

    /// Process a line of user input and return a response.
    pub fn process(&mut self, input: &str) -> CommandResult<String> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(String::new());
        }

        let mut words = trimmed.split_whitespace();
        let cmd = words.next().unwrap_or_default().to_lowercase();
        let args: Vec<&str> = words.collect();

        match cmd.as_str() {
            "roll" => self.do_roll(&args),
            "reroll" => self.do_reroll(&args),
            "rouse" => Ok(self.do_rouse()),
            "hunger" => Ok(self.do_hunger()),
            "user" => self.do_user(&args),
            "help" => Ok(HELP.to_string()),
            "quit" | "q" => Ok("Goodbye!".to_string()),
            _ => Err(CommandError::UnknownCommand(cmd)),
        }
    }

    fn do_roll(&self, args: &[&str]) -> CommandResult<String> {
        let [arg] = args else {
            return Err(CommandError::Usage("roll <number of dice>"));
        };
        let amount = parse_number(arg)?;
        if amount <= 0 {
            return Err(CommandError::EmptyPool);
        }
        let count = usize::try_from(amount)
            .ok()
            .filter(|&n| n <= self.max_dice)
            .ok_or(CommandError::PoolTooLarge(self.max_dice))?;

        let result = self.engine.roll(self.user, count);
        Ok(render_roll(self.user, &result))
    }

    fn do_reroll(&self, args: &[&str]) -> CommandResult<String> {
        if args.is_empty() {
            return Err(CommandError::NothingToReroll);
        }
        if args.len() > MAX_REROLL_DICE {
            return Err(CommandError::TooManyRerolls);
        }

        let indices = args
            .iter()
            .map(|arg| {
                let position = parse_number(arg)?;
                position
                    .checked_sub(1)
                    .and_then(|i| usize::try_from(i).ok())
                    .ok_or(CommandError::InvalidPosition(position))
            })
            .collect::<CommandResult<Vec<usize>>>()?;

        match self.engine.reroll(self.user, &indices)? {
            RerollOutcome::Rerolled(result) => Ok(render_roll(self.user, &result)),
            RerollOutcome::NoPriorRoll => {
                Ok("There are no more rolls left that you can reroll.".to_string())
            }
        }
    }

    fn do_rouse(&self) -> String {
        let outcome = self.engine.rouse_check(self.user);
        let verdict = match (outcome.success, outcome.new_hunger, outcome.frenzy) {
            (true, _, _) => format!("Success, user {}: your hunger does not increase.", self.user),
            (false, _, true) => format!(
                "Failure, user {}: your character falls under the control of the beast and is now frenzying.",
                self.user
            ),
            (false, hunger, false) => format!(
                "Failure, user {}: your hunger is now {}.",
                self.user,
                hunger.unwrap_or_else(|| self.engine.hunger().get_hunger(self.user))
            ),
        };
        format!("Rouse\n  Result: {}\n  {verdict}", outcome.die)
    }

    fn do_hunger(&self) -> String {
        format!(
            "User {} has hunger {}/{}.",
            self.user,
            self.engine.hunger().get_hunger(self.user),
            self.engine.hunger().max_hunger()
        )
    }

    fn do_user(&mut self, args: &[&str]) -> CommandResult<String> {
        let [arg] = args else {
            return Err(CommandError::Usage("user <id>"));
        };
        let id = arg
            .parse::<u64>()
            .map_err(|_| CommandError::NotANumber((*arg).to_string()))?;
        self.user = UserId(id);
        Ok(format!("Now acting as user {id}."))
    }
}

fn parse_number(arg: &str) -> CommandResult<i64> {
    arg.parse()
        .map_err(|_| CommandError::NotANumber(arg.to_string()))
}

fn render_roll(user: UserId, result: &RollResult) -> String {
    let mut out = format!("Roll result for user {user}");
    if !result.normal_dice.is_empty() {
        out.push_str(&format!("\n  Normal dice: {}", join_dice(&result.normal_dice)));
    }
    if !result.hunger_dice.is_empty() {
        out.push_str(&format!("\n  Hunger dice: {}", join_dice(&result.hunger_dice)));
    }
    out
}

fn join_dice(dice: &[u8]) -> String {
    dice.iter()
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(hunger: u8) -> Session {
        let config = DiceConfig::default()
            .with_seed(42)
            .with_initial_hunger(hunger);
        Session::new(&config, UserId(1), 100)
    }

    fn dice_line<'a>(output: &'a str, label: &str) -> Option<Vec<&'a str>> {
        output
            .lines()
            .find_map(|l| l.trim().strip_prefix(label))
            .map(|rest| rest.split_whitespace().collect())
    }

    #[test]
    fn roll_shows_both_groups() {
        let mut s = session(2);
        let out = s.process("roll 5").unwrap();
        assert!(out.starts_with("Roll result for user 1"));
        assert_eq!(dice_line(&out, "Normal dice:").unwrap().len(), 3);
        assert_eq!(dice_line(&out, "Hunger dice:").unwrap().len(), 2);
    }

    #[test]
    fn roll_omits_empty_group() {
        let mut s = session(0);
        let out = s.process("roll 3").unwrap();
        assert!(dice_line(&out, "Hunger dice:").is_none());
    }

    #[test]
    fn roll_rejects_bad_counts() {
        let mut s = session(1);
        assert!(matches!(s.process("roll 0"), Err(CommandError::EmptyPool)));
        assert!(matches!(s.process("roll -4"), Err(CommandError::EmptyPool)));
        assert!(matches!(
            s.process("roll 101"),
            Err(CommandError::PoolTooLarge(100))
        ));
        assert!(matches!(s.process("roll many"), Err(CommandError::NotANumber(_))));
        assert!(matches!(s.process("roll"), Err(CommandError::Usage(_))));
    }

    #[test]
    fn reroll_limits() {
        let mut s = session(1);
        s.process("roll 6").unwrap();
        assert!(matches!(s.process("reroll"), Err(CommandError::NothingToReroll)));
        assert!(matches!(
            s.process("reroll 1 2 3 4"),
            Err(CommandError::TooManyRerolls)
        ));
        assert!(matches!(
            s.process("reroll 0"),
            Err(CommandError::InvalidPosition(0))
        ));
    }

    #[test]
    fn reroll_positions_are_one_based() {
        let mut s = session(1);
        s.process("roll 4").unwrap();
        assert!(s.process("reroll 3").is_ok());
        let err = s.process("reroll 4").unwrap_err();
        assert!(matches!(
            err,
            CommandError::Dice(DiceError::IndexOutOfRange { index: 3, len: 3 })
        ));
        assert_eq!(
            err.to_string(),
            "there is no normal die #4 to reroll (you have 3 normal dice)"
        );
    }

    #[test]
    fn reroll_before_roll() {
        let mut s = session(1);
        assert_eq!(
            s.process("reroll 1").unwrap(),
            "There are no more rolls left that you can reroll."
        );
    }

    #[test]
    fn rouse_reports_die() {
        let mut s = session(1);
        let out = s.process("rouse").unwrap();
        assert!(out.starts_with("Rouse\n  Result: "));
        assert!(out.contains("Success") || out.contains("hunger is now 2"));
    }

    #[test]
    fn rouse_frenzy_message() {
        let mut s = session(5);
        for _ in 0..100 {
            let out = s.process("rouse").unwrap();
            if out.contains("Failure") {
                assert!(out.contains("frenzying"));
                return;
            }
        }
        panic!("no failed rouse check in 100 attempts");
    }

    #[test]
    fn users_are_independent() {
        let mut s = session(1);
        s.process("roll 3").unwrap();
        assert_eq!(s.process("user 2").unwrap(), "Now acting as user 2.");
        assert_eq!(
            s.process("reroll 1").unwrap(),
            "There are no more rolls left that you can reroll."
        );
        assert_eq!(s.process("hunger").unwrap(), "User 2 has hunger 1/5.");
    }

    #[test]
    fn commands_are_case_insensitive() {
        let mut s = session(1);
        assert!(s.process("ROLL 2").is_ok());
        assert!(s.process("Help").unwrap().contains("reroll"));
    }

    #[test]
    fn unknown_command() {
        let mut s = session(1);
        assert!(matches!(
            s.process("dance"),
            Err(CommandError::UnknownCommand(c)) if c == "dance"
        ));
    }

    #[test]
    fn quit_detection() {
        assert!(is_quit("quit"));
        assert!(is_quit("Q"));
        assert!(!is_quit("quiet"));
        assert!(!is_quit("roll 2"));
    }

    #[test]
    fn quit_with_trailing_words() {
        let mut s = session(1);
        assert!(is_quit("quit now"));
        assert!(is_quit("  Q please"));
        assert_eq!(s.process("quit now").unwrap(), "Goodbye!");
    }
}
