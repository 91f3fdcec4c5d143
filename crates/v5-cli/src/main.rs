//! Terminal front end for the V5 dice roller.
//!
//! Reads chat-style commands (`roll 5`, `reroll 1 2`, `rouse`) from stdin
//! and answers the way the chat bot would, in plain text.

mod session;

use std::io::{self, BufRead, Write};
use std::process;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use session::Session;
use v5_dice::{DiceConfig, UserId};

#[derive(Parser)]
#[command(
    name = "v5",
    about = "V5 dice roller: pools with hunger dice, rerolls, and rouse checks",
    version
)]
struct Cli {
    /// RNG seed for reproducible rolls (default: random)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Hunger every user starts with (0-5)
    #[arg(long, default_value = "1")]
    hunger: u8,

    /// User id to act as at startup
    #[arg(short, long, default_value = "1")]
    user: u64,

    /// Largest pool a single roll may ask for
    #[arg(long, default_value = "100")]
    max_dice: usize,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn run(cli: &Cli) -> io::Result<()> {
    let mut config = DiceConfig::default().with_initial_hunger(cli.hunger);
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }

    let mut session = Session::new(&config, UserId(cli.user), cli.max_dice);
    tracing::debug!(?config, user = cli.user, "session started");

    let mut out = io::stdout().lock();
    writeln!(out, "  {} V5 dice roller", "Starting".bold())?;
    writeln!(
        out,
        "  User: {} | Starting hunger: {}",
        cli.user, config.initial_hunger
    )?;
    writeln!(out, "  Type 'help' for commands, 'quit' to exit.\n")?;
    prompt(&mut out)?;

    for line in io::stdin().lock().lines() {
        let line = line?;
        let input = line.trim();
        if input.is_empty() {
            prompt(&mut out)?;
            continue;
        }

        match session.process(input) {
            Ok(reply) if session::is_quit(input) => {
                writeln!(out, "{reply}")?;
                return Ok(());
            }
            Ok(reply) if reply.is_empty() => {}
            Ok(reply) => writeln!(out, "{reply}\n")?,
            Err(e) => writeln!(out, "{}\n", e.to_string().yellow())?,
        }
        prompt(&mut out)?;
    }

    Ok(())
}

fn prompt(out: &mut impl Write) -> io::Result<()> {
    write!(out, "> ")?;
    out.flush()
}
