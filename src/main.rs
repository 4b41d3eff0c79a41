//! Text front end for the minimax tic-tac-toe engine.
//!
//! - `ttt-ai play` - play against the strategist, entering moves as `x y`
//! - `ttt-ai selfplay` - watch the strategist play both sides

use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use ttt_ai::{GameStatus, Match, MatchConfig, Token};

/// Depth-bounded minimax tic-tac-toe
#[derive(Parser)]
#[command(name = "ttt-ai")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log every search
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play against the strategist
    Play {
        #[command(flatten)]
        options: MatchOptions,

        /// Take the first move instead of drawing for it
        #[arg(long)]
        human_first: bool,
    },
    /// Let the strategist play itself
    Selfplay {
        #[command(flatten)]
        options: MatchOptions,
    },
}

#[derive(Args)]
struct MatchOptions {
    /// Board size (N×N)
    #[arg(long, default_value_t = 3)]
    size: usize,

    /// Look-ahead depth in plies (defaults to 2·size − 1)
    #[arg(long)]
    depth: Option<usize>,

    /// Seed for tie-breaking
    #[arg(long)]
    seed: Option<u64>,
}

impl MatchOptions {
    fn config(&self, first_player: Option<Token>) -> MatchConfig {
        MatchConfig {
            size: self.size,
            max_look_ahead_depth: self.depth,
            random_seed: self.seed,
            first_player,
            ..MatchConfig::default()
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "ttt_ai=debug" } else { "ttt_ai=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Commands::Play {
            options,
            human_first,
        } => {
            let first = human_first.then_some(Token::X);
            let game = Match::new(options.config(first)).context("invalid match settings")?;
            play(game)
        }
        Commands::Selfplay { options } => {
            let game = Match::new(options.config(None)).context("invalid match settings")?;
            selfplay(game)
        }
    }
}

/// The human always plays X.
fn play(mut game: Match) -> Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        println!("{}", game.board());
        println!("{}", game.status_message());

        match game.status() {
            GameStatus::InProgress { to_move } if to_move.mark() == Token::X => {
                print!("your move (x y): ");
                io::stdout().flush()?;

                let Some(line) = lines.next() else {
                    bail!("input closed before the game finished");
                };
                let line = line.context("failed to read move")?;

                match parse_coordinate(&line) {
                    Some(coordinate) if game.apply_human_move(coordinate) => {}
                    _ => println!("'{}' is not an open cell", line.trim()),
                }
            }
            GameStatus::InProgress { .. } => {
                let Some(reply) = game.play_strategist_move() else {
                    bail!("strategist found no move in an open game");
                };
                println!("strategist plays {reply}");
            }
            GameStatus::Won(_) | GameStatus::Draw => return Ok(()),
        }
    }
}

fn selfplay(mut game: Match) -> Result<()> {
    println!("{0}x{0} board", game.config().size);
    println!("{}", game.status_message());
    while let Some(mv) = game.play_strategist_move() {
        if let Some((player, _)) = game.history().last() {
            println!("{player} plays {mv}");
        }
        println!("{}", game.board());
    }
    println!("{}", game.status_message());
    Ok(())
}

fn parse_coordinate(line: &str) -> Option<(usize, usize)> {
    let mut parts = line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|part| !part.is_empty());
    let x = parts.next()?.parse().ok()?;
    let y = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((x, y))
}
