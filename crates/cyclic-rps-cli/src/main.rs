//! Cyclic Rock-Paper-Scissors Console
//!
//! Plays one round against the computer. The computer's move is committed
//! with an HMAC before the user chooses; the key is revealed afterwards.

mod console;
mod error;

use clap::{Args, Parser, Subcommand};
use console::Console;
use cyclic_rps_core::{verify_reveal, GameError, MoveSet, OutcomeRule, Session};
use error::CliError;
use std::io::{self, IsTerminal, Write};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Provably fair rock-paper-scissors for any odd number of moves
#[derive(Parser)]
#[command(name = "cyclic-rps")]
#[command(version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    play: PlayArgs,
}

#[derive(Subcommand)]
enum Command {
    /// Play one round (default)
    Play(PlayArgs),

    /// Print the outcome table: rows = computer's move, columns = your move
    Table(MoveArgs),

    /// Check a revealed key and move against a published HMAC
    Verify(VerifyArgs),
}

#[derive(Args)]
struct MoveArgs {
    /// Number of moves (odd, 3..=501); ignored when names are given, prompted for when neither is
    #[arg(short, long, env = "RPS_MOVE_COUNT")]
    count: Option<usize>,

    /// Custom move names, in cycle order; plain numbers and "?" are reserved for the menu
    moves: Vec<String>,
}

#[derive(Args)]
struct PlayArgs {
    #[command(flatten)]
    moves: MoveArgs,

    /// Print the commit and reveal messages as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct VerifyArgs {
    /// Revealed key (hex)
    #[arg(long)]
    key: String,

    /// Revealed computer move
    #[arg(long = "move")]
    move_name: String,

    /// Published HMAC (hex)
    #[arg(long)]
    commitment: String,
}

impl MoveArgs {
    /// Build the move set from arguments, or ask on the console
    fn resolve<R: io::BufRead, W: Write>(
        &self,
        console: &mut Console<R, W>,
    ) -> Result<Option<MoveSet>, CliError> {
        if !self.moves.is_empty() {
            return Ok(Some(MoveSet::new(self.moves.iter().cloned())?));
        }
        let count = match self.count {
            Some(count) => count,
            None => match console.ask_move_count()? {
                Some(count) => count,
                None => return Ok(None),
            },
        };
        Ok(Some(MoveSet::standard(count)?))
    }
}

fn play(args: &PlayArgs) -> Result<(), CliError> {
    let mut console =
        Console::new(io::stdin().lock(), io::stdout().lock()).with_echo(io::stdin().is_terminal());
    let Some(moves) = args.moves.resolve(&mut console)? else {
        return Ok(());
    };
    let session = Session::start(moves)?;
    info!(session = %session.id(), "session started");

    if let Some(report) = console.play(session, args.json)? {
        info!(session = %report.session_id, outcome = ?report.outcome, "round finished");
    }
    Ok(())
}

fn table(args: &MoveArgs) -> Result<(), CliError> {
    let mut console =
        Console::new(io::stdin().lock(), io::stdout().lock()).with_echo(io::stdin().is_terminal());
    let Some(moves) = args.resolve(&mut console)? else {
        return Ok(());
    };
    let mut out = console.into_output();
    write!(out, "{}", OutcomeRule::new(moves).pairwise_table())?;
    Ok(())
}

fn verify(args: &VerifyArgs) -> Result<(), CliError> {
    verify_reveal(&args.key, &args.move_name, &args.commitment)?;
    println!("Commitment verified: the computer played {}", args.move_name);
    Ok(())
}

fn main() -> ExitCode {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let cli = Cli::parse();
    let result = match &cli.command {
        Some(Command::Play(args)) => play(args),
        Some(Command::Table(args)) => table(args),
        Some(Command::Verify(args)) => verify(args),
        None => play(&cli.play),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::Game(GameError::EntropyUnavailable(reason))) => {
            error!(%reason, "secure randomness unavailable");
            eprintln!("Fatal: secure randomness is unavailable ({reason}); refusing to play.");
            ExitCode::FAILURE
        }
        Err(CliError::Game(GameError::CommitmentMismatch)) => {
            eprintln!("Verification FAILED: the key and move do not match the HMAC.");
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_default_play_with_names() {
        let cli = Cli::try_parse_from(["cyclic-rps", "--json", "a", "b", "c"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.play.json);
        assert_eq!(cli.play.moves.moves, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_parse_subcommands() {
        let cli = Cli::try_parse_from(["cyclic-rps", "table", "--count", "7"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Table(MoveArgs { count: Some(7), .. }))));

        let cli = Cli::try_parse_from([
            "cyclic-rps",
            "verify",
            "--key",
            "00",
            "--move",
            "rock",
            "--commitment",
            "11",
        ])
        .unwrap();
        match cli.command {
            Some(Command::Verify(args)) => assert_eq!(args.move_name, "rock"),
            _ => panic!("expected verify"),
        }
    }

    #[test]
    fn test_resolve_prefers_names() {
        let args = MoveArgs {
            count: Some(5),
            moves: vec!["fire".into(), "water".into(), "grass".into()],
        };
        let mut console = Console::new(io::Cursor::new(""), Vec::new());
        let moves = args.resolve(&mut console).unwrap().unwrap();
        assert_eq!(moves.names(), &["fire", "water", "grass"]);
    }

    #[test]
    fn test_resolve_rejects_menu_names() {
        let args = MoveArgs {
            count: None,
            moves: vec!["fire".into(), "2".into(), "grass".into()],
        };
        let mut console = Console::new(io::Cursor::new(""), Vec::new());
        assert!(matches!(
            args.resolve(&mut console),
            Err(CliError::Game(GameError::ReservedMoveName(name))) if name == "2"
        ));
    }

    #[test]
    fn test_resolve_prompts_for_count() {
        let args = MoveArgs {
            count: None,
            moves: Vec::new(),
        };
        let mut console = Console::new(io::Cursor::new("2\n5\n"), Vec::new());
        let moves = args.resolve(&mut console).unwrap().unwrap();
        assert_eq!(moves.len(), 5);
    }

    #[test]
    fn test_resolve_rejects_even_count() {
        let args = MoveArgs {
            count: Some(4),
            moves: Vec::new(),
        };
        let mut console = Console::new(io::Cursor::new(""), Vec::new());
        assert!(matches!(
            args.resolve(&mut console),
            Err(CliError::Game(GameError::InvalidMoveCount(4)))
        ));
    }
}
