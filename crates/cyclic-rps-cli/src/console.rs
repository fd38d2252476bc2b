//! Interactive prompts: move count, move menu, help table, and the reveal.

use crate::error::CliError;
use cyclic_rps_core::games::validate_move_count;
use cyclic_rps_core::{MoveId, RoundReport, Session};
use std::io::{BufRead, Write};
use tracing::debug;

/// Line-oriented console over any reader and writer
pub struct Console<R, W> {
    input: R,
    output: W,
    /// Whether the input is a terminal that echoes the typed line itself
    echo: bool,
}

/// What the user typed at the move prompt
enum MenuChoice {
    Exit,
    Help,
    Move(MoveId),
    Invalid(String),
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            echo: false,
        }
    }

    /// Set whether the input echoes its own newline (an interactive terminal)
    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Read one trimmed line after printing `prompt`; `None` on end of input
    fn prompt(&mut self, prompt: &str) -> Result<Option<String>, CliError> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        // piped input leaves the cursor after the prompt
        if !self.echo {
            writeln!(self.output)?;
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Ask until the user enters an odd count >= 3
    pub fn ask_move_count(&mut self) -> Result<Option<usize>, CliError> {
        loop {
            let Some(line) = self.prompt("Enter an odd number of moves (>= 3): ")? else {
                return Ok(None);
            };
            match line.parse::<usize>() {
                Ok(count) => match validate_move_count(count) {
                    Ok(()) => return Ok(Some(count)),
                    Err(_) => writeln!(
                        self.output,
                        "Error: Please enter an odd number greater than or equal to 3."
                    )?,
                },
                Err(_) => writeln!(self.output, "Invalid input. Please enter a valid integer.")?,
            }
        }
    }

    fn print_menu(&mut self, session: &Session) -> Result<(), CliError> {
        writeln!(self.output, "\nAvailable moves:")?;
        for id in session.moves().ids() {
            writeln!(self.output, "{} - {}", id.choice(), session.moves().name(id)?)?;
        }
        writeln!(self.output, "0 - exit")?;
        writeln!(self.output, "? - help")?;
        Ok(())
    }

    fn read_choice(&mut self, session: &Session) -> Result<Option<MenuChoice>, CliError> {
        let Some(line) = self.prompt("Enter your move: ")? else {
            return Ok(None);
        };
        let choice = match line.as_str() {
            "0" => MenuChoice::Exit,
            "?" => MenuChoice::Help,
            text => {
                let resolved = match text.parse::<usize>() {
                    Ok(number) => session.resolve_choice(number),
                    Err(_) => session.resolve_move(text),
                };
                match resolved {
                    Ok(id) => MenuChoice::Move(id),
                    Err(e) if e.is_recoverable() => MenuChoice::Invalid(e.to_string()),
                    Err(e) => return Err(e.into()),
                }
            }
        };
        Ok(Some(choice))
    }

    /// Publish the commitment, collect the user's move, and reveal.
    ///
    /// Returns `None` when the user exits or input ends before a move is chosen.
    pub fn play(&mut self, session: Session, json: bool) -> Result<Option<RoundReport>, CliError> {
        if json {
            writeln!(self.output, "{}", serde_json::to_string(&session.commit_message())?)?;
        } else {
            writeln!(self.output, "HMAC: {}", session.commitment())?;
        }

        let user_move = loop {
            self.print_menu(&session)?;
            match self.read_choice(&session)? {
                None => return Ok(None),
                Some(MenuChoice::Exit) => {
                    writeln!(self.output, "Exiting game. Goodbye!")?;
                    return Ok(None);
                }
                Some(MenuChoice::Help) => write!(self.output, "{}", session.help_table())?,
                Some(MenuChoice::Invalid(reason)) => {
                    debug!(%reason, "rejected move input");
                    writeln!(self.output, "{reason}. Try again.")?;
                }
                Some(MenuChoice::Move(id)) => break id,
            }
        };

        let report = session.play(user_move)?;
        writeln!(self.output, "Your move: {}", report.user_move)?;
        writeln!(self.output, "Computer move: {}", report.computer_move)?;
        writeln!(self.output, "{}", report.outcome.verdict())?;
        writeln!(self.output, "HMAC key: {}", report.key.to_hex())?;
        if json {
            writeln!(self.output, "{}", serde_json::to_string(&report.reveal_message())?)?;
        }
        Ok(Some(report))
    }
}
