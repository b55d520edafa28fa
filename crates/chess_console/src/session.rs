//! Command parsing and execution for one console game.

use std::io::Write;

use anyhow::{Context, Result, bail};
use chess_rules::{Game, MoveResult, Selection, Square, parse_square, square_name};

use crate::config::ConsoleConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Board,
    Turn,
    Select(Square),
    Move(Square, Square),
    History,
    State,
    Reset,
    Help,
    Quit,
}

impl Command {
    /// `Ok(None)` for blank lines.
    pub fn parse(line: &str) -> Result<Option<Command>> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.is_empty() {
            return Ok(None);
        }

        let cmd = match (parts[0].to_lowercase().as_str(), &parts[1..]) {
            ("board", []) => Command::Board,
            ("turn", []) => Command::Turn,
            ("select", [sq]) => Command::Select(parse_square(sq)?),
            ("move", [from, to]) => Command::Move(parse_square(from)?, parse_square(to)?),
            ("history", []) => Command::History,
            ("state", []) => Command::State,
            ("reset" | "new", []) => Command::Reset,
            ("help" | "?", []) => Command::Help,
            ("quit" | "exit", []) => Command::Quit,
            // bare coordinate move, e.g. "e2e4"
            (word, []) if word.len() == 4 && word.is_ascii() => {
                let (from, to) = word.split_at(2);
                Command::Move(parse_square(from)?, parse_square(to)?)
            }
            (word, _) => bail!("unknown command or wrong arguments: {word:?} (try `help`)"),
        };
        Ok(Some(cmd))
    }
}

pub const HELP: &str = "\
Commands:
  board               show the board
  turn                show the side to move
  select <sq>         select a piece and list its destinations
  move <from> <to>    play a move (or just `e2e4`)
  history             list moves played so far
  state               print the game as JSON
  reset               start a new game
  quit                leave";

pub struct Session {
    game: Game,
    config: ConsoleConfig,
}

impl Session {
    pub fn new(config: ConsoleConfig) -> Self {
        Self {
            game: Game::new(),
            config,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Execute one command, writing the reply to `out`. Returns false on quit.
    pub fn execute(&mut self, cmd: Command, out: &mut impl Write) -> Result<bool> {
        match cmd {
            Command::Board => writeln!(out, "{}", self.game.board())?,
            Command::Turn => writeln!(
                out,
                "{} to move (move {})",
                self.game.turn(),
                self.game.move_number()
            )?,
            Command::Select(sq) => self.select(sq, out)?,
            Command::Move(from, to) => self.play(from, to, out)?,
            Command::History => {
                if self.game.move_history().is_empty() {
                    writeln!(out, "no moves yet")?;
                }
                for (i, pair) in self.game.move_history().chunks(2).enumerate() {
                    writeln!(out, "{}. {}", i + 1, pair.join(" "))?;
                }
            }
            Command::State => {
                let json = serde_json::to_string_pretty(&self.game.snapshot())
                    .context("failed to serialize game state")?;
                writeln!(out, "{json}")?;
            }
            Command::Reset => {
                self.game.reset();
                writeln!(out, "new game")?;
            }
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => return Ok(false),
        }
        Ok(true)
    }

    fn select(&mut self, sq: Square, out: &mut impl Write) -> Result<()> {
        let show_hints = self.config.show_hints;
        match self.game.select_piece(sq) {
            Some(Selection::PieceSelected { destinations, .. }) => {
                if !show_hints {
                    writeln!(out, "selected {sq}")?;
                } else if destinations.is_empty() {
                    writeln!(out, "selected {sq}: no moves")?;
                } else {
                    let names: Vec<String> =
                        destinations.iter().map(|&d| square_name(d)).collect();
                    writeln!(out, "selected {sq}: {}", names.join(" "))?;
                }
            }
            _ => writeln!(out, "nothing to select on {sq}")?,
        }
        Ok(())
    }

    fn play(&mut self, from: Square, to: Square, out: &mut impl Write) -> Result<()> {
        let mover = self.game.turn();
        match self.game.apply_move(from, to) {
            MoveResult::Applied {
                notation,
                check,
                checkmate,
            } => {
                if self.config.show_board_after_move {
                    writeln!(out, "{}", self.game.board())?;
                }
                if checkmate {
                    writeln!(out, "{notation} checkmate, {mover} wins")?;
                } else if check {
                    writeln!(out, "{notation} check")?;
                } else {
                    writeln!(out, "{notation}")?;
                }
            }
            MoveResult::Rejected(why) => writeln!(out, "rejected: {why}")?,
        }
        Ok(())
    }
}
