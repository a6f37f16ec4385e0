use crate::board::RenderStyle;
use crate::error::GameError;
use crate::game::{Game, TurnState};
use crate::square::Square;
use anyhow::Result;
use std::io::{self, BufRead, Write};

/// Line-oriented driver around a [`Game`]: reads coordinates and simple
/// commands, prints the board and the engine's answers.
pub struct CliHandler {
    game: Game,
    style: RenderStyle,
}

impl CliHandler {
    pub fn new(style: RenderStyle) -> Self {
        CliHandler {
            game: Game::new(),
            style,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn run(&mut self) -> Result<()> {
        let stdin = io::stdin();
        let mut stdout = io::stdout().lock();
        let mut reader = stdin.lock();
        let mut line = String::new();

        write!(stdout, "{}{}", self.game.board().render(self.style), self.prompt())?;
        stdout.flush()?;

        while reader.read_line(&mut line)? > 0 {
            match self.handle_command(&line) {
                Ok(output) => write!(stdout, "{}", output)?,
                Err(e) => writeln!(stdout, "Error: {}", e)?,
            }
            if self.game.is_ended() {
                break;
            }
            write!(stdout, "{}", self.prompt())?;
            stdout.flush()?;
            line.clear();
        }
        stdout.flush()?;
        Ok(())
    }

    /// Runs one line of input against the game and returns what to print.
    pub fn handle_command(&mut self, command: &str) -> Result<String, GameError> {
        let command = command.trim();
        match command.to_ascii_lowercase().as_str() {
            "" => Ok(String::new()),
            "quit" | "exit" => {
                self.game.quit();
                Ok("Game ended.\n".to_string())
            }
            "board" => Ok(self.game.board().render(self.style)),
            "cancel" => {
                self.game.cancel_selection()?;
                Ok("Selection cleared.\n".to_string())
            }
            _ => {
                let square: Square = command.parse()?;
                if self.game.is_ended() {
                    Err(GameError::GameEnded)
                } else if self.game.selected().is_some() && !self.holds_own_piece(square) {
                    self.handle_destination(square)
                } else {
                    self.handle_selection(square)
                }
            }
        }
    }

    fn holds_own_piece(&self, square: Square) -> bool {
        self.game
            .board()
            .piece_at(square)
            .map_or(false, |piece| piece.color() == self.game.side_to_move())
    }

    fn handle_selection(&mut self, square: Square) -> Result<String, GameError> {
        let side = self.game.side_to_move();
        let moves = self.game.select(square, side)?;
        let listed: Vec<String> = moves.iter().map(|m| m.to_string()).collect();
        Ok(format!("Legal moves from {}: {}\n", square, listed.join(" ")))
    }

    fn handle_destination(&mut self, square: Square) -> Result<String, GameError> {
        let captured_before = self.game.board().captured_pieces().len();
        let board = self.game.apply_move(square)?;
        let mut output = String::new();
        if let Some(taken) = board.captured_pieces()[captured_before..].first() {
            output.push_str(&format!(
                "Captured {} {:?} on {}.\n",
                taken.color(),
                taken.kind(),
                square
            ));
        }
        output.push_str(&board.render(self.style));
        Ok(output)
    }

    fn prompt(&self) -> String {
        match self.game.state() {
            TurnState::AwaitingSelection => format!(
                "{} to move. Select a piece by typing its coordinate (e.g. 'E2'):\n",
                self.game.side_to_move()
            ),
            TurnState::AwaitingDestination { from, .. } => {
                format!("Choose a destination for {} (or 'cancel'):\n", from)
            }
            TurnState::Ended => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Color;
    use crate::error::CoordinateError;

    fn sq(token: &str) -> Square {
        token.parse().unwrap()
    }

    fn plain() -> CliHandler {
        CliHandler::new(RenderStyle { ansi_color: false })
    }

    #[test]
    fn test_select_then_move() {
        let mut cli = plain();
        assert_eq!(cli.handle_command("E2\n").unwrap(), "Legal moves from e2: e3 e4\n");
        let output = cli.handle_command("e4").unwrap();
        let rank_four = "4│█│░│█│░│p│░│█│░│";
        assert!(output.contains(rank_four), "{}", output);
        assert_eq!(cli.game().side_to_move(), Color::Black);
    }

    #[test]
    fn test_bad_tokens_surface_coordinate_errors() {
        let mut cli = plain();
        assert_eq!(
            cli.handle_command("E22"),
            Err(GameError::Coordinate(CoordinateError::Malformed("E22".to_string())))
        );
        assert_eq!(
            cli.handle_command("J1"),
            Err(GameError::Coordinate(CoordinateError::OutOfRange { file: 10, rank: 1 }))
        );
    }

    #[test]
    fn test_capture_is_reported() {
        let mut cli = plain();
        for token in ["e2", "e4", "d7", "d5", "e4"] {
            cli.handle_command(token).unwrap();
        }
        let output = cli.handle_command("d5").unwrap();
        assert!(output.starts_with("Captured Black Pawn on d5.\n"), "{}", output);
        assert!(output.contains("Captured by White: p\n"));
    }

    #[test]
    fn test_own_piece_while_choosing_destination_reselects() {
        let mut cli = plain();
        cli.handle_command("e2").unwrap();
        assert_eq!(cli.handle_command("g1").unwrap(), "Legal moves from g1: h3 f3\n");
        assert_eq!(cli.game().selected(), Some(sq("g1")));

        // a boxed-in piece keeps the knight selected
        assert_eq!(cli.handle_command("a1"), Err(GameError::NoLegalMoves(sq("a1"))));
        assert_eq!(cli.game().selected(), Some(sq("g1")));

        cli.handle_command("f3").unwrap();
        assert_eq!(cli.game().side_to_move(), Color::Black);
    }

    #[test]
    fn test_cancel_and_quit() {
        let mut cli = plain();
        cli.handle_command("b1").unwrap();
        assert_eq!(cli.handle_command("cancel").unwrap(), "Selection cleared.\n");
        assert_eq!(cli.game().state(), &TurnState::AwaitingSelection);
        assert_eq!(cli.handle_command("quit").unwrap(), "Game ended.\n");
        assert!(cli.game().is_ended());
        assert_eq!(cli.handle_command("e2"), Err(GameError::GameEnded));
    }
}
