use tracing::{info, instrument};

use super::{Board, Players, Position, Token};
use crate::error::SessionError;

/// Dimensions and win length used to build each new board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardSettings {
    pub rows: usize,
    pub columns: usize,
    pub num_to_win: usize,
}

impl Default for BoardSettings {
    fn default() -> Self {
        BoardSettings {
            rows: 6,
            columns: 7,
            num_to_win: 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Won(Token),
    Drawn,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}

/// What a single accepted move did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    pub position: Position,
    pub token: Token,
    pub status: GameStatus,
}

/// One game in progress: a board, the seats, and whose turn it is.
#[derive(Debug, Clone)]
pub struct Session {
    settings: BoardSettings,
    board: Board,
    players: Players,
    status: GameStatus,
    last_move: Option<MoveOutcome>,
}

impl Session {
    pub fn new(settings: BoardSettings, players: Players) -> Result<Self, SessionError> {
        let board = Board::new(settings.rows, settings.columns, settings.num_to_win)?;
        Ok(Session {
            settings,
            board,
            players,
            status: GameStatus::InProgress,
            last_move: None,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn settings(&self) -> BoardSettings {
        self.settings
    }

    pub fn players(&self) -> &Players {
        &self.players
    }

    /// Token of the player to move.
    pub fn current_player(&self) -> Token {
        self.players.current()
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn last_move(&self) -> Option<MoveOutcome> {
        self.last_move
    }

    /// Drop the current player's token into `column`.
    ///
    /// A win is checked before a draw, so a move that both completes a line
    /// and fills the board wins. The turn only passes on while the game is
    /// still in progress. Rejected moves change nothing.
    #[instrument(skip(self), fields(player = %self.players.current()))]
    pub fn play(&mut self, column: usize) -> Result<MoveOutcome, SessionError> {
        if self.is_terminal() {
            return Err(SessionError::GameOver);
        }

        let token = self.players.current();
        let position = self.board.place_token(token, column)?;

        self.status = if self.board.has_winning_line_through(position, token)? {
            info!(%token, %position, "game won");
            GameStatus::Won(token)
        } else if self.board.is_board_full() {
            info!("game drawn");
            GameStatus::Drawn
        } else {
            self.players.advance();
            GameStatus::InProgress
        };

        let outcome = MoveOutcome {
            position,
            token,
            status: self.status,
        };
        self.last_move = Some(outcome);
        Ok(outcome)
    }

    /// Cells of the winning line, once the game has been won.
    pub fn winning_line(&self) -> Option<Vec<Position>> {
        match (self.status, self.last_move) {
            (GameStatus::Won(_), Some(last)) => self
                .board
                .winning_line(last.position, last.token)
                .ok()
                .flatten(),
            _ => None,
        }
    }

    /// Throw the board away and start over with the first player.
    pub fn restart(&mut self) -> Result<(), SessionError> {
        self.board = Board::new(
            self.settings.rows,
            self.settings.columns,
            self.settings.num_to_win,
        )?;
        self.players.reset();
        self.status = GameStatus::InProgress;
        self.last_move = None;
        info!("new game started");
        Ok(())
    }
}
