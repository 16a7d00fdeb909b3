use serde::{Deserialize, Serialize};
use std::fmt;

use crate::Position;
use crate::board::Board;
use crate::color::Color;
use crate::error::GoError;
use crate::territory::{self, GameResult, KOMI};
use crate::turn::{Move, Turn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    BlackToPlay,
    WhiteToPlay,
    Finished,
}

impl Stage {
    pub fn is_play(&self) -> bool {
        matches!(self, Stage::BlackToPlay | Stage::WhiteToPlay)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::BlackToPlay => write!(f, "black_to_play"),
            Stage::WhiteToPlay => write!(f, "white_to_play"),
            Stage::Finished => write!(f, "finished"),
        }
    }
}

/// One game: a board, the turns played so far and the compensation for White.
///
/// Black always moves first, so komi is always White's.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    moves: Vec<Turn>,
    komi: f64,
}

impl Game {
    pub fn new(size: u8) -> Self {
        Self::with_komi(size, KOMI)
    }

    pub fn with_komi(size: u8, komi: f64) -> Self {
        Game {
            board: Board::new(size),
            moves: Vec::new(),
            komi,
        }
    }

    /// Replay turns onto an empty board, stopping at the first illegal one.
    pub fn with_moves(size: u8, moves: &[Turn]) -> Result<Self, GoError> {
        let mut game = Game::new(size);
        for &turn in moves {
            game.apply(turn)?;
        }
        Ok(game)
    }

    // -- Accessors --

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn moves(&self) -> &[Turn] {
        &self.moves
    }

    pub fn komi(&self) -> f64 {
        self.komi
    }

    pub fn current_color(&self) -> Color {
        match self.moves.last() {
            None => Color::Black,
            Some(t) => t.color.opp(),
        }
    }

    pub fn stage(&self) -> Stage {
        if matches!(
            self.moves.as_slice(),
            [.., a, b] if a.is_pass() && b.is_pass()
        ) {
            Stage::Finished
        } else {
            match self.current_color() {
                Color::Black => Stage::BlackToPlay,
                Color::White => Stage::WhiteToPlay,
            }
        }
    }

    // -- Game actions --

    /// Play a stone. Captured stones show up in [`Board::captures`].
    pub fn try_play(&mut self, color: Color, pos: Position) -> Result<Stage, GoError> {
        self.check_turn(color)?;
        self.board.try_place(pos, color)?;
        self.moves.push(Turn::play(color, pos));
        Ok(self.stage())
    }

    pub fn try_pass(&mut self, color: Color) -> Result<Stage, GoError> {
        self.check_turn(color)?;
        self.board.pass();
        self.moves.push(Turn::pass(color));
        Ok(self.stage())
    }

    pub fn apply(&mut self, turn: Turn) -> Result<Stage, GoError> {
        match turn.mv {
            Move::Play(pos) => self.try_play(turn.color, pos),
            Move::Pass => self.try_pass(turn.color),
        }
    }

    /// The result once both players have passed.
    pub fn result(&self) -> Option<GameResult> {
        (self.stage() == Stage::Finished).then(|| self.score_now())
    }

    /// Score the board as it stands.
    pub fn score_now(&self) -> GameResult {
        territory::score(&self.board, self.komi)
    }

    fn check_turn(&self, color: Color) -> Result<(), GoError> {
        if self.stage() == Stage::Finished {
            return Err(GoError::GameOver);
        }
        if color != self.current_color() {
            return Err(GoError::OutOfTurn);
        }
        Ok(())
    }
}
