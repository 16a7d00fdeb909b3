use serde::{Deserialize, Serialize};
use std::fmt;

use crate::Position;
use crate::color::Color;

/// What a player proposes on their turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Move {
    Play(Position),
    Pass,
}

impl Move {
    pub fn position(&self) -> Option<Position> {
        match self {
            Move::Play(pos) => Some(*pos),
            Move::Pass => None,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Play(pos) => write!(f, "play {pos}"),
            Move::Pass => write!(f, "pass"),
        }
    }
}

/// Represents a single turn in a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub color: Color,
    pub mv: Move,
}

impl Turn {
    pub fn play(color: Color, pos: Position) -> Self {
        Turn {
            color,
            mv: Move::Play(pos),
        }
    }

    pub fn pass(color: Color) -> Self {
        Turn {
            color,
            mv: Move::Pass,
        }
    }

    pub fn is_play(&self) -> bool {
        matches!(self.mv, Move::Play(_))
    }

    pub fn is_pass(&self) -> bool {
        self.mv == Move::Pass
    }
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.color.letter(), self.mv)
    }
}
