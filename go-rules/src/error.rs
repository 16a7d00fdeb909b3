use std::fmt;

use crate::Position;
use crate::color::Color;
use crate::group::GroupId;

/// Why a move or setup request was refused. None of these leave the board changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoError {
    OutOfBounds,
    Occupied,
    Ko,
    Suicide,
    OutOfTurn,
    GameOver,
    MalformedLayout,
}

impl fmt::Display for GoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GoError::OutOfBounds => write!(f, "not on board"),
            GoError::Occupied => write!(f, "point is occupied"),
            GoError::Ko => write!(f, "ko violation"),
            GoError::Suicide => write!(f, "suicide"),
            GoError::OutOfTurn => write!(f, "out of turn"),
            GoError::GameOver => write!(f, "game is over"),
            GoError::MalformedLayout => write!(f, "malformed board layout"),
        }
    }
}

impl std::error::Error for GoError {}

/// A broken internal invariant. Seeing one of these means a bug in the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    ColorMismatch { expected: Color, found: Color },
    IndexMismatch { pos: Position },
    EmptyGroup { id: GroupId },
    OrphanStone { pos: Position },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvariantViolation::ColorMismatch { expected, found } => {
                write!(f, "color mismatch: expected {expected}, found {found}")
            }
            InvariantViolation::IndexMismatch { pos } => {
                write!(f, "group index out of sync at {pos}")
            }
            InvariantViolation::EmptyGroup { id } => write!(f, "active group {id} is empty"),
            InvariantViolation::OrphanStone { pos } => {
                write!(f, "stone at {pos} belongs to no active group")
            }
        }
    }
}

impl std::error::Error for InvariantViolation {}
