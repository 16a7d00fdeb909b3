//! Go rules: stone placement with merging, capture, ko and suicide, and
//! area-style scoring of a finished board.

pub mod board;
pub mod color;
pub mod error;
pub mod game;
pub mod group;
pub mod ko;
pub mod position;
pub mod stone;
pub mod territory;
pub mod turn;

pub use board::{Board, Captures, Grid, Placement};
pub use color::Color;
pub use error::{GoError, InvariantViolation};
pub use game::{Game, Stage};
pub use group::{GroupId, StoneGroup};
pub use ko::Ko;
pub use position::Position;
pub use stone::Stone;
pub use territory::{GameResult, KOMI, PointStatus, Territory, compute_game_result};
pub use turn::{Move, Turn};
