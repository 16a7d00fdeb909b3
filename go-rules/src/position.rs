use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A grid coordinate. `x` is the column, `y` the row, both 0-indexed.
///
/// Positions are plain values: they may lie off the board, and it is up to
/// the board to decide whether one is valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }

    /// The four orthogonal neighbors, including ones that fall off the board.
    pub fn neighbors(self) -> ArrayVec<Position, 4> {
        let Position { x, y } = self;
        ArrayVec::from([
            Position::new(x - 1, y),
            Position::new(x + 1, y),
            Position::new(x, y - 1),
            Position::new(x, y + 1),
        ])
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Position::new(x, y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}
