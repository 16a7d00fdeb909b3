use serde::{Deserialize, Serialize};

use crate::Position;
use crate::color::Color;

/// Ko guard. Records the stone that just captured exactly one stone: it may
/// not be taken back as a lone stone on the very next move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ko {
    pub pos: Position,
    pub color: Color,
}

impl Ko {
    /// Whether capturing the lone stone `color` at `pos` would retake this ko.
    pub fn forbids(&self, pos: Position, color: Color) -> bool {
        self.pos == pos && self.color == color
    }
}
