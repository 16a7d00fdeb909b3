use serde::{Deserialize, Serialize};

use crate::Position;
use crate::color::Color;
use crate::group::GroupId;

/// A stone on the board. `group` points back at the owning group in the board's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Stone {
    pub color: Color,
    pub position: Position,
    pub group: GroupId,
}

impl Stone {
    pub fn new(color: Color, position: Position, group: GroupId) -> Self {
        Stone {
            color,
            position,
            group,
        }
    }
}
