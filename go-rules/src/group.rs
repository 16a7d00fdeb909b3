use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::Position;
use crate::board::Grid;
use crate::color::Color;
use crate::error::InvariantViolation;
use crate::stone::Stone;

/// Handle of a group in the board's arena. Stones refer to their group by id, never by reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GroupId(pub u32);

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A connected set of same-colored stones.
///
/// `liberties` is a cache that is only meaningful right after
/// [`StoneGroup::calculate_liberties`]; the board recomputes it every time it needs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoneGroup {
    id: GroupId,
    color: Color,
    stones: BTreeSet<Position>,
    liberties: BTreeSet<Position>,
}

impl StoneGroup {
    pub fn new(id: GroupId, color: Color) -> Self {
        StoneGroup {
            id,
            color,
            stones: BTreeSet::new(),
            liberties: BTreeSet::new(),
        }
    }

    // -- Accessors --

    pub fn id(&self) -> GroupId {
        self.id
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn stones(&self) -> &BTreeSet<Position> {
        &self.stones
    }

    pub fn liberties(&self) -> &BTreeSet<Position> {
        &self.liberties
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.stones.contains(&pos)
    }

    pub fn len(&self) -> usize {
        self.stones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stones.is_empty()
    }

    // -- Membership --

    /// Take ownership of `stone`, pointing its back-reference at this group.
    pub fn add_stone(&mut self, stone: &mut Stone) {
        debug_assert_eq!(stone.color, self.color);
        stone.group = self.id;
        self.stones.insert(stone.position);
    }

    pub fn remove_stone(&mut self, pos: Position) -> bool {
        self.stones.remove(&pos)
    }

    /// Move every stone of `other` into `self`, leaving `other` empty.
    ///
    /// Returns the transferred positions; the caller must repoint their
    /// back-references before anything else reads the board.
    pub fn merge(&mut self, other: &mut StoneGroup) -> Result<Vec<Position>, InvariantViolation> {
        if self.color != other.color {
            return Err(InvariantViolation::ColorMismatch {
                expected: self.color,
                found: other.color,
            });
        }

        let moved: Vec<Position> = std::mem::take(&mut other.stones).into_iter().collect();
        other.liberties.clear();
        self.stones.extend(moved.iter().copied());
        Ok(moved)
    }

    // -- Liberties --

    /// Recompute the empty on-board points orthogonally adjacent to any member.
    pub fn calculate_liberties(&mut self, grid: &Grid) {
        self.liberties.clear();
        for &pos in &self.stones {
            for n in grid.neighbors(pos) {
                if grid.get(n).is_none() {
                    self.liberties.insert(n);
                }
            }
        }
    }

    pub fn has_liberties(&mut self, grid: &Grid) -> bool {
        self.calculate_liberties(grid);
        !self.liberties.is_empty()
    }
}
