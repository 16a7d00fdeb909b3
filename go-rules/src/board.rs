use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::Position;
use crate::color::Color;
use crate::error::{GoError, InvariantViolation};
use crate::group::{GroupId, StoneGroup};
use crate::ko::Ko;
use crate::stone::Stone;

/// Prisoners taken by each color.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Captures {
    pub black: u32,
    pub white: u32,
}

impl Captures {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, color: Color) -> u32 {
        match color {
            Color::Black => self.black,
            Color::White => self.white,
        }
    }

    fn add(&mut self, color: Color, count: u32) {
        match color {
            Color::Black => self.black += count,
            Color::White => self.white += count,
        }
    }
}

/// Outcome of a successful placement.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Placement {
    pub captured: Vec<Position>,
}

/// The square grid of cells, stored row-major. Each stone carries the id of
/// its owning group, which makes the grid the position -> group index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: u8,
    cells: Vec<Option<Stone>>,
}

impl Grid {
    pub fn new(size: u8) -> Self {
        Grid {
            size,
            cells: vec![None; size as usize * size as usize],
        }
    }

    pub fn size(&self) -> u8 {
        self.size
    }

    pub fn is_valid_position(&self, pos: Position) -> bool {
        let size = self.size as i32;
        (0..size).contains(&pos.x) && (0..size).contains(&pos.y)
    }

    pub fn get(&self, pos: Position) -> Option<&Stone> {
        self.idx(pos).and_then(|i| self.cells[i].as_ref())
    }

    /// On-board orthogonal neighbors.
    pub fn neighbors(&self, pos: Position) -> ArrayVec<Position, 4> {
        pos.neighbors()
            .into_iter()
            .filter(|&n| self.is_valid_position(n))
            .collect()
    }

    /// Every point on the grid, row by row.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        let size = self.size as i32;
        (0..size).flat_map(move |y| (0..size).map(move |x| Position::new(x, y)))
    }

    pub fn stones(&self) -> impl Iterator<Item = &Stone> + '_ {
        self.cells.iter().flatten()
    }

    #[inline]
    pub(crate) fn idx(&self, pos: Position) -> Option<usize> {
        if self.is_valid_position(pos) {
            Some(pos.y as usize * self.size as usize + pos.x as usize)
        } else {
            None
        }
    }

    pub(crate) fn set(&mut self, stone: Stone) {
        if let Some(i) = self.idx(stone.position) {
            self.cells[i] = Some(stone);
        }
    }

    pub(crate) fn clear(&mut self, pos: Position) -> Option<Stone> {
        self.idx(pos).and_then(|i| self.cells[i].take())
    }

    fn repoint(&mut self, pos: Position, id: GroupId) {
        if let Some(stone) = self.idx(pos).and_then(|i| self.cells[i].as_mut()) {
            stone.group = id;
        }
    }
}

/// A Go board: the grid, the arena of live groups, the ko guard and the prisoner counts.
///
/// [`Board::place_stone`] / [`Board::try_place`] are the only ways to add stones
/// under the rules. A rejected move leaves the board exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    grid: Grid,
    groups: Vec<Option<StoneGroup>>,
    ko: Option<Ko>,
    captures: Captures,
}

impl Board {
    /// Create an empty `size` x `size` board.
    pub fn new(size: u8) -> Self {
        assert!(size > 0, "board size must be positive");
        Board {
            grid: Grid::new(size),
            groups: Vec::new(),
            ko: None,
            captures: Captures::new(),
        }
    }

    /// Build a board from ASCII rows: 'B' = Black, 'W' = White, anything else = empty.
    ///
    /// Stones are set up directly, so no captures happen. Rows are `y`, characters `x`.
    pub fn from_layout(layout: &[&str]) -> Result<Self, GoError> {
        let size = layout.len();
        if size == 0 || size > u8::MAX as usize {
            return Err(GoError::MalformedLayout);
        }
        if layout.iter().any(|row| row.chars().count() != size) {
            return Err(GoError::MalformedLayout);
        }

        let mut board = Board::new(size as u8);
        for (y, row) in layout.iter().enumerate() {
            for (x, c) in row.chars().enumerate() {
                let color = match c {
                    'B' => Color::Black,
                    'W' => Color::White,
                    _ => continue,
                };
                let pos = Position::new(x as i32, y as i32);
                let id = board.alloc_group(color);
                let mut stone = Stone::new(color, pos, id);
                board.active_mut(id).add_stone(&mut stone);
                board.grid.set(stone);
            }
        }

        // Join the singleton groups into maximal chains.
        let positions: Vec<Position> = board.grid.positions().collect();
        for pos in positions {
            let Some(stone) = board.grid.get(pos).copied() else {
                continue;
            };
            for n in board.grid.neighbors(pos) {
                if let Some(other) = board.grid.get(n).copied() {
                    let here = board.grid.get(pos).map(|s| s.group).unwrap_or(stone.group);
                    if other.color == stone.color && other.group != here {
                        board.absorb(here, other.group);
                    }
                }
            }
        }

        Ok(board)
    }

    // -- Accessors --

    pub fn size(&self) -> u8 {
        self.grid.size()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn ko(&self) -> Option<&Ko> {
        self.ko.as_ref()
    }

    pub fn captures(&self) -> &Captures {
        &self.captures
    }

    pub fn is_valid_position(&self, pos: Position) -> bool {
        self.grid.is_valid_position(pos)
    }

    pub fn get_stone(&self, pos: Position) -> Option<&Stone> {
        self.grid.get(pos)
    }

    pub fn color_at(&self, pos: Position) -> Option<Color> {
        self.grid.get(pos).map(|s| s.color)
    }

    pub fn is_empty(&self) -> bool {
        self.grid.stones().next().is_none()
    }

    /// The active groups.
    pub fn groups(&self) -> impl Iterator<Item = &StoneGroup> + '_ {
        self.groups.iter().flatten()
    }

    pub fn group(&self, id: GroupId) -> Option<&StoneGroup> {
        self.groups.get(id.0 as usize).and_then(Option::as_ref)
    }

    pub fn group_at(&self, pos: Position) -> Option<&StoneGroup> {
        self.grid.get(pos).and_then(|s| self.group(s.group))
    }

    /// Ids of the groups occupying the orthogonal neighbors of `pos`, each listed once.
    pub fn adjacent_groups(&self, pos: Position) -> Vec<GroupId> {
        let mut ids: Vec<GroupId> = Vec::with_capacity(4);
        for n in self.grid.neighbors(pos) {
            if let Some(stone) = self.grid.get(n) {
                if !ids.contains(&stone.group) {
                    ids.push(stone.group);
                }
            }
        }
        ids
    }

    /// Freshly computed liberties of the group at `pos`. Empty if `pos` holds no stone.
    pub fn liberties(&self, pos: Position) -> BTreeSet<Position> {
        match self.group_at(pos) {
            Some(group) => {
                let mut group = group.clone();
                group.calculate_liberties(&self.grid);
                group.liberties().clone()
            }
            None => BTreeSet::new(),
        }
    }

    pub fn liberty_count(&self, pos: Position) -> usize {
        self.liberties(pos).len()
    }

    // -- Moves --

    /// Place a stone if the move is legal. Returns whether it was.
    pub fn place_stone(&mut self, pos: Position, color: Color) -> bool {
        self.try_place(pos, color).is_ok()
    }

    /// Place a stone, resolve merges and captures, enforce ko and suicide.
    ///
    /// On error the board is untouched.
    pub fn try_place(&mut self, pos: Position, color: Color) -> Result<Placement, GoError> {
        match self.resolve(pos, color) {
            Ok((next, placement)) => {
                *self = next;
                Ok(placement)
            }
            Err(e) => {
                tracing::debug!("rejected {color} at {pos}: {e}");
                Err(e)
            }
        }
    }

    /// Whether `color` may play at `pos` right now.
    pub fn is_legal(&self, pos: Position, color: Color) -> bool {
        self.resolve(pos, color).is_ok()
    }

    /// Passing gives up the ko guard.
    pub fn pass(&mut self) {
        self.ko = None;
    }

    /// Run the placement pipeline on a working copy and return it on success.
    fn resolve(&self, pos: Position, color: Color) -> Result<(Board, Placement), GoError> {
        if !self.is_valid_position(pos) {
            return Err(GoError::OutOfBounds);
        }
        if self.grid.get(pos).is_some() {
            return Err(GoError::Occupied);
        }

        let mut board = self.clone();

        // Provisional singleton group.
        let id = board.alloc_group(color);
        let mut stone = Stone::new(color, pos, id);
        board.active_mut(id).add_stone(&mut stone);
        board.grid.set(stone);

        for other in board.adjacent_groups(pos) {
            if other != id && board.active(other).color() == color {
                board.absorb(id, other);
            }
        }

        // Opponent groups left without liberties.
        let mut candidates = Vec::new();
        for other in board.adjacent_groups(pos) {
            if other == id {
                continue;
            }
            let Board { grid, groups, .. } = &mut board;
            if let Some(group) = groups[other.0 as usize].as_mut() {
                if group.color() != color && !group.has_liberties(grid) {
                    candidates.push(other);
                }
            }
        }

        // Ko inspects the board before anything is captured.
        if let [only] = candidates.as_slice() {
            let group = board.active(*only);
            if let (1, Some(&taken)) = (group.len(), group.stones().first()) {
                if self.ko.is_some_and(|ko| ko.forbids(taken, group.color())) {
                    return Err(GoError::Ko);
                }
            }
        }

        let mut captured = Vec::new();
        for &cid in &candidates {
            captured.extend(board.remove_group(cid));
        }
        board.captures.add(color, captured.len() as u32);

        let Board { grid, groups, .. } = &mut board;
        let alive = groups[id.0 as usize]
            .as_mut()
            .is_some_and(|group| group.has_liberties(grid));
        if captured.is_empty() && !alive {
            return Err(GoError::Suicide);
        }

        board.ko = if captured.len() == 1 {
            tracing::trace!("ko guard set at {pos} for {color}");
            Some(Ko { pos, color })
        } else {
            None
        };

        if !captured.is_empty() {
            tracing::trace!("{color} at {pos} captured {} stone(s)", captured.len());
        }

        Ok((board, Placement { captured }))
    }

    // -- Invariants --

    /// Verify that the grid and the group arena agree with each other.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        for pos in self.grid.positions() {
            let Some(stone) = self.grid.get(pos) else {
                continue;
            };
            if stone.position != pos {
                return Err(InvariantViolation::IndexMismatch { pos });
            }
            let group = self
                .group(stone.group)
                .ok_or(InvariantViolation::OrphanStone { pos })?;
            if !group.contains(pos) {
                return Err(InvariantViolation::IndexMismatch { pos });
            }
            if group.color() != stone.color {
                return Err(InvariantViolation::ColorMismatch {
                    expected: group.color(),
                    found: stone.color,
                });
            }
        }

        for (slot, group) in self.groups.iter().enumerate() {
            let Some(group) = group else {
                continue;
            };
            if group.is_empty() {
                return Err(InvariantViolation::EmptyGroup { id: group.id() });
            }
            for &pos in group.stones() {
                match self.grid.get(pos) {
                    Some(stone) if stone.group == group.id() && group.id().0 as usize == slot => {}
                    _ => return Err(InvariantViolation::IndexMismatch { pos }),
                }
            }
        }

        Ok(())
    }

    // -- Internal helpers --

    fn alloc_group(&mut self, color: Color) -> GroupId {
        let slot = match self.groups.iter().position(Option::is_none) {
            Some(free) => free,
            None => {
                self.groups.push(None);
                self.groups.len() - 1
            }
        };
        let id = GroupId(slot as u32);
        self.groups[slot] = Some(StoneGroup::new(id, color));
        id
    }

    fn active(&self, id: GroupId) -> &StoneGroup {
        self.group(id)
            .unwrap_or_else(|| panic!("group {id} is not active"))
    }

    fn active_mut(&mut self, id: GroupId) -> &mut StoneGroup {
        self.groups
            .get_mut(id.0 as usize)
            .and_then(Option::as_mut)
            .unwrap_or_else(|| panic!("group {id} is not active"))
    }

    /// Merge `from` into `into`, retire `from` and repoint the moved stones.
    fn absorb(&mut self, into: GroupId, from: GroupId) {
        let mut other = self.groups[from.0 as usize]
            .take()
            .unwrap_or_else(|| panic!("group {from} is not active"));
        let moved = self
            .active_mut(into)
            .merge(&mut other)
            .unwrap_or_else(|e| panic!("merging {from} into {into}: {e}"));
        for pos in moved {
            self.grid.repoint(pos, into);
        }
    }

    /// Take a group off the board, returning the freed points.
    fn remove_group(&mut self, id: GroupId) -> Vec<Position> {
        let Some(group) = self.groups[id.0 as usize].take() else {
            return Vec::new();
        };
        let freed: Vec<Position> = group.stones().iter().copied().collect();
        for &pos in &freed {
            self.grid.clear(pos);
        }
        freed
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let size = self.size() as i32;
        for y in 0..size {
            let row: Vec<String> = (0..size)
                .map(|x| match self.color_at(Position::new(x, y)) {
                    Some(color) => color.glyph().to_string(),
                    None => ".".to_string(),
                })
                .collect();
            writeln!(f, "{}", row.join(" "))?;
        }
        Ok(())
    }
}
