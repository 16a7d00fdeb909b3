use serde::{Deserialize, Serialize};
use std::fmt;

use crate::Position;
use crate::board::Board;
use crate::color::Color;

/// Compensation granted to White, who moves second.
pub const KOMI: f64 = 6.5;

/// What a single point counts as at the end of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointStatus {
    Stone(Color),
    Territory(Color),
    Dame,
}

/// Classification of every point of a finished board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Territory {
    size: u8,
    status: Vec<PointStatus>,
    pub black_stones: u32,
    pub white_stones: u32,
    pub black_territory: u32,
    pub white_territory: u32,
    pub dame: u32,
}

impl Territory {
    pub fn status_at(&self, pos: Position) -> Option<PointStatus> {
        let size = self.size as i32;
        if (0..size).contains(&pos.x) && (0..size).contains(&pos.y) {
            Some(self.status[(pos.y * size + pos.x) as usize])
        } else {
            None
        }
    }

    /// Flat row-major status array.
    pub fn statuses(&self) -> &[PointStatus] {
        &self.status
    }

    pub fn stones(&self, color: Color) -> u32 {
        match color {
            Color::Black => self.black_stones,
            Color::White => self.white_stones,
        }
    }

    pub fn territory(&self, color: Color) -> u32 {
        match color {
            Color::Black => self.black_territory,
            Color::White => self.white_territory,
        }
    }

    pub fn dame_points(&self) -> Vec<Position> {
        let size = self.size as i32;
        self.status
            .iter()
            .enumerate()
            .filter(|(_, s)| **s == PointStatus::Dame)
            .map(|(i, _)| Position::new(i as i32 % size, i as i32 / size))
            .collect()
    }
}

/// Classify every point of `board`.
///
/// Each maximal empty region is flood-filled. If every stone bordering it has
/// the same color the region is that color's territory; a region touching
/// both colors, or none at all, is dame.
pub fn evaluate_territory(board: &Board) -> Territory {
    let grid = board.grid();
    let size = grid.size();
    let area = size as usize * size as usize;
    let idx = |p: Position| p.y as usize * size as usize + p.x as usize;

    let mut status: Vec<Option<PointStatus>> = vec![None; area];
    let mut visited = vec![false; area];

    for pos in grid.positions() {
        if status[idx(pos)].is_some() {
            continue;
        }
        if let Some(color) = board.color_at(pos) {
            status[idx(pos)] = Some(PointStatus::Stone(color));
            continue;
        }

        // Flood-fill this empty region
        let mut region = Vec::new();
        let mut border_colors: u8 = 0; // bit 0 = Black seen, bit 1 = White seen
        let mut stack = vec![pos];

        while let Some(p) = stack.pop() {
            if visited[idx(p)] {
                continue;
            }
            visited[idx(p)] = true;
            region.push(p);

            for n in grid.neighbors(p) {
                match board.color_at(n) {
                    Some(Color::Black) => border_colors |= 1,
                    Some(Color::White) => border_colors |= 2,
                    None if !visited[idx(n)] => stack.push(n),
                    None => {}
                }
            }
        }

        let owner = match border_colors {
            1 => PointStatus::Territory(Color::Black),
            2 => PointStatus::Territory(Color::White),
            _ => PointStatus::Dame,
        };
        for p in region {
            status[idx(p)] = Some(owner);
        }
    }

    let status: Vec<PointStatus> = status
        .into_iter()
        .map(|s| s.unwrap_or(PointStatus::Dame))
        .collect();

    let mut territory = Territory {
        size,
        status: Vec::new(),
        black_stones: 0,
        white_stones: 0,
        black_territory: 0,
        white_territory: 0,
        dame: 0,
    };
    for s in &status {
        match s {
            PointStatus::Stone(Color::Black) => territory.black_stones += 1,
            PointStatus::Stone(Color::White) => territory.white_stones += 1,
            PointStatus::Territory(Color::Black) => territory.black_territory += 1,
            PointStatus::Territory(Color::White) => territory.white_territory += 1,
            PointStatus::Dame => territory.dame += 1,
        }
    }
    territory.status = status;
    territory
}

/// Final score. `black` and `white` are raw (stones on the board plus
/// territory); `komi` is added to White.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameResult {
    pub black: f64,
    pub white: f64,
    pub komi: f64,
}

impl GameResult {
    pub fn black_total(&self) -> f64 {
        self.black
    }

    pub fn white_total(&self) -> f64 {
        self.white + self.komi
    }

    /// Absolute difference between the compensated scores.
    pub fn margin(&self) -> f64 {
        (self.black_total() - self.white_total()).abs()
    }

    /// The strictly higher compensated score wins; `None` is a tie.
    pub fn winner(&self) -> Option<Color> {
        let diff = self.black_total() - self.white_total();
        if diff > 0.0 {
            Some(Color::Black)
        } else if diff < 0.0 {
            Some(Color::White)
        } else {
            None
        }
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_result(self.black_total(), self.white_total()))
    }
}

/// Score `board` with the given compensation for White.
pub fn score(board: &Board, komi: f64) -> GameResult {
    let territory = evaluate_territory(board);
    GameResult {
        black: (territory.black_stones + territory.black_territory) as f64,
        white: (territory.white_stones + territory.white_territory) as f64,
        komi,
    }
}

/// Score a finished board with the standard [`KOMI`].
pub fn compute_game_result(board: &Board) -> GameResult {
    score(board, KOMI)
}

/// Format the game result string from final scores.
///
/// Returns "B+{diff}", "W+{diff}" with one decimal, or "Draw".
pub fn format_result(black_score: f64, white_score: f64) -> String {
    let diff = black_score - white_score;
    if diff > 0.0 {
        format!("B+{diff:.1}")
    } else if diff < 0.0 {
        format!("W+{:.1}", -diff)
    } else {
        "Draw".to_string()
    }
}
