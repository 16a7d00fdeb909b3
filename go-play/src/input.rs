//! Text formats for moves: what a human types at the prompt and what a
//! script file contains.

use go_rules::{Color, Move, Position};

use crate::error::PlayError;

/// Parse a human move: `row,col` counted from 1, or `pass`.
///
/// Row is the display row (`y`), col the display column (`x`).
pub fn parse_move(text: &str, size: u8) -> Result<Move, PlayError> {
    let text = text.trim();
    if text.eq_ignore_ascii_case("pass") {
        return Ok(Move::Pass);
    }

    let invalid = || {
        PlayError::Input(format!(
            "invalid format: enter row,col (e.g. 3,4) or pass, got '{text}'"
        ))
    };
    let (row, col) = text.split_once(',').ok_or_else(invalid)?;
    let row: i32 = row.trim().parse().map_err(|_| invalid())?;
    let col: i32 = col.trim().parse().map_err(|_| invalid())?;

    let range = 1..=size as i32;
    if !range.contains(&row) || !range.contains(&col) {
        return Err(PlayError::Input(format!(
            "both numbers must be between 1 and {size}"
        )));
    }

    Ok(Move::Play(Position::new(col - 1, row - 1)))
}

/// Format a move the way [`parse_move`] reads it.
pub fn format_move(mv: Move) -> String {
    match mv {
        Move::Play(pos) => format!("{},{}", pos.y + 1, pos.x + 1),
        Move::Pass => "pass".to_string(),
    }
}

/// Parse a script: one `<color> <move>` per line, e.g. `B 3,3` or `W pass`.
/// Blank lines and lines starting with `#` are skipped.
pub fn parse_script(text: &str, size: u8) -> Result<Vec<(Color, Move)>, PlayError> {
    let mut moves = Vec::new();
    for (i, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let script_err = |reason: String| PlayError::Script { line: i + 1, reason };

        let (color, mv) = line
            .split_once(char::is_whitespace)
            .ok_or_else(|| script_err("expected '<color> <move>'".to_string()))?;
        let color: Color = color.parse().map_err(script_err)?;
        let mv = parse_move(mv, size).map_err(|e| script_err(e.to_string()))?;
        moves.push((color, mv));
    }
    Ok(moves)
}
