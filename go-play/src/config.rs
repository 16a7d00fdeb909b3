use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use go_rules::KOMI;

use crate::error::PlayError;

/// Who picks the moves for one color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PlayerKind {
    /// Read `row,col` or `pass` from stdin.
    Human,
    /// Beam search over random move scores.
    Random,
    /// Take this color's lines from `--script`.
    Scripted,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "go-play", version, about = "Play Go on a small board in the terminal")]
pub struct Config {
    /// Board size
    #[arg(long, env = "GO_BOARD_SIZE", default_value_t = 5,
          value_parser = clap::value_parser!(u8).range(1..=25))]
    pub size: u8,

    /// Compensation added to White's score
    #[arg(long, env = "GO_KOMI", default_value_t = KOMI)]
    pub komi: f64,

    #[arg(long, value_enum, default_value_t = PlayerKind::Human)]
    pub black: PlayerKind,

    #[arg(long, value_enum, default_value_t = PlayerKind::Human)]
    pub white: PlayerKind,

    /// Move script for scripted players: one `<color> <row,col|pass>` per line
    #[arg(long)]
    pub script: Option<PathBuf>,

    /// Sequences kept per search step
    #[arg(long, default_value_t = 4)]
    pub beam_width: usize,

    /// Plies searched ahead
    #[arg(long, default_value_t = 2)]
    pub beam_depth: usize,

    /// Stop after this many turns (default: three per point)
    #[arg(long)]
    pub max_moves: Option<usize>,

    /// Print the final result as JSON
    #[arg(long)]
    pub json: bool,
}

impl Config {
    pub fn max_moves(&self) -> usize {
        self.max_moves
            .unwrap_or(self.size as usize * self.size as usize * 3)
    }

    pub fn has_human(&self) -> bool {
        self.black == PlayerKind::Human || self.white == PlayerKind::Human
    }

    pub fn validate(&self) -> Result<(), PlayError> {
        let scripted = self.black == PlayerKind::Scripted || self.white == PlayerKind::Scripted;
        if scripted && self.script.is_none() {
            return Err(PlayError::Input(
                "a scripted player needs --script <file>".to_string(),
            ));
        }
        if self.beam_width == 0 || self.beam_depth == 0 {
            return Err(PlayError::Input(
                "--beam-width and --beam-depth must be at least 1".to_string(),
            ));
        }
        if !self.komi.is_finite() {
            return Err(PlayError::Input("komi must be a finite number".to_string()));
        }
        Ok(())
    }
}
