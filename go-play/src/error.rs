use std::fmt;

use go_rules::InvariantViolation;

#[derive(Debug)]
pub enum PlayError {
    Io(std::io::Error),
    Input(String),
    Script { line: usize, reason: String },
    Json(serde_json::Error),
    /// The board broke one of its own invariants: a bug, never recoverable.
    Invariant(InvariantViolation),
    Cancelled,
}

impl fmt::Display for PlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayError::Io(e) => write!(f, "I/O error: {e}"),
            PlayError::Input(msg) => write!(f, "{msg}"),
            PlayError::Script { line, reason } => write!(f, "script line {line}: {reason}"),
            PlayError::Json(e) => write!(f, "JSON error: {e}"),
            PlayError::Invariant(e) => write!(f, "board invariant violated: {e}"),
            PlayError::Cancelled => write!(f, "game cancelled"),
        }
    }
}

impl std::error::Error for PlayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PlayError::Io(e) => Some(e),
            PlayError::Json(e) => Some(e),
            PlayError::Invariant(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PlayError {
    fn from(e: std::io::Error) -> Self {
        PlayError::Io(e)
    }
}

impl From<serde_json::Error> for PlayError {
    fn from(e: serde_json::Error) -> Self {
        PlayError::Json(e)
    }
}

impl From<InvariantViolation> for PlayError {
    fn from(e: InvariantViolation) -> Self {
        PlayError::Invariant(e)
    }
}
