//! Terminal play on top of `go-rules`: configuration, move sources (human,
//! scripted, beam search) and the turn loop.

pub mod config;
pub mod error;
pub mod input;
pub mod predictor;
pub mod session;
pub mod source;

pub use config::{Config, PlayerKind};
pub use error::PlayError;
pub use session::{Outcome, Session};
pub use source::MoveSource;
