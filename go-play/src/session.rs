use std::future::Future;

use go_rules::territory::evaluate_territory;
use go_rules::{Captures, Color, Game, GameResult, Territory, Turn};
use serde::Serialize;

use crate::config::{Config, PlayerKind};
use crate::error::PlayError;
use crate::input;
use crate::predictor::{BeamSearch, RandomPredictor};
use crate::source::{HumanInput, MoveSource, ScriptedMoves};

/// How a session ended.
#[derive(Debug, Clone, Serialize)]
pub struct Outcome {
    pub result: GameResult,
    pub summary: String,
    pub winner: Option<Color>,
    pub moves: usize,
    pub captures: Captures,
    /// Stones, territory and dame behind the score.
    pub territory: Territory,
    /// False when the move cap stopped the game before two passes.
    pub finished: bool,
}

/// One game between two move sources.
#[derive(Debug)]
pub struct Session {
    game: Game,
    black: MoveSource,
    white: MoveSource,
    max_moves: usize,
    show_board: bool,
}

impl Session {
    pub fn new(game: Game, black: MoveSource, white: MoveSource) -> Self {
        let size = game.board().size() as usize;
        Session {
            game,
            black,
            white,
            max_moves: size * size * 3,
            show_board: false,
        }
    }

    pub fn with_max_moves(mut self, max_moves: usize) -> Self {
        self.max_moves = max_moves;
        self
    }

    pub fn with_board_display(mut self, show: bool) -> Self {
        self.show_board = show;
        self
    }

    pub async fn from_config(config: &Config) -> Result<Self, PlayError> {
        let script = match &config.script {
            Some(path) => {
                let text = tokio::fs::read_to_string(path).await?;
                input::parse_script(&text, config.size)?
            }
            None => Vec::new(),
        };

        // Both human players share one stdin reader.
        let mut human: Option<HumanInput> = None;
        let mut source = |kind: PlayerKind, color: Color| -> Result<MoveSource, PlayError> {
            Ok(match kind {
                PlayerKind::Human => {
                    let input = match &human {
                        Some(input) => input.clone(),
                        None => human.insert(HumanInput::stdin()?).clone(),
                    };
                    MoveSource::Human(input)
                }
                PlayerKind::Scripted => {
                    MoveSource::Scripted(ScriptedMoves::for_color(&script, color))
                }
                PlayerKind::Random => MoveSource::Learned(BeamSearch::new(
                    RandomPredictor,
                    config.beam_width,
                    config.beam_depth,
                )),
            })
        };
        let black = source(config.black, Color::Black)?;
        let white = source(config.white, Color::White)?;

        let game = Game::with_komi(config.size, config.komi);
        Ok(Session::new(game, black, white)
            .with_max_moves(config.max_moves())
            .with_board_display(config.has_human()))
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Play until both players pass or the move cap is hit. Ctrl-C while
    /// waiting for a move cancels the game.
    pub async fn run(&mut self) -> Result<Outcome, PlayError> {
        self.run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("failed to listen for ctrl-c: {e}");
                std::future::pending::<()>().await;
            }
        })
        .await
    }

    /// Like [`Session::run`], but cancelled when `cancel` completes.
    pub async fn run_until<F: Future>(&mut self, cancel: F) -> Result<Outcome, PlayError> {
        tokio::pin!(cancel);
        tracing::info!(
            "starting {size}x{size} game, komi {komi}",
            size = self.game.board().size(),
            komi = self.game.komi()
        );

        while self.game.stage().is_play() && self.game.moves().len() < self.max_moves {
            let color = self.game.current_color();
            if self.show_board {
                println!("\n{}", self.game.board());
            }

            let mut rejected = Vec::new();
            loop {
                let source = match color {
                    Color::Black => &mut self.black,
                    Color::White => &mut self.white,
                };
                let mv = tokio::select! {
                    mv = source.propose(&self.game, &rejected) => mv?,
                    _ = &mut cancel => {
                        tracing::info!("game cancelled after {} moves", self.game.moves().len());
                        return Err(PlayError::Cancelled);
                    }
                };

                match self.game.apply(Turn { color, mv }) {
                    Ok(stage) => {
                        tracing::debug!("{color} {mv}, now {stage}");
                        break;
                    }
                    Err(e) => {
                        tracing::warn!("{color} {mv} rejected: {e}");
                        if source.is_interactive() {
                            println!("Illegal move: {e}");
                        }
                        if let Some(pos) = mv.position() {
                            rejected.push(pos);
                        }
                    }
                }
            }

            if let Err(e) = self.game.board().check_invariants() {
                tracing::error!("aborting after {} moves: {e}", self.game.moves().len());
                return Err(e.into());
            }
        }

        let outcome = self.outcome();
        tracing::info!("game over after {} moves: {}", outcome.moves, outcome.summary);
        Ok(outcome)
    }

    fn outcome(&self) -> Outcome {
        let finished = !self.game.stage().is_play();
        let result = self.game.result().unwrap_or_else(|| self.game.score_now());
        Outcome {
            result,
            summary: result.to_string(),
            winner: result.winner(),
            moves: self.game.moves().len(),
            captures: self.game.board().captures().clone(),
            territory: evaluate_territory(self.game.board()),
            finished,
        }
    }
}
