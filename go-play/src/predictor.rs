//! Move proposal by beam search over a move-scoring model.
//!
//! A [`MovePredictor`] scores each candidate next move of a position. The
//! search keeps the `width` best move sequences, extends each of them ply by
//! ply up to `depth`, and proposes the first move of the best sequence.

use std::fmt::Debug;

use go_rules::{Color, Game, Move, Position, Turn};
use rand::RngExt;

const PASS_SCORE: f64 = -1.5;
const OWN_EYE_SCORE: f64 = -10.0;

pub trait MovePredictor: Debug {
    /// Score `candidate` as the next move of `game`. Higher is more likely.
    ///
    /// Scores along a sequence are summed, so log-probabilities fit.
    fn score(&mut self, game: &Game, candidate: Move) -> f64;
}

/// Uniform noise over board points. Passing ranks below every point except
/// the player's own single-point eyes, so it passes once only those are left.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomPredictor;

impl MovePredictor for RandomPredictor {
    fn score(&mut self, game: &Game, candidate: Move) -> f64 {
        match candidate {
            Move::Pass => PASS_SCORE,
            Move::Play(pos) if fills_own_eye(game, pos) => OWN_EYE_SCORE,
            Move::Play(_) => -rand::rng().random_range(0.0..1.0),
        }
    }
}

fn fills_own_eye(game: &Game, pos: Position) -> bool {
    let board = game.board();
    let color = game.current_color();
    board
        .grid()
        .neighbors(pos)
        .iter()
        .all(|&n| board.color_at(n) == Some(color))
}

#[derive(Debug, Clone)]
struct Beam {
    game: Game,
    first: Option<Move>,
    score: f64,
}

#[derive(Debug)]
pub struct BeamSearch {
    predictor: Box<dyn MovePredictor + Send>,
    width: usize,
    depth: usize,
}

impl BeamSearch {
    pub fn new(predictor: impl MovePredictor + Send + 'static, width: usize, depth: usize) -> Self {
        BeamSearch {
            predictor: Box::new(predictor),
            width: width.max(1),
            depth: depth.max(1),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Pick the next move for the player to move in `game`.
    ///
    /// Points in `rejected` are never proposed as the first move. Falls back
    /// to passing when no legal point is left.
    pub fn propose(&mut self, game: &Game, rejected: &[Position]) -> Move {
        let mut beams = vec![Beam {
            game: game.clone(),
            first: None,
            score: 0.0,
        }];

        for ply in 0..self.depth {
            let skip: &[Position] = if ply == 0 { rejected } else { &[] };
            let mut next = Vec::new();

            for beam in &beams {
                if !beam.game.stage().is_play() {
                    next.push(beam.clone());
                    continue;
                }

                let mut scored: Vec<(Move, f64)> = candidates(&beam.game, skip)
                    .into_iter()
                    .map(|mv| (mv, self.predictor.score(&beam.game, mv)))
                    .collect();
                scored.sort_by(|a, b| b.1.total_cmp(&a.1));

                for (mv, score) in scored.into_iter().take(self.width) {
                    let mut game = beam.game.clone();
                    let color = game.current_color();
                    if let Err(e) = game.apply(Turn { color, mv }) {
                        tracing::trace!("beam dropped {color} {mv}: {e}");
                        continue;
                    }
                    next.push(Beam {
                        game,
                        first: beam.first.or(Some(mv)),
                        score: beam.score + score,
                    });
                }
            }

            if next.is_empty() {
                break;
            }
            next.sort_by(|a, b| b.score.total_cmp(&a.score));
            next.truncate(self.width);
            beams = next;
        }

        let best = beams.first().and_then(|b| b.first).unwrap_or(Move::Pass);
        tracing::debug!("beam search proposes {best}");
        best
    }
}

/// Legal moves for the player to move: every open point they may play,
/// then passing.
fn candidates(game: &Game, skip: &[Position]) -> Vec<Move> {
    let board = game.board();
    let color: Color = game.current_color();
    let mut moves: Vec<Move> = board
        .grid()
        .positions()
        .filter(|pos| !skip.contains(pos))
        .filter(|&pos| board.get_stone(pos).is_none() && board.is_legal(pos, color))
        .map(Move::Play)
        .collect();
    moves.push(Move::Pass);
    moves
}
