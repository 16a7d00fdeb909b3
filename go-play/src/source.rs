use std::collections::VecDeque;
use std::io::Write;
use std::sync::Arc;

use go_rules::{Color, Game, Move, Position};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tokio::sync::{Mutex, mpsc};

use crate::error::PlayError;
use crate::input::{self, parse_move};
use crate::predictor::BeamSearch;

/// Where human input lines come from.
enum LineFeed {
    Reader(Lines<Box<dyn AsyncBufRead + Unpin + Send>>),
    /// Lines read by a dedicated thread. Dropping the receiver never waits on
    /// that thread, so a pending read cannot hold up shutdown.
    Channel(mpsc::Receiver<std::io::Result<String>>),
}

impl LineFeed {
    async fn next_line(&mut self) -> std::io::Result<Option<String>> {
        match self {
            LineFeed::Reader(lines) => lines.next_line().await,
            LineFeed::Channel(rx) => rx.recv().await.transpose(),
        }
    }
}

/// Where a player's moves come from. The session asks every kind the same
/// way and submits whatever comes back.
#[derive(Debug)]
pub enum MoveSource {
    Human(HumanInput),
    Scripted(ScriptedMoves),
    Learned(BeamSearch),
}

impl MoveSource {
    /// Propose the next move for the player to move in `game`. `rejected`
    /// holds the points already refused this turn.
    pub async fn propose(&mut self, game: &Game, rejected: &[Position]) -> Result<Move, PlayError> {
        match self {
            MoveSource::Human(human) => {
                human
                    .read_move(game.current_color(), game.board().size())
                    .await
            }
            MoveSource::Scripted(script) => Ok(script.next_move()),
            MoveSource::Learned(search) => Ok(search.propose(game, rejected)),
        }
    }

    /// Whether a person at the terminal is choosing the moves.
    pub fn is_interactive(&self) -> bool {
        matches!(self, MoveSource::Human(_))
    }
}

/// Line-oriented human input. Clones share the reader, so two players at one
/// terminal never lose each other's buffered lines.
#[derive(Clone)]
pub struct HumanInput {
    lines: Arc<Mutex<LineFeed>>,
}

impl std::fmt::Debug for HumanInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HumanInput").finish_non_exhaustive()
    }
}

impl HumanInput {
    pub fn new(reader: impl AsyncBufRead + Unpin + Send + 'static) -> Self {
        let reader: Box<dyn AsyncBufRead + Unpin + Send> = Box::new(reader);
        Self::from_feed(LineFeed::Reader(reader.lines()))
    }

    /// Read the process's stdin on its own thread.
    pub fn stdin() -> std::io::Result<Self> {
        let (tx, rx) = mpsc::channel(1);
        std::thread::Builder::new()
            .name("stdin-reader".to_string())
            .spawn(move || {
                for line in std::io::stdin().lines() {
                    if tx.blocking_send(line).is_err() {
                        break;
                    }
                }
            })?;
        Ok(Self::from_feed(LineFeed::Channel(rx)))
    }

    /// Lines handed over through a channel, as [`HumanInput::stdin`] does.
    pub fn from_channel(rx: mpsc::Receiver<std::io::Result<String>>) -> Self {
        Self::from_feed(LineFeed::Channel(rx))
    }

    fn from_feed(feed: LineFeed) -> Self {
        HumanInput {
            lines: Arc::new(Mutex::new(feed)),
        }
    }

    /// Prompt until a line parses as a move. End of input cancels the game.
    pub async fn read_move(&self, color: Color, size: u8) -> Result<Move, PlayError> {
        let mut lines = self.lines.lock().await;
        loop {
            print!("{color}'s move (row,col or pass): ");
            std::io::stdout().flush()?;

            let Some(line) = lines.next_line().await? else {
                println!();
                return Err(PlayError::Cancelled);
            };
            match parse_move(&line, size) {
                Ok(mv) => return Ok(mv),
                Err(e) => println!("{e}"),
            }
        }
    }
}

/// Moves read from a script file, replayed in order. Passes once exhausted.
#[derive(Debug, Clone, Default)]
pub struct ScriptedMoves {
    moves: VecDeque<Move>,
}

impl ScriptedMoves {
    pub fn new(moves: impl IntoIterator<Item = Move>) -> Self {
        ScriptedMoves {
            moves: moves.into_iter().collect(),
        }
    }

    /// The script lines belonging to `color`.
    pub fn for_color(script: &[(Color, Move)], color: Color) -> Self {
        Self::new(
            script
                .iter()
                .filter(|(c, _)| *c == color)
                .map(|&(_, mv)| mv),
        )
    }

    pub fn parse(text: &str, size: u8, color: Color) -> Result<Self, PlayError> {
        Ok(Self::for_color(&input::parse_script(text, size)?, color))
    }

    pub fn remaining(&self) -> usize {
        self.moves.len()
    }

    pub fn next_move(&mut self) -> Move {
        self.moves.pop_front().unwrap_or(Move::Pass)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predictor::RandomPredictor;

    fn p(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    #[tokio::test]
    async fn human_reprompts_until_valid() {
        let mut source = MoveSource::Human(HumanInput::new(&b"bogus\n9,9\n2,3\n"[..]));
        let game = Game::new(5);
        let mv = source.propose(&game, &[]).await.unwrap();
        assert_eq!(mv, Move::Play(p(2, 1)));
        assert!(source.is_interactive());
    }

    #[tokio::test]
    async fn channel_input_reads_lines() {
        let (tx, rx) = mpsc::channel(4);
        let human = HumanInput::from_channel(rx);
        tx.send(Ok("oops".to_string())).await.unwrap();
        tx.send(Ok("3,1".to_string())).await.unwrap();
        assert_eq!(human.read_move(Color::White, 5).await.unwrap(), Move::Play(p(0, 2)));

        drop(tx);
        let err = human.read_move(Color::White, 5).await.unwrap_err();
        assert!(matches!(err, PlayError::Cancelled));
    }

    #[tokio::test]
    async fn abandoned_channel_read_does_not_block() {
        let (_tx, rx) = mpsc::channel::<std::io::Result<String>>(1);
        let human = HumanInput::from_channel(rx);
        tokio::select! {
            _ = human.read_move(Color::Black, 5) => panic!("no line was sent"),
            _ = tokio::task::yield_now() => {}
        }
        // The pending read was dropped; the input is usable again.
        assert!(human.lines.try_lock().is_ok());
    }

    #[tokio::test]
    async fn human_input_end_cancels() {
        let human = HumanInput::new(&b"nonsense\n"[..]);
        let err = human.read_move(Color::Black, 5).await.unwrap_err();
        assert!(matches!(err, PlayError::Cancelled));
    }

    #[tokio::test]
    async fn human_clones_share_the_reader() {
        let black = HumanInput::new(&b"1,1\npass\n"[..]);
        let white = black.clone();
        assert_eq!(black.read_move(Color::Black, 5).await.unwrap(), Move::Play(p(0, 0)));
        assert_eq!(white.read_move(Color::White, 5).await.unwrap(), Move::Pass);
    }

    #[tokio::test]
    async fn scripted_replays_then_passes() {
        let script = "B 1,1\nW 2,2\nB 3,3\n";
        let mut source = MoveSource::Scripted(ScriptedMoves::parse(script, 5, Color::Black).unwrap());
        let game = Game::new(5);
        assert_eq!(source.propose(&game, &[]).await.unwrap(), Move::Play(p(0, 0)));
        assert_eq!(source.propose(&game, &[]).await.unwrap(), Move::Play(p(2, 2)));
        assert_eq!(source.propose(&game, &[]).await.unwrap(), Move::Pass);
        assert!(!source.is_interactive());
    }

    #[test]
    fn scripted_splits_by_color() {
        let script = input::parse_script("B 1,1\nW 2,2\nW pass\n", 5).unwrap();
        assert_eq!(ScriptedMoves::for_color(&script, Color::Black).remaining(), 1);
        assert_eq!(ScriptedMoves::for_color(&script, Color::White).remaining(), 2);
    }

    #[tokio::test]
    async fn learned_source_proposes_legal_moves() {
        let mut source = MoveSource::Learned(BeamSearch::new(RandomPredictor, 2, 1));
        let game = Game::new(3);
        let rejected = [p(1, 1)];
        let mv = source.propose(&game, &rejected).await.unwrap();
        let pos = mv.position().unwrap();
        assert_ne!(pos, p(1, 1));
        assert!(game.board().is_legal(pos, Color::Black));
    }
}
