use std::collections::BTreeSet;
use std::io::{BufRead, Write};
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};

use memory_match::{BoardLayout, Event, Player, SquareId};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::HostMessage;

/// What the people at the table can ask for.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Input {
    /// The human points at a card.
    Pick { square: SquareId },
    SetDifficulty { difficulty: String },
    Reset,
    RequestHint,
    Quit,
}

/// Receives the engine's events, in order and in the batches they were emitted.
pub trait Presenter {
    fn present(&mut self, events: &[Event]) -> anyhow::Result<()>;
}

/// Writes each event as one line of JSON.
pub struct JsonLinesPresenter<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesPresenter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Presenter for JsonLinesPresenter<W> {
    fn present(&mut self, events: &[Event]) -> anyhow::Result<()> {
        for event in events {
            serde_json::to_writer(&mut self.writer, event)?;
            writeln!(self.writer)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

/// Parses one line of input. Blank lines are `None`.
pub fn parse_input(line: &str) -> anyhow::Result<Option<Input>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    Ok(Some(serde_json::from_str(line)?))
}

/// Forwards JSON lines from stdin to the host until EOF, which counts as [`Input::Quit`].
pub fn spawn_stdin_reader(host: Sender<HostMessage>) -> anyhow::Result<JoinHandle<()>> {
    let handle = thread::Builder::new()
        .name(String::from("stdin"))
        .spawn(move || {
            let mut stdin = std::io::stdin().lock();
            let mut buf = String::new();
            loop {
                buf.clear(); // because stdin.read_line() appends to the buffer
                match stdin.read_line(&mut buf) {
                    Ok(0) => break,
                    Ok(_) => {}
                    Err(err) => {
                        warn!(%err, "Could not read from stdin");
                        break;
                    }
                }
                match parse_input(&buf) {
                    Ok(Some(input)) => {
                        if host.send(HostMessage::Input(input)).is_err() {
                            return;
                        }
                    }
                    Ok(None) => {}
                    Err(err) => warn!(line = buf.trim_end(), %err, "Ignoring malformed input"),
                }
            }
            let _ = host.send(HostMessage::Input(Input::Quit));
        })?;
    Ok(handle)
}

/// A stand-in for the human that points at two random unmatched cards
/// whenever it is its turn.
///
/// It only knows what the events tell it, like a person watching the screen.
pub struct AutoHuman {
    layout: BoardLayout,
    matched: BTreeSet<SquareId>,
    turn: Player,
    game_over: bool,
    rng: StdRng,
    host: Sender<HostMessage>,
}

impl AutoHuman {
    pub fn new(layout: BoardLayout, rng: StdRng, host: Sender<HostMessage>) -> Self {
        Self {
            layout,
            matched: BTreeSet::new(),
            turn: Player::Human,
            game_over: false,
            rng,
            host,
        }
    }

    fn pick(&mut self) -> anyhow::Result<()> {
        let unmatched: Vec<SquareId> = self
            .layout
            .squares()
            .filter(|sq| !self.matched.contains(sq))
            .collect();
        for &square in unmatched.choose_multiple(&mut self.rng, 2) {
            trace!(%square, "Auto human picks");
            self.host.send(HostMessage::Input(Input::Pick { square }))?;
        }
        Ok(())
    }
}

impl Presenter for AutoHuman {
    fn present(&mut self, events: &[Event]) -> anyhow::Result<()> {
        let mut should_pick = false;
        for event in events {
            match event {
                Event::Reset => {
                    self.matched.clear();
                    self.game_over = false;
                    self.turn = Player::Human;
                    should_pick = true;
                }
                Event::Turn { player } => {
                    self.turn = *player;
                    should_pick = true;
                }
                Event::Matched { squares } => {
                    self.matched.extend(squares);
                    should_pick = true;
                }
                Event::ScanFail { .. } => should_pick = true,
                Event::GameOver { .. } => self.game_over = true,
                Event::Reveal { .. }
                | Event::FlipBack { .. }
                | Event::Score { .. }
                | Event::Hint { .. } => {}
            }
        }
        if should_pick && self.turn == Player::Human && !self.game_over {
            self.pick()?;
        } else if should_pick {
            debug!(turn = %self.turn, game_over = self.game_over, "Auto human waits");
        }
        Ok(())
    }
}
