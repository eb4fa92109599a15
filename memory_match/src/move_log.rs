use serde::Serialize;

use crate::{Clock, Difficulty, Player, SquareId, StrategyKind};

/// What happened, with the squares involved.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "event", content = "payload", rename_all = "snake_case")]
pub enum MoveEvent {
    Flip(SquareId),
    Match([SquareId; 2]),
    Mismatch([SquareId; 2]),
    Skip(SquareId),
    ScanFail(SquareId),
    RobotMove {
        strategy: StrategyKind,
        squares: Vec<SquareId>,
    },
    Hint(Option<[SquareId; 2]>),
    Difficulty(Difficulty),
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MoveRecord {
    #[serde(flatten)]
    pub event: MoveEvent,
    /// Whose turn it was when this was recorded.
    pub turn: Player,
    pub timestamp_ms: u64,
}

/// Append-only audit trail of one game. Game logic never reads it back.
pub struct MoveLog {
    records: Vec<MoveRecord>,
    clock: Box<dyn Clock>,
}

impl MoveLog {
    pub fn new(clock: Box<dyn Clock>) -> Self {
        Self {
            records: Vec::new(),
            clock,
        }
    }

    pub fn push(&mut self, event: MoveEvent, turn: Player) {
        self.records.push(MoveRecord {
            event,
            turn,
            timestamp_ms: self.clock.now_ms(),
        });
    }

    pub fn records(&self) -> &[MoveRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}

impl std::fmt::Debug for MoveLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MoveLog")
            .field("records", &self.records)
            .finish_non_exhaustive()
    }
}
