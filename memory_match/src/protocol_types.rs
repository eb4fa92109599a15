use serde::{Deserialize, Serialize};

use crate::{CardFeatures, SquareId};

/// Who is flipping cards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    Human,
    Robot,
}

impl Player {
    pub fn other(self) -> Self {
        match self {
            Player::Human => Player::Robot,
            Player::Robot => Player::Human,
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Player::Human => write!(f, "human"),
            Player::Robot => write!(f, "robot"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    Human,
    Robot,
    Tie,
}

/// One point per matched pair.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scores {
    pub human: u32,
    pub robot: u32,
}

impl Scores {
    pub fn get(&self, player: Player) -> u32 {
        match player {
            Player::Human => self.human,
            Player::Robot => self.robot,
        }
    }

    pub(crate) fn award(&mut self, player: Player) {
        match player {
            Player::Human => self.human += 1,
            Player::Robot => self.robot += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.human + self.robot
    }
}

/// Everything the engine can be asked to do.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    /// A card was scanned and its features extracted.
    Reveal {
        square: SquareId,
        #[serde(flatten)]
        features: CardFeatures,
        /// Opaque reference to the captured image, passed through to the presentation layer.
        #[serde(default)]
        asset: Option<String>,
    },
    /// Unknown levels fall back to the default instead of failing.
    SetDifficulty { difficulty: String },
    Reset,
    RequestHint,
    /// The actuator could not get usable features for this square.
    ScanFailed { square: SquareId },
}

/// Emitted by the engine for the presentation layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    Reveal {
        square: SquareId,
        #[serde(default)]
        asset: Option<String>,
    },
    Matched {
        squares: [SquareId; 2],
    },
    FlipBack {
        squares: [SquareId; 2],
    },
    Turn {
        player: Player,
    },
    Score {
        human_score: u32,
        robot_score: u32,
    },
    GameOver {
        winner: Winner,
        human_score: u32,
        robot_score: u32,
    },
    Reset,
    ScanFail {
        square: SquareId,
    },
    Hint {
        squares: Option<[SquareId; 2]>,
    },
}
