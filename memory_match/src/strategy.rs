use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;

use itertools::Itertools;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, warn};

use crate::{BoardLayout, CardRecord, Comparator, SquareId};

/// How much of its memory the robot uses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Picks blindly.
    Easy,
    /// Remembers half of the time.
    Medium,
    /// Always plays a known pair when there is one.
    #[default]
    Hard,
}

impl Difficulty {
    /// Parses a level, falling back to the default on unknown input.
    pub fn parse_or_default(s: &str) -> Self {
        s.parse().unwrap_or_else(|_| {
            warn!(level = s, fallback = %Difficulty::default(), "Unknown difficulty");
            Difficulty::default()
        })
    }

    /// For `#[serde(deserialize_with)]`: same fallback as [`Self::parse_or_default`].
    pub fn deserialize_lenient<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Self::parse_or_default(&s))
    }
}

/// The error type for the [`FromStr`] instance of [`Difficulty`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownDifficulty(pub String);

impl std::error::Error for UnknownDifficulty {}

impl std::fmt::Display for UnknownDifficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "'{}' is not a difficulty, expected easy, medium or hard",
            self.0
        )
    }
}

impl FromStr for Difficulty {
    type Err = UnknownDifficulty;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(UnknownDifficulty(String::from(s))),
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

/// Which rule produced a [`RobotMove`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// Two remembered cards that match.
    ConfidentRecall,
    /// Cards that have not been seen yet.
    ExploreUnseen,
    /// Any two unmatched cards.
    FallbackRandom,
    /// Only one unmatched square is left; it is returned twice.
    ///
    /// Boards always hold pairs, so this cannot happen in a real game. The host
    /// does not act on it: it scans a square once per move, and the engine skips
    /// a second reveal of the pending square.
    FinalSingle,
    /// Nothing left to flip.
    Idle,
}

/// The squares the robot wants revealed next, in order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RobotMove {
    pub strategy: StrategyKind,
    pub squares: Vec<SquareId>,
}

/// Read-only view of what the engine knows about the board.
#[derive(Clone, Copy, Debug)]
pub struct BoardView<'a> {
    pub layout: &'a BoardLayout,
    pub board: &'a BTreeMap<SquareId, CardRecord>,
    pub matched: &'a BTreeSet<SquareId>,
}

impl<'a> BoardView<'a> {
    /// Unmatched squares in row-major order, seen or not.
    pub fn unmatched(&self) -> Vec<SquareId> {
        self.layout
            .squares()
            .filter(|sq| !self.matched.contains(sq))
            .collect()
    }

    /// Squares that have never been revealed this game.
    pub fn unseen(&self) -> Vec<SquareId> {
        self.layout
            .squares()
            .filter(|sq| !self.board.contains_key(sq))
            .collect()
    }

    /// The first pair of remembered, unmatched cards that the comparator
    /// considers a match, in board order.
    ///
    /// With `require_descriptors`, cards without local descriptors are not considered.
    pub fn find_known_pair(
        &self,
        comparator: &Comparator,
        require_descriptors: bool,
    ) -> Option<[SquareId; 2]> {
        self.board
            .values()
            .filter(|rec| !rec.matched && !self.matched.contains(&rec.square))
            .filter(|rec| !require_descriptors || rec.features.has_descriptors())
            .tuple_combinations()
            .find(|(a, b)| match comparator.compare(&a.features, &b.features) {
                Ok(cmp) => cmp.is_match,
                Err(err) => {
                    warn!(a = %a.square, b = %b.square, %err, "Cannot compare remembered cards");
                    false
                }
            })
            .map(|(a, b)| [a.square, b.square])
    }
}

/// Chooses the squares the robot reveals next.
pub fn select_move<R: Rng + ?Sized>(
    view: &BoardView,
    difficulty: Difficulty,
    comparator: &Comparator,
    rng: &mut R,
) -> RobotMove {
    let unmatched = view.unmatched();
    match unmatched.as_slice() {
        [] => {
            return RobotMove {
                strategy: StrategyKind::Idle,
                squares: vec![],
            }
        }
        &[last] => {
            return RobotMove {
                strategy: StrategyKind::FinalSingle,
                squares: vec![last, last],
            }
        }
        _ => {}
    }

    if difficulty != Difficulty::Easy {
        let remembers = match difficulty {
            Difficulty::Medium => rng.gen_bool(0.5),
            _ => true,
        };
        if remembers {
            if let Some(pair) = view.find_known_pair(comparator, true) {
                return RobotMove {
                    strategy: StrategyKind::ConfidentRecall,
                    squares: pair.to_vec(),
                };
            }
        } else {
            debug!("Robot forgot what it has seen");
        }

        let unseen = view.unseen();
        match unseen.as_slice() {
            [] => {}
            &[only] => {
                let others: Vec<SquareId> =
                    unmatched.iter().copied().filter(|&sq| sq != only).collect();
                // There are at least two unmatched squares, so `others` is not empty
                if let Some(&partner) = others.choose(rng) {
                    return RobotMove {
                        strategy: StrategyKind::ExploreUnseen,
                        squares: vec![only, partner],
                    };
                }
            }
            _ => {
                return RobotMove {
                    strategy: StrategyKind::ExploreUnseen,
                    squares: unseen.choose_multiple(rng, 2).copied().collect(),
                };
            }
        }
    }

    RobotMove {
        strategy: StrategyKind::FallbackRandom,
        squares: unmatched.choose_multiple(rng, 2).copied().collect(),
    }
}
