use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use crate::strategy::{select_move, BoardView};
use crate::{
    BoardLayout, CardFeatures, Clock, Command, Comparator, Comparison, Difficulty, Event,
    GameConfig, InvalidConfig, InvalidInput, MoveEvent, MoveLog, Player, RobotMove, Scores,
    SquareId, SystemClock, Winner,
};

/// What the engine remembers about a revealed square.
#[derive(Clone, Debug, PartialEq)]
pub struct CardRecord {
    pub square: SquareId,
    pub features: CardFeatures,
    pub matched: bool,
}

/// The first card of the current pair attempt.
#[derive(Clone, Debug, PartialEq)]
pub struct PendingPick {
    pub square: SquareId,
    pub features: CardFeatures,
}

/// Why a reveal was ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    AlreadyMatched,
    /// The square is already the first card of the current pair attempt.
    AlreadyPending,
    GameOver,
}

/// Summarizes what a reveal did.
#[derive(Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    /// Nothing changed.
    Skip(SkipReason),
    /// This was the first card of a pair.
    WaitingForSecond,
    /// This was the second card of a pair.
    Resolved(Resolution),
}

/// The consequences of revealing the second card of a pair.
#[derive(Clone, Debug, PartialEq)]
pub struct Resolution {
    /// The first and second card, in reveal order.
    pub squares: [SquareId; 2],
    pub comparison: Comparison,
    /// Whose turn it is now.
    pub turn: Player,
    pub game_over: Option<Winner>,
    /// Set when it is now the robot's turn.
    pub robot_move: Option<RobotMove>,
}

/// The result of [`MatchEngine::apply()`].
#[derive(Clone, Debug, PartialEq)]
pub enum Response {
    Reveal(RevealOutcome),
    Difficulty(Difficulty),
    Reset,
    Hint(Option<[SquareId; 2]>),
    ScanFailed { robot_move: Option<RobotMove> },
}

/// The turn and board tracker for one game between a human and the robot.
///
/// All state is owned here and changes only through `&mut self` methods, so
/// a host that feeds commands from a single queue gets atomic updates for free.
/// Presentation events pile up until [`drain_events()`](Self::drain_events) is called.
pub struct MatchEngine {
    layout: BoardLayout,
    comparator: Comparator,
    difficulty: Difficulty,
    board: BTreeMap<SquareId, CardRecord>,
    matched: BTreeSet<SquareId>,
    pending: Option<PendingPick>,
    turn: Player,
    scores: Scores,
    winner: Option<Winner>,
    log: MoveLog,
    events: Vec<Event>,
    rng: StdRng,
}

impl MatchEngine {
    pub fn new(config: &GameConfig, rng: StdRng) -> Result<Self, InvalidConfig> {
        Self::with_clock(config, rng, Box::new(SystemClock))
    }

    pub fn with_clock(
        config: &GameConfig,
        rng: StdRng,
        clock: Box<dyn Clock>,
    ) -> Result<Self, InvalidConfig> {
        config.validate()?;
        Ok(Self {
            layout: config.layout(),
            comparator: config.comparator(),
            difficulty: config.difficulty_default,
            board: BTreeMap::new(),
            matched: BTreeSet::new(),
            pending: None,
            turn: Player::Human,
            scores: Scores::default(),
            winner: None,
            log: MoveLog::new(clock),
            events: Vec::new(),
            rng,
        })
    }

    /// Dispatches one command.
    pub fn apply(&mut self, command: Command) -> Result<Response, InvalidInput> {
        match command {
            Command::Reveal {
                square,
                features,
                asset,
            } => self
                .reveal(square, features, asset)
                .map(Response::Reveal),
            Command::SetDifficulty { difficulty } => {
                Ok(Response::Difficulty(self.set_difficulty(&difficulty)))
            }
            Command::Reset => {
                self.reset();
                Ok(Response::Reset)
            }
            Command::RequestHint => Ok(Response::Hint(self.request_hint())),
            Command::ScanFailed { square } => Ok(Response::ScanFailed {
                robot_move: self.scan_failed(square),
            }),
        }
    }

    /// Records a revealed card and, if it is the second of a pair, resolves the pair.
    ///
    /// Returns an error only for malformed features or squares off the board,
    /// and in that case nothing is changed.
    pub fn reveal(
        &mut self,
        square: SquareId,
        features: CardFeatures,
        asset: Option<String>,
    ) -> Result<RevealOutcome, InvalidInput> {
        if !self.layout.contains(square) {
            return Err(InvalidInput::UnknownSquare(square.to_string()));
        }
        if self.matched.contains(&square) {
            return Ok(self.skip(square, SkipReason::AlreadyMatched));
        }
        if self.winner.is_some() {
            return Ok(self.skip(square, SkipReason::GameOver));
        }
        if self.pending.as_ref().map(|p| p.square) == Some(square) {
            return Ok(self.skip(square, SkipReason::AlreadyPending));
        }
        self.check_compatible(&features)?;

        // Compare before touching any state, so malformed input changes nothing
        let comparison = match &self.pending {
            Some(first) => Some(self.comparator.compare(&first.features, &features)?),
            None => None,
        };

        self.board.insert(
            square,
            CardRecord {
                square,
                features: features.clone(),
                matched: false,
            },
        );
        self.log.push(MoveEvent::Flip(square), self.turn);
        self.events.push(Event::Reveal { square, asset });

        let (first, comparison) = match (self.pending.take(), comparison) {
            (Some(first), Some(comparison)) => (first.square, comparison),
            _ => {
                self.pending = Some(PendingPick { square, features });
                return Ok(RevealOutcome::WaitingForSecond);
            }
        };
        let squares = [first, square];
        debug!(
            first = %first,
            second = %square,
            distance = comparison.reduced_distance,
            overlap = comparison.overlap_score,
            is_match = comparison.is_match,
            reason = comparison.reason(&self.comparator.thresholds),
            "Compared cards"
        );

        if comparison.is_match {
            self.resolve_match(squares);
        } else {
            self.resolve_mismatch(squares);
        }

        let robot_move = (self.winner.is_none() && self.turn == Player::Robot)
            .then(|| self.plan_robot_move());
        Ok(RevealOutcome::Resolved(Resolution {
            squares,
            comparison,
            turn: self.turn,
            game_over: self.winner,
            robot_move,
        }))
    }

    fn resolve_match(&mut self, squares: [SquareId; 2]) {
        self.events.push(Event::Matched { squares });
        for sq in squares {
            if let Some(rec) = self.board.get_mut(&sq) {
                rec.matched = true;
            }
            self.matched.insert(sq);
        }
        self.scores.award(self.turn);
        self.events.push(Event::Score {
            human_score: self.scores.human,
            robot_score: self.scores.robot,
        });
        self.log.push(MoveEvent::Match(squares), self.turn);
        info!(player = %self.turn, a = %squares[0], b = %squares[1], "Pair matched");

        if self.matched.len() == self.layout.len() {
            let winner = match self.scores.human.cmp(&self.scores.robot) {
                Ordering::Less => Winner::Robot,
                Ordering::Equal => Winner::Tie,
                Ordering::Greater => Winner::Human,
            };
            info!(?winner, human = self.scores.human, robot = self.scores.robot, "Game over");
            self.winner = Some(winner);
            self.events.push(Event::GameOver {
                winner,
                human_score: self.scores.human,
                robot_score: self.scores.robot,
            });
        }
    }

    fn resolve_mismatch(&mut self, squares: [SquareId; 2]) {
        self.events.push(Event::FlipBack { squares });
        self.log.push(MoveEvent::Mismatch(squares), self.turn);
        self.turn = self.turn.other();
        info!(a = %squares[0], b = %squares[1], turn = %self.turn, "No match");
        self.events.push(Event::Turn { player: self.turn });
    }

    /// All features on the board must be comparable with each other.
    fn check_compatible(&self, features: &CardFeatures) -> Result<(), InvalidInput> {
        features.validate()?;
        let Some(known) = self.board.values().next() else {
            return Ok(());
        };
        if known.features.signature.len() != features.signature.len() {
            return Err(InvalidInput::SignatureLength {
                expected: known.features.signature.len(),
                actual: features.signature.len(),
            });
        }
        let known_len = self
            .board
            .values()
            .find_map(|rec| rec.features.descriptor_len());
        if let (Some(expected), Some(actual)) = (known_len, features.descriptor_len()) {
            if expected != actual {
                return Err(InvalidInput::DescriptorLength { expected, actual });
            }
        }
        Ok(())
    }

    fn skip(&mut self, square: SquareId, reason: SkipReason) -> RevealOutcome {
        debug!(%square, ?reason, "Skipping reveal");
        self.log.push(MoveEvent::Skip(square), self.turn);
        RevealOutcome::Skip(reason)
    }

    /// Asks the robot strategy for its next squares and logs the plan.
    pub fn plan_robot_move(&mut self) -> RobotMove {
        let view = BoardView {
            layout: &self.layout,
            board: &self.board,
            matched: &self.matched,
        };
        let mv = select_move(&view, self.difficulty, &self.comparator, &mut self.rng);
        info!(strategy = ?mv.strategy, squares = ?mv.squares, "Robot plan");
        self.log.push(
            MoveEvent::RobotMove {
                strategy: mv.strategy,
                squares: mv.squares.clone(),
            },
            self.turn,
        );
        mv
    }

    /// Changes how much the robot remembers. Unknown levels fall back to the default.
    pub fn set_difficulty(&mut self, level: &str) -> Difficulty {
        let difficulty = Difficulty::parse_or_default(level);
        self.set_difficulty_level(difficulty);
        difficulty
    }

    pub fn set_difficulty_level(&mut self, difficulty: Difficulty) {
        info!(%difficulty, "Difficulty set");
        self.difficulty = difficulty;
        self.log.push(MoveEvent::Difficulty(difficulty), self.turn);
    }

    /// The first remembered pair of unmatched cards that match, if any.
    ///
    /// Does not change the game: the only write is a `Hint` entry in the move log.
    /// Whether hints are allowed at all is up to the caller.
    pub fn request_hint(&mut self) -> Option<[SquareId; 2]> {
        let view = BoardView {
            layout: &self.layout,
            board: &self.board,
            matched: &self.matched,
        };
        let hint = view.find_known_pair(&self.comparator, false);
        self.log.push(MoveEvent::Hint(hint), self.turn);
        hint
    }

    /// The actuator gave up on a square: the current pair attempt is abandoned,
    /// and the same player tries again.
    pub fn scan_failed(&mut self, square: SquareId) -> Option<RobotMove> {
        warn!(%square, turn = %self.turn, "Scan failed");
        self.pending = None;
        self.log.push(MoveEvent::ScanFail(square), self.turn);
        self.events.push(Event::ScanFail { square });
        (self.winner.is_none() && self.turn == Player::Robot).then(|| self.plan_robot_move())
    }

    /// Starts a new game. The difficulty is kept.
    pub fn reset(&mut self) {
        info!("Resetting game");
        self.board.clear();
        self.matched.clear();
        self.pending = None;
        self.log.clear();
        self.scores = Scores::default();
        self.winner = None;
        self.turn = Player::Human;
        self.events.push(Event::Reset);
        self.events.push(Event::Turn {
            player: Player::Human,
        });
    }

    /// Takes the presentation events emitted since the last call.
    pub fn drain_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn board(&self) -> &BTreeMap<SquareId, CardRecord> {
        &self.board
    }

    pub fn matched(&self) -> &BTreeSet<SquareId> {
        &self.matched
    }

    pub fn pending(&self) -> Option<&PendingPick> {
        self.pending.as_ref()
    }

    pub fn turn(&self) -> Player {
        self.turn
    }

    pub fn scores(&self) -> Scores {
        self.scores
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn winner(&self) -> Option<Winner> {
        self.winner
    }

    pub fn is_game_over(&self) -> bool {
        self.winner.is_some()
    }

    pub fn layout(&self) -> &BoardLayout {
        &self.layout
    }

    pub fn comparator(&self) -> &Comparator {
        &self.comparator
    }

    pub fn move_log(&self) -> &MoveLog {
        &self.log
    }

    pub fn view(&self) -> BoardView<'_> {
        BoardView {
            layout: &self.layout,
            board: &self.board,
            matched: &self.matched,
        }
    }
}
