use std::sync::mpsc::{Receiver, RecvTimeoutError, TryRecvError};
use std::time::Duration;

use memory_match::{
    visualize_board, CardCatalog, Clock, Command, Difficulty, Event, ManualClock, MatchEngine,
    Player, Response, RevealOutcome, RobotMove, SquareId, SystemClock, Winner,
};
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use crate::{
    cues_for_events, Actuator, ActuatorReport, Cue, Feedback, GameRecording, HostConfig, Input,
    Presenter, Recorder, ScanResult, Scheduler, TracingFeedback,
};

/// Everything that reaches the host loop.
#[derive(Clone, Debug, PartialEq)]
pub enum HostMessage {
    Input(Input),
    Actuator(ActuatorReport),
}

/// How scheduled robot picks wait for their time.
#[derive(Clone, Debug)]
pub enum Pacing {
    /// Time only passes when nothing else is left to do. For tests and autoplay.
    Virtual(ManualClock),
    RealTime,
}

impl Pacing {
    fn clock(&self) -> Box<dyn Clock> {
        match self {
            Pacing::Virtual(clock) => Box::new(clock.clone()),
            Pacing::RealTime => Box::new(SystemClock),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct RobotPick {
    square: SquareId,
    generation: u64,
}

/// Finished games by outcome.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tally {
    pub human_wins: usize,
    pub robot_wins: usize,
    pub ties: usize,
}

impl Tally {
    pub fn record(&mut self, winner: Winner) {
        match winner {
            Winner::Human => self.human_wins += 1,
            Winner::Robot => self.robot_wins += 1,
            Winner::Tie => self.ties += 1,
        }
    }

    pub fn games(&self) -> usize {
        self.human_wins + self.robot_wins + self.ties
    }
}

/// The one consumer of the host channel. It owns the engine, so every
/// command is applied completely before the next one is looked at.
///
/// Scan requests carry the current generation. A reset or a failed scan
/// starts a new generation, which cancels the robot's scheduled picks and
/// makes reports for older requests stale. Requests also carry the player
/// who picked, and a report only counts while it is still that player's turn.
pub struct Session {
    engine: MatchEngine,
    config: HostConfig,
    catalog: CardCatalog,
    actuator: Box<dyn Actuator>,
    presenters: Vec<Box<dyn Presenter>>,
    feedback: Box<dyn Feedback>,
    recorder: Option<Recorder>,
    scheduler: Scheduler<RobotPick>,
    pacing: Pacing,
    generation: u64,
    game_events: Vec<Event>,
    tally: Tally,
    games_to_play: Option<usize>,
    stopped: bool,
}

impl Session {
    pub fn new(
        config: HostConfig,
        rng: StdRng,
        actuator: Box<dyn Actuator>,
        pacing: Pacing,
    ) -> anyhow::Result<Self> {
        config.validate()?;
        let engine = MatchEngine::with_clock(&config.game, rng, pacing.clock())?;
        Ok(Self {
            engine,
            catalog: config.game.card_catalog(),
            config,
            actuator,
            presenters: Vec::new(),
            feedback: Box::new(TracingFeedback),
            recorder: None,
            scheduler: Scheduler::new(pacing.clock()),
            pacing,
            generation: 0,
            game_events: Vec::new(),
            tally: Tally::default(),
            games_to_play: None,
            stopped: false,
        })
    }

    pub fn with_presenter(mut self, presenter: Box<dyn Presenter>) -> Self {
        self.presenters.push(presenter);
        self
    }

    pub fn with_feedback(mut self, feedback: Box<dyn Feedback>) -> Self {
        self.feedback = feedback;
        self
    }

    pub fn with_recorder(mut self, recorder: Recorder) -> Self {
        self.recorder = Some(recorder);
        self
    }

    /// Replaces the catalog from the config, e.g. with one built from the table.
    pub fn with_catalog(mut self, catalog: CardCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Start a new game after each finished one, and stop after `num_games`.
    pub fn play_games(mut self, num_games: usize) -> Self {
        self.games_to_play = Some(num_games);
        self
    }

    /// Tells the presentation layer that the human may begin.
    pub fn start(&mut self) -> anyhow::Result<()> {
        info!(difficulty = %self.engine.difficulty(), "Starting game");
        let turn = self.engine.turn();
        let events = [Event::Turn { player: turn }];
        self.play_cues(turn, &events);
        self.present(&events)
    }

    /// Processes messages until told to stop, the channel closes, or, with
    /// virtual pacing, nothing is left to do.
    pub fn run(&mut self, receiver: &Receiver<HostMessage>) -> anyhow::Result<Tally> {
        while !self.stopped {
            if let Some(pick) = self.scheduler.pop_due() {
                self.fire(pick);
                continue;
            }
            let message = match &self.pacing {
                Pacing::Virtual(clock) => match receiver.try_recv() {
                    Ok(message) => message,
                    Err(TryRecvError::Empty) => match self.scheduler.next_due() {
                        Some(due) => {
                            clock.set(due);
                            continue;
                        }
                        None => {
                            debug!("Nothing left to do");
                            break;
                        }
                    },
                    Err(TryRecvError::Disconnected) => break,
                },
                Pacing::RealTime => match self.scheduler.time_until_next() {
                    Some(wait) => match receiver.recv_timeout(Duration::from_millis(wait)) {
                        Ok(message) => message,
                        Err(RecvTimeoutError::Timeout) => continue,
                        Err(RecvTimeoutError::Disconnected) => break,
                    },
                    None => match receiver.recv() {
                        Ok(message) => message,
                        Err(_) => break,
                    },
                },
            };
            self.handle(message)?;
        }
        Ok(self.tally)
    }

    pub fn handle(&mut self, message: HostMessage) -> anyhow::Result<()> {
        match message {
            HostMessage::Input(input) => self.handle_input(input),
            HostMessage::Actuator(report) => self.handle_report(report),
        }
    }

    fn handle_input(&mut self, input: Input) -> anyhow::Result<()> {
        match input {
            Input::Pick { square } => {
                if self.engine.is_game_over() {
                    debug!(%square, "Game is over, ignoring pick");
                } else if self.engine.turn() != Player::Human {
                    debug!(%square, "Not the human's turn, ignoring pick");
                } else if !self.engine.layout().contains(square) {
                    warn!(%square, "Pick outside the board");
                } else {
                    self.actuator.request_scan(square, self.generation, Player::Human);
                }
                Ok(())
            }
            Input::SetDifficulty { difficulty } => {
                self.engine.set_difficulty(&difficulty);
                Ok(())
            }
            Input::Reset => self.new_game(),
            Input::RequestHint => {
                let difficulty = self.engine.difficulty();
                let squares = if self.config.hints_on_easy_only && difficulty != Difficulty::Easy {
                    info!(%difficulty, "Hints are only given on easy");
                    None
                } else {
                    self.engine.request_hint()
                };
                self.present(&[Event::Hint { squares }])
            }
            Input::Quit => {
                info!("Quitting");
                self.stopped = true;
                Ok(())
            }
        }
    }

    fn handle_report(&mut self, report: ActuatorReport) -> anyhow::Result<()> {
        if report.generation != self.generation {
            debug!(
                square = %report.square,
                generation = report.generation,
                current = self.generation,
                "Dropping stale scan report"
            );
            return Ok(());
        }
        let turn = self.engine.turn();
        if report.requester != turn {
            debug!(
                square = %report.square,
                requester = %report.requester,
                %turn,
                "Dropping scan report picked out of turn"
            );
            return Ok(());
        }
        let mut identified = None;
        let command = match report.result {
            ScanResult::Revealed { features, asset } => {
                if turn == Player::Robot {
                    identified = self.catalog.identify(&features.signature).cloned();
                }
                Command::Reveal {
                    square: report.square,
                    features,
                    asset,
                }
            }
            ScanResult::Failed => Command::ScanFailed {
                square: report.square,
            },
        };
        let robot_move = match self.engine.apply(command) {
            Ok(Response::Reveal(RevealOutcome::Skip(_))) => None,
            Ok(Response::Reveal(outcome)) => {
                if let Some(category) = identified {
                    self.feedback.cue(&Cue::Announce {
                        name: category.name,
                        sentence: category.sentence,
                        audio: category.audio,
                    });
                }
                match outcome {
                    RevealOutcome::Resolved(resolution) => resolution.robot_move,
                    _ => None,
                }
            }
            Ok(Response::ScanFailed { robot_move }) => {
                self.barrier();
                robot_move
            }
            Ok(_) => None,
            Err(err) => {
                warn!(square = %report.square, %err, "Rejected reveal");
                None
            }
        };
        self.after_command(turn, robot_move)
    }

    /// Publishes what the last command did and lines up the robot's picks.
    fn after_command(
        &mut self,
        turn_before: Player,
        robot_move: Option<RobotMove>,
    ) -> anyhow::Result<()> {
        let events = self.engine.drain_events();
        self.play_cues(turn_before, &events);
        if let Some(robot_move) = robot_move {
            self.feedback.cue(&Cue::Planning);
            self.schedule_robot(robot_move);
        }
        self.present(&events)?;
        if events
            .iter()
            .any(|event| matches!(event, Event::Matched { .. } | Event::FlipBack { .. }))
        {
            debug!("\n{}", visualize_board(&self.engine));
        }
        let winner = events.iter().find_map(|event| match event {
            Event::GameOver { winner, .. } => Some(*winner),
            _ => None,
        });
        match winner {
            Some(winner) => self.finish_game(winner),
            None => Ok(()),
        }
    }

    fn schedule_robot(&mut self, robot_move: RobotMove) {
        let mut squares = robot_move.squares;
        squares.dedup();
        for (idx, square) in squares.into_iter().enumerate() {
            let delay = self.config.robot_delay_ms * (idx as u64 + 1);
            self.scheduler.schedule(
                delay,
                RobotPick {
                    square,
                    generation: self.generation,
                },
            );
        }
    }

    fn fire(&mut self, pick: RobotPick) {
        if pick.generation != self.generation
            || self.engine.turn() != Player::Robot
            || self.engine.is_game_over()
        {
            debug!(square = %pick.square, "Dropping robot pick");
            return;
        }
        debug!(square = %pick.square, "Robot picks");
        self.actuator.request_scan(pick.square, pick.generation, Player::Robot);
    }

    fn finish_game(&mut self, winner: Winner) -> anyhow::Result<()> {
        self.tally.record(winner);
        let scores = self.engine.scores();
        info!(
            game = self.tally.games(),
            ?winner,
            human = scores.human,
            robot = scores.robot,
            "Game finished"
        );
        if let Some(recorder) = &mut self.recorder {
            recorder.write_game_recording(&GameRecording {
                winner: Some(winner),
                scores,
                difficulty: self.engine.difficulty(),
                moves: self.engine.move_log().records(),
                events: &self.game_events,
            })?;
        }
        match self.games_to_play {
            Some(num_games) if self.tally.games() >= num_games => {
                self.stopped = true;
                Ok(())
            }
            Some(_) => self.new_game(),
            None => Ok(()),
        }
    }

    fn new_game(&mut self) -> anyhow::Result<()> {
        let turn = self.engine.turn();
        self.barrier();
        self.actuator.reset_table();
        self.game_events.clear();
        self.engine.apply(Command::Reset)?;
        self.after_command(turn, None)
    }

    /// Anything requested before this point is stale.
    fn barrier(&mut self) {
        self.generation += 1;
        let cancelled = self.scheduler.cancel_all();
        debug!(generation = self.generation, cancelled, "New generation");
    }

    fn play_cues(&mut self, turn_before: Player, events: &[Event]) {
        for cue in cues_for_events(turn_before, events) {
            self.feedback.cue(&cue);
        }
    }

    fn present(&mut self, events: &[Event]) -> anyhow::Result<()> {
        if events.is_empty() {
            return Ok(());
        }
        self.game_events.extend_from_slice(events);
        for presenter in &mut self.presenters {
            presenter.present(events)?;
        }
        Ok(())
    }

    pub fn engine(&self) -> &MatchEngine {
        &self.engine
    }

    pub fn tally(&self) -> Tally {
        self.tally
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn scheduled_picks(&self) -> usize {
        self.scheduler.len()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::mpsc::{self, Sender};

    use memory_match::{square, BoardLayout, MoveEvent, StrategyKind};
    use rand::SeedableRng;

    use super::*;
    use crate::{AutoHuman, InlineActuator, ScanWorker, SimulatedTable, ThreadedActuator};

    const TABLE_SEED: u64 = 99;

    /// A second table dealt exactly like the one behind the actuator.
    fn mirror_table() -> SimulatedTable {
        SimulatedTable::new(BoardLayout::default(), 0.0, StdRng::seed_from_u64(TABLE_SEED))
    }

    fn inline_session(
        config: HostConfig,
        failure_rate: f64,
    ) -> (Session, Sender<HostMessage>, Receiver<HostMessage>) {
        let (sender, receiver) = mpsc::channel();
        let table = SimulatedTable::new(
            config.game.layout(),
            failure_rate,
            StdRng::seed_from_u64(TABLE_SEED),
        );
        let actuator = InlineActuator::new(ScanWorker::new(table, config.scan_attempts), sender.clone());
        let session = Session::new(
            config,
            StdRng::seed_from_u64(5),
            Box::new(actuator),
            Pacing::Virtual(ManualClock::new(0)),
        )
        .unwrap();
        (session, sender, receiver)
    }

    /// Two squares with the same picture and one with another picture.
    fn pair_and_other(table: &SimulatedTable) -> (SquareId, SquareId, SquareId) {
        let squares: Vec<SquareId> = BoardLayout::default().squares().collect();
        let a = squares[0];
        let picture = table.picture_at(a);
        let b = squares[1..]
            .iter()
            .copied()
            .find(|&sq| table.picture_at(sq) == picture)
            .unwrap();
        let x = squares[1..]
            .iter()
            .copied()
            .find(|&sq| table.picture_at(sq) != picture)
            .unwrap();
        (a, b, x)
    }

    fn pick(square: SquareId) -> HostMessage {
        HostMessage::Input(Input::Pick { square })
    }

    fn drain(session: &mut Session, receiver: &Receiver<HostMessage>) {
        while let Ok(message) = receiver.try_recv() {
            session.handle(message).unwrap();
        }
    }

    #[derive(Clone, Default)]
    struct EventLog(Rc<RefCell<Vec<Event>>>);

    impl Presenter for EventLog {
        fn present(&mut self, events: &[Event]) -> anyhow::Result<()> {
            self.0.borrow_mut().extend_from_slice(events);
            Ok(())
        }
    }

    #[derive(Clone, Default)]
    struct CueLog(Rc<RefCell<Vec<Cue>>>);

    impl Feedback for CueLog {
        fn cue(&mut self, cue: &Cue) {
            self.0.borrow_mut().push(cue.clone());
        }
    }

    fn autoplay(difficulty: &str, failure_rate: f64, num_games: usize) -> (Session, Vec<Cue>) {
        let config = HostConfig::default();
        let (session, sender, receiver) = inline_session(config, failure_rate);
        let human = AutoHuman::new(BoardLayout::default(), StdRng::seed_from_u64(8), sender);
        let cues = CueLog::default();
        let mut session = session
            .with_presenter(Box::new(human))
            .with_feedback(Box::new(cues.clone()))
            .play_games(num_games);
        session
            .handle(HostMessage::Input(Input::SetDifficulty {
                difficulty: String::from(difficulty),
            }))
            .unwrap();
        session.start().unwrap();
        let tally = session.run(&receiver).unwrap();
        assert_eq!(tally.games(), num_games);
        let cues = cues.0.borrow().clone();
        (session, cues)
    }

    #[test]
    fn autoplay_finishes_games_on_every_difficulty() {
        for difficulty in ["easy", "medium", "hard"] {
            let (session, cues) = autoplay(difficulty, 0.0, 3);
            let engine = session.engine();
            assert!(engine.is_game_over());
            assert_eq!(engine.scores().total(), 10);
            assert_eq!(engine.matched().len(), 20);
            assert!(cues.contains(&Cue::Planning));
            assert!(cues.contains(&Cue::CorrectMatchRobot) || cues.contains(&Cue::CorrectMatchHuman));
        }
    }

    #[test]
    fn autoplay_survives_scan_failures() {
        let (session, cues) = autoplay("hard", 0.3, 2);
        assert!(session.engine().is_game_over());
        assert!(cues.contains(&Cue::ScanFail));
        assert!(session.generation() > 1);
    }

    #[test]
    fn robot_names_the_cards_it_finds() {
        let (_, cues) = autoplay("hard", 0.0, 1);
        // The config has no catalog, so there is nothing to announce
        assert!(!cues.iter().any(|cue| matches!(cue, Cue::Announce { .. })));

        let (session, sender, receiver) = inline_session(HostConfig::default(), 0.0);
        let human = AutoHuman::new(BoardLayout::default(), StdRng::seed_from_u64(8), sender);
        let cues = CueLog::default();
        let mut session = session
            .with_catalog(CardCatalog::new(mirror_table().catalog(), 0.08))
            .with_presenter(Box::new(human))
            .with_feedback(Box::new(cues.clone()))
            .play_games(1);
        session.start().unwrap();
        session.run(&receiver).unwrap();
        assert!(cues
            .0
            .borrow()
            .iter()
            .any(|cue| matches!(cue, Cue::Announce { sentence: Some(s), .. } if s.starts_with("Look"))));
    }

    #[test]
    fn human_picks_wait_for_the_humans_turn() {
        let table = mirror_table();
        let (a, b, x) = pair_and_other(&table);
        let (mut session, _sender, receiver) = inline_session(HostConfig::default(), 0.0);
        session.handle(pick(a)).unwrap();
        session.handle(pick(x)).unwrap();
        drain(&mut session, &receiver);
        assert_eq!(session.engine().turn(), Player::Robot);
        assert_eq!(session.scheduled_picks(), 2);

        session.handle(pick(b)).unwrap();
        assert!(receiver.try_recv().is_err());
        assert_eq!(session.engine().board().len(), 2);
    }

    #[test]
    fn extra_human_clicks_do_not_become_robot_picks() {
        let table = mirror_table();
        let (a, b, x) = pair_and_other(&table);
        let (mut session, sender, receiver) = inline_session(HostConfig::default(), 0.0);

        // All three clicks arrive while it is still the human's turn, so all are scanned
        for square in [a, x, b] {
            sender.send(pick(square)).unwrap();
        }
        drain(&mut session, &receiver);

        let engine = session.engine();
        assert_eq!(engine.turn(), Player::Robot);
        assert_eq!(engine.pending(), None);
        assert_eq!(engine.board().len(), 2);
        assert!(!engine.board().contains_key(&b));
        assert_eq!(session.scheduled_picks(), 2);
        assert!(!engine
            .move_log()
            .records()
            .iter()
            .any(|rec| rec.turn == Player::Robot && matches!(rec.event, MoveEvent::Flip(_))));

        session.run(&receiver).unwrap();
        let robot_flips: Vec<u64> = session
            .engine()
            .move_log()
            .records()
            .iter()
            .filter(|rec| rec.turn == Player::Robot && matches!(rec.event, MoveEvent::Flip(_)))
            .map(|rec| rec.timestamp_ms)
            .collect();
        assert_eq!(&robot_flips[..2], &[500, 1000]);
    }

    #[test]
    fn a_repeated_square_is_scanned_once() {
        let (mut session, _sender, _receiver) = inline_session(HostConfig::default(), 0.0);
        session.schedule_robot(RobotMove {
            strategy: StrategyKind::FinalSingle,
            squares: vec![square!("D5"), square!("D5")],
        });
        assert_eq!(session.scheduled_picks(), 1);
    }

    #[test]
    fn reset_is_a_barrier() {
        let table = mirror_table();
        let (a, b, x) = pair_and_other(&table);
        let (mut session, _sender, receiver) = inline_session(HostConfig::default(), 0.0);
        session.handle(pick(a)).unwrap();
        session.handle(pick(x)).unwrap();
        drain(&mut session, &receiver);
        assert_eq!(session.scheduled_picks(), 2);
        let old_generation = session.generation();

        session.handle(HostMessage::Input(Input::Reset)).unwrap();
        assert_eq!(session.scheduled_picks(), 0);
        assert!(session.generation() > old_generation);
        assert_eq!(session.engine().turn(), Player::Human);
        assert!(session.engine().board().is_empty());

        let mut table = mirror_table();
        let stale = ActuatorReport {
            generation: old_generation,
            requester: Player::Human,
            square: b,
            result: ScanResult::Revealed {
                features: table.scan(b).unwrap(),
                asset: None,
            },
        };
        session.handle(HostMessage::Actuator(stale)).unwrap();
        assert!(session.engine().board().is_empty());
        assert_eq!(session.engine().pending(), None);
    }

    #[test]
    fn robot_picks_are_paced() {
        let table = mirror_table();
        let (a, _, x) = pair_and_other(&table);
        let (mut session, _sender, receiver) = inline_session(HostConfig::default(), 0.0);
        session.handle(pick(a)).unwrap();
        session.handle(pick(x)).unwrap();
        session.run(&receiver).unwrap();
        let robot_flips: Vec<u64> = session
            .engine()
            .move_log()
            .records()
            .iter()
            .filter(|rec| rec.turn == Player::Robot && matches!(rec.event, MoveEvent::Flip(_)))
            .map(|rec| rec.timestamp_ms)
            .collect();
        assert!(robot_flips.len() >= 2);
        assert_eq!(&robot_flips[..2], &[500, 1000]);
        // Without anyone playing the human, the robot stops when it misses
        assert_eq!(session.engine().turn(), Player::Human);
        assert_eq!(session.scheduled_picks(), 0);
    }

    #[test]
    fn hints_follow_the_difficulty_policy() {
        let table = mirror_table();
        let (a, b, x) = pair_and_other(&table);
        let (session, _sender, receiver) = inline_session(HostConfig::default(), 0.0);
        let events = EventLog::default();
        let mut session = session.with_presenter(Box::new(events.clone()));

        // Reveal a, lose the second scan, then reveal b as the start of a new attempt
        session.handle(pick(a)).unwrap();
        drain(&mut session, &receiver);
        let failure = ActuatorReport {
            generation: session.generation(),
            requester: Player::Human,
            square: x,
            result: ScanResult::Failed,
        };
        session.handle(HostMessage::Actuator(failure)).unwrap();
        assert_eq!(session.engine().turn(), Player::Human);
        session.handle(pick(b)).unwrap();
        drain(&mut session, &receiver);
        assert_eq!(session.engine().board().len(), 2);

        session.handle(HostMessage::Input(Input::RequestHint)).unwrap();
        assert_eq!(events.0.borrow().last(), Some(&Event::Hint { squares: None }));

        session
            .handle(HostMessage::Input(Input::SetDifficulty {
                difficulty: String::from("easy"),
            }))
            .unwrap();
        session.handle(HostMessage::Input(Input::RequestHint)).unwrap();
        let mut pair = [a, b];
        pair.sort();
        assert_eq!(events.0.borrow().last(), Some(&Event::Hint { squares: Some(pair) }));
        assert!(events
            .0
            .borrow()
            .contains(&Event::ScanFail { square: x }));
    }

    #[test]
    fn records_finished_games() {
        let directory = std::env::temp_dir().join(format!(
            "match_host_session_recording_{}_{}",
            std::process::id(),
            rand::random::<u64>()
        ));
        std::fs::create_dir_all(&directory).unwrap();
        let config = HostConfig::default();
        let (session, sender, receiver) = inline_session(config, 0.0);
        let human = AutoHuman::new(BoardLayout::default(), StdRng::seed_from_u64(1), sender);
        let mut session = session
            .with_presenter(Box::new(human))
            .with_recorder(Recorder::new(directory.clone()).unwrap())
            .play_games(2);
        session.start().unwrap();
        session.run(&receiver).unwrap();

        for name in ["game_000001.json", "game_000002.json"] {
            let json: serde_json::Value =
                serde_json::from_str(&std::fs::read_to_string(directory.join(name)).unwrap())
                    .unwrap();
            let events = json["events"].as_array().unwrap();
            assert_eq!(events.last().unwrap()["event"], "game_over");
            assert!(!json["moves"].as_array().unwrap().is_empty());
        }
        assert!(!directory.join("game_000003.json").exists());
        std::fs::remove_dir_all(&directory).unwrap();
    }

    #[test]
    fn real_time_with_threaded_actuator() {
        let (sender, receiver) = mpsc::channel();
        let config = HostConfig {
            robot_delay_ms: 0,
            ..HostConfig::default()
        };
        let table = SimulatedTable::new(config.game.layout(), 0.0, StdRng::seed_from_u64(3));
        let actuator = ThreadedActuator::spawn(ScanWorker::new(table, 1), sender.clone()).unwrap();
        let human = AutoHuman::new(BoardLayout::default(), StdRng::seed_from_u64(4), sender);
        let mut session = Session::new(
            config,
            StdRng::seed_from_u64(6),
            Box::new(actuator),
            Pacing::RealTime,
        )
        .unwrap()
        .with_presenter(Box::new(human))
        .play_games(1);
        session.start().unwrap();
        let tally = session.run(&receiver).unwrap();
        assert_eq!(tally.games(), 1);
    }
}
