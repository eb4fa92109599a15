use memory_match::{Event, Player, Winner};
use tracing::info;

/// Something the robot says or plays to the people at the table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Cue {
    HumanTurn,
    RobotTurn,
    CorrectMatchHuman,
    WrongMatchHuman,
    CorrectMatchRobot,
    WrongMatchRobot,
    HumanWin,
    RobotWin,
    ScanFail,
    Planning,
    /// The robot names a card it found.
    Announce {
        name: String,
        sentence: Option<String>,
        audio: Option<String>,
    },
}

impl std::fmt::Display for Cue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cue::HumanTurn => write!(f, "human_turn"),
            Cue::RobotTurn => write!(f, "robot_turn"),
            Cue::CorrectMatchHuman => write!(f, "correct_match_human"),
            Cue::WrongMatchHuman => write!(f, "wrong_match_human"),
            Cue::CorrectMatchRobot => write!(f, "correct_match_robot"),
            Cue::WrongMatchRobot => write!(f, "wrong_match_robot"),
            Cue::HumanWin => write!(f, "human_win"),
            Cue::RobotWin => write!(f, "robot_win"),
            Cue::ScanFail => write!(f, "scan_fail"),
            Cue::Planning => write!(f, "planning"),
            Cue::Announce { name, .. } => write!(f, "announce({})", name),
        }
    }
}

/// Plays cues. Fire and forget: a cue that can't be played is dropped.
pub trait Feedback {
    fn cue(&mut self, cue: &Cue);
}

/// Writes cues to the log instead of a speaker.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingFeedback;

impl Feedback for TracingFeedback {
    fn cue(&mut self, cue: &Cue) {
        match cue {
            Cue::Announce {
                name,
                sentence,
                audio,
            } => info!(
                card = name.as_str(),
                sentence = sentence.as_deref().unwrap_or(""),
                audio = audio.as_deref().unwrap_or(""),
                "Announcing card"
            ),
            _ => info!(%cue, "Cue"),
        }
    }
}

/// The cues for one batch of engine events. `player` is whose turn it was
/// before the batch.
pub fn cues_for_events(mut player: Player, events: &[Event]) -> Vec<Cue> {
    let mut cues = Vec::new();
    for event in events {
        match event {
            Event::Matched { .. } => cues.push(match player {
                Player::Human => Cue::CorrectMatchHuman,
                Player::Robot => Cue::CorrectMatchRobot,
            }),
            Event::FlipBack { .. } => cues.push(match player {
                Player::Human => Cue::WrongMatchHuman,
                Player::Robot => Cue::WrongMatchRobot,
            }),
            Event::Turn { player: next } => {
                player = *next;
                cues.push(match next {
                    Player::Human => Cue::HumanTurn,
                    Player::Robot => Cue::RobotTurn,
                });
            }
            Event::GameOver { winner, .. } => match winner {
                Winner::Human => cues.push(Cue::HumanWin),
                Winner::Robot => cues.push(Cue::RobotWin),
                Winner::Tie => {}
            },
            Event::ScanFail { .. } => cues.push(Cue::ScanFail),
            Event::Reveal { .. } | Event::Score { .. } | Event::Reset | Event::Hint { .. } => {}
        }
    }
    cues
}
