use std::sync::mpsc::{self, Sender};
use std::thread::{self, JoinHandle};

use memory_match::{CardFeatures, Player, SquareId};
use tracing::{debug, warn};

use crate::{HostMessage, SimulatedTable};

/// What came back from looking at a square.
#[derive(Clone, Debug, PartialEq)]
pub enum ScanResult {
    Revealed {
        features: CardFeatures,
        asset: Option<String>,
    },
    /// Every attempt failed.
    Failed,
}

/// A finished scan, tagged with the generation it was requested in and
/// the player whose pick it was.
#[derive(Clone, Debug, PartialEq)]
pub struct ActuatorReport {
    pub generation: u64,
    pub requester: Player,
    pub square: SquareId,
    pub result: ScanResult,
}

/// Whatever physically turns over and reads cards.
///
/// Requests are answered asynchronously with [`HostMessage::Actuator`]
/// on the host channel, in the order they were made.
pub trait Actuator {
    fn request_scan(&mut self, square: SquareId, generation: u64, requester: Player);

    /// The cards were collected and laid out again.
    fn reset_table(&mut self);
}

/// Scans with retries.
pub struct ScanWorker {
    table: SimulatedTable,
    attempts: u32,
}

impl ScanWorker {
    pub fn new(table: SimulatedTable, attempts: u32) -> Self {
        Self {
            table,
            attempts: attempts.max(1),
        }
    }

    pub fn scan(&mut self, square: SquareId, generation: u64, requester: Player) -> ActuatorReport {
        for attempt in 1..=self.attempts {
            if let Some(features) = self.table.scan(square) {
                return ActuatorReport {
                    generation,
                    requester,
                    square,
                    result: ScanResult::Revealed {
                        features,
                        asset: Some(self.table.asset(square)),
                    },
                };
            }
            debug!(%square, attempt, "Scan attempt failed");
        }
        warn!(%square, attempts = self.attempts, "Giving up on scan");
        ActuatorReport {
            generation,
            requester,
            square,
            result: ScanResult::Failed,
        }
    }
}

/// Scans on the caller's thread and queues the report right away.
pub struct InlineActuator {
    worker: ScanWorker,
    reports: Sender<HostMessage>,
}

impl InlineActuator {
    pub fn new(worker: ScanWorker, reports: Sender<HostMessage>) -> Self {
        Self { worker, reports }
    }
}

impl Actuator for InlineActuator {
    fn request_scan(&mut self, square: SquareId, generation: u64, requester: Player) {
        let report = self.worker.scan(square, generation, requester);
        if self.reports.send(HostMessage::Actuator(report)).is_err() {
            warn!(%square, "Host is gone, dropping scan report");
        }
    }

    fn reset_table(&mut self) {
        self.worker.table.shuffle();
    }
}

enum ActuatorRequest {
    Scan {
        square: SquareId,
        generation: u64,
        requester: Player,
    },
    ResetTable,
}

/// Scans on its own thread, like a robot arm that works while the host waits.
pub struct ThreadedActuator {
    requests: Option<Sender<ActuatorRequest>>,
    handle: Option<JoinHandle<()>>,
}

impl ThreadedActuator {
    pub fn spawn(mut worker: ScanWorker, reports: Sender<HostMessage>) -> anyhow::Result<Self> {
        let (requests, receiver) = mpsc::channel();
        let handle = thread::Builder::new()
            .name(String::from("actuator"))
            .spawn(move || {
                for request in receiver {
                    match request {
                        ActuatorRequest::Scan {
                            square,
                            generation,
                            requester,
                        } => {
                            let report = worker.scan(square, generation, requester);
                            if reports.send(HostMessage::Actuator(report)).is_err() {
                                break;
                            }
                        }
                        ActuatorRequest::ResetTable => worker.table.shuffle(),
                    }
                }
                debug!("Actuator thread exiting");
            })?;
        Ok(Self {
            requests: Some(requests),
            handle: Some(handle),
        })
    }

    fn send(&self, request: ActuatorRequest) {
        let sent = self
            .requests
            .as_ref()
            .map(|requests| requests.send(request).is_ok())
            .unwrap_or(false);
        if !sent {
            warn!("Actuator thread is gone");
        }
    }
}

impl Actuator for ThreadedActuator {
    fn request_scan(&mut self, square: SquareId, generation: u64, requester: Player) {
        self.send(ActuatorRequest::Scan {
            square,
            generation,
            requester,
        });
    }

    fn reset_table(&mut self) {
        self.send(ActuatorRequest::ResetTable);
    }
}

impl Drop for ThreadedActuator {
    fn drop(&mut self) {
        // Closing the request channel ends the thread's loop
        self.requests = None;
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("Actuator thread panicked");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use memory_match::{square, BoardLayout};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn worker(failure_rate: f64, attempts: u32) -> ScanWorker {
        let table =
            SimulatedTable::new(BoardLayout::default(), failure_rate, StdRng::seed_from_u64(2));
        ScanWorker::new(table, attempts)
    }

    fn unwrap_report(message: HostMessage) -> ActuatorReport {
        match message {
            HostMessage::Actuator(report) => report,
            other => panic!("Expected a scan report, got {:?}", other),
        }
    }

    #[test]
    fn inline_reports_immediately() {
        let (sender, receiver) = mpsc::channel();
        let mut actuator = InlineActuator::new(worker(0.0, 2), sender);
        actuator.request_scan(square!("B3"), 7, Player::Robot);
        let report = unwrap_report(receiver.try_recv().unwrap());
        assert_eq!(report.generation, 7);
        assert_eq!(report.requester, Player::Robot);
        assert_eq!(report.square, square!("B3"));
        assert!(matches!(
            report.result,
            ScanResult::Revealed { asset: Some(ref asset), .. } if asset == "scanned_cards/B3.jpg"
        ));
    }

    #[test]
    fn gives_up_after_all_attempts() {
        let mut worker = worker(1.0, 3);
        let report = worker.scan(square!("A1"), 0, Player::Human);
        assert_eq!(report.result, ScanResult::Failed);
    }

    #[test]
    fn threaded_keeps_request_order() {
        let (sender, receiver) = mpsc::channel();
        let mut actuator = ThreadedActuator::spawn(worker(0.0, 1), sender).unwrap();
        let squares = [square!("A1"), square!("D5"), square!("C2")];
        for (generation, &square) in squares.iter().enumerate() {
            actuator.request_scan(square, generation as u64, Player::Human);
        }
        for (generation, &square) in squares.iter().enumerate() {
            let report = unwrap_report(receiver.recv().unwrap());
            assert_eq!(report.square, square);
            assert_eq!(report.generation, generation as u64);
        }
        actuator.reset_table();
        drop(actuator);
        assert!(receiver.recv().is_err());
    }
}
