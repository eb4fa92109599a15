use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use memory_match::{Difficulty, Event, MoveRecord, Scores, Winner};
use serde::Serialize;
use tracing::debug;

/// Writes one JSON file per finished game.
pub struct Recorder {
    num: usize,
    directory: PathBuf,
}

/// Everything worth keeping about one game.
#[derive(Serialize)]
pub struct GameRecording<'a> {
    pub winner: Option<Winner>,
    pub scores: Scores,
    pub difficulty: Difficulty,
    pub moves: &'a [MoveRecord],
    pub events: &'a [Event],
}

impl Recorder {
    pub fn new(directory: PathBuf) -> anyhow::Result<Self> {
        if !directory.is_dir() {
            anyhow::bail!("Directory '{}' does not exist", directory.display());
        }
        Ok(Self { num: 1, directory })
    }

    pub fn write_game_recording(&mut self, recording: &GameRecording) -> anyhow::Result<PathBuf> {
        let filepath = self.directory.join(format!("game_{:0>6}.json", self.num));
        let mut writer = BufWriter::new(File::create(&filepath)?);
        serde_json::to_writer_pretty(&mut writer, recording)?;
        writeln!(writer)?;
        writer.flush()?;
        debug!(path = %filepath.display(), "Wrote game recording");
        self.num += 1;
        Ok(filepath)
    }
}
