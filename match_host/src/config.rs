use std::path::Path;

use anyhow::Context;
use memory_match::GameConfig;
use serde::{Deserialize, Serialize};

/// Game settings plus what only the host cares about.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    #[serde(flatten)]
    pub game: GameConfig,
    /// Pause before each robot pick.
    pub robot_delay_ms: u64,
    /// Refuse hints unless the robot plays on easy.
    pub hints_on_easy_only: bool,
    /// How often the actuator tries to scan a square before giving up.
    pub scan_attempts: u32,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            robot_delay_ms: 500,
            hints_on_easy_only: true,
            scan_attempts: 2,
        }
    }
}

impl HostConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Could not read config file '{}'", path.display()))?;
        let config: HostConfig = serde_json::from_str(&contents)
            .with_context(|| format!("Could not parse config file '{}'", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        self.game.validate()?;
        if self.scan_attempts == 0 {
            anyhow::bail!("scan_attempts must be at least 1");
        }
        Ok(())
    }
}
