use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use lunch_map::config::ClientConfig;


pub const DEFAULT_SESSION_FILE: &str = ".lunch_map_session.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    pub client: ClientConfig,
    // Where the session token is kept between invocations.
    pub session_file: PathBuf,
    // Print one line per map marker.
    pub show_markers: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        ConsoleConfig {
            client: ClientConfig::default(),
            session_file: PathBuf::from(DEFAULT_SESSION_FILE),
            show_markers: true,
        }
    }
}

pub fn read_config_file(path: &Path) -> anyhow::Result<ConsoleConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Reading config file {}", path.display()))?;
    serde_yaml::from_str(&contents).with_context(|| format!("Parsing config file {}", path.display()))
}
