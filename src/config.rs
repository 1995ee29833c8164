//! Runtime configuration for the terminal front-end, read once from the environment.

use std::env;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::core::EngineConfig;
use crate::types::DEFAULT_BOARD_SIZE;

/// Settings for one terminal session.
///
/// | variable             | meaning                                     | default        |
/// |----------------------|---------------------------------------------|----------------|
/// | `TUI2048_SIZE`       | board edge length                           | 4              |
/// | `TUI2048_SEED`       | RNG seed                                    | system clock   |
/// | `TUI2048_USER`       | user id stored with the game                | none           |
/// | `TUI2048_STATE_PATH` | resume from / save to this JSON file        | none           |
/// | `TUI2048_LOG_PATH`   | write logs to this file (`RUST_LOG` filter) | logging off    |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub size: usize,
    pub seed: u32,
    pub user_id: Option<String>,
    pub state_path: Option<PathBuf>,
    pub log_path: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable source. Unparseable numbers fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let size = non_empty("TUI2048_SIZE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_BOARD_SIZE);
        let seed = non_empty("TUI2048_SEED")
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(clock_seed);

        Self {
            size,
            seed,
            user_id: non_empty("TUI2048_USER"),
            state_path: non_empty("TUI2048_STATE_PATH").map(PathBuf::from),
            log_path: non_empty("TUI2048_LOG_PATH").map(PathBuf::from),
        }
    }

    pub fn engine_config(&self) -> EngineConfig {
        let config = EngineConfig::default()
            .with_size(self.size)
            .with_seed(self.seed);
        match &self.user_id {
            Some(user) => config.with_user(user.clone()),
            None => config,
        }
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ (d.as_secs() as u32))
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = AppConfig::from_lookup(lookup(&[]));
        assert_eq!(config.size, 4);
        assert_eq!(config.user_id, None);
        assert_eq!(config.state_path, None);
        assert_eq!(config.log_path, None);
    }

    #[test]
    fn reads_all_variables() {
        let config = AppConfig::from_lookup(lookup(&[
            ("TUI2048_SIZE", "5"),
            ("TUI2048_SEED", "77"),
            ("TUI2048_USER", "13123123123"),
            ("TUI2048_STATE_PATH", "/tmp/game.json"),
            ("TUI2048_LOG_PATH", " /tmp/2048.log "),
        ]));
        assert_eq!(config.size, 5);
        assert_eq!(config.seed, 77);
        assert_eq!(config.user_id.as_deref(), Some("13123123123"));
        assert_eq!(config.state_path, Some(PathBuf::from("/tmp/game.json")));
        assert_eq!(config.log_path, Some(PathBuf::from("/tmp/2048.log")));

        let engine = config.engine_config();
        assert_eq!(engine.size, 5);
        assert_eq!(engine.seed, 77);
        assert_eq!(engine.user_id.as_deref(), Some("13123123123"));
    }

    #[test]
    fn bad_numbers_fall_back() {
        let config = AppConfig::from_lookup(lookup(&[
            ("TUI2048_SIZE", "four"),
            ("TUI2048_SEED", "12"),
            ("TUI2048_USER", "   "),
        ]));
        assert_eq!(config.size, 4);
        assert_eq!(config.seed, 12);
        assert_eq!(config.user_id, None);
    }
}
