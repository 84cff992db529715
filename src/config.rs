use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::isolation::BoardConfig;

/// environment variable holding the path of an optional JSON config file
pub const CONFIG_PATH_VAR: &str = "ISOLATION_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// slice of every move budget that is never spent searching
    pub safety_margin_ms: u64,
    /// number of visited nodes between two clock checks
    pub poll_interval: u64,
    /// expected cost of the next depth relative to the last completed one
    pub next_depth_cost_factor: f64,
    pub max_depth: Option<u32>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            safety_margin_ms: 20,
            poll_interval: 64,
            next_depth_cost_factor: 2.0,
            max_depth: None,
        }
    }
}

impl SearchConfig {
    pub fn safety_margin(&self) -> Duration {
        Duration::from_millis(self.safety_margin_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TournamentConfig {
    pub time_limit_ms: u64,
    /// every round is played twice, with the agents swapping sides
    pub num_rounds: usize,
    /// random plies played before the agents take over
    pub opening_plies: u32,
    pub seed: Option<u64>,
    /// defaults to the number of cpus
    pub workers: Option<usize>,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            time_limit_ms: 150,
            num_rounds: 10,
            opening_plies: 2,
            seed: None,
            workers: None,
        }
    }
}

impl TournamentConfig {
    pub fn time_limit(&self) -> Duration {
        Duration::from_millis(self.time_limit_ms)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub board: BoardConfig,
    pub search: SearchConfig,
    pub tournament: TournamentConfig,
}

impl Config {
    pub fn from_json(json: &str, path: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })?;

        config.board.validate()?;

        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let display_path = path.display().to_string();

        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: display_path.clone(),
            source,
        })?;

        Self::from_json(&json, &display_path)
    }

    /// Config file named by `ISOLATION_CONFIG`, or the defaults if the variable is unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var(CONFIG_PATH_VAR) {
            Ok(path) => {
                log::info!("Loading config from {}", path);
                Self::load(Path::new(&path))
            }
            Err(_) => Ok(Self::default()),
        }
    }
}

/*====================================================================================================================*/

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = Config::from_json(
            r#"{ "board": { "width": 7 }, "search": { "safety_margin_ms": 5, "max_depth": 4 } }"#,
            "inline",
        )
        .unwrap();

        assert_eq!(config.board, BoardConfig { width: 7, height: 9 });
        assert_eq!(config.search.safety_margin(), Duration::from_millis(5));
        assert_eq!(config.search.max_depth, Some(4));
        assert_eq!(config.search.poll_interval, SearchConfig::default().poll_interval);
        assert_eq!(config.tournament, TournamentConfig::default());
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(
            Config::from_json(r#"{ "board": { "width": 20, "height": 20 } }"#, "inline"),
            Err(ConfigError::Dimensions { width: 20, height: 20 })
        ));
        assert!(matches!(
            Config::from_json("{ board", "inline"),
            Err(ConfigError::Parse { .. })
        ));
        assert!(matches!(
            Config::load(Path::new("/nonexistent/isolation.json")),
            Err(ConfigError::Read { .. })
        ));
    }

    #[test]
    fn test_errors_keep_their_cause() {
        use std::error::Error;

        let err = Config::load(Path::new("/nonexistent/isolation.json")).unwrap_err();
        assert!(err.source().unwrap().downcast_ref::<std::io::Error>().is_some());

        let err = Config::from_json("{ board", "inline").unwrap_err();
        assert!(err.source().unwrap().downcast_ref::<serde_json::Error>().is_some());
    }
}
