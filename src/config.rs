use crate::error::AppError;
use std::env;
use std::path::PathBuf;

pub const DEFAULT_MIN_GAMES: usize = 5;
pub const DEFAULT_TOP_K: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub min_games: usize,
    pub top_k: usize,
    pub log_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            min_games: DEFAULT_MIN_GAMES,
            top_k: DEFAULT_TOP_K,
            log_path: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let min_games = parse_count(&lookup, "COMP_MIN_GAMES", DEFAULT_MIN_GAMES)?;
        let top_k = parse_count(&lookup, "COMP_TOP_K", DEFAULT_TOP_K)?;
        let log_path = lookup("COMP_LOG_PATH")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        Ok(Config {
            min_games,
            top_k,
            log_path,
        })
    }
}

fn parse_count<F>(lookup: &F, key: &str, default: usize) -> Result<usize, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse::<usize>().map_err(|_| {
            AppError::ConfigError(format!("{} must be a non-negative integer, got '{}'", key, raw))
        }),
        None => Ok(default),
    }
}
