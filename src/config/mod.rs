//! Configuration module for the CodexMind backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::errors::AppError;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the SQLite file backing the local store
    pub db_path: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Artificial delay applied by the mock content repositories
    pub simulated_latency: Duration,
    /// Quiet period used by search sessions
    pub search_debounce: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let db_path = env::var("CODEXMIND_DB_PATH")
            .unwrap_or_else(|_| "./data/codexmind.sqlite".to_string())
            .into();

        let bind_addr = env::var("CODEXMIND_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()
            .map_err(|e| AppError::BadRequest(format!("Invalid CODEXMIND_BIND_ADDR: {}", e)))?;

        let log_level = env::var("CODEXMIND_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let simulated_latency = millis_from_env("CODEXMIND_LATENCY_MS", 200)?;
        let search_debounce = millis_from_env("CODEXMIND_SEARCH_DEBOUNCE_MS", 300)?;

        Ok(Self {
            db_path,
            bind_addr,
            log_level,
            simulated_latency,
            search_debounce,
        })
    }
}

fn millis_from_env(name: &str, default: u64) -> Result<Duration, AppError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map(Duration::from_millis)
            .map_err(|e| AppError::BadRequest(format!("Invalid {}: {}", name, e))),
        Err(_) => Ok(Duration::from_millis(default)),
    }
}
