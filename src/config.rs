use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::session::DEFAULT_FEEDBACK_DELAY;

/// Runtime settings for a quiz run.
#[derive(Debug, Clone)]
pub struct Config {
    /// How long answer feedback stays up before the next question.
    pub feedback_delay: Duration,
    /// Directory for the rolling log file.
    pub log_dir: PathBuf,
    /// `tracing` filter directive, from `RUST_LOG`.
    pub log_filter: String,
}

impl Config {
    pub fn new(feedback_delay: Duration, log_dir: PathBuf) -> Self {
        let log_filter = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        Self {
            feedback_delay,
            log_dir,
            log_filter,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_FEEDBACK_DELAY, PathBuf::from("logs"))
    }
}
