//! Logging utilities for model_sync
//!
//! This module provides logging setup and configuration. Every
//! state-changing step (schema discovery, property updates and deletions,
//! file writes, registry writes) is narrated through tracing events.

use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::LoggingConfig;
use crate::error::{Error, Result};

/// Initialize logging based on configuration
pub fn init_logging(config: &Option<LoggingConfig>) -> Result<()> {
    let (level, json) = match config {
        Some(cfg) => {
            let level = match cfg.level.to_lowercase().as_str() {
                "trace" => Level::TRACE,
                "debug" => Level::DEBUG,
                "info" => Level::INFO,
                "warn" => Level::WARN,
                "error" => Level::ERROR,
                _ => Level::INFO,
            };
            (level, cfg.format.to_lowercase() == "json")
        }
        None => (Level::INFO, false),
    };

    let env_filter = EnvFilter::from_default_env()
        .add_directive(format!("model_sync={}", level).parse().unwrap());

    if json {
        let subscriber = fmt::Subscriber::builder()
            .json()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .finish();

        tracing::subscriber::set_global_default(subscriber)
            .map_err(|e| Error::ConfigError(e.to_string()))?;
    } else {
        let subscriber = fmt::Subscriber::builder()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .finish();

        tracing::subscriber::set_global_default(subscriber)
            .map_err(|e| Error::ConfigError(e.to_string()))?;
    }

    Ok(())
}
