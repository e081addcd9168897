use crate::config::{self, LoggingConfig};
use anyhow::{anyhow, Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Environment variable holding a tracing filter expression
pub const LOG_ENV: &str = "INFRAPILOT_LOG";

/// `INFRAPILOT_LOG` wins, then the configured level. An invalid expression
/// falls back to `info` with a warning on stderr.
fn env_filter(logging: &LoggingConfig) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_env(LOG_ENV) {
        return filter;
    }
    match logging.level.parse::<EnvFilter>() {
        Ok(filter) => filter,
        Err(e) => {
            eprintln!(
                "WARN: log level '{}' is not a valid tracing filter ({}); falling back to 'info'",
                logging.level, e
            );
            EnvFilter::new("info")
        }
    }
}

/// Log to a daily rolling file, since the terminal belongs to the TUI.
/// Keep the returned guard alive until exit so buffered lines are flushed.
pub fn init_file(logging: &LoggingConfig) -> Result<WorkerGuard> {
    let dir = config::log_dir(logging);
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("could not create log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::daily(&dir, "infrapilot.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(logging))
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow!("could not install log subscriber: {}", e))?;

    tracing::info!(dir = %dir.display(), "logging initialised");
    Ok(guard)
}

/// Log to stderr for one-shot commands
pub fn init_stderr(logging: &LoggingConfig) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(logging))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("could not install log subscriber: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_level_falls_back() {
        let logging = LoggingConfig {
            level: "not[a=filter".to_string(),
            directory: None,
        };
        // Only meaningful when the override variable is unset
        if std::env::var(LOG_ENV).is_err() {
            assert_eq!(env_filter(&logging).to_string(), "info");
        }
    }

    #[test]
    fn test_configured_level_used() {
        let logging = LoggingConfig {
            level: "infrapilot=debug".to_string(),
            directory: None,
        };
        if std::env::var(LOG_ENV).is_err() {
            assert_eq!(env_filter(&logging).to_string(), "infrapilot=debug");
        }
    }
}
