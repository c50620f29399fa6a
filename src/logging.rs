//! Logger bootstrap.
//!
//! Starts a stderr `flexi_logger` backend exactly once per process. Repeat
//! calls with the same level are no-ops; a different level is rejected.
//! `RUST_LOG`, when set, overrides the level spec handed to the backend.

use anyhow::{anyhow, bail, Result};
use flexi_logger::{Logger, LoggerHandle};
use log::info;
use once_cell::sync::OnceCell;

static LOGGING_STATE: OnceCell<LoggingState> = OnceCell::new();

struct LoggingState {
    level: &'static str,
    _logger: LoggerHandle,
}

pub fn init_logging(level: &str) -> Result<()> {
    let normalized = normalize_level(level)?;

    let state = LOGGING_STATE.get_or_try_init(|| -> Result<LoggingState> {
        let logger = Logger::try_with_env_or_str(normalized)
            .map_err(|err| anyhow!("invalid log level `{}`: {}", normalized, err))?
            .log_to_stderr()
            .format(flexi_logger::default_format)
            .start()
            .map_err(|err| anyhow!("failed to start logger: {}", err))?;

        info!(
            "logging started level={} version={}",
            normalized,
            env!("CARGO_PKG_VERSION")
        );
        Ok(LoggingState {
            level: normalized,
            _logger: logger,
        })
    })?;

    if state.level != normalized {
        bail!(
            "logging already initialized with level `{}`; refusing to switch to `{}`",
            state.level,
            normalized
        );
    }
    Ok(())
}

/// Active level, if logging has been started
pub fn logging_level() -> Option<&'static str> {
    LOGGING_STATE.get().map(|state| state.level)
}

/// `debug` in debug builds, `info` otherwise
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn normalize_level(level: &str) -> Result<&'static str> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        other => bail!(
            "unsupported log level `{}`; expected trace|debug|info|warn|error",
            other
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_level() {
        assert_eq!(normalize_level(" INFO ").unwrap(), "info");
        assert_eq!(normalize_level("warning").unwrap(), "warn");
        assert!(normalize_level("verbose").is_err());
    }

    #[test]
    fn test_init_is_idempotent_per_level() {
        init_logging("warn").unwrap();
        init_logging("WARN").unwrap();
        assert_eq!(logging_level(), Some("warn"));
        assert!(init_logging("trace").is_err());
    }
}
