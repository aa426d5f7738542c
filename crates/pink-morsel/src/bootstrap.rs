use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Map a `--log-level` name to an [`EnvFilter`] directive.
pub fn level_directive(log_level: &str) -> &'static str {
    match log_level.to_uppercase().as_str() {
        "DEBUG" => "debug",
        "WARNING" | "WARN" => "warn",
        "ERROR" | "CRITICAL" => "error",
        _ => "info",
    }
}

/// Where log lines end up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget<'a> {
    File(&'a Path),
    Stderr,
    /// No subscriber is installed.
    Off,
}

/// A log file always wins. Without one, stderr is used only when the
/// terminal is not owned by a full-screen view.
pub fn log_target(log_file: Option<&Path>, console: bool) -> LogTarget<'_> {
    match log_file {
        Some(path) => LogTarget::File(path),
        None if console => LogTarget::Stderr,
        None => LogTarget::Off,
    }
}

/// Initialise the global `tracing` subscriber for `target`.
///
/// Stderr output would be drawn over the dashboard's alternate screen, so
/// callers pass [`LogTarget::Off`] there unless a file was requested.
pub fn setup_logging(log_level: &str, target: LogTarget<'_>) -> anyhow::Result<()> {
    let filter = EnvFilter::new(level_directive(log_level));
    let registry = tracing_subscriber::registry().with(filter);

    match target {
        LogTarget::File(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let layer = fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file));
            registry.with(layer).try_init()?;
        }
        LogTarget::Stderr => {
            let layer = fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr);
            registry.with(layer).try_init()?;
        }
        LogTarget::Off => {}
    }

    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_level_directive_mapping() {
        assert_eq!(level_directive("DEBUG"), "debug");
        assert_eq!(level_directive("INFO"), "info");
        assert_eq!(level_directive("WARNING"), "warn");
        assert_eq!(level_directive("ERROR"), "error");
        assert_eq!(level_directive("CRITICAL"), "error");
        assert_eq!(level_directive("debug"), "debug");
        assert_eq!(level_directive("verbose"), "info");
    }

    #[test]
    fn test_log_target_selection() {
        let path = Path::new("pink-morsel.log");
        assert_eq!(log_target(Some(path), true), LogTarget::File(path));
        assert_eq!(log_target(Some(path), false), LogTarget::File(path));
        assert_eq!(log_target(None, true), LogTarget::Stderr);
        assert_eq!(log_target(None, false), LogTarget::Off);
    }

    #[test]
    fn test_setup_logging_off_installs_nothing() {
        setup_logging("DEBUG", LogTarget::Off).expect("logging off");
        tracing::warn!("goes nowhere");
    }

    #[test]
    fn test_setup_logging_writes_to_file() {
        let tmp = TempDir::new().expect("tempdir");
        let log_path = tmp.path().join("logs").join("pink-morsel.log");

        setup_logging("INFO", LogTarget::File(&log_path)).expect("logging setup");
        tracing::info!("hello from the log test");
        tracing::debug!("filtered out");

        let contents = std::fs::read_to_string(&log_path).expect("log file");
        assert!(contents.contains("hello from the log test"), "{contents}");
        assert!(!contents.contains("filtered out"), "{contents}");
    }
}
