//! Console Logging
//!
//! `log` facade sink. In the browser records go to `console.*`; native
//! builds route them through `tracing-subscriber`.

use log::LevelFilter;

#[cfg(target_arch = "wasm32")]
mod console {
    use log::{Level, Log, Metadata, Record};

    pub(super) struct ConsoleLogger;

    pub(super) static LOGGER: ConsoleLogger = ConsoleLogger;

    impl Log for ConsoleLogger {
        fn enabled(&self, metadata: &Metadata) -> bool {
            metadata.level() <= log::max_level()
        }

        fn log(&self, record: &Record) {
            if !self.enabled(record.metadata()) {
                return;
            }
            let line = format!("{} {}: {}", record.level(), record.target(), record.args());
            let value = wasm_bindgen::JsValue::from_str(&line);
            match record.level() {
                Level::Error => web_sys::console::error_1(&value),
                Level::Warn => web_sys::console::warn_1(&value),
                Level::Info => web_sys::console::info_1(&value),
                Level::Debug | Level::Trace => web_sys::console::log_1(&value),
            }
        }

        fn flush(&self) {}
    }
}

/// Browser: `console.*` sink. Err means a logger is already installed.
#[cfg(target_arch = "wasm32")]
fn install_sink() -> Result<(), String> {
    log::set_logger(&console::LOGGER).map_err(|e| e.to_string())
}

/// Native (tests, tooling): `log` records are bridged into a
/// `tracing-subscriber` fmt layer on stderr.
#[cfg(not(target_arch = "wasm32"))]
fn install_sink() -> Result<(), String> {
    tracing_subscriber::fmt()
        .with_max_level(tracing_subscriber::filter::LevelFilter::TRACE)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init()
        .map_err(|e| e.to_string())
}

/// Parses `trace|debug|info|warn|error|off`
pub fn parse_level(level: &str) -> Result<LevelFilter, String> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok(LevelFilter::Trace),
        "debug" => Ok(LevelFilter::Debug),
        "info" => Ok(LevelFilter::Info),
        "warn" | "warning" => Ok(LevelFilter::Warn),
        "error" => Ok(LevelFilter::Error),
        "off" => Ok(LevelFilter::Off),
        other => Err(format!(
            "unsupported log level `{other}`; expected trace|debug|info|warn|error|off"
        )),
    }
}

/// `debug` in debug builds, `info` otherwise
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

/// Installs the console sink. Safe to call more than once: later calls only
/// adjust the level.
pub fn init_logging(level: &str) -> Result<(), String> {
    let filter = parse_level(level)?;
    if let Err(err) = install_sink() {
        // already installed; keep it and only move the level
        log::trace!("[LOG] sink kept: {}", err);
    }
    log::set_max_level(filter);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level(" Warning "), Ok(LevelFilter::Warn));
        assert_eq!(parse_level("debug"), Ok(LevelFilter::Debug));
        assert!(parse_level("verbose").is_err());
    }

    #[test]
    fn test_init_is_idempotent() {
        assert!(init_logging("info").is_ok());
        assert!(init_logging("info").is_ok());
        assert!(init_logging("loud").is_err());
    }
}
