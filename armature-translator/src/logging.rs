//! Translator Logging
//!
//! Structured stderr logging controlled by the environment:
//!
//! - `ARMATURE_DEBUG=1` - Enable debug logging
//! - `ARMATURE_LOG_LEVEL=trace|debug|info|warn|error|off` - Set log level
//! - `ARMATURE_LOG_FORMAT=json|pretty|compact` - Set output format (default `json`)
//!
//! Lookups themselves never log; resource loading and language changes do.

use once_cell::sync::Lazy;
use std::env;
use std::io::Write;
use std::sync::atomic::{AtomicU8, Ordering};

/// Log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum Level {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
    Off = 5,
}

impl Level {
    /// Get level from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "trace" => Some(Level::Trace),
            "debug" => Some(Level::Debug),
            "info" => Some(Level::Info),
            "warn" | "warning" => Some(Level::Warn),
            "error" => Some(Level::Error),
            "off" | "none" => Some(Level::Off),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Trace => "TRACE",
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Off => "OFF",
        }
    }

    fn from_u8(value: u8) -> Self {
        match value {
            0 => Level::Trace,
            1 => Level::Debug,
            2 => Level::Info,
            3 => Level::Warn,
            4 => Level::Error,
            _ => Level::Off,
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Pretty,
    Compact,
    Json,
}

impl Format {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pretty" => Some(Format::Pretty),
            "compact" => Some(Format::Compact),
            "json" => Some(Format::Json),
            _ => None,
        }
    }
}

static LOG_LEVEL: AtomicU8 = AtomicU8::new(Level::Warn as u8);

static CONFIG: Lazy<LogConfig> = Lazy::new(LogConfig::from_env);

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: Level,
    pub format: Format,
}

impl LogConfig {
    /// Read `ARMATURE_*` variables and publish the level.
    pub fn from_env() -> Self {
        let debug = env::var("ARMATURE_DEBUG")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        let level = env::var("ARMATURE_LOG_LEVEL")
            .ok()
            .and_then(|s| Level::parse(&s))
            .unwrap_or(if debug { Level::Debug } else { Level::Warn });

        let format = env::var("ARMATURE_LOG_FORMAT")
            .ok()
            .and_then(|s| Format::parse(&s))
            .unwrap_or(Format::Json);

        LOG_LEVEL.store(level as u8, Ordering::SeqCst);

        Self { level, format }
    }
}

/// Initialize eagerly. Otherwise happens on the first enabled check.
pub fn init() {
    Lazy::force(&CONFIG);
}

/// Current log level.
pub fn current_level() -> Level {
    Lazy::force(&CONFIG);
    Level::from_u8(LOG_LEVEL.load(Ordering::Relaxed))
}

/// Override the level at runtime.
pub fn set_level(level: Level) {
    Lazy::force(&CONFIG);
    LOG_LEVEL.store(level as u8, Ordering::SeqCst);
}

#[inline]
pub fn is_level_enabled(level: Level) -> bool {
    level != Level::Off && level >= current_level()
}

#[doc(hidden)]
pub fn log(level: Level, target: &str, message: &str) {
    if !is_level_enabled(level) {
        return;
    }

    let line = match CONFIG.format {
        Format::Pretty => format!(
            "{} {:5} [{}] {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            level.as_str(),
            target,
            message
        ),
        Format::Compact => format!(
            "{} {} {}: {}",
            chrono::Local::now().format("%H:%M:%S"),
            level.as_str().chars().next().unwrap_or('?'),
            target,
            message
        ),
        Format::Json => json_line(level, target, message),
    };

    let _ = writeln!(std::io::stderr().lock(), "{}", line);
}

fn json_line(level: Level, target: &str, message: &str) -> String {
    serde_json::json!({
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "level": level.as_str(),
        "target": target,
        "message": message,
    })
    .to_string()
}

macro_rules! log_trace {
    ($($arg:tt)+) => {
        if $crate::logging::is_level_enabled($crate::logging::Level::Trace) {
            $crate::logging::log($crate::logging::Level::Trace, module_path!(), &format!($($arg)+));
        }
    };
}

macro_rules! log_debug {
    ($($arg:tt)+) => {
        if $crate::logging::is_level_enabled($crate::logging::Level::Debug) {
            $crate::logging::log($crate::logging::Level::Debug, module_path!(), &format!($($arg)+));
        }
    };
}

macro_rules! log_info {
    ($($arg:tt)+) => {
        if $crate::logging::is_level_enabled($crate::logging::Level::Info) {
            $crate::logging::log($crate::logging::Level::Info, module_path!(), &format!($($arg)+));
        }
    };
}

macro_rules! log_warn {
    ($($arg:tt)+) => {
        if $crate::logging::is_level_enabled($crate::logging::Level::Warn) {
            $crate::logging::log($crate::logging::Level::Warn, module_path!(), &format!($($arg)+));
        }
    };
}

macro_rules! log_error {
    ($($arg:tt)+) => {
        if $crate::logging::is_level_enabled($crate::logging::Level::Error) {
            $crate::logging::log($crate::logging::Level::Error, module_path!(), &format!($($arg)+));
        }
    };
}

// `warn` and friends collide with built-in attributes when imported directly
pub(crate) use {
    log_debug as debug, log_error as error, log_info as info, log_trace as trace,
    log_warn as warn,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering() {
        assert!(Level::Trace < Level::Debug);
        assert!(Level::Debug < Level::Info);
        assert!(Level::Info < Level::Warn);
        assert!(Level::Warn < Level::Error);
        assert!(Level::Error < Level::Off);
    }

    #[test]
    fn test_level_parse() {
        assert_eq!(Level::parse("debug"), Some(Level::Debug));
        assert_eq!(Level::parse("WARNING"), Some(Level::Warn));
        assert_eq!(Level::parse("none"), Some(Level::Off));
        assert_eq!(Level::parse("loud"), None);
    }

    #[test]
    fn test_format_parse() {
        assert_eq!(Format::parse("json"), Some(Format::Json));
        assert_eq!(Format::parse("Pretty"), Some(Format::Pretty));
        assert_eq!(Format::parse("xml"), None);
    }

    #[test]
    fn test_json_line() {
        let line = json_line(Level::Warn, "armature_translator::resolver", "say \"hi\"");
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();

        assert_eq!(value["level"], "WARN");
        assert_eq!(value["target"], "armature_translator::resolver");
        assert_eq!(value["message"], "say \"hi\"");
    }

    #[test]
    fn test_set_level() {
        let original = current_level();

        set_level(Level::Error);
        assert!(!is_level_enabled(Level::Warn));
        assert!(is_level_enabled(Level::Error));

        set_level(original);
    }

    #[test]
    fn test_macros_compile() {
        trace!("trace message");
        debug!("debug {}", 1);
        info!("info message");
        warn!("warn message");
        error!("error message");
    }
}
