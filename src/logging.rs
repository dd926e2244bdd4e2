//! Logger initialization for the command-line front end
//!
//! The library itself only emits through the `log` facade; binaries decide
//! which backend receives the records.

use std::sync::Once;

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "warn",
/// "ui_resolver=debug").
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

impl LoggingConfig {
    /// Derive a filter from a `-v` count: 0 → warn, 1 → info, 2 → debug, 3+ → trace
    pub fn from_verbosity(verbose: u8) -> Self {
        let level = match verbose {
            0 => None,
            1 => Some("info"),
            2 => Some("debug"),
            _ => Some("trace"),
        };
        Self {
            env_filter: level.map(str::to_string),
            ..Self::default()
        }
    }
}

static INIT: Once = Once::new();

/// Initializes the global logger once; later calls are ignored.
///
/// An explicit filter wins over `RUST_LOG`. Without either, only warnings and
/// errors are printed so that failure placeholders still leave a trace.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Some(filter) = config.env_filter {
            builder.parse_filters(&filter);
        } else if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.filter_level(log::LevelFilter::Warn);
        }

        builder.write_style(config.write_style);
        builder.target(env_logger::Target::Stderr);

        if builder.try_init().is_err() {
            return;
        }

        log::debug!("logging initialized");
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(LoggingConfig::from_verbosity(0).env_filter, None);
        assert_eq!(LoggingConfig::from_verbosity(1).env_filter.as_deref(), Some("info"));
        assert_eq!(LoggingConfig::from_verbosity(5).env_filter.as_deref(), Some("trace"));
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init_logging(LoggingConfig::from_verbosity(2));
        init_logging(LoggingConfig::default());
    }
}
