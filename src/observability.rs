//! Observability hooks for the encoding selector.
//!
//! The selector runs once per commit cycle and quietly decides which wire
//! format to persist. This module makes that decision visible:
//! - `log_metric!` emits a structured key/value line through the `log` facade.
//!   It is wrapped in `#[cfg(debug_assertions)]`, so release builds compile it
//!   out entirely.
//! - `enable_verbose_logging` installs an `env_logger` backend for hosts that
//!   have not set one up themselves.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Once;

use log::LevelFilter;

/// Logs a structured key-value metric at `debug` level, only in debug builds.
///
/// # Example
/// ```
/// use offset_codec::log_metric;
/// let size_bytes = 6;
/// log_metric!("event" = "offset_encoding_selected", "size_bytes" = size_bytes);
/// ```
#[macro_export]
macro_rules! log_metric {
    ($($key:literal = $value:expr),+ $(,)?) => {
        #[cfg(debug_assertions)]
        {
            let mut parts = Vec::new();
            $(
                parts.push(format!("\"{}\": \"{}\"", $key, $value));
            )+

            log::debug!("OFFSET_CODEC_METRIC: {{ {} }}", parts.join(", "));
        }
    };
}

static INIT_LOGGER: Once = Once::new();

/// Installs a simple `[LEVEL] message` logger at `Info`, optionally appending
/// to `log_file`. Only the first call has any effect, and it is a no-op if the
/// host already installed a logger.
pub fn enable_verbose_logging(log_file: Option<PathBuf>) {
    INIT_LOGGER.call_once(|| {
        let mut builder = env_logger::Builder::new();

        builder.is_test(false);
        builder.filter_level(LevelFilter::Info);

        // Level and message only
        builder.format(|buf, record| {
            use std::io::Write;
            writeln!(buf, "[{}] {}", record.level(), record.args())?;
            buf.flush()?;
            Ok(())
        });

        let mut open_error = None;
        if let Some(path) = log_file {
            match OpenOptions::new().append(true).create(true).open(&path) {
                Ok(file) => {
                    builder.target(env_logger::Target::Pipe(Box::new(file)));
                }
                Err(e) => open_error = Some((path, e)),
            }
        }

        let _ = builder.try_init();

        if let Some((path, e)) = open_error {
            log::warn!(
                "Could not open log file {} ({}); logging to stderr instead",
                path.display(),
                e
            );
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enable_verbose_logging_is_idempotent() {
        enable_verbose_logging(None);
        enable_verbose_logging(None);
        log::info!("logger installed");
    }

    #[test]
    fn test_log_metric_accepts_display_values() {
        let encoding = crate::types::EncodingType::Bitset;
        log_metric!("event" = "test", "encoding" = encoding, "size_bytes" = 12usize,);
    }
}
