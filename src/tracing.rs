//! Tracing initialization.

use std::sync::Once;
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

static INIT: Once = Once::new();

/// Initialize tracing. Safe to call multiple times.
///
/// Logs go to stderr at `info` (or `debug` in unit tests and under nextest),
/// overridable through `RUST_LOG`. Set `DOCUMENTER_SEARCH_LOG_JSON=1` for JSON lines.
pub fn init() {
    INIT.call_once(|| {
        let is_test = cfg!(test) || std::env::var_os("NEXTEST").is_some();
        let filter = EnvFilter::from_default_env().add_directive(
            if is_test {
                tracing::Level::DEBUG
            } else {
                tracing::Level::INFO
            }
            .into(),
        );

        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_target(true)
            .with_span_events(FmtSpan::NONE);

        if is_test {
            // Another harness may already own the global subscriber
            let _ = builder.compact().with_test_writer().try_init();
        } else if std::env::var_os("DOCUMENTER_SEARCH_LOG_JSON").is_some() {
            if let Err(e) = builder.json().with_writer(std::io::stderr).try_init() {
                eprintln!("Failed to initialize tracing: {}", e);
            }
        } else if let Err(e) = builder.compact().with_writer(std::io::stderr).try_init() {
            eprintln!("Failed to initialize tracing: {}", e);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init();
        init();
        tracing::debug!("tracing initialized");
    }
}
