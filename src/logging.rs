//! Structured logging setup for the command line tool.
//!
//! The library only emits `tracing` events and spans; installing a
//! subscriber is left to the binary, which calls [`init_tracing`] once.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable that overrides the CLI log level.
pub const LOG_ENV: &str = "TRELLIS_LOG";

/// Initialize structured logging based on CLI arguments.
///
/// `RUST_LOG`, then `TRELLIS_LOG`, take precedence over the arguments.
/// Output goes to stderr so results on stdout stay machine-readable.
pub fn init_tracing(
    verbose: bool,
    log_level: Option<&str>,
    log_json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_from_env(LOG_ENV))
        .unwrap_or_else(|_| EnvFilter::new(directive(verbose, log_level)));

    let registry = tracing_subscriber::registry().with(filter);

    if log_json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_ansi(false)
                    .with_span_events(fmt::format::FmtSpan::NEW | fmt::format::FmtSpan::CLOSE),
            )
            .try_init()?;
    } else {
        registry
            .with(
                fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .try_init()?;
    }

    Ok(())
}

/// Filter directive for the given CLI arguments.
///
/// A bare level applies to this crate only; anything containing `=` is
/// passed through as a full directive.
fn directive(verbose: bool, log_level: Option<&str>) -> String {
    match (verbose, log_level) {
        (_, Some(level)) if level.contains('=') => level.to_string(),
        (_, Some(level)) => format!("trellis={level}"),
        (true, None) => "trellis=debug".to_string(),
        (false, None) => "trellis=warn".to_string(),
    }
}
