//! Logging setup based on `tracing`
//!
//! Log lines go to stderr so that analysis results written to stdout stay
//! machine readable.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Build the filter for the given verbosity flags
///
/// `verbose` wins over `quiet`. Without either flag `RUST_LOG` is honoured,
/// falling back to info level for this crate.
pub fn log_filter(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("gowalker=debug")
    } else if quiet {
        EnvFilter::new("gowalker=error")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("gowalker=info"))
    }
}

/// Initialize the global tracing subscriber
///
/// Must be called at most once per process.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .with_writer(std::io::stderr)
        .compact();

    tracing_subscriber::registry()
        .with(log_filter(verbose, quiet))
        .with(fmt_layer)
        .init();
}
