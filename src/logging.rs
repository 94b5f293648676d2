use tracing_subscriber::{EnvFilter, fmt};

/// Install the global subscriber.
///
/// Level comes from `RUST_LOG` (default "info"); `verbose` forces "debug".
/// Events go to stderr so stdout stays free for command output.
pub fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
