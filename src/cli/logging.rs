//! Diagnostic logging setup.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Maps the `-v` count to a default log level.
///
/// Warnings are always shown so converter diagnostics are not lost.
pub fn level_for(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Installs a stderr subscriber. `RUST_LOG` overrides the `-v` level.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init(verbose: u8) {
    let filter = EnvFilter::builder()
        .with_default_directive(level_for(verbose).into())
        .from_env_lossy();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_raises_level() {
        assert_eq!(level_for(0), LevelFilter::WARN);
        assert_eq!(level_for(1), LevelFilter::INFO);
        assert_eq!(level_for(2), LevelFilter::DEBUG);
        assert_eq!(level_for(7), LevelFilter::TRACE);
    }

    #[test]
    fn init_twice_does_not_panic() {
        init(0);
        init(3);
    }
}
