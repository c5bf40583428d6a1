//! Log subscriber setup

use tracing_subscriber::EnvFilter;

const LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Install the stderr subscriber.
///
/// `RUST_LOG` wins when set. Otherwise the configured level is raised one
/// step per `-v`.
pub fn init_logging(level: &str, verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(effective_level(level, verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .try_init();
}

/// Configured level raised by `verbose` steps, capped at `trace`.
pub fn effective_level(level: &str, verbose: u8) -> String {
    if verbose == 0 {
        return level.to_string();
    }

    let level = level.to_ascii_lowercase();
    let steps = usize::from(verbose);
    let raised = if level == "off" {
        steps - 1
    } else {
        match LEVELS.iter().position(|known| *known == level) {
            Some(index) => index + steps,
            None => return level,
        }
    };

    LEVELS[raised.min(LEVELS.len() - 1)].to_string()
}
