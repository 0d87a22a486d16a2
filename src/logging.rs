//! Logger setup for the binary and tests.

use env_logger::{Builder, Env};
use log::{debug, LevelFilter};

/// Default filter used when `RUST_LOG` is unset.
///
/// Verbose mode raises this crate to `debug` so gravity flips and
/// interactions are visible without flooding the output with engine logs.
#[must_use]
pub fn default_filter(verbose: bool) -> String {
    if verbose {
        format!(
            "{}={},{}",
            env!("CARGO_CRATE_NAME"),
            LevelFilter::Debug,
            LevelFilter::Info
        )
    } else {
        LevelFilter::Info.to_string()
    }
}

/// Initializes the global logger.
///
/// `RUST_LOG` takes precedence over [`default_filter`].
pub fn init(verbose: bool) {
    let env = Env::default().default_filter_or(default_filter(verbose));
    let mut builder = Builder::from_env(env);

    // `try_init` only fails if a logger was already set, which is harmless
    // when tests call `init` repeatedly.
    if builder.try_init().is_err() {
        debug!("logger already initialised");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::quiet(false, "INFO")]
    #[case::verbose(true, "gravflip=DEBUG,INFO")]
    fn filter_matches_verbosity(#[case] verbose: bool, #[case] expected: &str) {
        assert_eq!(default_filter(verbose), expected);
    }

    #[rstest]
    fn init_is_idempotent() {
        init(false);
        init(true);
    }
}
