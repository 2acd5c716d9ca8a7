//! Logger set-up for the headless runner and tests.
//!
//! Everything in the crate logs through the `log` facade; this module only
//! installs the `env_logger` backend.
use env_logger::{Builder, Env};
use log::LevelFilter;

/// Initializes the global logger.
///
/// When `verbose` is `true`, ability lifecycle and ramp messages at debug
/// level are printed. Otherwise only info level and above are shown. An
/// explicit `RUST_LOG` always wins over both defaults.
pub fn init(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    install(level);
}

fn install(level: LevelFilter) {
    let env = Env::default().default_filter_or(level.to_string());
    let mut builder = Builder::from_env(env);
    builder.format_timestamp_millis();

    // `try_init` only fails if a logger was already set; tests call `init`
    // repeatedly.
    if builder.try_init().is_err() {
        log::debug!("logger already installed");
    }
}
