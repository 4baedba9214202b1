use env_logger::{Builder, Env};
use log::LevelFilter;

/// Initializes the global logger.
///
/// `--verbose` shows debug output from the engine, otherwise info and above.
/// `RUST_LOG` still takes precedence when set.
pub fn init(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let env = Env::default().default_filter_or(level.to_string());
    let _ = Builder::from_env(env).format_timestamp_millis().try_init();
}
