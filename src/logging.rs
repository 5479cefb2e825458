//! Logger setup for native builds

/// Initializes the global logger.
///
/// `RUST_LOG` wins when set; otherwise `verbose` selects debug over info.
#[cfg(not(target_arch = "wasm32"))]
pub fn init(verbose: bool) {
    use env_logger::{Builder, Env};
    use log::LevelFilter;

    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let env = Env::default().default_filter_or(level.to_string());
    // Only fails if a logger is already installed
    let _ = Builder::from_env(env).try_init();
}

#[cfg(target_arch = "wasm32")]
pub fn init(_verbose: bool) {}
