//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace};

fn builder() -> env_logger::Builder {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(log::LevelFilter::Info)
        .parse_default_env();
    builder
}

/// Initialize the logging system at `info`, overridable through `RUST_LOG`
pub fn init() {
    builder().init();
}

/// Like [`init`], but leaves an already installed logger in place
pub fn try_init() {
    let _ = builder().try_init();
}
