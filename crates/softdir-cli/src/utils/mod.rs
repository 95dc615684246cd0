//! Shared helpers for the CLI commands.
//!
//! - [`logging`]: tracing subscriber and color control
//! - [`settings`]: layering of config file, environment and flags

pub mod logging;
pub mod settings;

pub use logging::initialize_logging;
pub use settings::load_config;
