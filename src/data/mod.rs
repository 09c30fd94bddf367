//! Engine configuration and its RON loader

pub mod config;
pub mod loader;

pub use config::{ConfigError, EngineConfig};
pub use loader::{discover, export_default_config, load, load_or_default, parse};
