//! Explicit configuration for hosting applications.
//!
//! The engine never reads ambient state when it is brought into scope; a host
//! calls [`Settings::load`] exactly once and passes the values on. Defaults
//! are layered under an optional `multilevel.toml` next to the binary.

use config::{Config, File};
use serde::Deserialize;

use crate::error::{MultilevelError, Result};

#[derive(Deserialize, Clone, Debug)]
pub struct Settings {
    /// The package version, overridable by a release pipeline.
    pub version: String,
    /// Default tracing filter when RUST_LOG is not set.
    pub log_filter: String,
}

impl Settings {
    pub fn load() -> Result<Settings> {
        Self::load_from("multilevel")
    }
    /// Loads settings from `<name>.toml` when present, defaults otherwise.
    pub fn load_from(name: &str) -> Result<Settings> {
        Config::builder()
            .set_default("version", env!("CARGO_PKG_VERSION"))
            .map_err(config_error)?
            .set_default("log_filter", "info")
            .map_err(config_error)?
            .add_source(File::with_name(name).required(false))
            .build()
            .map_err(config_error)?
            .try_deserialize()
            .map_err(config_error)
    }
}

fn config_error(e: config::ConfigError) -> MultilevelError {
    MultilevelError::Config(e.to_string())
}
