//! Configuration management.

mod settings;

pub use settings::{
    AppConfig, AppSettings, EngineSettings, FeedSettings, LoggingConfig, ModelSpec,
};

use config::{Config, ConfigError, Environment, File};
use std::path::Path;

/// Load configuration from an optional file and the environment.
///
/// Environment variables use the `ARENA` prefix with `__` as the section
/// separator, e.g. `ARENA__FEED__INTERVAL_SECS=30`.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();
    if let Some(path) = path {
        builder = builder.add_source(File::from(path).required(true));
    }
    let config = builder
        .add_source(
            Environment::with_prefix("ARENA")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    config.try_deserialize()
}
