//! [`Config`]-related definitions.

use config::{builder::DefaultState, ConfigBuilder, ConfigError};
use serde::Deserialize;
use smart_default::SmartDefault;

#[cfg(doc)]
use crate::{Error, Invoker};

/// [`Invoker`] configuration.
#[derive(Clone, Copy, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Config {
    /// Indicator whether invoking no handlers fails with
    /// [`Error::NoHandlersRegistered`].
    #[default(false)]
    pub throw_on_empty_handlers: bool,
}

impl Config {
    /// Prefix of the environment variables overriding [`Config`] fields.
    pub const ENV_PREFIX: &'static str = "HANDLERS";

    /// Creates a new [`Config`] by:
    /// - loading it from the provided `path` (if any);
    /// - merging it with the environment variables (if any);
    /// - using default values for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(path: impl AsRef<str>) -> Result<Self, ConfigError> {
        ConfigBuilder::<DefaultState>::default()
            .add_source(config::File::with_name(path.as_ref()).required(false))
            .add_source(
                config::Environment::with_prefix(Self::ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod spec {
    use std::{env, fs, process};

    use super::Config;

    #[test]
    fn defaults() {
        assert!(!Config::default().throw_on_empty_handlers);
    }

    #[test]
    fn loads_from_file_and_env() {
        const VAR: &str = "HANDLERS_THROW_ON_EMPTY_HANDLERS";

        let dir = env::temp_dir().join(format!("handlers-{}", process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        let path = path.to_str().unwrap();

        let conf = Config::new(path).unwrap();
        assert!(!conf.throw_on_empty_handlers, "missing file uses defaults");

        fs::write(path, "throw_on_empty_handlers = true\n").unwrap();
        let conf = Config::new(path).unwrap();
        assert!(conf.throw_on_empty_handlers, "file is loaded");

        env::set_var(VAR, "false");
        let conf = Config::new(path);
        env::remove_var(VAR);
        assert!(!conf.unwrap().throw_on_empty_handlers, "env overrides file");

        fs::remove_dir_all(dir).unwrap();
    }
}
