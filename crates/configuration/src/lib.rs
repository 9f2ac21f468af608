use crate::error::ConfigError;
use config::{Environment, File, FileFormat};
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::Config;

/// Prefix for environment overrides, e.g. `QUOTA__FUNNEL__ANNUAL_REVENUE_GOAL=750000`.
pub const ENV_PREFIX: &str = "QUOTA";

/// Loads and validates `config.toml` from the working directory, with `QUOTA__*`
/// environment variables layered on top.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from("config.toml")
}

/// Same as `load_config`, reading the given file instead.
pub fn load_config_from(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }
    tracing::debug!(path = %path.display(), "Loading configuration");

    let builder = config::Config::builder()
        .add_source(File::from(path).format(FileFormat::Toml))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    finish(builder)
}

/// Parses configuration from an in-memory TOML document. Environment variables are
/// not consulted.
pub fn config_from_toml(toml: &str) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(File::from_str(toml, FileFormat::Toml))
        .build()?;

    finish(builder)
}

fn finish(builder: config::Config) -> Result<Config, ConfigError> {
    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;
    Ok(config)
}

/// Command-line flag for picking the settings file.
#[cfg(feature = "clap")]
#[derive(Debug, Clone, clap::Args)]
pub struct ConfigArgs {
    /// Path to the TOML settings file.
    #[arg(long = "config", value_name = "PATH", default_value = "config.toml")]
    pub path: std::path::PathBuf,
}

#[cfg(feature = "clap")]
impl ConfigArgs {
    pub fn load(&self) -> Result<Config, ConfigError> {
        load_config_from(&self.path)
    }
}
