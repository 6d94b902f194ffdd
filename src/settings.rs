//! Runtime settings, layered from defaults, an optional `madcmd` config file
//! and `MADCMD_*` environment variables.

use std::path::PathBuf;

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::command::MAX_COMMAND_LENGTH;
use crate::error::Result;

/// Model definitions shipped with the package.
pub const DEFAULT_MODELS_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/models");

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub models_dir: PathBuf,
    /// Where result files requested from the engine are written.
    pub scratch_dir: PathBuf,
    pub max_command_length: usize,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            models_dir: PathBuf::from(DEFAULT_MODELS_DIR),
            scratch_dir: std::env::temp_dir(),
            max_command_length: MAX_COMMAND_LENGTH,
            log_filter: "info".to_string(),
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self> {
        Self::load_from("madcmd")
    }

    /// `name` is a config file path without extension; the file is optional.
    pub fn load_from(name: &str) -> Result<Self> {
        let defaults = Settings::default();
        let settings = Config::builder()
            .set_default("models_dir", defaults.models_dir.to_string_lossy().into_owned())?
            .set_default("scratch_dir", defaults.scratch_dir.to_string_lossy().into_owned())?
            .set_default("max_command_length", defaults.max_command_length as i64)?
            .set_default("log_filter", defaults.log_filter)?
            .add_source(File::with_name(name).required(false))
            .add_source(Environment::with_prefix("MADCMD"))
            .build()?;
        Ok(settings.try_deserialize()?)
    }
}
