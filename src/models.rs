//! Listing of the model definitions available on disk.
//!
//! A model is identified by the stem of a `.json` file (suffix matched
//! case-insensitively). Identifiers come back in directory enumeration order.

use std::fs;
use std::path::Path;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::error::Result;
use crate::settings::Settings;

lazy_static! {
    static ref MODEL_FILE: Regex = Regex::new(r"(?i)^(.+)\.json$").unwrap();
}

/// Stem of a model file name, if it is one.
pub fn model_name(file_name: &str) -> Option<&str> {
    MODEL_FILE.captures(file_name).and_then(|c| c.get(1)).map(|m| m.as_str())
}

pub fn list_models(dir: &Path) -> Result<Vec<String>> {
    let mut models = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let file_name = entry.file_name();
        // names that are not valid unicode cannot be model identifiers
        if let Some(name) = file_name.to_str().and_then(model_name) {
            models.push(name.to_string());
        }
    }
    debug!(dir = %dir.display(), count = models.len(), "listed models");
    Ok(models)
}

/// Models in the configured models directory.
pub fn model_list(settings: &Settings) -> Result<Vec<String>> {
    list_models(&settings.models_dir)
}
