// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};

use crate::config::model::ConfigFile;

/// Load a configuration file from a given path without semantic validation.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let path = path.as_ref();
    let contents =
        fs::read_to_string(path).with_context(|| format!("reading config file at {path:?}"))?;

    let config: ConfigFile = toml::from_str(&contents)
        .with_context(|| format!("parsing TOML config from {path:?}"))?;

    Ok(config)
}

/// Load and validate: the recommended entry point.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let config = load_from_path(&path)?;
    validate_config(&config)?;
    Ok(config)
}

/// Resolve configuration for the CLI.
///
/// An explicitly passed path must exist; with no path, the default file is
/// used when present and pure defaults otherwise.
pub fn load_or_default(path: Option<&Path>) -> Result<ConfigFile> {
    match path {
        Some(p) => load_and_validate(p),
        None => {
            let default = default_config_path();
            if default.exists() {
                load_and_validate(&default)
            } else {
                Ok(ConfigFile::default())
            }
        }
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("Labeljury.toml")
}

fn validate_config(cfg: &ConfigFile) -> Result<()> {
    if cfg.model.model.trim().is_empty() {
        return Err(anyhow!("[model].model must not be empty"));
    }
    if !(0.0..=2.0).contains(&cfg.model.temperature) {
        return Err(anyhow!(
            "[model].temperature must be within 0.0..=2.0 (got {})",
            cfg.model.temperature
        ));
    }
    for entry in &cfg.knowledge {
        if entry.name.trim().is_empty() {
            return Err(anyhow!("[[knowledge]] entries must have a non-empty name"));
        }
    }
    Ok(())
}
