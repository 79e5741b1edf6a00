use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::warn;
use svms_shared_protocol::MapperConfig;

use crate::error::MapperResult;
use crate::{chirp, echo};

/// Reads a TOML configuration. Missing sections and fields take defaults.
pub fn load(path: impl AsRef<Path>) -> Result<MapperConfig> {
    let path = path.as_ref();
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let cfg: MapperConfig =
        toml::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
    Ok(cfg)
}

/// Like [`load`], but a missing file yields the default configuration.
pub fn load_or_default(path: impl AsRef<Path>) -> Result<MapperConfig> {
    let path = path.as_ref();
    if !path.exists() {
        warn!("config {} not found; using defaults", path.display());
        return Ok(MapperConfig::default());
    }
    load(path)
}

pub fn save(cfg: &MapperConfig, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let text = toml::to_string_pretty(cfg)?;
    fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// Checks the probe and detector sections.
pub fn validate(cfg: &MapperConfig) -> MapperResult<()> {
    chirp::validate(&cfg.chirp)?;
    echo::validate(&cfg.detector)?;
    Ok(())
}
