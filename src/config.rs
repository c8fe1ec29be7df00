/// User configuration loaded from `config.toml`.
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use tracing::info;

use crate::color::Rgb;
use crate::presets::Preset;

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub initial_color: Option<String>,
    pub sampler: SamplerConfig,
    pub log: LogConfig,
    #[serde(rename = "preset")]
    pub presets: Vec<PresetConfig>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct SamplerConfig {
    pub command: Option<String>,
    pub args: Vec<String>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PresetConfig {
    pub name: String,
    pub color: String,
}

impl Config {
    /// Parsed `initial_color`, already validated by [`load`].
    pub fn initial_color(&self) -> Option<Rgb> {
        self.initial_color.as_deref().and_then(|c| c.parse().ok())
    }

    pub fn user_presets(&self) -> Vec<Preset> {
        self.presets
            .iter()
            .filter_map(|p| {
                Some(Preset {
                    name: p.name.clone(),
                    color: p.color.parse().ok()?,
                })
            })
            .collect()
    }

    fn validate(&self) -> Result<()> {
        if let Some(color) = &self.initial_color {
            color
                .parse::<Rgb>()
                .with_context(|| format!("invalid initial_color '{color}'"))?;
        }
        for preset in &self.presets {
            if preset.name.trim().is_empty() {
                return Err(anyhow!("preset name must not be empty"));
            }
            preset
                .color
                .parse::<Rgb>()
                .with_context(|| format!("invalid color '{}' for preset '{}'", preset.color, preset.name))?;
        }
        Ok(())
    }
}

/// Returns the default config path inside the user's config directory.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("tonefit").join("config.toml"))
}

pub fn parse(text: &str) -> Result<Config> {
    let config: Config = toml::from_str(text)?;
    config.validate()?;
    Ok(config)
}

/// Load an explicit config file, or the default one if it exists.
pub fn load(explicit: Option<&Path>) -> Result<Config> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match default_config_path() {
            Some(path) if path.is_file() => path,
            _ => return Ok(Config::default()),
        },
    };
    let text = fs::read_to_string(&path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let config = parse(&text).with_context(|| format!("failed to parse {}", path.display()))?;
    info!(path = %path.display(), "loaded config");
    Ok(config)
}
