use anyhow::{Context, Result};
use directories::ProjectDirs;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::{RenderConfig, ShaderPaths, WindowConfig};
use crate::exercises::Exercise;

const CONFIG_FILE: &str = "trigl.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// One of `error`, `warn`, `info`, `debug`, `trace`.
    pub log_level: String,
    /// Exercises to run, in order.
    pub exercises: Vec<Exercise>,
    pub window: WindowConfig,
    pub render: RenderConfig,
    pub shaders: ShaderPaths,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            exercises: vec![Exercise::SeparatePrograms],
            window: WindowConfig::default(),
            render: RenderConfig::default(),
            shaders: ShaderPaths::default(),
        }
    }
}

impl AppConfig {
    /// Parses `log_level`, falling back to `Info` for unknown names.
    pub fn level_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }

    /// Loads the config at `path`, writing the defaults there first if the
    /// file does not exist yet.
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        if !path.exists() {
            let default_config = AppConfig::default();
            let toml_content = toml::to_string_pretty(&default_config)?;
            std::fs::write(path, toml_content)
                .with_context(|| format!("Failed to write default config to {:?}", path))?;
            return Ok(default_config);
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file {:?}", path))
    }
}

pub fn default_config_path() -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("com", "MetroManDevTeam", "trigl")
        .context("Couldn't determine project directory")?;
    Ok(proj_dirs.config_dir().join(CONFIG_FILE))
}
