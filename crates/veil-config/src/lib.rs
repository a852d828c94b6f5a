use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use veil_core::{CharClass, DisplayMode, MASK_GLYPH};

/// User configuration for veil
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_glyph")]
    pub mask_glyph: char,

    #[serde(default)]
    pub display_mode: DisplayMode,

    /// Rules `veil mask` applies when none are given on the command line
    #[serde(default)]
    pub rules: Vec<CharClass>,

    #[serde(default)]
    pub copy: CopyConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CopyConfig {
    /// Put the export on the clipboard without `--copy`
    #[serde(default)]
    pub enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mask_glyph: default_glyph(),
            display_mode: DisplayMode::default(),
            rules: Vec::new(),
            copy: CopyConfig::default(),
        }
    }
}

fn default_glyph() -> char {
    MASK_GLYPH
}

impl Config {
    /// Load config from default location or create default if not found
    pub fn load() -> anyhow::Result<Self> {
        let path = Self::config_path();

        if path.exists() {
            Self::load_from(&path)
        } else {
            // Create default config file
            let config = Config::default();
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            config.save(&path)?;
            Ok(config)
        }
    }

    /// Load config from an explicit file
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get config file path
    pub fn config_path() -> PathBuf {
        if let Some(dirs) = directories::ProjectDirs::from("com", "veil", "veil") {
            dirs.config_dir().join("config.toml")
        } else {
            PathBuf::from("~/.veil/config.toml")
        }
    }
}
