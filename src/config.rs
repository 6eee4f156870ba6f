use crate::constants::library::{DEFAULT_PROVIDER, DEFAULT_SHOW_TYPE, POSTER_CATEGORY};
use crate::domain::UpdateMode;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub library: LibraryConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub database_path: String,

    pub log_level: String,

    /// "text" or "json"
    pub log_format: String,

    /// Maximum database connections (default: 5)
    pub max_db_connections: u32,

    /// Minimum database connections (default: 1)
    pub min_db_connections: u32,

    /// Broadcast buffer for library notifications (default: 100)
    pub event_bus_buffer_size: usize,

    /// Pending requests the library actor will queue (default: 64)
    pub mailbox_size: usize,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            database_path: "sqlite:data/showlib.db".to_string(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            max_db_connections: 5,
            min_db_connections: 1,
            event_bus_buffer_size: 100,
            mailbox_size: 64,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryConfig {
    /// Type assigned to shows added without an explicit one.
    pub default_show_type: String,

    pub default_provider: String,

    /// Artwork categories tried, in order, when attaching an image.
    pub image_categories: Vec<String>,

    /// Enrichment mode used for add requests that do not name one.
    pub add_update_mode: UpdateMode,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            default_show_type: DEFAULT_SHOW_TYPE.to_string(),
            default_provider: DEFAULT_PROVIDER.to_string(),
            image_categories: vec![POSTER_CATEGORY.to_string()],
            add_update_mode: UpdateMode::Synchronous,
        }
    }
}

impl Config {
    /// Host entry point: the first config file found wins, defaults otherwise.
    pub fn load() -> Result<Self> {
        let paths = Self::config_paths();

        for path in &paths {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                return Self::load_from_path(path);
            }
        }

        info!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        info!("Config saved to: {}", path.display());
        Ok(())
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("showlib.toml")];

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("showlib").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".showlib").join("config.toml"));
        }

        paths
    }

    pub fn validate(&self) -> Result<()> {
        if self.general.database_path.trim().is_empty() {
            anyhow::bail!("Database path cannot be empty");
        }

        if self.general.event_bus_buffer_size == 0 || self.general.mailbox_size == 0 {
            anyhow::bail!("Event bus and mailbox sizes must be > 0");
        }

        if self.library.default_show_type.trim().is_empty() {
            anyhow::bail!("Default show type cannot be empty");
        }

        if self.library.default_provider.trim().is_empty() {
            anyhow::bail!("Default provider cannot be empty");
        }

        if self.library.image_categories.is_empty() {
            anyhow::bail!("At least one image category is required");
        }

        Ok(())
    }
}
