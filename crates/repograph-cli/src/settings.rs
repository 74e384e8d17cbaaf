use repograph_core::{ThemePreference, ViewMode};
use repograph_graph::{LayoutConfig, UsageResolver};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub theme: ThemePreference,
    pub default_mode: ViewMode,
    /// `none`, `heuristic` or `heuristic:<seed>`
    pub usage: String,
    pub pretty_output: bool,
    pub layout: LayoutConfig,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            theme: ThemePreference::System,
            default_mode: ViewMode::Structure,
            usage: "none".to_string(),
            pretty_output: false,
            layout: LayoutConfig::default(),
        }
    }
}

impl AppSettings {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("repograph").join("settings.json"))
    }

    pub fn load() -> Self {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => {
                tracing::info!("No config directory on this platform, using default settings");
                Self::default()
            }
        }
    }

    /// Read settings from `path`, falling back to defaults on any failure.
    pub fn load_from(path: &Path) -> Self {
        tracing::info!("Loading settings from {:?}", path);
        if !path.exists() {
            tracing::info!("Settings file not found, using defaults");
            return Self::default();
        }
        match std::fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(settings) => {
                    tracing::debug!("Settings loaded successfully: {:?}", settings);
                    return settings;
                }
                Err(e) => tracing::error!("Failed to parse settings: {}", e),
            },
            Err(e) => tracing::error!("Failed to read settings file: {}", e),
        }
        Self::default()
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(dir) = path.parent()
            && !dir.as_os_str().is_empty()
        {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Configured usage resolver; an invalid value degrades to `None`.
    pub fn usage_resolver(&self) -> UsageResolver {
        self.usage.parse().unwrap_or_else(|e| {
            tracing::error!("{}, usage metadata disabled", e);
            UsageResolver::None
        })
    }
}
