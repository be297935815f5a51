use serde::{Deserialize, Serialize};

use super::platform;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub context: ContextConfig,
}

/// Where the recommendation service lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

/// Active-window-title integration for context-derived searches.
///
/// The client shells out to `title_command` (e.g. `xdotool getactivewindow
/// getwindowname` on X11) to read the title of the frontmost window. When
/// unset, the "match tab" feature reports itself as unavailable instead of
/// guessing.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ContextConfig {
    #[serde(default)]
    pub title_command: Option<String>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

fn default_base_url() -> String {
    // The reference recommendation service is a local Flask app on port 5000.
    "http://127.0.0.1:5000".to_string()
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            let config = Self::default();
            config.save()?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(&config_path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        platform::config_dir().join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.service.base_url, "http://127.0.0.1:5000");
        assert!(config.context.title_command.is_none());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [context]
            title_command = "xdotool getactivewindow getwindowname"
            "#,
        )
        .unwrap();
        assert_eq!(config.service.base_url, "http://127.0.0.1:5000");
        assert_eq!(
            config.context.title_command.as_deref(),
            Some("xdotool getactivewindow getwindowname")
        );
    }
}
