use crate::selector::DateSelectorConfig;
use anyhow::{Context, Result, anyhow};
use dirs::home_dir;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Saved selector presets, stored in `~/.datebox/config.json`.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct Config {
    #[serde(default)]
    presets: BTreeMap<String, DateSelectorConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    default_preset: Option<String>,
}

impl Config {
    pub fn new() -> Self {
        Config::default()
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::get_config_file_path())
    }

    /// Loads from `path`, writing an empty config there first if it is missing.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            let config = Config::new();
            config.save_to(path)?;
            info!(path = %path.display(), "created empty config");
            return Ok(config);
        }

        let config_str = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config: Config = serde_json::from_str(&config_str)
            .with_context(|| format!("invalid config file {}", path.display()))?;
        debug!(presets = config.presets.len(), "loaded config");

        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::get_config_file_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure the config directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let config_str = serde_json::to_string_pretty(self)?;
        fs::write(path, config_str)?;
        Ok(())
    }

    pub fn add_preset(&mut self, name: &str, preset: DateSelectorConfig) -> Result<()> {
        if name.trim().is_empty() {
            return Err(anyhow!("Preset name must not be empty"));
        }
        self.presets.insert(name.to_string(), preset);
        Ok(())
    }

    pub fn get_preset(&self, name: &str) -> Option<&DateSelectorConfig> {
        self.presets.get(name)
    }

    pub fn list_presets(&self) -> Vec<String> {
        self.presets.keys().cloned().collect()
    }

    /// Removes a preset, clearing the default if it pointed at it.
    pub fn remove_preset(&mut self, name: &str) -> bool {
        let removed = self.presets.remove(name).is_some();
        if removed && self.default_preset.as_deref() == Some(name) {
            self.default_preset = None;
        }
        removed
    }

    pub fn default_preset(&self) -> Option<&str> {
        self.default_preset.as_deref()
    }

    pub fn set_default_preset(&mut self, name: &str) -> Result<()> {
        if !self.presets.contains_key(name) {
            return Err(anyhow!("Preset '{}' not found", name));
        }
        self.default_preset = Some(name.to_string());
        Ok(())
    }

    /// The named preset, else the default preset, else the built-in defaults.
    pub fn resolve(&self, name: Option<&str>) -> Result<DateSelectorConfig> {
        match name.or(self.default_preset.as_deref()) {
            Some(name) => self
                .get_preset(name)
                .cloned()
                .ok_or_else(|| anyhow!("Preset '{}' not found", name)),
            None => Ok(DateSelectorConfig::default()),
        }
    }

    pub fn get_config_dir() -> PathBuf {
        let mut config_dir = PathBuf::from(Self::get_home_dir());
        config_dir.push(".datebox");
        config_dir
    }

    pub fn get_config_file_path() -> PathBuf {
        Self::get_config_dir().join("config.json")
    }

    pub fn get_log_file_path() -> PathBuf {
        Self::get_config_dir().join("datebox.log")
    }

    fn get_home_dir() -> String {
        // Use the dirs crate for reliable cross-platform home directory detection
        home_dir()
            .map(|path| path.to_string_lossy().to_string())
            .unwrap_or_else(|| ".".to_string()) // Fallback to current directory
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::{MonthLabelMode, YearOrder, YearRange};
    use tempfile::TempDir;

    fn birthday_preset() -> DateSelectorConfig {
        DateSelectorConfig {
            month_labels: MonthLabelMode::WordedFull,
            year_range: YearRange::new(0, 100),
            year_order: YearOrder::Descending,
            ..Default::default()
        }
    }

    #[test]
    fn test_new_config() {
        let config = Config::new();
        assert!(config.list_presets().is_empty());
        assert!(config.default_preset().is_none());
    }

    #[test]
    fn test_config_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.json");

        let mut config = Config::new();
        config.add_preset("birthday", birthday_preset()).unwrap();
        config.set_default_preset("birthday").unwrap();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.get_preset("birthday"), Some(&birthday_preset()));
        assert_eq!(loaded.default_preset(), Some("birthday"));
    }

    #[test]
    fn test_config_default_creation() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");

        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert!(config.list_presets().is_empty());
    }

    #[test]
    fn test_load_partial_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(
            &path,
            r#"{"presets":{"short":{"month_labels":"worded_short"}}}"#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        let preset = config.get_preset("short").unwrap();
        assert_eq!(preset.month_labels, MonthLabelMode::WordedShort);
        assert_eq!(preset.year_range, YearRange::default());
    }

    #[test]
    fn test_load_invalid_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(&path, "not json").unwrap();

        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_add_preset_rejects_empty_name() {
        let mut config = Config::new();
        assert!(config.add_preset("  ", birthday_preset()).is_err());
    }

    #[test]
    fn test_list_presets() {
        let mut config = Config::new();
        config.add_preset("b", birthday_preset()).unwrap();
        config.add_preset("a", DateSelectorConfig::default()).unwrap();

        assert_eq!(config.list_presets(), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_remove_preset() {
        let mut config = Config::new();
        config.add_preset("birthday", birthday_preset()).unwrap();
        config.set_default_preset("birthday").unwrap();

        assert!(config.remove_preset("birthday"));
        assert!(config.list_presets().is_empty());
        assert!(config.default_preset().is_none());

        // Try to remove a non-existent preset
        assert!(!config.remove_preset("nonexistent"));
    }

    #[test]
    fn test_set_default_requires_existing_preset() {
        let mut config = Config::new();
        assert!(config.set_default_preset("missing").is_err());
    }

    #[test]
    fn test_resolve() {
        let mut config = Config::new();
        assert_eq!(config.resolve(None).unwrap(), DateSelectorConfig::default());
        assert!(config.resolve(Some("missing")).is_err());

        config.add_preset("birthday", birthday_preset()).unwrap();
        assert_eq!(config.resolve(Some("birthday")).unwrap(), birthday_preset());

        config.set_default_preset("birthday").unwrap();
        assert_eq!(config.resolve(None).unwrap(), birthday_preset());
    }
}
