use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    core::utils::{ensure_dir, write_atomic, PathResolver},
    errors::TrackerError,
};

pub const DEFAULT_DATE_FORMAT: &str = "%d %b %Y, %H:%M";

/// User preferences for the shell. Unknown or missing fields fall back to defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Literal prefix shown before amounts, e.g. `Rp`.
    pub currency_label: String,
    /// chrono format string used for every displayed timestamp.
    pub date_format: String,
    pub clear_screen: bool,
    /// Grants confirmations in script mode without `--yes`.
    pub assume_yes: bool,
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency_label: "Rp".into(),
            date_format: DEFAULT_DATE_FORMAT.into(),
            clear_screen: true,
            assume_yes: false,
            color: true,
        }
    }
}

impl Config {
    pub const KEYS: [&'static str; 5] = [
        "currency_label",
        "date_format",
        "clear_screen",
        "assume_yes",
        "color",
    ];

    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("currency_label", self.currency_label.clone()),
            ("date_format", self.date_format.clone()),
            ("clear_screen", self.clear_screen.to_string()),
            ("assume_yes", self.assume_yes.to_string()),
            ("color", self.color.to_string()),
        ]
    }

    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), TrackerError> {
        match key {
            "currency_label" => self.currency_label = value.trim().to_string(),
            "date_format" => {
                let format = value.trim();
                if format.is_empty() {
                    return Err(TrackerError::Config("date_format must not be empty".into()));
                }
                self.date_format = format.to_string();
            }
            "clear_screen" => self.clear_screen = parse_flag(key, value)?,
            "assume_yes" => self.assume_yes = parse_flag(key, value)?,
            "color" => self.color = parse_flag(key, value)?,
            other => {
                return Err(TrackerError::Config(format!(
                    "unknown key `{other}` (expected one of: {})",
                    Self::KEYS.join(", ")
                )))
            }
        }
        Ok(())
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool, TrackerError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        other => Err(TrackerError::Config(format!(
            "`{key}` expects true/false, got `{other}`"
        ))),
    }
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn with_base_dir(base: PathBuf) -> Result<Self, TrackerError> {
        ensure_dir(&PathResolver::config_dir_in(&base))?;
        Ok(Self {
            path: PathResolver::config_file_in(&base),
        })
    }

    pub fn load(&self) -> Result<Config, TrackerError> {
        if !self.path.exists() {
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        serde_json::from_str(&data).map_err(|err| {
            TrackerError::Config(format!("cannot parse `{}`: {err}", self.path.display()))
        })
    }

    pub fn save(&self, config: &Config) -> Result<(), TrackerError> {
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.path, &json)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_defaults_when_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        assert_eq!(manager.load().unwrap(), Config::default());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        let mut config = Config::default();
        config.set_value("currency_label", "IDR").unwrap();
        config.set_value("clear_screen", "off").unwrap();
        manager.save(&config).unwrap();
        assert_eq!(manager.load().unwrap(), config);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        fs::write(manager.path(), r#"{"assume_yes": true}"#).unwrap();
        let config = manager.load().unwrap();
        assert!(config.assume_yes);
        assert_eq!(config.currency_label, "Rp");
    }

    #[test]
    fn set_value_rejects_unknown_keys_and_bad_flags() {
        let mut config = Config::default();
        assert!(config.set_value("theme", "dark").is_err());
        assert!(config.set_value("color", "maybe").is_err());
        assert!(config.set_value("date_format", "  ").is_err());
    }
}
