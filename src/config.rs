use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Shell command that streams generated text to stdout.
    /// `{prompt}` is replaced by the shell-quoted prompt.
    pub generator_command: String,
    pub strip_icon_suffix: bool,
    /// Icon stems whose `...Icon` suffix is never stripped
    pub keep_icon_stems: Vec<String>,
    /// Evaluate previews while text is still streaming
    pub preview_while_streaming: bool,
    pub tick_rate_ms: u64,
    pub show_errors: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            generator_command: String::new(),
            strip_icon_suffix: true,
            keep_icon_stems: Vec::new(),
            preview_while_streaming: true,
            tick_rate_ms: 100,
            show_errors: true,
        }
    }
}

impl Config {
    pub fn config_dir() -> Option<PathBuf> {
        let home = env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".genui-tui"))
    }

    fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.json"))
    }

    pub fn load() -> Option<Config> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Option<Config> {
        if !path.exists() {
            return None;
        }

        let contents = fs::read_to_string(path).ok()?;
        match serde_json::from_str(&contents) {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::warn!("Ignoring malformed config {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Save the config to disk
    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config path"))?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(dir) = path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;

        Ok(())
    }

    pub fn has_generator(&self) -> bool {
        !self.generator_command.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = Config {
            generator_command: "llm -m gpt {prompt}".to_string(),
            keep_icon_stems: vec!["Gear".to_string()],
            preview_while_streaming: false,
            ..Config::default()
        };
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path), Some(config));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "generator_command": "cat out.md" }"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.generator_command, "cat out.md");
        assert!(config.strip_icon_suffix);
        assert_eq!(config.tick_rate_ms, 100);
    }

    #[test]
    fn test_malformed_or_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        assert_eq!(Config::load_from(&path), None);

        fs::write(&path, "not json").unwrap();
        assert_eq!(Config::load_from(&path), None);
    }

    #[test]
    fn test_has_generator() {
        assert!(!Config::default().has_generator());
        let config = Config {
            generator_command: "  ".to_string(),
            ..Config::default()
        };
        assert!(!config.has_generator());
    }
}
