//! Data models for generation history persistence

use super::session::GenerationStatus;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Entries kept on disk, newest first
pub const MAX_HISTORY: usize = 50;

/// A single finished generation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerationEntry {
    pub timestamp: DateTime<Local>,
    pub prompt: String,
    pub status: GenerationStatus,
    pub text: String,
    pub duration_secs: f64,
    #[serde(default)]
    pub block_count: usize,
}

impl GenerationEntry {
    pub fn status_icon(&self) -> &str {
        match self.status {
            GenerationStatus::Streaming => "⏳",
            GenerationStatus::Done => "✓",
            GenerationStatus::Failed => "✗",
            GenerationStatus::Stopped => "■",
            GenerationStatus::Idle => "·",
        }
    }

    pub fn formatted_time(&self) -> String {
        self.timestamp.format("%H:%M:%S").to_string()
    }

    pub fn formatted_duration(&self) -> String {
        if self.duration_secs < 60.0 {
            format!("{:.1}s", self.duration_secs)
        } else {
            let mins = (self.duration_secs / 60.0).floor();
            let secs = self.duration_secs % 60.0;
            format!("{}m {:.0}s", mins, secs)
        }
    }

    /// Prompt text for list rows; pasted sessions have none
    pub fn display_prompt(&self) -> &str {
        if self.prompt.is_empty() {
            "(pasted text)"
        } else {
            &self.prompt
        }
    }
}

/// Wrapper for persisting generation history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationHistory {
    pub entries: Vec<GenerationEntry>,
}

impl GenerationHistory {
    fn history_dir() -> Option<PathBuf> {
        let home = env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".genui-tui"))
    }

    fn history_path() -> Option<PathBuf> {
        Self::history_dir().map(|dir| dir.join("history.json"))
    }

    pub fn load() -> Vec<GenerationEntry> {
        match Self::history_path() {
            Some(path) => Self::load_from(&path),
            None => Vec::new(),
        }
    }

    pub fn load_from(path: &Path) -> Vec<GenerationEntry> {
        if !path.exists() {
            return Vec::new();
        }

        let contents = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(_) => return Vec::new(),
        };

        match serde_json::from_str::<GenerationHistory>(&contents) {
            Ok(history) => history.entries,
            Err(e) => {
                tracing::warn!("Discarding unreadable history {}: {}", path.display(), e);
                Vec::new()
            }
        }
    }

    pub fn save(entries: &[GenerationEntry]) -> Result<(), String> {
        let history_path = Self::history_path().ok_or("Could not determine history path")?;
        Self::save_to(&history_path, entries)
    }

    pub fn save_to(path: &Path, entries: &[GenerationEntry]) -> Result<(), String> {
        if let Some(dir) = path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir)
                    .map_err(|e| format!("Failed to create history directory: {}", e))?;
            }
        }

        let history = GenerationHistory {
            entries: entries.to_vec(),
        };

        let json = serde_json::to_string_pretty(&history)
            .map_err(|e| format!("Failed to serialize history: {}", e))?;

        fs::write(path, json).map_err(|e| format!("Failed to write history file: {}", e))?;

        Ok(())
    }

    /// Insert `entry` as the newest and drop the oldest beyond the limit
    pub fn record(entries: &mut Vec<GenerationEntry>, entry: GenerationEntry) {
        entries.insert(0, entry);
        entries.truncate(MAX_HISTORY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(prompt: &str, duration_secs: f64) -> GenerationEntry {
        GenerationEntry {
            timestamp: Local::now(),
            prompt: prompt.to_string(),
            status: GenerationStatus::Done,
            text: "```tsx\nconst A = () => <a />;\n```".to_string(),
            duration_secs,
            block_count: 1,
        }
    }

    #[test]
    fn test_formatted_duration() {
        assert_eq!(entry("x", 4.3).formatted_duration(), "4.3s");
        assert_eq!(entry("x", 75.0).formatted_duration(), "1m 15s");
    }

    #[test]
    fn test_record_keeps_newest_first_and_caps() {
        let mut entries = Vec::new();
        for i in 0..(MAX_HISTORY + 5) {
            GenerationHistory::record(&mut entries, entry(&format!("prompt {}", i), 1.0));
        }

        assert_eq!(entries.len(), MAX_HISTORY);
        assert_eq!(entries[0].prompt, format!("prompt {}", MAX_HISTORY + 4));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        let entries = vec![entry("A dashboard card", 2.0), entry("", 1.0)];

        GenerationHistory::save_to(&path, &entries).unwrap();
        let loaded = GenerationHistory::load_from(&path);

        assert_eq!(loaded, entries);
        assert_eq!(loaded[1].display_prompt(), "(pasted text)");
    }

    #[test]
    fn test_load_ignores_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        fs::write(&path, "{").unwrap();

        assert!(GenerationHistory::load_from(&path).is_empty());
    }
}
