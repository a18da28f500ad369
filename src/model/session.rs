//! Generation session: the accumulated text of the current generation

use crate::preview::extract::block_ranges;
use serde::{Deserialize, Serialize};
use std::process::Child;
use std::sync::atomic::AtomicBool;
use std::sync::mpsc::Receiver;
use std::sync::{Arc, Mutex};
use std::time::Instant;

/// Status of the upstream producer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GenerationStatus {
    #[default]
    Idle,
    Streaming,
    Done,
    Failed,
    Stopped,
}

impl GenerationStatus {
    pub fn label(&self) -> &'static str {
        match self {
            GenerationStatus::Idle => "idle",
            GenerationStatus::Streaming => "streaming",
            GenerationStatus::Done => "done",
            GenerationStatus::Failed => "failed",
            GenerationStatus::Stopped => "stopped",
        }
    }

    pub fn is_streaming(&self) -> bool {
        *self == GenerationStatus::Streaming
    }
}

/// Source text of one generation plus its producer status
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub prompt: String,
    pub text: String,
    pub status: GenerationStatus,
    /// Last error reported by the producer
    pub error: Option<String>,
    /// Bumped on every change to `text`
    pub revision: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a fixed text, as if a generation had completed
    pub fn from_text(text: String) -> Self {
        Self {
            text,
            status: GenerationStatus::Done,
            revision: 1,
            ..Self::default()
        }
    }

    /// Reset for a new generation of `prompt`
    pub fn begin(&mut self, prompt: &str) {
        self.prompt = prompt.to_string();
        self.text.clear();
        self.error = None;
        self.status = GenerationStatus::Streaming;
        self.revision += 1;
    }

    pub fn append_line(&mut self, line: &str) {
        self.text.push_str(line);
        self.text.push('\n');
        self.revision += 1;
    }

    /// Append a pasted chunk, separated from existing text by a newline
    pub fn append_chunk(&mut self, chunk: &str) {
        if chunk.is_empty() {
            return;
        }
        if !self.text.is_empty() && !self.text.ends_with('\n') {
            self.text.push('\n');
        }
        self.text.push_str(chunk);
        if self.status == GenerationStatus::Idle {
            self.status = GenerationStatus::Done;
        }
        self.revision += 1;
    }

    pub fn finish(&mut self, exit_code: Option<i32>) {
        if self.status != GenerationStatus::Streaming {
            return;
        }
        self.status = if exit_code == Some(0) {
            GenerationStatus::Done
        } else {
            self.error = Some(match exit_code {
                Some(code) => format!("Generator exited with status {}", code),
                None => "Generator was terminated".to_string(),
            });
            GenerationStatus::Failed
        };
    }

    pub fn fail(&mut self, error: String) {
        self.error = Some(error);
        self.status = GenerationStatus::Failed;
    }

    pub fn stop(&mut self) {
        if self.status == GenerationStatus::Streaming {
            self.status = GenerationStatus::Stopped;
        }
    }

    /// Replace the session with a finished generation from history
    pub fn restore(&mut self, prompt: &str, text: &str) {
        self.prompt = prompt.to_string();
        self.text = text.to_string();
        self.error = None;
        self.status = GenerationStatus::Done;
        self.revision += 1;
    }

    pub fn clear(&mut self) {
        self.prompt.clear();
        self.text.clear();
        self.error = None;
        self.status = GenerationStatus::Idle;
        self.revision += 1;
    }

    /// Replace the content of the `index`-th previewable block.
    ///
    /// Returns false when there is no such block.
    pub fn replace_block(&mut self, index: usize, code: &str) -> bool {
        let Some(range) = block_ranges(&self.text).into_iter().nth(index) else {
            return false;
        };

        let mut replacement = code.to_string();
        if !replacement.ends_with('\n') {
            replacement.push('\n');
        }
        self.text.replace_range(range, &replacement);
        self.revision += 1;
        true
    }
}

/// Message types sent from the generator thread
#[derive(Debug, Clone, PartialEq)]
pub enum JobMessage {
    Output(String),
    Completed(Option<i32>),
    Error(String),
}

/// A running generator process
pub struct BackgroundJob {
    pub receiver: Receiver<JobMessage>,
    pub start_instant: Instant,
    /// Set to ask the reader thread to kill the child
    pub cancel: Arc<AtomicBool>,
    /// Filled by the reader thread once the process is spawned
    pub child: Arc<Mutex<Option<Child>>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preview::extract_code_blocks;

    #[test]
    fn test_streaming_lifecycle() {
        let mut session = Session::new();
        session.begin("A login form");
        assert!(session.status.is_streaming());

        session.append_line("```tsx");
        session.append_line("function Login() {}");
        session.finish(Some(0));

        assert_eq!(session.status, GenerationStatus::Done);
        assert_eq!(session.text, "```tsx\nfunction Login() {}\n");
        assert_eq!(session.prompt, "A login form");
    }

    #[test]
    fn test_failed_exit_code_sets_error() {
        let mut session = Session::new();
        session.begin("x");
        session.finish(Some(2));

        assert_eq!(session.status, GenerationStatus::Failed);
        assert_eq!(session.error.as_deref(), Some("Generator exited with status 2"));
    }

    #[test]
    fn test_stop_only_while_streaming() {
        let mut session = Session::from_text("done".to_string());
        session.stop();
        assert_eq!(session.status, GenerationStatus::Done);

        session.begin("again");
        session.stop();
        session.finish(Some(0));
        assert_eq!(session.status, GenerationStatus::Stopped);
    }

    #[test]
    fn test_revision_tracks_text_changes() {
        let mut session = Session::new();
        let start = session.revision;
        session.append_chunk("hello");
        session.append_chunk("");
        assert_eq!(session.revision, start + 1);
        assert_eq!(session.status, GenerationStatus::Done);
    }

    #[test]
    fn test_append_chunk_separates_lines() {
        let mut session = Session::from_text("first".to_string());
        session.append_chunk("second");
        assert_eq!(session.text, "first\nsecond");
    }

    #[test]
    fn test_replace_block() {
        let mut session = Session::from_text(
            "One:\n```tsx\nconst A = () => <a />;\n```\nTwo:\n```jsx\nconst B = () => <b />;\n```\n"
                .to_string(),
        );

        assert!(session.replace_block(1, "const C = () => <Chip />;"));
        let blocks = extract_code_blocks(&session.text);
        assert_eq!(blocks[0].title, "A");
        assert_eq!(blocks[1].code, "const C = () => <Chip />;\n");
        assert!(session.text.ends_with("```\n"));

        assert!(!session.replace_block(5, "x"));
    }

    #[test]
    fn test_restore_bumps_revision() {
        let mut session = Session::from_text("old".to_string());
        session.fail("boom".to_string());
        session.restore("A navbar", "new");

        assert_eq!(session.revision, 2);
        assert_eq!(session.prompt, "A navbar");
        assert_eq!(session.text, "new");
        assert_eq!(session.status, GenerationStatus::Done);
        assert!(session.error.is_none());
    }

    #[test]
    fn test_clear() {
        let mut session = Session::from_text("text".to_string());
        session.clear();
        assert!(session.text.is_empty());
        assert_eq!(session.status, GenerationStatus::Idle);
    }
}
