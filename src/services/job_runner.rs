//! Background job runner service
//!
//! Spawns the generator command and streams its stdout to the session.

use super::generator::PROMPT_ENV;
use crate::model::session::{BackgroundJob, JobMessage, Session};
use regex::Regex;
use std::io::{BufRead, BufReader, Read};
use std::process::{Child, Command, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Sender, TryRecvError};
use std::sync::{Arc, LazyLock, Mutex};
use std::thread;
use std::time::{Duration, Instant};

/// Regex to match ANSI escape codes
static ANSI_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1b\[[0-9;]*[a-zA-Z]").unwrap());

/// Strip ANSI escape codes from a string
fn strip_ansi_codes(s: &str) -> String {
    ANSI_REGEX.replace_all(s, "").to_string()
}

/// Job runner service for the generator command
pub struct JobRunner {
    /// Current background job (if any)
    job: Option<BackgroundJob>,
}

impl Default for JobRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl JobRunner {
    pub fn new() -> Self {
        Self { job: None }
    }

    pub fn is_running(&self) -> bool {
        self.job.is_some()
    }

    pub fn elapsed(&self) -> Option<Duration> {
        self.job.as_ref().map(|j| j.start_instant.elapsed())
    }

    /// Spawn `command` through the shell with the prompt in the environment
    pub fn spawn(&mut self, command: String, prompt: &str) {
        self.stop();

        let (tx, rx) = mpsc::channel();
        let cancel = Arc::new(AtomicBool::new(false));
        let child = Arc::new(Mutex::new(None));

        let thread_cancel = Arc::clone(&cancel);
        let thread_child = Arc::clone(&child);
        let prompt = prompt.to_string();
        thread::spawn(move || {
            Self::run_command(&command, &prompt, tx, thread_cancel, thread_child);
        });

        self.job = Some(BackgroundJob {
            receiver: rx,
            start_instant: Instant::now(),
            cancel,
            child,
        });
    }

    /// Drain pending output into `session`, returns true if there were updates.
    ///
    /// The job is released once it reports completion.
    pub fn poll(&mut self, session: &mut Session) -> bool {
        let Some(ref job) = self.job else {
            return false;
        };

        let mut had_updates = false;
        let mut finished = false;

        loop {
            match job.receiver.try_recv() {
                Ok(JobMessage::Output(line)) => {
                    had_updates = true;
                    if session.status.is_streaming() {
                        session.append_line(&strip_ansi_codes(&line));
                    }
                }
                Ok(JobMessage::Completed(exit_code)) => {
                    had_updates = true;
                    finished = true;
                    session.finish(exit_code);
                }
                Ok(JobMessage::Error(err)) => {
                    had_updates = true;
                    if session.status.is_streaming() {
                        session.fail(err);
                    }
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    finished = true;
                    if session.status.is_streaming() {
                        session.fail("Generator stopped unexpectedly".to_string());
                    }
                    break;
                }
            }
        }

        if finished {
            self.job = None;
        }
        had_updates
    }

    /// Ask the running generator to stop and kill its process
    pub fn stop(&mut self) {
        let Some(job) = self.job.take() else {
            return;
        };

        job.cancel.store(true, Ordering::SeqCst);
        // A held lock means the reader is already waiting on the exit
        if let Ok(mut slot) = job.child.try_lock() {
            if let Some(child) = slot.as_mut() {
                let _ = child.kill();
            }
        }
        tracing::info!("Generator stopped");
    }

    /// Run a shell command and send output through the channel
    fn run_command(
        command: &str,
        prompt: &str,
        tx: Sender<JobMessage>,
        cancel: Arc<AtomicBool>,
        child_slot: Arc<Mutex<Option<Child>>>,
    ) {
        #[cfg(target_os = "windows")]
        let result = Command::new("cmd")
            .args(["/C", command])
            .env(PROMPT_ENV, prompt)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn();

        #[cfg(not(target_os = "windows"))]
        let result = Command::new("sh")
            .args(["-c", command])
            .env(PROMPT_ENV, prompt)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn();

        let mut child = match result {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!("Failed to spawn generator: {}", e);
                let _ = tx.send(JobMessage::Error(e.to_string()));
                return;
            }
        };

        let stdout = child.stdout.take();
        let stderr_reader = child.stderr.take().map(|mut stderr| {
            thread::spawn(move || {
                let mut buf = String::new();
                let _ = stderr.read_to_string(&mut buf);
                buf
            })
        });

        if let Ok(mut slot) = child_slot.lock() {
            *slot = Some(child);
        }

        if let Some(stdout) = stdout {
            let reader = BufReader::new(stdout);
            for line in reader.lines().map_while(Result::ok) {
                if cancel.load(Ordering::SeqCst) || tx.send(JobMessage::Output(line)).is_err() {
                    break;
                }
            }
        }

        let exit_code = match child_slot.lock() {
            Ok(mut slot) => slot.as_mut().and_then(|child| {
                if cancel.load(Ordering::SeqCst) {
                    let _ = child.kill();
                }
                child.wait().ok().and_then(|s| s.code())
            }),
            Err(_) => None,
        };

        let stderr = stderr_reader
            .and_then(|handle| handle.join().ok())
            .unwrap_or_default();

        if exit_code != Some(0) && !stderr.trim().is_empty() {
            let _ = tx.send(JobMessage::Error(strip_ansi_codes(stderr.trim())));
        }
        let _ = tx.send(JobMessage::Completed(exit_code));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::GenerationStatus;

    fn drain(runner: &mut JobRunner, session: &mut Session) {
        let deadline = Instant::now() + Duration::from_secs(10);
        while runner.is_running() && Instant::now() < deadline {
            runner.poll(session);
            thread::sleep(Duration::from_millis(10));
        }
    }

    #[test]
    fn test_strip_ansi_codes() {
        assert_eq!(strip_ansi_codes("\x1b[32mok\x1b[0m"), "ok");
    }

    #[cfg(unix)]
    #[test]
    fn test_streams_stdout_into_session() {
        let mut runner = JobRunner::new();
        let mut session = Session::new();
        session.begin("card");

        runner.spawn("printf '```tsx\\n%s\\n```\\n' \"$GENUI_PROMPT\"".to_string(), "card");
        drain(&mut runner, &mut session);

        assert_eq!(session.status, GenerationStatus::Done);
        assert_eq!(session.text, "```tsx\ncard\n```\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_failed_command_reports_stderr() {
        let mut runner = JobRunner::new();
        let mut session = Session::new();
        session.begin("x");

        runner.spawn("echo 'model not found' >&2; exit 3".to_string(), "x");
        drain(&mut runner, &mut session);

        assert_eq!(session.status, GenerationStatus::Failed);
        assert_eq!(session.error.as_deref(), Some("model not found"));
    }

    #[test]
    fn test_poll_without_job() {
        let mut runner = JobRunner::new();
        let mut session = Session::new();
        assert!(!runner.poll(&mut session));
    }
}
