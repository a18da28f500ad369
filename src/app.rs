//! Root application component
//!
//! The App struct implements the Component trait, acting as the root component
//! that delegates event handling and rendering to child components.
//! App coordinates the session, the generator job and the preview deck.

use crate::action::Action;
use crate::component::Component;
use crate::components::{
    draw_home_screen, CodeViewComponent, HelpDialog, HistoryDialog, HomeComponent,
    HomeRenderContext, PreviewComponent, PromptDialog, QuitDialog,
};
use crate::config::Config;
use crate::model::domain::DomainState;
use crate::model::history::{GenerationEntry, GenerationHistory};
use crate::model::modal::{Modal, ModalStack};
use crate::model::{FocusedPanel, Session};
use crate::preview::{extract_code_blocks, Pipeline};
use crate::services::{self, JobRunner};
use anyhow::{Context, Result};
use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, MouseEvent, MouseEventKind};
use ratatui::{layout::Rect, Frame};
use std::fs;
use std::path::PathBuf;

// ═══════════════════════════════════════════════════════════════════════════════
// App Struct
// ═══════════════════════════════════════════════════════════════════════════════

/// A block written to disk for the external editor
#[derive(Debug, Clone, PartialEq)]
pub struct PendingEdit {
    /// Index of the block in the session text
    pub index: usize,
    pub path: PathBuf,
}

/// Main application state - coordinates between components
pub struct App {
    /// Domain state (session, deck, history)
    pub domain: DomainState,

    /// Modal overlay stack
    pub modals: ModalStack,

    /// Background generator runner
    pub job_runner: JobRunner,

    /// Active settings
    pub config: Config,

    /// Normalizer and sandbox built from the config
    pub pipeline: Pipeline,

    /// Flag to indicate the app should quit
    pub should_quit: bool,

    /// Error message to display
    pub error: Option<String>,

    /// Status message to display
    pub status_message: Option<String>,

    /// Block waiting to be opened in $EDITOR (handled by main loop)
    pub pending_edit: Option<PendingEdit>,

    /// Write history changes to disk
    persist_history: bool,

    // ─────────────────────────────────────────────────────────────────────────
    // Child Components
    // ─────────────────────────────────────────────────────────────────────────
    pub home: HomeComponent,
    pub preview: PreviewComponent,
    pub code_view: CodeViewComponent,
    pub quit_dialog: QuitDialog,
    pub prompt_dialog: PromptDialog,
    pub history_dialog: HistoryDialog,
    pub help_dialog: HelpDialog,
}

// ═══════════════════════════════════════════════════════════════════════════════
// App Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl App {
    /// Create a new App with history loaded from disk
    pub fn new(config: Config) -> App {
        let mut app = Self::with_history(config, GenerationHistory::load());
        app.persist_history = true;
        app
    }

    /// Create an App with the given history that never writes to disk
    pub fn with_history(config: Config, history: Vec<GenerationEntry>) -> App {
        let mut domain = DomainState::new();
        domain.history = history;

        App {
            domain,
            modals: ModalStack::new(),
            job_runner: JobRunner::new(),
            pipeline: Pipeline::new(&config),
            config,
            should_quit: false,
            error: None,
            status_message: None,
            pending_edit: None,
            persist_history: false,
            home: HomeComponent::new(),
            preview: PreviewComponent::new(),
            code_view: CodeViewComponent::new(),
            quit_dialog: QuitDialog::default(),
            prompt_dialog: PromptDialog::default(),
            history_dialog: HistoryDialog::default(),
            help_dialog: HelpDialog::default(),
        }
    }

    /// Start from a finished text, such as a file given on the command line
    pub fn load_text(&mut self, text: String) {
        self.domain.session = Session::from_text(text);
        self.domain.deck.clear();
        self.sync_deck();
    }

    /// Whether previews may be evaluated right now
    fn evaluate_now(&self) -> bool {
        self.config.preview_while_streaming || !self.domain.session.status.is_streaming()
    }

    /// Re-extract blocks when the session text changed, then mount the active block
    fn sync_deck(&mut self) {
        let evaluate = self.evaluate_now();
        let session = &self.domain.session;

        if self.domain.is_stale() {
            self.domain
                .deck
                .sync(&session.text, session.revision, &self.pipeline, evaluate);
            if !evaluate {
                self.domain.deck.invalidate();
            }
        } else if evaluate {
            self.domain.deck.mount_active(&self.pipeline);
        }
    }


    /// Start a generation for `prompt`
    fn start_generation(&mut self, prompt: &str) {
        if !self.config.has_generator() {
            self.error = Some(
                "No generator command configured. Set generator_command in the config or pass --command"
                    .to_string(),
            );
            return;
        }
        if self.job_runner.is_running() {
            self.stop_generation();
        }

        let (command, display_command) =
            services::build_generator_command(&self.config.generator_command, prompt);
        tracing::info!("Starting generation: {}", display_command);

        self.error = None;
        self.status_message = None;
        self.domain.session.begin(prompt);
        self.domain.deck.clear();
        self.job_runner.spawn(command, prompt);
        self.sync_deck();
    }

    /// Stop the running generator and record what it produced so far
    fn stop_generation(&mut self) {
        let Some(elapsed) = self.job_runner.elapsed() else {
            return;
        };
        self.job_runner.stop();
        self.domain.session.stop();
        self.record_generation(elapsed.as_secs_f64());
        self.status_message = Some("Generation stopped".to_string());
    }

    /// Drain generator output; records the session once the generator exits
    fn poll_generator(&mut self) {
        let elapsed = self.job_runner.elapsed();
        self.job_runner.poll(&mut self.domain.session);

        if let (Some(elapsed), false) = (elapsed, self.job_runner.is_running()) {
            let session = &self.domain.session;
            tracing::info!(
                "Generation finished: {} ({} bytes)",
                session.status.label(),
                session.text.len()
            );
            self.record_generation(elapsed.as_secs_f64());
        }
    }

    /// Save the current session to history
    fn record_generation(&mut self, duration_secs: f64) {
        let session = &self.domain.session;
        if session.text.trim().is_empty() {
            return;
        }

        let entry = GenerationEntry {
            timestamp: Local::now(),
            prompt: session.prompt.clone(),
            status: session.status,
            text: session.text.clone(),
            duration_secs,
            block_count: extract_code_blocks(&session.text).len(),
        };
        GenerationHistory::record(&mut self.domain.history, entry);

        if self.persist_history {
            if let Err(e) = GenerationHistory::save(&self.domain.history) {
                tracing::warn!("Failed to save history: {}", e);
            }
        }
    }

    fn copy_active_code(&mut self) {
        let Some(block) = self.domain.deck.active_block() else {
            self.status_message = Some("No code block to copy".to_string());
            return;
        };

        match services::copy_to_clipboard(&block.code) {
            Ok(()) => {
                self.status_message = Some(format!("Copied {} to the clipboard", block.title));
            }
            Err(e) => {
                tracing::warn!("Clipboard copy failed: {:#}", e);
                self.error = Some(format!("{:#}", e));
            }
        }
    }

    /// Write the active block to a temp file for the main loop to open
    fn prepare_edit(&mut self) -> Result<()> {
        if self.domain.session.status.is_streaming() {
            self.status_message = Some("Wait for the generation to finish before editing".to_string());
            return Ok(());
        }
        let Some(block) = self.domain.deck.active_block() else {
            self.status_message = Some("No code block to edit".to_string());
            return Ok(());
        };

        let index = self.domain.deck.active;
        let path = std::env::temp_dir().join(format!(
            "genui-{}-block-{}.tsx",
            std::process::id(),
            index + 1
        ));
        fs::write(&path, &block.code)
            .with_context(|| format!("Failed to write {}", path.display()))?;

        self.pending_edit = Some(PendingEdit { index, path });
        Ok(())
    }

    /// Splice the edited file back into the session
    pub fn finish_edit(&mut self, edit: PendingEdit) -> Result<()> {
        let code = fs::read_to_string(&edit.path)
            .with_context(|| format!("Failed to read {}", edit.path.display()))?;
        if let Err(e) = fs::remove_file(&edit.path) {
            tracing::debug!("Could not remove {}: {}", edit.path.display(), e);
        }

        let unchanged = self
            .domain
            .deck
            .blocks
            .get(edit.index)
            .is_some_and(|block| block.code == code);
        if unchanged {
            self.status_message = Some("Block unchanged".to_string());
            return Ok(());
        }

        if self.domain.session.replace_block(edit.index, &code) {
            tracing::info!("Replaced block {} from editor", edit.index + 1);
            self.sync_deck();
            self.status_message = Some("Block updated".to_string());
        } else {
            self.error = Some("The edited block no longer exists".to_string());
        }
        Ok(())
    }

    fn clear_session(&mut self) {
        if self.job_runner.is_running() {
            self.stop_generation();
        }
        self.domain.session.clear();
        self.domain.deck.clear();
        self.sync_deck();
        self.error = None;
        self.status_message = Some("Session cleared".to_string());
    }

    fn restore_history(&mut self) {
        let Some(entry) = self.domain.history.get(self.history_dialog.selected_index).cloned()
        else {
            return;
        };
        if self.job_runner.is_running() {
            self.stop_generation();
        }

        self.domain.session.restore(&entry.prompt, &entry.text);
        self.sync_deck();
        self.modals.pop();
        self.error = None;
        self.status_message = Some(format!("Restored: {}", entry.display_prompt()));
    }

    /// Mirror the prompt dialog into its modal entry
    fn sync_prompt_modal(&mut self) {
        if let Some(Modal::Prompt {
            input,
            selected_example,
        }) = self.modals.top_mut()
        {
            input.clone_from(&self.prompt_dialog.input);
            *selected_example = self.prompt_dialog.selected_example;
        }
    }

    /// Route a scroll action to whatever is on top
    fn scroll(&mut self, action: Action) -> Result<()> {
        match self.modals.top() {
            Some(Modal::History { .. }) => {
                self.history_dialog.update(action)?;
                let detail_scroll = self.history_dialog.detail_scroll;
                if let Some(Modal::History {
                    detail_scroll: scroll,
                    ..
                }) = self.modals.top_mut()
                {
                    *scroll = detail_scroll;
                }
            }
            Some(Modal::Fullscreen) => {
                self.preview.update(action)?;
            }
            Some(_) => {}
            None => match self.home.focus {
                FocusedPanel::Preview => {
                    self.preview.update(action)?;
                }
                FocusedPanel::Code => {
                    self.code_view.update(action)?;
                }
            },
        }
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for App {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        // Esc dismisses messages when no modal is open
        if key.code == KeyCode::Esc
            && self.modals.is_empty()
            && (self.error.is_some() || self.status_message.is_some())
        {
            self.error = None;
            self.status_message = None;
            return Ok(None);
        }

        if let Some(modal) = self.modals.top().cloned() {
            self.handle_modal_key_event(&modal, key)
        } else {
            self.home.handle_key_event(key)
        }
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        let action = match mouse.kind {
            MouseEventKind::ScrollDown => Some(Action::ScrollDown),
            MouseEventKind::ScrollUp => Some(Action::ScrollUp),
            _ => None,
        };
        Ok(action)
    }

    fn handle_paste(&mut self, text: &str) -> Result<Option<Action>> {
        match self.modals.top() {
            Some(Modal::Prompt { .. }) => {
                self.prompt_dialog.handle_paste(text)?;
                self.sync_prompt_modal();
                Ok(None)
            }
            Some(_) => Ok(None),
            None => Ok(Some(Action::Paste(text.to_string()))),
        }
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            // ─────────────────────────────────────────────────────────────────
            // App Lifecycle
            // ─────────────────────────────────────────────────────────────────
            Action::Tick => {
                self.poll_generator();
                self.sync_deck();
            }
            Action::ForceQuit => {
                if self.job_runner.is_running() {
                    self.stop_generation();
                }
                self.should_quit = true;
            }
            Action::Resize(_, _) => {}

            // ─────────────────────────────────────────────────────────────────
            // Tabs
            // ─────────────────────────────────────────────────────────────────
            Action::NextTab => {
                let evaluate = self.evaluate_now();
                self.domain.deck.next(&self.pipeline, evaluate);
            }
            Action::PrevTab => {
                let evaluate = self.evaluate_now();
                self.domain.deck.previous(&self.pipeline, evaluate);
            }
            Action::SelectTab(index) => {
                let evaluate = self.evaluate_now();
                self.domain.deck.select(index, &self.pipeline, evaluate);
            }

            // ─────────────────────────────────────────────────────────────────
            // Scrolling
            // ─────────────────────────────────────────────────────────────────
            Action::ScrollUp | Action::ScrollDown | Action::PageUp | Action::PageDown => {
                self.scroll(action)?;
            }
            Action::SwitchFocus => {
                self.home.update(action)?;
            }

            // ─────────────────────────────────────────────────────────────────
            // View Toggles
            // ─────────────────────────────────────────────────────────────────
            Action::ToggleCodeView => self.code_view.toggle_code_view_mode(),
            Action::ToggleFullscreen => {
                if self.domain.deck.active_block().is_some() {
                    self.modals.toggle(Modal::Fullscreen);
                } else if self.modals.top() == Some(&Modal::Fullscreen) {
                    self.modals.pop();
                }
            }

            // ─────────────────────────────────────────────────────────────────
            // Modals
            // ─────────────────────────────────────────────────────────────────
            Action::OpenQuitDialog => {
                self.quit_dialog.generation_running = self.job_runner.is_running();
                self.modals.push(Modal::QuitConfirm);
            }
            Action::OpenPrompt => {
                self.prompt_dialog.reset();
                self.modals.push(Modal::Prompt {
                    input: String::new(),
                    selected_example: 0,
                });
            }
            Action::SubmitPrompt(prompt) => {
                self.modals.pop();
                self.start_generation(&prompt);
            }
            Action::OpenHistory => {
                self.history_dialog.reset();
                self.modals.toggle(Modal::History {
                    selected_index: 0,
                    detail_scroll: 0,
                });
            }
            Action::RestoreHistory => self.restore_history(),
            Action::OpenHelp => {
                self.help_dialog.scroll_offset = 0;
                self.modals.push(Modal::Help { scroll_offset: 0 });
            }
            Action::CloseModal => {
                self.modals.pop();
            }
            Action::ModalUp | Action::ModalDown => match self.modals.top() {
                Some(Modal::Prompt { .. }) => {
                    self.prompt_dialog.update(action)?;
                    self.sync_prompt_modal();
                }
                Some(Modal::History { .. }) => {
                    // Clamp before incrementing
                    let max = self.domain.history.len().saturating_sub(1);
                    if action == Action::ModalUp || self.history_dialog.selected_index < max {
                        self.history_dialog.update(action)?;
                    }
                    let selected = self.history_dialog.selected_index;
                    if let Some(Modal::History { selected_index, .. }) = self.modals.top_mut() {
                        *selected_index = selected;
                    }
                }
                _ => {}
            },

            // ─────────────────────────────────────────────────────────────────
            // Session
            // ─────────────────────────────────────────────────────────────────
            Action::CopyCode => self.copy_active_code(),
            Action::Paste(text) => {
                if self.job_runner.is_running() {
                    self.status_message =
                        Some("Stop the running generation before pasting".to_string());
                } else {
                    self.domain.session.append_chunk(&text);
                    self.sync_deck();
                    self.record_generation(0.0);
                    self.status_message =
                        Some(format!("Pasted {} line(s)", text.lines().count()));
                }
            }
            Action::StopGeneration => {
                if self.job_runner.is_running() {
                    self.stop_generation();
                }
            }
            Action::ClearSession => self.clear_session(),

            // ─────────────────────────────────────────────────────────────────
            // Editor
            // ─────────────────────────────────────────────────────────────────
            Action::OpenEditor => {
                if let Err(e) = self.prepare_edit() {
                    self.error = Some(format!("{:#}", e));
                }
            }
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let ctx = HomeRenderContext {
            session: &self.domain.session,
            deck: &self.domain.deck,
            pipeline: &self.pipeline,
            show_errors: self.config.show_errors,
            elapsed: self.job_runner.elapsed(),
            error: self.error.as_deref(),
            status_message: self.status_message.as_deref(),
        };

        draw_home_screen(
            frame,
            area,
            &mut self.home,
            &mut self.preview,
            &mut self.code_view,
            &ctx,
        )?;

        // Draw modal overlay if active
        if let Some(modal) = self.modals.top().cloned() {
            self.draw_modal(frame, area, &modal)?;
        }
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Helper Methods
// ═══════════════════════════════════════════════════════════════════════════════

impl App {
    fn handle_modal_key_event(&mut self, modal: &Modal, key: KeyEvent) -> Result<Option<Action>> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.handle_key_event(key),
            Modal::Prompt { .. } => {
                let action = self.prompt_dialog.handle_key_event(key)?;
                self.sync_prompt_modal();
                Ok(action)
            }
            Modal::History { .. } => self.history_dialog.handle_key_event(key),
            Modal::Help { .. } => self.help_dialog.handle_key_event(key),
            Modal::Fullscreen => {
                let action = match key.code {
                    KeyCode::Esc | KeyCode::Char('f') | KeyCode::Char('q') => {
                        Some(Action::CloseModal)
                    }
                    KeyCode::Char('j') | KeyCode::Down => Some(Action::ScrollDown),
                    KeyCode::Char('k') | KeyCode::Up => Some(Action::ScrollUp),
                    KeyCode::PageDown => Some(Action::PageDown),
                    KeyCode::PageUp => Some(Action::PageUp),
                    KeyCode::Tab => Some(Action::NextTab),
                    KeyCode::BackTab => Some(Action::PrevTab),
                    KeyCode::Char('y') => Some(Action::CopyCode),
                    _ => None,
                };
                Ok(action)
            }
        }
    }

    fn draw_modal(&mut self, frame: &mut Frame, area: Rect, modal: &Modal) -> Result<()> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.draw(frame, area)?,
            Modal::Prompt { .. } => self.prompt_dialog.draw(frame, area)?,
            Modal::History { .. } => {
                self.history_dialog
                    .draw_with_history(frame, area, &self.domain.history)?;
            }
            Modal::Help { .. } => self.help_dialog.draw(frame, area)?,
            Modal::Fullscreen => {
                let title = self
                    .domain
                    .deck
                    .active_block()
                    .map_or_else(String::new, |block| block.title.clone());
                self.preview.draw_fullscreen(frame, area, &title);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GenerationStatus, PreviewOutcome};

    const TWO_BLOCKS: &str = "Here are two:\n```tsx\nexport default function Pricing() {\n  return <Card><Typography>$9</Typography></Card>;\n}\n```\n\
                              And a broken one:\n```tsx\nconst Broken = () => <Nowhere />;\n```\n";

    fn app() -> App {
        App::with_history(Config::default(), Vec::new())
    }

    #[test]
    fn test_load_text_mounts_first_block() {
        let mut app = app();
        app.load_text(TWO_BLOCKS.to_string());

        assert_eq!(app.domain.deck.blocks.len(), 2);
        let mounted = app.domain.deck.active_preview().unwrap();
        assert!(matches!(mounted.outcome, PreviewOutcome::Rendered(_)));
    }

    #[test]
    fn test_tab_navigation() {
        let mut app = app();
        app.load_text(TWO_BLOCKS.to_string());

        app.update(Action::NextTab).unwrap();
        assert_eq!(app.domain.deck.active, 1);
        assert!(app.domain.deck.active_preview().unwrap().error().is_some());

        app.update(Action::NextTab).unwrap();
        assert_eq!(app.domain.deck.active, 0);
        app.update(Action::PrevTab).unwrap();
        assert_eq!(app.domain.deck.active, 1);

        app.update(Action::SelectTab(7)).unwrap();
        assert_eq!(app.domain.deck.active, 1);
    }

    #[test]
    fn test_paste_appends_and_records() {
        let mut app = app();
        app.update(Action::Paste("```jsx\nconst Hi = () => <Chip label=\"hi\" />;\n```".to_string()))
            .unwrap();

        assert_eq!(app.domain.session.status, GenerationStatus::Done);
        assert_eq!(app.domain.deck.blocks.len(), 1);
        assert_eq!(app.domain.history.len(), 1);
        assert_eq!(app.domain.history[0].display_prompt(), "(pasted text)");
    }

    #[test]
    fn test_paste_routes_to_prompt_dialog() {
        let mut app = app();
        app.update(Action::OpenPrompt).unwrap();
        let action = app.handle_paste("A hero\nsection").unwrap();

        assert!(action.is_none());
        assert_eq!(
            app.modals.top(),
            Some(&Modal::Prompt {
                input: "A hero section".to_string(),
                selected_example: 0,
            })
        );
        assert!(app.domain.session.text.is_empty());
    }

    #[test]
    fn test_submit_without_generator_reports_error() {
        let mut app = app();
        app.update(Action::OpenPrompt).unwrap();
        app.update(Action::SubmitPrompt("A navbar".to_string())).unwrap();

        assert!(app.modals.is_empty());
        assert!(app.error.as_deref().unwrap().contains("generator command"));
        assert!(!app.job_runner.is_running());
    }

    #[test]
    fn test_deferred_preview_waits_for_stream_end() {
        let config = Config {
            preview_while_streaming: false,
            ..Config::default()
        };
        let mut app = App::with_history(config, Vec::new());
        app.domain.session.begin("card");
        for line in ["```tsx", "const Card = () => <Paper />;", "```"] {
            app.domain.session.append_line(line);
        }

        app.update(Action::Tick).unwrap();
        assert_eq!(app.domain.deck.blocks.len(), 1);
        assert!(app.domain.deck.active_preview().is_none());

        app.domain.session.finish(Some(0));
        app.update(Action::Tick).unwrap();
        assert!(app.domain.deck.active_preview().is_some());
    }

    #[cfg(unix)]
    #[test]
    fn test_generation_streams_into_deck() {
        let config = Config {
            generator_command: "printf '```tsx\\nconst Hero = () => <Box />;\\n```\\n'".to_string(),
            ..Config::default()
        };
        let mut app = App::with_history(config, Vec::new());
        app.update(Action::SubmitPrompt("A hero".to_string())).unwrap();

        let deadline = std::time::Instant::now() + std::time::Duration::from_secs(10);
        while app.job_runner.is_running() && std::time::Instant::now() < deadline {
            app.update(Action::Tick).unwrap();
            std::thread::sleep(std::time::Duration::from_millis(10));
        }
        app.update(Action::Tick).unwrap();

        assert_eq!(app.domain.session.status, GenerationStatus::Done);
        assert_eq!(app.domain.deck.active_block().unwrap().title, "Hero");
        assert!(app.domain.deck.active_preview().is_some());
        assert_eq!(app.domain.history.len(), 1);
        assert_eq!(app.domain.history[0].prompt, "A hero");
    }

    #[test]
    fn test_restore_history() {
        let mut app = app();
        app.update(Action::Paste(TWO_BLOCKS.to_string())).unwrap();
        app.update(Action::ClearSession).unwrap();
        assert!(app.domain.deck.blocks.is_empty());

        app.update(Action::OpenHistory).unwrap();
        app.update(Action::RestoreHistory).unwrap();

        assert!(app.modals.is_empty());
        assert_eq!(app.domain.session.text, TWO_BLOCKS);
        assert_eq!(app.domain.deck.blocks.len(), 2);
    }

    #[test]
    fn test_edit_round_trip() {
        let mut app = app();
        app.load_text(TWO_BLOCKS.to_string());
        app.update(Action::SelectTab(1)).unwrap();
        app.update(Action::OpenEditor).unwrap();

        let edit = app.pending_edit.take().unwrap();
        assert_eq!(edit.index, 1);
        fs::write(&edit.path, "const Fixed = () => <Chip />;\n").unwrap();
        app.finish_edit(edit.clone()).unwrap();

        assert!(!edit.path.exists());
        assert_eq!(app.domain.deck.blocks[1].title, "Fixed");
        assert!(app.domain.deck.active_preview().unwrap().error().is_none());
        assert!(app.domain.session.text.starts_with("Here are two:"));
    }

    #[test]
    fn test_fullscreen_requires_block() {
        let mut app = app();
        app.update(Action::ToggleFullscreen).unwrap();
        assert!(app.modals.is_empty());

        app.load_text(TWO_BLOCKS.to_string());
        app.update(Action::ToggleFullscreen).unwrap();
        assert_eq!(app.modals.top(), Some(&Modal::Fullscreen));
        app.update(Action::ToggleFullscreen).unwrap();
        assert!(app.modals.is_empty());
    }

    #[test]
    fn test_history_selection_is_clamped() {
        let mut app = app();
        app.update(Action::Paste("one".to_string())).unwrap();
        app.update(Action::Paste("two".to_string())).unwrap();
        app.update(Action::OpenHistory).unwrap();

        for _ in 0..5 {
            app.update(Action::ModalDown).unwrap();
        }
        assert_eq!(
            app.modals.top(),
            Some(&Modal::History {
                selected_index: 1,
                detail_scroll: 0,
            })
        );
    }
}
