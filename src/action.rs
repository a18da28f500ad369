//! Action enum - All possible application actions
//!
//! Actions are discrete operations that the application can perform.
//! Components emit Actions in response to events, and the App processes
//! them to update state.

use std::fmt;

/// All possible actions in the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ─────────────────────────────────────────────────────────────────────────
    // App Lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Regular tick for streaming updates
    Tick,
    /// Terminal was resized
    Resize(u16, u16),
    /// Force quit without confirmation
    ForceQuit,

    // ─────────────────────────────────────────────────────────────────────────
    // Preview Tabs
    // ─────────────────────────────────────────────────────────────────────────
    /// Activate the next preview tab
    NextTab,
    /// Activate the previous preview tab
    PrevTab,
    /// Activate the tab at the given index
    SelectTab(usize),

    // ─────────────────────────────────────────────────────────────────────────
    // Scrolling
    // ─────────────────────────────────────────────────────────────────────────
    /// Scroll the focused panel up one line
    ScrollUp,
    /// Scroll the focused panel down one line
    ScrollDown,
    /// Scroll the focused panel up one page
    PageUp,
    /// Scroll the focused panel down one page
    PageDown,
    /// Move focus between the preview and code panels
    SwitchFocus,

    // ─────────────────────────────────────────────────────────────────────────
    // Modals
    // ─────────────────────────────────────────────────────────────────────────
    /// Open quit confirmation dialog
    OpenQuitDialog,
    /// Open the prompt input dialog
    OpenPrompt,
    /// Start a generation for the given prompt
    SubmitPrompt(String),
    /// Open generation history overlay
    OpenHistory,
    /// Load the selected history entry into the session
    RestoreHistory,
    /// Open help dialog showing all keyboard shortcuts
    OpenHelp,
    /// Show the active preview fullscreen
    ToggleFullscreen,
    /// Close the current modal
    CloseModal,
    /// Navigate up in modal
    ModalUp,
    /// Navigate down in modal
    ModalDown,

    // ─────────────────────────────────────────────────────────────────────────
    // View Toggles
    // ─────────────────────────────────────────────────────────────────────────
    /// Toggle between original and normalized code
    ToggleCodeView,

    // ─────────────────────────────────────────────────────────────────────────
    // Session
    // ─────────────────────────────────────────────────────────────────────────
    /// Copy the code of the active tab to the clipboard
    CopyCode,
    /// Append pasted text to the session
    Paste(String),
    /// Stop the running generator
    StopGeneration,
    /// Discard the current session
    ClearSession,

    // ─────────────────────────────────────────────────────────────────────────
    // Editor
    // ─────────────────────────────────────────────────────────────────────────
    /// Open the active block in external $EDITOR
    OpenEditor,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Tick => write!(f, "Tick"),
            Action::Resize(w, h) => write!(f, "Resize({}, {})", w, h),
            Action::ForceQuit => write!(f, "ForceQuit"),
            Action::NextTab => write!(f, "NextTab"),
            Action::PrevTab => write!(f, "PrevTab"),
            Action::SelectTab(index) => write!(f, "SelectTab({})", index),
            Action::ScrollUp => write!(f, "ScrollUp"),
            Action::ScrollDown => write!(f, "ScrollDown"),
            Action::PageUp => write!(f, "PageUp"),
            Action::PageDown => write!(f, "PageDown"),
            Action::SwitchFocus => write!(f, "SwitchFocus"),
            Action::OpenQuitDialog => write!(f, "OpenQuitDialog"),
            Action::OpenPrompt => write!(f, "OpenPrompt"),
            Action::SubmitPrompt(prompt) => write!(f, "SubmitPrompt({})", prompt),
            Action::OpenHistory => write!(f, "OpenHistory"),
            Action::RestoreHistory => write!(f, "RestoreHistory"),
            Action::OpenHelp => write!(f, "OpenHelp"),
            Action::ToggleFullscreen => write!(f, "ToggleFullscreen"),
            Action::CloseModal => write!(f, "CloseModal"),
            Action::ModalUp => write!(f, "ModalUp"),
            Action::ModalDown => write!(f, "ModalDown"),
            Action::ToggleCodeView => write!(f, "ToggleCodeView"),
            Action::CopyCode => write!(f, "CopyCode"),
            Action::Paste(text) => write!(f, "Paste({} bytes)", text.len()),
            Action::StopGeneration => write!(f, "StopGeneration"),
            Action::ClearSession => write!(f, "ClearSession"),
            Action::OpenEditor => write!(f, "OpenEditor"),
        }
    }
}
