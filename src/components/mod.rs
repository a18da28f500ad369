//! UI Components
//!
//! Each component encapsulates its own state, event handling, and rendering logic.
//! Components communicate through Actions rather than direct state mutation.

pub mod code_view;
pub mod help_dialog;
pub mod history_dialog;
pub mod home;
pub mod layout;
pub mod preview;
pub mod prompt_dialog;
pub mod quit_dialog;
pub mod tsx_highlight;

pub use code_view::CodeViewComponent;
pub use help_dialog::HelpDialog;
pub use history_dialog::HistoryDialog;
pub use home::{draw_home_screen, HomeComponent, HomeRenderContext};
pub use layout::{calculate_main_layout, centered_popup};
pub use preview::PreviewComponent;
pub use prompt_dialog::PromptDialog;
pub use quit_dialog::QuitDialog;
