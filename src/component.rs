//! Component trait shared by the home screen, panels and dialogs

use crate::action::Action;
use anyhow::Result;
use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{layout::Rect, Frame};

/// A piece of the UI that maps terminal input to [`Action`]s and draws itself.
///
/// Input handlers only translate events; state changes belong in `update`.
/// Text inputs such as the prompt dialog are the exception and edit their
/// buffer directly.
pub trait Component {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let _ = key;
        Ok(None)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        let _ = mouse;
        Ok(None)
    }

    /// Bracketed paste; arrives as one string rather than key events
    fn handle_paste(&mut self, text: &str) -> Result<Option<Action>> {
        let _ = text;
        Ok(None)
    }

    /// Apply an action, optionally returning a follow-up for the event loop
    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        let _ = action;
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()>;
}
