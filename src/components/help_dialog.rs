//! Help dialog component
//!
//! Displays all keyboard shortcuts available in the application.

use crate::action::Action;
use crate::component::Component;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

/// Help dialog showing all keyboard shortcuts
#[derive(Default)]
pub struct HelpDialog {
    pub scroll_offset: usize,
}

impl Component for HelpDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => Some(Action::CloseModal),
            KeyCode::Char('j') | KeyCode::Down => {
                self.scroll_offset = self.scroll_offset.saturating_add(1);
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.scroll_offset = self.scroll_offset.saturating_sub(1);
                None
            }
            KeyCode::PageDown => {
                self.scroll_offset = self.scroll_offset.saturating_add(10);
                None
            }
            KeyCode::PageUp => {
                self.scroll_offset = self.scroll_offset.saturating_sub(10);
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        // Clear the area
        frame.render_widget(Clear, area);

        let margin = 4;
        let dialog_area = Rect::new(
            area.x + margin,
            area.y + margin,
            area.width.saturating_sub(margin * 2),
            area.height.saturating_sub(margin * 2),
        );

        let content = build_help_content();
        let total = content.len();
        let visible_height = dialog_area.height.saturating_sub(2) as usize;

        // Clamp scroll offset
        let max_scroll = total.saturating_sub(visible_height);
        if self.scroll_offset > max_scroll {
            self.scroll_offset = max_scroll;
        }

        let paragraph = Paragraph::new(content.clone())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Keyboard Shortcuts ")
                    .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .scroll((self.scroll_offset as u16, 0));

        frame.render_widget(paragraph, dialog_area);

        // Render scrollbar if content exceeds visible area
        if total > visible_height {
            let mut scrollbar_state =
                ScrollbarState::new(total.saturating_sub(visible_height)).position(self.scroll_offset);

            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight)
                    .begin_symbol(Some("↑"))
                    .end_symbol(Some("↓")),
                dialog_area.inner(ratatui::layout::Margin {
                    vertical: 1,
                    horizontal: 0,
                }),
                &mut scrollbar_state,
            );
        }

        Ok(())
    }
}

/// Build the help content with all keyboard shortcuts
fn build_help_content() -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    // Helper to add a section header
    let add_section = |lines: &mut Vec<Line<'static>>, title: &str| {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("  {} ", title),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(
            format!("  {}", "─".repeat(title.len() + 2)),
            Style::default().fg(Color::DarkGray),
        )));
    };

    // Helper to add a shortcut line
    let add_shortcut = |lines: &mut Vec<Line<'static>>, key: &str, description: &str| {
        lines.push(Line::from(vec![
            Span::styled(
                format!("  {:12}", key),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::styled(description.to_string(), Style::default().fg(Color::White)),
        ]));
    };

    // Tabs
    add_section(&mut lines, "Preview Tabs");
    add_shortcut(&mut lines, "Tab / ]", "Next code block");
    add_shortcut(&mut lines, "Shift+Tab / [", "Previous code block");
    add_shortcut(&mut lines, "1-9", "Jump to code block");

    // Scrolling
    add_section(&mut lines, "Scrolling");
    add_shortcut(&mut lines, "j / ↓", "Scroll down one line");
    add_shortcut(&mut lines, "k / ↑", "Scroll up one line");
    add_shortcut(&mut lines, "Ctrl+d", "Scroll down one page");
    add_shortcut(&mut lines, "Ctrl+u", "Scroll up one page");
    add_shortcut(&mut lines, "w", "Switch between preview and code");

    // Generation
    add_section(&mut lines, "Generation");
    add_shortcut(&mut lines, "p / Enter", "Describe a UI to generate");
    add_shortcut(&mut lines, "s", "Stop the running generation");
    add_shortcut(&mut lines, "x", "Clear the session");
    add_shortcut(&mut lines, "paste", "Append pasted text and preview it");

    // Preview
    add_section(&mut lines, "Preview");
    add_shortcut(&mut lines, "f", "Toggle fullscreen preview");
    add_shortcut(&mut lines, "c", "Toggle original/normalized code");
    add_shortcut(&mut lines, "y", "Copy block code to clipboard");
    add_shortcut(&mut lines, "e", "Edit block in $EDITOR");

    // Dialogs
    add_section(&mut lines, "Dialogs");
    add_shortcut(&mut lines, "h", "Open generation history");
    add_shortcut(&mut lines, "?", "Show this help");
    add_shortcut(&mut lines, "q", "Quit / Close dialog");
    add_shortcut(&mut lines, "Esc", "Dismiss status message");

    // Footer
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  Press q, Esc, or ? to close",
        Style::default().fg(Color::DarkGray),
    )));

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_lists_every_binding() {
        let text: String = build_help_content()
            .iter()
            .flat_map(|line| line.spans.iter().map(|s| s.content.to_string()))
            .collect();

        for description in [
            "Toggle fullscreen preview",
            "Copy block code to clipboard",
            "Stop the running generation",
            "Open generation history",
        ] {
            assert!(text.contains(description), "missing {}", description);
        }
    }

    #[test]
    fn test_scroll_keys() {
        let mut dialog = HelpDialog::default();
        dialog.handle_key_event(KeyEvent::from(KeyCode::Char('j'))).unwrap();
        dialog.handle_key_event(KeyEvent::from(KeyCode::PageDown)).unwrap();
        assert_eq!(dialog.scroll_offset, 11);

        let action = dialog.handle_key_event(KeyEvent::from(KeyCode::Esc)).unwrap();
        assert_eq!(action, Some(Action::CloseModal));
    }
}
