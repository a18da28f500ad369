//! Prompt dialog component
//!
//! Single-line prompt input with a list of example prompts.

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};

/// Prompts offered when the input is empty
pub const EXAMPLE_PROMPTS: [&str; 5] = [
    "A login form with email and password fields",
    "A dashboard card showing user statistics",
    "A product card with image, title, price and buy button",
    "A navigation sidebar with menu items",
    "A user profile card with avatar and details",
];

#[derive(Default)]
pub struct PromptDialog {
    pub input: String,
    pub selected_example: usize,
}

impl PromptDialog {
    pub fn reset(&mut self) {
        self.input.clear();
        self.selected_example = 0;
    }

    fn selected_prompt(&self) -> &'static str {
        EXAMPLE_PROMPTS[self.selected_example.min(EXAMPLE_PROMPTS.len() - 1)]
    }

    /// The prompt Enter would submit: the typed text, or the selected example
    pub fn prompt(&self) -> String {
        let typed = self.input.trim();
        if typed.is_empty() {
            self.selected_prompt().to_string()
        } else {
            typed.to_string()
        }
    }
}

impl Component for PromptDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc => Some(Action::CloseModal),
            KeyCode::Enter => Some(Action::SubmitPrompt(self.prompt())),
            KeyCode::Up => Some(Action::ModalUp),
            KeyCode::Down => Some(Action::ModalDown),
            KeyCode::Tab => {
                self.input = self.selected_prompt().to_string();
                None
            }
            KeyCode::Backspace => {
                self.input.pop();
                None
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.input.clear();
                None
            }
            KeyCode::Char(c) => {
                self.input.push(c);
                None
            }
            _ => None,
        };
        Ok(action)
    }

    /// Append pasted text, flattened to a single line
    fn handle_paste(&mut self, text: &str) -> Result<Option<Action>> {
        let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
        if !self.input.is_empty() && !self.input.ends_with(' ') && !flat.is_empty() {
            self.input.push(' ');
        }
        self.input.push_str(&flat);
        Ok(None)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::ModalUp => {
                self.selected_example = self.selected_example.saturating_sub(1);
            }
            Action::ModalDown => {
                if self.selected_example + 1 < EXAMPLE_PROMPTS.len() {
                    self.selected_example += 1;
                }
            }
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let popup_area = centered_popup(area, 70, 14);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Describe a UI ")
            .title_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            );
        let inner = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(inner);

        let input = Paragraph::new(Line::from(vec![
            Span::styled("> ", Style::default().fg(Color::Green)),
            Span::raw(self.input.clone()),
            Span::styled("█", Style::default().fg(Color::DarkGray)),
        ]))
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(input, chunks[0]);

        frame.render_widget(
            Paragraph::new(Span::styled(
                " Try these examples:",
                Style::default().fg(Color::DarkGray),
            )),
            chunks[1],
        );

        let items: Vec<ListItem> = EXAMPLE_PROMPTS
            .iter()
            .enumerate()
            .map(|(i, prompt)| {
                let style = if i == self.selected_example {
                    Style::default().bg(Color::Blue).fg(Color::White)
                } else {
                    Style::default().fg(Color::Gray)
                };
                ListItem::new(format!("  {}", prompt)).style(style)
            })
            .collect();
        frame.render_widget(List::new(items), chunks[2]);

        let help = Line::from(vec![
            Span::styled(
                " Enter ",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("Generate  "),
            Span::styled(
                " ↑/↓ ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("Example  "),
            Span::styled(
                " Tab ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("Use example  "),
            Span::styled(
                " Esc ",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("Cancel"),
        ]);
        frame.render_widget(Paragraph::new(help), chunks[3]);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(dialog: &mut PromptDialog, code: KeyCode) -> Option<Action> {
        dialog.handle_key_event(KeyEvent::from(code)).unwrap()
    }

    #[test]
    fn test_typing_and_submit() {
        let mut dialog = PromptDialog::default();
        for c in "A pricing table".chars() {
            press(&mut dialog, KeyCode::Char(c));
        }
        press(&mut dialog, KeyCode::Backspace);

        assert_eq!(
            press(&mut dialog, KeyCode::Enter),
            Some(Action::SubmitPrompt("A pricing tabl".to_string()))
        );
    }

    #[test]
    fn test_empty_input_submits_selected_example() {
        let mut dialog = PromptDialog::default();
        let action = press(&mut dialog, KeyCode::Down).unwrap();
        dialog.update(action).unwrap();

        assert_eq!(
            press(&mut dialog, KeyCode::Enter),
            Some(Action::SubmitPrompt(EXAMPLE_PROMPTS[1].to_string()))
        );
    }

    #[test]
    fn test_example_selection_is_clamped() {
        let mut dialog = PromptDialog::default();
        dialog.update(Action::ModalUp).unwrap();
        assert_eq!(dialog.selected_example, 0);

        for _ in 0..10 {
            dialog.update(Action::ModalDown).unwrap();
        }
        assert_eq!(dialog.selected_example, EXAMPLE_PROMPTS.len() - 1);
    }

    #[test]
    fn test_tab_copies_example() {
        let mut dialog = PromptDialog::default();
        press(&mut dialog, KeyCode::Char('x'));
        press(&mut dialog, KeyCode::Tab);
        assert_eq!(dialog.input, EXAMPLE_PROMPTS[0]);
    }

    #[test]
    fn test_paste_flattens_lines() {
        let mut dialog = PromptDialog::default();
        dialog.input.push_str("A card");
        dialog.handle_paste("with\n  two   lines").unwrap();
        assert_eq!(dialog.input, "A card with two lines");
    }
}
