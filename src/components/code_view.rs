//! Code panel component
//!
//! Displays the active block's code, either as extracted or as the
//! normalized script that was evaluated.

use super::tsx_highlight;
use crate::action::Action;
use crate::component::Component;
use crate::model::{CodeViewMode, PreviewDeck};
use crate::preview::Pipeline;
use anyhow::Result;
use ratatui::{
    layout::{Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

/// Code panel for the active block
pub struct CodeViewComponent {
    /// Current scroll offset
    scroll: usize,
    /// Cached content lines (hint header + highlighted code)
    content: Vec<Line<'static>>,
    /// Current code view mode
    code_view_mode: CodeViewMode,
    /// Code and mode the cache was built from
    source: Option<(String, CodeViewMode)>,
}

impl Default for CodeViewComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeViewComponent {
    pub fn new() -> Self {
        Self {
            scroll: 0,
            content: Vec::new(),
            code_view_mode: CodeViewMode::default(),
            source: None,
        }
    }

    pub fn toggle_code_view_mode(&mut self) {
        self.code_view_mode = self.code_view_mode.toggle();
    }

    /// Update content from the active block
    ///
    /// The normalized view reuses the mounted script when it is current.
    pub fn set_block(&mut self, deck: &PreviewDeck, pipeline: &Pipeline) {
        let Some(block) = deck.active_block() else {
            self.source = None;
            self.scroll = 0;
            self.content = vec![Line::from(Span::styled(
                "No code block yet",
                Style::default().fg(Color::DarkGray),
            ))];
            return;
        };

        let cached = self
            .source
            .as_ref()
            .is_some_and(|(code, mode)| *code == block.code && *mode == self.code_view_mode);
        if cached {
            return;
        }

        let code = match self.code_view_mode {
            CodeViewMode::Original => block.code.clone(),
            CodeViewMode::Normalized => match deck.active_preview() {
                Some(mounted) if mounted.code == block.code => mounted.script.clone(),
                _ => pipeline.normalize(&block.code),
            },
        };

        let is_new_block = self
            .source
            .as_ref()
            .map_or(true, |(code, _)| *code != block.code);
        if is_new_block {
            self.scroll = 0;
        }
        self.source = Some((block.code.clone(), self.code_view_mode));
        self.content = self.render_code(&code);
    }

    /// Get panel title based on the view mode
    pub fn get_title(&self) -> &'static str {
        match self.code_view_mode {
            CodeViewMode::Original => " Original Code ",
            CodeViewMode::Normalized => " Normalized Script ",
        }
    }

    fn render_code(&self, code: &str) -> Vec<Line<'static>> {
        let mut lines = Vec::new();

        // Shortcuts hint at the top
        lines.push(Line::from(vec![
            Span::styled(
                "'c'",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(" {}  ", self.code_view_mode.toggle().label())),
            Span::styled(
                "'y'",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" Copy  "),
            Span::styled(
                "'e'",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" Edit"),
        ]));
        lines.push(Line::from(""));

        if code.trim().is_empty() {
            lines.push(Line::from(Span::styled(
                "Nothing to preview in this block",
                Style::default().fg(Color::DarkGray),
            )));
        } else {
            lines.extend(tsx_highlight::highlight_tsx(&trim_code(code)));
        }
        lines
    }

    pub fn draw_panel(&mut self, frame: &mut Frame, area: Rect, focused: bool) {
        let border_color = if focused { Color::Cyan } else { Color::DarkGray };
        let visible_height = area.height.saturating_sub(2) as usize;

        let paragraph = Paragraph::new(self.content.clone())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(self.get_title())
                    .border_style(Style::default().fg(border_color)),
            )
            .scroll((self.scroll as u16, 0));

        frame.render_widget(paragraph, area);

        // Render scrollbar if content exceeds visible area
        let total = self.content.len();
        if total > visible_height {
            let mut scrollbar_state =
                ScrollbarState::new(total.saturating_sub(visible_height)).position(self.scroll);

            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight)
                    .begin_symbol(Some("↑"))
                    .end_symbol(Some("↓")),
                area.inner(Margin {
                    vertical: 1,
                    horizontal: 0,
                }),
                &mut scrollbar_state,
            );
        }
    }
}

impl Component for CodeViewComponent {
    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        let max_scroll = self.content.len().saturating_sub(1);

        match action {
            Action::ScrollDown => {
                if self.scroll < max_scroll {
                    self.scroll += 1;
                }
            }
            Action::ScrollUp => {
                self.scroll = self.scroll.saturating_sub(1);
            }
            Action::PageDown => {
                self.scroll = (self.scroll + 20).min(max_scroll);
            }
            Action::PageUp => {
                self.scroll = self.scroll.saturating_sub(20);
            }
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        self.draw_panel(frame, area, false);
        Ok(())
    }
}

/// Strip the common indentation and surrounding blank lines
pub fn trim_code(code: &str) -> String {
    let lines: Vec<&str> = code.lines().collect();

    let min_indent = lines
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start().len())
        .min()
        .unwrap_or(0);

    let trimmed_lines: Vec<&str> = lines
        .iter()
        .map(|line| {
            if line.trim().is_empty() {
                ""
            } else {
                line.get(min_indent..).unwrap_or(line).trim_end()
            }
        })
        .collect();

    trimmed_lines.join("\n").trim_matches('\n').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_trim_code_removes_common_indent() {
        let code = "\n    const A = 1;\n      return A;\n\n";
        assert_eq!(trim_code(code), "const A = 1;\n  return A;");
    }

    #[test]
    fn test_toggle_between_original_and_normalized() {
        let pipeline = Pipeline::new(&Config::default());
        let mut deck = PreviewDeck::new();
        deck.sync(
            "```tsx\nexport default function Hero() {\n  return <Box />;\n}\n```\n",
            1,
            &pipeline,
            true,
        );

        let mut view = CodeViewComponent::new();
        view.set_block(&deck, &pipeline);
        let original: Vec<String> = view.content.iter().map(line_text).collect();
        assert!(original.contains(&"export default function Hero() {".to_string()));
        assert_eq!(view.get_title(), " Original Code ");

        view.toggle_code_view_mode();
        view.set_block(&deck, &pipeline);
        let normalized: Vec<String> = view.content.iter().map(line_text).collect();
        assert!(normalized.contains(&"function Hero() {".to_string()));
        assert!(normalized.contains(&"render(<Hero />);".to_string()));
        assert_eq!(view.get_title(), " Normalized Script ");
    }

    #[test]
    fn test_empty_deck() {
        let pipeline = Pipeline::new(&Config::default());
        let mut view = CodeViewComponent::new();
        view.set_block(&PreviewDeck::new(), &pipeline);
        assert_eq!(line_text(&view.content[0]), "No code block yet");
    }
}
