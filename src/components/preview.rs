//! Preview panel component
//!
//! Shows the mounted preview of the active block as an element outline, with
//! evaluation errors in a fixed region underneath.

use super::layout::{centered_popup, split_error_region};
use crate::action::Action;
use crate::component::Component;
use crate::model::{GenerationStatus, MountedPreview, PreviewDeck, PreviewOutcome, Session};
use crate::preview::{JsxNode, PropValue, RenderedPreview, Resolution, ScopeKind};
use anyhow::Result;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Borders, Clear, Padding, Paragraph, Scrollbar, ScrollbarOrientation,
        ScrollbarState, Wrap,
    },
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Background of the error region
const ERROR_BG: Color = Color::Rgb(60, 0, 0);

/// Longest prop expression shown before truncation
const MAX_PROP_WIDTH: usize = 24;

/// Preview panel for the active block
pub struct PreviewComponent {
    scroll: usize,
    /// Cached outline lines
    content: Vec<Line<'static>>,
    /// Evaluation error shown in the error region
    error: Option<String>,
    /// Block index and code the cache was built from
    source: Option<(usize, String)>,
}

impl Default for PreviewComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl PreviewComponent {
    pub fn new() -> Self {
        Self {
            scroll: 0,
            content: Vec::new(),
            error: None,
            source: None,
        }
    }

    /// Rebuild the cached content when the mounted preview changed
    pub fn set_preview(&mut self, deck: &PreviewDeck, session: &Session, show_errors: bool) {
        let Some(mounted) = deck.active_preview() else {
            self.source = None;
            self.scroll = 0;
            self.error = None;
            self.content = placeholder_lines(deck, session);
            return;
        };

        let cached = self
            .source
            .as_ref()
            .is_some_and(|(index, code)| *index == mounted.index && *code == mounted.code);
        if cached {
            return;
        }

        self.source = Some((mounted.index, mounted.code.clone()));
        self.scroll = 0;
        self.error = mounted
            .error()
            .filter(|_| show_errors)
            .map(ToString::to_string);
        self.content = match &mounted.outcome {
            PreviewOutcome::Rendered(preview) => outline_lines(preview),
            PreviewOutcome::Empty => vec![dim_line(
                "Nothing to preview: the block declares no component and contains no markup",
            )],
            PreviewOutcome::Failed(_) => failed_lines(mounted, show_errors),
        };
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Draw the cached preview inside a bordered panel
    pub fn draw_panel(&mut self, frame: &mut Frame, area: Rect, title: &str, focused: bool) {
        let border_color = if focused { Color::Cyan } else { Color::DarkGray };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" Preview: {} ", title))
            .border_style(Style::default().fg(border_color));

        let inner = block.inner(area);
        frame.render_widget(block, area);
        self.draw_content(frame, inner);
    }

    /// Draw the cached preview as a top-level overlay
    pub fn draw_fullscreen(&mut self, frame: &mut Frame, area: Rect, title: &str) {
        let popup = centered_popup(area, area.width.saturating_sub(4), area.height.saturating_sub(2));
        frame.render_widget(Clear, popup);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", title))
            .title_bottom(Line::from(" Esc/f close  j/k scroll ").centered())
            .border_style(Style::default().fg(Color::Cyan));

        let inner = block.inner(popup);
        frame.render_widget(block, popup);
        self.draw_content(frame, inner);
    }

    fn draw_content(&mut self, frame: &mut Frame, area: Rect) {
        let error_height = self
            .error()
            .map_or(0, |err| error_region_height(err, area.width));
        let (outline_area, error_area) = split_error_region(area, error_height);

        let visible_height = outline_area.height as usize;
        let paragraph = Paragraph::new(self.content.clone()).scroll((self.scroll as u16, 0));
        frame.render_widget(paragraph, outline_area);

        let total = self.content.len();
        if total > visible_height {
            let mut scrollbar_state =
                ScrollbarState::new(total.saturating_sub(visible_height)).position(self.scroll);
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight)
                    .begin_symbol(Some("↑"))
                    .end_symbol(Some("↓")),
                outline_area,
                &mut scrollbar_state,
            );
        }

        if let (Some(err), Some(error_area)) = (self.error.as_deref(), error_area) {
            draw_error_region(frame, error_area, err);
        }
    }
}

impl Component for PreviewComponent {
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
        self.draw_content(frame, area);
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Error Region
// ═══════════════════════════════════════════════════════════════════════════════

/// Rows the error region needs at `width`, including its padding
pub fn error_region_height(message: &str, width: u16) -> u16 {
    let text_width = width.saturating_sub(2).max(1) as usize;
    let rows: usize = message
        .lines()
        .map(|line| line.width().div_ceil(text_width).max(1))
        .sum();
    (rows.max(1) + 2).min(u16::MAX as usize) as u16
}

/// Red-on-dark-red wrapped text with one cell of padding
pub fn draw_error_region(frame: &mut Frame, area: Rect, message: &str) {
    let paragraph = Paragraph::new(message.to_string())
        .style(Style::default().fg(Color::Red).bg(ERROR_BG))
        .block(Block::default().padding(Padding::uniform(1)))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

// ═══════════════════════════════════════════════════════════════════════════════
// Outline Rendering
// ═══════════════════════════════════════════════════════════════════════════════

fn dim_line(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default().fg(Color::DarkGray),
    ))
}

fn placeholder_lines(deck: &PreviewDeck, session: &Session) -> Vec<Line<'static>> {
    let message = if deck.active_block().is_some() {
        "Preview appears when generation finishes"
    } else if session.status == GenerationStatus::Streaming {
        "Waiting for a code block..."
    } else if session.text.trim().is_empty() {
        "Press p to describe a UI, or paste generated text"
    } else {
        "No previewable code block in the output"
    };
    vec![dim_line(message)]
}

fn failed_lines(mounted: &MountedPreview, show_errors: bool) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        "Preview failed",
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    ))];
    if !show_errors {
        lines.push(dim_line("Error display is turned off in the config"));
    }
    lines.push(dim_line(&format!(
        "Edit the block (e) or generate again. Script: {} lines",
        mounted.script.lines().count()
    )));
    lines
}

/// Build the outline of a rendered preview
pub fn outline_lines(preview: &RenderedPreview) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    let element_count = preview.tree.as_ref().map_or(0, JsxNode::element_count);
    lines.push(Line::from(vec![
        Span::styled(
            format!("<{} />", preview.entry),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {} element(s)", element_count),
            Style::default().fg(Color::DarkGray),
        ),
    ]));
    lines.push(Line::from(Span::styled(
        "═══════════════════════════════════════════════════════════",
        Style::default().fg(Color::DarkGray),
    )));
    lines.push(Line::from(""));

    match &preview.tree {
        Some(tree) => push_node(&mut lines, tree, 0, &preview.references),
        None => lines.push(dim_line("No markup found for the entry component")),
    }

    if !preview.references.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "References:",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
        for (name, resolution) in &preview.references {
            let kind = match resolution {
                Resolution::Local => "local",
                Resolution::Scope(kind) => kind.label(),
            };
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(name.clone(), name_style(name, &preview.references)),
                Span::styled(format!("  {}", kind), Style::default().fg(Color::DarkGray)),
            ]));
        }
    }

    lines
}

fn push_node(
    lines: &mut Vec<Line<'static>>,
    node: &JsxNode,
    depth: usize,
    references: &[(String, Resolution)],
) {
    let indent = "  ".repeat(depth);
    match node {
        JsxNode::Element {
            name,
            props,
            children,
        } => {
            let mut spans = vec![
                Span::raw(indent),
                Span::styled("<", Style::default().fg(Color::Gray)),
                Span::styled(name.clone(), name_style(name, references)),
            ];
            for prop in props {
                spans.push(Span::styled(
                    format!(" {}", prop_text(&prop.name, &prop.value)),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            let close = if children.is_empty() { " />" } else { ">" };
            spans.push(Span::styled(close, Style::default().fg(Color::Gray)));
            lines.push(Line::from(spans));

            for child in children {
                push_node(lines, child, depth + 1, references);
            }
        }
        JsxNode::Fragment(children) => {
            lines.push(Line::from(vec![
                Span::raw(indent),
                Span::styled("<>", Style::default().fg(Color::Gray)),
            ]));
            for child in children {
                push_node(lines, child, depth + 1, references);
            }
        }
        JsxNode::Text(text) => {
            let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
            if !text.is_empty() {
                lines.push(Line::from(vec![
                    Span::raw(indent),
                    Span::styled(format!("\"{}\"", text), Style::default().fg(Color::White)),
                ]));
            }
        }
        JsxNode::Expression(expr) => {
            lines.push(Line::from(vec![
                Span::raw(indent),
                Span::styled(
                    format!("{{{}}}", truncate(expr.trim(), MAX_PROP_WIDTH * 2)),
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::ITALIC),
                ),
            ]));
        }
    }
}

/// Colour a tag name by what it resolves to
fn name_style(name: &str, references: &[(String, Resolution)]) -> Style {
    if name.starts_with(|c: char| c.is_ascii_lowercase()) {
        return Style::default().fg(Color::Blue);
    }

    let resolution = references
        .iter()
        .find(|(reference, _)| reference == name)
        .map(|(_, resolution)| *resolution);
    let color = match resolution {
        Some(Resolution::Local) => Color::Cyan,
        Some(Resolution::Scope(ScopeKind::Icon)) => Color::Yellow,
        Some(Resolution::Scope(ScopeKind::Hook)) => Color::Magenta,
        Some(Resolution::Scope(ScopeKind::Value)) => Color::White,
        Some(Resolution::Scope(ScopeKind::Component)) | None => Color::Green,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

fn prop_text(name: &str, value: &PropValue) -> String {
    match value {
        PropValue::Flag => name.to_string(),
        PropValue::Literal(text) => format!("{}=\"{}\"", name, truncate(text, MAX_PROP_WIDTH)),
        PropValue::Expression(expr) => {
            format!("{}={{{}}}", name, truncate(expr.trim(), MAX_PROP_WIDTH))
        }
        PropValue::Spread(expr) => format!("{{...{}}}", truncate(expr.trim(), MAX_PROP_WIDTH)),
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let head: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::preview::Pipeline;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn deck_for(text: &str) -> (PreviewDeck, Session) {
        let session = Session::from_text(text.to_string());
        let mut deck = PreviewDeck::new();
        deck.sync(&session.text, session.revision, &Pipeline::new(&Config::default()), true);
        (deck, session)
    }

    #[test]
    fn test_outline_of_rendered_preview() {
        let (deck, session) = deck_for(
            "```tsx\nfunction Card() {\n  return (\n    <Stack spacing={2}>\n      <Typography variant=\"h5\">Hello</Typography>\n      <Button disabled />\n    </Stack>\n  );\n}\n```\n",
        );
        let mut preview = PreviewComponent::new();
        preview.set_preview(&deck, &session, true);

        let text: Vec<String> = preview.content.iter().map(line_text).collect();
        assert_eq!(text[0], "<Card />  3 element(s)");
        assert!(text.contains(&"<Stack spacing={2}>".to_string()));
        assert!(text.contains(&"  <Typography variant=\"h5\">".to_string()));
        assert!(text.contains(&"    \"Hello\"".to_string()));
        assert!(text.contains(&"  <Button disabled />".to_string()));
        assert!(text.contains(&"  Card  local".to_string()));
        assert!(preview.error().is_none());
    }

    #[test]
    fn test_failed_preview_sets_error() {
        let (deck, session) =
            deck_for("```tsx\nconst Broken = () => <Missing />;\n```\n");
        let mut preview = PreviewComponent::new();
        preview.set_preview(&deck, &session, true);
        assert_eq!(preview.error(), Some("ReferenceError: Missing is not defined"));

        let mut hidden = PreviewComponent::new();
        hidden.set_preview(&deck, &session, false);
        assert!(hidden.error().is_none());
    }

    #[test]
    fn test_placeholder_without_blocks() {
        let (deck, session) = deck_for("");
        let mut preview = PreviewComponent::new();
        preview.set_preview(&deck, &session, true);
        assert_eq!(
            line_text(&preview.content[0]),
            "Press p to describe a UI, or paste generated text"
        );
    }

    #[test]
    fn test_scroll_is_clamped() {
        let mut preview = PreviewComponent::new();
        preview.content = vec![Line::from("a"), Line::from("b")];
        preview.update(Action::PageDown).unwrap();
        assert_eq!(preview.scroll, 1);
        preview.update(Action::ScrollUp).unwrap();
        preview.update(Action::ScrollUp).unwrap();
        assert_eq!(preview.scroll, 0);
    }

    #[test]
    fn test_error_region_height() {
        assert_eq!(error_region_height("short", 40), 3);
        assert_eq!(error_region_height(&"x".repeat(30), 12), 5);
        assert_eq!(error_region_height("one\ntwo", 40), 4);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("abc", 5), "abc");
        assert_eq!(truncate("abcdef", 4), "abc…");
    }
}
