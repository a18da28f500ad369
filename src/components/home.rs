//! Home component - Main application screen
//!
//! Displays the tab strip, preview panel, code panel and status bars.
//! Owns panel focus and maps keys to actions.

use crate::action::Action;
use crate::component::Component;
use crate::components::{calculate_main_layout, CodeViewComponent, PreviewComponent};
use crate::model::{FocusedPanel, GenerationStatus, PreviewDeck, Session};
use crate::preview::Pipeline;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};
use std::time::Duration;

/// Longest prompt shown in the status bar
const MAX_STATUS_PROMPT: usize = 48;

// ═══════════════════════════════════════════════════════════════════════════════
// Home Component
// ═══════════════════════════════════════════════════════════════════════════════

/// Home component for the main application view
#[derive(Default)]
pub struct HomeComponent {
    /// Panel that receives scroll actions
    pub focus: FocusedPanel,
}

impl HomeComponent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn switch_focus(&mut self) {
        self.focus = self.focus.toggle();
    }
}

impl Component for HomeComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let action = match key.code {
            // Tabs
            KeyCode::Tab | KeyCode::Char(']') => Some(Action::NextTab),
            KeyCode::BackTab | KeyCode::Char('[') => Some(Action::PrevTab),
            KeyCode::Char(c @ '1'..='9') => {
                Some(Action::SelectTab(c as usize - '1' as usize))
            }

            // Scrolling
            KeyCode::Char('d') if ctrl => Some(Action::PageDown),
            KeyCode::Char('u') if ctrl => Some(Action::PageUp),
            KeyCode::Char('c') if ctrl => Some(Action::ForceQuit),
            KeyCode::Char('j') | KeyCode::Down => Some(Action::ScrollDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::ScrollUp),
            KeyCode::PageDown => Some(Action::PageDown),
            KeyCode::PageUp => Some(Action::PageUp),
            KeyCode::Char('w') => Some(Action::SwitchFocus),

            // View toggles
            KeyCode::Char('c') => Some(Action::ToggleCodeView),
            KeyCode::Char('f') => Some(Action::ToggleFullscreen),

            // Generation
            KeyCode::Char('p') | KeyCode::Enter => Some(Action::OpenPrompt),
            KeyCode::Char('s') => Some(Action::StopGeneration),
            KeyCode::Char('x') => Some(Action::ClearSession),

            // Block actions
            KeyCode::Char('y') => Some(Action::CopyCode),
            KeyCode::Char('e') => Some(Action::OpenEditor),

            // Modals
            KeyCode::Char('q') => Some(Action::OpenQuitDialog),
            KeyCode::Char('h') => Some(Action::OpenHistory),
            KeyCode::Char('?') => Some(Action::OpenHelp),

            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        if action == Action::SwitchFocus {
            self.switch_focus();
        }
        Ok(None)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Drawing is done through draw_home_screen which takes full context
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Rendering Functions
// ═══════════════════════════════════════════════════════════════════════════════

/// Context needed for rendering the home screen
pub struct HomeRenderContext<'a> {
    pub session: &'a Session,
    pub deck: &'a PreviewDeck,
    pub pipeline: &'a Pipeline,
    pub show_errors: bool,
    /// Time since the running generation started
    pub elapsed: Option<Duration>,
    pub error: Option<&'a str>,
    pub status_message: Option<&'a str>,
}

/// Draw the home screen
pub fn draw_home_screen(
    frame: &mut Frame,
    area: Rect,
    home: &mut HomeComponent,
    preview: &mut PreviewComponent,
    code_view: &mut CodeViewComponent,
    ctx: &HomeRenderContext,
) -> Result<()> {
    let layout = calculate_main_layout(area, ctx.deck.has_tabs());

    if let Some(tabs_area) = layout.tabs {
        render_tabs(frame, tabs_area, ctx.deck);
    }

    let title = ctx
        .deck
        .active_block()
        .map_or("-", |block| block.title.as_str());
    preview.set_preview(ctx.deck, ctx.session, ctx.show_errors);
    preview.draw_panel(
        frame,
        layout.preview,
        title,
        home.focus == FocusedPanel::Preview,
    );

    code_view.set_block(ctx.deck, ctx.pipeline);
    code_view.draw_panel(frame, layout.code, home.focus == FocusedPanel::Code);

    render_status_bar(frame, layout.status, ctx);
    render_help_bar(frame, layout.help, ctx.session);

    Ok(())
}

fn render_tabs(frame: &mut Frame, area: Rect, deck: &PreviewDeck) {
    let titles: Vec<String> = deck
        .blocks
        .iter()
        .enumerate()
        .map(|(i, block)| format!("{} {}", i + 1, block.title))
        .collect();

    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::BOTTOM))
        .select(deck.active)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_widget(tabs, area);
}

fn status_badge(status: GenerationStatus, elapsed: Option<Duration>) -> Span<'static> {
    let color = match status {
        GenerationStatus::Idle => Color::DarkGray,
        GenerationStatus::Streaming | GenerationStatus::Stopped => Color::Yellow,
        GenerationStatus::Done => Color::Green,
        GenerationStatus::Failed => Color::Red,
    };
    let text = match elapsed {
        Some(elapsed) if status.is_streaming() => {
            format!(" {} {:.1}s ", status.label(), elapsed.as_secs_f64())
        }
        _ => format!(" {} ", status.label()),
    };
    Span::styled(
        text,
        Style::default()
            .fg(Color::Black)
            .bg(color)
            .add_modifier(Modifier::BOLD),
    )
}

fn render_status_bar(frame: &mut Frame, area: Rect, ctx: &HomeRenderContext) {
    let mut spans = vec![
        Span::styled(
            " genui ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        status_badge(ctx.session.status, ctx.elapsed),
        Span::raw(" "),
    ];

    if !ctx.session.prompt.is_empty() {
        let mut prompt: String = ctx.session.prompt.chars().take(MAX_STATUS_PROMPT).collect();
        if ctx.session.prompt.chars().count() > MAX_STATUS_PROMPT {
            prompt.push('…');
        }
        spans.push(Span::styled(
            prompt,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ));
    }

    let blocks = ctx.deck.blocks.len();
    if blocks > 0 {
        spans.push(Span::styled(
            format!(" ({} block{})", blocks, if blocks == 1 { "" } else { "s" }),
            Style::default().fg(Color::DarkGray),
        ));
    }

    if let Some(error) = ctx.session.error.as_deref() {
        spans.push(Span::styled(
            format!("  {}", error.lines().next().unwrap_or(error)),
            Style::default().fg(Color::Red),
        ));
    }

    // Error message if present
    if let Some(error) = ctx.error {
        spans.clear();
        spans.push(Span::styled(
            format!(" Error: {} ", error),
            Style::default().fg(Color::Red),
        ));
    }

    // Status message if present
    if let Some(status) = ctx.status_message {
        spans.push(Span::styled(
            format!(" {} ", status),
            Style::default().fg(Color::Yellow),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans));
    frame.render_widget(paragraph, area);
}

fn key_span(key: &str, color: Color) -> Span<'static> {
    Span::styled(
        format!(" {} ", key),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )
}

fn help_spans(session: &Session) -> Vec<Span<'static>> {
    if session.status.is_streaming() {
        vec![
            key_span("s", Color::Red),
            Span::raw("Stop "),
            key_span("f", Color::Cyan),
            Span::raw("Fullscreen "),
            key_span("Tab", Color::Cyan),
            Span::raw("Next block "),
            key_span("q", Color::Yellow),
            Span::raw("Quit"),
        ]
    } else {
        vec![
            key_span("q", Color::Yellow),
            Span::raw("Quit "),
            key_span("p", Color::Green),
            Span::raw("Prompt "),
            key_span("Tab", Color::Cyan),
            Span::raw("Next block "),
            key_span("f", Color::Cyan),
            Span::raw("Fullscreen "),
            key_span("c", Color::Cyan),
            Span::raw("Code view "),
            key_span("y", Color::Cyan),
            Span::raw("Copy "),
            key_span("e", Color::Cyan),
            Span::raw("Edit "),
            key_span("x", Color::Red),
            Span::raw("Clear "),
            key_span("h", Color::Magenta),
            Span::raw("History "),
            key_span("?", Color::White),
            Span::raw("Help"),
        ]
    }
}

fn render_help_bar(frame: &mut Frame, area: Rect, session: &Session) {
    let paragraph = Paragraph::new(Line::from(help_spans(session)))
        .alignment(Alignment::Left);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(home: &mut HomeComponent, code: KeyCode) -> Option<Action> {
        home.handle_key_event(KeyEvent::from(code)).unwrap()
    }

    #[test]
    fn test_key_mapping() {
        let mut home = HomeComponent::new();

        assert_eq!(press(&mut home, KeyCode::Tab), Some(Action::NextTab));
        assert_eq!(press(&mut home, KeyCode::BackTab), Some(Action::PrevTab));
        assert_eq!(press(&mut home, KeyCode::Char('3')), Some(Action::SelectTab(2)));
        assert_eq!(press(&mut home, KeyCode::Char('f')), Some(Action::ToggleFullscreen));
        assert_eq!(press(&mut home, KeyCode::Char('y')), Some(Action::CopyCode));
        assert_eq!(press(&mut home, KeyCode::Char('0')), None);
    }

    #[test]
    fn test_ctrl_keys() {
        let mut home = HomeComponent::new();
        let page = home
            .handle_key_event(KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL))
            .unwrap();
        let quit = home
            .handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))
            .unwrap();

        assert_eq!(page, Some(Action::PageDown));
        assert_eq!(quit, Some(Action::ForceQuit));
    }

    #[test]
    fn test_switch_focus() {
        let mut home = HomeComponent::new();
        home.update(Action::SwitchFocus).unwrap();
        assert_eq!(home.focus, FocusedPanel::Code);
    }

    #[test]
    fn test_status_badge_shows_elapsed_while_streaming() {
        let badge = status_badge(GenerationStatus::Streaming, Some(Duration::from_millis(2500)));
        assert_eq!(badge.content, " streaming 2.5s ");

        let badge = status_badge(GenerationStatus::Done, Some(Duration::from_secs(3)));
        assert_eq!(badge.content, " done ");
    }

    #[test]
    fn test_help_bar_while_streaming_offers_stop() {
        let mut session = Session::new();
        session.begin("x");
        let text: String = help_spans(&session)
            .iter()
            .map(|s| s.content.to_string())
            .collect();
        assert!(text.starts_with(" s Stop"));
    }
}
