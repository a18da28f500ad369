//! Layout calculations for the UI

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Main screen layout areas
pub struct MainLayout {
    pub tabs: Option<Rect>,
    pub preview: Rect,
    pub code: Rect,
    pub status: Rect,
    pub help: Rect,
}

/// Calculate centered popup area
pub fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let popup_x = area.x + (area.width.saturating_sub(width)) / 2;
    let popup_y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect::new(
        popup_x,
        popup_y,
        width.min(area.width),
        height.min(area.height),
    )
}

/// Calculate main screen layout
///
/// The tab strip is only given space when more than one block exists.
pub fn calculate_main_layout(area: Rect, show_tabs: bool) -> MainLayout {
    // Main vertical layout: (optional tabs) + content + status + help bar
    let main_chunks = if show_tabs {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Min(0),
                Constraint::Length(1),
                Constraint::Length(3),
            ])
            .split(area)
    } else {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(1),
                Constraint::Length(3),
            ])
            .split(area)
    };

    let (tabs, content, status, help) = if show_tabs {
        (Some(main_chunks[0]), main_chunks[1], main_chunks[2], main_chunks[3])
    } else {
        (None, main_chunks[0], main_chunks[1], main_chunks[2])
    };

    // Horizontal split: preview (55%) and code (45%)
    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(content);

    MainLayout {
        tabs,
        preview: content_chunks[0],
        code: content_chunks[1],
        status,
        help,
    }
}

/// Split a preview panel into the outline and an error region of `error_height` rows
pub fn split_error_region(area: Rect, error_height: u16) -> (Rect, Option<Rect>) {
    if error_height == 0 {
        return (area, None);
    }

    // The error region never takes more than half the panel
    let height = error_height.min(area.height / 2);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(height)])
        .split(area);
    (chunks[0], Some(chunks[1]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_without_tabs() {
        let layout = calculate_main_layout(Rect::new(0, 0, 100, 40), false);

        assert!(layout.tabs.is_none());
        assert_eq!(layout.help.height, 3);
        assert_eq!(layout.status.height, 1);
        assert_eq!(layout.preview.height, 36);
        assert_eq!(layout.preview.width + layout.code.width, 100);
    }

    #[test]
    fn test_layout_with_tabs() {
        let layout = calculate_main_layout(Rect::new(0, 0, 100, 40), true);

        assert_eq!(layout.tabs.map(|t| t.height), Some(2));
        assert_eq!(layout.preview.y, 2);
        assert_eq!(layout.preview.height, 34);
    }

    #[test]
    fn test_centered_popup_is_clamped() {
        let area = Rect::new(0, 0, 40, 10);
        assert_eq!(centered_popup(area, 20, 4), Rect::new(10, 3, 20, 4));
        assert_eq!(centered_popup(area, 80, 20), Rect::new(0, 0, 40, 10));
    }

    #[test]
    fn test_split_error_region() {
        let area = Rect::new(0, 0, 50, 20);
        assert_eq!(split_error_region(area, 0), (area, None));

        let (outline, error) = split_error_region(area, 30);
        assert_eq!(error.map(|e| e.height), Some(10));
        assert_eq!(outline.height, 10);
    }
}
