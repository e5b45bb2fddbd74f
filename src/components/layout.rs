//! Layout calculations for the UI

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Main screen layout areas
pub struct MainLayout {
    pub header: Rect,
    pub filters: Rect,
    pub table: Rect,
    pub footer: Rect,
    pub status: Option<Rect>,
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
pub fn calculate_main_layout(area: Rect, has_status: bool) -> MainLayout {
    let mut constraints = vec![
        Constraint::Length(3), // header
        Constraint::Length(3), // filter chips
        Constraint::Min(5),    // table
        Constraint::Length(3), // pagination footer
    ];
    if has_status {
        constraints.push(Constraint::Length(1));
    }
    constraints.push(Constraint::Length(1)); // help bar

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let (status, help) = if has_status {
        (Some(chunks[4]), chunks[5])
    } else {
        (None, chunks[4])
    };

    MainLayout {
        header: chunks[0],
        filters: chunks[1],
        table: chunks[2],
        footer: chunks[3],
        status,
        help,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_popup_is_clamped_to_area() {
        let area = Rect::new(0, 0, 30, 10);
        let popup = centered_popup(area, 40, 6);

        assert_eq!(popup.width, 30);
        assert_eq!(popup.height, 6);
        assert_eq!(popup.y, 2);
    }

    #[test]
    fn test_layout_with_status_line() {
        let layout = calculate_main_layout(Rect::new(0, 0, 100, 40), true);

        assert_eq!(layout.header.height, 3);
        assert_eq!(layout.status.map(|s| s.height), Some(1));
        assert_eq!(layout.help.y, 39);
        assert_eq!(layout.table.height, 40 - 3 - 3 - 3 - 1 - 1);
    }

    #[test]
    fn test_layout_without_status_line() {
        let layout = calculate_main_layout(Rect::new(0, 0, 100, 40), false);

        assert!(layout.status.is_none());
        assert_eq!(layout.table.height, 40 - 3 - 3 - 3 - 1);
    }
}
