mod detail_text;
pub mod grid;
mod help;
pub mod modal;
mod preview;
mod tabs;

use crate::app::App;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Screen regions, shared by rendering and mouse hit-testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub tabs: Rect,
    pub grid: Rect,
    pub panel: Rect,
    pub status: Rect,
}

pub fn screen_layout(area: Rect) -> ScreenLayout {
    // Layout: tabs(3) + body(min) + status(1)
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(area);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(rows[1]);

    ScreenLayout {
        tabs: rows[0],
        grid: body[0],
        panel: body[1],
        status: rows[2],
    }
}

/// Top-level render dispatch.
pub fn render(app: &App, frame: &mut Frame) {
    let layout = screen_layout(frame.area());

    tabs::render(app, frame, layout.tabs);
    grid::render(app, frame, layout.grid);
    preview::render(app, frame, layout.panel);
    render_status(app, frame, layout.status);

    if let Some(content) = app.modal() {
        modal::render(app, content, frame);
    }

    // Render help overlay on top if active
    if app.show_help {
        help::render(frame);
    }
}

fn render_status(app: &App, frame: &mut Frame, area: Rect) {
    let key = |k: &'static str| {
        Span::styled(
            k,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
    };
    let status_line = Line::from(vec![
        key(" ←↑↓→"),
        Span::raw(" Move  "),
        key("Enter"),
        Span::raw(" Open  "),
        key("1-3"),
        Span::raw(" Category  "),
        key("s"),
        Span::raw(" Sort  "),
        key("?"),
        Span::raw(" Help  "),
        key("q"),
        Span::raw(" Quit  "),
        Span::styled(&app.status_msg, Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(status_line), area);
}

/// Create a centered rectangle using percentage of parent area.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_layout_regions_do_not_overlap() {
        let layout = screen_layout(Rect::new(0, 0, 100, 30));
        assert_eq!(layout.tabs.height, 3);
        assert_eq!(layout.status.height, 1);
        assert_eq!(layout.status.y, 29);
        assert!(layout.grid.right() <= layout.panel.x);
        assert_eq!(layout.grid.height, 26);
    }

    #[test]
    fn test_centered_rect_is_inside_area() {
        let area = Rect::new(0, 0, 100, 40);
        let popup = centered_rect(70, 70, area);
        assert!(popup.x > 0 && popup.y > 0);
        assert!(popup.right() < area.right());
        assert!(popup.bottom() < area.bottom());
    }
}
