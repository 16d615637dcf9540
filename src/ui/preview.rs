use crate::app::App;
use crate::ui::detail_text;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// Hover panel: shows the pre-built panel of the hovered tile.
pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Description ");

    let paragraph = match app.controller.surface().visible_panel() {
        Some(panel) => Paragraph::new(detail_text::lines(panel)).wrap(Wrap { trim: false }),
        None => Paragraph::new("").style(Style::default().fg(Color::DarkGray)),
    };
    frame.render_widget(paragraph.block(block), area);
}
