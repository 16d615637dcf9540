use crate::app::App;
use crate::detail::ModalContent;
use crate::ui::{centered_rect, detail_text};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

/// Modal region for a terminal of the given size. Anything outside it is
/// the backdrop.
pub fn modal_area(area: Rect) -> Rect {
    centered_rect(70, 70, area)
}

pub fn is_backdrop(app: &App, column: u16, row: u16) -> bool {
    let modal = modal_area(app.area);
    !(column >= modal.x && column < modal.right() && row >= modal.y && row < modal.bottom())
}

pub fn render(app: &App, content: &ModalContent, frame: &mut Frame) {
    let area = modal_area(frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Item ")
        .title_bottom(
            Line::from(" Esc close  ↑↓ scroll ")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Right),
        );
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(inner);

    // ── Header: name and image ──
    let header = vec![
        Line::from(Span::styled(
            content.name.clone(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled("Image: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                content.image.clone(),
                Style::default().fg(Color::Blue).add_modifier(Modifier::UNDERLINED),
            ),
        ]),
    ];
    frame.render_widget(
        Paragraph::new(header).block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray)),
        ),
        chunks[0],
    );

    let body = Paragraph::new(detail_text::lines(&content.body))
        .wrap(Wrap { trim: false })
        .scroll((app.modal_scroll, 0));
    frame.render_widget(body, chunks[1]);
}
