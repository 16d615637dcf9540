use crate::app::App;
use crate::item::Category;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Tabs},
};

pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let titles: Vec<Line> = Category::ALL
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let style = if *c == app.category {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            Line::from(Span::styled(format!("{} {}", i + 1, c.label()), style))
        })
        .collect();

    let selected = Category::ALL
        .iter()
        .position(|c| *c == app.category)
        .unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(selected)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Item Catalog "),
        )
        .highlight_style(Style::default().fg(Color::Cyan));
    frame.render_widget(tabs, area);
}
