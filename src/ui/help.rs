use crate::ui::centered_rect;
use ratatui::{
    Frame,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

fn section(title: &'static str) -> Line<'static> {
    Line::from(Span::styled(
        title,
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ))
}

fn binding(keys: &'static str, action: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(keys, Style::default().fg(Color::Yellow)),
        Span::raw(action),
    ])
}

pub fn render(frame: &mut Frame) {
    let area = centered_rect(60, 70, frame.area());

    // Clear the area behind the popup
    frame.render_widget(Clear, area);

    let help_text = vec![
        Line::from(""),
        section("  Global"),
        binding("    ?         ", "Toggle this help"),
        binding("    q         ", "Quit application"),
        binding("    1/2/3     ", "Projectiles / Artifacts / Trinkets"),
        binding("    Tab/S-Tab ", "Next / previous category"),
        binding("    r         ", "Reload current category"),
        binding("    s         ", "Switch sort: type+name / id"),
        Line::from(""),
        section("  Grid"),
        binding("    ←↑↓→/hjkl ", "Move cursor (shows description)"),
        binding("    g/G       ", "First / last item"),
        binding("    Enter     ", "Open item details"),
        binding("    Mouse     ", "Hover shows description, click opens"),
        Line::from(""),
        section("  Item Details"),
        binding("    Esc/q     ", "Close"),
        binding("    ↑/↓       ", "Scroll"),
        binding("    Enter     ", "Open the item under the cursor"),
        binding("    Click     ", "Outside the panel closes it"),
        Line::from(""),
    ];

    let help = Paragraph::new(help_text)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help: Keybindings ")
                .title_bottom(
                    Line::from(" Press ? or Esc to close ")
                        .style(Style::default().fg(Color::DarkGray)),
                ),
        )
        .style(Style::default().fg(Color::White));

    frame.render_widget(help, area);
}
