use crate::app::App;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const TILE_WIDTH: u16 = 22;
pub const TILE_HEIGHT: u16 = 4;

fn inner(grid: Rect) -> Rect {
    Block::default().borders(Borders::ALL).inner(grid)
}

/// Number of tile columns that fit in the grid region.
pub fn columns(grid: Rect) -> usize {
    ((inner(grid).width / TILE_WIDTH) as usize).max(1)
}

pub fn visible_rows(grid: Rect) -> usize {
    (inner(grid).height / TILE_HEIGHT) as usize
}

/// Screen rectangle of tile `index`, if it is scrolled into view.
pub fn tile_rect(grid: Rect, scroll_row: usize, index: usize) -> Option<Rect> {
    let columns = columns(grid);
    let row = index / columns;
    if row < scroll_row || row >= scroll_row + visible_rows(grid) {
        return None;
    }
    let area = inner(grid);
    let x = area.x + (index % columns) as u16 * TILE_WIDTH;
    let y = area.y + (row - scroll_row) as u16 * TILE_HEIGHT;
    Some(Rect::new(x, y, TILE_WIDTH.min(area.right() - x), TILE_HEIGHT))
}

/// Index of the tile under a screen position.
pub fn tile_at(app: &App, column: u16, row: u16) -> Option<usize> {
    let grid = crate::ui::screen_layout(app.area).grid;
    tile_index_at(grid, app.scroll_row, app.tiles().len(), column, row)
}

/// Hit-test against the tiles actually drawn in `grid`.
fn tile_index_at(grid: Rect, scroll_row: usize, len: usize, column: u16, row: u16) -> Option<usize> {
    let area = inner(grid);
    if column < area.x || row < area.y || column >= area.right() || row >= area.bottom() {
        return None;
    }
    let col = ((column - area.x) / TILE_WIDTH) as usize;
    let visible_row = ((row - area.y) / TILE_HEIGHT) as usize;
    if col >= columns(grid) || visible_row >= visible_rows(grid) {
        return None;
    }
    let index = (scroll_row + visible_row) * columns(grid) + col;
    (index < len).then_some(index)
}

pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let tiles = app.tiles();
    let title = if app.loading {
        format!(" {} (loading) ", app.category.label())
    } else {
        format!(" {} ", app.category.label())
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(title)
        .title_bottom(
            Line::from(format!(
                " {} of {} ",
                if tiles.is_empty() { 0 } else { app.cursor + 1 },
                tiles.len()
            ))
            .alignment(Alignment::Right),
        );
    frame.render_widget(block, area);

    let label_width = (TILE_WIDTH - 2) as usize;
    for (index, tile) in tiles.iter().enumerate() {
        let Some(rect) = tile_rect(area, app.scroll_row, index) else {
            continue;
        };
        let selected = index == app.cursor;
        let border = if selected {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let lines = vec![
            Line::from(Span::styled(
                truncate_str(&tile.thumbnail.name, label_width),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                truncate_str(tile.thumbnail.kind.as_deref().unwrap_or(""), label_width),
                Style::default().fg(Color::DarkGray),
            )),
        ];
        let widget = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::LEFT | Borders::RIGHT)
                .border_style(border),
        );
        frame.render_widget(widget, rect);
    }
}

/// Truncate a string to `max_width` columns, adding "…" if truncated.
pub fn truncate_str(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut width = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if width + w + 1 > max_width {
            break;
        }
        width += w;
        result.push(c);
    }
    result.push('…');
    result
}
