use crate::detail::{AVAILABLE_EVERYWHERE, DetailField, DetailView, NO_EFFECTS, join_or};
use crate::price::PriceSegment;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

/// Terminal rendering of a detail view. Text is drawn as-is, never
/// interpreted as markup.
pub fn lines(view: &DetailView) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    if let Some(title) = &view.title {
        lines.push(Line::from(Span::styled(
            title.clone(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));
    }

    for field in &view.fields {
        let mut spans = Vec::new();
        if let Some(label) = field.label() {
            let style = if field.emphasized() {
                Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            spans.push(Span::styled(format!("{}: ", label), style));
        }
        spans.extend(value_spans(field));
        lines.push(Line::from(spans));
    }
    lines
}

fn value_spans(field: &DetailField) -> Vec<Span<'static>> {
    let plain = |s: &str| vec![Span::styled(s.to_string(), Style::default().fg(Color::White))];
    match field {
        DetailField::Type(v)
        | DetailField::Damage(v)
        | DetailField::MagazineSize(v)
        | DetailField::IncreasedEffect(v)
        | DetailField::Unlock(v)
        | DetailField::Rarity(v) => plain(v),
        DetailField::Description(v) => vec![Span::styled(
            v.clone(),
            Style::default().add_modifier(Modifier::ITALIC),
        )],
        DetailField::Effects(effects) => plain(&join_or(effects, NO_EFFECTS)),
        DetailField::Availabilities(places) => plain(&join_or(places, AVAILABLE_EVERYWHERE)),
        DetailField::SellingPrice(segments) => segments
            .iter()
            .flat_map(|segment| match segment {
                PriceSegment::Text(text) => vec![Span::raw(text.clone())],
                PriceSegment::Icon { icon, quantity } => {
                    let mut spans = Vec::new();
                    if let Some(q) = quantity {
                        spans.push(Span::styled(
                            format!("{} ", q),
                            Style::default().fg(Color::White),
                        ));
                    }
                    spans.push(Span::styled(
                        format!("[{}]", icon.alt()),
                        Style::default().fg(Color::Yellow),
                    ));
                    spans
                }
            })
            .collect(),
    }
}
