//! HTML rendering of detail views and whole category pages.

use crate::detail::{
    AVAILABLE_EVERYWHERE, DetailField, DetailView, ModalContent, NO_EFFECTS, join_or,
};
use crate::item::{Category, Item};
use crate::price::PriceSegment;
use std::fmt::Write;

/// Escape text for use in element content and quoted attributes.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Renders detail views to markup. Icon assets are resolved against
/// `asset_base`.
#[derive(Debug, Clone)]
pub struct HtmlRenderer {
    asset_base: String,
}

impl HtmlRenderer {
    pub fn new(asset_base: impl Into<String>) -> Self {
        let asset_base: String = asset_base.into();
        Self {
            asset_base: asset_base.trim_end_matches('/').to_string(),
        }
    }

    pub fn detail(&self, view: &DetailView) -> String {
        let mut html = String::new();
        if let Some(title) = &view.title {
            let _ = write!(html, "<h2>{}</h2>", escape_html(title));
        }
        for field in &view.fields {
            html.push_str(&self.field(field));
        }
        html
    }

    fn field(&self, field: &DetailField) -> String {
        let value = match field {
            DetailField::Type(v)
            | DetailField::Damage(v)
            | DetailField::MagazineSize(v)
            | DetailField::IncreasedEffect(v)
            | DetailField::Description(v)
            | DetailField::Unlock(v)
            | DetailField::Rarity(v) => escape_html(v),
            DetailField::Effects(effects) => escape_html(&join_or(effects, NO_EFFECTS)),
            DetailField::Availabilities(places) => {
                escape_html(&join_or(places, AVAILABLE_EVERYWHERE))
            }
            DetailField::SellingPrice(segments) => self.price(segments),
        };

        match field.label() {
            Some(label) if field.emphasized() => {
                format!("<p><strong>{label}:</strong> {value}</p>")
            }
            Some(label) => format!("<p>{label}: {value}</p>"),
            None => format!("<p>{value}</p>"),
        }
    }

    fn price(&self, segments: &[PriceSegment]) -> String {
        let mut html = String::new();
        for segment in segments {
            match segment {
                PriceSegment::Text(text) => html.push_str(&escape_html(text)),
                PriceSegment::Icon { icon, quantity } => {
                    if let Some(q) = quantity {
                        html.push_str(q);
                    }
                    let _ = write!(
                        html,
                        r#"<img src="{}/{}" alt="{}" class="inline-icon">"#,
                        escape_html(&self.asset_base),
                        icon.asset_file(),
                        icon.alt()
                    );
                }
            }
        }
        html
    }

    /// Modal body: image and name header followed by the untitled details.
    pub fn modal(&self, content: &ModalContent) -> String {
        format!(
            concat!(
                r#"<div class="modal-title">"#,
                r#"<img class="modal-img resize-image" src="{image}" alt="{name}">"#,
                r#"<h2>{name}</h2></div>"#,
                r#"<div class="modal-text">{body}</div>"#
            ),
            image = escape_html(&content.image),
            name = escape_html(&content.name),
            body = self.detail(&content.body),
        )
    }

    /// Standalone page for one category. Hover panels use CSS, the modal
    /// uses `:target` so the page works without scripts.
    pub fn page(&self, category: Category, items: &[Item]) -> String {
        let mut tabs = String::new();
        for c in Category::ALL {
            let class = if c == category { "tab active" } else { "tab" };
            let _ = write!(
                tabs,
                r#"<a class="{class}" id="{key}" href="{key}.html">{label}</a>"#,
                key = c.key(),
                label = c.label()
            );
        }

        let mut tiles = String::new();
        let mut modals = String::new();
        for (index, item) in items.iter().enumerate() {
            let name = escape_html(&item.name);
            let _ = write!(
                tiles,
                concat!(
                    r#"<div class="item">"#,
                    r##"<a href="#item-{index}"><img class="itemImg" src="{image}" alt="{name}"></a>"##,
                    r#"<div class="description">{panel}</div>"#,
                    r#"</div>"#
                ),
                index = index,
                image = escape_html(&item.image),
                name = name,
                panel = self.detail(&DetailView::build(item, true)),
            );
            let _ = write!(
                modals,
                concat!(
                    r#"<div class="modal" id="item-{index}">"#,
                    r##"<a class="backdrop" href="#"></a>"##,
                    r#"<div class="modal-content">"#,
                    r##"<a class="close" href="#">&times;</a>"##,
                    r#"<div class="content">{content}</div>"#,
                    r#"</div></div>"#
                ),
                index = index,
                content = self.modal(&ModalContent::build(item)),
            );
        }

        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{title}</title>
<style>{style}</style>
</head>
<body>
<nav>{tabs}</nav>
<div id="items">{tiles}</div>
{modals}
</body>
</html>
"#,
            title = category.label(),
            style = PAGE_STYLE,
        )
    }
}

const PAGE_STYLE: &str = "\
nav { display: flex; gap: 1rem; margin-bottom: 1rem; }
.tab.active { font-weight: bold; }
#items { display: flex; flex-wrap: wrap; gap: 0.5rem; }
.item { position: relative; }
.itemImg { width: 64px; height: 64px; }
.item .description { display: none; position: absolute; z-index: 1; background: #222; color: #eee; padding: 0.5rem; width: 18rem; }
.item:hover .description { display: block; }
.modal { display: none; position: fixed; inset: 0; }
.modal:target { display: block; }
.backdrop { position: absolute; inset: 0; background: rgba(0, 0, 0, 0.6); }
.modal-content { position: relative; margin: 10vh auto; max-width: 40rem; background: #fff; padding: 1rem; }
.close { float: right; text-decoration: none; font-size: 1.5rem; }
.inline-icon { height: 1em; vertical-align: middle; }
";

#[cfg(test)]
mod tests {
    use super::*;

    fn renderer() -> HtmlRenderer {
        HtmlRenderer::new("./assets/")
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_detail_with_title_and_lists() {
        let item = Item {
            name: "Seashell".to_string(),
            kind: Some("Basic".to_string()),
            effects: Some(vec![]),
            availabilities: Some(vec!["Shop".to_string(), "Chest".to_string()]),
            increased_effect: Some("Pierce".to_string()),
            ..Default::default()
        };
        let html = renderer().detail(&DetailView::build(&item, true));
        assert_eq!(
            html,
            concat!(
                "<h2>Seashell</h2>",
                "<p>Type: Basic</p>",
                "<p>Effects: None</p>",
                "<p><strong>Increased effect:</strong> Pierce</p>",
                "<p>Availabilities: Shop, Chest</p>"
            )
        );
    }

    #[test]
    fn test_price_icons_render_as_images() {
        let item: Item =
            serde_json::from_str(r#"{"name":"X","selling_price":"3 Sand Dollar.png"}"#).unwrap();
        let html = renderer().detail(&DetailView::build(&item, false));
        assert_eq!(
            html,
            r#"<p>Selling price: 3<img src="./assets/50px-Sand_Dollar.webp" alt="Sand Dollar" class="inline-icon"></p>"#
        );
    }

    #[test]
    fn test_plank_without_quantity_has_no_leading_number() {
        let item: Item =
            serde_json::from_str(r#"{"name":"X","selling_price":"Plank.png"}"#).unwrap();
        let html = renderer().detail(&DetailView::build(&item, false));
        assert!(html.contains(r#"Selling price: <img src="./assets/50px-Plank.webp""#));
    }

    #[test]
    fn test_fields_are_escaped() {
        let item = Item {
            name: "<script>alert(1)</script>".to_string(),
            description: Some("a < b".to_string()),
            image: r#"x" onerror="boom"#.to_string(),
            ..Default::default()
        };
        let html = renderer().page(Category::Trinkets, &[item]);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(html.contains("a &lt; b"));
        assert!(!html.contains(r#"onerror="boom""#));
    }

    #[test]
    fn test_modal_header() {
        let item = Item {
            name: "Anchor".to_string(),
            image: "anchor.png".to_string(),
            rarity: Some("Epic".to_string()),
            ..Default::default()
        };
        let html = renderer().modal(&ModalContent::build(&item));
        assert!(html.starts_with(r#"<div class="modal-title"><img class="modal-img resize-image" src="anchor.png" alt="Anchor"><h2>Anchor</h2></div>"#));
        assert!(html.ends_with(r#"<div class="modal-text"><p>Rarity: Epic</p></div>"#));
    }

    #[test]
    fn test_page_has_one_tile_and_modal_per_item() {
        let items = vec![
            Item {
                name: "A".to_string(),
                ..Default::default()
            },
            Item {
                name: "B".to_string(),
                ..Default::default()
            },
        ];
        let html = renderer().page(Category::Projectiles, &items);
        assert_eq!(html.matches(r#"class="itemImg""#).count(), 2);
        assert_eq!(html.matches(r#"class="modal" id="item-"#).count(), 2);
        assert!(html.contains(r#"<a class="tab active" id="projectiles""#));
    }
}
