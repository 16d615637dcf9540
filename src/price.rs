//! Icon substitution for price strings.
//!
//! Price text from the wiki export embeds asset file names, e.g.
//! `"3 Sand Dollar.png"`. These are split into plain text and icon
//! segments so each presentation layer can draw them its own way.

use regex::Regex;
use std::sync::LazyLock;

static ICON_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9]*)\s*(Sand Dollar|Plank)\.png").expect("icon token pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceIcon {
    SandDollar,
    Plank,
}

impl PriceIcon {
    pub fn alt(self) -> &'static str {
        match self {
            PriceIcon::SandDollar => "Sand Dollar",
            PriceIcon::Plank => "Plank",
        }
    }

    /// File name of the icon asset, relative to the configured asset base.
    pub fn asset_file(self) -> &'static str {
        match self {
            PriceIcon::SandDollar => "50px-Sand_Dollar.webp",
            PriceIcon::Plank => "50px-Plank.webp",
        }
    }

    fn from_token(token: &str) -> Option<Self> {
        match token {
            "Sand Dollar" => Some(PriceIcon::SandDollar),
            "Plank" => Some(PriceIcon::Plank),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PriceSegment {
    Text(String),
    Icon {
        icon: PriceIcon,
        /// Digits preceding the token, kept only when their value exceeds 1.
        quantity: Option<String>,
    },
}

/// Split price text into text and icon segments.
pub fn parse_price(text: &str) -> Vec<PriceSegment> {
    let mut segments = Vec::new();
    let mut last = 0;

    for caps in ICON_TOKEN.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        let Some(icon) = caps.get(2).and_then(|m| PriceIcon::from_token(m.as_str())) else {
            continue;
        };
        if whole.start() > last {
            segments.push(PriceSegment::Text(text[last..whole.start()].to_string()));
        }
        let digits = caps.get(1).map(|m| m.as_str()).unwrap_or("");
        let quantity = exceeds_one(digits).then(|| digits.to_string());
        segments.push(PriceSegment::Icon { icon, quantity });
        last = whole.end();
    }

    if last < text.len() {
        segments.push(PriceSegment::Text(text[last..].to_string()));
    }
    segments
}

fn exceeds_one(digits: &str) -> bool {
    let significant = digits.trim_start_matches('0');
    significant.len() > 1 || significant > "1"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantity_before_sand_dollar() {
        let segments = parse_price("3 Sand Dollar.png");
        assert_eq!(
            segments,
            vec![PriceSegment::Icon {
                icon: PriceIcon::SandDollar,
                quantity: Some("3".to_string()),
            }]
        );
    }

    #[test]
    fn test_plank_without_quantity() {
        let segments = parse_price("Plank.png");
        assert_eq!(
            segments,
            vec![PriceSegment::Icon {
                icon: PriceIcon::Plank,
                quantity: None,
            }]
        );
    }

    #[test]
    fn test_quantity_of_one_is_omitted() {
        let segments = parse_price("1 Plank.png");
        assert_eq!(
            segments,
            vec![PriceSegment::Icon {
                icon: PriceIcon::Plank,
                quantity: None,
            }]
        );
    }

    #[test]
    fn test_mixed_text_and_tokens() {
        let segments = parse_price("12 Sand Dollar.png or 2 Plank.png each");
        assert_eq!(
            segments,
            vec![
                PriceSegment::Icon {
                    icon: PriceIcon::SandDollar,
                    quantity: Some("12".to_string()),
                },
                PriceSegment::Text(" or ".to_string()),
                PriceSegment::Icon {
                    icon: PriceIcon::Plank,
                    quantity: Some("2".to_string()),
                },
                PriceSegment::Text(" each".to_string()),
            ]
        );
    }

    #[test]
    fn test_plain_text_is_untouched() {
        assert_eq!(
            parse_price("Not for sale"),
            vec![PriceSegment::Text("Not for sale".to_string())]
        );
        assert!(parse_price("").is_empty());
    }

    #[test]
    fn test_only_ascii_digits_form_a_quantity() {
        let segments = parse_price("٣ Sand Dollar.png");
        assert_eq!(
            segments,
            vec![
                PriceSegment::Text("٣".to_string()),
                PriceSegment::Icon {
                    icon: PriceIcon::SandDollar,
                    quantity: None,
                },
            ]
        );
    }

    #[test]
    fn test_exceeds_one() {
        assert!(!exceeds_one(""));
        assert!(!exceeds_one("0"));
        assert!(!exceeds_one("1"));
        assert!(!exceeds_one("01"));
        assert!(exceeds_one("2"));
        assert!(exceeds_one("10"));
        assert!(exceeds_one("007"));
    }
}
