use serde::{Deserialize, Deserializer};
use serde_json::Number;

/// Item grouping; each category is backed by its own JSON document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Projectiles,
    Artifacts,
    Trinkets,
}

impl Category {
    pub const ALL: [Category; 3] = [Self::Projectiles, Self::Artifacts, Self::Trinkets];

    pub fn next(self) -> Self {
        match self {
            Self::Projectiles => Self::Artifacts,
            Self::Artifacts => Self::Trinkets,
            Self::Trinkets => Self::Projectiles,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Projectiles => Self::Trinkets,
            Self::Artifacts => Self::Projectiles,
            Self::Trinkets => Self::Artifacts,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Projectiles => "Projectiles",
            Self::Artifacts => "Artifacts",
            Self::Trinkets => "Trinkets",
        }
    }

    /// Key used in source locations and CLI arguments.
    pub fn key(self) -> &'static str {
        match self {
            Self::Projectiles => "projectiles",
            Self::Artifacts => "artifacts",
            Self::Trinkets => "trinkets",
        }
    }

    /// Name of the JSON document under the source root.
    pub fn file_name(self) -> String {
        format!("{}.json", self.key())
    }
}

/// Selling price as found in the data: either a bare number or text that
/// may embed icon tokens such as `"3 Sand Dollar.png"`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SellingPrice {
    Amount(Number),
    Text(String),
}

impl SellingPrice {
    pub fn as_text(&self) -> String {
        match self {
            SellingPrice::Amount(n) => n.to_string(),
            SellingPrice::Text(s) => s.clone(),
        }
    }
}

/// A single record from a category document. Read-only once fetched.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Item {
    pub id: Option<String>,
    #[serde(deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[serde(deserialize_with = "null_as_empty")]
    pub image: String,
    pub damage: Option<Number>,
    pub magazine_size: Option<Number>,
    pub effects: Option<Vec<String>>,
    pub increased_effect: Option<String>,
    pub description: Option<String>,
    pub unlock: Option<String>,
    pub rarity: Option<String>,
    pub selling_price: Option<SellingPrice>,
    pub availabilities: Option<Vec<String>>,
}

/// Scraped records carry `null` where a name or image was not found.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Optional text fields only count when non-empty.
pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_cycle() {
        for c in Category::ALL {
            assert_eq!(c.next().prev(), c);
        }
        assert_eq!(Category::Trinkets.next(), Category::Projectiles);
    }

    #[test]
    fn test_category_file_name() {
        assert_eq!(Category::Artifacts.file_name(), "artifacts.json");
    }

    #[test]
    fn test_item_deserialize_full_record() {
        let json = r#"{
            "id": "seashell",
            "name": "Seashell",
            "type": "Basic",
            "image": "https://example.org/Seashell.png",
            "damage": 1,
            "magazine_size": 6,
            "effects": [],
            "description": "A humble shell.",
            "unlock": "Default",
            "rarity": "Common",
            "selling_price": "3 Sand Dollar.png",
            "availabilities": ["Shop", "Chest"],
            "extra": "ignored"
        }"#;
        let item: Item = serde_json::from_str(json).unwrap();
        assert_eq!(item.id.as_deref(), Some("seashell"));
        assert_eq!(item.kind.as_deref(), Some("Basic"));
        assert_eq!(item.damage.as_ref().map(|n| n.to_string()), Some("1".to_string()));
        assert_eq!(item.effects, Some(vec![]));
        assert_eq!(
            item.selling_price,
            Some(SellingPrice::Text("3 Sand Dollar.png".to_string()))
        );
        assert_eq!(item.availabilities.as_ref().map(|a| a.len()), Some(2));
    }

    #[test]
    fn test_item_deserialize_absent_vs_empty() {
        let absent: Item = serde_json::from_str(r#"{"name":"A","image":"a.png"}"#).unwrap();
        assert!(absent.effects.is_none());
        assert!(absent.availabilities.is_none());
        assert!(absent.id.is_none());

        let empty: Item =
            serde_json::from_str(r#"{"name":"A","image":"a.png","effects":[],"availabilities":[]}"#)
                .unwrap();
        assert_eq!(empty.effects, Some(vec![]));
        assert_eq!(empty.availabilities, Some(vec![]));
    }

    #[test]
    fn test_null_name_and_image_become_empty() {
        let item: Item =
            serde_json::from_str(r#"{"id":"seashell","name":null,"image":null}"#).unwrap();
        assert_eq!(item.name, "");
        assert_eq!(item.image, "");
        assert_eq!(item.id.as_deref(), Some("seashell"));
    }

    #[test]
    fn test_numeric_selling_price() {
        let item: Item = serde_json::from_str(r#"{"name":"A","selling_price":12}"#).unwrap();
        let price = item.selling_price.unwrap();
        assert!(matches!(price, SellingPrice::Amount(_)));
        assert_eq!(price.as_text(), "12");
    }
}
