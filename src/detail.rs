use crate::item::{Item, non_empty};
use crate::price::{PriceSegment, parse_price};

/// One line of an item's detail view, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailField {
    Type(String),
    Damage(String),
    MagazineSize(String),
    /// Empty list means the item explicitly has no effects.
    Effects(Vec<String>),
    IncreasedEffect(String),
    Description(String),
    Unlock(String),
    Rarity(String),
    SellingPrice(Vec<PriceSegment>),
    /// Empty list means the item is available everywhere.
    Availabilities(Vec<String>),
}

impl DetailField {
    /// Leading label, if the field has one.
    pub fn label(&self) -> Option<&'static str> {
        match self {
            DetailField::Type(_) => Some("Type"),
            DetailField::Damage(_) => Some("Damage"),
            DetailField::MagazineSize(_) => Some("Magazine size"),
            DetailField::Effects(_) => Some("Effects"),
            DetailField::IncreasedEffect(_) => Some("Increased effect"),
            DetailField::Description(_) => None,
            DetailField::Unlock(_) => Some("Unlock"),
            DetailField::Rarity(_) => Some("Rarity"),
            DetailField::SellingPrice(_) => Some("Selling price"),
            DetailField::Availabilities(_) => Some("Availabilities"),
        }
    }

    /// Whether the label is drawn with emphasis.
    pub fn emphasized(&self) -> bool {
        matches!(self, DetailField::IncreasedEffect(_))
    }
}

pub const NO_EFFECTS: &str = "None";
pub const AVAILABLE_EVERYWHERE: &str = "Everywhere";

/// Structured detail view of an item, independent of any rendering surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub title: Option<String>,
    pub fields: Vec<DetailField>,
}

impl DetailView {
    pub fn build(item: &Item, include_title: bool) -> Self {
        let mut fields = Vec::new();

        if let Some(kind) = non_empty(&item.kind) {
            fields.push(DetailField::Type(kind.to_string()));
        }
        if let Some(damage) = &item.damage {
            fields.push(DetailField::Damage(damage.to_string()));
        }
        if let Some(size) = &item.magazine_size {
            fields.push(DetailField::MagazineSize(size.to_string()));
        }
        if let Some(effects) = &item.effects {
            fields.push(DetailField::Effects(effects.clone()));
        }
        if let Some(effect) = non_empty(&item.increased_effect) {
            fields.push(DetailField::IncreasedEffect(effect.to_string()));
        }
        if let Some(description) = non_empty(&item.description) {
            fields.push(DetailField::Description(description.to_string()));
        }
        if let Some(unlock) = non_empty(&item.unlock) {
            fields.push(DetailField::Unlock(unlock.to_string()));
        }
        if let Some(rarity) = non_empty(&item.rarity) {
            fields.push(DetailField::Rarity(rarity.to_string()));
        }
        if let Some(price) = &item.selling_price {
            fields.push(DetailField::SellingPrice(parse_price(&price.as_text())));
        }
        if let Some(places) = &item.availabilities {
            fields.push(DetailField::Availabilities(places.clone()));
        }

        DetailView {
            title: include_title.then(|| item.name.clone()),
            fields,
        }
    }
}

/// Comma-joined list, or `empty` when the list has no entries.
pub fn join_or(values: &[String], empty: &str) -> String {
    if values.is_empty() {
        empty.to_string()
    } else {
        values.join(", ")
    }
}

/// Header and body shown in the modal for a selected item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalContent {
    pub name: String,
    pub image: String,
    pub body: DetailView,
}

impl ModalContent {
    pub fn build(item: &Item) -> Self {
        ModalContent {
            name: item.name.clone(),
            image: item.image.clone(),
            body: DetailView::build(item, false),
        }
    }
}
