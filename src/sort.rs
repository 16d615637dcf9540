use crate::item::Item;
use serde::Deserialize;
use std::cmp::Ordering;

/// Ordering applied to a category before it is mounted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
pub enum SortPolicy {
    /// Lower-cased type, then collated name.
    #[default]
    #[serde(rename = "type-name")]
    #[value(name = "type-name")]
    TypeThenName,
    /// Collated id; items without an id come last.
    #[serde(rename = "id")]
    #[value(name = "id")]
    Id,
}

impl SortPolicy {
    pub fn label(self) -> &'static str {
        match self {
            SortPolicy::TypeThenName => "type, name",
            SortPolicy::Id => "id",
        }
    }

    pub fn compare(self, a: &Item, b: &Item) -> Ordering {
        match self {
            SortPolicy::TypeThenName => compare_type_then_name(a, b),
            SortPolicy::Id => compare_id(a, b),
        }
    }
}

/// Stable sort of `items` according to `policy`.
pub fn sort_items(items: &mut [Item], policy: SortPolicy) {
    items.sort_by(|a, b| policy.compare(a, b));
}

/// Case-insensitive comparison with the raw text as the final tiebreak,
/// so strings differing only in case still have a fixed order.
pub fn collate(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

fn compare_type_then_name(a: &Item, b: &Item) -> Ordering {
    let type_a = a.kind.as_deref().unwrap_or("").to_lowercase();
    let type_b = b.kind.as_deref().unwrap_or("").to_lowercase();
    type_a.cmp(&type_b).then_with(|| collate(&a.name, &b.name))
}

fn compare_id(a: &Item, b: &Item) -> Ordering {
    match (a.id.as_deref(), b.id.as_deref()) {
        (Some(x), Some(y)) => collate(x, y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn item(id: Option<&str>, name: &str, kind: Option<&str>) -> Item {
        Item {
            id: id.map(str::to_string),
            name: name.to_string(),
            kind: kind.map(str::to_string),
            ..Default::default()
        }
    }

    fn names(items: &[Item]) -> Vec<&str> {
        items.iter().map(|i| i.name.as_str()).collect()
    }

    #[test]
    fn test_same_type_breaks_tie_on_name() {
        let mut items = vec![
            item(Some("b"), "Zed", Some("Gun")),
            item(Some("a"), "Arc", Some("Gun")),
        ];
        sort_items(&mut items, SortPolicy::TypeThenName);
        assert_eq!(names(&items), vec!["Arc", "Zed"]);
    }

    #[test]
    fn test_type_is_case_insensitive_and_missing_type_first() {
        let mut items = vec![
            item(None, "Cannon", Some("heavy")),
            item(None, "Pebble", Some("Basic")),
            item(None, "Mystery", None),
        ];
        sort_items(&mut items, SortPolicy::TypeThenName);
        assert_eq!(names(&items), vec!["Mystery", "Pebble", "Cannon"]);
    }

    #[test]
    fn test_name_collation_ignores_case() {
        let mut items = vec![item(None, "banana", None), item(None, "Apple", None)];
        sort_items(&mut items, SortPolicy::TypeThenName);
        assert_eq!(names(&items), vec!["Apple", "banana"]);
    }

    #[test]
    fn test_id_policy_puts_missing_ids_last() {
        let mut items = vec![
            item(None, "NoId", None),
            item(Some("b"), "B", None),
            item(Some("a"), "A", None),
        ];
        sort_items(&mut items, SortPolicy::Id);
        assert_eq!(names(&items), vec!["A", "B", "NoId"]);
    }

    #[test]
    fn test_policy_default_is_type_then_name() {
        assert_eq!(SortPolicy::default(), SortPolicy::TypeThenName);
    }

    fn arb_item() -> impl Strategy<Value = Item> {
        (
            proptest::option::of("[a-cA-C]{0,2}"),
            "[a-cA-C]{0,3}",
            proptest::option::of("[a-bA-B]{0,2}"),
        )
            .prop_map(|(id, name, kind)| Item {
                id,
                name,
                kind,
                ..Default::default()
            })
    }

    fn arb_policy() -> impl Strategy<Value = SortPolicy> {
        prop_oneof![Just(SortPolicy::TypeThenName), Just(SortPolicy::Id)]
    }

    proptest! {
        #[test]
        fn prop_comparator_is_antisymmetric(a in arb_item(), b in arb_item(), p in arb_policy()) {
            prop_assert_eq!(p.compare(&a, &b), p.compare(&b, &a).reverse());
        }

        #[test]
        fn prop_comparator_is_transitive(
            a in arb_item(), b in arb_item(), c in arb_item(), p in arb_policy()
        ) {
            if p.compare(&a, &b) != Ordering::Greater && p.compare(&b, &c) != Ordering::Greater {
                prop_assert_ne!(p.compare(&a, &c), Ordering::Greater);
            }
        }

        #[test]
        fn prop_sort_is_idempotent(mut items in proptest::collection::vec(arb_item(), 0..12), p in arb_policy()) {
            sort_items(&mut items, p);
            let once = items.clone();
            sort_items(&mut items, p);
            prop_assert_eq!(once, items);
        }
    }
}
