use std::collections::{BTreeMap, BTreeSet};

use comfy_table::Table;

use crate::error::{Result, TallyError};
use crate::models::Ruleset;

/// Build the shorthand index: for every distinct category in the ruleset, the
/// shortest lowercase prefix not already taken by an earlier (sorted)
/// category. Two shapes are configuration errors, raised before any prompting
/// happens: a key that would spell out a different category's complete
/// lowercased name (typing that name at the prompt would resolve to the wrong
/// category), and exhausting a category's full length without a free key.
pub fn build(ruleset: &Ruleset) -> Result<BTreeMap<String, String>> {
    let categories: BTreeSet<&str> = ruleset
        .rules
        .iter()
        .filter_map(|r| r.category.as_deref())
        .filter(|c| !c.is_empty())
        .collect();
    let full_names: BTreeMap<String, &str> = categories
        .iter()
        .map(|c| (c.to_lowercase(), *c))
        .collect();

    let mut shorthands: BTreeMap<String, String> = BTreeMap::new();
    for &category in &categories {
        let lower: Vec<char> = category.to_lowercase().chars().collect();
        let mut assigned = false;
        for len in 1..=lower.len() {
            let key: String = lower[..len].iter().collect();
            if shorthands.contains_key(&key) {
                continue;
            }
            if let Some(&owner) = full_names.get(&key) {
                if owner != category {
                    return Err(TallyError::UnresolvableShorthand(category.to_string()));
                }
            }
            shorthands.insert(key, category.to_string());
            assigned = true;
            break;
        }
        if !assigned {
            return Err(TallyError::UnresolvableShorthand(category.to_string()));
        }
    }
    Ok(shorthands)
}

pub fn render_table(shorthands: &BTreeMap<String, String>) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Shorthand", "Category"]);
    for (key, category) in shorthands {
        table.add_row(vec![key.as_str(), category.as_str()]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Rule;

    fn ruleset_with(categories: &[&str]) -> Ruleset {
        Ruleset {
            rules: categories
                .iter()
                .map(|c| Rule::labeler(format!("MATCH {c}"), *c))
                .collect(),
        }
    }

    #[test]
    fn test_single_category_gets_one_letter_key() {
        let map = build(&ruleset_with(&["Food"])).unwrap();
        assert_eq!(map.get("f").map(String::as_str), Some("Food"));
    }

    #[test]
    fn test_shared_prefix_extends_key() {
        let map = build(&ruleset_with(&["Transport", "Travel"])).unwrap();
        // Sorted order: Transport claims "t", Travel falls through to "tr".
        assert_eq!(map.get("t").map(String::as_str), Some("Transport"));
        assert_eq!(map.get("tr").map(String::as_str), Some("Travel"));
    }

    #[test]
    fn test_keys_are_pairwise_distinct_and_map_back() {
        let names = ["Food", "Fun", "Fuel", "Rent", "Restaurants"];
        let map = build(&ruleset_with(&names)).unwrap();
        assert_eq!(map.len(), names.len());
        for (key, category) in &map {
            assert!(category.to_lowercase().starts_with(key.as_str()));
            assert!(names.contains(&category.as_str()));
        }
    }

    #[test]
    fn test_duplicate_categories_collapse() {
        let map = build(&ruleset_with(&["Food", "Food"])).unwrap();
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_full_prefix_collision_is_fatal() {
        let err = build(&ruleset_with(&["Food", "Fo"])).unwrap_err();
        match err {
            TallyError::UnresolvableShorthand(name) => {
                assert!(name == "Food" || name == "Fo");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_key_spelling_out_another_category_is_fatal() {
        // "Foam" would need "fo", which is the whole name of "Fo"; typing
        // "fo" at the prompt must never resolve to the wrong category.
        let err = build(&ruleset_with(&["Fo", "Foam"])).unwrap_err();
        assert!(matches!(err, TallyError::UnresolvableShorthand(_)));
    }

    #[test]
    fn test_own_full_name_is_a_valid_key() {
        let map = build(&ruleset_with(&["Food", "Fuel", "Fun"])).unwrap();
        // "Fun" ends up keyed by its own complete name.
        assert_eq!(map.get("fun").map(String::as_str), Some("Fun"));
    }

    #[test]
    fn test_empty_ruleset_yields_empty_index() {
        assert!(build(&Ruleset::default()).unwrap().is_empty());
    }

    #[test]
    fn test_rules_without_category_are_ignored() {
        let ruleset = Ruleset {
            rules: vec![Rule::remover("ATM")],
        };
        assert!(build(&ruleset).unwrap().is_empty());
    }
}
