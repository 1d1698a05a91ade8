use crate::models::{Ruleset, Transaction};

/// Joins multiple category labels on one transaction; its presence after a
/// full pass means overlapping rules hit the same row.
pub const CATEGORY_DELIMITER: &str = ", ";

/// Apply the full rule list to a transaction set, returning a new set.
///
/// Every category is recomputed from empty on every call; there is no
/// incremental path. Rules run in order: a `keep = false` rule drops matching
/// rows from the working set before any later rule sees them; a category rule
/// prepends its label to every matching row still in the set. Matching is
/// literal, case-sensitive substring containment.
pub fn apply_rules(transactions: &[Transaction], ruleset: &Ruleset) -> Vec<Transaction> {
    let mut out: Vec<Transaction> = transactions
        .iter()
        .map(|t| {
            let mut t = t.clone();
            t.category.clear();
            t
        })
        .collect();

    for rule in &ruleset.rules {
        if !rule.keep {
            out.retain(|t| !t.description.contains(&rule.string_to_match));
        }
        if let Some(category) = &rule.category {
            for txn in out
                .iter_mut()
                .filter(|t| t.description.contains(&rule.string_to_match))
            {
                txn.category = format!("{category}{CATEGORY_DELIMITER}{}", txn.category);
            }
        }
    }

    for txn in &mut out {
        txn.category = txn
            .category
            .trim_matches(|c| c == ',' || c == ' ')
            .to_string();
    }
    out
}

/// Rows labeled by more than one categorizing rule.
pub fn conflicts(transactions: &[Transaction]) -> Vec<&Transaction> {
    transactions
        .iter()
        .filter(|t| t.category.contains(CATEGORY_DELIMITER))
        .collect()
}
