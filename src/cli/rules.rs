use comfy_table::{Cell, Table};

use crate::error::{Result, TallyError};
use crate::models::Rule;
use crate::rulestore::RuleStore;
use crate::settings::load_settings;

pub fn add(pattern: &str, category: Option<&str>, drop: bool) -> Result<()> {
    let store = RuleStore::new(load_settings().ruleset_dir());
    let mut ruleset = store.load()?;
    let rule = match (drop, category) {
        (true, None) => Rule::remover(pattern),
        (false, Some(cat)) => Rule::labeler(pattern, cat),
        // A rule may both remove and carry a category; removal wins.
        _ => Rule {
            string_to_match: pattern.to_string(),
            keep: !drop,
            category: category.map(str::to_string),
        },
    };
    let action = describe_action(&rule);
    ruleset.rules.push(rule);
    store.save_with_backup(&ruleset)?;
    println!("Added rule: '{pattern}' \u{2192} {action}");
    Ok(())
}

fn describe_action(rule: &Rule) -> String {
    if !rule.keep {
        return "remove matches".to_string();
    }
    match rule.category.as_deref() {
        Some(cat) => format!("categorize as {cat}"),
        None => "keep matches".to_string(),
    }
}

pub fn list() -> Result<()> {
    let store = RuleStore::new(load_settings().ruleset_dir());
    let ruleset = store.load()?;

    let mut table = Table::new();
    table.set_header(vec!["#", "Match", "Action", "Category"]);
    for (i, rule) in ruleset.rules.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&rule.string_to_match),
            Cell::new(if rule.keep { "keep" } else { "remove" }),
            Cell::new(rule.category.as_deref().unwrap_or_default()),
        ]);
    }
    println!("Rules\n{table}");
    Ok(())
}

pub fn delete(number: usize) -> Result<()> {
    let store = RuleStore::new(load_settings().ruleset_dir());
    let mut ruleset = store.load()?;

    if number == 0 || number > ruleset.rules.len() {
        return Err(TallyError::Other(format!("No rule number {number}")));
    }
    let removed = ruleset.rules.remove(number - 1);
    store.save_with_backup(&ruleset)?;
    println!(
        "Deleted rule {number}: '{}' \u{2192} {}",
        removed.string_to_match,
        describe_action(&removed)
    );
    Ok(())
}
