use colored::Colorize;

use crate::error::Result;
use crate::ingest::{load_transactions, sort_most_recent_first, write_transactions, EXPORT_FILE};
use crate::matcher::{apply_rules, conflicts};
use crate::rulestore::RuleStore;
use crate::settings::load_settings;

pub fn run() -> Result<()> {
    let settings = load_settings();
    let ruleset = RuleStore::new(settings.ruleset_dir()).load()?;

    let mut transactions = load_transactions(&settings.data_dir())?;
    sort_most_recent_first(&mut transactions);
    let loaded = transactions.len();

    let categorized = apply_rules(&transactions, &ruleset);
    let removed = loaded - categorized.len();
    let uncategorized = categorized.iter().filter(|t| t.is_uncategorized()).count();

    let export = settings.data_dir().join(EXPORT_FILE);
    write_transactions(&export, &categorized)?;

    println!(
        "{} loaded, {} removed, {} categorized, {} still uncategorized",
        loaded,
        removed,
        categorized.len() - uncategorized,
        uncategorized
    );
    for txn in conflicts(&categorized) {
        println!(
            "{}",
            format!(
                "Multiple categories: {} \u{2192} [{}]",
                txn.description, txn.category
            )
            .red()
        );
    }
    println!("Saved to {}", export.display());
    Ok(())
}
