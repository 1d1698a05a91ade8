use colored::Colorize;

use crate::error::Result;
use crate::ingest::{load_transactions, sort_most_recent_first, write_transactions, EXPORT_FILE};
use crate::prompt::ConsolePrompt;
use crate::rulestore::RuleStore;
use crate::session::{self, SessionOutcome};
use crate::settings::load_settings;

pub fn run() -> Result<()> {
    let settings = load_settings();
    let store = RuleStore::new(settings.ruleset_dir());
    let mut ruleset = store.load()?;

    let mut transactions = load_transactions(&settings.data_dir())?;
    sort_most_recent_first(&mut transactions);
    println!("{} transactions loaded", transactions.len());

    let mut prompt = ConsolePrompt;
    let result = session::run(&transactions, &mut ruleset, &store, &mut prompt)?;

    match result.outcome {
        SessionOutcome::Completed => {
            println!("{}", "All transactions categorized.".green())
        }
        SessionOutcome::Exited => println!("{}", "Session ended early.".yellow()),
        SessionOutcome::Conflict => {
            println!("{}", "Session stopped on a rule conflict.".yellow())
        }
    }

    store.save_with_backup(&ruleset)?;
    let export = settings.data_dir().join(EXPORT_FILE);
    write_transactions(&export, &result.transactions)?;
    println!(
        "Saved {} categorized transactions to {}",
        result.transactions.len(),
        export.display()
    );
    Ok(())
}
