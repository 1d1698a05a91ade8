pub mod apply;
pub mod categorize;
pub mod init;
pub mod rules;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tally", about = "Rule-based personal transaction categorizer.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Set up tally: choose a data directory for account CSVs and rulesets.
    Init {
        /// Path for tally data (default: ~/Documents/tally)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
    },
    /// Interactively categorize transactions, growing the ruleset as you go.
    Categorize,
    /// Re-apply the saved ruleset without prompting and export the result.
    Apply,
    /// Manage matching rules.
    Rules {
        #[command(subcommand)]
        command: RulesCommands,
    },
}

#[derive(Subcommand)]
pub enum RulesCommands {
    /// Add a rule.
    Add {
        /// Literal substring to match against transaction descriptions
        pattern: String,
        /// Category to assign to matching transactions
        #[arg(long)]
        category: Option<String>,
        /// Remove matching transactions instead of keeping them
        #[arg(long)]
        drop: bool,
    },
    /// List all rules in order.
    List,
    /// Delete a rule by its list position.
    Delete {
        /// 1-based rule number as shown by `rules list`
        number: usize,
    },
}
