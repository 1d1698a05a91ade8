mod cli;
mod error;
mod fmt;
mod ingest;
mod matcher;
mod models;
mod prompt;
mod rulestore;
mod session;
mod settings;
mod shorthand;

use clap::Parser;

use cli::{Cli, Commands, RulesCommands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { data_dir } => cli::init::run(data_dir),
        Commands::Categorize => cli::categorize::run(),
        Commands::Apply => cli::apply::run(),
        Commands::Rules { command } => match command {
            RulesCommands::Add {
                pattern,
                category,
                drop,
            } => cli::rules::add(&pattern, category.as_deref(), drop),
            RulesCommands::List => cli::rules::list(),
            RulesCommands::Delete { number } => cli::rules::delete(number),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
