use colored::Colorize;

use crate::error::Result;
use crate::fmt::money;
use crate::matcher::{apply_rules, conflicts};
use crate::models::{Rule, Ruleset, Transaction};
use crate::prompt::Prompt;
use crate::rulestore::RuleStore;
use crate::shorthand;

/// Typed case-insensitively at the category prompt to end the session.
pub const EXIT_SENTINEL: &str = "EXIT";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Every remaining transaction carries a category.
    Completed,
    /// The user typed the exit sentinel; uncategorized rows remain.
    Exited,
    /// Overlapping rules labeled one row twice. Hard stop for manual rule
    /// editing; no automatic resolution.
    Conflict,
}

#[derive(Debug)]
pub struct SessionResult {
    pub transactions: Vec<Transaction>,
    pub outcome: SessionOutcome,
}

/// Interactive refinement loop. Walks the uncategorized transactions in the
/// caller's row order (typically most-recent-first), prompts for a category
/// per row, appends a rule for each answer and recomputes the whole set from
/// the original `transactions` base. The ruleset is autosaved after every
/// completed iteration; the caller owns the full save at session end.
///
/// Declining rule promotion still appends an exact-description rule;
/// otherwise the one-off categorization would be wiped by the next full
/// recompute.
pub fn run(
    transactions: &[Transaction],
    ruleset: &mut Ruleset,
    store: &RuleStore,
    prompt: &mut dyn Prompt,
) -> Result<SessionResult> {
    let mut current = apply_rules(transactions, ruleset);

    loop {
        // A shorthand collision aborts before any prompting.
        let shorthands = shorthand::build(ruleset)?;

        let remaining = current.iter().filter(|t| t.is_uncategorized()).count();
        let Some(focus_idx) = current.iter().position(|t| t.is_uncategorized()) else {
            return Ok(SessionResult {
                transactions: current,
                outcome: SessionOutcome::Completed,
            });
        };
        let focus = &current[focus_idx];
        let description = focus.description.clone();
        let amount = focus.signed_amount();

        println!(
            "\n{}",
            format!("{remaining} uncategorized transactions remaining").bold()
        );
        if !shorthands.is_empty() {
            println!("{}", shorthand::render_table(&shorthands));
        }
        println!("  Date:        {}", focus.date);
        println!("  Description: {description}");
        let amount_str = if amount >= 0.0 {
            money(amount).red().to_string()
        } else {
            money(amount.abs()).green().to_string()
        };
        println!("  Amount:      {amount_str}");

        let answer = prompt.line("Enter shorthand, new category or EXIT to end session")?;
        if answer.eq_ignore_ascii_case(EXIT_SENTINEL) {
            return Ok(SessionResult {
                transactions: current,
                outcome: SessionOutcome::Exited,
            });
        }
        let category = shorthands
            .get(&answer.to_lowercase())
            .cloned()
            .unwrap_or(answer);

        let string_to_match = if prompt.confirm("Make a general rule?")? {
            prompt.line_with_default("Enter string to match", &description)?
        } else {
            // One-off: pin the exact description so it survives recomputes.
            description
        };
        println!(
            "{}",
            format!("If description contains \"{string_to_match}\", categorize as \"{category}\"")
                .dimmed()
        );
        ruleset.rules.push(Rule::labeler(string_to_match, category));

        current = apply_rules(transactions, ruleset);
        store.autosave(ruleset)?;

        let overlapping = conflicts(&current);
        if !overlapping.is_empty() {
            eprintln!(
                "{}",
                "Some transactions match more than one categorizing rule:".red()
            );
            for txn in &overlapping {
                eprintln!("  {} \u{2192} [{}]", txn.description, txn.category);
            }
            eprintln!("{}", "Edit the ruleset (tally rules) and re-run.".red());
            return Ok(SessionResult {
                transactions: current,
                outcome: SessionOutcome::Conflict,
            });
        }
    }
}
