use dialoguer::{Confirm, Input};

use crate::error::Result;

/// Interactive input port. The session state machine only talks to this
/// trait, so tests drive it with scripted answers instead of a terminal.
pub trait Prompt {
    fn line(&mut self, prompt: &str) -> Result<String>;
    fn line_with_default(&mut self, prompt: &str, default: &str) -> Result<String>;
    /// Yes/no question, defaulting to no.
    fn confirm(&mut self, prompt: &str) -> Result<bool>;
}

/// Terminal-backed prompt.
pub struct ConsolePrompt;

impl Prompt for ConsolePrompt {
    fn line(&mut self, prompt: &str) -> Result<String> {
        let answer: String = Input::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?;
        Ok(answer)
    }

    fn line_with_default(&mut self, prompt: &str, default: &str) -> Result<String> {
        let answer: String = Input::new()
            .with_prompt(prompt)
            .default(default.to_string())
            .interact_text()?;
        Ok(answer)
    }

    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        Ok(Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()?)
    }
}
