//! Terminal output helpers and the confirmation capability
//!
//! Confirmation is a trait so the destination resolver and orchestrator can
//! be exercised in tests with a scripted implementation instead of a real
//! terminal.

use console::Style;

use crate::error::Result;

/// Blocking yes/no confirmation from the operator
pub trait Confirm {
    /// Ask `prompt`; the default answer is No.
    fn confirm(&mut self, prompt: &str) -> Result<bool>;
}

/// Interactive confirmation backed by an inquire prompt
pub struct TerminalConfirm;

impl Confirm for TerminalConfirm {
    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        let answer = inquire::Confirm::new(prompt).with_default(false).prompt()?;
        Ok(answer)
    }
}

pub fn cyan(text: &str) -> String {
    Style::new().cyan().apply_to(text).to_string()
}

pub fn green(text: &str) -> String {
    Style::new().green().apply_to(text).to_string()
}

pub fn red(text: &str) -> String {
    Style::new().red().apply_to(text).to_string()
}

pub fn yellow(text: &str) -> String {
    Style::new().yellow().apply_to(text).to_string()
}
