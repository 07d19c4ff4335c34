//! Console narration of requests and responses
//!
//! The reporter is a pure sink: scenarios hand it every decoded outcome
//! and branch on the outcome themselves, never on anything the reporter
//! does. All run feedback is human-readable narration; there is no
//! machine-readable report.

use colored::Colorize;
use serde::Serialize;

use crate::api::Outcome;
use crate::common::Result;

pub struct Reporter {
    verbose: bool,
}

impl Reporter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Section banner for one scenario.
    pub fn section(&self, title: &str) {
        println!("\n{}", "=".repeat(60).blue());
        println!("  {}", title.white().bold());
        println!("{}", "=".repeat(60).blue());
    }

    /// Numbered step header within a scenario.
    pub fn step(&self, number: usize, description: &str) {
        println!("\n{}. {}", number, description.cyan());
    }

    pub fn note(&self, text: &str) {
        println!("  {text}");
    }

    pub fn success(&self, text: &str) {
        println!("  {} {}", "✓".green(), text);
    }

    pub fn warn(&self, text: &str) {
        println!("  {} {}", "⚠".yellow(), text);
    }

    pub fn failure(&self, text: &str) {
        println!("  {} {}", "✗".red(), text);
    }

    /// Echo one request/response pair.
    pub fn observe<T: Serialize>(&self, action: &str, result: &Result<Outcome<T>>) {
        match result {
            Ok(Outcome::Success { status, body }) => {
                println!("  {} {} (status {})", "✓".green(), action, status);
                if let Some(text) = self.render(body) {
                    for line in text.lines() {
                        println!("    {}", line.dimmed());
                    }
                }
            }
            Ok(Outcome::Failure { status, message }) => {
                println!("  {} {} (status {}): {}", "✗".red(), action, status, message);
            }
            Err(e) => {
                println!("  {} {}: {}", "✗".red(), action, e);
            }
        }
    }

    fn render<T: Serialize>(&self, body: &T) -> Option<String> {
        let text = if self.verbose {
            serde_json::to_string_pretty(body).ok()?
        } else {
            serde_json::to_string(body).ok()?
        };
        if text == "null" {
            None
        } else {
            Some(text)
        }
    }
}
