//! Confirmation capability for destructive commands
//!
//! The delete handler awaits an injected confirmation rather than reading
//! standard input directly, so tests can script the answer.

use async_trait::async_trait;
use std::io::{self, BufRead, Write};

use crate::error::Result;

/// Asks the user to confirm a destructive action
#[async_trait]
pub trait Confirm: Send {
    /// Present the prompt and return whether the user accepted
    async fn confirm(&mut self, prompt: &str) -> Result<bool>;
}

/// Production confirmation: one line from standard input, accepting `yes`
/// or `y` after trimming.
pub struct StdinConfirm;

#[async_trait]
impl Confirm for StdinConfirm {
    async fn confirm(&mut self, prompt: &str) -> Result<bool> {
        println!("{}", prompt);
        io::stdout().flush()?;

        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;

        Ok(matches!(line.trim(), "yes" | "y"))
    }
}

#[cfg(test)]
pub mod testing {
    use super::*;

    /// Answers every prompt with a fixed response and counts the asks
    pub struct ScriptedConfirm {
        pub answer: bool,
        pub prompts_seen: usize,
    }

    impl ScriptedConfirm {
        pub fn new(answer: bool) -> Self {
            Self {
                answer,
                prompts_seen: 0,
            }
        }
    }

    #[async_trait]
    impl Confirm for ScriptedConfirm {
        async fn confirm(&mut self, _prompt: &str) -> Result<bool> {
            self.prompts_seen += 1;
            Ok(self.answer)
        }
    }
}
