//! Command handlers for model_sync
//!
//! Thin coordination over discovery, reconciliation and the model store. A
//! failure on one model is reported and the batch moves on to the next; only
//! argument validation and registry-level failures abort a whole invocation.

pub mod add;
pub mod confirm;
pub mod delete;
pub mod update;

// Re-export key types
pub use add::add;
pub use confirm::{Confirm, StdinConfirm};
pub use delete::{delete, DeleteOutcome};
pub use update::update;

use crate::error::Error;

/// What happened to each model in one batch invocation
#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// Models whose files were written or removed
    pub synced: Vec<String>,
    /// Models skipped with a message (e.g. already registered)
    pub skipped: Vec<String>,
    /// Models whose reconciliation failed; the batch continued past them
    pub failed: Vec<ModelFailure>,
}

/// One model that could not be reconciled
#[derive(Debug)]
pub struct ModelFailure {
    pub model: String,
    pub error: Error,
}

impl BatchOutcome {
    /// True when every model in the batch succeeded
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    pub(crate) fn record_failure(&mut self, model: &str, error: Error) {
        tracing::error!(model = %model, error = %error, "model failed, continuing with next");
        self.failed.push(ModelFailure {
            model: model.to_string(),
            error,
        });
    }
}
