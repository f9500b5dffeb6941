//! The delete command
//!
//! After interactive confirmation, removes every registered model bound to
//! the datasource whose backing table no longer exists in the database:
//! definition file, optional behavior file, and registry entry.

use std::collections::HashSet;

use crate::commands::confirm::Confirm;
use crate::commands::BatchOutcome;
use crate::error::Result;
use crate::models::store::ModelStore;
use crate::schema::discovery::Discovery;
use crate::utils::naming;

/// Result of a delete invocation
#[derive(Debug)]
pub enum DeleteOutcome {
    /// The user declined the confirmation; nothing was touched
    Declined,
    /// Stale models were removed (or failed individually)
    Completed(BatchOutcome),
}

/// Delete models registered against `database_name` whose table is gone
pub async fn delete(
    discovery: &dyn Discovery,
    store: &ModelStore,
    confirm: &mut dyn Confirm,
    database_name: &str,
) -> Result<DeleteOutcome> {
    let prompt = format!(
        "This will delete every model registered against {} whose table no longer exists in that database. Continue? [yes/no]",
        database_name
    );
    if !confirm.confirm(&prompt).await? {
        tracing::info!("Exiting");
        return Ok(DeleteOutcome::Declined);
    }

    let mut registry = store.read_registry()?;
    let mut outcome = BatchOutcome::default();

    let live_models: HashSet<String> = discovery
        .list_table_names()
        .await?
        .iter()
        .map(|table_name| naming::underscore_to_pascal(table_name))
        .collect();

    let stale: Vec<String> = registry
        .iter()
        .filter(|(name, entry)| {
            entry.data_source == database_name && !live_models.contains(name.as_str())
        })
        .map(|(name, _)| name.clone())
        .collect();

    for model_name in stale {
        tracing::info!(model = %model_name, "deleting model");
        match store.delete_model(&model_name) {
            Ok(()) => {
                registry.remove(&model_name);
                outcome.synced.push(model_name);
            }
            // entry stays registered until its files are actually gone
            Err(e) => outcome.record_failure(&model_name, e),
        }
    }

    store.write_registry(&registry)?;
    Ok(DeleteOutcome::Completed(outcome))
}
