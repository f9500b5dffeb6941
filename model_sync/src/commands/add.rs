//! The add command
//!
//! Discovers the tables of a database and creates a definition file plus a
//! registry entry for each requested model that is not already registered.

use crate::commands::BatchOutcome;
use crate::error::Result;
use crate::models::registry::RegistryEntry;
use crate::models::store::ModelStore;
use crate::schema::discovery::Discovery;
use crate::schema::reconcile::Reconciler;
use crate::utils::naming;

/// Add models discovered in `database_name`. Only models named in
/// `model_names` are considered unless `all` is set. The registry is read
/// once up front and written once at the end.
pub async fn add(
    discovery: &dyn Discovery,
    store: &ModelStore,
    database_name: &str,
    model_names: &[String],
    all: bool,
    preserve_all_settings: bool,
) -> Result<BatchOutcome> {
    let reconciler = Reconciler::new(preserve_all_settings);
    let mut registry = store.read_registry()?;
    let mut outcome = BatchOutcome::default();

    let tables = discovery.list_table_names().await?;
    for table_name in tables {
        let model_name = naming::underscore_to_pascal(&table_name);

        if !all && !model_names.contains(&model_name) {
            continue;
        }

        if registry.contains(&model_name) || store.model_path(&model_name).exists() {
            tracing::info!(
                model = %model_name,
                "already exists, use the update command, continuing to next model"
            );
            outcome.skipped.push(model_name);
            continue;
        }

        match add_one(
            discovery,
            store,
            &reconciler,
            database_name,
            &model_name,
            &table_name,
        )
        .await
        {
            Ok(()) => {
                registry.insert(&model_name, RegistryEntry::new(database_name));
                tracing::info!(model = %model_name, "added to registry");
                outcome.synced.push(model_name);
            }
            Err(e) => outcome.record_failure(&model_name, e),
        }
    }

    store.write_registry(&registry)?;
    Ok(outcome)
}

async fn add_one(
    discovery: &dyn Discovery,
    store: &ModelStore,
    reconciler: &Reconciler,
    database_name: &str,
    model_name: &str,
    table_name: &str,
) -> Result<()> {
    tracing::info!(
        database = %database_name,
        model = %model_name,
        table = %table_name,
        "discovering schema"
    );
    let schema = discovery.discover_table(table_name).await?;

    let model = reconciler.create(model_name, database_name, schema);
    store.write_model(&model)
}
