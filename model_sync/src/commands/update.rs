//! The update command
//!
//! Reconciles each named model's persisted definition against the live
//! schema of its backing table and rewrites the file. With `--all`, every
//! model registered against the datasource is updated. The registry itself
//! is never modified here.

use crate::commands::BatchOutcome;
use crate::error::Result;
use crate::models::store::ModelStore;
use crate::schema::discovery::Discovery;
use crate::schema::reconcile::{resolve_table_name, Reconciler};

/// Update the named models (or all registered against `database_name`)
pub async fn update(
    discovery: &dyn Discovery,
    store: &ModelStore,
    database_name: &str,
    model_names: &[String],
    all: bool,
    preserve_all_settings: bool,
) -> Result<BatchOutcome> {
    let reconciler = Reconciler::new(preserve_all_settings);
    let mut outcome = BatchOutcome::default();

    let targets: Vec<String> = if all {
        store.read_registry()?.names_for_datasource(database_name)
    } else {
        model_names.to_vec()
    };

    for model_name in targets {
        match update_one(discovery, store, &reconciler, database_name, &model_name).await {
            Ok(()) => outcome.synced.push(model_name),
            Err(e) => outcome.record_failure(&model_name, e),
        }
    }

    Ok(outcome)
}

async fn update_one(
    discovery: &dyn Discovery,
    store: &ModelStore,
    reconciler: &Reconciler,
    database_name: &str,
    model_name: &str,
) -> Result<()> {
    let model = store.read_model(model_name)?;

    let table_name = resolve_table_name(&model, database_name);
    tracing::info!(model = %model_name, table = %table_name, "database table name resolved");

    let schema = discovery.discover_table(&table_name).await?;
    let (merged, report) = reconciler.merge(model, schema);

    if report.is_unchanged() {
        tracing::info!(model = %model_name, "model already matches the database schema");
    } else {
        tracing::info!(
            model = %model_name,
            properties_added = report.properties_added,
            properties_removed = report.properties_removed,
            settings_written = report.settings_written,
            "model reconciled"
        );
    }

    store.write_model(&merged)
}
