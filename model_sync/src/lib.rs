//! model_sync: keep generated model definitions in sync with live database schemas
//!
//! model_sync discovers the tables of a configured datasource and reconciles
//! the locally persisted model definition files (plus the shared model
//! registry) against what the database actually contains: new tables become
//! new models, drifted columns update the matching properties, and models
//! whose table disappeared can be deleted.

pub mod commands;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod schema;
pub mod utils;

// Re-export main types for easier access
pub use commands::{BatchOutcome, Confirm, DeleteOutcome, StdinConfirm};
pub use config::Config;
pub use db::connection::DatabaseConnection;
pub use error::{Error, Result};
pub use models::registry::{ModelRegistry, RegistryEntry};
pub use models::store::ModelStore;
pub use models::types::ModelDefinition;
pub use schema::discovery::{Discovery, SchemaDiscoverer};
pub use schema::reconcile::{ReconcileReport, Reconciler};
pub use schema::types::TableSchema;

/// Initialize model_sync against one named datasource from a configuration file
pub async fn init(config_path: &std::path::Path, database_name: &str) -> Result<ModelSyncClient> {
    let config = config::load_from_file(config_path)?;
    ModelSyncClient::connect(&config, database_name).await
}

/// The main client for running model_sync commands against one datasource
pub struct ModelSyncClient {
    database_name: String,
    discovery: SchemaDiscoverer,
    store: ModelStore,
}

impl ModelSyncClient {
    /// Connect to the named datasource and build the command dependencies.
    ///
    /// An unknown datasource name is an argument error; a connection failure
    /// reports the datasource as unavailable.
    pub async fn connect(config: &Config, database_name: &str) -> Result<Self> {
        let datasource = config.datasource(database_name)?;
        let connection = DatabaseConnection::connect(database_name, datasource).await?;
        let discovery = SchemaDiscoverer::new(connection, database_name, &datasource.database);
        let store = ModelStore::new(&config.store);

        Ok(Self {
            database_name: database_name.to_string(),
            discovery,
            store,
        })
    }

    /// Add models discovered in the database
    pub async fn add(
        &self,
        model_names: &[String],
        all: bool,
        preserve_all_settings: bool,
    ) -> Result<BatchOutcome> {
        commands::add(
            &self.discovery,
            &self.store,
            &self.database_name,
            model_names,
            all,
            preserve_all_settings,
        )
        .await
    }

    /// Update models against the live schema
    pub async fn update(
        &self,
        model_names: &[String],
        all: bool,
        preserve_all_settings: bool,
    ) -> Result<BatchOutcome> {
        commands::update(
            &self.discovery,
            &self.store,
            &self.database_name,
            model_names,
            all,
            preserve_all_settings,
        )
        .await
    }

    /// Delete models whose backing table no longer exists
    pub async fn delete(&self, confirm: &mut dyn Confirm) -> Result<DeleteOutcome> {
        commands::delete(&self.discovery, &self.store, confirm, &self.database_name).await
    }
}
