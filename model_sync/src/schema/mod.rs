//! Schema module for model_sync
//!
//! This module handles live schema discovery and reconciliation against
//! persisted model definitions.

pub mod discovery;
pub mod reconcile;
pub mod types;

// Re-export key types
pub use discovery::{Discovery, SchemaDiscoverer};
pub use reconcile::{resolve_table_name, ReconcileReport, Reconciler, DEFAULT_SETTINGS};
pub use types::{ColumnDefinition, SettingMap, TableSchema};
