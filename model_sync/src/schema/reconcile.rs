//! Schema reconciliation
//!
//! This module merges a freshly discovered table schema into a persisted
//! model definition (update path), or synthesizes a new definition from the
//! schema alone (create path). Column names are underscore-normalized before
//! any comparison, since model property names are always stored that way.

use indexmap::map::Entry;
use indexmap::IndexMap;
use serde_json::json;

use crate::models::types::{ModelDefinition, PropertySettings};
use crate::schema::types::TableSchema;
use crate::utils::naming;

/// The four property settings synchronized without an explicit opt-in
pub const DEFAULT_SETTINGS: [&str; 4] = ["type", "required", "length", "id"];

/// What one reconciliation actually changed.
///
/// Settings already equal on both sides are skipped and do not count as
/// written, so an unchanged schema yields an all-zero report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub properties_added: usize,
    pub properties_removed: usize,
    pub settings_written: usize,
}

impl ReconcileReport {
    /// True when the merge changed nothing on the model
    pub fn is_unchanged(&self) -> bool {
        self.properties_added == 0 && self.properties_removed == 0 && self.settings_written == 0
    }
}

/// Merges discovered schemas into model definitions
pub struct Reconciler {
    preserve_all_settings: bool,
}

impl Reconciler {
    /// Create a reconciler; `preserve_all_settings` widens the merge from the
    /// four default settings to everything the driver reports.
    pub fn new(preserve_all_settings: bool) -> Self {
        Self {
            preserve_all_settings,
        }
    }

    fn setting_selected(&self, setting: &str) -> bool {
        self.preserve_all_settings || DEFAULT_SETTINGS.contains(&setting)
    }

    /// Merge a discovered schema into an existing model definition.
    ///
    /// Properties missing from the model are created, selected settings are
    /// copied column-by-column unless already equal, and model properties
    /// with no corresponding column are deleted regardless of flags.
    pub fn merge(
        &self,
        mut model: ModelDefinition,
        schema: TableSchema,
    ) -> (ModelDefinition, ReconcileReport) {
        let schema = normalize_columns(schema);
        let mut report = ReconcileReport::default();

        for (property_name, column) in &schema.columns {
            let property = match model.properties.entry(property_name.clone()) {
                Entry::Occupied(entry) => entry.into_mut(),
                Entry::Vacant(entry) => {
                    report.properties_added += 1;
                    tracing::info!(
                        model = %model.name,
                        property = %property_name,
                        "added property"
                    );
                    entry.insert(PropertySettings::new())
                }
            };

            for (setting, value) in &column.settings {
                if self.setting_selected(setting) && property.get(setting) != Some(value) {
                    property.insert(setting.clone(), value.clone());
                    report.settings_written += 1;
                    tracing::info!(
                        model = %model.name,
                        property = %property_name,
                        setting = %setting,
                        "updated property setting"
                    );
                }
            }
        }

        let model_name = model.name.clone();
        model.properties.retain(|property_name, _| {
            let keep = schema.columns.contains_key(property_name);
            if !keep {
                report.properties_removed += 1;
                tracing::info!(
                    model = %model_name,
                    property = %property_name,
                    "deleted property with no backing column"
                );
            }
            keep
        });

        (model, report)
    }

    /// Synthesize a model definition from a discovered schema (create path).
    ///
    /// Each property carries only the selected settings; the discovered table
    /// name is recorded as a per-datasource override so later updates resolve
    /// the same table.
    pub fn create(
        &self,
        model_name: &str,
        datasource: &str,
        schema: TableSchema,
    ) -> ModelDefinition {
        let schema = normalize_columns(schema);
        let mut model = ModelDefinition::new(model_name);

        let mut options = IndexMap::new();
        options.insert(
            datasource.to_string(),
            json!({ "table": schema.table_name }),
        );
        model.options = Some(options);

        for (property_name, column) in schema.columns {
            let settings: PropertySettings = column
                .settings
                .into_iter()
                .filter(|(setting, _)| self.setting_selected(setting))
                .collect();

            tracing::info!(
                model = %model.name,
                property = %property_name,
                "added property"
            );
            model.properties.insert(property_name, settings);
        }

        model
    }
}

/// Resolve the table to query for a model: the per-datasource override when
/// present, else the underscored model name.
pub fn resolve_table_name(model: &ModelDefinition, datasource: &str) -> String {
    match model.table_override(datasource) {
        Some(table) => table.to_string(),
        None => naming::pascal_to_underscore(&model.name),
    }
}

/// Rewrite every column under its underscore-normalized name, preserving
/// discovery order. Runs before any comparison against model properties.
fn normalize_columns(mut schema: TableSchema) -> TableSchema {
    let mut columns = IndexMap::with_capacity(schema.columns.len());

    for (name, mut column) in schema.columns {
        let normalized = naming::camel_to_underscore(&name);
        if normalized != name {
            tracing::debug!(column = %name, normalized = %normalized, "normalized column name");
        }
        column.name = normalized.clone();
        columns.insert(normalized, column);
    }

    schema.columns = columns;
    schema
}
