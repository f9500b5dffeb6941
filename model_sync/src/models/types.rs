//! Type definitions for persisted model definitions

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Ordered mapping of setting name to value for one model property
pub type PropertySettings = IndexMap<String, Value>;

/// The persisted, application-facing representation of one model.
///
/// `name` is the PascalCase identifier; property names are always
/// underscore_separated before being persisted. Per-datasource table-name
/// overrides live either in a top-level block keyed by the datasource name or
/// under `options`; the flattened `extra` map carries those top-level blocks
/// and any hand-edited fields through a read-modify-write cycle untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDefinition {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<IndexMap<String, Value>>,
    #[serde(default)]
    pub properties: IndexMap<String, PropertySettings>,
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl ModelDefinition {
    /// Create a new empty model definition
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            options: None,
            properties: IndexMap::new(),
            extra: IndexMap::new(),
        }
    }

    /// Look up the per-datasource table-name override, if any.
    ///
    /// A top-level `model[datasource].table` block wins over
    /// `model.options[datasource].table`.
    pub fn table_override(&self, datasource: &str) -> Option<&str> {
        fn from_block<'a>(
            block: &'a IndexMap<String, Value>,
            datasource: &str,
        ) -> Option<&'a str> {
            block.get(datasource)?.get("table")?.as_str()
        }

        if let Some(table) = from_block(&self.extra, datasource) {
            return Some(table);
        }
        self.options
            .as_ref()
            .and_then(|options| from_block(options, datasource))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_table_override_resolution() {
        let mut model = ModelDefinition::new("UserAccount");
        assert_eq!(model.table_override("db1"), None);

        let mut options = IndexMap::new();
        options.insert("db1".to_string(), json!({"table": "accounts"}));
        model.options = Some(options);
        assert_eq!(model.table_override("db1"), Some("accounts"));
        assert_eq!(model.table_override("db2"), None);

        // A top-level block for the datasource takes precedence
        model
            .extra
            .insert("db1".to_string(), json!({"table": "legacy_accounts"}));
        assert_eq!(model.table_override("db1"), Some("legacy_accounts"));
    }

    #[test]
    fn test_extra_fields_survive_round_trip() {
        let raw = r#"{
            "name": "UserAccount",
            "base": "PersistedModel",
            "options": {"db1": {"table": "user_account"}},
            "properties": {"email": {"type": "varchar", "required": true}}
        }"#;

        let model: ModelDefinition = serde_json::from_str(raw).unwrap();
        assert_eq!(model.extra["base"], json!("PersistedModel"));

        let out = serde_json::to_value(&model).unwrap();
        assert_eq!(out["base"], json!("PersistedModel"));
        assert_eq!(out["properties"]["email"]["type"], json!("varchar"));
    }
}
