//! Type definitions for discovered table schemas

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Ordered mapping of setting name to value.
///
/// Setting values are heterogeneous (strings, booleans, numbers), so they are
/// kept as JSON values end to end.
pub type SettingMap = IndexMap<String, Value>;

/// One discovered database column: its reported name plus a mapping of
/// setting name to value (`type`, `required`, `length`, `id`, and whatever
/// else the driver reports).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDefinition {
    pub name: String,
    pub settings: SettingMap,
}

impl ColumnDefinition {
    /// Create a new column with the given name and no settings
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            settings: SettingMap::new(),
        }
    }

    /// Record a setting on the column
    pub fn set(mut self, setting: &str, value: impl Into<Value>) -> Self {
        self.settings.insert(setting.to_string(), value.into());
        self
    }
}

/// Discovered shape of one table, produced fresh on every discovery call.
///
/// Columns are keyed by name in the order the database reports them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSchema {
    pub table_name: String,
    pub columns: IndexMap<String, ColumnDefinition>,
}

impl TableSchema {
    /// Create a new empty table schema
    pub fn new(table_name: &str) -> Self {
        Self {
            table_name: table_name.to_string(),
            columns: IndexMap::new(),
        }
    }

    /// Add a column to the schema
    pub fn add_column(&mut self, column: ColumnDefinition) {
        self.columns.insert(column.name.clone(), column);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_column_builder() {
        let column = ColumnDefinition::new("email")
            .set("type", "varchar")
            .set("required", true)
            .set("length", 255);

        assert_eq!(column.settings["type"], json!("varchar"));
        assert_eq!(column.settings["required"], json!(true));
        assert_eq!(column.settings["length"], json!(255));
    }

    #[test]
    fn test_columns_keep_insertion_order() {
        let mut schema = TableSchema::new("user_account");
        schema.add_column(ColumnDefinition::new("id"));
        schema.add_column(ColumnDefinition::new("email"));
        schema.add_column(ColumnDefinition::new("created_at"));

        let names: Vec<&String> = schema.columns.keys().collect();
        assert_eq!(names, vec!["id", "email", "created_at"]);
    }
}
