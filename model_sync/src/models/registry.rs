//! The shared model registry
//!
//! One JSON file maps every model name to the datasource it is bound to and
//! its visibility. Add inserts entries, delete removes them, update never
//! touches the file.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One registry entry: which datasource backs the model and whether it is
/// exposed publicly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryEntry {
    pub data_source: String,
    pub public: bool,
}

impl RegistryEntry {
    /// The entry written for a freshly added model
    pub fn new(data_source: &str) -> Self {
        Self {
            data_source: data_source.to_string(),
            public: true,
        }
    }
}

/// In-memory view of the registry file, read once per run and written once
/// at the end.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelRegistry {
    entries: IndexMap<String, RegistryEntry>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, model_name: &str) -> bool {
        self.entries.contains_key(model_name)
    }

    pub fn get(&self, model_name: &str) -> Option<&RegistryEntry> {
        self.entries.get(model_name)
    }

    pub fn insert(&mut self, model_name: &str, entry: RegistryEntry) {
        self.entries.insert(model_name.to_string(), entry);
    }

    /// Remove an entry, keeping the remaining order intact
    pub fn remove(&mut self, model_name: &str) -> Option<RegistryEntry> {
        self.entries.shift_remove(model_name)
    }

    /// Names of every model registered against the given datasource
    pub fn names_for_datasource(&self, datasource: &str) -> Vec<String> {
        self.entries
            .iter()
            .filter(|(_, entry)| entry.data_source == datasource)
            .map(|(name, _)| name.clone())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &RegistryEntry)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_names_for_datasource() {
        let mut registry = ModelRegistry::new();
        registry.insert("UserAccount", RegistryEntry::new("db1"));
        registry.insert("OrderItem", RegistryEntry::new("db2"));
        registry.insert("Invoice", RegistryEntry::new("db1"));

        assert_eq!(
            registry.names_for_datasource("db1"),
            vec!["UserAccount".to_string(), "Invoice".to_string()]
        );
        assert!(registry.names_for_datasource("db3").is_empty());
    }

    #[test]
    fn test_serializes_with_camel_case_keys() {
        let mut registry = ModelRegistry::new();
        registry.insert("UserAccount", RegistryEntry::new("db1"));

        let out = serde_json::to_value(&registry).unwrap();
        assert_eq!(
            out,
            serde_json::json!({"UserAccount": {"dataSource": "db1", "public": true}})
        );
    }
}
