//! Model file persistence
//!
//! One JSON definition file per model, named after the hyphen-separated form
//! of the model name, plus the shared registry file. Definition files may
//! have an optional `.js` behavior companion with the same stem; add and
//! update never touch it, delete removes it when present.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::config::StoreConfig;
use crate::error::{Error, Result};
use crate::models::registry::ModelRegistry;
use crate::models::types::ModelDefinition;
use crate::utils::naming;

/// Reads and writes model definition files and the registry
pub struct ModelStore {
    models_dir: PathBuf,
    registry_file: PathBuf,
}

impl ModelStore {
    /// Create a store over the configured layout
    pub fn new(config: &StoreConfig) -> Self {
        Self {
            models_dir: config.models_dir.clone(),
            registry_file: config.registry_file.clone(),
        }
    }

    /// Path of a model's JSON definition file
    pub fn model_path(&self, model_name: &str) -> PathBuf {
        self.models_dir
            .join(format!("{}.json", naming::pascal_to_hyphen(model_name)))
    }

    /// Path of a model's optional behavior companion file
    fn behavior_path(&self, model_name: &str) -> PathBuf {
        self.models_dir
            .join(format!("{}.js", naming::pascal_to_hyphen(model_name)))
    }

    /// Read a model's persisted definition
    pub fn read_model(&self, model_name: &str) -> Result<ModelDefinition> {
        let path = self.model_path(model_name);
        let buffer = fs::read_to_string(&path).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                Error::ModelFileNotFound(naming::pascal_to_hyphen(model_name))
            } else {
                Error::IoError(e)
            }
        })?;

        let model = serde_json::from_str(&buffer).map_err(|e| {
            Error::SerializationError(format!("Failed to parse {}: {}", path.display(), e))
        })?;

        tracing::info!(path = %path.display(), "model file read");
        Ok(model)
    }

    /// Serialize a model definition as pretty-printed JSON, overwriting
    /// unconditionally.
    pub fn write_model(&self, model: &ModelDefinition) -> Result<()> {
        fs::create_dir_all(&self.models_dir)?;

        let path = self.model_path(&model.name);
        fs::write(&path, to_pretty_json(model)?)?;

        tracing::info!(model = %model.name, path = %path.display(), "model file written");
        Ok(())
    }

    /// Remove a model's definition file and, when present, its behavior
    /// companion. A missing companion is not an error; a failure removing it
    /// is reported as a warning, never fatal.
    pub fn delete_model(&self, model_name: &str) -> Result<()> {
        let path = self.model_path(model_name);
        fs::remove_file(&path).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                Error::ModelFileNotFound(naming::pascal_to_hyphen(model_name))
            } else {
                Error::IoError(e)
            }
        })?;
        tracing::info!(model = %model_name, path = %path.display(), "model file deleted");

        let behavior = self.behavior_path(model_name);
        match fs::remove_file(&behavior) {
            Ok(()) => {
                tracing::info!(path = %behavior.display(), "behavior file deleted");
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(path = %behavior.display(), error = %e, "could not delete behavior file");
            }
        }

        Ok(())
    }

    /// Read the shared registry file
    pub fn read_registry(&self) -> Result<ModelRegistry> {
        let buffer = fs::read_to_string(&self.registry_file).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                Error::RegistryFileNotFound(self.registry_file.display().to_string())
            } else {
                Error::IoError(e)
            }
        })?;

        let registry = serde_json::from_str(&buffer).map_err(|e| Error::RegistryParse {
            path: self.registry_file.display().to_string(),
            reason: e.to_string(),
        })?;

        tracing::info!(path = %self.registry_file.display(), "registry read");
        Ok(registry)
    }

    /// Overwrite the shared registry file
    pub fn write_registry(&self, registry: &ModelRegistry) -> Result<()> {
        if let Some(parent) = self.registry_file.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.registry_file, to_pretty_json(registry)?)?;

        tracing::info!(path = %self.registry_file.display(), "registry written");
        Ok(())
    }
}

fn to_pretty_json<T: serde::Serialize>(value: &T) -> Result<String> {
    let mut out = serde_json::to_string_pretty(value)?;
    out.push('\n');
    Ok(out)
}

/// Build a store rooted somewhere other than the current directory
pub fn store_at(base: &Path, config: &StoreConfig) -> ModelStore {
    ModelStore {
        models_dir: base.join(&config.models_dir),
        registry_file: base.join(&config.registry_file),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tempfile::tempdir;

    use crate::models::registry::RegistryEntry;

    fn temp_store(dir: &Path) -> ModelStore {
        store_at(dir, &StoreConfig::default())
    }

    #[test]
    fn test_model_round_trip_uses_hyphen_file_name() {
        let dir = tempdir().unwrap();
        let store = temp_store(dir.path());

        let mut model = ModelDefinition::new("UserAccount");
        model
            .properties
            .insert("email".to_string(), indexmap::indexmap! {
                "type".to_string() => json!("varchar"),
            });

        store.write_model(&model).unwrap();
        assert!(dir.path().join("common/models/user-account.json").exists());

        let read_back = store.read_model("UserAccount").unwrap();
        assert_eq!(read_back, model);
    }

    #[test]
    fn test_written_files_are_byte_stable() {
        let dir = tempdir().unwrap();
        let store = temp_store(dir.path());

        let model = ModelDefinition::new("UserAccount");
        store.write_model(&model).unwrap();
        let first = fs::read(store.model_path("UserAccount")).unwrap();

        store.write_model(&model).unwrap();
        let second = fs::read(store.model_path("UserAccount")).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_read_missing_model() {
        let dir = tempdir().unwrap();
        let store = temp_store(dir.path());

        let err = store.read_model("UserAccount").unwrap_err();
        assert!(matches!(err, Error::ModelFileNotFound(ref name) if name == "user-account"));
    }

    #[test]
    fn test_delete_model_removes_behavior_companion() {
        let dir = tempdir().unwrap();
        let store = temp_store(dir.path());

        store.write_model(&ModelDefinition::new("UserAccount")).unwrap();
        let behavior = dir.path().join("common/models/user-account.js");
        fs::write(&behavior, "module.exports = function () {};\n").unwrap();

        store.delete_model("UserAccount").unwrap();
        assert!(!store.model_path("UserAccount").exists());
        assert!(!behavior.exists());
    }

    #[test]
    fn test_delete_model_without_behavior_file_is_not_an_error() {
        let dir = tempdir().unwrap();
        let store = temp_store(dir.path());

        store.write_model(&ModelDefinition::new("UserAccount")).unwrap();
        store.delete_model("UserAccount").unwrap();

        let err = store.delete_model("UserAccount").unwrap_err();
        assert!(matches!(err, Error::ModelFileNotFound(_)));
    }

    #[test]
    fn test_registry_round_trip() {
        let dir = tempdir().unwrap();
        let store = temp_store(dir.path());

        let mut registry = ModelRegistry::new();
        registry.insert("UserAccount", RegistryEntry::new("db1"));
        store.write_registry(&registry).unwrap();

        let read_back = store.read_registry().unwrap();
        assert_eq!(read_back, registry);

        let raw = fs::read_to_string(dir.path().join("server/model-config.json")).unwrap();
        assert!(raw.contains("\"dataSource\": \"db1\""));
    }

    #[test]
    fn test_registry_errors() {
        let dir = tempdir().unwrap();
        let store = temp_store(dir.path());

        let err = store.read_registry().unwrap_err();
        assert!(matches!(err, Error::RegistryFileNotFound(_)));

        fs::create_dir_all(dir.path().join("server")).unwrap();
        fs::write(dir.path().join("server/model-config.json"), "not json").unwrap();
        let err = store.read_registry().unwrap_err();
        assert!(matches!(err, Error::RegistryParse { .. }));
    }
}
