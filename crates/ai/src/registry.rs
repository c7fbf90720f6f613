//! Model registry artifact: inventory id -> pre-fitted model.
//!
//! On disk the registry is a JSON document:
//!
//! ```json
//! {
//!   "format_version": 1,
//!   "models": { "42": { "kind": "linear", "coef": [-0.5], "intercept": 2.7 } }
//! }
//! ```

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use stockcast_core::InventoryId;

use crate::model::RegressionModel;

/// Artifact format understood by this build.
pub const FORMAT_VERSION: u32 = 1;

/// Failure to obtain a usable registry.
///
/// The `Display` text is what callers receive in the `error` payload.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegistryError {
    #[error("Model file not found at {}", path.display())]
    ArtifactNotFound { path: PathBuf },

    /// Catch-all for anything else that stops the artifact from loading.
    #[error("Failed to load model: {0}")]
    LoadFailure(String),
}

impl RegistryError {
    pub fn load_failure(msg: impl Into<String>) -> Self {
        Self::LoadFailure(msg.into())
    }
}

#[derive(Serialize, Deserialize)]
struct Artifact {
    format_version: u32,
    models: BTreeMap<InventoryId, RegressionModel>,
}

/// Read-only mapping from inventory id to model.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelRegistry {
    models: BTreeMap<InventoryId, RegressionModel>,
}

impl ModelRegistry {
    /// Build a registry in memory.
    ///
    /// Models are not validated here; inference on a malformed model reports
    /// `ModelError::Invalid` instead of indexing out of bounds.
    pub fn from_models(models: impl IntoIterator<Item = (InventoryId, RegressionModel)>) -> Self {
        Self {
            models: models.into_iter().collect(),
        }
    }

    /// Load and validate the artifact at `path`.
    ///
    /// Either the whole registry loads or an error is returned; a partially
    /// decoded registry is never exposed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let path = path.as_ref();
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(RegistryError::ArtifactNotFound {
                    path: path.to_path_buf(),
                });
            }
            Err(e) => return Err(RegistryError::load_failure(e.to_string())),
        };

        let registry = Self::from_slice(&bytes)?;
        tracing::debug!(path = %path.display(), models = registry.len(), "model registry loaded");
        Ok(registry)
    }

    /// Decode and validate an artifact already in memory.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, RegistryError> {
        let artifact: Artifact =
            serde_json::from_slice(bytes).map_err(|e| RegistryError::load_failure(e.to_string()))?;

        if artifact.format_version != FORMAT_VERSION {
            return Err(RegistryError::load_failure(format!(
                "unsupported artifact format_version {} (expected {FORMAT_VERSION})",
                artifact.format_version
            )));
        }

        for (id, model) in &artifact.models {
            model.validate().map_err(|e| {
                RegistryError::load_failure(format!("model for inventory item {id}: {e}"))
            })?;
        }

        Ok(Self {
            models: artifact.models,
        })
    }

    /// Encode in the artifact format (used by tooling and tests that produce artifacts).
    pub fn to_artifact_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&Artifact {
            format_version: FORMAT_VERSION,
            models: self.models.clone(),
        })
    }

    pub fn get(&self, id: InventoryId) -> Option<&RegressionModel> {
        self.models.get(&id)
    }

    pub fn contains(&self, id: InventoryId) -> bool {
        self.models.contains_key(&id)
    }

    pub fn ids(&self) -> impl Iterator<Item = InventoryId> + '_ {
        self.models.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn sample_registry() -> ModelRegistry {
        ModelRegistry::from_models([
            (
                InventoryId::new(42),
                RegressionModel::Linear {
                    coef: vec![-0.5],
                    intercept: 2.7,
                },
            ),
            (
                InventoryId::new(7),
                RegressionModel::Polynomial {
                    coefficients: vec![1.0, 0.25],
                },
            ),
        ])
    }

    #[test]
    fn load_reads_a_written_artifact() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("inventory_models.json");
        fs::write(&path, sample_registry().to_artifact_json().unwrap()).unwrap();

        let loaded = ModelRegistry::load(&path).unwrap();
        assert_eq!(loaded, sample_registry());
        assert_eq!(
            loaded.ids().collect::<Vec<_>>(),
            vec![InventoryId::new(7), InventoryId::new(42)]
        );
        assert!(loaded.contains(InventoryId::new(42)));
        assert!(loaded.get(InventoryId::new(999)).is_none());
    }

    #[test]
    fn missing_file_is_artifact_not_found() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.json");
        let err = ModelRegistry::load(&path).unwrap_err();
        assert_eq!(err, RegistryError::ArtifactNotFound { path: path.clone() });
        assert_eq!(err.to_string(), format!("Model file not found at {}", path.display()));
    }

    #[test]
    fn unreadable_or_corrupt_artifacts_are_load_failures() {
        let dir = tempdir().unwrap();

        // A directory where the file should be.
        match ModelRegistry::load(dir.path()) {
            Err(RegistryError::LoadFailure(_)) => {}
            other => panic!("expected LoadFailure, got {other:?}"),
        }

        let corrupt = dir.path().join("corrupt.json");
        fs::write(&corrupt, b"\x80\x04\x95 not json").unwrap();
        let err = ModelRegistry::load(&corrupt).unwrap_err();
        assert!(err.to_string().starts_with("Failed to load model: "));
    }

    #[test]
    fn rejects_unknown_format_version() {
        let err = ModelRegistry::from_slice(br#"{"format_version":2,"models":{}}"#).unwrap_err();
        match err {
            RegistryError::LoadFailure(msg) => assert!(msg.contains("format_version 2")),
            other => panic!("expected LoadFailure, got {other:?}"),
        }
    }

    #[test]
    fn rejects_non_integer_keys_and_invalid_models() {
        assert!(ModelRegistry::from_slice(
            br#"{"format_version":1,"models":{"abc":{"kind":"polynomial","coefficients":[1.0]}}}"#
        )
        .is_err());

        let err = ModelRegistry::from_slice(
            br#"{"format_version":1,"models":{"5":{"kind":"linear","coef":[],"intercept":0.0}}}"#,
        )
        .unwrap_err();
        match err {
            RegistryError::LoadFailure(msg) => assert!(msg.contains("inventory item 5")),
            other => panic!("expected LoadFailure, got {other:?}"),
        }
    }

    #[test]
    fn empty_registry_is_valid() {
        let r = ModelRegistry::from_slice(br#"{"format_version":1,"models":{}}"#).unwrap();
        assert!(r.is_empty());
    }
}
