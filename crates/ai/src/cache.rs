//! Registry cache for long-lived hosts.
//!
//! The one-shot CLI reloads the artifact per invocation and does not use this.
//! A resident process can hold a `RegistryCache` instead: each lookup re-stats
//! the artifact and reloads when its modification stamp changed, so a freshly
//! trained artifact is picked up without a restart.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::SystemTime;

use crate::predictor::RegistrySource;
use crate::registry::{ModelRegistry, RegistryError};

/// Identity of the artifact contents as seen through file metadata.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
struct Stamp {
    modified: SystemTime,
    len: u64,
}

#[derive(Debug)]
struct Cached {
    stamp: Stamp,
    registry: Arc<ModelRegistry>,
}

#[derive(Debug)]
pub struct RegistryCache {
    path: PathBuf,
    state: Mutex<Option<Cached>>,
}

impl RegistryCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            state: Mutex::new(None),
        }
    }

    /// Current registry, reloading if the artifact changed since the last call.
    pub fn get(&self) -> Result<Arc<ModelRegistry>, RegistryError> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);

        let stamp = match self.stamp() {
            Ok(stamp) => stamp,
            Err(e) => {
                // Never keep serving a registry whose artifact is gone or unreadable.
                *state = None;
                return Err(e);
            }
        };

        if let Some(cached) = state.as_ref() {
            if cached.stamp == stamp {
                return Ok(Arc::clone(&cached.registry));
            }
            tracing::debug!(path = %self.path.display(), "model artifact changed; reloading");
        }

        match ModelRegistry::load(&self.path) {
            Ok(registry) => {
                let registry = Arc::new(registry);
                *state = Some(Cached {
                    stamp,
                    registry: Arc::clone(&registry),
                });
                Ok(registry)
            }
            Err(e) => {
                *state = None;
                Err(e)
            }
        }
    }

    /// Drop the cached registry; the next `get` reloads unconditionally.
    pub fn invalidate(&self) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }

    pub fn is_loaded(&self) -> bool {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    fn stamp(&self) -> Result<Stamp, RegistryError> {
        let meta = std::fs::metadata(&self.path).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                RegistryError::ArtifactNotFound {
                    path: self.path.clone(),
                }
            } else {
                RegistryError::load_failure(e.to_string())
            }
        })?;
        let modified = meta
            .modified()
            .map_err(|e| RegistryError::load_failure(e.to_string()))?;
        Ok(Stamp {
            modified,
            len: meta.len(),
        })
    }
}

impl RegistrySource for RegistryCache {
    fn location(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Arc<ModelRegistry>, RegistryError> {
        self.get()
    }
}
