//! Runtime configuration.

use std::path::{Path, PathBuf};

use anyhow::Context;

/// Artifact path override. Relative values are taken relative to the
/// executable's directory, like the default.
pub const MODEL_PATH_ENV: &str = "STOCKCAST_MODEL_PATH";

/// Artifact file name looked up beside the executable.
pub const ARTIFACT_FILE_NAME: &str = "inventory_models.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub model_path: PathBuf,
}

impl Config {
    pub fn new(model_path: impl Into<PathBuf>) -> Self {
        Self {
            model_path: model_path.into(),
        }
    }

    /// Resolve the artifact path from `STOCKCAST_MODEL_PATH` and the running
    /// executable. The caller's working directory is never consulted.
    pub fn from_env() -> anyhow::Result<Self> {
        let override_path = std::env::var_os(MODEL_PATH_ENV)
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);

        match override_path {
            Some(path) if path.is_absolute() => {
                tracing::debug!(path = %path.display(), "using model path from {MODEL_PATH_ENV}");
                Ok(Self::new(path))
            }
            other => {
                let exe = std::env::current_exe()
                    .context("failed to resolve the running executable path")?;
                Self::resolve(&exe, other.as_deref())
            }
        }
    }

    /// Default artifact location for an executable at `exe`.
    pub fn beside_executable(exe: &Path) -> anyhow::Result<Self> {
        Self::resolve(exe, None)
    }

    /// Absolute overrides are used as given; relative overrides and the
    /// default file name are joined onto the executable's directory.
    pub fn resolve(exe: &Path, override_path: Option<&Path>) -> anyhow::Result<Self> {
        if let Some(path) = override_path.filter(|p| p.is_absolute()) {
            return Ok(Self::new(path));
        }
        let dir = exe.parent().with_context(|| {
            format!("executable path {} has no parent directory", exe.display())
        })?;
        let file = override_path.unwrap_or(Path::new(ARTIFACT_FILE_NAME));
        Ok(Self::new(dir.join(file)))
    }
}
