use std::path::{Path, PathBuf};
use std::sync::Arc;

use stockcast_core::StockingDays;

use crate::model::{ModelError, StockingModel};
use crate::registry::{ModelRegistry, RegistryError};
use crate::result::{PredictError, Prediction, PredictionRequest, PredictionResponse};

/// Where a [`Predictor`] obtains its model registry.
pub trait RegistrySource {
    /// Artifact location, for diagnostics.
    fn location(&self) -> &Path;

    fn load(&self) -> Result<Arc<ModelRegistry>, RegistryError>;
}

/// Reads the artifact from disk on every call; nothing is retained between calls.
#[derive(Debug, Clone)]
pub struct ArtifactFile {
    path: PathBuf,
}

impl ArtifactFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RegistrySource for ArtifactFile {
    fn location(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Arc<ModelRegistry>, RegistryError> {
        ModelRegistry::load(&self.path).map(Arc::new)
    }
}

/// Stocking-days prediction service.
#[derive(Debug, Clone)]
pub struct Predictor<S = ArtifactFile> {
    source: S,
}

impl Predictor<ArtifactFile> {
    /// Predictor that reloads the artifact at `path` for every request.
    pub fn from_artifact(path: impl Into<PathBuf>) -> Self {
        Self::new(ArtifactFile::new(path))
    }
}

impl<S: RegistrySource> Predictor<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Answer a request, folding every failure into the response payload.
    pub fn predict(&self, request: &PredictionRequest) -> PredictionResponse {
        self.try_predict(request).into()
    }

    pub fn try_predict(&self, request: &PredictionRequest) -> Result<Prediction, PredictError> {
        let span = tracing::debug_span!(
            "predict",
            inventory_id = %request.inventory_id,
            quantity = request.quantity.value(),
        );
        let _enter = span.enter();

        let registry = self.source.load().inspect_err(|e| {
            tracing::warn!(
                path = %self.source.location().display(),
                error = %e,
                "model registry unavailable"
            );
        })?;

        let Some(model) = registry.get(request.inventory_id) else {
            tracing::debug!("no model for inventory item");
            return Ok(Prediction::no_model(request.inventory_id));
        };

        let raw = model.infer(request.quantity.value())?;
        let days = StockingDays::clamped(raw);
        if !days.is_finite() {
            return Err(ModelError::NonFinite.into());
        }
        if days.value() != raw {
            tracing::debug!(raw, "prediction clamped to zero");
        }

        Ok(Prediction::predicted(request.inventory_id, days))
    }
}
