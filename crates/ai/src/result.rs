use serde::Serialize;
use thiserror::Error;

use stockcast_core::{InventoryId, Quantity, StockingDays};

use crate::model::ModelError;
use crate::registry::RegistryError;

/// Informational note attached when an item has no trained model yet.
pub const NO_MODEL_INFO: &str = "No model available for this item.";

/// A single stocking-days question.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PredictionRequest {
    pub inventory_id: InventoryId,
    pub quantity: Quantity,
}

impl PredictionRequest {
    pub fn new(inventory_id: InventoryId, quantity: Quantity) -> Self {
        Self {
            inventory_id,
            quantity,
        }
    }
}

/// Successful answer. `predicted_stocking_days` is `None` when the item has no model.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    pub inventory_id: InventoryId,
    pub predicted_stocking_days: Option<StockingDays>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
}

impl Prediction {
    pub fn predicted(inventory_id: InventoryId, days: StockingDays) -> Self {
        Self {
            inventory_id,
            predicted_stocking_days: Some(days),
            info: None,
        }
    }

    /// Absence of a model is an expected case (new catalog items), not an error.
    pub fn no_model(inventory_id: InventoryId) -> Self {
        Self {
            inventory_id,
            predicted_stocking_days: None,
            info: Some(NO_MODEL_INFO.to_string()),
        }
    }
}

/// Reasons a valid request could not be answered.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("Prediction failed: {0}")]
    Inference(#[from] ModelError),
}

/// Wire payload written to stdout, one JSON object per invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PredictionResponse {
    Prediction(Prediction),
    Error { error: String },
}

impl PredictionResponse {
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            error: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    /// Render as a single line of JSON.
    ///
    /// Serialisation of these shapes cannot realistically fail, but if it does
    /// the caller still gets a well-formed error object.
    pub fn to_json_line(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            serde_json::json!({ "error": format!("Failed to encode response: {e}") }).to_string()
        })
    }
}

impl From<Result<Prediction, PredictError>> for PredictionResponse {
    fn from(value: Result<Prediction, PredictError>) -> Self {
        match value {
            Ok(p) => Self::Prediction(p),
            Err(e) => Self::error(e.to_string()),
        }
    }
}
