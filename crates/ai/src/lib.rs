//! `stockcast-ai`
//!
//! **Responsibility:** stocking-days inference over pre-fitted regression models.
//!
//! - Models are produced by an external training process and arrive as a
//!   read-only artifact; nothing here trains or mutates them.
//! - Every failure is surfaced as data ([`PredictionResponse::Error`]), never
//!   as a panic, because the caller is a separate process reading stdout.

pub mod cache;
pub mod model;
pub mod predictor;
pub mod registry;
pub mod result;

pub use cache::RegistryCache;
pub use model::{ModelError, RegressionModel, StockingModel};
pub use predictor::{ArtifactFile, Predictor, RegistrySource};
pub use registry::{ModelRegistry, RegistryError, FORMAT_VERSION};
pub use result::{PredictError, Prediction, PredictionRequest, PredictionResponse, NO_MODEL_INFO};
