//! `stockcast-predict <inventoryId> <quantity>`
//!
//! One request per process. Exactly one JSON line is written to stdout; the
//! exit code is `1` only when the invocation itself is malformed.

pub mod args;
pub mod config;

use std::ffi::OsString;

use stockcast_ai::{PredictionResponse, Predictor};

pub use args::{parse_args, CliError};
pub use config::Config;

/// Exit code for a well-formed invocation (even if the payload is an error).
pub const EXIT_OK: u8 = 0;

/// Exit code for argument count/type violations.
pub const EXIT_USAGE: u8 = 1;

#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub response: PredictionResponse,
    pub exit_code: u8,
}

impl Outcome {
    fn ok(response: PredictionResponse) -> Self {
        Self {
            response,
            exit_code: EXIT_OK,
        }
    }
}

/// Handle one invocation. `args` excludes the program name.
///
/// Configuration is resolved only after the arguments validate, so usage
/// errors never depend on the environment.
pub fn run<I, A, F>(args: I, load_config: F) -> Outcome
where
    I: IntoIterator<Item = A>,
    A: Into<OsString>,
    F: FnOnce() -> anyhow::Result<Config>,
{
    let request = match parse_args(args) {
        Ok(request) => request,
        Err(e) => {
            tracing::debug!(error = ?e, "rejected invocation");
            return Outcome {
                response: PredictionResponse::error(e.to_string()),
                exit_code: EXIT_USAGE,
            };
        }
    };

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(error = %format!("{e:#}"), "configuration unavailable");
            return Outcome::ok(PredictionResponse::error(format!("Failed to load model: {e:#}")));
        }
    };

    Outcome::ok(Predictor::from_artifact(config.model_path).predict(&request))
}
