//! Strongly-typed identifiers.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of a catalog item; selects which trained model to query.
///
/// Serialises as a bare integer, and as a string-encoded integer when used as
/// a JSON object key (the model artifact is keyed this way).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InventoryId(i64);

impl InventoryId {
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    pub const fn get(&self) -> i64 {
        self.0
    }
}

impl core::fmt::Display for InventoryId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<i64> for InventoryId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<InventoryId> for i64 {
    fn from(value: InventoryId) -> Self {
        value.0
    }
}

impl FromStr for InventoryId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s
            .trim()
            .parse::<i64>()
            .map_err(|e| DomainError::invalid_id(format!("InventoryId: {e}")))?;
        Ok(Self(raw))
    }
}
