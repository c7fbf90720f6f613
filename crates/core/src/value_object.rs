//! Value objects: equality by value, not identity.

use core::str::FromStr;
use serde::Serialize;

use crate::error::DomainError;

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "modify" one,
/// construct a new one.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}

/// Quantity of an item fed to a model as its single feature.
///
/// Only finiteness is enforced. Zero and negative quantities are valid and
/// reach the model unchanged.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Quantity(f64);

impl Quantity {
    pub fn new(value: f64) -> Result<Self, DomainError> {
        if !value.is_finite() {
            return Err(DomainError::validation(format!(
                "quantity must be a finite number, got {value}"
            )));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl ValueObject for Quantity {}

impl FromStr for Quantity {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse::<f64>()
            .map_err(|e| DomainError::validation(format!("quantity: {e}")))?;
        Self::new(value)
    }
}

/// Predicted number of days a quantity of an item will last.
///
/// Always `>= 0`: regression models are unconstrained and may emit negative
/// values for extreme inputs, so the only constructor clamps.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct StockingDays(f64);

impl StockingDays {
    /// Clamp a raw model output to the non-negative range.
    ///
    /// `NaN` and `-0.0` both become `0.0`. `+inf` is kept; callers decide
    /// whether an unbounded prediction is acceptable.
    pub fn clamped(raw: f64) -> Self {
        let v = raw.max(0.0);
        Self(if v == 0.0 { 0.0 } else { v })
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    pub fn is_finite(&self) -> bool {
        self.0.is_finite()
    }
}

impl ValueObject for StockingDays {}
