//! `stockcast-core` — domain primitives for stocking-days prediction.
//!
//! This crate contains **pure domain** types (no I/O, no model loading).

pub mod error;
pub mod id;
pub mod value_object;

pub use error::DomainError;
pub use id::InventoryId;
pub use value_object::{Quantity, StockingDays, ValueObject};
