//! FILENAME: product-model/src/lib.rs
//! PURPOSE: Main library entry point for the shared product row model.
//! CONTEXT: Re-exports public types and modules for use by other crates.

pub mod quantity_format;
pub mod record;
pub mod warehouse;

// Re-export commonly used types at the crate root
pub use quantity_format::{format_fixed, format_general, format_quantity};
pub use record::{ProductRecord, RecordError, RecordId, RecordKind};
pub use warehouse::{WarehouseEntry, WarehouseQtyMap};
