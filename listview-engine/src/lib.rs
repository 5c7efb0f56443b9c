//! FILENAME: listview-engine/src/lib.rs
//! Dynamic warehouse column subsystem for the product list view.
//!
//! This crate augments a product list with one synthesized column per
//! warehouse found in the loaded rows. The backing data source has no idea
//! these columns exist, so discovery, field synthesis, column injection,
//! cell resolution, and sorting all happen client-side over the rows
//! already in memory. It depends on `product-model` for the shared row
//! types.
//!
//! Layers:
//! - `definition`: descriptors, schema entries, columns, display options
//! - `discovery`: which warehouses the current rows contain
//! - `inject`: merging synthesized columns into the host's column pipeline
//! - `resolve`: per-cell quantity, display text, and status tier
//! - `sort`: the client-side sort engine for synthesized columns
//! - `compat`: bridge to the external column-width manager
//! - `view`: the per-view instance that ties the layers together

pub mod compat;
pub mod definition;
pub mod discovery;
pub mod inject;
pub mod resolve;
pub mod sort;
pub mod view;

pub use compat::{ensure_field_for_resize, sync_schema_fields, FieldMeta, FieldMetadataRegistry};
pub use definition::{
    column_id, field_name, is_dynamic_column_id, is_dynamic_field_name,
    warehouse_id_from_column_id, warehouse_id_from_field_name, Column, ColumnBehavior,
    ColumnVisibility, FieldSchema, ListViewOptions, VirtualField, WarehouseColumn,
    COLUMN_ID_PREFIX, FIELD_NAME_PREFIX,
};
pub use discovery::discover_warehouse_columns;
pub use inject::{augment_active_columns, augment_all_columns};
pub use resolve::{resolve_warehouse_cell, supports_formatter, ColorTier, ResolvedCell};
pub use sort::{ClientSortEngine, SortClick, SortIndicator, SortState};
pub use view::WarehouseListView;
