//! FILENAME: listview-engine/src/definition.rs
//! List View Definition - descriptors, schema entries, and columns.
//!
//! This module contains the types that DESCRIBE the dynamic column layer:
//! the discovered warehouse column descriptors, the virtual field entries
//! merged into the view's field schema, the column model handed back to the
//! host's column pipeline, and the display options.
//!
//! Warehouse identifiers are woven into column ids (`wh_col_<id>`) and field
//! names (`warehouse_<id>`) so that dynamic identifiers stay structurally
//! distinguishable from anything the host defines.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Prefix of every dynamic column id.
pub const COLUMN_ID_PREFIX: &str = "wh_col_";

/// Prefix of every dynamic field name.
pub const FIELD_NAME_PREFIX: &str = "warehouse_";

/// Builds the column id for a warehouse id.
pub fn column_id(warehouse_id: &str) -> String {
    format!("{}{}", COLUMN_ID_PREFIX, warehouse_id)
}

/// Builds the field name for a warehouse id.
pub fn field_name(warehouse_id: &str) -> String {
    format!("{}{}", FIELD_NAME_PREFIX, warehouse_id)
}

/// Recovers the warehouse id from a dynamic column id.
pub fn warehouse_id_from_column_id(column_id: &str) -> Option<&str> {
    column_id.strip_prefix(COLUMN_ID_PREFIX)
}

/// Recovers the warehouse id from a dynamic field name.
pub fn warehouse_id_from_field_name(field_name: &str) -> Option<&str> {
    field_name.strip_prefix(FIELD_NAME_PREFIX)
}

/// True when the id belongs to a dynamic column.
pub fn is_dynamic_column_id(column_id: &str) -> bool {
    column_id.starts_with(COLUMN_ID_PREFIX)
}

/// True when the field name belongs to a dynamic column.
pub fn is_dynamic_field_name(field_name: &str) -> bool {
    field_name.starts_with(FIELD_NAME_PREFIX)
}

// ============================================================================
// WAREHOUSE COLUMN DESCRIPTOR
// ============================================================================

/// A warehouse discovered in the current row set, one per dynamic column.
///
/// Descriptors live for one row-set generation; the view recomputes them on
/// every replacement because warehouses can appear or disappear across
/// searches, filters, and page changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarehouseColumn {
    /// Warehouse identifier (the key of the per-row quantity map).
    pub warehouse_id: String,

    /// Warehouse display name.
    pub name: String,

    /// Column header label (same as `name` unless overridden).
    pub label: String,
}

impl WarehouseColumn {
    pub fn new(warehouse_id: impl Into<String>, name: impl Into<String>) -> Self {
        let name = name.into();
        WarehouseColumn {
            warehouse_id: warehouse_id.into(),
            label: name.clone(),
            name,
        }
    }

    /// The column id this descriptor synthesizes.
    pub fn column_id(&self) -> String {
        column_id(&self.warehouse_id)
    }

    /// The field name this descriptor synthesizes.
    pub fn field_name(&self) -> String {
        field_name(&self.warehouse_id)
    }
}

// ============================================================================
// VIRTUAL FIELDS
// ============================================================================

/// A schema entry synthesized for a dynamic column.
///
/// Virtual fields are float-typed, read-only, and invisible to every native
/// mechanism: not stored, not searchable, not groupable, no aggregation, no
/// onchange, no relation. `sortable` stays false so the host's own sort
/// machinery never engages; dynamic columns sort through the client-side
/// engine instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VirtualField {
    pub name: String,
    pub label: String,
    pub sortable: bool,
    pub readonly: bool,
    pub store: bool,
    pub searchable: bool,
    pub aggregator: Option<String>,
    pub groupable: bool,
    pub triggers_onchange: bool,
    pub relation: Option<String>,
    pub required: bool,
}

impl VirtualField {
    /// The fixed field definition for a discovered warehouse column.
    pub fn for_column(column: &WarehouseColumn) -> Self {
        VirtualField {
            name: column.field_name(),
            label: column.label.clone(),
            sortable: false,
            readonly: true,
            store: false,
            searchable: false,
            aggregator: None,
            groupable: false,
            triggers_onchange: false,
            relation: None,
            required: false,
        }
    }
}

/// The view's map of synthesized fields, keyed by field name.
///
/// Insertion is idempotent and entries are never removed: a warehouse that
/// drops out of a filtered subset keeps presenting the same field definition
/// if it comes back later.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldSchema {
    fields: BTreeMap<String, VirtualField>,
}

impl FieldSchema {
    pub fn new() -> Self {
        FieldSchema::default()
    }

    /// Inserts the field for `column` unless one already exists.
    /// Returns true when a new field was created.
    pub fn ensure_field(&mut self, column: &WarehouseColumn) -> bool {
        let name = column.field_name();
        if self.fields.contains_key(&name) {
            return false;
        }
        self.fields.insert(name, VirtualField::for_column(column));
        true
    }

    pub fn get(&self, field_name: &str) -> Option<&VirtualField> {
        self.fields.get(field_name)
    }

    pub fn contains(&self, field_name: &str) -> bool {
        self.fields.contains_key(field_name)
    }

    /// All synthesized fields, in field-name order.
    pub fn fields(&self) -> impl Iterator<Item = &VirtualField> {
        self.fields.values()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

// ============================================================================
// COLUMNS
// ============================================================================

/// How a column behaves in the cell and sort pipelines.
///
/// Selected once, when the column enters the pipeline; every hook dispatches
/// on it uniformly. `Native` columns fall through to the host's behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnBehavior {
    /// A host-defined column; the dynamic layer never touches it.
    Native,
    /// A synthesized warehouse quantity column.
    Warehouse { warehouse_id: String },
}

/// Default visibility of an optional column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ColumnVisibility {
    #[default]
    Show,
    Hide,
}

/// A column in the host's column pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Pipeline identifier (`wh_col_<id>` for warehouse columns).
    pub id: String,

    /// Field name backing the column (`warehouse_<id>` for warehouse columns).
    pub name: String,

    /// Header label.
    pub label: String,

    /// Behavior strategy, fixed at injection time.
    pub behavior: ColumnBehavior,

    /// Extra header style class, if any.
    pub class: Option<String>,

    /// Default visibility in the optional-columns dropdown.
    pub optional: ColumnVisibility,

    pub readonly: bool,
}

impl Column {
    /// A host-native column.
    pub fn native(
        id: impl Into<String>,
        name: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Column {
            id: id.into(),
            name: name.into(),
            label: label.into(),
            behavior: ColumnBehavior::Native,
            class: None,
            optional: ColumnVisibility::Show,
            readonly: false,
        }
    }

    /// The synthesized column for a discovered warehouse.
    pub fn for_warehouse(column: &WarehouseColumn, header_class: &str) -> Self {
        Column {
            id: column.column_id(),
            name: column.field_name(),
            label: column.label.clone(),
            behavior: ColumnBehavior::Warehouse {
                warehouse_id: column.warehouse_id.clone(),
            },
            class: if header_class.is_empty() {
                None
            } else {
                Some(header_class.to_string())
            },
            optional: ColumnVisibility::Show,
            readonly: true,
        }
    }

    pub fn is_dynamic(&self) -> bool {
        matches!(self.behavior, ColumnBehavior::Warehouse { .. })
    }

    /// The warehouse id for a warehouse column, `None` for native columns.
    pub fn warehouse_id(&self) -> Option<&str> {
        match &self.behavior {
            ColumnBehavior::Warehouse { warehouse_id } => Some(warehouse_id),
            ColumnBehavior::Native => None,
        }
    }
}

// ============================================================================
// DISPLAY OPTIONS
// ============================================================================

/// Controls how warehouse columns are displayed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListViewOptions {
    /// Decimal places for quantity cell text.
    pub decimal_places: u8,

    /// Header style class applied to injected columns.
    pub dynamic_header_class: String,

    /// Show a dimmed sort hint on hover over inactive warehouse headers.
    pub hover_sort_hint: bool,
}

impl Default for ListViewOptions {
    fn default() -> Self {
        ListViewOptions {
            decimal_places: 2,
            dynamic_header_class: "o_list_number_th".to_string(),
            hover_sort_hint: true,
        }
    }
}
