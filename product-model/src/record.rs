//! FILENAME: product-model/src/record.rs
//! PURPOSE: The opaque product row model shared by the list view crates.
//! CONTEXT: A row is a stable id plus the backend's field payload. The
//! warehouse quantity map is split out of the payload because it drives the
//! dynamic columns; every other field stays opaque to this crate.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::warehouse::{WarehouseEntry, WarehouseQtyMap};

/// Stable identifier of a product row.
pub type RecordId = u64;

#[derive(Error, Debug, PartialEq)]
pub enum RecordError {
    #[error("row payload is not a JSON object")]
    NotAnObject,

    #[error("row payload has no numeric 'id'")]
    MissingId,
}

/// The two row models that get warehouse columns. Rows of any other model
/// bypass the dynamic column machinery entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordKind {
    ProductTemplate,
    ProductVariant,
}

impl RecordKind {
    /// Parses the backend's model name; `None` means unsupported.
    pub fn parse(res_model: &str) -> Option<RecordKind> {
        match res_model {
            "product.template" => Some(RecordKind::ProductTemplate),
            "product.product" => Some(RecordKind::ProductVariant),
            _ => None,
        }
    }

    pub fn res_model(&self) -> &'static str {
        match self {
            RecordKind::ProductTemplate => "product.template",
            RecordKind::ProductVariant => "product.product",
        }
    }
}

/// One row of the product list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: RecordId,

    /// Per-warehouse stock figures backing the dynamic columns.
    #[serde(default, skip_serializing_if = "WarehouseQtyMap::is_empty")]
    pub warehouse_qty_map: WarehouseQtyMap,

    /// The remaining field payload, opaque to the dynamic column layer.
    #[serde(flatten)]
    pub data: Map<String, Value>,
}

impl ProductRecord {
    pub fn new(id: RecordId) -> Self {
        ProductRecord {
            id,
            warehouse_qty_map: WarehouseQtyMap::new(),
            data: Map::new(),
        }
    }

    /// Adds one warehouse entry to the row's quantity map.
    pub fn with_warehouse_entry(mut self, entry: WarehouseEntry) -> Self {
        self.warehouse_qty_map.insert(entry);
        self
    }

    /// Sets an opaque native field value.
    pub fn with_field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.data.insert(name.into(), value);
        self
    }

    /// Strict decoding of a backend row payload.
    ///
    /// Only the row shape itself is validated; the warehouse quantity map is
    /// always decoded lossily (malformed map means no warehouse entries).
    pub fn from_json(value: &Value) -> Result<Self, RecordError> {
        let object = value.as_object().ok_or(RecordError::NotAnObject)?;
        let id = object
            .get("id")
            .and_then(Value::as_u64)
            .ok_or(RecordError::MissingId)?;

        let mut data = object.clone();
        data.remove("id");
        let warehouse_qty_map = data
            .remove("warehouse_qty_map")
            .map(|map_value| WarehouseQtyMap::from_value(&map_value))
            .unwrap_or_default();

        Ok(ProductRecord {
            id,
            warehouse_qty_map,
            data,
        })
    }

    /// Looks up an opaque native field value.
    pub fn native_value(&self, field: &str) -> Option<&Value> {
        self.data.get(field)
    }
}
