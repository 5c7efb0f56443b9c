//! FILENAME: product-model/src/warehouse.rs
//! PURPOSE: The per-row warehouse quantity map and its entries.
//! CONTEXT: Each product row carries a JSON mapping from warehouse id to
//! {name, qty, optional min_qty}. The backend computes it on the fly, so the
//! map is treated as untrusted input: malformed payloads decode to an empty
//! map and malformed entries fall back to zero-quantity defaults. Entry
//! order is the document order of the payload, which keeps column discovery
//! stable across refreshes of the same data.

use serde::de::Deserializer;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// A single warehouse's stock figures for one product row.
#[derive(Debug, Clone, PartialEq)]
pub struct WarehouseEntry {
    /// Warehouse identifier, as the backend keys the map (a string id).
    pub warehouse_id: String,

    /// Display name of the warehouse (e.g., "Main Warehouse").
    pub name: String,

    /// Available quantity in this warehouse.
    pub qty: f64,

    /// Reorder threshold, present only when a reorder rule exists.
    pub min_qty: Option<f64>,
}

impl WarehouseEntry {
    pub fn new(warehouse_id: impl Into<String>, name: impl Into<String>, qty: f64) -> Self {
        WarehouseEntry {
            warehouse_id: warehouse_id.into(),
            name: name.into(),
            qty,
            min_qty: None,
        }
    }

    /// Sets the reorder threshold.
    pub fn with_min_qty(mut self, min_qty: f64) -> Self {
        self.min_qty = Some(min_qty);
        self
    }
}

/// Wire shape of a single entry: the warehouse id is the map key, not a field.
#[derive(Serialize)]
struct EntryPayload<'a> {
    name: &'a str,
    qty: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    min_qty: Option<f64>,
}

/// The per-row mapping from warehouse id to stock figures.
///
/// Keeps entries in encounter order and supports constant-time lookup by
/// warehouse id. Inserting an id twice replaces the entry in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WarehouseQtyMap {
    entries: Vec<WarehouseEntry>,
    index: HashMap<String, usize>,
}

impl WarehouseQtyMap {
    pub fn new() -> Self {
        WarehouseQtyMap::default()
    }

    /// Inserts an entry, replacing any existing entry for the same
    /// warehouse id without disturbing its position.
    pub fn insert(&mut self, entry: WarehouseEntry) {
        match self.index.get(&entry.warehouse_id) {
            Some(&pos) => self.entries[pos] = entry,
            None => {
                self.index.insert(entry.warehouse_id.clone(), self.entries.len());
                self.entries.push(entry);
            }
        }
    }

    pub fn get(&self, warehouse_id: &str) -> Option<&WarehouseEntry> {
        self.index.get(warehouse_id).map(|&pos| &self.entries[pos])
    }

    /// Available quantity for a warehouse, zero when the entry is absent.
    pub fn qty(&self, warehouse_id: &str) -> f64 {
        self.get(warehouse_id).map(|entry| entry.qty).unwrap_or(0.0)
    }

    /// Entries in encounter order.
    pub fn iter(&self) -> impl Iterator<Item = &WarehouseEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Decodes a map from an arbitrary JSON value.
    ///
    /// Only objects contribute entries; any other shape (the backend
    /// serializes an unset JSON field as `false`) yields an empty map.
    pub fn from_value(value: &Value) -> Self {
        let mut map = WarehouseQtyMap::new();
        if let Value::Object(object) = value {
            for (warehouse_id, entry_value) in object {
                map.insert(entry_from_value(warehouse_id, entry_value));
            }
        }
        map
    }
}

/// Decodes one entry, defaulting each malformed or missing field.
fn entry_from_value(warehouse_id: &str, value: &Value) -> WarehouseEntry {
    let name = value
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or(warehouse_id);
    let qty = value.get("qty").and_then(Value::as_f64).unwrap_or(0.0);
    let min_qty = value.get("min_qty").and_then(Value::as_f64);

    WarehouseEntry {
        warehouse_id: warehouse_id.to_string(),
        name: name.to_string(),
        qty,
        min_qty,
    }
}

impl Serialize for WarehouseQtyMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(
                &entry.warehouse_id,
                &EntryPayload {
                    name: &entry.name,
                    qty: entry.qty,
                    min_qty: entry.min_qty,
                },
            )?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for WarehouseQtyMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Decode through Value so non-object payloads degrade to an empty
        // map instead of failing the whole row.
        let value = Value::deserialize(deserializer)?;
        Ok(WarehouseQtyMap::from_value(&value))
    }
}
