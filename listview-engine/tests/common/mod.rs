//! FILENAME: tests/common/mod.rs
//! Fixtures for list view integration tests.

#![allow(dead_code)]

use listview_engine::{Column, FieldMeta, FieldMetadataRegistry, ListViewOptions, WarehouseListView};
use product_model::{ProductRecord, WarehouseEntry};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Test harness bundling a view and its current row set's model name.
pub struct ListFixture {
    pub view: WarehouseListView,
}

impl ListFixture {
    /// An empty view with default options.
    pub fn new() -> Self {
        ListFixture {
            view: WarehouseListView::new(ListViewOptions::default()),
        }
    }

    /// A view loaded with the three-row sample set on product.template.
    pub fn with_sample_rows() -> Self {
        let mut fixture = Self::new();
        fixture
            .view
            .on_row_set_replaced("product.template", sample_records());
        fixture
    }

    pub fn record_order(&self) -> Vec<u64> {
        self.view.records().iter().map(|r| r.id).collect()
    }
}

/// Builds a record with the given warehouse entries.
pub fn record(id: u64, entries: &[(&str, &str, f64, Option<f64>)]) -> ProductRecord {
    let mut record = ProductRecord::new(id);
    for (warehouse_id, name, qty, min_qty) in entries {
        let mut entry = WarehouseEntry::new(*warehouse_id, *name, *qty);
        entry.min_qty = *min_qty;
        record = record.with_warehouse_entry(entry);
    }
    record
}

/// Three rows against one warehouse "A": below threshold, above threshold,
/// and no entry at all.
pub fn sample_records() -> Vec<ProductRecord> {
    vec![
        record(1, &[("A", "WH-A", 5.0, Some(10.0))]),
        record(2, &[("A", "WH-A", 20.0, Some(10.0))]),
        record(3, &[]),
    ]
}

/// A pair of host-native columns.
pub fn native_columns() -> Vec<Column> {
    vec![
        Column::native("col_0", "name", "Name"),
        Column::native("col_1", "list_price", "Sales Price"),
    ]
}

/// A width-manager field store the test can keep inspecting after handing
/// the registry to the view.
#[derive(Clone, Default)]
pub struct SharedRegistry {
    store: Rc<RefCell<HashMap<String, FieldMeta>>>,
}

impl SharedRegistry {
    pub fn new() -> Self {
        SharedRegistry::default()
    }

    pub fn field(&self, name: &str) -> Option<FieldMeta> {
        self.store.borrow().get(name).cloned()
    }

    pub fn len(&self) -> usize {
        self.store.borrow().len()
    }

    /// Pre-seeds an entry, as if the add-on already knew the column.
    pub fn seed(&self, meta: FieldMeta) {
        self.store.borrow_mut().insert(meta.name.clone(), meta);
    }
}

impl FieldMetadataRegistry for SharedRegistry {
    fn has_field(&self, name: &str) -> bool {
        self.store.borrow().contains_key(name)
    }

    fn register_field(&mut self, meta: FieldMeta) {
        self.store.borrow_mut().insert(meta.name.clone(), meta);
    }
}
