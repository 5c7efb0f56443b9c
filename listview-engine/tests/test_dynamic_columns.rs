//! FILENAME: tests/test_dynamic_columns.rs
//! Integration tests for column discovery, injection, and cell resolution.

mod common;

use common::{native_columns, record, sample_records, ListFixture, SharedRegistry};
use listview_engine::{Column, ColorTier, FieldMeta, WarehouseColumn};
use product_model::ProductRecord;
use serde_json::json;

// ============================================================================
// DISCOVERY AND RESOLUTION
// ============================================================================

#[test]
fn test_sample_rows_end_to_end() {
    let mut fixture = ListFixture::with_sample_rows();

    let columns = fixture.view.warehouse_columns().to_vec();
    assert_eq!(columns, vec![WarehouseColumn::new("A", "WH-A")]);

    let column = Column::for_warehouse(&columns[0], "o_list_number_th");
    let records: Vec<ProductRecord> = fixture.view.records().to_vec();

    let cells: Vec<_> = records
        .iter()
        .map(|r| fixture.view.field_from_record(r, "warehouse_A").unwrap())
        .collect();
    assert_eq!(cells[0].raw, 5.0);
    assert_eq!(cells[1].raw, 20.0);
    assert_eq!(cells[2].raw, 0.0);
    assert_eq!(cells[0].tier, ColorTier::Warning);
    assert_eq!(cells[1].tier, ColorTier::Success);
    assert_eq!(cells[2].tier, ColorTier::Danger);

    assert_eq!(
        fixture.view.formatted_value(&column, &records[0]).as_deref(),
        Some("5.00")
    );
    assert_eq!(
        fixture.view.formatted_value(&column, &records[2]).as_deref(),
        Some("0.00")
    );
}

#[test]
fn test_rows_from_json_payloads() {
    let payloads = [
        json!({"id": 1, "name": "Desk",
               "warehouse_qty_map": {"A": {"name": "WH-A", "qty": 3.0}}}),
        json!({"id": 2, "name": "Chair", "warehouse_qty_map": false}),
    ];
    let records: Vec<ProductRecord> = payloads
        .iter()
        .map(|p| ProductRecord::from_json(p).unwrap())
        .collect();

    let mut fixture = ListFixture::new();
    fixture.view.on_row_set_replaced("product.product", records);

    let columns = fixture.view.warehouse_columns();
    assert_eq!(columns.len(), 1);
    assert_eq!(columns[0].label, "WH-A");
    assert!(fixture.view.schema().contains("warehouse_A"));
}

// ============================================================================
// COLUMN INJECTION
// ============================================================================

#[test]
fn test_injection_preserves_native_columns() {
    let mut fixture = ListFixture::with_sample_rows();

    let all = fixture.view.process_all_columns(&native_columns());
    let ids: Vec<&str> = all.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["col_0", "col_1", "wh_col_A"]);
    assert_eq!(&all[..2], &native_columns()[..]);
    assert_eq!(all[2].class.as_deref(), Some("o_list_number_th"));
    assert!(all[2].readonly);
}

#[test]
fn test_injection_is_idempotent() {
    let mut fixture = ListFixture::with_sample_rows();

    let once = fixture.view.process_all_columns(&native_columns());
    let twice = fixture.view.process_all_columns(&once);
    assert_eq!(once, twice);
}

#[test]
fn test_active_columns_deduplicate() {
    let mut fixture = ListFixture::with_sample_rows();
    let all = fixture.view.process_all_columns(&native_columns());

    let active = fixture.view.active_columns(&native_columns(), &all);
    let ids: Vec<&str> = active.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["col_0", "col_1", "wh_col_A"]);

    // The warehouse column being active already must not duplicate it.
    let again = fixture.view.active_columns(&active, &all);
    assert_eq!(again, active);
}

#[test]
fn test_unsupported_model_passes_through() {
    let mut fixture = ListFixture::new();
    fixture
        .view
        .on_row_set_replaced("res.partner", sample_records());

    let host = native_columns();
    assert_eq!(fixture.view.process_all_columns(&host), host);
    assert_eq!(fixture.view.active_columns(&host, &host), host);
    assert!(fixture.view.schema().is_empty());
}

// ============================================================================
// ROW-SET REPLACEMENT
// ============================================================================

#[test]
fn test_replacement_swaps_columns_but_keeps_schema() {
    let mut fixture = ListFixture::with_sample_rows();
    assert!(fixture.view.schema().contains("warehouse_A"));

    // A new search drops every row holding "A" and brings in "B".
    let replacement = vec![record(9, &[("B", "WH-B", 2.0, None)])];
    fixture
        .view
        .on_row_set_replaced("product.template", replacement);

    let all = fixture.view.process_all_columns(&native_columns());
    let active = fixture.view.active_columns(&native_columns(), &all);
    let ids: Vec<&str> = active.iter().map(|c| c.id.as_str()).collect();
    assert!(!ids.contains(&"wh_col_A"));
    assert!(ids.contains(&"wh_col_B"));

    // The field for "A" survives; "B"'s is newly created.
    assert!(fixture.view.schema().contains("warehouse_A"));
    assert!(fixture.view.schema().contains("warehouse_B"));
    assert_eq!(fixture.view.generation(), 2);
}

// ============================================================================
// WIDTH-MANAGER BRIDGE
// ============================================================================

#[test]
fn test_registry_mirrors_fields_eagerly() {
    let registry = SharedRegistry::new();
    let mut fixture = ListFixture::with_sample_rows();
    fixture.view.attach_field_registry(Box::new(registry.clone()));

    let meta = registry.field("warehouse_A").unwrap();
    assert_eq!(meta.label, "WH-A");
    assert_eq!(meta.width, None);

    // The next generation's new warehouse is mirrored as part of the refresh.
    let replacement = vec![record(9, &[("B", "WH-B", 2.0, None)])];
    fixture
        .view
        .on_row_set_replaced("product.template", replacement);
    assert!(registry.field("warehouse_B").is_some());
    assert_eq!(registry.len(), 2);
}

#[test]
fn test_registry_entries_survive_resync() {
    let registry = SharedRegistry::new();
    registry.seed(FieldMeta {
        width: Some(120),
        ..FieldMeta::for_header("warehouse_A", "Persisted")
    });

    let mut fixture = ListFixture::with_sample_rows();
    fixture.view.attach_field_registry(Box::new(registry.clone()));

    let meta = registry.field("warehouse_A").unwrap();
    assert_eq!(meta.width, Some(120));
    assert_eq!(meta.label, "Persisted");
}

#[test]
fn test_resize_intercept_registers_unseen_column() {
    let registry = SharedRegistry::new();
    let mut fixture = ListFixture::with_sample_rows();
    fixture.view.attach_field_registry(Box::new(registry.clone()));

    // A column injected after the add-on initialized: unknown to the store
    // and to the schema, known only through its header.
    fixture.view.on_start_resize("warehouse_Z", "WH-Z");
    assert_eq!(registry.field("warehouse_Z").unwrap().label, "WH-Z");

    // Native headers never land in the store.
    fixture.view.on_start_resize("list_price", "Sales Price");
    assert!(registry.field("list_price").is_none());
}

#[test]
fn test_bridge_without_registry_is_noop() {
    let mut fixture = ListFixture::with_sample_rows();
    // No registry attached; must not panic or create state.
    fixture.view.on_start_resize("warehouse_A", "WH-A");
    assert!(fixture.view.field_registry().is_none());
}
