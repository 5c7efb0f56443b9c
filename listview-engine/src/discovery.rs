//! FILENAME: listview-engine/src/discovery.rs
//! Warehouse column discovery.
//!
//! Scans a row set and extracts one descriptor per distinct warehouse, in
//! first-seen order. The scan is a pure function over its input; the view
//! owns caching and decides when a row-set replacement forces rediscovery.

use product_model::ProductRecord;
use std::collections::HashSet;

use crate::definition::WarehouseColumn;

/// Collects the warehouses present in `records`, in first-seen order.
///
/// First-seen order (rows in sequence, each row's entries in document order)
/// keeps the column layout deterministic across repeated discovery on the
/// same data. An empty row set yields no columns.
pub fn discover_warehouse_columns(records: &[ProductRecord]) -> Vec<WarehouseColumn> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut columns = Vec::new();

    for record in records {
        for entry in record.warehouse_qty_map.iter() {
            if seen.insert(entry.warehouse_id.as_str()) {
                columns.push(WarehouseColumn::new(&entry.warehouse_id, &entry.name));
            }
        }
    }

    columns
}

#[cfg(test)]
mod tests {
    use super::*;
    use product_model::WarehouseEntry;

    fn record(id: u64, entries: &[(&str, &str, f64)]) -> ProductRecord {
        let mut record = ProductRecord::new(id);
        for (warehouse_id, name, qty) in entries {
            record = record.with_warehouse_entry(WarehouseEntry::new(*warehouse_id, *name, *qty));
        }
        record
    }

    #[test]
    fn test_discover_first_seen_order() {
        let records = vec![
            record(1, &[("5", "WH-E", 1.0), ("2", "WH-B", 2.0)]),
            record(2, &[("2", "WH-B", 3.0), ("9", "WH-I", 4.0)]),
        ];

        let columns = discover_warehouse_columns(&records);
        let ids: Vec<&str> = columns.iter().map(|c| c.warehouse_id.as_str()).collect();
        assert_eq!(ids, vec!["5", "2", "9"]);
        assert_eq!(columns[0].label, "WH-E");
    }

    #[test]
    fn test_discover_is_order_stable() {
        let records = vec![
            record(1, &[("3", "WH-C", 0.0)]),
            record(2, &[("1", "WH-A", 0.0)]),
        ];

        let first = discover_warehouse_columns(&records);
        let second = discover_warehouse_columns(&records);
        assert_eq!(first, second);
    }

    #[test]
    fn test_discover_empty_inputs() {
        assert!(discover_warehouse_columns(&[]).is_empty());

        let no_maps = vec![record(1, &[]), record(2, &[])];
        assert!(discover_warehouse_columns(&no_maps).is_empty());
    }
}
