//! FILENAME: listview-engine/src/inject.rs
//! Column injection into the host's column pipeline.
//!
//! Two operations mirror the host's pipeline: one extends the "all columns"
//! sequence with synthesized warehouse columns, the other extends the
//! "active columns" sequence with whatever warehouse columns the first pass
//! produced. Both are idempotent, never duplicate an id, and never disturb
//! the host's own columns: the host sequence comes back unchanged, in its
//! original relative order, with warehouse columns appended.

use std::collections::HashSet;

use crate::definition::{is_dynamic_column_id, Column, WarehouseColumn};

/// Appends one synthesized column per discovered warehouse.
///
/// Returns the host sequence unchanged when it already contains warehouse
/// columns (repeated pipeline passes must not inject twice) or when nothing
/// was discovered. Always returns a fresh vector.
pub fn augment_all_columns(
    host_columns: &[Column],
    discovered: &[WarehouseColumn],
    header_class: &str,
) -> Vec<Column> {
    let already_injected = host_columns
        .iter()
        .any(|column| is_dynamic_column_id(&column.id));
    if already_injected || discovered.is_empty() {
        return host_columns.to_vec();
    }

    let mut columns = host_columns.to_vec();
    columns.extend(
        discovered
            .iter()
            .map(|warehouse| Column::for_warehouse(warehouse, header_class)),
    );
    columns
}

/// Appends every warehouse column of `all_columns` that the host's active
/// sequence doesn't already contain, preserving relative order.
pub fn augment_active_columns(host_active: &[Column], all_columns: &[Column]) -> Vec<Column> {
    let mut present: HashSet<&str> = host_active.iter().map(|c| c.id.as_str()).collect();

    let mut columns = host_active.to_vec();
    for column in all_columns {
        if column.is_dynamic() && present.insert(column.id.as_str()) {
            columns.push(column.clone());
        }
    }
    columns
}
