//! FILENAME: listview-engine/src/view.rs
//! The augmented list view instance.
//!
//! Owns everything one rendered list needs for its warehouse columns: the
//! loaded rows, the synthesized field schema, the per-generation column
//! cache, the side table of resolved cells, the client sort engine, and the
//! optional width-manager bridge.
//!
//! The host is contracted to call `on_row_set_replaced` synchronously at
//! view initialization and on every row-set replacement (new search, filter,
//! group-by, page), before any cell of the new generation is rendered. That
//! call runs the whole refresh sequence exactly once per generation:
//! invalidate, discover, synthesize fields, resolve cells, mirror fields to
//! the width manager, re-apply the active client sort.
//!
//! Every hook method returns its "not handled" arm (`None`,
//! `SortClick::Native`, `SortIndicator::Native`) for native columns and for
//! unsupported row models; the host falls back to its own behavior there.

use log::{debug, trace};
use product_model::{ProductRecord, RecordId, RecordKind};
use std::collections::HashMap;

use crate::compat::{ensure_field_for_resize, sync_schema_fields, FieldMetadataRegistry};
use crate::definition::{
    warehouse_id_from_field_name, Column, FieldSchema, ListViewOptions, WarehouseColumn,
};
use crate::discovery::discover_warehouse_columns;
use crate::inject::{augment_active_columns, augment_all_columns};
use crate::resolve::{cell_title, resolve_warehouse_cell, supports_formatter, ResolvedCell};
use crate::sort::{ClientSortEngine, SortClick, SortIndicator, SortState};

/// One product list view with dynamic warehouse columns.
pub struct WarehouseListView {
    options: ListViewOptions,

    /// Model name of the current row set, as the host reports it.
    res_model: String,

    /// Parsed kind; `None` makes every hook a pass-through.
    kind: Option<RecordKind>,

    /// The loaded rows, in render order.
    records: Vec<ProductRecord>,

    /// Synthesized fields. Grows monotonically for the view's lifetime.
    schema: FieldSchema,

    /// Columns discovered for the current generation.
    column_cache: Option<Vec<WarehouseColumn>>,

    /// Side table of resolved cells: row id -> warehouse id -> cell.
    /// Rebuilt wholesale on every row-set replacement so rows themselves
    /// stay untouched.
    derived: HashMap<RecordId, HashMap<String, ResolvedCell>>,

    sort: ClientSortEngine,

    /// Width-manager bridge, when that add-on is installed.
    field_registry: Option<Box<dyn FieldMetadataRegistry>>,

    /// Row-set generation counter; each replacement bumps it.
    generation: u64,
}

impl WarehouseListView {
    pub fn new(options: ListViewOptions) -> Self {
        WarehouseListView {
            options,
            res_model: String::new(),
            kind: None,
            records: Vec::new(),
            schema: FieldSchema::new(),
            column_cache: None,
            derived: HashMap::new(),
            sort: ClientSortEngine::new(),
            field_registry: None,
            generation: 0,
        }
    }

    // ========================================================================
    // LIFECYCLE
    // ========================================================================

    /// Replaces the row set and refreshes all dynamic state.
    pub fn on_row_set_replaced(&mut self, res_model: &str, records: Vec<ProductRecord>) {
        self.generation += 1;
        self.res_model = res_model.to_string();
        self.kind = RecordKind::parse(res_model);
        self.records = records;
        self.column_cache = None;
        self.derived.clear();

        if self.kind.is_none() {
            trace!(
                "generation {}: model '{}' takes no warehouse columns",
                self.generation,
                self.res_model
            );
            self.sort.deactivate();
            return;
        }

        let columns = discover_warehouse_columns(&self.records);
        debug!(
            "generation {}: {} records, {} warehouse columns",
            self.generation,
            self.records.len(),
            columns.len()
        );

        for column in &columns {
            self.schema.ensure_field(column);
        }
        self.rebuild_derived(&columns);

        if let Some(registry) = self.field_registry.as_deref_mut() {
            let registered = sync_schema_fields(&self.schema, registry);
            if registered > 0 {
                trace!("mirrored {} warehouse fields to the width manager", registered);
            }
        }

        self.column_cache = Some(columns);

        // Fresh rows arrive in the backing source's order; restore the
        // user's active warehouse sort on top of them.
        if self.sort.is_active() {
            self.sort.apply(&mut self.records);
        }
    }

    fn rebuild_derived(&mut self, columns: &[WarehouseColumn]) {
        let decimal_places = self.options.decimal_places;
        for record in &self.records {
            let cells: HashMap<String, ResolvedCell> = columns
                .iter()
                .map(|column| {
                    (
                        column.warehouse_id.clone(),
                        resolve_warehouse_cell(&column.warehouse_id, record, decimal_places),
                    )
                })
                .collect();
            self.derived.insert(record.id, cells);
        }
    }

    // ========================================================================
    // STATE ACCESS
    // ========================================================================

    pub fn options(&self) -> &ListViewOptions {
        &self.options
    }

    pub fn res_model(&self) -> &str {
        &self.res_model
    }

    /// True when the current row set's model takes warehouse columns.
    pub fn is_supported(&self) -> bool {
        self.kind.is_some()
    }

    /// The loaded rows, in render order (client sort included).
    pub fn records(&self) -> &[ProductRecord] {
        &self.records
    }

    pub fn schema(&self) -> &FieldSchema {
        &self.schema
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn sort_state(&self) -> &SortState {
        self.sort.state()
    }

    /// Columns discovered for the current generation.
    ///
    /// Normally filled by `on_row_set_replaced`; recomputed lazily if the
    /// host asks before the lifecycle hook has run.
    pub fn warehouse_columns(&mut self) -> &[WarehouseColumn] {
        if self.kind.is_none() {
            return &[];
        }
        if self.column_cache.is_none() {
            self.column_cache = Some(discover_warehouse_columns(&self.records));
        }
        self.column_cache.as_deref().unwrap_or(&[])
    }

    // ========================================================================
    // COLUMN PIPELINE HOOKS
    // ========================================================================

    /// Extends the host's "all columns" sequence with warehouse columns.
    pub fn process_all_columns(&mut self, host_columns: &[Column]) -> Vec<Column> {
        if self.kind.is_none() {
            return host_columns.to_vec();
        }
        let header_class = self.options.dynamic_header_class.clone();
        let discovered = self.warehouse_columns().to_vec();
        augment_all_columns(host_columns, &discovered, &header_class)
    }

    /// Extends the host's active-column sequence with the warehouse columns
    /// present in `all_columns`.
    pub fn active_columns(&self, host_active: &[Column], all_columns: &[Column]) -> Vec<Column> {
        if self.kind.is_none() {
            return host_active.to_vec();
        }
        augment_active_columns(host_active, all_columns)
    }

    // ========================================================================
    // CELL PIPELINE HOOKS
    // ========================================================================

    /// Resolves a warehouse field on a row; `None` for native fields.
    pub fn field_from_record(
        &self,
        record: &ProductRecord,
        field_name: &str,
    ) -> Option<ResolvedCell> {
        if self.kind.is_none() {
            return None;
        }
        let warehouse_id = warehouse_id_from_field_name(field_name)?;
        Some(self.resolved_cell(warehouse_id, record))
    }

    /// Display text for a warehouse cell; `None` for native columns.
    pub fn formatted_value(&self, column: &Column, record: &ProductRecord) -> Option<String> {
        let warehouse_id = self.dynamic_warehouse_id(column)?;
        Some(self.resolved_cell(warehouse_id, record).formatted)
    }

    /// `Some(true)` for warehouse columns, which always use the custom
    /// formatted string; `None` lets the host decide for its own columns.
    pub fn can_use_formatter(&self, column: &Column) -> Option<bool> {
        if self.kind.is_some() && supports_formatter(column) {
            Some(true)
        } else {
            None
        }
    }

    /// Tooltip text for a warehouse cell; `None` for native columns.
    pub fn cell_title(&self, column: &Column, record: &ProductRecord) -> Option<String> {
        let warehouse_id = self.dynamic_warehouse_id(column)?;
        Some(cell_title(&self.resolved_cell(warehouse_id, record)))
    }

    /// Status style class for a warehouse cell (empty string when the
    /// quantity has no tier); `None` for native columns.
    pub fn cell_class(&self, column: &Column, record: &ProductRecord) -> Option<String> {
        let warehouse_id = self.dynamic_warehouse_id(column)?;
        let cell = self.resolved_cell(warehouse_id, record);
        Some(cell.tier.css_class().unwrap_or_default().to_string())
    }

    fn dynamic_warehouse_id<'a>(&self, column: &'a Column) -> Option<&'a str> {
        if self.kind.is_none() {
            return None;
        }
        column.warehouse_id()
    }

    fn resolved_cell(&self, warehouse_id: &str, record: &ProductRecord) -> ResolvedCell {
        if let Some(cell) = self
            .derived
            .get(&record.id)
            .and_then(|cells| cells.get(warehouse_id))
        {
            return cell.clone();
        }
        // Row or column outside the current side table (e.g. a hook call
        // before the lifecycle ran); resolve directly.
        resolve_warehouse_cell(warehouse_id, record, self.options.decimal_places)
    }

    // ========================================================================
    // SORT PIPELINE HOOKS
    // ========================================================================

    /// Sortability predicate: warehouse headers stay clickable (the client
    /// engine owns them); `None` defers native columns to the host.
    pub fn is_sortable(&self, column: &Column) -> Option<bool> {
        if self.kind.is_some() && column.is_dynamic() {
            Some(true)
        } else {
            None
        }
    }

    /// Handles a header click. `Handled` means the rows were re-sorted and
    /// the host must clear its native order-by; `Native` hands the click to
    /// the host (and drops any active warehouse sort).
    pub fn on_sort_click(&mut self, column_id: &str) -> SortClick {
        if self.kind.is_none() {
            return SortClick::Native;
        }

        let outcome = self.sort.toggle(column_id);
        if outcome == SortClick::Handled {
            self.sort.apply(&mut self.records);
            let state = self.sort.state();
            debug!(
                "client sort on {:?}, ascending={}",
                state.active, state.ascending
            );
        }
        outcome
    }

    /// Indicator for a column header.
    pub fn sort_indicator(&self, column: &Column) -> SortIndicator {
        if self.kind.is_none() {
            return SortIndicator::Native;
        }
        self.sort.indicator_for(column, self.options.hover_sort_hint)
    }

    // ========================================================================
    // WIDTH-MANAGER BRIDGE
    // ========================================================================

    /// Attaches the external width manager's field store and eagerly mirrors
    /// any fields synthesized so far.
    pub fn attach_field_registry(&mut self, mut registry: Box<dyn FieldMetadataRegistry>) {
        let registered = sync_schema_fields(&self.schema, registry.as_mut());
        if registered > 0 {
            trace!("mirrored {} warehouse fields to the width manager", registered);
        }
        self.field_registry = Some(registry);
    }

    pub fn field_registry(&self) -> Option<&dyn FieldMetadataRegistry> {
        self.field_registry.as_deref()
    }

    /// Resize intercept: called with the header's name attribute and label
    /// text before the host's native resize handling runs.
    pub fn on_start_resize(&mut self, header_name: &str, header_label: &str) {
        let Some(registry) = self.field_registry.as_deref_mut() else {
            return;
        };
        ensure_field_for_resize(header_name, header_label, &self.schema, registry);
    }
}

impl Default for WarehouseListView {
    fn default() -> Self {
        WarehouseListView::new(ListViewOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use product_model::WarehouseEntry;

    fn sample_records() -> Vec<ProductRecord> {
        vec![
            ProductRecord::new(1)
                .with_warehouse_entry(WarehouseEntry::new("1", "WH-A", 5.0).with_min_qty(10.0)),
            ProductRecord::new(2)
                .with_warehouse_entry(WarehouseEntry::new("1", "WH-A", 20.0).with_min_qty(10.0)),
            ProductRecord::new(3),
        ]
    }

    #[test]
    fn test_refresh_discovers_and_synthesizes() {
        let mut view = WarehouseListView::default();
        view.on_row_set_replaced("product.template", sample_records());

        assert!(view.is_supported());
        assert_eq!(view.generation(), 1);
        assert_eq!(view.warehouse_columns().len(), 1);
        assert!(view.schema().contains("warehouse_1"));
    }

    #[test]
    fn test_unsupported_model_creates_no_state() {
        let mut view = WarehouseListView::default();
        view.on_row_set_replaced("res.partner", sample_records());

        assert!(!view.is_supported());
        assert!(view.warehouse_columns().is_empty());
        assert!(view.schema().is_empty());

        let record = view.records()[0].clone();
        assert!(view.field_from_record(&record, "warehouse_1").is_none());
    }

    #[test]
    fn test_cell_hooks_fall_through_for_native_columns() {
        let mut view = WarehouseListView::default();
        view.on_row_set_replaced("product.product", sample_records());

        let native = Column::native("col_0", "name", "Name");
        let record = view.records()[0].clone();

        assert!(view.formatted_value(&native, &record).is_none());
        assert!(view.cell_title(&native, &record).is_none());
        assert!(view.cell_class(&native, &record).is_none());
        assert!(view.can_use_formatter(&native).is_none());
        assert!(view.is_sortable(&native).is_none());
        assert_eq!(view.sort_indicator(&native), SortIndicator::Native);
    }

    #[test]
    fn test_side_table_backs_cell_hooks() {
        let mut view = WarehouseListView::default();
        view.on_row_set_replaced("product.template", sample_records());

        let column = Column::for_warehouse(&WarehouseColumn::new("1", "WH-A"), "");
        let low = view.records()[0].clone();
        let missing = view.records()[2].clone();

        assert_eq!(view.formatted_value(&column, &low).as_deref(), Some("5.00"));
        assert_eq!(view.cell_class(&column, &low).as_deref(), Some("text-warning"));
        assert_eq!(view.cell_title(&column, &low).as_deref(), Some("5"));
        assert_eq!(view.formatted_value(&column, &missing).as_deref(), Some("0.00"));
        assert_eq!(view.cell_class(&column, &missing).as_deref(), Some("text-danger"));
        assert_eq!(view.can_use_formatter(&column), Some(true));
    }

    #[test]
    fn test_sort_click_reorders_and_survives_refresh() {
        let mut view = WarehouseListView::default();
        view.on_row_set_replaced("product.template", sample_records());

        assert_eq!(view.on_sort_click("wh_col_1"), SortClick::Handled);
        let order: Vec<RecordId> = view.records().iter().map(|r| r.id).collect();
        assert_eq!(order, vec![3, 1, 2]);

        // A replacement keeps the active sort and re-applies it.
        view.on_row_set_replaced("product.template", sample_records());
        let order: Vec<RecordId> = view.records().iter().map(|r| r.id).collect();
        assert_eq!(order, vec![3, 1, 2]);

        assert_eq!(view.on_sort_click("col_0"), SortClick::Native);
        assert!(view.sort_state().active.is_none());
    }
}
