//! FILENAME: listview-engine/src/sort.rs
//! Client-side sort engine for warehouse columns.
//!
//! The backing data source knows nothing about synthesized columns, so
//! sorting them happens entirely on the loaded rows. The engine keeps its
//! own state, separate from the host's native order-by: exactly one
//! warehouse column can be active, and activating either side deactivates
//! the other.

use product_model::ProductRecord;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::definition::{is_dynamic_column_id, warehouse_id_from_column_id, Column};

/// The engine's sort state: which warehouse column is active, and which way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    /// Active warehouse column id, `None` while the native sort owns order.
    pub active: Option<String>,

    pub ascending: bool,
}

impl Default for SortState {
    fn default() -> Self {
        SortState {
            active: None,
            ascending: true,
        }
    }
}

/// What a header click resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortClick {
    /// The engine consumed the click; the host must clear its own order-by.
    Handled,
    /// A native column was clicked; the host's sort machinery takes over.
    Native,
}

/// What a column header should render as its sort indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortIndicator {
    /// Active warehouse column, ascending arrow.
    Ascending,
    /// Active warehouse column, descending arrow.
    Descending,
    /// Inactive warehouse column: dimmed hint, visible on hover only.
    HoverHint,
    /// Inactive warehouse column with the hover hint disabled.
    Hidden,
    /// Native column: the host's indicator logic applies.
    Native,
}

/// Sort state machine plus the in-place reorder it drives.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientSortEngine {
    state: SortState,
}

impl ClientSortEngine {
    pub fn new() -> Self {
        ClientSortEngine::default()
    }

    pub fn state(&self) -> &SortState {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        self.state.active.is_some()
    }

    /// Handles a header click.
    ///
    /// A warehouse column becomes active ascending, or flips direction when
    /// it already is active. Any native column click deactivates the engine
    /// and hands ordering back to the host.
    pub fn toggle(&mut self, column_id: &str) -> SortClick {
        if !is_dynamic_column_id(column_id) {
            self.deactivate();
            return SortClick::Native;
        }

        match &self.state.active {
            Some(active) if active == column_id => {
                self.state.ascending = !self.state.ascending;
            }
            _ => {
                self.state = SortState {
                    active: Some(column_id.to_string()),
                    ascending: true,
                };
            }
        }
        SortClick::Handled
    }

    /// Drops any active warehouse sort (native sort takes over).
    pub fn deactivate(&mut self) {
        self.state = SortState::default();
    }

    /// Reorders `records` in place by the active column's quantity.
    ///
    /// Rows without an entry sort as zero. The sort is stable, so rows with
    /// equal quantities keep their relative order across re-renders. No-op
    /// while inactive. Must run after every toggle and after every row-set
    /// replacement while active.
    pub fn apply(&self, records: &mut [ProductRecord]) {
        let Some(column_id) = self.state.active.as_deref() else {
            return;
        };
        let Some(warehouse_id) = warehouse_id_from_column_id(column_id) else {
            return;
        };

        records.sort_by(|a, b| {
            let qty_a = a.warehouse_qty_map.qty(warehouse_id);
            let qty_b = b.warehouse_qty_map.qty(warehouse_id);
            let ordering = qty_a.partial_cmp(&qty_b).unwrap_or(Ordering::Equal);
            if self.state.ascending {
                ordering
            } else {
                ordering.reverse()
            }
        });
    }

    /// What `column`'s header should render as its sort indicator.
    pub fn indicator_for(&self, column: &Column, hover_hint: bool) -> SortIndicator {
        if !column.is_dynamic() {
            return SortIndicator::Native;
        }
        match &self.state.active {
            Some(active) if *active == column.id => {
                if self.state.ascending {
                    SortIndicator::Ascending
                } else {
                    SortIndicator::Descending
                }
            }
            _ if hover_hint => SortIndicator::HoverHint,
            _ => SortIndicator::Hidden,
        }
    }
}
