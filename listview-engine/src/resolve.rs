//! FILENAME: listview-engine/src/resolve.rs
//! Cell value resolution for warehouse columns.
//!
//! Resolution never fails: a row without an entry for a warehouse resolves
//! to zero quantity and the danger tier, the same rendering an actual zero
//! stock gets. Native columns are not resolved here at all; the view's
//! hooks fall through to the host for those.

use product_model::{format_fixed, format_general, ProductRecord};
use serde::{Deserialize, Serialize};

use crate::definition::Column;

// ============================================================================
// COLOR TIERS
// ============================================================================

/// Coarse stock-status classification of a quantity against its threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ColorTier {
    /// Positive stock, no threshold to compare against.
    #[default]
    None,
    /// Zero or negative stock (or no entry at all).
    Danger,
    /// Positive stock below the reorder threshold.
    Warning,
    /// Stock at or above the reorder threshold.
    Success,
}

impl ColorTier {
    /// Classifies a quantity against an optional reorder threshold.
    pub fn classify(qty: f64, min_qty: Option<f64>) -> ColorTier {
        if qty <= 0.0 {
            return ColorTier::Danger;
        }
        match min_qty {
            Some(min) if qty < min => ColorTier::Warning,
            Some(_) => ColorTier::Success,
            None => ColorTier::None,
        }
    }

    /// The cell style class for this tier, if it has one.
    pub fn css_class(&self) -> Option<&'static str> {
        match self {
            ColorTier::None => None,
            ColorTier::Danger => Some("text-danger"),
            ColorTier::Warning => Some("text-warning"),
            ColorTier::Success => Some("text-success"),
        }
    }
}

// ============================================================================
// RESOLVED CELLS
// ============================================================================

/// One resolved warehouse cell: raw quantity, display text, and status tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedCell {
    pub raw: f64,
    pub formatted: String,
    pub tier: ColorTier,
}

/// Resolves the cell for one warehouse on one row.
pub fn resolve_warehouse_cell(
    warehouse_id: &str,
    record: &ProductRecord,
    decimal_places: u8,
) -> ResolvedCell {
    match record.warehouse_qty_map.get(warehouse_id) {
        Some(entry) => ResolvedCell {
            raw: entry.qty,
            formatted: format_fixed(entry.qty, decimal_places),
            tier: ColorTier::classify(entry.qty, entry.min_qty),
        },
        None => ResolvedCell {
            raw: 0.0,
            formatted: format_fixed(0.0, decimal_places),
            tier: ColorTier::Danger,
        },
    }
}

/// Whether the custom formatted string must be used for this column.
/// True for every warehouse column, keeping the host's generic numeric
/// formatter away from synthesized cells.
pub fn supports_formatter(column: &Column) -> bool {
    column.is_dynamic()
}

/// Hover/tooltip text for a resolved cell: the raw value in general format.
pub fn cell_title(cell: &ResolvedCell) -> String {
    format_general(cell.raw)
}
