//! FILENAME: listview-engine/src/compat.rs
//! Compatibility bridge to an external column-width manager.
//!
//! An optional third-party add-on persists per-column widths in its own
//! field-metadata store and breaks when a resize touches a column header it
//! has never seen. The bridge mirrors every synthesized field into that
//! store through a narrow capability trait. Without a collaborator attached,
//! every call here is a no-op.

use serde::{Deserialize, Serialize};

use crate::definition::{is_dynamic_field_name, FieldSchema, VirtualField};

/// The minimal field descriptor the external store understands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldMeta {
    /// Persisted column width; unset until the user resizes.
    pub width: Option<u32>,

    pub name: String,
    pub label: String,

    /// Field type tag in the external store's vocabulary.
    pub field_type: String,

    pub sortable: bool,
    pub readonly: bool,
}

impl FieldMeta {
    /// Mirrors a synthesized schema field.
    pub fn for_virtual_field(field: &VirtualField) -> Self {
        FieldMeta {
            width: None,
            name: field.name.clone(),
            label: field.label.clone(),
            field_type: "float".to_string(),
            sortable: false,
            readonly: true,
        }
    }

    /// Built from header-carried name and label when the schema has no
    /// entry for the column (injected after the collaborator initialized).
    pub fn for_header(name: &str, label: &str) -> Self {
        let label = label.trim();
        FieldMeta {
            width: None,
            name: name.to_string(),
            label: if label.is_empty() {
                name.to_string()
            } else {
                label.to_string()
            },
            field_type: "float".to_string(),
            sortable: false,
            readonly: true,
        }
    }
}

/// The capability the external collaborator exposes: membership test and
/// insertion into its field-metadata store.
pub trait FieldMetadataRegistry {
    fn has_field(&self, name: &str) -> bool;
    fn register_field(&mut self, meta: FieldMeta);
}

/// Mirrors every synthesized field the registry hasn't seen yet.
/// Existing registry entries are never overwritten. Returns how many fields
/// were registered.
pub fn sync_schema_fields(schema: &FieldSchema, registry: &mut dyn FieldMetadataRegistry) -> usize {
    let mut registered = 0;
    for field in schema.fields() {
        if !registry.has_field(&field.name) {
            registry.register_field(FieldMeta::for_virtual_field(field));
            registered += 1;
        }
    }
    registered
}

/// Resize intercept: before the host's native resize handling runs for the
/// header named `header_name`, make sure the collaborator knows the column.
/// Non-dynamic headers and already-registered fields are left alone.
pub fn ensure_field_for_resize(
    header_name: &str,
    header_label: &str,
    schema: &FieldSchema,
    registry: &mut dyn FieldMetadataRegistry,
) {
    if !is_dynamic_field_name(header_name) || registry.has_field(header_name) {
        return;
    }

    let meta = match schema.get(header_name) {
        Some(field) => FieldMeta::for_virtual_field(field),
        None => FieldMeta::for_header(header_name, header_label),
    };
    registry.register_field(meta);
}
