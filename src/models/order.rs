//! Order lines and the materials-catalog boundary.
//!
//! An order arrives as a flat list of (material, quantity) lines. Each
//! line must resolve against the materials catalog to be eligible for
//! splitting; a catalog miss or a non-positive quantity silently drops
//! the line from the split preview rather than failing the order.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One requested (material, quantity) pair within a customer order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    /// Catalog material identifier.
    pub material_id: String,
    /// Requested quantity. Valid lines have quantity ≥ 1.
    pub quantity: u32,
}

impl OrderLine {
    /// Creates a new order line.
    pub fn new(material_id: impl Into<String>, quantity: u32) -> Self {
        Self {
            material_id: material_id.into(),
            quantity,
        }
    }

    /// Whether the quantity alone makes this line eligible for splitting.
    pub fn has_valid_quantity(&self) -> bool {
        self.quantity >= 1
    }
}

/// A catalog entry for one material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialRecord {
    /// Catalog material identifier.
    pub id: String,
    /// Display name (e.g., "Portland Cement 50kg").
    pub name: String,
    /// Material category, the grouping key for order splitting.
    pub category: String,
    /// Sale unit (e.g., "bag", "ton", "length").
    pub unit: String,
    /// Stock-keeping unit code.
    pub sku: String,
}

impl MaterialRecord {
    /// Creates a new catalog record.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        unit: impl Into<String>,
        sku: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            unit: unit.into(),
            sku: sku.into(),
        }
    }
}

/// The materials catalog consumed by the order splitter.
///
/// An in-memory snapshot of the external catalog service, keyed by
/// material ID. The caller refreshes it before building a preview.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MaterialsCatalog {
    materials: HashMap<String, MaterialRecord>,
}

impl MaterialsCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a material record.
    pub fn with_material(mut self, record: MaterialRecord) -> Self {
        self.materials.insert(record.id.clone(), record);
        self
    }

    /// Resolves a material ID. `None` = the line is dropped from splitting.
    pub fn resolve(&self, material_id: &str) -> Option<&MaterialRecord> {
        self.materials.get(material_id)
    }

    /// Number of records in the catalog.
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_line_quantity() {
        assert!(OrderLine::new("cement", 1).has_valid_quantity());
        assert!(OrderLine::new("cement", 10).has_valid_quantity());
        assert!(!OrderLine::new("cement", 0).has_valid_quantity());
    }

    #[test]
    fn test_catalog_resolve() {
        let catalog = MaterialsCatalog::new()
            .with_material(MaterialRecord::new(
                "cement",
                "Portland Cement 50kg",
                "Cement",
                "bag",
                "CEM-001",
            ))
            .with_material(MaterialRecord::new(
                "rebar-12",
                "Rebar 12mm",
                "Steel & Reinforcement",
                "length",
                "STL-012",
            ));

        assert_eq!(catalog.len(), 2);
        let cement = catalog.resolve("cement").unwrap();
        assert_eq!(cement.category, "Cement");
        assert_eq!(cement.unit, "bag");
        assert!(catalog.resolve("gravel").is_none());
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = MaterialsCatalog::new();
        assert!(catalog.is_empty());
        assert!(catalog.resolve("anything").is_none());
    }
}
