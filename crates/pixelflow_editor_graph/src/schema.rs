// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node schemas: the declared shape a node instance is stamped from.

use crate::node::{Category, Node};
use serde::{Deserialize, Serialize};

/// Kind of widget an input is edited with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputKind {
    /// Free numeric entry
    Number,
    /// Bounded numeric entry
    Slider,
    /// Enumerated choice
    Dropdown,
    /// On/off flag
    Toggle,
    /// Free text entry
    Text,
    /// Filesystem directory path
    Directory,
    /// Image payload
    Image,
    /// Model payload
    Model,
}

/// Declared input on a node schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputDecl {
    /// Display label
    pub label: String,
    /// Widget kind
    pub kind: InputKind,
    /// Whether the input accepts an incoming edge
    pub has_handle: bool,
    /// Whether the input may be left unset
    pub optional: bool,
}

impl InputDecl {
    /// A value-only input edited in place, with no edge handle
    pub fn value(label: impl Into<String>, kind: InputKind) -> Self {
        Self {
            label: label.into(),
            kind,
            has_handle: false,
            optional: false,
        }
    }

    /// An input that accepts an incoming edge
    pub fn connectable(label: impl Into<String>, kind: InputKind) -> Self {
        Self {
            label: label.into(),
            kind,
            has_handle: true,
            optional: false,
        }
    }

    /// Mark the input as optional
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }
}

/// Declared output on a node schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputDecl {
    /// Display label
    pub label: String,
    /// Name of the value type produced
    pub type_name: String,
}

impl OutputDecl {
    /// Create a new output declaration
    pub fn new(label: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            type_name: type_name.into(),
        }
    }
}

/// Schema describing one node type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeSchema {
    /// Unique schema identifier, e.g. `pixelflow:utility:math`
    pub schema_id: String,
    /// Display name
    pub name: String,
    /// Description shown in the palette
    pub description: String,
    /// Palette category
    pub category: Category,
    /// Subcategory within the palette
    pub subcategory: String,
    /// Icon name
    pub icon: String,
    /// Declared inputs
    pub inputs: Vec<InputDecl>,
    /// Declared outputs
    pub outputs: Vec<OutputDecl>,
}

impl NodeSchema {
    /// Whether nodes of this schema are starting nodes (no connectable input)
    pub fn is_starting_node(&self) -> bool {
        self.inputs.iter().all(|input| !input.has_handle)
    }
}

/// Registry of available node schemas
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    /// Registered schemas by ID
    schemas: indexmap::IndexMap<String, NodeSchema>,
}

impl SchemaRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            schemas: indexmap::IndexMap::new(),
        }
    }

    /// Create a registry preloaded with the builtin schemas
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        crate::builtin::register_builtins(&mut registry);
        registry
    }

    /// Register a schema
    pub fn register(&mut self, schema: NodeSchema) {
        self.schemas.insert(schema.schema_id.clone(), schema);
    }

    /// Get a schema by ID
    pub fn get(&self, schema_id: &str) -> Option<&NodeSchema> {
        self.schemas.get(schema_id)
    }

    /// Get all registered schemas
    pub fn schemas(&self) -> impl Iterator<Item = &NodeSchema> {
        self.schemas.values()
    }

    /// Get schemas in a category
    pub fn schemas_in_category(&self, category: Category) -> impl Iterator<Item = &NodeSchema> {
        self.schemas.values().filter(move |s| s.category == category)
    }

    /// Create a node instance from a schema ID
    pub fn create_node(&self, schema_id: &str) -> Option<Node> {
        self.get(schema_id).map(Node::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_create_node() {
        let registry = SchemaRegistry::with_builtins();
        let node = registry.create_node("pixelflow:utility:math").unwrap();
        assert_eq!(node.schema_id, "pixelflow:utility:math");
        assert_eq!(node.data.category, Category::Utility);
        assert!(!node.inputs.is_empty());
    }

    #[test]
    fn test_unknown_schema_is_absent() {
        let registry = SchemaRegistry::with_builtins();
        assert!(registry.create_node("pixelflow:missing").is_none());
    }

    #[test]
    fn test_category_filter() {
        let registry = SchemaRegistry::with_builtins();
        assert!(registry
            .schemas_in_category(Category::Onnx)
            .all(|s| s.category == Category::Onnx));
    }
}
