// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node definitions for the pipeline graph.

use crate::schema::{InputDecl, NodeSchema, OutputDecl};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Unique identifier for a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub Uuid);

impl NodeId {
    /// Create a new random node ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

/// Node palette category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Image loading and saving
    Image,
    /// Resizing, cropping, padding
    ImageDimension,
    /// Color and level adjustments
    ImageAdjustment,
    /// Blurs, sharpening, noise
    ImageFilter,
    /// Channel splitting and merging
    ImageChannel,
    /// Math, text, and flow helpers
    Utility,
    /// PyTorch model nodes
    Pytorch,
    /// ONNX model nodes
    Onnx,
    /// NCNN model nodes
    Ncnn,
}

impl Category {
    /// Get display name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Image => "Image",
            Self::ImageDimension => "Image (Dimension)",
            Self::ImageAdjustment => "Image (Adjustment)",
            Self::ImageFilter => "Image (Filter)",
            Self::ImageChannel => "Image (Channel)",
            Self::Utility => "Utility",
            Self::Pytorch => "PyTorch",
            Self::Onnx => "ONNX",
            Self::Ncnn => "NCNN",
        }
    }
}

/// Payload carried by every node instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeData {
    /// Palette category
    pub category: Category,
    /// Subcategory within the palette
    pub subcategory: String,
    /// Arbitrary per-node fields
    #[serde(default)]
    pub fields: Map<String, Value>,
}

/// A node instance in the graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Unique instance ID
    pub id: NodeId,
    /// Schema this node was instantiated from
    pub schema_id: String,
    /// Display name (can be customized)
    pub name: String,
    /// Node payload
    pub data: NodeData,
    /// Declared inputs, addressed by index
    pub inputs: Vec<InputDecl>,
    /// Declared outputs, addressed by index
    pub outputs: Vec<OutputDecl>,
}

impl Node {
    /// Create a new node from a schema
    pub fn new(schema: &NodeSchema) -> Self {
        Self {
            id: NodeId::new(),
            schema_id: schema.schema_id.clone(),
            name: schema.name.clone(),
            data: NodeData {
                category: schema.category,
                subcategory: schema.subcategory.clone(),
                fields: Map::new(),
            },
            inputs: schema.inputs.clone(),
            outputs: schema.outputs.clone(),
        }
    }

    /// Get an input declaration by index
    pub fn input(&self, index: u32) -> Option<&InputDecl> {
        self.inputs.get(index as usize)
    }

    /// Get an output declaration by index
    pub fn output(&self, index: u32) -> Option<&OutputDecl> {
        self.outputs.get(index as usize)
    }

    /// Whether this node is a starting node.
    ///
    /// A starting node has no input that accepts an incoming edge, so its
    /// output type cannot be inferred from upstream graph structure and must
    /// be supplied from observed runtime data.
    pub fn is_starting_node(&self) -> bool {
        self.inputs.iter().all(|input| !input.has_handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::InputKind;

    fn schema() -> NodeSchema {
        NodeSchema {
            schema_id: "pixelflow:test:node".into(),
            name: "Test".into(),
            description: String::new(),
            category: Category::Utility,
            subcategory: "Math".into(),
            icon: String::new(),
            inputs: vec![
                InputDecl::connectable("A", InputKind::Number),
                InputDecl::value("Mode", InputKind::Dropdown),
            ],
            outputs: vec![OutputDecl::new("Result", "number")],
        }
    }

    #[test]
    fn test_node_clones_schema_ports() {
        let node = Node::new(&schema());
        assert_eq!(node.inputs.len(), 2);
        assert_eq!(node.outputs.len(), 1);
        assert_eq!(node.input(1).unwrap().label, "Mode");
        assert!(node.input(2).is_none());
    }

    #[test]
    fn test_starting_node_requires_no_handles() {
        let mut s = schema();
        assert!(!Node::new(&s).is_starting_node());

        s.inputs = vec![InputDecl::value("Path", InputKind::Directory)];
        assert!(Node::new(&s).is_starting_node());

        s.inputs.clear();
        assert!(Node::new(&s).is_starting_node());
    }
}
