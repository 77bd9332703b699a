// SPDX-License-Identifier: MIT OR Apache-2.0
//! Edge definitions for the pipeline graph.

use crate::node::NodeId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdgeId(pub Uuid);

impl EdgeId {
    /// Create a new random edge ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EdgeId {
    fn default() -> Self {
        Self::new()
    }
}

/// A directed edge between one node output and one node input.
///
/// Whenever an edge is observable through the store, both endpoints name
/// nodes that exist; node removal removes its edges in the same update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    /// Unique edge ID
    pub id: EdgeId,
    /// Source node ID
    pub source: NodeId,
    /// Output index on the source node
    pub source_output: u32,
    /// Target node ID
    pub target: NodeId,
    /// Input index on the target node
    pub target_input: u32,
}

impl Edge {
    /// Create a new edge
    pub fn new(source: NodeId, source_output: u32, target: NodeId, target_input: u32) -> Self {
        Self {
            id: EdgeId::new(),
            source,
            source_output,
            target,
            target_input,
        }
    }

    /// Check if this edge touches a specific node
    pub fn involves_node(&self, node_id: NodeId) -> bool {
        self.source == node_id || self.target == node_id
    }
}
