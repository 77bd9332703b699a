// SPDX-License-Identifier: MIT OR Apache-2.0
//! Graph data structure containing nodes, edges, and per-slot state.

use crate::edge::{Edge, EdgeId};
use crate::node::{Node, NodeId};
use crate::types::{OutputTypeOverride, TypeExpression};
use indexmap::IndexMap;
use serde_json::Value;
use std::collections::{HashMap, HashSet};

/// Lock flags governing one input slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputLockState {
    /// The whole node is locked
    pub node_locked: bool,
    /// This input slot is locked
    pub input_locked: bool,
}

impl InputLockState {
    /// Whether the input is read-only: locked node OR locked input
    pub fn effective(&self) -> bool {
        self.node_locked || self.input_locked
    }
}

/// The pipeline graph and all per-slot auxiliary state.
///
/// All entity lookups are indexed; nothing is recomputed by linear scan.
#[derive(Debug, Default)]
pub struct Graph {
    /// Nodes in the graph
    nodes: IndexMap<NodeId, Node>,
    /// Edges between node ports
    edges: IndexMap<EdgeId, Edge>,
    /// Input slot values, keyed by (node, input index)
    input_values: HashMap<(NodeId, u32), Value>,
    /// Locked input slots
    locked_inputs: HashSet<(NodeId, u32)>,
    /// Locked nodes
    locked_nodes: HashSet<NodeId>,
    /// Manual output type overrides
    manual_types: HashMap<(NodeId, u32), TypeExpression>,
    /// Inferred output types, written by the inference collaborator
    inferred_types: HashMap<(NodeId, u32), TypeExpression>,
    /// Runtime output values produced by pipeline execution
    output_values: HashMap<(NodeId, u32), Value>,
    /// Nodes currently executing
    executing: HashSet<NodeId>,
}

impl Graph {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node to the graph
    pub fn add_node(&mut self, node: Node) -> NodeId {
        let id = node.id;
        self.nodes.insert(id, node);
        id
    }

    /// Remove a node together with every edge touching it and all of its
    /// slot, lock, type, and output state, as one update.
    pub fn remove_node(&mut self, node_id: NodeId) -> Option<Node> {
        let node = self.nodes.swap_remove(&node_id)?;
        self.edges.retain(|_, e| !e.involves_node(node_id));
        self.input_values.retain(|(n, _), _| *n != node_id);
        self.locked_inputs.retain(|(n, _)| *n != node_id);
        self.locked_nodes.remove(&node_id);
        self.manual_types.retain(|(n, _), _| *n != node_id);
        self.inferred_types.retain(|(n, _), _| *n != node_id);
        self.output_values.retain(|(n, _), _| *n != node_id);
        self.executing.remove(&node_id);
        Some(node)
    }

    /// Get a node by ID
    pub fn node(&self, node_id: NodeId) -> Option<&Node> {
        self.nodes.get(&node_id)
    }

    /// Get a mutable node by ID
    pub fn node_mut(&mut self, node_id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&node_id)
    }

    /// Get all nodes
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Get the number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Add an edge from a node output to a node input
    pub fn connect(
        &mut self,
        source: NodeId,
        source_output: u32,
        target: NodeId,
        target_input: u32,
    ) -> Result<EdgeId, ConnectError> {
        let source_node = self
            .nodes
            .get(&source)
            .ok_or(ConnectError::NodeNotFound(source))?;
        let target_node = self
            .nodes
            .get(&target)
            .ok_or(ConnectError::NodeNotFound(target))?;

        if source_node.output(source_output).is_none() {
            return Err(ConnectError::OutputOutOfRange(source, source_output));
        }
        let input = target_node
            .input(target_input)
            .ok_or(ConnectError::InputOutOfRange(target, target_input))?;

        if !input.has_handle {
            return Err(ConnectError::InputNotConnectable(target, target_input));
        }

        if self
            .edges
            .values()
            .any(|e| e.target == target && e.target_input == target_input)
        {
            return Err(ConnectError::InputAlreadyConnected(target, target_input));
        }

        if source == target {
            return Err(ConnectError::SelfLoop);
        }

        let edge = Edge::new(source, source_output, target, target_input);
        let id = edge.id;
        self.edges.insert(id, edge);
        Ok(id)
    }

    /// Remove an edge. Removing an absent ID is a no-op returning `None`.
    pub fn remove_edge(&mut self, edge_id: EdgeId) -> Option<Edge> {
        self.edges.swap_remove(&edge_id)
    }

    /// Get an edge by ID
    pub fn edge(&self, edge_id: EdgeId) -> Option<&Edge> {
        self.edges.get(&edge_id)
    }

    /// Get all edges
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    /// Get edges touching a node
    pub fn edges_for_node(&self, node_id: NodeId) -> impl Iterator<Item = &Edge> {
        self.edges.values().filter(move |e| e.involves_node(node_id))
    }

    /// Get the number of edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Get the value stored in an input slot
    pub fn input_value(&self, node: NodeId, input: u32) -> Option<&Value> {
        self.input_values.get(&(node, input))
    }

    /// Store a value in an input slot. Total: any value is accepted.
    pub fn set_input_value(&mut self, node: NodeId, input: u32, value: Value) {
        self.input_values.insert((node, input), value);
    }

    /// Clear an input slot
    pub fn clear_input_value(&mut self, node: NodeId, input: u32) -> Option<Value> {
        self.input_values.remove(&(node, input))
    }

    /// Lock or unlock a whole node. Returns whether the flag changed.
    pub fn set_node_locked(&mut self, node: NodeId, locked: bool) -> bool {
        if locked {
            self.locked_nodes.insert(node)
        } else {
            self.locked_nodes.remove(&node)
        }
    }

    /// Whether a node is locked
    pub fn is_node_locked(&self, node: NodeId) -> bool {
        self.locked_nodes.contains(&node)
    }

    /// Lock or unlock one input slot. Returns whether the flag changed.
    pub fn set_input_locked(&mut self, node: NodeId, input: u32, locked: bool) -> bool {
        if locked {
            self.locked_inputs.insert((node, input))
        } else {
            self.locked_inputs.remove(&(node, input))
        }
    }

    /// Whether an input slot is locked
    pub fn is_input_locked(&self, node: NodeId, input: u32) -> bool {
        self.locked_inputs.contains(&(node, input))
    }

    /// Both lock flags for an input slot
    pub fn input_lock_state(&self, node: NodeId, input: u32) -> InputLockState {
        InputLockState {
            node_locked: self.is_node_locked(node),
            input_locked: self.is_input_locked(node, input),
        }
    }

    /// Set or clear the manual type override for one output.
    /// Returns whether the stored override changed.
    pub fn set_manual_output_type(
        &mut self,
        node: NodeId,
        output: u32,
        over: OutputTypeOverride,
    ) -> bool {
        match over {
            OutputTypeOverride::NoOverride => self.manual_types.remove(&(node, output)).is_some(),
            OutputTypeOverride::Override(expr) => {
                self.manual_types.insert((node, output), expr.clone()) != Some(expr)
            }
        }
    }

    /// Get the manual type override for one output
    pub fn manual_output_type(&self, node: NodeId, output: u32) -> OutputTypeOverride {
        match self.manual_types.get(&(node, output)) {
            Some(expr) => OutputTypeOverride::Override(expr.clone()),
            None => OutputTypeOverride::NoOverride,
        }
    }

    /// Record the inferred type for one output
    pub fn set_inferred_output_type(&mut self, node: NodeId, output: u32, expr: TypeExpression) {
        self.inferred_types.insert((node, output), expr);
    }

    /// Get the inferred type for one output
    pub fn inferred_output_type(&self, node: NodeId, output: u32) -> Option<&TypeExpression> {
        self.inferred_types.get(&(node, output))
    }

    /// Effective type of one output: the manual override when present,
    /// otherwise the inferred type.
    pub fn output_type(&self, node: NodeId, output: u32) -> Option<&TypeExpression> {
        self.manual_types
            .get(&(node, output))
            .or_else(|| self.inferred_types.get(&(node, output)))
    }

    /// Store the runtime value produced by one output
    pub fn set_output_value(&mut self, node: NodeId, output: u32, value: Value) {
        self.output_values.insert((node, output), value);
    }

    /// Clear the runtime value of one output
    pub fn clear_output_value(&mut self, node: NodeId, output: u32) -> Option<Value> {
        self.output_values.remove(&(node, output))
    }

    /// Get the runtime value of one output
    pub fn output_value(&self, node: NodeId, output: u32) -> Option<&Value> {
        self.output_values.get(&(node, output))
    }

    /// Mark a node as executing or idle. Returns whether the flag changed.
    pub fn set_executing(&mut self, node: NodeId, executing: bool) -> bool {
        if executing {
            self.executing.insert(node)
        } else {
            self.executing.remove(&node)
        }
    }

    /// Whether a node is currently executing
    pub fn is_executing(&self, node: NodeId) -> bool {
        self.executing.contains(&node)
    }
}

/// Error when creating an edge
#[derive(Debug, thiserror::Error)]
pub enum ConnectError {
    /// Node not found
    #[error("Node not found: {0:?}")]
    NodeNotFound(NodeId),

    /// Output index out of range
    #[error("Node {0:?} has no output {1}")]
    OutputOutOfRange(NodeId, u32),

    /// Input index out of range
    #[error("Node {0:?} has no input {1}")]
    InputOutOfRange(NodeId, u32),

    /// Input does not accept edges
    #[error("Input {1} of node {0:?} does not accept connections")]
    InputNotConnectable(NodeId, u32),

    /// Input is already connected
    #[error("Input {1} of node {0:?} is already connected")]
    InputAlreadyConnected(NodeId, u32),

    /// Self-loop not allowed
    #[error("Self-loop not allowed")]
    SelfLoop,
}
