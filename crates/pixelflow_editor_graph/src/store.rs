// SPDX-License-Identifier: MIT OR Apache-2.0
//! Shared, observable handle over the graph model.
//!
//! A [`GraphStore`] is a cheap-to-clone handle that many components hold at
//! once. Getters return owned clones so consumers re-resolve entities by id
//! on every read instead of caching references across mutations. Every
//! mutation notifies all subscribers synchronously, after the write lock is
//! released, so a mutation is fully visible before the next user event.

use crate::edge::{Edge, EdgeId};
use crate::graph::{ConnectError, Graph, InputLockState};
use crate::node::{Node, NodeId};
use crate::types::{OutputTypeOverride, TypeExpression};
use indexmap::IndexMap;
use parking_lot::RwLock;
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

/// A change applied to the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeEvent {
    /// A node was added
    NodeAdded(NodeId),
    /// A node was removed
    NodeRemoved(NodeId),
    /// An edge was added
    EdgeAdded(EdgeId),
    /// An edge was removed
    EdgeRemoved(EdgeId),
    /// An input slot value was written
    InputValueChanged {
        /// Owning node
        node: NodeId,
        /// Input index
        input: u32,
    },
    /// A node lock flag flipped
    NodeLockChanged(NodeId),
    /// An input lock flag flipped
    InputLockChanged {
        /// Owning node
        node: NodeId,
        /// Input index
        input: u32,
    },
    /// An output's manual or inferred type changed
    OutputTypeChanged {
        /// Owning node
        node: NodeId,
        /// Output index
        output: u32,
    },
    /// An output's runtime value was written or cleared
    OutputValueChanged {
        /// Owning node
        node: NodeId,
        /// Output index
        output: u32,
    },
    /// A node started or finished executing
    ExecutingChanged(NodeId),
}

type Callback = Arc<dyn Fn(&ChangeEvent) + Send + Sync>;

struct Shared {
    graph: RwLock<Graph>,
    subscribers: RwLock<IndexMap<u64, Callback>>,
    next_subscriber: AtomicU64,
}

/// Shared, observable graph state store
#[derive(Clone)]
pub struct GraphStore {
    shared: Arc<Shared>,
}

impl Default for GraphStore {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Shared {
                graph: RwLock::new(Graph::new()),
                subscribers: RwLock::new(IndexMap::new()),
                next_subscriber: AtomicU64::new(1),
            }),
        }
    }

    /// Subscribe to all change events.
    ///
    /// The callback runs synchronously for every mutation, after the store's
    /// write lock is released, so it may re-enter the store. Dropping the
    /// returned [`Subscription`] unsubscribes.
    pub fn subscribe(
        &self,
        callback: impl Fn(&ChangeEvent) + Send + Sync + 'static,
    ) -> Subscription {
        let id = self.shared.next_subscriber.fetch_add(1, Ordering::Relaxed);
        self.shared
            .subscribers
            .write()
            .insert(id, Arc::new(callback));
        Subscription {
            shared: Arc::downgrade(&self.shared),
            id,
        }
    }

    fn notify(&self, events: &[ChangeEvent]) {
        if events.is_empty() {
            return;
        }
        // Clone the callbacks out so subscribers can re-enter the store,
        // including subscribing or unsubscribing, while we deliver.
        let callbacks: Vec<Callback> =
            self.shared.subscribers.read().values().cloned().collect();
        for event in events {
            for callback in &callbacks {
                callback(event);
            }
        }
    }

    /// Look up a node by id
    pub fn find_node(&self, node_id: NodeId) -> Option<Node> {
        self.shared.graph.read().node(node_id).cloned()
    }

    /// Look up an edge by id
    pub fn find_edge(&self, edge_id: EdgeId) -> Option<Edge> {
        self.shared.graph.read().edge(edge_id).cloned()
    }

    /// All node ids, in insertion order
    pub fn node_ids(&self) -> Vec<NodeId> {
        self.shared.graph.read().nodes().map(|n| n.id).collect()
    }

    /// All edge ids, in insertion order
    pub fn edge_ids(&self) -> Vec<EdgeId> {
        self.shared.graph.read().edges().map(|e| e.id).collect()
    }

    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.shared.graph.read().node_count()
    }

    /// Number of edges
    pub fn edge_count(&self) -> usize {
        self.shared.graph.read().edge_count()
    }

    /// Add a node
    pub fn add_node(&self, node: Node) -> NodeId {
        let id = {
            let mut graph = self.shared.graph.write();
            graph.add_node(node)
        };
        tracing::debug!("Added node {:?}", id);
        self.notify(&[ChangeEvent::NodeAdded(id)]);
        id
    }

    /// Remove a node and, in the same atomic update, every edge touching it
    /// and all of its slot state. All resulting events are delivered as one
    /// batch.
    pub fn remove_node(&self, node_id: NodeId) -> Option<Node> {
        let (node, removed_edges) = {
            let mut graph = self.shared.graph.write();
            let removed_edges: Vec<EdgeId> =
                graph.edges_for_node(node_id).map(|e| e.id).collect();
            (graph.remove_node(node_id)?, removed_edges)
        };
        tracing::debug!(
            "Removed node {:?} and {} edge(s)",
            node_id,
            removed_edges.len()
        );
        let mut events: Vec<ChangeEvent> = removed_edges
            .into_iter()
            .map(ChangeEvent::EdgeRemoved)
            .collect();
        events.push(ChangeEvent::NodeRemoved(node_id));
        self.notify(&events);
        Some(node)
    }

    /// Add an edge from a node output to a node input
    pub fn connect(
        &self,
        source: NodeId,
        source_output: u32,
        target: NodeId,
        target_input: u32,
    ) -> Result<EdgeId, ConnectError> {
        let id = self
            .shared
            .graph
            .write()
            .connect(source, source_output, target, target_input)?;
        tracing::debug!("Connected {:?} -> {:?} as {:?}", source, target, id);
        self.notify(&[ChangeEvent::EdgeAdded(id)]);
        Ok(id)
    }

    /// Remove an edge by id. Idempotent: an absent id is a no-op and emits
    /// no event.
    pub fn remove_edge_by_id(&self, edge_id: EdgeId) -> Option<Edge> {
        let edge = self.shared.graph.write().remove_edge(edge_id)?;
        tracing::debug!("Removed edge {:?}", edge_id);
        self.notify(&[ChangeEvent::EdgeRemoved(edge_id)]);
        Some(edge)
    }

    /// Read one input slot's value
    pub fn input_value(&self, node: NodeId, input: u32) -> Option<Value> {
        self.shared.graph.read().input_value(node, input).cloned()
    }

    /// Write one input slot's value. Total: any value is accepted, no
    /// validation happens at this layer.
    pub fn set_input_value(&self, node: NodeId, input: u32, value: Value) {
        self.shared.graph.write().set_input_value(node, input, value);
        self.notify(&[ChangeEvent::InputValueChanged { node, input }]);
    }

    /// Clear one input slot
    pub fn clear_input_value(&self, node: NodeId, input: u32) {
        if self
            .shared
            .graph
            .write()
            .clear_input_value(node, input)
            .is_some()
        {
            self.notify(&[ChangeEvent::InputValueChanged { node, input }]);
        }
    }

    /// Lock or unlock a whole node
    pub fn set_node_locked(&self, node: NodeId, locked: bool) {
        if self.shared.graph.write().set_node_locked(node, locked) {
            self.notify(&[ChangeEvent::NodeLockChanged(node)]);
        }
    }

    /// Whether a node is locked
    pub fn is_node_locked(&self, node: NodeId) -> bool {
        self.shared.graph.read().is_node_locked(node)
    }

    /// Lock or unlock one input slot
    pub fn set_input_locked(&self, node: NodeId, input: u32, locked: bool) {
        if self.shared.graph.write().set_input_locked(node, input, locked) {
            self.notify(&[ChangeEvent::InputLockChanged { node, input }]);
        }
    }

    /// Both lock flags for one input slot
    pub fn input_lock_state(&self, node: NodeId, input: u32) -> InputLockState {
        self.shared.graph.read().input_lock_state(node, input)
    }

    /// Set or clear the manual type override for one output
    pub fn set_manual_output_type(&self, node: NodeId, output: u32, over: OutputTypeOverride) {
        if self
            .shared
            .graph
            .write()
            .set_manual_output_type(node, output, over)
        {
            tracing::debug!("Manual output type changed on {:?}:{}", node, output);
            self.notify(&[ChangeEvent::OutputTypeChanged { node, output }]);
        }
    }

    /// The manual type override for one output
    pub fn manual_output_type(&self, node: NodeId, output: u32) -> OutputTypeOverride {
        self.shared.graph.read().manual_output_type(node, output)
    }

    /// Record the inferred type for one output
    pub fn set_inferred_output_type(&self, node: NodeId, output: u32, expr: TypeExpression) {
        self.shared
            .graph
            .write()
            .set_inferred_output_type(node, output, expr);
        self.notify(&[ChangeEvent::OutputTypeChanged { node, output }]);
    }

    /// Effective type of one output: manual override, else inferred
    pub fn output_type(&self, node: NodeId, output: u32) -> Option<TypeExpression> {
        self.shared.graph.read().output_type(node, output).cloned()
    }

    /// Store the runtime value produced by one output
    pub fn set_output_value(&self, node: NodeId, output: u32, value: Value) {
        self.shared.graph.write().set_output_value(node, output, value);
        self.notify(&[ChangeEvent::OutputValueChanged { node, output }]);
    }

    /// Clear the runtime value of one output
    pub fn clear_output_value(&self, node: NodeId, output: u32) {
        if self
            .shared
            .graph
            .write()
            .clear_output_value(node, output)
            .is_some()
        {
            self.notify(&[ChangeEvent::OutputValueChanged { node, output }]);
        }
    }

    /// The runtime value of one output
    pub fn output_value(&self, node: NodeId, output: u32) -> Option<Value> {
        self.shared.graph.read().output_value(node, output).cloned()
    }

    /// Mark a node as executing or idle
    pub fn set_executing(&self, node: NodeId, executing: bool) {
        if self.shared.graph.write().set_executing(node, executing) {
            self.notify(&[ChangeEvent::ExecutingChanged(node)]);
        }
    }

    /// Whether a node is currently executing
    pub fn is_executing(&self, node: NodeId) -> bool {
        self.shared.graph.read().is_executing(node)
    }

    /// A read/write handle for one input slot
    pub fn input_slot(&self, node: NodeId, input: u32) -> InputSlot {
        InputSlot {
            store: self.clone(),
            node,
            input,
        }
    }
}

/// Subscription guard returned by [`GraphStore::subscribe`].
/// Dropping it unsubscribes.
pub struct Subscription {
    shared: Weak<Shared>,
    id: u64,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(shared) = self.shared.upgrade() {
            shared.subscribers.write().shift_remove(&self.id);
        }
    }
}

/// Accessor pair for one input slot: value plus lock state.
///
/// Components hold this instead of a reference into the graph; every call
/// re-resolves through the store.
#[derive(Clone)]
pub struct InputSlot {
    store: GraphStore,
    node: NodeId,
    input: u32,
}

impl InputSlot {
    /// Owning node
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Input index
    pub fn input(&self) -> u32 {
        self.input
    }

    /// Current slot value
    pub fn value(&self) -> Option<Value> {
        self.store.input_value(self.node, self.input)
    }

    /// Write the slot value
    pub fn set_value(&self, value: Value) {
        self.store.set_input_value(self.node, self.input, value);
    }

    /// Both lock flags for the slot
    pub fn lock_state(&self) -> InputLockState {
        self.store.input_lock_state(self.node, self.input)
    }

    /// Lock or unlock this input
    pub fn set_locked(&self, locked: bool) {
        self.store.set_input_locked(self.node, self.input, locked);
    }

    /// Whether the slot is read-only: locked node OR locked input
    pub fn is_effectively_locked(&self) -> bool {
        self.lock_state().effective()
    }
}
