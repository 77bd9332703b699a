// SPDX-License-Identifier: MIT OR Apache-2.0
//! Shared graph state store for Pixelflow Editor.
//!
//! This crate is the single source of truth for the pipeline graph that the
//! editor's UI components read and write:
//! - Nodes and edges with O(1) id lookup
//! - Per-input value slots and lock flags
//! - Manual output type overrides layered over inferred types
//! - Change notification for every mutation
//!
//! ## Architecture
//!
//! [`graph::Graph`] is the plain single-threaded model. [`store::GraphStore`]
//! wraps it in a cloneable, observable handle that many components can hold
//! at once; consumers keep only ids and re-resolve entities on every read.

pub mod builtin;
pub mod edge;
pub mod graph;
pub mod node;
pub mod schema;
pub mod store;
pub mod types;

pub use edge::{Edge, EdgeId};
pub use graph::{ConnectError, Graph, InputLockState};
pub use node::{Category, Node, NodeData, NodeId};
pub use schema::{InputDecl, InputKind, NodeSchema, OutputDecl, SchemaRegistry};
pub use store::{ChangeEvent, GraphStore, InputSlot, Subscription};
pub use types::{NamedExpression, NamedField, OutputTypeOverride, TypeExpression};
