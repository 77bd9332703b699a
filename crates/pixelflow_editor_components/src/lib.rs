// SPDX-License-Identifier: MIT OR Apache-2.0
//! Headless UI component logic for Pixelflow Editor.
//!
//! Each component takes the shared [`pixelflow_editor_graph::GraphStore`] by
//! injection, holds only entity ids, and re-resolves state on every read:
//! - [`edge_view::EdgeView`] - edge color, hover, and deletion
//! - [`directory_input::DirectoryInput`] - directory slot editing via a
//!   platform picker
//! - [`output_preview::OutputPreview`] - model output tags and the
//!   starting-node type override side effect
//!
//! Rendering itself lives elsewhere; these types own the state transitions
//! and derived values the views bind to.

pub mod directory_input;
pub mod edge_view;
pub mod hover;
pub mod output_preview;
pub mod picker;
pub mod theme;

pub use directory_input::DirectoryInput;
pub use edge_view::EdgeView;
pub use hover::HoverState;
pub use output_preview::{OutputPreview, PreviewState, UpscaleModelInfo};
pub use picker::{DirectoryPicker, PickResponse, SystemDirectoryPicker};
pub use theme::{accent_color, Color, ParseColorError};
