// SPDX-License-Identifier: MIT OR Apache-2.0
//! Edge visual presenter.

use crate::hover::HoverState;
use crate::theme::{self, Color, NEUTRAL, SELECTED_SHADE};
use pixelflow_editor_graph::{EdgeId, GraphStore};
use std::time::Instant;

/// Stroke width while hovered
const HOVER_STROKE_WIDTH: f32 = 4.0;
/// Stroke width otherwise
const BASE_STROKE_WIDTH: f32 = 2.0;

/// Presenter for one edge: derives its stroke from the source node and
/// forwards the user's delete action to the store.
///
/// The edge's color is derived dynamically from its parent node on every
/// read; nothing about the source is cached on the presenter.
pub struct EdgeView {
    store: GraphStore,
    edge_id: EdgeId,
    hover: HoverState,
    selected: bool,
}

impl EdgeView {
    /// Create a presenter for an edge id
    pub fn new(store: GraphStore, edge_id: EdgeId) -> Self {
        Self {
            store,
            edge_id,
            hover: HoverState::new(),
            selected: false,
        }
    }

    /// The presented edge id
    pub fn edge_id(&self) -> EdgeId {
        self.edge_id
    }

    /// Update the selected flag
    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    /// Whether the edge is selected
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Stroke color: the source node's accent color, darkened while
    /// selected. A missing edge or source node yields the neutral color;
    /// the store guarantees that state cannot outlive a single mutation.
    pub fn stroke_color(&self) -> Color {
        let Some(edge) = self.store.find_edge(self.edge_id) else {
            return NEUTRAL;
        };
        let Some(source) = self.store.find_node(edge.source) else {
            return NEUTRAL;
        };
        let accent = theme::accent_color(source.data.category, &source.data.subcategory);
        if self.selected {
            accent.shade(SELECTED_SHADE)
        } else {
            accent
        }
    }

    /// Stroke width, widened while hovered
    pub fn stroke_width(&self) -> f32 {
        if self.hover.is_hovered() {
            HOVER_STROKE_WIDTH
        } else {
            BASE_STROKE_WIDTH
        }
    }

    /// Pointer entered the edge
    pub fn pointer_enter(&mut self, now: Instant) {
        self.hover.pointer_enter(now);
    }

    /// Qualifying pointer activity over the edge
    pub fn pointer_activity(&mut self, now: Instant) {
        self.hover.pointer_activity(now);
    }

    /// Pointer left the edge
    pub fn pointer_leave(&mut self) {
        self.hover.pointer_leave();
    }

    /// Evaluate the hover auto-clear deadline and report the flag
    pub fn poll_hover(&mut self, now: Instant) -> bool {
        self.hover.poll(now)
    }

    /// The user clicked the delete button on the edge
    pub fn delete(&self) {
        tracing::debug!("Deleting edge {:?}", self.edge_id);
        self.store.remove_edge_by_id(self.edge_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixelflow_editor_graph::{Category, NodeId, SchemaRegistry};

    fn store_with_edge() -> (GraphStore, NodeId, EdgeId) {
        let registry = SchemaRegistry::with_builtins();
        let store = GraphStore::new();
        let model = store.add_node(registry.create_node("pixelflow:ncnn:load_model").unwrap());
        let upscale = store
            .add_node(registry.create_node("pixelflow:onnx:remove_background").unwrap());
        let edge_id = store.connect(model, 0, upscale, 1).unwrap();
        (store, model, edge_id)
    }

    #[test]
    fn test_color_derives_from_source_node() {
        let (store, _, edge_id) = store_with_edge();
        let view = EdgeView::new(store, edge_id);
        assert_eq!(view.stroke_color(), theme::accent_color(Category::Ncnn, "Input"));
    }

    #[test]
    fn test_selected_darkens() {
        let (store, _, edge_id) = store_with_edge();
        let mut view = EdgeView::new(store, edge_id);
        let base = view.stroke_color();
        view.set_selected(true);
        assert_eq!(view.stroke_color(), base.shade(SELECTED_SHADE));
    }

    #[test]
    fn test_missing_edge_is_neutral() {
        let (store, _, edge_id) = store_with_edge();
        store.remove_edge_by_id(edge_id);
        let view = EdgeView::new(store, edge_id);
        assert_eq!(view.stroke_color(), NEUTRAL);
    }

    #[test]
    fn test_delete_removes_edge_and_is_idempotent() {
        let (store, _, edge_id) = store_with_edge();
        let view = EdgeView::new(store.clone(), edge_id);
        view.delete();
        assert!(store.find_edge(edge_id).is_none());
        view.delete();
        assert_eq!(store.edge_count(), 0);
    }

    #[test]
    fn test_hover_widens_stroke() {
        let (store, _, edge_id) = store_with_edge();
        let mut view = EdgeView::new(store, edge_id);
        assert_eq!(view.stroke_width(), BASE_STROKE_WIDTH);
        view.pointer_enter(Instant::now());
        assert_eq!(view.stroke_width(), HOVER_STROKE_WIDTH);
        view.pointer_leave();
        assert_eq!(view.stroke_width(), BASE_STROKE_WIDTH);
    }
}
