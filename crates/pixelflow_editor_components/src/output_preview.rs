// SPDX-License-Identifier: MIT OR Apache-2.0
//! Output preview presenter for upscaling-model outputs.

use pixelflow_editor_graph::{
    ChangeEvent, GraphStore, NamedExpression, NodeId, OutputTypeOverride, Subscription,
    TypeExpression,
};
use serde::{Deserialize, Serialize};

/// Message shown when no model data is available
pub const UNAVAILABLE_MESSAGE: &str = "Model data not available.";

/// Shape of an upscaling model, observed from runtime output data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpscaleModelInfo {
    /// Upscaling factor
    pub scale: u32,
    /// Channels consumed
    pub input_channels: u32,
    /// Channels produced
    pub output_channels: u32,
    /// Number of features
    pub num_features: u32,
}

impl UpscaleModelInfo {
    /// Tag strings shown in the preview, e.g. `["4x", "RGB→RGBA", "64nf"]`
    pub fn tags(&self) -> Vec<String> {
        vec![
            format!("{}x", self.scale),
            format!(
                "{}→{}",
                channel_label(self.input_channels),
                channel_label(self.output_channels)
            ),
            format!("{}nf", self.num_features),
        ]
    }

    /// The type expression describing this model
    pub fn type_expression(&self) -> TypeExpression {
        TypeExpression::Named(
            NamedExpression::new("UpscaleModel")
                .with_field("scale", f64::from(self.scale))
                .with_field("inputChannels", f64::from(self.input_channels))
                .with_field("outputChannels", f64::from(self.output_channels))
                .with_field("nf", f64::from(self.num_features)),
        )
    }
}

/// Color-mode label for a channel count
pub fn channel_label(channels: u32) -> String {
    match channels {
        1 => "GRAY".to_owned(),
        3 => "RGB".to_owned(),
        4 => "RGBA".to_owned(),
        other => other.to_string(),
    }
}

/// What the preview renders; the three views are mutually exclusive
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewState {
    /// Model data is available: show its tags
    Tags(Vec<String>),
    /// The owning node is executing: show a spinner
    Pending,
    /// No data: show [`UNAVAILABLE_MESSAGE`]
    Unavailable,
}

/// Presenter for one model output slot.
///
/// Besides deriving the view state, the presenter keeps the type-inference
/// system informed for starting nodes: their output type cannot be inferred
/// from upstream structure, so every observed value change pushes a manual
/// type override into the store, and a value becoming absent clears it
/// again. The subscription driving this lives exactly as long as the
/// presenter.
pub struct OutputPreview {
    store: GraphStore,
    node: NodeId,
    output: u32,
    _subscription: Subscription,
}

impl OutputPreview {
    /// Create a presenter for one output slot
    pub fn new(store: GraphStore, node: NodeId, output: u32) -> Self {
        let subscription = {
            let sync_store = store.clone();
            store.subscribe(move |event| {
                if let ChangeEvent::OutputValueChanged { node: n, output: o } = event {
                    if *n == node && *o == output {
                        sync_manual_type(&sync_store, node, output);
                    }
                }
            })
        };
        sync_manual_type(&store, node, output);
        Self {
            store,
            node,
            output,
            _subscription: subscription,
        }
    }

    /// Owning node
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Output index
    pub fn output(&self) -> u32 {
        self.output
    }

    /// Decode the current runtime value, if present and well-formed
    pub fn model_info(&self) -> Option<UpscaleModelInfo> {
        let value = self.store.output_value(self.node, self.output)?;
        serde_json::from_value(value).ok()
    }

    /// Current view state
    pub fn state(&self) -> PreviewState {
        if self.store.is_executing(self.node) {
            return PreviewState::Pending;
        }
        match self.model_info() {
            Some(info) => PreviewState::Tags(info.tags()),
            None => PreviewState::Unavailable,
        }
    }
}

/// Push or clear the manual output type for a starting node from the
/// currently observed value. Non-starting nodes are left untouched.
fn sync_manual_type(store: &GraphStore, node: NodeId, output: u32) {
    let Some(owner) = store.find_node(node) else {
        return;
    };
    if !owner.is_starting_node() {
        return;
    }
    let info: Option<UpscaleModelInfo> = store
        .output_value(node, output)
        .and_then(|value| serde_json::from_value(value).ok());
    match info {
        Some(info) => {
            store.set_manual_output_type(
                node,
                output,
                OutputTypeOverride::Override(info.type_expression()),
            );
        }
        None => store.set_manual_output_type(node, output, OutputTypeOverride::NoOverride),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixelflow_editor_graph::SchemaRegistry;
    use serde_json::json;

    fn model_value() -> serde_json::Value {
        json!({
            "scale": 4,
            "inputChannels": 3,
            "outputChannels": 4,
            "numFeatures": 64,
        })
    }

    fn store_with(schema_id: &str) -> (GraphStore, NodeId) {
        let registry = SchemaRegistry::with_builtins();
        let store = GraphStore::new();
        let id = store.add_node(registry.create_node(schema_id).unwrap());
        (store, id)
    }

    #[test]
    fn test_tags_when_data_present() {
        let (store, id) = store_with("pixelflow:ncnn:load_model");
        store.set_output_value(id, 0, model_value());
        let preview = OutputPreview::new(store, id, 0);
        assert_eq!(
            preview.state(),
            PreviewState::Tags(vec!["4x".into(), "RGB→RGBA".into(), "64nf".into()])
        );
    }

    #[test]
    fn test_unavailable_when_absent() {
        let (store, id) = store_with("pixelflow:ncnn:load_model");
        let preview = OutputPreview::new(store, id, 0);
        assert_eq!(preview.state(), PreviewState::Unavailable);
    }

    #[test]
    fn test_pending_wins_over_data() {
        let (store, id) = store_with("pixelflow:ncnn:load_model");
        store.set_output_value(id, 0, model_value());
        store.set_executing(id, true);
        let preview = OutputPreview::new(store.clone(), id, 0);
        assert_eq!(preview.state(), PreviewState::Pending);

        store.set_executing(id, false);
        assert!(matches!(preview.state(), PreviewState::Tags(_)));
    }

    #[test]
    fn test_starting_node_pushes_and_clears_override() {
        let (store, id) = store_with("pixelflow:ncnn:load_model");
        let _preview = OutputPreview::new(store.clone(), id, 0);
        assert_eq!(store.manual_output_type(id, 0), OutputTypeOverride::NoOverride);

        store.set_output_value(id, 0, model_value());
        let over = store.manual_output_type(id, 0);
        let Some(TypeExpression::Named(expr)) = over.as_expression().cloned() else {
            panic!("expected a named override, got {over:?}");
        };
        assert_eq!(expr.name, "UpscaleModel");
        assert_eq!(expr.field("scale"), Some(4.0));
        assert_eq!(expr.field("inputChannels"), Some(3.0));
        assert_eq!(expr.field("outputChannels"), Some(4.0));
        assert_eq!(expr.field("nf"), Some(64.0));

        store.clear_output_value(id, 0);
        assert_eq!(store.manual_output_type(id, 0), OutputTypeOverride::NoOverride);
    }

    #[test]
    fn test_value_present_at_construction_is_synced() {
        let (store, id) = store_with("pixelflow:ncnn:load_model");
        store.set_output_value(id, 0, model_value());
        let _preview = OutputPreview::new(store.clone(), id, 0);
        assert!(store.manual_output_type(id, 0).as_expression().is_some());
    }

    #[test]
    fn test_non_starting_node_never_writes_override() {
        let (store, id) = store_with("pixelflow:onnx:remove_background");
        let _preview = OutputPreview::new(store.clone(), id, 0);
        store.set_output_value(id, 0, model_value());
        assert_eq!(store.manual_output_type(id, 0), OutputTypeOverride::NoOverride);
    }

    #[test]
    fn test_dropped_presenter_stops_syncing() {
        let (store, id) = store_with("pixelflow:ncnn:load_model");
        let preview = OutputPreview::new(store.clone(), id, 0);
        store.set_output_value(id, 0, model_value());
        assert!(store.manual_output_type(id, 0).as_expression().is_some());

        drop(preview);
        store.clear_output_value(id, 0);
        // No presenter is listening anymore; the override stays as-is
        assert!(store.manual_output_type(id, 0).as_expression().is_some());
    }

    #[test]
    fn test_malformed_value_reads_as_unavailable() {
        let (store, id) = store_with("pixelflow:ncnn:load_model");
        store.set_output_value(id, 0, json!({"scale": "big"}));
        let preview = OutputPreview::new(store.clone(), id, 0);
        assert_eq!(preview.state(), PreviewState::Unavailable);
        assert_eq!(store.manual_output_type(id, 0), OutputTypeOverride::NoOverride);
    }

    #[test]
    fn test_channel_labels() {
        assert_eq!(channel_label(1), "GRAY");
        assert_eq!(channel_label(3), "RGB");
        assert_eq!(channel_label(4), "RGBA");
        assert_eq!(channel_label(7), "7");
    }
}
