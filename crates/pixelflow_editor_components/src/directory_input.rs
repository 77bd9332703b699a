// SPDX-License-Identifier: MIT OR Apache-2.0
//! Directory selection input.

use crate::picker::DirectoryPicker;
use pixelflow_editor_graph::InputSlot;
use serde_json::Value;

/// Input component editing one directory-path slot through a platform
/// picker. The slot value is the single source of truth; this type holds no
/// path of its own.
pub struct DirectoryInput {
    slot: InputSlot,
    label: String,
}

impl DirectoryInput {
    /// Create an input over a slot
    pub fn new(slot: InputSlot, label: impl Into<String>) -> Self {
        Self {
            slot,
            label: label.into(),
        }
    }

    /// Display label
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The currently selected directory, if any
    pub fn directory(&self) -> Option<String> {
        self.slot
            .value()
            .and_then(|value| value.as_str().map(str::to_owned))
    }

    /// Whether the input is read-only: locked node OR locked input
    pub fn is_disabled(&self) -> bool {
        self.slot.is_effectively_locked()
    }

    /// Open the picker and adopt the first selected path.
    ///
    /// The current directory is passed as the initial hint. The slot is left
    /// unchanged when the input is disabled, the dialog was canceled, or the
    /// selection came back empty; any returned path string is otherwise
    /// accepted verbatim.
    pub fn browse(&self, picker: &dyn DirectoryPicker) {
        if self.is_disabled() {
            return;
        }
        let initial = self.directory().unwrap_or_default();
        let response = picker.pick_directory(&initial);
        if response.canceled {
            tracing::debug!("Directory selection canceled for {:?}", self.slot.node());
            return;
        }
        let Some(path) = response.file_paths.first() else {
            return;
        };
        self.slot
            .set_value(Value::String(path.to_string_lossy().into_owned()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::picker::PickResponse;
    use pixelflow_editor_graph::{GraphStore, SchemaRegistry};
    use serde_json::json;
    use std::path::PathBuf;

    struct StubPicker {
        response: PickResponse,
    }

    impl DirectoryPicker for StubPicker {
        fn pick_directory(&self, _initial: &str) -> PickResponse {
            self.response.clone()
        }
    }

    /// Picker that panics when invoked, to assert it was never opened
    struct UnreachablePicker;

    impl DirectoryPicker for UnreachablePicker {
        fn pick_directory(&self, _initial: &str) -> PickResponse {
            panic!("picker must not open for a locked input");
        }
    }

    fn directory_input() -> (GraphStore, DirectoryInput) {
        let registry = SchemaRegistry::with_builtins();
        let store = GraphStore::new();
        let id = store.add_node(registry.create_node("pixelflow:image:load_images").unwrap());
        let input = DirectoryInput::new(store.input_slot(id, 0), "Directory");
        (store, input)
    }

    #[test]
    fn test_canceled_leaves_slot_unchanged() {
        let (_store, input) = directory_input();
        let picker = StubPicker {
            response: PickResponse {
                canceled: true,
                file_paths: vec![PathBuf::from("/a/b")],
            },
        };
        input.browse(&picker);
        assert_eq!(input.directory(), None);
    }

    #[test]
    fn test_empty_selection_leaves_slot_unchanged() {
        let (_store, input) = directory_input();
        let picker = StubPicker {
            response: PickResponse::selected(Vec::new()),
        };
        input.browse(&picker);
        assert_eq!(input.directory(), None);
    }

    #[test]
    fn test_first_path_adopted() {
        let (_store, input) = directory_input();
        let picker = StubPicker {
            response: PickResponse::selected(vec![
                PathBuf::from("/a/b"),
                PathBuf::from("/never/used"),
            ]),
        };
        input.browse(&picker);
        assert_eq!(input.directory(), Some("/a/b".to_owned()));
    }

    #[test]
    fn test_locked_input_never_opens_picker() {
        let (store, input) = directory_input();
        store.set_node_locked(input.slot.node(), true);
        assert!(input.is_disabled());
        input.browse(&UnreachablePicker);
        assert_eq!(input.directory(), None);
    }

    #[test]
    fn test_current_value_is_the_hint() {
        let (_store, input) = directory_input();
        input.slot.set_value(json!("/start/here"));

        struct HintAsserting;
        impl DirectoryPicker for HintAsserting {
            fn pick_directory(&self, initial: &str) -> PickResponse {
                assert_eq!(initial, "/start/here");
                PickResponse::dismissed()
            }
        }
        input.browse(&HintAsserting);
        assert_eq!(input.directory(), Some("/start/here".to_owned()));
    }
}
