// SPDX-License-Identifier: MIT OR Apache-2.0
//! Builtin node schemas shipped with the editor.

use crate::node::Category;
use crate::schema::{InputDecl, InputKind, NodeSchema, OutputDecl, SchemaRegistry};

/// Register all builtin schemas
pub fn register_builtins(registry: &mut SchemaRegistry) {
    registry.register(math());
    registry.register(remove_background());
    registry.register(load_model());
    registry.register(load_images());
}

/// Math: perform mathematical operations on numbers
fn math() -> NodeSchema {
    NodeSchema {
        schema_id: "pixelflow:utility:math".into(),
        name: "Math".into(),
        description: "Perform mathematical operations on numbers.".into(),
        category: Category::Utility,
        subcategory: "Math".into(),
        icon: "MdCalculate".into(),
        inputs: vec![
            InputDecl::connectable("Operand a", InputKind::Number),
            InputDecl::value("Math Operation", InputKind::Dropdown),
            InputDecl::connectable("Operand b", InputKind::Number),
        ],
        outputs: vec![OutputDecl::new("Result", "number")],
    }
}

/// Remove Background: run a background-removal model over an image
fn remove_background() -> NodeSchema {
    NodeSchema {
        schema_id: "pixelflow:onnx:remove_background".into(),
        name: "Remove Background".into(),
        description: "Remove the background from an image.".into(),
        category: Category::Onnx,
        subcategory: "Processing".into(),
        icon: "ONNX".into(),
        inputs: vec![
            InputDecl::connectable("Image", InputKind::Image),
            InputDecl::connectable("Model", InputKind::Model),
            InputDecl::value("Post-process Mask", InputKind::Toggle),
            InputDecl::value("Alpha Matting", InputKind::Toggle),
            InputDecl::value("Foreground Threshold", InputKind::Slider),
            InputDecl::value("Background Threshold", InputKind::Slider),
            InputDecl::value("Erode Size", InputKind::Number),
        ],
        outputs: vec![
            OutputDecl::new("Image", "image"),
            OutputDecl::new("Mask", "image"),
        ],
    }
}

/// Load Model: read an upscaling model from disk.
///
/// The model file is chosen in place, so this is a starting node; its output
/// type comes from a manual override fed by observed runtime data.
fn load_model() -> NodeSchema {
    NodeSchema {
        schema_id: "pixelflow:ncnn:load_model".into(),
        name: "Load Model".into(),
        description: "Load an NCNN upscaling model.".into(),
        category: Category::Ncnn,
        subcategory: "Input".into(),
        icon: "NCNN".into(),
        inputs: vec![InputDecl::value("Model File", InputKind::Model)],
        outputs: vec![
            OutputDecl::new("Model", "UpscaleModel"),
            OutputDecl::new("Model Name", "string"),
        ],
    }
}

/// Load Images: iterate over every image in a directory
fn load_images() -> NodeSchema {
    NodeSchema {
        schema_id: "pixelflow:image:load_images".into(),
        name: "Load Images".into(),
        description: "Iterate over all images in a directory.".into(),
        category: Category::Image,
        subcategory: "Iteration".into(),
        icon: "BsFolderPlus".into(),
        inputs: vec![InputDecl::value("Directory", InputKind::Directory)],
        outputs: vec![
            OutputDecl::new("Image", "image"),
            OutputDecl::new("Image Name", "string"),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loader_schemas_are_starting_nodes() {
        assert!(load_model().is_starting_node());
        assert!(load_images().is_starting_node());
        assert!(!math().is_starting_node());
        assert!(!remove_background().is_starting_node());
    }
}
