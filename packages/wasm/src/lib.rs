use protypo_compiler::{generate_with_diagnostics, resolve, CompileOptions};
use protypo_editor::{
    instantiate_template, resolve_drop_position, to_visual_tree, BoundingBox, Point,
};
use protypo_tree::{assign_ids, parse, to_json};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

#[wasm_bindgen]
pub struct GenerateResult {
    source: String,
    diagnostics: Vec<String>,
}

#[wasm_bindgen]
impl GenerateResult {
    #[wasm_bindgen(getter)]
    pub fn source(&self) -> String {
        self.source.clone()
    }

    /// Per-node failures that were skipped during generation
    #[wasm_bindgen(getter)]
    pub fn diagnostics(&self) -> Vec<String> {
        self.diagnostics.clone()
    }
}

fn js_error(context: &str, error: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&format!("{}: {}", context, error))
}

/// Generate template source from a Protypo JSON tree
#[wasm_bindgen(js_name = generateSource)]
pub fn generate_source_js(tree: &str, trim_trailing_whitespace: bool) -> Result<GenerateResult, JsValue> {
    let nodes = parse(tree).map_err(|e| js_error("Parse error", e))?;
    let options = CompileOptions {
        trim_trailing_whitespace,
        ..CompileOptions::default()
    };
    let output = generate_with_diagnostics(&nodes, options);

    Ok(GenerateResult {
        source: output.source,
        diagnostics: output.diagnostics.iter().map(ToString::to_string).collect(),
    })
}

/// Adapt a Protypo JSON tree for the tree widget. Returns JSON.
#[wasm_bindgen(js_name = toVisualTree)]
pub fn to_visual_tree_js(tree: &str, selected_id: Option<String>) -> Result<String, JsValue> {
    let mut nodes = parse(tree).map_err(|e| js_error("Parse error", e))?;
    assign_ids(&mut nodes, false);

    serde_json::to_string(&to_visual_tree(&nodes, selected_id.as_deref()))
        .map_err(|e| js_error("Serialization error", e))
}

/// Drop position ("before", "after", "inside") for a pointer over a tag's box.
/// Pass `measured = false` when the hovered element has no box.
#[wasm_bindgen(js_name = resolveDropPosition)]
#[allow(clippy::too_many_arguments)]
pub fn resolve_drop_position_js(
    pointer_x: f64,
    pointer_y: f64,
    measured: bool,
    left: f64,
    top: f64,
    width: f64,
    height: f64,
    target_tag: &str,
) -> String {
    let hovered = measured.then(|| BoundingBox::new(left, top, width, height));
    resolve_drop_position(Point::new(pointer_x, pointer_y), hovered, target_tag)
        .as_str()
        .to_string()
}

/// Fresh instance of a starter template as JSON
#[wasm_bindgen(js_name = instantiateTemplate)]
pub fn instantiate_template_js(name: &str) -> Result<String, JsValue> {
    let root = instantiate_template(name).map_err(|e| js_error("Template error", e))?;
    to_json(&[root]).map_err(|e| js_error("Serialization error", e))
}

/// Palette sample for a tag as JSON
#[wasm_bindgen(js_name = sampleFragment)]
pub fn sample_fragment_js(tag: &str, text: Option<String>) -> Result<String, JsValue> {
    let handler = resolve(tag).ok_or_else(|| JsValue::from_str(&format!("Unknown tag: {}", tag)))?;
    let sample = handler.sample_fragment(text.as_deref());
    to_json(&[sample]).map_err(|e| js_error("Serialization error", e))
}

/// Fill in missing ids (or replace all of them with `force`). Returns JSON.
#[wasm_bindgen(js_name = assignIds)]
pub fn assign_ids_js(tree: &str, force: bool) -> Result<String, JsValue> {
    let mut nodes = parse(tree).map_err(|e| js_error("Parse error", e))?;
    assign_ids(&mut nodes, force);
    to_json(&nodes).map_err(|e| js_error("Serialization error", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_drop_position_strings() {
        assert_eq!(
            resolve_drop_position_js(50.0, 50.0, true, 0.0, 0.0, 100.0, 100.0, "div"),
            "inside"
        );
        assert_eq!(
            resolve_drop_position_js(50.0, 50.0, false, 0.0, 0.0, 0.0, 0.0, "div"),
            "after"
        );
    }
}
