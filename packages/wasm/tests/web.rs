//! Binding tests run in a JS host with `wasm-pack test --node`
#![cfg(target_arch = "wasm32")]

use protypo_wasm::generate_source_js;
use wasm_bindgen_test::*;

#[wasm_bindgen_test]
fn generate_source_renders_button() {
    let tree = r#"[{ "tag": "button", "attr": { "class": "btn" }, "children": [{ "tag": "text", "text": "Send" }] }]"#;

    let output = generate_source_js(tree, true).unwrap();
    assert_eq!(output.source(), "Button(Class: btn, Page: , Contract: , Body: Send)");
    assert!(output.diagnostics().is_empty());
}

#[wasm_bindgen_test]
fn generate_source_reports_malformed_attributes() {
    let tree = r#"[{ "tag": "div", "attr": { "style": 5 } }]"#;

    let output = generate_source_js(tree, false).unwrap();
    assert_eq!(output.source(), "");
    assert_eq!(output.diagnostics().len(), 1);
}

#[wasm_bindgen_test]
fn generate_source_rejects_invalid_json() {
    assert!(generate_source_js("not json", false).is_err());
}
