//! Runs under `wasm-pack test --node`, where `JsValue` errors can be built.
#![cfg(target_arch = "wasm32")]

use loaderkit_wasm::{generate_js, preview_js, translate_js};
use wasm_bindgen_test::*;

#[wasm_bindgen_test]
fn unsupported_framework_is_an_error() {
    let err = translate_js("const A = () => <ContentLoader />", "svelte").unwrap_err();
    assert!(err.as_string().unwrap().contains("svelte"));
}

#[wasm_bindgen_test]
fn malformed_model_is_an_error() {
    let err = generate_js("{\"canvas\":", "react", "MyLoader", false).unwrap_err();
    assert!(err.as_string().unwrap().starts_with("Invalid shape model"));
}

#[wasm_bindgen_test]
fn vue_source_previews() {
    let source = "const MyLoader = {\n  components: { ContentLoader },\n  template: `\n    <ContentLoader :width=\"120\" :height=\"40\">\n      <circle :cx=\"20\" :cy=\"20\" :r=\"10\" />\n    </ContentLoader>\n  `\n}\n";
    let result = preview_js(source, "vue").unwrap();
    assert!(result.contains("\"status\":\"rendered\""));
}
