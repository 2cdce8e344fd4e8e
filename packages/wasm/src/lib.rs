use loaderkit_compiler::{generate, GenerateOptions, OutputMode};
use loaderkit_model::{presets, Framework, ShapeModel};
use loaderkit_preview::{MarkupSandbox, PreviewBridge, PreviewOutcome, Scope};
use loaderkit_translator::translate;
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

fn parse_framework(selector: &str) -> Result<Framework, JsValue> {
    selector
        .parse()
        .map_err(|e| JsValue::from_str(&format!("{}", e)))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Generate component source from a JSON shape model
#[wasm_bindgen(js_name = generate)]
pub fn generate_js(
    model_json: &str,
    framework: &str,
    component_name: &str,
    export: bool,
) -> Result<String, JsValue> {
    let model: ShapeModel = serde_json::from_str(model_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid shape model: {}", e)))?;

    let mode = if export { OutputMode::Export } else { OutputMode::Preview };
    let options = GenerateOptions::new(parse_framework(framework)?)
        .with_mode(mode)
        .with_component_name(component_name);

    generate(&model, &options).map_err(|e| JsValue::from_str(&format!("Codegen error: {}", e)))
}

/// Rewrite source into another framework; unrecognised text comes back unchanged
#[wasm_bindgen(js_name = translate)]
pub fn translate_js(source: &str, target: &str) -> Result<String, JsValue> {
    Ok(translate(source, parse_framework(target)?).text)
}

#[derive(Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
enum PreviewResult {
    Rendered { markup: String, model: ShapeModel },
    ExtractionFailed { markup: String, error: String },
    Failed { error: String, start: Option<usize>, end: Option<usize> },
}

/// Render source and read the scene back. Returns JSON tagged by `status`.
#[wasm_bindgen(js_name = preview)]
pub fn preview_js(source: &str, framework: &str) -> Result<String, JsValue> {
    let dialect = parse_framework(framework)?;
    let mut bridge = PreviewBridge::new();
    let outcome = bridge.run(source, dialect, &MarkupSandbox::new(), &Scope::default());

    let result = match outcome {
        PreviewOutcome::Rendered { output, model } => PreviewResult::Rendered {
            markup: output.root.to_markup(),
            model,
        },
        PreviewOutcome::ExtractionFailed { output, error } => PreviewResult::ExtractionFailed {
            markup: output.root.to_markup(),
            error: error.to_string(),
        },
        PreviewOutcome::Failed(error) => {
            let span = error.span();
            PreviewResult::Failed {
                error: error.to_string(),
                start: span.as_ref().map(|s| s.start),
                end: span.map(|s| s.end),
            }
        }
        PreviewOutcome::Stale => return Err(JsValue::from_str("Preview was superseded")),
    };
    to_json(&result)
}

/// Built-in presets as a JSON object keyed by name
#[wasm_bindgen(js_name = presets)]
pub fn presets_js() -> Result<String, JsValue> {
    let map: serde_json::Map<String, serde_json::Value> = presets()
        .into_iter()
        .map(|(name, model)| serde_json::to_value(model).map(|v| (name.to_string(), v)))
        .collect::<Result<_, _>>()
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))?;
    to_json(&map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_from_preset_json() {
        let presets: serde_json::Value = serde_json::from_str(&presets_js().unwrap()).unwrap();
        let facebook = presets["facebook"].to_string();

        let code = generate_js(&facebook, "react", "MyLoader", true).unwrap();
        assert!(code.starts_with("import ContentLoader"));
        assert!(code.contains("<circle cx={30} cy={30} r={30} />"));
    }

    #[test]
    fn test_preview_round_trip() {
        let presets: serde_json::Value = serde_json::from_str(&presets_js().unwrap()).unwrap();
        let code = generate_js(&presets["code"].to_string(), "vue", "MyLoader", false).unwrap();

        let result: serde_json::Value = serde_json::from_str(&preview_js(&code, "vue").unwrap()).unwrap();
        assert_eq!(result["status"], "rendered");
        assert_eq!(result["model"]["primitives"].as_array().unwrap().len(), 9);
    }

    #[test]
    fn test_preview_failure_carries_span() {
        let result: serde_json::Value =
            serde_json::from_str(&preview_js("const A = () => <Skeleton />", "react").unwrap()).unwrap();
        assert_eq!(result["status"], "failed");
        assert!(result["start"].is_number());
    }

    #[test]
    fn test_translate_passes_through_unknown_text() {
        assert_eq!(translate_js("hello", "vue").unwrap(), "hello");
    }
}
