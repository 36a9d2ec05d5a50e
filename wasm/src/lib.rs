use popup_position::{
    DocumentMetrics, PlacementConfig, PopupPosition, PositionRequest, compute_popup_position,
};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlacementOptions {
    gutter: Option<f32>,
    margin_to_popup: Option<f32>,
}

fn build_placement_config(options: PlacementOptions) -> PlacementConfig {
    let mut config = PlacementConfig::default();
    if let Some(gutter) = options.gutter {
        config.gutter = gutter;
    }
    if let Some(margin) = options.margin_to_popup {
        config.margin_to_popup = margin;
    }
    config
}

fn place(
    request_json: &str,
    document_json: &str,
    options_json: Option<&str>,
) -> Result<PopupPosition, String> {
    let request: PositionRequest =
        serde_json::from_str(request_json).map_err(|error| error.to_string())?;
    let document: DocumentMetrics =
        serde_json::from_str(document_json).map_err(|error| error.to_string())?;
    let options = match options_json {
        Some(raw) => serde_json::from_str::<PlacementOptions>(raw).map_err(|error| error.to_string())?,
        None => PlacementOptions::default(),
    };
    Ok(compute_popup_position(
        &request,
        &document,
        &build_placement_config(options),
    ))
}

/// Computes the popup position for a request measured by the content script.
///
/// Returns `{ x, y, constrainWidth, constrainHeight }` as JSON.
#[wasm_bindgen(js_name = computePopupPosition)]
pub fn compute_popup_position_json(
    request_json: &str,
    document_json: &str,
    options_json: Option<String>,
) -> Result<String, JsValue> {
    let position = place(request_json, document_json, options_json.as_deref())
        .map_err(|error| JsValue::from_str(&error))?;
    serde_json::to_string(&position).map_err(|error| JsValue::from_str(&error.to_string()))
}
