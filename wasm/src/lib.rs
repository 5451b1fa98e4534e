use serde::Deserialize;
use slide_align::{AlignConfig, Strategy, align_with_options};
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AlignOptions {
    strategy: Option<Strategy>,
    max_iterations: Option<usize>,
    epsilon: Option<f32>,
    strict: Option<bool>,
}

fn build_align_config(options: AlignOptions) -> AlignConfig {
    let mut config = AlignConfig::default();
    if let Some(strategy) = options.strategy {
        config.strategy = strategy;
    }
    if let Some(max) = options.max_iterations {
        config.max_iterations = max;
    }
    if let Some(epsilon) = options.epsilon {
        config.epsilon = epsilon;
    }
    if let Some(strict) = options.strict {
        config.strict = strict;
    }
    config
}

fn align_json(input: &str, options: AlignOptions) -> Result<String, String> {
    let output =
        align_with_options(input, &build_align_config(options)).map_err(|error| error.to_string())?;
    serde_json::to_string(&output).map_err(|error| error.to_string())
}

/// Resolves a deck (or single slide) JSON document. Returns `{document, report}`.
#[wasm_bindgen]
pub fn align_deck_json(input: &str, options_json: Option<String>) -> Result<String, JsValue> {
    let options = if let Some(raw_options) = options_json {
        serde_json::from_str::<AlignOptions>(&raw_options)
            .map_err(|error| JsValue::from_str(&error.to_string()))?
    } else {
        AlignOptions::default()
    };

    align_json(input, options).map_err(|error| JsValue::from_str(&error))
}
