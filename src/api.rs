use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use crate::detect::detect_language;
use crate::frontend::Language;
use crate::visualizer::FlowchartVisualizer;

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub code: String,
    /// Family override; omitted means auto-detect.
    #[serde(default)]
    pub language: Option<Language>,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub mermaid_syntax: String,
    pub explanation: String,
    pub language: Language,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Pure request handler shared by the HTTP server and the wasm export.
/// Malformed input never fails the call: the response carries a degraded
/// diagram and the error text instead.
pub fn handle_generate(req: GenerateRequest) -> GenerateResponse {
    let language = req.language.unwrap_or_else(|| detect_language(&req.code));
    let result = FlowchartVisualizer::new().visualize(language, &req.code);
    let error = if req.code.trim().is_empty() {
        Some("No code provided".to_string())
    } else {
        None
    };

    GenerateResponse {
        mermaid_syntax: result.mermaid_code,
        explanation: result.explanation,
        language,
        error,
    }
}

/// Browser-side entry point: snippet in, Mermaid text out.
#[wasm_bindgen]
pub fn generate_flowchart(code: &str) -> String {
    crate::flowchart_from_input(code)
}
