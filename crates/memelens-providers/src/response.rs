//! Shared parsing for the JSON payload both providers are told to produce.

use log::warn;
use memelens_core::{AnalyzeError, MemeAnalysis};
use serde::Deserialize;

/// Fallback explanation when the model omits one.
const FALLBACK_EXPLANATION: &str = "Unable to analyze this meme.";

#[derive(Debug, Deserialize)]
struct AnalysisPayload {
    explanation: Option<String>,
    #[serde(rename = "culturalContext")]
    cultural_context: Option<String>,
    confidence: Option<f64>,
}

/// Parse model output into an analysis, applying the documented fallbacks:
/// missing explanation becomes a fixed message, missing confidence becomes
/// 0.5, and confidence is clamped to [0, 1].
pub(crate) fn parse_analysis(raw: &str) -> Result<MemeAnalysis, AnalyzeError> {
    let payload: AnalysisPayload = serde_json::from_str(raw)
        .map_err(|err| AnalyzeError::InvalidResponse(format!("bad JSON from model: {err}")))?;

    let explanation = match payload.explanation {
        Some(text) if !text.trim().is_empty() => text,
        _ => {
            warn!("model response had no explanation, using fallback text");
            FALLBACK_EXPLANATION.to_string()
        }
    };
    let cultural_context = payload
        .cultural_context
        .filter(|text| !text.trim().is_empty());

    Ok(MemeAnalysis {
        explanation,
        cultural_context,
        confidence: payload.confidence.unwrap_or(0.5).clamp(0.0, 1.0),
    })
}
