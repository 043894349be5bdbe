use std::collections::HashSet;

use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::{debug, warn};

use crate::blueprint::{GenerationResult, ProductInput, ScenarioType};
use crate::config::{BLUEPRINT_SYSTEM_PROMPT, BLUEPRINT_USER_DIRECTIVE, CONFIG};
use crate::llm::media::{is_supported_image_mime, normalize_image_mime_type};
use crate::utils::http::get_http_client;
use crate::utils::timing::log_llm_timing;

/// Every way the AI path can fail. Callers collapse all of them into the
/// offline fallback.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("GEMINI_API_KEY is not configured")]
    MissingCredential,
    #[error("Gemini request failed: {0}")]
    Service(String),
    #[error("Gemini returned an unusable response: {0}")]
    MalformedResponse(String),
    #[error("Reference image type {0} is not accepted by Gemini")]
    UnsupportedImage(String),
}

impl GenerationError {
    pub fn kind(&self) -> &'static str {
        match self {
            GenerationError::MissingCredential => "missing_credential",
            GenerationError::Service(_) => "service",
            GenerationError::MalformedResponse(_) => "malformed_response",
            GenerationError::UnsupportedImage(_) => "unsupported_image",
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    candidates: Option<Vec<GeminiCandidate>>,
    prompt_feedback: Option<GeminiPromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiPromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    content: Option<GeminiContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiContent {
    parts: Option<Vec<GeminiPart>>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum GeminiPart {
    Text {
        text: String,
        #[serde(default)]
        thought: Option<bool>,
    },
    #[allow(dead_code)]
    Other(Value),
}

fn redact_gemini_api_key(text: &str) -> String {
    let key = CONFIG.gemini_api_key.trim();
    if key.is_empty() {
        return text.to_string();
    }
    text.replace(key, "[redacted]")
}

fn truncate_for_log(value: &str, limit: usize) -> String {
    if value.chars().count() <= limit {
        return value.to_string();
    }
    let truncated: String = value.chars().take(limit).collect();
    format!("{truncated}... (truncated)")
}

fn summarize_error_body(body: &str) -> (Option<String>, String) {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return (None, "empty response body".to_string());
    }

    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        let message = value
            .pointer("/error/message")
            .and_then(|v| v.as_str())
            .map(|v| v.to_string())
            .or_else(|| {
                value
                    .get("message")
                    .and_then(|v| v.as_str())
                    .map(|v| v.to_string())
            });
        return (message, truncate_for_log(&value.to_string(), 2000));
    }

    (None, truncate_for_log(trimmed, 2000))
}

fn build_safety_settings(profile: &str) -> Vec<Value> {
    let threshold = match profile {
        "standard" => "BLOCK_MEDIUM_AND_ABOVE",
        _ => "OFF",
    };

    vec![
        json!({ "category": "HARM_CATEGORY_HARASSMENT", "threshold": threshold }),
        json!({ "category": "HARM_CATEGORY_HATE_SPEECH", "threshold": threshold }),
        json!({ "category": "HARM_CATEGORY_SEXUALLY_EXPLICIT", "threshold": threshold }),
        json!({ "category": "HARM_CATEGORY_DANGEROUS_CONTENT", "threshold": threshold }),
    ]
}

/// Structured output contract: six blueprints with all twelve fields required.
pub fn blueprint_response_schema() -> Value {
    let scenario_labels: Vec<&str> = ScenarioType::ALL.iter().map(|s| s.label()).collect();
    json!({
        "type": "OBJECT",
        "properties": {
            "blueprints": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "scenarioType": { "type": "STRING", "enum": scenario_labels },
                        "header": { "type": "STRING" },
                        "scene": { "type": "STRING", "description": "Scene & Environment details" },
                        "placement": { "type": "STRING", "description": "Placement & Interaction (Hand/Model interaction)" },
                        "supportingProps": { "type": "STRING" },
                        "dynamicElements": { "type": "STRING", "description": "Product Integrity Rules (must use @img1)" },
                        "lighting": { "type": "STRING", "description": "Lighting Geometry" },
                        "camera": { "type": "STRING", "description": "Camera & Composition" },
                        "color": { "type": "STRING", "description": "Style & Color Grading" },
                        "techSpecs": { "type": "STRING" },
                        "quality": { "type": "STRING", "description": "Quality Metrics" },
                        "negativePrompts": { "type": "STRING" }
                    },
                    "required": [
                        "scenarioType", "header", "scene", "placement", "supportingProps",
                        "dynamicElements", "lighting", "camera", "color", "techSpecs",
                        "quality", "negativePrompts"
                    ]
                }
            },
            "analysis": { "type": "STRING", "description": "Brief visual identity report." }
        },
        "required": ["blueprints"]
    })
}

fn build_user_text(input: &ProductInput) -> String {
    format!(
        "Product: {}\nCategory: {}\n{}",
        input.name, input.category, BLUEPRINT_USER_DIRECTIVE
    )
}

fn build_gemini_parts(input: &ProductInput) -> Result<Vec<Value>, GenerationError> {
    let mut parts = vec![json!({ "text": build_user_text(input) })];

    if let Some(image) = &input.image {
        let mime_type = normalize_image_mime_type(&image.mime_type);
        if !is_supported_image_mime(&mime_type) {
            return Err(GenerationError::UnsupportedImage(mime_type));
        }
        parts.push(json!({
            "inlineData": {
                "mimeType": mime_type,
                "data": image.data
            }
        }));
    }

    Ok(parts)
}

pub fn build_request_payload(input: &ProductInput) -> Result<Value, GenerationError> {
    let parts = build_gemini_parts(input)?;
    Ok(json!({
        "systemInstruction": { "parts": [{ "text": BLUEPRINT_SYSTEM_PROMPT }] },
        "contents": [{ "role": "user", "parts": parts }],
        "generationConfig": {
            "temperature": CONFIG.gemini_temperature,
            "topK": CONFIG.gemini_top_k,
            "topP": CONFIG.gemini_top_p,
            "maxOutputTokens": CONFIG.gemini_max_output_tokens,
            "responseMimeType": "application/json",
            "responseSchema": blueprint_response_schema(),
        },
        "safetySettings": build_safety_settings(&CONFIG.gemini_safety_settings),
    }))
}

fn summarize_gemini_payload(payload: &Value) -> Value {
    let mut summary = Map::new();
    if let Some(parts) = payload
        .pointer("/contents/0/parts")
        .and_then(|value| value.as_array())
    {
        let summarized: Vec<Value> = parts
            .iter()
            .map(|part| {
                if let Some(text) = part.get("text").and_then(|value| value.as_str()) {
                    json!({ "text": truncate_for_log(text, 200) })
                } else if let Some(inline_data) = part.get("inlineData") {
                    let mime_type = inline_data
                        .get("mimeType")
                        .and_then(|value| value.as_str())
                        .unwrap_or("unknown");
                    let data_len = inline_data
                        .get("data")
                        .and_then(|value| value.as_str())
                        .map(|value| value.len())
                        .unwrap_or(0);
                    json!({ "inlineData": { "mimeType": mime_type, "dataLen": data_len } })
                } else {
                    json!({ "unknownPart": true })
                }
            })
            .collect();
        summary.insert("parts".to_string(), Value::Array(summarized));
    }
    if let Some(config) = payload.get("generationConfig") {
        let mut config = config.clone();
        if let Some(object) = config.as_object_mut() {
            object.remove("responseSchema");
        }
        summary.insert("generationConfig".to_string(), config);
    }
    Value::Object(summary)
}

fn extract_text_from_response(response: GeminiResponse) -> Result<String, GenerationError> {
    let candidates = response.candidates.unwrap_or_default();
    if candidates.is_empty() {
        let reason = response
            .prompt_feedback
            .and_then(|feedback| feedback.block_reason)
            .unwrap_or_else(|| "no candidates".to_string());
        return Err(GenerationError::Service(format!(
            "Gemini returned no candidates ({reason})"
        )));
    }

    let mut text_parts = Vec::new();
    let mut finish_reason = None;
    for candidate in candidates.into_iter().take(1) {
        finish_reason = candidate.finish_reason;
        if let Some(content) = candidate.content {
            for part in content.parts.unwrap_or_default() {
                if let GeminiPart::Text { text, thought } = part {
                    if thought != Some(true) && !text.trim().is_empty() {
                        text_parts.push(text);
                    }
                }
            }
        }
    }

    if text_parts.is_empty() {
        return Err(GenerationError::MalformedResponse(format!(
            "response carried no text (finish_reason={})",
            finish_reason.as_deref().unwrap_or("unknown")
        )));
    }
    Ok(text_parts.join(""))
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// Enforces the same shape the offline generator guarantees: exactly one
/// blueprint per scenario, no blank sections, declaration order.
pub fn validate_generation_result(
    mut result: GenerationResult,
) -> Result<GenerationResult, GenerationError> {
    let expected = ScenarioType::ALL.len();
    if result.blueprints.len() != expected {
        return Err(GenerationError::MalformedResponse(format!(
            "expected {expected} blueprints, got {}",
            result.blueprints.len()
        )));
    }

    let mut seen = HashSet::new();
    for blueprint in &result.blueprints {
        if !seen.insert(blueprint.scenario_type) {
            return Err(GenerationError::MalformedResponse(format!(
                "scenario '{}' appears more than once",
                blueprint.scenario_type
            )));
        }
        for (field, value) in blueprint.text_fields() {
            if value.trim().is_empty() {
                return Err(GenerationError::MalformedResponse(format!(
                    "blueprint '{}' has an empty {field}",
                    blueprint.scenario_type
                )));
            }
        }
    }

    result
        .blueprints
        .sort_by_key(|blueprint| blueprint.scenario_type.ordinal());
    result.analysis = result
        .analysis
        .map(|analysis| analysis.trim().to_string())
        .filter(|analysis| !analysis.is_empty());
    Ok(result)
}

pub fn parse_generation_result(text: &str) -> Result<GenerationResult, GenerationError> {
    let body = strip_code_fence(text);
    let parsed = serde_json::from_str::<GenerationResult>(body).map_err(|err| {
        GenerationError::MalformedResponse(format!(
            "{err} (body={})",
            truncate_for_log(body, 200)
        ))
    })?;
    validate_generation_result(parsed)
}

async fn call_gemini_api(model: &str, payload: &Value) -> Result<GeminiResponse, GenerationError> {
    let client = get_http_client();
    let url = format!("{}/models/{}:generateContent", CONFIG.gemini_api_base, model);

    if tracing::enabled!(tracing::Level::DEBUG) {
        let payload_summary = summarize_gemini_payload(payload);
        debug!(target: "llm.gemini", model = model, payload = %payload_summary);
    }

    let response = client
        .post(&url)
        .header("x-goog-api-key", &CONFIG.gemini_api_key)
        .json(payload)
        .send()
        .await
        .map_err(|err| {
            let err_text = redact_gemini_api_key(&err.to_string());
            warn!(
                "Gemini request failed to send: {} (timeout={}, connect={})",
                err_text,
                err.is_timeout(),
                err.is_connect()
            );
            GenerationError::Service(err_text)
        })?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let (message, body_summary) = summarize_error_body(&body);
        warn!("Gemini API error: status={}, body={}", status, body_summary);
        let detail = message.unwrap_or(body_summary);
        return Err(GenerationError::Service(format!(
            "status {}: {}",
            status,
            redact_gemini_api_key(&detail)
        )));
    }

    let body = response
        .text()
        .await
        .map_err(|err| GenerationError::Service(redact_gemini_api_key(&err.to_string())))?;
    serde_json::from_str::<GeminiResponse>(&body).map_err(|err| {
        GenerationError::MalformedResponse(format!(
            "{err} (body={})",
            truncate_for_log(&body, 200)
        ))
    })
}

/// Asks Gemini for six blueprints. Fails fast without a network attempt when
/// no API key is configured.
pub async fn generate_professional_prompts(
    input: &ProductInput,
) -> Result<GenerationResult, GenerationError> {
    if CONFIG.gemini_api_key.is_empty() {
        return Err(GenerationError::MissingCredential);
    }

    let payload = build_request_payload(input)?;
    let model = CONFIG.gemini_model.as_str();
    let metadata = json!({
        "category": input.category,
        "has_image": input.image.is_some(),
    });

    log_llm_timing(
        "gemini",
        model,
        "generate_blueprints",
        Some(metadata),
        || async {
            let response = call_gemini_api(model, &payload).await?;
            let text = extract_text_from_response(response)?;
            parse_generation_result(&text)
        },
    )
    .await
}
