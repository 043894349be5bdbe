use tracing::{info, warn};

use crate::blueprint::{fallback_result, GenerationResult, ProductInput};
use crate::llm::{generate_professional_prompts, GenerationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultSource {
    Ai,
    Fallback,
}

impl ResultSource {
    pub fn as_str(self) -> &'static str {
        match self {
            ResultSource::Ai => "ai",
            ResultSource::Fallback => "fallback",
        }
    }
}

/// Picks what the caller shows: the AI result when usable, otherwise the
/// deterministic blueprints with the fixed advisory analysis. The returned
/// `GenerationResult` has the same shape either way; the source is only for
/// logging.
pub fn resolve_outcome(
    input: &ProductInput,
    outcome: Result<GenerationResult, GenerationError>,
) -> (GenerationResult, ResultSource) {
    match outcome {
        Ok(result) => (result, ResultSource::Ai),
        Err(err) => {
            warn!(
                kind = err.kind(),
                "Blueprint generation failed, using fallback engine: {err}"
            );
            (
                fallback_result(&input.name, &input.category),
                ResultSource::Fallback,
            )
        }
    }
}

pub async fn generate_blueprints(
    input: &ProductInput,
    offline: bool,
) -> (GenerationResult, ResultSource) {
    if offline {
        info!("Offline mode requested; skipping Gemini");
        return (
            fallback_result(&input.name, &input.category),
            ResultSource::Fallback,
        );
    }

    let outcome = generate_professional_prompts(input).await;
    resolve_outcome(input, outcome)
}
