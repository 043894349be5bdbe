pub mod categories;
pub mod classifier;
pub mod render;
pub mod synthesizer;
pub mod types;

pub use classifier::{classify, CategoryFlags};
pub use synthesizer::{fallback_result, get_fallback_blueprints, synthesize};
pub use types::{GenerationResult, ProductInput, PromptBlueprint, ReferenceImage, ScenarioType};
