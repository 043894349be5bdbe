pub mod gemini;
pub mod media;

pub use gemini::{generate_professional_prompts, GenerationError};
pub use media::load_reference_image;
