use std::env;

use anyhow::Result;
use once_cell::sync::Lazy;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    pub log_dir: String,
    pub gemini_api_key: String,
    pub gemini_api_base: String,
    pub gemini_model: String,
    pub gemini_temperature: f32,
    pub gemini_top_k: i32,
    pub gemini_top_p: f32,
    pub gemini_max_output_tokens: i32,
    pub gemini_safety_settings: String,
    /// Raw GEMINI_SAFETY_SETTINGS value when it named no known profile.
    pub unknown_safety_setting: Option<String>,
    pub gemini_timeout_seconds: u64,
}

pub static CONFIG: Lazy<Config> =
    Lazy::new(|| Config::load().expect("Failed to load configuration"));

fn env_string(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn env_f32(name: &str, default: f32) -> f32 {
    env::var(name)
        .ok()
        .and_then(|value| value.parse::<f32>().ok())
        .unwrap_or(default)
}

fn env_i32(name: &str, default: i32) -> i32 {
    env::var(name)
        .ok()
        .and_then(|value| value.parse::<i32>().ok())
        .unwrap_or(default)
}

fn env_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(default)
}

/// Maps a GEMINI_SAFETY_SETTINGS value to a profile name, `None` if unrecognised.
fn normalize_gemini_safety_settings(value: &str) -> Option<&'static str> {
    match value.trim().to_lowercase().as_str() {
        "" | "permissive" | "off" | "none" => Some("permissive"),
        "standard" => Some("standard"),
        _ => None,
    }
}

fn normalize_api_base(value: String) -> String {
    value.trim().trim_end_matches('/').to_string()
}

impl Config {
    pub fn load() -> Result<Self> {
        let gemini_model = env_string("GEMINI_MODEL", "gemini-3-pro-preview")
            .trim()
            .to_string();
        if gemini_model.is_empty() {
            return Err(anyhow::anyhow!("GEMINI_MODEL must not be blank"));
        }

        let gemini_api_base = normalize_api_base(env_string(
            "GEMINI_API_BASE",
            "https://generativelanguage.googleapis.com/v1beta",
        ));
        if gemini_api_base.is_empty() {
            return Err(anyhow::anyhow!("GEMINI_API_BASE must not be blank"));
        }

        let raw_safety_settings = env_string("GEMINI_SAFETY_SETTINGS", "permissive");
        let safety_profile = normalize_gemini_safety_settings(&raw_safety_settings);

        Ok(Config {
            log_level: env_string("LOG_LEVEL", "info").to_lowercase(),
            log_dir: env_string("LOG_DIR", "logs"),
            gemini_api_key: env_string("GEMINI_API_KEY", "").trim().to_string(),
            gemini_api_base,
            gemini_model,
            gemini_temperature: env_f32("GEMINI_TEMPERATURE", 0.9),
            gemini_top_k: env_i32("GEMINI_TOP_K", 40),
            gemini_top_p: env_f32("GEMINI_TOP_P", 0.95),
            gemini_max_output_tokens: env_i32("GEMINI_MAX_OUTPUT_TOKENS", 8192),
            gemini_safety_settings: safety_profile.unwrap_or("permissive").to_string(),
            unknown_safety_setting: safety_profile
                .is_none()
                .then(|| raw_safety_settings.trim().to_string()),
            gemini_timeout_seconds: env_u64("GEMINI_TIMEOUT_SECONDS", 90).max(1),
        })
    }

    fn safety_settings_warning(&self) -> Option<String> {
        self.unknown_safety_setting.as_ref().map(|raw| {
            format!(
                "Unknown GEMINI_SAFETY_SETTINGS value '{}'; defaulting to {}.",
                raw, self.gemini_safety_settings
            )
        })
    }

    /// Called once the subscriber is installed; `load` runs before logging exists.
    pub fn log_summary(&self) {
        if let Some(message) = self.safety_settings_warning() {
            warn!("{message}");
        }
        info!(
            "Gemini model {} at {} (safety profile {}, timeout {}s, key {})",
            self.gemini_model,
            self.gemini_api_base,
            self.gemini_safety_settings,
            self.gemini_timeout_seconds,
            if self.gemini_api_key.is_empty() { "missing" } else { "set" }
        );
    }
}

pub const BLUEPRINT_SYSTEM_PROMPT: &str = r#"You are a World-Class E-commerce Prompt Engineer and Commercial Photographer.
Your objective is to generate exactly 6 distinct, professional AI image generation blueprints based on a product's name and category.

PROMPT BLUEPRINT STRUCTURE (11 MANDATORY SECTIONS):
1. HEADER: A clear, concise summary of the shot.
2. SCENE & ENVIRONMENT: Detailed description of the background, atmosphere, and setting.
3. PLACEMENT & INTERACTION: How the product @img1 is positioned. Include specific hand interactions or model poses if relevant (natural skin, realistic pores, candid expressions).
4. SUPPORTING PROPS: Specific items that complement the product without cluttering.
5. PRODUCT INTEGRITY RULES: (CRITICAL) Mention @img1 specifically. Instructions to never change labels, logos, colors, or proportions.
6. LIGHTING GEOMETRY: Technical lighting setup (e.g., Rembrandt, Butterfly, Rim lighting, Profoto softboxes).
7. CAMERA & COMPOSITION: Specific gear (Sony A7R V, Hasselblad), lens focal length, and framing (Rule of thirds, golden ratio).
8. STYLE & COLOR GRADING: Film-like softness, natural saturation, specific color palettes, or e-commerce clean aesthetics.
9. TECH SPECS: 8K, RAW, ray-tracing, shutter speeds (especially for pets/action).
10. QUALITY METRICS: Masterpiece quality, high-fidelity, photorealistic.
11. NEGATIVE PROMPTS: Specific anti-AI terms (plastic skin, airbrushed, CGI, bad anatomy, artificial fur).

CATEGORY-SPECIFIC LOGIC:
- FASHION/WEARABLES: Focus on "Editorial" looks. Models must look natural, diverse, and have "authentic skin texture" (no plastic looks).
- WATCHES/JEWELRY: Focus on "Luxury" looks. High-end lighting (Rim/Spot), macro clarity, and expensive environments.
- PET SUPPLIES: Focus on "Active/Heartfelt" looks. Freeze-action shutter speeds, natural fur textures (moist noses, intelligent eyes).
- TECH/ELECTRONICS: Focus on "Minimal/Modern" looks. Clean lines, studio precision, cold or warm accent lighting.

Every prompt MUST use '@img1' to refer to the product to ensure the AI knows to preserve the uploaded reference."#;

pub const BLUEPRINT_USER_DIRECTIVE: &str = "Generate 6 bespoke commercial photography blueprints using the 11-section format. Refer to the product as @img1. Ensure the prompts are category-intelligent (e.g., if it's a wearable, include natural human skin instructions; if it's a pet product, focus on fur and movement). Ensure 0% AI-monotony and 100% natural, high-end photography standards.";
