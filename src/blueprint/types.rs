use std::fmt;

use serde::{Deserialize, Serialize};

/// Shot categories a blueprint set must cover, each exactly once.
///
/// Declaration order is the output order of every generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScenarioType {
    #[serde(rename = "Lifestyle Hero")]
    LifestyleHero,
    #[serde(rename = "Macro Texture")]
    MacroTexture,
    #[serde(rename = "Environmental Story")]
    EnvironmentalStory,
    #[serde(rename = "Human Connection")]
    HumanConnection,
    #[serde(rename = "Artistic Flat-lay")]
    ArtisticFlatLay,
    #[serde(rename = "Catalog Standard")]
    CatalogStandard,
}

impl ScenarioType {
    pub const ALL: [ScenarioType; 6] = [
        ScenarioType::LifestyleHero,
        ScenarioType::MacroTexture,
        ScenarioType::EnvironmentalStory,
        ScenarioType::HumanConnection,
        ScenarioType::ArtisticFlatLay,
        ScenarioType::CatalogStandard,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ScenarioType::LifestyleHero => "Lifestyle Hero",
            ScenarioType::MacroTexture => "Macro Texture",
            ScenarioType::EnvironmentalStory => "Environmental Story",
            ScenarioType::HumanConnection => "Human Connection",
            ScenarioType::ArtisticFlatLay => "Artistic Flat-lay",
            ScenarioType::CatalogStandard => "Catalog Standard",
        }
    }

    /// Position in declaration order.
    pub fn ordinal(self) -> usize {
        self as usize
    }

    pub fn is_human_focused(self) -> bool {
        matches!(
            self,
            ScenarioType::HumanConnection | ScenarioType::LifestyleHero
        )
    }
}

impl fmt::Display for ScenarioType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One photography prompt record for a single scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptBlueprint {
    pub header: String,
    pub scene: String,
    pub placement: String,
    pub supporting_props: String,
    pub dynamic_elements: String,
    pub lighting: String,
    pub camera: String,
    pub color: String,
    pub tech_specs: String,
    pub quality: String,
    pub negative_prompts: String,
    pub scenario_type: ScenarioType,
}

impl PromptBlueprint {
    /// The eleven text sections in schema order, paired with their field names.
    pub fn text_fields(&self) -> [(&'static str, &str); 11] {
        [
            ("header", self.header.as_str()),
            ("scene", self.scene.as_str()),
            ("placement", self.placement.as_str()),
            ("supportingProps", self.supporting_props.as_str()),
            ("dynamicElements", self.dynamic_elements.as_str()),
            ("lighting", self.lighting.as_str()),
            ("camera", self.camera.as_str()),
            ("color", self.color.as_str()),
            ("techSpecs", self.tech_specs.as_str()),
            ("quality", self.quality.as_str()),
            ("negativePrompts", self.negative_prompts.as_str()),
        ]
    }
}

/// What the caller renders, whichever source produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub blueprints: Vec<PromptBlueprint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceImage {
    pub mime_type: String,
    /// Base64 payload without any `data:` prefix.
    pub data: String,
}

#[derive(Debug, Clone)]
pub struct ProductInput {
    pub name: String,
    pub category: String,
    pub image: Option<ReferenceImage>,
}

impl ProductInput {
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            image: None,
        }
    }

    pub fn with_image(mut self, image: Option<ReferenceImage>) -> Self {
        self.image = image;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_serializes_to_display_label() {
        let value = serde_json::to_value(ScenarioType::ArtisticFlatLay).unwrap();
        assert_eq!(value, serde_json::json!("Artistic Flat-lay"));
        for scenario in ScenarioType::ALL {
            let encoded = serde_json::to_value(scenario).unwrap();
            assert_eq!(encoded.as_str(), Some(scenario.label()));
        }
    }

    #[test]
    fn ordinals_follow_declaration_order() {
        for (index, scenario) in ScenarioType::ALL.iter().enumerate() {
            assert_eq!(scenario.ordinal(), index);
        }
    }

    #[test]
    fn unknown_scenario_label_is_rejected() {
        let parsed = serde_json::from_str::<ScenarioType>("\"Studio Glamour\"");
        assert!(parsed.is_err());
    }

    #[test]
    fn analysis_is_omitted_when_absent() {
        let result = GenerationResult {
            blueprints: Vec::new(),
            analysis: None,
        };
        let encoded = serde_json::to_string(&result).unwrap();
        assert_eq!(encoded, r#"{"blueprints":[]}"#);
    }
}
