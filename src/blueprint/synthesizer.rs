//! Offline blueprint generation used when the AI service is unavailable.

use crate::blueprint::classifier::{classify, CategoryFlags};
use crate::blueprint::types::{GenerationResult, PromptBlueprint, ScenarioType};

pub const FALLBACK_ANALYSIS: &str =
    "API simulation active. Using deterministic fallback engine for prompt generation.";

const DEFAULT_CAMERA: &str = "Hasselblad H6D-400c, 80mm lens";
const DEFAULT_LIGHTING: &str = "Soft-box diffused studio lighting";
const DEFAULT_TECH_SPECS: &str = "8K, highly detailed, raw photo format";

const SKIN_DIRECTIVE: &str = "Featuring models with authentic skin textures, natural pores, diverse complexions, and candid human expressions.";
const PET_DIRECTIVE: &str = "Capturing authentic animal expressions, detailed fur textures, and natural animal-human interactions.";

const HUMAN_PLACEMENT: &str = "Full body or three-quarter shot with natural posture.";
const DEFAULT_PLACEMENT: &str = "Golden ratio composition with purposeful negative space.";
const HOME_PROPS: &str = "Living room environment with high-end Scandinavian furniture.";
const DEFAULT_PROPS: &str = "Understated premium props that complement the product color story.";
const PET_DYNAMICS: &str = "Active motion blur on moving tails or soft-focus flying toys.";
const DEFAULT_DYNAMICS: &str = "Subtle atmospheric dust particles or soft-focus background motion.";
const TECH_COLOR: &str = "Monochromatic with sharp accent highlights.";
const DEFAULT_COLOR: &str = "Natural, organic color palette with accurate skin tones.";

pub const QUALITY: &str =
    "Masterpiece quality, sharp focus on primary product, soft natural fall-off.";
pub const NEGATIVE_PROMPTS: &str = "Plastic skin, airbrushed, CGI, doll-like faces, over-saturated, blurry, watermarks, bad anatomy, artificial fur sheen.";

struct GearPreset {
    applies: fn(&CategoryFlags, ScenarioType) -> bool,
    camera: &'static str,
    lighting: &'static str,
    tech_specs: Option<&'static str>,
}

fn is_luxury(flags: &CategoryFlags, _: ScenarioType) -> bool {
    flags.is_luxury
}

fn is_fashion(flags: &CategoryFlags, _: ScenarioType) -> bool {
    flags.is_fashion
}

fn is_tech(flags: &CategoryFlags, _: ScenarioType) -> bool {
    flags.is_tech
}

fn is_pet(flags: &CategoryFlags, _: ScenarioType) -> bool {
    flags.is_pet
}

fn is_small_macro(flags: &CategoryFlags, scenario: ScenarioType) -> bool {
    flags.is_small && scenario == ScenarioType::MacroTexture
}

// First match wins. The small/macro rule sits last, so it never fires when
// luxury, fashion, tech or pet also holds ("Clothing, Shoes & Jewelry" macro
// shots get the luxury rig, not the macro lens). Downstream output depends on
// this order; do not reshuffle.
const GEAR_PRESETS: &[GearPreset] = &[
    GearPreset {
        applies: is_luxury,
        camera: "Phase One XF, 100mm Trichromatic lens",
        lighting: "Cinematic rim lighting with subtle lens flares and high contrast",
        tech_specs: Some("Ultra-high fidelity, 16K textures, ray-traced reflections"),
    },
    GearPreset {
        applies: is_fashion,
        camera: "Sony A1 with 85mm f/1.4 G Master lens",
        lighting: "Natural window light with a soft bounce reflector",
        tech_specs: None,
    },
    GearPreset {
        applies: is_tech,
        camera: "Leica SL2, 50mm Summilux lens",
        lighting: "Clean futuristic neon accents and cold white key lights",
        tech_specs: None,
    },
    GearPreset {
        applies: is_pet,
        camera: "Sony A9 III with 70-200mm f/2.8 GM II lens",
        lighting: "High-speed sync flash or bright, flicker-free LED panels",
        tech_specs: Some("Action-freeze 1/2000s shutter, ultra-sharp fur detail"),
    },
    GearPreset {
        applies: is_small_macro,
        camera: "Sony A7R V with 90mm f/2.8 Macro lens",
        lighting: "Ring flash for even light distribution across fine textures",
        tech_specs: None,
    },
];

fn select_preset(flags: &CategoryFlags, scenario: ScenarioType) -> Option<&'static GearPreset> {
    GEAR_PRESETS
        .iter()
        .find(|preset| (preset.applies)(flags, scenario))
}

fn build_scene(category: &str, flags: &CategoryFlags, scenario: ScenarioType) -> String {
    let skin = if scenario.is_human_focused() {
        SKIN_DIRECTIVE
    } else {
        ""
    };
    let pet = if flags.is_pet { PET_DIRECTIVE } else { "" };
    format!("A professional commercial environment optimized for {category}. {skin} {pet}")
        .trim()
        .to_string()
}

fn build_blueprint(
    product_name: &str,
    category: &str,
    flags: &CategoryFlags,
    scenario: ScenarioType,
) -> PromptBlueprint {
    let (camera, lighting, tech_specs) = match select_preset(flags, scenario) {
        Some(preset) => (
            preset.camera,
            preset.lighting,
            preset.tech_specs.unwrap_or(DEFAULT_TECH_SPECS),
        ),
        None => (DEFAULT_CAMERA, DEFAULT_LIGHTING, DEFAULT_TECH_SPECS),
    };

    let placement = if flags.is_fashion && scenario.is_human_focused() {
        HUMAN_PLACEMENT
    } else {
        DEFAULT_PLACEMENT
    };

    PromptBlueprint {
        header: format!("Commercial {} for {}", scenario.label(), product_name),
        scene: build_scene(category, flags, scenario),
        placement: placement.to_string(),
        supporting_props: if flags.is_home { HOME_PROPS } else { DEFAULT_PROPS }.to_string(),
        dynamic_elements: if flags.is_pet { PET_DYNAMICS } else { DEFAULT_DYNAMICS }.to_string(),
        lighting: lighting.to_string(),
        camera: camera.to_string(),
        color: if flags.is_tech { TECH_COLOR } else { DEFAULT_COLOR }.to_string(),
        tech_specs: tech_specs.to_string(),
        quality: QUALITY.to_string(),
        negative_prompts: NEGATIVE_PROMPTS.to_string(),
        scenario_type: scenario,
    }
}

/// One blueprint per scenario, in declaration order. Pure: identical inputs
/// give identical output.
pub fn synthesize(
    product_name: &str,
    category: &str,
    flags: &CategoryFlags,
) -> Vec<PromptBlueprint> {
    ScenarioType::ALL
        .iter()
        .map(|scenario| build_blueprint(product_name, category, flags, *scenario))
        .collect()
}

pub fn get_fallback_blueprints(product_name: &str, category: &str) -> Vec<PromptBlueprint> {
    let flags = classify(category);
    synthesize(product_name, category, &flags)
}

pub fn fallback_result(product_name: &str, category: &str) -> GenerationResult {
    GenerationResult {
        blueprints: get_fallback_blueprints(product_name, category),
        analysis: Some(FALLBACK_ANALYSIS.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blueprint_for(
        blueprints: &[PromptBlueprint],
        scenario: ScenarioType,
    ) -> &PromptBlueprint {
        blueprints
            .iter()
            .find(|bp| bp.scenario_type == scenario)
            .expect("scenario present")
    }

    #[test]
    fn emits_one_blueprint_per_scenario_in_order() {
        for category in ["Pet Supplies", "Luxury Stores", "Miscellaneous Widgets", ""] {
            let blueprints = get_fallback_blueprints("Desk Lamp", category);
            let order: Vec<ScenarioType> = blueprints.iter().map(|bp| bp.scenario_type).collect();
            assert_eq!(order, ScenarioType::ALL.to_vec());
        }
    }

    #[test]
    fn every_text_field_is_populated() {
        for category in crate::blueprint::categories::CATEGORIES
            .iter()
            .copied()
            .chain(["", "Miscellaneous Widgets"])
        {
            for bp in get_fallback_blueprints("", category) {
                for (field, value) in bp.text_fields() {
                    assert!(!value.is_empty(), "{field} empty for {category:?}");
                }
            }
        }
    }

    #[test]
    fn repeated_calls_are_identical() {
        let first = get_fallback_blueprints("Silk Scarf", "Women's Fashion");
        let second = get_fallback_blueprints("Silk Scarf", "Women's Fashion");
        assert_eq!(first, second);
    }

    #[test]
    fn header_names_scenario_and_product() {
        let blueprints = get_fallback_blueprints("Chew Toy", "Pet Supplies");
        assert_eq!(blueprints[0].header, "Commercial Lifestyle Hero for Chew Toy");
        assert_eq!(blueprints[5].header, "Commercial Catalog Standard for Chew Toy");
    }

    #[test]
    fn pet_preset_wins_over_small_macro() {
        let mut flags = classify("Pet Supplies");
        flags.is_small = true;
        let blueprints = synthesize("Chew Toy", "Pet Supplies", &flags);
        let macro_shot = blueprint_for(&blueprints, ScenarioType::MacroTexture);
        assert_eq!(macro_shot.camera, "Sony A9 III with 70-200mm f/2.8 GM II lens");
        assert_eq!(
            macro_shot.tech_specs,
            "Action-freeze 1/2000s shutter, ultra-sharp fur detail"
        );
    }

    #[test]
    fn small_macro_preset_only_applies_to_macro_texture() {
        let blueprints = get_fallback_blueprints("Lip Balm", "Beauty & Personal Care");
        let macro_shot = blueprint_for(&blueprints, ScenarioType::MacroTexture);
        assert_eq!(macro_shot.camera, "Sony A7R V with 90mm f/2.8 Macro lens");
        assert_eq!(
            macro_shot.lighting,
            "Ring flash for even light distribution across fine textures"
        );
        assert_eq!(macro_shot.tech_specs, DEFAULT_TECH_SPECS);

        let catalog = blueprint_for(&blueprints, ScenarioType::CatalogStandard);
        assert_eq!(catalog.camera, DEFAULT_CAMERA);
    }

    #[test]
    fn jewelry_macro_shot_uses_luxury_rig() {
        let blueprints = get_fallback_blueprints("Ring", "Clothing, Shoes & Jewelry");
        let macro_shot = blueprint_for(&blueprints, ScenarioType::MacroTexture);
        assert_eq!(macro_shot.camera, "Phase One XF, 100mm Trichromatic lens");
        assert_eq!(
            macro_shot.tech_specs,
            "Ultra-high fidelity, 16K textures, ray-traced reflections"
        );
    }

    #[test]
    fn fashion_human_connection_uses_full_body_placement() {
        let flags = CategoryFlags {
            is_fashion: true,
            ..CategoryFlags::default()
        };
        let blueprints = synthesize("Trench Coat", "Men's Fashion", &flags);
        let human = blueprint_for(&blueprints, ScenarioType::HumanConnection);
        assert_eq!(human.placement, HUMAN_PLACEMENT);
        assert_eq!(human.camera, "Sony A1 with 85mm f/1.4 G Master lens");
        let flat_lay = blueprint_for(&blueprints, ScenarioType::ArtisticFlatLay);
        assert_eq!(flat_lay.placement, DEFAULT_PLACEMENT);
    }

    #[test]
    fn unrecognized_category_keeps_defaults() {
        let blueprints = get_fallback_blueprints("Gadget", "Miscellaneous Widgets");
        for bp in &blueprints {
            assert_eq!(bp.camera, DEFAULT_CAMERA);
            assert_eq!(bp.lighting, DEFAULT_LIGHTING);
            assert_eq!(bp.tech_specs, DEFAULT_TECH_SPECS);
            assert_eq!(bp.supporting_props, DEFAULT_PROPS);
            assert_eq!(bp.dynamic_elements, DEFAULT_DYNAMICS);
            assert_eq!(bp.color, DEFAULT_COLOR);
        }
    }

    #[test]
    fn lifestyle_scene_carries_skin_then_pet_directive() {
        let blueprints = get_fallback_blueprints("Leash", "Pet Supplies");
        let hero = blueprint_for(&blueprints, ScenarioType::LifestyleHero);
        assert_eq!(
            hero.scene,
            format!(
                "A professional commercial environment optimized for Pet Supplies. {SKIN_DIRECTIVE} {PET_DIRECTIVE}"
            )
        );
        let skin_at = hero.scene.find(SKIN_DIRECTIVE).unwrap();
        let pet_at = hero.scene.find(PET_DIRECTIVE).unwrap();
        assert!(skin_at < pet_at);
    }

    #[test]
    fn scene_without_directives_has_no_trailing_whitespace() {
        let blueprints = get_fallback_blueprints("Stapler", "Office Products");
        let catalog = blueprint_for(&blueprints, ScenarioType::CatalogStandard);
        assert_eq!(
            catalog.scene,
            "A professional commercial environment optimized for Office Products."
        );
    }

    #[test]
    fn pet_only_scene_keeps_double_space() {
        let blueprints = get_fallback_blueprints("Chew Toy", "Pet Supplies");
        let macro_shot = blueprint_for(&blueprints, ScenarioType::MacroTexture);
        assert_eq!(
            macro_shot.scene,
            "A professional commercial environment optimized for Pet Supplies.  Capturing authentic animal expressions, detailed fur textures, and natural animal-human interactions."
        );
    }

    #[test]
    fn category_specific_sections() {
        let home = get_fallback_blueprints("Sofa", "Home & Kitchen");
        assert!(home.iter().all(|bp| bp.supporting_props == HOME_PROPS));

        let tech = get_fallback_blueprints("Laptop", "Computers & Tablets");
        assert!(tech.iter().all(|bp| bp.color == TECH_COLOR));
        assert!(tech.iter().all(|bp| bp.camera == "Leica SL2, 50mm Summilux lens"));

        let pet = get_fallback_blueprints("Ball", "Pet Supplies");
        assert!(pet.iter().all(|bp| bp.dynamic_elements == PET_DYNAMICS));
    }

    #[test]
    fn fallback_result_carries_fixed_analysis() {
        let result = fallback_result("Mug", "Home & Kitchen");
        assert_eq!(result.blueprints.len(), 6);
        assert_eq!(result.analysis.as_deref(), Some(FALLBACK_ANALYSIS));
        assert!(result.blueprints.iter().all(|bp| bp.quality == QUALITY));
        assert!(result
            .blueprints
            .iter()
            .all(|bp| bp.negative_prompts == NEGATIVE_PROMPTS));
    }
}
