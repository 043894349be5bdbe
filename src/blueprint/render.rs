use crate::blueprint::types::{GenerationResult, PromptBlueprint};

/// Labelled card sections, in display order. `dynamicElements` carries the
/// product integrity rules in the AI schema, hence its label.
fn card_sections(blueprint: &PromptBlueprint) -> [(&'static str, &str); 9] {
    [
        ("Scene & Environment", blueprint.scene.as_str()),
        ("Placement & Interaction", blueprint.placement.as_str()),
        ("Supporting Props", blueprint.supporting_props.as_str()),
        ("Product Rules (@img1)", blueprint.dynamic_elements.as_str()),
        ("Lighting Geometry", blueprint.lighting.as_str()),
        ("Camera & Composition", blueprint.camera.as_str()),
        ("Style & Color Grading", blueprint.color.as_str()),
        ("Technical Specs", blueprint.tech_specs.as_str()),
        ("Quality Metrics", blueprint.quality.as_str()),
    ]
}

/// Single-line prompt suitable for pasting into an image model.
pub fn full_prompt(blueprint: &PromptBlueprint) -> String {
    format!(
        "{}. {}. {}. Props: {}. Rules: {}. Lighting: {}. Camera: {}. Style: {}. Tech: {}, {}. Negative: {}",
        blueprint.header,
        blueprint.scene,
        blueprint.placement,
        blueprint.supporting_props,
        blueprint.dynamic_elements,
        blueprint.lighting,
        blueprint.camera,
        blueprint.color,
        blueprint.tech_specs,
        blueprint.quality,
        blueprint.negative_prompts
    )
}

pub fn render_card(blueprint: &PromptBlueprint) -> String {
    let mut out = String::new();
    out.push_str(&format!("[{}]\n", blueprint.scenario_type.label().to_uppercase()));
    out.push_str(&format!("{}\n\n", blueprint.header));
    for (title, content) in card_sections(blueprint) {
        out.push_str(&format!("{}\n  {}\n", title.to_uppercase(), content));
    }
    out.push_str(&format!(
        "EXCLUDE (NEGATIVE)\n  {}\n\nCOPY PROMPT\n  {}\n",
        blueprint.negative_prompts,
        full_prompt(blueprint)
    ));
    out
}

pub fn render_result(result: &GenerationResult) -> String {
    let mut out = String::new();
    if let Some(analysis) = result.analysis.as_deref() {
        if !analysis.trim().is_empty() {
            out.push_str(&format!("Visual Identity Analysis\n  {}\n\n", analysis.trim()));
        }
    }
    let cards: Vec<String> = result.blueprints.iter().map(render_card).collect();
    out.push_str(&cards.join(&format!("\n{}\n\n", "-".repeat(72))));
    out
}
