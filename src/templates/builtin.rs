// Built-in prompt templates

/// Built-in template names
pub const ARCHITECTURE_IMAGE: &str = "architecture_image";
pub const COST_ESTIMATE: &str = "cost_estimate";
pub const LOCAL_PROS: &str = "local_pros";

/// Get a specific built-in template
pub fn get_builtin_template(name: &str) -> Option<&'static str> {
    match name {
        ARCHITECTURE_IMAGE => Some(ARCHITECTURE_IMAGE_TEMPLATE),
        COST_ESTIMATE => Some(COST_ESTIMATE_TEMPLATE),
        LOCAL_PROS => Some(LOCAL_PROS_TEMPLATE),
        _ => None,
    }
}

/// List all built-in template names
pub fn list_builtin_templates() -> Vec<&'static str> {
    vec![ARCHITECTURE_IMAGE, COST_ESTIMATE, LOCAL_PROS]
}

// Context: every HouseSpecs field (camelCase) plus `view_mode`.
const ARCHITECTURE_IMAGE_TEMPLATE: &str = r#"Photorealistic architectural visualization of a {{ style }} house in {{ city }}, Pakistan.
View: {{ view_mode }}.

Specifications:
- Plot size: {{ plotSize }} ({{ dimensions }})
- Floors: {{ floors }}
- Exterior Color: {{ exteriorColor }}
- Layout style: {{ layout }}
- Features: {{ features }}

Environment & Context:
- Place the house in a realistic Pakistani residential setting (e.g. Bahria Town, DHA, or an upscale neighborhood in {{ city }}).
- Include local vegetation (Neem trees, palm trees, Bougainvillea) and the sky and lighting typical of Pakistan.
{% if view_mode == "interior" -%}
- Show a spacious living area or drawing room matching the {{ style }} style.
{% elif view_mode == "garden" -%}
- Show the lawn and landscaped garden, with the house facade in the background.
{% else -%}
- Show the front facade with the gate and street view.
{% endif %}
Style: High-end architectural photography, 8k resolution, highly detailed materials (marble, tile, concrete)."#;

// Context: every HouseSpecs field (camelCase) plus `market_year`.
const COST_ESTIMATE_TEMPLATE: &str = r#"Generate a detailed construction cost estimate for a house in {{ city }}, Pakistan.

Specifications:
- Plot Size: {{ plotSize }} ({{ dimensions }})
- Floors: {{ floors }}
- Style: {{ style }}
- Layout: {{ layout }}
- Finish Level: Premium/A+ Grade Construction.

Task:
- Provide a breakdown of costs (Grey structure, Finishing, Labor, Architecture fees, MEP works).
- Costs must be in PKR (Pakistani Rupee).
- Base estimates on current {{ market_year }} market rates in Pakistan (cement, steel, labor rates)."#;

// Context: `category`, `city`.
const LOCAL_PROS_TEMPLATE: &str = r#"Find top rated, real-world {{ category }} in {{ city }}, Pakistan.
List 5 specific businesses or professionals with their actual addresses/locations if possible.
Explain why they are recommended for residential construction."#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_listed_template_resolves() {
        for name in list_builtin_templates() {
            assert!(get_builtin_template(name).is_some(), "missing {}", name);
        }
        assert!(get_builtin_template("task_prompt").is_none());
    }
}
