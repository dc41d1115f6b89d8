//! Request builders for the three call shapes
//!
//! Each builder turns application state into a complete
//! [`GenerateContentRequest`]; none of them touch the network.

use super::types::{
    GenerateContentRequest, GenerationConfig, GoogleMaps, LatLng, RetrievalConfig, Schema, Tool,
    ToolConfig,
};
use super::GeminiError;
use crate::models::{HouseSpecs, ViewMode};
use crate::templates::{builtin, render_builtin};
use chrono::Datelike;
use tera::Context;

/// Roughly the geographic centre of Pakistan. Only a hint for the maps tool;
/// the city named in the prompt is what actually scopes the search.
pub const PAKISTAN_CENTROID: LatLng = LatLng {
    latitude: 30.3753,
    longitude: 69.3451,
};

fn specs_context(specs: &HouseSpecs) -> Result<Context, GeminiError> {
    Context::from_serialize(specs).map_err(|e| GeminiError::Prompt(e.to_string()))
}

fn render(name: &str, context: &Context) -> Result<String, GeminiError> {
    render_builtin(name, context).map_err(|e| GeminiError::Prompt(e.to_string()))
}

/// Prompt for the visualization, with the framing rule for `view_mode`
pub fn architecture_image_prompt(
    specs: &HouseSpecs,
    view_mode: ViewMode,
) -> Result<String, GeminiError> {
    let mut context = specs_context(specs)?;
    context.insert("view_mode", view_mode.as_str());
    render(builtin::ARCHITECTURE_IMAGE, &context)
}

/// Image-generation call: one text part, no generation config
pub fn architecture_image_request(
    specs: &HouseSpecs,
    view_mode: ViewMode,
) -> Result<GenerateContentRequest, GeminiError> {
    let prompt = architecture_image_prompt(specs, view_mode)?;
    Ok(GenerateContentRequest::from_prompt(prompt))
}

pub fn cost_estimate_prompt(specs: &HouseSpecs) -> Result<String, GeminiError> {
    let mut context = specs_context(specs)?;
    context.insert("market_year", &chrono::Utc::now().year());
    render(builtin::COST_ESTIMATE, &context)
}

/// Declared shape of the structured cost reply
pub fn cost_estimate_schema() -> Schema {
    Schema::object(vec![
        ("currency", Schema::string()),
        ("totalEstimatedCost", Schema::number()),
        ("summary", Schema::string()),
        (
            "breakdown",
            Schema::array(Schema::object(vec![
                ("category", Schema::string()),
                ("amount", Schema::number()),
                ("description", Schema::string()),
            ])),
        ),
    ])
}

/// Structured cost call: JSON output constrained to [`cost_estimate_schema`]
pub fn cost_estimate_request(specs: &HouseSpecs) -> Result<GenerateContentRequest, GeminiError> {
    let prompt = cost_estimate_prompt(specs)?;
    Ok(GenerateContentRequest {
        generation_config: Some(GenerationConfig {
            response_mime_type: Some("application/json".to_string()),
            response_schema: Some(cost_estimate_schema()),
        }),
        ..GenerateContentRequest::from_prompt(prompt)
    })
}

pub fn local_pros_prompt(city: &str, category_phrase: &str) -> Result<String, GeminiError> {
    let mut context = Context::new();
    context.insert("city", city);
    context.insert("category", category_phrase);
    render(builtin::LOCAL_PROS, &context)
}

/// Grounded search call: maps tool plus a fallback location hint
pub fn local_pros_request(
    city: &str,
    category_phrase: &str,
    fallback: LatLng,
) -> Result<GenerateContentRequest, GeminiError> {
    let prompt = local_pros_prompt(city, category_phrase)?;
    Ok(GenerateContentRequest {
        tools: vec![Tool {
            google_maps: Some(GoogleMaps {}),
        }],
        tool_config: Some(ToolConfig {
            retrieval_config: RetrievalConfig { lat_lng: fallback },
        }),
        ..GenerateContentRequest::from_prompt(prompt)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_prompt_embeds_specs() {
        let specs = HouseSpecs::default();
        let prompt = architecture_image_prompt(&specs, ViewMode::Exterior).unwrap();

        assert!(prompt.starts_with(
            "Photorealistic architectural visualization of a Modern Minimalist house in Karachi, Pakistan."
        ));
        assert!(prompt.contains("View: exterior."));
        assert!(prompt.contains("- Plot size: 500 Sq Yards (50x90 ft)"));
        assert!(prompt.contains("- Floors: 2"));
        assert!(prompt.contains("- Exterior Color: White and Grey"));
        assert!(prompt.contains("- Layout style: 5 Bed, 6 Bath, Drawing, Dining"));
        assert!(prompt.contains("- Features: Large windows, lawn, solar panels"));
        assert!(prompt.contains("Neem trees"));
    }

    #[test]
    fn test_image_prompt_framing_follows_view_mode() {
        let specs = HouseSpecs::default();

        let exterior = architecture_image_prompt(&specs, ViewMode::Exterior).unwrap();
        assert!(exterior.contains("front facade with the gate"));
        assert!(!exterior.contains("drawing room"));

        let interior = architecture_image_prompt(&specs, ViewMode::Interior).unwrap();
        assert!(interior.contains("drawing room"));
        assert!(!interior.contains("front facade with the gate"));

        let garden = architecture_image_prompt(&specs, ViewMode::Garden).unwrap();
        assert!(garden.contains("landscaped garden"));
    }

    #[test]
    fn test_image_request_shape() {
        let request = architecture_image_request(&HouseSpecs::default(), ViewMode::Interior).unwrap();
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][0]["parts"].as_array().unwrap().len(), 1);
        assert!(json.get("generationConfig").is_none());
        assert!(json.get("tools").is_none());
    }

    #[test]
    fn test_cost_request_declares_schema() {
        let request = cost_estimate_request(&HouseSpecs::default()).unwrap();
        let json = serde_json::to_value(&request).unwrap();
        let config = &json["generationConfig"];

        assert_eq!(config["responseMimeType"], "application/json");
        let schema = &config["responseSchema"];
        assert_eq!(schema["type"], "OBJECT");
        assert_eq!(schema["properties"]["currency"]["type"], "STRING");
        assert_eq!(schema["properties"]["totalEstimatedCost"]["type"], "NUMBER");
        assert_eq!(schema["properties"]["summary"]["type"], "STRING");
        assert_eq!(schema["properties"]["breakdown"]["type"], "ARRAY");
        let item = &schema["properties"]["breakdown"]["items"];
        assert_eq!(item["properties"]["category"]["type"], "STRING");
        assert_eq!(item["properties"]["amount"]["type"], "NUMBER");
        assert_eq!(item["properties"]["description"]["type"], "STRING");
    }

    #[test]
    fn test_cost_prompt_mentions_pkr_and_categories() {
        let prompt = cost_estimate_prompt(&HouseSpecs::default()).unwrap();
        assert!(prompt.contains("house in Karachi, Pakistan"));
        assert!(prompt.contains("PKR"));
        assert!(prompt.contains("Grey structure, Finishing, Labor, Architecture fees, MEP works"));
        assert!(prompt.contains("market rates"));
    }

    #[test]
    fn test_pros_request_attaches_maps_grounding() {
        let request = local_pros_request(
            "Islamabad",
            "Construction Companies and Contractors",
            PAKISTAN_CENTROID,
        )
        .unwrap();
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["tools"], serde_json::json!([{"googleMaps": {}}]));
        let lat_lng = &json["toolConfig"]["retrievalConfig"]["latLng"];
        assert_eq!(lat_lng["latitude"], 30.3753);
        assert_eq!(lat_lng["longitude"], 69.3451);
        assert!(request
            .prompt_text()
            .unwrap()
            .contains("Construction Companies and Contractors in Islamabad, Pakistan"));
    }
}
