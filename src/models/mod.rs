// Data models matching the browser frontend types

pub mod estimate;
pub mod grounding;
pub mod state_machine;

pub use estimate::{CostEstimate, CostEstimateItem};
pub use grounding::{
    GroundingChunk, MapsSource, PlaceAnswerSource, ReviewSnippet, SearchResult, WebSource,
};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The house a user is designing. Every request builder reads from this.
///
/// Edits never mutate a live value in place: `with_field` returns a new record
/// and the store swaps it in whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseSpecs {
    pub city: String,
    pub plot_size: String,
    pub dimensions: String,
    pub floors: u32,
    pub style: String,
    pub exterior_color: String,
    pub layout: String,
    pub features: String,
    /// Collected by the form but not sent anywhere yet
    #[serde(default)]
    pub budget: String,
}

impl Default for HouseSpecs {
    fn default() -> Self {
        Self {
            city: "Karachi".to_string(),
            plot_size: "500 Sq Yards".to_string(),
            dimensions: "50x90 ft".to_string(),
            floors: 2,
            style: "Modern Minimalist".to_string(),
            exterior_color: "White and Grey".to_string(),
            layout: "5 Bed, 6 Bath, Drawing, Dining".to_string(),
            features: "Large windows, lawn, solar panels".to_string(),
            budget: String::new(),
        }
    }
}

impl HouseSpecs {
    /// Whether enough is filled in to ask the model anything.
    pub fn is_ready(&self) -> bool {
        !self.city.is_empty() && !self.plot_size.is_empty()
    }

    /// Return a copy with one form field replaced.
    ///
    /// Field names are the camelCase names the browser form uses.
    pub fn with_field(&self, field: &str, value: &str) -> Result<HouseSpecs, String> {
        let mut next = self.clone();
        match field {
            "city" => next.city = value.to_string(),
            "plotSize" => next.plot_size = value.to_string(),
            "dimensions" => next.dimensions = value.to_string(),
            "floors" => {
                next.floors = value
                    .trim()
                    .parse()
                    .map_err(|e| format!("Invalid floors value '{}': {}", value, e))?
            }
            "style" => next.style = value.to_string(),
            "exteriorColor" => next.exterior_color = value.to_string(),
            "layout" => next.layout = value.to_string(),
            "features" => next.features = value.to_string(),
            "budget" => next.budget = value.to_string(),
            _ => return Err(format!("Unknown specification field: {}", field)),
        }
        Ok(next)
    }
}

/// A labelled choice offered by a form select
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecOption {
    pub value: &'static str,
    pub label: &'static str,
}

const fn opt(value: &'static str, label: &'static str) -> SpecOption {
    SpecOption { value, label }
}

pub const PLOT_SIZE_OPTIONS: &[SpecOption] = &[
    opt("120 Sq Yards", "120 Sq Yards (5 Marla)"),
    opt("240 Sq Yards", "240 Sq Yards (10 Marla)"),
    opt("500 Sq Yards", "500 Sq Yards (1 Kanal)"),
    opt("1000 Sq Yards", "1000 Sq Yards (2 Kanal)"),
    opt("2000 Sq Yards", "2000 Sq Yards (4 Kanal)"),
];

pub const FLOOR_OPTIONS: &[SpecOption] = &[
    opt("1", "Single Story"),
    opt("2", "Double Story"),
    opt("3", "Triple Story + Basement"),
];

pub const STYLE_OPTIONS: &[SpecOption] = &[
    opt("Modern Minimalist", "Modern Minimalist"),
    opt("Contemporary", "Contemporary"),
    opt("Spanish Villa", "Spanish Villa"),
    opt("Classic Islamic", "Classic Islamic"),
    opt("Industrial", "Industrial"),
    opt("Mediterranean", "Mediterranean"),
    opt("Colonial", "Colonial"),
];

/// All select catalogues, as served to the design form
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecOptions {
    pub plot_sizes: &'static [SpecOption],
    pub floors: &'static [SpecOption],
    pub styles: &'static [SpecOption],
}

impl SpecOptions {
    pub fn catalogue() -> Self {
        Self {
            plot_sizes: PLOT_SIZE_OPTIONS,
            floors: FLOOR_OPTIONS,
            styles: STYLE_OPTIONS,
        }
    }
}

/// The four mutually exclusive screens of the shell
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum AppTab {
    #[default]
    Home,
    Design,
    Estimate,
    FindPros,
}

impl AppTab {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppTab::Home => "home",
            AppTab::Design => "design",
            AppTab::Estimate => "estimate",
            AppTab::FindPros => "find_pros",
        }
    }
}

impl fmt::Display for AppTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AppTab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "home" => Ok(AppTab::Home),
            "design" => Ok(AppTab::Design),
            "estimate" => Ok(AppTab::Estimate),
            "find_pros" | "pros" => Ok(AppTab::FindPros),
            _ => Err(format!("Unknown tab: {}", s)),
        }
    }
}

/// Camera framing for the visualization
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Exterior,
    Interior,
    Garden,
}

impl ViewMode {
    pub const ALL: [ViewMode; 3] = [ViewMode::Exterior, ViewMode::Interior, ViewMode::Garden];

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Exterior => "exterior",
            ViewMode::Interior => "interior",
            ViewMode::Garden => "garden",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "exterior" => Ok(ViewMode::Exterior),
            "interior" => Ok(ViewMode::Interior),
            "garden" => Ok(ViewMode::Garden),
            _ => Err(format!("Unknown view mode: {}", s)),
        }
    }
}

/// Finder tabs
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProfessionalCategory {
    #[default]
    Architects,
    Contractors,
    Suppliers,
}

impl ProfessionalCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfessionalCategory::Architects => "architects",
            ProfessionalCategory::Contractors => "contractors",
            ProfessionalCategory::Suppliers => "suppliers",
        }
    }

    /// The phrase placed into the search prompt for this tab
    pub fn search_phrase(&self) -> &'static str {
        match self {
            ProfessionalCategory::Architects => "Architects and Interior Designers",
            ProfessionalCategory::Contractors => "Construction Companies and Contractors",
            ProfessionalCategory::Suppliers => {
                "Construction Material Suppliers (Cement, Steel, Tiles)"
            }
        }
    }
}

impl fmt::Display for ProfessionalCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ProfessionalCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "architects" => Ok(ProfessionalCategory::Architects),
            "contractors" => Ok(ProfessionalCategory::Contractors),
            "suppliers" => Ok(ProfessionalCategory::Suppliers),
            _ => Err(format!("Unknown professional category: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_specs_are_ready() {
        assert!(HouseSpecs::default().is_ready());
    }

    #[test]
    fn test_empty_city_or_plot_is_not_ready() {
        let specs = HouseSpecs {
            city: String::new(),
            ..HouseSpecs::default()
        };
        assert!(!specs.is_ready());

        let specs = HouseSpecs {
            plot_size: String::new(),
            ..HouseSpecs::default()
        };
        assert!(!specs.is_ready());
    }

    #[test]
    fn test_with_field_replaces_whole_record() {
        let original = HouseSpecs::default();
        let next = original.with_field("city", "Lahore").unwrap();

        assert_eq!(next.city, "Lahore");
        assert_eq!(original.city, "Karachi");
        assert_eq!(next.plot_size, original.plot_size);
    }

    #[test]
    fn test_with_field_parses_floors() {
        let next = HouseSpecs::default().with_field("floors", "3").unwrap();
        assert_eq!(next.floors, 3);
        assert!(HouseSpecs::default().with_field("floors", "two").is_err());
    }

    #[test]
    fn test_with_field_rejects_unknown_field() {
        let err = HouseSpecs::default().with_field("roofType", "flat").unwrap_err();
        assert!(err.contains("roofType"));
    }

    #[test]
    fn test_specs_serialize_camel_case() {
        let json = serde_json::to_value(HouseSpecs::default()).unwrap();
        assert_eq!(json["plotSize"], "500 Sq Yards");
        assert_eq!(json["exteriorColor"], "White and Grey");
        assert_eq!(json["floors"], 2);
    }

    #[test]
    fn test_category_search_phrases() {
        assert_eq!(
            ProfessionalCategory::Architects.search_phrase(),
            "Architects and Interior Designers"
        );
        assert_eq!(
            ProfessionalCategory::Contractors.search_phrase(),
            "Construction Companies and Contractors"
        );
        assert!(ProfessionalCategory::Suppliers
            .search_phrase()
            .contains("Cement, Steel, Tiles"));
    }

    #[test]
    fn test_enum_parsing() {
        assert_eq!("Interior".parse::<ViewMode>(), Ok(ViewMode::Interior));
        assert_eq!("pros".parse::<AppTab>(), Ok(AppTab::FindPros));
        assert!("basement".parse::<ViewMode>().is_err());
        assert_eq!(
            serde_json::to_string(&AppTab::FindPros).unwrap(),
            "\"find_pros\""
        );
    }
}
