// Response adapters for the three Gemini call shapes

pub mod grounding;
pub mod image;
pub mod markdown;
pub mod structured_output;

pub use grounding::{adapt_search_result, map_source_cards, MapSourceCard};
pub use image::{decode_data_uri, extract_image_data_uri};
pub use markdown::{is_safe_url, render_markdown};
pub use structured_output::{parse_cost_estimate, StructuredOutputError};
