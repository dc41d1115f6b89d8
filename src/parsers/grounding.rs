// Grounded search reply adapter

use crate::gemini::GenerateContentResponse;
use crate::models::{GroundingChunk, SearchResult};
use serde::Serialize;

use super::markdown::is_safe_url;

/// Turn a grounded reply into text plus citation chunks.
///
/// Missing text becomes an empty string and missing metadata an empty chunk
/// list; neither is an error.
pub fn adapt_search_result(response: &GenerateContentResponse) -> SearchResult {
    let chunks = response
        .first_candidate()
        .and_then(|c| c.grounding_metadata.as_ref())
        .map(|m| m.grounding_chunks.clone())
        .unwrap_or_default();

    SearchResult {
        text: response.text().unwrap_or_default(),
        chunks,
    }
}

/// A map location card shown under the finder results.
///
/// `uri` is empty when the place link was missing or not http(s); the card
/// then shows its title without a link.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapSourceCard {
    pub title: String,
    pub uri: String,
    pub review_snippets: Vec<String>,
}

/// One card per chunk carrying a maps reference; web-only chunks are skipped
pub fn map_source_cards(chunks: &[GroundingChunk]) -> Vec<MapSourceCard> {
    chunks
        .iter()
        .filter_map(|chunk| chunk.maps.as_ref())
        .map(|maps| MapSourceCard {
            title: maps.title.clone(),
            uri: if is_safe_url(&maps.uri) {
                maps.uri.clone()
            } else {
                String::new()
            },
            review_snippets: maps.review_snippets(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MapsSource, WebSource};

    #[test]
    fn test_adapt_full_reply() {
        let response: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates": [{
                "content": {"parts": [{"text": "1. **Arcop** - Lahore"}]},
                "groundingMetadata": {"groundingChunks": [
                    {"maps": {"uri": "https://maps.google.com/?cid=1", "title": "Arcop"}},
                    {"web": {"uri": "https://arcop.pk", "title": "arcop.pk"}}
                ]}
            }]}"#,
        )
        .unwrap();

        let result = adapt_search_result(&response);
        assert_eq!(result.text, "1. **Arcop** - Lahore");
        assert_eq!(result.chunks.len(), 2);
    }

    #[test]
    fn test_adapt_without_metadata() {
        let response: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates": [{"content": {"parts": [{"text": "Nothing grounded"}]}}]}"#,
        )
        .unwrap();
        let result = adapt_search_result(&response);
        assert_eq!(result.text, "Nothing grounded");
        assert!(result.chunks.is_empty());
    }

    #[test]
    fn test_adapt_empty_reply() {
        let result = adapt_search_result(&GenerateContentResponse::default());
        assert_eq!(result, SearchResult::default());
    }

    #[test]
    fn test_web_only_chunk_renders_no_card() {
        let chunks = vec![GroundingChunk {
            web: Some(WebSource {
                uri: "https://example.pk".to_string(),
                title: "Example".to_string(),
            }),
            maps: None,
        }];
        assert!(map_source_cards(&chunks).is_empty());
    }

    #[test]
    fn test_maps_only_chunk_renders_one_card() {
        let chunks = vec![GroundingChunk {
            web: None,
            maps: Some(MapsSource {
                uri: "https://maps.google.com/?cid=7".to_string(),
                title: "Builders Hub".to_string(),
                place_answer_sources: Vec::new(),
            }),
        }];
        let cards = map_source_cards(&chunks);
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].title, "Builders Hub");
        assert!(cards[0].review_snippets.is_empty());
    }

    #[test]
    fn test_unsafe_place_link_is_blanked() {
        let chunks = vec![GroundingChunk {
            web: None,
            maps: Some(MapsSource {
                uri: "javascript:alert(document.cookie)".to_string(),
                title: "Shady Builders".to_string(),
                place_answer_sources: Vec::new(),
            }),
        }];
        let cards = map_source_cards(&chunks);
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].title, "Shady Builders");
        assert_eq!(cards[0].uri, "");
    }
}
