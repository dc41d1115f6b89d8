// Image reply adapter

use crate::gemini::GenerateContentResponse;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Find the first inline image in the first candidate.
///
/// Every part is scanned, since the model often leads with a text part. The
/// first part carrying inline data is taken as is, even with an empty
/// payload. The payload is always labelled `image/png` regardless of the
/// declared type.
pub fn extract_image_data_uri(response: &GenerateContentResponse) -> Option<String> {
    response
        .parts()
        .iter()
        .find_map(|part| part.inline_data.as_ref())
        .map(|data| format!("data:image/png;base64,{}", data.data))
}

/// Decode a `data:<mime>;base64,<payload>` URI into raw bytes
pub fn decode_data_uri(uri: &str) -> Result<Vec<u8>, String> {
    let rest = uri
        .strip_prefix("data:")
        .ok_or_else(|| "Not a data URI".to_string())?;
    let (_, payload) = rest
        .split_once(";base64,")
        .ok_or_else(|| "Data URI is not base64 encoded".to_string())?;

    STANDARD
        .decode(payload)
        .map_err(|e| format!("Invalid base64 payload: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(json: &str) -> GenerateContentResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_finds_image_after_text_part() {
        let r = response(
            r#"{"candidates": [{"content": {"parts": [
                {"text": "Here is your house"},
                {"inlineData": {"mimeType": "image/jpeg", "data": "AAAA"}}
            ]}}]}"#,
        );
        assert_eq!(
            extract_image_data_uri(&r).as_deref(),
            Some("data:image/png;base64,AAAA")
        );
    }

    #[test]
    fn test_first_image_wins() {
        let r = response(
            r#"{"candidates": [{"content": {"parts": [
                {"inlineData": {"mimeType": "image/png", "data": "Zmlyc3Q="}},
                {"inlineData": {"mimeType": "image/png", "data": "c2Vjb25k"}}
            ]}}]}"#,
        );
        assert_eq!(
            extract_image_data_uri(&r).as_deref(),
            Some("data:image/png;base64,Zmlyc3Q=")
        );
    }

    #[test]
    fn test_first_inline_part_taken_even_when_empty() {
        let r = response(
            r#"{"candidates": [{"content": {"parts": [
                {"inlineData": {"mimeType": "image/png"}},
                {"inlineData": {"mimeType": "image/png", "data": "c2Vjb25k"}}
            ]}}]}"#,
        );
        assert_eq!(
            extract_image_data_uri(&r).as_deref(),
            Some("data:image/png;base64,")
        );
    }

    #[test]
    fn test_text_only_reply_has_no_image() {
        let r = response(r#"{"candidates": [{"content": {"parts": [{"text": "I can't draw that"}]}}]}"#);
        assert!(extract_image_data_uri(&r).is_none());
        assert!(extract_image_data_uri(&response("{}")).is_none());
    }

    #[test]
    fn test_decode_data_uri() {
        assert_eq!(
            decode_data_uri("data:image/png;base64,aGVsbG8=").unwrap(),
            b"hello".to_vec()
        );
        assert!(decode_data_uri("https://example.pk/house.png").is_err());
        assert!(decode_data_uri("data:image/png;base64,***").is_err());
    }
}
