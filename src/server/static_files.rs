//! Static file serving for the embedded browser frontend
//!
//! Uses rust-embed to bundle the dist/ folder into the binary.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::{IntoResponse, Response},
};
use rust_embed::Embed;

/// Embedded frontend assets from the dist/ folder
#[derive(Embed)]
#[folder = "dist/"]
struct FrontendAssets;

/// Serve embedded static files
/// Returns the file if found, or falls back to index.html for SPA routing
pub async fn serve_static(req: Request<Body>) -> Response {
    let path = req.uri().path().trim_start_matches('/');
    let path = if path.is_empty() { "index.html" } else { path };

    if let Some(response) = serve_file(path) {
        return response;
    }

    // For SPA routing, serve index.html for non-asset paths
    if !path.contains('.') || path.ends_with(".html") {
        if let Some(response) = serve_file("index.html") {
            return response;
        }
    }

    (StatusCode::NOT_FOUND, "Not found").into_response()
}

/// Serve a specific file from embedded assets
fn serve_file(path: &str) -> Option<Response> {
    let file = FrontendAssets::get(path)?;

    let mime_type = mime_guess::from_path(path)
        .first_or_octet_stream()
        .to_string();

    let cache_control = if path.ends_with(".js") || path.ends_with(".css") {
        "public, max-age=3600"
    } else {
        // HTML and other files should be revalidated
        "public, max-age=0, must-revalidate"
    };

    Some(
        (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, mime_type),
                (header::CACHE_CONTROL, cache_control.to_string()),
            ],
            file.data.into_owned(),
        )
            .into_response(),
    )
}

/// Check if frontend assets are embedded (i.e., dist/ was present at compile time)
pub fn has_embedded_frontend() -> bool {
    FrontendAssets::get("index.html").is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_is_embedded() {
        assert!(has_embedded_frontend());
    }

    #[tokio::test]
    async fn test_unknown_route_falls_back_to_index() {
        let req = Request::builder()
            .uri("/estimate")
            .body(Body::empty())
            .unwrap();
        let response = serve_static(req).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/html"
        );
    }

    #[tokio::test]
    async fn test_missing_asset_is_404() {
        let req = Request::builder()
            .uri("/missing.png")
            .body(Body::empty())
            .unwrap();
        assert_eq!(serve_static(req).await.status(), StatusCode::NOT_FOUND);
    }
}
