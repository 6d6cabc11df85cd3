pub mod export;
pub mod health;
pub mod suggest;
pub mod themes;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/themes", get(themes::handle_list_themes))
        // Export API
        .route(
            "/api/v1/export/resume",
            post(export::handle_export_resume),
        )
        .route(
            "/api/v1/export/cover-letter",
            post(export::handle_export_cover_letter),
        )
        // Writing assistant
        .route("/api/v1/suggest", post(suggest::handle_suggest))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::raster::SoftwareRasterizer;

    fn test_config() -> Config {
        Config {
            capture_width_px: 320,
            settle_delay_ms: 0,
            ..Config::default()
        }
    }

    fn make_app_with(config: Config) -> Router {
        build_router(AppState::new(
            &config,
            Arc::new(SoftwareRasterizer::new()),
            None,
        ))
    }

    fn make_app() -> Router {
        make_app_with(test_config())
    }

    fn remote_photo_export() -> Request<Body> {
        make_post(
            "/api/v1/export/resume",
            json!({
                "data": {
                    "personalInfo": {
                        "fullName": "Jane Doe",
                        "photo": "https://cdn.example.com/me.jpg"
                    }
                },
                "template": "modern"
            }),
        )
    }

    fn make_post(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn read_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = make_app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(read_json(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_list_themes() {
        let response = make_app()
            .oneshot(Request::get("/api/v1/themes").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let body = read_json(response).await;
        assert_eq!(body["default"], "classic-blue");
        let ids: Vec<&str> = body["themes"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|t| t["id"].as_str())
            .collect();
        assert!(ids.contains(&"ivory"));
    }

    #[tokio::test]
    async fn test_export_resume_returns_attachment() {
        let request = make_post(
            "/api/v1/export/resume",
            json!({
                "data": { "personalInfo": { "fullName": "Jane Doe!" } },
                "theme": "emerald",
                "template": "classic",
                "formatting": { "fontFamily": "eb-garamond", "lineHeight": "relaxed" },
                "darkMode": true,
                "scrollTop": 400.0
            }),
        );
        let response = make_app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"Resume-jane_doe_.pdf\""
        );
        let pages: usize = response.headers()["x-page-count"]
            .to_str()
            .unwrap()
            .parse()
            .unwrap();

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let doc = lopdf::Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), pages);
    }

    #[tokio::test]
    async fn test_export_cover_letter_with_empty_body_uses_default_name() {
        let response = make_app()
            .oneshot(make_post("/api/v1/export/cover-letter", json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"CoverLetter-document.pdf\""
        );
    }

    #[tokio::test]
    async fn test_remote_photo_is_skipped_by_default() {
        let response = make_app().oneshot(remote_photo_export()).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
    }

    #[tokio::test]
    async fn test_strict_images_failure_returns_notice_without_pdf() {
        let app = make_app_with(Config {
            strict_images: true,
            ..test_config()
        });
        let response = app.oneshot(remote_photo_export()).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_ne!(response.headers()[header::CONTENT_TYPE], "application/pdf");
        assert!(response.headers().get(header::CONTENT_DISPOSITION).is_none());
        let body = read_json(response).await;
        assert_eq!(body["error"]["code"], "EXPORT_FAILED");
        assert_eq!(
            body["error"]["message"],
            "Failed to generate PDF. Please try again."
        );
    }

    #[tokio::test]
    async fn test_suggest_unconfigured_is_503() {
        let response = make_app()
            .oneshot(make_post("/api/v1/suggest", json!({ "prompt": "summary" })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(read_json(response).await["error"]["code"], "UNAVAILABLE");
    }
}
