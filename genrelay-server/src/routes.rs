//! HTTP surface of the relay
//!
//! One core resource (`POST /api/generate`), a liveness probe, and the
//! read-only idioms lookup endpoints backed by a static JSON file. Every
//! handler produces a response; provider failures are translated to the
//! classified status with a JSON `{ error, details? }` body.

use axum::extract::{DefaultBodyLimit, Path, State};
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use genrelay_core::protocol::GenerationRequest;
use genrelay_core::providers::ProviderError;
use genrelay_core::relay::Relay;
use serde::Serialize;
use serde_json::Value;
use std::path::{Path as FsPath, PathBuf};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::error;

/// Inbound request body cap (5 MiB)
pub const BODY_LIMIT: usize = 5 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<Relay>,
    pub idioms_path: PathBuf,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(liveness))
        .route("/api/generate", post(generate))
        .route("/api/idioms", get(idioms))
        .route("/api/idioms/:category", get(idioms_category))
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST]),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Client-facing error: classified status plus `{ error, details? }` body.
struct ApiError {
    status: StatusCode,
    message: String,
    details: Option<Value>,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            details: None,
        }
    }
}

impl From<ProviderError> for ApiError {
    fn from(err: ProviderError) -> Self {
        let status = StatusCode::from_u16(err.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        Self {
            status,
            message: err.to_string(),
            details: err.details().cloned(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut body = serde_json::json!({ "error": self.message });
        if let Some(details) = self.details {
            body["details"] = details;
        }
        (self.status, Json(body)).into_response()
    }
}

async fn liveness() -> &'static str {
    "GenRelay server (idioms support) is running!"
}

#[derive(Serialize)]
struct GenerateResponse {
    result: String,
    raw: Value,
}

async fn generate(
    State(state): State<AppState>,
    Json(request): Json<GenerationRequest>,
) -> Result<Json<GenerateResponse>, ApiError> {
    if !state.relay.is_configured() {
        return Err(ApiError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "server not configured",
        ));
    }

    if request.prompt.trim().is_empty() {
        return Err(ApiError::new(StatusCode::BAD_REQUEST, "Prompt is required"));
    }

    let result = state.relay.generate(&request).await?;
    Ok(Json(GenerateResponse {
        result: result.text,
        raw: result.raw,
    }))
}

async fn idioms(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    match read_idioms(&state.idioms_path) {
        Some(data) => Ok(Json(data)),
        None => Err(ApiError::new(StatusCode::NOT_FOUND, "Idioms data not found")),
    }
}

async fn idioms_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let data = read_idioms(&state.idioms_path).ok_or_else(|| {
        ApiError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to load idioms data",
        )
    })?;

    match data.get(&category) {
        Some(entry) => Ok(Json(entry.clone())),
        None => Err(ApiError::new(
            StatusCode::NOT_FOUND,
            format!("Category not found: {}", category),
        )),
    }
}

/// Read and parse the idioms file; re-read on every request, no caching.
fn read_idioms(path: &FsPath) -> Option<Value> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(_) => return None,
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            error!(path = %path.display(), error = %e, "idioms file is not valid JSON");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use genrelay_core::config::RelayConfig;
    use genrelay_core::providers::{ProviderKind, RetryPolicy};
    use serde_json::json;
    use std::io::Write;
    use tower::ServiceExt;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_state(base_url: Option<String>, api_key: Option<&str>, idioms: PathBuf) -> AppState {
        let mut config = RelayConfig::for_provider(ProviderKind::Groq).with_retry(RetryPolicy {
            max_attempts: 3,
            base_delay_ms: 1,
            max_delay_ms: 2,
        });
        if let Some(url) = base_url {
            config = config.with_base_url(url);
        }
        if let Some(key) = api_key {
            config = config.with_api_key(key);
        }
        AppState {
            relay: Arc::new(Relay::from_config(&config).unwrap()),
            idioms_path: idioms,
        }
    }

    fn post_generate(body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/generate")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn liveness_responds() {
        let app = router(test_state(None, Some("k"), PathBuf::from("missing.json")));
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn empty_prompt_is_400_with_zero_outbound_calls() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let app = router(test_state(
            Some(server.uri()),
            Some("k"),
            PathBuf::from("missing.json"),
        ));

        for body in [json!({}), json!({ "prompt": "" }), json!({ "prompt": "   " })] {
            let response = app.clone().oneshot(post_generate(body)).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            assert_eq!(body_json(response).await, json!({ "error": "Prompt is required" }));
        }
    }

    #[tokio::test]
    async fn missing_api_key_is_500_with_zero_outbound_calls() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let app = router(test_state(Some(server.uri()), None, PathBuf::from("missing.json")));
        let response = app
            .oneshot(post_generate(json!({ "prompt": "hello" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await, json!({ "error": "server not configured" }));
    }

    #[tokio::test]
    async fn successful_generation_returns_result_and_raw() {
        let server = MockServer::start().await;
        let provider_payload = json!({
            "choices": [ { "message": { "role": "assistant", "content": "Bonjour" } } ]
        });
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(provider_payload.clone()))
            .expect(1)
            .mount(&server)
            .await;

        let app = router(test_state(Some(server.uri()), Some("k"), PathBuf::from("missing.json")));
        let response = app
            .oneshot(post_generate(json!({ "prompt": "Translate 'hello' to French" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({ "result": "Bonjour", "raw": provider_payload })
        );
    }

    #[tokio::test]
    async fn provider_failure_maps_to_classified_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "error": { "message": "Invalid API Key" }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let app = router(test_state(Some(server.uri()), Some("bad"), PathBuf::from("missing.json")));
        let response = app
            .oneshot(post_generate(json!({ "prompt": "hi" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Invalid API Key");
        assert_eq!(body["details"]["error"]["message"], "Invalid API Key");
    }

    fn write_idioms_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn idioms_listing_and_category_lookup() {
        let file = write_idioms_file(
            r#"{ "idioms_Money": [ { "idiom": "break the bank" } ], "idioms_Time": [] }"#,
        );
        let app = router(test_state(None, Some("k"), file.path().to_path_buf()));

        let all = app
            .clone()
            .oneshot(Request::builder().uri("/api/idioms").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(all.status(), StatusCode::OK);
        assert!(body_json(all).await.get("idioms_Money").is_some());

        let category = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/idioms/idioms_Money")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(category.status(), StatusCode::OK);
        assert_eq!(body_json(category).await, json!([ { "idiom": "break the bank" } ]));

        let missing = app
            .oneshot(
                Request::builder()
                    .uri("/api/idioms/idioms_Nope")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_json(missing).await,
            json!({ "error": "Category not found: idioms_Nope" })
        );
    }

    #[tokio::test]
    async fn missing_idioms_file_statuses() {
        let app = router(test_state(None, Some("k"), PathBuf::from("does-not-exist.json")));

        let listing = app
            .clone()
            .oneshot(Request::builder().uri("/api/idioms").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(listing.status(), StatusCode::NOT_FOUND);

        // Category lookup with no data file reports a server-side failure
        let category = app
            .oneshot(
                Request::builder()
                    .uri("/api/idioms/idioms_Money")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(category.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
