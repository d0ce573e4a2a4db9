use axum::{
    extract::{rejection::JsonRejection, State},
    middleware,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;

use crate::config::constants::{DEFAULT_REQUEST_TIMEOUT_SECS, MAX_TEXT_LENGTH};
use crate::error::{NormalizerError, Result};
use crate::logging::{access_log_middleware, request_id_middleware, SlowRequestThreshold};
use crate::models::{GrammarInfoResponse, HealthResponse, NormalizeRequest, NormalizeResponse};
use crate::text_processing::SentenceNormalizer;

// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub normalizer: Arc<SentenceNormalizer>,
    /// Zero disables the timeout layer
    pub request_timeout: Duration,
    pub slow_request_threshold: Duration,
}

impl AppState {
    pub fn new(normalizer: SentenceNormalizer) -> Self {
        Self {
            normalizer: Arc::new(normalizer),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            slow_request_threshold: Duration::from_secs(1),
        }
    }
}

// HTTP Handlers

/// Normalize every cardinal numeral in the request text
async fn normalize_text(
    State(state): State<AppState>,
    payload: std::result::Result<Json<NormalizeRequest>, JsonRejection>,
) -> Result<Json<NormalizeResponse>> {
    let Json(req) = payload.map_err(|e| NormalizerError::InvalidRequest(e.body_text()))?;

    let length = req.text.chars().count();
    if length > MAX_TEXT_LENGTH {
        return Err(NormalizerError::TextTooLong {
            length,
            max: MAX_TEXT_LENGTH,
        });
    }

    tracing::debug!(text_len = length, "Normalize request");

    // Composition is CPU-bound; keep it off the async workers
    let normalizer = Arc::clone(&state.normalizer);
    let outcome = tokio::task::spawn_blocking(move || normalizer.normalize_detailed(&req.text))
        .await
        .map_err(|e| NormalizerError::Unknown(format!("Normalization task failed: {}", e)))?;

    tracing::debug!(
        replaced = outcome.replaced_count(),
        preserved = outcome.preserved_count(),
        "Normalize request completed"
    );

    Ok(Json(NormalizeResponse::from(outcome)))
}

/// Health check endpoint
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Describe the loaded grammar
async fn grammar_info(State(state): State<AppState>) -> Json<GrammarInfoResponse> {
    let grammar = state.normalizer.transducer().grammar();
    Json(GrammarInfoResponse {
        name: grammar.name().to_string(),
        num_states: grammar.fst().num_states(),
        num_transitions: grammar.fst().num_transitions(),
    })
}

pub fn create_router(state: AppState) -> Router<()> {
    // Configure CORS to allow all origins (adjust as needed for production)
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let request_timeout = state.request_timeout;
    let slow_threshold = SlowRequestThreshold(state.slow_request_threshold);

    let router = Router::new()
        .route("/normalize", post(normalize_text))
        .route("/health", get(health_check))
        .route("/grammar", get(grammar_info))
        .with_state(state);

    let router = if request_timeout.is_zero() {
        router
    } else {
        router.layer(TimeoutLayer::new(request_timeout))
    };

    router
        .layer(middleware::from_fn_with_state(
            slow_threshold,
            access_log_middleware,
        ))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fst::Fst;
    use crate::grammar::{CardinalGrammar, GrammarOptions};
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use tower::ServiceExt;

    fn english_state() -> AppState {
        AppState::new(SentenceNormalizer::new(CardinalGrammar::english(
            &GrammarOptions::default(),
        )))
    }

    fn normalize_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/normalize")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_normalize_endpoint() {
        let app = create_router(english_state());

        let response = app
            .oneshot(normalize_request(r#"{"text": "I have 3 dogs and 21 cats."}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["normalized"], "I have three dogs and twenty-one cats.");
        assert_eq!(json["replaced"], 2);
        assert_eq!(json["preserved"], 0);
        assert_eq!(json["substitutions"][1]["start"], 18);
        assert_eq!(json["substitutions"][1]["end"], 20);
    }

    #[tokio::test]
    async fn test_normalize_reports_preserved_numerals() {
        let app = create_router(english_state());

        let response = app
            .oneshot(normalize_request(r#"{"text": "We received 1001 boxes"}"#))
            .await
            .unwrap();

        let json = body_json(response).await;
        assert_eq!(json["normalized"], "We received 1001 boxes");
        assert_eq!(json["replaced"], 0);
        assert_eq!(json["preserved"], 1);
        assert!(json["substitutions"][0]["replacement"].is_null());
    }

    #[tokio::test]
    async fn test_text_too_long_rejected() {
        let app = create_router(english_state());
        let body = serde_json::json!({ "text": "a".repeat(MAX_TEXT_LENGTH + 1) }).to_string();

        let response = app.oneshot(normalize_request(&body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["status"], "error");
        assert!(json["error"].as_str().unwrap().contains("Text too long"));
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let app = create_router(english_state());

        let response = app
            .oneshot(normalize_request(r#"{"sentence": 3}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["status"], "error");
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = create_router(english_state());

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
        let json = body_json(response).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_grammar_endpoint() {
        let grammar = CardinalGrammar::new("mock", Fst::string_map([("7", "seven")])).unwrap();
        let expected_states = grammar.fst().num_states();
        let app = create_router(AppState::new(SentenceNormalizer::new(grammar)));

        let response = app
            .oneshot(Request::builder().uri("/grammar").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let json = body_json(response).await;
        assert_eq!(json["name"], "mock");
        assert_eq!(json["num_states"], expected_states);
    }

    #[tokio::test]
    async fn test_zero_timeout_disables_layer() {
        let mut state = english_state();
        state.request_timeout = Duration::ZERO;
        let app = create_router(state);

        let response = app
            .oneshot(normalize_request(r#"{"text": "5"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["normalized"], "five");
    }
}
