//! Route configuration for the tutor API server.

mod api;
mod internal;

use crate::{
    config::ServerConfig,
    error::{panic_response, ApiError},
    middleware::{CorsLayer, CorsPolicy},
    response::MessageResponse,
    state::AppState,
};
use axum::{http::HeaderName, response::IntoResponse, routing::get, Json, Router};
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Create the main application router.
pub fn create_router(state: AppState, config: &ServerConfig) -> Router {
    let routes = Router::new()
        // API routes, reachable with and without the /api prefix
        .merge(api::router())
        .nest("/api", api::router())
        // Internal routes (health)
        .nest("/internal", internal::router())
        .route("/", get(root_handler))
        .fallback(fallback_handler);

    with_middleware(routes, config).with_state(state)
}

/// Wrap `routes` in the CORS layer and the shared tower-http stack.
fn with_middleware(routes: Router<AppState>, config: &ServerConfig) -> Router<AppState> {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    // Outermost first.
    let common_middleware = ServiceBuilder::new()
        .layer(SetRequestIdLayer::new(request_id.clone(), MakeRequestUuid))
        .layer(PropagateRequestIdLayer::new(request_id))
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(panic_response))
        // The body limit sits inside the timeout: the timeout's 408 needs a
        // `Default` response body, which the limit's body does not provide.
        .layer(RequestBodyLimitLayer::new(config.server.body_limit_bytes))
        .layer(TimeoutLayer::new(config.server.request_timeout()));

    routes
        .layer(CorsLayer::new(CorsPolicy::from_config(&config.cors)))
        .layer(common_middleware)
}

async fn root_handler() -> impl IntoResponse {
    Json(MessageResponse::new("AI tutor API server is running."))
}

async fn fallback_handler() -> ApiError {
    ApiError::NotFound("The requested resource".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    async fn exploding_handler() -> &'static str {
        panic!("template table missing")
    }

    #[tokio::test]
    async fn test_panicking_route_maps_to_processing_error() {
        let config = ServerConfig::default();
        let routes = Router::new().route("/explode", get(exploding_handler));
        let app = with_middleware(routes, &config).with_state(AppState::new(&config));

        let request = Request::builder().uri("/explode").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.headers().contains_key(REQUEST_ID_HEADER));

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "processing_error");
        assert_eq!(
            body["error"]["message"],
            "error while processing request: template table missing"
        );
    }

    #[tokio::test]
    async fn test_oversized_body_is_rejected() {
        let mut config = ServerConfig::default();
        config.server.body_limit_bytes = 16;
        let app = create_router(AppState::new(&config), &config);

        let payload = format!(r#"{{"user_input": "{}"}}"#, "a".repeat(64));
        let request = Request::builder()
            .method("POST")
            .uri("/structure-goals")
            .header("content-type", "application/json")
            .header("content-length", payload.len())
            .body(Body::from(payload))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
