//! CORS middleware layer.

use super::config::{AllowedOrigins, CorsPolicy};
use axum::{
    body::Body,
    http::{header, HeaderMap, HeaderValue, Method, Request, Response, StatusCode},
};
use futures::future::BoxFuture;
use std::task::{Context, Poll};
use tower::{Layer, Service};

/// CORS middleware layer.
#[derive(Clone)]
pub struct CorsLayer {
    policy: CorsPolicy,
}

impl CorsLayer {
    /// Layer applying `policy`.
    pub fn new(policy: CorsPolicy) -> Self {
        Self { policy }
    }
}

impl<S> Layer<S> for CorsLayer {
    type Service = CorsMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        CorsMiddleware {
            inner,
            policy: self.policy.clone(),
        }
    }
}

/// Service produced by [`CorsLayer`].
#[derive(Clone)]
pub struct CorsMiddleware<S> {
    inner: S,
    policy: CorsPolicy,
}

impl<S> Service<Request<Body>> for CorsMiddleware<S>
where
    S: Service<Request<Body>, Response = Response<Body>> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let policy = self.policy.clone();
        // Take the service that was driven to readiness.
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        Box::pin(async move {
            let origin = req
                .headers()
                .get(header::ORIGIN)
                .and_then(|v| v.to_str().ok())
                .map(String::from);

            let is_preflight = req.method() == Method::OPTIONS
                && req.headers().contains_key(header::ACCESS_CONTROL_REQUEST_METHOD);

            if is_preflight {
                return Ok(handle_preflight(&policy, origin.as_deref(), req.headers()));
            }

            let mut response = inner.call(req).await?;
            add_cors_headers(response.headers_mut(), &policy, origin.as_deref());

            Ok(response)
        })
    }
}

fn handle_preflight(
    policy: &CorsPolicy,
    origin: Option<&str>,
    request_headers: &HeaderMap,
) -> Response<Body> {
    let mut response = Response::new(Body::empty());
    *response.status_mut() = StatusCode::NO_CONTENT;

    let Some(origin) = origin.filter(|o| policy.is_origin_allowed(o)) else {
        return response;
    };

    let headers = response.headers_mut();
    add_cors_headers(headers, policy, Some(origin));

    if let Ok(methods) = HeaderValue::from_str(&policy.methods_header_value()) {
        headers.insert(header::ACCESS_CONTROL_ALLOW_METHODS, methods);
    }

    let requested = request_headers
        .get(header::ACCESS_CONTROL_REQUEST_HEADERS)
        .and_then(|v| v.to_str().ok());
    if let Some(value) = policy
        .allowed_headers
        .to_header_value(requested)
        .and_then(|v| HeaderValue::from_str(&v).ok())
    {
        headers.insert(header::ACCESS_CONTROL_ALLOW_HEADERS, value);
    }

    if let Some(max_age) = policy.max_age {
        headers.insert(header::ACCESS_CONTROL_MAX_AGE, HeaderValue::from(max_age.as_secs()));
    }

    response
}

fn add_cors_headers(headers: &mut HeaderMap, policy: &CorsPolicy, origin: Option<&str>) {
    let Some(origin) = origin.filter(|o| policy.is_origin_allowed(o)) else {
        return;
    };

    // Credentialed requests need the concrete origin echoed back, never `*`.
    if matches!(policy.allowed_origins, AllowedOrigins::Any) && !policy.allow_credentials {
        headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    } else if let Ok(value) = HeaderValue::from_str(origin) {
        headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, value);
        headers.append(header::VARY, HeaderValue::from_static("Origin"));
    }

    if policy.allow_credentials {
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
            HeaderValue::from_static("true"),
        );
    }
}
