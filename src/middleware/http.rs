//! HTTP-level middleware (cross-cutting concerns).
//!
//! Applied to every route, guarded or not.
//!
//! Responsibility:
//! - Request-Id generation + propagation (X-Request-Id)
//! - Access logging / request tracing (TraceLayer), with the request id on the span
//! - Body size limits
//! - Global timeouts

use std::time::Duration;

use axum::Router;
use axum::error_handling::HandleErrorLayer;
use axum::http::{Request, StatusCode, header::HeaderName};
use tower::timeout::TimeoutLayer;
use tower::{BoxError, ServiceBuilder};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Apply HTTP-level middleware to the given Router.
///
/// Limits come from `Config` (`HTTP_TIMEOUT_SECONDS`, `HTTP_BODY_LIMIT_BYTES`).
pub fn apply(router: Router, config: &Config) -> Router {
    let request_id_header = HeaderName::from_static(REQUEST_ID_HEADER);

    let layers = ServiceBuilder::new()
        // Make the service error `Infallible` by converting errors into responses.
        .layer(HandleErrorLayer::new(|err: BoxError| async move {
            if err.is::<tower::timeout::error::Elapsed>() {
                StatusCode::REQUEST_TIMEOUT
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }))
        .layer(SetRequestIdLayer::new(
            request_id_header.clone(),
            MakeRequestUuid,
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header))
        .layer(RequestBodyLimitLayer::new(config.http_body_limit_bytes))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.http_timeout_seconds,
        )))
        .layer(TraceLayer::new_for_http().make_span_with(make_span));

    router.layer(layers)
}

// Access log span; carries the request id set by SetRequestIdLayer.
fn make_span<B>(req: &Request<B>) -> tracing::Span {
    let request_id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-");

    tracing::info_span!(
        "http_request",
        method = %req.method(),
        uri = %req.uri(),
        request_id = %request_id,
    )
}

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;

    use axum::{
        body::Body,
        http::header,
        routing::{get, post},
    };
    use tower::ServiceExt;

    use super::*;
    use crate::config::AppEnv;

    fn config(http_timeout_seconds: u64, http_body_limit_bytes: usize) -> Config {
        Config {
            addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            app_env: AppEnv::Development,
            auth_signing_key: "test-signing-key".to_string(),
            auth_token_leeway_seconds: 0,
            http_timeout_seconds,
            http_body_limit_bytes,
        }
    }

    fn app(config: &Config) -> Router {
        let router = Router::new()
            .route("/echo", post(|body: String| async move { body.len().to_string() }))
            .route(
                "/slow",
                get(|| async {
                    tokio::time::sleep(Duration::from_secs(60)).await;
                    "done"
                }),
            );

        apply(router, config)
    }

    fn post_body(len: usize) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/echo")
            .header(header::CONTENT_LENGTH, len)
            .body(Body::from(vec![b'a'; len]))
            .unwrap()
    }

    #[tokio::test]
    async fn body_within_limit_is_accepted() {
        let res = app(&config(30, 16)).oneshot(post_body(16)).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn body_over_limit_is_rejected_with_413() {
        let res = app(&config(30, 16)).oneshot(post_body(17)).await.unwrap();
        assert_eq!(res.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn slow_handler_times_out_with_408() {
        let req = Request::builder().uri("/slow").body(Body::empty()).unwrap();

        let res = app(&config(1, 1024)).oneshot(req).await.unwrap();

        assert_eq!(res.status(), StatusCode::REQUEST_TIMEOUT);
    }

    #[tokio::test]
    async fn incoming_request_id_is_propagated() {
        let mut req = post_body(4);
        req.headers_mut()
            .insert(REQUEST_ID_HEADER, "req-123".parse().unwrap());

        let res = app(&config(30, 1024)).oneshot(req).await.unwrap();

        assert_eq!(res.headers()[REQUEST_ID_HEADER], "req-123");
    }
}
