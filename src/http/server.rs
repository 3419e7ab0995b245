//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with the redirect dispatcher as root handler
//! - Wire up middleware (tracing, timeout, request ID)
//! - Bind server to listener and shut down gracefully

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use axum::{extract::State, handler::Handler, Router};
use tokio::net::TcpListener;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServerConfig;
use crate::redirect::{make_handler, PathMapping};

/// HTTP server answering every path with a redirect or the fallback.
pub struct HttpServer {
    router: Router,
    redirects: usize,
}

impl HttpServer {
    /// Create a new HTTP server over an already-resolved mapping.
    pub fn new(config: &ServerConfig, mapping: PathMapping) -> Self {
        let redirects = mapping.len();
        let router = Self::build_router(config, mapping);
        Self { router, redirects }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServerConfig, mapping: PathMapping) -> Router {
        let message: Arc<str> = Arc::from(config.fallback.message.as_str());
        let fallback = default_handler.with_state(message);

        Router::new()
            .fallback_service(make_handler(mapping, fallback))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// The assembled router, for embedding or in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` resolves.
    pub async fn run<F>(self, listener: TcpListener, shutdown: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            redirects = self.redirects,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Fallback for unmapped paths.
async fn default_handler(State(message): State<Arc<str>>) -> String {
    message.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::redirect::PathRecord;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    fn server() -> HttpServer {
        let mapping = PathMapping::from_iter([PathRecord::new(
            "/urlshort",
            "https://github.com/gophercises/urlshort",
        )]);
        HttpServer::new(&ServerConfig::default(), mapping)
    }

    fn get(path: &str) -> Request<Body> {
        Request::builder().uri(path).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_router_redirects() {
        let response = server().router().oneshot(get("/urlshort")).await.unwrap();

        assert_eq!(response.status(), StatusCode::PERMANENT_REDIRECT);
        assert_eq!(
            response.headers()[header::LOCATION],
            "https://github.com/gophercises/urlshort"
        );
        assert!(response.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn test_router_falls_back_with_message() {
        let response = server().router().oneshot(get("/missing")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"Hello, world!");
    }

    #[tokio::test]
    async fn test_request_id_is_propagated() {
        let request = Request::builder()
            .uri("/missing")
            .header("x-request-id", "abc-123")
            .body(Body::empty())
            .unwrap();

        let response = server().router().oneshot(request).await.unwrap();
        assert_eq!(response.headers()["x-request-id"], "abc-123");
    }
}
