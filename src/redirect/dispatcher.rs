//! Lookup-then-redirect-or-delegate request handling.
//!
//! # Responsibilities
//! - Resolve the request path against a `PathMapping`
//! - Answer known paths with 308 Permanent Redirect
//! - Hand every other request, untouched, to the fallback service
//!
//! # Design Decisions
//! - The mapping is shared via `Arc` and never mutated, so clones of the
//!   service can run on any number of tasks without locking
//! - Readiness is the fallback's readiness; the redirect branch is always ready
//! - Matching uses the percent-decoded URI path (query string excluded);
//!   a path that does not decode to UTF-8 is matched as received

use std::borrow::Cow;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::http::Request;
use axum::response::{IntoResponse, Redirect, Response};
use futures_util::future::{self, Either, Ready};
use percent_encoding::percent_decode_str;
use tower::{Layer, Service};

use crate::observability::metrics;
use crate::redirect::record::{build_mapping, parse_config, ConfigFormat, ParseError, PathMapping};

/// Request handler that redirects mapped paths and delegates the rest.
#[derive(Debug, Clone)]
pub struct RedirectService<S> {
    mapping: Arc<PathMapping>,
    fallback: S,
}

impl<S> RedirectService<S> {
    pub fn new(mapping: impl Into<Arc<PathMapping>>, fallback: S) -> Self {
        Self {
            mapping: mapping.into(),
            fallback,
        }
    }

    pub fn mapping(&self) -> &PathMapping {
        &self.mapping
    }
}

impl<S, B> Service<Request<B>> for RedirectService<S>
where
    S: Service<Request<B>, Response = Response>,
{
    type Response = Response;
    type Error = S::Error;
    type Future = Either<Ready<Result<Response, S::Error>>, S::Future>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.fallback.poll_ready(cx)
    }

    fn call(&mut self, request: Request<B>) -> Self::Future {
        let redirect = {
            let path = decoded_path(request.uri().path());

            match self.mapping.lookup(&path) {
                Some(target) => {
                    tracing::debug!(path = %path, target = %target, "Redirecting");
                    metrics::record_redirect(&path);
                    Some(Redirect::permanent(target))
                }
                None => {
                    tracing::trace!(path = %path, "No redirect, delegating to fallback");
                    None
                }
            }
        };

        match redirect {
            Some(redirect) => Either::Left(future::ready(Ok(redirect.into_response()))),
            None => {
                metrics::record_fallback();
                Either::Right(self.fallback.call(request))
            }
        }
    }
}

/// Percent-decode a request path, keeping it as received when the decoded
/// bytes are not UTF-8.
fn decoded_path(raw: &str) -> Cow<'_, str> {
    percent_decode_str(raw)
        .decode_utf8()
        .unwrap_or(Cow::Borrowed(raw))
}

/// Wraps an inner service as the fallback of a [`RedirectService`].
#[derive(Debug, Clone)]
pub struct RedirectLayer {
    mapping: Arc<PathMapping>,
}

impl RedirectLayer {
    pub fn new(mapping: impl Into<Arc<PathMapping>>) -> Self {
        Self {
            mapping: mapping.into(),
        }
    }
}

impl<S> Layer<S> for RedirectLayer {
    type Service = RedirectService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RedirectService {
            mapping: Arc::clone(&self.mapping),
            fallback: inner,
        }
    }
}

/// Build a handler over an already-resolved mapping.
pub fn make_handler<S>(mapping: PathMapping, fallback: S) -> RedirectService<S> {
    RedirectService::new(mapping, fallback)
}

/// Parse a redirect document and build a handler over it.
///
/// Nothing is constructed when the document is malformed.
pub fn make_handler_from_config<S>(
    bytes: &[u8],
    format: ConfigFormat,
    fallback: S,
) -> Result<RedirectService<S>, ParseError> {
    let records = parse_config(bytes, format)?;
    Ok(make_handler(build_mapping(records), fallback))
}
