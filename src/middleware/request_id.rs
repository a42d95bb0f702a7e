use std::convert::Infallible;

use axum::{
    async_trait,
    body::Body,
    extract::{FromRequestParts, Request},
    http::{request::Parts, HeaderMap, HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

/// Header carrying the correlation id in both directions
pub static REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Correlation id of one recommendation request.
///
/// Clients may pass their own UUID so a playlist submission can be traced
/// across services; anything else is replaced by a fresh v4 id.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RequestId(pub Uuid);

impl RequestId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_headers(headers: &HeaderMap) -> Self {
        headers
            .get(&REQUEST_ID_HEADER)
            .and_then(|h| h.to_str().ok())
            .and_then(|s| Uuid::parse_str(s.trim()).ok())
            .map(RequestId)
            .unwrap_or_else(RequestId::generate)
    }

    fn header_value(&self) -> Option<HeaderValue> {
        let mut buf = Uuid::encode_buffer();
        HeaderValue::from_str(self.0.hyphenated().encode_lower(&mut buf)).ok()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

/// Lets handlers take `RequestId` directly; outside the middleware a fresh id
/// is generated.
#[async_trait]
impl<S> FromRequestParts<S> for RequestId
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<RequestId>()
            .copied()
            .unwrap_or_else(RequestId::generate))
    }
}

/// Assigns the request id before tracing starts and echoes it on the response
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let request_id = RequestId::from_headers(request.headers());
    request.extensions_mut().insert(request_id);

    let mut response = next.run(request).await;
    if let Some(value) = request_id.header_value() {
        response
            .headers_mut()
            .insert(REQUEST_ID_HEADER.clone(), value);
    }
    response
}

pub fn make_span_with_request_id(request: &Request<Body>) -> tracing::Span {
    let span = tracing::info_span!(
        "http_request",
        method = %request.method(),
        path = %request.uri().path(),
        request_id = tracing::field::Empty,
    );
    if let Some(id) = request.extensions().get::<RequestId>() {
        span.record("request_id", tracing::field::display(id));
    }
    span
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_with(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID_HEADER.clone(), HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn test_reuses_client_uuid() {
        let id = RequestId::from_headers(&headers_with("6f1c1a5e-7a4e-4c8b-9d7f-1f0a2b3c4d5e"));
        assert_eq!(id.to_string(), "6f1c1a5e-7a4e-4c8b-9d7f-1f0a2b3c4d5e");
        assert_eq!(
            id.header_value().unwrap(),
            "6f1c1a5e-7a4e-4c8b-9d7f-1f0a2b3c4d5e"
        );
    }

    #[test]
    fn test_replaces_malformed_or_missing_id() {
        let generated = RequestId::from_headers(&headers_with("playlist-42"));
        assert_ne!(generated.0, Uuid::nil());
        assert_ne!(RequestId::from_headers(&HeaderMap::new()), generated);
    }

    #[test]
    fn test_extractor_reads_extension() {
        let id = RequestId::generate();
        let (mut parts, _) = axum::http::Request::builder()
            .body(Body::empty())
            .unwrap()
            .into_parts();
        parts.extensions.insert(id);

        let extracted =
            tokio_test::block_on(RequestId::from_request_parts(&mut parts, &())).unwrap();
        assert_eq!(extracted, id);
    }
}
