use std::fmt;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::Extension;
use colored::Colorize as _;
use hyper::{Method, StatusCode, Uri, Version};

#[derive(Clone, Default)]
pub struct RequestId(Arc<AtomicU64>);

impl RequestId {
    pub fn new() -> RequestId {
        RequestId::default()
    }

    pub fn next(&mut self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst)
    }
}

/// Request line details, attached to responses for the access log.
#[derive(Clone)]
pub struct TracingInfo {
    pub peer: Option<SocketAddr>,
    pub method: Method,
    pub version: Version,
    pub uri: Uri,
}

impl TracingInfo {
    /// Remote address, or `-` when the connection info is unknown.
    pub fn peer(&self) -> String {
        self.peer
            .map(|addr| addr.to_string())
            .unwrap_or_else(|| String::from("-"))
    }
}

pub struct ColoredStatus(pub StatusCode);

impl fmt::Display for ColoredStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = self.0.to_string();

        match self.0.as_u16() {
            200..=299 => write!(f, "{}", status.green()),
            300..=399 => write!(f, "{}", status.blue()),
            400..=499 => write!(f, "{}", status.red()),
            _ => write!(f, "{}", status.yellow()),
        }
    }
}

pub async fn tracing_middleware(request: Request<Body>, next: Next) -> impl IntoResponse {
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);

    let tracing_info = TracingInfo {
        peer,
        method: request.method().clone(),
        version: request.version(),
        uri: request.uri().clone(),
    };

    let response = next.run(request).await;

    (Extension(tracing_info), response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_id_increments() {
        let mut id = RequestId::new();
        let mut other = id.clone();

        assert_eq!(id.next(), 0);
        assert_eq!(other.next(), 1);
        assert_eq!(id.next(), 2);
    }

    #[test]
    fn test_colored_status_keeps_code() {
        colored::control::set_override(false);

        assert_eq!(ColoredStatus(StatusCode::CREATED).to_string(), "201 Created");
        assert_eq!(ColoredStatus(StatusCode::NOT_FOUND).to_string(), "404 Not Found");
    }
}
