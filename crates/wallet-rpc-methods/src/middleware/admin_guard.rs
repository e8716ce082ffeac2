//! Admin server guard.
//!
//! The admin API decides approvals, so it only answers requests that could
//! not have come from a web page: no `Origin` header, and a `Host` that is
//! loopback or explicitly configured (defeats DNS rebinding).

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::net::IpAddr;
use std::sync::Arc;
use tower::{Layer, Service};
use tracing::warn;

/// Layer rejecting browser-originated or rebound admin requests
#[derive(Clone)]
pub struct AdminGuardLayer {
    allowed_hosts: Arc<Vec<String>>,
}

impl AdminGuardLayer {
    /// Loopback hosts are always allowed; `allowed_hosts` adds names or
    /// addresses the admin server is reachable under.
    pub fn new(allowed_hosts: &[String]) -> Self {
        Self {
            allowed_hosts: Arc::new(
                allowed_hosts
                    .iter()
                    .map(|h| h.to_ascii_lowercase())
                    .collect(),
            ),
        }
    }
}

impl<S> Layer<S> for AdminGuardLayer {
    type Service = AdminGuardService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        AdminGuardService {
            inner,
            allowed_hosts: Arc::clone(&self.allowed_hosts),
        }
    }
}

/// Admin guard service
#[derive(Clone)]
pub struct AdminGuardService<S> {
    inner: S,
    allowed_hosts: Arc<Vec<String>>,
}

impl<S> Service<Request<Body>> for AdminGuardService<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        if let Some(reason) = rejection(&req, &self.allowed_hosts) {
            warn!(
                path = %req.uri().path(),
                origin = ?req.headers().get(header::ORIGIN),
                host = ?req.headers().get(header::HOST),
                reason,
                "Rejected admin request"
            );
            let response = (
                StatusCode::FORBIDDEN,
                Json(serde_json::json!({ "error": reason })),
            )
                .into_response();
            return Box::pin(async move { Ok(response) });
        }

        let mut inner = self.inner.clone();
        Box::pin(async move { inner.call(req).await })
    }
}

fn rejection(req: &Request<Body>, allowed_hosts: &[String]) -> Option<&'static str> {
    if req.headers().contains_key(header::ORIGIN) {
        return Some("cross-origin requests are not allowed");
    }

    let host = req
        .headers()
        .get(header::HOST)
        .and_then(|v| v.to_str().ok());
    match host {
        Some(host) if is_allowed_host(host, allowed_hosts) => None,
        Some(_) => Some("host not allowed"),
        None => Some("missing host header"),
    }
}

/// Host header without its port (`[::1]:8080` -> `[::1]`)
fn host_name(host: &str) -> &str {
    if host.starts_with('[') {
        return match host.find(']') {
            Some(end) => &host[..=end],
            None => host,
        };
    }
    host.split_once(':').map_or(host, |(name, _)| name)
}

fn is_allowed_host(host: &str, allowed_hosts: &[String]) -> bool {
    let name = host_name(host.trim()).to_ascii_lowercase();
    if name == "localhost" {
        return true;
    }

    let bare = name.trim_start_matches('[').trim_end_matches(']');
    if let Ok(ip) = bare.parse::<IpAddr>() {
        if ip.is_loopback() {
            return true;
        }
    }

    allowed_hosts
        .iter()
        .any(|allowed| allowed == &name || allowed == bare)
}
