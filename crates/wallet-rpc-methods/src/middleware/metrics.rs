//! Request counters, exported as JSON on the admin server.

use crate::domain::methods::MethodKind;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Wallet RPC metrics
#[derive(Default)]
pub struct RpcMetrics {
    // Request counters
    pub requests_total: AtomicU64,
    pub requests_success: AtomicU64,
    pub requests_error: AtomicU64,
    pub requests_unknown_method: AtomicU64,

    // Per-method counters
    pub switch_chain_requests: AtomicU64,
    pub fingerprint_requests: AtomicU64,
    pub fingerprint_failures: AtomicU64,

    // Latency tracking (simplified)
    pub total_latency_ms: AtomicU64,
    pub request_count_for_latency: AtomicU64,
}

impl RpcMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a request
    pub fn record_request(&self, method: Option<MethodKind>, success: bool, latency_ms: u64) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);

        if success {
            self.requests_success.fetch_add(1, Ordering::Relaxed);
        } else {
            self.requests_error.fetch_add(1, Ordering::Relaxed);
        }

        match method {
            Some(MethodKind::SwitchEthereumChain) => {
                self.switch_chain_requests.fetch_add(1, Ordering::Relaxed);
            }
            Some(MethodKind::GetSystemFingerprint) => {
                self.fingerprint_requests.fetch_add(1, Ordering::Relaxed);
            }
            None => {
                self.requests_unknown_method.fetch_add(1, Ordering::Relaxed);
            }
        }

        self.total_latency_ms.fetch_add(latency_ms, Ordering::Relaxed);
        self.request_count_for_latency.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a fingerprint request that fell back to the sentinel
    pub fn record_fingerprint_failure(&self) {
        self.fingerprint_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Get average latency in ms
    pub fn average_latency_ms(&self) -> f64 {
        let total = self.total_latency_ms.load(Ordering::Relaxed);
        let count = self.request_count_for_latency.load(Ordering::Relaxed);
        if count == 0 {
            0.0
        } else {
            total as f64 / count as f64
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "requests": {
                "total": self.requests_total.load(Ordering::Relaxed),
                "success": self.requests_success.load(Ordering::Relaxed),
                "error": self.requests_error.load(Ordering::Relaxed),
                "unknown_method": self.requests_unknown_method.load(Ordering::Relaxed),
            },
            "methods": {
                "switch_chain": self.switch_chain_requests.load(Ordering::Relaxed),
                "fingerprint": self.fingerprint_requests.load(Ordering::Relaxed),
                "fingerprint_failures": self.fingerprint_failures.load(Ordering::Relaxed),
            },
            "latency": {
                "average_ms": self.average_latency_ms(),
            }
        })
    }
}

/// Request timing helper
pub struct RequestTimer {
    start: Instant,
    metrics: Arc<RpcMetrics>,
    method: Option<MethodKind>,
}

impl RequestTimer {
    pub fn new(metrics: Arc<RpcMetrics>, method: Option<MethodKind>) -> Self {
        Self {
            start: Instant::now(),
            metrics,
            method,
        }
    }

    pub fn finish(self, success: bool) {
        let latency_ms = self.start.elapsed().as_millis() as u64;
        self.metrics.record_request(self.method, success, latency_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_recording() {
        let metrics = RpcMetrics::new();

        metrics.record_request(Some(MethodKind::SwitchEthereumChain), true, 100);
        metrics.record_request(Some(MethodKind::GetSystemFingerprint), true, 200);
        metrics.record_request(None, false, 50);

        assert_eq!(metrics.requests_total.load(Ordering::Relaxed), 3);
        assert_eq!(metrics.requests_success.load(Ordering::Relaxed), 2);
        assert_eq!(metrics.requests_error.load(Ordering::Relaxed), 1);
        assert_eq!(metrics.requests_unknown_method.load(Ordering::Relaxed), 1);
        assert_eq!(metrics.switch_chain_requests.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_average_latency() {
        let metrics = RpcMetrics::new();
        assert_eq!(metrics.average_latency_ms(), 0.0);

        metrics.record_request(None, true, 100);
        metrics.record_request(None, true, 300);

        assert!((metrics.average_latency_ms() - 200.0).abs() < 0.01);
    }

    #[test]
    fn test_timer_records() {
        let metrics = Arc::new(RpcMetrics::new());
        RequestTimer::new(Arc::clone(&metrics), Some(MethodKind::GetSystemFingerprint)).finish(true);

        let json = metrics.to_json();
        assert_eq!(json["requests"]["total"], 1);
        assert_eq!(json["methods"]["fingerprint"], 1);
    }
}
