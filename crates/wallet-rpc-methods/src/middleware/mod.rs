//! HTTP middleware: CORS, the admin guard and request metrics.

pub mod admin_guard;
pub mod cors;
pub mod metrics;

pub use admin_guard::AdminGuardLayer;
pub use cors::create_cors_layer;
pub use metrics::{RequestTimer, RpcMetrics};
