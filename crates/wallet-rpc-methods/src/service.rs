//! Wallet RPC service: JSON-RPC and admin HTTP servers.

use crate::adapters::{ApprovalQueue, InMemoryNetworkStore, ProviderController, WalletHooks};
use crate::domain::config::WalletRpcConfig;
use crate::domain::error::{ApiError, ApprovalError, ServiceError};
use crate::domain::methods::MethodTable;
use crate::domain::chain_id::ChainId;
use crate::domain::network::{BuiltinNetworks, NetworkDescriptor};
use crate::middleware::{create_cors_layer, AdminGuardLayer, RpcMetrics};
use crate::ports::HardwareInfoProvider;
use crate::router::{error_response, process_payload, AppState};
use crate::rpc::RpcHandlers;
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde::Deserialize;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinSet;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use uuid::Uuid;

/// Origin reported when the transport supplies none
pub const UNKNOWN_ORIGIN: &str = "unknown";

/// Wallet RPC service
pub struct WalletRpcService {
    config: WalletRpcConfig,
    rpc_handlers: Arc<RpcHandlers>,
    methods: Arc<MethodTable>,
    metrics: Arc<RpcMetrics>,
    hooks: WalletHooks,
}

impl WalletRpcService {
    /// Create the service from config, wallet adapters and a hardware source
    pub fn new(
        config: WalletRpcConfig,
        builtin: Arc<BuiltinNetworks>,
        hooks: WalletHooks,
        hardware: Arc<dyn HardwareInfoProvider>,
    ) -> Result<Self, ServiceError> {
        config
            .validate()
            .map_err(|e| ServiceError::Config(e.to_string()))?;

        let rpc_handlers = Arc::new(RpcHandlers::new(
            &config,
            Arc::new(hooks.clone()),
            hardware,
            builtin,
        ));
        let methods = Arc::new(MethodTable::from_config(&config.methods));

        Ok(Self {
            config,
            rpc_handlers,
            methods,
            metrics: Arc::new(RpcMetrics::new()),
            hooks,
        })
    }

    /// Get metrics
    pub fn metrics(&self) -> Arc<RpcMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Get the approval queue
    pub fn approvals(&self) -> Arc<ApprovalQueue> {
        self.hooks.approvals()
    }

    /// Build HTTP router for JSON-RPC
    pub fn http_router(&self) -> Router {
        let state = AppState {
            rpc_handlers: Arc::clone(&self.rpc_handlers),
            methods: Arc::clone(&self.methods),
            metrics: Arc::clone(&self.metrics),
        };

        let middleware = ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(create_cors_layer(&self.config.cors));

        Router::new()
            .route("/", post(handle_json_rpc))
            .route("/health", get(health_check))
            .layer(middleware)
            .with_state(state)
    }

    /// Build admin router: approvals, networks, metrics.
    ///
    /// Requests carrying an `Origin` or a non-local `Host` are refused.
    pub fn admin_router(&self) -> Router {
        let state = AdminState {
            approvals: self.hooks.approvals(),
            provider: self.hooks.provider(),
            networks: self.hooks.networks(),
            metrics: Arc::clone(&self.metrics),
            methods: Arc::clone(&self.methods),
        };

        Router::new()
            .route("/health", get(health_check))
            .route("/metrics", get(admin_metrics))
            .route("/methods", get(admin_methods))
            .route("/provider", get(admin_provider))
            .route("/networks", get(admin_list_networks).post(admin_add_network))
            .route("/networks/:chain_id", delete(admin_remove_network))
            .route("/approvals", get(admin_list_approvals))
            .route("/approvals/:id/approve", post(admin_approve))
            .route("/approvals/:id/reject", post(admin_reject))
            .layer(AdminGuardLayer::new(&self.config.admin.allowed_hosts))
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }

    /// Run the servers until `shutdown` resolves.
    ///
    /// On shutdown, pending approvals are cancelled so waiting requests
    /// complete before the servers drain.
    pub async fn serve<F>(self, shutdown: F) -> Result<(), ServiceError>
    where
        F: Future<Output = ()> + Send,
    {
        info!("Starting wallet RPC service...");

        let (stop_tx, stop_rx) = watch::channel(false);
        let mut servers = JoinSet::new();

        if self.config.http.enabled {
            let addr = self.config.http_addr();
            let listener = tokio::net::TcpListener::bind(addr)
                .await
                .map_err(|e| ServiceError::Bind(format!("{}: {}", addr, e)))?;
            info!(addr = %addr, "Starting JSON-RPC server");
            let router = self.http_router();
            let stop = wait_for_stop(stop_rx.clone());
            servers.spawn(async move {
                axum::serve(listener, router).with_graceful_shutdown(stop).await
            });
        }

        if self.config.admin.enabled {
            let addr = self.config.admin_addr();
            let listener = tokio::net::TcpListener::bind(addr)
                .await
                .map_err(|e| ServiceError::Bind(format!("{}: {}", addr, e)))?;
            info!(addr = %addr, "Starting admin server");
            let router = self.admin_router();
            let stop = wait_for_stop(stop_rx.clone());
            servers.spawn(async move {
                axum::serve(listener, router).with_graceful_shutdown(stop).await
            });
        }

        info!("Wallet RPC service started");

        tokio::select! {
            _ = shutdown => {
                info!("Received shutdown signal");
            }
            Some(result) = servers.join_next() => {
                log_server_exit(result);
            }
        }

        self.hooks.approvals().cancel_all();
        let _ = stop_tx.send(true);
        while let Some(result) = servers.join_next().await {
            log_server_exit(result);
        }

        info!("Wallet RPC service stopped");
        Ok(())
    }
}

async fn wait_for_stop(mut rx: watch::Receiver<bool>) {
    let _ = rx.wait_for(|stop| *stop).await;
}

fn log_server_exit(result: Result<std::io::Result<()>, tokio::task::JoinError>) {
    match result {
        Ok(Ok(())) => {}
        Ok(Err(e)) => error!(error = %e, "Server error"),
        Err(e) => error!(error = %e, "Server task failed"),
    }
}

/// Handle JSON-RPC request
async fn handle_json_rpc(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> impl IntoResponse {
    let origin = headers
        .get(header::ORIGIN)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .unwrap_or(UNKNOWN_ORIGIN);

    let payload: serde_json::Value = match serde_json::from_str(&body) {
        Ok(v) => v,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(error_response(None, &ApiError::parse_error(e.to_string()))),
            );
        }
    };

    let response = process_payload(&state, origin, &payload).await;
    (StatusCode::OK, Json(response))
}

/// Health check endpoint
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "version": crate::VERSION,
    }))
}

/// Admin router state
#[derive(Clone)]
struct AdminState {
    approvals: Arc<ApprovalQueue>,
    provider: Arc<ProviderController>,
    networks: Arc<InMemoryNetworkStore>,
    metrics: Arc<RpcMetrics>,
    methods: Arc<MethodTable>,
}

async fn admin_metrics(State(state): State<AdminState>) -> impl IntoResponse {
    let mut json = state.metrics.to_json();
    json["approvals"] = serde_json::json!(state.approvals.stats());
    json["approvals"]["pending"] = serde_json::json!(state.approvals.pending_count());
    json["provider"] = serde_json::json!({ "switches": state.provider.switch_count() });
    Json(json)
}

async fn admin_methods(State(state): State<AdminState>) -> impl IntoResponse {
    let methods: Vec<_> = state
        .methods
        .entries()
        .into_iter()
        .map(|(name, info)| {
            serde_json::json!({
                "name": name,
                "hooks": info.hooks.iter().map(|h| h.as_str()).collect::<Vec<_>>(),
                "write": info.is_write,
                "description": info.description,
            })
        })
        .collect();
    Json(methods)
}

async fn admin_provider(State(state): State<AdminState>) -> impl IntoResponse {
    Json(state.provider.snapshot())
}

async fn admin_list_networks(State(state): State<AdminState>) -> impl IntoResponse {
    Json(state.networks.list())
}

async fn admin_add_network(
    State(state): State<AdminState>,
    Json(network): Json<NetworkDescriptor>,
) -> impl IntoResponse {
    let status = match state.networks.upsert(network) {
        Some(_) => StatusCode::OK,
        None => StatusCode::CREATED,
    };
    (status, Json(state.networks.list()))
}

async fn admin_remove_network(
    State(state): State<AdminState>,
    Path(chain_id): Path<String>,
) -> impl IntoResponse {
    let chain_id = match ChainId::parse(&chain_id) {
        Ok(id) => id,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "error": e.to_string() })),
            );
        }
    };

    match state.networks.remove(&chain_id) {
        Some(removed) => (StatusCode::OK, Json(serde_json::json!(removed))),
        None => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": format!("no custom network {}", chain_id) })),
        ),
    }
}

async fn admin_list_approvals(State(state): State<AdminState>) -> impl IntoResponse {
    Json(state.approvals.pending())
}

/// Optional body of an approve call
#[derive(Debug, Default, Deserialize)]
struct ApproveBody {
    /// Descriptor to approve instead of the requested one
    network: Option<NetworkDescriptor>,
}

async fn admin_approve(
    State(state): State<AdminState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let network = if body.is_empty() {
        None
    } else if !is_json(&headers) {
        return (
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Json(serde_json::json!({ "id": id, "error": "expected application/json" })),
        )
            .into_response();
    } else {
        match serde_json::from_slice::<ApproveBody>(&body) {
            Ok(body) => body.network,
            Err(e) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(serde_json::json!({ "id": id, "error": e.to_string() })),
                )
                    .into_response();
            }
        }
    };
    decision_response(id, "approved", state.approvals.approve(id, network)).into_response()
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
}

async fn admin_reject(
    State(state): State<AdminState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    decision_response(id, "rejected", state.approvals.reject(id))
}

fn decision_response(
    id: Uuid,
    decision: &str,
    result: Result<(), ApprovalError>,
) -> (StatusCode, Json<serde_json::Value>) {
    match result {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({ "id": id, "status": decision })),
        ),
        Err(e) => {
            let status = match e {
                ApprovalError::UnknownId(_) => StatusCode::NOT_FOUND,
                ApprovalError::Dropped(_) => StatusCode::GONE,
                ApprovalError::Rejected(_) => StatusCode::CONFLICT,
            };
            (status, Json(serde_json::json!({ "id": id, "error": e.to_string() })))
        }
    }
}
