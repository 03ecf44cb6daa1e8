//! HTTP boundary for the ledger host
//!
//! Public functions are invoked with `POST /v1/contract/call`; the caller is
//! identified by the `x-caller` and `x-caller-token` headers. Read-only functions
//! are plain `GET`s under `/v1/contract`.

#![cfg(feature = "server")]

pub mod contract;
pub mod error;
pub mod health;

pub use error::{ApiError, ApiResult};

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::Config;
use crate::host::{CallerAuthenticator, LedgerHost};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub host: Arc<LedgerHost>,
    pub auth: CallerAuthenticator,
}

impl AppState {
    pub fn new(config: Config, host: LedgerHost) -> Self {
        let auth = CallerAuthenticator::new(config.ledger.auth_secret.as_bytes());
        Self {
            config: Arc::new(config),
            host: Arc::new(host),
            auth,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/v1/contract/call", post(contract::call_public))
        .route("/v1/contract/total-supply", get(contract::get_total_supply))
        .route("/v1/contract/name", get(contract::get_name))
        .route("/v1/contract/symbol", get(contract::get_symbol))
        .route("/v1/contract/decimals", get(contract::get_decimals))
        .route("/v1/contract/owner", get(contract::get_owner))
        .route("/v1/contract/token-uri", get(contract::get_token_uri))
        .route("/v1/contract/balance/:holder", get(contract::get_balance))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
        .with_state(state)
}
