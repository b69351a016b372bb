//! Server-side claim-code hashing.
//!
//! The giveaway contract stores `poseidon_hash_many([short_string(code)])`
//! for every claim code and recomputes it at claim time. This module hosts
//! that computation behind `POST /api/hash-codes` so plaintext codes never
//! reach the chain.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use starknet_crypto::{poseidon_hash_many, Felt};
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{debug, error, info, warn};

use crate::config::AppConfig;
use crate::error::Result;
use crate::felt::{felt_to_hex, string_to_felt};
use crate::types::{ErrorResponse, HashCodesResponse};

/// Commitment stored on-chain for a single claim code.
pub fn hash_claim_code(code: &str) -> Felt {
    poseidon_hash_many(&[string_to_felt(code)])
}

/// Hash a batch of claim codes, preserving order.
pub fn hash_claim_codes<S: AsRef<str>>(codes: &[S]) -> Vec<Felt> {
    codes.iter().map(|code| hash_claim_code(code.as_ref())).collect()
}

#[derive(Debug, Clone)]
pub struct HashServiceState {
    pub max_codes_per_request: usize,
}

impl HashServiceState {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            max_codes_per_request: config.max_codes_per_request,
        }
    }
}

#[derive(Error, Debug)]
pub enum HashServiceError {
    #[error("Invalid request: codes array required")]
    InvalidRequest,

    #[error("Too many codes: {count} (max {max})")]
    TooManyCodes { count: usize, max: usize },
}

impl IntoResponse for HashServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            HashServiceError::InvalidRequest => {
                warn!("Rejected hash request without a codes array");
                StatusCode::BAD_REQUEST
            }
            HashServiceError::TooManyCodes { count, max } => {
                warn!("Rejected hash request with {} codes (max {})", count, max);
                StatusCode::PAYLOAD_TOO_LARGE
            }
        };
        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
                details: None,
            }),
        )
            .into_response()
    }
}

pub fn router(state: HashServiceState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/hash-codes", post(hash_codes))
        .with_state(Arc::new(state))
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({"ok": true}))
}

async fn hash_codes(
    State(state): State<Arc<HashServiceState>>,
    payload: std::result::Result<Json<serde_json::Value>, JsonRejection>,
) -> std::result::Result<Json<HashCodesResponse>, HashServiceError> {
    let Json(body) = payload.map_err(|rejection| {
        debug!("Unreadable hash request body: {}", rejection.body_text());
        HashServiceError::InvalidRequest
    })?;
    let codes: Vec<&str> = body
        .get("codes")
        .and_then(|codes| codes.as_array())
        .and_then(|codes| codes.iter().map(|code| code.as_str()).collect())
        .ok_or(HashServiceError::InvalidRequest)?;

    if codes.len() > state.max_codes_per_request {
        return Err(HashServiceError::TooManyCodes {
            count: codes.len(),
            max: state.max_codes_per_request,
        });
    }

    let hashed_codes: Vec<String> = hash_claim_codes(&codes).iter().map(felt_to_hex).collect();
    debug!("Hashed {} claim codes", hashed_codes.len());

    Ok(Json(HashCodesResponse {
        hashed_codes: Some(hashed_codes),
    }))
}

/// Run the service on an already bound listener.
pub async fn serve_on(listener: TcpListener, state: HashServiceState) -> Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!("Hash service listening on http://{}", addr);
    }
    axum::serve(listener, router(state)).await.map_err(|e| {
        error!("Hash service stopped: {}", e);
        e
    })?;
    Ok(())
}

/// Bind `config.bind_address` and run the service.
pub async fn serve(config: &AppConfig) -> Result<()> {
    let listener = TcpListener::bind(&config.bind_address).await?;
    serve_on(listener, HashServiceState::from_config(config)).await
}
