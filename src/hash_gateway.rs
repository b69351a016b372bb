use reqwest::Client;
use starknet_crypto::Felt;
use std::time::Duration;
use tracing::{debug, error, info};
use url::Url;

use crate::config::AppConfig;
use crate::error::{GiveawayError, Result};
use crate::felt::{hex_to_felt, try_string_to_felt};
use crate::types::{HashCodesRequest, HashCodesResponse};

/// Client for the trusted claim-code hashing service
///
/// Claim codes are sent once, as a single batch, and only the Poseidon
/// commitments come back. Nothing here retries; a failed batch is a failed
/// giveaway creation.
#[derive(Debug, Clone)]
pub struct HashGatewayClient {
    client: Client,
    endpoint: Url,
}

impl HashGatewayClient {
    /// Create a client for the hashing endpoint at `endpoint`
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self> {
        let endpoint = Url::parse(endpoint)?;
        let client = Client::builder()
            .timeout(timeout)
            .user_agent("giveaway-codec/0.1.0")
            .build()?;

        Ok(Self { client, endpoint })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::new(&config.hash_gateway_url, config.request_timeout())
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Hash claim codes; output index `i` is the commitment for input index `i`.
    ///
    /// Every code is validated as a short string before anything is sent.
    pub async fn hash_claim_codes<S: AsRef<str>>(&self, codes: &[S]) -> Result<Vec<Felt>> {
        let mut plain = Vec::with_capacity(codes.len());
        for (index, code) in codes.iter().enumerate() {
            let code = code.as_ref();
            if code.is_empty() {
                return Err(GiveawayError::InvalidGiveaway(format!(
                    "claim code at index {} is empty",
                    index
                )));
            }
            try_string_to_felt(code)?;
            plain.push(code.to_string());
        }

        debug!("Hashing {} claim codes via {}", plain.len(), self.endpoint);

        let request = HashCodesRequest { codes: plain };
        let response = self
            .client
            .post(self.endpoint.clone())
            .header("Accept", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!("Hash service request failed: {}", e);
                GiveawayError::HashServiceUnavailable(e.to_string())
            })?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|e| GiveawayError::HashServiceUnavailable(e.to_string()))?;

        if !status.is_success() {
            error!("Hash service error: {} - {}", status, response_text);
            return Err(GiveawayError::HashServiceUnavailable(format!(
                "HTTP {}: {}",
                status, response_text
            )));
        }

        let body: HashCodesResponse = serde_json::from_str(&response_text).map_err(|e| {
            GiveawayError::HashServiceUnavailable(format!("malformed response: {}", e))
        })?;

        let hashed_codes = body.hashed_codes.ok_or_else(|| {
            GiveawayError::HashServiceUnavailable("response is missing hashedCodes".to_string())
        })?;

        if hashed_codes.len() != request.codes.len() {
            return Err(GiveawayError::HashServiceUnavailable(format!(
                "expected {} hashes, got {}",
                request.codes.len(),
                hashed_codes.len()
            )));
        }

        let hashes = hashed_codes
            .iter()
            .map(|hash| {
                hex_to_felt(hash).map_err(|_| {
                    GiveawayError::HashServiceUnavailable(format!("invalid hash in response: {}", hash))
                })
            })
            .collect::<Result<Vec<Felt>>>()?;

        info!("Received {} claim-code hashes", hashes.len());
        Ok(hashes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash_service::{self, hash_claim_code, HashServiceState};
    use axum::{routing::post, Json, Router};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::net::TcpListener;
    use tokio_test::assert_err;

    async fn spawn_router(router: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, router).await });
        format!("http://{}/api/hash-codes", addr)
    }

    async fn spawn_service() -> String {
        spawn_router(hash_service::router(HashServiceState {
            max_codes_per_request: 100,
        }))
        .await
    }

    fn client(endpoint: &str) -> HashGatewayClient {
        HashGatewayClient::new(endpoint, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_hashes_follow_input_order() {
        let endpoint = spawn_service().await;
        let gateway = client(&endpoint);

        let hashes = gateway.hash_claim_codes(&["A", "B", "C"]).await.unwrap();
        assert_eq!(
            hashes,
            vec![hash_claim_code("A"), hash_claim_code("B"), hash_claim_code("C")]
        );

        let again = gateway.hash_claim_codes(&["A", "B", "C"]).await.unwrap();
        assert_eq!(hashes, again);

        let reversed = gateway.hash_claim_codes(&["C", "B", "A"]).await.unwrap();
        assert_eq!(reversed[0], hashes[2]);
        assert_eq!(reversed[2], hashes[0]);
    }

    #[tokio::test]
    async fn test_one_request_per_batch() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let router = Router::new().route(
            "/api/hash-codes",
            post(move |Json(body): Json<HashCodesRequest>| {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    let hashed: Vec<String> = hash_service::hash_claim_codes(&body.codes)
                        .iter()
                        .map(|h| h.to_hex_string())
                        .collect();
                    Json(HashCodesResponse {
                        hashed_codes: Some(hashed),
                    })
                }
            }),
        );
        let endpoint = spawn_router(router).await;

        let codes: Vec<String> = (0..25).map(|i| format!("STRK-{:08}", i)).collect();
        let hashes = client(&endpoint).hash_claim_codes(&codes).await.unwrap();
        assert_eq!(hashes.len(), 25);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_invalid_codes_rejected_before_network() {
        // Nothing listens here; validation must fail first
        let gateway = client("http://127.0.0.1:9/api/hash-codes");

        let too_long = "X".repeat(32);
        let result = gateway.hash_claim_codes(&[too_long.as_str()]).await;
        assert!(matches!(result, Err(GiveawayError::TooLong { len: 32 })));

        let result = gateway.hash_claim_codes(&["ok", ""]).await;
        assert!(matches!(result, Err(GiveawayError::InvalidGiveaway(_))));
    }

    #[tokio::test]
    async fn test_unreachable_service() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let gateway = client(&format!("http://{}/api/hash-codes", addr));
        let result = gateway.hash_claim_codes(&["A"]).await;
        assert!(matches!(result, Err(GiveawayError::HashServiceUnavailable(_))));
    }

    #[tokio::test]
    async fn test_error_status_is_total_failure() {
        let router = Router::new().route(
            "/api/hash-codes",
            post(|| async {
                (
                    axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({"error": "Failed to hash codes"})),
                )
            }),
        );
        let endpoint = spawn_router(router).await;
        let result = client(&endpoint).hash_claim_codes(&["A"]).await;
        assert!(matches!(result, Err(GiveawayError::HashServiceUnavailable(_))));
    }

    #[tokio::test]
    async fn test_malformed_bodies_are_total_failure() {
        let missing = Router::new().route(
            "/api/hash-codes",
            post(|| async { Json(serde_json::json!({"ok": true})) }),
        );
        let short = Router::new().route(
            "/api/hash-codes",
            post(|| async { Json(serde_json::json!({"hashedCodes": ["0x1"]})) }),
        );
        let garbage = Router::new().route(
            "/api/hash-codes",
            post(|| async { Json(serde_json::json!({"hashedCodes": ["0x1", "zz"]})) }),
        );

        for router in [missing, short, garbage] {
            let endpoint = spawn_router(router).await;
            let result = client(&endpoint).hash_claim_codes(&["A", "B"]).await;
            assert_err!(&result);
            assert!(matches!(result, Err(GiveawayError::HashServiceUnavailable(_))));
        }
    }

    #[test]
    fn test_rejects_bad_endpoint() {
        assert!(HashGatewayClient::new("not a url", Duration::from_secs(1)).is_err());
    }
}
