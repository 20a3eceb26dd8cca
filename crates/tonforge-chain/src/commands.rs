//! Command building and request tracking for the SDK boundary
//!
//! This module provides:
//! - Request ID tracking for matching responses
//! - Command building for the JSON-RPC wire format
//! - Timeout handling for stalled commands

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde_json::{json, Value};
use tokio::sync::{oneshot, RwLock};

use crate::client::SendTransactionRequest;
use crate::types::{Address, CellBoc, TupleValue};

/// Global request ID counter
static REQUEST_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Generate a unique request ID
pub fn next_request_id() -> u64 {
    REQUEST_ID_COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// A pending request awaiting response
struct PendingRequest {
    /// Channel to send the response
    response_tx: oneshot::Sender<CommandResponse>,
    /// When this request was created
    created_at: Instant,
    /// Description for logging
    #[allow(dead_code)]
    description: String,
}

/// Response from a boundary command
#[derive(Debug, Clone)]
pub struct CommandResponse {
    pub id: u64,
    pub success: bool,
    pub result: Option<Value>,
    pub error: Option<String>,
}

impl CommandResponse {
    pub fn from_wire(id: u64, result: Option<Value>, error: Option<Value>) -> Self {
        Self {
            id,
            success: error.is_none(),
            result,
            error: error.map(|e| e.to_string()),
        }
    }

    /// Create a success response
    pub fn success(id: u64, result: Option<Value>) -> Self {
        Self {
            id,
            success: true,
            result,
            error: None,
        }
    }

    /// Create an error response
    pub fn error(id: u64, message: impl Into<String>) -> Self {
        Self {
            id,
            success: false,
            result: None,
            error: Some(message.into()),
        }
    }
}

/// Tracks pending requests and matches responses
pub struct RequestTracker {
    /// Map of request ID to pending request
    pending: Arc<RwLock<HashMap<u64, PendingRequest>>>,
    /// Default timeout for requests
    #[allow(dead_code)]
    default_timeout: Duration,
}

impl RequestTracker {
    pub fn new(default_timeout: Duration) -> Self {
        Self {
            pending: Arc::new(RwLock::new(HashMap::new())),
            default_timeout,
        }
    }

    /// Register a new pending request
    /// Returns (request_id, receiver for response)
    pub async fn register(&self, description: &str) -> (u64, oneshot::Receiver<CommandResponse>) {
        let id = next_request_id();
        let (tx, rx) = oneshot::channel();

        let pending = PendingRequest {
            response_tx: tx,
            created_at: Instant::now(),
            description: description.to_string(),
        };

        self.pending.write().await.insert(id, pending);

        (id, rx)
    }

    /// Handle an incoming response from the boundary
    /// Returns true if the response was matched to a pending request
    pub async fn handle_response(
        &self,
        id: u64,
        result: Option<Value>,
        error: Option<Value>,
    ) -> bool {
        if let Some(pending) = self.pending.write().await.remove(&id) {
            let response = CommandResponse::from_wire(id, result, error);
            let _ = pending.response_tx.send(response);
            true
        } else {
            false
        }
    }

    /// Cancel all pending requests (e.g., on shutdown)
    pub async fn cancel_all(&self) {
        let mut pending = self.pending.write().await;
        for (id, req) in pending.drain() {
            let _ = req.response_tx.send(CommandResponse {
                id,
                success: false,
                result: None,
                error: Some("Request cancelled".to_string()),
            });
        }
    }

    /// Remove stale requests that have timed out
    pub async fn cleanup_stale(&self, timeout: Duration) -> Vec<u64> {
        let mut pending = self.pending.write().await;
        let now = Instant::now();

        let stale: Vec<u64> = pending
            .iter()
            .filter(|(_, req)| now.duration_since(req.created_at) > timeout)
            .map(|(id, _)| *id)
            .collect();

        for id in &stale {
            if let Some(req) = pending.remove(id) {
                let _ = req.response_tx.send(CommandResponse {
                    id: *id,
                    success: false,
                    result: None,
                    error: Some("Request timed out".to_string()),
                });
            }
        }

        stale
    }

    /// Get the number of pending requests
    pub async fn pending_count(&self) -> usize {
        self.pending.read().await.len()
    }
}

impl Default for RequestTracker {
    fn default() -> Self {
        Self::new(Duration::from_secs(30))
    }
}

/// Boundary command types
#[derive(Debug, Clone)]
pub enum ChainCommand {
    /// Pack a state init and compute the resulting contract address
    BuildStateInit { code: CellBoc, data: CellBoc },
    /// Check whether a contract is active at an address
    IsContractDeployed { address: Address },
    /// Invoke a read-only get method
    RunGetMethod {
        address: Address,
        method: String,
        stack: Vec<TupleValue>,
    },
    /// Hand a transaction to the wallet connector for signing and submission
    SendTransaction { request: SendTransactionRequest },
}

impl ChainCommand {
    /// Build the JSON-RPC request object
    pub fn build(&self, id: u64) -> String {
        let (method, params) = match self {
            ChainCommand::BuildStateInit { code, data } => (
                "chain.buildStateInit",
                json!({ "code": code, "data": data }),
            ),
            ChainCommand::IsContractDeployed { address } => {
                ("chain.isContractDeployed", json!({ "address": address }))
            }
            ChainCommand::RunGetMethod {
                address,
                method,
                stack,
            } => (
                "chain.runGetMethod",
                json!({ "address": address, "method": method, "stack": stack }),
            ),
            ChainCommand::SendTransaction { request } => {
                ("wallet.sendTransaction", json!(request))
            }
        };

        json!({
            "id": id,
            "method": method,
            "params": params,
        })
        .to_string()
    }

    /// Get a human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            ChainCommand::BuildStateInit { .. } => "build state init",
            ChainCommand::IsContractDeployed { .. } => "check deployment",
            ChainCommand::RunGetMethod { .. } => "run get method",
            ChainCommand::SendTransaction { .. } => "send transaction",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_ids_are_unique() {
        let a = next_request_id();
        let b = next_request_id();
        assert_ne!(a, b);
    }

    #[test]
    fn test_command_builds_jsonrpc_shape() {
        let command = ChainCommand::IsContractDeployed {
            address: Address::new("EQtest").unwrap(),
        };
        let wire = command.build(7);
        let value: Value = serde_json::from_str(&wire).unwrap();
        assert_eq!(value["id"], 7);
        assert_eq!(value["method"], "chain.isContractDeployed");
        assert_eq!(value["params"]["address"], "EQtest");
    }

    #[test]
    fn test_run_get_method_carries_stack() {
        let command = ChainCommand::RunGetMethod {
            address: Address::new("EQtest").unwrap(),
            method: "get_counter".to_string(),
            stack: vec![TupleValue::Int("42".to_string())],
        };
        let value: Value = serde_json::from_str(&command.build(1)).unwrap();
        assert_eq!(value["params"]["method"], "get_counter");
        assert_eq!(value["params"]["stack"][0]["type"], "int");
        assert_eq!(value["params"]["stack"][0]["value"], "42");
    }

    #[tokio::test]
    async fn test_tracker_matches_response() {
        let tracker = RequestTracker::default();
        let (id, rx) = tracker.register("test").await;
        assert_eq!(tracker.pending_count().await, 1);

        let matched = tracker
            .handle_response(id, Some(json!({"ok": true})), None)
            .await;
        assert!(matched);
        assert_eq!(tracker.pending_count().await, 0);

        let response = rx.await.unwrap();
        assert!(response.success);
        assert_eq!(response.result.unwrap()["ok"], true);
    }

    #[tokio::test]
    async fn test_tracker_ignores_unknown_id() {
        let tracker = RequestTracker::default();
        assert!(!tracker.handle_response(999, None, None).await);
    }

    #[tokio::test]
    async fn test_tracker_cancel_all() {
        let tracker = RequestTracker::default();
        let (_, rx) = tracker.register("will cancel").await;
        tracker.cancel_all().await;
        let response = rx.await.unwrap();
        assert!(!response.success);
        assert!(response.error.unwrap().contains("cancelled"));
    }

    #[tokio::test]
    async fn test_tracker_cleanup_stale() {
        let tracker = RequestTracker::default();
        let (id, rx) = tracker.register("stale").await;
        let stale = tracker.cleanup_stale(Duration::from_secs(0)).await;
        assert_eq!(stale, vec![id]);
        let response = rx.await.unwrap();
        assert!(response.error.unwrap().contains("timed out"));
    }
}
