//! SDK boundary traits and their JSON-RPC-backed implementations
//!
//! The blockchain RPC client and the wallet connector are external
//! collaborators. This layer defines the two capabilities the rest of the
//! system consumes and wires them to the WebSocket transport; nothing above
//! this module knows how cells are hashed or transactions signed.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use tonforge_core::prelude::*;

use crate::commands::ChainCommand;
use crate::rpc::RpcHandle;
use crate::types::{Address, CellBoc, StateInit, TupleValue};

// ─────────────────────────────────────────────────────────────────
// Wire Types
// ─────────────────────────────────────────────────────────────────

/// One message inside a transaction request. Exactly one of `payload`
/// (internal message body) or `state_init` (deployment) is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxMessage {
    pub address: String,
    /// Attached value in nanoton, as a decimal string
    pub amount: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_init: Option<String>,
}

/// A signing request handed to the wallet connector
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendTransactionRequest {
    /// Unix deadline in milliseconds after which the request is void
    pub valid_until: i64,
    pub messages: Vec<TxMessage>,
}

// ─────────────────────────────────────────────────────────────────
// Boundary Traits
// ─────────────────────────────────────────────────────────────────

/// Read-side chain capability: state-init packing, deployment checks, and
/// get-method calls.
#[trait_variant::make(ChainClient: Send)]
pub trait LocalChainClient {
    /// Pack `(code, data)` into a state init and compute the contract
    /// address it deploys to.
    async fn state_init(&self, code: &CellBoc, data: &CellBoc) -> Result<StateInit>;

    /// Whether a contract is already active at `address`.
    async fn is_contract_deployed(&self, address: &Address) -> Result<bool>;

    /// Invoke a read-only get method. The result is the first stack value
    /// as a big-integer-capable decimal string.
    async fn run_get_method(
        &self,
        address: &Address,
        method: &str,
        stack: &[TupleValue],
    ) -> Result<String>;
}

/// Write-side wallet capability: sign and submit a transaction.
#[trait_variant::make(WalletConnector: Send)]
pub trait LocalWalletConnector {
    async fn send_transaction(&self, request: &SendTransactionRequest) -> Result<()>;
}

// ─────────────────────────────────────────────────────────────────
// RPC-Backed Implementations
// ─────────────────────────────────────────────────────────────────

/// Chain client speaking JSON-RPC through a shared [`RpcHandle`]
#[derive(Debug, Clone)]
pub struct RpcChainClient {
    handle: RpcHandle,
}

impl RpcChainClient {
    pub fn new(handle: RpcHandle) -> Self {
        Self { handle }
    }
}

fn field<'a>(value: &'a Value, name: &str) -> Result<&'a Value> {
    value
        .get(name)
        .ok_or_else(|| Error::protocol(format!("response missing '{name}' field")))
}

impl ChainClient for RpcChainClient {
    async fn state_init(&self, code: &CellBoc, data: &CellBoc) -> Result<StateInit> {
        let result = self
            .handle
            .request(ChainCommand::BuildStateInit {
                code: code.clone(),
                data: data.clone(),
            })
            .await?;
        serde_json::from_value(result)
            .map_err(|e| Error::protocol(format!("parse buildStateInit: {e}")))
    }

    async fn is_contract_deployed(&self, address: &Address) -> Result<bool> {
        let result = self
            .handle
            .request(ChainCommand::IsContractDeployed {
                address: address.clone(),
            })
            .await?;
        field(&result, "deployed")?
            .as_bool()
            .ok_or_else(|| Error::protocol("'deployed' is not a boolean"))
    }

    async fn run_get_method(
        &self,
        address: &Address,
        method: &str,
        stack: &[TupleValue],
    ) -> Result<String> {
        let result = self
            .handle
            .request(ChainCommand::RunGetMethod {
                address: address.clone(),
                method: method.to_string(),
                stack: stack.to_vec(),
            })
            .await?;
        // The stack head comes back as a decimal string so values larger
        // than u64 survive the trip.
        let value = field(&result, "stack")?
            .as_array()
            .and_then(|stack| stack.first())
            .ok_or_else(|| Error::protocol("get method returned an empty stack"))?;
        match value {
            Value::String(s) => Ok(s.clone()),
            Value::Number(n) => Ok(n.to_string()),
            other => Err(Error::protocol(format!(
                "unsupported stack value: {other}"
            ))),
        }
    }
}

/// Wallet connector speaking JSON-RPC through a shared [`RpcHandle`]
#[derive(Debug, Clone)]
pub struct RpcWalletConnector {
    handle: RpcHandle,
}

impl RpcWalletConnector {
    pub fn new(handle: RpcHandle) -> Self {
        Self { handle }
    }
}

impl WalletConnector for RpcWalletConnector {
    async fn send_transaction(&self, request: &SendTransactionRequest) -> Result<()> {
        self.handle
            .request(ChainCommand::SendTransaction {
                request: request.clone(),
            })
            .await
            .map(|_| ())
    }
}
