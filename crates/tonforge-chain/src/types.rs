//! Opaque chain data types and network selection
//!
//! Cell/BOC payloads are carried as validated base64 blobs; their structure
//! is owned entirely by the external SDK boundary.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{Deserialize, Serialize};

use tonforge_core::prelude::*;

/// Gas value attached to a deploy transaction (0.002 TON)
pub const DEPLOY_VALUE_NANOTON: u64 = 2_000_000;

/// Gas value attached to an internal-message transaction (0.02 TON)
pub const SEND_VALUE_NANOTON: u64 = 20_000_000;

/// Transaction validity window in milliseconds
pub const TX_VALIDITY_MS: i64 = 1_000_000;

/// Target chain environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    #[default]
    Testnet,
    Sandbox,
}

impl std::fmt::Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Network::Mainnet => write!(f, "mainnet"),
            Network::Testnet => write!(f, "testnet"),
            Network::Sandbox => write!(f, "sandbox"),
        }
    }
}

/// Explorer URL for a deployed contract. The sandbox has no explorer, so
/// the bare address is returned.
pub fn contract_url(address: &Address, network: Network) -> String {
    match network {
        Network::Sandbox => address.to_string(),
        Network::Testnet => format!("https://testnet.tonscan.org/address/{address}"),
        Network::Mainnet => format!("https://tonscan.org/address/{address}"),
    }
}

/// Default public JSON-RPC endpoint for a network, if one exists
pub fn default_endpoint(network: Network) -> Option<&'static str> {
    match network {
        Network::Mainnet => Some("wss://toncenter.com/api/v2/jsonRPC"),
        Network::Testnet => Some("wss://testnet.toncenter.com/api/v2/jsonRPC"),
        Network::Sandbox => None,
    }
}

/// A contract address in raw or user-friendly form, validated lightly and
/// otherwise treated as opaque
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        if value.is_empty() || value.chars().any(char::is_whitespace) {
            return Err(Error::invalid_cell(format!("malformed address '{value}'")));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A base64-encoded BOC blob (serialized cell data), validated on entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CellBoc(String);

impl CellBoc {
    /// Validate and wrap a base64 BOC string
    pub fn from_base64(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(Error::invalid_cell("empty cell data"));
        }
        BASE64
            .decode(trimmed)
            .map_err(|e| Error::invalid_cell(format!("not valid base64: {e}")))?;
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_base64(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CellBoc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A prepared state init: the computed contract address plus the packed
/// state-init cell, both produced by the SDK boundary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateInit {
    pub address: Address,
    pub boc: CellBoc,
}

/// A get-method stack argument. Integers travel as decimal strings so
/// big-number values survive the trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum TupleValue {
    Int(String),
    Cell(CellBoc),
    Slice(CellBoc),
}
