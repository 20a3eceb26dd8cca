//! # tonforge-chain - Blockchain SDK boundary
//!
//! Everything TON Forge knows about the chain lives behind the traits in
//! this crate. Cell/BOC data is opaque base64; address computation, state
//! init packing, and transaction signing are performed by the external
//! endpoint/wallet the traits are wired to.
//!
//! ## Public API
//!
//! - [`ChainClient`] / [`WalletConnector`] - the two boundary capabilities
//! - [`ContractAction`] - deploy/send/call glue with notice-only failures
//! - [`RpcClient`] / [`RpcHandle`] - shared WebSocket JSON-RPC transport
//! - [`Address`], [`CellBoc`], [`StateInit`], [`TupleValue`] - opaque data
//! - [`Network`], [`contract_url`] - environment selection and explorer links

pub mod client;
pub mod commands;
pub mod contract;
pub mod rpc;
pub mod types;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_utils;

pub use client::{
    ChainClient, RpcChainClient, RpcWalletConnector, SendTransactionRequest, TxMessage,
    WalletConnector,
};
pub use commands::{ChainCommand, CommandResponse, RequestTracker};
pub use contract::{ContractAction, Notice, NoticeKind};
pub use rpc::{RpcClient, RpcHandle};
pub use types::{
    contract_url, default_endpoint, Address, CellBoc, Network, StateInit, TupleValue,
    DEPLOY_VALUE_NANOTON, SEND_VALUE_NANOTON, TX_VALIDITY_MS,
};
