//! Test doubles for the SDK boundary traits
//!
//! Scriptable fakes used by this crate's tests and, behind the
//! `test-helpers` feature, by downstream crates.

use std::sync::{Arc, Mutex};

use tonforge_core::prelude::*;

use crate::client::{ChainClient, SendTransactionRequest, WalletConnector};
use crate::types::{Address, CellBoc, StateInit, TupleValue};

/// A valid base64 BOC blob for tests
pub fn test_boc() -> CellBoc {
    CellBoc::from_base64("te6ccgEBAQEAAgAAAA==").expect("valid test boc")
}

/// Scriptable chain client fake
#[derive(Debug, Clone)]
pub struct FakeChainClient {
    address: String,
    deployed: bool,
    fail: bool,
    get_method_result: String,
    calls: Arc<Mutex<Vec<String>>>,
}

impl FakeChainClient {
    /// A chain where the computed address already reports as deployed
    pub fn deployed_at(address: &str) -> Self {
        Self {
            address: address.to_string(),
            deployed: true,
            fail: false,
            get_method_result: "0".to_string(),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A chain where the computed address is not yet deployed
    pub fn fresh_at(address: &str) -> Self {
        Self {
            deployed: false,
            ..Self::deployed_at(address)
        }
    }

    /// A chain where every call fails with a network error
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::deployed_at("EQunreachable")
        }
    }

    /// Set the value returned by `run_get_method`
    pub fn with_get_method_result(mut self, value: &str) -> Self {
        self.get_method_result = value.to_string();
        self
    }

    /// Methods invoked so far, in order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, name: &str) -> Result<()> {
        self.calls.lock().unwrap().push(name.to_string());
        if self.fail {
            Err(Error::network("fake endpoint unreachable"))
        } else {
            Ok(())
        }
    }
}

impl ChainClient for FakeChainClient {
    async fn state_init(&self, _code: &CellBoc, _data: &CellBoc) -> Result<StateInit> {
        self.record("state_init")?;
        Ok(StateInit {
            address: Address::new(&self.address)?,
            boc: test_boc(),
        })
    }

    async fn is_contract_deployed(&self, _address: &Address) -> Result<bool> {
        self.record("is_contract_deployed")?;
        Ok(self.deployed)
    }

    async fn run_get_method(
        &self,
        _address: &Address,
        _method: &str,
        _stack: &[TupleValue],
    ) -> Result<String> {
        self.record("run_get_method")?;
        Ok(self.get_method_result.clone())
    }
}

/// Wallet fake recording every transaction request it receives
#[derive(Debug, Clone, Default)]
pub struct RecordingWallet {
    reject: bool,
    sent: Arc<Mutex<Vec<SendTransactionRequest>>>,
}

impl RecordingWallet {
    /// A wallet that rejects every transaction
    pub fn rejecting() -> Self {
        Self {
            reject: true,
            sent: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Requests accepted so far, in order
    pub fn sent(&self) -> Vec<SendTransactionRequest> {
        self.sent.lock().unwrap().clone()
    }
}

impl WalletConnector for RecordingWallet {
    async fn send_transaction(&self, request: &SendTransactionRequest) -> Result<()> {
        if self.reject {
            return Err(Error::network("user rejected the transaction"));
        }
        self.sent.lock().unwrap().push(request.clone());
        Ok(())
    }
}
