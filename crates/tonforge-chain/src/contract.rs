//! Deploy/send/call orchestration over the SDK boundary
//!
//! Thin glue: every operation is a short sequence of boundary calls.
//! Failures surface as user-facing notices and are never re-thrown, so
//! callers can only observe "no address came back".

use tokio::sync::mpsc;

use tonforge_core::prelude::*;

use crate::client::{ChainClient, SendTransactionRequest, TxMessage, WalletConnector};
use crate::types::{
    Address, CellBoc, Network, TupleValue, DEPLOY_VALUE_NANOTON, SEND_VALUE_NANOTON,
    TX_VALIDITY_MS,
};

/// Severity of a user-facing notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Info,
}

/// A transient user-facing notification (toast)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            text: text.into(),
        }
    }
}

/// Contract operations wired to a chain client and a wallet connector
#[derive(Debug)]
pub struct ContractAction<C, W> {
    client: C,
    wallet: W,
    network: Network,
    notices: mpsc::UnboundedSender<Notice>,
}

impl<C, W> ContractAction<C, W>
where
    C: ChainClient + Sync,
    W: WalletConnector + Sync,
{
    pub fn new(client: C, wallet: W, network: Network, notices: mpsc::UnboundedSender<Notice>) -> Self {
        Self {
            client,
            wallet,
            network,
            notices,
        }
    }

    pub fn network(&self) -> Network {
        self.network
    }

    fn notify(&self, notice: Notice) {
        // The receiver living in the UI loop may already be gone at
        // shutdown; a dropped notice is fine then.
        let _ = self.notices.send(notice);
    }

    fn validity_deadline() -> i64 {
        chrono::Utc::now().timestamp_millis() + TX_VALIDITY_MS
    }

    /// Deploy a contract from its code/data cells.
    ///
    /// Short-circuits without issuing a transaction when the computed
    /// address already reports as deployed, returning that address.
    /// Returns `None` on any failure; the cause is only visible as a notice.
    pub async fn deploy(&self, code: &CellBoc, data: &CellBoc) -> Option<Address> {
        let init = match self.client.state_init(code, data).await {
            Ok(init) => init,
            Err(e) => {
                warn!("state init build failed: {e}");
                self.notify(Notice::error(format!("Failed to prepare deployment: {e}")));
                return None;
            }
        };

        match self.client.is_contract_deployed(&init.address).await {
            Ok(true) => {
                self.notify(Notice::error(
                    "Contract is already deployed for same codebase and initial state. \
                     Update code or initial state.",
                ));
                return Some(init.address);
            }
            Ok(false) => {}
            Err(e) => {
                warn!("deployment check failed: {e}");
                self.notify(Notice::error(format!(
                    "Failed to check deployment state: {e}"
                )));
                return None;
            }
        }

        let request = SendTransactionRequest {
            valid_until: Self::validity_deadline(),
            messages: vec![TxMessage {
                address: init.address.to_string(),
                amount: DEPLOY_VALUE_NANOTON.to_string(),
                payload: None,
                state_init: Some(init.boc.as_base64().to_string()),
            }],
        };

        match self.wallet.send_transaction(&request).await {
            Ok(()) => {
                self.notify(Notice::success("Contract Deployed"));
                Some(init.address)
            }
            Err(e) => {
                warn!("deploy transaction rejected: {e}");
                self.notify(Notice::error("Deploy transaction was not sent"));
                None
            }
        }
    }

    /// Send an internal message to a deployed contract
    pub async fn send(&self, payload: &CellBoc, address: &Address) {
        let request = SendTransactionRequest {
            valid_until: Self::validity_deadline(),
            messages: vec![TxMessage {
                address: address.to_string(),
                amount: SEND_VALUE_NANOTON.to_string(),
                payload: Some(payload.as_base64().to_string()),
                state_init: None,
            }],
        };

        match self.wallet.send_transaction(&request).await {
            Ok(()) => self.notify(Notice::success("Message sent")),
            Err(e) => {
                warn!("send transaction rejected: {e}");
                self.notify(Notice::error("Failed to send message to contract"));
            }
        }
    }

    /// Invoke a read-only get method, returning the result as a decimal
    /// string
    pub async fn call(
        &self,
        address: &Address,
        method: &str,
        stack: &[TupleValue],
    ) -> Option<String> {
        match self.client.run_get_method(address, method, stack).await {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("get method '{method}' failed: {e}");
                self.notify(Notice::error(format!("Failed to call '{method}'")));
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{test_boc, FakeChainClient, RecordingWallet};

    fn harness(
        client: FakeChainClient,
        wallet: RecordingWallet,
    ) -> (
        ContractAction<FakeChainClient, RecordingWallet>,
        mpsc::UnboundedReceiver<Notice>,
    ) {
        let (tx, rx) = mpsc::unbounded_channel();
        (ContractAction::new(client, wallet, Network::Testnet, tx), rx)
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<Notice>) -> Vec<Notice> {
        let mut notices = Vec::new();
        while let Ok(notice) = rx.try_recv() {
            notices.push(notice);
        }
        notices
    }

    #[tokio::test]
    async fn test_deploy_short_circuits_when_already_deployed() {
        let client = FakeChainClient::deployed_at("EQexisting");
        let wallet = RecordingWallet::default();
        let wallet_probe = wallet.clone();
        let (action, mut rx) = harness(client, wallet);

        let address = action.deploy(&test_boc(), &test_boc()).await;

        assert_eq!(address.unwrap().as_str(), "EQexisting");
        // No transaction was issued
        assert!(wallet_probe.sent().is_empty());
        let notices = drain(&mut rx);
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].kind, NoticeKind::Error);
        assert!(notices[0].text.contains("already deployed"));
    }

    #[tokio::test]
    async fn test_deploy_sends_state_init_transaction() {
        let client = FakeChainClient::fresh_at("EQfresh");
        let wallet = RecordingWallet::default();
        let wallet_probe = wallet.clone();
        let (action, mut rx) = harness(client, wallet);

        let address = action.deploy(&test_boc(), &test_boc()).await;

        assert_eq!(address.unwrap().as_str(), "EQfresh");
        let sent = wallet_probe.sent();
        assert_eq!(sent.len(), 1);
        let message = &sent[0].messages[0];
        assert_eq!(message.address, "EQfresh");
        assert_eq!(message.amount, DEPLOY_VALUE_NANOTON.to_string());
        assert!(message.state_init.is_some());
        assert!(message.payload.is_none());

        let notices = drain(&mut rx);
        assert!(notices
            .iter()
            .any(|n| n.kind == NoticeKind::Success && n.text == "Contract Deployed"));
    }

    #[tokio::test]
    async fn test_deploy_wallet_rejection_yields_no_address() {
        let client = FakeChainClient::fresh_at("EQfresh");
        let wallet = RecordingWallet::rejecting();
        let (action, mut rx) = harness(client, wallet);

        let address = action.deploy(&test_boc(), &test_boc()).await;

        assert!(address.is_none());
        let notices = drain(&mut rx);
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].kind, NoticeKind::Error);
    }

    #[tokio::test]
    async fn test_deploy_network_failure_is_caught() {
        let client = FakeChainClient::failing();
        let wallet = RecordingWallet::default();
        let wallet_probe = wallet.clone();
        let (action, mut rx) = harness(client, wallet);

        let address = action.deploy(&test_boc(), &test_boc()).await;

        assert!(address.is_none());
        assert!(wallet_probe.sent().is_empty());
        let notices = drain(&mut rx);
        assert_eq!(notices[0].kind, NoticeKind::Error);
    }

    #[tokio::test]
    async fn test_send_builds_payload_message() {
        let client = FakeChainClient::fresh_at("EQfresh");
        let wallet = RecordingWallet::default();
        let wallet_probe = wallet.clone();
        let (action, mut rx) = harness(client, wallet);
        let target = Address::new("EQtarget").unwrap();

        action.send(&test_boc(), &target).await;

        let sent = wallet_probe.sent();
        let message = &sent[0].messages[0];
        assert_eq!(message.address, "EQtarget");
        assert_eq!(message.amount, SEND_VALUE_NANOTON.to_string());
        assert!(message.payload.is_some());
        assert!(message.state_init.is_none());
        assert_eq!(drain(&mut rx)[0].kind, NoticeKind::Success);
    }

    #[tokio::test]
    async fn test_call_returns_big_number_string() {
        let client = FakeChainClient::fresh_at("EQfresh")
            .with_get_method_result("123456789012345678901234567890");
        let wallet = RecordingWallet::default();
        let (action, _rx) = harness(client, wallet);
        let target = Address::new("EQtarget").unwrap();

        let value = action.call(&target, "get_total", &[]).await;
        assert_eq!(value.unwrap(), "123456789012345678901234567890");
    }

    #[tokio::test]
    async fn test_call_failure_notifies_and_returns_none() {
        let client = FakeChainClient::failing();
        let wallet = RecordingWallet::default();
        let (action, mut rx) = harness(client, wallet);
        let target = Address::new("EQtarget").unwrap();

        let value = action.call(&target, "get_total", &[]).await;
        assert!(value.is_none());
        let notices = drain(&mut rx);
        assert!(notices[0].text.contains("get_total"));
    }
}
