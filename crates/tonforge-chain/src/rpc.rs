//! Async WebSocket JSON-RPC client for the SDK boundary
//!
//! The [`RpcClient`] owns a background task that drives the WebSocket:
//! requests go out through a command channel, responses are correlated back
//! to callers by id via the [`RequestTracker`]. Cloneable [`RpcHandle`]s let
//! multiple callers share one connection; a handle becomes inoperable once
//! the background task exits (requests return `ChannelClosed`).

use std::sync::Arc;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::sync::{mpsc, oneshot};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::protocol::Message as WsMessage;
use url::Url;

use tonforge_core::prelude::*;

use crate::commands::{ChainCommand, RequestTracker};

/// Per-request deadline before the caller sees a timeout error
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

enum ClientCommand {
    SendRequest {
        command: ChainCommand,
        response_tx: oneshot::Sender<Result<Value>>,
    },
}

/// A clonable handle for making boundary RPC requests
#[derive(Debug, Clone)]
pub struct RpcHandle {
    cmd_tx: mpsc::Sender<ClientCommand>,
}

impl RpcHandle {
    /// Send a command and wait for its response.
    ///
    /// # Errors
    ///
    /// - [`Error::ChannelClosed`] if the background task has exited
    /// - [`Error::Protocol`] for JSON-RPC level errors
    /// - [`Error::Network`] for transport failures and timeouts
    pub async fn request(&self, command: ChainCommand) -> Result<Value> {
        let (response_tx, response_rx) = oneshot::channel();

        self.cmd_tx
            .send(ClientCommand::SendRequest {
                command,
                response_tx,
            })
            .await
            .map_err(|_| Error::ChannelClosed)?;

        response_rx.await.map_err(|_| Error::ChannelClosed)?
    }
}

impl std::fmt::Debug for ClientCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientCommand::SendRequest { command, .. } => f
                .debug_struct("SendRequest")
                .field("command", &command.description())
                .finish(),
        }
    }
}

/// WebSocket JSON-RPC client; dropping it shuts the connection down
pub struct RpcClient {
    handle: RpcHandle,
    task: tokio::task::JoinHandle<()>,
}

impl RpcClient {
    /// Connect to the boundary endpoint and spawn the background task
    pub async fn connect(endpoint: &Url) -> Result<Self> {
        let (stream, _) = connect_async(endpoint.as_str())
            .await
            .map_err(|e| Error::network(format!("connect {endpoint}: {e}")))?;
        info!("Connected to chain endpoint {endpoint}");

        let (cmd_tx, cmd_rx) = mpsc::channel(64);
        let task = tokio::spawn(run_client(stream, cmd_rx));

        Ok(Self {
            handle: RpcHandle { cmd_tx },
            task,
        })
    }

    /// Get a clonable request handle sharing this connection
    pub fn handle(&self) -> RpcHandle {
        self.handle.clone()
    }
}

impl Drop for RpcClient {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run_client(
    stream: tokio_tungstenite::WebSocketStream<
        tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>,
    >,
    mut cmd_rx: mpsc::Receiver<ClientCommand>,
) {
    let (mut write, mut read) = stream.split();
    let tracker = Arc::new(RequestTracker::default());

    loop {
        tokio::select! {
            cmd = cmd_rx.recv() => {
                let Some(ClientCommand::SendRequest { command, response_tx }) = cmd else {
                    debug!("command channel closed, shutting down rpc client");
                    break;
                };

                let (id, rx) = tracker.register(command.description()).await;
                let payload = command.build(id);
                trace!("-> {payload}");

                if let Err(e) = write.send(WsMessage::Text(payload.into())).await {
                    tracker.handle_response(id, None, None).await;
                    let _ = response_tx.send(Err(Error::network(format!("send failed: {e}"))));
                    continue;
                }

                // Await the correlated response off-loop so slow calls do
                // not block the socket.
                tokio::spawn(async move {
                    let outcome = match tokio::time::timeout(REQUEST_TIMEOUT, rx).await {
                        Ok(Ok(response)) if response.success => {
                            Ok(response.result.unwrap_or(Value::Null))
                        }
                        Ok(Ok(response)) => Err(Error::protocol(
                            response.error.unwrap_or_else(|| "unknown error".to_string()),
                        )),
                        Ok(Err(_)) => Err(Error::ChannelClosed),
                        Err(_) => Err(Error::network("request timed out")),
                    };
                    let _ = response_tx.send(outcome);
                });
            }

            msg = read.next() => {
                match msg {
                    Some(Ok(WsMessage::Text(text))) => {
                        handle_incoming(&tracker, text.as_str()).await;
                    }
                    Some(Ok(WsMessage::Close(_))) | None => {
                        warn!("chain endpoint closed the connection");
                        tracker.cancel_all().await;
                        break;
                    }
                    Some(Ok(_)) => {} // ping/pong/binary ignored
                    Some(Err(e)) => {
                        warn!("websocket error: {e}");
                        tracker.cancel_all().await;
                        break;
                    }
                }
            }
        }
    }
}

async fn handle_incoming(tracker: &RequestTracker, text: &str) {
    trace!("<- {text}");
    let value: Value = match serde_json::from_str(text) {
        Ok(v) => v,
        Err(e) => {
            warn!("unparseable frame from endpoint: {e}");
            return;
        }
    };

    let Some(id) = value.get("id").and_then(Value::as_u64) else {
        debug!("frame without id ignored");
        return;
    };

    let result = value.get("result").cloned();
    let error = value.get("error").cloned();
    if !tracker.handle_response(id, result, error).await {
        debug!("response #{id} had no pending request");
    }
}
