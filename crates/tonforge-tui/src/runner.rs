//! Main TUI runner - entry point and event loop
//!
//! The runner owns the wiring the browser original spread across component
//! mounts: it subscribes the console's bus listeners (and removes them on
//! teardown), lazily constructs the chain stack on first use, and spawns
//! the background tasks that update() requests.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use url::Url;

use tonforge_app::config::Settings;
use tonforge_app::handler::{Task, UpdateAction};
use tonforge_app::{update, AppPhase, AppState, Message, ProjectStore};
use tonforge_chain::{
    ContractAction, Notice, RpcChainClient, RpcClient, RpcWalletConnector,
};
use tonforge_core::prelude::*;
use tonforge_core::{Channel, Event, EventBus, HandlerId, LogEntry};

use crate::{event, render, terminal};

/// The lazily-connected chain stack. The RPC client owns the transport
/// task; the action is shared with spawned operations.
struct ChainStack {
    _client: RpcClient,
    action: Arc<ContractAction<RpcChainClient, RpcWalletConnector>>,
}

struct RunnerContext {
    msg_tx: mpsc::UnboundedSender<Message>,
    notice_tx: mpsc::UnboundedSender<Notice>,
    chain: Option<ChainStack>,
}

/// Run the TUI application
pub async fn run(settings: Settings) -> Result<()> {
    // Install panic hook for terminal restoration
    terminal::install_panic_hook();

    // Initialize terminal
    let mut term = ratatui::init();

    let bus = Arc::new(EventBus::new());

    // Unified message channel; bus listeners forward into it
    let (msg_tx, mut msg_rx) = mpsc::unbounded_channel::<Message>();
    let subscriptions = wire_console_listeners(&bus, &msg_tx);

    let store = match ProjectStore::open(ProjectStore::default_path()) {
        Ok(store) => store,
        Err(e) => {
            ratatui::restore();
            return Err(e);
        }
    };

    let mut state = AppState::new(store, settings, Arc::clone(&bus));
    state.console.init();
    state.emit_log(LogEntry::grey("Press 'p' to open the project selector"));

    let (notice_tx, mut notice_rx) = mpsc::unbounded_channel::<Notice>();
    let mut ctx = RunnerContext {
        msg_tx: msg_tx.clone(),
        notice_tx,
        chain: None,
    };

    let result = run_loop(&mut term, &mut state, &mut msg_rx, &mut notice_rx, &mut ctx).await;

    // Teardown mirrors the console's unmount: the bus listeners are
    // deregistered; the pane itself is deliberately not disposed
    // (see DESIGN.md).
    for (channel, id) in subscriptions {
        bus.unsubscribe(channel, Some(id));
    }

    // Restore terminal
    ratatui::restore();
    result
}

/// Subscribe the console pipeline to the bus, forwarding each event into
/// the TEA loop as a message. Returns the handler ids for teardown.
fn wire_console_listeners(
    bus: &EventBus,
    msg_tx: &mpsc::UnboundedSender<Message>,
) -> Vec<(Channel, HandlerId)> {
    let mut subscriptions = Vec::new();

    let tx = msg_tx.clone();
    subscriptions.push((
        Channel::Log,
        bus.subscribe(Channel::Log, move |event| {
            if let Event::Log(entry) = event {
                let _ = tx.send(Message::ConsoleLog(entry.clone()));
            }
        }),
    ));

    let tx = msg_tx.clone();
    subscriptions.push((
        Channel::LogClear,
        bus.subscribe(Channel::LogClear, move |_| {
            let _ = tx.send(Message::ConsoleClear);
        }),
    ));

    let tx = msg_tx.clone();
    subscriptions.push((
        Channel::TestCaseLog,
        bus.subscribe(Channel::TestCaseLog, move |event| {
            if let Event::TestCaseLog(text) = event {
                let _ = tx.send(Message::ConsoleRaw(text.clone()));
            }
        }),
    ));

    let tx = msg_tx.clone();
    subscriptions.push((
        Channel::SplitDragEnd,
        bus.subscribe(Channel::SplitDragEnd, move |_| {
            let _ = tx.send(Message::SplitResized);
        }),
    ));

    subscriptions
}

/// Main event loop
async fn run_loop(
    term: &mut ratatui::DefaultTerminal,
    state: &mut AppState,
    msg_rx: &mut mpsc::UnboundedReceiver<Message>,
    notice_rx: &mut mpsc::UnboundedReceiver<Notice>,
    ctx: &mut RunnerContext,
) -> Result<()> {
    loop {
        if state.phase == AppPhase::Quitting {
            break;
        }

        term.draw(|frame| render::draw(frame, state))
            .map_err(|e| Error::terminal(e.to_string()))?;

        // Terminal input (blocks up to 50ms, yielding a Tick on timeout)
        if let Some(message) = event::poll()? {
            process_message(state, message, ctx).await;
        }

        // Drain bus-forwarded and task messages
        while let Ok(message) = msg_rx.try_recv() {
            process_message(state, message, ctx).await;
        }
        while let Ok(notice) = notice_rx.try_recv() {
            process_message(state, Message::Notice(notice), ctx).await;
        }
    }
    Ok(())
}

/// Run one message through update(), chasing follow-up messages and
/// dispatching requested actions.
async fn process_message(state: &mut AppState, message: Message, ctx: &mut RunnerContext) {
    let mut current = Some(message);
    while let Some(message) = current.take() {
        let result = update(state, message);
        if let Some(action) = result.action {
            handle_action(state, action, ctx).await;
        }
        current = result.message;
    }
}

async fn handle_action(state: &mut AppState, action: UpdateAction, ctx: &mut RunnerContext) {
    match action {
        UpdateAction::SaveStore => {
            if let Err(e) = state.store.save() {
                warn!("store save failed: {e}");
                state.emit_log(LogEntry::error(format!("Failed to save workspace: {e}")));
            }
        }
        UpdateAction::SpawnTask(task) => spawn_task(state, task, ctx).await,
    }
}

async fn spawn_task(state: &mut AppState, task: Task, ctx: &mut RunnerContext) {
    match task {
        Task::DeferredSearch { query } => {
            let tx = ctx.msg_tx.clone();
            tokio::spawn(async move {
                // Let the replayed lines render before searching
                tokio::time::sleep(Duration::from_millis(500)).await;
                let _ = tx.send(Message::RunDeferredSearch { query });
            });
        }

        Task::GitImport { url, name, dest } => {
            let tx = ctx.msg_tx.clone();
            tokio::spawn(async move {
                let result = match git_clone(&url, &dest).await {
                    Ok(()) => Ok(dest),
                    Err(e) => Err(e.to_string()),
                };
                let _ = tx.send(Message::ProjectImported { name, result });
            });
        }

        Task::Deploy { code, data } => {
            let Some(action) = chain_action(state, ctx).await else {
                state.tx_in_flight = false;
                return;
            };
            let tx = ctx.msg_tx.clone();
            tokio::spawn(async move {
                let address = action.deploy(&code, &data).await;
                let _ = tx.send(Message::DeployFinished { address });
            });
        }

        Task::SendMessage { payload, address } => {
            let Some(action) = chain_action(state, ctx).await else {
                state.tx_in_flight = false;
                return;
            };
            let tx = ctx.msg_tx.clone();
            tokio::spawn(async move {
                action.send(&payload, &address).await;
                let _ = tx.send(Message::SendFinished);
            });
        }

        Task::CallGetter { address, method } => {
            let Some(action) = chain_action(state, ctx).await else {
                return;
            };
            let tx = ctx.msg_tx.clone();
            tokio::spawn(async move {
                let value = action.call(&address, &method, &[]).await;
                let _ = tx.send(Message::CallFinished { method, value });
            });
        }
    }
}

/// The chain stack is constructed once, on first use, and cached for the
/// rest of the session.
async fn chain_action(
    state: &mut AppState,
    ctx: &mut RunnerContext,
) -> Option<Arc<ContractAction<RpcChainClient, RpcWalletConnector>>> {
    if let Some(stack) = &ctx.chain {
        return Some(Arc::clone(&stack.action));
    }

    let Some(endpoint) = state.settings.endpoint() else {
        state.emit_log(LogEntry::error(
            "No chain endpoint configured for this network",
        ));
        return None;
    };
    let endpoint = match Url::parse(&endpoint) {
        Ok(url) => url,
        Err(e) => {
            state.emit_log(LogEntry::error(format!("Invalid endpoint '{endpoint}': {e}")));
            return None;
        }
    };

    match RpcClient::connect(&endpoint).await {
        Ok(client) => {
            let action = Arc::new(ContractAction::new(
                RpcChainClient::new(client.handle()),
                RpcWalletConnector::new(client.handle()),
                state.settings.network.environment,
                ctx.notice_tx.clone(),
            ));
            ctx.chain = Some(ChainStack {
                _client: client,
                action: Arc::clone(&action),
            });
            Some(action)
        }
        Err(e) => {
            state.emit_log(LogEntry::error(format!(
                "Failed to reach chain endpoint: {e}"
            )));
            None
        }
    }
}

/// Shallow-clone a repository into `dest`
async fn git_clone(url: &str, dest: &Path) -> Result<()> {
    if dest.exists() {
        tokio::fs::remove_dir_all(dest).await?;
    }
    if let Some(parent) = dest.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    let output = tokio::process::Command::new("git")
        .arg("clone")
        .arg("--depth")
        .arg("1")
        .arg(url)
        .arg(dest)
        .output()
        .await?;

    if !output.status.success() {
        return Err(Error::git(
            String::from_utf8_lossy(&output.stderr).trim().to_string(),
        ));
    }
    Ok(())
}
