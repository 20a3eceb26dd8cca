//! Deploy/send/call handlers
//!
//! The handlers here only validate inputs and narrate progress; the actual
//! chain work runs in spawned tasks that report back with messages.

use tonforge_chain::{contract_url, Address, CellBoc, Notice};
use tonforge_core::{LogEntry, LogKind};

use crate::state::{AppState, UiMode};

use super::{Task, UpdateAction, UpdateResult};

/// Conventional location of the compiled code cell in a project tree
const CODE_ARTIFACT: &str = "artifacts/code.boc";
/// Conventional location of the initial data cell
const DATA_ARTIFACT: &str = "artifacts/data.boc";
/// Conventional location of the message body cell
const MESSAGE_ARTIFACT: &str = "artifacts/message.boc";

/// Read a base64 cell artifact out of the current project
fn read_artifact(state: &AppState, path: &str) -> Option<CellBoc> {
    let project = state.current_project()?;
    let raw = match project.files.read(path) {
        Ok(raw) => raw,
        Err(e) => {
            state.emit_log(LogEntry::error(e.to_string()));
            return None;
        }
    };
    match CellBoc::from_base64(raw) {
        Ok(boc) => Some(boc),
        Err(e) => {
            state.emit_log(LogEntry::error(format!("{path}: {e}")));
            None
        }
    }
}

/// Kick off a deploy from the project's build artifacts
pub fn handle_deploy(state: &mut AppState) -> UpdateResult {
    if state.current_project.is_none() {
        state.last_notice = Some(Notice::error("Open a project first"));
        return UpdateResult::none();
    }
    let Some(code) = read_artifact(state, CODE_ARTIFACT) else {
        return UpdateResult::none();
    };
    let Some(data) = read_artifact(state, DATA_ARTIFACT) else {
        return UpdateResult::none();
    };

    let network = state.settings.network.environment;
    state.tx_in_flight = true;
    state.emit_log(LogEntry::info(format!(
        "Deploying contract to {network}..."
    )));
    UpdateResult::action(UpdateAction::SpawnTask(Task::Deploy { code, data }))
}

/// Deploy task reported back
pub fn handle_deploy_finished(state: &mut AppState, address: Option<Address>) -> UpdateResult {
    state.tx_in_flight = false;
    if let Some(address) = address {
        let network = state.settings.network.environment;
        state.emit_log(LogEntry::success(format!("Contract address: {address}")));
        state.emit_log(LogEntry::unstamped(
            LogKind::Grey,
            contract_url(&address, network),
        ));
        state.last_deployed = Some(address);
    }
    UpdateResult::none()
}

/// Send the message cell to the last deployed contract
pub fn handle_send(state: &mut AppState) -> UpdateResult {
    let Some(address) = state.last_deployed.clone() else {
        state.last_notice = Some(Notice::error("Deploy a contract first"));
        return UpdateResult::none();
    };
    let Some(payload) = read_artifact(state, MESSAGE_ARTIFACT) else {
        return UpdateResult::none();
    };

    state.tx_in_flight = true;
    state.emit_log(LogEntry::info(format!("Sending message to {address}...")));
    UpdateResult::action(UpdateAction::SpawnTask(Task::SendMessage {
        payload,
        address,
    }))
}

pub fn handle_send_finished(state: &mut AppState) -> UpdateResult {
    state.tx_in_flight = false;
    UpdateResult::none()
}

/// Enter get-method input mode
pub fn handle_start_call(state: &mut AppState) -> UpdateResult {
    if state.last_deployed.is_none() {
        state.last_notice = Some(Notice::error("Deploy a contract first"));
        return UpdateResult::none();
    }
    state.method_buffer.clear();
    state.ui_mode = UiMode::MethodInput;
    UpdateResult::none()
}

/// Invoke a get method on the last deployed contract
pub fn handle_call(state: &mut AppState, method: String) -> UpdateResult {
    state.ui_mode = UiMode::Normal;
    state.method_buffer.clear();
    if method.is_empty() {
        return UpdateResult::none();
    }
    let Some(address) = state.last_deployed.clone() else {
        state.last_notice = Some(Notice::error("Deploy a contract first"));
        return UpdateResult::none();
    };
    state.emit_log(LogEntry::grey(format!("Calling {method}...")));
    UpdateResult::action(UpdateAction::SpawnTask(Task::CallGetter { address, method }))
}

/// Get-method task reported back
pub fn handle_call_finished(
    state: &mut AppState,
    method: String,
    value: Option<String>,
) -> UpdateResult {
    if let Some(value) = value {
        state.emit_log(LogEntry::success(format!("{method}: {value}")));
    }
    UpdateResult::none()
}

/// A notice arrived from a background task
pub fn handle_notice(state: &mut AppState, notice: Notice) -> UpdateResult {
    state.last_notice = Some(notice);
    UpdateResult::none()
}
