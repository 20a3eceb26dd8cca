//! In-process publish/subscribe channel between log producers and the console
//!
//! The bus is a typed replacement for a string-keyed emitter: channel names
//! are an enum so a misspelled channel is a compile error, while the original
//! wire spellings (`LOG`, `LOG_CLEAR`, ...) are preserved as display names.
//!
//! Delivery contract:
//! - handlers fire synchronously, in registration order
//! - `emit` works against a snapshot, so (de)registration during delivery
//!   takes effect from the next emission
//! - a panicking handler never prevents delivery to the handlers after it
//! - no queuing or replay: an event with no listeners is dropped silently

use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::log::LogEntry;

/// Bus channels. Display names match the original wire spellings exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Log,
    LogClear,
    TestCaseLog,
    SplitDragEnd,
}

impl Channel {
    /// Wire/display name of the channel
    pub fn name(&self) -> &'static str {
        match self {
            Channel::Log => "LOG",
            Channel::LogClear => "LOG_CLEAR",
            Channel::TestCaseLog => "TEST_CASE_LOG",
            Channel::SplitDragEnd => "ON_SPLIT_DRAG_END",
        }
    }
}

/// Bus events with their payloads
#[derive(Debug, Clone)]
pub enum Event {
    /// Append one formatted log entry
    Log(LogEntry),
    /// Clear the visible console pane
    LogClear,
    /// Raw unformatted console output (interactive test-runner)
    TestCaseLog(String),
    /// A split divider finished moving; panes should refit
    SplitDragEnd,
}

impl Event {
    /// The channel this event is delivered on
    pub fn channel(&self) -> Channel {
        match self {
            Event::Log(_) => Channel::Log,
            Event::LogClear => Channel::LogClear,
            Event::TestCaseLog(_) => Channel::TestCaseLog,
            Event::SplitDragEnd => Channel::SplitDragEnd,
        }
    }
}

/// Token identifying a registered handler, used to unsubscribe it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandlerId(u64);

type Handler = Arc<dyn Fn(&Event) + Send + Sync + 'static>;

/// Process-wide publish/subscribe registry
///
/// Shared via `Arc`; alive for the whole session. Components must
/// unsubscribe their handlers on teardown to avoid duplicate delivery
/// after a remount.
#[derive(Default)]
pub struct EventBus {
    handlers: Mutex<HashMap<Channel, Vec<(HandlerId, Handler)>>>,
    next_id: AtomicU64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler on a channel. Multiple handlers per channel are
    /// allowed; insertion order is delivery order.
    pub fn subscribe<F>(&self, channel: Channel, handler: F) -> HandlerId
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        let id = HandlerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let mut handlers = self.handlers.lock().unwrap_or_else(|e| e.into_inner());
        handlers
            .entry(channel)
            .or_default()
            .push((id, Arc::new(handler)));
        id
    }

    /// Remove one handler, or every handler on the channel when `id` is
    /// `None`. Unknown ids are a no-op.
    pub fn unsubscribe(&self, channel: Channel, id: Option<HandlerId>) {
        let mut handlers = self.handlers.lock().unwrap_or_else(|e| e.into_inner());
        match id {
            Some(id) => {
                if let Some(list) = handlers.get_mut(&channel) {
                    list.retain(|(hid, _)| *hid != id);
                }
            }
            None => {
                handlers.remove(&channel);
            }
        }
    }

    /// Synchronously deliver an event to all currently-registered handlers
    /// of its channel, in registration order.
    pub fn emit(&self, event: Event) {
        let snapshot: Vec<Handler> = {
            let handlers = self.handlers.lock().unwrap_or_else(|e| e.into_inner());
            handlers
                .get(&event.channel())
                .map(|list| list.iter().map(|(_, h)| Arc::clone(h)).collect())
                .unwrap_or_default()
        };

        for handler in snapshot {
            // One misbehaving listener must not starve the ones after it.
            if catch_unwind(AssertUnwindSafe(|| handler(&event))).is_err() {
                tracing::warn!(
                    channel = event.channel().name(),
                    "event handler panicked during delivery"
                );
            }
        }
    }

    /// Number of handlers registered on a channel
    pub fn listener_count(&self, channel: Channel) -> usize {
        let handlers = self.handlers.lock().unwrap_or_else(|e| e.into_inner());
        handlers.get(&channel).map(Vec::len).unwrap_or(0)
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex as StdMutex;

    fn record(log: &Arc<StdMutex<Vec<String>>>, value: &str) {
        log.lock().unwrap().push(value.to_string());
    }

    #[test]
    fn test_channel_names_match_wire_spelling() {
        assert_eq!(Channel::Log.name(), "LOG");
        assert_eq!(Channel::LogClear.name(), "LOG_CLEAR");
        assert_eq!(Channel::TestCaseLog.name(), "TEST_CASE_LOG");
        assert_eq!(Channel::SplitDragEnd.name(), "ON_SPLIT_DRAG_END");
    }

    #[test]
    fn test_handlers_fire_in_registration_order() {
        let bus = EventBus::new();
        let seen = Arc::new(StdMutex::new(Vec::new()));

        for label in ["first", "second", "third"] {
            let seen = Arc::clone(&seen);
            bus.subscribe(Channel::LogClear, move |_| record(&seen, label));
        }

        bus.emit(Event::LogClear);
        assert_eq!(*seen.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_removed_handler_never_fires() {
        let bus = EventBus::new();
        let seen = Arc::new(StdMutex::new(Vec::new()));

        let kept = {
            let seen = Arc::clone(&seen);
            bus.subscribe(Channel::LogClear, move |_| record(&seen, "kept"))
        };
        let removed = {
            let seen = Arc::clone(&seen);
            bus.subscribe(Channel::LogClear, move |_| record(&seen, "removed"))
        };

        bus.unsubscribe(Channel::LogClear, Some(removed));
        bus.emit(Event::LogClear);

        assert_eq!(*seen.lock().unwrap(), vec!["kept"]);
        let _ = kept;
    }

    #[test]
    fn test_unsubscribe_all_clears_channel() {
        let bus = EventBus::new();
        bus.subscribe(Channel::Log, |_| {});
        bus.subscribe(Channel::Log, |_| {});
        assert_eq!(bus.listener_count(Channel::Log), 2);

        bus.unsubscribe(Channel::Log, None);
        assert_eq!(bus.listener_count(Channel::Log), 0);
    }

    #[test]
    fn test_emit_without_listeners_is_silent() {
        let bus = EventBus::new();
        bus.emit(Event::SplitDragEnd);
    }

    #[test]
    fn test_panicking_handler_does_not_block_delivery() {
        let bus = EventBus::new();
        let seen = Arc::new(StdMutex::new(Vec::new()));

        bus.subscribe(Channel::TestCaseLog, |_| panic!("bad listener"));
        {
            let seen = Arc::clone(&seen);
            bus.subscribe(Channel::TestCaseLog, move |event| {
                if let Event::TestCaseLog(text) = event {
                    record(&seen, text);
                }
            });
        }

        bus.emit(Event::TestCaseLog("still delivered".to_string()));
        assert_eq!(*seen.lock().unwrap(), vec!["still delivered"]);
    }

    #[test]
    fn test_delivery_is_scoped_to_the_event_channel() {
        let bus = EventBus::new();
        let seen = Arc::new(StdMutex::new(Vec::new()));
        {
            let seen = Arc::clone(&seen);
            bus.subscribe(Channel::Log, move |_| record(&seen, "log"));
        }

        bus.emit(Event::LogClear);
        assert!(seen.lock().unwrap().is_empty());

        bus.emit(Event::Log(crate::log::LogEntry::info("hello")));
        assert_eq!(*seen.lock().unwrap(), vec!["log"]);
    }

    #[test]
    fn test_subscription_during_emit_takes_effect_next_emission() {
        let bus = Arc::new(EventBus::new());
        let seen = Arc::new(StdMutex::new(Vec::new()));

        {
            let bus2 = Arc::clone(&bus);
            let seen = Arc::clone(&seen);
            bus.subscribe(Channel::LogClear, move |_| {
                let seen = Arc::clone(&seen);
                bus2.subscribe(Channel::LogClear, move |_| record(&seen, "late"));
            });
        }

        bus.emit(Event::LogClear);
        assert!(seen.lock().unwrap().is_empty());

        bus.emit(Event::LogClear);
        assert_eq!(*seen.lock().unwrap(), vec!["late"]);
    }
}
