//! In-process event bus
//!
//! Carries what the web storefront used window events for: cart changes,
//! storage writes seen by other store handles, and user-facing notices.

use rust_decimal::Decimal;
use serde::Serialize;
use tokio::sync::broadcast;

const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Notice severity, mirrors toast styles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// User-facing message
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AppEvent {
    /// Cart contents changed (local mutation or reload)
    CartUpdated { count: u32, total: Decimal },
    /// A store handle wrote `key`
    StorageChanged { key: String, origin: u64 },
    Notice(Notice),
}

/// Broadcast bus shared by stores, board and flows
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<AppEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<AppEvent> {
        self.tx.subscribe()
    }

    /// Publish to every subscriber; nobody listening is not an error
    pub fn publish(&self, event: AppEvent) {
        if self.tx.send(event).is_err() {
            tracing::trace!("event dropped: no active receivers");
        }
    }

    pub fn notify(&self, level: NoticeLevel, message: impl Into<String>) {
        let message = message.into();
        match level {
            NoticeLevel::Error => tracing::error!(notice = %message),
            NoticeLevel::Warning => tracing::warn!(notice = %message),
            _ => tracing::info!(notice = %message),
        }
        self.publish(AppEvent::Notice(Notice { level, message }));
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything currently buffered on `rx`, without waiting
pub fn drain(rx: &mut broadcast::Receiver<AppEvent>) -> Vec<AppEvent> {
    let mut events = Vec::new();
    loop {
        match rx.try_recv() {
            Ok(event) => events.push(event),
            Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "event receiver lagged");
            }
            Err(_) => break,
        }
    }
    events
}

/// Notices in `events`, in order
pub fn notices(events: &[AppEvent]) -> Vec<&Notice> {
    events
        .iter()
        .filter_map(|e| match e {
            AppEvent::Notice(n) => Some(n),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_without_receivers_is_silent() {
        let bus = EventBus::new();
        bus.notify(NoticeLevel::Info, "nobody hears this");
    }

    #[test]
    fn test_drain_collects_in_order() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe();
        bus.notify(NoticeLevel::Warning, "one");
        bus.publish(AppEvent::StorageChanged {
            key: "cart".into(),
            origin: 1,
        });
        let events = drain(&mut rx);
        assert_eq!(events.len(), 2);
        assert_eq!(notices(&events)[0].message, "one");
    }
}
