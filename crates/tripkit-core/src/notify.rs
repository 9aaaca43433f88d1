// ── User-facing notifications ──
//
// Ephemeral success/error messages raised by mutating repository actions.
// Reads never notify. Consumers subscribe to the broadcast channel and
// render however they like (the CLI prints them to stderr).

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::{info, warn};
use uuid::Uuid;

const NOTIFICATION_CHANNEL_SIZE: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display, strum::AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    pub id: Uuid,
    pub level: NotificationLevel,
    pub message: String,
    pub at: DateTime<Utc>,
}

/// Cheaply cloneable handle to the notification channel.
#[derive(Debug, Clone)]
pub struct Notifier {
    tx: broadcast::Sender<Arc<Notification>>,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(NOTIFICATION_CHANNEL_SIZE);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Arc<Notification>> {
        self.tx.subscribe()
    }

    pub fn success(&self, message: impl Into<String>) {
        let message = message.into();
        info!(%message, "notification");
        self.emit(NotificationLevel::Success, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        let message = message.into();
        warn!(%message, "notification");
        self.emit(NotificationLevel::Error, message);
    }

    fn emit(&self, level: NotificationLevel, message: String) {
        // No subscribers is fine.
        let _ = self.tx.send(Arc::new(Notification {
            id: Uuid::new_v4(),
            level,
            message,
            at: Utc::now(),
        }));
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscribers_receive_in_order() {
        let notifier = Notifier::new();
        let mut rx = notifier.subscribe();

        notifier.success("Tour created successfully");
        notifier.error("Tour title is required");

        let first = rx.recv().await.unwrap();
        let second = rx.recv().await.unwrap();
        assert_eq!(first.level, NotificationLevel::Success);
        assert_eq!(second.message, "Tour title is required");
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn emitting_without_subscribers_is_harmless() {
        Notifier::new().success("nobody listening");
    }
}
