//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Notification delivery channels

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{error, info};

use super::model::Notification;

/// Notification delivery error
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Delivery failed: {0}")]
    Delivery(String),
}

impl NotifyError {
    pub fn delivery(msg: String) -> Self {
        Self::Delivery(msg)
    }
}

/// Outbound notification channel
#[async_trait]
pub trait Notifier: Send + Sync + std::fmt::Debug {
    /// Send a notification
    async fn send(&self, notification: &Notification) -> Result<(), NotifyError>;
}

/// Send a notification, logging and swallowing failures
pub async fn deliver(notifier: &dyn Notifier, notification: &Notification) -> bool {
    match notifier.send(notification).await {
        Ok(()) => true,
        Err(e) => {
            error!(
                "Failed to deliver {} notification to {}: {}",
                notification.template, notification.recipient, e
            );
            false
        }
    }
}

/// Notifier that writes to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, notification: &Notification) -> Result<(), NotifyError> {
        info!(
            "Notification [{}] \"{}\" to {}",
            notification.template,
            notification.template.subject(),
            notification.recipient
        );
        Ok(())
    }
}

/// Notifier that keeps every sent notification in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryNotifier {
    /// Sent notifications
    outbox: Arc<RwLock<Vec<Notification>>>,

    /// Whether deliveries fail
    failing: Arc<AtomicBool>,
}

impl MemoryNotifier {
    /// Create an empty notifier
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following delivery fail (or succeed again)
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Sent notifications, oldest first
    pub async fn outbox(&self) -> Vec<Notification> {
        self.outbox.read().await.clone()
    }

    /// Most recent notification for a recipient
    pub async fn last_for(&self, recipient: &str) -> Option<Notification> {
        self.outbox
            .read()
            .await
            .iter()
            .rev()
            .find(|notification| notification.recipient == recipient)
            .cloned()
    }
}

#[async_trait]
impl Notifier for MemoryNotifier {
    async fn send(&self, notification: &Notification) -> Result<(), NotifyError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(NotifyError::delivery(format!(
                "Mailbox for {} is unreachable",
                notification.recipient
            )));
        }

        self.outbox.write().await.push(notification.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_notifier_records_outbox() {
        let notifier = MemoryNotifier::new();
        assert!(deliver(&notifier, &Notification::registration("a@x.com", "pw")).await);
        assert!(deliver(&notifier, &Notification::registration("b@x.com", "pw")).await);

        assert_eq!(notifier.outbox().await.len(), 2);
        let last = notifier.last_for("a@x.com").await.unwrap();
        assert_eq!(last.recipient, "a@x.com");
        assert!(notifier.last_for("c@x.com").await.is_none());
    }

    #[tokio::test]
    async fn test_failed_delivery_is_swallowed() {
        let notifier = MemoryNotifier::new();
        notifier.set_failing(true);

        let notification = Notification::registration("a@x.com", "pw");
        assert!(notifier.send(&notification).await.is_err());
        assert!(!deliver(&notifier, &notification).await);
        assert!(notifier.outbox().await.is_empty());

        notifier.set_failing(false);
        assert!(deliver(&notifier, &notification).await);
    }

    #[tokio::test]
    async fn test_log_notifier_never_fails() {
        assert!(deliver(&LogNotifier, &Notification::registration("a@x.com", "pw")).await);
    }
}
