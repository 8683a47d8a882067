//! Transient user-facing notifications.
//!
//! Every store operation reports its outcome here, the way a toast would.
//! Each notice is also written to the log. When the receiving side has been
//! dropped, notices are discarded.

use serde::Serialize;
use tokio::sync::mpsc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// Sending half, cloned into every component that reports to the user.
#[derive(Debug, Clone)]
pub struct Notices {
    tx: Option<mpsc::UnboundedSender<Notice>>,
}

/// Receiving half, owned by whatever displays notices.
#[derive(Debug)]
pub struct NoticeReceiver {
    rx: mpsc::UnboundedReceiver<Notice>,
}

impl Notices {
    #[must_use]
    pub fn channel() -> (Self, NoticeReceiver) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx: Some(tx) }, NoticeReceiver { rx })
    }

    /// Log-only notices, for callers with nothing to display them on.
    #[must_use]
    pub const fn silent() -> Self {
        Self { tx: None }
    }

    pub fn success(&self, message: impl Into<String>) {
        let message = message.into();
        tracing::info!(%message, "notice");
        self.send(NoticeLevel::Success, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(%message, "notice");
        self.send(NoticeLevel::Error, message);
    }

    fn send(&self, level: NoticeLevel, message: String) {
        if let Some(tx) = &self.tx {
            let _ = tx.send(Notice { level, message });
        }
    }
}

impl NoticeReceiver {
    /// Everything delivered so far, without waiting.
    pub fn drain(&mut self) -> Vec<Notice> {
        let mut notices = Vec::new();
        while let Ok(notice) = self.rx.try_recv() {
            notices.push(notice);
        }
        notices
    }

    pub async fn recv(&mut self) -> Option<Notice> {
        self.rx.recv().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn drain_returns_in_order() {
        let (notices, mut rx) = Notices::channel();
        notices.success("Task created successfully");
        notices.error("Failed to delete task");

        assert_eq!(
            rx.drain(),
            vec![
                Notice {
                    level: NoticeLevel::Success,
                    message: "Task created successfully".into()
                },
                Notice {
                    level: NoticeLevel::Error,
                    message: "Failed to delete task".into()
                },
            ]
        );
        assert!(rx.drain().is_empty());
    }

    #[test]
    fn dropped_receiver_discards() {
        let (notices, rx) = Notices::channel();
        drop(rx);
        notices.error("nobody is listening");
        Notices::silent().success("also fine");
    }
}
