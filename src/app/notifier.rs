use std::collections::VecDeque;
use std::time::{Duration, Instant};

const INFO_SECS: u64 = 3;
const ERROR_SECS: u64 = 6;
/// Older messages are dropped once this many are queued.
const MAX_QUEUED: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Success,
    Error,
}

#[derive(Debug)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
    pub expires_at: Instant,
}

#[derive(Debug, Default)]
pub struct Notifier {
    notifications: VecDeque<Notification>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(message.into(), NotificationKind::Info, INFO_SECS);
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(message.into(), NotificationKind::Success, INFO_SECS);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(message.into(), NotificationKind::Error, ERROR_SECS);
    }

    /// Most recent message that has not expired yet.
    pub fn recent(&self) -> Option<&Notification> {
        let now = Instant::now();
        self.notifications.iter().rev().find(|n| n.expires_at > now)
    }

    pub fn prune_expired(&mut self) {
        let now = Instant::now();
        self.notifications.retain(|n| n.expires_at > now);
    }

    fn push(&mut self, message: String, kind: NotificationKind, secs: u64) {
        if self.notifications.len() == MAX_QUEUED {
            self.notifications.pop_front();
        }
        self.notifications.push_back(Notification {
            message,
            kind,
            expires_at: Instant::now() + Duration::from_secs(secs),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_message_wins() {
        let mut notifier = Notifier::new();
        notifier.info("exporting");
        notifier.error("export failed");
        let recent = notifier.recent().unwrap();
        assert_eq!(recent.message, "export failed");
        assert_eq!(recent.kind, NotificationKind::Error);
    }

    #[test]
    fn queue_is_bounded() {
        let mut notifier = Notifier::new();
        for i in 0..20 {
            notifier.success(format!("copied {i}"));
        }
        assert_eq!(notifier.notifications.len(), MAX_QUEUED);
        assert_eq!(notifier.recent().unwrap().message, "copied 19");
    }
}
