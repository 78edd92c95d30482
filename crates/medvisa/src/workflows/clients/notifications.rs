use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NotificationId(pub u64);

/// Audience classification for a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Status,
    Client,
    System,
}

impl NotificationKind {
    pub const fn label(self) -> &'static str {
        match self {
            NotificationKind::Status => "status",
            NotificationKind::Client => "client",
            NotificationKind::System => "system",
        }
    }
}

/// Message emitted by the workflow engine before an id and timestamp are
/// assigned at publication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationDraft {
    pub message: String,
    pub kind: NotificationKind,
}

impl NotificationDraft {
    pub fn new(message: impl Into<String>, kind: NotificationKind) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }
}

/// Stored user/system-facing event record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub timestamp: DateTime<Utc>,
    pub read: bool,
}

/// Ordered collection of notifications, newest first by insertion.
///
/// Insertion order is authoritative: entries recorded in the same instant keep
/// the order they were added in. The unread count is always recomputed, never
/// stored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotificationLog {
    entries: Vec<Notification>,
    next_id: u64,
}

impl NotificationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a log from previously persisted notifications (newest first).
    pub fn from_entries(entries: Vec<Notification>) -> Self {
        let next_id = entries.iter().map(|n| n.id.0 + 1).max().unwrap_or(0);
        Self { entries, next_id }
    }

    /// Record a new unread notification at the head of the log.
    pub fn record(
        &mut self,
        message: impl Into<String>,
        kind: NotificationKind,
        now: DateTime<Utc>,
    ) -> Notification {
        let notification = Notification {
            id: NotificationId(self.next_id),
            message: message.into(),
            kind,
            timestamp: now,
            read: false,
        };
        self.next_id += 1;
        self.entries.insert(0, notification.clone());
        notification
    }

    /// Mark one notification as read. Unknown ids and already-read entries are
    /// a no-op, so repeated calls converge on the same log.
    pub fn mark_read(&mut self, id: NotificationId) -> bool {
        match self.entries.iter_mut().find(|n| n.id == id) {
            Some(entry) if !entry.read => {
                entry.read = true;
                true
            }
            _ => false,
        }
    }

    /// Mark every notification as read. Idempotent.
    pub fn mark_all_read(&mut self) {
        for entry in &mut self.entries {
            entry.read = true;
        }
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.entries
    }

    pub fn unread_count(&self) -> usize {
        self.entries.iter().filter(|n| !n.read).count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
