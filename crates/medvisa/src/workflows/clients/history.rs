use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::StatusChange;

/// Immutable record of a past status value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(flatten)]
    pub status: StatusChange,
    #[serde(rename = "date")]
    pub recorded_at: DateTime<Utc>,
    #[serde(rename = "notes")]
    pub note: String,
}

/// Append-only, insertion-ordered ledger of status changes for one
/// appointment. The only mutation is [`AuditTrail::record`]; entries are never
/// edited, removed, or reordered, so the length only grows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuditTrail(Vec<HistoryEntry>);

impl AuditTrail {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a trail with its first entry.
    pub fn seeded(status: StatusChange, recorded_at: DateTime<Utc>, note: impl Into<String>) -> Self {
        let mut trail = Self::new();
        trail.record(status, recorded_at, note);
        trail
    }

    pub fn record(
        &mut self,
        status: StatusChange,
        recorded_at: DateTime<Utc>,
        note: impl Into<String>,
    ) {
        self.0.push(HistoryEntry {
            status,
            recorded_at,
            note: note.into(),
        });
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.0
    }

    pub fn last(&self) -> Option<&HistoryEntry> {
        self.0.last()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
