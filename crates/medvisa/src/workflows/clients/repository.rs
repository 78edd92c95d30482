use chrono::{DateTime, Utc};
use serde::Serialize;

use super::domain::{Client, ClientId};
use super::notifications::{Notification, NotificationDraft};

/// Storage abstraction over the authoritative client collection, so the
/// service module can be exercised in isolation.
///
/// Implementations own the single shared collection and must serialize writes
/// (the engine assumes one logical writer per client); the in-memory adapter
/// does this with a mutex.
pub trait ClientRepository: Send + Sync {
    /// Store a new client at the head of the collection (newest first).
    fn insert(&self, client: Client) -> Result<Client, RepositoryError>;
    fn update(&self, client: Client) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &ClientId) -> Result<Option<Client>, RepositoryError>;
    /// Copy of the current collection, newest first.
    fn snapshot(&self) -> Result<Vec<Client>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("client already exists")]
    Conflict,
    #[error("client not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Outbound notification hook. Implementations persist the draft, assign it an
/// id, and echo back the stored notification.
pub trait NotificationPublisher: Send + Sync {
    fn publish(
        &self,
        draft: NotificationDraft,
        now: DateTime<Utc>,
    ) -> Result<Notification, PublishError>;
}

/// Notification dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("notification transport unavailable: {0}")]
    Transport(String),
}

/// Sanitized listing row for a client, with the status labels the dashboard
/// renders.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientSummaryView {
    pub id: ClientId,
    pub full_name: String,
    pub passport_number: String,
    pub nationality: String,
    pub booking_status: &'static str,
    pub medical_result_status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appointment_date: Option<DateTime<Utc>>,
}

impl ClientSummaryView {
    pub fn from_client(client: &Client) -> Self {
        let appointment = client.appointment.as_ref();
        Self {
            id: client.id.clone(),
            full_name: client.full_name(),
            passport_number: client.passport_number.clone(),
            nationality: client.nationality.clone(),
            booking_status: appointment
                .map(|a| a.booking_status.label())
                .unwrap_or("Not Initiated"),
            medical_result_status: appointment
                .map(|a| a.medical_result_status.label())
                .unwrap_or("N/A"),
            appointment_date: appointment.and_then(|a| a.appointment_date),
        }
    }
}
