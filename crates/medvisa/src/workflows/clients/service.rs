use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::domain::{
    next_client_id, BookingStatus, Client, ClientId, ClientProfile, MedicalResultStatus,
    ValidationError,
};
use super::engine::{self, AppointmentPatch};
use super::notifications::{NotificationDraft, NotificationKind};
use super::report::DashboardSnapshot;
use super::repository::{ClientRepository, NotificationPublisher, PublishError, RepositoryError};

/// Requested status change for one or both axes. Omitted axes are untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdate {
    #[serde(default)]
    pub booking_status: Option<BookingStatus>,
    #[serde(default)]
    pub medical_result_status: Option<MedicalResultStatus>,
}

/// Service owning the client pipeline: it validates intake, delegates
/// transitions to the workflow engine, and forwards the resulting
/// notifications to the publisher.
pub struct ClientWorkflowService<R, N> {
    repository: Arc<R>,
    notifier: Arc<N>,
}

impl<R, N> ClientWorkflowService<R, N>
where
    R: ClientRepository + 'static,
    N: NotificationPublisher + 'static,
{
    pub fn new(repository: Arc<R>, notifier: Arc<N>) -> Self {
        Self {
            repository,
            notifier,
        }
    }

    /// Register a new client with the default appointment attached.
    ///
    /// Validation failures reject the intake before anything is stored or
    /// published.
    pub fn add_client(
        &self,
        profile: ClientProfile,
        now: DateTime<Utc>,
    ) -> Result<Client, ClientServiceError> {
        profile.validate()?;

        let client = Client {
            id: next_client_id(),
            first_name: profile.first_name,
            last_name: profile.last_name,
            passport_number: profile.passport_number,
            nationality: profile.nationality,
            date_of_birth: profile.date_of_birth,
            contact_number: profile.contact_number,
            email: profile.email,
            profile_picture: profile.profile_picture,
            location: profile.location,
            appointment: Some(engine::bootstrap_appointment(now)),
        };

        let stored = self.repository.insert(client)?;
        self.notifier.publish(
            NotificationDraft::new(
                format!("New client \"{}\" has been added.", stored.full_name()),
                NotificationKind::Client,
            ),
            now,
        )?;

        Ok(stored)
    }

    /// Point lookup. `Ok(None)` is the valid not-found result, not an error.
    pub fn client(&self, id: &ClientId) -> Result<Option<Client>, ClientServiceError> {
        Ok(self.repository.fetch(id)?)
    }

    /// Snapshot of the collection, newest first.
    pub fn clients(&self) -> Result<Vec<Client>, ClientServiceError> {
        Ok(self.repository.snapshot()?)
    }

    /// Apply the requested status changes through the engine.
    ///
    /// An unknown client id mutates nothing, publishes nothing, and returns
    /// `Ok(None)` — the upstream system behaves this way and callers depend on
    /// it, so it is preserved rather than turned into an error. A client with
    /// no appointment is returned unchanged for the same reason.
    ///
    /// When both axes are supplied, booking is applied first, then medical;
    /// each applied axis appends its own trail entry.
    pub fn update_status(
        &self,
        id: &ClientId,
        update: StatusUpdate,
        now: DateTime<Utc>,
    ) -> Result<Option<Client>, ClientServiceError> {
        let Some(mut client) = self.repository.fetch(id)? else {
            return Ok(None);
        };
        let Some(mut appointment) = client.appointment.take() else {
            return Ok(Some(client));
        };

        let mut drafts = Vec::new();
        if let Some(status) = update.booking_status {
            drafts.extend(engine::apply_booking_status(
                &mut appointment,
                status,
                &client,
                now,
            ));
        }
        if let Some(status) = update.medical_result_status {
            drafts.extend(engine::apply_medical_result_status(
                &mut appointment,
                status,
                &client,
                now,
            ));
        }

        client.appointment = Some(appointment);
        self.repository.update(client.clone())?;
        self.publish_all(drafts, now)?;

        Ok(Some(client))
    }

    /// Replace or update the appointment through the booking workflow.
    ///
    /// Same lookup discipline as [`Self::update_status`]: unknown ids are a
    /// silent no-op.
    pub fn update_appointment(
        &self,
        id: &ClientId,
        patch: AppointmentPatch,
        now: DateTime<Utc>,
    ) -> Result<Option<Client>, ClientServiceError> {
        let Some(mut client) = self.repository.fetch(id)? else {
            return Ok(None);
        };

        let existing = client.appointment.take();
        let (appointment, drafts) = engine::confirm_or_replace(&client, existing, patch, now);

        client.appointment = Some(appointment);
        self.repository.update(client.clone())?;
        self.publish_all(drafts, now)?;

        Ok(Some(client))
    }

    /// Aggregate counters over the current collection.
    pub fn dashboard(&self) -> Result<DashboardSnapshot, ClientServiceError> {
        let clients = self.repository.snapshot()?;
        Ok(DashboardSnapshot::from_clients(&clients))
    }

    fn publish_all(
        &self,
        drafts: Vec<NotificationDraft>,
        now: DateTime<Utc>,
    ) -> Result<(), ClientServiceError> {
        for draft in drafts {
            self.notifier.publish(draft, now)?;
        }
        Ok(())
    }
}

/// Error raised by the client workflow service.
#[derive(Debug, thiserror::Error)]
pub enum ClientServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Publish(#[from] PublishError),
}
