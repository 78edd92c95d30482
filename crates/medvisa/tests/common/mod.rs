#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use medvisa::workflows::clients::{
    Client, ClientId, ClientProfile, ClientRepository, ClientWorkflowService, Notification,
    NotificationDraft, NotificationLog, NotificationPublisher, PublishError, RepositoryError,
};

pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub fn aisha() -> ClientProfile {
    ClientProfile {
        first_name: "Aisha".to_string(),
        last_name: "Khan".to_string(),
        passport_number: "AK1234567".to_string(),
        nationality: "Pakistani".to_string(),
        date_of_birth: NaiveDate::from_ymd_opt(1992, 3, 14).expect("valid date"),
        contact_number: "+92-300-1234567".to_string(),
        email: "aisha.khan@example.com".to_string(),
        profile_picture: None,
        location: Some("Lahore".to_string()),
    }
}

pub fn farhan() -> ClientProfile {
    ClientProfile {
        first_name: "Farhan".to_string(),
        last_name: "Ahmed".to_string(),
        passport_number: "FA7654321".to_string(),
        nationality: "Bangladeshi".to_string(),
        date_of_birth: NaiveDate::from_ymd_opt(1988, 11, 2).expect("valid date"),
        contact_number: "+880-17-7654321".to_string(),
        email: "farhan.ahmed@example.com".to_string(),
        profile_picture: None,
        location: None,
    }
}

#[derive(Default)]
pub struct MemoryRepository {
    clients: Mutex<Vec<Client>>,
}

impl ClientRepository for MemoryRepository {
    fn insert(&self, client: Client) -> Result<Client, RepositoryError> {
        let mut guard = self.clients.lock().expect("repository mutex poisoned");
        if guard.iter().any(|existing| existing.id == client.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(0, client.clone());
        Ok(client)
    }

    fn update(&self, client: Client) -> Result<(), RepositoryError> {
        let mut guard = self.clients.lock().expect("repository mutex poisoned");
        match guard.iter_mut().find(|existing| existing.id == client.id) {
            Some(slot) => {
                *slot = client;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch(&self, id: &ClientId) -> Result<Option<Client>, RepositoryError> {
        let guard = self.clients.lock().expect("repository mutex poisoned");
        Ok(guard.iter().find(|client| &client.id == id).cloned())
    }

    fn snapshot(&self) -> Result<Vec<Client>, RepositoryError> {
        let guard = self.clients.lock().expect("repository mutex poisoned");
        Ok(guard.clone())
    }
}

#[derive(Default)]
pub struct MemoryHub {
    log: Mutex<NotificationLog>,
}

impl NotificationPublisher for MemoryHub {
    fn publish(
        &self,
        draft: NotificationDraft,
        now: DateTime<Utc>,
    ) -> Result<Notification, PublishError> {
        let mut log = self.log.lock().expect("notification mutex poisoned");
        Ok(log.record(draft.message, draft.kind, now))
    }
}

impl MemoryHub {
    pub fn notifications(&self) -> Vec<Notification> {
        self.log
            .lock()
            .expect("notification mutex poisoned")
            .notifications()
            .to_vec()
    }
}

pub fn build_service() -> (
    Arc<ClientWorkflowService<MemoryRepository, MemoryHub>>,
    Arc<MemoryRepository>,
    Arc<MemoryHub>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let hub = Arc::new(MemoryHub::default());
    let service = Arc::new(ClientWorkflowService::new(repository.clone(), hub.clone()));
    (service, repository, hub)
}
