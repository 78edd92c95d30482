use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use metrics_exporter_prometheus::PrometheusHandle;

use medvisa::workflows::clients::{
    Client, ClientId, ClientRepository, Notification, NotificationDraft, NotificationLog,
    NotificationPublisher, PublishError, RepositoryError,
};

pub(crate) type SharedNotificationLog = Arc<Mutex<NotificationLog>>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) notifications: SharedNotificationLog,
}

/// Authoritative in-memory client collection, newest first. The mutex is the
/// single-writer discipline: concurrent callers against the same client id
/// serialize here.
#[derive(Default, Clone)]
pub(crate) struct InMemoryClientRepository {
    clients: Arc<Mutex<Vec<Client>>>,
}

impl InMemoryClientRepository {
    /// Populate the collection from seed data, preserving file order.
    pub(crate) fn with_clients(clients: Vec<Client>) -> Self {
        Self {
            clients: Arc::new(Mutex::new(clients)),
        }
    }
}

impl ClientRepository for InMemoryClientRepository {
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

/// Publisher backed by the shared notification log the HTTP endpoints read.
#[derive(Clone)]
pub(crate) struct NotificationHub {
    log: SharedNotificationLog,
}

impl NotificationHub {
    pub(crate) fn new(log: SharedNotificationLog) -> Self {
        Self { log }
    }
}

impl NotificationPublisher for NotificationHub {
    fn publish(
        &self,
        draft: NotificationDraft,
        now: DateTime<Utc>,
    ) -> Result<Notification, PublishError> {
        let mut log = self.log.lock().expect("notification mutex poisoned");
        Ok(log.record(draft.message, draft.kind, now))
    }
}
