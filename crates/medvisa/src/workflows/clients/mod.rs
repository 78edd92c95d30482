//! Client workflow pipeline: intake, appointment booking, medical results,
//! and the notification side effects derived from status transitions.

pub mod domain;
pub mod engine;
pub mod history;
pub mod notifications;
pub mod report;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    Appointment, AppointmentId, BookingStatus, Client, ClientId, ClientProfile,
    MedicalResultStatus, PaymentStatus, StatusChange, ValidationError,
};
pub use engine::AppointmentPatch;
pub use history::{AuditTrail, HistoryEntry};
pub use notifications::{
    Notification, NotificationDraft, NotificationId, NotificationKind, NotificationLog,
};
pub use report::{BookingBreakdownEntry, DashboardSnapshot};
pub use repository::{
    ClientRepository, ClientSummaryView, NotificationPublisher, PublishError, RepositoryError,
};
pub use router::client_router;
pub use service::{ClientServiceError, ClientWorkflowService, StatusUpdate};
