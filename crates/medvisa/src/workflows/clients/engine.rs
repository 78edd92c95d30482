//! Transition and side-effect logic for booking and medical-result status.
//!
//! The engine is a recorder, not a validator: any requested transition is
//! accepted and written to the audit trail, including repeats, backward moves,
//! and moves out of conventionally terminal states. Restricting reachability
//! (e.g. forbidding transitions out of `Cancelled`) is a pending product
//! decision; until it lands, operators rely on being able to correct cases
//! freely.
//!
//! Nothing here performs I/O or reads a clock. Callers supply `now` and
//! publish the returned drafts themselves.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::domain::{
    next_appointment_id, Appointment, BookingStatus, Client, MedicalResultStatus, PaymentStatus,
    StatusChange,
};
use super::history::AuditTrail;
use super::notifications::{NotificationDraft, NotificationKind};

/// Appointment attached to every newly registered client.
pub fn bootstrap_appointment(now: DateTime<Utc>) -> Appointment {
    Appointment {
        id: next_appointment_id(),
        wafid_application_id: None,
        appointment_date: None,
        appointment_time: None,
        medical_center_name: String::new(),
        payment_status: PaymentStatus::NotApplicable,
        booking_status: BookingStatus::NotInitiated,
        medical_result_status: MedicalResultStatus::NotApplicable,
        booking_date: now,
        medical_slip_url: None,
        history: AuditTrail::seeded(
            StatusChange::Booking(BookingStatus::NotInitiated),
            now,
            "New client profile created.",
        ),
    }
}

/// Set the booking status and record the change.
///
/// Every call appends exactly one trail entry, even when `new_status` equals
/// the current value; re-applying `DataPrepared` therefore also re-emits the
/// export task. That duplication mirrors the upstream system and is kept
/// pending product clarification.
pub fn apply_booking_status(
    appointment: &mut Appointment,
    new_status: BookingStatus,
    client: &Client,
    now: DateTime<Utc>,
) -> Vec<NotificationDraft> {
    appointment.booking_status = new_status;
    appointment.history.record(
        StatusChange::Booking(new_status),
        now,
        format!("Booking status updated to {}.", new_status.label()),
    );

    let mut drafts = Vec::new();
    if new_status == BookingStatus::DataPrepared {
        drafts.push(NotificationDraft::new(
            format!(
                "Task created for Wafid Booking Team: Export data for {}.",
                client.full_name()
            ),
            NotificationKind::System,
        ));
    }
    drafts
}

/// Set the medical-result status and record the change.
///
/// Conclusive outcomes notify the client-facing channel; Unfit and
/// Requires Re-examination additionally raise a high-priority case-management
/// task.
pub fn apply_medical_result_status(
    appointment: &mut Appointment,
    new_status: MedicalResultStatus,
    client: &Client,
    now: DateTime<Utc>,
) -> Vec<NotificationDraft> {
    appointment.medical_result_status = new_status;
    appointment.history.record(
        StatusChange::Medical(new_status),
        now,
        format!("Medical result status updated to {}.", new_status.label()),
    );

    let mut drafts = Vec::new();
    if new_status.is_conclusive() {
        drafts.push(NotificationDraft::new(
            format!(
                "Wafid results for {} are now \"{}\".",
                client.full_name(),
                new_status.label()
            ),
            NotificationKind::Status,
        ));
        if new_status.needs_follow_up() {
            drafts.push(NotificationDraft::new(
                format!(
                    "High-priority task for Case Management: Address Wafid result for {}.",
                    client.full_name()
                ),
                NotificationKind::System,
            ));
        }
    }
    drafts
}

/// Partial appointment update used by the booking workflow, where several
/// fields (date, time, center, payment, booking status) are set together.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentPatch {
    #[serde(default)]
    pub wafid_application_id: Option<String>,
    #[serde(default, deserialize_with = "super::domain::flexible::optional_datetime")]
    pub appointment_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub appointment_time: Option<String>,
    #[serde(default)]
    pub medical_center_name: Option<String>,
    #[serde(default)]
    pub payment_status: Option<PaymentStatus>,
    #[serde(default)]
    pub booking_status: Option<BookingStatus>,
    #[serde(default)]
    pub medical_result_status: Option<MedicalResultStatus>,
    #[serde(default)]
    pub medical_slip_url: Option<String>,
}

/// Rebuild the appointment from three layers with field-level precedence:
/// patch over existing over engine defaults. A field omitted from the patch
/// falls back to the existing appointment's value (even when that value is
/// unset), never to a stale default; only a client with no appointment at all
/// gets the defaults.
fn merged(
    existing: Option<&Appointment>,
    patch: &AppointmentPatch,
    now: DateTime<Utc>,
) -> Appointment {
    Appointment {
        id: existing
            .map(|a| a.id.clone())
            .unwrap_or_else(next_appointment_id),
        wafid_application_id: patch
            .wafid_application_id
            .clone()
            .or_else(|| existing.and_then(|a| a.wafid_application_id.clone())),
        appointment_date: match (patch.appointment_date, existing) {
            (Some(date), _) => Some(date),
            (None, Some(current)) => current.appointment_date,
            (None, None) => Some(now),
        },
        appointment_time: match (&patch.appointment_time, existing) {
            (Some(time), _) => Some(time.clone()),
            (None, Some(current)) => current.appointment_time.clone(),
            (None, None) => None,
        },
        medical_center_name: patch
            .medical_center_name
            .clone()
            .or_else(|| existing.map(|a| a.medical_center_name.clone()))
            .unwrap_or_default(),
        payment_status: patch
            .payment_status
            .or_else(|| existing.map(|a| a.payment_status))
            .unwrap_or(PaymentStatus::NotApplicable),
        booking_status: patch
            .booking_status
            .or_else(|| existing.map(|a| a.booking_status))
            .unwrap_or(BookingStatus::NotInitiated),
        medical_result_status: patch
            .medical_result_status
            .or_else(|| existing.map(|a| a.medical_result_status))
            .unwrap_or(MedicalResultStatus::NotApplicable),
        booking_date: existing.map(|a| a.booking_date).unwrap_or(now),
        medical_slip_url: match (&patch.medical_slip_url, existing) {
            (Some(url), _) => Some(url.clone()),
            (None, Some(current)) => current.medical_slip_url.clone(),
            (None, None) => None,
        },
        // The trail is always carried forward as-is, never regenerated.
        history: existing.map(|a| a.history.clone()).unwrap_or_default(),
    }
}

/// Apply a multi-field booking update, detecting the transition into
/// `BookedConfirmed`.
///
/// History and notifications are produced only when the patch newly confirms
/// the booking. Once confirmed, further patches (including re-sending
/// `BookedConfirmed`) update fields silently.
pub fn confirm_or_replace(
    client: &Client,
    existing: Option<Appointment>,
    patch: AppointmentPatch,
    now: DateTime<Utc>,
) -> (Appointment, Vec<NotificationDraft>) {
    let was_confirmed = existing
        .as_ref()
        .map(|a| a.booking_status == BookingStatus::BookedConfirmed)
        .unwrap_or(false);

    let mut appointment = merged(existing.as_ref(), &patch, now);
    let mut drafts = Vec::new();

    if patch.booking_status == Some(BookingStatus::BookedConfirmed) && !was_confirmed {
        appointment.history.record(
            StatusChange::Booking(BookingStatus::BookedConfirmed),
            now,
            "Appointment booked.",
        );

        let scheduled = appointment
            .appointment_date
            .unwrap_or(now)
            .format("%Y-%m-%d");
        drafts.push(NotificationDraft::new(
            format!("Email confirmation simulated for {}.", client.full_name()),
            NotificationKind::Client,
        ));
        drafts.push(NotificationDraft::new(
            format!(
                "Internal alert: Wafid appointment booked for {} on {scheduled}.",
                client.first_name
            ),
            NotificationKind::System,
        ));
    }

    (appointment, drafts)
}
