use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::history::AuditTrail;

/// Identifier wrapper for registered clients.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClientId(pub String);

/// Identifier wrapper for appointments owned by a client.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AppointmentId(pub String);

static CLIENT_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static APPOINTMENT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

pub(crate) fn next_client_id() -> ClientId {
    let id = CLIENT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ClientId(format!("client-{id:06}"))
}

pub(crate) fn next_appointment_id() -> AppointmentId {
    let id = APPOINTMENT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    AppointmentId(format!("appt-{id:06}"))
}

/// Lifecycle stage of scheduling a medical appointment through the Wafid portal.
///
/// The enum states an intended progression (top to bottom), but transitions are
/// recorded, not validated: operators routinely move cases backward or cancel
/// from any stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BookingStatus {
    #[serde(rename = "Not Initiated")]
    NotInitiated,
    #[serde(rename = "Data Prepared")]
    DataPrepared,
    #[serde(rename = "Booking In Progress")]
    BookingInProgress,
    #[serde(rename = "Booked - Pending Confirmation")]
    BookedPendingConfirmation,
    #[serde(rename = "Booked - Confirmed")]
    BookedConfirmed,
    #[serde(rename = "Cancelled")]
    Cancelled,
}

impl BookingStatus {
    pub const ALL: [BookingStatus; 6] = [
        BookingStatus::NotInitiated,
        BookingStatus::DataPrepared,
        BookingStatus::BookingInProgress,
        BookingStatus::BookedPendingConfirmation,
        BookingStatus::BookedConfirmed,
        BookingStatus::Cancelled,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            BookingStatus::NotInitiated => "Not Initiated",
            BookingStatus::DataPrepared => "Data Prepared",
            BookingStatus::BookingInProgress => "Booking In Progress",
            BookingStatus::BookedPendingConfirmation => "Booked - Pending Confirmation",
            BookingStatus::BookedConfirmed => "Booked - Confirmed",
            BookingStatus::Cancelled => "Cancelled",
        }
    }
}

/// Outcome classification of the medical examination.
///
/// The last six variants are legacy values still present in stored records;
/// new transitions only use the first five.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MedicalResultStatus {
    #[serde(rename = "Pending Results")]
    PendingResults,
    #[serde(rename = "Fit")]
    Fit,
    #[serde(rename = "Unfit")]
    Unfit,
    #[serde(rename = "Requires Re-examination")]
    RequiresReExamination,
    #[serde(rename = "N/A")]
    NotApplicable,
    #[serde(rename = "Pending Info")]
    PendingInfo,
    #[serde(rename = "Appointment Booked")]
    AppointmentBooked,
    #[serde(rename = "Medical Done")]
    MedicalDone,
    #[serde(rename = "Results Awaiting")]
    ResultsAwaiting,
    #[serde(rename = "Absent")]
    Absent,
    #[serde(rename = "Referred")]
    Referred,
}

impl MedicalResultStatus {
    pub const fn label(self) -> &'static str {
        match self {
            MedicalResultStatus::PendingResults => "Pending Results",
            MedicalResultStatus::Fit => "Fit",
            MedicalResultStatus::Unfit => "Unfit",
            MedicalResultStatus::RequiresReExamination => "Requires Re-examination",
            MedicalResultStatus::NotApplicable => "N/A",
            MedicalResultStatus::PendingInfo => "Pending Info",
            MedicalResultStatus::AppointmentBooked => "Appointment Booked",
            MedicalResultStatus::MedicalDone => "Medical Done",
            MedicalResultStatus::ResultsAwaiting => "Results Awaiting",
            MedicalResultStatus::Absent => "Absent",
            MedicalResultStatus::Referred => "Referred",
        }
    }

    /// Final examination outcomes that trigger result notifications.
    pub const fn is_conclusive(self) -> bool {
        matches!(
            self,
            MedicalResultStatus::Fit
                | MedicalResultStatus::Unfit
                | MedicalResultStatus::RequiresReExamination
        )
    }

    /// Outcomes that require case-management follow-up.
    pub const fn needs_follow_up(self) -> bool {
        matches!(
            self,
            MedicalResultStatus::Unfit | MedicalResultStatus::RequiresReExamination
        )
    }
}

/// Payment state associated with an appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentStatus {
    #[serde(rename = "Pending Payment")]
    PendingPayment,
    #[serde(rename = "Paid")]
    Paid,
    #[serde(rename = "N/A")]
    NotApplicable,
    #[serde(rename = "Pending")]
    Pending,
    #[serde(rename = "Failed")]
    Failed,
}

impl PaymentStatus {
    pub const fn label(self) -> &'static str {
        match self {
            PaymentStatus::PendingPayment => "Pending Payment",
            PaymentStatus::Paid => "Paid",
            PaymentStatus::NotApplicable => "N/A",
            PaymentStatus::Pending => "Pending",
            PaymentStatus::Failed => "Failed",
        }
    }
}

/// Tagged status value recorded in the audit trail, so downstream consumers can
/// dispatch on the axis without inspecting the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "axis", content = "value", rename_all = "snake_case")]
pub enum StatusChange {
    Booking(BookingStatus),
    Medical(MedicalResultStatus),
}

impl StatusChange {
    pub const fn label(self) -> &'static str {
        match self {
            StatusChange::Booking(status) => status.label(),
            StatusChange::Medical(status) => status.label(),
        }
    }
}

/// Medical appointment owned by exactly one client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: AppointmentId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wafid_application_id: Option<String>,
    #[serde(default, deserialize_with = "flexible::optional_datetime")]
    pub appointment_date: Option<DateTime<Utc>>,
    /// Slot time as supplied by the booking portal, e.g. "14:30".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appointment_time: Option<String>,
    pub medical_center_name: String,
    pub payment_status: PaymentStatus,
    pub booking_status: BookingStatus,
    pub medical_result_status: MedicalResultStatus,
    pub booking_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medical_slip_url: Option<String>,
    #[serde(default)]
    pub history: AuditTrail,
}

/// Client moving through the intake, booking, and medical-result pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: ClientId,
    pub first_name: String,
    pub last_name: String,
    pub passport_number: String,
    pub nationality: String,
    pub date_of_birth: NaiveDate,
    pub contact_number: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appointment: Option<Appointment>,
}

impl Client {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Intake form for registering a new client. Ids and the default appointment
/// are assigned by the service, never supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientProfile {
    pub first_name: String,
    pub last_name: String,
    pub passport_number: String,
    pub nationality: String,
    pub date_of_birth: NaiveDate,
    pub contact_number: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl ClientProfile {
    /// Reject the intake before any mutation if a required field is blank.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let required = [
            ("firstName", &self.first_name),
            ("lastName", &self.last_name),
            ("passportNumber", &self.passport_number),
            ("nationality", &self.nationality),
            ("contactNumber", &self.contact_number),
            ("email", &self.email),
        ];

        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ValidationError::MissingField(field));
            }
        }

        Ok(())
    }
}

/// Intake validation failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("required field '{0}' is missing or empty")]
    MissingField(&'static str),
}

pub(crate) mod flexible {
    //! Accepts RFC 3339 timestamps, bare `YYYY-MM-DD` dates, or empty strings
    //! (treated as unset) when deserializing appointment dates.

    use chrono::{DateTime, NaiveDate, Utc};
    use serde::{Deserialize, Deserializer};

    pub(crate) fn optional_datetime<'de, D>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        let Some(raw) = raw else { return Ok(None) };

        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }

        if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
            return Ok(Some(parsed.with_timezone(&Utc)));
        }

        if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            let midnight = date.and_hms_opt(0, 0, 0).expect("midnight is valid");
            return Ok(Some(DateTime::from_naive_utc_and_offset(midnight, Utc)));
        }

        Err(serde::de::Error::custom(format!(
            "'{trimmed}' is neither an RFC 3339 timestamp nor a YYYY-MM-DD date"
        )))
    }
}
