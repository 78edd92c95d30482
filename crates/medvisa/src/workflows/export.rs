//! CSV export for the Wafid booking team.
//!
//! Marking a client `Data Prepared` raises a task to export their data for the
//! external booking portal; this module produces that file. Column headers
//! follow the portal's bulk-upload template.

use std::io::Write;

use serde::Serialize;

use crate::workflows::clients::domain::{BookingStatus, Client};

#[derive(Debug, Serialize)]
struct BookingExportRow<'a> {
    #[serde(rename = "Passport Number")]
    passport_number: &'a str,
    #[serde(rename = "First Name")]
    first_name: &'a str,
    #[serde(rename = "Last Name")]
    last_name: &'a str,
    #[serde(rename = "Nationality")]
    nationality: &'a str,
    #[serde(rename = "Date of Birth")]
    date_of_birth: String,
    #[serde(rename = "Contact Number")]
    contact_number: &'a str,
    #[serde(rename = "Email")]
    email: &'a str,
    #[serde(rename = "Medical Center")]
    medical_center: &'a str,
    #[serde(rename = "Appointment Date")]
    appointment_date: String,
}

/// Write one row per client currently in `Data Prepared`, returning how many
/// rows were exported.
pub fn write_booking_export<W: Write>(
    clients: &[Client],
    writer: W,
) -> Result<usize, ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    let mut exported = 0;

    for client in clients {
        let Some(appointment) = client.appointment.as_ref() else {
            continue;
        };
        if appointment.booking_status != BookingStatus::DataPrepared {
            continue;
        }

        csv_writer.serialize(BookingExportRow {
            passport_number: &client.passport_number,
            first_name: &client.first_name,
            last_name: &client.last_name,
            nationality: &client.nationality,
            date_of_birth: client.date_of_birth.format("%Y-%m-%d").to_string(),
            contact_number: &client.contact_number,
            email: &client.email,
            medical_center: &appointment.medical_center_name,
            appointment_date: appointment
                .appointment_date
                .map(|date| date.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        })?;
        exported += 1;
    }

    csv_writer.flush()?;
    Ok(exported)
}

/// Booking export failure.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to encode export row: {0}")]
    Encode(#[from] csv::Error),
    #[error("failed to flush export output: {0}")]
    Io(#[from] std::io::Error),
}
