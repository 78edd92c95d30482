use serde::Serialize;

use super::domain::{BookingStatus, Client, MedicalResultStatus};

/// Dashboard counters computed over a snapshot of the client collection.
/// Nothing here is stored; every request recomputes from the snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub total_clients: usize,
    pub fit_results: usize,
    pub unfit_results: usize,
    pub confirmed_bookings: usize,
    pub awaiting_results: usize,
    pub booking_breakdown: Vec<BookingBreakdownEntry>,
}

/// Count of clients per booking stage.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingBreakdownEntry {
    pub status: BookingStatus,
    pub label: &'static str,
    pub count: usize,
}

impl DashboardSnapshot {
    pub fn from_clients(clients: &[Client]) -> Self {
        let mut snapshot = DashboardSnapshot {
            total_clients: clients.len(),
            ..DashboardSnapshot::default()
        };

        for client in clients {
            let Some(appointment) = client.appointment.as_ref() else {
                continue;
            };

            match appointment.medical_result_status {
                MedicalResultStatus::Fit => snapshot.fit_results += 1,
                MedicalResultStatus::Unfit => snapshot.unfit_results += 1,
                MedicalResultStatus::PendingResults | MedicalResultStatus::ResultsAwaiting => {
                    snapshot.awaiting_results += 1
                }
                _ => {}
            }

            if appointment.booking_status == BookingStatus::BookedConfirmed {
                snapshot.confirmed_bookings += 1;
            }
        }

        snapshot.booking_breakdown = BookingStatus::ALL
            .into_iter()
            .map(|status| BookingBreakdownEntry {
                status,
                label: status.label(),
                count: clients
                    .iter()
                    .filter_map(|c| c.appointment.as_ref())
                    .filter(|a| a.booking_status == status)
                    .count(),
            })
            .collect();

        snapshot
    }
}
