mod common;

use chrono::Duration;
use common::*;

use medvisa::workflows::clients::{
    AppointmentPatch, BookingStatus, ClientRepository, MedicalResultStatus, NotificationKind,
    StatusChange, StatusUpdate,
};
use medvisa::workflows::export;

#[test]
fn full_pipeline_from_intake_to_fit_result() {
    let (service, _, hub) = build_service();

    let client = service
        .add_client(aisha(), fixed_now())
        .expect("intake succeeds");

    service
        .update_status(
            &client.id,
            StatusUpdate {
                booking_status: Some(BookingStatus::DataPrepared),
                medical_result_status: None,
            },
            fixed_now() + Duration::hours(1),
        )
        .expect("data prepared")
        .expect("client present");

    service
        .update_appointment(
            &client.id,
            AppointmentPatch {
                booking_status: Some(BookingStatus::BookedConfirmed),
                medical_center_name: Some("Riyadh Medical Center".to_string()),
                appointment_date: Some(fixed_now() + Duration::days(14)),
                appointment_time: Some("10:15".to_string()),
                ..AppointmentPatch::default()
            },
            fixed_now() + Duration::hours(2),
        )
        .expect("booking confirmed")
        .expect("client present");

    let updated = service
        .update_status(
            &client.id,
            StatusUpdate {
                booking_status: None,
                medical_result_status: Some(MedicalResultStatus::Fit),
            },
            fixed_now() + Duration::days(15),
        )
        .expect("result recorded")
        .expect("client present");

    let appointment = updated.appointment.as_ref().expect("appointment present");
    assert_eq!(appointment.booking_status, BookingStatus::BookedConfirmed);
    assert_eq!(appointment.medical_result_status, MedicalResultStatus::Fit);
    assert_eq!(appointment.medical_center_name, "Riyadh Medical Center");

    // Seed entry, data-prepared, booked, fit: the trail never shrinks.
    let notes: Vec<&str> = appointment
        .history
        .entries()
        .iter()
        .map(|entry| entry.note.as_str())
        .collect();
    assert_eq!(
        notes,
        [
            "New client profile created.",
            "Booking status updated to Data Prepared.",
            "Appointment booked.",
            "Medical result status updated to Fit.",
        ]
    );
    assert_eq!(
        appointment.history.last().expect("entry present").status,
        StatusChange::Medical(MedicalResultStatus::Fit)
    );

    // Intake (client), export task (system), confirmation (client + system),
    // fit result (status) — newest first.
    let kinds: Vec<NotificationKind> = hub.notifications().iter().map(|n| n.kind).collect();
    assert_eq!(
        kinds,
        [
            NotificationKind::Status,
            NotificationKind::System,
            NotificationKind::Client,
            NotificationKind::System,
            NotificationKind::Client,
        ]
    );
}

#[test]
fn unknown_client_leaves_collection_and_log_untouched() {
    let (service, repository, hub) = build_service();
    service
        .add_client(aisha(), fixed_now())
        .expect("intake succeeds");

    let before_clients = repository.snapshot().expect("snapshot available");
    let before_notifications = hub.notifications();

    let missing = medvisa::workflows::clients::ClientId("client-does-not-exist".to_string());
    let result = service
        .update_status(
            &missing,
            StatusUpdate {
                booking_status: Some(BookingStatus::Cancelled),
                medical_result_status: Some(MedicalResultStatus::Absent),
            },
            fixed_now(),
        )
        .expect("lookup succeeds");

    assert!(result.is_none());
    assert_eq!(repository.snapshot().expect("snapshot available"), before_clients);
    assert_eq!(hub.notifications(), before_notifications);
}

#[test]
fn booking_export_includes_only_data_prepared_clients() {
    let (service, _, _) = build_service();
    let prepared = service
        .add_client(aisha(), fixed_now())
        .expect("intake succeeds");
    service
        .add_client(farhan(), fixed_now())
        .expect("intake succeeds");

    service
        .update_status(
            &prepared.id,
            StatusUpdate {
                booking_status: Some(BookingStatus::DataPrepared),
                medical_result_status: None,
            },
            fixed_now(),
        )
        .expect("data prepared")
        .expect("client present");

    let clients = service.clients().expect("snapshot available");
    let mut buffer = Vec::new();
    let exported =
        export::write_booking_export(&clients, &mut buffer).expect("export succeeds");

    assert_eq!(exported, 1);
    let csv = String::from_utf8(buffer).expect("valid utf-8");
    assert!(csv.starts_with("Passport Number,"));
    assert!(csv.contains("AK1234567"));
    assert!(!csv.contains("FA7654321"));
}
