use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use chrono::{Duration, NaiveDate, Utc};
use clap::Args;

use medvisa::error::AppError;
use medvisa::workflows::clients::{
    AppointmentPatch, BookingStatus, Client, ClientProfile, ClientWorkflowService,
    MedicalResultStatus, NotificationLog, StatusUpdate,
};
use medvisa::workflows::export::write_booking_export;

use crate::infra::{InMemoryClientRepository, NotificationHub};
use crate::seed;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Record an Unfit result instead of Fit, showing the high-priority path
    #[arg(long)]
    pub(crate) unfit: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ExportArgs {
    /// JSON seed file holding the client collection
    #[arg(long)]
    pub(crate) seed: PathBuf,
    /// Output file for the CSV (stdout when omitted)
    #[arg(long)]
    pub(crate) out: Option<PathBuf>,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let notification_log = Arc::new(Mutex::new(NotificationLog::new()));
    let repository = Arc::new(InMemoryClientRepository::default());
    let hub = Arc::new(NotificationHub::new(notification_log.clone()));
    let service = ClientWorkflowService::new(repository, hub);

    let now = Utc::now();
    let profile = ClientProfile {
        first_name: "Aisha".to_string(),
        last_name: "Khan".to_string(),
        passport_number: "AK1234567".to_string(),
        nationality: "Pakistani".to_string(),
        date_of_birth: NaiveDate::from_ymd_opt(1992, 3, 14).expect("valid date"),
        contact_number: "+92-300-1234567".to_string(),
        email: "aisha.khan@example.com".to_string(),
        profile_picture: None,
        location: Some("Lahore".to_string()),
    };

    println!("== Intake ==");
    let client = service.add_client(profile, now)?;
    println!("registered {} ({})", client.full_name(), client.id.0);

    println!();
    println!("== Booking preparation ==");
    let _ = service.update_status(
        &client.id,
        StatusUpdate {
            booking_status: Some(BookingStatus::DataPrepared),
            medical_result_status: None,
        },
        now + Duration::hours(1),
    )?;
    println!("booking data prepared; export task raised");

    println!();
    println!("== Appointment confirmation ==");
    let _ = service.update_appointment(
        &client.id,
        AppointmentPatch {
            booking_status: Some(BookingStatus::BookedConfirmed),
            medical_center_name: Some("Riyadh Medical Center".to_string()),
            appointment_date: Some(now + Duration::days(14)),
            appointment_time: Some("10:15".to_string()),
            ..AppointmentPatch::default()
        },
        now + Duration::hours(2),
    )?;
    println!("appointment booked and confirmed");

    println!();
    println!("== Medical result ==");
    let result = if args.unfit {
        MedicalResultStatus::Unfit
    } else {
        MedicalResultStatus::Fit
    };
    let updated = service
        .update_status(
            &client.id,
            StatusUpdate {
                booking_status: None,
                medical_result_status: Some(result),
            },
            now + Duration::days(15),
        )?
        .expect("demo client present");
    println!("result recorded as {}", result.label());

    println!();
    println!("== Audit trail ==");
    if let Some(appointment) = updated.appointment.as_ref() {
        for entry in appointment.history.entries() {
            println!(
                "  {}  [{}] {}",
                entry.recorded_at.format("%Y-%m-%d %H:%M"),
                entry.status.label(),
                entry.note
            );
        }
    }

    println!();
    println!("== Notifications (newest first) ==");
    let log = notification_log.lock().expect("notification mutex poisoned");
    for notification in log.notifications() {
        println!("  [{}] {}", notification.kind.label(), notification.message);
    }
    println!("unread: {}", log.unread_count());

    Ok(())
}

pub(crate) fn run_export(args: ExportArgs) -> Result<(), AppError> {
    let clients: Vec<Client> = seed::load_clients(&args.seed)?;

    let exported = match args.out {
        Some(path) => {
            let file = File::create(&path)?;
            let exported = write_booking_export(&clients, file)?;
            println!("wrote {exported} row(s) to {}", path.display());
            exported
        }
        None => write_booking_export(&clients, io::stdout().lock())?,
    };

    if exported == 0 {
        eprintln!("no clients are currently in Data Prepared");
    }

    Ok(())
}
