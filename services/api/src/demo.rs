use crate::infra::{InMemoryActorDirectory, InMemoryNotificationCenter, InMemoryProfileStore};
use chrono::{NaiveDate, Utc};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use staff_registry::error::AppError;
use staff_registry::registry::profiles::{
    Actor, ActorId, Agency, ContactType, DutyStation, ProfileDraft, ProfileService, Role,
};
use staff_registry::registry::report::ReportQuery;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Write the demo report PDF to this path as well
    #[arg(long)]
    pub(crate) export_pdf: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct ExportReportArgs {
    /// Filter by agency code (e.g. undp, unicef)
    #[arg(long)]
    pub(crate) agency: Option<String>,
    /// Filter by duty station code (e.g. dhaka, sylhet)
    #[arg(long)]
    pub(crate) duty_station: Option<String>,
    /// Filter by contact type code (e.g. fta, sc)
    #[arg(long)]
    pub(crate) contact_type: Option<String>,
    /// Filter by zone (free text, case-insensitive)
    #[arg(long)]
    pub(crate) zone: Option<String>,
    /// Earliest creation date to include (YYYY-MM-DD)
    #[arg(long)]
    pub(crate) date_from: Option<String>,
    /// Latest creation date to include (YYYY-MM-DD, inclusive)
    #[arg(long)]
    pub(crate) date_to: Option<String>,
    /// Output path for the rendered PDF
    #[arg(long, default_value = "employee_profiles_report.pdf")]
    pub(crate) output: PathBuf,
}

type DemoService =
    ProfileService<InMemoryProfileStore, InMemoryNotificationCenter, InMemoryActorDirectory>;

fn registrar() -> Actor {
    Actor {
        id: ActorId("nasrin.akter".to_string()),
        name: "Nasrin Akter".to_string(),
        role: Role::SuperAdmin,
    }
}

fn security_officer() -> Actor {
    Actor {
        id: ActorId("karim.hossain".to_string()),
        name: "Karim Hossain".to_string(),
        role: Role::SecurityAdmin,
    }
}

fn employee(id: &str, name: &str) -> Actor {
    Actor {
        id: ActorId(id.to_string()),
        name: name.to_string(),
        role: Role::User,
    }
}

fn basic_draft(
    name: &str,
    employee_id: &str,
    email: &str,
    agency: Agency,
    duty_station: DutyStation,
    contact_type: ContactType,
    zone: &str,
) -> ProfileDraft {
    ProfileDraft {
        r_ser: Some(7),
        sl: Some(12),
        name: Some(name.to_string()),
        post_title: Some("Programme Associate".to_string()),
        employee_id: Some(employee_id.to_string()),
        agency: Some(agency),
        duty_station: Some(duty_station),
        contact_type: Some(contact_type),
        residential_address: Some("House 12, Road 5".to_string()),
        zone: Some(zone.to_string()),
        cell_phone: Some("+8801700000000".to_string()),
        emergency_contact: Some("+8801800000000".to_string()),
        emergency_relation: Some("Brother".to_string()),
        official_email: Some(email.to_string()),
        ..ProfileDraft::default()
    }
}

fn security_pass() -> ProfileDraft {
    let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d);
    ProfileDraft {
        radio_call_sign: Some("ROMEO-7".to_string()),
        radio_serial: Some("RS-5521".to_string()),
        zone_appointment: Some("Zone 4 / Gulshan".to_string()),
        office_address: Some("IDB Bhaban, Agargaon".to_string()),
        unit_warden: Some("Floor 6 warden".to_string()),
        unid_number: Some("UN-99812".to_string()),
        rfid_number: Some("RF-8875".to_string()),
        unid_issued: date(2024, 1, 15),
        id_expiry: date(2025, 1, 15),
        id_deposited: date(2024, 1, 20),
        bsafe_completed: date(2023, 11, 2),
        sat_completed: date(2023, 12, 9),
        sbfat_completed: date(2024, 2, 1),
        ..ProfileDraft::default()
    }
}

/// Seed a service with a representative office: one completed record, one
/// partially completed, one filed from another duty station.
fn seeded_service() -> Result<Arc<DemoService>, AppError> {
    let service = Arc::new(ProfileService::new(
        Arc::new(InMemoryProfileStore::default()),
        Arc::new(InMemoryNotificationCenter::default()),
        Arc::new(InMemoryActorDirectory::default()),
    ));

    let directory_seed = security_officer();
    if let Err(err) = service.dashboard(&directory_seed) {
        println!("  directory seed failed: {err}");
    }

    let submissions = [
        (
            employee("rahim.uddin", "Rahim Uddin"),
            basic_draft(
                "Rahim Uddin",
                "EMP-0042",
                "rahim.uddin@undp.org",
                Agency::Undp,
                DutyStation::Dhaka,
                ContactType::Fta,
                "Dhaka North",
            ),
        ),
        (
            employee("farida.yasmin", "Farida Yasmin"),
            basic_draft(
                "Farida Yasmin",
                "EMP-0043",
                "farida.yasmin@unicef.org",
                Agency::Unicef,
                DutyStation::Sylhet,
                ContactType::Sc,
                "Sylhet Sadar",
            ),
        ),
        (
            employee("tanvir.ahmed", "Tanvir Ahmed"),
            basic_draft(
                "Tanvir Ahmed",
                "EMP-0044",
                "tanvir.ahmed@who.int",
                Agency::Who,
                DutyStation::Chittagong,
                ContactType::Ic,
                "Agrabad",
            ),
        ),
    ];

    let mut first_profile = None;
    for (actor, draft) in submissions {
        match service.submit(&actor, draft) {
            Ok(receipt) => {
                if first_profile.is_none() {
                    first_profile = Some(receipt.profile_id);
                }
            }
            Err(err) => println!("  seed submission rejected: {err}"),
        }
    }

    if let Some(profile_id) = first_profile {
        if let Err(err) = service.edit(&security_officer(), &profile_id, security_pass()) {
            println!("  seed security pass rejected: {err}");
        }
    }

    Ok(service)
}

fn query_from_args(args: &ExportReportArgs) -> ReportQuery {
    ReportQuery {
        agency: args.agency.clone(),
        duty_station: args.duty_station.clone(),
        contact_type: args.contact_type.clone(),
        zone: args.zone.clone(),
        date_from: args.date_from.clone(),
        date_to: args.date_to.clone(),
    }
}

pub(crate) fn run_export_report(args: ExportReportArgs) -> Result<(), AppError> {
    let service = seeded_service()?;
    let query = query_from_args(&args);

    let report = match service.report(&registrar(), &query) {
        Ok(report) => report,
        Err(err) => {
            println!("Report unavailable: {err}");
            return Ok(());
        }
    };
    println!(
        "Filters: {} | {} of {} profiles match",
        report.filter_description, report.matched_profiles, report.total_profiles
    );

    let bytes = match service.export_report(&registrar(), &query, Utc::now()) {
        Ok(bytes) => bytes,
        Err(err) => {
            println!("Export unavailable: {err}");
            return Ok(());
        }
    };
    std::fs::write(&args.output, &bytes)?;
    println!(
        "Wrote report PDF ({} bytes) to {}",
        bytes.len(),
        args.output.display()
    );

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    println!("Staff registry demo");
    let service = seeded_service()?;

    println!("\nRegistry dashboard (super admin view)");
    match service.dashboard(&registrar()) {
        Ok(view) => {
            for row in &view.profiles {
                println!(
                    "- {} | {} | {} | {} | {}",
                    row.name,
                    row.employee_id,
                    row.agency,
                    row.duty_station,
                    row.completion_status.label()
                );
            }
        }
        Err(err) => println!("  dashboard unavailable: {err}"),
    }

    println!("\nNotification feed (security office)");
    match service.notifications(&security_officer()) {
        Ok(feed) => {
            println!("- {} unread", feed.unread_count);
            for notification in &feed.notifications {
                println!("  - {}: {}", notification.title, notification.message);
            }
        }
        Err(err) => println!("  feed unavailable: {err}"),
    }

    println!("\nNotification feed (record owner)");
    match service.notifications(&employee("rahim.uddin", "Rahim Uddin")) {
        Ok(feed) => {
            for notification in &feed.notifications {
                println!("- {}: {}", notification.title, notification.message);
            }
        }
        Err(err) => println!("  feed unavailable: {err}"),
    }

    println!("\nReport preview (no filters)");
    match service.report(&registrar(), &ReportQuery::default()) {
        Ok(report) => {
            println!(
                "- {} profiles | filters: {}",
                report.matched_profiles, report.filter_description
            );
            for (agency, count) in &report.statistics.by_agency {
                println!("  - {agency}: {count}");
            }
        }
        Err(err) => println!("  report unavailable: {err}"),
    }

    if let Some(path) = args.export_pdf {
        match service.export_report(&registrar(), &ReportQuery::default(), Utc::now()) {
            Ok(bytes) => {
                std::fs::write(&path, &bytes)?;
                println!("\nWrote report PDF ({} bytes) to {}", bytes.len(), path.display());
            }
            Err(err) => println!("\nExport unavailable: {err}"),
        }
    }

    Ok(())
}
