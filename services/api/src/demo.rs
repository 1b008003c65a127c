use crate::infra::{csv_backends, default_leave_policy, parse_date, parse_month};
use chrono::{Datelike, Duration, Local, NaiveDate, NaiveTime};
use clap::Args;
use leavedesk::config::AppConfig;
use leavedesk::error::AppError;
use leavedesk::workflows::leave::{
    CsvEmployeeRoster, CsvLeaveStore, EmployeeRoster, LeaveCategory, LeaveGranularity,
    LeaveRecordStore, LeaveRequestForm, LeaveRequestService, LeaveServiceError,
    PdfConfirmationRenderer, RecordRow, RosterError, StoreError, SubmissionReceipt,
};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Reporting date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Write the rendered confirmation documents into this directory.
    #[arg(long)]
    pub(crate) save_documents: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct BalanceArgs {
    /// Employee name exactly as it appears on the roster
    #[arg(long)]
    pub(crate) employee: String,
    /// Override the configured leave records CSV path
    #[arg(long)]
    pub(crate) records_csv: Option<PathBuf>,
    /// Override the configured employee roster CSV path
    #[arg(long)]
    pub(crate) roster_csv: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct HistoryArgs {
    /// Employee name exactly as it appears on the roster
    #[arg(long)]
    pub(crate) employee: String,
    /// Year to report (defaults to the current year)
    #[arg(long)]
    pub(crate) year: Option<i32>,
    /// Narrow the report to one month (1-12)
    #[arg(long, value_parser = parse_month)]
    pub(crate) month: Option<u32>,
    /// Override the configured leave records CSV path
    #[arg(long)]
    pub(crate) records_csv: Option<PathBuf>,
    /// Override the configured employee roster CSV path
    #[arg(long)]
    pub(crate) roster_csv: Option<PathBuf>,
}

fn file_service(
    records_csv: Option<PathBuf>,
    roster_csv: Option<PathBuf>,
) -> Result<LeaveRequestService<CsvLeaveStore, CsvEmployeeRoster, PdfConfirmationRenderer>, AppError>
{
    let config = AppConfig::load()?;
    let (store, roster) = csv_backends(&config.storage);
    let store = match records_csv {
        Some(path) => Arc::new(CsvLeaveStore::new(path)),
        None => store,
    };
    let roster = match roster_csv {
        Some(path) => Arc::new(CsvEmployeeRoster::new(path)),
        None => roster,
    };
    Ok(LeaveRequestService::new(
        store,
        roster,
        Arc::new(PdfConfirmationRenderer::default()),
        default_leave_policy(),
    ))
}

pub(crate) fn run_balance_report(args: BalanceArgs) -> Result<(), AppError> {
    let service = file_service(args.records_csv, args.roster_csv)?;

    println!("Leave balances for {}", args.employee);
    for line in service.balances(&args.employee)? {
        println!(
            "- {}: allowance {} | used {} | remaining {}",
            line.category.label(),
            line.allowance,
            line.used,
            line.remaining
        );
    }

    match service.latest(&args.employee)? {
        Some(row) => {
            println!("\nMost recent request");
            print_row(&row);
        }
        None => println!("\nยังไม่มีประวัติการลา"),
    }
    Ok(())
}

pub(crate) fn run_history_report(args: HistoryArgs) -> Result<(), AppError> {
    let service = file_service(args.records_csv, args.roster_csv)?;
    let year = args.year.unwrap_or_else(|| Local::now().year());

    match args.month {
        Some(month) => println!("Leave history for {} in {year}-{month:02}", args.employee),
        None => println!("Leave history for {} in {year}", args.employee),
    }

    let rows = service.history(&args.employee, year, args.month)?;
    if rows.is_empty() {
        println!("ยังไม่มีประวัติการลา");
        return Ok(());
    }
    for row in rows {
        println!();
        print_row(&row);
    }
    Ok(())
}

const DEMO_ROSTER: [&str; 3] = ["สมชาย ใจดี", "สมหญิง รักงาน", "วิชัย พากเพียร"];

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        today,
        save_documents,
    } = args;

    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let morning = today.and_time(NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN));

    let service = Arc::new(LeaveRequestService::new(
        Arc::new(DemoStore::default()),
        Arc::new(DemoRoster),
        Arc::new(PdfConfirmationRenderer::default()),
        default_leave_policy(),
    ));

    println!("Leave desk demo (records stay in memory)");
    println!("Roster:");
    for name in service.employees()? {
        println!("- {name}");
    }

    let employee = DEMO_ROSTER[0];

    println!("\nSubmitting three days of annual leave");
    let annual = LeaveRequestForm {
        employee_name: employee.to_string(),
        granularity: LeaveGranularity::FullDay,
        category: LeaveCategory::Annual,
        start_date: today + Duration::days(7),
        end_date: today + Duration::days(9),
        start_time: None,
        end_time: None,
        reason: "พักผ่อนประจำปีกับครอบครัว".to_string(),
    };
    let receipt = service.submit_at(annual, today, morning)?;
    report_receipt(&receipt, save_documents.as_deref())?;

    println!("\nSubmitting three hours of sick leave");
    let hourly = LeaveRequestForm {
        employee_name: employee.to_string(),
        granularity: LeaveGranularity::Hourly,
        category: LeaveCategory::Sick,
        start_date: today + Duration::days(1),
        end_date: today + Duration::days(1),
        start_time: NaiveTime::from_hms_opt(8, 30, 0),
        end_time: NaiveTime::from_hms_opt(11, 30, 0),
        reason: "พบแพทย์ตามนัด".to_string(),
    };
    let receipt = service.submit_at(hourly, today, morning + Duration::minutes(5))?;
    report_receipt(&receipt, save_documents.as_deref())?;

    println!("\nSubmitting a retroactive personal-leave request");
    let retroactive = LeaveRequestForm {
        employee_name: employee.to_string(),
        granularity: LeaveGranularity::FullDay,
        category: LeaveCategory::Personal,
        start_date: today - Duration::days(2),
        end_date: today - Duration::days(2),
        start_time: None,
        end_time: None,
        reason: "ลืมยื่นล่วงหน้า".to_string(),
    };
    match service.submit_at(retroactive, today, morning + Duration::minutes(10)) {
        Err(LeaveServiceError::Rejected(reasons)) => {
            println!("Rejected with every violated rule:");
            for reason in reasons {
                println!("  - {reason}");
            }
        }
        Ok(_) => println!("Unexpectedly accepted"),
        Err(err) => return Err(err.into()),
    }

    println!("\nBalances for {employee}");
    for line in service.balances(employee)? {
        println!(
            "- {}: allowance {} | used {} | remaining {}",
            line.category.label(),
            line.allowance,
            line.used,
            line.remaining
        );
    }

    let year = today.year();
    let rows = service.history(employee, year, None)?;
    println!("\nRecorded requests in {year}: {}", rows.len());

    if let Some(row) = service.latest(employee)? {
        println!("\nLatest stored row");
        print_row(&row);
    }

    Ok(())
}

fn report_receipt(receipt: &SubmissionReceipt, save_dir: Option<&Path>) -> Result<(), AppError> {
    let record = &receipt.record;
    println!(
        "- Accepted {} ({}) {} -> {}: {} day(s)",
        record.category.label(),
        record.granularity.label(),
        record.start_date,
        record.end_date,
        record.day_equivalent
    );
    println!(
        "  Confirmation document {} ({} bytes)",
        receipt.document_filename(),
        receipt.document.len()
    );

    if let Some(dir) = save_dir {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(receipt.document_filename());
        std::fs::write(&path, &receipt.document)?;
        println!("  Saved to {}", path.display());
    }
    Ok(())
}

fn print_row(row: &RecordRow) {
    for (label, value) in row.fields() {
        if value.is_empty() {
            continue;
        }
        println!("  {label}: {value}");
    }
}

#[derive(Default)]
struct DemoStore {
    rows: Mutex<Vec<RecordRow>>,
}

impl LeaveRecordStore for DemoStore {
    fn append(&self, row: RecordRow) -> Result<(), StoreError> {
        let mut guard = self
            .rows
            .lock()
            .map_err(|_| StoreError::Unavailable("demo store poisoned".to_string()))?;
        guard.push(row);
        Ok(())
    }

    fn get_all(&self) -> Result<Vec<RecordRow>, StoreError> {
        let guard = self
            .rows
            .lock()
            .map_err(|_| StoreError::Unavailable("demo store poisoned".to_string()))?;
        Ok(guard.clone())
    }
}

struct DemoRoster;

impl EmployeeRoster for DemoRoster {
    fn names(&self) -> Result<Vec<String>, RosterError> {
        Ok(DEMO_ROSTER.iter().map(|name| name.to_string()).collect())
    }
}
