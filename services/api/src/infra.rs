use chrono::NaiveDate;
use leavedesk::config::StorageConfig;
use leavedesk::workflows::leave::{
    CsvEmployeeRoster, CsvLeaveStore, LeaveCategory, LeavePolicy, OverdrawRule,
};
use metrics_exporter_prometheus::PrometheusHandle;
use rust_decimal_macros::dec;
use std::collections::BTreeMap;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Company leave policy applied by this deployment.
///
/// Ten annual days, thirty sick days, six personal days, three days of
/// advance notice for personal leave, and no hard stop when a balance runs
/// negative.
pub(crate) fn default_leave_policy() -> LeavePolicy {
    LeavePolicy {
        allowance_days: BTreeMap::from([
            (LeaveCategory::Annual, dec!(10)),
            (LeaveCategory::Sick, dec!(30)),
            (LeaveCategory::Personal, dec!(6)),
        ]),
        notice_days: BTreeMap::from([(LeaveCategory::Personal, 3)]),
        durations: BTreeMap::new(),
        workday_hours: dec!(8),
        overdraw: OverdrawRule::Permit,
    }
}

pub(crate) fn csv_backends(
    storage: &StorageConfig,
) -> (Arc<CsvLeaveStore>, Arc<CsvEmployeeRoster>) {
    (
        Arc::new(CsvLeaveStore::new(storage.records_csv.clone())),
        Arc::new(CsvEmployeeRoster::new(storage.roster_csv.clone())),
    )
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn parse_month(raw: &str) -> Result<u32, String> {
    let month: u32 = raw
        .trim()
        .parse()
        .map_err(|_| format!("'{raw}' is not a month number"))?;
    if (1..=12).contains(&month) {
        Ok(month)
    } else {
        Err(format!("month {month} is out of range 1-12"))
    }
}
