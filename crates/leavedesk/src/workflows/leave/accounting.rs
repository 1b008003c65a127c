use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use super::domain::LeaveCategory;
use super::policy::LeavePolicy;
use super::store::{columns, RecordRow};

/// Per-category balance line derived from historical rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryBalance {
    pub category: LeaveCategory,
    pub allowance: Decimal,
    pub used: Decimal,
    pub remaining: Decimal,
}

fn belongs_to(row: &RecordRow, employee: &str) -> bool {
    row.get(columns::EMPLOYEE)
        .is_some_and(|name| name.trim() == employee.trim())
}

fn parse_start_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.date_naive());
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()
}

/// Day-equivalents consumed per category by one employee.
///
/// Historical rows are dirty data: a day-equivalent that fails to parse
/// counts as zero, and rows with an unrecognized category label are skipped
/// rather than aborting the whole aggregation.
pub fn consumed_by_category(employee: &str, rows: &[RecordRow]) -> BTreeMap<LeaveCategory, Decimal> {
    let mut used = BTreeMap::new();
    for row in rows.iter().filter(|row| belongs_to(row, employee)) {
        let Some(category) = row.get(columns::CATEGORY).and_then(LeaveCategory::from_label) else {
            continue;
        };
        let days = row
            .get(columns::DAY_EQUIVALENT)
            .and_then(|value| value.trim().parse::<Decimal>().ok())
            .unwrap_or(Decimal::ZERO);
        *used.entry(category).or_insert(Decimal::ZERO) += days;
    }
    used
}

/// Remaining allowance per category in the policy table.
///
/// Categories with no historical usage keep their full allowance. The result
/// is not clamped at zero, so an over-consumed category shows up negative.
pub fn remaining_by_category(
    employee: &str,
    rows: &[RecordRow],
    policy: &LeavePolicy,
) -> BTreeMap<LeaveCategory, Decimal> {
    balance_report(employee, rows, policy)
        .into_iter()
        .map(|line| (line.category, line.remaining))
        .collect()
}

/// Allowance, usage, and remainder for every category the policy tracks.
pub fn balance_report(
    employee: &str,
    rows: &[RecordRow],
    policy: &LeavePolicy,
) -> Vec<CategoryBalance> {
    let used = consumed_by_category(employee, rows);
    policy
        .allowance_days
        .iter()
        .map(|(category, allowance)| {
            let used = used.get(category).copied().unwrap_or(Decimal::ZERO);
            CategoryBalance {
                category: *category,
                allowance: *allowance,
                used,
                remaining: *allowance - used,
            }
        })
        .collect()
}

/// Most recently appended row for the employee, if any history exists.
pub fn latest_record<'a>(employee: &str, rows: &'a [RecordRow]) -> Option<&'a RecordRow> {
    rows.iter().rev().find(|row| belongs_to(row, employee))
}

/// Rows whose start date falls in the given year and, when set, month.
///
/// Rows with an unparsable start date are silently dropped so one malformed
/// entry cannot hide an employee's remaining history.
pub fn history<'a>(
    employee: &str,
    rows: &'a [RecordRow],
    year: i32,
    month: Option<u32>,
) -> Vec<&'a RecordRow> {
    rows.iter()
        .filter(|row| belongs_to(row, employee))
        .filter(|row| {
            row.get(columns::START_DATE)
                .and_then(parse_start_date)
                .map(|date| {
                    date.year() == year && month.map_or(true, |wanted| date.month() == wanted)
                })
                .unwrap_or(false)
        })
        .collect()
}
