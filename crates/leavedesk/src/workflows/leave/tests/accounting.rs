use rust_decimal_macros::dec;

use super::common::*;
use crate::workflows::leave::accounting::{
    balance_report, consumed_by_category, history, latest_record, remaining_by_category,
};
use crate::workflows::leave::domain::LeaveCategory;
use crate::workflows::leave::policy::LeavePolicy;
use crate::workflows::leave::store::{columns, RecordRow};

#[test]
fn zero_history_leaves_every_allowance_untouched() {
    let report = balance_report(EMPLOYEE, &[], &LeavePolicy::default());

    assert_eq!(report.len(), 3);
    for line in &report {
        assert_eq!(line.used, dec!(0));
        assert_eq!(line.remaining, line.allowance);
    }
}

#[test]
fn default_allowances_follow_the_policy_table() {
    let remaining = remaining_by_category(EMPLOYEE, &[], &LeavePolicy::default());

    assert_eq!(remaining.get(&LeaveCategory::Annual), Some(&dec!(10)));
    assert_eq!(remaining.get(&LeaveCategory::Sick), Some(&dec!(30)));
    assert_eq!(remaining.get(&LeaveCategory::Personal), Some(&dec!(6)));
}

#[test]
fn appending_a_record_reduces_only_its_own_category() {
    let rows = vec![stored_row(
        EMPLOYEE,
        LeaveCategory::Annual,
        "2.5",
        "2026-03-02",
    )];

    let remaining = remaining_by_category(EMPLOYEE, &rows, &LeavePolicy::default());
    assert_eq!(remaining.get(&LeaveCategory::Annual), Some(&dec!(7.5)));
    assert_eq!(remaining.get(&LeaveCategory::Sick), Some(&dec!(30)));
    assert_eq!(remaining.get(&LeaveCategory::Personal), Some(&dec!(6)));
}

#[test]
fn usage_sums_across_rows_of_the_same_category() {
    let rows = vec![
        stored_row(EMPLOYEE, LeaveCategory::Sick, "1", "2026-01-12"),
        stored_row(EMPLOYEE, LeaveCategory::Sick, "0.5", "2026-02-03"),
        stored_row(EMPLOYEE, LeaveCategory::Sick, "1.13", "2026-02-24"),
    ];

    let used = consumed_by_category(EMPLOYEE, &rows);
    assert_eq!(used.get(&LeaveCategory::Sick), Some(&dec!(2.63)));
}

#[test]
fn other_employees_do_not_affect_the_balance() {
    let rows = vec![stored_row(
        COWORKER,
        LeaveCategory::Annual,
        "4",
        "2026-03-02",
    )];

    let remaining = remaining_by_category(EMPLOYEE, &rows, &LeavePolicy::default());
    assert_eq!(remaining.get(&LeaveCategory::Annual), Some(&dec!(10)));
}

#[test]
fn overdrawn_categories_show_up_negative() {
    let rows = vec![
        stored_row(EMPLOYEE, LeaveCategory::Personal, "4", "2026-02-02"),
        stored_row(EMPLOYEE, LeaveCategory::Personal, "4", "2026-04-07"),
    ];

    let remaining = remaining_by_category(EMPLOYEE, &rows, &LeavePolicy::default());
    assert_eq!(remaining.get(&LeaveCategory::Personal), Some(&dec!(-2)));
}

#[test]
fn unparsable_day_equivalents_count_as_zero() {
    let rows = vec![stored_row(
        EMPLOYEE,
        LeaveCategory::Annual,
        "to be confirmed",
        "2026-03-02",
    )];

    let remaining = remaining_by_category(EMPLOYEE, &rows, &LeavePolicy::default());
    assert_eq!(remaining.get(&LeaveCategory::Annual), Some(&dec!(10)));
}

#[test]
fn unrecognized_category_labels_are_skipped() {
    let fields = stored_row(EMPLOYEE, LeaveCategory::Annual, "3", "2026-03-02")
        .fields()
        .iter()
        .map(|(key, value)| {
            if key == columns::CATEGORY {
                (key.clone(), "ลาบวช".to_string())
            } else {
                (key.clone(), value.clone())
            }
        })
        .collect();
    let rows = vec![RecordRow::new(fields)];

    let used = consumed_by_category(EMPLOYEE, &rows);
    assert!(used.is_empty());
}

#[test]
fn latest_returns_the_most_recently_appended_row() {
    let rows = vec![
        stored_row(EMPLOYEE, LeaveCategory::Annual, "1", "2026-01-05"),
        stored_row(COWORKER, LeaveCategory::Sick, "2", "2026-01-20"),
        stored_row(EMPLOYEE, LeaveCategory::Personal, "0.5", "2026-02-16"),
    ];

    let latest = latest_record(EMPLOYEE, &rows).expect("history exists");
    assert_eq!(latest.get(columns::START_DATE), Some("2026-02-16"));
}

#[test]
fn latest_is_none_without_history() {
    let rows = vec![stored_row(
        COWORKER,
        LeaveCategory::Annual,
        "1",
        "2026-01-05",
    )];

    assert!(latest_record(EMPLOYEE, &rows).is_none());
}

#[test]
fn history_filters_by_year_and_month() {
    let rows = vec![
        stored_row(EMPLOYEE, LeaveCategory::Annual, "1", "2025-09-15"),
        stored_row(EMPLOYEE, LeaveCategory::Annual, "1", "2026-03-02"),
        stored_row(EMPLOYEE, LeaveCategory::Sick, "1", "2026-09-21"),
        stored_row(COWORKER, LeaveCategory::Annual, "1", "2026-09-21"),
    ];

    let whole_year = history(EMPLOYEE, &rows, 2026, None);
    assert_eq!(whole_year.len(), 2);

    let september = history(EMPLOYEE, &rows, 2026, Some(9));
    assert_eq!(september.len(), 1);
    assert_eq!(
        september[0].get(columns::CATEGORY),
        Some(LeaveCategory::Sick.label())
    );
}

#[test]
fn history_drops_rows_with_unparsable_start_dates() {
    let rows = vec![
        stored_row(EMPLOYEE, LeaveCategory::Annual, "1", "sometime in march"),
        stored_row(EMPLOYEE, LeaveCategory::Annual, "1", "2026-03-02"),
    ];

    let matches = history(EMPLOYEE, &rows, 2026, None);
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].get(columns::START_DATE), Some("2026-03-02"));
}

#[test]
fn history_accepts_timestamped_start_dates() {
    // Spreadsheet edits sometimes leave full timestamps in the date column.
    let rows = vec![stored_row(
        EMPLOYEE,
        LeaveCategory::Annual,
        "1",
        "2026-03-02T00:00:00+07:00",
    )];

    let matches = history(EMPLOYEE, &rows, 2026, Some(3));
    assert_eq!(matches.len(), 1);
}

#[test]
fn balance_report_lists_only_tracked_categories() {
    let mut policy = LeavePolicy::default();
    policy.allowance_days.remove(&LeaveCategory::Personal);

    let report = balance_report(EMPLOYEE, &[], &policy);
    assert_eq!(report.len(), 2);
    assert!(report
        .iter()
        .all(|line| line.category != LeaveCategory::Personal));
}
