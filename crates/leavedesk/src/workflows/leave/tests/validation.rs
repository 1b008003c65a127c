use super::common::*;
use crate::workflows::leave::domain::{LeaveCategory, UNSELECTED};
use crate::workflows::leave::policy::LeavePolicy;
use crate::workflows::leave::validation::{validate, RejectionReason, ValidationResult};

fn roster() -> Vec<String> {
    vec![EMPLOYEE.to_string(), COWORKER.to_string()]
}

#[test]
fn accepts_a_known_employee_with_a_future_range() {
    let result = validate(&annual_form(), today(), &roster(), &LeavePolicy::default());

    assert!(result.is_accepted());
    assert!(result.reasons().is_empty());
}

#[test]
fn accepts_a_request_starting_today() {
    let mut form = annual_form();
    form.start_date = today();
    form.end_date = today();

    let result = validate(&form, today(), &roster(), &LeavePolicy::default());
    assert!(result.is_accepted());
}

#[test]
fn rejects_the_picker_placeholder_as_unselected() {
    let mut form = annual_form();
    form.employee_name = UNSELECTED.to_string();

    let result = validate(&form, today(), &roster(), &LeavePolicy::default());
    assert_eq!(
        result.reasons(),
        [RejectionReason::EmployeeNotSelected]
    );
}

#[test]
fn rejects_a_blank_name_as_unselected() {
    let mut form = annual_form();
    form.employee_name = "   ".to_string();

    let result = validate(&form, today(), &roster(), &LeavePolicy::default());
    assert_eq!(
        result.reasons(),
        [RejectionReason::EmployeeNotSelected]
    );
}

#[test]
fn rejects_a_name_missing_from_the_roster() {
    let mut form = annual_form();
    form.employee_name = "คนแปลกหน้า".to_string();

    let result = validate(&form, today(), &roster(), &LeavePolicy::default());
    assert_eq!(
        result.reasons(),
        [RejectionReason::UnknownEmployee {
            name: "คนแปลกหน้า".to_string(),
        }]
    );
}

#[test]
fn trims_the_submitted_name_before_the_roster_check() {
    let mut form = annual_form();
    form.employee_name = format!("  {EMPLOYEE}  ");

    let result = validate(&form, today(), &roster(), &LeavePolicy::default());
    assert!(result.is_accepted());
}

#[test]
fn rejects_a_retroactive_start() {
    let mut form = annual_form();
    form.start_date = date(2026, 5, 30);

    let result = validate(&form, today(), &roster(), &LeavePolicy::default());
    assert_eq!(
        result.reasons(),
        [RejectionReason::RetroactiveStart {
            start: date(2026, 5, 30),
            today: today(),
        }]
    );
}

#[test]
fn rejects_an_end_before_the_start() {
    let mut form = annual_form();
    form.end_date = date(2026, 6, 2);

    let result = validate(&form, today(), &roster(), &LeavePolicy::default());
    assert_eq!(
        result.reasons(),
        [RejectionReason::EndBeforeStart {
            start: date(2026, 6, 3),
            end: date(2026, 6, 2),
        }]
    );
}

#[test]
fn personal_leave_needs_three_days_of_notice() {
    let mut form = annual_form();
    form.category = LeaveCategory::Personal;

    // Two days ahead is one short of the required notice.
    let result = validate(&form, today(), &roster(), &LeavePolicy::default());
    assert_eq!(
        result.reasons(),
        [RejectionReason::InsufficientNotice {
            category: LeaveCategory::Personal,
            required_days: 3,
            earliest_start: date(2026, 6, 4),
        }]
    );

    form.start_date = date(2026, 6, 4);
    form.end_date = date(2026, 6, 4);
    let result = validate(&form, today(), &roster(), &LeavePolicy::default());
    assert!(result.is_accepted());
}

#[test]
fn notice_rule_is_inert_for_untracked_categories() {
    let mut form = annual_form();
    form.category = LeaveCategory::Sick;
    form.start_date = today();
    form.end_date = today();

    let result = validate(&form, today(), &roster(), &LeavePolicy::default());
    assert!(result.is_accepted());
}

#[test]
fn notice_rule_follows_the_policy_table() {
    let mut policy = LeavePolicy::default();
    policy.notice_days.clear();

    let mut form = annual_form();
    form.category = LeaveCategory::Personal;
    form.start_date = today();
    form.end_date = today();

    let result = validate(&form, today(), &roster(), &policy);
    assert!(result.is_accepted());
}

#[test]
fn reports_every_violated_rule_together() {
    // Retroactive personal-leave request from an unselected employee whose
    // range also runs backwards: all four independent rules fire at once.
    let mut form = annual_form();
    form.employee_name = UNSELECTED.to_string();
    form.category = LeaveCategory::Personal;
    form.start_date = date(2026, 5, 30);
    form.end_date = date(2026, 5, 28);

    let result = validate(&form, today(), &roster(), &LeavePolicy::default());
    let reasons = result.reasons();
    assert_eq!(reasons.len(), 4);
    assert!(reasons.contains(&RejectionReason::EmployeeNotSelected));
    assert!(reasons.contains(&RejectionReason::RetroactiveStart {
        start: date(2026, 5, 30),
        today: today(),
    }));
    assert!(reasons.contains(&RejectionReason::EndBeforeStart {
        start: date(2026, 5, 30),
        end: date(2026, 5, 28),
    }));
    assert!(reasons.contains(&RejectionReason::InsufficientNotice {
        category: LeaveCategory::Personal,
        required_days: 3,
        earliest_start: date(2026, 6, 4),
    }));
}

#[test]
fn rejection_messages_read_for_the_requester() {
    let result = ValidationResult::Rejected(vec![RejectionReason::RetroactiveStart {
        start: date(2026, 5, 30),
        today: today(),
    }]);

    let text = result.reasons()[0].to_string();
    assert!(text.contains("2026-05-30"));
    assert!(text.contains("in the past"));
}
