use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;

use super::domain::{LeaveCategory, LeaveRequestForm, UNSELECTED};
use super::policy::LeavePolicy;

/// A single violated submission rule, phrased for the requester.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RejectionReason {
    #[error("no employee selected")]
    EmployeeNotSelected,
    #[error("employee {name:?} is not on the roster")]
    UnknownEmployee { name: String },
    #[error("start date {start} is in the past (today is {today})")]
    RetroactiveStart { start: NaiveDate, today: NaiveDate },
    #[error("end date {end} is before start date {start}")]
    EndBeforeStart { start: NaiveDate, end: NaiveDate },
    #[error("{category:?} leave needs {required_days} days of notice (earliest start {earliest_start})")]
    InsufficientNotice {
        category: LeaveCategory,
        required_days: u32,
        earliest_start: NaiveDate,
    },
    #[error("insufficient {category:?} balance: requested {requested}, remaining {remaining}")]
    ExceedsRemaining {
        category: LeaveCategory,
        requested: Decimal,
        remaining: Decimal,
    },
}

/// Outcome of checking a candidate request against the submission rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Accepted,
    Rejected(Vec<RejectionReason>),
}

impl ValidationResult {
    pub fn is_accepted(&self) -> bool {
        matches!(self, ValidationResult::Accepted)
    }

    /// Violated rules, empty when the request was accepted.
    pub fn reasons(&self) -> &[RejectionReason] {
        match self {
            ValidationResult::Accepted => &[],
            ValidationResult::Rejected(reasons) => reasons,
        }
    }

    fn from_reasons(reasons: Vec<RejectionReason>) -> Self {
        if reasons.is_empty() {
            ValidationResult::Accepted
        } else {
            ValidationResult::Rejected(reasons)
        }
    }
}

/// Check a candidate request against every submission rule.
///
/// Rules are independent and all violations are reported together, so a
/// retroactive personal-leave request is rejected for both the past start
/// date and the missing advance notice.
pub fn validate(
    form: &LeaveRequestForm,
    today: NaiveDate,
    roster: &[String],
    policy: &LeavePolicy,
) -> ValidationResult {
    let mut reasons = Vec::new();

    let name = form.employee_name.trim();
    if name.is_empty() || name == UNSELECTED {
        reasons.push(RejectionReason::EmployeeNotSelected);
    } else if !roster.iter().any(|entry| entry == name) {
        reasons.push(RejectionReason::UnknownEmployee {
            name: name.to_string(),
        });
    }

    if form.start_date < today {
        reasons.push(RejectionReason::RetroactiveStart {
            start: form.start_date,
            today,
        });
    }

    if form.end_date < form.start_date {
        reasons.push(RejectionReason::EndBeforeStart {
            start: form.start_date,
            end: form.end_date,
        });
    }

    let required_days = policy.notice_days(form.category);
    if required_days > 0 {
        let earliest_start = today + Duration::days(i64::from(required_days));
        if form.start_date < earliest_start {
            reasons.push(RejectionReason::InsufficientNotice {
                category: form.category,
                required_days,
                earliest_start,
            });
        }
    }

    ValidationResult::from_reasons(reasons)
}
