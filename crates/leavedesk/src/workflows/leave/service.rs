use std::sync::Arc;

use chrono::{Local, NaiveDate, NaiveDateTime};

use super::accounting::{self, CategoryBalance};
use super::document::{self, ConfirmationRenderer, RenderError};
use super::domain::{LeaveRecord, LeaveRequestForm};
use super::duration::{compute_days, DurationError};
use super::policy::{DurationRule, LeavePolicy, OverdrawRule};
use super::store::{EmployeeRoster, LeaveRecordStore, RecordRow, RosterError, StoreError};
use super::validation::{validate, RejectionReason, ValidationResult};

/// Service composing the validator, duration calculator, record store, and
/// confirmation renderer.
pub struct LeaveRequestService<S, R, D> {
    store: Arc<S>,
    roster: Arc<R>,
    renderer: Arc<D>,
    policy: LeavePolicy,
}

/// Outcome of an accepted submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReceipt {
    pub record: LeaveRecord,
    pub document: Vec<u8>,
}

impl SubmissionReceipt {
    /// Filename the confirmation document is offered under.
    pub fn document_filename(&self) -> String {
        document::document_filename(&self.record)
    }
}

impl<S, R, D> LeaveRequestService<S, R, D>
where
    S: LeaveRecordStore + 'static,
    R: EmployeeRoster + 'static,
    D: ConfirmationRenderer + 'static,
{
    pub fn new(store: Arc<S>, roster: Arc<R>, renderer: Arc<D>, policy: LeavePolicy) -> Self {
        Self {
            store,
            roster,
            renderer,
            policy,
        }
    }

    pub fn policy(&self) -> &LeavePolicy {
        &self.policy
    }

    /// Validate and submit a request, stamping it with the local clock.
    pub fn submit(&self, form: LeaveRequestForm) -> Result<SubmissionReceipt, LeaveServiceError> {
        let now = Local::now().naive_local();
        self.submit_at(form, now.date(), now)
    }

    /// Submission with explicit clock inputs.
    ///
    /// Runs every validation rule first and returns all violations together
    /// with no side effects. For an accepted request the store append is the
    /// only side effect and happens at most once; there is no retry and no
    /// cancellation once the append has gone through, so a render failure
    /// after that point surfaces as an error while the record stays stored.
    pub fn submit_at(
        &self,
        form: LeaveRequestForm,
        today: NaiveDate,
        submitted_at: NaiveDateTime,
    ) -> Result<SubmissionReceipt, LeaveServiceError> {
        let roster = self.roster.names()?;
        if let ValidationResult::Rejected(reasons) =
            validate(&form, today, &roster, &self.policy)
        {
            return Err(LeaveServiceError::Rejected(reasons));
        }

        let day_equivalent = compute_days(&form, &self.policy)?;

        if self.policy.overdraw == OverdrawRule::Block {
            let rows = self.store.get_all()?;
            let remaining =
                accounting::remaining_by_category(form.employee_name.trim(), &rows, &self.policy);
            if let Some(remaining) = remaining.get(&form.category).copied() {
                if day_equivalent > remaining {
                    return Err(LeaveServiceError::Rejected(vec![
                        RejectionReason::ExceedsRemaining {
                            category: form.category,
                            requested: day_equivalent,
                            remaining,
                        },
                    ]));
                }
            }
        }

        // Time-of-day fields are only meaningful when the duration rule
        // consumed them; everything else stores blank times.
        let keeps_times = matches!(
            self.policy.duration_rule(form.granularity),
            DurationRule::ClockHours
        );
        let (start_time, end_time) = if keeps_times {
            (form.start_time, form.end_time)
        } else {
            (None, None)
        };

        let record = LeaveRecord {
            employee_name: form.employee_name.trim().to_string(),
            granularity: form.granularity,
            category: form.category,
            start_date: form.start_date,
            end_date: form.end_date,
            start_time,
            end_time,
            day_equivalent,
            reason: form.reason,
            submitted_at,
        };

        self.store.append(RecordRow::from(&record))?;

        let document = self.renderer.render(&record)?;
        Ok(SubmissionReceipt { record, document })
    }

    /// Roster names for selection widgets.
    pub fn employees(&self) -> Result<Vec<String>, LeaveServiceError> {
        Ok(self.roster.names()?)
    }

    /// Allowance, usage, and remainder per category for one employee.
    pub fn balances(&self, employee: &str) -> Result<Vec<CategoryBalance>, LeaveServiceError> {
        let rows = self.store.get_all()?;
        Ok(accounting::balance_report(employee, &rows, &self.policy))
    }

    /// Most recently appended row, if the employee has any history.
    pub fn latest(&self, employee: &str) -> Result<Option<RecordRow>, LeaveServiceError> {
        let rows = self.store.get_all()?;
        Ok(accounting::latest_record(employee, &rows).cloned())
    }

    /// Rows whose start date falls in the given year and optional month.
    pub fn history(
        &self,
        employee: &str,
        year: i32,
        month: Option<u32>,
    ) -> Result<Vec<RecordRow>, LeaveServiceError> {
        let rows = self.store.get_all()?;
        Ok(accounting::history(employee, &rows, year, month)
            .into_iter()
            .cloned()
            .collect())
    }
}

/// Error raised by the leave request service.
#[derive(Debug, thiserror::Error)]
pub enum LeaveServiceError {
    #[error("request rejected: {}", format_reasons(.0))]
    Rejected(Vec<RejectionReason>),
    #[error(transparent)]
    Duration(#[from] DurationError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Roster(#[from] RosterError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

fn format_reasons(reasons: &[RejectionReason]) -> String {
    reasons
        .iter()
        .map(|reason| reason.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
