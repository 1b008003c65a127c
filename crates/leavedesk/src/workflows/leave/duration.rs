use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use chrono::NaiveTime;

use super::domain::LeaveRequestForm;
use super::policy::{DurationRule, LeavePolicy};

/// Decimal places kept on computed day-equivalents.
const DAY_EQUIVALENT_SCALE: u32 = 2;

const MINUTES_PER_HOUR: Decimal = dec!(60);
const STANDARD_WORKDAY_HOURS: Decimal = dec!(8);

/// Errors raised while converting a requested range into a day-equivalent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DurationError {
    #[error("clock-hour leave needs both a start and an end time")]
    MissingTimeRange,
    #[error("leave must end after it starts ({start} to {end})")]
    InvalidTimeRange { start: NaiveTime, end: NaiveTime },
    #[error("leave from {start} to {end} is too short to register")]
    NegligibleTimeRange { start: NaiveTime, end: NaiveTime },
}

/// Convert a requested range into the day-equivalent the request consumes.
///
/// The granularity's duration rule comes from the policy table: full days
/// count every calendar day in the inclusive range, half days weigh a fixed
/// amount regardless of dates, and clock-hour requests divide the time-of-day
/// span by the standard workday, rounded half-up to two decimal places. A
/// clock-hour span so short it rounds to zero is rejected outright.
pub fn compute_days(
    form: &LeaveRequestForm,
    policy: &LeavePolicy,
) -> Result<Decimal, DurationError> {
    match policy.duration_rule(form.granularity) {
        DurationRule::Fixed(days) => Ok(days),
        DurationRule::CalendarDays => {
            let span = (form.end_date - form.start_date).num_days() + 1;
            Ok(Decimal::from(span))
        }
        DurationRule::ClockHours => {
            let (start, end) = match (form.start_time, form.end_time) {
                (Some(start), Some(end)) => (start, end),
                _ => return Err(DurationError::MissingTimeRange),
            };
            if end <= start {
                return Err(DurationError::InvalidTimeRange { start, end });
            }

            // A nonpositive configured workday would divide by zero; fall
            // back to the standard eight-hour day instead.
            let workday = if policy.workday_hours > Decimal::ZERO {
                policy.workday_hours
            } else {
                STANDARD_WORKDAY_HOURS
            };

            let minutes = Decimal::from((end - start).num_minutes());
            let days = (minutes / MINUTES_PER_HOUR / workday).round_dp_with_strategy(
                DAY_EQUIVALENT_SCALE,
                RoundingStrategy::MidpointAwayFromZero,
            );
            // Records never carry a zero day-equivalent; a span of a minute
            // or two rounds away entirely at two decimal places.
            if days.is_zero() {
                return Err(DurationError::NegligibleTimeRange { start, end });
            }
            Ok(days)
        }
    }
}
