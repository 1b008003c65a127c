use std::collections::BTreeMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::domain::{LeaveCategory, LeaveGranularity};

/// Entitlement policy expressed as data.
///
/// Allowance numbers, advance-notice requirements, and per-granularity
/// duration rules all vary between deployments, so they live here instead of
/// in validation branches. Categories absent from `allowance_days` simply do
/// not appear in balance reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeavePolicy {
    pub allowance_days: BTreeMap<LeaveCategory, Decimal>,
    pub notice_days: BTreeMap<LeaveCategory, u32>,
    pub durations: BTreeMap<LeaveGranularity, DurationRule>,
    pub workday_hours: Decimal,
    pub overdraw: OverdrawRule,
}

impl LeavePolicy {
    /// Annual allowance for a category, zero when the policy does not track it.
    pub fn allowance(&self, category: LeaveCategory) -> Decimal {
        self.allowance_days
            .get(&category)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Minimum calendar days of advance notice required for a category.
    pub fn notice_days(&self, category: LeaveCategory) -> u32 {
        self.notice_days.get(&category).copied().unwrap_or(0)
    }

    /// Duration rule for a granularity, falling back to the standard rule.
    pub fn duration_rule(&self, granularity: LeaveGranularity) -> DurationRule {
        self.durations
            .get(&granularity)
            .copied()
            .unwrap_or_else(|| DurationRule::standard(granularity))
    }
}

impl Default for LeavePolicy {
    fn default() -> Self {
        Self {
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
}

/// How a granularity converts a requested range into a day-equivalent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DurationRule {
    /// Fixed day-equivalent regardless of the requested range.
    Fixed(Decimal),
    /// Inclusive calendar-day count between start and end dates.
    CalendarDays,
    /// Clock-time span divided by the standard workday.
    ClockHours,
}

impl DurationRule {
    /// Rule applied when the policy table carries no override.
    pub fn standard(granularity: LeaveGranularity) -> DurationRule {
        match granularity {
            LeaveGranularity::FullDay => DurationRule::CalendarDays,
            LeaveGranularity::HalfDayMorning | LeaveGranularity::HalfDayAfternoon => {
                DurationRule::Fixed(dec!(0.5))
            }
            LeaveGranularity::Hourly => DurationRule::ClockHours,
        }
    }
}

/// Whether a submission may take a category balance below zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverdrawRule {
    /// Record the request even when it exceeds the remaining allowance.
    Permit,
    /// Reject requests that would exceed the remaining allowance.
    Block,
}
