use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Sentinel rendered by picker widgets before the employee makes a choice.
///
/// Forms arriving with this value (or an all-whitespace name) are treated as
/// having no employee selected at all.
pub const UNSELECTED: &str = "-กรุณาเลือก-";

/// Timestamp layout used for the submission stamp on record rows.
pub const SUBMITTED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Clock layout used for time-of-day fields on record rows and receipts.
pub const TIME_FORMAT: &str = "%H:%M";

/// Categories of paid leave tracked by the accounting workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LeaveCategory {
    Annual,
    Sick,
    Personal,
}

impl LeaveCategory {
    pub const ALL: [LeaveCategory; 3] = [
        LeaveCategory::Annual,
        LeaveCategory::Sick,
        LeaveCategory::Personal,
    ];

    /// Label written to record rows and printed on confirmation documents.
    pub const fn label(self) -> &'static str {
        match self {
            LeaveCategory::Annual => "ลาพักร้อน",
            LeaveCategory::Sick => "ลาป่วย",
            LeaveCategory::Personal => "ลากิจ",
        }
    }

    /// Reverse lookup used when folding historical rows back into typed records.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "ลาพักร้อน" => Some(LeaveCategory::Annual),
            "ลาป่วย" => Some(LeaveCategory::Sick),
            "ลากิจ" => Some(LeaveCategory::Personal),
            _ => None,
        }
    }
}

/// How the requested absence is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LeaveGranularity {
    FullDay,
    HalfDayMorning,
    HalfDayAfternoon,
    Hourly,
}

impl LeaveGranularity {
    pub const fn label(self) -> &'static str {
        match self {
            LeaveGranularity::FullDay => "เต็มวัน",
            LeaveGranularity::HalfDayMorning => "ครึ่งวันเช้า",
            LeaveGranularity::HalfDayAfternoon => "ครึ่งวันบ่าย",
            LeaveGranularity::Hourly => "รายชั่วโมง",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "เต็มวัน" => Some(LeaveGranularity::FullDay),
            "ครึ่งวันเช้า" => Some(LeaveGranularity::HalfDayMorning),
            "ครึ่งวันบ่าย" => Some(LeaveGranularity::HalfDayAfternoon),
            "รายชั่วโมง" => Some(LeaveGranularity::Hourly),
            _ => None,
        }
    }

    /// Hourly requests are the only shape that carries a time-of-day range.
    pub const fn requires_time_range(self) -> bool {
        matches!(self, LeaveGranularity::Hourly)
    }
}

/// Raw submission captured from the request form before any validation ran.
///
/// Time-of-day fields travel in the same `%H:%M` shape record rows store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRequestForm {
    pub employee_name: String,
    pub granularity: LeaveGranularity,
    pub category: LeaveCategory,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default, with = "time_label")]
    pub start_time: Option<NaiveTime>,
    #[serde(default, with = "time_label")]
    pub end_time: Option<NaiveTime>,
    pub reason: String,
}

/// A validated request together with its accounting weight and submission stamp.
///
/// This is the unit persisted by record stores and rendered onto confirmation
/// documents. `day_equivalent` is the request's weight against the employee's
/// allowance, expressed in days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRecord {
    pub employee_name: String,
    pub granularity: LeaveGranularity,
    pub category: LeaveCategory,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default, with = "time_label")]
    pub start_time: Option<NaiveTime>,
    #[serde(default, with = "time_label")]
    pub end_time: Option<NaiveTime>,
    pub day_equivalent: Decimal,
    pub reason: String,
    pub submitted_at: NaiveDateTime,
}

impl LeaveRecord {
    /// Submission stamp formatted the way record rows and filenames expect it.
    pub fn submitted_at_label(&self) -> String {
        self.submitted_at.format(SUBMITTED_AT_FORMAT).to_string()
    }
}

/// Serde helpers keeping optional time-of-day fields in [`TIME_FORMAT`].
mod time_label {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::TIME_FORMAT;

    pub fn serialize<S>(value: &Option<NaiveTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(time) => serializer.serialize_some(&time.format(TIME_FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let opt = Option::<String>::deserialize(deserializer)?;
        opt.map(|value| {
            NaiveTime::parse_from_str(value.trim(), TIME_FORMAT).map_err(serde::de::Error::custom)
        })
        .transpose()
    }
}
