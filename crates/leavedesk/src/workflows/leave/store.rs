use chrono::NaiveTime;
use serde::ser::SerializeMap;
use serde::Serialize;

use super::domain::{LeaveRecord, TIME_FORMAT};

/// Column headers shared by every record store, in append order.
pub mod columns {
    pub const EMPLOYEE: &str = "ชื่อ";
    pub const GRANULARITY: &str = "ลาเป็น";
    pub const CATEGORY: &str = "ประเภทการลา";
    pub const START_DATE: &str = "วันที่เริ่ม";
    pub const END_DATE: &str = "วันที่สิ้นสุด";
    pub const START_TIME: &str = "เวลาเริ่มลา";
    pub const END_TIME: &str = "เวลาสิ้นสุดลา";
    pub const DAY_EQUIVALENT: &str = "คิดเป็นจำนวนวันลา";
    pub const REASON: &str = "เหตุผล";
    pub const SUBMITTED_AT: &str = "เวลาส่ง";

    /// Header row in column order.
    pub const ORDER: [&str; 10] = [
        EMPLOYEE,
        GRANULARITY,
        CATEGORY,
        START_DATE,
        END_DATE,
        START_TIME,
        END_TIME,
        DAY_EQUIVALENT,
        REASON,
        SUBMITTED_AT,
    ];
}

/// One stored leave record as an ordered header-to-value mapping.
///
/// Pair order defines column order on append. Values stay as the raw strings
/// the store returned; accounting applies its own lenient parsing on top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordRow {
    fields: Vec<(String, String)>,
}

impl Serialize for RecordRow {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl RecordRow {
    pub fn new(fields: Vec<(String, String)>) -> Self {
        Self { fields }
    }

    /// Value under a column header, if the row carries that column.
    pub fn get(&self, header: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == header)
            .map(|(_, value)| value.as_str())
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    /// Values only, in column order, for stores that persist plain rows.
    pub fn values(&self) -> Vec<String> {
        self.fields
            .iter()
            .map(|(_, value)| value.clone())
            .collect()
    }
}

impl From<&LeaveRecord> for RecordRow {
    fn from(record: &LeaveRecord) -> Self {
        Self::new(vec![
            (columns::EMPLOYEE.to_string(), record.employee_name.clone()),
            (
                columns::GRANULARITY.to_string(),
                record.granularity.label().to_string(),
            ),
            (
                columns::CATEGORY.to_string(),
                record.category.label().to_string(),
            ),
            (
                columns::START_DATE.to_string(),
                record.start_date.to_string(),
            ),
            (columns::END_DATE.to_string(), record.end_date.to_string()),
            (
                columns::START_TIME.to_string(),
                time_label(record.start_time),
            ),
            (columns::END_TIME.to_string(), time_label(record.end_time)),
            (
                columns::DAY_EQUIVALENT.to_string(),
                record.day_equivalent.to_string(),
            ),
            (columns::REASON.to_string(), record.reason.clone()),
            (
                columns::SUBMITTED_AT.to_string(),
                record.submitted_at_label(),
            ),
        ])
    }
}

fn time_label(time: Option<NaiveTime>) -> String {
    time.map(|value| value.format(TIME_FORMAT).to_string())
        .unwrap_or_default()
}

/// Append-only persistence for leave records.
///
/// The backing store is shared mutable state with no transactional guarantee
/// against concurrent writers. Callers re-fetch the full row set instead of
/// caching, so reads are only as stale as the store itself.
pub trait LeaveRecordStore: Send + Sync {
    fn append(&self, row: RecordRow) -> Result<(), StoreError>;
    fn get_all(&self) -> Result<Vec<RecordRow>, StoreError>;
}

/// Error raised by record store adapters.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record store unavailable: {0}")]
    Unavailable(String),
}

/// Source of selectable employee names.
pub trait EmployeeRoster: Send + Sync {
    /// Every known employee name, trimmed, with blank entries dropped.
    fn names(&self) -> Result<Vec<String>, RosterError>;
}

/// Error raised by roster adapters.
#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    #[error("employee roster unavailable: {0}")]
    Unavailable(String),
}
