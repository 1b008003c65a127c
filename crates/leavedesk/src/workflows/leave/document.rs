use chrono::{Datelike, NaiveDate};

use super::domain::LeaveRecord;
use super::store::{columns, RecordRow};

/// Renders a finished leave record into a confirmation document byte stream.
pub trait ConfirmationRenderer: Send + Sync {
    fn render(&self, record: &LeaveRecord) -> Result<Vec<u8>, RenderError>;
}

/// Error raised by document renderers.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("confirmation document rendering failed: {0}")]
    Failed(String),
}

const THAI_MONTHS: [&str; 12] = [
    "มกราคม",
    "กุมภาพันธ์",
    "มีนาคม",
    "เมษายน",
    "พฤษภาคม",
    "มิถุนายน",
    "กรกฎาคม",
    "สิงหาคม",
    "กันยายน",
    "ตุลาคม",
    "พฤศจิกายน",
    "ธันวาคม",
];

/// Format a date in the long Thai form with the Buddhist-era year.
pub fn thai_long_date(date: NaiveDate) -> String {
    let month = THAI_MONTHS[date.month0() as usize];
    format!("{} {} {}", date.day(), month, date.year() + 543)
}

/// Filename a rendered confirmation document is offered under.
///
/// Colons are dropped from the submission stamp and spaces become
/// underscores so the name stays filesystem-safe.
pub fn document_filename(record: &LeaveRecord) -> String {
    let stamp = record
        .submitted_at_label()
        .replace(':', "")
        .replace(' ', "_");
    format!("leave_form_{}_{}.pdf", record.employee_name, stamp)
}

/// One labelled line on the confirmation document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentField {
    pub label: String,
    pub value: String,
    /// Reason text wraps over multiple lines; every other field is one row.
    pub multiline: bool,
}

/// Lay the record out as labelled fields in column order.
///
/// Date-valued fields are reformatted into the long Thai form; the raw
/// submission stamp and any value that fails to parse are kept verbatim.
pub fn document_fields(record: &LeaveRecord) -> Vec<DocumentField> {
    let row = RecordRow::from(record);
    row.fields()
        .iter()
        .map(|(label, value)| {
            let formatted = if is_date_column(label) {
                NaiveDate::parse_from_str(value, "%Y-%m-%d")
                    .map(thai_long_date)
                    .unwrap_or_else(|_| value.clone())
            } else {
                value.clone()
            };
            DocumentField {
                label: label.clone(),
                value: formatted,
                multiline: label == columns::REASON,
            }
        })
        .collect()
}

fn is_date_column(label: &str) -> bool {
    label == columns::START_DATE || label == columns::END_DATE
}
