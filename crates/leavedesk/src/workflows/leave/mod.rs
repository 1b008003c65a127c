//! Employee leave requests: rule validation, day-equivalent accounting, and
//! submission with a rendered confirmation document, all over an append-only
//! record store.

pub mod accounting;
pub(crate) mod csv_store;
pub mod document;
pub mod domain;
pub mod duration;
pub(crate) mod pdf;
pub mod policy;
pub mod router;
pub mod service;
pub(crate) mod sheets;
pub mod store;
pub mod validation;

#[cfg(test)]
mod tests;

pub use accounting::{
    balance_report, consumed_by_category, history, latest_record, remaining_by_category,
    CategoryBalance,
};
pub use csv_store::{CsvEmployeeRoster, CsvLeaveStore};
pub use document::{
    document_fields, document_filename, thai_long_date, ConfirmationRenderer, DocumentField,
    RenderError,
};
pub use domain::{LeaveCategory, LeaveGranularity, LeaveRecord, LeaveRequestForm, UNSELECTED};
pub use duration::{compute_days, DurationError};
pub use pdf::PdfConfirmationRenderer;
pub use policy::{DurationRule, LeavePolicy, OverdrawRule};
pub use router::leave_router;
pub use service::{LeaveRequestService, LeaveServiceError, SubmissionReceipt};
pub use sheets::{GoogleSheetsClient, SheetTarget};
pub use store::{columns, EmployeeRoster, LeaveRecordStore, RecordRow, RosterError, StoreError};
pub use validation::{validate, RejectionReason, ValidationResult};
