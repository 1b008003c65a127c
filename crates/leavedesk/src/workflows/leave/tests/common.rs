use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde_json::Value;

use crate::workflows::leave::document::{ConfirmationRenderer, RenderError};
use crate::workflows::leave::domain::{
    LeaveCategory, LeaveGranularity, LeaveRecord, LeaveRequestForm,
};
use crate::workflows::leave::policy::LeavePolicy;
use crate::workflows::leave::store::{
    columns, EmployeeRoster, LeaveRecordStore, RecordRow, RosterError, StoreError,
};
use crate::workflows::leave::{leave_router, LeaveRequestService};

pub(super) const EMPLOYEE: &str = "สมชาย ใจดี";
pub(super) const COWORKER: &str = "สมหญิง รักงาน";

pub(super) fn today() -> NaiveDate {
    date(2026, 6, 1)
}

pub(super) fn submitted_at() -> NaiveDateTime {
    today().and_hms_opt(9, 30, 0).expect("valid timestamp")
}

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub(super) fn time(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).expect("valid time")
}

/// Three full days of annual leave, booked two days ahead.
pub(super) fn annual_form() -> LeaveRequestForm {
    LeaveRequestForm {
        employee_name: EMPLOYEE.to_string(),
        granularity: LeaveGranularity::FullDay,
        category: LeaveCategory::Annual,
        start_date: date(2026, 6, 3),
        end_date: date(2026, 6, 5),
        start_time: None,
        end_time: None,
        reason: "พักผ่อนประจำปี".to_string(),
    }
}

/// A single working day of sick leave taken by the hour.
pub(super) fn hourly_form() -> LeaveRequestForm {
    LeaveRequestForm {
        employee_name: EMPLOYEE.to_string(),
        granularity: LeaveGranularity::Hourly,
        category: LeaveCategory::Sick,
        start_date: date(2026, 6, 3),
        end_date: date(2026, 6, 3),
        start_time: Some(time(8, 30)),
        end_time: Some(time(17, 30)),
        reason: "พบแพทย์".to_string(),
    }
}

pub(super) fn record_from(form: &LeaveRequestForm, day_equivalent: &str) -> LeaveRecord {
    LeaveRecord {
        employee_name: form.employee_name.trim().to_string(),
        granularity: form.granularity,
        category: form.category,
        start_date: form.start_date,
        end_date: form.end_date,
        start_time: form.start_time,
        end_time: form.end_time,
        day_equivalent: day_equivalent.parse().expect("valid decimal"),
        reason: form.reason.clone(),
        submitted_at: submitted_at(),
    }
}

/// A bare stored row the way a record store would hand it back.
pub(super) fn stored_row(
    employee: &str,
    category: LeaveCategory,
    day_equivalent: &str,
    start_date: &str,
) -> RecordRow {
    RecordRow::new(vec![
        (columns::EMPLOYEE.to_string(), employee.to_string()),
        (
            columns::GRANULARITY.to_string(),
            LeaveGranularity::FullDay.label().to_string(),
        ),
        (columns::CATEGORY.to_string(), category.label().to_string()),
        (columns::START_DATE.to_string(), start_date.to_string()),
        (columns::END_DATE.to_string(), start_date.to_string()),
        (columns::START_TIME.to_string(), String::new()),
        (columns::END_TIME.to_string(), String::new()),
        (
            columns::DAY_EQUIVALENT.to_string(),
            day_equivalent.to_string(),
        ),
        (columns::REASON.to_string(), "ธุระส่วนตัว".to_string()),
        (
            columns::SUBMITTED_AT.to_string(),
            format!("{start_date} 08:00:00"),
        ),
    ])
}

pub(super) fn build_service() -> (
    LeaveRequestService<MemoryStore, StaticRoster, StubRenderer>,
    Arc<MemoryStore>,
) {
    build_service_with_policy(LeavePolicy::default())
}

pub(super) fn build_service_with_policy(
    policy: LeavePolicy,
) -> (
    LeaveRequestService<MemoryStore, StaticRoster, StubRenderer>,
    Arc<MemoryStore>,
) {
    let store = Arc::new(MemoryStore::default());
    let service = LeaveRequestService::new(
        store.clone(),
        Arc::new(StaticRoster::default()),
        Arc::new(StubRenderer),
        policy,
    );
    (service, store)
}

#[derive(Default)]
pub(super) struct MemoryStore {
    rows: Mutex<Vec<RecordRow>>,
}

impl MemoryStore {
    pub(super) fn with_rows(rows: Vec<RecordRow>) -> Self {
        Self {
            rows: Mutex::new(rows),
        }
    }

    pub(super) fn rows(&self) -> Vec<RecordRow> {
        self.rows.lock().expect("store mutex poisoned").clone()
    }
}

impl LeaveRecordStore for MemoryStore {
    fn append(&self, row: RecordRow) -> Result<(), StoreError> {
        self.rows.lock().expect("store mutex poisoned").push(row);
        Ok(())
    }

    fn get_all(&self) -> Result<Vec<RecordRow>, StoreError> {
        Ok(self.rows.lock().expect("store mutex poisoned").clone())
    }
}

pub(super) struct UnavailableStore;

impl LeaveRecordStore for UnavailableStore {
    fn append(&self, _row: RecordRow) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("record sheet offline".to_string()))
    }

    fn get_all(&self) -> Result<Vec<RecordRow>, StoreError> {
        Err(StoreError::Unavailable("record sheet offline".to_string()))
    }
}

pub(super) struct StaticRoster {
    names: Vec<String>,
}

impl Default for StaticRoster {
    fn default() -> Self {
        Self {
            names: vec![EMPLOYEE.to_string(), COWORKER.to_string()],
        }
    }
}

impl EmployeeRoster for StaticRoster {
    fn names(&self) -> Result<Vec<String>, RosterError> {
        Ok(self.names.clone())
    }
}

pub(super) struct UnavailableRoster;

impl EmployeeRoster for UnavailableRoster {
    fn names(&self) -> Result<Vec<String>, RosterError> {
        Err(RosterError::Unavailable("roster sheet offline".to_string()))
    }
}

pub(super) struct StubRenderer;

impl ConfirmationRenderer for StubRenderer {
    fn render(&self, _record: &LeaveRecord) -> Result<Vec<u8>, RenderError> {
        Ok(b"%PDF-stub".to_vec())
    }
}

pub(super) struct FailingRenderer;

impl ConfirmationRenderer for FailingRenderer {
    fn render(&self, _record: &LeaveRecord) -> Result<Vec<u8>, RenderError> {
        Err(RenderError::Failed("render backend offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn leave_router_with_service(
    service: LeaveRequestService<MemoryStore, StaticRoster, StubRenderer>,
) -> axum::Router {
    leave_router(Arc::new(service))
}
