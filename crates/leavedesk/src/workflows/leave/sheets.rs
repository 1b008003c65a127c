use google_sheets4::{api::Scope, api::ValueRange, Sheets};
use tokio::runtime::Runtime;

use super::store::{EmployeeRoster, LeaveRecordStore, RecordRow, RosterError, StoreError};

/// Location of the shared leave workbook and its tabs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetTarget {
    pub spreadsheet_id: String,
    pub records_tab: String,
    pub roster_tab: String,
}

impl SheetTarget {
    pub fn new(spreadsheet_id: impl Into<String>) -> Self {
        Self {
            spreadsheet_id: spreadsheet_id.into(),
            records_tab: "Records".to_string(),
            roster_tab: "EmployeeNames".to_string(),
        }
    }
}

/// Thin wrapper around the generated google-sheets4 client allowing
/// synchronous workflows to use the shared workbook without exposing async
/// details. Implements both the record store (records tab) and the roster
/// (first column of the roster tab).
pub struct GoogleSheetsClient<C>
where
    C: google_sheets4::common::Connector + Send + Sync + 'static,
{
    hub: Sheets<C>,
    runtime: Runtime,
    target: SheetTarget,
}

impl<C> GoogleSheetsClient<C>
where
    C: google_sheets4::common::Connector + Send + Sync + 'static,
{
    pub fn new(hub: Sheets<C>, runtime: Runtime, target: SheetTarget) -> Self {
        Self {
            hub,
            runtime,
            target,
        }
    }

    pub fn with_runtime(hub: Sheets<C>, target: SheetTarget) -> Result<Self, StoreError> {
        let runtime = Runtime::new().map_err(|err| StoreError::Unavailable(err.to_string()))?;
        Ok(Self::new(hub, runtime, target))
    }

    fn fetch_rows(&self, range: &str) -> Result<Vec<Vec<String>>, String> {
        let result = self.runtime.block_on(async {
            self.hub
                .spreadsheets()
                .values_get(&self.target.spreadsheet_id, range)
                .add_scope(Scope::Spreadsheet)
                .doit()
                .await
        });

        let (_, value_range) = result.map_err(|err| err.to_string())?;
        Ok(value_range
            .values
            .unwrap_or_default()
            .into_iter()
            .map(|row| row.into_iter().map(cell_text).collect())
            .collect())
    }
}

impl<C> std::fmt::Debug for GoogleSheetsClient<C>
where
    C: google_sheets4::common::Connector + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleSheetsClient")
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

impl<C> LeaveRecordStore for GoogleSheetsClient<C>
where
    C: google_sheets4::common::Connector + Send + Sync + 'static,
{
    fn append(&self, row: RecordRow) -> Result<(), StoreError> {
        let values = row
            .values()
            .into_iter()
            .map(serde_json::Value::from)
            .collect();
        let payload = ValueRange {
            major_dimension: None,
            range: None,
            values: Some(vec![values]),
        };

        let range = format!("{}!A:J", self.target.records_tab);
        let result = self.runtime.block_on(async {
            self.hub
                .spreadsheets()
                .values_append(payload, &self.target.spreadsheet_id, &range)
                .value_input_option("USER_ENTERED")
                .add_scope(Scope::Spreadsheet)
                .doit()
                .await
        });

        result.map_err(|err| StoreError::Unavailable(err.to_string()))?;
        Ok(())
    }

    fn get_all(&self) -> Result<Vec<RecordRow>, StoreError> {
        let range = format!("{}!A:J", self.target.records_tab);
        let mut rows = self
            .fetch_rows(&range)
            .map_err(StoreError::Unavailable)?
            .into_iter();

        // First row is the header; it keys every row below it.
        let headers = match rows.next() {
            Some(headers) => headers,
            None => return Ok(Vec::new()),
        };

        Ok(rows
            .map(|values| {
                RecordRow::new(headers.iter().cloned().zip(values).collect())
            })
            .collect())
    }
}

impl<C> EmployeeRoster for GoogleSheetsClient<C>
where
    C: google_sheets4::common::Connector + Send + Sync + 'static,
{
    fn names(&self) -> Result<Vec<String>, RosterError> {
        let range = format!("{}!A:A", self.target.roster_tab);
        let mut rows = self
            .fetch_rows(&range)
            .map_err(RosterError::Unavailable)?
            .into_iter();
        rows.next();

        Ok(rows
            .filter_map(|row| row.into_iter().next())
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .collect())
    }
}

fn cell_text(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(text) => text,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}
