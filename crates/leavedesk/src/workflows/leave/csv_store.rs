use std::fs::OpenOptions;
use std::path::PathBuf;

use super::store::{columns, EmployeeRoster, LeaveRecordStore, RecordRow, RosterError, StoreError};

/// Record store keeping rows in a local CSV file.
///
/// Suits single-host deployments and demos; shared deployments point the
/// service at the spreadsheet-backed store instead. A missing file simply
/// means no history yet.
#[derive(Debug, Clone)]
pub struct CsvLeaveStore {
    path: PathBuf,
}

impl CsvLeaveStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl LeaveRecordStore for CsvLeaveStore {
    fn append(&self, row: RecordRow) -> Result<(), StoreError> {
        let needs_header = self
            .path
            .metadata()
            .map(|meta| meta.len() == 0)
            .unwrap_or(true);

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|err| StoreError::Unavailable(err.to_string()))?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        if needs_header {
            writer
                .write_record(columns::ORDER)
                .map_err(|err| StoreError::Unavailable(err.to_string()))?;
        }
        writer
            .write_record(row.values())
            .map_err(|err| StoreError::Unavailable(err.to_string()))?;
        writer
            .flush()
            .map_err(|err| StoreError::Unavailable(err.to_string()))?;
        Ok(())
    }

    fn get_all(&self) -> Result<Vec<RecordRow>, StoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_path(&self.path)
            .map_err(|err| StoreError::Unavailable(err.to_string()))?;
        let headers = reader
            .headers()
            .map_err(|err| StoreError::Unavailable(err.to_string()))?
            .clone();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|err| StoreError::Unavailable(err.to_string()))?;
            let fields = headers
                .iter()
                .zip(record.iter())
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect();
            rows.push(RecordRow::new(fields));
        }
        Ok(rows)
    }
}

/// Roster reading employee names from the first column of a CSV file.
///
/// The first row is treated as a header and skipped; blank entries are
/// dropped.
#[derive(Debug, Clone)]
pub struct CsvEmployeeRoster {
    path: PathBuf,
}

impl CsvEmployeeRoster {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl EmployeeRoster for CsvEmployeeRoster {
    fn names(&self) -> Result<Vec<String>, RosterError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(&self.path)
            .map_err(|err| RosterError::Unavailable(err.to_string()))?;

        let mut names = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|err| RosterError::Unavailable(err.to_string()))?;
            if let Some(name) = record.get(0) {
                if !name.is_empty() {
                    names.push(name.to_string());
                }
            }
        }
        Ok(names)
    }
}
