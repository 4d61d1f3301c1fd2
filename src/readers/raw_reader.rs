use crate::error::{ProcessingError, Result};
use crate::models::{SensorReading, SensorRow, SensorTable};
use crate::utils::constants::{DEFAULT_BUFFER_SIZE, REQUIRED_COLUMNS};
use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::debug;

pub struct RawDataReader {
    delimiter: u8,
}

impl RawDataReader {
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    pub fn with_delimiter(delimiter: u8) -> Self {
        Self { delimiter }
    }

    /// Read the raw sensor table from a CSV file with a header row
    pub fn read_table(&self, path: &Path) -> Result<SensorTable> {
        let file = File::open(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ProcessingError::MissingData(format!("Raw data file not found: {}", path.display()))
            } else {
                ProcessingError::Io(e)
            }
        })?;

        let table = self.read_from(BufReader::with_capacity(DEFAULT_BUFFER_SIZE, file))?;
        debug!(
            "Read {} rows with {} columns from {}",
            table.len(),
            table.headers().len(),
            path.display()
        );
        Ok(table)
    }

    /// Read the raw sensor table from any CSV source
    pub fn read_from<R: Read>(&self, source: R) -> Result<SensorTable> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .from_reader(source);

        let headers = reader.headers()?.clone();
        check_required_columns(&headers)?;

        let mut rows = Vec::new();
        for (index, record_result) in reader.records().enumerate() {
            let record = record_result?;
            // Header is line 1
            let line = index + 2;
            let reading = parse_reading(&record, &headers, line)?;
            rows.push(SensorRow::new(record, reading));
        }

        Ok(SensorTable::new(headers, rows))
    }
}

impl Default for RawDataReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Position of a named column in the header
pub fn column_index(headers: &StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| ProcessingError::MissingColumn(name.to_string()))
}

/// Fail on the first required input column absent from the header
pub fn check_required_columns(headers: &StringRecord) -> Result<()> {
    for name in REQUIRED_COLUMNS {
        column_index(headers, name)?;
    }
    Ok(())
}

fn parse_reading(record: &StringRecord, headers: &StringRecord, line: usize) -> Result<SensorReading> {
    record
        .deserialize::<SensorReading>(Some(headers))
        .map_err(|e| {
            let column = match e.kind() {
                csv::ErrorKind::Deserialize { err, .. } => err
                    .field()
                    .and_then(|i| headers.get(i as usize))
                    .map(|name| format!(" column '{}'", name))
                    .unwrap_or_default(),
                _ => String::new(),
            };
            ProcessingError::InvalidFormat(format!("line {}{}: {}", line, column, e))
        })
}
