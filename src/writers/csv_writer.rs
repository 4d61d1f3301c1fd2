use crate::error::Result;
use crate::models::{ProcessedRow, ProcessedTable};
use crate::utils::constants::{DERIVED_COLUMNS, PROCESSED_CSV_FILE};
use crate::writers::{output_temp_file, BoolFormat};
use csv::{StringRecord, WriterBuilder};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

pub struct ProcessedCsvWriter {
    bool_format: BoolFormat,
}

impl ProcessedCsvWriter {
    pub fn new() -> Self {
        Self {
            bool_format: BoolFormat::Words,
        }
    }

    pub fn with_bool_format(mut self, bool_format: BoolFormat) -> Self {
        self.bool_format = bool_format;
        self
    }

    /// Write `dir/processed_data.csv`, creating `dir` if needed.
    ///
    /// The file is written next to its destination and renamed into place,
    /// so a failed write never leaves a truncated table behind.
    pub fn save(&self, table: &ProcessedTable, dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(PROCESSED_CSV_FILE);

        let mut temp_file = output_temp_file(dir)?;
        self.write_to(table, BufWriter::new(temp_file.as_file_mut()))?;
        temp_file.persist(&path)?;

        debug!("Wrote {} rows to {}", table.len(), path.display());
        Ok(path)
    }

    pub fn write_to<W: Write>(&self, table: &ProcessedTable, sink: W) -> Result<()> {
        let mut writer = WriterBuilder::new().from_writer(sink);

        writer.write_record(&output_headers(table.input_headers()))?;
        for row in table.rows() {
            writer.write_record(&self.output_record(row))?;
        }

        writer.flush()?;
        Ok(())
    }

    fn output_record(&self, row: &ProcessedRow) -> StringRecord {
        let features = &row.derived.features;
        let conditions = &row.derived.conditions;

        let mut record = row.raw.clone();
        record.push_field(&format_float(features.delta_temp));
        record.push_field(&format_float(features.power));
        record.push_field(&format_float(features.overstrain));
        record.push_field(self.bool_format.format(conditions.heat_dissipation));
        record.push_field(self.bool_format.format(conditions.power));
        record.push_field(self.bool_format.format(conditions.overstrain));
        record
    }
}

impl Default for ProcessedCsvWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Input columns in their original order, then the derived columns
pub fn output_headers(input_headers: &StringRecord) -> StringRecord {
    let mut headers = input_headers.clone();
    for name in DERIVED_COLUMNS {
        headers.push_field(name);
    }
    headers
}

/// Shortest round-trip representation, always with a decimal point
pub fn format_float(value: f64) -> String {
    format!("{:?}", value)
}
