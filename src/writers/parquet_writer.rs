use crate::error::{ProcessingError, Result};
use crate::models::{ProcessedRow, ProcessedTable, SensorReading};
use crate::utils::constants::{
    COL_DELTA_TEMP, COL_HDF_CONDITION, COL_OSF_CONDITION, COL_OVERSTRAIN, COL_POWER,
    COL_PWF_CONDITION, DEFAULT_ROW_GROUP_SIZE, PROCESSED_PARQUET_FILE,
};
use crate::writers::output_temp_file;
use arrow::array::{ArrayRef, BooleanArray, Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use csv::StringRecord;
use parquet::arrow::ArrowWriter;
use parquet::basic::{Compression, GzipLevel, ZstdLevel};
use parquet::file::properties::WriterProperties;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

pub struct ParquetWriter {
    compression: Compression,
    row_group_size: usize,
}

impl ParquetWriter {
    pub fn new() -> Self {
        Self {
            compression: Compression::SNAPPY,
            row_group_size: DEFAULT_ROW_GROUP_SIZE,
        }
    }

    pub fn with_compression(mut self, compression: &str) -> Result<Self> {
        self.compression = match compression.to_lowercase().as_str() {
            "snappy" => Compression::SNAPPY,
            "gzip" => Compression::GZIP(GzipLevel::default()),
            "lz4" => Compression::LZ4,
            "zstd" => Compression::ZSTD(ZstdLevel::default()),
            "none" => Compression::UNCOMPRESSED,
            _ => {
                return Err(ProcessingError::Config(format!(
                    "Unsupported compression: {}",
                    compression
                )))
            }
        };
        Ok(self)
    }

    pub fn with_row_group_size(mut self, size: usize) -> Self {
        self.row_group_size = size.max(1);
        self
    }

    /// Write `dir/processed_data.parquet`, creating `dir` if needed
    pub fn save(&self, table: &ProcessedTable, dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(PROCESSED_PARQUET_FILE);

        let temp_file = output_temp_file(dir)?;
        self.write_table(table, temp_file.reopen()?)?;
        temp_file.persist(&path)?;

        debug!("Wrote {} rows to {}", table.len(), path.display());
        Ok(path)
    }

    /// Write the table in row-group sized batches
    pub fn write_table(&self, table: &ProcessedTable, file: std::fs::File) -> Result<()> {
        let schema = self.create_schema(table.input_headers());
        let props = WriterProperties::builder()
            .set_compression(self.compression)
            .set_max_row_group_size(self.row_group_size)
            .build();

        let mut writer = ArrowWriter::try_new(file, schema.clone(), Some(props))?;

        for chunk in table.rows().chunks(self.row_group_size) {
            let batch = self.rows_to_batch(table.input_headers(), chunk, schema.clone())?;
            writer.write(&batch)?;
        }

        writer.close()?;
        Ok(())
    }

    /// Modelled sensor columns become Float64, everything else stays text
    fn create_schema(&self, input_headers: &StringRecord) -> Arc<Schema> {
        let mut fields: Vec<Field> = input_headers
            .iter()
            .map(|name| {
                if SensorReading::is_numeric_column(name) {
                    Field::new(name, DataType::Float64, false)
                } else {
                    Field::new(name, DataType::Utf8, false)
                }
            })
            .collect();

        for name in [COL_DELTA_TEMP, COL_POWER, COL_OVERSTRAIN] {
            fields.push(Field::new(name, DataType::Float64, false));
        }
        for name in [COL_HDF_CONDITION, COL_PWF_CONDITION, COL_OSF_CONDITION] {
            fields.push(Field::new(name, DataType::Boolean, false));
        }

        Arc::new(Schema::new(fields))
    }

    fn rows_to_batch(
        &self,
        input_headers: &StringRecord,
        rows: &[ProcessedRow],
        schema: Arc<Schema>,
    ) -> Result<RecordBatch> {
        let mut columns: Vec<ArrayRef> = Vec::with_capacity(schema.fields().len());

        for (index, name) in input_headers.iter().enumerate() {
            let column: ArrayRef = if SensorReading::is_numeric_column(name) {
                let values: Vec<f64> = rows
                    .iter()
                    .map(|r| r.reading.numeric_column(name).unwrap_or(f64::NAN))
                    .collect();
                Arc::new(Float64Array::from(values))
            } else {
                let values: Vec<&str> = rows.iter().map(|r| r.raw.get(index).unwrap_or("")).collect();
                Arc::new(StringArray::from(values))
            };
            columns.push(column);
        }

        let features: Vec<_> = rows.iter().map(|r| r.derived.features).collect();
        let conditions: Vec<_> = rows.iter().map(|r| r.derived.conditions).collect();

        columns.push(Arc::new(Float64Array::from(
            features.iter().map(|f| f.delta_temp).collect::<Vec<_>>(),
        )));
        columns.push(Arc::new(Float64Array::from(
            features.iter().map(|f| f.power).collect::<Vec<_>>(),
        )));
        columns.push(Arc::new(Float64Array::from(
            features.iter().map(|f| f.overstrain).collect::<Vec<_>>(),
        )));
        columns.push(Arc::new(BooleanArray::from(
            conditions.iter().map(|c| c.heat_dissipation).collect::<Vec<_>>(),
        )));
        columns.push(Arc::new(BooleanArray::from(
            conditions.iter().map(|c| c.power).collect::<Vec<_>>(),
        )));
        columns.push(Arc::new(BooleanArray::from(
            conditions.iter().map(|c| c.overstrain).collect::<Vec<_>>(),
        )));

        Ok(RecordBatch::try_new(schema, columns)?)
    }

    pub fn get_file_info(&self, path: &Path) -> Result<ParquetFileInfo> {
        use parquet::file::reader::{FileReader, SerializedFileReader};
        use std::fs::File;

        let file = File::open(path)?;
        let reader = SerializedFileReader::new(file)?;
        let metadata = reader.metadata();

        let file_metadata = metadata.file_metadata();
        let row_groups = metadata.num_row_groups();
        let total_rows = file_metadata.num_rows();
        let file_size = std::fs::metadata(path)?.len();
        let columns = file_metadata
            .schema_descr()
            .columns()
            .iter()
            .map(|c| c.name().to_string())
            .collect();

        Ok(ParquetFileInfo {
            total_rows,
            row_groups: row_groups as i32,
            columns,
            file_size,
        })
    }
}

impl Default for ParquetWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Serialize)]
pub struct ParquetFileInfo {
    pub total_rows: i64,
    pub row_groups: i32,
    pub columns: Vec<String>,
    pub file_size: u64,
}

impl ParquetFileInfo {
    pub fn summary(&self) -> String {
        format!(
            "Parquet File Summary:\n\
            - Total rows: {}\n\
            - Row groups: {}\n\
            - Columns: {}\n\
            - File size: {:.2} MB",
            self.total_rows,
            self.row_groups,
            self.columns.join(", "),
            self.file_size as f64 / 1_048_576.0, // Convert to MB
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ProductType, SensorRow, SensorTable};
    use crate::processors::FeatureEngineer;
    use tempfile::TempDir;

    fn processed_table(rows: usize) -> ProcessedTable {
        let headers = StringRecord::from(vec![
            "UDI",
            "Product ID",
            "Type",
            "Air temperature [K]",
            "Process temperature [K]",
            "Rotational speed [rpm]",
            "Torque [Nm]",
            "Tool wear [min]",
        ]);
        let rows = (0..rows)
            .map(|i| {
                let wear = i as f64;
                SensorRow::new(
                    StringRecord::from(vec![
                        (i + 1).to_string(),
                        format!("L{}", 47000 + i),
                        "L".to_string(),
                        "298.1".to_string(),
                        "308.6".to_string(),
                        "1551".to_string(),
                        "42.8".to_string(),
                        wear.to_string(),
                    ]),
                    SensorReading::new(ProductType::Low, 298.1, 308.6, 1551.0, 42.8, wear),
                )
            })
            .collect();

        FeatureEngineer::new()
            .preprocess(SensorTable::new(headers, rows))
            .unwrap()
    }

    #[test]
    fn test_schema_types() {
        let table = processed_table(1);
        let schema = ParquetWriter::new().create_schema(table.input_headers());

        assert_eq!(schema.fields().len(), 14);
        assert_eq!(schema.field(0).data_type(), &DataType::Utf8);
        assert_eq!(schema.field(2).data_type(), &DataType::Utf8);
        assert_eq!(schema.field(3).data_type(), &DataType::Float64);
        assert_eq!(schema.field(9).name(), "power");
        assert_eq!(schema.field(13).data_type(), &DataType::Boolean);
    }

    #[test]
    fn test_save_and_read_back_info() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let writer = ParquetWriter::new().with_row_group_size(10);

        let path = writer.save(&processed_table(25), temp_dir.path())?;
        assert!(path.ends_with("processed_data.parquet"));

        let info = writer.get_file_info(&path)?;
        assert_eq!(info.total_rows, 25);
        assert_eq!(info.row_groups, 3);
        assert_eq!(info.columns.len(), 14);
        assert_eq!(info.columns[13], "OSF_condition");

        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_saved_file_is_group_readable() -> Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new()?;
        let path = ParquetWriter::new().save(&processed_table(3), temp_dir.path())?;

        let reference = temp_dir.path().join("reference.bin");
        std::fs::write(&reference, b"x")?;

        let mode = std::fs::metadata(&path)?.permissions().mode() & 0o777;
        let expected = std::fs::metadata(&reference)?.permissions().mode() & 0o777;
        assert_eq!(mode, expected & 0o644);

        Ok(())
    }

    #[test]
    fn test_empty_table_writes_schema_only() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let writer = ParquetWriter::new();

        let path = writer.save(&processed_table(0), temp_dir.path())?;
        let info = writer.get_file_info(&path)?;

        assert_eq!(info.total_rows, 0);
        assert_eq!(info.columns.len(), 14);

        Ok(())
    }

    #[test]
    fn test_different_compressions() -> Result<()> {
        let compressions = ["snappy", "gzip", "lz4", "zstd", "none"];

        for compression in &compressions {
            let writer = ParquetWriter::new().with_compression(compression)?;
            let temp_dir = TempDir::new()?;

            let result = writer.save(&processed_table(3), temp_dir.path());
            assert!(result.is_ok(), "Failed with compression: {}", compression);
        }

        assert!(ParquetWriter::new().with_compression("brotli9000").is_err());
        Ok(())
    }
}
