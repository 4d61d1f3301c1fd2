pub mod csv_writer;
pub mod parquet_writer;

pub use csv_writer::{format_float, output_headers, ProcessedCsvWriter};
pub use parquet_writer::{ParquetFileInfo, ParquetWriter};

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tempfile::NamedTempFile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Parquet,
}

/// How failure flags are rendered in CSV output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BoolFormat {
    /// `True` / `False`
    #[default]
    Words,
    /// `1` / `0`
    Numeric,
}

impl BoolFormat {
    pub fn format(&self, value: bool) -> &'static str {
        match (self, value) {
            (BoolFormat::Words, true) => "True",
            (BoolFormat::Words, false) => "False",
            (BoolFormat::Numeric, true) => "1",
            (BoolFormat::Numeric, false) => "0",
        }
    }

    /// Accepts either representation, case-insensitively for words
    pub fn parse_flag(value: &str) -> Option<bool> {
        match value.trim() {
            "1" => Some(true),
            "0" => Some(false),
            v if v.eq_ignore_ascii_case("true") => Some(true),
            v if v.eq_ignore_ascii_case("false") => Some(false),
            _ => None,
        }
    }
}

/// Temp file in `dir` that persists with ordinary data-file permissions
/// rather than the owner-only mode `tempfile` uses by default.
pub(crate) fn output_temp_file(dir: &Path) -> Result<NamedTempFile> {
    let mut builder = tempfile::Builder::new();
    builder.prefix(".processed_data");

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o644));
    }

    Ok(builder.tempfile_in(dir)?)
}
