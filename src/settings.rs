//! Pipeline configuration.
//!
//! Values are layered: built-in defaults, then an optional TOML file, then
//! `PDM_`-prefixed environment variables (`PDM_FETCH__URL`,
//! `PDM_PREPROCESS__OUTPUT_DIR`, ...). The CLI applies its own flags last.

use crate::error::{ProcessingError, Result};
use crate::utils::constants::{
    COMPRESSION_GZIP, COMPRESSION_LZ4, COMPRESSION_NONE, COMPRESSION_SNAPPY, COMPRESSION_ZSTD,
    DEFAULT_DATASET_URL, DEFAULT_PROCESSED_DIR, DEFAULT_RAW_DIR, ENV_PREFIX, RAW_DATA_FILE,
};
use crate::writers::{BoolFormat, OutputFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub fetch: FetchConfig,
    pub preprocess: PreprocessConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct FetchConfig {
    #[validate(url)]
    pub url: String,
    pub raw_dir: PathBuf,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATASET_URL.to_string(),
            raw_dir: PathBuf::from(DEFAULT_RAW_DIR),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct PreprocessConfig {
    pub input_file: PathBuf,
    pub output_dir: PathBuf,
    pub format: OutputFormat,
    pub bool_format: BoolFormat,
    #[validate(custom(function = "validate_compression"))]
    pub compression: String,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            input_file: Path::new(DEFAULT_RAW_DIR).join(RAW_DATA_FILE),
            output_dir: PathBuf::from(DEFAULT_PROCESSED_DIR),
            format: OutputFormat::Csv,
            bool_format: BoolFormat::Words,
            compression: COMPRESSION_SNAPPY.to_string(),
        }
    }
}

fn validate_compression(compression: &str) -> std::result::Result<(), ValidationError> {
    match compression.to_lowercase().as_str() {
        COMPRESSION_SNAPPY | COMPRESSION_GZIP | COMPRESSION_LZ4 | COMPRESSION_ZSTD
        | COMPRESSION_NONE => Ok(()),
        _ => Err(ValidationError::new("unsupported_compression")),
    }
}

impl PipelineConfig {
    /// Load defaults, an optional TOML file, and `PDM_*` environment overrides
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let mut builder =
            ::config::Config::builder().add_source(::config::Config::try_from(&Self::default())?);

        if let Some(path) = file {
            if !path.exists() {
                return Err(ProcessingError::Config(format!(
                    "Configuration file not found: {}",
                    path.display()
                )));
            }
            builder = builder.add_source(::config::File::from(path));
        }

        let config: Self = builder
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.fetch.validate()?;
        self.preprocess.validate()?;
        Ok(())
    }
}
