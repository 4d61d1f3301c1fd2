/// File names
pub const RAW_DATA_FILE: &str = "predictive_maintenance_raw_data.csv";
pub const ARCHIVE_FILE: &str = "dataset.zip";
pub const PROCESSED_CSV_FILE: &str = "processed_data.csv";
pub const PROCESSED_PARQUET_FILE: &str = "processed_data.parquet";

/// Dataset source
pub const DEFAULT_DATASET_URL: &str =
    "https://archive.ics.uci.edu/static/public/601/ai4i+2020+predictive+maintenance+dataset.zip";

/// Directory names
pub const DEFAULT_RAW_DIR: &str = "data/raw";
pub const DEFAULT_PROCESSED_DIR: &str = "data/processed";

/// Input column names, exactly as they appear in the raw header
pub const COL_TYPE: &str = "Type";
pub const COL_AIR_TEMPERATURE: &str = "Air temperature [K]";
pub const COL_PROCESS_TEMPERATURE: &str = "Process temperature [K]";
pub const COL_ROTATIONAL_SPEED: &str = "Rotational speed [rpm]";
pub const COL_TORQUE: &str = "Torque [Nm]";
pub const COL_TOOL_WEAR: &str = "Tool wear [min]";

pub const REQUIRED_COLUMNS: [&str; 6] = [
    COL_TYPE,
    COL_AIR_TEMPERATURE,
    COL_PROCESS_TEMPERATURE,
    COL_ROTATIONAL_SPEED,
    COL_TORQUE,
    COL_TOOL_WEAR,
];

/// Derived column names, in output order
pub const COL_DELTA_TEMP: &str = "delta_temp";
pub const COL_POWER: &str = "power";
pub const COL_OVERSTRAIN: &str = "overstrain";
pub const COL_HDF_CONDITION: &str = "HDF_condition";
pub const COL_PWF_CONDITION: &str = "PWF_condition";
pub const COL_OSF_CONDITION: &str = "OSF_condition";

pub const DERIVED_COLUMNS: [&str; 6] = [
    COL_DELTA_TEMP,
    COL_POWER,
    COL_OVERSTRAIN,
    COL_HDF_CONDITION,
    COL_PWF_CONDITION,
    COL_OSF_CONDITION,
];

/// rpm -> rad/s
pub const RPM_TO_RAD_PER_SEC: f64 = 2.0 * std::f64::consts::PI / 60.0;

/// Heat dissipation failure thresholds (strict `<`)
pub const HDF_MAX_DELTA_TEMP: f64 = 8.6;
pub const HDF_MAX_ROTATIONAL_SPEED: f64 = 1380.0;

/// Power failure operating band in watts
pub const PWF_MIN_POWER: f64 = 3500.0;
pub const PWF_MAX_POWER: f64 = 9000.0;

/// Overstrain failure thresholds in min*Nm (strict `>`)
pub const OSF_THRESHOLD_LOW: f64 = 11000.0;
pub const OSF_THRESHOLD_MEDIUM: f64 = 12000.0;
pub const OSF_THRESHOLD_HIGH: f64 = 13000.0;

/// Physical plausibility bounds used for range warnings
pub const MIN_VALID_KELVIN: f64 = 0.0;
pub const MAX_VALID_KELVIN: f64 = 1000.0;

/// Processing defaults
pub const DEFAULT_ROW_GROUP_SIZE: usize = 10000;
pub const DEFAULT_BUFFER_SIZE: usize = 8192 * 16; // 128KB

/// Parquet compression options
pub const COMPRESSION_SNAPPY: &str = "snappy";
pub const COMPRESSION_GZIP: &str = "gzip";
pub const COMPRESSION_LZ4: &str = "lz4";
pub const COMPRESSION_ZSTD: &str = "zstd";
pub const COMPRESSION_NONE: &str = "none";

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "PDM";
