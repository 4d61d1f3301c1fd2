use csv::StringRecord;
use serde::{Deserialize, Serialize};

use crate::models::SensorReading;

/// Numeric columns derived from a single reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineeredFeatures {
    /// Process minus air temperature, in Kelvin.
    pub delta_temp: f64,
    /// Mechanical power in watts.
    pub power: f64,
    /// Tool wear times torque, in min*Nm.
    pub overstrain: f64,
}

/// Failure-condition flags for a single reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FailureConditions {
    pub heat_dissipation: bool,
    pub power: bool,
    pub overstrain: bool,
}

impl FailureConditions {
    pub fn any(&self) -> bool {
        self.heat_dissipation || self.power || self.overstrain
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProcessedFeatures {
    pub features: EngineeredFeatures,
    pub conditions: FailureConditions,
}

#[derive(Debug, Clone)]
pub struct ProcessedRow {
    pub raw: StringRecord,
    pub reading: SensorReading,
    pub derived: ProcessedFeatures,
}

/// Input table augmented with derived columns. Row order and count match the input.
#[derive(Debug, Clone)]
pub struct ProcessedTable {
    headers: StringRecord,
    rows: Vec<ProcessedRow>,
}

impl ProcessedTable {
    pub fn new(headers: StringRecord, rows: Vec<ProcessedRow>) -> Self {
        Self { headers, rows }
    }

    /// Header of the input columns only; derived column names are added by writers.
    pub fn input_headers(&self) -> &StringRecord {
        &self.headers
    }

    pub fn rows(&self) -> &[ProcessedRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
