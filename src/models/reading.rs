use csv::StringRecord;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::ProductType;
use crate::utils::constants::{
    COL_AIR_TEMPERATURE, COL_PROCESS_TEMPERATURE, COL_ROTATIONAL_SPEED, COL_TOOL_WEAR, COL_TORQUE,
    MAX_VALID_KELVIN, MIN_VALID_KELVIN,
};

/// The typed sensor columns of one machine cycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct SensorReading {
    #[serde(rename = "Type")]
    pub product_type: ProductType,

    #[serde(rename = "Air temperature [K]")]
    #[validate(range(min = MIN_VALID_KELVIN, max = MAX_VALID_KELVIN))]
    pub air_temperature: f64,

    #[serde(rename = "Process temperature [K]")]
    #[validate(range(min = MIN_VALID_KELVIN, max = MAX_VALID_KELVIN))]
    pub process_temperature: f64,

    #[serde(rename = "Rotational speed [rpm]")]
    #[validate(range(min = 0.0))]
    pub rotational_speed: f64,

    #[serde(rename = "Torque [Nm]")]
    #[validate(range(min = 0.0))]
    pub torque: f64,

    #[serde(rename = "Tool wear [min]")]
    #[validate(range(min = 0.0))]
    pub tool_wear: f64,
}

impl SensorReading {
    pub fn new(
        product_type: ProductType,
        air_temperature: f64,
        process_temperature: f64,
        rotational_speed: f64,
        torque: f64,
        tool_wear: f64,
    ) -> Self {
        Self {
            product_type,
            air_temperature,
            process_temperature,
            rotational_speed,
            torque,
            tool_wear,
        }
    }

    pub fn is_numeric_column(name: &str) -> bool {
        matches!(
            name,
            COL_AIR_TEMPERATURE
                | COL_PROCESS_TEMPERATURE
                | COL_ROTATIONAL_SPEED
                | COL_TORQUE
                | COL_TOOL_WEAR
        )
    }

    /// Value of a numeric input column by its header name.
    pub fn numeric_column(&self, name: &str) -> Option<f64> {
        match name {
            COL_AIR_TEMPERATURE => Some(self.air_temperature),
            COL_PROCESS_TEMPERATURE => Some(self.process_temperature),
            COL_ROTATIONAL_SPEED => Some(self.rotational_speed),
            COL_TORQUE => Some(self.torque),
            COL_TOOL_WEAR => Some(self.tool_wear),
            _ => None,
        }
    }
}

/// One input row: the untouched field text plus its typed reading.
#[derive(Debug, Clone)]
pub struct SensorRow {
    pub raw: StringRecord,
    pub reading: SensorReading,
}

impl SensorRow {
    pub fn new(raw: StringRecord, reading: SensorReading) -> Self {
        Self { raw, reading }
    }
}

#[derive(Debug, Clone)]
pub struct SensorTable {
    headers: StringRecord,
    rows: Vec<SensorRow>,
}

impl SensorTable {
    pub fn new(headers: StringRecord, rows: Vec<SensorRow>) -> Self {
        Self { headers, rows }
    }

    pub fn headers(&self) -> &StringRecord {
        &self.headers
    }

    pub fn rows(&self) -> &[SensorRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn into_parts(self) -> (StringRecord, Vec<SensorRow>) {
        (self.headers, self.rows)
    }
}
