use crate::error::{ProcessingError, Result};
use crate::models::{
    EngineeredFeatures, FailureConditions, ProcessedFeatures, ProcessedRow, ProcessedTable,
    ProductType, SensorReading, SensorTable,
};
use crate::utils::constants::{
    DERIVED_COLUMNS, HDF_MAX_DELTA_TEMP, HDF_MAX_ROTATIONAL_SPEED, PWF_MAX_POWER, PWF_MIN_POWER,
    RPM_TO_RAD_PER_SEC,
};

/// Derives the engineered features and failure flags for each reading.
pub struct FeatureEngineer;

impl FeatureEngineer {
    pub fn new() -> Self {
        Self
    }

    /// Append the derived columns to every row of the table.
    ///
    /// Rows are processed independently and keep their order, so the output
    /// has exactly as many rows as the input.
    pub fn preprocess(&self, table: SensorTable) -> Result<ProcessedTable> {
        let (headers, rows) = table.into_parts();

        if let Some(existing) = DERIVED_COLUMNS
            .iter()
            .find(|name| headers.iter().any(|h| h == **name))
        {
            return Err(ProcessingError::DuplicateColumn(existing.to_string()));
        }

        let rows = rows
            .into_iter()
            .map(|row| {
                let derived = self.engineer(&row.reading);
                ProcessedRow {
                    raw: row.raw,
                    reading: row.reading,
                    derived,
                }
            })
            .collect();

        Ok(ProcessedTable::new(headers, rows))
    }

    pub fn engineer(&self, reading: &SensorReading) -> ProcessedFeatures {
        let features = compute_features(reading);
        let conditions = evaluate_conditions(reading, &features);
        ProcessedFeatures {
            features,
            conditions,
        }
    }
}

impl Default for FeatureEngineer {
    fn default() -> Self {
        Self::new()
    }
}

pub fn compute_features(reading: &SensorReading) -> EngineeredFeatures {
    EngineeredFeatures {
        delta_temp: reading.process_temperature - reading.air_temperature,
        power: reading.torque * reading.rotational_speed * RPM_TO_RAD_PER_SEC,
        overstrain: reading.tool_wear * reading.torque,
    }
}

pub fn evaluate_conditions(
    reading: &SensorReading,
    features: &EngineeredFeatures,
) -> FailureConditions {
    FailureConditions {
        heat_dissipation: heat_dissipation_condition(features.delta_temp, reading.rotational_speed),
        power: power_condition(features.power),
        overstrain: overstrain_condition(reading.product_type, features.overstrain),
    }
}

pub fn heat_dissipation_condition(delta_temp: f64, rotational_speed: f64) -> bool {
    delta_temp < HDF_MAX_DELTA_TEMP && rotational_speed < HDF_MAX_ROTATIONAL_SPEED
}

pub fn power_condition(power: f64) -> bool {
    power < PWF_MIN_POWER || power > PWF_MAX_POWER
}

pub fn overstrain_condition(product_type: ProductType, overstrain: f64) -> bool {
    overstrain > product_type.overstrain_threshold()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SensorRow;
    use csv::StringRecord;

    const EPSILON: f64 = 1e-9;

    fn reading(
        product_type: ProductType,
        air: f64,
        process: f64,
        rpm: f64,
        torque: f64,
        wear: f64,
    ) -> SensorReading {
        SensorReading::new(product_type, air, process, rpm, torque, wear)
    }

    fn table(readings: &[SensorReading]) -> SensorTable {
        let headers = StringRecord::from(vec![
            "UDI",
            "Type",
            "Air temperature [K]",
            "Process temperature [K]",
            "Rotational speed [rpm]",
            "Torque [Nm]",
            "Tool wear [min]",
        ]);
        let rows = readings
            .iter()
            .enumerate()
            .map(|(i, r)| {
                let raw = StringRecord::from(vec![
                    (i + 1).to_string(),
                    r.product_type.code().to_string(),
                    r.air_temperature.to_string(),
                    r.process_temperature.to_string(),
                    r.rotational_speed.to_string(),
                    r.torque.to_string(),
                    r.tool_wear.to_string(),
                ]);
                SensorRow::new(raw, *r)
            })
            .collect();
        SensorTable::new(headers, rows)
    }

    #[test]
    fn test_delta_temp() {
        let features = compute_features(&reading(ProductType::Low, 298.1, 308.6, 1551.0, 42.8, 0.0));
        assert!((features.delta_temp - (308.6 - 298.1)).abs() < EPSILON);
    }

    #[test]
    fn test_power_fixture() {
        let features = compute_features(&reading(ProductType::Low, 300.0, 310.0, 1500.0, 10.0, 0.0));
        assert!((features.power - 1570.796_326_794_896_6).abs() < 1e-6);
        assert!((features.power - 1570.8).abs() < 0.01);
    }

    #[test]
    fn test_overstrain_fixture() {
        let features = compute_features(&reading(ProductType::Low, 300.0, 310.0, 1500.0, 50.0, 120.0));
        assert_eq!(features.overstrain, 6000.0);
    }

    #[test]
    fn test_heat_dissipation_requires_both_conditions() {
        assert!(heat_dissipation_condition(8.5, 1379.0));
        assert!(!heat_dissipation_condition(8.5, 1500.0));
        assert!(!heat_dissipation_condition(10.0, 1300.0));
    }

    #[test]
    fn test_heat_dissipation_boundaries_are_strict() {
        assert!(!heat_dissipation_condition(8.6, 1300.0));
        assert!(!heat_dissipation_condition(8.0, 1380.0));
    }

    #[test]
    fn test_power_band() {
        assert!(power_condition(3499.9));
        assert!(!power_condition(3500.0));
        assert!(!power_condition(6000.0));
        assert!(!power_condition(9000.0));
        assert!(power_condition(9000.1));
    }

    #[test]
    fn test_overstrain_thresholds_per_type() {
        let cases = [
            (ProductType::Low, 11000.0),
            (ProductType::Medium, 12000.0),
            (ProductType::High, 13000.0),
        ];

        for (product_type, threshold) in cases {
            assert!(
                !overstrain_condition(product_type, threshold),
                "{} at threshold should not trigger",
                product_type
            );
            assert!(
                overstrain_condition(product_type, threshold + 0.01),
                "{} above threshold should trigger",
                product_type
            );
        }
    }

    #[test]
    fn test_overstrain_threshold_depends_on_type() {
        assert!(overstrain_condition(ProductType::Low, 11500.0));
        assert!(!overstrain_condition(ProductType::Medium, 11500.0));
        assert!(!overstrain_condition(ProductType::High, 12500.0));
    }

    #[test]
    fn test_engineer_flags_from_reading() {
        let engineer = FeatureEngineer::new();

        // delta 8.0, rpm 1300: HDF; power = 60 * 1300 * 2pi/60 ~ 8168: no PWF
        let hdf = engineer.engineer(&reading(ProductType::Medium, 300.0, 308.0, 1300.0, 60.0, 10.0));
        assert!(hdf.conditions.heat_dissipation);
        assert!(!hdf.conditions.power);
        assert!(!hdf.conditions.overstrain);
        assert!(hdf.conditions.any());

        // 200 min * 60 Nm = 12000 > 11000 for L
        let osf = engineer.engineer(&reading(ProductType::Low, 300.0, 310.0, 1500.0, 60.0, 200.0));
        assert!(osf.conditions.overstrain);

        let nominal = engineer.engineer(&reading(ProductType::High, 298.1, 308.6, 1551.0, 42.8, 0.0));
        assert!(!nominal.conditions.any());
    }

    #[test]
    fn test_preprocess_preserves_rows_and_order() -> Result<()> {
        let readings = vec![
            reading(ProductType::Medium, 298.1, 308.6, 1551.0, 42.8, 0.0),
            reading(ProductType::Low, 298.2, 308.7, 1408.0, 46.3, 3.0),
            reading(ProductType::High, 298.3, 308.5, 1498.0, 49.4, 5.0),
        ];
        let input = table(&readings);
        let input_raw: Vec<StringRecord> = input.rows().iter().map(|r| r.raw.clone()).collect();

        let processed = FeatureEngineer::new().preprocess(input)?;

        assert_eq!(processed.len(), readings.len());
        assert_eq!(processed.input_headers().len(), 7);
        for (row, (raw, original)) in processed
            .rows()
            .iter()
            .zip(input_raw.iter().zip(readings.iter()))
        {
            assert_eq!(&row.raw, raw);
            assert_eq!(&row.reading, original);
        }

        Ok(())
    }

    #[test]
    fn test_preprocess_rejects_existing_derived_column() {
        let headers = StringRecord::from(vec!["Type", "power"]);
        let input = SensorTable::new(headers, Vec::new());

        let result = FeatureEngineer::new().preprocess(input);
        assert!(matches!(result, Err(ProcessingError::DuplicateColumn(name)) if name == "power"));
    }
}
