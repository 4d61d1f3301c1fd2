use crate::error::{ProcessingError, Result};
use crate::models::{EngineeredFeatures, FailureConditions, ProcessedTable, ProductType};
use crate::readers::column_index;
use crate::utils::constants::{
    COL_DELTA_TEMP, COL_HDF_CONDITION, COL_OSF_CONDITION, COL_OVERSTRAIN, COL_POWER,
    COL_PWF_CONDITION, COL_TYPE,
};
use crate::writers::BoolFormat;
use csv::{ReaderBuilder, StringRecord};
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    fn include(range: &mut Option<ValueRange>, value: f64) {
        match range {
            Some(r) => {
                r.min = r.min.min(value);
                r.max = r.max.max(value);
            }
            None => {
                *range = Some(ValueRange {
                    min: value,
                    max: value,
                })
            }
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TypeBreakdown {
    pub product_type: ProductType,
    pub rows: usize,
    pub hdf_count: usize,
    pub pwf_count: usize,
    pub osf_count: usize,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ConditionSummary {
    pub total_rows: usize,
    pub hdf_count: usize,
    pub pwf_count: usize,
    pub osf_count: usize,
    pub any_condition_count: usize,
    pub by_type: Vec<TypeBreakdown>,
    pub delta_temp: Option<ValueRange>,
    pub power: Option<ValueRange>,
    pub overstrain: Option<ValueRange>,
}

impl ConditionSummary {
    fn add(
        &mut self,
        product_type: ProductType,
        features: &EngineeredFeatures,
        conditions: &FailureConditions,
    ) {
        self.total_rows += 1;
        self.hdf_count += conditions.heat_dissipation as usize;
        self.pwf_count += conditions.power as usize;
        self.osf_count += conditions.overstrain as usize;
        self.any_condition_count += conditions.any() as usize;

        ValueRange::include(&mut self.delta_temp, features.delta_temp);
        ValueRange::include(&mut self.power, features.power);
        ValueRange::include(&mut self.overstrain, features.overstrain);

        let index = match self
            .by_type
            .binary_search_by_key(&product_type, |b| b.product_type)
        {
            Ok(index) => index,
            Err(index) => {
                self.by_type.insert(
                    index,
                    TypeBreakdown {
                        product_type,
                        rows: 0,
                        hdf_count: 0,
                        pwf_count: 0,
                        osf_count: 0,
                    },
                );
                index
            }
        };
        let breakdown = &mut self.by_type[index];
        breakdown.rows += 1;
        breakdown.hdf_count += conditions.heat_dissipation as usize;
        breakdown.pwf_count += conditions.power as usize;
        breakdown.osf_count += conditions.overstrain as usize;
    }

    pub fn percentage(&self, count: usize) -> f64 {
        if self.total_rows == 0 {
            0.0
        } else {
            (count as f64 / self.total_rows as f64) * 100.0
        }
    }

    pub fn display_summary(&self) -> String {
        let mut summary = format!(
            "Failure Condition Summary:\n\
            - Total rows: {}\n\
            - HDF condition: {} ({:.2}%)\n\
            - PWF condition: {} ({:.2}%)\n\
            - OSF condition: {} ({:.2}%)\n\
            - Any condition: {} ({:.2}%)\n",
            self.total_rows,
            self.hdf_count,
            self.percentage(self.hdf_count),
            self.pwf_count,
            self.percentage(self.pwf_count),
            self.osf_count,
            self.percentage(self.osf_count),
            self.any_condition_count,
            self.percentage(self.any_condition_count),
        );

        if !self.by_type.is_empty() {
            summary.push_str("\nBy product type:\n");
            for b in &self.by_type {
                summary.push_str(&format!(
                    "  {} ({}): {} rows, HDF {}, PWF {}, OSF {}\n",
                    b.product_type,
                    b.product_type.display_name(),
                    b.rows,
                    b.hdf_count,
                    b.pwf_count,
                    b.osf_count
                ));
            }
        }

        let ranges = [
            ("delta_temp [K]", &self.delta_temp),
            ("power [W]", &self.power),
            ("overstrain [min*Nm]", &self.overstrain),
        ];
        if ranges.iter().any(|(_, r)| r.is_some()) {
            summary.push_str("\nDerived ranges:\n");
            for (name, range) in ranges {
                if let Some(r) = range {
                    summary.push_str(&format!("  {}: {:.2} .. {:.2}\n", name, r.min, r.max));
                }
            }
        }

        summary
    }
}

pub struct ConditionAnalyzer;

impl ConditionAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn summarize(&self, table: &ProcessedTable) -> ConditionSummary {
        let mut summary = ConditionSummary::default();
        for row in table.rows() {
            summary.add(
                row.reading.product_type,
                &row.derived.features,
                &row.derived.conditions,
            );
        }
        summary
    }

    /// Summarise a processed CSV file written in either boolean format
    pub fn analyze_csv(&self, path: &Path) -> Result<ConditionSummary> {
        let mut reader = ReaderBuilder::new().has_headers(true).from_path(path)?;
        let headers = reader.headers()?.clone();
        let columns = ProcessedColumns::locate(&headers)?;

        let mut summary = ConditionSummary::default();
        for (index, record_result) in reader.records().enumerate() {
            let record = record_result?;
            let line = index + 2;

            let product_type = ProductType::parse(field(&record, columns.product_type, line)?)
                .ok_or_else(|| {
                    ProcessingError::InvalidFormat(format!("line {}: unknown product type", line))
                })?;
            let features = EngineeredFeatures {
                delta_temp: parse_number(&record, columns.delta_temp, line)?,
                power: parse_number(&record, columns.power, line)?,
                overstrain: parse_number(&record, columns.overstrain, line)?,
            };
            let conditions = FailureConditions {
                heat_dissipation: parse_flag(&record, columns.hdf, line)?,
                power: parse_flag(&record, columns.pwf, line)?,
                overstrain: parse_flag(&record, columns.osf, line)?,
            };

            summary.add(product_type, &features, &conditions);
        }

        Ok(summary)
    }
}

impl Default for ConditionAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

struct ProcessedColumns {
    product_type: usize,
    delta_temp: usize,
    power: usize,
    overstrain: usize,
    hdf: usize,
    pwf: usize,
    osf: usize,
}

impl ProcessedColumns {
    fn locate(headers: &StringRecord) -> Result<Self> {
        Ok(Self {
            product_type: column_index(headers, COL_TYPE)?,
            delta_temp: column_index(headers, COL_DELTA_TEMP)?,
            power: column_index(headers, COL_POWER)?,
            overstrain: column_index(headers, COL_OVERSTRAIN)?,
            hdf: column_index(headers, COL_HDF_CONDITION)?,
            pwf: column_index(headers, COL_PWF_CONDITION)?,
            osf: column_index(headers, COL_OSF_CONDITION)?,
        })
    }
}

fn field(record: &StringRecord, index: usize, line: usize) -> Result<&str> {
    record.get(index).ok_or_else(|| {
        ProcessingError::InvalidFormat(format!("line {}: missing field {}", line, index + 1))
    })
}

fn parse_number(record: &StringRecord, index: usize, line: usize) -> Result<f64> {
    let value = field(record, index, line)?;
    value.trim().parse::<f64>().map_err(|_| {
        ProcessingError::InvalidFormat(format!("line {}: invalid number '{}'", line, value))
    })
}

fn parse_flag(record: &StringRecord, index: usize, line: usize) -> Result<bool> {
    let value = field(record, index, line)?;
    BoolFormat::parse_flag(value).ok_or_else(|| {
        ProcessingError::InvalidFormat(format!("line {}: invalid flag '{}'", line, value))
    })
}
