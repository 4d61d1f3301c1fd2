use crate::models::{ProductType, SensorTable};
use std::collections::HashMap;
use validator::Validate;

#[derive(Debug, Clone, Default)]
pub struct RangeReport {
    pub total_rows: usize,
    pub valid_rows: usize,
    pub invalid_rows: usize,
    pub violations: Vec<RangeViolation>,
    pub type_statistics: HashMap<ProductType, TypeStatistics>,
}

impl RangeReport {
    /// One-line warning naming the count and the first offending row,
    /// or `None` when every row is in range
    pub fn warning(&self) -> Option<String> {
        if self.invalid_rows == 0 {
            return None;
        }

        let mut message = format!(
            "{} of {} rows have physically implausible values; they are kept as-is",
            self.invalid_rows, self.total_rows
        );
        if let Some(first) = self.violations.first() {
            message.push_str(&format!(" (first at line {}: {})", first.line, first.details));
        }
        Some(message)
    }
}

#[derive(Debug, Clone)]
pub struct RangeViolation {
    /// 1-based line in the source file, header included.
    pub line: usize,
    pub details: String,
}

#[derive(Debug, Clone, Default)]
pub struct TypeStatistics {
    pub total_rows: usize,
    pub invalid_rows: usize,
}

/// Flags physically implausible readings. Never drops rows.
pub struct RangeChecker {
    max_reported: usize,
}

impl RangeChecker {
    pub fn new() -> Self {
        Self { max_reported: 10 }
    }

    pub fn with_max_reported(max_reported: usize) -> Self {
        Self { max_reported }
    }

    pub fn check_table(&self, table: &SensorTable) -> RangeReport {
        let mut report = RangeReport {
            total_rows: table.len(),
            ..Default::default()
        };

        for (index, row) in table.rows().iter().enumerate() {
            let stats = report
                .type_statistics
                .entry(row.reading.product_type)
                .or_default();
            stats.total_rows += 1;

            match row.reading.validate() {
                Ok(()) => report.valid_rows += 1,
                Err(errors) => {
                    stats.invalid_rows += 1;
                    report.invalid_rows += 1;
                    if report.violations.len() < self.max_reported {
                        report.violations.push(RangeViolation {
                            line: index + 2,
                            details: describe_errors(&errors),
                        });
                    }
                }
            }
        }

        report
    }

    pub fn generate_summary(&self, report: &RangeReport) -> String {
        let mut summary = format!(
            "Range Check Summary:\n\
            - Total rows: {}\n\
            - Within physical range: {}\n\
            - Out of range: {}\n",
            report.total_rows, report.valid_rows, report.invalid_rows
        );

        for product_type in ProductType::ALL {
            if let Some(stats) = report.type_statistics.get(&product_type) {
                summary.push_str(&format!(
                    "  Type {}: {} rows, {} out of range\n",
                    product_type, stats.total_rows, stats.invalid_rows
                ));
            }
        }

        if !report.violations.is_empty() {
            summary.push_str("\nFirst violations:\n");
            for violation in &report.violations {
                summary.push_str(&format!("  line {}: {}\n", violation.line, violation.details));
            }
        }

        summary
    }
}

impl Default for RangeChecker {
    fn default() -> Self {
        Self::new()
    }
}

fn describe_errors(errors: &validator::ValidationErrors) -> String {
    let mut fields: Vec<String> = errors.field_errors().keys().map(|k| k.to_string()).collect();
    fields.sort_unstable();
    format!("out of range: {}", fields.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SensorReading, SensorRow};
    use csv::StringRecord;

    fn table_of(readings: Vec<SensorReading>) -> SensorTable {
        let headers = StringRecord::from(vec!["Type"]);
        let rows = readings
            .into_iter()
            .map(|r| SensorRow::new(StringRecord::from(vec![r.product_type.code()]), r))
            .collect();
        SensorTable::new(headers, rows)
    }

    #[test]
    fn test_all_rows_valid() {
        let table = table_of(vec![
            SensorReading::new(ProductType::Low, 298.1, 308.6, 1551.0, 42.8, 0.0),
            SensorReading::new(ProductType::High, 298.2, 308.7, 1408.0, 46.3, 3.0),
        ]);

        let report = RangeChecker::new().check_table(&table);

        assert_eq!(report.total_rows, 2);
        assert_eq!(report.valid_rows, 2);
        assert_eq!(report.invalid_rows, 0);
        assert!(report.violations.is_empty());
        assert!(report.warning().is_none());
    }

    #[test]
    fn test_negative_values_are_reported() {
        let table = table_of(vec![
            SensorReading::new(ProductType::Low, 298.1, 308.6, 1551.0, 42.8, 0.0),
            SensorReading::new(ProductType::Medium, 298.1, 308.6, -10.0, 42.8, -1.0),
        ]);

        let report = RangeChecker::new().check_table(&table);

        assert_eq!(report.invalid_rows, 1);
        assert_eq!(report.violations.len(), 1);
        assert_eq!(report.violations[0].line, 3);
        assert!(report.violations[0].details.starts_with("out of range: "));
        assert_eq!(report.violations[0].details.split(", ").count(), 2);
        assert_eq!(report.type_statistics[&ProductType::Medium].invalid_rows, 1);

        let warning = report.warning().unwrap();
        assert!(warning.starts_with("1 of 2 rows"));
        assert!(warning.contains("first at line 3: out of range: "));
    }

    #[test]
    fn test_reported_violations_are_capped() {
        let readings = (0..5)
            .map(|_| SensorReading::new(ProductType::Low, -1.0, 308.6, 1551.0, 42.8, 0.0))
            .collect();

        let checker = RangeChecker::with_max_reported(2);
        let report = checker.check_table(&table_of(readings));

        assert_eq!(report.invalid_rows, 5);
        assert_eq!(report.violations.len(), 2);
        assert!(checker.generate_summary(&report).contains("Out of range: 5"));
    }
}
