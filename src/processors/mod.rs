pub mod feature_engineer;
pub mod range_checker;

pub use feature_engineer::FeatureEngineer;
pub use range_checker::{RangeChecker, RangeReport, RangeViolation, TypeStatistics};
