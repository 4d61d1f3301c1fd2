pub mod condition_analyzer;

pub use condition_analyzer::{ConditionAnalyzer, ConditionSummary, TypeBreakdown, ValueRange};
