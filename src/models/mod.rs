pub mod features;
pub mod machine;
pub mod reading;

pub use features::{
    EngineeredFeatures, FailureConditions, ProcessedFeatures, ProcessedRow, ProcessedTable,
};
pub use machine::ProductType;
pub use reading::{SensorReading, SensorRow, SensorTable};
