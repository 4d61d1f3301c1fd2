pub mod raw_reader;

pub use raw_reader::{check_required_columns, column_index, RawDataReader};
