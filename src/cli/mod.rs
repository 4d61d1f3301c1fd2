pub mod args;
pub mod commands;
pub mod logging;

pub use args::{Cli, Commands, FetchArgs, PreprocessArgs};
pub use commands::{fetch_dataset, preprocess_dataset, run, show_info};
pub use logging::init_logging;
