use crate::writers::{BoolFormat, OutputFormat};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "maintenance-pipeline")]
#[command(about = "Fetch and feature-engineer the AI4I 2020 predictive maintenance dataset")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "Suppress progress bars and summaries")]
    pub quiet: bool,

    #[arg(long, global = true, help = "Configuration file (TOML)")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Download and unpack the raw dataset
    Fetch(FetchArgs),

    /// Derive features and failure flags from the raw CSV
    Preprocess(PreprocessArgs),

    /// Fetch, then preprocess the freshly downloaded file
    Run {
        #[command(flatten)]
        fetch: FetchArgs,

        #[command(flatten)]
        preprocess: PreprocessArgs,
    },

    /// Summarise a processed CSV or Parquet file
    Info {
        #[arg(short, long)]
        file: PathBuf,

        #[arg(long, help = "Print the summary as JSON")]
        json: bool,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct FetchArgs {
    #[arg(long, help = "Archive URL [default: UCI AI4I 2020 dataset]")]
    pub url: Option<String>,

    #[arg(long, help = "Directory for the raw CSV [default: data/raw]")]
    pub raw_dir: Option<PathBuf>,

    #[arg(
        long,
        help = "Unpack a local zip archive instead of downloading (the archive is kept)"
    )]
    pub archive: Option<PathBuf>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct PreprocessArgs {
    #[arg(
        long,
        help = "Raw CSV file [default: data/raw/predictive_maintenance_raw_data.csv]"
    )]
    pub input_file: Option<PathBuf>,

    #[arg(long, help = "Directory for the processed file [default: data/processed]")]
    pub output_dir: Option<PathBuf>,

    #[arg(long, value_enum, help = "Output format [default: csv]")]
    pub format: Option<OutputFormat>,

    #[arg(long, value_enum, help = "Flag representation in CSV output [default: words]")]
    pub bool_format: Option<BoolFormat>,

    #[arg(long, help = "Parquet compression [default: snappy]")]
    pub compression: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_run_with_flags() {
        let cli = Cli::try_parse_from([
            "maintenance-pipeline",
            "run",
            "--raw-dir",
            "raw",
            "--output-dir",
            "processed",
            "--format",
            "parquet",
            "-v",
        ])
        .unwrap();

        assert!(cli.verbose);
        match cli.command {
            Commands::Run { fetch, preprocess } => {
                assert_eq!(fetch.raw_dir, Some(PathBuf::from("raw")));
                assert_eq!(preprocess.output_dir, Some(PathBuf::from("processed")));
                assert_eq!(preprocess.format, Some(OutputFormat::Parquet));
                assert!(preprocess.input_file.is_none());
            }
            _ => panic!("Expected run command"),
        }
    }

    #[test]
    fn test_parse_preprocess_bool_format() {
        let cli = Cli::try_parse_from([
            "maintenance-pipeline",
            "preprocess",
            "--bool-format",
            "numeric",
        ])
        .unwrap();

        match cli.command {
            Commands::Preprocess(args) => assert_eq!(args.bool_format, Some(BoolFormat::Numeric)),
            _ => panic!("Expected preprocess command"),
        }
    }
}
