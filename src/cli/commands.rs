use crate::analyzers::ConditionAnalyzer;
use crate::archive::{ArchiveExtractor, DatasetFetcher};
use crate::cli::args::{Cli, Commands, FetchArgs, PreprocessArgs};
use crate::error::Result;
use crate::processors::{FeatureEngineer, RangeChecker};
use crate::readers::RawDataReader;
use crate::settings::{FetchConfig, PipelineConfig, PreprocessConfig};
use crate::utils::progress::ProgressReporter;
use crate::writers::{OutputFormat, ParquetWriter, ProcessedCsvWriter};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub async fn run(cli: Cli) -> Result<()> {
    let mut config = PipelineConfig::load(cli.config.as_deref())?;
    debug!("Loaded configuration: {:?}", config);

    match cli.command {
        Commands::Fetch(args) => {
            args.apply(&mut config.fetch);
            config.validate()?;

            fetch_dataset(&config.fetch, args.archive.as_deref(), cli.quiet).await?;
        }

        Commands::Preprocess(args) => {
            args.apply(&mut config.preprocess);
            config.validate()?;

            preprocess_dataset(&config.preprocess, cli.quiet)?;
        }

        Commands::Run { fetch, preprocess } => {
            fetch.apply(&mut config.fetch);
            preprocess.apply(&mut config.preprocess);
            config.validate()?;

            let raw_file = fetch_dataset(&config.fetch, fetch.archive.as_deref(), cli.quiet).await?;
            if preprocess.input_file.is_none() {
                config.preprocess.input_file = raw_file;
            }

            preprocess_dataset(&config.preprocess, cli.quiet)?;
        }

        Commands::Info { file, json } => {
            show_info(&file, json)?;
        }
    }

    Ok(())
}

impl FetchArgs {
    pub fn apply(&self, config: &mut FetchConfig) {
        if let Some(url) = &self.url {
            config.url = url.clone();
        }
        if let Some(raw_dir) = &self.raw_dir {
            config.raw_dir = raw_dir.clone();
        }
    }
}

impl PreprocessArgs {
    pub fn apply(&self, config: &mut PreprocessConfig) {
        if let Some(input_file) = &self.input_file {
            config.input_file = input_file.clone();
        }
        if let Some(output_dir) = &self.output_dir {
            config.output_dir = output_dir.clone();
        }
        if let Some(format) = self.format {
            config.format = format;
        }
        if let Some(bool_format) = self.bool_format {
            config.bool_format = bool_format;
        }
        if let Some(compression) = &self.compression {
            config.compression = compression.clone();
        }
    }
}

/// Populate the raw data directory, from the network or from a local archive
pub async fn fetch_dataset(
    config: &FetchConfig,
    local_archive: Option<&Path>,
    silent: bool,
) -> Result<PathBuf> {
    let raw_file = match local_archive {
        Some(archive) => {
            info!("Unpacking local archive {}", archive.display());
            ArchiveExtractor::new()
                .with_remove_archive(false)
                .unpack(archive, &config.raw_dir)?
        }
        None => {
            DatasetFetcher::new()
                .with_silent(silent)
                .fetch(&config.url, &config.raw_dir)
                .await?
        }
    };

    info!("Raw data available at {}", display_path(&raw_file).display());
    Ok(raw_file)
}

/// Read the raw CSV, derive features and flags, and save the processed table
pub fn preprocess_dataset(config: &PreprocessConfig, silent: bool) -> Result<PathBuf> {
    let progress = ProgressReporter::new_spinner("Reading raw data...", silent);

    let table = RawDataReader::new().read_table(&config.input_file)?;
    info!(
        "Loaded {} rows from {}",
        table.len(),
        config.input_file.display()
    );

    let checker = RangeChecker::new();
    let report = checker.check_table(&table);
    if let Some(warning) = report.warning() {
        warn!("{}", warning);
        progress.println(&checker.generate_summary(&report));
    }

    progress.set_message("Engineering features...");
    let processed = FeatureEngineer::new().preprocess(table)?;

    progress.set_message("Writing processed data...");
    let output_path = match config.format {
        OutputFormat::Csv => ProcessedCsvWriter::new()
            .with_bool_format(config.bool_format)
            .save(&processed, &config.output_dir)?,
        OutputFormat::Parquet => ParquetWriter::new()
            .with_compression(&config.compression)?
            .save(&processed, &config.output_dir)?,
    };

    progress.finish_with_message(&format!("Processed {} rows", processed.len()));
    info!(
        "Processed data saved to {}",
        display_path(&output_path).display()
    );

    let summary = ConditionAnalyzer::new().summarize(&processed);
    progress.println(&format!("\n{}", summary.display_summary()));

    Ok(output_path)
}

pub fn show_info(file: &Path, json: bool) -> Result<()> {
    let is_parquet = file
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("parquet"));

    if is_parquet {
        let file_info = ParquetWriter::new().get_file_info(file)?;
        if json {
            println!("{}", serde_json::to_string_pretty(&file_info)?);
        } else {
            println!("{}", file_info.summary());
        }
        return Ok(());
    }

    let summary = ConditionAnalyzer::new().analyze_csv(file)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("Analyzing processed file: {}", file.display());
        println!("\n{}", summary.display_summary());
    }

    Ok(())
}

fn display_path(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
