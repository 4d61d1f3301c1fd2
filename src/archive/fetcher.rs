use crate::archive::ArchiveExtractor;
use crate::error::{ProcessingError, Result};
use crate::utils::constants::ARCHIVE_FILE;
use crate::utils::progress::ProgressReporter;
use reqwest::Client;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Downloads the dataset archive and unpacks it into the raw data directory.
pub struct DatasetFetcher {
    client: Client,
    silent: bool,
}

impl DatasetFetcher {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            silent: false,
        }
    }

    pub fn with_silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    /// Download `url` into `dest_dir`, unpack it and return the canonical CSV path.
    ///
    /// A single GET with no retry; any network error or non-success status
    /// is returned as-is.
    pub async fn fetch(&self, url: &str, dest_dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(dest_dir)?;

        let archive_path = self.download(url, dest_dir).await?;
        ArchiveExtractor::new().unpack(&archive_path, dest_dir)
    }

    /// Download the archive to `dest_dir/dataset.zip`
    pub async fn download(&self, url: &str, dest_dir: &Path) -> Result<PathBuf> {
        info!("Downloading {}", url);

        let mut response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(ProcessingError::Download {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        let progress = ProgressReporter::new_download(
            response.content_length(),
            "Downloading dataset...",
            self.silent,
        );

        let mut temp_file = NamedTempFile::new_in(dest_dir)?;
        let mut downloaded = 0u64;
        while let Some(chunk) = response.chunk().await? {
            temp_file.write_all(&chunk)?;
            downloaded += chunk.len() as u64;
            progress.increment(chunk.len() as u64);
        }
        temp_file.flush()?;

        let archive_path = dest_dir.join(ARCHIVE_FILE);
        temp_file.persist(&archive_path)?;

        progress.finish_with_message(&format!("Downloaded {} bytes", downloaded));
        debug!("Archive saved to {}", archive_path.display());

        Ok(archive_path)
    }
}

impl Default for DatasetFetcher {
    fn default() -> Self {
        Self::new()
    }
}
