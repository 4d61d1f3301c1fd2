use crate::error::{ProcessingError, Result};
use crate::utils::constants::RAW_DATA_FILE;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use zip::ZipArchive;

/// A file written out of the archive, in archive order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedFile {
    pub member_name: String,
    pub path: PathBuf,
}

pub struct ArchiveExtractor {
    remove_archive: bool,
}

impl ArchiveExtractor {
    pub fn new() -> Self {
        Self {
            remove_archive: true,
        }
    }

    /// Keep the archive on disk after unpacking (for archives the caller owns)
    pub fn with_remove_archive(mut self, remove_archive: bool) -> Self {
        self.remove_archive = remove_archive;
        self
    }

    /// Extract everything, delete the archive, and rename the first CSV member
    /// to `dest_dir/predictive_maintenance_raw_data.csv`.
    pub fn unpack(&self, zip_path: &Path, dest_dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(dest_dir)?;

        let extracted = self.extract_all(zip_path, dest_dir)?;
        info!(
            "Unpacked {} files into {}",
            extracted.len(),
            dest_dir.display()
        );

        if self.remove_archive {
            std::fs::remove_file(zip_path)?;
            debug!("Removed archive {}", zip_path.display());
        }

        let csv_file = find_first_csv(&extracted).ok_or_else(|| {
            ProcessingError::MissingData(format!(
                "No .csv member found in archive '{}'",
                zip_path.display()
            ))
        })?;

        let canonical_path = dest_dir.join(RAW_DATA_FILE);
        std::fs::rename(&csv_file.path, &canonical_path)?;
        info!(
            "Renamed {} to {}",
            csv_file.member_name,
            canonical_path.display()
        );

        Ok(canonical_path)
    }

    /// Extract all file members into `dest_dir`, preserving archive order
    pub fn extract_all(&self, zip_path: &Path, dest_dir: &Path) -> Result<Vec<ExtractedFile>> {
        let file = File::open(zip_path)?;
        let mut archive = ZipArchive::new(file)?;
        let mut extracted = Vec::new();

        for i in 0..archive.len() {
            let mut zip_file = archive.by_index(i)?;
            let member_name = zip_file.name().to_string();

            // Reject absolute paths and `..` components
            let relative = match zip_file.enclosed_name() {
                Some(path) => path.to_path_buf(),
                None => {
                    warn!("Skipping archive member with unsafe path: {}", member_name);
                    continue;
                }
            };
            let dest_path = dest_dir.join(relative);

            if zip_file.is_dir() {
                std::fs::create_dir_all(&dest_path)?;
                continue;
            }

            if let Some(parent) = dest_path.parent() {
                std::fs::create_dir_all(parent)?;
            }

            let mut dest_file = File::create(&dest_path)?;
            let mut writer = BufWriter::new(&mut dest_file);
            std::io::copy(&mut zip_file, &mut writer)?;
            writer.flush()?;

            debug!("Extracted {} ({} bytes)", member_name, zip_file.size());
            extracted.push(ExtractedFile {
                member_name,
                path: dest_path,
            });
        }

        Ok(extracted)
    }
}

impl Default for ArchiveExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// First member ending in `.csv`, ignoring macOS resource-fork entries
pub fn find_first_csv(extracted: &[ExtractedFile]) -> Option<&ExtractedFile> {
    extracted.iter().find(|f| {
        f.member_name.ends_with(".csv") && !f.member_name.starts_with("__MACOSX/")
    })
}
