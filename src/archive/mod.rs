pub mod extractor;
pub mod fetcher;

pub use extractor::{find_first_csv, ArchiveExtractor, ExtractedFile};
pub use fetcher::DatasetFetcher;
