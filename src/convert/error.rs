use std::path::PathBuf;

use thiserror::Error;

use crate::dataset::DatasetError;
use crate::record::RecordError;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Data directory not found: {0}")]
    DataDirNotFound(PathBuf),

    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),

    #[error("Failed to write {path}: {source}")]
    Record { path: PathBuf, source: RecordError },

    #[error("Validation size {requested} exceeds {available} train examples")]
    ValidationTooLarge { requested: usize, available: usize },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
