use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum IdxError {
    #[error("Stream ended early: expected {expected} bytes, got {actual}")]
    Decode { expected: usize, actual: usize },

    #[error("Invalid magic number: expected {expected}, got {actual}")]
    Format { expected: u32, actual: u32 },

    #[error("Payload of {actual} bytes does not match declared dimensions {dims:?}")]
    Shape { dims: Vec<u32>, actual: usize },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Failed to read images file {path}: {source}")]
    Images { path: PathBuf, source: IdxError },

    #[error("Failed to read labels file {path}: {source}")]
    Labels { path: PathBuf, source: IdxError },

    #[error("Image count {images} does not match label count {labels}")]
    Consistency { images: usize, labels: usize },

    #[error("Cannot split {requested} examples off a dataset of {available}")]
    SplitOutOfRange { requested: usize, available: usize },
}

impl DatasetError {
    /// The IDX failure underneath a per-file error, if any.
    pub fn idx_error(&self) -> Option<&IdxError> {
        match self {
            DatasetError::Images { source, .. } | DatasetError::Labels { source, .. } => Some(source),
            _ => None,
        }
    }
}
