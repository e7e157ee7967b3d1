use thiserror::Error;

use crate::record::RecordError;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Record error: {0}")]
    Record(#[from] RecordError),

    #[error("No records found in the dataset")]
    EmptyDataset,

    #[error("Record {index} is {actual_height}x{actual_width}, expected {height}x{width}")]
    InconsistentDimensions {
        index: usize,
        height: i64,
        width: i64,
        actual_height: i64,
        actual_width: i64,
    },

    #[error("Record {index} has invalid image: {height}x{width} with {bytes} bytes")]
    InvalidImage {
        index: usize,
        height: i64,
        width: i64,
        bytes: usize,
    },

    #[error("Record {index} label {label} does not fit in i32")]
    InvalidLabel { index: usize, label: i64 },

    #[error("Invalid loader config: {0}")]
    InvalidConfig(String),

    #[error("Random number generator (shuffle_seed) not set or enabled")]
    RngNotSet,

    #[error("Thread pool error: {0}")]
    ThreadPoolError(#[from] rayon::ThreadPoolBuildError),
}
