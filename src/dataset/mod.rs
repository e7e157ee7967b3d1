//! IDX dataset decoding
//!
//! Reads the gzip-compressed MNIST image/label file pairs into a [`DataSet`].

pub mod dataset;
pub mod error;
pub mod idx;

pub use dataset::{open_idx_stream, read_dataset, DataSet};
pub use error::{DatasetError, IdxError};
pub use idx::{read_images, read_labels, read_u32_be, IdxKind, IMAGES_MAGIC, LABELS_MAGIC};
