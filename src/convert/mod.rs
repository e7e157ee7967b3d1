//! Conversion of the MNIST IDX splits into TFRecord files

pub mod config;
pub mod converter;
pub mod error;
pub mod split;

pub use config::ConvertConfig;
pub use converter::{convert, read_split, write_split, SplitSummary};
pub use error::ConvertError;
pub use split::DatasetSplit;
