//! TFRecord serialization of labeled images
//!
//! Every example becomes one `tf.train.Example` holding `height`, `width`,
//! `label` and `image_raw`, framed with length and CRC32C checksums.

pub mod error;
pub mod example;
pub mod reader;
pub mod tfrecord;
pub mod writer;

pub use error::RecordError;
pub use reader::{decode_record, read_records, Record, RecordReader};
pub use writer::{encode_record, write_dataset, write_records};
