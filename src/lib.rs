//! MNIST IDX to TFRecord conversion
//!
//! Decodes the gzip-compressed MNIST image/label files, writes each example
//! as a `tf.train.Example` record, and reads record files back as batches.

pub mod convert;
pub mod dataset;
pub mod loader;
pub mod record;
