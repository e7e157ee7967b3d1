//! Batched read-back of TFRecord files
//!
//! Decodes `image_raw` back to pixels, scales them to `[-0.5, 0.5]` and
//! serves shuffled batches, optionally prefetched on a background thread.

pub mod batch;
pub mod config;
pub mod error;
pub mod info;
pub mod iter;
pub mod loader;

pub use batch::{normalize_pixel, Batch};
pub use config::LoaderConfig;
pub use error::LoaderError;
pub use info::{label_histogram, print_loader_info};
pub use iter::{BatchIterator, PrefetchBatchIterator, PrefetchLoaderIterator};
pub use loader::RecordLoader;
