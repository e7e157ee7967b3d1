use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use flate2::bufread::MultiGzDecoder;
use tracing::info;

use super::error::{DatasetError, IdxError};
use super::idx::{read_images, read_labels};

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Labeled images decoded from a pair of IDX files.
///
/// Pixels are kept as one row-major buffer of shape `[num_examples, rows, columns]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSet {
    images: Box<[u8]>,
    labels: Box<[u8]>,
    num_examples: usize,
    rows: usize,
    columns: usize,
}

impl DataSet {
    pub fn new(
        images: Vec<u8>,
        labels: Vec<u8>,
        rows: usize,
        columns: usize,
    ) -> Result<Self, DatasetError> {
        let bytes_per_image = rows.checked_mul(columns).ok_or(DatasetError::Consistency {
            images: images.len(),
            labels: labels.len(),
        })?;
        let image_count = if bytes_per_image == 0 {
            labels.len()
        } else {
            images.len() / bytes_per_image
        };

        if image_count != labels.len() || image_count * bytes_per_image != images.len() {
            return Err(DatasetError::Consistency {
                images: image_count,
                labels: labels.len(),
            });
        }

        Ok(DataSet {
            images: images.into_boxed_slice(),
            labels: labels.into_boxed_slice(),
            num_examples: image_count,
            rows,
            columns,
        })
    }

    pub fn num_examples(&self) -> usize {
        self.num_examples
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// `(num_examples, rows, columns)`
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.num_examples, self.rows, self.columns)
    }

    pub fn bytes_per_image(&self) -> usize {
        self.rows * self.columns
    }

    pub fn images(&self) -> &[u8] {
        &self.images
    }

    pub fn labels(&self) -> &[u8] {
        &self.labels
    }

    /// Pixel at `[index, row, column]`
    ///
    /// `row` and `column` must be within the image; only `index` is bounds-checked in release builds.
    pub fn pixel(&self, index: usize, row: usize, column: usize) -> u8 {
        debug_assert!(row < self.rows && column < self.columns);
        self.images[index * self.bytes_per_image() + row * self.columns + column]
    }

    /// One image flattened row-major.
    pub fn image(&self, index: usize) -> &[u8] {
        let start = index * self.bytes_per_image();
        &self.images[start..start + self.bytes_per_image()]
    }

    pub fn label(&self, index: usize) -> u8 {
        self.labels[index]
    }

    /// Splits off the first `n` examples, returning `(head, rest)`.
    pub fn split_at(&self, n: usize) -> Result<(DataSet, DataSet), DatasetError> {
        if n > self.num_examples {
            return Err(DatasetError::SplitOutOfRange {
                requested: n,
                available: self.num_examples,
            });
        }

        let pivot = n * self.bytes_per_image();
        let head = DataSet {
            images: self.images[..pivot].into(),
            labels: self.labels[..n].into(),
            num_examples: n,
            rows: self.rows,
            columns: self.columns,
        };
        let rest = DataSet {
            images: self.images[pivot..].into(),
            labels: self.labels[n..].into(),
            num_examples: self.num_examples - n,
            rows: self.rows,
            columns: self.columns,
        };

        Ok((head, rest))
    }
}

/// Opens an IDX file, gunzipping it when it carries the gzip signature.
pub fn open_idx_stream(path: &Path) -> Result<Box<dyn Read>, IdxError> {
    let mut reader = BufReader::new(File::open(path)?);
    let is_gzip = reader.fill_buf()?.starts_with(&GZIP_MAGIC);

    if is_gzip {
        Ok(Box::new(MultiGzDecoder::new(reader)))
    } else {
        Ok(Box::new(reader))
    }
}

fn read_images_file(path: &Path) -> Result<(usize, usize, usize, Vec<u8>), IdxError> {
    let mut stream = open_idx_stream(path)?;
    read_images(&mut stream)
}

fn read_labels_file(path: &Path) -> Result<(usize, Vec<u8>), IdxError> {
    let mut stream = open_idx_stream(path)?;
    read_labels(&mut stream)
}

pub fn read_dataset<P: AsRef<Path>, Q: AsRef<Path>>(
    images_path: P,
    labels_path: Q,
) -> Result<DataSet, DatasetError> {
    let images_path = images_path.as_ref();
    let labels_path = labels_path.as_ref();

    let (image_count, rows, columns, pixels) =
        read_images_file(images_path).map_err(|source| DatasetError::Images {
            path: images_path.to_owned(),
            source,
        })?;

    let (label_count, labels) =
        read_labels_file(labels_path).map_err(|source| DatasetError::Labels {
            path: labels_path.to_owned(),
            source,
        })?;

    if image_count != label_count {
        return Err(DatasetError::Consistency {
            images: image_count,
            labels: label_count,
        });
    }

    info!(
        "Read {} examples of {}x{} from {:?}",
        image_count, rows, columns, images_path
    );

    Ok(DataSet {
        images: pixels.into_boxed_slice(),
        labels: labels.into_boxed_slice(),
        num_examples: image_count,
        rows,
        columns,
    })
}
