use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use prost::Message;
use tracing::{debug, info, warn};

use crate::dataset::DataSet;

use super::error::RecordError;
use super::example::{Example, Feature};
use super::tfrecord::write_frame;

pub const HEIGHT_FEATURE: &str = "height";
pub const WIDTH_FEATURE: &str = "width";
pub const LABEL_FEATURE: &str = "label";
pub const IMAGE_RAW_FEATURE: &str = "image_raw";

const PARTIAL_SUFFIX: &str = "partial";

fn to_int64(index: usize, name: &str, value: usize) -> Result<i64, RecordError> {
    i64::try_from(value).map_err(|_| RecordError::Encode {
        index,
        reason: format!("{} {} does not fit in int64", name, value),
    })
}

/// Serializes one example as a `tf.train.Example` with
/// `height`, `width`, `label` (int64) and `image_raw` (bytes).
pub fn encode_record(
    height: usize,
    width: usize,
    label: u8,
    image_raw: &[u8],
) -> Result<Vec<u8>, RecordError> {
    encode_indexed_record(0, height, width, label, image_raw)
}

fn encode_indexed_record(
    index: usize,
    height: usize,
    width: usize,
    label: u8,
    image_raw: &[u8],
) -> Result<Vec<u8>, RecordError> {
    let example = Example::from_features([
        (HEIGHT_FEATURE, Feature::int64(to_int64(index, HEIGHT_FEATURE, height)?)),
        (WIDTH_FEATURE, Feature::int64(to_int64(index, WIDTH_FEATURE, width)?)),
        (LABEL_FEATURE, Feature::int64(label as i64)),
        (IMAGE_RAW_FEATURE, Feature::bytes(image_raw.to_vec())),
    ]);

    let mut buf = Vec::with_capacity(example.encoded_len());
    example.encode(&mut buf).map_err(|e| RecordError::Encode {
        index,
        reason: e.to_string(),
    })?;

    Ok(buf)
}

/// Writes every example of `dataset` to `writer` in index order.
///
/// Returns the number of records written. The writer is flushed on success.
pub fn write_records<W: Write>(dataset: &DataSet, writer: &mut W) -> Result<usize, RecordError> {
    let (num_examples, height, width) = dataset.shape();

    for index in 0..num_examples {
        let record =
            encode_indexed_record(index, height, width, dataset.label(index), dataset.image(index))?;
        write_frame(writer, &record)?;
    }

    writer.flush()?;
    Ok(num_examples)
}

fn partial_path(output_path: &Path) -> PathBuf {
    let mut name = output_path.file_name().unwrap_or_default().to_os_string();
    name.push(".");
    name.push(PARTIAL_SUFFIX);
    output_path.with_file_name(name)
}

fn write_partial(dataset: &DataSet, partial: &Path) -> Result<usize, RecordError> {
    let mut writer = BufWriter::new(File::create(partial)?);
    let written = write_records(dataset, &mut writer)?;

    let file = writer.into_inner().map_err(|e| e.into_error())?;
    file.sync_all()?;
    Ok(written)
}

/// Writes `dataset` to `output_path` as a TFRecord file.
///
/// Records go to a `.partial` sibling first, which is renamed over
/// `output_path` only once every record is on disk. On failure the partial
/// file is removed and `output_path` is left untouched.
pub fn write_dataset<P: AsRef<Path>>(dataset: &DataSet, output_path: P) -> Result<usize, RecordError> {
    let output_path = output_path.as_ref();
    let partial = partial_path(output_path);
    debug!("Writing {} records to {:?}", dataset.num_examples(), partial);

    let result = write_partial(dataset, &partial).and_then(|written| {
        fs::rename(&partial, output_path)
            .map(|_| written)
            .map_err(RecordError::from)
    });

    match result {
        Ok(written) => {
            info!("Wrote {} records to {:?}", written, output_path);
            Ok(written)
        }
        Err(e) => {
            if let Err(remove_err) = fs::remove_file(&partial) {
                warn!("Failed to remove partial file {:?}: {}", partial, remove_err);
            }
            Err(e)
        }
    }
}
