use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::dataset::{read_dataset, DataSet};
use crate::record::write_dataset;

use super::config::ConvertConfig;
use super::error::ConvertError;
use super::split::DatasetSplit;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitSummary {
    pub split: DatasetSplit,
    pub path: PathBuf,
    pub records: usize,
    /// `(num_examples, rows, columns)`
    pub shape: (usize, usize, usize),
}

pub fn read_split(data_dir: &Path, split: DatasetSplit) -> Result<DataSet, ConvertError> {
    Ok(read_dataset(
        data_dir.join(split.images_file()),
        data_dir.join(split.labels_file()),
    )?)
}

pub fn write_split(
    dataset: &DataSet,
    output_dir: &Path,
    split: DatasetSplit,
) -> Result<SplitSummary, ConvertError> {
    let path = output_dir.join(split.record_file());
    info!("Writing {} split ({} examples) to {:?}", split, dataset.num_examples(), path);

    let records = write_dataset(dataset, &path).map_err(|source| ConvertError::Record {
        path: path.clone(),
        source,
    })?;

    Ok(SplitSummary {
        split,
        path,
        records,
        shape: dataset.shape(),
    })
}

/// Converts the train and test IDX pairs in `data_dir` to TFRecord files.
///
/// With a non-zero `validation_size`, that many leading train examples are
/// written to `validation.tfrecords` instead of `train.tfrecords`.
pub fn convert(config: ConvertConfig) -> Result<Vec<SplitSummary>, ConvertError> {
    let config = config.build()?;
    fs::create_dir_all(&config.output_dir)?;

    let train = read_split(&config.data_dir, DatasetSplit::Train)?;
    let test = read_split(&config.data_dir, DatasetSplit::Test)?;

    let (validation, train) = if config.validation_size > 0 {
        if config.validation_size > train.num_examples() {
            return Err(ConvertError::ValidationTooLarge {
                requested: config.validation_size,
                available: train.num_examples(),
            });
        }
        let (validation, train) = train.split_at(config.validation_size)?;
        (Some(validation), train)
    } else {
        (None, train)
    };

    let mut summaries = vec![
        write_split(&train, &config.output_dir, DatasetSplit::Train)?,
        write_split(&test, &config.output_dir, DatasetSplit::Test)?,
    ];
    if let Some(validation) = validation {
        summaries.push(write_split(&validation, &config.output_dir, DatasetSplit::Validation)?);
    }

    Ok(summaries)
}
