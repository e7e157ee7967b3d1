use std::path::Path;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rayon::iter::{IndexedParallelIterator, IntoParallelRefIterator, ParallelIterator};
use rayon::slice::ParallelSliceMut;
use tracing::{debug, info};

use crate::record::{Record, RecordReader};

use super::batch::{normalize_pixel, Batch};
use super::config::LoaderConfig;
use super::error::LoaderError;
use super::iter::BatchIterator;

/// Serves shuffled, normalized batches out of a TFRecord file.
///
/// All records are held in memory; batches index into them through
/// `dataset_indices`, which is what gets shuffled.
pub struct RecordLoader {
    pub images: Box<[u8]>,
    pub labels: Box<[i32]>,
    pub height: usize,
    pub width: usize,
    pub dataset_indices: Vec<usize>,
    pub config: LoaderConfig,
    rng: Option<StdRng>,
    thread_pool: rayon::ThreadPool,
}

impl RecordLoader {
    pub fn open<P: AsRef<Path>>(path: P, config: Option<LoaderConfig>) -> Result<Self, LoaderError> {
        let path = path.as_ref();
        let records = RecordReader::open(path)?.records();
        let loader = Self::from_records(records, config)?;

        info!(
            "Loaded {} records of {}x{} from {:?}",
            loader.len(),
            loader.height,
            loader.width,
            path
        );

        Ok(loader)
    }

    pub fn from_records<I>(records: I, config: Option<LoaderConfig>) -> Result<Self, LoaderError>
    where
        I: IntoIterator<Item = Result<Record, crate::record::RecordError>>,
    {
        let mut config = config.unwrap_or_default().build()?;

        let mut images = Vec::new();
        let mut labels = Vec::new();
        let mut dims: Option<(i64, i64)> = None;

        for (index, record) in records.into_iter().enumerate() {
            let record = record?;
            let (height, width) = *dims.get_or_insert((record.height, record.width));

            if (record.height, record.width) != (height, width) {
                return Err(LoaderError::InconsistentDimensions {
                    index,
                    height,
                    width,
                    actual_height: record.height,
                    actual_width: record.width,
                });
            }

            let expected_bytes = usize::try_from(height)
                .ok()
                .zip(usize::try_from(width).ok())
                .and_then(|(h, w)| h.checked_mul(w));
            if expected_bytes.map_or(true, |bytes| bytes == 0 || bytes != record.image_raw.len()) {
                return Err(LoaderError::InvalidImage {
                    index,
                    height,
                    width,
                    bytes: record.image_raw.len(),
                });
            }

            let label = i32::try_from(record.label).map_err(|_| LoaderError::InvalidLabel {
                index,
                label: record.label,
            })?;

            images.extend_from_slice(&record.image_raw);
            labels.push(label);
        }

        let (height, width) = dims.ok_or(LoaderError::EmptyDataset)?;

        let rng = if config.shuffle {
            if config.shuffle_seed.is_none() {
                config.shuffle_seed = Some(rand::thread_rng().gen());
            }
            config.shuffle_seed.map(StdRng::seed_from_u64)
        } else {
            None
        };

        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.threads)
            .build()?;

        let mut loader = RecordLoader {
            images: images.into_boxed_slice(),
            dataset_indices: (0..labels.len()).collect(),
            labels: labels.into_boxed_slice(),
            height: height as usize,
            width: width as usize,
            config,
            rng,
            thread_pool,
        };

        if loader.rng.is_some() {
            loader.reshuffle()?;
        }

        Ok(loader)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn bytes_per_image(&self) -> usize {
        self.height * self.width
    }

    /// Number of batches one pass over the data yields
    pub fn batch_count(&self) -> usize {
        let full = self.len() / self.config.batch_size;
        if self.config.drop_last || self.len() % self.config.batch_size == 0 {
            full
        } else {
            full + 1
        }
    }

    /// Reshuffles the example order, e.g. between epochs.
    pub fn reshuffle(&mut self) -> Result<(), LoaderError> {
        let rng = self.rng.as_mut().ok_or(LoaderError::RngNotSet)?;
        self.dataset_indices.shuffle(rng);
        debug!("Reshuffled {} indices", self.dataset_indices.len());
        Ok(())
    }

    pub fn next_batch(&self, batch_number: usize) -> Option<Batch> {
        let batch_start = batch_number.checked_mul(self.config.batch_size)?;
        if batch_start >= self.len() {
            return None;
        }

        let batch_end = (batch_start + self.config.batch_size).min(self.len());
        if self.config.drop_last && (batch_end - batch_start) < self.config.batch_size {
            return None;
        }

        let indices = &self.dataset_indices[batch_start..batch_end];
        let bytes_per_image = self.bytes_per_image();
        let mut images = vec![0f32; indices.len() * bytes_per_image];

        self.thread_pool.install(|| {
            images
                .par_chunks_exact_mut(bytes_per_image)
                .zip(indices.par_iter())
                .for_each(|(chunk, &idx)| {
                    let raw = &self.images[idx * bytes_per_image..(idx + 1) * bytes_per_image];
                    for (out, &pixel) in chunk.iter_mut().zip(raw) {
                        *out = normalize_pixel(pixel);
                    }
                });
        });

        Some(Batch {
            images,
            labels: indices.iter().map(|&idx| self.labels[idx]).collect(),
            samples_in_batch: indices.len(),
            height: self.height,
            width: self.width,
            batch_number,
        })
    }

    pub fn iter(&self) -> BatchIterator<'_> {
        BatchIterator::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(count: usize) -> Vec<Result<Record, crate::record::RecordError>> {
        (0..count)
            .map(|i| {
                Ok(Record {
                    height: 2,
                    width: 2,
                    label: i as i64,
                    image_raw: vec![i as u8; 4],
                })
            })
            .collect()
    }

    fn config(batch_size: usize, shuffle: bool, drop_last: bool) -> Option<LoaderConfig> {
        Some(LoaderConfig {
            threads: 2,
            batch_size,
            prefetch_count: 1,
            shuffle,
            shuffle_seed: Some(727),
            drop_last,
        })
    }

    #[test]
    fn test_unshuffled_batches() {
        let loader = RecordLoader::from_records(records(5), config(2, false, false)).unwrap();
        assert_eq!(loader.batch_count(), 3);

        let batch = loader.next_batch(1).unwrap();
        assert_eq!(batch.samples_in_batch, 2);
        assert_eq!(batch.labels, vec![2, 3]);
        assert_eq!(batch.image(0), &[normalize_pixel(2); 4]);

        let last = loader.next_batch(2).unwrap();
        assert_eq!(last.samples_in_batch, 1);
        assert!(loader.next_batch(3).is_none());
    }

    #[test]
    fn test_drop_last() {
        let loader = RecordLoader::from_records(records(5), config(2, false, true)).unwrap();
        assert_eq!(loader.batch_count(), 2);
        assert!(loader.next_batch(2).is_none());
    }

    #[test]
    fn test_seeded_shuffle_is_deterministic() {
        let a = RecordLoader::from_records(records(50), config(10, true, true)).unwrap();
        let b = RecordLoader::from_records(records(50), config(10, true, true)).unwrap();
        assert_eq!(a.dataset_indices, b.dataset_indices);

        let mut sorted = a.dataset_indices.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn test_labels_follow_images() {
        let loader = RecordLoader::from_records(records(20), config(4, true, true)).unwrap();
        for batch in loader.iter() {
            for (i, &label) in batch.labels.iter().enumerate() {
                assert_eq!(batch.image(i)[0], normalize_pixel(label as u8));
            }
        }
    }

    #[test]
    fn test_reshuffle_without_rng() {
        let mut loader = RecordLoader::from_records(records(3), config(1, false, true)).unwrap();
        assert!(matches!(loader.reshuffle(), Err(LoaderError::RngNotSet)));
    }

    #[test]
    fn test_empty() {
        assert!(matches!(
            RecordLoader::from_records(Vec::new(), config(1, false, true)),
            Err(LoaderError::EmptyDataset)
        ));
    }

    #[test]
    fn test_inconsistent_dimensions() {
        let mut input = records(2);
        input.push(Ok(Record {
            height: 3,
            width: 2,
            label: 0,
            image_raw: vec![0; 6],
        }));

        assert!(matches!(
            RecordLoader::from_records(input, config(1, false, true)),
            Err(LoaderError::InconsistentDimensions { index: 2, .. })
        ));
    }

    #[test]
    fn test_invalid_image_length() {
        let input = vec![Ok(Record {
            height: 2,
            width: 2,
            label: 0,
            image_raw: vec![0; 3],
        })];

        assert!(matches!(
            RecordLoader::from_records(input, config(1, false, true)),
            Err(LoaderError::InvalidImage { bytes: 3, .. })
        ));
    }
}
