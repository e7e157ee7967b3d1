use std::sync::Arc;
use std::thread;

use crossbeam_channel::{bounded, Receiver};

use super::batch::Batch;
use super::loader::RecordLoader;

pub struct BatchIterator<'a> {
    loader: &'a RecordLoader,
    current_batch_index: usize,
}

impl<'a> BatchIterator<'a> {
    pub fn new(loader: &'a RecordLoader) -> Self {
        BatchIterator {
            loader,
            current_batch_index: 0,
        }
    }
}

impl Iterator for BatchIterator<'_> {
    type Item = Batch;

    fn next(&mut self) -> Option<Self::Item> {
        let batch = self.loader.next_batch(self.current_batch_index)?;
        self.current_batch_index += 1;
        Some(batch)
    }
}

/// Builds batches on a background thread, keeping up to
/// `prefetch_count` of them ready ahead of the consumer.
pub struct PrefetchBatchIterator {
    receiver: Receiver<Batch>,
    producer: Option<thread::JoinHandle<()>>,
}

impl PrefetchBatchIterator {
    fn new(loader: Arc<RecordLoader>) -> Self {
        let (sender, receiver) = bounded(loader.config.prefetch_count);

        let producer = thread::spawn(move || {
            let mut current_batch_index = 0;
            while let Some(batch) = loader.next_batch(current_batch_index) {
                if sender.send(batch).is_err() {
                    break;
                }
                current_batch_index += 1;
            }
        });

        PrefetchBatchIterator {
            receiver,
            producer: Some(producer),
        }
    }
}

impl Iterator for PrefetchBatchIterator {
    type Item = Batch;

    fn next(&mut self) -> Option<Self::Item> {
        match self.receiver.recv() {
            Ok(batch) => Some(batch),
            // Sender dropped: producer finished
            Err(_) => {
                if let Some(producer) = self.producer.take() {
                    let _ = producer.join();
                }
                None
            }
        }
    }
}

pub trait PrefetchLoaderIterator {
    fn prefetch_iter(self: Arc<Self>) -> PrefetchBatchIterator;
}

impl PrefetchLoaderIterator for RecordLoader {
    fn prefetch_iter(self: Arc<Self>) -> PrefetchBatchIterator {
        PrefetchBatchIterator::new(self)
    }
}
