use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use prost::Message;

use super::error::RecordError;
use super::example::{Example, Feature};
use super::tfrecord::read_frame;
use super::writer::{HEIGHT_FEATURE, IMAGE_RAW_FEATURE, LABEL_FEATURE, WIDTH_FEATURE};

/// One decoded example
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub height: i64,
    pub width: i64,
    pub label: i64,
    pub image_raw: Vec<u8>,
}

fn int64_feature(example: &Example, name: &'static str) -> Result<i64, RecordError> {
    example
        .feature(name)
        .and_then(Feature::as_int64)
        .ok_or(RecordError::MissingFeature { name, kind: "int64" })
}

pub fn decode_record(bytes: &[u8]) -> Result<Record, RecordError> {
    let example = Example::decode(bytes)?;

    let image_raw = example
        .feature(IMAGE_RAW_FEATURE)
        .and_then(Feature::as_bytes)
        .ok_or(RecordError::MissingFeature {
            name: IMAGE_RAW_FEATURE,
            kind: "bytes",
        })?
        .to_vec();

    Ok(Record {
        height: int64_feature(&example, HEIGHT_FEATURE)?,
        width: int64_feature(&example, WIDTH_FEATURE)?,
        label: int64_feature(&example, LABEL_FEATURE)?,
        image_raw,
    })
}

/// Iterates the raw payloads of a TFRecord stream.
///
/// Iteration stops after the first error.
pub struct RecordReader<R: Read> {
    reader: R,
    failed: bool,
}

impl<R: Read> RecordReader<R> {
    pub fn new(reader: R) -> Self {
        RecordReader {
            reader,
            failed: false,
        }
    }

    pub fn records(self) -> impl Iterator<Item = Result<Record, RecordError>> {
        self.map(|frame| frame.and_then(|bytes| decode_record(&bytes)))
    }
}

impl RecordReader<BufReader<File>> {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, RecordError> {
        Ok(RecordReader::new(BufReader::new(File::open(path)?)))
    }
}

impl<R: Read> Iterator for RecordReader<R> {
    type Item = Result<Vec<u8>, RecordError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        match read_frame(&mut self.reader) {
            Ok(frame) => frame.map(Ok),
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

/// Reads and decodes every record in a TFRecord file.
pub fn read_records<P: AsRef<Path>>(path: P) -> Result<Vec<Record>, RecordError> {
    RecordReader::open(path)?.records().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::example::Int64List;
    use crate::record::tfrecord::write_frame;
    use crate::record::writer::encode_record;
    use std::io::Cursor;

    #[test]
    fn test_decode_record() {
        let bytes = encode_record(28, 28, 9, &[0u8; 784]).unwrap();
        let record = decode_record(&bytes).unwrap();

        assert_eq!(record.height, 28);
        assert_eq!(record.width, 28);
        assert_eq!(record.label, 9);
        assert_eq!(record.image_raw.len(), 784);
    }

    #[test]
    fn test_decode_missing_feature() {
        let example = Example::from_features([
            (HEIGHT_FEATURE, Feature::int64(1)),
            (WIDTH_FEATURE, Feature::int64(1)),
            (LABEL_FEATURE, Feature::int64(0)),
        ]);

        assert!(matches!(
            decode_record(&example.encode_to_vec()),
            Err(RecordError::MissingFeature { name: "image_raw", .. })
        ));
    }

    #[test]
    fn test_decode_wrong_feature_kind() {
        let example = Example::from_features([
            (HEIGHT_FEATURE, Feature::bytes(vec![1])),
            (WIDTH_FEATURE, Feature::int64(1)),
            (LABEL_FEATURE, Feature::int64(0)),
            (IMAGE_RAW_FEATURE, Feature::bytes(vec![0])),
        ]);

        assert!(matches!(
            decode_record(&example.encode_to_vec()),
            Err(RecordError::MissingFeature { name: "height", kind: "int64" })
        ));
    }

    #[test]
    fn test_decode_empty_int64_list() {
        let mut example = Example::from_features([
            (WIDTH_FEATURE, Feature::int64(1)),
            (LABEL_FEATURE, Feature::int64(0)),
            (IMAGE_RAW_FEATURE, Feature::bytes(vec![0])),
        ]);
        example.features.as_mut().unwrap().feature.insert(
            HEIGHT_FEATURE.to_string(),
            Feature {
                kind: Some(crate::record::example::feature::Kind::Int64List(Int64List {
                    value: Vec::new(),
                })),
            },
        );

        assert!(decode_record(&example.encode_to_vec()).is_err());
    }

    #[test]
    fn test_decode_garbage() {
        assert!(matches!(
            decode_record(&[0xFF, 0xFF, 0xFF]),
            Err(RecordError::Decode(_))
        ));
    }

    #[test]
    fn test_reader_stops_after_error() {
        let mut buf = Vec::new();
        write_frame(&mut buf, &encode_record(1, 1, 1, &[1]).unwrap()).unwrap();
        buf.extend_from_slice(&[0, 0, 0]);

        let mut reader = RecordReader::new(Cursor::new(buf)).records();
        assert_eq!(reader.next().unwrap().unwrap().label, 1);
        assert!(matches!(reader.next(), Some(Err(RecordError::Truncated { .. }))));
        assert!(reader.next().is_none());
    }
}
