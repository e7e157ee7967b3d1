use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecordError {
    #[error("Failed to encode record {index}: {reason}")]
    Encode { index: usize, reason: String },

    #[error("Failed to decode record: {0}")]
    Decode(#[from] prost::DecodeError),

    #[error("Record is missing {kind} feature '{name}'")]
    MissingFeature { name: &'static str, kind: &'static str },

    #[error("Record stream truncated: expected {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },

    #[error("Checksum mismatch in record {part}: expected 0x{expected:08X}, got 0x{actual:08X}")]
    Checksum {
        part: &'static str,
        expected: u32,
        actual: u32,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
