//! IDX container decoding
//!
//! An IDX file is a big-endian `u32` magic number, one big-endian `u32` per
//! dimension, then the raw `u8` payload. Images and labels only differ in the
//! magic number and how many dimension fields follow it, so both go through
//! [`read_idx`].

use std::io::{ErrorKind, Read};

use tracing::debug;

use super::error::IdxError;

pub const IMAGES_MAGIC: u32 = 2051;
pub const LABELS_MAGIC: u32 = 2049;

// Upper bound on the buffer reserved up front from header values alone
const MAX_PREALLOC: usize = 64 * 1024 * 1024;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IdxKind {
    Images,
    Labels,
}

impl IdxKind {
    pub fn magic(&self) -> u32 {
        match self {
            IdxKind::Images => IMAGES_MAGIC,
            IdxKind::Labels => LABELS_MAGIC,
        }
    }

    /// Number of dimension fields following the magic number
    pub fn dimension_count(&self) -> usize {
        match self {
            IdxKind::Images => 3,
            IdxKind::Labels => 1,
        }
    }
}

pub struct IdxPayload {
    pub dims: Vec<u32>,
    pub data: Vec<u8>,
}

/// Composes four bytes into a `u32`, most significant byte first.
pub fn u32_from_be_bytes(bytes: [u8; 4]) -> u32 {
    (bytes[0] as u32) << 24 | (bytes[1] as u32) << 16 | (bytes[2] as u32) << 8 | bytes[3] as u32
}

pub fn read_u32_be<R: Read>(stream: &mut R) -> Result<u32, IdxError> {
    let mut buf = [0u8; 4];
    let mut filled = 0;

    while filled < buf.len() {
        match stream.read(&mut buf[filled..]) {
            Ok(0) => {
                return Err(IdxError::Decode {
                    expected: buf.len(),
                    actual: filled,
                })
            }
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }

    Ok(u32_from_be_bytes(buf))
}

pub fn read_idx<R: Read>(stream: &mut R, kind: IdxKind) -> Result<IdxPayload, IdxError> {
    let magic = read_u32_be(stream)?;
    if magic != kind.magic() {
        return Err(IdxError::Format {
            expected: kind.magic(),
            actual: magic,
        });
    }

    let dims = (0..kind.dimension_count())
        .map(|_| read_u32_be(stream))
        .collect::<Result<Vec<_>, _>>()?;

    // None when the declared size cannot even be addressed, which no payload can match
    let expected = dims
        .iter()
        .try_fold(1usize, |acc, &dim| acc.checked_mul(dim as usize));

    let mut data = Vec::with_capacity(expected.unwrap_or(0).min(MAX_PREALLOC));
    stream.read_to_end(&mut data)?;

    if expected != Some(data.len()) {
        return Err(IdxError::Shape {
            dims,
            actual: data.len(),
        });
    }

    debug!("Decoded {:?} header {:?}, {} payload bytes", kind, dims, data.len());

    Ok(IdxPayload { dims, data })
}

/// Reads an images file body: `(count, rows, columns, pixel_bytes)`.
pub fn read_images<R: Read>(stream: &mut R) -> Result<(usize, usize, usize, Vec<u8>), IdxError> {
    let IdxPayload { dims, data } = read_idx(stream, IdxKind::Images)?;
    Ok((dims[0] as usize, dims[1] as usize, dims[2] as usize, data))
}

/// Reads a labels file body: `(count, label_bytes)`.
pub fn read_labels<R: Read>(stream: &mut R) -> Result<(usize, Vec<u8>), IdxError> {
    let IdxPayload { dims, data } = read_idx(stream, IdxKind::Labels)?;
    Ok((dims[0] as usize, data))
}
