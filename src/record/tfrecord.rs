//! TFRecord framing
//!
//! Each frame is:
//!   - u64 little-endian payload length
//!   - u32 masked CRC32C of the length bytes
//!   - payload
//!   - u32 masked CRC32C of the payload

use std::io::{ErrorKind, Read, Write};

use super::error::RecordError;

const MASK_DELTA: u32 = 0xa282_ead8;
const LENGTH_BYTES: usize = 8;
const CRC_BYTES: usize = 4;

pub fn masked_crc32c(data: &[u8]) -> u32 {
    let crc = crc32c::crc32c(data);
    ((crc >> 15) | (crc << 17)).wrapping_add(MASK_DELTA)
}

pub fn write_frame<W: Write>(writer: &mut W, payload: &[u8]) -> Result<(), RecordError> {
    let length = (payload.len() as u64).to_le_bytes();

    writer.write_all(&length)?;
    writer.write_all(&masked_crc32c(&length).to_le_bytes())?;
    writer.write_all(payload)?;
    writer.write_all(&masked_crc32c(payload).to_le_bytes())?;
    Ok(())
}

/// Fills `buf` completely, returning how many bytes were read before EOF.
fn read_fully<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<usize, RecordError> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(filled)
}

fn read_exact_or_truncated<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<(), RecordError> {
    let got = read_fully(reader, buf)?;
    if got < buf.len() {
        return Err(RecordError::Truncated {
            expected: buf.len(),
            actual: got,
        });
    }
    Ok(())
}

fn read_crc<R: Read>(reader: &mut R) -> Result<u32, RecordError> {
    let mut crc = [0u8; CRC_BYTES];
    read_exact_or_truncated(reader, &mut crc)?;
    Ok(u32::from_le_bytes(crc))
}

/// Reads one frame. `Ok(None)` on a clean end of stream between frames.
pub fn read_frame<R: Read>(reader: &mut R) -> Result<Option<Vec<u8>>, RecordError> {
    let mut length = [0u8; LENGTH_BYTES];
    match read_fully(reader, &mut length)? {
        0 => return Ok(None),
        LENGTH_BYTES => {}
        got => {
            return Err(RecordError::Truncated {
                expected: LENGTH_BYTES,
                actual: got,
            })
        }
    }

    let expected = read_crc(reader)?;
    let actual = masked_crc32c(&length);
    if expected != actual {
        return Err(RecordError::Checksum {
            part: "length",
            expected,
            actual,
        });
    }

    let payload_len = u64::from_le_bytes(length) as usize;
    let mut payload = Vec::new();
    let got = reader.by_ref().take(payload_len as u64).read_to_end(&mut payload)?;
    if got < payload_len {
        return Err(RecordError::Truncated {
            expected: payload_len,
            actual: got,
        });
    }

    let expected = read_crc(reader)?;
    let actual = masked_crc32c(&payload);
    if expected != actual {
        return Err(RecordError::Checksum {
            part: "payload",
            expected,
            actual,
        });
    }

    Ok(Some(payload))
}
