//! On-disk record format used by [`FileStore`](super::FileStore).
//!
//! Every value file is a [`RecordHeader`] followed by the UTF-8 value bytes.

use crate::common::{Error, Result};

/// Metadata stored at the beginning of every record.
///
/// # Layout (8 bytes)
/// ```text
/// Offset  Size  Field
/// ------  ----  -----
/// 0       4     checksum (CRC32, little-endian)
/// 4       4     len (value length in bytes, little-endian)
/// 8       len   value bytes
/// ```
///
/// # Checksum
/// The checksum covers the length field and the value bytes, so a
/// truncated or bit-flipped record is detected on read.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RecordHeader {
    /// CRC32 of `len` and the value bytes.
    pub checksum: u32,
    /// Value length in bytes.
    pub len: u32,
}

impl RecordHeader {
    /// Size of the header in bytes.
    pub const SIZE: usize = 8;

    pub const OFFSET_CHECKSUM: usize = 0;
    pub const OFFSET_LEN: usize = 4;

    /// Build the header for `value`.
    pub fn for_value(value: &[u8]) -> Self {
        let len = value.len() as u32;
        Self {
            checksum: Self::compute_checksum(len, value),
            len,
        }
    }

    /// Read a header from the beginning of a byte slice.
    ///
    /// # Errors
    /// `Error::CorruptRecord` if `data` is shorter than the header.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < Self::SIZE {
            return Err(Error::CorruptRecord(format!(
                "record is {} bytes, header needs {}",
                data.len(),
                Self::SIZE
            )));
        }

        let checksum = u32::from_le_bytes([
            data[Self::OFFSET_CHECKSUM],
            data[Self::OFFSET_CHECKSUM + 1],
            data[Self::OFFSET_CHECKSUM + 2],
            data[Self::OFFSET_CHECKSUM + 3],
        ]);

        let len = u32::from_le_bytes([
            data[Self::OFFSET_LEN],
            data[Self::OFFSET_LEN + 1],
            data[Self::OFFSET_LEN + 2],
            data[Self::OFFSET_LEN + 3],
        ]);

        Ok(Self { checksum, len })
    }

    /// Write this header to the beginning of a byte slice.
    ///
    /// # Panics
    /// Panics if `data.len() < RecordHeader::SIZE`.
    pub fn write_to(&self, data: &mut [u8]) {
        assert!(data.len() >= Self::SIZE, "buffer too small for RecordHeader");

        data[Self::OFFSET_CHECKSUM..Self::OFFSET_CHECKSUM + 4]
            .copy_from_slice(&self.checksum.to_le_bytes());
        data[Self::OFFSET_LEN..Self::OFFSET_LEN + 4].copy_from_slice(&self.len.to_le_bytes());
    }

    /// Compute the CRC32 of a length field and its value bytes.
    pub fn compute_checksum(len: u32, value: &[u8]) -> u32 {
        let mut hasher = crc32fast::Hasher::new();
        hasher.update(&len.to_le_bytes());
        hasher.update(value);
        hasher.finalize()
    }
}

/// Serialize `value` into a complete record.
pub fn encode(value: &str) -> Vec<u8> {
    let bytes = value.as_bytes();
    let mut buf = vec![0u8; RecordHeader::SIZE + bytes.len()];
    RecordHeader::for_value(bytes).write_to(&mut buf);
    buf[RecordHeader::SIZE..].copy_from_slice(bytes);
    buf
}

/// Parse and verify a complete record.
///
/// # Errors
/// `Error::CorruptRecord` on a short record, length mismatch, checksum
/// mismatch or invalid UTF-8.
pub fn decode(data: &[u8]) -> Result<String> {
    let header = RecordHeader::from_bytes(data)?;
    let body = &data[RecordHeader::SIZE..];

    if body.len() != header.len as usize {
        return Err(Error::CorruptRecord(format!(
            "header says {} value bytes, found {}",
            header.len,
            body.len()
        )));
    }

    if header.checksum != RecordHeader::compute_checksum(header.len, body) {
        return Err(Error::CorruptRecord("checksum mismatch".to_string()));
    }

    String::from_utf8(body.to_vec())
        .map_err(|e| Error::CorruptRecord(format!("value is not UTF-8: {}", e)))
}
