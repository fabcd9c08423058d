//! Common types and constants for the WAD codec
//!
//! This module defines the header structure, error type, and the length and
//! lookback bounds shared by the compression and decompression algorithms.

use crate::buffer::ByteBuffer;
use thiserror::Error;

/// Size of the container header in bytes
pub const HEADER_SIZE: usize = 0x10;

/// The three magic bytes every WAD stream starts with
pub const WAD_MAGIC: [u8; 3] = *b"WAD";

/// Informational tag occupying bytes 7-15 of the header.
/// Only the magic is validated on decode; this tag is written as-is.
pub const HEADER_TAG: [u8; 9] = *b"WRENCH010";

/// Interval at which the compressed stream must be realigned with a pad
/// packet, measured from offset 0x10
pub const ALIGN_INTERVAL: usize = 0x2000;

/// Minimum length of any match
pub const MIN_MATCH: usize = 3;

/// Maximum match length the compressor will emit. The decoder tolerates
/// bigger-match packets up to [`MAX_BIGGER_MATCH`] bytes.
pub const MAX_MATCH: usize = 0x100;

/// Maximum number of raw bytes a single literal packet can carry
pub const MAX_LITERAL: usize = 273; // 0b11111111 + 18

/// Largest literal whose length fits in the flag byte itself
pub const MAX_SHORT_LITERAL: usize = 18;

/// Maximum length of a little match packet
pub const MAX_LITTLE_MATCH: usize = 8; // 0b111 + 1

/// Maximum length of a big match packet
pub const MAX_BIG_MATCH: usize = 33; // 0b11111 + 2

/// Maximum length a bigger match packet can describe
pub const MAX_BIGGER_MATCH: usize = 288; // 0b11111111 + 33

/// Maximum lookback distance encodable as a little match
pub const MAX_LITTLE_MATCH_LOOKBACK: usize = 2048; // 0b11111111 * 8 + 0b111 + 1

/// Maximum lookback distance encodable as a big or bigger match
pub const MAX_BIG_MATCH_LOOKBACK: usize = 16384; // 0b111111 + 0b11111111 * 0x40 + 1

/// Error type for WAD codec operations
#[derive(Debug, Error)]
pub enum WadError {
    /// The stream does not begin with the `WAD` magic
    #[error("invalid WAD magic: expected \"WAD\", found {0:02x?}")]
    BadMagic([u8; 3]),

    /// Two literal packets appeared back to back. The game's decoder cannot
    /// handle this, so both decode and the intermediate-stream walk reject it.
    #[error("two literal packets in a row near offset {0:#x}")]
    DoubleLiteral(usize),

    /// A packet read ran past the end of the source
    #[error("compressed stream truncated at offset {0:#x}")]
    TruncatedInput(usize),

    /// A flag/length combination that cannot be represented
    #[error("corrupt packet: {0}")]
    CorruptPacket(String),

    /// A match referenced data before the start of the output
    #[error("match lookback underflows the output near offset {0:#x}")]
    BadLookback(usize),

    /// A caller-supplied parameter is out of range
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for WAD codec operations
pub type Result<T> = std::result::Result<T, WadError>;

/// Check that a byte slice starts with the `WAD` magic
pub fn validate_magic(bytes: &[u8]) -> bool {
    bytes.len() >= WAD_MAGIC.len() && bytes[..WAD_MAGIC.len()] == WAD_MAGIC
}

/// The 16-byte container header
///
/// Layout on the wire (little-endian):
///
/// | Bytes | Contents                                        |
/// |-------|-------------------------------------------------|
/// | 0-2   | magic `"WAD"`                                   |
/// | 3-6   | `total_size`, length of the whole stream        |
/// | 7-15  | informational tag (`WRENCH010` as written here) |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WadHeader {
    /// Length of the complete compressed stream including this header
    pub total_size: u32,
}

impl WadHeader {
    /// Parse a header from the start of a byte slice
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_SIZE {
            return Err(WadError::InvalidParameter(format!(
                "input of {} bytes is too small to contain a WAD header",
                bytes.len()
            )));
        }
        if !validate_magic(bytes) {
            return Err(WadError::BadMagic([bytes[0], bytes[1], bytes[2]]));
        }
        let total_size = u32::from_le_bytes([bytes[3], bytes[4], bytes[5], bytes[6]]);
        Ok(WadHeader { total_size })
    }

    /// Read and validate the header, leaving the source positioned at the
    /// first packet
    pub fn read(src: &mut ByteBuffer) -> Result<Self> {
        let header = Self::parse(src.as_slice())?;
        src.seek(HEADER_SIZE);
        Ok(header)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_magic() {
        assert!(validate_magic(b"WAD\x00\x00\x00\x00WRENCH010"));
        assert!(validate_magic(b"WADx"));
        assert!(!validate_magic(b"WA"));
        assert!(!validate_magic(b"DAW_"));
        assert!(!validate_magic(&[]));
    }

    #[test]
    fn test_header_parse() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&WAD_MAGIC);
        bytes.extend_from_slice(&0x1234u32.to_le_bytes());
        bytes.extend_from_slice(&HEADER_TAG);

        let header = WadHeader::parse(&bytes).unwrap();
        assert_eq!(header.total_size, 0x1234);
    }

    #[test]
    fn test_header_rejects_bad_magic() {
        let bytes = [0u8; HEADER_SIZE];
        assert!(matches!(
            WadHeader::parse(&bytes),
            Err(WadError::BadMagic(_))
        ));
    }

    #[test]
    fn test_header_rejects_short_input() {
        assert!(matches!(
            WadHeader::parse(b"WAD"),
            Err(WadError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_constants() {
        assert_eq!(MAX_LITERAL, 0xFF + 18);
        assert_eq!(MAX_LITTLE_MATCH, 0b111 + 1);
        assert_eq!(MAX_BIG_MATCH, 0b11111 + 2);
        assert_eq!(MAX_BIGGER_MATCH, 0xFF + 33);
        assert_eq!(MAX_LITTLE_MATCH_LOOKBACK, 0xFF * 8 + 0b111 + 1);
        assert_eq!(MAX_BIG_MATCH_LOOKBACK, 0b111111 + 0xFF * 0x40 + 1);
    }
}
