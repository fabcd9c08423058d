//! wadlib - Rust implementation of the WAD compression format
//!
//! This crate provides a pure Rust codec for the WAD compressed-asset
//! container used by the Ratchet & Clank PS2 games. The format is an
//! LZ77 family: a stream of packets carrying raw literals and three kinds
//! of back-references, realigned to 8 KiB boundaries so the game can
//! stream the compressed data through the EE core's scratchpad.
//!
//! # Features
//!
//! - **Decompression** - bit-exact with the in-game decoder
//! - **Compression** - multi-threaded, block-parallel encoder whose output
//!   the game's decoder accepts (valid, not byte-identical to the streams
//!   shipped on disc)
//! - Packet-level utilities for walking and validating streams
//!
//! # Example
//!
//! ```
//! let data = b"Hello, hello, hello, hello!";
//! let compressed = wadlib::compress(data, 1)?;
//! let decompressed = wadlib::decompress(&compressed)?;
//! assert_eq!(&decompressed[..], &data[..]);
//! # Ok::<(), wadlib::WadError>(())
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

// Public modules
pub mod buffer;
pub mod common;
pub mod compress;
pub mod decompress;
pub mod error;
pub mod packet;

// Async module (only available with the async feature)
#[cfg(feature = "async")]
pub mod async_convenience;

// Re-export commonly used types
pub use buffer::ByteBuffer;
pub use common::{validate_magic, Result, WadError, WadHeader};
pub use packet::packet_length;

#[cfg(feature = "async")]
pub use async_convenience::*;

// Convenience functions

/// Compress data into a complete WAD stream
///
/// # Arguments
/// * `data` - The data to compress
/// * `thread_count` - Number of worker threads; each compresses one
///   contiguous block of the input
///
/// # Returns
/// The framed compressed stream, header included
pub fn compress(data: &[u8], thread_count: usize) -> Result<Vec<u8>> {
    compress::compress_bytes(data, thread_count)
}

/// Decompress a complete WAD stream
///
/// # Arguments
/// * `data` - The compressed stream, header included
///
/// # Returns
/// The decompressed bytes
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    decompress::decompress_bytes(data)
}

/// Decompress the first `bytes_to_decompress` bytes of a WAD stream
///
/// A count of zero decompresses everything; otherwise exactly that many
/// bytes are returned (or fewer, when the stream ends first).
pub fn decompress_n(data: &[u8], bytes_to_decompress: usize) -> Result<Vec<u8>> {
    decompress::decompress_bytes_n(data, bytes_to_decompress)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reexports() {
        assert!(validate_magic(b"WAD"));
        assert!(packet_length(&[0x40, 0x00]).is_ok());

        let _ = ByteBuffer::new();
    }

    #[test]
    fn test_round_trip() {
        let data = b"the quick brown fox jumps over the lazy dog, the lazy dog";
        let compressed = compress(data, 1).unwrap();
        assert_eq!(decompress(&compressed).unwrap(), data);
    }
}
