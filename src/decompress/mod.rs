//! WAD decompression
//!
//! A single-threaded state machine driven by the flag byte of each packet.
//! The algorithm matches the decoder in the game executable, including the
//! tiny-literal suffix carried by match packets and the realignment skip
//! triggered by pad packets.

mod decoder;

pub use decoder::{decompress_into, decompress_n_into};

use crate::buffer::ByteBuffer;
use crate::common::Result;

/// Decompress a complete WAD stream in memory
pub fn decompress_bytes(data: &[u8]) -> Result<Vec<u8>> {
    decompress_bytes_n(data, 0)
}

/// Decompress at most `bytes_to_decompress` bytes of a WAD stream
///
/// A value of zero means "decode everything". Otherwise the output is
/// truncated to exactly `bytes_to_decompress` bytes even when the final
/// packet overshoots the limit.
pub fn decompress_bytes_n(data: &[u8], bytes_to_decompress: usize) -> Result<Vec<u8>> {
    let mut src = ByteBuffer::from(data);
    let mut dest = ByteBuffer::with_capacity(data.len() * 2);
    decoder::decompress_n_into(&mut dest, &mut src, bytes_to_decompress)?;
    let mut output = dest.into_vec();
    if bytes_to_decompress != 0 && output.len() > bytes_to_decompress {
        output.truncate(bytes_to_decompress);
    }
    Ok(output)
}
