//! Parallel compression driver and stream stitcher

use std::thread;

use crate::buffer::ByteBuffer;
use crate::common::{Result, WadError, ALIGN_INTERVAL, HEADER_SIZE, HEADER_TAG, WAD_MAGIC};
use crate::packet::{packet_length, DUMMY_PACKET, PAD_FILLER, PAD_PACKET};

use super::encoder::BlockEncoder;

/// Smallest unit the per-thread block size is rounded up to
const BLOCK_GRANULE: usize = 0x100;

/// Compress `src` into a complete WAD stream using `thread_count` workers
///
/// The input is split into `thread_count` contiguous blocks which are
/// encoded independently and stitched back together in index order, so the
/// output is a pure function of the input and the thread count.
pub fn compress_bytes(src: &[u8], thread_count: usize) -> Result<Vec<u8>> {
    if thread_count < 1 {
        return Err(WadError::InvalidParameter(format!(
            "thread_count must be at least 1, got {thread_count}"
        )));
    }

    let intermediates = encode_blocks(src, thread_count)?;
    stitch_blocks(&intermediates)
}

/// Compress the input into per-block packet streams, one worker per block
fn encode_blocks(src: &[u8], thread_count: usize) -> Result<Vec<Vec<u8>>> {
    if thread_count == 1 {
        return Ok(vec![BlockEncoder::new(src, 0, src.len()).encode()?]);
    }

    let min_block_size = BLOCK_GRANULE * thread_count;
    let rounded_size = src.len() + (min_block_size - src.len() % min_block_size);
    let block_size = rounded_size / thread_count;

    let results: Vec<Result<Vec<u8>>> = thread::scope(|scope| {
        let workers: Vec<_> = (0..thread_count)
            .map(|i| {
                let src_pos = block_size * i;
                let src_end = src.len().min(block_size * (i + 1));
                scope.spawn(move || BlockEncoder::new(src, src_pos, src_end).encode())
            })
            .collect();
        workers
            .into_iter()
            .map(|worker| {
                worker.join().unwrap_or_else(|_| {
                    Err(WadError::InvalidParameter(
                        "compression worker panicked".to_string(),
                    ))
                })
            })
            .collect()
    });
    results.into_iter().collect()
}

/// Join block streams into the final framed stream
///
/// Walks each block packet by packet. A dummy packet goes in front of every
/// block after the first so a literal ending one block can never touch a
/// literal starting the next. A pad packet plus `0xEE` filler goes in
/// wherever the next insertion would straddle an 8 KiB boundary, measured
/// from the end of the header: the game's decompressor streams the
/// compressed data through the EE core's scratchpad and crashes without
/// the periodic realignment.
fn stitch_blocks(intermediates: &[Vec<u8>]) -> Result<Vec<u8>> {
    let payload: usize = intermediates.iter().map(Vec::len).sum();
    let mut dest = ByteBuffer::with_capacity(HEADER_SIZE + payload + payload / 8);

    dest.write_all(&WAD_MAGIC);
    dest.write_u32_le(0); // patched last
    dest.write_all(&HEADER_TAG);

    for (index, intermediate) in intermediates.iter().enumerate() {
        let mut pos = 0;
        while pos < intermediate.len() {
            let packet_size = packet_length(&intermediate[pos..])?;

            let insert_dummy = index != 0 && pos == 0;
            let mut insert_size = packet_size;
            if insert_dummy {
                insert_size += DUMMY_PACKET.len();
            }

            if ((dest.position() + 0x1FF0) % ALIGN_INTERVAL) + insert_size > ALIGN_INTERVAL - 3 {
                dest.write_all(&PAD_PACKET);
                while dest.position() % ALIGN_INTERVAL != HEADER_SIZE {
                    dest.write_u8(PAD_FILLER);
                }
            }
            if insert_dummy {
                dest.write_all(&DUMMY_PACKET);
            }

            dest.write_all(&intermediate[pos..pos + packet_size]);
            pos += packet_size;
        }
    }

    let total_size = dest.position() as u32;
    dest.seek(3);
    dest.write_u32_le(total_size);
    Ok(dest.into_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::WadHeader;
    use crate::decompress::decompress_bytes;

    #[test]
    fn test_zero_threads_is_rejected() {
        assert!(matches!(
            compress_bytes(b"data", 0),
            Err(WadError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_empty_input_is_header_only() {
        let stream = compress_bytes(&[], 1).unwrap();
        assert_eq!(stream.len(), HEADER_SIZE);
        assert_eq!(WadHeader::parse(&stream).unwrap().total_size, 0x10);
    }

    #[test]
    fn test_total_size_matches_stream_length() {
        let data: Vec<u8> = (0..2000u32).map(|i| (i % 7) as u8).collect();
        for threads in [1, 2, 4] {
            let stream = compress_bytes(&data, threads).unwrap();
            let header = WadHeader::parse(&stream).unwrap();
            assert_eq!(header.total_size as usize, stream.len());
        }
    }

    #[test]
    fn test_block_partition_covers_the_input() {
        // Sizes around the rounding granule, with the last block truncated.
        for len in [0usize, 1, 255, 256, 1023, 1024, 1025, 4096] {
            let data: Vec<u8> = (0..len).map(|i| (i % 5) as u8).collect();
            for threads in [2, 3, 4] {
                let stream = compress_bytes(&data, threads).unwrap();
                assert_eq!(decompress_bytes(&stream).unwrap(), data);
            }
        }
    }

    #[test]
    fn test_seam_dummy_between_blocks() {
        let stream = compress_bytes(&[0u8; 4096], 4).unwrap();
        // Each of the three seams gets a bare dummy packet.
        let dummies = stream
            .windows(3)
            .filter(|window| *window == DUMMY_PACKET)
            .count();
        assert!(dummies >= 3, "expected seam dummies, found {dummies}");
        assert_eq!(decompress_bytes(&stream).unwrap(), vec![0u8; 4096]);
    }
}
