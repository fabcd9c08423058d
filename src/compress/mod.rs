//! WAD compression
//!
//! Compression runs in two stages. First the input is partitioned into
//! equal blocks and each block is encoded independently into a stream of
//! packets by [`encoder::BlockEncoder`], one worker thread per block.
//! Then the driver stitches the block streams together in order, inserting
//! a dummy packet at every block seam and a pad packet wherever a packet
//! would otherwise straddle an 8 KiB boundary, and finally patches the
//! total size into the header.

mod driver;
mod encoder;
mod matcher;

pub use driver::compress_bytes;
