//! Async convenience functions
//!
//! The codec itself is synchronous and never suspends inside a packet, so
//! these wrappers move whole-buffer jobs onto the blocking thread pool and
//! use async file I/O around them.

use std::path::Path;

use crate::common::{Result, WadError};

/// Compress data on the blocking thread pool
pub async fn compress_bytes_async(data: Vec<u8>, thread_count: usize) -> Result<Vec<u8>> {
    tokio::task::spawn_blocking(move || crate::compress(&data, thread_count))
        .await
        .map_err(|join_error| WadError::Io(std::io::Error::other(join_error)))?
}

/// Decompress data on the blocking thread pool
pub async fn decompress_bytes_async(data: Vec<u8>) -> Result<Vec<u8>> {
    tokio::task::spawn_blocking(move || crate::decompress(&data))
        .await
        .map_err(|join_error| WadError::Io(std::io::Error::other(join_error)))?
}

/// Compress a file asynchronously
///
/// Reads `input_path`, compresses it with `thread_count` workers, and
/// writes the stream to `output_path`. Returns the compressed size.
pub async fn compress_file<P1: AsRef<Path>, P2: AsRef<Path>>(
    input_path: P1,
    output_path: P2,
    thread_count: usize,
) -> Result<u64> {
    let data = tokio::fs::read(input_path).await?;
    let compressed = compress_bytes_async(data, thread_count).await?;
    let compressed_size = compressed.len() as u64;
    tokio::fs::write(output_path, compressed).await?;
    Ok(compressed_size)
}

/// Decompress a file asynchronously
///
/// Reads the WAD stream at `input_path` and writes the decompressed bytes
/// to `output_path`. Returns the decompressed size.
pub async fn decompress_file<P1: AsRef<Path>, P2: AsRef<Path>>(
    input_path: P1,
    output_path: P2,
) -> Result<u64> {
    let data = tokio::fs::read(input_path).await?;
    let decompressed = decompress_bytes_async(data).await?;
    let decompressed_size = decompressed.len() as u64;
    tokio::fs::write(output_path, decompressed).await?;
    Ok(decompressed_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_async_round_trip() {
        let data = b"async data, async data, async data".to_vec();
        let compressed = compress_bytes_async(data.clone(), 2).await.unwrap();
        let decompressed = decompress_bytes_async(compressed).await.unwrap();
        assert_eq!(decompressed, data);
    }

    #[tokio::test]
    async fn test_async_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("input.bin");
        let packed = dir.path().join("packed.wad");
        let output = dir.path().join("output.bin");

        let data: Vec<u8> = (0..1000u32).map(|i| (i % 9) as u8).collect();
        tokio::fs::write(&input, &data).await.unwrap();

        compress_file(&input, &packed, 2).await.unwrap();
        let written = decompress_file(&packed, &output).await.unwrap();

        assert_eq!(written, data.len() as u64);
        assert_eq!(tokio::fs::read(&output).await.unwrap(), data);
    }
}
