//! Property-based tests for the WAD codec
//!
//! These tests use randomized inputs to verify correctness across a wide
//! range of data patterns and edge cases.

use proptest::prelude::*;
use wadlib::{compress, decompress, decompress_n, WadHeader};

proptest! {
    #[test]
    fn test_decompression_never_panics(data in prop::collection::vec(any::<u8>(), 0..1000)) {
        // Random bytes are almost never a valid WAD stream, but they must
        // fail with an error, never a panic.
        let _ = decompress(&data);
    }
}

proptest! {
    #[test]
    fn test_round_trip(
        data in prop::collection::vec(any::<u8>(), 0..2048),
        threads in prop::sample::select(vec![1usize, 2, 4, 8]),
    ) {
        let compressed = compress(&data, threads).unwrap();
        let decompressed = decompress(&compressed).unwrap();
        prop_assert_eq!(&data[..], &decompressed[..]);
    }
}

proptest! {
    #[test]
    fn test_repetitive_patterns(
        pattern in prop::collection::vec(any::<u8>(), 1..20),
        repeat_count in 2..50usize,
    ) {
        let mut data = Vec::new();
        for _ in 0..repeat_count {
            data.extend_from_slice(&pattern);
        }

        let compressed = compress(&data, 1).unwrap();
        let decompressed = decompress(&compressed).unwrap();
        prop_assert_eq!(&data[..], &decompressed[..]);

        // Repetitive data must not expand much beyond the header and the
        // seed bytes.
        prop_assert!(
            compressed.len() <= data.len() + 64,
            "compression expanded too much: {} -> {}",
            data.len(),
            compressed.len()
        );
    }
}

proptest! {
    #[test]
    fn test_zero_data(size in 0..2000usize, threads in prop::sample::select(vec![1usize, 2, 4])) {
        let data = vec![0u8; size];
        let compressed = compress(&data, threads).unwrap();
        let decompressed = decompress(&compressed).unwrap();
        prop_assert_eq!(&data[..], &decompressed[..]);
    }
}

proptest! {
    #[test]
    fn test_single_byte_patterns(byte_value in any::<u8>(), size in 1..500usize) {
        let data = vec![byte_value; size];
        let compressed = compress(&data, 1).unwrap();
        let decompressed = decompress(&compressed).unwrap();
        prop_assert_eq!(&data[..], &decompressed[..]);
    }
}

proptest! {
    #[test]
    fn test_total_size_field(
        data in prop::collection::vec(any::<u8>(), 0..1500),
        threads in prop::sample::select(vec![1usize, 3, 8]),
    ) {
        let compressed = compress(&data, threads).unwrap();
        let header = WadHeader::parse(&compressed).unwrap();
        prop_assert_eq!(header.total_size as usize, compressed.len());
    }
}

proptest! {
    #[test]
    fn test_compression_deterministic(
        data in prop::collection::vec(any::<u8>(), 10..500),
        threads in prop::sample::select(vec![1usize, 2, 4]),
    ) {
        let first = compress(&data, threads).unwrap();
        let second = compress(&data, threads).unwrap();
        prop_assert_eq!(first, second);
    }
}

proptest! {
    #[test]
    fn test_partial_decompression_is_a_prefix(
        data in prop::collection::vec(any::<u8>(), 1..800),
        split in any::<prop::sample::Index>(),
    ) {
        let limit = split.index(data.len()) + 1;
        let compressed = compress(&data, 2).unwrap();
        let partial = decompress_n(&compressed, limit).unwrap();
        prop_assert_eq!(&partial[..], &data[..limit]);
    }
}

proptest! {
    #[test]
    fn test_mixed_entropy_round_trip(
        noise in prop::collection::vec(any::<u8>(), 100..400),
        run_byte in any::<u8>(),
        run_len in 100..2000usize,
    ) {
        // A compressible run sandwiched between incompressible noise
        // exercises literal/match transitions in both directions.
        let mut data = noise.clone();
        data.extend(std::iter::repeat(run_byte).take(run_len));
        data.extend_from_slice(&noise);

        let compressed = compress(&data, 4).unwrap();
        let decompressed = decompress(&compressed).unwrap();
        prop_assert_eq!(&data[..], &decompressed[..]);
    }
}
