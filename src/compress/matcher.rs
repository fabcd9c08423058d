//! Bounded-window longest-match search

use crate::common::{MAX_BIG_MATCH_LOOKBACK, MAX_LITERAL, MAX_MATCH, MIN_MATCH};

/// Result of a match search
#[derive(Debug, Clone, Copy)]
pub struct MatchResult {
    /// Number of raw bytes to emit before the match
    pub literal_size: usize,
    /// Absolute source offset the match copies from
    pub match_offset: usize,
    /// Length of the match, zero when none was found within the budget
    pub match_size: usize,
}

/// Search for the longest match reachable from `src_pos`
///
/// Scans forward through up to [`MAX_LITERAL`] candidate positions; at each
/// one, every window offset within [`MAX_BIG_MATCH_LOOKBACK`] is tried for
/// the longest common prefix, capped at [`MAX_MATCH`]. The first candidate
/// that yields any match of at least [`MIN_MATCH`] bytes wins, and the bytes
/// skipped to reach it become the leading literal.
///
/// Only strictly longer matches replace the current best, so among equal
/// lengths the earliest window offset survives.
///
/// `end_of_buffer` selects the clamped tail mode, in which every bound is
/// limited by `src_end` per candidate. Callers must enable it early enough
/// that the fast path never reads within [`MAX_MATCH`] of `src_end`.
pub fn find_match(
    src: &[u8],
    src_pos: usize,
    src_end: usize,
    end_of_buffer: bool,
) -> MatchResult {
    let max_literal_size = if end_of_buffer {
        MAX_LITERAL.min(src_end - src_pos)
    } else {
        MAX_LITERAL
    };

    let mut result = MatchResult {
        literal_size: max_literal_size,
        match_offset: 0,
        match_size: 0,
    };

    for i in 0..max_literal_size {
        let target = src_pos + i;
        let low = target.saturating_sub(MAX_BIG_MATCH_LOOKBACK);
        let max_match_size = if end_of_buffer {
            MAX_MATCH.min(src_end - target)
        } else {
            MAX_MATCH
        };
        for j in low..target {
            // This makes matching much faster.
            if !end_of_buffer && src[j..j + 2] != src[target..target + 2] {
                continue;
            }

            // Count the number of equal bytes.
            let mut k = if end_of_buffer { 0 } else { 2 };
            while k < max_match_size {
                if src[target + k] != src[j + k] {
                    break;
                }
                k += 1;
            }

            if k >= MIN_MATCH && k > result.match_size {
                result.match_offset = j;
                result.match_size = k;
            }
        }
        if result.match_size >= MIN_MATCH {
            result.literal_size = i;
            break;
        }
    }

    result
}
