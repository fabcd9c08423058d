//! Per-block packet encoder
//!
//! Produces a block-local packet stream with no concern for 8 KiB
//! alignment; the driver adds pad packets while stitching. The encoder
//! tracks the flag of the most recent packet so it can back-patch tiny
//! literals into it and keep two literal packets from ever touching.

use crate::common::{
    Result, WadError, MAX_BIG_MATCH, MAX_BIG_MATCH_LOOKBACK, MAX_LITERAL, MAX_LITTLE_MATCH,
    MAX_LITTLE_MATCH_LOOKBACK, MAX_MATCH, MAX_SHORT_LITERAL, MIN_MATCH,
};
use crate::packet::{DUMMY_PACKET, TINY_LITERAL_MAX};

use super::matcher::find_match;

/// What the previous packet allows the next literal to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LastFlag {
    /// The previous packet already carries a tiny literal (or raw literal
    /// bytes); a fresh dummy is needed before anything can be injected.
    DoNotInject,
    /// Flag byte of the previous packet, tiny field still free
    Flag(u8),
}

/// Single-threaded encoder for one contiguous block of the source
#[derive(Debug)]
pub struct BlockEncoder<'a> {
    src: &'a [u8],
    pos: usize,
    end: usize,
    out: Vec<u8>,
    /// Offset of the most recent packet in `out`
    last_packet: usize,
    last_flag: LastFlag,
}

impl<'a> BlockEncoder<'a> {
    /// Create an encoder for `src[pos..end]`. The slice before `pos` stays
    /// visible to the match search: at decode time those bytes are already
    /// in the output, so lookbacks may reach into them.
    pub fn new(src: &'a [u8], pos: usize, end: usize) -> Self {
        BlockEncoder {
            src,
            pos,
            end,
            out: Vec::new(),
            last_packet: 0,
            last_flag: LastFlag::DoNotInject,
        }
    }

    /// Encode the whole block and return its packet stream
    pub fn encode(mut self) -> Result<Vec<u8>> {
        while self.pos < self.end {
            // The clamped search must engage while every candidate within
            // the literal budget still has a full match window before the
            // block end; past that point bounds are clamped per candidate.
            let end_of_buffer = self.pos + MAX_MATCH + MAX_LITERAL >= self.end;
            let found = find_match(self.src, self.pos, self.end, end_of_buffer);

            if found.literal_size == 0 {
                self.push_match(found.match_offset, found.match_size)?;
            } else {
                self.push_literal(found.literal_size)?;
                if found.match_size > 0 {
                    self.push_match(found.match_offset, found.match_size)?;
                }
            }
        }
        Ok(self.out)
    }

    /// Emit a match packet for `match_size` bytes copied from
    /// `match_offset`, selecting the smallest family that fits
    fn push_match(&mut self, match_offset: usize, match_size: usize) -> Result<()> {
        let lookback = self.pos - match_offset;
        if !(MIN_MATCH..=MAX_MATCH).contains(&match_size) {
            return Err(WadError::CorruptPacket(format!(
                "unencodable match length {match_size}"
            )));
        }
        if lookback == 0 || lookback > MAX_BIG_MATCH_LOOKBACK {
            return Err(WadError::CorruptPacket(format!(
                "unencodable match lookback {lookback}"
            )));
        }
        let delta = lookback - 1;

        self.last_packet = self.out.len();
        if match_size <= MAX_LITTLE_MATCH && lookback <= MAX_LITTLE_MATCH_LOOKBACK {
            let pos_major = (delta / 8) as u8;
            let pos_minor = (delta % 8) as u8;
            self.out
                .push((((match_size - 1) as u8) << 5) | (pos_minor << 2));
            self.out.push(pos_major);
        } else {
            if match_size > MAX_BIG_MATCH {
                // Bigger match: zero length field, explicit length byte.
                self.out.push(1 << 5);
                self.out.push((match_size - (0b11111 + 2)) as u8);
            } else {
                self.out.push((1 << 5) | (match_size - 2) as u8);
            }

            let pos_minor = (delta % 0x40) as u8;
            let pos_major = (delta / 0x40) as u8;
            self.out.push(pos_minor << 2);
            self.out.push(pos_major);
        }

        self.pos += match_size;
        self.last_flag = LastFlag::Flag(self.out[self.last_packet]);
        Ok(())
    }

    /// Emit `literal_size` raw bytes, as a tiny-literal suffix when they
    /// fit and as a literal packet otherwise
    fn push_literal(&mut self, literal_size: usize) -> Result<()> {
        if literal_size > MAX_LITERAL {
            return Err(WadError::CorruptPacket(format!(
                "unencodable literal length {literal_size}"
            )));
        }

        // Two literals in a row? Implausible!
        if matches!(self.last_flag, LastFlag::Flag(flag) if flag < 0x10) {
            self.push_dummy();
        }

        if literal_size <= TINY_LITERAL_MAX {
            // If there's already a small literal injected into the last
            // packet, push a fresh dummy to stuff this one into.
            if self.last_flag == LastFlag::DoNotInject {
                self.push_dummy();
            }

            let patch = self.out.len() - 2;
            self.out[patch] |= literal_size as u8;
            self.out
                .extend_from_slice(&self.src[self.pos..self.pos + literal_size]);
            self.pos += literal_size;
            self.last_flag = LastFlag::DoNotInject;
            return Ok(());
        } else if literal_size <= MAX_SHORT_LITERAL {
            // The size fits in the flag byte.
            self.last_packet = self.out.len();
            self.out.push((literal_size - 3) as u8);
        } else {
            // It goes in a separate length byte.
            self.last_packet = self.out.len();
            self.out.push(0);
            self.out.push((literal_size - 18) as u8);
        }

        self.out
            .extend_from_slice(&self.src[self.pos..self.pos + literal_size]);
        self.pos += literal_size;
        self.last_flag = LastFlag::Flag(self.out[self.last_packet]);
        Ok(())
    }

    fn push_dummy(&mut self) {
        self.last_packet = self.out.len();
        self.out.extend_from_slice(&DUMMY_PACKET);
        self.last_flag = LastFlag::Flag(DUMMY_PACKET[0]);
    }
}
