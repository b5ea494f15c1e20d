//! This module defines the canonical, stable tag persisted next to every
//! encoded offset payload.
//!
//! The byte values are part of the wire contract: a payload written by one
//! release must be readable by every later one, so existing values are never
//! renumbered.

use crate::error::OffsetCodecError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies which strategy produced a payload and whether it was compressed.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum EncodingType {
    Bitset = 0x01,
    BitsetCompressed = 0x02,
    /// Runs stored as 2-byte signed big-endian integers.
    RunLength = 0x03,
    RunLengthCompressed = 0x04,
    /// Runs stored as 4-byte signed big-endian integers.
    RunLengthV2 = 0x05,
    RunLengthV2Compressed = 0x06,
}

impl EncodingType {
    /// The byte written to the wire for this tag.
    pub fn as_byte(self) -> u8 {
        self as u8
    }

    /// Returns `true` if the payload is a zstd frame wrapping a base payload.
    pub fn is_compressed(self) -> bool {
        matches!(
            self,
            Self::BitsetCompressed | Self::RunLengthCompressed | Self::RunLengthV2Compressed
        )
    }

    /// Strips the compression marker, yielding the tag of the wrapped payload.
    pub fn base(self) -> Self {
        match self {
            Self::Bitset | Self::BitsetCompressed => Self::Bitset,
            Self::RunLength | Self::RunLengthCompressed => Self::RunLength,
            Self::RunLengthV2 | Self::RunLengthV2Compressed => Self::RunLengthV2,
        }
    }

    /// The compressed counterpart of a base tag.
    pub fn compressed(self) -> Self {
        match self {
            Self::Bitset | Self::BitsetCompressed => Self::BitsetCompressed,
            Self::RunLength | Self::RunLengthCompressed => Self::RunLengthCompressed,
            Self::RunLengthV2 | Self::RunLengthV2Compressed => Self::RunLengthV2Compressed,
        }
    }

    /// Upper bound on the uncompressed payload size for a range of `len` indices.
    ///
    /// The decoder uses this to cap decompression, so a corrupt zstd frame can
    /// never inflate past what a legitimate encoder could have produced.
    pub fn max_payload_len(self, len: usize) -> usize {
        match self.base() {
            // A range of `len` indices has at most `len + 1` runs, counting
            // the leading zero-length run.
            Self::RunLength => len.saturating_add(1).saturating_mul(2),
            Self::RunLengthV2 => len.saturating_add(1).saturating_mul(4),
            _ => 4usize.saturating_add(len.div_ceil(8)),
        }
    }
}

impl TryFrom<u8> for EncodingType {
    type Error = OffsetCodecError;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        match byte {
            0x01 => Ok(Self::Bitset),
            0x02 => Ok(Self::BitsetCompressed),
            0x03 => Ok(Self::RunLength),
            0x04 => Ok(Self::RunLengthCompressed),
            0x05 => Ok(Self::RunLengthV2),
            0x06 => Ok(Self::RunLengthV2Compressed),
            other => Err(OffsetCodecError::DecodeCorruption(format!(
                "Unknown encoding type tag 0x{:02x}",
                other
            ))),
        }
    }
}

impl fmt::Display for EncodingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
