// In: src/bridge/format.rs

//! Defines the framing constants and the public analysis structs.
//!
//! A framed payload is `[tag: u8][length: u16 big-endian][payload]`. The frame
//! is what the commit collaborator stores; the tag is the only thing a reader
//! needs to pick the reconstruction path.

use crate::types::EncodingType;

/// Size of the fixed frame header: one tag byte plus a 2-byte length.
pub const FRAME_HEADER_LEN: usize = 3;

/// Largest payload the 2-byte frame length can describe.
pub const MAX_FRAME_PAYLOAD_LEN: usize = u16::MAX as usize;

/// What happened to one candidate during selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateOutcome {
    /// The candidate produced a payload of this many bytes.
    Encoded { size_bytes: usize },
    /// The candidate was produced but exceeds the payload ceiling.
    OverBudget { size_bytes: usize, ceiling: usize },
    /// The strategy could not represent the range.
    Unsupported { reason: String },
}

/// Diagnostics for a single strategy or compressed variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateReport {
    pub encoding_type: EncodingType,
    pub outcome: CandidateOutcome,
}

/// The public-facing result of `analyze_bit_range`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodingReport {
    pub range_len: usize,
    pub complete_count: usize,
    pub candidates: Vec<CandidateReport>,
    /// `None` if no candidate survived.
    pub selected: Option<EncodingType>,
    pub selected_size_bytes: Option<usize>,
}
