// In: src/bridge/mod.rs

// ====================================================================================
// ARCHITECTURAL OVERVIEW: The Bridge Layer
// ====================================================================================
//
// The `bridge` is the public-facing API for the consumer's commit path. It speaks
// in Kafka terms (offset windows, incomplete offsets, framed bytes) and hides the
// `pipeline` engine, which only knows about index-addressed `BitRange`s.
//
// Data Flow (Commit):
//
//   1. [Stateless API (encode_incomplete_offsets)] -> Receives window + incomplete offsets
//         |
//         `-> a. Builds a `BitRange` relative to the low-water mark
//         |
//         `-> b. Calls the pure engine with the `BitRange`
//
//   2. [Pipeline Engine (pipeline::selector)] -> Returns the smallest `EncodedPayload`
//         |
//         `-> frames it as `[tag][len][payload]` for the commit metadata
//
//
// Data Flow (Restore):
//
//   1. [Stateless API (decode_incomplete_offsets)] -> Receives framed bytes + window
//         |
//         `-> a. Calls `pipeline::decoder` to rebuild the `BitRange`
//         |
//         `-> b. Maps zero bits back to absolute offsets
//
// ====================================================================================
pub mod format;
pub mod stateless_api;

// --- Low-Level Stateless API ---
pub use stateless_api::{
    analyze_bit_range, decode_bit_range, decode_incomplete_offsets, encode_bit_range,
    encode_incomplete_offsets,
};

// --- Format Constants and Structs ---
pub use format::{CandidateOutcome, CandidateReport, EncodingReport};
