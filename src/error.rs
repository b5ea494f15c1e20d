// In: src/error.rs

//! This module defines the single, unified error type for the offset codec.
//! It uses the `thiserror` crate to provide ergonomic, context-aware error handling.
//!
//! Only `NoViableEncoding` and `DecodeCorruption` are meant to cross the crate
//! boundary in normal operation. `EncodingNotSupported` is raised by a single
//! strategy and is absorbed by the selector, which simply drops that candidate.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum OffsetCodecError {
    // =========================================================================
    // === High-Level, Semantic Errors (Specific to offset encoding)
    // =========================================================================
    /// A strategy cannot represent the accumulated state in its binary width.
    #[error("Encoding not supported: {0}")]
    EncodingNotSupported(String),

    /// Every registered strategy failed or exceeded the payload budget.
    #[error("No viable encoding: {0}")]
    NoViableEncoding(String),

    /// A persisted payload could not be reconstructed. The stored state must
    /// not be trusted.
    #[error("Offset payload is corrupt: {0}")]
    DecodeCorruption(String),

    #[error("Offset {offset} is outside the window ({low_water_mark}, {highest_seen_offset}]")]
    OffsetOutOfRange {
        offset: u64,
        low_water_mark: u64,
        highest_seen_offset: u64,
    },

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Internal logic error (this is a bug): {0}")]
    InternalError(String),

    // =========================================================================
    // === External Error Wrappers
    // =========================================================================
    #[error("Zstd operation failed: {0}")]
    ZstdError(String),

    /// An error from the Serde JSON library, typically while loading configuration.
    #[error("Serde JSON error: {0}")]
    SerdeJson(#[from] serde_json::Error),
}

impl OffsetCodecError {
    /// Returns `true` for errors the selector recovers from by dropping the
    /// offending candidate.
    pub fn is_candidate_local(&self) -> bool {
        matches!(self, OffsetCodecError::EncodingNotSupported(_))
    }
}
