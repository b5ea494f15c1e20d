//! This module defines the core, strongly-typed data representations shared by
//! the encoders and the decoder.
//!
//! It includes the `BitRange` completion model and the canonical `EncodingType`
//! tag, which is the only piece of information the decoder receives alongside
//! a payload.

pub mod bit_range;
pub mod encoding_type;

// Re-export the main type(s) for easier access.
pub use bit_range::{BitRange, CompletionBits, OffsetWindow, Run};
pub use encoding_type::EncodingType;
