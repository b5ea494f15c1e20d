//! This file is the root of the `offset_codec` Rust crate.
//!
//! The crate turns the set of not-yet-processed offsets above a partition's
//! committed low-water mark into the smallest possible byte payload, and back.
//!
//! Its responsibilities are strictly limited to:
//! 1.  Declaring all the top-level modules of our library (`pipeline`, `kernels`, etc.)
//!     so the Rust compiler knows they exist.
//! 2.  Re-exporting the handful of types a commit path actually needs.

//==================================================================================
// 0. Constants
//==================================================================================
/// The crate version, automatically set from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
//==================================================================================
// 1. Module Declarations
//==================================================================================
#[macro_use]
mod observability; // Make macros available throughout the crate

pub mod bridge;
pub mod config;
pub mod encoders;
pub mod error;
pub mod kernels;
pub mod pipeline;
pub mod types;

//==================================================================================
// 2. Public Re-exports
//==================================================================================
pub use bridge::{
    analyze_bit_range, decode_bit_range, decode_incomplete_offsets, encode_bit_range,
    encode_incomplete_offsets, EncodingReport,
};
pub use config::{CompressionProfile, EncoderConfig, StrategyKind};
pub use encoders::{EncodedPayload, OffsetEncoder};
pub use error::OffsetCodecError;
pub use observability::enable_verbose_logging;
pub use pipeline::SimultaneousEncoder;
pub use types::{BitRange, EncodingType, OffsetWindow};
