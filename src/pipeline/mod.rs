//! The encode/select/decode pipeline.
//!
//! Write path: `selector` drives the strategies and picks a winner, `artifact`
//! frames it for the commit collaborator. Read path: `decoder` dispatches on
//! the frame's tag and rebuilds the `BitRange`.

pub mod artifact;
pub mod decoder;
pub mod selector;

pub use artifact::FrameHeader;
pub use decoder::{decode, decode_frame, decode_payload};
pub use selector::{encode_range, SimultaneousEncoder};

#[cfg(test)]
mod tests;
