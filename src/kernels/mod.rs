//! This module collects the pure, stateless wire kernels.
//!
//! Kernels know nothing about encoders, candidates or selection. They turn an
//! already-accumulated representation into bytes and back, and are the only
//! place where a wire layout is defined.

/// Run lengths as fixed-width signed big-endian integers.
pub mod run_length;

/// One bit per offset with a length header.
pub mod bitset;

/// Final Stage: Entropy Coding
pub mod zstd;
