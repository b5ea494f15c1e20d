//! This module contains the pure, stateless kernels for the run-length offset
//! wire format.
//!
//! A payload is a bare sequence of fixed-width signed big-endian integers, one
//! per run, with no header. Runs alternate state starting from "incomplete",
//! so a range whose first index is complete begins with a zero-length run.
//! The width is a type parameter: `i16` for the v1 format, `i32` for v2.

use bitvec::prelude::*;
use num_traits::{NumCast, PrimInt, ToPrimitive};

use crate::error::OffsetCodecError;
use crate::types::CompletionBits;

/// A signed integer usable as a run-length field.
pub trait RunWidth: PrimInt + NumCast + bytemuck::Pod + std::fmt::Debug + Send + 'static {}

impl RunWidth for i16 {}
impl RunWidth for i32 {}

//==================================================================================
// 1. Public API
//==================================================================================

/// Writes `run_lengths` to `output_buf` as big-endian `W` values.
///
/// Fails without writing a partial payload if any run does not fit in `W`.
pub fn encode<W: RunWidth>(
    run_lengths: &[usize],
    output_buf: &mut Vec<u8>,
) -> Result<(), OffsetCodecError> {
    output_buf.clear();
    output_buf.reserve(run_lengths.len() * std::mem::size_of::<W>());

    for &run_length in run_lengths {
        let value: W = <W as NumCast>::from(run_length).ok_or_else(|| {
            output_buf.clear();
            OffsetCodecError::EncodingNotSupported(format!(
                "Run length {} too long for a {}-byte field (max {:?})",
                run_length,
                std::mem::size_of::<W>(),
                W::max_value()
            ))
        })?;
        output_buf.extend_from_slice(bytemuck::bytes_of(&value.to_be()));
    }
    Ok(())
}

/// Expands a run-length payload back into completion bits, verifying that the
/// runs cover exactly `expected_len` indices.
pub fn decode<W: RunWidth>(
    input_bytes: &[u8],
    expected_len: usize,
) -> Result<CompletionBits, OffsetCodecError> {
    let width = std::mem::size_of::<W>();
    if input_bytes.len() % width != 0 {
        return Err(OffsetCodecError::DecodeCorruption(format!(
            "Run-length payload of {} bytes is not a multiple of the {}-byte run width",
            input_bytes.len(),
            width
        )));
    }
    if input_bytes.is_empty() {
        return Err(OffsetCodecError::DecodeCorruption(
            "Run-length payload contains no runs".to_string(),
        ));
    }

    let mut bits = CompletionBits::with_capacity(expected_len);
    let mut complete = false;

    for chunk in input_bytes.chunks_exact(width) {
        let raw: W = bytemuck::pod_read_unaligned(chunk);
        let run_length = W::from_be(raw).to_usize().ok_or_else(|| {
            OffsetCodecError::DecodeCorruption(format!("Negative run length {:?}", W::from_be(raw)))
        })?;

        // Checked before allocating so a corrupt run can't balloon memory.
        if bits.len() + run_length > expected_len {
            return Err(OffsetCodecError::DecodeCorruption(format!(
                "Runs cover more than the expected {} offsets",
                expected_len
            )));
        }
        bits.resize(bits.len() + run_length, complete);
        complete = !complete;
    }

    if bits.len() != expected_len {
        return Err(OffsetCodecError::DecodeCorruption(format!(
            "Decoded to {} offsets, but expected {}",
            bits.len(),
            expected_len
        )));
    }
    Ok(bits)
}

//==================================================================================
// 2. Unit Tests
//==================================================================================
