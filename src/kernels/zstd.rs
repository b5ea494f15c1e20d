//! This module contains the pure, stateless kernels for Zstandard compression
//! and decompression of base offset payloads.
//!
//! Unlike general-purpose wrappers, decompression here is always bounded: the
//! caller passes the largest size a legitimate base payload could have, and
//! anything that inflates beyond it is rejected as corrupt.

use std::io::{Read, Write};
use zstd::stream::{Decoder, Encoder};

use crate::error::OffsetCodecError;

//==================================================================================
// 1. Public API
//==================================================================================

/// Compresses `input_bytes` into a single zstd frame.
pub fn encode(input_bytes: &[u8], level: i32) -> Result<Vec<u8>, OffsetCodecError> {
    if input_bytes.is_empty() {
        return Ok(Vec::new());
    }

    let mut output_buf = Vec::with_capacity(input_bytes.len());
    let mut encoder = Encoder::new(&mut output_buf, level)
        .map_err(|e| OffsetCodecError::ZstdError(e.to_string()))?;
    // The payload size is always known up front; recording it in the frame
    // header lets the decoder pre-size its buffer.
    encoder
        .set_pledged_src_size(Some(input_bytes.len() as u64))
        .map_err(|e| OffsetCodecError::ZstdError(e.to_string()))?;
    encoder
        .write_all(input_bytes)
        .map_err(|e| OffsetCodecError::ZstdError(e.to_string()))?;

    // `finish` is essential to finalize the Zstd frame.
    encoder
        .finish()
        .map_err(|e| OffsetCodecError::ZstdError(e.to_string()))?;
    Ok(output_buf)
}

/// Decompresses a single zstd frame, failing if it yields more than
/// `max_output_len` bytes.
pub fn decode(input_bytes: &[u8], max_output_len: usize) -> Result<Vec<u8>, OffsetCodecError> {
    if input_bytes.is_empty() {
        return Ok(Vec::new());
    }

    let decoder =
        Decoder::new(input_bytes).map_err(|e| OffsetCodecError::ZstdError(e.to_string()))?;

    // Read at most one byte past the limit so an oversized frame is detected
    // without decompressing all of it.
    let mut output_buf = Vec::new();
    decoder
        .take(max_output_len as u64 + 1)
        .read_to_end(&mut output_buf)
        .map_err(|e| OffsetCodecError::ZstdError(e.to_string()))?;

    if output_buf.len() > max_output_len {
        return Err(OffsetCodecError::ZstdError(format!(
            "Decompressed payload exceeds the {}-byte limit",
            max_output_len
        )));
    }
    Ok(output_buf)
}

//==================================================================================
// 2. Unit Tests
//==================================================================================
