//! The read path: reconstructs a `BitRange` from a tagged payload.
//!
//! Dispatch is driven purely by the `EncodingType`. Every failure here means
//! the persisted state cannot be trusted, so all errors surface as
//! `DecodeCorruption` and the caller is expected to fall back to reprocessing
//! the whole window.

use crate::encoders::EncodedPayload;
use crate::error::OffsetCodecError;
use crate::kernels::{bitset, run_length, zstd};
use crate::types::{BitRange, EncodingType};

/// Decodes `payload` written with `encoding_type` into a range of exactly
/// `expected_len` indices.
pub fn decode(
    encoding_type: EncodingType,
    payload: &[u8],
    expected_len: usize,
) -> Result<BitRange, OffsetCodecError> {
    let bits = match encoding_type {
        EncodingType::RunLength => run_length::decode::<i16>(payload, expected_len)?,
        EncodingType::RunLengthV2 => run_length::decode::<i32>(payload, expected_len)?,
        EncodingType::Bitset => bitset::decode(payload, expected_len)?,
        EncodingType::BitsetCompressed
        | EncodingType::RunLengthCompressed
        | EncodingType::RunLengthV2Compressed => {
            let base = encoding_type.base();
            let inflated = zstd::decode(payload, base.max_payload_len(expected_len))
                .map_err(|e| OffsetCodecError::DecodeCorruption(e.to_string()))?;
            return decode(base, &inflated, expected_len);
        }
    };
    Ok(BitRange::from_bits(bits))
}

/// Decodes an `EncodedPayload` produced by the selector.
pub fn decode_payload(
    payload: &EncodedPayload,
    expected_len: usize,
) -> Result<BitRange, OffsetCodecError> {
    decode(payload.encoding_type(), payload.bytes(), expected_len)
}

/// Decodes a complete frame as written by `EncodedPayload::to_bytes`.
pub fn decode_frame(frame: &[u8], expected_len: usize) -> Result<BitRange, OffsetCodecError> {
    let payload = EncodedPayload::from_bytes(frame)?;
    decode_payload(&payload, expected_len)
}
