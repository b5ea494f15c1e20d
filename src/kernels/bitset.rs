//! This module contains the pure, stateless kernels for the bitset offset wire
//! format.
//!
//! Layout: a 4-byte big-endian unsigned length `N`, followed by `ceil(N / 8)`
//! bytes holding one bit per index, most-significant bit first. Padding bits in
//! the final byte are always zero, and the decoder rejects payloads where they
//! are not.

use bitvec::prelude::*;

use crate::error::OffsetCodecError;
use crate::types::CompletionBits;

/// Size of the length header preceding the packed bits.
pub const HEADER_LEN: usize = std::mem::size_of::<u32>();

//==================================================================================
// 1. Public API
//==================================================================================

pub fn encode(
    bits: &BitSlice<u8, Msb0>,
    output_buf: &mut Vec<u8>,
) -> Result<(), OffsetCodecError> {
    output_buf.clear();
    let len = u32::try_from(bits.len()).map_err(|_| {
        OffsetCodecError::EncodingNotSupported(format!(
            "Bitset of {} offsets exceeds the 4-byte length header",
            bits.len()
        ))
    })?;

    let mut packed = bits.to_bitvec();
    packed.set_uninitialized(false);

    output_buf.reserve(HEADER_LEN + packed.as_raw_slice().len());
    output_buf.extend_from_slice(&len.to_be_bytes());
    output_buf.extend_from_slice(packed.as_raw_slice());
    Ok(())
}

pub fn decode(input_bytes: &[u8], expected_len: usize) -> Result<CompletionBits, OffsetCodecError> {
    let (header, body) = input_bytes
        .split_first_chunk::<HEADER_LEN>()
        .ok_or_else(|| {
            OffsetCodecError::DecodeCorruption(
                "Bitset payload too short to contain its length header".to_string(),
            )
        })?;

    let declared_len = u32::from_be_bytes(*header) as usize;
    if declared_len != expected_len {
        return Err(OffsetCodecError::DecodeCorruption(format!(
            "Bitset declares {} offsets, but expected {}",
            declared_len, expected_len
        )));
    }
    if body.len() != expected_len.div_ceil(8) {
        return Err(OffsetCodecError::DecodeCorruption(format!(
            "Bitset body is {} bytes, but {} offsets need {}",
            body.len(),
            expected_len,
            expected_len.div_ceil(8)
        )));
    }

    let mut bits = CompletionBits::from_slice(body);
    if bits[expected_len..].any() {
        return Err(OffsetCodecError::DecodeCorruption(
            "Bitset padding bits are not zero".to_string(),
        ));
    }
    bits.truncate(expected_len);
    Ok(bits)
}

//==================================================================================
// 2. Unit Tests
//==================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_is_msb_first_with_length_header() {
        let bits = bits![u8, Msb0; 1, 0, 0, 0, 0, 0, 0, 1, 1, 1];
        let mut out = Vec::new();
        encode(bits, &mut out).unwrap();
        assert_eq!(out, vec![0, 0, 0, 10, 0b1000_0001, 0b1100_0000]);
    }

    #[test]
    fn test_padding_is_zeroed_after_truncation() {
        // Truncating leaves stale ones in the tail of the last byte.
        let mut bits: CompletionBits = bitvec![u8, Msb0; 1; 16];
        bits.truncate(3);
        let mut out = Vec::new();
        encode(&bits, &mut out).unwrap();
        assert_eq!(out, vec![0, 0, 0, 3, 0b1110_0000]);
    }

    #[test]
    fn test_roundtrip() {
        let original: CompletionBits = (0..37).map(|i| i % 3 == 0).collect();
        let mut out = Vec::new();
        encode(&original, &mut out).unwrap();
        assert_eq!(out.len(), HEADER_LEN + 5);
        assert_eq!(decode(&out, 37).unwrap(), original);
    }

    #[test]
    fn test_empty_bitset() {
        let mut out = Vec::new();
        encode(BitSlice::<u8, Msb0>::empty(), &mut out).unwrap();
        assert_eq!(out, vec![0, 0, 0, 0]);
        assert!(decode(&out, 0).unwrap().is_empty());
    }

    #[test]
    fn test_decode_errors() {
        assert!(matches!(decode(&[0, 0], 0), Err(OffsetCodecError::DecodeCorruption(_))));
        // Header disagrees with the caller's expectation.
        assert!(decode(&[0, 0, 0, 9, 0xff, 0x80], 10).is_err());
        // Truncated body.
        assert!(decode(&[0, 0, 0, 10, 0xff], 10).is_err());
        // Dirty padding.
        assert!(decode(&[0, 0, 0, 3, 0b1110_0001], 3).is_err());
    }
}
