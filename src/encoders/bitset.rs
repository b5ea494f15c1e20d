//! The bitset strategy: one bit per offset.
//!
//! Its size depends only on the range length, never on the completion
//! pattern, which makes it the fallback when run-length cannot represent a
//! long uniform run.

use crate::encoders::traits::{EncodedPayload, OffsetEncoder};
use crate::error::OffsetCodecError;
use crate::kernels::bitset;
use crate::types::{CompletionBits, EncodingType};

#[derive(Debug, Default)]
pub struct BitsetEncoder {
    bits: CompletionBits,
}

impl BitsetEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-sizes the bit buffer when the range length is known up front.
    pub fn with_capacity(len: usize) -> Self {
        Self {
            bits: CompletionBits::with_capacity(len),
        }
    }

    fn push(&mut self, index: usize, complete: bool) {
        debug_assert_eq!(
            index,
            self.bits.len(),
            "offsets must be fed in order without gaps"
        );
        self.bits.push(complete);
    }
}

impl OffsetEncoder for BitsetEncoder {
    fn encoding_type(&self) -> EncodingType {
        EncodingType::Bitset
    }

    fn encode_incomplete_offset(&mut self, index: usize) {
        self.push(index, false);
    }

    fn encode_completed_offset(&mut self, index: usize) {
        self.push(index, true);
    }

    fn serialise(self: Box<Self>) -> Result<EncodedPayload, OffsetCodecError> {
        let mut bytes = Vec::new();
        bitset::encode(&self.bits, &mut bytes)?;
        Ok(EncodedPayload::new(EncodingType::Bitset, bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bitset_payload_layout() {
        let mut encoder = BitsetEncoder::new();
        for (index, complete) in [false, false, false, true, true, true, true, false, false, false]
            .into_iter()
            .enumerate()
        {
            encoder.encode_offset(index, complete);
        }
        let payload = Box::new(encoder).serialise().unwrap();
        assert_eq!(payload.encoding_type(), EncodingType::Bitset);
        assert_eq!(payload.bytes(), &[0, 0, 0, 10, 0b0001_1110, 0b0000_0000]);
    }

    #[test]
    fn test_bitset_handles_runs_that_overflow_run_length() {
        let mut encoder = BitsetEncoder::with_capacity(40_000);
        for index in 0..40_000 {
            encoder.encode_incomplete_offset(index);
        }
        let payload = Box::new(encoder).serialise().unwrap();
        assert_eq!(payload.size_bytes(), 4 + 5_000);
    }
}
