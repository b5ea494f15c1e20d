// In: src/encoders/traits.rs

//! Defines the contract every offset encoding strategy implements.
//!
//! A strategy is fed one completion event per index, in strictly increasing
//! index order starting at 0. Finalisation consumes the strategy and hands
//! back an immutable `EncodedPayload`, so the "bytes are only available after
//! serialisation" rule is enforced by ownership rather than runtime checks.

use crate::error::OffsetCodecError;
use crate::types::EncodingType;

/// The tagged output of a single strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedPayload {
    encoding_type: EncodingType,
    bytes: Vec<u8>,
}

impl EncodedPayload {
    pub fn new(encoding_type: EncodingType, bytes: Vec<u8>) -> Self {
        Self {
            encoding_type,
            bytes,
        }
    }

    pub fn encoding_type(&self) -> EncodingType {
        self.encoding_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn size_bytes(&self) -> usize {
        self.bytes.len()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// A single encoding strategy in the accumulating state.
pub trait OffsetEncoder: Send {
    /// The tag of the uncompressed payload this strategy produces.
    fn encoding_type(&self) -> EncodingType;

    /// The tag used when this strategy's payload is wrapped by zstd.
    fn encoding_type_compressed(&self) -> EncodingType {
        self.encoding_type().compressed()
    }

    fn encode_incomplete_offset(&mut self, index: usize);

    fn encode_completed_offset(&mut self, index: usize);

    /// Dispatches to the matching `encode_*_offset` call.
    fn encode_offset(&mut self, index: usize, complete: bool) {
        if complete {
            self.encode_completed_offset(index);
        } else {
            self.encode_incomplete_offset(index);
        }
    }

    /// Finalises accumulation.
    ///
    /// # Errors
    /// `EncodingNotSupported` if the accumulated state does not fit this
    /// strategy's binary format.
    fn serialise(self: Box<Self>) -> Result<EncodedPayload, OffsetCodecError>;
}
