//! Defines the self-describing framed form of an `EncodedPayload`.
//! This module is the single source of truth for serialization, deserialization,
//! and cheap header peeking of the frame handed to the commit collaborator.

use std::io::{Cursor, Read};

use crate::bridge::format::{FRAME_HEADER_LEN, MAX_FRAME_PAYLOAD_LEN};
use crate::encoders::EncodedPayload;
use crate::error::OffsetCodecError;
use crate::types::EncodingType;

//==================================================================================
// Public Structs
//==================================================================================

/// Metadata extracted from a frame header without touching the payload.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct FrameHeader {
    pub encoding_type: EncodingType,
    pub payload_len: usize,
}

impl FrameHeader {
    pub fn frame_len(&self) -> usize {
        FRAME_HEADER_LEN + self.payload_len
    }
}

//==================================================================================
// Core Implementation
//==================================================================================

impl EncodedPayload {
    /// Serializes the payload into its framed wire form.
    pub fn to_bytes(&self) -> Result<Vec<u8>, OffsetCodecError> {
        let payload_len = u16::try_from(self.size_bytes()).map_err(|_| {
            OffsetCodecError::EncodingNotSupported(format!(
                "Payload of {} bytes exceeds the frame limit of {}",
                self.size_bytes(),
                MAX_FRAME_PAYLOAD_LEN
            ))
        })?;

        let mut frame = Vec::with_capacity(FRAME_HEADER_LEN + self.size_bytes());
        frame.push(self.encoding_type().as_byte());
        frame.extend_from_slice(&payload_len.to_be_bytes());
        frame.extend_from_slice(self.bytes());
        Ok(frame)
    }

    /// Deserializes a complete frame. Trailing bytes after the declared
    /// payload are rejected.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, OffsetCodecError> {
        let header = Self::peek_header(bytes)?;
        if bytes.len() != header.frame_len() {
            return Err(OffsetCodecError::DecodeCorruption(format!(
                "Frame declares {} payload bytes, but {} follow the header",
                header.payload_len,
                bytes.len() - FRAME_HEADER_LEN
            )));
        }
        Ok(Self::new(
            header.encoding_type,
            bytes[FRAME_HEADER_LEN..].to_vec(),
        ))
    }

    /// Reads only the frame header.
    pub fn peek_header(bytes: &[u8]) -> Result<FrameHeader, OffsetCodecError> {
        let mut cursor = Cursor::new(bytes);
        let map_err = |e: std::io::Error| {
            OffsetCodecError::DecodeCorruption(format!("Truncated frame header: {}", e))
        };

        let mut tag = [0u8; 1];
        cursor.read_exact(&mut tag).map_err(map_err)?;
        let encoding_type = EncodingType::try_from(tag[0])?;

        let mut len_buf = [0u8; 2];
        cursor.read_exact(&mut len_buf).map_err(map_err)?;
        let payload_len = u16::from_be_bytes(len_buf) as usize;

        if bytes.len() < FRAME_HEADER_LEN + payload_len {
            return Err(OffsetCodecError::DecodeCorruption(format!(
                "Frame declares {} payload bytes, but only {} are present",
                payload_len,
                bytes.len() - FRAME_HEADER_LEN
            )));
        }

        Ok(FrameHeader {
            encoding_type,
            payload_len,
        })
    }
}

//==================================================================================
// Unit Tests
//==================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_payload() -> EncodedPayload {
        EncodedPayload::new(EncodingType::RunLength, vec![0, 3, 0, 4, 0, 3])
    }

    #[test]
    fn test_frame_layout() {
        let bytes = create_test_payload().to_bytes().unwrap();
        assert_eq!(bytes, vec![0x03, 0x00, 0x06, 0, 3, 0, 4, 0, 3]);
    }

    #[test]
    fn test_frame_roundtrip_is_successful() {
        let original = create_test_payload();
        let bytes = original.to_bytes().unwrap();
        assert_eq!(EncodedPayload::from_bytes(&bytes).unwrap(), original);
    }

    #[test]
    fn test_peek_header_is_correct() {
        let bytes = create_test_payload().to_bytes().unwrap();
        let header = EncodedPayload::peek_header(&bytes).unwrap();
        assert_eq!(header.encoding_type, EncodingType::RunLength);
        assert_eq!(header.payload_len, 6);
        assert_eq!(header.frame_len(), bytes.len());
    }

    #[test]
    fn test_parsing_errors_are_handled_gracefully() {
        // Too short for a header.
        assert!(matches!(
            EncodedPayload::peek_header(&[0x03, 0x00]),
            Err(OffsetCodecError::DecodeCorruption(_))
        ));

        // Unknown tag.
        assert!(matches!(
            EncodedPayload::from_bytes(&[0x7f, 0x00, 0x00]),
            Err(OffsetCodecError::DecodeCorruption(_))
        ));

        // Truncated payload.
        let bytes = create_test_payload().to_bytes().unwrap();
        assert!(EncodedPayload::from_bytes(&bytes[..bytes.len() - 1]).is_err());

        // Trailing garbage.
        let mut padded = bytes.clone();
        padded.push(0);
        assert!(EncodedPayload::from_bytes(&padded).is_err());
    }

    #[test]
    fn test_oversized_payload_cannot_be_framed() {
        let payload = EncodedPayload::new(EncodingType::Bitset, vec![0; MAX_FRAME_PAYLOAD_LEN + 1]);
        assert!(matches!(
            payload.to_bytes(),
            Err(OffsetCodecError::EncodingNotSupported(_))
        ));
    }
}
