//! The compression wrapper: derives a zstd-compressed sibling of any base
//! payload.
//!
//! The sibling is only worth keeping when it is strictly smaller than what it
//! wraps. On tiny payloads the zstd frame header alone usually loses, in which
//! case `compress` returns `None` and the base payload stands on its own.

use crate::config::CompressionProfile;
use crate::encoders::traits::EncodedPayload;
use crate::error::OffsetCodecError;
use crate::kernels::zstd;

pub fn compress(
    base: &EncodedPayload,
    profile: CompressionProfile,
) -> Result<Option<EncodedPayload>, OffsetCodecError> {
    let compressed_type = base.encoding_type().compressed();
    let compressed = zstd::encode(base.bytes(), profile.zstd_level())?;

    if compressed.is_empty() || compressed.len() >= base.size_bytes() {
        log::trace!(
            "  - {:<24} | Size: {} | not smaller than base ({}), discarded",
            compressed_type,
            compressed.len(),
            base.size_bytes()
        );
        return Ok(None);
    }
    Ok(Some(EncodedPayload::new(compressed_type, compressed)))
}
