// In: src/bridge/stateless_api.rs

use std::sync::Arc;

use crate::bridge::format::EncodingReport;
use crate::config::EncoderConfig;
use crate::encoders::EncodedPayload;
use crate::error::OffsetCodecError;
use crate::pipeline::{self, selector};
use crate::types::{BitRange, EncodingType, OffsetWindow};

/// Encodes a materialised range and returns the smallest viable payload.
pub fn encode_bit_range(
    range: &BitRange,
    config: &Arc<EncoderConfig>,
) -> Result<EncodedPayload, OffsetCodecError> {
    config.validate()?;
    selector::encode_range(range, config)
}

/// Decodes a payload given its raw tag byte, as stored next to it.
pub fn decode_bit_range(
    tag: u8,
    payload: &[u8],
    expected_len: usize,
) -> Result<BitRange, OffsetCodecError> {
    let encoding_type = EncodingType::try_from(tag)?;
    pipeline::decode(encoding_type, payload, expected_len)
}

/// Encodes the incomplete offsets of `window` into a single framed buffer,
/// ready to be stored in the commit metadata.
///
/// Every offset in the window that is not listed in `incomplete_offsets` is
/// treated as complete.
pub fn encode_incomplete_offsets<I>(
    window: OffsetWindow,
    incomplete_offsets: I,
    config: &Arc<EncoderConfig>,
) -> Result<Vec<u8>, OffsetCodecError>
where
    I: IntoIterator<Item = u64>,
{
    let range = BitRange::from_incomplete_offsets(window, incomplete_offsets)?;
    let payload = encode_bit_range(&range, config)?;
    log::debug!(
        "Encoded {} incomplete of {} offsets after {} as {} ({} bytes)",
        range.len() - range.complete_count(),
        range.len(),
        window.low_water_mark(),
        payload.encoding_type(),
        payload.size_bytes()
    );
    payload.to_bytes()
}

/// Inverse of `encode_incomplete_offsets`: returns the absolute offsets still
/// awaiting processing, ascending.
pub fn decode_incomplete_offsets(
    frame: &[u8],
    window: &OffsetWindow,
) -> Result<Vec<u64>, OffsetCodecError> {
    let range = pipeline::decode_frame(frame, window.len()?)?;
    Ok(range.incomplete_offsets(window))
}

/// Runs every candidate over `range` and reports what each produced, without
/// failing when nothing is viable.
pub fn analyze_bit_range(
    range: &BitRange,
    config: &Arc<EncoderConfig>,
) -> Result<EncodingReport, OffsetCodecError> {
    config.validate()?;
    let (selected, candidates) = selector::report_range(range, config)?;

    Ok(EncodingReport {
        range_len: range.len(),
        complete_count: range.complete_count(),
        candidates,
        selected: selected.as_ref().map(|p| p.encoding_type()),
        selected_size_bytes: selected.as_ref().map(|p| p.size_bytes()),
    })
}
