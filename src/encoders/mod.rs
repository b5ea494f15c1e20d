//! The family of offset encoding strategies.
//!
//! Each strategy implements `OffsetEncoder` and is driven identically by the
//! selector. New strategies only need a new `EncodingType` pair and an entry in
//! `StrategyKind`.

use crate::config::StrategyKind;

pub mod bitset;
pub mod compressed;
pub mod run_length;
pub mod traits;

pub use bitset::BitsetEncoder;
pub use run_length::{RunLengthEncoder, RunLengthV2Encoder};
pub use traits::{EncodedPayload, OffsetEncoder};

/// Builds a fresh, empty strategy instance of the given kind.
pub fn new_encoder(kind: StrategyKind, expected_len: Option<usize>) -> Box<dyn OffsetEncoder> {
    match kind {
        StrategyKind::RunLength => Box::new(RunLengthEncoder::new()),
        StrategyKind::RunLengthV2 => Box::new(RunLengthV2Encoder::new()),
        StrategyKind::Bitset => match expected_len {
            Some(len) => Box::new(BitsetEncoder::with_capacity(len)),
            None => Box::new(BitsetEncoder::new()),
        },
    }
}
