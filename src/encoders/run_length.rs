//! The run-length strategy.
//!
//! Accumulates alternating runs of incomplete/complete offsets. The first run
//! is always the incomplete one, so when index 0 is already complete the
//! payload starts with a zero-length run. Readers depend on that alternation
//! and it must not be "optimised" away.

use std::marker::PhantomData;

use crate::encoders::traits::{EncodedPayload, OffsetEncoder};
use crate::error::OffsetCodecError;
use crate::kernels::run_length::{self, RunWidth};
use crate::types::EncodingType;

/// Binds a run width to its wire tag.
pub trait RunLengthFormat: RunWidth {
    const ENCODING: EncodingType;
}

impl RunLengthFormat for i16 {
    const ENCODING: EncodingType = EncodingType::RunLength;
}

impl RunLengthFormat for i32 {
    const ENCODING: EncodingType = EncodingType::RunLengthV2;
}

/// 2-byte runs; fails on any run longer than 32767.
pub type RunLengthEncoder = RunLengthAccumulator<i16>;
/// 4-byte runs.
pub type RunLengthV2Encoder = RunLengthAccumulator<i32>;

#[derive(Debug)]
pub struct RunLengthAccumulator<W: RunLengthFormat> {
    current_run_length: usize,
    current_run_complete: bool,
    run_lengths: Vec<usize>,
    next_index: usize,
    _width: PhantomData<W>,
}

impl<W: RunLengthFormat> Default for RunLengthAccumulator<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: RunLengthFormat> RunLengthAccumulator<W> {
    pub fn new() -> Self {
        Self {
            current_run_length: 0,
            current_run_complete: false,
            run_lengths: Vec::new(),
            next_index: 0,
            _width: PhantomData,
        }
    }

    /// The run lengths including the still-open tail run, as they would be
    /// written by `serialise`.
    pub fn run_lengths(&self) -> Vec<usize> {
        let mut runs = self.run_lengths.clone();
        runs.push(self.current_run_length);
        runs
    }

    fn encode_run_length(&mut self, index: usize, complete: bool) {
        debug_assert_eq!(
            index, self.next_index,
            "offsets must be fed in order without gaps"
        );
        self.next_index = index + 1;

        if complete == self.current_run_complete {
            self.current_run_length += 1;
        } else {
            self.current_run_complete = complete;
            self.run_lengths.push(self.current_run_length);
            self.current_run_length = 1;
        }
    }
}

impl<W: RunLengthFormat> OffsetEncoder for RunLengthAccumulator<W> {
    fn encoding_type(&self) -> EncodingType {
        W::ENCODING
    }

    fn encode_incomplete_offset(&mut self, index: usize) {
        self.encode_run_length(index, false);
    }

    fn encode_completed_offset(&mut self, index: usize) {
        self.encode_run_length(index, true);
    }

    fn serialise(mut self: Box<Self>) -> Result<EncodedPayload, OffsetCodecError> {
        // add tail
        self.run_lengths.push(self.current_run_length);

        let mut bytes = Vec::new();
        run_length::encode::<W>(&self.run_lengths, &mut bytes)?;
        Ok(EncodedPayload::new(W::ENCODING, bytes))
    }
}
