// In: src/pipeline/selector.rs

//! The simultaneous encoder and candidate selector.
//!
//! This module is the "smart" half of the write path. It:
//! 1. Fans every completion event out to all registered strategies.
//! 2. Finalises each strategy independently and derives a compressed sibling.
//! 3. Drops candidates that failed or exceed the payload ceiling.
//! 4. Returns the single smallest survivor.
//!
//! Strategies never observe each other, so finalisation may run on scoped
//! threads when `EncoderConfig::parallel` is set. The result is identical
//! either way.

use std::sync::Arc;
use std::time::Instant;

use crate::bridge::format::{CandidateOutcome, CandidateReport};
use crate::config::EncoderConfig;
use crate::encoders::{self, compressed, EncodedPayload, OffsetEncoder};
use crate::error::OffsetCodecError;
use crate::types::{BitRange, EncodingType};

//==================================================================================
// 0. Internal Candidate Model
//==================================================================================

/// The outcome of finalising one strategy or one compressed variant.
#[derive(Debug)]
enum Finalised {
    Payload(EncodedPayload),
    Failed {
        encoding_type: EncodingType,
        reason: String,
    },
}

//==================================================================================
// 1. The Simultaneous Encoder
//==================================================================================

/// Drives every registered strategy over one index-ordered event stream.
///
/// Feeding takes `&mut self`, so each instance has exactly one writer. Callers
/// that produce events from several threads must put the encoder behind a
/// `Mutex`.
pub struct SimultaneousEncoder {
    encoders: Vec<Box<dyn OffsetEncoder>>,
    config: Arc<EncoderConfig>,
    next_index: usize,
}

impl SimultaneousEncoder {
    /// Registers one fresh instance of every strategy named in `config`.
    pub fn new(config: Arc<EncoderConfig>) -> Self {
        Self::build(config, None)
    }

    /// Like `new`, but pre-sizes buffers for a range of `expected_len`.
    pub fn with_expected_len(config: Arc<EncoderConfig>, expected_len: usize) -> Self {
        Self::build(config, Some(expected_len))
    }

    /// Registers an explicit list of strategies, ignoring `config.strategies`.
    pub fn with_encoders(encoders: Vec<Box<dyn OffsetEncoder>>, config: Arc<EncoderConfig>) -> Self {
        Self {
            encoders,
            config,
            next_index: 0,
        }
    }

    fn build(config: Arc<EncoderConfig>, expected_len: Option<usize>) -> Self {
        let encoders = config
            .strategies
            .iter()
            .map(|&kind| encoders::new_encoder(kind, expected_len))
            .collect();
        Self::with_encoders(encoders, config)
    }

    /// Number of events consumed so far.
    pub fn encoded_count(&self) -> usize {
        self.next_index
    }

    pub fn encode_incomplete_offset(&mut self, index: usize) {
        self.encode_offset(index, false);
    }

    pub fn encode_completed_offset(&mut self, index: usize) {
        self.encode_offset(index, true);
    }

    /// # Panics
    /// Panics if `index` is not the next index in sequence. Feeding out of
    /// order would silently mark the wrong offsets as complete.
    pub fn encode_offset(&mut self, index: usize, complete: bool) {
        assert_eq!(
            index, self.next_index,
            "offsets must be fed in order without gaps"
        );
        self.next_index += 1;
        for encoder in &mut self.encoders {
            encoder.encode_offset(index, complete);
        }
    }

    /// Finalises every strategy and returns the smallest viable payload.
    pub fn finish(self) -> Result<EncodedPayload, OffsetCodecError> {
        self.finish_with_report().map(|(payload, _)| payload)
    }

    /// Like `finish`, also returning what happened to each candidate.
    pub fn finish_with_report(
        self,
    ) -> Result<(EncodedPayload, Vec<CandidateReport>), OffsetCodecError> {
        let (selected, reports) = self.finish_inner()?;
        match selected {
            Some(payload) => Ok((payload, reports)),
            None => Err(no_viable_encoding(&reports)),
        }
    }

    pub(crate) fn finish_inner(
        self,
    ) -> Result<(Option<EncodedPayload>, Vec<CandidateReport>), OffsetCodecError> {
        let start = Instant::now();
        let range_len = self.next_index;
        let ceiling = self.config.payload_ceiling();

        let finalised = finalise_all(self.encoders, &self.config)?;
        let (selected, reports) = select_smallest(finalised, ceiling);

        log::debug!(
            "--- Offset encoding candidates for {} offsets ({:.2?}) ---",
            range_len,
            start.elapsed()
        );
        for report in &reports {
            log::debug!("  - Candidate: {:<24} | {:?}", report.encoding_type, report.outcome);
        }
        if let Some(payload) = &selected {
            log_metric!(
                "event" = "offset_encoding_selected",
                "encoding" = payload.encoding_type(),
                "size_bytes" = payload.size_bytes(),
                "range_len" = range_len
            );
        }
        Ok((selected, reports))
    }
}

//==================================================================================
// 2. Finalisation
//==================================================================================

fn finalise_all(
    encoders: Vec<Box<dyn OffsetEncoder>>,
    config: &EncoderConfig,
) -> Result<Vec<Finalised>, OffsetCodecError> {
    if !config.parallel || encoders.len() < 2 {
        return Ok(encoders
            .into_iter()
            .flat_map(|encoder| finalise_strategy(encoder, config))
            .collect());
    }

    std::thread::scope(|scope| {
        let handles: Vec<_> = encoders
            .into_iter()
            .map(|encoder| scope.spawn(move || finalise_strategy(encoder, config)))
            .collect();

        // Joined in registration order so tie-breaking matches the sequential path.
        let mut finalised = Vec::with_capacity(handles.len() * 2);
        for handle in handles {
            let outcomes = handle.join().map_err(|_| {
                OffsetCodecError::InternalError("An encoding worker panicked".to_string())
            })?;
            finalised.extend(outcomes);
        }
        Ok(finalised)
    })
}

/// Serialises one strategy and, if enabled, its compressed sibling. The base
/// outcome always comes first.
fn finalise_strategy(encoder: Box<dyn OffsetEncoder>, config: &EncoderConfig) -> Vec<Finalised> {
    let encoding_type = encoder.encoding_type();

    let base = match encoder.serialise() {
        Ok(payload) => payload,
        Err(e) => {
            if !e.is_candidate_local() {
                log::warn!("Strategy {} failed unexpectedly: {}", encoding_type, e);
            }
            return vec![Finalised::Failed {
                encoding_type,
                reason: e.to_string(),
            }];
        }
    };

    if !config.compression {
        return vec![Finalised::Payload(base)];
    }

    match compressed::compress(&base, config.profile) {
        Ok(Some(compressed)) => vec![Finalised::Payload(base), Finalised::Payload(compressed)],
        Ok(None) => vec![Finalised::Payload(base)],
        Err(e) => {
            log::warn!("Compressing {} failed: {}", encoding_type, e);
            vec![
                Finalised::Payload(base),
                Finalised::Failed {
                    encoding_type: encoding_type.compressed(),
                    reason: e.to_string(),
                },
            ]
        }
    }
}

//==================================================================================
// 3. Selection
//==================================================================================

/// Picks the smallest payload within `ceiling`. Ties go to the earliest
/// candidate, which is the earliest registered strategy, base before
/// compressed.
fn select_smallest(
    finalised: Vec<Finalised>,
    ceiling: usize,
) -> (Option<EncodedPayload>, Vec<CandidateReport>) {
    let mut reports = Vec::with_capacity(finalised.len());
    let mut best: Option<EncodedPayload> = None;

    for outcome in finalised {
        match outcome {
            Finalised::Failed {
                encoding_type,
                reason,
            } => reports.push(CandidateReport {
                encoding_type,
                outcome: CandidateOutcome::Unsupported { reason },
            }),
            Finalised::Payload(payload) if payload.size_bytes() > ceiling => {
                reports.push(CandidateReport {
                    encoding_type: payload.encoding_type(),
                    outcome: CandidateOutcome::OverBudget {
                        size_bytes: payload.size_bytes(),
                        ceiling,
                    },
                })
            }
            Finalised::Payload(payload) => {
                reports.push(CandidateReport {
                    encoding_type: payload.encoding_type(),
                    outcome: CandidateOutcome::Encoded {
                        size_bytes: payload.size_bytes(),
                    },
                });
                let is_better = best
                    .as_ref()
                    .map_or(true, |current| payload.size_bytes() < current.size_bytes());
                if is_better {
                    best = Some(payload);
                }
            }
        }
    }
    (best, reports)
}

fn no_viable_encoding(reports: &[CandidateReport]) -> OffsetCodecError {
    if reports.is_empty() {
        return OffsetCodecError::NoViableEncoding(
            "No encoding strategies are registered".to_string(),
        );
    }
    let summary: Vec<String> = reports
        .iter()
        .map(|r| format!("{}: {:?}", r.encoding_type, r.outcome))
        .collect();
    OffsetCodecError::NoViableEncoding(summary.join("; "))
}

//==================================================================================
// 4. Whole-Range Convenience
//==================================================================================

fn feed_range(range: &BitRange, config: Arc<EncoderConfig>) -> SimultaneousEncoder {
    let mut encoder = SimultaneousEncoder::with_expected_len(config, range.len());
    for (index, complete) in range.iter().enumerate() {
        encoder.encode_offset(index, complete);
    }
    encoder
}

/// Runs a full encode-and-select cycle over an already materialised range.
pub fn encode_range(
    range: &BitRange,
    config: &Arc<EncoderConfig>,
) -> Result<EncodedPayload, OffsetCodecError> {
    feed_range(range, Arc::clone(config)).finish()
}

/// Like `encode_range`, but never fails on "no viable encoding": the report
/// simply has no selection.
pub(crate) fn report_range(
    range: &BitRange,
    config: &Arc<EncoderConfig>,
) -> Result<(Option<EncodedPayload>, Vec<CandidateReport>), OffsetCodecError> {
    feed_range(range, Arc::clone(config)).finish_inner()
}
