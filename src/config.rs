// In: src/config.rs

//! The single source of truth for offset encoding configuration.
//!
//! `EncoderConfig` is built once when the consumer starts (typically from a
//! JSON fragment of the consumer's own settings) and shared read-only as an
//! `Arc<EncoderConfig>` with every commit cycle.

use serde::{Deserialize, Serialize};

use crate::bridge::format::MAX_FRAME_PAYLOAD_LEN;
use crate::error::OffsetCodecError;

//==================================================================================
// I. Core Configuration Enums
//==================================================================================

/// Defines the trade-off between compression speed and final payload size.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CompressionProfile {
    /// Prioritizes speed over size.
    Fast,

    /// A balance between speed and size. This is the recommended default.
    #[default]
    Balanced,

    /// Prioritizes the smallest possible payload at the cost of CPU time.
    HighCompression,
}

impl CompressionProfile {
    pub fn zstd_level(self) -> i32 {
        match self {
            CompressionProfile::Fast => 1,
            CompressionProfile::Balanced => 3,
            CompressionProfile::HighCompression => 19,
        }
    }
}

/// A base encoding strategy that can be registered with the selector.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    RunLength,
    RunLengthV2,
    Bitset,
}

//==================================================================================
// II. The Unified EncoderConfig
//==================================================================================

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct EncoderConfig {
    /// Compression effort for the zstd-wrapped candidates.
    #[serde(default)]
    pub profile: CompressionProfile,

    /// Strategies to run, in registration order. Registration order breaks
    /// ties between equally sized candidates.
    #[serde(default = "default_strategies")]
    pub strategies: Vec<StrategyKind>,

    /// If false, no compressed candidates are produced.
    #[serde(default = "default_true")]
    pub compression: bool,

    /// If true, each strategy is finalised on its own scoped thread.
    #[serde(default)]
    pub parallel: bool,

    /// Hard ceiling imposed by the backing store, in payload bytes. Candidates
    /// above it are discarded. The frame length field caps this at 65535
    /// regardless.
    #[serde(default)]
    pub max_payload_bytes: Option<usize>,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            profile: CompressionProfile::default(),
            strategies: default_strategies(),
            compression: true,
            parallel: false,
            max_payload_bytes: None,
        }
    }
}

impl EncoderConfig {
    /// Parses and validates a JSON configuration. Missing fields take their
    /// defaults.
    pub fn from_json(json: &str) -> Result<Self, OffsetCodecError> {
        let config: EncoderConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), OffsetCodecError> {
        if self.strategies.is_empty() {
            return Err(OffsetCodecError::ConfigError(
                "At least one encoding strategy must be registered".to_string(),
            ));
        }
        for (i, kind) in self.strategies.iter().enumerate() {
            if self.strategies[..i].contains(kind) {
                return Err(OffsetCodecError::ConfigError(format!(
                    "Strategy {:?} is registered more than once",
                    kind
                )));
            }
        }
        if self.max_payload_bytes == Some(0) {
            return Err(OffsetCodecError::ConfigError(
                "max_payload_bytes must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// The effective per-payload ceiling: the configured budget clamped to
    /// what the frame length field can express.
    pub fn payload_ceiling(&self) -> usize {
        self.max_payload_bytes
            .map_or(MAX_FRAME_PAYLOAD_LEN, |max| max.min(MAX_FRAME_PAYLOAD_LEN))
    }
}

fn default_strategies() -> Vec<StrategyKind> {
    vec![
        StrategyKind::RunLength,
        StrategyKind::RunLengthV2,
        StrategyKind::Bitset,
    ]
}

/// Helper for `serde` to default a boolean field to true.
fn default_true() -> bool {
    true
}
