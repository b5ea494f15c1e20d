//! The in-memory model of offset completion above a committed low-water mark.
//!
//! A `BitRange` is indexed from 0, where index 0 is the first offset after the
//! low-water mark. `true` means the record at that offset has been processed.

use bitvec::prelude::*;

use crate::error::OffsetCodecError;

/// The backing storage for a `BitRange`. MSB-first so the raw bytes are
/// already in bitset wire order.
pub type CompletionBits = BitVec<u8, Msb0>;

//==================================================================================
// 1. Offset Window
//==================================================================================

/// The absolute offsets covered by a `BitRange`: everything in
/// `(low_water_mark, highest_seen_offset]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffsetWindow {
    low_water_mark: u64,
    highest_seen_offset: u64,
}

impl OffsetWindow {
    pub fn new(low_water_mark: u64, highest_seen_offset: u64) -> Result<Self, OffsetCodecError> {
        if highest_seen_offset < low_water_mark {
            return Err(OffsetCodecError::ConfigError(format!(
                "Highest seen offset {} is below the low-water mark {}",
                highest_seen_offset, low_water_mark
            )));
        }
        Ok(Self {
            low_water_mark,
            highest_seen_offset,
        })
    }

    pub fn low_water_mark(&self) -> u64 {
        self.low_water_mark
    }

    pub fn highest_seen_offset(&self) -> u64 {
        self.highest_seen_offset
    }

    /// Number of offsets in the window, i.e. the `BitRange` length.
    pub fn len(&self) -> Result<usize, OffsetCodecError> {
        usize::try_from(self.highest_seen_offset - self.low_water_mark).map_err(|_| {
            OffsetCodecError::EncodingNotSupported(format!(
                "Window of {} offsets does not fit in memory on this platform",
                self.highest_seen_offset - self.low_water_mark
            ))
        })
    }

    pub fn is_empty(&self) -> bool {
        self.highest_seen_offset == self.low_water_mark
    }

    /// The absolute offset at `index`.
    pub fn offset_at(&self, index: usize) -> u64 {
        self.low_water_mark + 1 + index as u64
    }

    /// The index of an absolute offset, if it lies inside the window.
    pub fn index_of(&self, offset: u64) -> Result<usize, OffsetCodecError> {
        if offset <= self.low_water_mark || offset > self.highest_seen_offset {
            return Err(OffsetCodecError::OffsetOutOfRange {
                offset,
                low_water_mark: self.low_water_mark,
                highest_seen_offset: self.highest_seen_offset,
            });
        }
        // Bounded by `len()`, which callers have already materialised.
        Ok((offset - self.low_water_mark - 1) as usize)
    }
}

//==================================================================================
// 2. Runs
//==================================================================================

/// A maximal span of indices sharing one completion state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub complete: bool,
    pub length: usize,
}

//==================================================================================
// 3. BitRange
//==================================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BitRange {
    bits: CompletionBits,
}

impl BitRange {
    /// Creates a range of `len` indices, all incomplete.
    pub fn new(len: usize) -> Self {
        Self {
            bits: bitvec![u8, Msb0; 0; len],
        }
    }

    pub(crate) fn from_bits(bits: CompletionBits) -> Self {
        Self { bits }
    }

    /// Builds the range for `window`, marking every offset as complete except
    /// the ones listed in `incomplete_offsets`.
    pub fn from_incomplete_offsets<I>(
        window: OffsetWindow,
        incomplete_offsets: I,
    ) -> Result<Self, OffsetCodecError>
    where
        I: IntoIterator<Item = u64>,
    {
        let mut bits = bitvec![u8, Msb0; 1; window.len()?];
        for offset in incomplete_offsets {
            let index = window.index_of(offset)?;
            bits.set(index, false);
        }
        Ok(Self { bits })
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// # Panics
    /// Panics if `index >= len()`.
    pub fn is_complete(&self, index: usize) -> bool {
        self.bits[index]
    }

    /// # Panics
    /// Panics if `index >= len()`.
    pub fn set_complete(&mut self, index: usize, complete: bool) {
        self.bits.set(index, complete);
    }

    pub fn push(&mut self, complete: bool) {
        self.bits.push(complete);
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.iter().by_vals()
    }

    pub fn as_bits(&self) -> &BitSlice<u8, Msb0> {
        &self.bits
    }

    pub fn complete_count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Splits the range into maximal runs. Consecutive runs always alternate
    /// state and their lengths sum to `len()`.
    pub fn runs(&self) -> Vec<Run> {
        let mut runs: Vec<Run> = Vec::new();
        for complete in self.iter() {
            match runs.last_mut() {
                Some(run) if run.complete == complete => run.length += 1,
                _ => runs.push(Run {
                    complete,
                    length: 1,
                }),
            }
        }
        runs
    }

    /// The absolute offsets still awaiting processing, in ascending order.
    pub fn incomplete_offsets(&self, window: &OffsetWindow) -> Vec<u64> {
        self.bits
            .iter_zeros()
            .map(|index| window.offset_at(index))
            .collect()
    }
}

impl FromIterator<bool> for BitRange {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        Self {
            bits: iter.into_iter().collect(),
        }
    }
}
