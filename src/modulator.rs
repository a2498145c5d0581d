//! QAM Modulator — Gray/binary encoding and symbol composition
//!
//! Front object for the whole mapping chain. Each call runs the stages in
//! order: demap the raw input into per-rail indices, optionally permute
//! each rail index through the Gray table, then look up the amplitude
//! ladder and compose one complex point per symbol:
//!
//! ```text
//! bits/indices → (I-index, Q-index) → Gray/binary → A[i] + j*A[q]
//! ```
//!
//! The modulator holds only the immutable [`QamConstellation`] tables and
//! the coding flag; it keeps no state across calls, so one instance can
//! serve any number of threads.
//!
//! ## Example
//!
//! ```rust
//! use qammod::modulator::{CodingMode, QamModulator};
//! use qammod::types::Complex;
//!
//! let qam16 = QamModulator::new(16, CodingMode::Gray).unwrap();
//! let symbols = qam16.modulate_bits(&[1, 0, 0, 1]).unwrap();
//! assert_eq!(symbols, vec![Complex::new(-1.0, 3.0)]);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constellation::QamConstellation;
use crate::demapper::{demap_bits, demap_indices, InputMode};
use crate::types::{Complex, QamError, QamResult};

/// Rail-index coding applied between demapping and amplitude lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodingMode {
    /// Gray-permute each rail index so adjacent levels differ in one bit.
    #[default]
    Gray,
    /// Use the raw binary rail indices unchanged.
    Binary,
}

impl fmt::Display for CodingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gray => write!(f, "gray"),
            Self::Binary => write!(f, "binary"),
        }
    }
}

impl FromStr for CodingMode {
    type Err = QamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gray" => Ok(Self::Gray),
            "binary" => Ok(Self::Binary),
            other => Err(QamError::UnsupportedCoding(other.to_string())),
        }
    }
}

/// Raw input handed to [`modulate`], tagged with its shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QamInput<'a> {
    /// Flat bit stream; length must be a multiple of `log2(M)`.
    Bits(&'a [u8]),
    /// Integer symbol indices, each in `[0, M)`.
    Indices(&'a [usize]),
}

impl QamInput<'_> {
    /// The mode tag describing this input's shape.
    pub fn mode(&self) -> InputMode {
        match self {
            Self::Bits(_) => InputMode::Bits,
            Self::Indices(_) => InputMode::Indices,
        }
    }

    /// Number of raw elements (bits or indices) carried.
    pub fn len(&self) -> usize {
        match self {
            Self::Bits(b) => b.len(),
            Self::Indices(v) => v.len(),
        }
    }

    /// Whether the input carries no elements at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Stateless M-QAM modulator with precomputed lookup tables.
#[derive(Debug, Clone)]
pub struct QamModulator {
    constellation: QamConstellation,
    coding: CodingMode,
}

impl QamModulator {
    /// Build a modulator for the given order and coding.
    ///
    /// Fails with [`QamError::InvalidOrder`] unless the order is an exact
    /// power of 4.
    pub fn new(order: usize, coding: CodingMode) -> QamResult<Self> {
        Ok(Self {
            constellation: QamConstellation::new(order)?,
            coding,
        })
    }

    /// Build a modulator around an already-constructed constellation.
    pub fn with_constellation(constellation: QamConstellation, coding: CodingMode) -> Self {
        Self {
            constellation,
            coding,
        }
    }

    /// The constellation tables in use.
    pub fn constellation(&self) -> &QamConstellation {
        &self.constellation
    }

    /// The coding applied to rail indices.
    pub fn coding(&self) -> CodingMode {
        self.coding
    }

    /// Modulate tagged input, dispatching on its shape.
    pub fn modulate(&self, input: QamInput<'_>) -> QamResult<Vec<Complex>> {
        match input {
            QamInput::Bits(bits) => self.modulate_bits(bits),
            QamInput::Indices(values) => self.modulate_symbols(values),
        }
    }

    /// Modulate a flat bit stream, `log2(M)` bits per output symbol.
    pub fn modulate_bits(&self, bits: &[u8]) -> QamResult<Vec<Complex>> {
        let pairs = demap_bits(bits, &self.constellation)?;
        self.compose(&pairs)
    }

    /// Modulate pre-grouped symbol indices, one output symbol per value.
    pub fn modulate_symbols(&self, values: &[usize]) -> QamResult<Vec<Complex>> {
        let pairs = demap_indices(values, &self.constellation)?;
        self.compose(&pairs)
    }

    /// Map one rail index through the coding stage to its amplitude level.
    fn rail_level(&self, index: usize) -> QamResult<f64> {
        let rail = self.constellation.rail();
        if index >= rail {
            return Err(QamError::InternalInvariantViolation { index, rail });
        }
        let mapped = match self.coding {
            CodingMode::Gray => self.constellation.gray_index(index),
            CodingMode::Binary => index,
        };
        self.constellation
            .amplitude_table()
            .get(mapped)
            .copied()
            .ok_or(QamError::InternalInvariantViolation {
                index: mapped,
                rail,
            })
    }

    /// Compose one complex point per (I-index, Q-index) pair.
    fn compose(&self, pairs: &[(usize, usize)]) -> QamResult<Vec<Complex>> {
        pairs
            .iter()
            .map(|&(i, q)| Ok(Complex::new(self.rail_level(i)?, self.rail_level(q)?)))
            .collect()
    }
}

/// One-call modulation boundary.
///
/// Builds the constellation for `order`, applies `coding`, and maps the
/// tagged input in a single pass:
///
/// ```rust
/// use qammod::modulator::{modulate, CodingMode, QamInput};
/// use qammod::types::Complex;
///
/// let s = modulate(QamInput::Indices(&[6]), 16, CodingMode::Binary).unwrap();
/// assert_eq!(s, vec![Complex::new(1.0, -1.0)]);
/// ```
pub fn modulate(input: QamInput<'_>, order: usize, coding: CodingMode) -> QamResult<Vec<Complex>> {
    QamModulator::new(order, coding)?.modulate(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_16qam_gray_bits_example() {
        // [1,0 | 0,1]: I-index 1, Q-index 2; Gray -> 1 and 3;
        // levels -1 and 3.
        let qam = QamModulator::new(16, CodingMode::Gray).unwrap();
        let out = qam.modulate_bits(&[1, 0, 0, 1]).unwrap();
        assert_eq!(out, vec![Complex::new(-1.0, 3.0)]);
    }

    #[test]
    fn test_16qam_binary_indices_example() {
        // value 6: Q-index 1, I-index 2; binary coding keeps them;
        // levels A[2] = 1 and A[1] = -1.
        let qam = QamModulator::new(16, CodingMode::Binary).unwrap();
        let out = qam.modulate_symbols(&[6]).unwrap();
        assert_eq!(out, vec![Complex::new(1.0, -1.0)]);
    }

    #[test]
    fn test_input_mode_tag() {
        assert_eq!(QamInput::Bits(&[1, 0]).mode(), InputMode::Bits);
        assert_eq!(QamInput::Indices(&[3]).mode(), InputMode::Indices);
        assert_eq!(QamInput::Bits(&[1, 0]).len(), 2);
        assert!(QamInput::Indices(&[]).is_empty());
    }

    #[test]
    fn test_tagged_input_dispatch() {
        let qam = QamModulator::new(16, CodingMode::Gray).unwrap();
        let bits = [1u8, 0, 0, 1, 0, 0, 0, 0];
        let by_tag = qam.modulate(QamInput::Bits(&bits)).unwrap();
        let direct = qam.modulate_bits(&bits).unwrap();
        assert_eq!(by_tag, direct);

        let values = [0usize, 5, 15];
        let by_tag = qam.modulate(QamInput::Indices(&values)).unwrap();
        let direct = qam.modulate_symbols(&values).unwrap();
        assert_eq!(by_tag, direct);
    }

    #[test]
    fn test_with_prebuilt_constellation() {
        let c = QamConstellation::new(16).unwrap();
        let qam = QamModulator::with_constellation(c.clone(), CodingMode::Gray);
        assert_eq!(qam.constellation(), &c);
        assert_eq!(qam.coding(), CodingMode::Gray);

        let fresh = QamModulator::new(16, CodingMode::Gray).unwrap();
        let bits = [1u8, 0, 0, 1, 1, 1, 0, 0];
        assert_eq!(
            qam.modulate_bits(&bits).unwrap(),
            fresh.modulate_bits(&bits).unwrap()
        );
    }

    #[test]
    fn test_one_call_boundary() {
        let via_fn = modulate(QamInput::Bits(&[1, 0, 0, 1]), 16, CodingMode::Gray).unwrap();
        assert_eq!(via_fn, vec![Complex::new(-1.0, 3.0)]);
    }

    #[test]
    fn test_output_length_matches_input_groups() {
        let qam = QamModulator::new(64, CodingMode::Gray).unwrap();
        let bits: Vec<u8> = (0..60).map(|i| (i % 2) as u8).collect();
        assert_eq!(qam.modulate_bits(&bits).unwrap().len(), 10);

        let values: Vec<usize> = (0..64).collect();
        assert_eq!(qam.modulate_symbols(&values).unwrap().len(), 64);
    }

    #[test]
    fn test_levels_stay_on_amplitude_ladder() {
        for order in [4usize, 16, 64, 256] {
            for coding in [CodingMode::Gray, CodingMode::Binary] {
                let qam = QamModulator::new(order, coding).unwrap();
                let limit = (qam.constellation().rail() - 1) as f64;
                let values: Vec<usize> = (0..order).collect();
                let ladder = qam.constellation().amplitude_table().to_vec();
                for s in qam.modulate_symbols(&values).unwrap() {
                    assert!(ladder.contains(&s.re));
                    assert!(ladder.contains(&s.im));
                    assert!(s.re.abs() <= limit && s.im.abs() <= limit);
                }
            }
        }
    }

    #[test]
    fn test_all_indices_cover_all_points() {
        // Modulating 0..M must visit every grid point exactly once,
        // whichever coding is active.
        for coding in [CodingMode::Gray, CodingMode::Binary] {
            let qam = QamModulator::new(16, coding).unwrap();
            let values: Vec<usize> = (0..16).collect();
            let out = qam.modulate_symbols(&values).unwrap();
            let mut grid = qam.constellation().points();
            for s in &out {
                let pos = grid
                    .iter()
                    .position(|p| p == s)
                    .unwrap_or_else(|| panic!("point {s} visited twice under {coding}"));
                grid.swap_remove(pos);
            }
            assert!(grid.is_empty());
        }
    }

    #[test]
    fn test_deterministic() {
        let qam = QamModulator::new(64, CodingMode::Gray).unwrap();
        let bits: Vec<u8> = (0..120).map(|i| ((i * 7) % 2) as u8).collect();
        let a = qam.modulate_bits(&bits).unwrap();
        let b = qam.modulate_bits(&bits).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_chunked_equals_whole() {
        let qam = QamModulator::new(16, CodingMode::Gray).unwrap();
        let bits: Vec<u8> = (0..96).map(|i| ((i / 3) % 2) as u8).collect();
        let whole = qam.modulate_bits(&bits).unwrap();

        let mut stitched = Vec::new();
        for chunk in bits.chunks(16) {
            stitched.extend(qam.modulate_bits(chunk).unwrap());
        }
        assert_eq!(whole, stitched);
    }

    #[test]
    fn test_invalid_order_propagates() {
        assert_eq!(
            QamModulator::new(12, CodingMode::Gray).unwrap_err(),
            QamError::InvalidOrder { order: 12 }
        );
        assert_eq!(
            modulate(QamInput::Bits(&[0, 0]), 12, CodingMode::Gray).unwrap_err(),
            QamError::InvalidOrder { order: 12 }
        );
    }

    #[test]
    fn test_malformed_inputs_fail_before_output() {
        let qam = QamModulator::new(16, CodingMode::Gray).unwrap();
        assert!(matches!(
            qam.modulate_bits(&[1, 0, 1]).unwrap_err(),
            QamError::MalformedInput { .. }
        ));
        assert!(matches!(
            qam.modulate_symbols(&[16]).unwrap_err(),
            QamError::MalformedInput { .. }
        ));
    }

    #[test]
    fn test_coding_mode_parse_and_display() {
        assert_eq!("gray".parse::<CodingMode>().unwrap(), CodingMode::Gray);
        assert_eq!("binary".parse::<CodingMode>().unwrap(), CodingMode::Binary);
        assert_eq!(CodingMode::Gray.to_string(), "gray");
        assert_eq!(
            "trellis".parse::<CodingMode>().unwrap_err(),
            QamError::UnsupportedCoding("trellis".to_string())
        );
        assert_eq!(CodingMode::default(), CodingMode::Gray);
    }

    #[test]
    fn test_coding_mode_serde_roundtrip() {
        let json = serde_json::to_string(&CodingMode::Binary).unwrap();
        assert_eq!(json, "\"binary\"");
        let back: CodingMode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, CodingMode::Binary);
    }
}
