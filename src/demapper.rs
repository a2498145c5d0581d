//! Symbol Demapper — raw input to per-rail indices
//!
//! Splits each input symbol into its in-phase and quadrature rail indices,
//! both in `[0, L)`. Two input shapes are supported: a flat bit stream
//! consumed in groups of `log2(M)` bits, or pre-grouped integer symbol
//! indices in `[0, M)`. All validation happens up front; no partial
//! output is ever produced.
//!
//! Within a bit group the first `k/2` bits form the I sub-group and the
//! next `k/2` bits the Q sub-group. Sub-groups are decoded little-endian:
//! the first bit carries weight 1 and each later bit doubles the weight.
//!
//! ## Example
//!
//! ```rust
//! use qammod::constellation::QamConstellation;
//! use qammod::demapper::demap_bits;
//!
//! let c = QamConstellation::new(16).unwrap();
//! let pairs = demap_bits(&[1, 0, 0, 1], &c).unwrap();
//! assert_eq!(pairs, vec![(1, 2)]);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constellation::QamConstellation;
use crate::types::{QamError, QamResult};

/// Shape of the raw input handed to the modulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputMode {
    /// A flat bit stream, consumed `log2(M)` bits per symbol.
    #[default]
    Bits,
    /// Pre-grouped integer symbol indices, one per output symbol.
    Indices,
}

impl fmt::Display for InputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bits => write!(f, "bits"),
            Self::Indices => write!(f, "indices"),
        }
    }
}

impl FromStr for InputMode {
    type Err = QamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bits" => Ok(Self::Bits),
            "indices" => Ok(Self::Indices),
            other => Err(QamError::UnsupportedMode(other.to_string())),
        }
    }
}

/// Demap a flat bit stream into per-symbol (I-index, Q-index) pairs.
///
/// The stream length must be a multiple of `constellation.bits_per_symbol()`
/// and every element must be 0 or 1; anything else yields
/// [`QamError::MalformedInput`] before any pair is produced.
pub fn demap_bits(bits: &[u8], constellation: &QamConstellation) -> QamResult<Vec<(usize, usize)>> {
    let k = constellation.bits_per_symbol();
    if bits.len() % k != 0 {
        return Err(QamError::MalformedInput {
            reason: format!(
                "bit count {} is not a multiple of {} (bits per {}-QAM symbol)",
                bits.len(),
                k,
                constellation.order()
            ),
        });
    }
    if let Some(&b) = bits.iter().find(|&&b| b > 1) {
        return Err(QamError::MalformedInput {
            reason: format!("bit value {b} is neither 0 nor 1"),
        });
    }

    let half = k / 2;
    Ok(bits
        .chunks_exact(k)
        .map(|group| (rail_index(&group[..half]), rail_index(&group[half..])))
        .collect())
}

/// Demap integer symbol indices into per-symbol (I-index, Q-index) pairs.
///
/// Each value must lie in `[0, M)`. The quadrature index is `value / L`
/// and the in-phase index the remainder `value % L`.
pub fn demap_indices(
    values: &[usize],
    constellation: &QamConstellation,
) -> QamResult<Vec<(usize, usize)>> {
    let order = constellation.order();
    if let Some(&v) = values.iter().find(|&&v| v >= order) {
        return Err(QamError::MalformedInput {
            reason: format!("symbol index {v} is out of range for {order}-QAM"),
        });
    }

    let rail = constellation.rail();
    Ok(values.iter().map(|&v| (v % rail, v / rail)).collect())
}

/// Little-endian positional decode: the first bit has weight 1.
fn rail_index(sub_group: &[u8]) -> usize {
    sub_group
        .iter()
        .enumerate()
        .fold(0usize, |acc, (n, &b)| acc | ((b as usize) << n))
}
