//! QAM Constellation Builder
//!
//! Derives the per-axis lookup tables for square M-ary QAM from the
//! modulation order alone. A square constellation factors into two
//! independent PAM rails (I and Q), so only two tables are needed:
//!
//! - the binary-to-Gray permutation `G[i] = i ^ (i >> 1)` over one rail, and
//! - the symmetric odd-integer amplitude ladder `-(L-1), ..., -1, 1, ..., L-1`
//!   where `L = sqrt(M)` is the number of levels per rail.
//!
//! The tables are built once per order and are immutable afterwards, so a
//! [`QamConstellation`] can be shared freely across threads.
//!
//! ## Example
//!
//! ```rust
//! use qammod::constellation::QamConstellation;
//!
//! let c = QamConstellation::new(16).unwrap();
//! assert_eq!(c.rail(), 4);
//! assert_eq!(c.bits_per_symbol(), 4);
//! assert_eq!(c.gray_table(), &[0, 1, 3, 2]);
//! assert_eq!(c.amplitude_table(), &[-3.0, -1.0, 1.0, 3.0]);
//! ```

use crate::types::{Complex, QamError, QamResult};

/// Immutable lookup tables for one square M-QAM constellation.
///
/// Holds everything derived from the modulation order M: bits per symbol
/// `k = log2(M)`, rail cardinality `L = sqrt(M)`, the Gray permutation of
/// one rail, and the PAM amplitude ladder shared by both rails.
#[derive(Debug, Clone, PartialEq)]
pub struct QamConstellation {
    order: usize,
    bits_per_symbol: usize,
    rail: usize,
    gray: Vec<usize>,
    levels: Vec<f64>,
}

impl QamConstellation {
    /// Build the lookup tables for the given modulation order.
    ///
    /// The order must be an exact power of 4 (4, 16, 64, 256, ...); any
    /// other value yields [`QamError::InvalidOrder`].
    pub fn new(order: usize) -> QamResult<Self> {
        // M = 4^k iff M is a power of two with an even exponent >= 2.
        if order < 4 || !order.is_power_of_two() || order.trailing_zeros() % 2 != 0 {
            return Err(QamError::InvalidOrder { order });
        }
        let bits_per_symbol = order.trailing_zeros() as usize;
        let rail = 1usize << (bits_per_symbol / 2);

        let gray: Vec<usize> = (0..rail).map(|i| i ^ (i >> 1)).collect();
        let levels: Vec<f64> = (0..rail)
            .map(|i| (2 * i) as f64 - (rail - 1) as f64)
            .collect();

        Ok(Self {
            order,
            bits_per_symbol,
            rail,
            gray,
            levels,
        })
    }

    /// Modulation order M (number of constellation points).
    pub fn order(&self) -> usize {
        self.order
    }

    /// Bits consumed per output symbol (`log2(M)`, always even).
    pub fn bits_per_symbol(&self) -> usize {
        self.bits_per_symbol
    }

    /// Levels per rail (`sqrt(M)`); each rail carries `log2(M)/2` bits.
    pub fn rail(&self) -> usize {
        self.rail
    }

    /// The binary-to-Gray permutation of one rail.
    pub fn gray_table(&self) -> &[usize] {
        &self.gray
    }

    /// The ascending odd-integer PAM amplitude ladder of one rail.
    pub fn amplitude_table(&self) -> &[f64] {
        &self.levels
    }

    /// Gray code of a rail index.
    ///
    /// # Panics
    ///
    /// Panics if `index >= rail()`.
    pub fn gray_index(&self, index: usize) -> usize {
        self.gray[index]
    }

    /// Amplitude level of a rail index.
    ///
    /// # Panics
    ///
    /// Panics if `index >= rail()`.
    pub fn level(&self, index: usize) -> f64 {
        self.levels[index]
    }

    /// The full L x L grid of constellation points, row-major by Q index.
    ///
    /// Intended for constellation diagrams and diagnostics; the mapping
    /// path itself only ever touches the per-rail tables.
    pub fn points(&self) -> Vec<Complex> {
        let mut pts = Vec::with_capacity(self.order);
        for &q in &self.levels {
            for &i in &self.levels {
                pts.push(Complex::new(i, q));
            }
        }
        pts
    }
}
