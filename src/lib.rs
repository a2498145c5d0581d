//! # qammod — Square M-QAM Constellation Mapper
//!
//! Maps a stream of bits (or integer symbol indices) onto complex baseband
//! constellation points for square M-ary Quadrature Amplitude Modulation,
//! where `M = 4^k` (4-QAM, 16-QAM, 64-QAM, ...). The transformation is
//! pure and stateless: everything is derived from the modulation order at
//! construction time, and no state survives a call.
//!
//! ## Mapping chain
//!
//! ```text
//! bits/indices → demap to (I-index, Q-index) → Gray/binary → A[i] + j*A[q]
//! ```
//!
//! A square constellation factors into two independent PAM rails, so the
//! whole chain runs on two small per-rail tables: the binary-to-Gray
//! permutation `G[i] = i ^ (i >> 1)` and the odd-integer amplitude ladder
//! `-(L-1), ..., -1, 1, ..., L-1` with `L = sqrt(M)` levels.
//!
//! ## Example
//!
//! ```rust
//! use qammod::{CodingMode, Complex, QamModulator};
//!
//! // 16-QAM, Gray-coded (the usual default).
//! let qam = QamModulator::new(16, CodingMode::Gray).unwrap();
//!
//! // One 4-bit group [1,0,0,1]: I sub-group [1,0], Q sub-group [0,1].
//! let symbols = qam.modulate_bits(&[1, 0, 0, 1]).unwrap();
//! assert_eq!(symbols, vec![Complex::new(-1.0, 3.0)]);
//!
//! // Pre-grouped symbol indices work too.
//! let symbols = qam.modulate_symbols(&[0, 5, 15]).unwrap();
//! assert_eq!(symbols.len(), 3);
//! ```
//!
//! Demodulation, pulse shaping, and channel modeling are out of scope;
//! this crate is the bit-to-point mapping building block only.

pub mod constellation;
pub mod demapper;
pub mod modulator;
pub mod types;

// Parallel batch processing (requires `parallel` feature)
#[cfg(feature = "parallel")]
pub mod parallel;

// Re-export main types
pub use constellation::QamConstellation;
pub use demapper::{demap_bits, demap_indices, InputMode};
pub use modulator::{modulate, CodingMode, QamInput, QamModulator};
pub use types::{Complex, QamError, QamResult};

#[cfg(feature = "parallel")]
pub use parallel::ParallelQamModulator;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::constellation::QamConstellation;
    pub use crate::demapper::InputMode;
    pub use crate::modulator::{modulate, CodingMode, QamInput, QamModulator};
    pub use crate::types::{Complex, QamError, QamResult};
}
