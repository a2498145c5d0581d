//! Parallel Processing Module
//!
//! Rayon-backed batch modulation. Enable with the `parallel` feature flag:
//!
//! ```toml
//! [dependencies]
//! qammod = { version = "0.1", features = ["parallel"] }
//! ```
//!
//! Symbol groups are independent of one another, so a bit stream can be
//! split at any symbol boundary and the chunks mapped on separate threads.
//! Output order is preserved; the stitched result is identical to the
//! single-threaded one.
//!
//! Parallelization adds overhead, so it pays off for batches of payloads
//! or long streams. For a handful of symbols the sequential path is faster.

use rayon::prelude::*;

use crate::modulator::QamModulator;
use crate::types::{Complex, QamError, QamResult};

/// Parallel batch modulator wrapping a [`QamModulator`].
#[derive(Debug, Clone)]
pub struct ParallelQamModulator {
    modulator: QamModulator,
}

impl ParallelQamModulator {
    /// Wrap an existing modulator for batch use.
    pub fn new(modulator: QamModulator) -> Self {
        Self { modulator }
    }

    /// The wrapped sequential modulator.
    pub fn inner(&self) -> &QamModulator {
        &self.modulator
    }

    /// Modulate multiple bit streams in parallel, one result per payload.
    pub fn modulate_batch(&self, payloads: &[&[u8]]) -> QamResult<Vec<Vec<Complex>>> {
        payloads
            .par_iter()
            .map(|bits| self.modulator.modulate_bits(bits))
            .collect()
    }

    /// Modulate one long bit stream across threads.
    ///
    /// The stream is split into symbol-aligned chunks of
    /// `symbols_per_chunk` symbols, mapped in parallel, and stitched back
    /// in order.
    pub fn modulate_bits_parallel(
        &self,
        bits: &[u8],
        symbols_per_chunk: usize,
    ) -> QamResult<Vec<Complex>> {
        let k = self.modulator.constellation().bits_per_symbol();
        // Validate up front so chunk boundaries cannot mask a ragged tail.
        if bits.len() % k != 0 {
            return Err(QamError::MalformedInput {
                reason: format!("bit count {} is not a multiple of {k}", bits.len()),
            });
        }
        let chunk_bits = symbols_per_chunk.max(1) * k;

        let parts: Vec<Vec<Complex>> = bits
            .par_chunks(chunk_bits)
            .map(|chunk| self.modulator.modulate_bits(chunk))
            .collect::<QamResult<_>>()?;

        Ok(parts.into_iter().flatten().collect())
    }
}
