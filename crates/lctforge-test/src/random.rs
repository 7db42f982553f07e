//! Seeded random primitive streams.

use lctforge_core::constants::{MAX_ALCT_TBINS, MAX_CLCT_TBINS};
use lctforge_core::{AnodeLct, CathodeLct};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Generates plausible ALCT/CLCT streams for property tests.
///
/// Key wire groups and half-strips stay inside the smallest chambers so
/// every generated primitive is in range everywhere.
#[derive(Debug, Clone)]
pub struct PrimitiveGenerator {
    rng: ChaCha8Rng,
}

impl PrimitiveGenerator {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// At most one anode primitive per bin, each bin occupied with
    /// probability `occupancy`.
    pub fn alcts(&mut self, occupancy: f64) -> Vec<AnodeLct> {
        let mut alcts = Vec::new();
        for bx in 0..MAX_ALCT_TBINS as i32 {
            if !self.rng.random_bool(occupancy) {
                continue;
            }
            let quality = self.rng.random_range(0..=3);
            let key_wire_group = self.rng.random_range(0..32);
            let accelerator = self.rng.random_bool(0.1);
            alcts.push(AnodeLct::new(quality, key_wire_group, bx).with_accelerator(accelerator));
        }
        alcts
    }

    /// At most one cathode primitive per bin, each bin occupied with
    /// probability `occupancy`.
    pub fn clcts(&mut self, occupancy: f64) -> Vec<CathodeLct> {
        let mut clcts = Vec::new();
        for bx in 0..MAX_CLCT_TBINS as i32 {
            if !self.rng.random_bool(occupancy) {
                continue;
            }
            let quality = self.rng.random_range(3..=6);
            let pattern = self.rng.random_range(2..=10);
            let key_half_strip = self.rng.random_range(0..96);
            let bend = self.rng.random_range(0..=1);
            clcts.push(CathodeLct::new(quality, pattern, key_half_strip, bx).with_bend(bend));
        }
        clcts
    }
}
