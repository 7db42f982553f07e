//! Construction of correlated LCT words from ALCT/CLCT pairs.

use lctforge_config::TmbConfig;
use lctforge_core::constants::{LCT_CENTRAL_BX, PATTERN_BIT_WIDTH};
use lctforge_core::{AnodeLct, CathodeLct, CorrelatedLct, LctType};
use smallvec::SmallVec;
use tracing::warn;

/// Up to two LCTs built from one match decision.
pub type LctPair = SmallVec<[CorrelatedLct; 2]>;

/// Builds LCT words with the registers of one motherboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LctBuilder {
    alct_trig_enable: bool,
    clct_trig_enable: bool,
    match_trig_enable: bool,
    use_run3_patterns: bool,
    use_high_multiplicity_bits: bool,
    high_multiplicity_bits: u8,
    l1a_window_size: u32,
    alct_clct_offset: i32,
    csc_id: u8,
    verbosity: i32,
}

impl LctBuilder {
    /// Creates a builder for the chamber with trigger CSC id `csc_id`.
    pub fn new(config: &TmbConfig, csc_id: u8) -> Self {
        Self {
            alct_trig_enable: config.alct_trig_enabled(),
            clct_trig_enable: config.clct_trig_enabled(),
            match_trig_enable: config.match_trig_enabled(),
            use_run3_patterns: config.use_run3_patterns,
            use_high_multiplicity_bits: config.use_high_multiplicity_bits,
            high_multiplicity_bits: 0,
            l1a_window_size: config.tmb_l1a_window_size,
            alct_clct_offset: config.alct_clct_offset,
            csc_id,
            verbosity: config.verbosity,
        }
    }

    /// Encodes the high-multiplicity bits carried by this pass's LCTs.
    ///
    /// The anode bits are relayed unchanged.
    pub fn with_high_multiplicity_bits(mut self, alct_bits: u8) -> Self {
        self.high_multiplicity_bits = alct_bits;
        self
    }

    /// Forms the first and second LCT from the best and second primitives
    /// of each side.
    ///
    /// A side with only one valid primitive uses it for both ranks. The
    /// second LCT is only formed when it differs from the first.
    pub fn correlate(
        &self,
        best_alct: AnodeLct,
        second_alct: AnodeLct,
        best_clct: CathodeLct,
        second_clct: CathodeLct,
        lct_type: LctType,
    ) -> LctPair {
        let (best_alct, second_alct) = promote(best_alct, second_alct, AnodeLct::is_valid);
        let (best_clct, second_clct) = promote(best_clct, second_clct, CathodeLct::is_valid);

        let mut lcts = LctPair::new();
        if self.trigger_allowed(&best_alct, &best_clct) {
            lcts.push(self.construct(&best_alct, &best_clct, lct_type, 1));
        }
        if (second_alct != best_alct || second_clct != best_clct)
            && self.trigger_allowed(&second_alct, &second_clct)
        {
            lcts.push(self.construct(&second_alct, &second_clct, lct_type, 2));
        }
        lcts
    }

    /// Matching conditions set by the trigger-enable registers.
    fn trigger_allowed(&self, alct: &AnodeLct, clct: &CathodeLct) -> bool {
        (self.alct_trig_enable && alct.is_valid())
            || (self.clct_trig_enable && clct.is_valid())
            || (self.match_trig_enable && alct.is_valid() && clct.is_valid())
    }

    /// Builds one LCT word.
    pub fn construct(
        &self,
        alct: &AnodeLct,
        clct: &CathodeLct,
        lct_type: LctType,
        track_number: u8,
    ) -> CorrelatedLct {
        let pattern = if self.use_run3_patterns {
            0
        } else {
            encode_pattern(i32::from(clct.pattern))
        };
        let quality = find_quality(alct, clct, self.verbosity);
        // Bunch crossing from the cathode when the anode is absent.
        let bx = if alct.is_valid() { alct.bx } else { clct.bx };

        let mut lct = CorrelatedLct {
            valid: true,
            track_number,
            quality,
            key_wire_group: alct.key_wire_group,
            strip: clct.key_half_strip,
            quart_strip: false,
            eighth_strip: false,
            pattern,
            bend: clct.bend,
            bx,
            mpc_link: 0,
            bx0: 0,
            sync_err: 0,
            csc_id: self.csc_id,
            lct_type,
            run3: false,
            hmt: 0,
            alct: self.shifted_alct(alct),
            clct: self.shifted_clct(clct),
        };
        if self.use_run3_patterns {
            lct.run3 = true;
            if self.use_high_multiplicity_bits {
                lct.hmt = self.high_multiplicity_bits;
            }
        }
        lct
    }

    /// Moves the anode bunch crossing from the central bin into the
    /// readout frame.
    pub fn shifted_alct(&self, alct: &AnodeLct) -> AnodeLct {
        alct.shifted(-(LCT_CENTRAL_BX - (self.l1a_window_size / 2) as i32))
    }

    /// Removes the anode-cathode clock offset from the cathode bunch crossing.
    pub fn shifted_clct(&self, clct: &CathodeLct) -> CathodeLct {
        clct.shifted(self.alct_clct_offset.saturating_neg())
    }
}

/// If only one of best/second is valid, it fills both slots.
fn promote<T: Copy>(best: T, second: T, is_valid: fn(&T) -> bool) -> (T, T) {
    match (is_valid(&best), is_valid(&second)) {
        (true, false) => (best, best),
        (false, true) => (second, second),
        _ => (best, second),
    }
}

/// LCT pattern word: the low four bits of the CLCT pattern id.
pub fn encode_pattern(pattern: i32) -> u8 {
    (pattern.unsigned_abs() & ((1 << PATTERN_BIT_WIDTH) - 1)) as u8
}

/// 4-bit LCT quality.
///
/// | code | meaning |
/// |------|---------|
/// | 0 | no primitive (never formed) |
/// | 1 | anode only |
/// | 2 | cathode only |
/// | 3 | cathode layer trigger |
/// | 5 | marginal anode and cathode |
/// | 6 | good anode, marginal cathode |
/// | 7 | marginal anode, good cathode |
/// | 8 | good pair, accelerator anode |
/// | 11-15 | good pair, by cathode pattern |
///
/// Codes 4, 9 and 10 are reserved.
pub fn find_quality(alct: &AnodeLct, clct: &CathodeLct, verbosity: i32) -> u8 {
    match (alct.is_valid(), clct.is_valid()) {
        (false, false) => 0,
        (true, false) => 1,
        (false, true) => 2,
        (true, true) => {
            let pattern = clct.pattern;
            if pattern == 1 {
                return 3;
            }
            let a4 = alct.quality >= 1;
            let c4 = clct.quality >= 4;
            match (a4, c4) {
                (false, false) => 5,
                (true, false) => 6,
                (false, true) => 7,
                (true, true) if alct.accelerator => 8,
                (true, true) => match pattern {
                    2 | 3 => 11,
                    4 | 5 => 12,
                    6 | 7 => 13,
                    8 | 9 => 14,
                    10 => 15,
                    _ => {
                        if verbosity >= 0 {
                            warn!(pattern, "find_quality: unexpected CLCT pattern id");
                        }
                        0
                    }
                },
            }
        }
    }
}

#[cfg(test)]
#[path = "correlate_tests.rs"]
mod tests;
