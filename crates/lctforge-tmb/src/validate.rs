//! Final range and policy checks on read-out LCTs.
//!
//! Checks are advisory: violations are logged and returned, the LCT is
//! never altered or dropped.

use lctforge_config::TmbConfig;
use lctforge_core::constants::{
    LCT_MAX_QUALITY, MAX_LCT_TBINS, MAX_TRIGGER_CSC_ID, MIN_TRIGGER_CSC_ID,
};
use lctforge_core::{geometry, ChamberId, CorrelatedLct, LctType};
use thiserror::Error;
use tracing::error;

/// One field or policy violation found on an LCT.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LctViolation {
    #[error("invalid bit not set")]
    NotValid,

    #[error("invalid track number {0}; allowed [1, 2]")]
    TrackNumber(u8),

    #[error("invalid quality {0}; allowed [0, {max}]", max = LCT_MAX_QUALITY)]
    Quality(u8),

    #[error("invalid half-strip {value}; allowed [0, {max}]")]
    HalfStrip { value: u32, max: u32 },

    #[error("invalid key quart-strip {value}; allowed [0, {max})")]
    QuartStrip { value: u32, max: u32 },

    #[error("invalid key eighth-strip {value}; allowed [0, {max})")]
    EighthStrip { value: u32, max: u32 },

    #[error("invalid wire group {value}; allowed [0, {max}]")]
    WireGroup { value: u32, max: u32 },

    #[error("invalid bx {0}; allowed [0, {max}]", max = MAX_LCT_TBINS - 1)]
    Bx(i32),

    #[error("invalid bending {0}; allowed [0, 1]")]
    Bend(u8),

    #[error("invalid CSC id {0}; allowed [{min}, {max}]", min = MIN_TRIGGER_CSC_ID, max = MAX_TRIGGER_CSC_ID)]
    CscId(u8),

    #[error("invalid pattern id {value}; allowed [{min}, {max}]")]
    Pattern { value: u8, min: u8, max: u8 },

    #[error("invalid type (SIM) {0}; allowed [ALCTCLCT, CLCT2GEM]")]
    SimulationType(LctType),

    #[error("invalid type (SIM) in this station {0}; allowed [ALCTCLCT]")]
    StationType(LctType),

    #[error("invalid type (SIM) with GEM-CSC trigger not on {0}; allowed [ALCTCLCT]")]
    GemTriggerOff(LctType),
}

/// Range checks for the LCTs of one chamber.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LctValidator {
    chamber: ChamberId,
    run3_patterns: bool,
    run_me11_ilt: bool,
    run_me21_ilt: bool,
}

impl LctValidator {
    pub fn new(chamber: ChamberId, config: &TmbConfig) -> Self {
        Self {
            chamber,
            run3_patterns: config.use_run3_patterns,
            run_me11_ilt: config.run_me11_ilt,
            run_me21_ilt: config.run_me21_ilt,
        }
    }

    /// Returns every violation found on `lct`.
    pub fn violations(&self, lct: &CorrelatedLct) -> Vec<LctViolation> {
        let station = self.chamber.station;
        let ring = self.chamber.ring;
        let max_strip = geometry::max_half_strip(station, ring);
        let max_quart_strip = geometry::max_quart_strip(station, ring);
        let max_eighth_strip = geometry::max_eighth_strip(station, ring);
        let max_wire = geometry::max_wire_group(station, ring);
        let (min_pattern, max_pattern) = geometry::min_max_pattern(self.run3_patterns);

        let mut found = Vec::new();

        if !lct.is_valid() {
            found.push(LctViolation::NotValid);
        }
        if !(1..=2).contains(&lct.track_number) {
            found.push(LctViolation::TrackNumber(lct.track_number));
        }
        if lct.quality > LCT_MAX_QUALITY {
            found.push(LctViolation::Quality(lct.quality));
        }
        if lct.strip_at(2) > max_strip {
            found.push(LctViolation::HalfStrip {
                value: lct.strip_at(2),
                max: max_strip,
            });
        }
        if lct.strip_at(4) >= max_quart_strip {
            found.push(LctViolation::QuartStrip {
                value: lct.strip_at(4),
                max: max_quart_strip,
            });
        }
        if lct.strip_at(8) >= max_eighth_strip {
            found.push(LctViolation::EighthStrip {
                value: lct.strip_at(8),
                max: max_eighth_strip,
            });
        }
        if u32::from(lct.key_wire_group) > max_wire {
            found.push(LctViolation::WireGroup {
                value: u32::from(lct.key_wire_group),
                max: max_wire,
            });
        }
        if lct.bx > (MAX_LCT_TBINS - 1) as i32 {
            found.push(LctViolation::Bx(lct.bx));
        }
        if lct.bend > 1 {
            found.push(LctViolation::Bend(lct.bend));
        }
        if !(MIN_TRIGGER_CSC_ID..=MAX_TRIGGER_CSC_ID).contains(&lct.csc_id) {
            found.push(LctViolation::CscId(lct.csc_id));
        }
        if lct.pattern < min_pattern || lct.pattern > max_pattern {
            found.push(LctViolation::Pattern {
                value: lct.pattern,
                min: min_pattern,
                max: max_pattern,
            });
        }
        if lct.lct_type.is_simulation_only() {
            found.push(LctViolation::SimulationType(lct.lct_type));
        }

        // Stations without GEMs always send matched ALCT-CLCT LCTs.
        if !self.chamber.is_gem_capable() && lct.lct_type != LctType::AlctClct {
            found.push(LctViolation::StationType(lct.lct_type));
        }

        // GEM-capable stations send other types only with the integrated
        // trigger turned on.
        if ring == 1 && lct.lct_type != LctType::AlctClct {
            let ilt_off = (station == 1 && !self.run_me11_ilt) || (station == 2 && !self.run_me21_ilt);
            if ilt_off {
                found.push(LctViolation::GemTriggerOff(lct.lct_type));
            }
        }

        found
    }

    /// Logs every violation on `lct`; returns how many were found.
    pub fn check(&self, lct: &CorrelatedLct) -> usize {
        let found = self.violations(lct);
        for violation in &found {
            error!(chamber = %self.chamber, "CorrelatedLct with {violation}");
        }
        if !found.is_empty() {
            error!(
                chamber = %self.chamber,
                errors = found.len(),
                "Faulty LCT: {lct}"
            );
        }
        found.len()
    }
}

#[cfg(test)]
#[path = "validate_tests.rs"]
mod tests;
