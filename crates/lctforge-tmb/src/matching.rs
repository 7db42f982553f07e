//! Time-windowed ALCT-CLCT matching.
//!
//! One stream drives the outer loop over time bins; for every driving bin
//! with a valid best primitive the other stream is scanned over a window
//! centered on that bin. The first valid bin found wins, whatever its
//! quality. A pipelined matcher cannot look ahead or revisit a decision,
//! and this emulation keeps both restrictions:
//!
//! - an unmatched driving primitive may become a single-sided LCT;
//! - an other-stream primitive is only promoted to a single-sided LCT when
//!   it sits exactly half a window behind the current driving bin and lies
//!   after the last matched bin.
//!
//! The engine only decides which bins to correlate. Building the LCT words
//! is left to [`crate::correlate`].

use lctforge_config::TmbConfig;
use lctforge_core::constants::{MAX_ALCT_TBINS, MAX_CLCT_TBINS, REUSE_MASK_BINS};
use lctforge_core::{LctType, PrimitiveKind};
use tracing::trace;

// Every searchable bin must have a reuse counter.
const _: () = assert!(MAX_ALCT_TBINS <= REUSE_MASK_BINS && MAX_CLCT_TBINS <= REUSE_MASK_BINS);

/// Which stream iterates the outer loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchDirection {
    /// ALCT-centric: iterate anode bins, search cathode bins.
    AnodeDriven,
    /// CLCT-centric: iterate cathode bins, search anode bins.
    CathodeDriven,
}

impl MatchDirection {
    /// Direction selected by the `clct_to_alct` register.
    pub fn from_clct_to_alct(clct_to_alct: bool) -> Self {
        if clct_to_alct {
            MatchDirection::CathodeDriven
        } else {
            MatchDirection::AnodeDriven
        }
    }

    /// Kind of the driving stream.
    pub fn driving_kind(self) -> PrimitiveKind {
        match self {
            MatchDirection::AnodeDriven => PrimitiveKind::Anode,
            MatchDirection::CathodeDriven => PrimitiveKind::Cathode,
        }
    }

    /// Tag of a matched pair.
    pub fn matched_type(self) -> LctType {
        match self {
            MatchDirection::AnodeDriven => LctType::AlctClct,
            MatchDirection::CathodeDriven => LctType::ClctAlct,
        }
    }

    /// Tag of a single-sided LCT from the driving stream.
    pub fn driving_only_type(self) -> LctType {
        match self {
            MatchDirection::AnodeDriven => LctType::AlctOnly,
            MatchDirection::CathodeDriven => LctType::ClctOnly,
        }
    }

    /// Tag of a single-sided LCT from the searched stream.
    pub fn other_only_type(self) -> LctType {
        match self {
            MatchDirection::AnodeDriven => LctType::ClctOnly,
            MatchDirection::CathodeDriven => LctType::AlctOnly,
        }
    }

    /// Sign applied to the clock offset when centering the window.
    fn offset_sign(self) -> i32 {
        match self {
            MatchDirection::AnodeDriven => -1,
            MatchDirection::CathodeDriven => 1,
        }
    }
}

/// Outcome of the window search for one driving bin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    /// Both streams contribute.
    Matched,
    /// No partner in the window; driving primitive reported alone.
    DrivingOnly,
    /// No driving primitive; a stale primitive of the searched stream is
    /// reported alone.
    OtherOnly,
}

/// Which bins to correlate and how to tag the result.
///
/// For single-sided outcomes the absent side still names a bin: the lookup
/// is made there and whatever the source holds (usually nothing) is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchDecision {
    pub anode_bx: usize,
    pub cathode_bx: usize,
    pub outcome: MatchOutcome,
    pub lct_type: LctType,
}

/// Parameters of one matching pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchParams {
    pub direction: MatchDirection,
    /// Window width; the half width is `window_size / 2`.
    pub window_size: u32,
    /// Anode-cathode clock offset.
    pub alct_clct_offset: i32,
    /// Block searched-stream bins that already matched.
    pub drop_used: bool,
    /// Trigger-enable flag of the driving kind.
    pub driving_trig_enable: bool,
    /// Trigger-enable flag of the searched kind.
    pub other_trig_enable: bool,
    pub verbosity: i32,
}

impl MatchParams {
    /// Derives the pass parameters from the motherboard registers.
    pub fn from_config(config: &TmbConfig) -> Self {
        let direction = MatchDirection::from_clct_to_alct(config.clct_to_alct);
        let (drop_used, driving_trig_enable, other_trig_enable) = match direction {
            MatchDirection::CathodeDriven => (
                config.tmb_drop_used_alcts,
                config.clct_trig_enabled(),
                config.alct_trig_enabled(),
            ),
            MatchDirection::AnodeDriven => (
                config.tmb_drop_used_clcts,
                config.alct_trig_enabled(),
                config.clct_trig_enabled(),
            ),
        };
        Self {
            direction,
            window_size: config.match_trig_window_size,
            alct_clct_offset: config.alct_clct_offset,
            drop_used,
            driving_trig_enable,
            other_trig_enable,
            verbosity: config.verbosity,
        }
    }

    fn half_window(&self) -> i32 {
        (self.window_size / 2) as i32
    }
}

/// Runs one matching pass.
///
/// `anode_valid[bx]` and `cathode_valid[bx]` tell whether the best
/// primitive of that bin is valid. Decisions are returned in driving-bin
/// order.
pub fn match_streams(
    params: &MatchParams,
    anode_valid: &[bool; MAX_ALCT_TBINS],
    cathode_valid: &[bool; MAX_CLCT_TBINS],
) -> Vec<MatchDecision> {
    let direction = params.direction;
    let (driving, other): (&[bool], &[bool]) = match direction {
        MatchDirection::AnodeDriven => (anode_valid, cathode_valid),
        MatchDirection::CathodeDriven => (cathode_valid, anode_valid),
    };
    let last_other_bx = other.len() as i32 - 1;

    let decide = |driving_bx: usize, other_bx: usize, outcome: MatchOutcome| {
        let (anode_bx, cathode_bx) = match direction {
            MatchDirection::AnodeDriven => (driving_bx, other_bx),
            MatchDirection::CathodeDriven => (other_bx, driving_bx),
        };
        let lct_type = match outcome {
            MatchOutcome::Matched => direction.matched_type(),
            MatchOutcome::DrivingOnly => direction.driving_only_type(),
            MatchOutcome::OtherOnly => direction.other_only_type(),
        };
        MatchDecision {
            anode_bx,
            cathode_bx,
            outcome,
            lct_type,
        }
    };

    let half = params.half_window();
    let offset = params.alct_clct_offset.saturating_mul(direction.offset_sign());
    let driving_kind = direction.driving_kind();

    let mut used_mask = [0u32; REUSE_MASK_BINS];
    // Bin of the last matched searched-stream primitive.
    let mut last_matched: i32 = 0;
    let mut decisions = Vec::new();

    for (driving_bx, &driving_is_valid) in driving.iter().enumerate() {
        let bx = driving_bx as i32;
        if driving_is_valid {
            let start = bx.saturating_sub(half).saturating_add(offset);
            let stop = bx.saturating_add(half).saturating_add(offset);
            let mut matched = false;

            // Bins outside the searched buffer are skipped.
            for other_bx in start.max(0)..=stop.min(last_other_bx) {
                let slot = other_bx as usize;
                if params.drop_used && used_mask[slot] != 0 {
                    continue;
                }
                if other[slot] {
                    if params.verbosity > 1 {
                        trace!(
                            driving = %driving_kind,
                            driving_bx,
                            other_bx,
                            window_start = start,
                            window_stop = stop,
                            "successful match"
                        );
                    }
                    decisions.push(decide(driving_bx, slot, MatchOutcome::Matched));
                    used_mask[slot] += 1;
                    matched = true;
                    last_matched = other_bx;
                    break;
                }
            }

            if !matched && params.driving_trig_enable {
                if params.verbosity > 1 {
                    trace!(
                        driving = %driving_kind,
                        driving_bx,
                        window_start = start,
                        window_stop = stop,
                        "unsuccessful match, driving primitive only"
                    );
                }
                decisions.push(decide(driving_bx, driving_bx, MatchOutcome::DrivingOnly));
            }
        } else {
            // Only primitives that can no longer be matched at a later
            // driving bin are promoted.
            let other_bx = bx - half;
            if other_bx >= 0
                && other_bx > last_matched
                && (other_bx as usize) < other.len()
                && other[other_bx as usize]
                && params.other_trig_enable
            {
                if params.verbosity > 1 {
                    trace!(
                        driving = %driving_kind,
                        driving_bx,
                        other_bx,
                        "unsuccessful match, searched primitive only"
                    );
                }
                decisions.push(decide(driving_bx, other_bx as usize, MatchOutcome::OtherOnly));
            }
        }
    }

    decisions
}

#[cfg(test)]
#[path = "matching_tests.rs"]
mod tests;
