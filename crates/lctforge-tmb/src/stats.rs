//! Per-pass counters.

use crate::matching::MatchOutcome;
use crate::store::StoreError;

/// What one motherboard pass produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassStatistics {
    /// Anode primitives returned by the anode finder.
    pub alcts_found: usize,
    /// Cathode primitives returned by the cathode finder.
    pub clcts_found: usize,
    /// Driving primitives that found a partner.
    pub matched: usize,
    /// Driving primitives reported alone.
    pub driving_only: usize,
    /// Searched-stream primitives promoted alone.
    pub other_only: usize,
    /// LCTs written to the store (replacements included).
    pub lcts_stored: usize,
    /// LCTs dropped because their bunch crossing left the buffer.
    pub lcts_out_of_time: usize,
    /// LCTs dropped because their rank was neither first nor second.
    pub lcts_misranked: usize,
}

impl PassStatistics {
    /// Counts one match decision.
    pub fn record_decision(&mut self, outcome: MatchOutcome) {
        match outcome {
            MatchOutcome::Matched => self.matched += 1,
            MatchOutcome::DrivingOnly => self.driving_only += 1,
            MatchOutcome::OtherOnly => self.other_only += 1,
        }
    }

    /// Counts one LCT the store refused.
    pub fn record_rejection(&mut self, rejection: StoreError) {
        match rejection {
            StoreError::OutOfTime { .. } => self.lcts_out_of_time += 1,
            StoreError::TrackNumber(_) => self.lcts_misranked += 1,
        }
    }

    /// Total number of match decisions.
    pub fn decisions(&self) -> usize {
        self.matched + self.driving_only + self.other_only
    }

    /// Fraction of decisions that paired both streams.
    pub fn match_rate(&self) -> f64 {
        let total = self.decisions();
        if total == 0 {
            0.0
        } else {
            self.matched as f64 / total as f64
        }
    }
}
