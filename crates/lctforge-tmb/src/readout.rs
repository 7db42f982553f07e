//! L1Accept readout window.
//!
//! Only LCTs whose bunch crossing falls in the L1A*LCT coincidence window
//! are read out. The window opens `early_tbins + 1` bins into the buffer
//! and is `l1a_window_size` bins wide; with the defaults (4, 7) it spans
//! bins 5..=11, centered on the central bin 8.

use lctforge_config::TmbConfig;
use lctforge_core::constants::MAX_LCT_TBINS;
use lctforge_core::CorrelatedLct;
use tracing::{debug, warn};

/// Readout window registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadoutWindow {
    pub early_tbins: i32,
    pub l1a_window_size: u32,
    /// Keep only the LCTs of the earliest in-window bin; the readout
    /// header has room for two.
    pub earliest_2: bool,
    pub verbosity: i32,
}

impl ReadoutWindow {
    pub fn from_config(config: &TmbConfig) -> Self {
        Self {
            early_tbins: config.tmb_early_tbins,
            l1a_window_size: config.tmb_l1a_window_size,
            earliest_2: config.tmb_readout_earliest_2,
            verbosity: config.verbosity,
        }
    }

    /// Inclusive `(first, last)` readout bins, with the last bin clamped to
    /// the buffer depth.
    pub fn bounds(&self) -> (i32, i32) {
        let max_bx = (MAX_LCT_TBINS - 1) as i32;
        (self.early_tbins.saturating_add(1), self.late_tbins().min(max_bx))
    }

    /// Last readout bin before clamping.
    fn late_tbins(&self) -> i32 {
        let width = i32::try_from(self.l1a_window_size).unwrap_or(i32::MAX);
        self.early_tbins.saturating_add(width)
    }

    /// Counts settings that hide in-time LCTs or overrun the buffer,
    /// warning about each one unless verbosity is negative.
    pub fn suspicious_settings(&self) -> usize {
        let mut found = 0;
        if self.early_tbins < 0 {
            found += 1;
            if self.verbosity >= 0 {
                warn!(
                    early_tbins = self.early_tbins,
                    "suspicious readout window: in-time LCTs are not getting read out"
                );
            }
        }
        let late_tbins = self.late_tbins();
        let max_bx = (MAX_LCT_TBINS - 1) as i32;
        if late_tbins > max_bx {
            found += 1;
            if self.verbosity >= 0 {
                warn!(
                    late_tbins,
                    max_bx, "readout window exceeds the LCT buffer; clamping to the last bin"
                );
            }
        }
        found
    }

    /// Selects the LCTs to read out, preserving input order.
    pub fn select<'a, I>(&self, lcts: I) -> Vec<CorrelatedLct>
    where
        I: IntoIterator<Item = &'a CorrelatedLct>,
    {
        self.suspicious_settings();
        let (first_bx, last_bx) = self.bounds();

        let mut selected = Vec::new();
        let mut readout_bx: Option<i32> = None;
        for lct in lcts {
            if !lct.is_valid() {
                continue;
            }
            let bx = lct.bx;
            if bx < first_bx {
                if self.verbosity > 1 {
                    debug!(
                        strip = lct.strip,
                        key_wire_group = lct.key_wire_group,
                        bx,
                        earliest = first_bx,
                        "LCT too early for readout"
                    );
                }
                continue;
            }
            if bx > last_bx {
                if self.verbosity > 1 {
                    debug!(
                        strip = lct.strip,
                        key_wire_group = lct.key_wire_group,
                        bx,
                        latest = last_bx,
                        "LCT too late for readout"
                    );
                }
                continue;
            }

            if self.earliest_2 {
                match readout_bx {
                    None => {
                        readout_bx = Some(bx);
                        selected.push(*lct);
                    }
                    Some(earliest) if earliest == bx => selected.push(*lct),
                    Some(_) => {}
                }
            } else {
                selected.push(*lct);
            }
        }
        selected
    }
}
