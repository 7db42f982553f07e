//! The trigger motherboard.
//!
//! Runs the anode and cathode finders, matches their primitives, builds
//! correlated LCTs and serves the read-out subset.
//!
//! All per-pass state lives in the returned [`TmbPass`]; the motherboard
//! only holds its registers and the two sources, so consecutive passes
//! cannot see each other's LCTs.

use std::fmt::{self, Debug};
use std::path::Path;

use lctforge_config::TmbConfig;
use lctforge_core::constants::{MAX_ALCT_TBINS, MAX_CLCT_TBINS, MAX_HALF_STRIP_ME1B};
use lctforge_core::{
    AnodeLct, CathodeLct, ChamberId, CorrelatedLct, LctForgeError, LctSource, PrimitiveKind,
    Result,
};
use tracing::{debug, error, info, warn};

use crate::correlate::LctBuilder;
use crate::matching::{match_streams, MatchDecision, MatchParams};
use crate::readout::ReadoutWindow;
use crate::stats::PassStatistics;
use crate::store::{LctStore, StoreError};
use crate::validate::LctValidator;

/// Everything one pass produced.
#[derive(Debug, Clone, Default)]
pub struct TmbPass {
    /// Primitives returned by the anode finder.
    pub alcts: Vec<AnodeLct>,
    /// Primitives returned by the cathode finder.
    pub clcts: Vec<CathodeLct>,
    /// Match decisions in the order they were taken.
    pub decisions: Vec<MatchDecision>,
    /// High-multiplicity bits relayed from the anode finder.
    pub high_multiplicity_bits: u8,
    /// First and second LCT per bunch crossing.
    pub store: LctStore,
    pub stats: PassStatistics,
}

/// Trigger motherboard of one chamber.
///
/// # Type Parameters
/// * `A` - Anode finder
/// * `C` - Cathode finder
pub struct Motherboard<A, C> {
    chamber: ChamberId,
    config: TmbConfig,
    anode: Option<A>,
    cathode: Option<C>,
}

impl<A, C> Debug for Motherboard<A, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Motherboard")
            .field("chamber", &self.chamber)
            .field("config", &self.config)
            .field("has_anode_source", &self.anode.is_some())
            .field("has_cathode_source", &self.cathode.is_some())
            .finish()
    }
}

impl<A, C> Motherboard<A, C>
where
    A: LctSource<Lct = AnodeLct>,
    C: LctSource<Lct = CathodeLct>,
{
    /// Creates a motherboard fed by the given finders.
    ///
    /// Out-of-range registers are reset to their defaults.
    pub fn new(chamber: ChamberId, config: TmbConfig, anode: A, cathode: C) -> Self {
        let mut board = Self::without_sources(chamber, config);
        board.anode = Some(anode);
        board.cathode = Some(cathode);
        board
    }

    /// Creates a motherboard with registers loaded from a TOML file.
    pub fn from_config_file(
        chamber: ChamberId,
        path: impl AsRef<Path>,
        anode: A,
        cathode: C,
    ) -> Result<Self> {
        let config =
            TmbConfig::load(path).map_err(|e| LctForgeError::Config(e.to_string()))?;
        Ok(Self::new(chamber, config, anode, cathode))
    }

    /// Creates a motherboard with no finders attached.
    ///
    /// [`run`](Self::run) reports a setup error and produces nothing until
    /// both sources are attached.
    pub fn without_sources(chamber: ChamberId, mut config: TmbConfig) -> Self {
        config.check_parameters();
        Self {
            chamber,
            config,
            anode: None,
            cathode: None,
        }
    }

    /// Attaches the anode finder.
    pub fn set_anode_source(&mut self, anode: A) {
        self.anode = Some(anode);
    }

    /// Attaches the cathode finder.
    pub fn set_cathode_source(&mut self, cathode: C) {
        self.cathode = Some(cathode);
    }

    /// Replaces the registers, resetting out-of-range values.
    pub fn set_config(&mut self, mut config: TmbConfig) {
        config.check_parameters();
        self.config = config;
    }

    pub fn config(&self) -> &TmbConfig {
        &self.config
    }

    pub fn chamber(&self) -> &ChamberId {
        &self.chamber
    }

    pub fn anode_source(&self) -> Option<&A> {
        self.anode.as_ref()
    }

    pub fn cathode_source(&self) -> Option<&C> {
        self.cathode.as_ref()
    }

    /// Logs the register dump and returns it.
    pub fn dump_config_params(&self) -> String {
        let dump = self.config.to_string();
        debug!(chamber = %self.chamber, "\n{dump}");
        dump
    }

    /// Runs one pass over the raw anode and cathode input.
    ///
    /// # Errors
    ///
    /// Fails only when a source breaks its contract by reporting a valid
    /// primitive under the wrong bunch crossing.
    pub fn run(&mut self, anode_input: &A::Input, cathode_input: &C::Input) -> Result<TmbPass> {
        let config = &self.config;
        let chamber = self.chamber;

        let (Some(anode), Some(cathode)) = (self.anode.as_mut(), self.cathode.as_mut()) else {
            error!(
                chamber = %chamber,
                "run() called for non-existing ALCT/CLCT processor"
            );
            return Ok(TmbPass::default());
        };

        anode.clear();
        cathode.clear();

        let mut pass = TmbPass {
            alcts: anode.run(anode_input),
            clcts: cathode.run(cathode_input),
            ..TmbPass::default()
        };
        pass.stats.alcts_found = pass.alcts.len();
        pass.stats.clcts_found = pass.clcts.len();

        // Nothing to correlate.
        if pass.alcts.is_empty() && pass.clcts.is_empty() {
            return Ok(pass);
        }

        pass.high_multiplicity_bits = anode.high_multiplicity_bits();
        let builder = LctBuilder::new(config, chamber.trigger_csc_id)
            .with_high_multiplicity_bits(pass.high_multiplicity_bits);

        let anode_valid: [bool; MAX_ALCT_TBINS] = best_validity(
            &*anode,
            PrimitiveKind::Anode,
            |alct: &AnodeLct| alct.is_valid().then_some(alct.bx),
        )?;
        let cathode_valid: [bool; MAX_CLCT_TBINS] = best_validity(
            &*cathode,
            PrimitiveKind::Cathode,
            |clct: &CathodeLct| clct.is_valid().then_some(clct.bx),
        )?;

        let params = MatchParams::from_config(config);
        pass.decisions = match_streams(&params, &anode_valid, &cathode_valid);

        for decision in &pass.decisions {
            pass.stats.record_decision(decision.outcome);
            let lcts = builder.correlate(
                anode.best(decision.anode_bx),
                anode.second(decision.anode_bx),
                cathode.best(decision.cathode_bx),
                cathode.second(decision.cathode_bx),
                decision.lct_type,
            );
            for lct in lcts {
                match pass.store.insert(lct) {
                    Ok(()) => pass.stats.lcts_stored += 1,
                    Err(rejection) => {
                        pass.stats.record_rejection(rejection);
                        match rejection {
                            StoreError::OutOfTime { bx } if config.verbosity > 0 => warn!(
                                chamber = %chamber,
                                track_number = lct.track_number,
                                bx,
                                "LCT candidate outside the allowed bx range; skipping it"
                            ),
                            StoreError::OutOfTime { .. } => {}
                            StoreError::TrackNumber(rank) => error!(
                                chamber = %chamber,
                                track_number = rank,
                                bx = lct.bx,
                                "LCT candidate with invalid rank; skipping it"
                            ),
                        }
                    }
                }
            }
        }

        if config.verbosity > 0 {
            for lct in pass.store.iter() {
                debug!(chamber = %chamber, "{lct}");
            }
        }

        info!(
            event = "pass_end",
            chamber = %chamber,
            alcts = pass.stats.alcts_found as u64,
            clcts = pass.stats.clcts_found as u64,
            matched = pass.stats.matched as u64,
            single_sided = (pass.stats.driving_only + pass.stats.other_only) as u64,
            lcts = pass.stats.lcts_stored as u64,
        );

        Ok(pass)
    }

    /// All valid LCTs of the pass, in increasing bunch crossing with the
    /// first LCT before the second.
    ///
    /// With `mpc_block_me1a` set, ME1/1 LCTs in the ME1/a strip range are
    /// not reported.
    pub fn lcts(&self, pass: &TmbPass) -> Vec<CorrelatedLct> {
        let block_me1a = self.config.me1a_blocked() && self.chamber.is_me11();
        pass.store
            .iter()
            .filter(|lct| !block_me1a || lct.strip <= MAX_HALF_STRIP_ME1B)
            .copied()
            .collect()
    }

    /// LCTs inside the L1Accept readout window, checked by the validator.
    pub fn readout_lcts(&self, pass: &TmbPass) -> Vec<CorrelatedLct> {
        let all = self.lcts(pass);
        let readout = ReadoutWindow::from_config(&self.config).select(&all);

        let validator = LctValidator::new(self.chamber, &self.config);
        for lct in &readout {
            validator.check(lct);
        }
        readout
    }

    /// Runs a pass and returns its read-out LCTs.
    pub fn run_readout(
        &mut self,
        anode_input: &A::Input,
        cathode_input: &C::Input,
    ) -> Result<Vec<CorrelatedLct>> {
        let pass = self.run(anode_input, cathode_input)?;
        Ok(self.readout_lcts(&pass))
    }
}

/// Validity of the best primitive in every bin, checking that valid
/// primitives sit in the bin they were asked for.
fn best_validity<S, F, const N: usize>(
    source: &S,
    kind: PrimitiveKind,
    valid_bx: F,
) -> Result<[bool; N]>
where
    S: LctSource,
    F: Fn(&S::Lct) -> Option<i32>,
{
    let mut valid = [false; N];
    for (bx, slot) in valid.iter_mut().enumerate() {
        for lct in [source.best(bx), source.second(bx)] {
            if let Some(reported) = valid_bx(&lct) {
                if reported != bx as i32 {
                    return Err(LctForgeError::SourceContract {
                        kind,
                        requested: bx,
                        reported,
                    });
                }
            }
        }
        *slot = valid_bx(&source.best(bx)).is_some();
    }
    Ok(valid)
}

#[cfg(test)]
#[path = "motherboard_tests.rs"]
mod tests;
