//! Tests for the motherboard pass.

use super::*;
use crate::matching::MatchOutcome;
use lctforge_core::LctType;
use lctforge_test::chambers::{me11, me22};
use lctforge_test::{alct, clct, ScriptedAnodeSource, ScriptedCathodeSource};

type Board = Motherboard<ScriptedAnodeSource, ScriptedCathodeSource>;

fn board(config: TmbConfig) -> Board {
    Motherboard::new(
        me22(),
        config,
        ScriptedAnodeSource::new(),
        ScriptedCathodeSource::new(),
    )
}

fn cathode_driven() -> TmbConfig {
    TmbConfig::default().with_clct_to_alct(true)
}

#[test]
fn test_cathode_driven_single_match() {
    let mut tmb = board(cathode_driven().with_alct_clct_offset(0));
    let pass = tmb.run(&[alct(5)], &[clct(6)]).unwrap();

    assert_eq!(pass.stats.matched, 1);
    let lcts = tmb.lcts(&pass);
    assert_eq!(lcts.len(), 1);

    let lct = lcts[0];
    assert_eq!(lct.bx, 5);
    assert_eq!(lct.track_number, 1);
    assert_eq!(lct.lct_type, LctType::ClctAlct);
    assert_eq!(lct.quality, 15);
    assert_eq!(lct.key_wire_group, 20);
    assert_eq!(lct.strip, 40);
    assert_eq!(lct.csc_id, 5);
    assert_eq!(lct.alct.bx, 0);
    assert_eq!(lct.clct.bx, 6);
}

#[test]
fn test_anode_driven_default_registers() {
    let mut tmb = board(TmbConfig::default());
    let pass = tmb.run(&[alct(8)], &[clct(9)]).unwrap();

    let lcts = tmb.lcts(&pass);
    assert_eq!(lcts.len(), 1);
    assert_eq!(lcts[0].bx, 8);
    assert_eq!(lcts[0].lct_type, LctType::AlctClct);

    let validator = LctValidator::new(*tmb.chamber(), tmb.config());
    assert!(validator.violations(&lcts[0]).is_empty());
}

#[test]
fn test_lone_clct_with_single_sided_disabled() {
    let mut tmb = board(cathode_driven());
    let pass = tmb.run(&[], &[clct(4)]).unwrap();

    assert_eq!(pass.stats.clcts_found, 1);
    assert!(pass.decisions.is_empty());
    assert!(tmb.lcts(&pass).is_empty());
}

#[test]
fn test_lone_clct_with_clct_trigger() {
    let config = cathode_driven().with_trig_enables(false, true, true);
    let mut tmb = board(config);
    let pass = tmb.run(&[], &[clct(4)]).unwrap();

    assert_eq!(pass.stats.driving_only, 1);
    let lcts = tmb.lcts(&pass);
    assert_eq!(lcts.len(), 1);
    assert_eq!(lcts[0].bx, 4);
    assert_eq!(lcts[0].quality, 2);
    assert_eq!(lcts[0].lct_type, LctType::ClctOnly);
    assert_eq!(lcts[0].key_wire_group, 0);
}

#[test]
fn test_stale_clct_promoted_in_anode_driven_mode() {
    let config = TmbConfig::default().with_trig_enables(false, true, true);
    let mut tmb = board(config);
    let pass = tmb.run(&[], &[clct(2)]).unwrap();

    assert_eq!(pass.decisions.len(), 1);
    assert_eq!(pass.decisions[0].outcome, MatchOutcome::OtherOnly);
    assert_eq!(pass.decisions[0].anode_bx, 5);
    assert_eq!(pass.decisions[0].cathode_bx, 2);

    let lcts = tmb.lcts(&pass);
    assert_eq!(lcts.len(), 1);
    assert_eq!(lcts[0].bx, 2);
    assert_eq!(lcts[0].lct_type, LctType::ClctOnly);
}

#[test]
fn test_two_lcts_in_one_bin() {
    let mut tmb = board(TmbConfig::default());
    let second = AnodeLct::new(2, 30, 7);
    let pass = tmb.run(&[alct(7), second], &[clct(7)]).unwrap();

    let lcts = tmb.lcts(&pass);
    assert_eq!(lcts.len(), 2);
    assert_eq!(lcts[0].track_number, 1);
    assert_eq!(lcts[0].key_wire_group, 20);
    assert_eq!(lcts[1].track_number, 2);
    assert_eq!(lcts[1].key_wire_group, 30);
    assert_eq!(pass.store.first(7).key_wire_group, 20);
    assert_eq!(pass.store.second(7).key_wire_group, 30);
}

#[test]
fn test_readout_keeps_earliest_bin() {
    let mut tmb = board(TmbConfig::default());
    let pass = tmb
        .run(&[alct(6), alct(9)], &[clct(6), clct(9)])
        .unwrap();

    let bxs: Vec<i32> = tmb.lcts(&pass).iter().map(|l| l.bx).collect();
    assert_eq!(bxs, vec![6, 9]);

    let readout: Vec<i32> = tmb.readout_lcts(&pass).iter().map(|l| l.bx).collect();
    assert_eq!(readout, vec![6]);
}

#[test]
fn test_readout_all_in_window() {
    let mut config = TmbConfig::default();
    config.tmb_readout_earliest_2 = false;
    let mut tmb = board(config);

    let readout = tmb
        .run_readout(&[alct(2), alct(6), alct(9)], &[clct(2), clct(6), clct(9)])
        .unwrap();
    let bxs: Vec<i32> = readout.iter().map(|l| l.bx).collect();
    assert_eq!(bxs, vec![6, 9]);
}

#[test]
fn test_missing_sources_give_empty_pass() {
    let mut tmb = Board::without_sources(me22(), TmbConfig::default());
    let pass = tmb.run(&[alct(5)], &[clct(5)]).unwrap();

    assert!(pass.alcts.is_empty());
    assert!(pass.store.is_empty());
    assert!(tmb.lcts(&pass).is_empty());
}

#[test]
fn test_sources_attached_later() {
    let mut tmb = Board::without_sources(me22(), TmbConfig::default());
    tmb.set_anode_source(ScriptedAnodeSource::new());
    tmb.set_cathode_source(ScriptedCathodeSource::new());

    let pass = tmb.run(&[alct(8)], &[clct(8)]).unwrap();
    assert_eq!(tmb.lcts(&pass).len(), 1);
}

#[test]
fn test_empty_input_clears_sources() {
    let mut tmb = board(TmbConfig::default());
    let pass = tmb.run(&[], &[]).unwrap();

    assert!(pass.decisions.is_empty());
    assert_eq!(pass.stats, PassStatistics::default());
    let anode = tmb.anode_source().unwrap();
    assert_eq!(anode.clears, 1);
    assert_eq!(anode.runs, 1);
}

#[test]
fn test_passes_do_not_leak() {
    let mut tmb = board(TmbConfig::default());
    let first = tmb.run(&[alct(5)], &[clct(5)]).unwrap();
    let second = tmb.run(&[alct(10)], &[clct(10)]).unwrap();

    let first_bxs: Vec<i32> = tmb.lcts(&first).iter().map(|l| l.bx).collect();
    let second_bxs: Vec<i32> = tmb.lcts(&second).iter().map(|l| l.bx).collect();
    assert_eq!(first_bxs, vec![5]);
    assert_eq!(second_bxs, vec![10]);
}

#[test]
fn test_high_multiplicity_bits_relayed() {
    let mut config = TmbConfig::default();
    config.use_run3_patterns = true;
    config.use_high_multiplicity_bits = true;
    let mut tmb = Motherboard::new(
        me22(),
        config,
        ScriptedAnodeSource::new().with_high_multiplicity_bits(2),
        ScriptedCathodeSource::new(),
    );
    let pass = tmb.run(&[alct(8)], &[clct(8)]).unwrap();

    assert_eq!(pass.high_multiplicity_bits, 2);
    let lct = tmb.lcts(&pass)[0];
    assert!(lct.run3);
    assert_eq!(lct.hmt, 2);
    assert_eq!(lct.pattern, 0);
}

#[test]
fn test_me1a_lcts_blocked() {
    let me1a = CathodeLct::new(6, 10, 130, 8);
    let me1b = CathodeLct::new(6, 10, 100, 8);

    let mut tmb = Motherboard::new(
        me11(),
        TmbConfig::default(),
        ScriptedAnodeSource::new(),
        ScriptedCathodeSource::new(),
    );
    let pass = tmb.run(&[alct(8)], &[me1a]).unwrap();
    assert_eq!(pass.store.len(), 1);
    assert!(tmb.lcts(&pass).is_empty());

    let pass = tmb.run(&[alct(8)], &[me1b]).unwrap();
    assert_eq!(tmb.lcts(&pass).len(), 1);

    let mut config = TmbConfig::default();
    config.mpc_block_me1a = 0;
    tmb.set_config(config);
    let pass = tmb.run(&[alct(8)], &[me1a]).unwrap();
    assert_eq!(tmb.lcts(&pass).len(), 1);
}

#[test]
fn test_me1a_block_ignored_outside_me11() {
    let mut tmb = board(TmbConfig::default());
    let pass = tmb
        .run(&[alct(8)], &[CathodeLct::new(6, 10, 150, 8)])
        .unwrap();
    assert_eq!(tmb.lcts(&pass).len(), 1);
}

#[test]
fn test_out_of_range_registers_reset() {
    let config = TmbConfig::default().with_match_window(20);
    let tmb = board(config);
    assert_eq!(tmb.config().match_trig_window_size, 7);
}

#[test]
fn test_missing_config_file() {
    let result = Board::from_config_file(
        me22(),
        "/nonexistent/lctforge/tmb.toml",
        ScriptedAnodeSource::new(),
        ScriptedCathodeSource::new(),
    );
    assert!(matches!(result, Err(LctForgeError::Config(_))));
}

#[test]
fn test_dump_config_params() {
    let tmb = board(TmbConfig::default());
    let dump = tmb.dump_config_params();
    assert!(dump.contains("TMB configuration parameters:"));
}

/// Anode source that files every primitive one bin late.
#[derive(Default)]
struct MisfiledAnodeSource {
    inner: ScriptedAnodeSource,
}

impl LctSource for MisfiledAnodeSource {
    type Input = [AnodeLct];
    type Lct = AnodeLct;

    fn run(&mut self, input: &[AnodeLct]) -> Vec<AnodeLct> {
        self.inner.run(input)
    }

    fn best(&self, bx: usize) -> AnodeLct {
        match bx.checked_sub(1) {
            Some(earlier) => self.inner.best(earlier),
            None => AnodeLct::default(),
        }
    }

    fn second(&self, bx: usize) -> AnodeLct {
        match bx.checked_sub(1) {
            Some(earlier) => self.inner.second(earlier),
            None => AnodeLct::default(),
        }
    }
}

#[test]
fn test_source_contract_violation() {
    let mut tmb = Motherboard::new(
        me22(),
        TmbConfig::default(),
        MisfiledAnodeSource::default(),
        ScriptedCathodeSource::new(),
    );
    let err = tmb.run(&[alct(3)], &[clct(3)]).unwrap_err();

    assert!(matches!(
        err,
        LctForgeError::SourceContract {
            kind: PrimitiveKind::Anode,
            requested: 4,
            reported: 3,
        }
    ));
}

#[test]
fn test_debug_omits_sources() {
    let tmb = board(TmbConfig::default());
    let debug = format!("{tmb:?}");
    assert!(debug.contains("has_anode_source: true"));
}

#[test]
fn test_extreme_registers_do_not_overflow() {
    let config = TmbConfig::from_toml_str(
        r#"
        tmb_early_tbins = 2147483647
        alct_clct_offset = -2147483648
        "#,
    )
    .unwrap();
    let mut tmb = board(config);

    let readout = tmb.run_readout(&[alct(8)], &[clct(8)]).unwrap();
    assert!(readout.is_empty());

    let pass = tmb.run(&[alct(8)], &[clct(8)]).unwrap();
    assert_eq!(pass.stats.matched, 0);
}
