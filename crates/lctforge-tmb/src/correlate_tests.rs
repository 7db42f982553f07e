//! Tests for LCT construction.

use super::*;

fn builder(config: &TmbConfig) -> LctBuilder {
    LctBuilder::new(config, 4)
}

fn good_alct(bx: i32) -> AnodeLct {
    AnodeLct::new(2, 20, bx)
}

fn good_clct(bx: i32) -> CathodeLct {
    CathodeLct::new(6, 10, 70, bx).with_bend(1)
}

#[test]
fn test_matched_pair_fields() {
    let config = TmbConfig::new();
    let lct = builder(&config).construct(&good_alct(8), &good_clct(9), LctType::AlctClct, 1);

    assert!(lct.is_valid());
    assert_eq!(lct.track_number, 1);
    assert_eq!(lct.quality, 15);
    assert_eq!(lct.key_wire_group, 20);
    assert_eq!(lct.strip, 70);
    assert_eq!(lct.pattern, 10);
    assert_eq!(lct.bend, 1);
    assert_eq!(lct.bx, 8);
    assert_eq!(lct.sync_err, 0);
    assert_eq!(lct.csc_id, 4);
    assert_eq!(lct.lct_type, LctType::AlctClct);
    assert!(!lct.run3);
}

#[test]
fn test_bx_taken_from_cathode_without_anode() {
    let config = TmbConfig::new();
    let lct = builder(&config).construct(
        &AnodeLct::default(),
        &good_clct(9),
        LctType::ClctOnly,
        1,
    );
    assert_eq!(lct.bx, 9);
    assert_eq!(lct.quality, 2);
}

#[test]
fn test_embedded_primitives_are_shifted() {
    let config = TmbConfig::new()
        .with_readout_window(4, 7)
        .with_alct_clct_offset(1);
    let lct = builder(&config).construct(&good_alct(8), &good_clct(8), LctType::AlctClct, 1);

    // 8 - (8 - 7/2) and 8 - 1
    assert_eq!(lct.alct.bx, 3);
    assert_eq!(lct.clct.bx, 7);
    // The word itself keeps the unshifted anode bunch crossing.
    assert_eq!(lct.bx, 8);
}

#[test]
fn test_extreme_clock_offset_saturates() {
    let config = TmbConfig::new().with_alct_clct_offset(i32::MIN);
    let lct = builder(&config).construct(&good_alct(8), &good_clct(8), LctType::AlctClct, 1);
    assert_eq!(lct.clct.bx, i32::MAX);
    assert_eq!(lct.bx, 8);

    let config = TmbConfig::new().with_alct_clct_offset(i32::MAX);
    let lct = builder(&config).construct(&good_alct(8), &good_clct(8), LctType::AlctClct, 1);
    assert_eq!(lct.clct.bx, 8 - i32::MAX);
}

#[test]
fn test_run3_word() {
    let mut config = TmbConfig::new();
    config.use_run3_patterns = true;
    let lct = builder(&config)
        .with_high_multiplicity_bits(3)
        .construct(&good_alct(8), &good_clct(8), LctType::AlctClct, 1);
    assert!(lct.run3);
    assert_eq!(lct.pattern, 0);
    assert_eq!(lct.hmt, 0);

    config.use_high_multiplicity_bits = true;
    let lct = builder(&config)
        .with_high_multiplicity_bits(3)
        .construct(&good_alct(8), &good_clct(8), LctType::AlctClct, 1);
    assert_eq!(lct.hmt, 3);
}

#[test]
fn test_hmt_bits_ignored_in_run2() {
    let mut config = TmbConfig::new();
    config.use_high_multiplicity_bits = true;
    let lct = builder(&config)
        .with_high_multiplicity_bits(3)
        .construct(&good_alct(8), &good_clct(8), LctType::AlctClct, 1);
    assert!(!lct.run3);
    assert_eq!(lct.hmt, 0);
}

#[test]
fn test_encode_pattern() {
    assert_eq!(encode_pattern(10), 10);
    assert_eq!(encode_pattern(-3), 3);
    assert_eq!(encode_pattern(17), 1);
    assert_eq!(encode_pattern(0), 0);
}

#[test]
fn test_correlate_single_primitives_gives_one_lct() {
    let config = TmbConfig::new();
    let lcts = builder(&config).correlate(
        good_alct(8),
        AnodeLct::default(),
        good_clct(8),
        CathodeLct::default(),
        LctType::AlctClct,
    );
    assert_eq!(lcts.len(), 1);
    assert_eq!(lcts[0].track_number, 1);
}

#[test]
fn test_correlate_second_only_is_promoted() {
    let config = TmbConfig::new();
    let lcts = builder(&config).correlate(
        AnodeLct::default(),
        good_alct(8),
        good_clct(8),
        CathodeLct::default(),
        LctType::AlctClct,
    );
    assert_eq!(lcts.len(), 1);
    assert_eq!(lcts[0].key_wire_group, 20);
}

#[test]
fn test_correlate_two_lcts() {
    let config = TmbConfig::new();
    let second_clct = CathodeLct::new(4, 6, 30, 8);
    let lcts = builder(&config).correlate(
        good_alct(8),
        AnodeLct::default(),
        good_clct(8),
        second_clct,
        LctType::AlctClct,
    );
    assert_eq!(lcts.len(), 2);
    assert_eq!(lcts[0].track_number, 1);
    assert_eq!(lcts[0].strip, 70);
    assert_eq!(lcts[1].track_number, 2);
    assert_eq!(lcts[1].strip, 30);
    // The single anode pairs with both cathodes.
    assert_eq!(lcts[1].key_wire_group, 20);
    assert_eq!(lcts[1].quality, 13);
}

#[test]
fn test_correlate_requires_enable() {
    // Default registers only allow matched pairs.
    let config = TmbConfig::new();
    let lcts = builder(&config).correlate(
        good_alct(8),
        AnodeLct::default(),
        CathodeLct::default(),
        CathodeLct::default(),
        LctType::AlctOnly,
    );
    assert!(lcts.is_empty());

    let config = TmbConfig::new().with_trig_enables(true, false, true);
    let lcts = builder(&config).correlate(
        good_alct(8),
        AnodeLct::default(),
        CathodeLct::default(),
        CathodeLct::default(),
        LctType::AlctOnly,
    );
    assert_eq!(lcts.len(), 1);
    assert_eq!(lcts[0].quality, 1);
    assert_eq!(lcts[0].lct_type, LctType::AlctOnly);
}

#[test]
fn test_correlate_nothing_valid() {
    let config = TmbConfig::new().with_trig_enables(true, true, true);
    let lcts = builder(&config).correlate(
        AnodeLct::default(),
        AnodeLct::default(),
        CathodeLct::default(),
        CathodeLct::default(),
        LctType::AlctClct,
    );
    assert!(lcts.is_empty());
}

#[test]
fn test_quality_layer_trigger() {
    let alct = good_alct(8);
    let clct = CathodeLct::new(6, 1, 10, 8);
    assert_eq!(find_quality(&alct, &clct, 0), 3);
}

#[test]
fn test_quality_accelerator() {
    let alct = good_alct(8).with_accelerator(true);
    assert_eq!(find_quality(&alct, &good_clct(8), 0), 8);
}

#[test]
fn test_quality_unexpected_pattern() {
    let clct = CathodeLct::new(6, 12, 10, 8);
    assert_eq!(find_quality(&good_alct(8), &clct, 0), 0);
}

/// Reference table written out case by case.
fn expected_quality(
    alct_valid: bool,
    clct_valid: bool,
    pattern: u8,
    alct_quality: u8,
    clct_quality: u8,
    accelerator: bool,
) -> u8 {
    if !alct_valid && !clct_valid {
        return 0;
    }
    if alct_valid && !clct_valid {
        return 1;
    }
    if !alct_valid {
        return 2;
    }
    if pattern == 1 {
        return 3;
    }
    let a4 = alct_quality >= 1;
    let c4 = clct_quality >= 4;
    if !a4 && !c4 {
        5
    } else if a4 && !c4 {
        6
    } else if !a4 {
        7
    } else if accelerator {
        8
    } else {
        match pattern {
            2 | 3 => 11,
            4 | 5 => 12,
            6 | 7 => 13,
            8 | 9 => 14,
            10 => 15,
            _ => 0,
        }
    }
}

#[test]
fn test_quality_table_exhaustive() {
    const ALLOWED: [u8; 13] = [0, 1, 2, 3, 5, 6, 7, 8, 11, 12, 13, 14, 15];

    for alct_valid in [false, true] {
        for clct_valid in [false, true] {
            for pattern in 0..=15u8 {
                for alct_quality in 0..=3u8 {
                    for clct_quality in 0..=6u8 {
                        for accelerator in [false, true] {
                            let alct = AnodeLct {
                                valid: alct_valid,
                                quality: alct_quality,
                                accelerator,
                                ..Default::default()
                            };
                            let clct = CathodeLct {
                                valid: clct_valid,
                                quality: clct_quality,
                                pattern,
                                ..Default::default()
                            };
                            let quality = find_quality(&alct, &clct, -1);
                            assert!(ALLOWED.contains(&quality));
                            assert_eq!(
                                quality,
                                expected_quality(
                                    alct_valid,
                                    clct_valid,
                                    pattern,
                                    alct_quality,
                                    clct_quality,
                                    accelerator
                                ),
                                "alct {alct:?} clct {clct:?}"
                            );
                        }
                    }
                }
            }
        }
    }
}
