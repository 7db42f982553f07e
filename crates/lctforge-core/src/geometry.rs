//! Per-station limits used to range-check correlated LCT fields.
//!
//! Counts are per chamber. ME1/1 is treated as one chamber covering both
//! the ME1/b and ME1/a strip ranges.

/// Number of key half-strips in a chamber of the given station and ring.
pub fn max_half_strip(station: u8, ring: u8) -> u32 {
    match (station, ring) {
        (1, 1) => 224,
        (1, 2) => 160,
        (1, 3) => 128,
        (1, 4) => 96,
        (2..=4, 1) => 160,
        (2..=4, 2) => 160,
        _ => 0,
    }
}

/// Number of key quarter-strips.
pub fn max_quart_strip(station: u8, ring: u8) -> u32 {
    2 * max_half_strip(station, ring)
}

/// Number of key eighth-strips.
pub fn max_eighth_strip(station: u8, ring: u8) -> u32 {
    4 * max_half_strip(station, ring)
}

/// Number of wire groups.
pub fn max_wire_group(station: u8, ring: u8) -> u32 {
    match (station, ring) {
        (1, 1) | (1, 4) => 48,
        (1, 2) => 64,
        (1, 3) => 32,
        (2, 1) => 112,
        (3..=4, 1) => 96,
        (2..=4, 2) => 64,
        _ => 0,
    }
}

/// Inclusive range of LCT pattern codes for the active pattern scheme.
pub fn min_max_pattern(run3_patterns: bool) -> (u8, u8) {
    if run3_patterns {
        (0, 4)
    } else {
        (2, 10)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_me11_covers_me1a() {
        assert!(max_half_strip(1, 1) > u32::from(crate::constants::MAX_HALF_STRIP_ME1B));
        assert_eq!(max_quart_strip(1, 1), 448);
        assert_eq!(max_eighth_strip(1, 1), 896);
    }

    #[test]
    fn test_wire_groups() {
        assert_eq!(max_wire_group(2, 1), 112);
        assert_eq!(max_wire_group(4, 1), 96);
        assert_eq!(max_wire_group(3, 2), 64);
        assert_eq!(max_wire_group(5, 1), 0);
    }

    #[test]
    fn test_pattern_ranges() {
        assert_eq!(min_max_pattern(false), (2, 10));
        assert_eq!(min_max_pattern(true), (0, 4));
    }
}
