//! Chamber identities.

use lctforge_core::ChamberId;

/// ME+2/2, trigger CSC id 5. No GEMs, 160 half-strips, 64 wire groups.
pub fn me22() -> ChamberId {
    chamber(1, 2, 2, 3, 0, 5)
}

/// ME+1/1, trigger CSC id 2. GEM-capable, covers ME1/a and ME1/b.
pub fn me11() -> ChamberId {
    chamber(1, 1, 1, 3, 1, 2)
}

/// ME-3/1, trigger CSC id 1.
pub fn me31() -> ChamberId {
    chamber(2, 3, 1, 6, 0, 1)
}

fn chamber(
    endcap: u8,
    station: u8,
    ring: u8,
    sector: u8,
    subsector: u8,
    trigger_csc_id: u8,
) -> ChamberId {
    ChamberId::new(endcap, station, ring, sector, subsector, trigger_csc_id)
        .expect("fixture chamber must be valid")
}
