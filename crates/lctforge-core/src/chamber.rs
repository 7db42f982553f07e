//! Chamber identity in trigger numbering.

use std::fmt;

use crate::constants::{MAX_TRIGGER_CSC_ID, MIN_TRIGGER_CSC_ID};
use crate::error::{LctForgeError, Result};

/// Trigger labels of the chamber a motherboard serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChamberId {
    pub endcap: u8,
    pub station: u8,
    pub ring: u8,
    pub sector: u8,
    /// Only meaningful in station 1; 0 elsewhere.
    pub subsector: u8,
    pub trigger_csc_id: u8,
}

impl ChamberId {
    /// Creates a chamber id, rejecting labels outside the numbering scheme.
    pub fn new(
        endcap: u8,
        station: u8,
        ring: u8,
        sector: u8,
        subsector: u8,
        trigger_csc_id: u8,
    ) -> Result<Self> {
        let id = Self {
            endcap,
            station,
            ring,
            sector,
            subsector,
            trigger_csc_id,
        };
        if !(1..=2).contains(&endcap) {
            return Err(LctForgeError::InvalidChamber(format!("endcap {endcap} in {id}")));
        }
        if !(1..=4).contains(&station) {
            return Err(LctForgeError::InvalidChamber(format!("station {station} in {id}")));
        }
        if !(1..=4).contains(&ring) || (station > 1 && ring > 2) {
            return Err(LctForgeError::InvalidChamber(format!("ring {ring} in {id}")));
        }
        if !(1..=6).contains(&sector) {
            return Err(LctForgeError::InvalidChamber(format!("sector {sector} in {id}")));
        }
        let subsector_ok = match station {
            1 => (1..=2).contains(&subsector),
            _ => subsector == 0,
        };
        if !subsector_ok {
            return Err(LctForgeError::InvalidChamber(format!(
                "subsector {subsector} in {id}"
            )));
        }
        if !(MIN_TRIGGER_CSC_ID..=MAX_TRIGGER_CSC_ID).contains(&trigger_csc_id) {
            return Err(LctForgeError::InvalidChamber(format!(
                "trigger CSC id {trigger_csc_id} in {id}"
            )));
        }
        Ok(id)
    }

    /// ME1/1 chambers carry both the ME1/b and ME1/a strip ranges.
    pub fn is_me11(&self) -> bool {
        self.station == 1 && self.ring == 1
    }

    /// Chambers that can run the GEM-CSC integrated local trigger.
    pub fn is_gem_capable(&self) -> bool {
        self.ring == 1 && (self.station == 1 || self.station == 2)
    }
}

impl fmt::Display for ChamberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = if self.endcap == 1 { '+' } else { '-' };
        write!(
            f,
            "ME{}{}/{} sector {} subsector {} cscid {}",
            side, self.station, self.ring, self.sector, self.subsector, self.trigger_csc_id
        )
    }
}
