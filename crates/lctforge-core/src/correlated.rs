//! The correlated LCT output word.

use std::fmt;

use crate::lct::{AnodeLct, CathodeLct};

/// Provenance of a correlated LCT: which primitives formed it and which
/// stream drove the match.
///
/// The discriminants are the codes used by the downstream data format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum LctType {
    /// Matched pair found while iterating cathode bins.
    ClctAlct = 0,
    /// Matched pair found while iterating anode bins.
    #[default]
    AlctClct = 1,
    /// Matched pair confirmed by one GEM pad.
    AlctClctGem = 2,
    /// Matched pair confirmed by a GEM coincidence pad.
    AlctClct2Gem = 3,
    /// Anode primitive matched to a GEM coincidence pad.
    Alct2Gem = 4,
    /// Cathode primitive matched to a GEM coincidence pad.
    Clct2Gem = 5,
    /// Cathode primitive with no anode partner.
    ClctOnly = 6,
    /// Anode primitive with no cathode partner.
    AlctOnly = 7,
}

impl LctType {
    /// Numeric code of this tag.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Whether the tag is only produced by the simulation and never by the
    /// deployed firmware.
    pub fn is_simulation_only(self) -> bool {
        matches!(self, LctType::ClctAlct | LctType::ClctOnly | LctType::AlctOnly)
    }
}

impl fmt::Display for LctType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LctType::ClctAlct => "CLCTALCT",
            LctType::AlctClct => "ALCTCLCT",
            LctType::AlctClctGem => "ALCTCLCTGEM",
            LctType::AlctClct2Gem => "ALCTCLCT2GEM",
            LctType::Alct2Gem => "ALCT2GEM",
            LctType::Clct2Gem => "CLCT2GEM",
            LctType::ClctOnly => "CLCTONLY",
            LctType::AlctOnly => "ALCTONLY",
        };
        write!(f, "{} ({})", name, self.code())
    }
}

/// A correlated LCT: the trigger word the motherboard sends downstream.
///
/// The embedded [`AnodeLct`] and [`CathodeLct`] are the contributing
/// primitives with their bunch crossings moved into the readout frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CorrelatedLct {
    pub valid: bool,
    /// Rank within the bunch crossing, 1 or 2.
    pub track_number: u8,
    /// 4-bit quality code.
    pub quality: u8,
    pub key_wire_group: u16,
    /// Key half-strip.
    pub strip: u16,
    pub quart_strip: bool,
    pub eighth_strip: bool,
    pub pattern: u8,
    pub bend: u8,
    pub bx: i32,
    pub mpc_link: u8,
    pub bx0: u8,
    pub sync_err: u8,
    /// Trigger CSC id of the chamber that produced the LCT.
    pub csc_id: u8,
    pub lct_type: LctType,
    pub run3: bool,
    /// High-multiplicity trigger bits relayed from the anode finder.
    pub hmt: u8,
    pub alct: AnodeLct,
    pub clct: CathodeLct,
}

impl CorrelatedLct {
    /// Returns whether the word holds an LCT.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Key strip at the requested precision: 2 for half-strips, 4 for
    /// quarter-strips, 8 for eighth-strips.
    pub fn strip_at(&self, precision: u8) -> u32 {
        let half = u32::from(self.strip);
        let quart = u32::from(self.quart_strip);
        let eighth = u32::from(self.eighth_strip);
        match precision {
            8 => 4 * half + 2 * quart + eighth,
            4 => 2 * half + quart,
            _ => half,
        }
    }
}

impl fmt::Display for CorrelatedLct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CSC LCT #{}: valid = {}, type = {}, quality = {}, key wire group = {}, \
             half-strip = {}, pattern = {}, bend = {}, bx = {}, cscid = {}, run3 = {}, hmt = {}\n  {}\n  {}",
            self.track_number,
            u8::from(self.valid),
            self.lct_type,
            self.quality,
            self.key_wire_group,
            self.strip,
            self.pattern,
            self.bend,
            self.bx,
            self.csc_id,
            u8::from(self.run3),
            self.hmt,
            self.alct,
            self.clct
        )
    }
}
