//! Anode and cathode trigger primitives.
//!
//! Both primitive kinds are plain value types produced by the upstream
//! finders. An invalid primitive is represented by `valid == false`; the
//! `Default` value of either type is such an empty slot.

use std::fmt;

/// Anode local charged track: a wire-group pattern found by the ALCT finder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnodeLct {
    /// Whether this slot holds a primitive at all.
    pub valid: bool,
    /// Number of layers hit minus three (0..=3).
    pub quality: u8,
    /// Accelerator-muon pattern (parallel to the beam) instead of collision.
    pub accelerator: bool,
    /// Collision pattern variant.
    pub collision_b: u8,
    /// Key wire group.
    pub key_wire_group: u16,
    /// Bunch crossing of the primitive.
    pub bx: i32,
}

impl AnodeLct {
    /// Creates a valid anode primitive.
    pub fn new(quality: u8, key_wire_group: u16, bx: i32) -> Self {
        Self {
            valid: true,
            quality,
            accelerator: false,
            collision_b: 1,
            key_wire_group,
            bx,
        }
    }

    /// Marks the primitive as an accelerator-muon candidate.
    pub fn with_accelerator(mut self, accelerator: bool) -> Self {
        self.accelerator = accelerator;
        self
    }

    /// Returns whether the slot holds a primitive.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Returns a copy with the bunch crossing moved by `delta`.
    pub fn shifted(&self, delta: i32) -> Self {
        Self {
            bx: self.bx.saturating_add(delta),
            ..*self
        }
    }
}

impl fmt::Display for AnodeLct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.valid {
            return write!(f, "ALCT [invalid]");
        }
        write!(
            f,
            "ALCT quality = {}, accel = {}, collB = {}, key wire group = {}, bx = {}",
            self.quality,
            u8::from(self.accelerator),
            self.collision_b,
            self.key_wire_group,
            self.bx
        )
    }
}

/// Cathode local charged track: a comparator pattern found by the CLCT finder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CathodeLct {
    /// Whether this slot holds a primitive at all.
    pub valid: bool,
    /// Number of layers hit (0..=6).
    pub quality: u8,
    /// Pattern id. Pattern 1 is the layer trigger.
    pub pattern: u8,
    /// 1 for half-strip patterns, 0 for di-strip patterns.
    pub strip_type: u8,
    /// Bending direction, 0 = left, 1 = right.
    pub bend: u8,
    /// Key half-strip across the whole chamber.
    pub key_half_strip: u16,
    /// Bunch crossing of the primitive.
    pub bx: i32,
}

impl CathodeLct {
    /// Creates a valid half-strip cathode primitive.
    pub fn new(quality: u8, pattern: u8, key_half_strip: u16, bx: i32) -> Self {
        Self {
            valid: true,
            quality,
            pattern,
            strip_type: 1,
            bend: 0,
            key_half_strip,
            bx,
        }
    }

    /// Sets the bending direction.
    pub fn with_bend(mut self, bend: u8) -> Self {
        self.bend = bend;
        self
    }

    /// Returns whether the slot holds a primitive.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Returns a copy with the bunch crossing moved by `delta`.
    pub fn shifted(&self, delta: i32) -> Self {
        Self {
            bx: self.bx.saturating_add(delta),
            ..*self
        }
    }
}

impl fmt::Display for CathodeLct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.valid {
            return write!(f, "CLCT [invalid]");
        }
        write!(
            f,
            "CLCT quality = {}, pattern = {}, strip type = {}, bend = {}, key half-strip = {}, bx = {}",
            self.quality, self.pattern, self.strip_type, self.bend, self.key_half_strip, self.bx
        )
    }
}
