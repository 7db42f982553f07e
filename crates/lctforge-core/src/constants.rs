//! Buffer-depth and numbering constants of the trigger electronics.

/// Number of time bins in the anode primitive buffer.
pub const MAX_ALCT_TBINS: usize = 16;

/// Number of time bins in the cathode primitive buffer.
pub const MAX_CLCT_TBINS: usize = 16;

/// Number of time bins in the correlated LCT buffer.
pub const MAX_LCT_TBINS: usize = 16;

/// Bunch crossing at which in-time primitives are reported by the finders.
pub const LCT_CENTRAL_BX: i32 = 8;

/// Highest key half-strip belonging to ME1/b; anything above is ME1/a.
pub const MAX_HALF_STRIP_ME1B: u16 = 127;

/// Size of the per-pass reuse mask. Larger than the buffer depth so that
/// a shifted match window never indexes past it.
pub const REUSE_MASK_BINS: usize = 20;

/// Highest correlated LCT quality code.
pub const LCT_MAX_QUALITY: u8 = 15;

/// Lowest trigger CSC id within a sector.
pub const MIN_TRIGGER_CSC_ID: u8 = 1;

/// Highest trigger CSC id within a sector.
pub const MAX_TRIGGER_CSC_ID: u8 = 9;

/// Width of the LCT pattern field in bits.
pub const PATTERN_BIT_WIDTH: u32 = 4;
