//! lctforge - CSC trigger motherboard emulation in Rust
//!
//! Wire an anode and a cathode primitive finder into a [`Motherboard`],
//! run it once per event and read out the correlated LCTs.
//!
//! # Example
//!
//! ```rust
//! use lctforge::prelude::*;
//!
//! let config = TmbConfig::default().with_clct_to_alct(true);
//! assert!(config.match_trig_enabled());
//!
//! let chamber = ChamberId::new(1, 2, 2, 3, 0, 5).unwrap();
//! assert!(!chamber.is_me11());
//! ```

pub use lctforge_config::{ConfigError, TmbConfig};
pub use lctforge_core::{
    constants, geometry, AnodeLct, CathodeLct, ChamberId, CorrelatedLct, LctForgeError, LctSource,
    LctType, PrimitiveKind, Result,
};
pub use lctforge_tmb::{
    LctStore, LctValidator, LctViolation, MatchDirection, Motherboard, PassStatistics,
    ReadoutWindow, TmbPass,
};

#[cfg(feature = "console")]
pub mod console;

pub mod prelude {
    pub use super::{
        AnodeLct, CathodeLct, ChamberId, CorrelatedLct, LctSource, LctType, Motherboard,
        TmbConfig, TmbPass,
    };
}
