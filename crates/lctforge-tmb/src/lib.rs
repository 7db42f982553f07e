//! Trigger motherboard emulation.
//!
//! A [`Motherboard`] takes the per-bin best and second-best anode (ALCT)
//! and cathode (CLCT) primitives of one chamber, matches them in time and
//! builds up to two correlated LCTs per bunch crossing:
//!
//! 1. [`matching`] walks the driving stream and picks a partner bin inside
//!    the match window.
//! 2. [`correlate`] turns each decision into LCT words with quality,
//!    pattern and bunch-crossing fields.
//! 3. [`store`] keeps the first and second LCT per bunch crossing.
//! 4. [`readout`] selects the LCTs inside the L1Accept window and
//!    [`validate`] checks them.

pub mod correlate;
pub mod matching;
pub mod motherboard;
pub mod readout;
pub mod stats;
pub mod store;
pub mod validate;

pub use correlate::{encode_pattern, find_quality, LctBuilder, LctPair};
pub use matching::{match_streams, MatchDecision, MatchDirection, MatchOutcome, MatchParams};
pub use motherboard::{Motherboard, TmbPass};
pub use readout::ReadoutWindow;
pub use stats::PassStatistics;
pub use store::{LctStore, StoreError};
pub use validate::{LctValidator, LctViolation};
