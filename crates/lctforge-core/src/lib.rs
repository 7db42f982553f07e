//! lctforge Core - Trigger primitive types and traits
//!
//! This crate provides the fundamental abstractions shared by the
//! trigger motherboard emulation:
//! - Anode and cathode trigger primitives (ALCTs and CLCTs)
//! - The correlated LCT output word and its provenance tag
//! - Chamber identity and per-station geometry limits
//! - The [`LctSource`] trait implemented by upstream primitive finders

pub mod chamber;
pub mod constants;
pub mod correlated;
pub mod error;
pub mod geometry;
pub mod lct;
pub mod source;

pub use chamber::ChamberId;
pub use correlated::{CorrelatedLct, LctType};
pub use error::{LctForgeError, PrimitiveKind, Result};
pub use lct::{AnodeLct, CathodeLct};
pub use source::LctSource;
