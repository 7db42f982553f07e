//! Shared test fixtures for lctforge crates.
//!
//! - [`scripted`] - Primitive sources that replay a scripted list of primitives
//! - [`random`] - Seeded random primitive streams
//! - [`chambers`] - Chamber identities used across the test suites
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! lctforge-test = { workspace = true }
//! ```
//!
//! ```ignore
//! use lctforge_test::{alct, clct, ScriptedAnodeSource, ScriptedCathodeSource};
//!
//! let mut anode = ScriptedAnodeSource::new();
//! let alcts = anode.run(&[alct(5)]);
//! ```

pub mod chambers;
pub mod random;
pub mod scripted;

pub use random::PrimitiveGenerator;
pub use scripted::{
    alct, clct, ScriptedAnodeSource, ScriptedCathodeSource, ScriptedPrimitive, ScriptedSource,
};
