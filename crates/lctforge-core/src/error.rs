//! Error types for lctforge

use std::fmt;

use thiserror::Error;

/// Which upstream stream a primitive came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PrimitiveKind {
    /// Anode (wire-group) primitive.
    Anode,
    /// Cathode (strip) primitive.
    Cathode,
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrimitiveKind::Anode => write!(f, "ALCT"),
            PrimitiveKind::Cathode => write!(f, "CLCT"),
        }
    }
}

/// Main error type for lctforge operations
#[derive(Debug, Error)]
pub enum LctForgeError {
    /// Chamber labels outside the trigger numbering scheme
    #[error("Invalid chamber: {0}")]
    InvalidChamber(String),

    /// A primitive source reported a valid primitive for a bin other than
    /// the one it was asked for
    #[error("{kind} source contract violated: asked for bx {requested}, got a valid primitive at bx {reported}")]
    SourceContract {
        kind: PrimitiveKind,
        requested: usize,
        reported: i32,
    },

    /// Error in motherboard configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for lctforge operations
pub type Result<T> = std::result::Result<T, LctForgeError>;
