//! Configuration system for lctforge.
//!
//! Load trigger motherboard parameters from TOML or YAML so that firmware
//! settings can be changed without code changes. Every field has a
//! default, so a file only lists what it overrides.
//!
//! # Examples
//!
//! Load configuration from a TOML string:
//!
//! ```
//! use lctforge_config::TmbConfig;
//!
//! let config = TmbConfig::from_toml_str(r#"
//!     match_trig_window_size = 3
//!     clct_to_alct = true
//!     tmb_early_tbins = 4
//! "#).unwrap();
//!
//! assert_eq!(config.match_trig_window_size, 3);
//! assert!(config.clct_to_alct);
//! assert_eq!(config.tmb_l1a_window_size, 7);
//! ```
//!
//! Out-of-range values are reset to their defaults:
//!
//! ```
//! use lctforge_config::TmbConfig;
//!
//! let mut config = TmbConfig::new();
//! config.match_trig_window_size = 40;
//! assert_eq!(config.check_parameters(), 1);
//! assert_eq!(config.match_trig_window_size, 7);
//! ```

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub const DEF_MPC_BLOCK_ME1A: u32 = 1;
pub const DEF_ALCT_TRIG_ENABLE: u32 = 0;
pub const DEF_CLCT_TRIG_ENABLE: u32 = 0;
pub const DEF_MATCH_TRIG_ENABLE: u32 = 1;
pub const DEF_MATCH_TRIG_WINDOW_SIZE: u32 = 7;
pub const DEF_TMB_L1A_WINDOW_SIZE: u32 = 7;

// Exclusive upper bounds of the firmware registers.
const MAX_MPC_BLOCK_ME1A: u32 = 1 << 1;
const MAX_ALCT_TRIG_ENABLE: u32 = 1 << 1;
const MAX_CLCT_TRIG_ENABLE: u32 = 1 << 1;
const MAX_MATCH_TRIG_ENABLE: u32 = 1 << 1;
const MAX_MATCH_TRIG_WINDOW_SIZE: u32 = 1 << 4;
const MAX_TMB_L1A_WINDOW_SIZE: u32 = 1 << 4;

/// Trigger motherboard configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct TmbConfig {
    /// Block LCTs from the ME1/a strip range of ME1/1 chambers.
    pub mpc_block_me1a: u32,

    /// Allow anode-only LCTs.
    pub alct_trig_enable: u32,

    /// Allow cathode-only LCTs.
    pub clct_trig_enable: u32,

    /// Allow matched anode-cathode LCTs.
    pub match_trig_enable: u32,

    /// Anode-cathode match window width, in bunch crossings.
    pub match_trig_window_size: u32,

    /// L1Accept readout window width, in bunch crossings.
    pub tmb_l1a_window_size: u32,

    /// Number of bins before the readout window opens.
    pub tmb_early_tbins: i32,

    /// Do not reuse an ALCT already matched to an earlier CLCT.
    pub tmb_drop_used_alcts: bool,

    /// Do not reuse a CLCT already matched to an earlier ALCT.
    pub tmb_drop_used_clcts: bool,

    /// Iterate over cathode bins and look for anode partners (CLCT-centric).
    pub clct_to_alct: bool,

    /// Offset between the anode and cathode clocks, in bunch crossings.
    pub alct_clct_offset: i32,

    /// Use the Run-3 comparator-code pattern scheme.
    pub use_run3_patterns: bool,

    /// Relay the anode high-multiplicity bits into Run-3 LCTs.
    pub use_high_multiplicity_bits: bool,

    /// Read out only the LCTs of the earliest bin in the readout window.
    pub tmb_readout_earliest_2: bool,

    /// GEM-CSC integrated local trigger in ME1/1.
    pub run_me11_ilt: bool,

    /// GEM-CSC integrated local trigger in ME2/1.
    pub run_me21_ilt: bool,

    /// Diagnostic verbosity; 0 reports only anomalies.
    pub verbosity: i32,
}

impl Default for TmbConfig {
    fn default() -> Self {
        Self {
            mpc_block_me1a: DEF_MPC_BLOCK_ME1A,
            alct_trig_enable: DEF_ALCT_TRIG_ENABLE,
            clct_trig_enable: DEF_CLCT_TRIG_ENABLE,
            match_trig_enable: DEF_MATCH_TRIG_ENABLE,
            match_trig_window_size: DEF_MATCH_TRIG_WINDOW_SIZE,
            tmb_l1a_window_size: DEF_TMB_L1A_WINDOW_SIZE,
            tmb_early_tbins: 4,
            tmb_drop_used_alcts: true,
            tmb_drop_used_clcts: false,
            clct_to_alct: false,
            alct_clct_offset: 1,
            use_run3_patterns: false,
            use_high_multiplicity_bits: false,
            tmb_readout_earliest_2: true,
            run_me11_ilt: false,
            run_me21_ilt: false,
            verbosity: 0,
        }
    }
}

impl TmbConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Serializes the configuration to TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string(self).map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// Sets which stream drives the match.
    pub fn with_clct_to_alct(mut self, clct_to_alct: bool) -> Self {
        self.clct_to_alct = clct_to_alct;
        self
    }

    /// Sets the match window width.
    pub fn with_match_window(mut self, size: u32) -> Self {
        self.match_trig_window_size = size;
        self
    }

    /// Sets the clock offset between the two streams.
    pub fn with_alct_clct_offset(mut self, offset: i32) -> Self {
        self.alct_clct_offset = offset;
        self
    }

    /// Sets the three trigger-enable flags (anode-only, cathode-only, matched).
    pub fn with_trig_enables(mut self, alct: bool, clct: bool, matched: bool) -> Self {
        self.alct_trig_enable = u32::from(alct);
        self.clct_trig_enable = u32::from(clct);
        self.match_trig_enable = u32::from(matched);
        self
    }

    /// Sets the readout window.
    pub fn with_readout_window(mut self, early_tbins: i32, l1a_window_size: u32) -> Self {
        self.tmb_early_tbins = early_tbins;
        self.tmb_l1a_window_size = l1a_window_size;
        self
    }

    pub fn alct_trig_enabled(&self) -> bool {
        self.alct_trig_enable != 0
    }

    pub fn clct_trig_enabled(&self) -> bool {
        self.clct_trig_enable != 0
    }

    pub fn match_trig_enabled(&self) -> bool {
        self.match_trig_enable != 0
    }

    pub fn me1a_blocked(&self) -> bool {
        self.mpc_block_me1a != 0
    }

    /// Resets every register value that does not fit its firmware width to
    /// the documented default. Returns the number of values reset.
    pub fn check_parameters(&mut self) -> usize {
        let mut resets = 0;
        let checks: [(&mut u32, u32, u32, &str); 6] = [
            (
                &mut self.mpc_block_me1a,
                MAX_MPC_BLOCK_ME1A,
                DEF_MPC_BLOCK_ME1A,
                "mpc_block_me1a",
            ),
            (
                &mut self.alct_trig_enable,
                MAX_ALCT_TRIG_ENABLE,
                DEF_ALCT_TRIG_ENABLE,
                "alct_trig_enable",
            ),
            (
                &mut self.clct_trig_enable,
                MAX_CLCT_TRIG_ENABLE,
                DEF_CLCT_TRIG_ENABLE,
                "clct_trig_enable",
            ),
            (
                &mut self.match_trig_enable,
                MAX_MATCH_TRIG_ENABLE,
                DEF_MATCH_TRIG_ENABLE,
                "match_trig_enable",
            ),
            (
                &mut self.match_trig_window_size,
                MAX_MATCH_TRIG_WINDOW_SIZE,
                DEF_MATCH_TRIG_WINDOW_SIZE,
                "match_trig_window_size",
            ),
            (
                &mut self.tmb_l1a_window_size,
                MAX_TMB_L1A_WINDOW_SIZE,
                DEF_TMB_L1A_WINDOW_SIZE,
                "tmb_l1a_window_size",
            ),
        ];
        for (value, max, default, name) in checks {
            if *value >= max {
                warn!(
                    parameter = name,
                    value = *value,
                    max = max - 1,
                    default,
                    "configuration parameter out of range; using default"
                );
                *value = default;
                resets += 1;
            }
        }
        resets
    }
}

impl fmt::Display for TmbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "+".repeat(68);
        writeln!(f, "{rule}")?;
        writeln!(f, "+{:^66}+", "TMB configuration parameters:")?;
        writeln!(f, "{rule}")?;
        writeln!(
            f,
            " mpc_block_me1a [block/not block triggers which come from ME1/A] = {}",
            self.mpc_block_me1a
        )?;
        writeln!(f, " alct_trig_enable [allow ALCT-only triggers] = {}", self.alct_trig_enable)?;
        writeln!(f, " clct_trig_enable [allow CLCT-only triggers] = {}", self.clct_trig_enable)?;
        writeln!(
            f,
            " match_trig_enable [allow matched ALCT-CLCT triggers] = {}",
            self.match_trig_enable
        )?;
        writeln!(
            f,
            " match_trig_window_size [ALCT-CLCT match window width, in 25 ns] = {}",
            self.match_trig_window_size
        )?;
        writeln!(
            f,
            " tmb_l1a_window_size [L1Accept window width, in 25 ns bins] = {}",
            self.tmb_l1a_window_size
        )?;
        writeln!(f, " tmb_early_tbins [bins before the readout window] = {}", self.tmb_early_tbins)?;
        writeln!(f, " clct_to_alct [CLCT-centric matching] = {}", self.clct_to_alct)?;
        writeln!(f, " alct_clct_offset [ALCT-CLCT clock offset] = {}", self.alct_clct_offset)?;
        write!(f, "{rule}")
    }
}
