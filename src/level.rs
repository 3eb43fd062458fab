use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Intensity knob for every transformation stage.
///
/// Construct with [`ChaosLevel::new`] (rejects values outside `1..=10`) or
/// [`ChaosLevel::clamped`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ChaosLevel(u8);

impl ChaosLevel {
    /// Lowest accepted level.
    pub const MIN: Self = Self(1);

    /// Highest accepted level.
    pub const MAX: Self = Self(10);

    /// Level used when none is given.
    pub const DEFAULT: Self = Self(7);

    /// Creates a validated chaos level.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidChaosLevel`] if `level` is not in `1..=10`.
    pub fn new(level: u8) -> Result<Self> {
        if level < Self::MIN.0 || level > Self::MAX.0 {
            return Err(Error::invalid_chaos_level(level));
        }
        Ok(Self(level))
    }

    /// Creates a chaos level, clamping `level` into `1..=10`.
    #[must_use]
    pub fn clamped(level: u8) -> Self {
        Self(level.clamp(Self::MIN.0, Self::MAX.0))
    }

    /// Returns the raw level.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl Default for ChaosLevel {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u8> for ChaosLevel {
    type Error = Error;

    fn try_from(level: u8) -> Result<Self> {
        Self::new(level)
    }
}

impl From<ChaosLevel> for u8 {
    fn from(level: ChaosLevel) -> Self {
        level.0
    }
}

impl fmt::Display for ChaosLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
