//! Driver errors.

use crate::types::Channel;

/// Which configuration check failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigIssue {
    /// A channel has no pin assigned.
    UnassignedPin(Channel),

    /// Wiring polarity is missing or not a known wiring code.
    InvalidPolarity,
}

/// Errors reported by [`RgbLed::init`](crate::RgbLed::init).
///
/// Only initialization can fail. Every other operation on an uninitialized
/// driver is a silent no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RgbLedError {
    /// Pin assignment or polarity is invalid.
    InvalidConfiguration(ConfigIssue),
}

impl From<ConfigIssue> for RgbLedError {
    fn from(issue: ConfigIssue) -> Self {
        RgbLedError::InvalidConfiguration(issue)
    }
}

impl core::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigIssue::UnassignedPin(channel) => {
                write!(f, "{:?} channel has no pin assigned", channel)
            }
            ConfigIssue::InvalidPolarity => {
                write!(f, "wiring polarity is not set or not valid")
            }
        }
    }
}

impl core::fmt::Display for RgbLedError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            RgbLedError::InvalidConfiguration(issue) => {
                write!(f, "invalid configuration: {}", issue)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for RgbLedError {}
