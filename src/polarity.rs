//! Mapping from logical channel intent to electrical output.
//!
//! Callers reason about "channel lit" or "channel intensity". [`PolarityMapper`]
//! turns that into the pin level or duty cycle the wiring actually needs.

use crate::error::ConfigIssue;
use crate::pins::Level;

/// Wiring convention of the LED.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// A low pin lights the channel (common anode).
    ActiveLow,
    /// A high pin lights the channel (common cathode).
    ActiveHigh,
}

impl Polarity {
    /// Common pin tied to VCC.
    pub const COMMON_ANODE: Polarity = Polarity::ActiveLow;

    /// Common pin tied to GND.
    pub const COMMON_CATHODE: Polarity = Polarity::ActiveHigh;

    /// Wiring code for a common-cathode LED.
    pub const CODE_COMMON_CATHODE: u8 = 0;

    /// Wiring code for a common-anode LED.
    pub const CODE_COMMON_ANODE: u8 = 1;

    /// Pin level that lights a channel.
    #[inline]
    pub const fn on_level(self) -> Level {
        match self {
            Polarity::ActiveHigh => Level::High,
            Polarity::ActiveLow => Level::Low,
        }
    }
}

impl TryFrom<u8> for Polarity {
    type Error = ConfigIssue;

    /// Converts a numeric common-mode wiring code.
    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            Polarity::CODE_COMMON_CATHODE => Ok(Polarity::COMMON_CATHODE),
            Polarity::CODE_COMMON_ANODE => Ok(Polarity::COMMON_ANODE),
            _ => Err(ConfigIssue::InvalidPolarity),
        }
    }
}

/// Scales an 8-bit intensity by an 8-bit brightness (255 = unchanged).
#[inline]
pub const fn scale_intensity(intensity: u8, brightness: u8) -> u8 {
    // 255 * 255 / 255 fits in u8, the product needs u16
    ((intensity as u16 * brightness as u16) / 255) as u8
}

/// Electrical mapping for one wiring polarity.
///
/// The on level is resolved once when the driver initializes; every write
/// after that goes through this mapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolarityMapper {
    polarity: Polarity,
    on_level: Level,
}

impl PolarityMapper {
    /// Creates the mapper for a wiring polarity.
    pub const fn new(polarity: Polarity) -> Self {
        Self {
            polarity,
            on_level: polarity.on_level(),
        }
    }

    /// Returns the wiring polarity.
    #[inline]
    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    /// Pin level for a lit or dark channel on the digital path.
    #[inline]
    pub fn digital_level(&self, lit: bool) -> Level {
        if lit { self.on_level } else { !self.on_level }
    }

    /// Pin level that keeps a channel dark.
    #[inline]
    pub fn off_level(&self) -> Level {
        !self.on_level
    }

    /// Hardware duty cycle for an intensity on the pulse-width path.
    #[inline]
    pub fn pwm_duty(&self, intensity: u8, brightness: u8) -> u8 {
        self.electrical_duty(scale_intensity(intensity, brightness))
    }

    /// Hardware duty cycle that keeps a channel dark.
    #[inline]
    pub fn off_duty(&self) -> u8 {
        self.electrical_duty(0)
    }

    fn electrical_duty(&self, duty: u8) -> u8 {
        match self.polarity {
            Polarity::ActiveHigh => duty,
            Polarity::ActiveLow => u8::MAX - duty,
        }
    }
}
