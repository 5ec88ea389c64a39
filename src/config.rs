//! Driver configuration and validation.

use crate::error::{ConfigIssue, RgbLedError};
use crate::pins::PinId;
use crate::polarity::{Polarity, PolarityMapper};
use crate::types::Channel;

/// Wiring and startup settings of an RGB LED.
///
/// Build it with the chained setters, hand it to [`RgbLed::new`](crate::RgbLed::new),
/// then call `init()`. Nothing is checked until `init()` runs.
///
/// ```
/// use rgb_indicator::{LedConfig, Polarity};
///
/// let config = LedConfig::new()
///     .pins(9, 10, 11)
///     .polarity(Polarity::COMMON_ANODE)
///     .pwm(true);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LedConfig {
    /// Red channel pin. `None` until assigned.
    pub red: Option<PinId>,

    /// Green channel pin. `None` until assigned.
    pub green: Option<PinId>,

    /// Blue channel pin. `None` until assigned.
    pub blue: Option<PinId>,

    /// Wiring polarity. `None` until set.
    pub polarity: Option<Polarity>,

    /// Start on the pulse-width output path.
    pub pwm: bool,

    /// Initial brightness for the pulse-width path (255 = full).
    pub brightness: u8,
}

impl LedConfig {
    /// Creates an empty configuration: no pins, no polarity, digital output,
    /// full brightness.
    pub const fn new() -> Self {
        Self {
            red: None,
            green: None,
            blue: None,
            polarity: None,
            pwm: false,
            brightness: u8::MAX,
        }
    }

    /// Assigns all three channel pins.
    pub fn pins(mut self, red: u8, green: u8, blue: u8) -> Self {
        self.red = Some(PinId(red));
        self.green = Some(PinId(green));
        self.blue = Some(PinId(blue));
        self
    }

    /// Assigns the pin of a single channel.
    pub fn pin(mut self, channel: Channel, pin: u8) -> Self {
        let pin = Some(PinId(pin));
        match channel {
            Channel::Red => self.red = pin,
            Channel::Green => self.green = pin,
            Channel::Blue => self.blue = pin,
        }
        self
    }

    /// Sets the wiring polarity.
    pub fn polarity(mut self, polarity: Polarity) -> Self {
        self.polarity = Some(polarity);
        self
    }

    /// Sets the polarity from a numeric common-mode code
    /// (0 = common cathode, 1 = common anode).
    ///
    /// An unknown code clears the polarity, so `init()` will reject it.
    pub fn common_mode(mut self, code: u8) -> Self {
        self.polarity = Polarity::try_from(code).ok();
        self
    }

    /// Selects the pulse-width output path at startup.
    pub fn pwm(mut self, enabled: bool) -> Self {
        self.pwm = enabled;
        self
    }

    /// Sets the initial brightness of the pulse-width path.
    pub fn brightness(mut self, brightness: u8) -> Self {
        self.brightness = brightness;
        self
    }

    /// Pin assigned to a channel, if any.
    pub fn channel_pin(&self, channel: Channel) -> Option<PinId> {
        match channel {
            Channel::Red => self.red,
            Channel::Green => self.green,
            Channel::Blue => self.blue,
        }
    }

    /// Checks that all pins are assigned and the polarity is set.
    ///
    /// # Errors
    /// * `InvalidConfiguration(UnassignedPin)` - A channel has no pin
    /// * `InvalidConfiguration(InvalidPolarity)` - Polarity is missing
    pub fn validate(&self) -> Result<Wiring, RgbLedError> {
        let mut pins = [PinId(0); 3];
        for channel in Channel::ALL {
            pins[channel.index()] = self
                .channel_pin(channel)
                .ok_or(ConfigIssue::UnassignedPin(channel))?;
        }

        let polarity = self.polarity.ok_or(ConfigIssue::InvalidPolarity)?;

        Ok(Wiring {
            pins,
            mapper: PolarityMapper::new(polarity),
        })
    }
}

impl Default for LedConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// A validated configuration: resolved pins plus the polarity mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wiring {
    pins: [PinId; 3],
    mapper: PolarityMapper,
}

impl Wiring {
    /// Channel pins in red, green, blue order.
    #[inline]
    pub fn pins(&self) -> [PinId; 3] {
        self.pins
    }

    /// Pin of one channel.
    #[inline]
    pub fn pin(&self, channel: Channel) -> PinId {
        self.pins[channel.index()]
    }

    /// Polarity mapping of this wiring.
    #[inline]
    pub fn mapper(&self) -> &PolarityMapper {
        &self.mapper
    }
}
