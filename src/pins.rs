//! Pin capability abstraction.
//!
//! The driver never touches hardware registers directly. Everything it needs
//! from the platform goes through [`PinDriver`], so the same driver runs on a
//! board support crate or on the [`SimulatedPins`](crate::sim::SimulatedPins)
//! backend in host tests.

use core::ops::Not;

/// Platform pin identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinId(pub u8);

impl From<u8> for PinId {
    fn from(pin: u8) -> Self {
        PinId(pin)
    }
}

impl From<PinId> for u8 {
    fn from(pin: PinId) -> Self {
        pin.0
    }
}

/// Direction of a pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinMode {
    /// Pin drives its output level.
    Output,
    /// High-impedance input. Used to release pins.
    Input,
}

/// Electrical level of a digital output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    Low,
    High,
}

impl Not for Level {
    type Output = Level;

    fn not(self) -> Level {
        match self {
            Level::Low => Level::High,
            Level::High => Level::Low,
        }
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high { Level::High } else { Level::Low }
    }
}

/// Trait for abstracting the pin primitives of a platform.
///
/// Implement this for your board (GPIO registers, a HAL, an I/O expander)
/// to let the driver control it. Implementations handle hardware errors
/// internally; these methods cannot fail.
pub trait PinDriver {
    /// Switches a pin between output and high-impedance input.
    fn set_pin_mode(&mut self, pin: PinId, mode: PinMode);

    /// Drives a digital level on a pin.
    fn write_digital(&mut self, pin: PinId, level: Level);

    /// Writes a pulse-width duty cycle (0 = always low, 255 = always high).
    fn write_pwm(&mut self, pin: PinId, duty: u8);
}

impl<P: PinDriver + ?Sized> PinDriver for &mut P {
    #[inline]
    fn set_pin_mode(&mut self, pin: PinId, mode: PinMode) {
        (**self).set_pin_mode(pin, mode);
    }

    #[inline]
    fn write_digital(&mut self, pin: PinId, level: Level) {
        (**self).write_digital(pin, level);
    }

    #[inline]
    fn write_pwm(&mut self, pin: PinId, duty: u8) {
        (**self).write_pwm(pin, duty);
    }
}
