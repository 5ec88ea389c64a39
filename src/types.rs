//! Core types shared by the driver and the blink scheduler.

use core::ops::Not;

/// One of the three color channels of the LED.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    /// All channels in red, green, blue order.
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    /// Position of the channel in red, green, blue order.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
        }
    }
}

/// How many ON+OFF cycles a blink should run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LoopCount {
    /// Run a specific number of cycles, then stop with the LED off.
    Finite(u32),

    /// Run until stopped.
    Infinite,
}

impl LoopCount {
    /// Maps a raw cycle count to a loop count. Zero means "run forever".
    #[inline]
    pub const fn from_cycles(cycles: u32) -> Self {
        if cycles == 0 {
            LoopCount::Infinite
        } else {
            LoopCount::Finite(cycles)
        }
    }
}

impl Default for LoopCount {
    fn default() -> Self {
        LoopCount::Finite(1)
    }
}

/// Phase of a blink cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// LED shows the cached color.
    On,
    /// LED is dark.
    Off,
}

impl Not for Phase {
    type Output = Phase;

    fn not(self) -> Phase {
        match self {
            Phase::On => Phase::Off,
            Phase::Off => Phase::On,
        }
    }
}

/// Timing information returned by tick operations.
///
/// Indicates when the driver needs to be ticked again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ServiceTiming {
    /// A blink is running. The next edge is due in this many milliseconds.
    ///
    /// Ticking earlier is harmless; ticking later stretches the current phase.
    Delay(u32),

    /// Nothing scheduled. No ticking needed until the next `blink()`.
    Idle,
}
