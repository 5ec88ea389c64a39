#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`RgbLed`**: Controls one tri-color LED: color cache, presets, blinking
//! - **`LedConfig`**: Pin assignment, wiring polarity and startup output path
//! - **`Polarity`**: Active-low (common anode) or active-high (common cathode) wiring
//! - **`PolarityMapper`**: Turns logical channel intent into pin levels and duty cycles
//! - **`BlinkScheduler`**: Pure ON/OFF oscillator advanced by timestamps
//! - **`PinDriver`**: Trait to implement for your pin hardware
//! - **`TimeSource`**: Trait to implement for your millisecond clock
//! - **`ServiceTiming`**: When the driver needs to be ticked again
//!
//! Colors are cached as `Srgb<u8>`; boolean colors are stored as 0 or 255 per
//! channel.

// Re-export Srgb from palette for user convenience
pub use palette::Srgb;

#[macro_use]
mod logging;

pub mod blink;
pub mod config;
pub mod driver;
pub mod error;
pub mod pins;
pub mod polarity;
pub mod sim;
pub mod time;
pub mod types;

pub use blink::{BlinkEvent, BlinkScheduler};
pub use config::{LedConfig, Wiring};
pub use driver::{DriverState, RgbLed};
pub use error::{ConfigIssue, RgbLedError};
pub use pins::{Level, PinDriver, PinId, PinMode};
pub use polarity::{Polarity, PolarityMapper, scale_intensity};
pub use time::{TimeSource, elapsed_millis};
pub use types::{Channel, LoopCount, Phase, ServiceTiming};

pub const COLOR_OFF: Srgb<u8> = Srgb::new(0, 0, 0);
pub const RED: Srgb<u8> = Srgb::new(255, 0, 0);
pub const GREEN: Srgb<u8> = Srgb::new(0, 255, 0);
pub const BLUE: Srgb<u8> = Srgb::new(0, 0, 255);
pub const YELLOW: Srgb<u8> = Srgb::new(255, 255, 0);
pub const PURPLE: Srgb<u8> = Srgb::new(255, 0, 255);
pub const CYAN: Srgb<u8> = Srgb::new(0, 255, 255);
pub const WHITE: Srgb<u8> = Srgb::new(255, 255, 255);
