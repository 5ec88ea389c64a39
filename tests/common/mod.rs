//! Shared test infrastructure for rgb-indicator integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use embedded_hal::delay::DelayNs;
use rgb_indicator::sim::{ManualClock, SimulatedPins};
use rgb_indicator::{LedConfig, Level, PinId, Polarity, RgbLed};

// ============================================================================
// Wiring
// ============================================================================

pub const RED_PIN: PinId = PinId(9);
pub const GREEN_PIN: PinId = PinId(10);
pub const BLUE_PIN: PinId = PinId(11);
pub const LED_PINS: [PinId; 3] = [RED_PIN, GREEN_PIN, BLUE_PIN];

pub const POLARITIES: [Polarity; 2] = [Polarity::ActiveHigh, Polarity::ActiveLow];

pub fn config(polarity: Polarity) -> LedConfig {
    LedConfig::new()
        .pins(RED_PIN.0, GREEN_PIN.0, BLUE_PIN.0)
        .polarity(polarity)
}

pub fn pwm_config(polarity: Polarity) -> LedConfig {
    config(polarity).pwm(true)
}

/// Builds and initializes a driver borrowing `pins`, so the pins can be
/// inspected after the driver is gone.
pub fn ready_led<'p, 't>(
    config: LedConfig,
    pins: &'p mut SimulatedPins,
    clock: &'t ManualClock,
) -> RgbLed<'t, &'p mut SimulatedPins, ManualClock> {
    let mut led = RgbLed::new(config, pins, clock);
    led.init().unwrap();
    led
}

/// Digital levels of the three LED pins.
pub fn levels(pins: &SimulatedPins) -> [Option<Level>; 3] {
    LED_PINS.map(|pin| pins.level(pin))
}

/// Duty cycles of the three LED pins.
pub fn duties(pins: &SimulatedPins) -> [Option<u8>; 3] {
    LED_PINS.map(|pin| pins.duty(pin))
}

/// Expected digital levels for a lit/dark pattern.
pub fn expected_levels(polarity: Polarity, lit: [bool; 3]) -> [Option<Level>; 3] {
    let on = polarity.on_level();
    lit.map(|l| Some(if l { on } else { !on }))
}

// ============================================================================
// Mock Delay
// ============================================================================

/// Delay that advances a manual clock and records every requested wait.
pub struct ClockDelay<'a> {
    clock: &'a ManualClock,
    waits: heapless::Vec<u32, 64>,
}

impl<'a> ClockDelay<'a> {
    pub fn new(clock: &'a ManualClock) -> Self {
        Self {
            clock,
            waits: heapless::Vec::new(),
        }
    }

    pub fn waits(&self) -> &[u32] {
        &self.waits
    }

    pub fn total_ms(&self) -> u32 {
        self.waits.iter().sum()
    }
}

impl DelayNs for ClockDelay<'_> {
    fn delay_ns(&mut self, ns: u32) {
        self.delay_ms(ns / 1_000_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.clock.advance(ms);
        let _ = self.waits.push(ms);
    }
}
