//! Simulated platform for host testing.
//!
//! [`SimulatedPins`] implements [`PinDriver`] in memory and records every
//! call; [`ManualClock`] is a [`TimeSource`] that only moves when told to.
//! Together they let the driver run deterministically without hardware.

use crate::pins::{Level, PinDriver, PinId, PinMode};
use crate::time::TimeSource;
use core::cell::Cell;
use heapless::Vec;

/// Number of pins the simulator tracks. Higher pin ids are only recorded in
/// the history.
pub const SIM_PIN_COUNT: usize = 64;

/// Number of recent pin calls kept in the history.
pub const SIM_HISTORY_LEN: usize = 128;

/// Last value written to a pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinOutput {
    Digital(Level),
    Pwm(u8),
}

/// One recorded pin call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinEvent {
    Mode(PinId, PinMode),
    Digital(PinId, Level),
    Pwm(PinId, u8),
}

impl PinEvent {
    /// Pin the call targeted.
    pub fn pin(&self) -> PinId {
        match *self {
            PinEvent::Mode(pin, _) | PinEvent::Digital(pin, _) | PinEvent::Pwm(pin, _) => pin,
        }
    }
}

/// In-memory pin backend.
#[derive(Debug, Clone)]
pub struct SimulatedPins {
    modes: [Option<PinMode>; SIM_PIN_COUNT],
    outputs: [Option<PinOutput>; SIM_PIN_COUNT],
    history: Vec<PinEvent, SIM_HISTORY_LEN>,
}

impl SimulatedPins {
    /// Creates a backend where no pin has been configured or written.
    pub fn new() -> Self {
        Self {
            modes: [None; SIM_PIN_COUNT],
            outputs: [None; SIM_PIN_COUNT],
            history: Vec::new(),
        }
    }

    /// Mode of a pin, `None` if never set.
    pub fn mode(&self, pin: PinId) -> Option<PinMode> {
        self.modes.get(pin.0 as usize).copied().flatten()
    }

    /// Last value written to a pin, `None` if never written.
    pub fn output(&self, pin: PinId) -> Option<PinOutput> {
        self.outputs.get(pin.0 as usize).copied().flatten()
    }

    /// Last digital level written to a pin.
    pub fn level(&self, pin: PinId) -> Option<Level> {
        match self.output(pin) {
            Some(PinOutput::Digital(level)) => Some(level),
            _ => None,
        }
    }

    /// Last duty cycle written to a pin.
    pub fn duty(&self, pin: PinId) -> Option<u8> {
        match self.output(pin) {
            Some(PinOutput::Pwm(duty)) => Some(duty),
            _ => None,
        }
    }

    /// Recent pin calls, oldest first.
    pub fn history(&self) -> &[PinEvent] {
        &self.history
    }

    /// Forgets the recorded calls. Pin state is kept.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    fn record(&mut self, event: PinEvent) {
        if self.history.is_full() {
            self.history.remove(0);
        }
        let _ = self.history.push(event);
    }
}

impl Default for SimulatedPins {
    fn default() -> Self {
        Self::new()
    }
}

impl PinDriver for SimulatedPins {
    fn set_pin_mode(&mut self, pin: PinId, mode: PinMode) {
        if let Some(slot) = self.modes.get_mut(pin.0 as usize) {
            *slot = Some(mode);
        }
        self.record(PinEvent::Mode(pin, mode));
    }

    fn write_digital(&mut self, pin: PinId, level: Level) {
        if let Some(slot) = self.outputs.get_mut(pin.0 as usize) {
            *slot = Some(PinOutput::Digital(level));
        }
        self.record(PinEvent::Digital(pin, level));
    }

    fn write_pwm(&mut self, pin: PinId, duty: u8) {
        if let Some(slot) = self.outputs.get_mut(pin.0 as usize) {
            *slot = Some(PinOutput::Pwm(duty));
        }
        self.record(PinEvent::Pwm(pin, duty));
    }
}

/// Millisecond clock with manually controlled time.
#[derive(Debug, Default)]
pub struct ManualClock {
    now_ms: Cell<u32>,
}

impl ManualClock {
    /// Creates a clock reading 0 ms.
    pub const fn new() -> Self {
        Self::starting_at(0)
    }

    /// Creates a clock reading `now_ms`.
    pub const fn starting_at(now_ms: u32) -> Self {
        Self {
            now_ms: Cell::new(now_ms),
        }
    }

    /// Moves time forward, wrapping like a hardware counter.
    pub fn advance(&self, ms: u32) {
        self.now_ms.set(self.now_ms.get().wrapping_add(ms));
    }

    /// Sets the clock reading.
    pub fn set(&self, now_ms: u32) {
        self.now_ms.set(now_ms);
    }
}

impl TimeSource for ManualClock {
    fn now_millis(&self) -> u32 {
        self.now_ms.get()
    }
}
