//! RGB LED driver with color cache and blink control.
//!
//! Provides [`RgbLed`], which owns the pins of one tri-color LED, remembers
//! the last requested color, and runs blink sequences either synchronously or
//! through a cooperative [`tick`](RgbLed::tick).

use crate::COLOR_OFF;
use crate::blink::{BlinkEvent, BlinkScheduler};
use crate::config::{LedConfig, Wiring};
use crate::error::RgbLedError;
use crate::pins::{PinDriver, PinMode};
use crate::time::TimeSource;
use crate::types::{Channel, LoopCount, Phase, ServiceTiming};
use embedded_hal::delay::DelayNs;
use palette::Srgb;

/// Lifecycle state of a driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriverState {
    /// Configuration not validated yet. Every operation is a no-op.
    Uninitialized,
    /// Pins are outputs and the driver accepts commands.
    Ready,
}

/// Controls a single tri-color LED.
///
/// Callers work with logical colors only; wiring polarity and the choice
/// between digital and pulse-width output are resolved internally.
///
/// Dropping the driver turns the LED off and switches its pins to inputs.
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source reference
/// * `P` - Pin backend
/// * `T` - Time source implementation type
///
/// # Example
/// ```
/// use rgb_indicator::sim::{ManualClock, SimulatedPins};
/// use rgb_indicator::{LedConfig, Polarity, RgbLed};
///
/// let clock = ManualClock::new();
/// let config = LedConfig::new().pins(9, 10, 11).polarity(Polarity::COMMON_ANODE);
/// let mut led = RgbLed::new(config, SimulatedPins::new(), &clock);
/// led.init().unwrap();
///
/// led.cyan();
/// led.blink(600, 3);
/// while led.is_blinking() {
///     clock.advance(10);
///     led.tick();
/// }
/// assert!(!led.is_on());
/// assert_eq!(led.get_color(), (false, true, true));
/// ```
pub struct RgbLed<'t, P: PinDriver, T: TimeSource> {
    pins: P,
    time_source: &'t T,
    config: LedConfig,
    wiring: Option<Wiring>,
    last_error: Option<RgbLedError>,
    desired: [bool; 3],
    intensity: Srgb<u8>,
    is_on: bool,
    brightness: u8,
    pwm_enabled: bool,
    blink: BlinkScheduler,
}

impl<'t, P: PinDriver, T: TimeSource> RgbLed<'t, P, T> {
    /// Creates an uninitialized driver. Pins are not touched until `init()`.
    pub fn new(config: LedConfig, pins: P, time_source: &'t T) -> Self {
        Self {
            pins,
            time_source,
            config,
            wiring: None,
            last_error: None,
            desired: [false; 3],
            intensity: COLOR_OFF,
            is_on: false,
            brightness: config.brightness,
            pwm_enabled: config.pwm,
            blink: BlinkScheduler::new(),
        }
    }

    /// Validates the configuration and takes control of the pins.
    ///
    /// Every pin is preloaded with its off level before it becomes an
    /// output, so the LED cannot flash during startup. On success the LED is
    /// off and the cached color is black.
    ///
    /// # Errors
    /// * `InvalidConfiguration` - A pin is unassigned or the polarity is invalid.
    ///   The error is also kept for [`last_error`](Self::last_error) and the
    ///   driver stays `Uninitialized`.
    pub fn init(&mut self) -> Result<(), RgbLedError> {
        let wiring = match self.config.validate() {
            Ok(wiring) => wiring,
            Err(err) => {
                warn!("rgb led init failed: {}", err);
                self.last_error = Some(err);
                return Err(err);
            }
        };

        self.blink.stop();
        self.desired = [false; 3];
        self.intensity = COLOR_OFF;
        self.brightness = self.config.brightness;
        self.pwm_enabled = self.config.pwm;

        for pin in wiring.pins() {
            if self.pwm_enabled {
                self.pins.write_pwm(pin, wiring.mapper().off_duty());
            } else {
                self.pins.write_digital(pin, wiring.mapper().off_level());
            }
            self.pins.set_pin_mode(pin, PinMode::Output);
        }

        self.is_on = false;
        self.wiring = Some(wiring);
        self.last_error = None;
        debug!("rgb led ready: {}", wiring.mapper().polarity());
        Ok(())
    }

    /// Replaces the configuration.
    ///
    /// A ready driver turns the LED off and releases its pins first. The
    /// driver is `Uninitialized` afterwards; call `init()` again.
    pub fn reconfigure(&mut self, config: LedConfig) {
        self.release();
        self.config = config;
        self.brightness = config.brightness;
        self.pwm_enabled = config.pwm;
        self.last_error = None;
        debug!("rgb led reconfigured");
    }

    /// Sets each channel fully on or off.
    pub fn set(&mut self, red: bool, green: bool, blue: bool) {
        let Some(wiring) = self.wiring else { return };

        self.desired = [red, green, blue];
        self.intensity = Srgb::new(full_or_dark(red), full_or_dark(green), full_or_dark(blue));
        self.show_cached(wiring);
    }

    /// Sets per-channel intensities (0 = off, 255 = full).
    ///
    /// Intensities are graded only on the pulse-width path. The digital path
    /// lights every nonzero channel fully.
    pub fn set_intensity(&mut self, red: u8, green: u8, blue: u8) {
        self.set_color(Srgb::new(red, green, blue));
    }

    /// Sets per-channel intensities from an 8-bit color.
    pub fn set_color(&mut self, color: Srgb<u8>) {
        let Some(wiring) = self.wiring else { return };

        self.intensity = color;
        self.desired = [color.red != 0, color.green != 0, color.blue != 0];
        self.show_cached(wiring);
    }

    /// Turns the LED off without forgetting the cached color.
    pub fn off(&mut self) {
        let Some(wiring) = self.wiring else { return };
        self.force_off(wiring);
    }

    /// Shows the cached color again.
    ///
    /// A black cache leaves the LED dark and `is_on()` false.
    pub fn on(&mut self) {
        let Some(wiring) = self.wiring else { return };
        self.show_cached(wiring);
    }

    /// Turns the LED off if it is on, on otherwise.
    pub fn toggle(&mut self) {
        if self.is_on {
            self.off();
        } else {
            self.on();
        }
    }

    /// Complements every channel of the cached boolean color.
    ///
    /// Graded intensities collapse to full on/off.
    pub fn inverse(&mut self) {
        let [red, green, blue] = self.desired;
        self.set(!red, !green, !blue);
    }

    pub fn red(&mut self) {
        self.set(true, false, false);
    }

    pub fn green(&mut self) {
        self.set(false, true, false);
    }

    pub fn blue(&mut self) {
        self.set(false, false, true);
    }

    pub fn yellow(&mut self) {
        self.set(true, true, false);
    }

    pub fn purple(&mut self) {
        self.set(true, false, true);
    }

    pub fn cyan(&mut self) {
        self.set(false, true, true);
    }

    pub fn white(&mut self) {
        self.set(true, true, true);
    }

    /// Selects the pulse-width (`true`) or digital (`false`) output path.
    ///
    /// The current output is rewritten on the new path.
    pub fn enable_pwm(&mut self, enabled: bool) {
        let Some(wiring) = self.wiring else { return };
        if self.pwm_enabled == enabled {
            return;
        }

        self.pwm_enabled = enabled;
        if self.is_on {
            self.show_cached(wiring);
        } else {
            self.force_off(wiring);
        }
    }

    /// Sets the global brightness of the pulse-width path (255 = full).
    pub fn set_brightness(&mut self, brightness: u8) {
        let Some(wiring) = self.wiring else { return };

        self.brightness = brightness;
        if self.is_on && self.pwm_enabled {
            self.show_cached(wiring);
        }
    }

    /// Starts a non-blocking blink of the cached color.
    ///
    /// * `cycles == 0` - Blink forever, `duration_ms` is the half-period
    /// * `cycles > 0` - Blink `cycles` ON+OFF pairs spread over `duration_ms`
    /// * `duration_ms == 0` - Stop any blink and turn the LED off
    ///
    /// The LED shows the cached color immediately. Call [`tick`](Self::tick)
    /// regularly afterwards.
    pub fn blink(&mut self, duration_ms: u32, cycles: u32) {
        let Some(wiring) = self.wiring else { return };

        let now = self.time_source.now_millis();
        if self.blink.start(duration_ms, LoopCount::from_cycles(cycles), now) {
            debug!("blink armed: {} ms, {} cycles", duration_ms, cycles);
            self.show_cached(wiring);
        } else {
            self.force_off(wiring);
        }
    }

    /// Runs a finite blink to completion before returning.
    ///
    /// Uses the same per-edge timing as [`blink`](Self::blink) and leaves the
    /// LED off. Infinite blinks (`cycles == 0`) cannot block and are started
    /// as non-blocking blinks instead.
    pub fn blink_blocking<D: DelayNs>(&mut self, duration_ms: u32, cycles: u32, delay: &mut D) {
        let Some(wiring) = self.wiring else { return };

        let loops = LoopCount::from_cycles(cycles);
        if loops == LoopCount::Infinite || duration_ms == 0 {
            self.blink(duration_ms, cycles);
            return;
        }

        let now = self.time_source.now_millis();
        self.blink.start(duration_ms, loops, now);
        self.show_cached(wiring);

        while self.blink.is_active() {
            delay.delay_ms(self.blink.next_half_period_ms());
            if let Some(event) = self.blink.force_edge() {
                self.show_event(wiring, event);
            }
        }
    }

    /// Advances a running blink using the time source.
    ///
    /// See [`tick_at`](Self::tick_at).
    pub fn tick(&mut self) -> ServiceTiming {
        let now = self.time_source.now_millis();
        self.tick_at(now)
    }

    /// Advances a running blink to `now_ms`.
    ///
    /// Does nothing until the current half-period has elapsed, then switches
    /// phase. A finite blink turns the LED off after its last edge.
    ///
    /// # Returns
    /// * `ServiceTiming::Delay(ms)` - Blink running, next edge due in `ms`
    /// * `ServiceTiming::Idle` - No blink running
    pub fn tick_at(&mut self, now_ms: u32) -> ServiceTiming {
        let Some(wiring) = self.wiring else {
            return ServiceTiming::Idle;
        };

        if let Some(event) = self.blink.advance(now_ms) {
            self.show_event(wiring, event);
        }

        match self.blink.remaining_ms(now_ms) {
            Some(ms) => ServiceTiming::Delay(ms),
            None => ServiceTiming::Idle,
        }
    }

    /// Stops a running blink.
    ///
    /// With `force_off` the LED turns off; otherwise it keeps whatever phase
    /// the blink was showing.
    pub fn stop_blink(&mut self, force_off: bool) {
        let Some(wiring) = self.wiring else { return };

        if self.blink.is_active() {
            debug!("blink stopped after {} edges", self.blink.edges_elapsed());
        }
        self.blink.stop();
        if force_off {
            self.force_off(wiring);
        }
    }

    /// Returns true while a non-blocking blink is running.
    pub fn is_blinking(&self) -> bool {
        self.blink.is_active()
    }

    /// Returns true if the LED currently shows a non-black color.
    pub fn is_on(&self) -> bool {
        self.is_on
    }

    /// Returns the cached color as per-channel on/off flags.
    pub fn get_color(&self) -> (bool, bool, bool) {
        let [red, green, blue] = self.desired;
        (red, green, blue)
    }

    /// Returns the cached per-channel intensities.
    pub fn intensity(&self) -> Srgb<u8> {
        self.intensity
    }

    /// Returns the brightness of the pulse-width path.
    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    /// Returns true if output goes through the pulse-width path.
    pub fn is_pwm_enabled(&self) -> bool {
        self.pwm_enabled
    }

    /// Returns the lifecycle state.
    pub fn state(&self) -> DriverState {
        match self.wiring {
            Some(_) => DriverState::Ready,
            None => DriverState::Uninitialized,
        }
    }

    /// Returns the error of the last failed `init()`, or `None`.
    pub fn last_error(&self) -> Option<RgbLedError> {
        self.last_error
    }

    /// Returns the configuration.
    pub fn config(&self) -> &LedConfig {
        &self.config
    }

    /// Returns the blink scheduler for inspection.
    pub fn blink_scheduler(&self) -> &BlinkScheduler {
        &self.blink
    }

    /// Returns the pin backend.
    pub fn pins(&self) -> &P {
        &self.pins
    }

    fn show_event(&mut self, wiring: Wiring, event: BlinkEvent) {
        match event {
            BlinkEvent::Edge(Phase::On) => self.show_cached(wiring),
            BlinkEvent::Edge(Phase::Off) => self.force_off(wiring),
            BlinkEvent::Finished => {
                debug!("blink finished");
                self.force_off(wiring);
            }
        }
    }

    fn show_cached(&mut self, wiring: Wiring) {
        let intensities = [self.intensity.red, self.intensity.green, self.intensity.blue];

        for channel in Channel::ALL {
            let pin = wiring.pin(channel);
            let idx = channel.index();
            if self.pwm_enabled {
                let duty = wiring.mapper().pwm_duty(intensities[idx], self.brightness);
                self.pins.write_pwm(pin, duty);
            } else {
                let level = wiring.mapper().digital_level(self.desired[idx]);
                self.pins.write_digital(pin, level);
            }
        }

        self.is_on = intensities.iter().any(|&i| i != 0);
    }

    fn force_off(&mut self, wiring: Wiring) {
        for pin in wiring.pins() {
            if self.pwm_enabled {
                self.pins.write_pwm(pin, wiring.mapper().off_duty());
            } else {
                self.pins.write_digital(pin, wiring.mapper().off_level());
            }
        }
        self.is_on = false;
    }

    /// Turns the LED off and switches its pins to inputs.
    fn release(&mut self) {
        let Some(wiring) = self.wiring.take() else { return };

        self.blink.stop();
        self.force_off(wiring);
        for pin in wiring.pins() {
            self.pins.set_pin_mode(pin, PinMode::Input);
        }
        debug!("rgb led pins released");
    }
}

impl<P: PinDriver, T: TimeSource> Drop for RgbLed<'_, P, T> {
    fn drop(&mut self) {
        self.release();
    }
}

#[inline]
fn full_or_dark(lit: bool) -> u8 {
    if lit { u8::MAX } else { 0 }
}
