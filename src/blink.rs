//! Non-blocking blink scheduler.
//!
//! [`BlinkScheduler`] is a two-phase (ON/OFF) oscillator with no access to
//! hardware or clocks. It is armed with a start timestamp and advanced with
//! later timestamps, and reports each edge it takes so the caller can update
//! the LED. Feeding it the same timestamps always yields the same edges.
//!
//! # Timing
//!
//! A finite blink of `cycles` runs `2 * cycles` edges. The requested duration
//! is split into a base half-period of `duration / edges` milliseconds, and
//! the remainder `duration % edges` is handed out one millisecond at a time to
//! the first edges, so the half-periods add up to exactly the requested
//! duration. For 100 ms over 3 cycles the half-periods are
//! `17, 17, 17, 17, 16, 16`.
//!
//! An infinite blink uses the duration as a fixed half-period.

use crate::time::elapsed_millis;
use crate::types::{LoopCount, Phase};

/// Outcome of a blink edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BlinkEvent {
    /// The blink moved into this phase.
    Edge(Phase),

    /// A finite blink completed its last edge. The LED should be off.
    Finished,
}

/// Timer-driven ON/OFF oscillator.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BlinkScheduler {
    active: bool,
    loops: LoopCount,
    edges_elapsed: u32,
    base_half_period_ms: u32,
    extra_ms_remaining: u32,
    last_edge_ms: u32,
    next_half_period_ms: u32,
    phase: Phase,
}

impl BlinkScheduler {
    /// Creates an idle scheduler.
    pub const fn new() -> Self {
        Self {
            active: false,
            loops: LoopCount::Infinite,
            edges_elapsed: 0,
            base_half_period_ms: 0,
            extra_ms_remaining: 0,
            last_edge_ms: 0,
            next_half_period_ms: 0,
            phase: Phase::Off,
        }
    }

    /// Arms the scheduler at `now_ms` in the ON phase.
    ///
    /// For `LoopCount::Infinite`, `duration_ms` is the half-period. For
    /// `LoopCount::Finite(n)` it is the total length of all `n` cycles;
    /// `Finite(0)` runs forever like `Infinite`.
    ///
    /// A zero duration stops the scheduler instead.
    ///
    /// # Returns
    /// * `true` - Armed, the LED should show its color now
    /// * `false` - Zero duration, scheduler is idle and the LED should be off
    pub fn start(&mut self, duration_ms: u32, loops: LoopCount, now_ms: u32) -> bool {
        if duration_ms == 0 {
            self.stop();
            return false;
        }

        let loops = match loops {
            LoopCount::Finite(0) => LoopCount::Infinite,
            other => other,
        };

        match loops {
            LoopCount::Infinite => {
                self.base_half_period_ms = duration_ms;
                self.extra_ms_remaining = 0;
            }
            LoopCount::Finite(cycles) => {
                let edges = cycles.saturating_mul(2);
                self.base_half_period_ms = duration_ms / edges;
                self.extra_ms_remaining = duration_ms % edges;

                // Shorter than one millisecond per edge: every edge gets 1 ms
                if self.base_half_period_ms == 0 {
                    self.base_half_period_ms = 1;
                    self.extra_ms_remaining = 0;
                }
            }
        }

        self.active = true;
        self.loops = loops;
        self.edges_elapsed = 0;
        self.last_edge_ms = now_ms;
        self.phase = Phase::On;
        self.next_half_period_ms = self.take_half_period();
        true
    }

    /// Advances the scheduler to `now_ms`.
    ///
    /// Takes at most one edge per call. Returns `None` when idle or when the
    /// current half-period has not elapsed yet.
    pub fn advance(&mut self, now_ms: u32) -> Option<BlinkEvent> {
        if !self.active {
            return None;
        }

        if elapsed_millis(now_ms, self.last_edge_ms) < self.next_half_period_ms {
            return None;
        }

        self.last_edge_ms = now_ms;
        Some(self.edge())
    }

    /// Takes the next edge without looking at the clock.
    ///
    /// Used by blocking blinks, which wait out each half-period themselves.
    pub fn force_edge(&mut self) -> Option<BlinkEvent> {
        if !self.active {
            return None;
        }

        self.last_edge_ms = self.last_edge_ms.wrapping_add(self.next_half_period_ms);
        Some(self.edge())
    }

    /// Deactivates the scheduler and resets its counters.
    pub fn stop(&mut self) {
        *self = Self::new();
    }

    /// Milliseconds until the next edge is due, or `None` when idle.
    pub fn remaining_ms(&self, now_ms: u32) -> Option<u32> {
        if !self.active {
            return None;
        }

        let elapsed = elapsed_millis(now_ms, self.last_edge_ms);
        Some(self.next_half_period_ms.saturating_sub(elapsed))
    }

    /// Returns true while a blink is running.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Returns the loop configuration of the current or last blink.
    #[inline]
    pub fn loops(&self) -> LoopCount {
        self.loops
    }

    /// Returns the current phase.
    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns the number of edges taken since the blink started.
    #[inline]
    pub fn edges_elapsed(&self) -> u32 {
        self.edges_elapsed
    }

    /// Returns the length of the current half-period.
    #[inline]
    pub fn next_half_period_ms(&self) -> u32 {
        self.next_half_period_ms
    }

    /// Returns the base half-period, before remainder distribution.
    #[inline]
    pub fn base_half_period_ms(&self) -> u32 {
        self.base_half_period_ms
    }

    /// Returns how many upcoming edges still get one extra millisecond.
    #[inline]
    pub fn extra_ms_remaining(&self) -> u32 {
        self.extra_ms_remaining
    }

    /// Returns the timestamp of the last edge (or of the start).
    #[inline]
    pub fn last_edge_ms(&self) -> u32 {
        self.last_edge_ms
    }

    fn edge(&mut self) -> BlinkEvent {
        self.edges_elapsed = self.edges_elapsed.saturating_add(1);
        self.phase = !self.phase;

        if let LoopCount::Finite(cycles) = self.loops {
            if self.edges_elapsed >= cycles.saturating_mul(2) {
                self.stop();
                return BlinkEvent::Finished;
            }
        }

        self.next_half_period_ms = self.take_half_period();
        BlinkEvent::Edge(self.phase)
    }

    fn take_half_period(&mut self) -> u32 {
        if self.extra_ms_remaining > 0 {
            self.extra_ms_remaining -= 1;
            self.base_half_period_ms + 1
        } else {
            self.base_half_period_ms
        }
    }
}

impl Default for BlinkScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::Vec;

    /// Runs a finite blink to completion, ticking exactly on each edge, and
    /// returns every half-period used.
    fn collect_half_periods(duration_ms: u32, cycles: u32) -> Vec<u32, 64> {
        let mut scheduler = BlinkScheduler::new();
        let mut now = 0u32;
        let mut periods = Vec::new();

        assert!(scheduler.start(duration_ms, LoopCount::Finite(cycles), now));
        while scheduler.is_active() {
            let half = scheduler.next_half_period_ms();
            periods.push(half).unwrap();
            now += half;
            assert!(scheduler.advance(now).is_some());
        }
        periods
    }

    #[test]
    fn remainder_goes_to_first_edges() {
        let periods = collect_half_periods(100, 3);
        assert_eq!(periods.as_slice(), &[17, 17, 17, 17, 16, 16]);
    }

    #[test]
    fn half_periods_sum_to_requested_duration() {
        for &(duration, cycles) in &[(100, 3), (1000, 7), (999, 1), (12, 6), (31, 4), (5000, 10)] {
            let periods = collect_half_periods(duration, cycles);
            assert_eq!(periods.len() as u32, cycles * 2);
            assert_eq!(periods.iter().sum::<u32>(), duration);
        }
    }

    #[test]
    fn too_short_duration_is_clamped_to_one_ms_per_edge() {
        let periods = collect_half_periods(3, 4);
        assert_eq!(periods.as_slice(), &[1, 1, 1, 1, 1, 1, 1, 1]);
    }

    #[test]
    fn zero_duration_stays_idle() {
        let mut scheduler = BlinkScheduler::new();
        scheduler.start(500, LoopCount::Infinite, 0);

        assert!(!scheduler.start(0, LoopCount::Finite(3), 10));
        assert!(!scheduler.is_active());
        assert_eq!(scheduler.advance(10_000), None);
    }

    #[test]
    fn no_edge_before_half_period_elapses() {
        let mut scheduler = BlinkScheduler::new();
        scheduler.start(200, LoopCount::Finite(1), 1000);

        assert_eq!(scheduler.advance(1000), None);
        assert_eq!(scheduler.advance(1099), None);
        assert_eq!(scheduler.advance(1100), Some(BlinkEvent::Edge(Phase::Off)));
        assert_eq!(scheduler.advance(1150), None);
        assert_eq!(scheduler.advance(1200), Some(BlinkEvent::Finished));
        assert!(!scheduler.is_active());
    }

    #[test]
    fn infinite_blink_never_finishes() {
        let mut scheduler = BlinkScheduler::new();
        scheduler.start(50, LoopCount::Infinite, 0);

        let mut expected = Phase::Off;
        for edge in 1..=1000u32 {
            assert_eq!(scheduler.advance(edge * 50), Some(BlinkEvent::Edge(expected)));
            expected = !expected;
        }
        assert!(scheduler.is_active());
        assert_eq!(scheduler.edges_elapsed(), 1000);
    }

    #[test]
    fn finite_zero_cycles_runs_forever() {
        let mut scheduler = BlinkScheduler::new();
        scheduler.start(10, LoopCount::Finite(0), 0);
        assert_eq!(scheduler.loops(), LoopCount::Infinite);
        assert_eq!(scheduler.next_half_period_ms(), 10);
    }

    #[test]
    fn advance_is_wrap_safe() {
        let mut scheduler = BlinkScheduler::new();
        let start = u32::MAX - 20;
        scheduler.start(100, LoopCount::Infinite, start);

        assert_eq!(scheduler.advance(start.wrapping_add(99)), None);
        assert_eq!(
            scheduler.advance(start.wrapping_add(100)),
            Some(BlinkEvent::Edge(Phase::Off))
        );
        assert_eq!(scheduler.last_edge_ms(), 79);
    }

    #[test]
    fn remaining_time_counts_down() {
        let mut scheduler = BlinkScheduler::new();
        assert_eq!(scheduler.remaining_ms(0), None);

        scheduler.start(300, LoopCount::Infinite, 0);
        assert_eq!(scheduler.remaining_ms(0), Some(300));
        assert_eq!(scheduler.remaining_ms(120), Some(180));
        assert_eq!(scheduler.remaining_ms(400), Some(0));
    }

    #[test]
    fn forced_edges_follow_the_same_schedule() {
        let mut scheduler = BlinkScheduler::new();
        scheduler.start(100, LoopCount::Finite(3), 0);

        let mut total = scheduler.next_half_period_ms();
        while let Some(BlinkEvent::Edge(_)) = scheduler.force_edge() {
            total += scheduler.next_half_period_ms();
        }
        assert_eq!(total, 100);
        assert!(!scheduler.is_active());
        assert_eq!(scheduler.force_edge(), None);
    }

    #[test]
    fn stop_resets_counters() {
        let mut scheduler = BlinkScheduler::new();
        scheduler.start(100, LoopCount::Finite(3), 0);
        scheduler.advance(17);
        scheduler.stop();

        assert_eq!(scheduler, BlinkScheduler::new());
    }
}
