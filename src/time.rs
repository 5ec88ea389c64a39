//! Time abstraction for platform-agnostic timing.

/// Trait for abstracting millisecond clocks.
///
/// The counter is free-running and wraps at `u32::MAX`. Use
/// [`elapsed_millis`] to compare two readings.
pub trait TimeSource {
    /// Returns the current clock reading in milliseconds.
    fn now_millis(&self) -> u32;
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    #[inline]
    fn now_millis(&self) -> u32 {
        (**self).now_millis()
    }
}

/// Milliseconds elapsed from `earlier` to `now`, correct across counter wrap.
#[inline]
pub const fn elapsed_millis(now: u32, earlier: u32) -> u32 {
    now.wrapping_sub(earlier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_is_plain_difference_without_wrap() {
        assert_eq!(elapsed_millis(1500, 1000), 500);
        assert_eq!(elapsed_millis(1000, 1000), 0);
    }

    #[test]
    fn elapsed_survives_counter_wrap() {
        assert_eq!(elapsed_millis(5, u32::MAX - 4), 10);
        assert_eq!(elapsed_millis(0, u32::MAX), 1);
    }
}
