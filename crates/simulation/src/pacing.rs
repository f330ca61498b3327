//! Tick pacing and render throttling policy.
//!
//! Pure bookkeeping over counters and timestamps: the scheduler asks this
//! module what to do and performs the actual sleeping/yielding/rendering
//! itself, so the policy is testable without an event loop.

use std::time::{Duration, Instant};

/// Ceiling on render-hook invocations per second.
pub const MAX_RENDER_FPS: u32 = 60;

/// Minimum wall-clock gap between renders.
pub(crate) const MIN_RENDER_GAP: Duration =
    Duration::from_micros(1_000_000 / MAX_RENDER_FPS as u64);

/// How the scheduler should wait before the next tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickGap {
    /// Yield to other tasks without arming a timer.
    Yield,
    /// Arm a timer. A zero delay still passes through the timer driver,
    /// which is the point: it lets timer-driven work run.
    Sleep(Duration),
}

/// Chooses between microtask-style yields and timer waits after each tick.
///
/// With a configured delay the choice is always a timer at that delay. At
/// zero delay ("as fast as possible") the loop runs on bare yields, except
/// every `forced_timer_every` ticks a zero-length timer is armed anyway: a
/// yield-only loop would starve the host's timer-driven work, rendering
/// included.
#[derive(Debug, Clone, Copy)]
pub struct PacingPolicy {
    forced_timer_every: u64,
}

impl PacingPolicy {
    /// Policy scaled to a population: larger cohorts take more ticks per
    /// run, so they visit the timer driver proportionally less often.
    pub fn for_population(population: usize) -> Self {
        Self {
            forced_timer_every: (population as u64 / 4).clamp(10, 500),
        }
    }

    /// Pick the gap to insert after `tick` given the currently configured
    /// inter-tick delay.
    pub fn gap(&self, tick: u64, delay: Duration) -> TickGap {
        if delay > Duration::ZERO {
            TickGap::Sleep(delay)
        } else if tick % self.forced_timer_every == 0 {
            TickGap::Sleep(Duration::ZERO)
        } else {
            TickGap::Yield
        }
    }
}

/// Caps how often the render hook fires.
///
/// Very fast simulations tick far above any sensible frame rate; rendering
/// every tick would flood the surface. The throttle lets a render through
/// only when more than the minimum gap has passed since the previous one.
#[derive(Debug)]
pub struct RenderThrottle {
    min_gap: Duration,
    last_render: Option<Instant>,
}

impl RenderThrottle {
    /// Throttle with an explicit minimum gap.
    pub fn new(min_gap: Duration) -> Self {
        Self {
            min_gap,
            last_render: None,
        }
    }

    /// True when a render may fire at `now`; records the render time when
    /// it does. The first call always passes.
    pub fn should_render(&mut self, now: Instant) -> bool {
        match self.last_render {
            Some(last) if now.duration_since(last) <= self.min_gap => false,
            _ => {
                self.last_render = Some(now);
                true
            }
        }
    }
}

impl Default for RenderThrottle {
    fn default() -> Self {
        Self::new(MIN_RENDER_GAP)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_delay_always_sleeps() {
        let policy = PacingPolicy::for_population(100);
        let delay = Duration::from_millis(5);
        for tick in 1..100 {
            assert_eq!(policy.gap(tick, delay), TickGap::Sleep(delay));
        }
    }

    #[test]
    fn test_zero_delay_mostly_yields_but_periodically_sleeps() {
        let policy = PacingPolicy::for_population(100); // forced timer every 25
        assert_eq!(policy.gap(1, Duration::ZERO), TickGap::Yield);
        assert_eq!(policy.gap(24, Duration::ZERO), TickGap::Yield);
        assert_eq!(
            policy.gap(25, Duration::ZERO),
            TickGap::Sleep(Duration::ZERO)
        );
        assert_eq!(policy.gap(26, Duration::ZERO), TickGap::Yield);
        assert_eq!(
            policy.gap(50, Duration::ZERO),
            TickGap::Sleep(Duration::ZERO)
        );
    }

    #[test]
    fn test_forced_timer_cadence_scales_with_population() {
        // Tiny cohorts clamp low, huge cohorts clamp high.
        let small = PacingPolicy::for_population(1);
        let medium = PacingPolicy::for_population(400);
        let huge = PacingPolicy::for_population(2000);

        assert_eq!(small.gap(10, Duration::ZERO), TickGap::Sleep(Duration::ZERO));
        assert_eq!(medium.gap(10, Duration::ZERO), TickGap::Yield);
        assert_eq!(
            medium.gap(100, Duration::ZERO),
            TickGap::Sleep(Duration::ZERO)
        );
        assert_eq!(huge.gap(499, Duration::ZERO), TickGap::Yield);
        assert_eq!(huge.gap(500, Duration::ZERO), TickGap::Sleep(Duration::ZERO));
    }

    #[test]
    fn test_throttle_first_render_always_passes() {
        let mut throttle = RenderThrottle::default();
        assert!(throttle.should_render(Instant::now()));
    }

    #[test]
    fn test_throttle_blocks_within_gap_and_passes_beyond_it() {
        let mut throttle = RenderThrottle::new(Duration::from_millis(10));
        let start = Instant::now();

        assert!(throttle.should_render(start));
        assert!(!throttle.should_render(start + Duration::from_millis(5)));
        assert!(!throttle.should_render(start + Duration::from_millis(10)));
        assert!(throttle.should_render(start + Duration::from_millis(11)));
        // The passing render resets the window.
        assert!(!throttle.should_render(start + Duration::from_millis(15)));
    }
}
