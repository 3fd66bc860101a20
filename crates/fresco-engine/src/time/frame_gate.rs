use std::time::{Duration, Instant};

/// Elapsed-time gate for update/composite work.
///
/// This is a frame gate, not a fixed-step accumulator: when the gate fires,
/// the baseline moves to `now` rather than advancing by one interval, so any
/// overshoot past the threshold is handed to the caller as a larger delta
/// and never compensated on later ticks.
///
/// `try_tick` takes `now` as an argument so callers (and tests) control the
/// clock.
#[derive(Debug, Clone)]
pub struct FrameGate {
    last: Instant,
    interval: Duration,
}

impl FrameGate {
    /// Default threshold, ~60 updates per second.
    pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(16);

    pub fn new() -> Self {
        Self::starting_at(Self::DEFAULT_INTERVAL, Instant::now())
    }

    /// Gate with an explicit threshold and baseline.
    pub fn starting_at(interval: Duration, now: Instant) -> Self {
        Self {
            last: now,
            interval,
        }
    }

    /// Checks the gate at `now`.
    ///
    /// Below the threshold: `None`, baseline untouched. At or above it: the
    /// baseline moves to `now` and the elapsed time is returned in seconds,
    /// counted in whole milliseconds (the unit the gate is expressed in).
    pub fn try_tick(&mut self, now: Instant) -> Option<f32> {
        let elapsed = now.saturating_duration_since(self.last);
        if elapsed < self.interval {
            return None;
        }

        self.last = now;
        Some(elapsed.as_millis() as f32 / 1000.0)
    }

    /// Moves the baseline without firing; useful after long external stalls.
    pub fn reset(&mut self, now: Instant) {
        self.last = now;
    }
}

impl Default for FrameGate {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate_at(base: Instant) -> FrameGate {
        FrameGate::starting_at(FrameGate::DEFAULT_INTERVAL, base)
    }

    #[test]
    fn below_threshold_never_fires() {
        let base = Instant::now();
        let mut gate = gate_at(base);

        for ms in [0u64, 5, 10, 15] {
            assert_eq!(gate.try_tick(base + Duration::from_millis(ms)), None);
        }
    }

    #[test]
    fn crossing_threshold_fires_exactly_once() {
        let base = Instant::now();
        let mut gate = gate_at(base);

        let dt = gate.try_tick(base + Duration::from_millis(16)).unwrap();
        assert_eq!(dt, 0.016);

        // Immediately after firing the gate is closed again.
        assert_eq!(gate.try_tick(base + Duration::from_millis(17)), None);
        assert!(gate.try_tick(base + Duration::from_millis(33)).is_some());
    }

    #[test]
    fn overshoot_is_reported_not_compensated() {
        let base = Instant::now();
        let mut gate = gate_at(base);

        // 20 ms elapsed: the full elapsed time comes back and the baseline
        // moves to now, so the 4 ms overshoot is simply lost.
        let dt = gate.try_tick(base + Duration::from_millis(20)).unwrap();
        assert_eq!(dt, 0.020);
        assert_eq!(gate.try_tick(base + Duration::from_millis(35)), None);
        assert_eq!(
            gate.try_tick(base + Duration::from_millis(36)),
            Some(0.016)
        );
    }

    #[test]
    fn sub_millisecond_remainder_is_truncated() {
        let base = Instant::now();
        let mut gate = gate_at(base);

        let dt = gate.try_tick(base + Duration::from_micros(16_900)).unwrap();
        assert_eq!(dt, 0.016);
    }

    #[test]
    fn reset_moves_the_baseline_without_firing() {
        let base = Instant::now();
        let mut gate = gate_at(base);

        gate.reset(base + Duration::from_millis(100));
        assert_eq!(gate.try_tick(base + Duration::from_millis(110)), None);
        assert!(gate
            .try_tick(base + Duration::from_millis(116))
            .is_some());
    }
}
