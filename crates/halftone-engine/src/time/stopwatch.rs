use std::time::Instant;

/// Monotonic elapsed-time source for a single animated instance.
///
/// Starts at zero when created. Each instance owns its own stopwatch, so
/// elapsed time is never carried over from a previous mount.
#[derive(Debug, Copy, Clone)]
pub struct Stopwatch {
    start: Instant,
}

impl Stopwatch {
    pub fn started_at(start: Instant) -> Self {
        Self { start }
    }

    /// Seconds between start and `now`. Never negative.
    pub fn elapsed_secs(&self, now: Instant) -> f32 {
        now.saturating_duration_since(self.start).as_secs_f32()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn elapsed_starts_at_zero() {
        let t0 = Instant::now();
        assert_eq!(Stopwatch::started_at(t0).elapsed_secs(t0), 0.0);
    }

    #[test]
    fn elapsed_tracks_time_after_start() {
        let t0 = Instant::now();
        let sw = Stopwatch::started_at(t0);
        let e = sw.elapsed_secs(t0 + Duration::from_millis(1500));
        assert!((e - 1.5).abs() < 1e-6);
    }

    #[test]
    fn elapsed_saturates_for_earlier_instants() {
        let t0 = Instant::now();
        let sw = Stopwatch::started_at(t0 + Duration::from_secs(1));
        assert_eq!(sw.elapsed_secs(t0), 0.0);
    }
}
