//! Animation clock and the time-driven outline reveal.

/// Longest step the snow integrator will take, in seconds.
///
/// Browsers stop delivering animation frames to hidden tabs; without a cap
/// the first frame after returning would move every flake by minutes.
pub const MAX_FRAME_DELTA: f64 = 0.1;

/// Time sample for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime {
    /// Milliseconds since the scene started. Never negative.
    pub elapsed_ms: f64,
    /// Seconds since the previous frame, clamped to `[0, MAX_FRAME_DELTA]`.
    pub dt: f64,
}

/// Monotonic clock fed with host timestamps (milliseconds).
#[derive(Debug, Clone)]
pub struct AnimationClock {
    start_ms: f64,
    last_ms: f64,
    frames: u64,
}

impl AnimationClock {
    pub fn new(start_ms: f64) -> Self {
        Self {
            start_ms,
            last_ms: start_ms,
            frames: 0,
        }
    }

    /// Sample the clock for a new frame.
    pub fn tick(&mut self, now_ms: f64) -> FrameTime {
        let dt = ((now_ms - self.last_ms) / 1000.0).clamp(0.0, MAX_FRAME_DELTA);
        // Timestamps can arrive slightly out of order around tab switches
        self.last_ms = self.last_ms.max(now_ms);
        self.frames += 1;
        FrameTime {
            elapsed_ms: (now_ms - self.start_ms).max(0.0),
            dt,
        }
    }

    pub fn start_ms(&self) -> f64 {
        self.start_ms
    }

    /// Number of frames sampled so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

/// How the outline stroke is drawn at a given moment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StrokeReveal {
    /// Dash pattern `[dash, dash]` shifted by `offset`; `offset == dash` hides
    /// the whole stroke, `0` shows it.
    Dashed { dash: f64, offset: f64 },
    Solid,
}

impl StrokeReveal {
    /// Reveal state after `elapsed_ms`, for a reveal lasting `duration_ms`.
    pub fn at(elapsed_ms: f64, duration_ms: f64, dash: f64) -> Self {
        if duration_ms <= 0.0 {
            return StrokeReveal::Solid;
        }
        let progress = (elapsed_ms.max(0.0) / duration_ms).min(1.0);
        if progress < 1.0 {
            StrokeReveal::Dashed {
                dash,
                offset: dash * (1.0 - progress),
            }
        } else {
            StrokeReveal::Solid
        }
    }

    /// Current dash offset; a solid stroke reports 0.
    pub fn offset(&self) -> f64 {
        match *self {
            StrokeReveal::Dashed { offset, .. } => offset,
            StrokeReveal::Solid => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_measures_from_start() {
        let mut clock = AnimationClock::new(1000.0);
        let t = clock.tick(1016.0);
        assert_eq!(t.elapsed_ms, 16.0);
        assert!((t.dt - 0.016).abs() < 1e-12);
        assert_eq!(clock.frames(), 1);
    }

    #[test]
    fn long_gaps_are_clamped() {
        let mut clock = AnimationClock::new(0.0);
        clock.tick(16.0);
        let t = clock.tick(60_000.0);
        assert_eq!(t.dt, MAX_FRAME_DELTA);
        assert_eq!(t.elapsed_ms, 60_000.0);
    }

    #[test]
    fn timestamps_before_start_do_not_go_negative() {
        let mut clock = AnimationClock::new(500.0);
        let t = clock.tick(480.0);
        assert_eq!(t.elapsed_ms, 0.0);
        assert_eq!(t.dt, 0.0);
    }

    #[test]
    fn reveal_starts_hidden_and_ends_solid() {
        assert_eq!(
            StrokeReveal::at(0.0, 3500.0, 3200.0),
            StrokeReveal::Dashed {
                dash: 3200.0,
                offset: 3200.0
            }
        );
        assert_eq!(StrokeReveal::at(3500.0, 3500.0, 3200.0), StrokeReveal::Solid);
        assert_eq!(StrokeReveal::at(10_000.0, 3500.0, 3200.0), StrokeReveal::Solid);
    }

    #[test]
    fn reveal_halfway() {
        let r = StrokeReveal::at(1750.0, 3500.0, 3200.0);
        assert_eq!(r.offset(), 1600.0);
    }
}
