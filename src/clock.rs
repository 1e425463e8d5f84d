/// Timing handed to a frame, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameTime {
    /// Time since the previous tick, zero on the first one.
    pub delta: f32,
    /// Time since the first tick.
    pub elapsed: f32,
}

/// Wall clock fed with millisecond timestamps (`performance.now()` or the
/// `requestAnimationFrame` argument).
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    start: Option<f64>,
    previous: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a tick at `now_ms`. Timestamps older than the previous one are
    /// treated as equal to it so elapsed time never runs backwards.
    pub fn tick(&mut self, now_ms: f64) -> FrameTime {
        let start = *self.start.get_or_insert(now_ms);
        let previous = self.previous.unwrap_or(now_ms);
        let now = now_ms.max(previous);
        self.previous = Some(now);

        FrameTime {
            delta: ((now - previous) / 1000.0) as f32,
            elapsed: ((now - start) / 1000.0) as f32,
        }
    }

    /// Timestamp of the first tick, if any.
    pub fn started_at(&self) -> Option<f64> {
        self.start
    }
}
