/// Frame timing snapshot.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameTime {
    /// Seconds since the previous accepted tick.
    pub dt: f32,

    /// Animation-frame timestamp in milliseconds.
    pub time: f64,

    /// Monotonic count of accepted frames.
    pub frame_index: u64,
}

/// Turns `requestAnimationFrame` timestamps into frame deltas.
///
/// Ticks whose delta exceeds `max_dt` are dropped: a backgrounded tab resumes with
/// a huge gap that would otherwise fling every body off screen. The baseline still
/// advances, so the next frame is measured from the dropped one.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: f64,
    frame_index: u64,
    max_dt: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::with_max_dt(1.0)
    }

    pub fn with_max_dt(max_dt: f32) -> Self {
        Self {
            last: 0.0,
            frame_index: 0,
            max_dt,
        }
    }

    /// Advances the clock to `time` (milliseconds). `None` means skip the frame.
    pub fn tick(&mut self, time: f64) -> Option<FrameTime> {
        let dt = ((time - self.last) * 0.001) as f32;
        self.last = time;

        if !(0.0..=self.max_dt).contains(&dt) {
            return None;
        }

        let frame = FrameTime {
            dt,
            time,
            frame_index: self.frame_index,
        };
        self.frame_index = self.frame_index.wrapping_add(1);

        Some(frame)
    }

    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
