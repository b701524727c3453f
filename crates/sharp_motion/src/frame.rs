//! Frame timing.

use crate::config::FrameConfig;

/// Per-frame statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameStats {
    /// Frame number, starting at 0.
    pub frame: u64,
    /// Delta time used for this frame, after clamping.
    pub dt: f32,
    /// Delta time the host reported.
    pub raw_dt: f32,
    /// Events applied this frame.
    pub events_processed: u32,
}

/// Clamps host delta times and keeps running statistics.
///
/// A long stall (tab in background, debugger pause) would otherwise feed the
/// springs one huge step.
#[derive(Debug, Clone)]
pub struct FrameClock {
    max_dt: f32,
    frames: u64,
    total_dt: f64,
    clamped: u64,
    last: FrameStats,
}

impl FrameClock {
    /// Creates a clock at frame 0.
    #[must_use]
    pub fn new(config: &FrameConfig) -> Self {
        Self {
            max_dt: config.max_frame_dt,
            frames: 0,
            total_dt: 0.0,
            clamped: 0,
            last: FrameStats::default(),
        }
    }

    /// Starts a frame and returns the delta time to simulate.
    ///
    /// Negative or non-finite input becomes 0.
    pub fn begin(&mut self, raw_dt: f32) -> f32 {
        let sane = if raw_dt.is_finite() { raw_dt.max(0.0) } else { 0.0 };
        let dt = sane.min(self.max_dt);
        if sane > self.max_dt {
            self.clamped += 1;
            tracing::warn!(raw_dt, max = self.max_dt, frame = self.frames, "frame time clamped");
        }
        self.last = FrameStats {
            frame: self.frames,
            dt,
            raw_dt,
            events_processed: 0,
        };
        dt
    }

    /// Finishes the frame started by [`FrameClock::begin`].
    pub fn end(&mut self, events_processed: u32) -> FrameStats {
        self.last.events_processed = events_processed;
        self.frames += 1;
        self.total_dt += f64::from(self.last.dt);
        tracing::trace!(frame = self.last.frame, dt = self.last.dt, events_processed, "frame");
        self.last
    }

    /// Frames completed.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Frames whose delta time was clamped.
    #[must_use]
    pub fn clamped_frames(&self) -> u64 {
        self.clamped
    }

    /// Mean simulated delta time, or 0 before the first frame.
    #[must_use]
    pub fn average_dt(&self) -> f64 {
        if self.frames == 0 {
            0.0
        } else {
            self.total_dt / self.frames as f64
        }
    }

    /// Total simulated time in seconds.
    #[must_use]
    pub fn elapsed(&self) -> f64 {
        self.total_dt
    }

    /// Stats of the most recent frame.
    #[must_use]
    pub fn last(&self) -> FrameStats {
        self.last
    }
}
