//! Frame clock mapping wall time onto the controller's logical time.

use web_time::{Duration, Instant};

/// Wall-clock source for the controller's logical time.
///
/// `now()` is the time since the scene started, which is what
/// [`PickController::advance`](crate::reveal::PickController::advance)
/// expects. Frame rate is tracked on the side for logging.
#[derive(Debug, Clone)]
pub struct SceneClock {
    started: Instant,
    last_frame: Instant,
    /// Smoothed FPS using exponential moving average
    smoothed_fps: f32,
    /// Smoothing factor (lower = smoother, 0.0-1.0)
    smoothing: f32,
}

impl SceneClock {
    /// Clock starting at zero now.
    #[must_use]
    pub fn start() -> Self {
        let now = Instant::now();
        Self {
            started: now,
            last_frame: now,
            smoothed_fps: 60.0,
            smoothing: 0.05,
        }
    }

    /// Time since the clock started.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.started.elapsed()
    }

    /// Mark a frame boundary and return the logical time of the frame.
    pub fn frame(&mut self) -> Duration {
        let now = Instant::now();
        let frame_time = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        if frame_time > 0.0 {
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + (1.0 / frame_time) * self.smoothing;
        }
        now.duration_since(self.started)
    }

    /// Smoothed frames per second.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }
}
