//! HUD helpers that don't touch the DOM

/// Frames averaged by the FPS readout
const FPS_WINDOW: usize = 60;

/// Rolling frames-per-second over the last `FPS_WINDOW` frames
///
/// Fed with `requestAnimationFrame` timestamps in milliseconds.
#[derive(Debug, Clone)]
pub struct FpsMeter {
    frame_times: [f64; FPS_WINDOW],
    frame_index: usize,
    fps: u32,
}

impl Default for FpsMeter {
    fn default() -> Self {
        Self {
            frame_times: [0.0; FPS_WINDOW],
            frame_index: 0,
            fps: 0,
        }
    }
}

impl FpsMeter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a frame timestamp and return the current reading
    pub fn record(&mut self, time_ms: f64) -> u32 {
        self.frame_times[self.frame_index] = time_ms;
        self.frame_index = (self.frame_index + 1) % FPS_WINDOW;

        // Slot we just advanced to holds the oldest sample
        let oldest = self.frame_times[self.frame_index];
        if oldest > 0.0 {
            let elapsed = time_ms - oldest;
            if elapsed > 0.0 {
                self.fps = ((FPS_WINDOW - 1) as f64 * 1000.0 / elapsed).round() as u32;
            }
        }
        self.fps
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Forget all samples (e.g. after a pause)
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
