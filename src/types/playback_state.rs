/// Shared transport state written by the host and read by every clip controller.
///
/// `current_time_ms` is authoritative only while paused. While playing it is
/// advisory: synced players follow their own clocks.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    pub is_playing: bool,
    pub current_time_ms: i64,
    pub volume: f64,
    pub is_muted: bool,
}

impl PlaybackState {
    pub fn new() -> Self {
        Self {
            is_playing: false,
            current_time_ms: 0,
            volume: 1.0,
            is_muted: false,
        }
    }

    /// Master volume clamped to 0..=1; NaN reads as silence.
    pub fn master_volume(&self) -> f64 {
        if self.volume.is_nan() {
            0.0
        } else {
            self.volume.clamp(0.0, 1.0)
        }
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::new()
    }
}
