use crate::types::playback_state::PlaybackState;
use std::time::{Duration, Instant};

/// Host-side writer of `PlaybackState`: advances the playhead from wall-clock
/// time while playing and clamps it to the timeline.
pub struct TimelineClock {
    state: PlaybackState,
    duration_ms: i64,
    last_update: Instant,
}

impl TimelineClock {
    pub fn new(duration_ms: i64) -> Self {
        Self {
            state: PlaybackState::new(),
            duration_ms: duration_ms.max(0),
            last_update: Instant::now(),
        }
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    /// Advance by the wall-clock time since the previous update.
    pub fn update(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_update);
        self.last_update = now;
        self.advance(elapsed);
    }

    /// Advance by `elapsed` if playing. Reaching the end stops playback.
    pub fn advance(&mut self, elapsed: Duration) {
        if !self.state.is_playing {
            return;
        }
        let next = self
            .state
            .current_time_ms
            .saturating_add(elapsed.as_millis() as i64);
        self.state.current_time_ms = next.clamp(0, self.duration_ms);
        if self.state.current_time_ms >= self.duration_ms {
            self.state.is_playing = false;
        }
    }

    pub fn seek(&mut self, time_ms: i64) {
        self.state.current_time_ms = time_ms.clamp(0, self.duration_ms);
    }

    /// Start playing. Returns false at the end of the timeline.
    pub fn play(&mut self) -> bool {
        if self.state.current_time_ms >= self.duration_ms {
            return false;
        }
        self.state.is_playing = true;
        self.last_update = Instant::now();
        true
    }

    pub fn pause(&mut self) {
        self.state.is_playing = false;
    }

    pub fn set_volume(&mut self, volume: f64) {
        self.state.volume = volume.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.state.is_muted = muted;
    }
}
