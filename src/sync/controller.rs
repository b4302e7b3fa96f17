use crate::ops::activation::is_clip_active;
use crate::ops::time_map::source_time_seconds;
use crate::player::MediaPlayer;
use crate::types::media::{Clip, ClipId};
use crate::types::playback_state::PlaybackState;
use crate::types::track::Track;

use log::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    /// Not playing on behalf of the timeline.
    Idle,
    /// Waiting to seek and start on the next active tick of this session.
    ArmedForPlayback,
    /// Aligned once this session; the player's own clock is trusted.
    Synced,
}

/// Keeps one clip's player in step with the timeline.
///
/// Every call to [`update`](Self::update) receives the full inputs it reads,
/// so the same inputs always produce the same player calls.
pub struct ClipSyncController {
    clip_id: ClipId,
    source_path: String,
    player: Box<dyn MediaPlayer>,
    state: SyncState,
    was_playing: bool,
    was_active: bool,
    applied_rate: f64,
    drift_tolerance_secs: f64,
}

impl ClipSyncController {
    pub fn new(clip: &Clip, player: Box<dyn MediaPlayer>, drift_tolerance_secs: f64) -> Self {
        let applied_rate = player.playback_rate();
        Self {
            clip_id: clip.id.clone(),
            source_path: clip.source_path.clone(),
            player,
            state: SyncState::Idle,
            was_playing: false,
            was_active: false,
            applied_rate,
            drift_tolerance_secs,
        }
    }

    /// Source the player was built for.
    pub fn source_path(&self) -> &str {
        &self.source_path
    }

    pub fn state(&self) -> SyncState {
        self.state
    }

    pub fn player_mut(&mut self) -> &mut dyn MediaPlayer {
        self.player.as_mut()
    }

    /// Run the sync transitions for a playhead position: play start and stop,
    /// activation, boundary crossings and paused scrubbing.
    pub fn update(&mut self, clip: &Clip, track: &Track, playback: &PlaybackState) {
        let timeline_ms = playback.current_time_ms;
        let active = is_clip_active(track, clip, timeline_ms);
        let started = playback.is_playing && !self.was_playing;
        let stopped = !playback.is_playing && self.was_playing;
        let activated = active && !self.was_active;

        self.apply_mix(clip, track, playback);
        self.apply_rate(clip);

        if started || (playback.is_playing && activated) {
            self.state = SyncState::ArmedForPlayback;
        }
        if stopped {
            if !self.player.is_paused() {
                self.player.pause();
            }
            self.state = SyncState::ArmedForPlayback;
        }

        if playback.is_playing {
            match (self.state, active) {
                (SyncState::ArmedForPlayback, true) => self.sync_and_play(clip, timeline_ms),
                (SyncState::Synced, false) => {
                    self.player.pause();
                    self.state = SyncState::Idle;
                    debug!("Clip {} left the active window, paused", self.clip_id);
                }
                _ => {}
            }
        } else if active {
            self.scrub(clip, timeline_ms, activated);
        }

        self.was_playing = playback.is_playing;
        self.was_active = active;
    }

    /// Push rate, volume and mute for an edit that does not move the
    /// playhead. Never seeks and leaves the sync state alone; activation
    /// changes caused by the edit are picked up by the next `update`.
    pub fn apply_edit(&mut self, clip: &Clip, track: &Track, playback: &PlaybackState) {
        self.apply_mix(clip, track, playback);
        self.apply_rate(clip);
    }

    fn sync_and_play(&mut self, clip: &Clip, timeline_ms: i64) {
        let target = source_time_seconds(clip, timeline_ms);
        self.player.set_current_time(target);
        // A rejected start is retried by the next play-start or activation.
        if let Err(err) = self.player.play() {
            debug!("Clip {} failed to start: {}", self.clip_id, err);
        }
        self.state = SyncState::Synced;
        debug!(
            "Clip {} synced at {}ms -> {:.3}s",
            self.clip_id, timeline_ms, target
        );
    }

    fn scrub(&mut self, clip: &Clip, timeline_ms: i64, activated: bool) {
        let target = source_time_seconds(clip, timeline_ms);
        let drift = (self.player.current_time() - target).abs();
        if activated || drift > self.drift_tolerance_secs {
            trace!(
                "Clip {} scrub seek to {:.3}s (drift {:.3}s)",
                self.clip_id, target, drift
            );
            self.player.set_current_time(target);
        }
    }

    fn apply_rate(&mut self, clip: &Clip) {
        let speed = clip.speed();
        if self.applied_rate != speed {
            self.player.set_playback_rate(speed);
            self.applied_rate = speed;
        }
    }

    fn apply_mix(&mut self, clip: &Clip, track: &Track, playback: &PlaybackState) {
        let volume = playback.master_volume() * track.gain() * clip.gain();
        let muted = playback.is_muted || track.muted || clip.muted;
        if (self.player.volume() - volume).abs() > f64::EPSILON {
            self.player.set_volume(volume);
        }
        if self.player.is_muted() != muted {
            self.player.set_muted(muted);
        }
    }
}

impl Drop for ClipSyncController {
    fn drop(&mut self) {
        if !self.player.is_paused() {
            self.player.pause();
        }
    }
}
