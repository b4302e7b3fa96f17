use crate::config::EngineConfig;
use crate::error::SyncError;
use crate::player::{FrameSink, PlayerFactory};
use crate::sync::controller::{ClipSyncController, SyncState};
use crate::sync::presentation::PresentationStyle;
use crate::types::media::{Clip, ClipId};
use crate::types::playback_state::PlaybackState;
use crate::types::timeline::Timeline;
use crate::types::track::TrackId;

use log::{debug, info, warn};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// A change reported by the editor that the controllers must react to.
#[derive(Debug, Clone, PartialEq)]
pub enum TimelineEvent {
    PlaybackToggled,
    Scrubbed,
    /// Display refresh while playing; only boundary crossings matter.
    Tick,
    VolumeChanged,
    TrackVisibilityChanged(TrackId),
    ClipEdited(ClipId),
}

impl TimelineEvent {
    /// Whether the event can change which clips are active or where the
    /// playhead is. Other events only carry clip fields or mix levels.
    pub fn moves_playhead(&self) -> bool {
        match self {
            TimelineEvent::PlaybackToggled
            | TimelineEvent::Scrubbed
            | TimelineEvent::Tick
            | TimelineEvent::TrackVisibilityChanged(_) => true,
            TimelineEvent::VolumeChanged | TimelineEvent::ClipEdited(_) => false,
        }
    }

    fn affects(&self, track_id: &str, clip_id: &str) -> bool {
        match self {
            TimelineEvent::TrackVisibilityChanged(id) => id == track_id,
            TimelineEvent::ClipEdited(id) => id == clip_id,
            _ => true,
        }
    }
}

/// Owns one `ClipSyncController` per mounted clip and fans timeline events
/// out to them.
pub struct TimelineDriver<F: PlayerFactory> {
    factory: F,
    controllers: HashMap<ClipId, ClipSyncController>,
    // clip id -> source path that failed
    broken: HashMap<ClipId, String>,
    drift_tolerance_secs: f64,
}

impl<F: PlayerFactory> TimelineDriver<F> {
    pub fn new(factory: F, config: &EngineConfig) -> Self {
        Self {
            factory,
            controllers: HashMap::new(),
            broken: HashMap::new(),
            drift_tolerance_secs: config.drift_tolerance_secs(),
        }
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    /// Create the player and controller for `clip`. Mounting an already
    /// mounted clip does nothing.
    pub fn mount(&mut self, clip: &Clip) -> Result<(), SyncError> {
        if self.controllers.contains_key(&clip.id) {
            return Ok(());
        }
        match self.factory.create(clip) {
            Ok(player) => {
                self.broken.remove(&clip.id);
                self.controllers.insert(
                    clip.id.clone(),
                    ClipSyncController::new(clip, player, self.drift_tolerance_secs),
                );
                info!("Mounted clip {}", clip.id);
                Ok(())
            }
            Err(err) => {
                warn!("Clip {} is broken: {}", clip.id, err);
                self.broken.insert(clip.id.clone(), clip.source_path.clone());
                Err(err)
            }
        }
    }

    /// Dispose the clip's controller, pausing its player.
    pub fn unmount(&mut self, clip_id: &str) -> bool {
        self.broken.remove(clip_id);
        match self.controllers.remove(clip_id) {
            Some(controller) => {
                drop(controller);
                debug!("Unmounted clip {}", clip_id);
                true
            }
            None => false,
        }
    }

    /// Bring the mounted set in line with the timeline: unmount clips that
    /// disappeared, rebuild clips whose source changed, mount new ones.
    /// Broken clips are retried only once their source path changes.
    pub fn reconcile(&mut self, timeline: &Timeline) {
        let live: HashSet<&str> = timeline.clips().map(|(_, clip)| clip.id.as_str()).collect();

        let stale: Vec<ClipId> = self
            .controllers
            .keys()
            .filter(|id| !live.contains(id.as_str()))
            .cloned()
            .collect();
        for id in stale {
            self.unmount(&id);
        }
        self.broken.retain(|id, _| live.contains(id.as_str()));

        let resourced: Vec<ClipId> = timeline
            .clips()
            .filter(|(_, clip)| {
                self.controllers
                    .get(&clip.id)
                    .is_some_and(|controller| controller.source_path() != clip.source_path)
            })
            .map(|(_, clip)| clip.id.clone())
            .collect();
        for id in resourced {
            self.unmount(&id);
        }

        for (_, clip) in timeline.clips() {
            if self.broken.get(&clip.id) == Some(&clip.source_path) {
                continue;
            }
            // Failures are recorded in the broken set by `mount`.
            let _ = self.mount(clip);
        }
    }

    /// Run the transitions `event` implies on every affected controller.
    pub fn handle(&mut self, event: &TimelineEvent, timeline: &Timeline, playback: &PlaybackState) {
        if let TimelineEvent::TrackVisibilityChanged(id) = event {
            if timeline.track(id).is_none() {
                debug!("Visibility change for unknown track {}", id);
                return;
            }
        }
        let moves_playhead = event.moves_playhead();
        for (track, clip) in timeline.clips() {
            if !event.affects(&track.id, &clip.id) {
                continue;
            }
            let Some(controller) = self.controllers.get_mut(&clip.id) else {
                continue;
            };
            if moves_playhead {
                controller.update(clip, track, playback);
            } else {
                controller.apply_edit(clip, track, playback);
            }
            if let Some(err) = controller.player_mut().take_error() {
                if !self.broken.contains_key(&clip.id) {
                    warn!("Clip {} reported a decode error: {}", clip.id, err);
                }
                self.broken.insert(clip.id.clone(), clip.source_path.clone());
            }
        }
    }

    /// Presentation of every mounted, healthy, active video clip at the
    /// current position, in track order.
    pub fn presentation(&self, timeline: &Timeline, playback: &PlaybackState) -> Vec<PresentationStyle> {
        let zoom = timeline.zoom_at(playback.current_time_ms);
        let blur = timeline.blur_at(playback.current_time_ms);
        timeline
            .active_clips_at(playback.current_time_ms)
            .into_iter()
            .filter(|(track, clip)| {
                track.is_video()
                    && self.controllers.contains_key(&clip.id)
                    && !self.broken.contains_key(&clip.id)
            })
            .map(|(track, clip)| PresentationStyle::for_clip(track, clip, zoom, blur))
            .collect()
    }

    pub fn attach_surface(&mut self, clip_id: &str, sink: Arc<dyn FrameSink>) -> Result<(), SyncError> {
        let controller = self
            .controllers
            .get_mut(clip_id)
            .ok_or_else(|| SyncError::UnknownClip(clip_id.to_string()))?;
        controller.player_mut().attach_surface(sink);
        Ok(())
    }

    pub fn detach_surface(&mut self, clip_id: &str) -> Result<(), SyncError> {
        let controller = self
            .controllers
            .get_mut(clip_id)
            .ok_or_else(|| SyncError::UnknownClip(clip_id.to_string()))?;
        controller.player_mut().detach_surface();
        Ok(())
    }

    pub fn sync_state(&self, clip_id: &str) -> Option<SyncState> {
        self.controllers.get(clip_id).map(|controller| controller.state())
    }

    pub fn is_mounted(&self, clip_id: &str) -> bool {
        self.controllers.contains_key(clip_id)
    }

    pub fn is_broken(&self, clip_id: &str) -> bool {
        self.broken.contains_key(clip_id)
    }

    pub fn broken_clips(&self) -> impl Iterator<Item = &str> {
        self.broken.keys().map(|id| id.as_str())
    }

    pub fn mounted_count(&self) -> usize {
        self.controllers.len()
    }
}
