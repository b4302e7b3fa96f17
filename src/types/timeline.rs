use crate::error::SyncError;
use crate::ops::activation::is_clip_active;
use crate::types::media::Clip;
use crate::types::blur::{BlurClip, BlurEffect};
use crate::types::track::Track;
use crate::types::zoom::{ZoomClip, ZoomTransform};

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Clip and track definitions as read from the editor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timeline {
    #[serde(default)]
    pub tracks: Vec<Track>,
    #[serde(default)]
    pub zoom_clips: Vec<ZoomClip>,
    #[serde(default)]
    pub blur_clips: Vec<BlurClip>,
}

impl Timeline {
    pub fn new() -> Self {
        Timeline {
            tracks: Vec::new(),
            zoom_clips: Vec::new(),
            blur_clips: Vec::new(),
        }
    }

    /// Load a timeline from a JSON file at the given path.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Timeline, SyncError> {
        let mut file = File::open(path)?;
        let mut json = String::new();
        file.read_to_string(&mut json)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Save the timeline to a JSON file at the given path.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), SyncError> {
        let json = serde_json::to_string_pretty(self)?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }

    /// End of the last clip on any track.
    pub fn duration_ms(&self) -> i64 {
        self.clips()
            .map(|(_, clip)| clip.end_time_ms())
            .max()
            .unwrap_or(0)
    }

    /// Tracks in display order (lowest `sort_order` first).
    pub fn ordered_tracks(&self) -> Vec<&Track> {
        let mut tracks: Vec<&Track> = self.tracks.iter().collect();
        tracks.sort_by_key(|track| track.sort_order);
        tracks
    }

    pub fn track(&self, track_id: &str) -> Option<&Track> {
        self.tracks.iter().find(|track| track.id == track_id)
    }

    /// Every clip paired with the track that owns it.
    pub fn clips(&self) -> impl Iterator<Item = (&Track, &Clip)> {
        self.tracks
            .iter()
            .flat_map(|track| track.clips.iter().map(move |clip| (track, clip)))
    }

    pub fn find_clip(&self, clip_id: &str) -> Option<(&Track, &Clip)> {
        self.clips().find(|(_, clip)| clip.id == clip_id)
    }

    /// Clips that should be visibly playing at `time_ms`, in track order.
    pub fn active_clips_at(&self, time_ms: i64) -> Vec<(&Track, &Clip)> {
        self.ordered_tracks()
            .into_iter()
            .flat_map(|track| {
                track
                    .clips
                    .iter()
                    .filter(move |clip| is_clip_active(track, clip, time_ms))
                    .map(move |clip| (track, clip))
            })
            .collect()
    }

    /// Zoom of the composed frame at `time_ms`. The earliest-starting zoom
    /// segment wins when segments overlap.
    pub fn zoom_at(&self, time_ms: i64) -> ZoomTransform {
        self.zoom_clips
            .iter()
            .filter(|zoom| zoom.contains(time_ms))
            .min_by_key(|zoom| zoom.start_time_ms)
            .and_then(|zoom| zoom.transform_at(time_ms))
            .unwrap_or_default()
    }

    /// Blur of the composed frame at `time_ms`, if a blur segment covers it.
    /// Overlaps resolve like zoom segments.
    pub fn blur_at(&self, time_ms: i64) -> Option<BlurEffect> {
        self.blur_clips
            .iter()
            .filter(|blur| blur.contains(time_ms))
            .min_by_key(|blur| blur.start_time_ms)
            .and_then(|blur| blur.effect_at(time_ms))
    }
}
