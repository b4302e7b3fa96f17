use crate::types::blur::BlurEffect;
use crate::types::media::{Clip, ClipId, ClipShadow, ClipTransform, CropRect};
use crate::types::track::{Track, TrackId};
use crate::types::zoom::ZoomTransform;

/// How the render layer should draw one active clip. Crop, corner radius,
/// transform and shadow are copied from the clip as-is; the sync state
/// machine never touches them. Zoom and blur come from the effect tracks.
#[derive(Debug, Clone, PartialEq)]
pub struct PresentationStyle {
    pub clip_id: ClipId,
    pub track_id: TrackId,
    pub sort_order: i32,
    pub crop: CropRect,
    pub corner_radius: f64,
    pub transform: ClipTransform,
    pub shadow: ClipShadow,
    pub zoom: ZoomTransform,
    pub blur: Option<BlurEffect>,
}

impl PresentationStyle {
    pub fn for_clip(
        track: &Track,
        clip: &Clip,
        zoom: ZoomTransform,
        blur: Option<BlurEffect>,
    ) -> Self {
        Self {
            clip_id: clip.id.clone(),
            track_id: track.id.clone(),
            sort_order: track.sort_order,
            crop: clip.crop,
            corner_radius: clip.corner_radius,
            transform: clip.transform,
            shadow: clip.shadow.clone(),
            zoom,
            blur,
        }
    }
}
