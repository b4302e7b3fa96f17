use crate::types::media::Clip;

/// Position inside the clip's source media, in seconds, for a timeline
/// position in milliseconds.
///
/// The offset from the clip start is scaled by the clip speed, so the clip
/// keeps its timeline duration while consuming `duration * speed` of source.
/// The result never goes below zero. The same mapping serves the play-start
/// seek, the activation seek, and scrub drift checks.
pub fn source_time_seconds(clip: &Clip, timeline_time_ms: i64) -> f64 {
    let clip_relative_ms = timeline_time_ms.saturating_sub(clip.start_time_ms) as f64;
    let source_ms = clip.in_point_ms as f64 + clip_relative_ms * clip.speed();
    source_ms.max(0.0) / 1000.0
}
