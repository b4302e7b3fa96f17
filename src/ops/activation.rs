use crate::types::media::Clip;
use crate::types::track::Track;

/// Half-open activation window `[start, start + duration)`. The boundary
/// instant belongs to the next clip, so adjacent clips never overlap.
pub fn is_active(clip: &Clip, timeline_time_ms: i64) -> bool {
    clip.is_valid()
        && timeline_time_ms >= clip.start_time_ms
        && timeline_time_ms < clip.end_time_ms()
}

/// Activation gated by track visibility.
pub fn is_clip_active(track: &Track, clip: &Clip, timeline_time_ms: i64) -> bool {
    track.visible && is_active(clip, timeline_time_ms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::track::TrackKind;

    #[test]
    fn test_half_open_window() {
        let clip = Clip::new("a.mp4", 1000, 5000);
        assert!(!is_active(&clip, 999));
        assert!(is_active(&clip, 1000));
        assert!(is_active(&clip, 5999));
        assert!(!is_active(&clip, 6000));
    }

    #[test]
    fn test_adjacent_clips_never_both_active() {
        let first = Clip::new("a.mp4", 0, 3000);
        let second = Clip::new("b.mp4", 3000, 3000);
        for t in -10..7000 {
            assert!(!(is_active(&first, t) && is_active(&second, t)));
        }
        assert!(is_active(&second, 3000));
    }

    #[test]
    fn test_never_active_outside_window() {
        let clip = Clip::new("a.mp4", 250, 750);
        for t in -500..2000 {
            if is_active(&clip, t) {
                assert!(t >= 250 && t < 1000);
            }
        }
    }

    #[test]
    fn test_invalid_duration_never_active() {
        let clip = Clip::new("a.mp4", 1000, 0);
        assert!(!is_active(&clip, 1000));
        let clip = Clip::new("a.mp4", 1000, -20);
        assert!(!is_active(&clip, 990));
    }

    #[test]
    fn test_track_visibility_gates_activation() {
        let clip = Clip::new("a.mp4", 0, 1000);
        let mut track = Track::new("Main", TrackKind::Video, 0);
        assert!(is_clip_active(&track, &clip, 500));
        track.visible = false;
        assert!(!is_clip_active(&track, &clip, 500));
    }
}
