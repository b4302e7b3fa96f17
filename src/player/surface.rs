use super::{FrameSink, VideoFrame};
use std::sync::Mutex;

/// Visual surface a player can be attached to. Keeps only the most recent
/// frame; the render layer picks it up on its own schedule.
#[derive(Debug, Default)]
pub struct VideoSurface {
    latest: Mutex<Option<VideoFrame>>,
    frames_received: Mutex<u64>,
}

impl VideoSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the latest frame, leaving the surface empty until the next one.
    pub fn take_frame(&self) -> Option<VideoFrame> {
        self.latest.lock().ok().and_then(|mut latest| latest.take())
    }

    pub fn latest_timestamp(&self) -> Option<f64> {
        self.latest
            .lock()
            .ok()
            .and_then(|latest| latest.as_ref().map(|frame| frame.timestamp))
    }

    pub fn frames_received(&self) -> u64 {
        self.frames_received.lock().map(|count| *count).unwrap_or(0)
    }
}

impl FrameSink for VideoSurface {
    fn push_frame(&self, frame: VideoFrame) {
        if let Ok(mut latest) = self.latest.lock() {
            *latest = Some(frame);
        }
        if let Ok(mut count) = self.frames_received.lock() {
            *count += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(timestamp: f64) -> VideoFrame {
        VideoFrame {
            data: vec![255; 16],
            width: 2,
            height: 2,
            timestamp,
        }
    }

    #[test]
    fn test_keeps_latest_frame_only() {
        let surface = VideoSurface::new();
        assert!(surface.take_frame().is_none());
        surface.push_frame(frame(1.0));
        surface.push_frame(frame(1.04));
        assert_eq!(surface.frames_received(), 2);
        assert_eq!(surface.latest_timestamp(), Some(1.04));
        let taken = surface.take_frame().unwrap();
        assert_eq!(taken.width, 2);
        assert!(surface.take_frame().is_none());
    }
}
