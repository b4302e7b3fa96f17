//! The per-clip media player seam.
//!
//! A `MediaPlayer` decodes one clip's source on its own clock. The sync
//! controllers only ever talk to players through this trait, so the state
//! machine runs the same against GStreamer or a test double.

pub mod gst_player;
#[cfg(test)]
pub mod mock;
pub mod probe;
pub mod surface;

use crate::error::SyncError;
use crate::types::media::Clip;
use std::sync::Arc;

/// A decoded RGBA frame delivered to an attached surface.
#[derive(Debug, Clone)]
pub struct VideoFrame {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub timestamp: f64, // source time in seconds
}

/// Receives frames from a player's video output. Called from the player's
/// streaming thread.
pub trait FrameSink: Send + Sync {
    fn push_frame(&self, frame: VideoFrame);
}

pub trait MediaPlayer {
    /// Current source position in seconds.
    fn current_time(&self) -> f64;
    fn set_current_time(&mut self, seconds: f64);

    /// Start playback. Failures are reported but the caller may ignore them.
    fn play(&mut self) -> Result<(), SyncError>;
    fn pause(&mut self);
    fn is_paused(&self) -> bool;

    fn volume(&self) -> f64;
    fn set_volume(&mut self, volume: f64);
    fn is_muted(&self) -> bool;
    fn set_muted(&mut self, muted: bool);

    fn playback_rate(&self) -> f64;
    fn set_playback_rate(&mut self, rate: f64);

    fn attach_surface(&mut self, _sink: Arc<dyn FrameSink>) {}
    fn detach_surface(&mut self) {}

    /// Decode error raised by the player since the last call, if any.
    fn take_error(&mut self) -> Option<String> {
        None
    }
}

/// Builds the player for a clip when it mounts.
pub trait PlayerFactory {
    fn create(&mut self, clip: &Clip) -> Result<Box<dyn MediaPlayer>, SyncError>;
}
