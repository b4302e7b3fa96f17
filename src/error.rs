use gstreamer as gst;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("GStreamer error: {0}")]
    Gst(#[from] gst::glib::BoolError),
    #[error("GLib error: {0}")]
    Glib(#[from] gst::glib::Error),
    #[error("State change failed: {0}")]
    StateChange(#[from] gst::StateChangeError),
    #[error("Player error: {0}")]
    Player(String),
    #[error("Broken source {path}: {reason}")]
    BrokenSource { path: String, reason: String },
    #[error("Unknown clip: {0}")]
    UnknownClip(String),
}
