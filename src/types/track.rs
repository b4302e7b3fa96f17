use crate::types::media::Clip;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type TrackId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackKind {
    #[default]
    Video,
    Audio,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub id: TrackId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub kind: TrackKind,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub muted: bool,
    #[serde(default)]
    pub locked: bool,
    #[serde(default = "default_volume")]
    pub volume: f64,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default)]
    pub clips: Vec<Clip>,
}

fn default_visible() -> bool {
    true
}

fn default_volume() -> f64 {
    1.0
}

impl Track {
    pub fn new(name: impl Into<String>, kind: TrackKind, sort_order: i32) -> Self {
        Track {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            kind,
            visible: true,
            muted: false,
            locked: false,
            volume: 1.0,
            sort_order,
            clips: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_clip(mut self, clip: Clip) -> Self {
        self.clips.push(clip);
        self
    }

    pub fn is_video(&self) -> bool {
        self.kind == TrackKind::Video
    }

    pub fn gain(&self) -> f64 {
        if self.volume.is_nan() {
            0.0
        } else {
            self.volume.clamp(0.0, 1.0)
        }
    }
}
