use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type ClipId = String;

pub const MIN_SPEED: f64 = 0.25;
pub const MAX_SPEED: f64 = 4.0;
pub const DEFAULT_SPEED: f64 = 1.0;

/// Crop fractions in percent (0-100) per edge.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CropRect {
    #[serde(rename = "cropTop", default)]
    pub top: f64,
    #[serde(rename = "cropRight", default)]
    pub right: f64,
    #[serde(rename = "cropBottom", default)]
    pub bottom: f64,
    #[serde(rename = "cropLeft", default)]
    pub left: f64,
}

/// Placement of the clip inside the composed frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClipTransform {
    pub position_x: f64,
    pub position_y: f64,
    pub scale: f64,
    pub rotation: f64,
    pub opacity: f64,
}

impl Default for ClipTransform {
    fn default() -> Self {
        Self {
            position_x: 0.0,
            position_y: 0.0,
            scale: 1.0,
            rotation: 0.0,
            opacity: 1.0,
        }
    }
}

/// Drop shadow drawn behind the clip.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ClipShadow {
    #[serde(rename = "shadowEnabled", default)]
    pub enabled: bool,
    #[serde(rename = "shadowBlur", default)]
    pub blur: f64,
    #[serde(rename = "shadowOffsetX", default)]
    pub offset_x: f64,
    #[serde(rename = "shadowOffsetY", default)]
    pub offset_y: f64,
    #[serde(rename = "shadowColor", default)]
    pub color: Option<String>,
}

/// A clip placed on the shared timeline.
///
/// Times are integer milliseconds. `in_point_ms` is the offset into the
/// source media that plays at `start_time_ms`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Clip {
    pub id: ClipId,
    #[serde(default)]
    pub name: String,
    pub source_path: String,
    pub start_time_ms: i64,
    pub duration_ms: i64,
    #[serde(default)]
    pub in_point_ms: i64,
    /// End of the used source range, when the editor trimmed one.
    #[serde(default)]
    pub out_point_ms: Option<i64>,
    #[serde(default = "default_speed")]
    pub speed: f64,
    #[serde(default = "default_volume")]
    pub volume: f64,
    #[serde(default)]
    pub muted: bool,
    #[serde(flatten)]
    pub crop: CropRect,
    #[serde(default)]
    pub corner_radius: f64,
    #[serde(flatten)]
    pub transform: ClipTransform,
    #[serde(flatten)]
    pub shadow: ClipShadow,
}

fn default_speed() -> f64 {
    DEFAULT_SPEED
}

fn default_volume() -> f64 {
    1.0
}

impl Clip {
    pub fn new(source_path: impl Into<String>, start_time_ms: i64, duration_ms: i64) -> Self {
        Clip {
            id: Uuid::new_v4().to_string(),
            name: String::new(),
            source_path: source_path.into(),
            start_time_ms,
            duration_ms,
            in_point_ms: 0,
            out_point_ms: None,
            speed: DEFAULT_SPEED,
            volume: 1.0,
            muted: false,
            crop: CropRect::default(),
            corner_radius: 0.0,
            transform: ClipTransform::default(),
            shadow: ClipShadow::default(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_in_point(mut self, in_point_ms: i64) -> Self {
        self.in_point_ms = in_point_ms;
        self
    }

    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }

    /// Playback-rate multiplier clamped to `[MIN_SPEED, MAX_SPEED]`.
    /// Non-finite values fall back to `DEFAULT_SPEED`.
    pub fn speed(&self) -> f64 {
        if self.speed.is_finite() {
            self.speed.clamp(MIN_SPEED, MAX_SPEED)
        } else {
            DEFAULT_SPEED
        }
    }

    pub fn end_time_ms(&self) -> i64 {
        self.start_time_ms.saturating_add(self.duration_ms.max(0))
    }

    /// Last source millisecond the clip reads: the out point when set,
    /// otherwise where the mapped range ends.
    pub fn source_end_ms(&self) -> i64 {
        self.out_point_ms.unwrap_or_else(|| {
            self.in_point_ms
                .saturating_add((self.duration_ms.max(0) as f64 * self.speed()) as i64)
        })
    }

    /// Malformed clips are kept on the timeline but never become active.
    pub fn is_valid(&self) -> bool {
        self.duration_ms > 0
    }

    pub fn gain(&self) -> f64 {
        if self.volume.is_nan() {
            0.0
        } else {
            self.volume.clamp(0.0, 1.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speed_is_clamped() {
        let clip = Clip::new("a.mp4", 0, 1000);
        assert_eq!(clip.speed(), 1.0);
        assert_eq!(clip.clone().with_speed(10.0).speed(), MAX_SPEED);
        assert_eq!(clip.clone().with_speed(0.01).speed(), MIN_SPEED);
        assert_eq!(clip.clone().with_speed(-2.0).speed(), MIN_SPEED);
        assert_eq!(clip.with_speed(f64::NAN).speed(), DEFAULT_SPEED);
    }

    #[test]
    fn test_invalid_duration() {
        assert!(Clip::new("a.mp4", 0, 1).is_valid());
        assert!(!Clip::new("a.mp4", 0, 0).is_valid());
        assert!(!Clip::new("a.mp4", 0, -50).is_valid());
        assert_eq!(Clip::new("a.mp4", 200, -50).end_time_ms(), 200);
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let json = r#"{
            "id": "c1",
            "sourcePath": "/media/take1.mp4",
            "startTimeMs": 1000,
            "durationMs": 5000,
            "cropTop": 10.0,
            "cornerRadius": 12.0,
            "scale": 0.5
        }"#;
        let clip: Clip = serde_json::from_str(json).unwrap();
        assert_eq!(clip.id, "c1");
        assert_eq!(clip.in_point_ms, 0);
        assert_eq!(clip.speed, 1.0);
        assert_eq!(clip.volume, 1.0);
        assert!(!clip.muted);
        assert_eq!(clip.crop.top, 10.0);
        assert_eq!(clip.crop.left, 0.0);
        assert_eq!(clip.corner_radius, 12.0);
        assert_eq!(clip.transform.scale, 0.5);
        assert_eq!(clip.transform.opacity, 1.0);
        assert_eq!(clip.out_point_ms, None);
        assert!(!clip.shadow.enabled);
    }

    #[test]
    fn test_shadow_and_out_point_from_json() {
        let json = r##"{
            "id": "c2",
            "sourcePath": "/media/take2.mp4",
            "startTimeMs": 0,
            "durationMs": 4000,
            "inPointMs": 500,
            "outPointMs": 3000,
            "shadowEnabled": true,
            "shadowBlur": 18.0,
            "shadowOffsetY": 6.0,
            "shadowColor": "#00000080"
        }"##;
        let clip: Clip = serde_json::from_str(json).unwrap();
        assert!(clip.shadow.enabled);
        assert_eq!(clip.shadow.blur, 18.0);
        assert_eq!(clip.shadow.offset_x, 0.0);
        assert_eq!(clip.shadow.offset_y, 6.0);
        assert_eq!(clip.shadow.color.as_deref(), Some("#00000080"));
        assert_eq!(clip.source_end_ms(), 3000);

        let untrimmed = Clip::new("a.mp4", 0, 4000).with_in_point(500).with_speed(2.0);
        assert_eq!(untrimmed.source_end_ms(), 8500);
    }
}
