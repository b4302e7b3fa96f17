use crate::types::zoom::envelope;

use serde::{Deserialize, Serialize};

/// A segment of the blur track. While active it blurs a rectangular region of
/// the composed preview, or everything outside it when `blur_inside` is false.
/// Region coordinates are percentages of the frame; `region_x`/`region_y`
/// locate the region's centre.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlurClip {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub start_time_ms: i64,
    pub duration_ms: i64,
    #[serde(default = "default_intensity")]
    pub blur_intensity: f64,
    #[serde(default = "default_region_center")]
    pub region_x: f64,
    #[serde(default = "default_region_center")]
    pub region_y: f64,
    #[serde(default = "default_region_size")]
    pub region_width: f64,
    #[serde(default = "default_region_size")]
    pub region_height: f64,
    #[serde(default)]
    pub corner_radius: f64,
    #[serde(default = "default_blur_inside")]
    pub blur_inside: bool,
    #[serde(default)]
    pub ease_in_duration_ms: i64,
    #[serde(default)]
    pub ease_out_duration_ms: i64,
}

fn default_intensity() -> f64 {
    20.0
}

fn default_region_center() -> f64 {
    50.0
}

fn default_region_size() -> f64 {
    30.0
}

fn default_blur_inside() -> bool {
    true
}

/// Blur applied to the composed frame at one timeline instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlurEffect {
    /// Blur radius after easing; zero at the segment edges when eased.
    pub intensity: f64,
    pub region_x: f64,
    pub region_y: f64,
    pub region_width: f64,
    pub region_height: f64,
    pub corner_radius: f64,
    pub blur_inside: bool,
}

impl BlurClip {
    pub fn new(id: impl Into<String>, start_time_ms: i64, duration_ms: i64) -> Self {
        BlurClip {
            id: id.into(),
            name: String::new(),
            start_time_ms,
            duration_ms,
            blur_intensity: default_intensity(),
            region_x: default_region_center(),
            region_y: default_region_center(),
            region_width: default_region_size(),
            region_height: default_region_size(),
            corner_radius: 0.0,
            blur_inside: true,
            ease_in_duration_ms: 0,
            ease_out_duration_ms: 0,
        }
    }

    pub fn contains(&self, timeline_ms: i64) -> bool {
        self.duration_ms > 0
            && timeline_ms >= self.start_time_ms
            && timeline_ms < self.start_time_ms.saturating_add(self.duration_ms)
    }

    /// Eased effect at `timeline_ms`, or `None` outside the segment.
    pub fn effect_at(&self, timeline_ms: i64) -> Option<BlurEffect> {
        if !self.contains(timeline_ms) {
            return None;
        }
        let weight = envelope(
            self.start_time_ms,
            self.duration_ms,
            self.ease_in_duration_ms,
            self.ease_out_duration_ms,
            timeline_ms,
        );
        let intensity = if self.blur_intensity.is_finite() {
            self.blur_intensity.max(0.0)
        } else {
            0.0
        };
        Some(BlurEffect {
            intensity: intensity * weight,
            region_x: self.region_x,
            region_y: self.region_y,
            region_width: self.region_width,
            region_height: self.region_height,
            corner_radius: self.corner_radius,
            blur_inside: self.blur_inside,
        })
    }
}
