use serde::{Deserialize, Serialize};

/// A segment of the zoom track. While active it scales the composed preview
/// about `(zoom_center_x, zoom_center_y)`, given in normalized frame
/// coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoomClip {
    pub id: String,
    pub start_time_ms: i64,
    pub duration_ms: i64,
    #[serde(default = "default_zoom_scale")]
    pub zoom_scale: f64,
    #[serde(default = "default_center")]
    pub zoom_center_x: f64,
    #[serde(default = "default_center")]
    pub zoom_center_y: f64,
    #[serde(default = "default_ease_ms")]
    pub ease_in_duration_ms: i64,
    #[serde(default = "default_ease_ms")]
    pub ease_out_duration_ms: i64,
}

fn default_zoom_scale() -> f64 {
    2.0
}

fn default_center() -> f64 {
    0.5
}

fn default_ease_ms() -> i64 {
    500
}

/// Zoom applied to the composed frame at one timeline instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomTransform {
    pub scale: f64,
    pub center_x: f64,
    pub center_y: f64,
}

impl ZoomTransform {
    pub const IDENTITY: ZoomTransform = ZoomTransform {
        scale: 1.0,
        center_x: 0.5,
        center_y: 0.5,
    };
}

impl Default for ZoomTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ZoomClip {
    pub fn contains(&self, timeline_ms: i64) -> bool {
        self.duration_ms > 0
            && timeline_ms >= self.start_time_ms
            && timeline_ms < self.start_time_ms.saturating_add(self.duration_ms)
    }

    /// Eased transform at `timeline_ms`, or `None` outside the segment.
    pub fn transform_at(&self, timeline_ms: i64) -> Option<ZoomTransform> {
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

        let target = if self.zoom_scale.is_finite() && self.zoom_scale > 0.0 {
            self.zoom_scale
        } else {
            1.0
        };
        Some(ZoomTransform {
            scale: 1.0 + (target - 1.0) * weight,
            center_x: self.zoom_center_x.clamp(0.0, 1.0),
            center_y: self.zoom_center_y.clamp(0.0, 1.0),
        })
    }
}

/// Eased 0..1 weight of a segment at `timeline_ms`: ramps up over `ease_in_ms`
/// after the start and down over `ease_out_ms` before the end.
pub(crate) fn envelope(
    start_ms: i64,
    duration_ms: i64,
    ease_in_ms: i64,
    ease_out_ms: i64,
    timeline_ms: i64,
) -> f64 {
    let elapsed = timeline_ms.saturating_sub(start_ms) as f64;
    let remaining = start_ms
        .saturating_add(duration_ms)
        .saturating_sub(timeline_ms) as f64;
    ease_in_out_cubic(ramp(elapsed, ease_in_ms).min(ramp(remaining, ease_out_ms)))
}

fn ramp(progress_ms: f64, ease_ms: i64) -> f64 {
    if ease_ms <= 0 {
        1.0
    } else {
        (progress_ms / ease_ms as f64).clamp(0.0, 1.0)
    }
}

fn ease_in_out_cubic(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}
