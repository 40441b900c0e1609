//! JSON shape of a sampled frame.

use rio_bubble::{BubbleFrame, BubbleType};
use serde::Serialize;

/// Flat, serializable copy of a [`BubbleFrame`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameRecord {
    pub time: f64,
    pub displayed_type: BubbleType,
    /// `[x, y, diameter]` per circle.
    pub circles: Vec<[f64; 3]>,
    /// `[x, y, width, height]`.
    pub rectangle: [f64; 4],
    pub corner_radius: f64,
    pub morph_progress: f64,
    pub is_exploding: bool,
    pub explosion_progress: f64,
    pub is_scaling: bool,
    pub scaling_progress: f64,
    pub can_use_native: bool,
    pub packing_valid: bool,
    pub color: [f32; 4],
}

impl FrameRecord {
    /// Equal in everything but the timestamp.
    pub fn same_drawable(&self, other: &FrameRecord) -> bool {
        FrameRecord { time: other.time, ..self.clone() } == *other
    }
}

impl From<&BubbleFrame> for FrameRecord {
    fn from(frame: &BubbleFrame) -> Self {
        let (r, g, b, a) = frame.color.into_components();
        Self {
            time: frame.time,
            displayed_type: frame.displayed_type,
            circles: frame
                .circles
                .iter()
                .map(|c| [c.center.x, c.center.y, c.diameter])
                .collect(),
            rectangle: [
                frame.rectangle_origin.x,
                frame.rectangle_origin.y,
                frame.rectangle_size.width,
                frame.rectangle_size.height,
            ],
            corner_radius: frame.rectangle_corner_radius,
            morph_progress: frame.morph_progress,
            is_exploding: frame.is_exploding,
            explosion_progress: frame.explosion_progress,
            is_scaling: frame.is_scaling,
            scaling_progress: frame.scaling_progress,
            can_use_native: frame.can_use_native,
            packing_valid: frame.packing_valid,
            color: [r, g, b, a],
        }
    }
}
