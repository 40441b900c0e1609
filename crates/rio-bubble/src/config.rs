//! Bubble configuration loaded from RON files.
//!
//! One `BubbleConfig` is handed to every component constructor. It is plain
//! data: nothing in the engine mutates it, and there is no global instance.
//!
//! ```ron
//! (
//!     morph_duration: 0.4,
//!     explosion_duration: 0.6,
//!     bubble_min_diameter: 10.0,
//!     bubble_max_diameter: 20.0,
//! )
//! ```
//!
//! Omitted fields take their defaults.

use std::path::Path;

use palette::Srgba;
use serde::{Deserialize, Serialize};

use crate::{ConfigError, Result, DIAMETER_TOLERANCE};

/// Tunable durations (seconds), size bounds (points), and colors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BubbleConfig {
    /// Thinking ↔ talking shape morph.
    #[serde(default = "default_morph_duration")]
    pub morph_duration: f64,

    /// Thinking → read particle explosion.
    #[serde(default = "default_explosion_duration")]
    pub explosion_duration: f64,

    /// Read → thinking grow-from-a-dot.
    #[serde(default = "default_read_to_thinking_duration")]
    pub read_to_thinking_duration: f64,

    /// Appear / disappear / resize of a single decorative circle.
    #[serde(default = "default_circle_transition_duration")]
    pub circle_transition_duration: f64,

    /// Smallest decorative circle diameter.
    #[serde(default = "default_min_diameter")]
    pub bubble_min_diameter: f64,

    /// Largest decorative circle diameter.
    #[serde(default = "default_max_diameter")]
    pub bubble_max_diameter: f64,

    /// Corner radius of the bubble's rounded rectangle.
    #[serde(default = "default_corner_radius")]
    pub bubble_corner_radius: f64,

    /// Blur applied by the renderer before thresholding.
    #[serde(default = "default_blur_radius")]
    pub bubble_blur_radius: f64,

    /// Fill color (RGBA, 0..1).
    #[serde(default = "default_bubble_color")]
    pub bubble_color: [f32; 4],

    /// Fill color used when the outline could not be packed.
    #[serde(default = "default_error_color")]
    pub error_color: [f32; 4],
}

fn default_morph_duration() -> f64 {
    0.4
}
fn default_explosion_duration() -> f64 {
    0.6
}
fn default_read_to_thinking_duration() -> f64 {
    0.35
}
fn default_circle_transition_duration() -> f64 {
    0.3
}
fn default_min_diameter() -> f64 {
    10.0
}
fn default_max_diameter() -> f64 {
    20.0
}
fn default_corner_radius() -> f64 {
    18.0
}
fn default_blur_radius() -> f64 {
    4.0
}
fn default_bubble_color() -> [f32; 4] {
    [0.91, 0.91, 0.92, 1.0]
}
fn default_error_color() -> [f32; 4] {
    [1.0, 0.0, 0.0, 1.0]
}

impl Default for BubbleConfig {
    fn default() -> Self {
        Self {
            morph_duration: default_morph_duration(),
            explosion_duration: default_explosion_duration(),
            read_to_thinking_duration: default_read_to_thinking_duration(),
            circle_transition_duration: default_circle_transition_duration(),
            bubble_min_diameter: default_min_diameter(),
            bubble_max_diameter: default_max_diameter(),
            bubble_corner_radius: default_corner_radius(),
            bubble_blur_radius: default_blur_radius(),
            bubble_color: default_bubble_color(),
            error_color: default_error_color(),
        }
    }
}

impl BubbleConfig {
    /// Parse and validate a config from RON text.
    pub fn from_ron_str(text: &str) -> Result<Self> {
        let config: BubbleConfig = ron::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_ron_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded bubble config");
        Ok(config)
    }

    /// Reject values the engine cannot animate with.
    ///
    /// Durations may be zero (zero means "snap to the end state") but not
    /// negative or non-finite. Diameter bounds must be ordered, and the minimum
    /// must exceed [`DIAMETER_TOLERANCE`] so resizes stay distinguishable.
    pub fn validate(&self) -> Result<()> {
        let durations = [
            ("morph_duration", self.morph_duration),
            ("explosion_duration", self.explosion_duration),
            ("read_to_thinking_duration", self.read_to_thinking_duration),
            ("circle_transition_duration", self.circle_transition_duration),
        ];
        for (field, value) in durations {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(field, format!("must be a finite, non-negative duration (got {value})")));
            }
        }

        if !self.bubble_min_diameter.is_finite() || self.bubble_min_diameter <= DIAMETER_TOLERANCE {
            return Err(invalid(
                "bubble_min_diameter",
                format!("must be greater than {DIAMETER_TOLERANCE} (got {})", self.bubble_min_diameter),
            ));
        }
        if !self.bubble_max_diameter.is_finite() || self.bubble_max_diameter < self.bubble_min_diameter {
            return Err(invalid(
                "bubble_max_diameter",
                format!(
                    "must be at least bubble_min_diameter {} (got {})",
                    self.bubble_min_diameter, self.bubble_max_diameter
                ),
            ));
        }

        for (field, value) in [
            ("bubble_corner_radius", self.bubble_corner_radius),
            ("bubble_blur_radius", self.bubble_blur_radius),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(field, format!("must be finite and non-negative (got {value})")));
            }
        }

        Ok(())
    }

    /// Normal fill color.
    pub fn bubble_srgba(&self) -> Srgba {
        to_srgba(self.bubble_color)
    }

    /// Fallback fill for outlines the packer rejected.
    pub fn error_srgba(&self) -> Srgba {
        to_srgba(self.error_color)
    }
}

fn to_srgba(c: [f32; 4]) -> Srgba {
    Srgba::new(c[0], c[1], c[2], c[3])
}

fn invalid(field: &'static str, reason: String) -> ConfigError {
    ConfigError::Invalid { field, reason }
}
