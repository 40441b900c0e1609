//! Bubble timeline scripts loaded from RON.
//!
//! ```ron
//! (
//!     width: 140.0,
//!     height: 48.0,
//!     initial: read,
//!     duration: 4.0,
//!     steps: [
//!         (at: 0.5, bubble_type: thinking),
//!         (at: 2.0, bubble_type: talking),
//!         (at: 3.5, bubble_type: read),
//!     ],
//! )
//! ```

use rio_bubble::BubbleType;
use serde::Deserialize;

/// One type change on the timeline.
#[derive(Debug, Clone, Deserialize)]
pub struct SimStep {
    /// Seconds from the start of the run.
    pub at: f64,
    pub bubble_type: BubbleType,
    /// Optional resize applied with this step.
    #[serde(default)]
    pub size: Option<(f64, f64)>,
}

/// A scripted run of one bubble.
#[derive(Debug, Clone, Deserialize)]
pub struct SimScript {
    #[serde(default = "default_width")]
    pub width: f64,
    #[serde(default = "default_height")]
    pub height: f64,
    /// Falls back to the config's `bubble_corner_radius`.
    #[serde(default)]
    pub corner_radius: Option<f64>,
    #[serde(default = "default_initial")]
    pub initial: BubbleType,
    /// Total simulated seconds.
    #[serde(default = "default_duration")]
    pub duration: f64,
    #[serde(default)]
    pub steps: Vec<SimStep>,
}

fn default_width() -> f64 {
    140.0
}
fn default_height() -> f64 {
    48.0
}
fn default_initial() -> BubbleType {
    BubbleType::Read
}
fn default_duration() -> f64 {
    4.0
}

impl Default for SimScript {
    /// read → thinking → talking → read, the everyday cycle.
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            corner_radius: None,
            initial: default_initial(),
            duration: default_duration(),
            steps: vec![
                SimStep { at: 0.5, bubble_type: BubbleType::Thinking, size: None },
                SimStep { at: 2.0, bubble_type: BubbleType::Talking, size: None },
                SimStep { at: 3.5, bubble_type: BubbleType::Read, size: None },
            ],
        }
    }
}

impl SimScript {
    pub fn from_ron_str(text: &str) -> Result<Self, ron::error::SpannedError> {
        let mut script: SimScript = ron::from_str(text)?;
        script.steps.sort_by(|a, b| a.at.total_cmp(&b.at));
        Ok(script)
    }
}
