//! Bubble types and the animation state machine.
//!
//! `BubbleAnimationState` is a value: every transition produces a fresh state
//! and `start_time` fields are never touched afterwards. All progress queries
//! are pure functions of the state, the sample time, and the config.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::circles::ease;
use crate::{BubbleConfig, Timestamp, QUICK_APPEAR_DURATION, TIME_EPSILON};

/// Semantic phase of a message indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum BubbleType {
    Thinking,
    Talking,
    Read,
}

impl BubbleType {
    pub const ALL: [BubbleType; 3] = [BubbleType::Thinking, BubbleType::Talking, BubbleType::Read];
}

/// Current visual phase of one bubble.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BubbleAnimationState {
    /// Stable, nothing in flight.
    Idle(BubbleType),
    /// Shape interpolation between the thinking and talking poses.
    Morphing {
        from: BubbleType,
        to: BubbleType,
        start_time: Timestamp,
    },
    /// Thinking bubble dissolving (thinking → read).
    Exploding { start_time: Timestamp },
    /// Bubble growing from a dot (read → thinking).
    Scaling { start_time: Timestamp },
    /// Near-instant appearance (read → talking).
    QuickAppearing { start_time: Timestamp },
}

impl BubbleAnimationState {
    /// State entered when a bubble changes from `from` to `to` at `now`.
    ///
    /// Total over every pair; anything without a dedicated animation
    /// resolves to `Idle(to)`.
    pub fn transition(from: BubbleType, to: BubbleType, now: Timestamp) -> Self {
        use BubbleType::*;

        match (from, to) {
            (Thinking, Talking) | (Talking, Thinking) => Self::Morphing { from, to, start_time: now },
            (Thinking, Read) => Self::Exploding { start_time: now },
            (Read, Thinking) => Self::Scaling { start_time: now },
            (Read, Talking) => Self::QuickAppearing { start_time: now },
            // Same type, and talking → read (instant)
            _ => Self::Idle(to),
        }
    }

    /// The type this state resolves to once its animation finishes.
    pub fn target_type(&self) -> BubbleType {
        match *self {
            Self::Idle(t) => t,
            Self::Morphing { to, .. } => to,
            Self::Exploding { .. } => BubbleType::Read,
            Self::Scaling { .. } => BubbleType::Thinking,
            Self::QuickAppearing { .. } => BubbleType::Talking,
        }
    }

    pub fn is_animating(&self) -> bool {
        !matches!(self, Self::Idle(_))
    }

    pub fn start_time(&self) -> Option<Timestamp> {
        match *self {
            Self::Idle(_) => None,
            Self::Morphing { start_time, .. }
            | Self::Exploding { start_time }
            | Self::Scaling { start_time }
            | Self::QuickAppearing { start_time } => Some(start_time),
        }
    }

    /// Length of this phase in seconds (0 for idle).
    pub fn duration(&self, config: &BubbleConfig) -> f64 {
        match self {
            Self::Idle(_) => 0.0,
            Self::Morphing { .. } => config.morph_duration,
            Self::Exploding { .. } => config.explosion_duration,
            Self::Scaling { .. } => config.read_to_thinking_duration,
            Self::QuickAppearing { .. } => QUICK_APPEAR_DURATION,
        }
    }

    /// Linear 0 → 1 progress through the current phase. Idle is always 1.
    pub fn animation_progress(&self, now: Timestamp, config: &BubbleConfig) -> f64 {
        let Some(start) = self.start_time() else {
            return 1.0;
        };
        let duration = self.duration(config);
        let elapsed = now - start;
        if duration <= 0.0 || elapsed + TIME_EPSILON >= duration {
            return 1.0;
        }
        (elapsed / duration).clamp(0.0, 1.0)
    }

    pub fn is_complete(&self, now: Timestamp, config: &BubbleConfig) -> bool {
        self.animation_progress(now, config) >= 1.0
    }

    /// 0.0 is the thinking/read pose, 1.0 the talking pose.
    pub fn morph_progress(&self, now: Timestamp, config: &BubbleConfig) -> f64 {
        match *self {
            Self::Idle(t) => pose(t),
            Self::Morphing { from, to, .. } => {
                let eased = ease(self.animation_progress(now, config));
                pose(from) + (pose(to) - pose(from)) * eased
            }
            Self::Exploding { .. } | Self::Scaling { .. } => 0.0,
            Self::QuickAppearing { .. } => 1.0,
        }
    }
}

fn pose(t: BubbleType) -> f64 {
    if t == BubbleType::Talking { 1.0 } else { 0.0 }
}
