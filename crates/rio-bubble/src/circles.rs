//! Animated decorative circle slots.
//!
//! `CircleAnimationManager` holds one [`CircleTransition`] per circle on the
//! outline. When the packed diameters change, existing circles retarget from
//! wherever they currently are, surplus circles shrink to zero and are
//! dropped, and new circles grow in from zero.

use std::f64::consts::PI;

use crate::{Timestamp, TIME_EPSILON};

/// Disappearing circles below this diameter are no longer reported.
const DISAPPEAR_EPSILON: f64 = 0.01;

/// Raised-cosine ease. `progress` is clamped to `[0, 1]`.
pub fn ease(progress: f64) -> f64 {
    let p = progress.clamp(0.0, 1.0);
    0.5 - 0.5 * (p * PI).cos()
}

/// Element-wise comparison; lists of different length are never equal.
pub fn almost_equal(a: &[f64], b: &[f64], tolerance: f64) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| (x - y).abs() <= tolerance)
}

/// Stable identity of a decorative circle across resizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CircleId(pub u64);

/// One circle's animated diameter.
#[derive(Debug, Clone, PartialEq)]
pub struct CircleTransition {
    pub id: CircleId,
    /// Ordinal position along the perimeter.
    pub index: usize,
    pub start_value: f64,
    pub end_value: f64,
    pub start_time: Timestamp,
    /// Shrinking toward zero; removed once its transition has run out.
    pub is_disappearing: bool,
}

impl CircleTransition {
    /// Eased diameter at `now`. A non-positive `duration` means no animation.
    pub fn value_at(&self, now: Timestamp, duration: f64) -> f64 {
        if duration <= 0.0 {
            return self.end_value;
        }
        let progress = (now - self.start_time) / duration;
        self.start_value + (self.end_value - self.start_value) * ease(progress)
    }

    fn has_expired(&self, now: Timestamp, duration: f64) -> bool {
        self.is_disappearing && now - self.start_time + TIME_EPSILON >= duration
    }
}

/// A circle's diameter at a sampled instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleSample {
    pub id: CircleId,
    pub index: usize,
    pub diameter: f64,
}

/// Ordered set of animated circle slots for one bubble.
#[derive(Debug, Clone)]
pub struct CircleAnimationManager {
    transitions: Vec<CircleTransition>,
    next_id: u64,
    duration: f64,
}

impl CircleAnimationManager {
    /// `transition_duration` is the appear/disappear/resize time in seconds.
    pub fn new(transition_duration: f64) -> Self {
        Self {
            transitions: Vec::new(),
            next_id: 0,
            duration: transition_duration,
        }
    }

    pub fn transition_duration(&self) -> f64 {
        self.duration
    }

    pub fn set_transition_duration(&mut self, duration: f64) {
        self.duration = duration;
    }

    pub fn transitions(&self) -> &[CircleTransition] {
        &self.transitions
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// Replace all circles with static ones at `targets`. Ids restart at zero.
    pub fn configure_initial(&mut self, targets: &[f64]) {
        self.transitions = targets
            .iter()
            .enumerate()
            .map(|(i, &d)| CircleTransition {
                id: CircleId(i as u64),
                index: i,
                start_value: d,
                end_value: d,
                start_time: 0.0,
                is_disappearing: false,
            })
            .collect();
        self.next_id = targets.len() as u64;
    }

    /// Reconcile the circle list against a new set of target diameters.
    pub fn update_transitions(&mut self, targets: &[f64], now: Timestamp) {
        self.prune(now);

        let duration = self.duration;
        let shared = self.transitions.len().min(targets.len());

        for (t, &target) in self.transitions[..shared].iter_mut().zip(targets) {
            t.start_value = t.value_at(now, duration);
            t.end_value = target;
            t.start_time = now;
            t.is_disappearing = false;
        }

        for t in &mut self.transitions[shared..] {
            if !t.is_disappearing {
                t.start_value = t.value_at(now, duration);
                t.end_value = 0.0;
                t.start_time = now;
                t.is_disappearing = true;
            }
        }

        for (index, &target) in targets.iter().enumerate().skip(shared) {
            let id = CircleId(self.next_id);
            self.next_id += 1;
            self.transitions.push(CircleTransition {
                id,
                index,
                start_value: 0.0,
                end_value: target,
                start_time: now,
                is_disappearing: false,
            });
        }

        self.transitions.sort_by_key(|t| t.index);

        tracing::trace!(
            targets = targets.len(),
            retargeted = shared,
            total = self.transitions.len(),
            "circle transitions updated"
        );
    }

    /// Drop disappearing circles whose shrink has finished.
    pub fn prune(&mut self, now: Timestamp) {
        let duration = self.duration;
        self.transitions.retain(|t| !t.has_expired(now, duration));
    }

    /// Interpolated circles at `now`, in perimeter order.
    pub fn current_base_circles(&self, now: Timestamp) -> Vec<CircleSample> {
        self.transitions
            .iter()
            .filter(|t| !t.has_expired(now, self.duration))
            .filter_map(|t| {
                let diameter = t.value_at(now, self.duration);
                if t.is_disappearing && diameter < DISAPPEAR_EPSILON {
                    None
                } else {
                    Some(CircleSample { id: t.id, index: t.index, diameter })
                }
            })
            .collect()
    }

    /// Interpolated diameters at `now`, in perimeter order.
    pub fn current_base_diameters(&self, now: Timestamp) -> Vec<f64> {
        self.current_base_circles(now).into_iter().map(|c| c.diameter).collect()
    }

    /// Targets of the circles that are staying, for change detection.
    pub fn current_target_diameters(&self) -> Vec<f64> {
        self.transitions
            .iter()
            .filter(|t| !t.is_disappearing)
            .map(|t| t.end_value)
            .collect()
    }
}
