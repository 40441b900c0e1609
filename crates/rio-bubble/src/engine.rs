//! Pull-based frame sampler: the renderer-facing surface of the crate.
//!
//! A renderer owns one [`BubbleEngine`] per bubble. It calls
//! [`BubbleEngine::configure`] when the bubble's size or type changes and
//! [`BubbleEngine::sample_frame`] once per tick, then draws the rounded
//! rectangle and circles it gets back (blurred by `bubble_blur_radius` and
//! thresholded to fuse them).

use kurbo::{Point, Size, Vec2};
use palette::Srgba;

use crate::circles::{almost_equal, CircleAnimationManager};
use crate::coordinator::TransitionCoordinator;
use crate::geometry::{clamp_corner_radius, perimeter, position_along_perimeter};
use crate::packing::{compute_diameters, geometry_seed, PackingResult};
use crate::state::BubbleType;
use crate::{BubbleConfig, Timestamp, DIAMETER_TOLERANCE};

/// Bubble outline in its own coordinate space (origin top-left).
#[derive(Debug, Clone, Copy, PartialEq)]
struct Outline {
    size: Size,
    corner_radius: f64,
}

/// One decorative circle to draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameCircle {
    pub center: Point,
    pub diameter: f64,
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct BubbleFrame {
    pub time: Timestamp,
    pub circles: Vec<FrameCircle>,
    pub rectangle_origin: Point,
    pub rectangle_size: Size,
    pub rectangle_corner_radius: f64,
    /// 0.0 thinking/read pose, 1.0 talking pose.
    pub morph_progress: f64,
    pub is_exploding: bool,
    pub explosion_progress: f64,
    pub is_scaling: bool,
    pub scaling_progress: f64,
    /// The platform's plain bubble may replace the animated one.
    pub can_use_native: bool,
    pub displayed_type: BubbleType,
    /// False when the outline could not be packed; `color` is the error color then.
    pub packing_valid: bool,
    pub color: Srgba,
}

/// Per-bubble animation engine: one coordinator and one circle manager.
#[derive(Debug, Clone)]
pub struct BubbleEngine {
    config: BubbleConfig,
    coordinator: TransitionCoordinator,
    circles: CircleAnimationManager,
    outline: Option<Outline>,
    packing: PackingResult,
}

impl BubbleEngine {
    pub fn new(initial: BubbleType, config: BubbleConfig) -> Self {
        Self {
            coordinator: TransitionCoordinator::new(initial, config.clone()),
            circles: CircleAnimationManager::new(config.circle_transition_duration),
            config,
            outline: None,
            packing: PackingResult {
                diameters: Vec::new(),
                is_valid: true,
            },
        }
    }

    pub fn config(&self) -> &BubbleConfig {
        &self.config
    }

    pub fn coordinator(&self) -> &TransitionCoordinator {
        &self.coordinator
    }

    pub fn circles(&self) -> &CircleAnimationManager {
        &self.circles
    }

    /// Latest packing of the outline.
    pub fn packing(&self) -> &PackingResult {
        &self.packing
    }

    /// Replace the config; the outline is re-packed with the new bounds.
    /// Transition durations apply from the next type change.
    pub fn set_config(&mut self, config: BubbleConfig) {
        self.coordinator.set_config(config.clone());
        self.circles.set_transition_duration(config.circle_transition_duration);
        self.config = config;
        if self.outline.is_some() {
            self.repack();
        }
    }

    /// Update geometry and type. Call whenever either changes.
    ///
    /// The first call lays circles out without animating them in.
    pub fn configure(&mut self, size: Size, corner_radius: f64, bubble_type: BubbleType, now: Timestamp) {
        let outline = Outline { size, corner_radius };
        let first = self.outline.is_none();

        if self.coordinator.target_type() != bubble_type {
            self.coordinator.transition_to(bubble_type, now);
        }

        if self.outline != Some(outline) {
            tracing::trace!(width = size.width, height = size.height, corner_radius, "bubble outline changed");
            self.outline = Some(outline);
            self.repack();
        }

        if first {
            let targets = self.desired_targets(now);
            self.circles.configure_initial(&targets);
        } else {
            self.reconcile(now);
        }
    }

    /// Advance delayed effects to `now` and describe what to draw.
    pub fn sample_frame(&mut self, now: Timestamp) -> BubbleFrame {
        self.coordinator.poll(now);
        self.reconcile(now);
        self.circles.prune(now);

        let coordinator = &self.coordinator;
        let displayed_type = coordinator.displayed_type(now);
        let morph_progress = coordinator.morph_progress(now);
        let is_exploding = coordinator.is_exploding(now);
        let is_scaling = coordinator.is_scaling(now);
        let scaling_progress = coordinator.scaling_progress(now);
        let color = if self.packing.is_valid {
            self.config.bubble_srgba()
        } else {
            self.config.error_srgba()
        };

        let mut frame = BubbleFrame {
            time: now,
            circles: Vec::new(),
            rectangle_origin: Point::ORIGIN,
            rectangle_size: Size::ZERO,
            rectangle_corner_radius: 0.0,
            morph_progress,
            is_exploding,
            explosion_progress: coordinator.explosion_progress(now),
            is_scaling,
            scaling_progress,
            can_use_native: coordinator.can_use_native(now),
            displayed_type,
            packing_valid: self.packing.is_valid,
            color,
        };

        let Some(Outline { size, corner_radius }) = self.outline else {
            return frame;
        };

        // A read bubble is invisible except while it explodes away
        let visible = coordinator.target_type() != BubbleType::Read || is_exploding;
        if !visible {
            return frame;
        }

        let (w, h) = (size.width, size.height);
        let r = clamp_corner_radius(w, h, corner_radius);
        let center = Point::new(w / 2.0, h / 2.0);
        let scale = scaling_progress;
        let shrink = 1.0 - morph_progress;

        let mut along = 0.0;
        for sample in self.circles.current_base_circles(now) {
            let mid = along + sample.diameter / 2.0;
            along += sample.diameter;

            let diameter = sample.diameter * shrink * scale;
            if diameter <= 0.0 {
                continue;
            }
            let on_outline = position_along_perimeter(mid, w, h, r);
            frame.circles.push(FrameCircle {
                center: center + (on_outline - center) * scale,
                diameter,
            });
        }

        let scaled = Size::new(w * scale, h * scale);
        frame.rectangle_origin = center - Vec2::new(scaled.width / 2.0, scaled.height / 2.0);
        frame.rectangle_size = scaled;
        frame.rectangle_corner_radius = r * scale;
        frame
    }

    fn repack(&mut self) {
        let Some(Outline { size, corner_radius }) = self.outline else {
            return;
        };
        let r = clamp_corner_radius(size.width, size.height, corner_radius);
        let length = perimeter(size.width, size.height, r);
        self.packing = compute_diameters(
            length,
            self.config.bubble_min_diameter,
            self.config.bubble_max_diameter,
            geometry_seed(size.width, size.height, r),
        );
    }

    /// Circle targets for the type currently used for layout.
    fn desired_targets(&self, now: Timestamp) -> Vec<f64> {
        match self.coordinator.displayed_type(now) {
            BubbleType::Read => Vec::new(),
            BubbleType::Thinking | BubbleType::Talking => self.packing.diameters.clone(),
        }
    }

    /// Retarget circles only when the targets actually moved.
    fn reconcile(&mut self, now: Timestamp) {
        if self.outline.is_none() {
            return;
        }
        let targets = self.desired_targets(now);
        let current = self.circles.current_target_diameters();
        if !almost_equal(&current, &targets, DIAMETER_TOLERANCE) {
            self.circles.update_transitions(&targets, now);
        }
    }
}
