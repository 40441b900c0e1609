//! Transition coordinator, one per bubble.
//!
//! Owns the [`BubbleAnimationState`] and the delayed side effects that ride
//! along with a transition:
//!
//! - **displayed type flip**: the type used for layout lags the animation for
//!   thinking → read (held until the explosion ends) and read → talking (a
//!   0.02 s grace window);
//! - **native eligibility**: after a thinking → talking morph, the renderer may
//!   hand the bubble to the platform's plain bubble once the morph has settled
//!   for [`NATIVE_GRACE_PERIOD`];
//! - **auto-idle**: every animated state collapses to `Idle(target)` when its
//!   duration runs out.
//!
//! Effects are queued on a [`Scheduler`] and applied by [`TransitionCoordinator::poll`].
//! Every `&self` query also folds in whatever *would* have fired by `now`, so
//! results never depend on the poll arriving on time. Starting a new
//! transition cancels all queued effects before queueing its own.

use crate::scheduler::Scheduler;
use crate::state::{BubbleAnimationState, BubbleType};
use crate::{BubbleConfig, Timestamp, NATIVE_GRACE_PERIOD, QUICK_APPEAR_DURATION};

/// Delayed effect queued by a transition.
#[derive(Debug, Clone, Copy, PartialEq)]
enum DeferredAction {
    SetDisplayedType(BubbleType),
    EnableNative,
    CollapseToIdle,
}

/// Drives one bubble's animation state and its delayed effects.
#[derive(Debug, Clone)]
pub struct TransitionCoordinator {
    config: BubbleConfig,
    /// Timing of the in-flight transition, captured when it started.
    running: BubbleConfig,
    state: BubbleAnimationState,
    displayed_type: BubbleType,
    can_use_native: bool,
    scheduler: Scheduler<DeferredAction>,
}

impl TransitionCoordinator {
    pub fn new(initial: BubbleType, config: BubbleConfig) -> Self {
        Self {
            running: config.clone(),
            config,
            state: BubbleAnimationState::Idle(initial),
            displayed_type: initial,
            can_use_native: initial == BubbleType::Talking,
            scheduler: Scheduler::new(),
        }
    }

    pub fn config(&self) -> &BubbleConfig {
        &self.config
    }

    /// Replace the config. Takes effect at the next transition; one already
    /// in flight finishes with the durations it started with.
    pub fn set_config(&mut self, config: BubbleConfig) {
        self.config = config;
    }

    /// The stored state, without lazy collapse.
    pub fn state(&self) -> BubbleAnimationState {
        self.state
    }

    /// Type the current state resolves to.
    pub fn target_type(&self) -> BubbleType {
        self.state.target_type()
    }

    /// Number of delayed effects still queued.
    pub fn pending_effects(&self) -> usize {
        self.scheduler.len()
    }

    // ========================================================================
    // Transitions
    // ========================================================================

    /// Start animating from `from` to `to` at `now`.
    pub fn start_transition(&mut self, from: BubbleType, to: BubbleType, now: Timestamp) {
        let cancelled = self.scheduler.cancel_all();
        self.running = self.config.clone();
        self.state = BubbleAnimationState::transition(from, to, now);

        tracing::debug!(%from, %to, now, cancelled, state = ?self.state, "bubble transition started");

        // Displayed type
        match (from, to) {
            (BubbleType::Thinking, BubbleType::Read) => {
                self.defer(now + self.running.explosion_duration, DeferredAction::SetDisplayedType(to), now)
            }
            (BubbleType::Read, BubbleType::Talking) => {
                self.defer(now + QUICK_APPEAR_DURATION, DeferredAction::SetDisplayedType(to), now)
            }
            _ => self.displayed_type = to,
        }

        // Native rendering eligibility
        match self.state {
            BubbleAnimationState::Morphing { from, to, .. } => {
                self.can_use_native = false;
                if from == BubbleType::Thinking && to == BubbleType::Talking {
                    let fire_at = now + self.running.morph_duration + NATIVE_GRACE_PERIOD;
                    self.defer(fire_at, DeferredAction::EnableNative, now);
                }
            }
            BubbleAnimationState::Exploding { .. } | BubbleAnimationState::Scaling { .. } => {
                self.can_use_native = false;
            }
            BubbleAnimationState::QuickAppearing { .. } => self.can_use_native = true,
            BubbleAnimationState::Idle(t) => self.can_use_native = t == BubbleType::Talking,
        }

        // Auto-idle
        if self.state.is_animating() {
            let fire_at = now + self.state.duration(&self.running);
            self.defer(fire_at, DeferredAction::CollapseToIdle, now);
        }
    }

    /// Start a transition from the current target type to `to`.
    pub fn transition_to(&mut self, to: BubbleType, now: Timestamp) {
        let from = self.target_type();
        self.start_transition(from, to, now);
    }

    /// Apply every delayed effect due at `now`.
    pub fn poll(&mut self, now: Timestamp) {
        for action in self.scheduler.drain_due(now) {
            tracing::trace!(?action, now, "deferred bubble effect fired");
            self.apply(action);
        }
        if self.state.is_animating() && self.state.is_complete(now, &self.running) {
            self.state = BubbleAnimationState::Idle(self.state.target_type());
        }
    }

    fn defer(&mut self, fire_at: Timestamp, action: DeferredAction, now: Timestamp) {
        if fire_at <= now {
            self.apply(action);
        } else {
            self.scheduler.schedule(fire_at, action);
        }
    }

    fn apply(&mut self, action: DeferredAction) {
        match action {
            DeferredAction::SetDisplayedType(t) => self.displayed_type = t,
            DeferredAction::EnableNative => {
                if self.state.target_type() == BubbleType::Talking {
                    self.can_use_native = true;
                }
            }
            DeferredAction::CollapseToIdle => {
                self.state = BubbleAnimationState::Idle(self.state.target_type());
            }
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// State at `now`, collapsed to `Idle(target)` once the animation is complete.
    pub fn current_state(&self, now: Timestamp) -> BubbleAnimationState {
        if self.state.is_animating() && self.state.is_complete(now, &self.running) {
            BubbleAnimationState::Idle(self.state.target_type())
        } else {
            self.state
        }
    }

    /// Type used for layout sizing at `now`.
    pub fn displayed_type(&self, now: Timestamp) -> BubbleType {
        self.scheduler
            .due(now)
            .into_iter()
            .fold(self.displayed_type, |shown, action| match action {
                DeferredAction::SetDisplayedType(t) => *t,
                _ => shown,
            })
    }

    /// Whether the platform's plain bubble can stand in for the animated one.
    pub fn can_use_native(&self, now: Timestamp) -> bool {
        self.can_use_native
            || (self.state.target_type() == BubbleType::Talking
                && self
                    .scheduler
                    .due(now)
                    .into_iter()
                    .any(|a| *a == DeferredAction::EnableNative))
    }

    pub fn is_animating(&self, now: Timestamp) -> bool {
        self.current_state(now).is_animating()
    }

    pub fn morph_progress(&self, now: Timestamp) -> f64 {
        self.current_state(now).morph_progress(now, &self.running)
    }

    pub fn animation_progress(&self, now: Timestamp) -> f64 {
        self.current_state(now).animation_progress(now, &self.running)
    }

    pub fn is_exploding(&self, now: Timestamp) -> bool {
        matches!(self.current_state(now), BubbleAnimationState::Exploding { .. })
    }

    /// 0 → 1 through the explosion; 0 when not exploding.
    pub fn explosion_progress(&self, now: Timestamp) -> f64 {
        match self.current_state(now) {
            s @ BubbleAnimationState::Exploding { .. } => s.animation_progress(now, &self.running),
            _ => 0.0,
        }
    }

    pub fn is_scaling(&self, now: Timestamp) -> bool {
        matches!(self.current_state(now), BubbleAnimationState::Scaling { .. })
    }

    /// 0 → 1 through the grow-in; 1 (full size) when not scaling.
    pub fn scaling_progress(&self, now: Timestamp) -> f64 {
        match self.current_state(now) {
            s @ BubbleAnimationState::Scaling { .. } => s.animation_progress(now, &self.running),
            _ => 1.0,
        }
    }

    /// Layout size changes should snap rather than animate while the bubble
    /// is exploding, growing from a dot, or popping in.
    pub fn should_skip_size_animation(&self, now: Timestamp) -> bool {
        matches!(
            self.current_state(now),
            BubbleAnimationState::Exploding { .. }
                | BubbleAnimationState::Scaling { .. }
                | BubbleAnimationState::QuickAppearing { .. }
        )
    }
}
