//! Speech-bubble metaball engine for Rio.
//!
//! The thinking/talking/read indicator in a chat is drawn as a rounded
//! rectangle ringed by overlapping circles. Under a blur + threshold pass the
//! circles fuse with the rectangle into a single cloud-like blob. This crate
//! owns all of the math behind that visual and none of the drawing: a
//! renderer calls [`BubbleEngine::sample_frame`] once per tick and draws what
//! it gets back.
//!
//! # Layers
//!
//! ```text
//! BubbleEngine (engine)          ← configure() on size/type change, sample_frame() per tick
//!     ├── TransitionCoordinator  ← owns BubbleAnimationState + Scheduler
//!     │       └── BubbleAnimationState (state) ← pure transition table + progress math
//!     └── CircleAnimationManager ← retarget / appear / disappear interpolation
//!             └── compute_diameters (packing) ← seeded diameters along the outline
//!                     └── perimeter / position_along_perimeter (geometry)
//! ```
//!
//! # Time
//!
//! Every time-dependent call takes an explicit [`Timestamp`] (seconds on a
//! monotonic animation clock). Nothing in here reads a clock on its own, so
//! the whole engine is deterministic under test.
//!
//! # Key Types
//!
//! |--------------------------|-----------------------------------------------|
//! | Type                     | Purpose                                       |
//! |--------------------------|-----------------------------------------------|
//! | [`BubbleConfig`]         | Durations, diameter bounds, colors (RON)      |
//! | [`BubbleType`]           | Thinking / talking / read                     |
//! | [`BubbleAnimationState`] | Current visual phase                          |
//! | [`TransitionCoordinator`]| Phase transitions + delayed effects           |
//! | [`CircleAnimationManager`]| Animated decorative circle slots             |
//! | [`PackingResult`]        | Packed diameters + validity flag              |
//! | [`BubbleEngine`]         | Pull-based frame sampler                      |
//! | [`BubbleFrame`]          | Everything a renderer needs for one frame     |
//! |--------------------------|-----------------------------------------------|

pub mod circles;
pub mod config;
pub mod coordinator;
pub mod engine;
mod error;
pub mod geometry;
pub mod packing;
pub mod scheduler;
pub mod state;

pub use circles::{almost_equal, ease, CircleAnimationManager, CircleId, CircleSample, CircleTransition};
pub use config::BubbleConfig;
pub use coordinator::TransitionCoordinator;
pub use engine::{BubbleEngine, BubbleFrame, FrameCircle};
pub use error::ConfigError;
pub use geometry::{clamp_corner_radius, perimeter, position_along_perimeter};
pub use packing::{compute_diameters, geometry_seed, PackingResult};
pub use scheduler::Scheduler;
pub use state::{BubbleAnimationState, BubbleType};

/// Seconds on the caller's monotonic animation clock.
pub type Timestamp = f64;

/// Result type for configuration loading.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Tolerance for "did the target diameter list actually change" checks.
///
/// Keeps floating-point noise in re-packing from restarting circle animations.
pub const DIAMETER_TOLERANCE: f64 = 0.1;

/// Duration of the near-instant read → talking appearance (seconds).
pub const QUICK_APPEAR_DURATION: f64 = 0.02;

/// Slack for comparing elapsed time against a duration, so `start + duration`
/// counts as finished despite floating-point rounding.
pub(crate) const TIME_EPSILON: f64 = 1e-9;

/// Extra time after a thinking → talking morph before native rendering may take over (seconds).
pub const NATIVE_GRACE_PERIOD: f64 = 0.8;
