//! Error types for configuration loading.

use thiserror::Error;

/// Errors that can occur while loading or validating a [`crate::BubbleConfig`].
///
/// Animation paths never return errors; bad geometry or transitions are
/// clamped to defaults instead.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Config text is not valid RON for `BubbleConfig`.
    #[error("RON parse error: {0}")]
    Ron(#[from] ron::error::SpannedError),

    /// A field parsed but holds an unusable value.
    #[error("invalid config field `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}
