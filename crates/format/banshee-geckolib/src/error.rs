use banshee_animation_core::{BuildError, Channel, EasingError};
use thiserror::Error;

/// Failure to load a GeckoLib geometry or animation document.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum FormatError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("units_per_block must be finite and > 0, got {value}")]
    InvalidUnits { value: f32 },

    // ---- geometry ----
    #[error("geometry document declares no bones")]
    EmptyGeometry,

    #[error("geometry bone '{bone}' is declared more than once")]
    DuplicateBone { bone: String },

    #[error("geometry bone '{bone}' names unknown parent '{parent}'")]
    UnknownParent { bone: String, parent: String },

    #[error("geometry bone '{bone}' is part of a parent cycle")]
    Cycle { bone: String },

    #[error("geometry has {} root bones, expected one: {}", .roots.len(), .roots.join(", "))]
    MultipleRoots { roots: Vec<String> },

    // ---- animations ----
    #[error("animation '{animation}' has no animation_length")]
    MissingLength { animation: String },

    #[error("animation '{animation}': unsupported loop mode '{value}'")]
    InvalidLoop { animation: String, value: String },

    #[error("animation '{animation}': bone '{bone}' does not exist in geometry")]
    UnknownBone { animation: String, bone: String },

    #[error("animation '{animation}': bone '{bone}' {channel}: keyframe time '{key}' is not a number")]
    InvalidKeyframeTime {
        animation: String,
        bone: String,
        channel: Channel,
        key: String,
    },

    #[error("animation '{animation}': bone '{bone}' {channel}: keyframe '{key}': {reason}")]
    UnsupportedKeyframe {
        animation: String,
        bone: String,
        channel: Channel,
        key: String,
        reason: String,
    },

    #[error("animation '{animation}': bone '{bone}' {channel}: {source}")]
    Easing {
        animation: String,
        bone: String,
        channel: Channel,
        #[source]
        source: EasingError,
    },

    #[error("animation '{animation}': {source}")]
    Build {
        animation: String,
        #[source]
        source: BuildError,
    },
}
