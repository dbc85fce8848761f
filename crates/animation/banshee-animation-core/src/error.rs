//! Error types raised while building tracks, easings and animations.
//!
//! Every variant here is produced at build time. Sampling a built animation
//! never fails.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::easing::EaseMethod;

/// Invalid easing definition.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum EasingError {
    #[error("unknown easing '{name}'")]
    UnknownEasing { name: String },

    #[error("easing '{easing}' requires a parameter")]
    MissingEasingParam { easing: String },

    #[error("easing {method:?} parameter must be finite, got {value}")]
    NonFiniteParam { method: EaseMethod, value: f32 },

    #[error("step easing needs at least one step, got {steps}")]
    InvalidStepCount { steps: i64 },
}

/// Invalid keyframe sequence.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum TrackError {
    #[error("keyframe {index}: time {time} is negative")]
    NegativeTime { index: usize, time: f32 },

    #[error("keyframe {index}: time is not finite")]
    NonFiniteTime { index: usize },

    #[error("keyframe {index}: time {next_time} is not after {prev_time}")]
    UnsortedKeyframes {
        index: usize,
        prev_time: f32,
        next_time: f32,
    },

    #[error("keyframe {index}: value is not finite")]
    NonFiniteValue { index: usize },

    #[error("keyframe {index}: {source}")]
    Easing {
        index: usize,
        #[source]
        source: EasingError,
    },
}

/// Bone channel an error or track belongs to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Position,
    Rotation,
    Scale,
}

impl Channel {
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Channel::Position => "position",
            Channel::Rotation => "rotation",
            Channel::Scale => "scale",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Failure to assemble an [`Animation`](crate::animation::Animation).
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum BuildError {
    #[error("animation length must be > 0, got {length}")]
    InvalidLength { length: f32 },

    #[error("bone '{bone}' is declared more than once")]
    DuplicateBone { bone: String },

    #[error("bone '{bone}' pivot is not finite")]
    NonFinitePivot { bone: String },

    #[error("bone '{bone}' {channel}: {source}")]
    Track {
        bone: String,
        channel: Channel,
        #[source]
        source: TrackError,
    },
}

/// Strict bone lookup failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LookupError {
    #[error("bone '{bone}' has no animation data")]
    BoneNotFound { bone: String },

    #[error("{} bones have no animation data: {}", .bones.len(), .bones.join(", "))]
    MissingBones { bones: Vec<String> },
}
