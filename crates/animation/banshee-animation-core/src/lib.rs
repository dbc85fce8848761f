//! Banshee Animation Core
//!
//! Keyframed skeletal animation sampling for block-model characters:
//! validated keyframe tracks, easing, loop policies, per-bone pose
//! evaluation about a pivot and world-space composition over a bone tree.
//!
//! Everything here is built once and then sampled read-only. All validation
//! happens when tracks and animations are built; sampling never fails, so a
//! built [`Animation`] can be shared across threads and evaluated
//! concurrently.
//!
//! Document formats live in sibling crates; this crate only consumes
//! already-decoded [`BoneDescriptor`]s.

pub mod animation;
pub mod bone;
pub mod config;
pub mod curve;
pub mod easing;
pub mod error;
pub mod hierarchy;
pub mod keyframe;
pub mod value;

pub use animation::{Animation, AnimationMeta, BoneDescriptor, BoneHandle, MetaValue};
pub use bone::{euler_xyz, Affine, BonePose, BoneTransform};
pub use config::{Config, LookupPolicy};
pub use curve::{AnimationCurve, LoopPolicy};
pub use easing::{EaseEnds, EaseMethod, Easing};
pub use error::{BuildError, Channel, EasingError, LookupError, TrackError};
pub use hierarchy::{missing_bones, BoneNode, HierarchyComposer, Pose};
pub use keyframe::{Keyframe, KeyframeTrack};
pub use value::{Interpolate, Vec3};
