//! GeckoLib document loading for `banshee-animation-core`.
//!
//! Reads `*.geo.json` geometry (bone hierarchy and pivots) and
//! `*.animation.json` animation files into core [`BoneNode`] trees and
//! [`Animation`]s. Model units are converted to blocks (`/ 16` by default) and
//! rotations from degrees to radians on the way in.
//!
//! ```no_run
//! use banshee_animation_core::{BoneTransform, HierarchyComposer};
//! use banshee_geckolib::{load_animations, load_geometry};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let geometry = load_geometry(&std::fs::read_to_string("player.geo.json")?)?;
//! let animations = load_animations(&std::fs::read_to_string("player.animation.json")?, &geometry)?;
//! let pose = HierarchyComposer::default().compose(
//!     &geometry.tree()?,
//!     &animations["walk"],
//!     0.25,
//!     BoneTransform::identity(),
//! )?;
//! # let _ = pose;
//! # Ok(())
//! # }
//! ```
//!
//! [`BoneNode`]: banshee_animation_core::BoneNode
//! [`Animation`]: banshee_animation_core::Animation

pub mod animation;
pub mod config;
pub mod error;
pub mod geometry;
mod raw;

pub use animation::{animations_from_json, AnimationSet};
pub use config::{LoaderConfig, UnknownBonePolicy, DEFAULT_UNITS_PER_BLOCK};
pub use error::FormatError;
pub use geometry::{Geometry, GeometryBone};

/// Loads a geometry with the default [`LoaderConfig`].
pub fn load_geometry(json: &str) -> Result<Geometry, FormatError> {
    Geometry::from_json(json, &LoaderConfig::default())
}

/// Loads every animation of a document with the default [`LoaderConfig`].
pub fn load_animations(json: &str, geometry: &Geometry) -> Result<AnimationSet, FormatError> {
    animations_from_json(json, geometry, &LoaderConfig::default())
}
