//! Serde schema of GeckoLib / Bedrock JSON documents. Only the fields the
//! loader consumes are modelled; everything else (cubes, textures, ...) is
//! ignored.

use banshee_animation_core::{MetaValue, Vec3};
use indexmap::IndexMap;
use serde::Deserialize;

// ----- geometry -----

#[derive(Debug, Deserialize)]
pub(crate) struct RawGeometryFile {
    #[serde(rename = "minecraft:geometry", default)]
    pub geometry: Vec<RawGeometry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawGeometry {
    #[serde(default)]
    pub description: Option<RawDescription>,
    #[serde(default)]
    pub bones: Vec<RawBone>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawDescription {
    #[serde(default)]
    pub identifier: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawBone {
    pub name: String,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub pivot: [f32; 3],
}

// ----- animations -----

#[derive(Debug, Deserialize)]
pub(crate) struct RawAnimationFile {
    #[serde(default)]
    pub animations: IndexMap<String, RawAnimation>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawAnimation {
    #[serde(default)]
    pub animation_length: Option<f32>,
    #[serde(rename = "loop", default)]
    pub loop_mode: RawLoop,
    #[serde(default)]
    pub override_previous_animation: bool,
    #[serde(default)]
    pub anim_time_update: MetaValue,
    #[serde(default)]
    pub blend_weight: MetaValue,
    #[serde(default)]
    pub start_delay: MetaValue,
    #[serde(default)]
    pub loop_delay: MetaValue,
    #[serde(default)]
    pub bones: IndexMap<String, RawBoneChannels>,
}

/// `false | true | "hold_on_last_frame"`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawLoop {
    Flag(bool),
    Mode(String),
}

impl Default for RawLoop {
    fn default() -> Self {
        RawLoop::Flag(false)
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawBoneChannels {
    #[serde(default)]
    pub position: Option<RawChannel>,
    #[serde(default)]
    pub rotation: Option<RawChannel>,
    #[serde(default)]
    pub scale: Option<RawChannel>,
}

/// One channel of one bone. Variant order matters for untagged matching.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawChannel {
    /// `{ "vector": [...] }`: a single keyframe at time zero.
    Single(RawFullKeyframe),
    /// `[x, y, z]` or a bare number: a single keyframe at time zero.
    Constant(RawVector),
    /// `{ "0.0": {...}, "0.5": [...] }`
    Timeline(IndexMap<String, RawKeyframe>),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawKeyframe {
    Full(RawFullKeyframe),
    Bare(RawVector),
    /// Anything else, kept so the loader can say which keyframe it rejects.
    Other(serde_json::Value),
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawFullKeyframe {
    pub vector: RawVector,
    #[serde(default)]
    pub easing: Option<String>,
    #[serde(rename = "easingArgs", default)]
    pub easing_args: Vec<f32>,
    #[serde(default)]
    pub lerp_mode: Option<String>,
    #[serde(default)]
    pub pre: Option<serde_json::Value>,
    #[serde(default)]
    pub post: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawVector {
    Xyz([f32; 3]),
    Uniform(f32),
}

impl RawVector {
    pub fn to_vec3(self) -> Vec3 {
        match self {
            RawVector::Xyz(v) => Vec3::from(v),
            RawVector::Uniform(s) => Vec3::repeat(s),
        }
    }
}

/// `(vector, easing name, easing args)` of a keyframe the curves can sample.
pub(crate) type KeyframeParts = (RawVector, Option<String>, Vec<f32>);

impl RawKeyframe {
    /// Splits the keyframe, or explains why it cannot be sampled.
    pub fn into_parts(self) -> Result<KeyframeParts, String> {
        match self {
            RawKeyframe::Full(k) => k.into_parts(),
            RawKeyframe::Bare(v) => Ok((v, None, Vec::new())),
            RawKeyframe::Other(value) if has_pre_post(&value) => Err(PRE_POST.to_string()),
            RawKeyframe::Other(_) => Err("unsupported keyframe shape".to_string()),
        }
    }
}

pub(crate) const PRE_POST: &str = "pre/post keyframes are not supported";

fn has_pre_post(value: &serde_json::Value) -> bool {
    value.get("pre").is_some() || value.get("post").is_some()
}

impl RawFullKeyframe {
    pub fn into_parts(self) -> Result<KeyframeParts, String> {
        if self.pre.is_some() || self.post.is_some() {
            return Err(PRE_POST.to_string());
        }
        match self.lerp_mode.as_deref() {
            None | Some("linear") => Ok((self.vector, self.easing, self.easing_args)),
            Some(mode) => Err(format!("lerp_mode '{mode}' is not supported")),
        }
    }
}
