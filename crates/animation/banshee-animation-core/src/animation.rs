//! Animations: named bone poses sharing one length and loop policy.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::bone::{BonePose, BoneTransform};
use crate::config::LookupPolicy;
use crate::curve::{AnimationCurve, LoopPolicy};
use crate::error::{BuildError, Channel, LookupError};
use crate::keyframe::{Keyframe, KeyframeTrack};
use crate::value::Vec3;

/// Metadata value that GeckoLib allows as a number or a Molang expression.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetaValue {
    Number(f32),
    Expression(String),
}

impl Default for MetaValue {
    fn default() -> Self {
        MetaValue::Number(0.0)
    }
}

impl MetaValue {
    #[inline]
    pub fn as_number(&self) -> Option<f32> {
        match self {
            MetaValue::Number(n) => Some(*n),
            MetaValue::Expression(_) => None,
        }
    }
}

/// Animation-level settings carried alongside the curves. Sampling does not
/// consume them; they are forwarded to whoever schedules playback.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AnimationMeta {
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
}

/// Unvalidated keyframes for one bone, as handed over by a document loader.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BoneDescriptor {
    pub pivot: Vec3,
    pub position: Vec<Keyframe<Vec3>>,
    /// Euler angles in radians.
    pub rotation: Vec<Keyframe<Vec3>>,
    pub scale: Vec<Keyframe<Vec3>>,
}

impl BoneDescriptor {
    #[inline]
    pub fn new(pivot: Vec3) -> Self {
        Self {
            pivot,
            ..Default::default()
        }
    }
}

/// Result of a bone lookup: the authored pose, or the empty-pose fallback.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BoneHandle<'a> {
    Found(&'a BonePose),
    Fallback,
}

impl<'a> BoneHandle<'a> {
    #[inline]
    pub fn is_fallback(&self) -> bool {
        matches!(self, BoneHandle::Fallback)
    }

    #[inline]
    pub fn pose(&self) -> Option<&'a BonePose> {
        match self {
            BoneHandle::Found(pose) => Some(pose),
            BoneHandle::Fallback => None,
        }
    }

    /// Local transform at `time`; identity for the fallback.
    #[inline]
    pub fn transform(&self, time: f32) -> BoneTransform {
        match self {
            BoneHandle::Found(pose) => pose.transform(time),
            BoneHandle::Fallback => BoneTransform::identity(),
        }
    }
}

/// A built, immutable animation. Sampling it never fails.
#[derive(Clone, Debug, PartialEq)]
pub struct Animation {
    length: f32,
    loop_policy: LoopPolicy,
    meta: AnimationMeta,
    bones: HashMap<String, BonePose>,
}

impl Animation {
    /// Validates every bone's keyframes and binds the resulting curves to
    /// `length` and `loop_policy`.
    pub fn build<I>(length: f32, loop_policy: LoopPolicy, bones: I) -> Result<Self, BuildError>
    where
        I: IntoIterator<Item = (String, BoneDescriptor)>,
    {
        if !(length.is_finite() && length > 0.0) {
            return Err(BuildError::InvalidLength { length });
        }

        let bones = bones.into_iter();
        let mut poses: HashMap<String, BonePose> = HashMap::with_capacity(bones.size_hint().0);
        for (name, descriptor) in bones {
            if poses.contains_key(&name) {
                return Err(BuildError::DuplicateBone { bone: name });
            }
            let pose = build_pose(&name, descriptor, loop_policy, length)?;
            poses.insert(name, pose);
        }

        Ok(Self {
            length,
            loop_policy,
            meta: AnimationMeta::default(),
            bones: poses,
        })
    }

    #[inline]
    pub fn with_meta(mut self, meta: AnimationMeta) -> Self {
        self.meta = meta;
        self
    }

    /// Length in seconds.
    #[inline]
    pub fn length(&self) -> f32 {
        self.length
    }

    #[inline]
    pub fn loop_policy(&self) -> LoopPolicy {
        self.loop_policy
    }

    #[inline]
    pub fn meta(&self) -> &AnimationMeta {
        &self.meta
    }

    #[inline]
    pub fn bone_count(&self) -> usize {
        self.bones.len()
    }

    #[inline]
    pub fn contains_bone(&self, name: &str) -> bool {
        self.bones.contains_key(name)
    }

    /// Animated bone names, in no particular order.
    pub fn bone_names(&self) -> impl Iterator<Item = &str> {
        self.bones.keys().map(String::as_str)
    }

    #[inline]
    pub fn pose(&self, name: &str) -> Option<&BonePose> {
        self.bones.get(name)
    }

    /// Lenient lookup: a bone without data yields [`BoneHandle::Fallback`].
    #[inline]
    pub fn bone(&self, name: &str) -> BoneHandle<'_> {
        match self.bones.get(name) {
            Some(pose) => BoneHandle::Found(pose),
            None => BoneHandle::Fallback,
        }
    }

    /// Strict lookup: a bone without data is an error.
    #[inline]
    pub fn bone_strict(&self, name: &str) -> Result<&BonePose, LookupError> {
        self.bones.get(name).ok_or_else(|| LookupError::BoneNotFound {
            bone: name.to_string(),
        })
    }

    /// Lookup under a caller-selected policy.
    #[inline]
    pub fn lookup(&self, name: &str, policy: LookupPolicy) -> Result<BoneHandle<'_>, LookupError> {
        match policy {
            LookupPolicy::Strict => self.bone_strict(name).map(BoneHandle::Found),
            LookupPolicy::Lenient => Ok(self.bone(name)),
        }
    }
}

fn build_pose(
    bone: &str,
    descriptor: BoneDescriptor,
    loop_policy: LoopPolicy,
    length: f32,
) -> Result<BonePose, BuildError> {
    if !descriptor.pivot.iter().all(|c| c.is_finite()) {
        return Err(BuildError::NonFinitePivot {
            bone: bone.to_string(),
        });
    }

    let curve = |channel: Channel, keyframes: Vec<Keyframe<Vec3>>, default: Vec3| {
        KeyframeTrack::build(keyframes)
            .map(|track| AnimationCurve::new(track, default, loop_policy, length))
            .map_err(|source| BuildError::Track {
                bone: bone.to_string(),
                channel,
                source,
            })
    };

    Ok(BonePose::new(
        descriptor.pivot,
        curve(Channel::Position, descriptor.position, Vec3::zeros())?,
        curve(Channel::Rotation, descriptor.rotation, Vec3::zeros())?,
        curve(Channel::Scale, descriptor.scale, Vec3::repeat(1.0))?,
    ))
}
