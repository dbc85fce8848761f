//! GeckoLib animation documents (`*.animation.json`).

use banshee_animation_core::{
    Animation, AnimationMeta, BoneDescriptor, Channel, Easing, Keyframe, LoopPolicy, Vec3,
};
use indexmap::IndexMap;
use log::{debug, warn};

use crate::config::{LoaderConfig, UnknownBonePolicy};
use crate::error::FormatError;
use crate::geometry::{check_units, Geometry};
use crate::raw::{
    KeyframeParts, RawAnimation, RawAnimationFile, RawChannel, RawLoop, RawVector, PRE_POST,
};

const HOLD_ON_LAST_FRAME: &str = "hold_on_last_frame";

/// Loaded animations keyed by name, in document order.
pub type AnimationSet = IndexMap<String, Animation>;

/// Parses every animation in `json` against `geometry`.
pub fn animations_from_json(
    json: &str,
    geometry: &Geometry,
    config: &LoaderConfig,
) -> Result<AnimationSet, FormatError> {
    check_units(config.units_per_block)?;
    let file: RawAnimationFile = serde_json::from_str(json)?;

    let mut out = AnimationSet::with_capacity(file.animations.len());
    for (name, raw) in file.animations {
        let animation = convert_animation(&name, raw, geometry, config)?;
        out.insert(name, animation);
    }
    debug!("loaded {} animations", out.len());
    Ok(out)
}

fn convert_animation(
    name: &str,
    raw: RawAnimation,
    geometry: &Geometry,
    config: &LoaderConfig,
) -> Result<Animation, FormatError> {
    let length = raw.animation_length.ok_or_else(|| FormatError::MissingLength {
        animation: name.to_string(),
    })?;
    let loop_policy = match raw.loop_mode {
        RawLoop::Flag(false) => LoopPolicy::None,
        RawLoop::Flag(true) => LoopPolicy::Loop,
        RawLoop::Mode(mode) if mode == HOLD_ON_LAST_FRAME => LoopPolicy::HoldLastFrame,
        RawLoop::Mode(value) => {
            return Err(FormatError::InvalidLoop {
                animation: name.to_string(),
                value,
            })
        }
    };

    let mut bones: Vec<(String, BoneDescriptor)> = Vec::with_capacity(raw.bones.len());
    for (bone, channels) in raw.bones {
        let Some(pivot) = geometry.pivot(&bone) else {
            match config.unknown_bones {
                UnknownBonePolicy::Reject => {
                    return Err(FormatError::UnknownBone {
                        animation: name.to_string(),
                        bone,
                    })
                }
                UnknownBonePolicy::Ignore => {
                    warn!("animation '{name}': ignoring bone '{bone}' missing from geometry");
                    continue;
                }
            }
        };

        let ctx = ChannelContext {
            animation: name,
            bone: &bone,
        };
        let units = config.units_per_block;
        let descriptor = BoneDescriptor {
            pivot,
            position: ctx.keyframes(Channel::Position, channels.position, |v| v / units)?,
            rotation: ctx.keyframes(Channel::Rotation, channels.rotation, |v| {
                v.map(f32::to_radians)
            })?,
            scale: ctx.keyframes(Channel::Scale, channels.scale, |v| v)?,
        };
        bones.push((bone, descriptor));
    }

    let meta = AnimationMeta {
        override_previous_animation: raw.override_previous_animation,
        anim_time_update: raw.anim_time_update,
        blend_weight: raw.blend_weight,
        start_delay: raw.start_delay,
        loop_delay: raw.loop_delay,
    };
    Animation::build(length, loop_policy, bones)
        .map(|animation| animation.with_meta(meta))
        .map_err(|source| FormatError::Build {
            animation: name.to_string(),
            source,
        })
}

struct ChannelContext<'a> {
    animation: &'a str,
    bone: &'a str,
}

impl ChannelContext<'_> {
    /// Converts one channel into time-sorted keyframes with `map` applied to
    /// every vector. Ordering is left to the core to validate.
    fn keyframes(
        &self,
        channel: Channel,
        raw: Option<RawChannel>,
        map: impl Fn(Vec3) -> Vec3,
    ) -> Result<Vec<Keyframe<Vec3>>, FormatError> {
        let constant = |v: RawVector| vec![Keyframe::new(0.0, map(v.to_vec3()))];
        let timeline = match raw {
            None => return Ok(Vec::new()),
            Some(RawChannel::Single(k)) => {
                let (vector, easing, args) = self.parts(channel, "0", k.into_parts())?;
                let easing = self.easing(channel, easing.as_deref(), &args)?;
                return Ok(vec![Keyframe::new(0.0, map(vector.to_vec3())).with_easing(easing)]);
            }
            Some(RawChannel::Constant(v)) => return Ok(constant(v)),
            Some(RawChannel::Timeline(timeline)) => timeline,
        };

        let mut keyframes = Vec::with_capacity(timeline.len());
        for (key, raw) in timeline {
            if key == "pre" || key == "post" {
                return Err(self.unsupported(channel, "0", PRE_POST.to_string()));
            }
            let time: f32 = key
                .trim()
                .parse()
                .map_err(|_| FormatError::InvalidKeyframeTime {
                    animation: self.animation.to_string(),
                    bone: self.bone.to_string(),
                    channel,
                    key: key.clone(),
                })?;
            let (vector, easing, args) = self.parts(channel, &key, raw.into_parts())?;
            let easing = self.easing(channel, easing.as_deref(), &args)?;
            keyframes.push(Keyframe::new(time, map(vector.to_vec3())).with_easing(easing));
        }
        keyframes.sort_by(|a, b| a.time.total_cmp(&b.time));
        Ok(keyframes)
    }

    fn parts(
        &self,
        channel: Channel,
        key: &str,
        parts: Result<KeyframeParts, String>,
    ) -> Result<KeyframeParts, FormatError> {
        parts.map_err(|reason| self.unsupported(channel, key, reason))
    }

    fn unsupported(&self, channel: Channel, key: &str, reason: String) -> FormatError {
        FormatError::UnsupportedKeyframe {
            animation: self.animation.to_string(),
            bone: self.bone.to_string(),
            channel,
            key: key.to_string(),
            reason,
        }
    }

    fn easing(
        &self,
        channel: Channel,
        name: Option<&str>,
        args: &[f32],
    ) -> Result<Easing, FormatError> {
        match name {
            None => Ok(Easing::Linear),
            Some(name) => Easing::parse(name, args).map_err(|source| FormatError::Easing {
                animation: self.animation.to_string(),
                bone: self.bone.to_string(),
                channel,
                source,
            }),
        }
    }
}
