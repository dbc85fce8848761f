//! Animation curves: a keyframe track sampled at arbitrary times.
//!
//! Model:
//! - Sample time is first mapped into the animation's time domain by the
//!   [`LoopPolicy`] (`None` passes it through, `HoldLastFrame` clamps it to the
//!   animation length, `Loop` wraps it modulo the length).
//! - Before the first keyframe the first value is held; past the last keyframe
//!   the last value is held. The curve default is only used for an empty track.
//! - Between two keyframes the linear factor is reshaped by the *end*
//!   keyframe's easing, then the values are blended component-wise.

use serde::{Deserialize, Serialize};

use crate::keyframe::KeyframeTrack;
use crate::value::Interpolate;

/// How sample times outside `[0, length]` are mapped.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoopPolicy {
    /// Play once; keyframe holds apply at both ends.
    #[default]
    None,
    /// Clamp to the animation length.
    HoldLastFrame,
    /// Wrap modulo the animation length.
    Loop,
}

impl LoopPolicy {
    /// Maps a sample time into the animation's time domain.
    ///
    /// A non-positive or non-finite `length` degrades to `None` behavior.
    #[inline]
    pub fn adjust(&self, time: f32, length: f32) -> f32 {
        if !(length.is_finite() && length > 0.0) {
            return time;
        }
        match self {
            LoopPolicy::None => time,
            LoopPolicy::HoldLastFrame => time.min(length),
            LoopPolicy::Loop => time.rem_euclid(length),
        }
    }
}

/// Immutable, stateless sampler over one keyframe track.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationCurve<T> {
    track: KeyframeTrack<T>,
    default: T,
    loop_policy: LoopPolicy,
    length: f32,
}

impl<T: Interpolate> AnimationCurve<T> {
    /// Curve bound to an owning animation's loop policy and length.
    pub fn new(track: KeyframeTrack<T>, default: T, loop_policy: LoopPolicy, length: f32) -> Self {
        Self {
            track,
            default,
            loop_policy,
            length,
        }
    }

    /// Curve without an animation length; sample times are used as-is.
    pub fn unbounded(track: KeyframeTrack<T>, default: T) -> Self {
        Self::new(track, default, LoopPolicy::None, 0.0)
    }

    /// Curve that always yields `value`.
    pub fn constant(value: T) -> Self {
        Self::unbounded(KeyframeTrack::empty(), value)
    }

    #[inline]
    pub fn track(&self) -> &KeyframeTrack<T> {
        &self.track
    }

    #[inline]
    pub fn default_value(&self) -> T {
        self.default
    }

    #[inline]
    pub fn loop_policy(&self) -> LoopPolicy {
        self.loop_policy
    }

    /// Samples the curve at `time` seconds.
    pub fn evaluate(&self, time: f32) -> T {
        let keyframes = self.track.keyframes();
        let Some(last) = keyframes.last() else {
            return self.default;
        };

        let adj_time = self.loop_policy.adjust(time, self.length);
        let end = match self.track.segment_end(adj_time) {
            Some(end) => end,
            // past the last keyframe: hold it
            None => return last.value,
        };
        if end == 0 {
            // before (or at) the first keyframe: snap, no blend with the default
            return keyframes[0].value;
        }

        let start = &keyframes[end - 1];
        let end = &keyframes[end];
        let span = end.time - start.time;
        let raw = if span > 0.0 {
            (adj_time - start.time) / span
        } else {
            0.0
        };
        let factor = end.easing.shape(raw);
        start.value.lerp(&end.value, factor)
    }
}
