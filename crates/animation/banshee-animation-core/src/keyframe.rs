//! Keyframes and validated keyframe tracks.

use serde::{Deserialize, Serialize};

use crate::easing::Easing;
use crate::error::TrackError;
use crate::value::Interpolate;

/// A single timed sample of a channel.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Keyframe<T> {
    /// Seconds from the start of the animation.
    pub time: f32,
    pub value: T,
    /// Shapes the segment that ends at this keyframe.
    #[serde(default)]
    pub easing: Easing,
}

impl<T> Keyframe<T> {
    #[inline]
    pub fn new(time: f32, value: T) -> Self {
        Self {
            time,
            value,
            easing: Easing::Linear,
        }
    }

    #[inline]
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }
}

/// Keyframes in strictly increasing time order.
///
/// Only constructible through [`KeyframeTrack::build`], so every track in
/// circulation has finite, non-negative, strictly increasing times, finite
/// values and valid easings.
#[derive(Clone, Debug, PartialEq)]
pub struct KeyframeTrack<T> {
    keyframes: Vec<Keyframe<T>>,
}

impl<T> Default for KeyframeTrack<T> {
    fn default() -> Self {
        Self {
            keyframes: Vec::new(),
        }
    }
}

impl<T: Interpolate> KeyframeTrack<T> {
    pub fn build(keyframes: Vec<Keyframe<T>>) -> Result<Self, TrackError> {
        for (index, keyframe) in keyframes.iter().enumerate() {
            if !keyframe.time.is_finite() {
                return Err(TrackError::NonFiniteTime { index });
            }
            if keyframe.time < 0.0 {
                return Err(TrackError::NegativeTime {
                    index,
                    time: keyframe.time,
                });
            }
            if !keyframe.value.is_finite() {
                return Err(TrackError::NonFiniteValue { index });
            }
            keyframe
                .easing
                .validate()
                .map_err(|source| TrackError::Easing { index, source })?;
        }

        if let Some(index) = keyframes
            .windows(2)
            .position(|pair| pair[0].time >= pair[1].time)
        {
            return Err(TrackError::UnsortedKeyframes {
                index: index + 1,
                prev_time: keyframes[index].time,
                next_time: keyframes[index + 1].time,
            });
        }

        Ok(Self { keyframes })
    }
}

impl<T> KeyframeTrack<T> {
    #[inline]
    pub fn empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.keyframes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keyframes.is_empty()
    }

    #[inline]
    pub fn keyframes(&self) -> &[Keyframe<T>] {
        &self.keyframes
    }

    #[inline]
    pub fn first(&self) -> Option<&Keyframe<T>> {
        self.keyframes.first()
    }

    #[inline]
    pub fn last(&self) -> Option<&Keyframe<T>> {
        self.keyframes.last()
    }

    /// Index of the first keyframe whose time is `>= time`, or `None` when
    /// `time` lies past the last keyframe. NaN never matches.
    #[inline]
    pub fn segment_end(&self, time: f32) -> Option<usize> {
        let idx = self.keyframes.partition_point(|k| k.time < time);
        if idx < self.keyframes.len() && self.keyframes[idx].time >= time {
            Some(idx)
        } else {
            None
        }
    }

    /// Time of the last keyframe, or zero for an empty track.
    #[inline]
    pub fn end_time(&self) -> f32 {
        self.keyframes.last().map(|k| k.time).unwrap_or(0.0)
    }
}
