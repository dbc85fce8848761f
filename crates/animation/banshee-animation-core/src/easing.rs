//! Easing table.
//!
//! An [`Easing`] reshapes the linear factor of a keyframe segment before the
//! two keyframe values are blended. It is keyed on the keyframe that *ends*
//! the segment.
//!
//! Every smooth method is described once by its ease-in curve
//! ([`EaseMethod::ease_in`]); the `Out` and `InOut` ends are derived from it:
//! - `In`:    `f(t)`
//! - `Out`:   `1 - f(1 - t)`
//! - `InOut`: `f(2t) / 2` below the midpoint, `1 - f(2(1 - t)) / 2` above it
//!
//! Back and elastic curves leave `[0, 1]` on purpose; results are never clamped.

use std::f32::consts::{FRAC_PI_2, PI};

use serde::{Deserialize, Serialize};

use crate::error::EasingError;

const DEFAULT_BACK_OVERSHOOT: f32 = 1.70158;
const DEFAULT_ELASTIC_BOUNCINESS: f32 = 1.0;
const DEFAULT_BOUNCE_BOUNCINESS: f32 = 0.5;

/// Which end(s) of the segment the curve eases.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EaseEnds {
    In,
    Out,
    InOut,
}

/// Smooth easing curve family.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EaseMethod {
    Sine,
    Quad,
    Cubic,
    Quart,
    Quint,
    Expo,
    Circ,
    /// Parameter: overshoot.
    Back,
    /// Parameter: bounciness.
    Elastic,
    /// Parameter: bounciness.
    Bounce,
}

/// GeckoLib identifier prefixes. `easeInOut` must precede `easeIn`.
const END_PREFIXES: [(&str, EaseEnds); 3] = [
    ("easeInOut", EaseEnds::InOut),
    ("easeIn", EaseEnds::In),
    ("easeOut", EaseEnds::Out),
];

/// GeckoLib identifier suffixes.
const METHOD_NAMES: [(&str, EaseMethod); 10] = [
    ("Sine", EaseMethod::Sine),
    ("Quad", EaseMethod::Quad),
    ("Cubic", EaseMethod::Cubic),
    ("Quart", EaseMethod::Quart),
    ("Quint", EaseMethod::Quint),
    ("Expo", EaseMethod::Expo),
    ("Circ", EaseMethod::Circ),
    ("Back", EaseMethod::Back),
    ("Elastic", EaseMethod::Elastic),
    ("Bounce", EaseMethod::Bounce),
];

impl EaseEnds {
    #[inline]
    pub fn prefix(&self) -> &'static str {
        END_PREFIXES
            .iter()
            .find(|(_, ends)| ends == self)
            .map(|(prefix, _)| *prefix)
            .unwrap_or("easeIn")
    }
}

impl EaseMethod {
    /// Identifier suffix, e.g. `"Quad"`.
    #[inline]
    pub fn name(&self) -> &'static str {
        METHOD_NAMES
            .iter()
            .find(|(_, method)| method == self)
            .map(|(name, _)| *name)
            .unwrap_or("Linear")
    }

    #[inline]
    pub fn from_name(name: &str) -> Option<Self> {
        METHOD_NAMES
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, method)| *method)
    }

    /// Back, elastic and bounce are parametric.
    #[inline]
    pub fn requires_param(&self) -> bool {
        matches!(self, EaseMethod::Back | EaseMethod::Elastic | EaseMethod::Bounce)
    }

    /// Parameter used when an unvalidated [`Easing`] lacks one.
    #[inline]
    pub fn default_param(&self) -> f32 {
        match self {
            EaseMethod::Back => DEFAULT_BACK_OVERSHOOT,
            EaseMethod::Elastic => DEFAULT_ELASTIC_BOUNCINESS,
            EaseMethod::Bounce => DEFAULT_BOUNCE_BOUNCINESS,
            _ => 0.0,
        }
    }

    /// Raw ease-in curve with `f(0) = 0` and `f(1) = 1`.
    pub fn ease_in(&self, t: f32, param: f32) -> f32 {
        match self {
            EaseMethod::Sine => 1.0 - (t * FRAC_PI_2).cos(),
            EaseMethod::Quad => t * t,
            EaseMethod::Cubic => t.powi(3),
            EaseMethod::Quart => t.powi(4),
            EaseMethod::Quint => t.powi(5),
            EaseMethod::Expo => {
                if t == 0.0 {
                    0.0
                } else {
                    2f32.powf(10.0 * t - 10.0)
                }
            }
            EaseMethod::Circ => 1.0 - (1.0 - t * t).max(0.0).sqrt(),
            EaseMethod::Back => t * t * ((param + 1.0) * t - param),
            EaseMethod::Elastic => 1.0 - elastic_out(1.0 - t, param),
            EaseMethod::Bounce => 1.0 - bounce_out(1.0 - t, param),
        }
    }
}

/// Decaying oscillation settling on 1; `bounciness` scales the frequency.
#[inline]
fn elastic_out(x: f32, bounciness: f32) -> f32 {
    1.0 - (x * FRAC_PI_2).cos().powi(3) * (x * bounciness * PI).cos()
}

/// Lower envelope of four parabolas touching 1; `k` scales each rebound.
#[inline]
fn bounce_out(x: f32, k: f32) -> f32 {
    let first = 121.0 / 16.0 * x * x;
    let second = 121.0 / 4.0 * k * (x - 6.0 / 11.0).powi(2) + 1.0 - k;
    let third = 121.0 * k * k * (x - 9.0 / 11.0).powi(2) + 1.0 - k * k;
    let fourth = 484.0 * k * k * k * (x - 10.5 / 11.0).powi(2) + 1.0 - k * k * k;
    first.min(second).min(third).min(fourth)
}

/// Shaping function attached to the end keyframe of a segment.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Easing {
    #[default]
    Linear,
    /// Quantizes the factor into `steps` equal buckets (floor).
    Step { steps: u32 },
    Smooth {
        ends: EaseEnds,
        method: EaseMethod,
        #[serde(default)]
        param: Option<f32>,
    },
}

impl Easing {
    pub fn step(steps: i64) -> Result<Self, EasingError> {
        let easing = match u32::try_from(steps) {
            Ok(steps) => Easing::Step { steps },
            Err(_) => return Err(EasingError::InvalidStepCount { steps }),
        };
        easing.validate()?;
        Ok(easing)
    }

    pub fn smooth(
        ends: EaseEnds,
        method: EaseMethod,
        param: Option<f32>,
    ) -> Result<Self, EasingError> {
        let easing = Easing::Smooth {
            ends,
            method,
            param: if method.requires_param() { param } else { None },
        };
        easing.validate()?;
        Ok(easing)
    }

    /// Resolves a GeckoLib easing identifier (`"linear"`, `"step"`,
    /// `"easeInOutQuad"`, ...). `args` holds the `easingArgs` array: the step
    /// count for `step`, the parameter for back/elastic/bounce.
    pub fn parse(name: &str, args: &[f32]) -> Result<Self, EasingError> {
        match name {
            "linear" => return Ok(Easing::Linear),
            "step" => {
                let steps = args.first().ok_or_else(|| EasingError::MissingEasingParam {
                    easing: name.to_string(),
                })?;
                return Easing::step(*steps as i64);
            }
            _ => {}
        }

        let unknown = || EasingError::UnknownEasing {
            name: name.to_string(),
        };
        let (ends, rest) = END_PREFIXES
            .iter()
            .find_map(|(prefix, ends)| name.strip_prefix(prefix).map(|rest| (*ends, rest)))
            .ok_or_else(unknown)?;
        let method = EaseMethod::from_name(rest).ok_or_else(unknown)?;
        Easing::smooth(ends, method, args.first().copied())
    }

    /// GeckoLib identifier of this easing.
    pub fn name(&self) -> String {
        match self {
            Easing::Linear => "linear".to_string(),
            Easing::Step { .. } => "step".to_string(),
            Easing::Smooth { ends, method, .. } => format!("{}{}", ends.prefix(), method.name()),
        }
    }

    pub fn validate(&self) -> Result<(), EasingError> {
        match *self {
            Easing::Linear => Ok(()),
            Easing::Step { steps } => {
                if steps == 0 {
                    Err(EasingError::InvalidStepCount { steps: 0 })
                } else {
                    Ok(())
                }
            }
            Easing::Smooth { method, param, .. } => {
                if !method.requires_param() {
                    return Ok(());
                }
                match param {
                    None => Err(EasingError::MissingEasingParam { easing: self.name() }),
                    Some(value) if !value.is_finite() => {
                        Err(EasingError::NonFiniteParam { method, value })
                    }
                    Some(_) => Ok(()),
                }
            }
        }
    }

    /// Reshapes `factor` (nominally in `[0, 1]`).
    ///
    /// Total over unvalidated values: a zero step count behaves as linear and a
    /// missing parameter falls back to [`EaseMethod::default_param`].
    pub fn shape(&self, factor: f32) -> f32 {
        match *self {
            Easing::Linear => factor,
            Easing::Step { steps } => {
                if steps == 0 {
                    return factor;
                }
                let steps = steps as f32;
                (factor * steps).floor() / steps
            }
            Easing::Smooth {
                ends,
                method,
                param,
            } => {
                let param = param.unwrap_or_else(|| method.default_param());
                let ease_in = |t: f32| method.ease_in(t, param);
                match ends {
                    EaseEnds::In => ease_in(factor),
                    EaseEnds::Out => 1.0 - ease_in(1.0 - factor),
                    EaseEnds::InOut => {
                        if factor < 0.5 {
                            ease_in(factor * 2.0) / 2.0
                        } else {
                            1.0 - ease_in((1.0 - factor) * 2.0) / 2.0
                        }
                    }
                }
            }
        }
    }
}
