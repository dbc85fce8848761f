//! Channel value types sampled by animation curves.

use nalgebra::Vector3;

/// 3-component channel value (position, Euler rotation in radians, or scale).
pub type Vec3 = Vector3<f32>;

/// A value that can be stored in a keyframe and blended between two keyframes.
pub trait Interpolate: Copy {
    /// Component-wise linear blend; `t` is not clamped.
    fn lerp(&self, other: &Self, t: f32) -> Self;

    /// `false` if any component is NaN or infinite.
    fn is_finite(&self) -> bool;
}

impl Interpolate for f32 {
    #[inline]
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self * (1.0 - t) + other * t
    }

    #[inline]
    fn is_finite(&self) -> bool {
        f32::is_finite(*self)
    }
}

impl Interpolate for Vec3 {
    #[inline]
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Vector3::lerp(self, other, t)
    }

    #[inline]
    fn is_finite(&self) -> bool {
        self.iter().all(|c| c.is_finite())
    }
}
