//! Per-bone curves and their local transform.

use nalgebra::{Isometry3, Translation3, UnitQuaternion, Vector3};

use crate::curve::AnimationCurve;
use crate::value::Vec3;

/// Rigid part of a bone transform: translate after rotate.
pub type Affine = Isometry3<f32>;

/// Rotation from Euler angles in radians, intrinsic X then Y then Z.
#[inline]
pub fn euler_xyz(angles: Vec3) -> UnitQuaternion<f32> {
    UnitQuaternion::from_axis_angle(&Vector3::x_axis(), angles.x)
        * UnitQuaternion::from_axis_angle(&Vector3::y_axis(), angles.y)
        * UnitQuaternion::from_axis_angle(&Vector3::z_axis(), angles.z)
}

/// A bone transform with scale kept apart from the rigid part, so that scale
/// composes multiplicatively down the hierarchy and is never rotated.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoneTransform {
    pub transform: Affine,
    pub scale: Vec3,
}

impl Default for BoneTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl BoneTransform {
    #[inline]
    pub fn new(transform: Affine, scale: Vec3) -> Self {
        Self { transform, scale }
    }

    /// Zero translation, identity rotation, unit scale.
    #[inline]
    pub fn identity() -> Self {
        Self {
            transform: Affine::identity(),
            scale: Vec3::repeat(1.0),
        }
    }

    /// Composes a child's local transform under `self`.
    #[inline]
    pub fn then(&self, local: &BoneTransform) -> BoneTransform {
        BoneTransform {
            transform: self.transform * local.transform,
            scale: self.scale.component_mul(&local.scale),
        }
    }
}

/// Animated channels of one bone around a fixed pivot.
#[derive(Clone, Debug, PartialEq)]
pub struct BonePose {
    pivot: Vec3,
    position: AnimationCurve<Vec3>,
    /// Euler angles in radians.
    rotation: AnimationCurve<Vec3>,
    scale: AnimationCurve<Vec3>,
}

impl BonePose {
    pub fn new(
        pivot: Vec3,
        position: AnimationCurve<Vec3>,
        rotation: AnimationCurve<Vec3>,
        scale: AnimationCurve<Vec3>,
    ) -> Self {
        Self {
            pivot,
            position,
            rotation,
            scale,
        }
    }

    /// Pose with no authored data: evaluates to [`BoneTransform::identity`].
    pub fn empty(pivot: Vec3) -> Self {
        Self::new(
            pivot,
            AnimationCurve::constant(Vec3::zeros()),
            AnimationCurve::constant(Vec3::zeros()),
            AnimationCurve::constant(Vec3::repeat(1.0)),
        )
    }

    #[inline]
    pub fn pivot(&self) -> Vec3 {
        self.pivot
    }

    #[inline]
    pub fn position(&self) -> &AnimationCurve<Vec3> {
        &self.position
    }

    #[inline]
    pub fn rotation(&self) -> &AnimationCurve<Vec3> {
        &self.rotation
    }

    #[inline]
    pub fn scale(&self) -> &AnimationCurve<Vec3> {
        &self.scale
    }

    /// Local transform at `time`. The bone rotates about its pivot:
    /// `translation = position - rotation * pivot + pivot`.
    pub fn transform(&self, time: f32) -> BoneTransform {
        let position = self.position.evaluate(time);
        let rotation = euler_xyz(self.rotation.evaluate(time));
        let scale = self.scale.evaluate(time);

        let translation = position - rotation * self.pivot + self.pivot;
        BoneTransform {
            transform: Affine::from_parts(Translation3::from(translation), rotation),
            scale,
        }
    }
}
