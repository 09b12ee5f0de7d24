// Copyright 2025 the Aster authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Defines the `Quaternion` type for representing 3D rotations.

use super::{Vec3, EPSILON};
use std::ops::Mul;

/// A quaternion representing a rotation in 3D space.
///
/// Stored as `(x, y, z, w)` where `w` is the scalar part. Operations assume
/// unit-length quaternions.
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct Quaternion {
    /// The x component of the vector part.
    pub x: f32,
    /// The y component of the vector part.
    pub y: f32,
    /// The z component of the vector part.
    pub z: f32,
    /// The scalar part.
    pub w: f32,
}

impl Quaternion {
    /// The identity rotation.
    pub const IDENTITY: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 1.0,
    };

    /// Creates a new quaternion from raw components.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Creates a rotation of `angle_radians` around `axis`.
    ///
    /// The axis is normalized internally; a degenerate axis yields the
    /// identity rotation.
    pub fn from_axis_angle(axis: Vec3, angle_radians: f32) -> Self {
        let axis = axis.normalize_or_zero();
        if axis == Vec3::ZERO {
            return Self::IDENTITY;
        }
        let (s, c) = (angle_radians * 0.5).sin_cos();
        Self {
            x: axis.x * s,
            y: axis.y * s,
            z: axis.z * s,
            w: c,
        }
    }

    /// Returns the squared magnitude of the quaternion.
    #[inline]
    pub fn magnitude_squared(&self) -> f32 {
        self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w
    }

    /// Returns a normalized copy, or the identity if the magnitude is
    /// too close to zero.
    pub fn normalize(&self) -> Self {
        let mag_sq = self.magnitude_squared();
        if mag_sq < EPSILON {
            return Self::IDENTITY;
        }
        let inv = 1.0 / mag_sq.sqrt();
        Self {
            x: self.x * inv,
            y: self.y * inv,
            z: self.z * inv,
            w: self.w * inv,
        }
    }

    /// Returns the conjugate (inverse for unit quaternions).
    #[inline]
    pub fn conjugate(&self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
            w: self.w,
        }
    }

    /// Rotates a vector by this quaternion.
    pub fn rotate_vec3(&self, v: Vec3) -> Vec3 {
        // v' = v + 2 * u x (u x v + w * v), with u the vector part.
        let u = Vec3::new(self.x, self.y, self.z);
        let uv = u.cross(v);
        v + (u.cross(uv) + uv * self.w) * 2.0
    }
}

impl Mul for Quaternion {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self {
            x: self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            y: self.w * rhs.y - self.x * rhs.z + self.y * rhs.w + self.z * rhs.x,
            z: self.w * rhs.z + self.x * rhs.y - self.y * rhs.x + self.z * rhs.w,
            w: self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::FRAC_PI_2;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_rotate_vec3_quarter_turn() {
        let q = Quaternion::from_axis_angle(Vec3::Y, FRAC_PI_2);
        // A quarter turn around +Y sends +X to -Z (right-handed).
        assert_abs_diff_eq!(q.rotate_vec3(Vec3::X), Vec3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_conjugate_undoes_rotation() {
        let q = Quaternion::from_axis_angle(Vec3::new(1.0, 2.0, 0.5), 1.2);
        let v = Vec3::new(0.3, -4.0, 2.0);
        assert_abs_diff_eq!(q.conjugate().rotate_vec3(q.rotate_vec3(v)), v);
    }

    #[test]
    fn test_degenerate_axis_is_identity() {
        assert_eq!(
            Quaternion::from_axis_angle(Vec3::ZERO, 1.0),
            Quaternion::IDENTITY
        );
    }
}
