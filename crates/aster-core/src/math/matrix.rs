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

//! Defines the `Mat4` type and associated operations.

use super::{Quaternion, Vec3, Vec4, EPSILON};
use std::ops::Mul;

/// A 4x4 column-major matrix, used for 3D affine transformations and
/// projections.
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct Mat4 {
    /// The columns of the matrix. `cols[0]` is the first column, and so on.
    pub cols: [Vec4; 4],
}

impl Mat4 {
    /// The 4x4 identity matrix.
    pub const IDENTITY: Self = Self {
        cols: [
            Vec4::new(1.0, 0.0, 0.0, 0.0),
            Vec4::new(0.0, 1.0, 0.0, 0.0),
            Vec4::new(0.0, 0.0, 1.0, 0.0),
            Vec4::new(0.0, 0.0, 0.0, 1.0),
        ],
    };

    /// Creates a new matrix from four column vectors.
    #[inline]
    pub const fn from_cols(c0: Vec4, c1: Vec4, c2: Vec4, c3: Vec4) -> Self {
        Self {
            cols: [c0, c1, c2, c3],
        }
    }

    /// Returns a row of the matrix as a `Vec4`.
    #[inline]
    pub fn get_row(&self, index: usize) -> Vec4 {
        let access = |c: &Vec4| match index {
            0 => c.x,
            1 => c.y,
            2 => c.z,
            _ => c.w,
        };
        Vec4::new(
            access(&self.cols[0]),
            access(&self.cols[1]),
            access(&self.cols[2]),
            access(&self.cols[3]),
        )
    }

    /// Creates a translation matrix.
    #[inline]
    pub fn from_translation(v: Vec3) -> Self {
        let mut m = Self::IDENTITY;
        m.cols[3] = Vec4::new(v.x, v.y, v.z, 1.0);
        m
    }

    /// Creates a matrix for a right-handed rotation around the Y-axis.
    #[inline]
    pub fn from_rotation_y(angle_radians: f32) -> Self {
        let (s, c) = angle_radians.sin_cos();
        Self::from_cols(
            Vec4::new(c, 0.0, -s, 0.0),
            Vec4::new(0.0, 1.0, 0.0, 0.0),
            Vec4::new(s, 0.0, c, 0.0),
            Vec4::new(0.0, 0.0, 0.0, 1.0),
        )
    }

    /// Creates a rotation matrix from a unit quaternion.
    pub fn from_quat(q: Quaternion) -> Self {
        let (x, y, z, w) = (q.x, q.y, q.z, q.w);
        let (x2, y2, z2) = (x + x, y + y, z + z);
        let (xx, yy, zz) = (x * x2, y * y2, z * z2);
        let (xy, xz, yz) = (x * y2, x * z2, y * z2);
        let (wx, wy, wz) = (w * x2, w * y2, w * z2);
        Self::from_cols(
            Vec4::new(1.0 - (yy + zz), xy + wz, xz - wy, 0.0),
            Vec4::new(xy - wz, 1.0 - (xx + zz), yz + wx, 0.0),
            Vec4::new(xz + wy, yz - wx, 1.0 - (xx + yy), 0.0),
            Vec4::new(0.0, 0.0, 0.0, 1.0),
        )
    }

    /// Creates a transform from a translation, rotation, and scale, applied
    /// in scale-rotate-translate order.
    pub fn from_trs(translation: Vec3, rotation: Quaternion, scale: Vec3) -> Self {
        let mut m = Self::from_quat(rotation);
        m.cols[0] = m.cols[0] * scale.x;
        m.cols[1] = m.cols[1] * scale.y;
        m.cols[2] = m.cols[2] * scale.z;
        m.cols[3] = Vec4::new(translation.x, translation.y, translation.z, 1.0);
        m
    }

    /// Creates a right-handed perspective projection with a 0..1 depth range.
    ///
    /// # Arguments
    ///
    /// * `fov_y_radians`: The vertical field of view.
    /// * `aspect`: The width / height aspect ratio.
    /// * `near` / `far`: The clip plane distances; both must be positive.
    pub fn perspective_rh_zo(fov_y_radians: f32, aspect: f32, near: f32, far: f32) -> Self {
        let f = 1.0 / (fov_y_radians * 0.5).tan();
        let range = far / (near - far);
        Self::from_cols(
            Vec4::new(f / aspect, 0.0, 0.0, 0.0),
            Vec4::new(0.0, f, 0.0, 0.0),
            Vec4::new(0.0, 0.0, range, -1.0),
            Vec4::new(0.0, 0.0, range * near, 0.0),
        )
    }

    /// Returns the transpose of the matrix.
    pub fn transpose(&self) -> Self {
        Self::from_cols(
            self.get_row(0),
            self.get_row(1),
            self.get_row(2),
            self.get_row(3),
        )
    }

    /// Computes the inverse of an affine transform (rotation/scale +
    /// translation, bottom row `0 0 0 1`).
    ///
    /// Returns `None` if the upper 3x3 part is not invertible.
    pub fn affine_inverse(&self) -> Option<Self> {
        // Invert the upper 3x3 via the adjugate.
        let a = self.cols[0].truncate();
        let b = self.cols[1].truncate();
        let c = self.cols[2].truncate();
        let t = self.cols[3].truncate();

        let r0 = b.cross(c);
        let r1 = c.cross(a);
        let r2 = a.cross(b);
        let det = a.dot(r0);
        if det.abs() < EPSILON {
            return None;
        }
        let inv_det = 1.0 / det;
        // Rows of the inverse 3x3.
        let r0 = r0 * inv_det;
        let r1 = r1 * inv_det;
        let r2 = r2 * inv_det;
        let neg_t = Vec3::new(
            -(r0.x * t.x + r0.y * t.y + r0.z * t.z),
            -(r1.x * t.x + r1.y * t.y + r1.z * t.z),
            -(r2.x * t.x + r2.y * t.y + r2.z * t.z),
        );
        Some(Self::from_cols(
            Vec4::new(r0.x, r1.x, r2.x, 0.0),
            Vec4::new(r0.y, r1.y, r2.y, 0.0),
            Vec4::new(r0.z, r1.z, r2.z, 0.0),
            Vec4::new(neg_t.x, neg_t.y, neg_t.z, 1.0),
        ))
    }

    /// Transforms a point, including the translation part.
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        let v = Vec4::new(p.x, p.y, p.z, 1.0);
        Vec3::new(
            self.get_row(0).dot(v),
            self.get_row(1).dot(v),
            self.get_row(2).dot(v),
        )
    }
}

impl Mul for Mat4 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let mul_col = |c: Vec4| {
            self.cols[0] * c.x + self.cols[1] * c.y + self.cols[2] * c.z + self.cols[3] * c.w
        };
        Self::from_cols(
            mul_col(rhs.cols[0]),
            mul_col(rhs.cols[1]),
            mul_col(rhs.cols[2]),
            mul_col(rhs.cols[3]),
        )
    }
}

impl approx::AbsDiffEq for Mat4 {
    type Epsilon = f32;

    fn default_epsilon() -> f32 {
        EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.cols
            .iter()
            .zip(other.cols.iter())
            .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{FRAC_PI_2, PI};
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_rotation_y_half_turn() {
        let m = Mat4::from_rotation_y(PI);
        assert_abs_diff_eq!(m.transform_point(Vec3::X), Vec3::new(-1.0, 0.0, 0.0));
        assert_abs_diff_eq!(m.transform_point(Vec3::Z), Vec3::new(0.0, 0.0, -1.0));
        assert_abs_diff_eq!(m.transform_point(Vec3::Y), Vec3::Y);
    }

    #[test]
    fn test_trs_applies_in_order() {
        let rot = Quaternion::from_axis_angle(Vec3::Y, FRAC_PI_2);
        let m = Mat4::from_trs(Vec3::new(10.0, 0.0, 0.0), rot, Vec3::ONE * 2.0);
        // +X scaled to length 2, rotated to -Z, then translated.
        assert_abs_diff_eq!(m.transform_point(Vec3::X), Vec3::new(10.0, 0.0, -2.0));
    }

    #[test]
    fn test_affine_inverse_round_trip() {
        let rot = Quaternion::from_axis_angle(Vec3::new(0.2, 1.0, -0.4), 0.7);
        let m = Mat4::from_trs(Vec3::new(1.0, -2.0, 3.0), rot, Vec3::ONE);
        let inv = m.affine_inverse().unwrap();
        assert_abs_diff_eq!(m * inv, Mat4::IDENTITY);
    }

    #[test]
    fn test_from_quat_matches_quaternion_rotation() {
        let q = Quaternion::from_axis_angle(Vec3::new(1.0, 0.3, 0.2), 1.1);
        let m = Mat4::from_quat(q);
        let v = Vec3::new(0.5, -1.0, 2.0);
        assert_abs_diff_eq!(m.transform_point(v), q.rotate_vec3(v));
    }
}
