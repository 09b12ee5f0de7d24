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

//! Defines the `Pose` type, a rigid position + orientation pair.

use super::{Mat4, Quaternion, Vec3};

/// A rigid transform: a position and an orientation, without scale.
///
/// This is the unit of tracking data: device and joint poses are reported
/// in this form and converted to matrices at render time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    /// The position of the pose.
    pub position: Vec3,
    /// The orientation of the pose.
    pub orientation: Quaternion,
}

impl Pose {
    /// The identity pose at the origin.
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        orientation: Quaternion::IDENTITY,
    };

    /// Creates a new pose.
    #[inline]
    pub const fn new(position: Vec3, orientation: Quaternion) -> Self {
        Self {
            position,
            orientation,
        }
    }

    /// Converts the pose to an unscaled transform matrix.
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_trs(self.position, self.orientation, Vec3::ONE)
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_to_matrix_translates() {
        let pose = Pose::new(Vec3::new(1.0, 2.0, 3.0), Quaternion::IDENTITY);
        assert_abs_diff_eq!(
            pose.to_matrix().transform_point(Vec3::ZERO),
            Vec3::new(1.0, 2.0, 3.0)
        );
    }
}
