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

//! Per-frame render globals: camera, projection, and clear color.

use aster_core::math::{LinearRgba, Mat4, DEG_TO_RAD};

/// The global render parameters a frame is drawn with.
///
/// Owned by the platform backend and updated when the swapchain resizes or
/// the application moves the camera.
pub struct RenderGlobals {
    /// The color the swapchain is cleared to each frame.
    pub clear_color: LinearRgba,
    camera_root: Mat4,
    projection: Mat4,
    fov_degrees: f32,
    near: f32,
    far: f32,
}

impl Default for RenderGlobals {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderGlobals {
    /// Creates the default globals: black clear, identity camera, and a
    /// 90 degree vertical field of view at a square aspect.
    pub fn new() -> Self {
        let mut globals = Self {
            clear_color: LinearRgba::BLACK,
            camera_root: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
            fov_degrees: 90.0,
            near: 0.02,
            far: 50.0,
        };
        globals.update_projection(1, 1);
        globals
    }

    /// Rebuilds the projection matrix for a new swapchain size.
    pub fn update_projection(&mut self, width: u32, height: u32) {
        let aspect = width.max(1) as f32 / height.max(1) as f32;
        self.projection = Mat4::perspective_rh_zo(
            self.fov_degrees * DEG_TO_RAD,
            aspect,
            self.near,
            self.far,
        );
    }

    /// Returns the current projection matrix.
    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    /// Moves the camera. `root` is the camera's world transform.
    pub fn set_camera_root(&mut self, root: Mat4) {
        self.camera_root = root;
    }

    /// Returns the camera's world transform.
    pub fn camera_root(&self) -> Mat4 {
        self.camera_root
    }

    /// Returns the view matrix, the inverse of the camera's world transform.
    /// Falls back to identity if the camera transform is degenerate.
    pub fn view_matrix(&self) -> Mat4 {
        self.camera_root.affine_inverse().unwrap_or(Mat4::IDENTITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aster_core::math::Vec3;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_view_is_camera_inverse() {
        let mut globals = RenderGlobals::new();
        globals.set_camera_root(Mat4::from_translation(Vec3::new(0.0, 1.6, 2.0)));
        let back = globals.view_matrix().transform_point(Vec3::new(0.0, 1.6, 2.0));
        assert_abs_diff_eq!(back, Vec3::ZERO, epsilon = 1e-5);
    }

    #[test]
    fn test_projection_tracks_aspect() {
        let mut globals = RenderGlobals::new();
        globals.update_projection(200, 100);
        let wide = globals.projection();
        globals.update_projection(100, 100);
        let square = globals.projection();
        assert!(wide.cols[0].x < square.cols[0].x);
    }
}
