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

//! Provides foundational mathematics primitives for 3D.
//!
//! This module contains the linear algebra types used throughout the SDK:
//! vectors, quaternions, column-major 4x4 matrices, colors, and rigid poses.
//!
//! All angular functions in this module operate in **radians** unless
//! explicitly specified otherwise.

/// A small constant for floating-point comparisons.
pub const EPSILON: f32 = 1e-5;

pub use std::f32::consts::{FRAC_PI_2, PI, TAU};

/// The factor to convert degrees to radians (PI / 180.0).
pub const DEG_TO_RAD: f32 = PI / 180.0;
/// The factor to convert radians to degrees (180.0 / PI).
pub const RAD_TO_DEG: f32 = 180.0 / PI;

pub mod color;
pub mod matrix;
pub mod pose;
pub mod quaternion;
pub mod vector;

pub use self::color::{Color32, LinearRgba};
pub use self::matrix::Mat4;
pub use self::pose::Pose;
pub use self::quaternion::Quaternion;
pub use self::vector::{Vec2, Vec3, Vec4};
