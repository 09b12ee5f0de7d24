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

//! Tracking source contracts: per-hand pose and state data as reported by
//! the active runtime, queried once per frame by the visual systems.

use super::button_state::ButtonState;
use crate::math::{Pose, Quaternion, Vec3};

/// Which hand a device or visual belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handed {
    /// The left hand.
    Left,
    /// The right hand.
    Right,
}

impl Handed {
    /// Both hands, in a fixed order. Operations that apply to "both hands"
    /// iterate this array so the single-hand and dual-hand code paths are
    /// identical.
    pub const BOTH: [Handed; 2] = [Handed::Left, Handed::Right];

    /// Returns the per-hand array index.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Handed::Left => 0,
            Handed::Right => 1,
        }
    }

    /// Returns the runtime user path for this hand.
    pub const fn user_path(self) -> &'static str {
        match self {
            Handed::Left => "/user/hand/left",
            Handed::Right => "/user/hand/right",
        }
    }
}

/// Selects which hand(s) a setter applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandSelect {
    /// The left hand only.
    Left,
    /// The right hand only.
    Right,
    /// Both hands, left then right. Not atomic: a failure on one side does
    /// not roll back the other.
    Both,
}

impl HandSelect {
    /// Returns the hands this selection covers, in application order.
    pub fn hands(self) -> &'static [Handed] {
        match self {
            HandSelect::Left => &[Handed::Left],
            HandSelect::Right => &[Handed::Right],
            HandSelect::Both => &Handed::BOTH,
        }
    }
}

impl From<Handed> for HandSelect {
    fn from(hand: Handed) -> Self {
        match hand {
            Handed::Left => HandSelect::Left,
            Handed::Right => HandSelect::Right,
        }
    }
}

/// Where a hand's data is coming from this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandSource {
    /// No data source for this hand.
    None,
    /// Real articulated hand tracking from the runtime.
    Articulated,
    /// A hand simulated from a tracked controller.
    Simulated,
    /// Hand data overridden by the application.
    Overridden,
}

/// Whether the application currently has presentation focus.
///
/// Input visuals are only drawn while `Active`: another surface may be
/// compositing over the app, rendering input affordances of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppFocus {
    /// The app is in the foreground and presenting.
    Active,
    /// The app is running but not presenting.
    Background,
    /// The app is not visible at all.
    Hidden,
}

/// The pose of a single finger joint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointPose {
    /// Joint position.
    pub position: Vec3,
    /// Joint orientation; +Z points along the bone toward the fingertip.
    pub orientation: Quaternion,
    /// Joint capsule radius, used to size synthesized geometry.
    pub radius: f32,
}

impl Default for JointPose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Quaternion::IDENTITY,
            radius: 0.01,
        }
    }
}

/// The number of fingers tracked per hand.
pub const FINGER_COUNT: usize = 5;
/// The number of joints tracked per finger.
pub const JOINT_COUNT: usize = 5;

/// Live tracking data for one hand.
#[derive(Debug, Clone, Copy)]
pub struct HandState {
    /// Joint poses, `fingers[finger][joint]`, thumb first, knuckle to tip.
    pub fingers: [[JointPose; JOINT_COUNT]; FINGER_COUNT],
    /// Whether the hand pose is currently tracked.
    pub tracked_state: ButtonState,
    /// Whether a pinch gesture is currently active.
    pub pinch_state: ButtonState,
}

impl Default for HandState {
    fn default() -> Self {
        Self {
            fingers: [[JointPose::default(); JOINT_COUNT]; FINGER_COUNT],
            tracked_state: ButtonState::INACTIVE,
            pinch_state: ButtonState::INACTIVE,
        }
    }
}

/// Live tracking data for one controller.
#[derive(Debug, Clone, Copy, Default)]
pub struct ControllerState {
    /// The controller's grip pose.
    pub pose: Pose,
    /// Whether the controller pose is currently tracked.
    pub tracked: ButtonState,
}

/// The per-frame source of hand and controller tracking data.
///
/// Implemented by the active runtime bridge; queried once per frame by the
/// visual systems on the main thread.
pub trait TrackingProvider {
    /// Returns the tracking data for a hand.
    fn hand(&self, hand: Handed) -> &HandState;

    /// Returns the tracking data for a controller.
    fn controller(&self, hand: Handed) -> &ControllerState;

    /// Returns where a hand's data comes from this frame.
    fn hand_source(&self, hand: Handed) -> HandSource;

    /// Returns whether a hand's visual representation is enabled.
    fn hand_visible(&self, hand: Handed) -> bool {
        let _ = hand;
        true
    }

    /// Refreshes poses predicted for the upcoming frame's display time.
    fn update_predicted(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_both_covers_left_then_right() {
        assert_eq!(HandSelect::Both.hands(), &[Handed::Left, Handed::Right]);
        assert_eq!(HandSelect::Left.hands(), &[Handed::Left]);
    }

    #[test]
    fn test_user_paths() {
        assert_eq!(Handed::Left.user_path(), "/user/hand/left");
        assert_eq!(Handed::Right.user_path(), "/user/hand/right");
    }
}
