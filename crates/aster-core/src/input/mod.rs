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

//! Input contracts: engine key codes, button state flags, handedness, the
//! tracking provider interface, and the hand mesh state shared between the
//! synthesizer and runtime mesh capabilities.

pub mod button_state;
pub mod hand_mesh;
pub mod keys;
pub mod tracking;

pub use button_state::ButtonState;
pub use hand_mesh::HandMeshState;
pub use keys::Key;
pub use tracking::{
    AppFocus, ControllerState, HandSelect, HandSource, HandState, Handed, JointPose,
    TrackingProvider,
};
