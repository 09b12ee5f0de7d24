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

//! XR runtime capability contracts.
//!
//! A runtime may expose optional capabilities beyond core tracking: a
//! controller-model capability that serves glTF-binary visuals for the
//! user's physical controllers, and an articulated-mesh capability that
//! supplies real hand-tracking geometry. Both are optional; the visual
//! systems degrade to bundled defaults and procedural meshes without them.

use crate::input::{HandMeshState, Handed};
use std::fmt;

/// An opaque runtime-issued identifier for a controller's visual model.
///
/// Its decimal string form doubles as the model's asset cache id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModelKey(pub u64);

impl fmt::Display for ModelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An error reported by an XR capability call.
#[derive(Debug)]
pub enum XrCapabilityError {
    /// The capability is not available this session.
    Unavailable,
    /// The runtime rejected or failed the call.
    RuntimeFailure {
        /// The runtime's failure description.
        details: String,
    },
}

impl fmt::Display for XrCapabilityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            XrCapabilityError::Unavailable => write!(f, "XR capability unavailable"),
            XrCapabilityError::RuntimeFailure { details } => {
                write!(f, "XR runtime failure: {details}")
            }
        }
    }
}

impl std::error::Error for XrCapabilityError {}

/// The controller-model capability: serves the visual model of the user's
/// physical controller as an opaque glTF-binary blob keyed by [`ModelKey`].
pub trait ControllerModelProvider {
    /// Queries the current model key for a hand's user path, if the
    /// runtime has a model for it.
    fn model_key(&self, hand_path: &str) -> Option<ModelKey>;

    /// Queries the size in bytes of the model's binary blob.
    fn buffer_size(&self, key: ModelKey) -> Result<usize, XrCapabilityError>;

    /// Fills `buf` with the model's binary blob, returning the number of
    /// bytes written.
    fn fill_buffer(&self, key: ModelKey, buf: &mut [u8]) -> Result<usize, XrCapabilityError>;
}

/// The articulated-mesh capability: writes real hand-tracking geometry
/// into a [`HandMeshState`] in place of the procedural fallback.
pub trait ArticulatedMeshProvider {
    /// Updates `mesh` with the runtime's current hand geometry.
    fn update_system_mesh(&self, hand: Handed, mesh: &mut HandMeshState);
}

/// The set of optional runtime capabilities active for this session.
#[derive(Default)]
pub struct XrExtensions {
    /// The controller-model capability, if active.
    pub controller_model: Option<Box<dyn ControllerModelProvider>>,
    /// The articulated-mesh capability, if active.
    pub articulated_mesh: Option<Box<dyn ArticulatedMeshProvider>>,
}

impl XrExtensions {
    /// A session with no optional capabilities.
    pub fn none() -> Self {
        Self::default()
    }
}
