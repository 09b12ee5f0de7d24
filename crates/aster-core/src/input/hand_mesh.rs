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

//! The hand mesh state shared between the procedural synthesizer and
//! runtime articulated-mesh capabilities.

use crate::asset::AssetHandle;
use crate::math::Mat4;
use crate::renderer::scene::{GpuMesh, Vertex};

/// One hand's renderable mesh: exclusively owned CPU buffers plus a shared
/// GPU mesh handle the buffers are uploaded into.
///
/// The CPU buffers are reused frame to frame; they are only reallocated if
/// the mesh topology changes. Both the procedural fallback generator and a
/// runtime articulated-mesh capability write through this state.
#[derive(Debug)]
pub struct HandMeshState {
    /// Working vertex buffer, owned by this state.
    pub verts: Vec<Vertex>,
    /// Working index buffer, owned by this state.
    pub inds: Vec<u32>,
    /// The GPU mesh the buffers are uploaded into. Shared with the draw
    /// queue through handle clones.
    pub mesh: AssetHandle<GpuMesh>,
    /// The transform the mesh is drawn at.
    pub root_transform: Mat4,
}

impl HandMeshState {
    /// Creates an empty hand mesh with a fresh GPU mesh labelled `label`.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            verts: Vec::new(),
            inds: Vec::new(),
            mesh: AssetHandle::new(GpuMesh::new(label)),
            root_transform: Mat4::IDENTITY,
        }
    }

    /// Pushes the current CPU buffers to the GPU mesh.
    pub fn upload(&self) {
        self.mesh.upload(&self.verts, &self.inds);
    }
}
