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

//! Defines the GPU-backed scene asset types.
//!
//! The internals of how a backend turns these into device resources are out
//! of scope here; the types carry the data a backend needs and the identity
//! the asset cache needs.

use crate::asset::{Asset, AssetError, AssetHandle};
use crate::math::{Color32, Mat4, Vec2, Vec3};
use std::sync::RwLock;

/// A single vertex of hand or controller geometry.
#[derive(Debug, Clone, Copy, PartialEq, Default, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct Vertex {
    /// Object-space position.
    pub pos: Vec3,
    /// Object-space normal.
    pub norm: Vec3,
    /// Texture coordinate.
    pub uv: Vec2,
    /// Per-vertex color.
    pub col: Color32,
}

/// The CPU-side copy of a mesh's uploaded geometry.
#[derive(Debug, Default)]
pub struct MeshBuffers {
    /// Interleaved vertex data.
    pub verts: Vec<Vertex>,
    /// Triangle-list indices.
    pub inds: Vec<u32>,
}

/// A GPU mesh resource with shared ownership.
///
/// The mesh handle is shared between the state that regenerates its
/// geometry and the draw queue; `upload` replaces the geometry in place so
/// queued draws always see the most recent frame's data.
#[derive(Debug)]
pub struct GpuMesh {
    label: String,
    buffers: RwLock<MeshBuffers>,
}

impl Asset for GpuMesh {}

impl GpuMesh {
    /// Creates an empty mesh with a debug/cache label.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            buffers: RwLock::new(MeshBuffers::default()),
        }
    }

    /// Returns the mesh's label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Replaces the mesh geometry with the given vertex and index data.
    pub fn upload(&self, verts: &[Vertex], inds: &[u32]) {
        let mut buffers = self.buffers.write().unwrap_or_else(|p| p.into_inner());
        buffers.verts.clear();
        buffers.verts.extend_from_slice(verts);
        buffers.inds.clear();
        buffers.inds.extend_from_slice(inds);
    }

    /// Returns the current (vertex, index) counts.
    pub fn counts(&self) -> (usize, usize) {
        let buffers = self.buffers.read().unwrap_or_else(|p| p.into_inner());
        (buffers.verts.len(), buffers.inds.len())
    }

    /// Runs `f` against the current geometry without copying it.
    pub fn with_data<R>(&self, f: impl FnOnce(&[Vertex], &[u32]) -> R) -> R {
        let buffers = self.buffers.read().unwrap_or_else(|p| p.into_inner());
        f(&buffers.verts, &buffers.inds)
    }
}

/// How a texture behaves when sampled outside `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TexAddress {
    /// Clamp to the edge texel.
    Clamp,
    /// Repeat the texture.
    Wrap,
}

/// The pixel format of a texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TexFormat {
    /// 8-bit RGBA, linear color space.
    Rgba32Linear,
}

/// An immutable image asset.
#[derive(Debug)]
pub struct Texture {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major pixel data, `width * height` entries.
    pub pixels: Vec<Color32>,
    /// Sampling address mode.
    pub address: TexAddress,
    /// Pixel format.
    pub format: TexFormat,
}

impl Asset for Texture {}

/// How a material blends with what is already rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transparency {
    /// Opaque, no blending.
    None,
    /// Standard alpha blending.
    Blend,
}

/// A material describing how a mesh surface is shaded.
#[derive(Debug)]
pub struct Material {
    /// Cache/debug identifier.
    pub id: String,
    /// Blend mode.
    pub transparency: Transparency,
    /// Offset applied to the material's position in the render queue;
    /// higher values draw later.
    pub queue_offset: i32,
    /// The diffuse texture, if any.
    pub diffuse: Option<AssetHandle<Texture>>,
}

impl Asset for Material {}

impl Material {
    /// Creates an opaque, untextured material.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            transparency: Transparency::None,
            queue_offset: 0,
            diffuse: None,
        }
    }
}

/// The source data backing a model asset.
#[derive(Debug)]
enum ModelData {
    /// A bundled placeholder with no geometry payload.
    Placeholder,
    /// An opaque glTF-binary blob, passed through to the backend's model
    /// construction as-is.
    Binary(Vec<u8>),
}

/// A renderable model asset.
///
/// Models arrive either as bundled defaults or as glTF-binary blobs
/// reported by an XR runtime. The blob itself is opaque to this layer.
#[derive(Debug)]
pub struct Model {
    id: Option<String>,
    root_transform: Mat4,
    data: ModelData,
}

impl Asset for Model {}

impl Model {
    /// Magic bytes at the start of a glTF-binary blob.
    const GLB_MAGIC: &'static [u8; 4] = b"glTF";

    /// Creates a placeholder model carrying only an identity root transform.
    pub fn placeholder(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            root_transform: Mat4::IDENTITY,
            data: ModelData::Placeholder,
        }
    }

    /// Creates a model from a glTF-binary blob.
    ///
    /// The blob contents are not parsed here beyond a magic-number check;
    /// construction internals belong to the graphics backend.
    pub fn from_binary(label: &str, bytes: Vec<u8>) -> Result<Self, AssetError> {
        if bytes.len() < 4 || &bytes[..4] != Self::GLB_MAGIC {
            return Err(AssetError::InvalidData {
                label: label.to_string(),
                reason: "missing glTF-binary magic".to_string(),
            });
        }
        Ok(Self {
            id: None,
            root_transform: Mat4::IDENTITY,
            data: ModelData::Binary(bytes),
        })
    }

    /// Returns the model's cache id, if one was assigned.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Assigns the model's cache id.
    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = Some(id.into());
    }

    /// Returns the transform of the model's root node.
    pub fn root_transform(&self) -> Mat4 {
        self.root_transform
    }

    /// Replaces the transform of the model's root node.
    pub fn set_root_transform(&mut self, transform: Mat4) {
        self.root_transform = transform;
    }

    /// Returns the binary payload, if this model was loaded from one.
    pub fn binary_data(&self) -> Option<&[u8]> {
        match &self.data {
            ModelData::Binary(bytes) => Some(bytes),
            ModelData::Placeholder => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mesh_upload_replaces_geometry() {
        let mesh = GpuMesh::new("test/mesh");
        mesh.upload(&[Vertex::default(); 3], &[0, 1, 2]);
        assert_eq!(mesh.counts(), (3, 3));
        mesh.upload(&[Vertex::default(); 4], &[0, 1, 2, 2, 1, 3]);
        assert_eq!(mesh.counts(), (4, 6));
    }

    #[test]
    fn test_model_from_binary_checks_magic() {
        assert!(Model::from_binary("bad", vec![1, 2, 3, 4]).is_err());
        let mut bytes = b"glTF".to_vec();
        bytes.extend_from_slice(&[0u8; 16]);
        let model = Model::from_binary("good", bytes).unwrap();
        assert_eq!(model.root_transform(), Mat4::IDENTITY);
        assert!(model.binary_data().is_some());
    }
}
