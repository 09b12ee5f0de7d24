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

//! The per-frame queue of draw submissions.

use super::scene::{GpuMesh, Material, Model};
use crate::asset::AssetHandle;
use crate::math::{LinearRgba, Mat4};

/// A single draw submitted for the current frame.
#[derive(Debug, Clone)]
pub enum DrawItem {
    /// A mesh drawn with a material at a transform, tinted by `color`.
    Mesh {
        /// The mesh to draw.
        mesh: AssetHandle<GpuMesh>,
        /// The material to shade it with.
        material: AssetHandle<Material>,
        /// World transform.
        transform: Mat4,
        /// Per-draw tint; components above 1.0 brighten.
        color: LinearRgba,
    },
    /// A model drawn at a transform.
    Model {
        /// The model to draw.
        model: AssetHandle<Model>,
        /// World transform.
        transform: Mat4,
    },
}

/// Collects draw items over a frame; drained by the backend's draw pass
/// and cleared at the end of the platform step.
#[derive(Debug, Default)]
pub struct RenderQueue {
    items: Vec<DrawItem>,
}

impl RenderQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a mesh draw.
    pub fn add_mesh(
        &mut self,
        mesh: AssetHandle<GpuMesh>,
        material: AssetHandle<Material>,
        transform: Mat4,
        color: LinearRgba,
    ) {
        self.items.push(DrawItem::Mesh {
            mesh,
            material,
            transform,
            color,
        });
    }

    /// Queues a model draw.
    pub fn add_model(&mut self, model: AssetHandle<Model>, transform: Mat4) {
        self.items.push(DrawItem::Model { model, transform });
    }

    /// Returns the queued items in submission order.
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    /// Returns the number of queued items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if nothing has been queued this frame.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Drops all queued items. Called once per frame after the draw pass.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_collects_and_clears() {
        let mut queue = RenderQueue::new();
        let model = AssetHandle::new(Model::placeholder("test/model"));
        queue.add_model(model, Mat4::IDENTITY);
        assert_eq!(queue.len(), 1);
        queue.clear();
        assert!(queue.is_empty());
    }
}
