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

//! A graphics backend that records its calls instead of touching a GPU.
//!
//! Used by the backend tests and as a stand-in wherever frame
//! orchestration is exercised without a device.

use aster_core::math::{LinearRgba, Mat4};
use aster_core::platform::SurfaceHandle;
use aster_core::renderer::{
    GraphicsBackend, RenderError, RenderQueue, SwapchainDescriptor, SwapchainId,
};

/// One recorded backend call.
#[derive(Debug, Clone, PartialEq)]
pub enum GfxOp {
    /// A swapchain was created at a size.
    CreateSwapchain(SwapchainId, u32, u32),
    /// A swapchain was resized.
    ResizeSwapchain(SwapchainId, u32, u32),
    /// A swapchain was destroyed.
    DestroySwapchain(SwapchainId),
    /// A swapchain was bound and cleared.
    BindSwapchain(SwapchainId, LinearRgba),
    /// A swapchain was presented.
    Present(SwapchainId),
    /// A frame began.
    BeginFrame,
    /// A draw pass ran over this many queue items.
    DrawPass(usize),
}

/// Records every backend call in order.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    ops: Vec<GfxOp>,
    next_id: u64,
    reject_configs: bool,
}

impl RecordingBackend {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent swapchain creation fail as an unsupported
    /// configuration, like a device with no matching framebuffer config.
    pub fn reject_swapchain_configs(&mut self) {
        self.reject_configs = true;
    }

    /// The recorded calls, in order.
    pub fn ops(&self) -> &[GfxOp] {
        &self.ops
    }

    /// Counts recorded resize calls.
    pub fn resize_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, GfxOp::ResizeSwapchain(..)))
            .count()
    }
}

impl GraphicsBackend for RecordingBackend {
    fn create_swapchain(
        &mut self,
        _surface: SurfaceHandle,
        desc: &SwapchainDescriptor,
    ) -> Result<SwapchainId, RenderError> {
        if self.reject_configs {
            return Err(RenderError::UnsupportedConfig {
                details: "rejected by recorder".to_string(),
            });
        }
        let id = SwapchainId(self.next_id);
        self.next_id += 1;
        self.ops
            .push(GfxOp::CreateSwapchain(id, desc.width, desc.height));
        Ok(id)
    }

    fn resize_swapchain(
        &mut self,
        id: SwapchainId,
        width: u32,
        height: u32,
    ) -> Result<(), RenderError> {
        self.ops.push(GfxOp::ResizeSwapchain(id, width, height));
        Ok(())
    }

    fn destroy_swapchain(&mut self, id: SwapchainId) {
        self.ops.push(GfxOp::DestroySwapchain(id));
    }

    fn bind_swapchain(&mut self, id: SwapchainId, clear: LinearRgba) {
        self.ops.push(GfxOp::BindSwapchain(id, clear));
    }

    fn present(&mut self, id: SwapchainId) {
        self.ops.push(GfxOp::Present(id));
    }

    fn begin_frame(&mut self) {
        self.ops.push(GfxOp::BeginFrame);
    }

    fn draw_pass(&mut self, _view: &Mat4, _proj: &Mat4, queue: &RenderQueue) {
        self.ops.push(GfxOp::DrawPass(queue.len()));
    }
}
