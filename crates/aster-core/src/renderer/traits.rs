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

//! Defines the `GraphicsBackend` trait, the seam between the platform/
//! systems layers and a concrete graphics implementation.

use super::error::RenderError;
use super::queue::RenderQueue;
use super::scene::TexFormat;
use crate::math::{LinearRgba, Mat4};
use crate::platform::window::SurfaceHandle;

/// An opaque identifier for a backend-owned swapchain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SwapchainId(pub u64);

/// The depth buffer format requested for a swapchain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepthFormat {
    /// 16-bit unsigned normalized depth.
    Depth16,
    /// 32-bit floating point depth.
    Depth32Float,
}

/// Parameters for swapchain creation.
#[derive(Debug, Clone)]
pub struct SwapchainDescriptor {
    /// Backbuffer width in pixels.
    pub width: u32,
    /// Backbuffer height in pixels.
    pub height: u32,
    /// Color buffer format.
    pub color_format: TexFormat,
    /// Depth buffer format.
    pub depth_format: DepthFormat,
}

/// The contract a concrete graphics implementation fulfills.
///
/// All methods are driven from the main thread as part of the frame loop.
/// Swapchain creation, resizing, presentation and the draw pass internals
/// are entirely the backend's concern.
pub trait GraphicsBackend {
    /// Creates a double-buffered swapchain for the given window surface.
    fn create_swapchain(
        &mut self,
        surface: SurfaceHandle,
        desc: &SwapchainDescriptor,
    ) -> Result<SwapchainId, RenderError>;

    /// Resizes an existing swapchain's backbuffers.
    fn resize_swapchain(
        &mut self,
        id: SwapchainId,
        width: u32,
        height: u32,
    ) -> Result<(), RenderError>;

    /// Destroys a swapchain and its backbuffers.
    fn destroy_swapchain(&mut self, id: SwapchainId);

    /// Binds a swapchain's current backbuffer as the render target and
    /// clears it to `clear`.
    fn bind_swapchain(&mut self, id: SwapchainId, clear: LinearRgba);

    /// Presents a swapchain's current backbuffer.
    fn present(&mut self, id: SwapchainId);

    /// Begins a new frame of command recording.
    fn begin_frame(&mut self);

    /// Draws every item in `queue` with the given view/projection pair.
    fn draw_pass(&mut self, view: &Mat4, proj: &Mat4, queue: &RenderQueue);
}
