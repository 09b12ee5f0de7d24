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

//! Provides the public, backend-agnostic rendering contracts.
//!
//! This module defines the "common language" for rendering: the scene asset
//! types ([`GpuMesh`], [`Material`], [`Texture`], [`Model`]), the per-frame
//! [`RenderQueue`] of draw items, the [`GraphicsBackend`] trait implemented
//! by a concrete backend in `aster-infra`, and the rendering error types.
//!
//! This module defines the 'what' of rendering; the 'how' is handled by a
//! backend implementation which consumes these types without the systems
//! layer knowing the specifics of the underlying graphics API.

pub mod error;
pub mod queue;
pub mod scene;
pub mod traits;

pub use self::error::RenderError;
pub use self::queue::{DrawItem, RenderQueue};
pub use self::scene::{
    GpuMesh, Material, MeshBuffers, Model, TexAddress, TexFormat, Texture, Transparency, Vertex,
};
pub use self::traits::{DepthFormat, GraphicsBackend, SwapchainDescriptor, SwapchainId};
