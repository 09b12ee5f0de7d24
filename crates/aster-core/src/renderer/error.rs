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

//! Defines the error types for the rendering subsystem.

use super::traits::SwapchainId;
use std::fmt;

/// An error produced by a graphics backend operation.
#[derive(Debug)]
pub enum RenderError {
    /// The backend failed to create a swapchain for the given surface.
    SwapchainCreation {
        /// Detailed error messages from the backend.
        details: String,
    },
    /// An operation referenced a swapchain the backend does not know about.
    InvalidSwapchain {
        /// The offending id.
        id: SwapchainId,
    },
    /// The surface handle required for swapchain setup was unavailable.
    SurfaceUnavailable {
        /// Detailed error messages from the windowing layer.
        details: String,
    },
    /// The backend cannot satisfy the requested swapchain configuration,
    /// such as its color format or depth buffer size.
    UnsupportedConfig {
        /// Detailed error messages from the backend.
        details: String,
    },
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::SwapchainCreation { details } => {
                write!(f, "Failed to create swapchain: {details}")
            }
            RenderError::InvalidSwapchain { id } => {
                write!(f, "Invalid swapchain id: {id:?}")
            }
            RenderError::SurfaceUnavailable { details } => {
                write!(f, "Window surface unavailable: {details}")
            }
            RenderError::UnsupportedConfig { details } => {
                write!(f, "Unsupported swapchain configuration: {details}")
            }
        }
    }
}

impl std::error::Error for RenderError {}
