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

//! Defines the error types for platform backend startup and teardown.

use crate::renderer::RenderError;
use std::fmt;

/// An error raised while starting or running the platform backend.
///
/// The first two variants are fatal at initialization: without a display
/// connection or a usable framebuffer configuration there is nothing to
/// present to, so backend startup aborts and the error propagates to the
/// caller.
#[derive(Debug)]
pub enum PlatformError {
    /// The display/windowing server could not be reached.
    DisplayUnavailable {
        /// Details from the protocol layer.
        details: String,
    },
    /// No framebuffer configuration supporting double buffering and a
    /// 16-bit depth buffer was found.
    NoFramebufferConfig,
    /// The top-level window could not be created.
    WindowCreation {
        /// Details from the protocol layer.
        details: String,
    },
    /// The input thread could not be spawned.
    ThreadSpawn(std::io::Error),
    /// The input thread exited before completing its bootstrap handshake.
    BootstrapFailed,
    /// Swapchain setup failed during backend start.
    Graphics(RenderError),
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformError::DisplayUnavailable { details } => {
                write!(f, "Cannot connect to display server: {details}")
            }
            PlatformError::NoFramebufferConfig => {
                write!(f, "No appropriate framebuffer configuration found")
            }
            PlatformError::WindowCreation { details } => {
                write!(f, "Failed to create window: {details}")
            }
            PlatformError::ThreadSpawn(err) => {
                write!(f, "Failed to spawn input thread: {err}")
            }
            PlatformError::BootstrapFailed => {
                write!(f, "Input thread exited during bootstrap")
            }
            PlatformError::Graphics(err) => {
                write!(f, "Graphics setup failed: {err}")
            }
        }
    }
}

impl std::error::Error for PlatformError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PlatformError::ThreadSpawn(err) => Some(err),
            PlatformError::Graphics(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RenderError> for PlatformError {
    fn from(err: RenderError) -> Self {
        match err {
            // A rejected swapchain configuration means no framebuffer
            // config with the requested double buffering and depth size
            // exists for this window.
            RenderError::UnsupportedConfig { .. } => PlatformError::NoFramebufferConfig,
            other => PlatformError::Graphics(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_config_surfaces_as_no_framebuffer_config() {
        let err = PlatformError::from(RenderError::UnsupportedConfig {
            details: "no 16-bit depth".to_string(),
        });
        assert!(matches!(err, PlatformError::NoFramebufferConfig));
    }

    #[test]
    fn test_other_render_errors_stay_graphics_errors() {
        let err = PlatformError::from(RenderError::SwapchainCreation {
            details: "device lost".to_string(),
        });
        assert!(matches!(err, PlatformError::Graphics(_)));
    }
}
