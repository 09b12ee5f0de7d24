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

//! Window surface types handed to graphics backends.

use raw_window_handle::{HasDisplayHandle, HasWindowHandle};
use std::sync::Arc;

/// Combines the windowing handle traits required by graphics backends into
/// a single trait, so it can be used as a trait object.
pub trait WindowSurface: HasWindowHandle + HasDisplayHandle {}

// Blanket implementation for any type that already provides both handles.
impl<T: HasWindowHandle + HasDisplayHandle> WindowSurface for T {}

/// A thread-safe, shared handle to a window surface.
pub type SurfaceHandle = Arc<dyn WindowSurface + Send + Sync>;

/// Parameters for creating the backend's top-level window.
#[derive(Debug, Clone)]
pub struct WindowConfig {
    /// The window title.
    pub title: String,
    /// Initial inner width in pixels.
    pub width: u32,
    /// Initial inner height in pixels.
    pub height: u32,
    /// Minimum inner width enforced through a size hint.
    pub min_width: u32,
    /// Minimum inner height enforced through a size hint.
    pub min_height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Aster".to_string(),
            width: 1280,
            height: 720,
            min_width: 100,
            min_height: 100,
        }
    }
}
