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

//! # Aster Systems
//!
//! Engine systems built on the `aster-core` contracts: management of hand
//! and controller visual representations (model resolution and caching,
//! procedural hand mesh synthesis, per-frame render submission) and the
//! per-frame render globals (camera, projection, clear color).

#![warn(missing_docs)]

pub mod defaults;
pub mod gradient;
pub mod hand_mesh;
pub mod input_visuals;
pub mod render_globals;

pub use defaults::InputDefaults;
pub use input_visuals::{InputRenderMode, InputVisuals};
pub use render_globals::RenderGlobals;
