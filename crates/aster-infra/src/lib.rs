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

//! # Aster Infra
//!
//! Concrete implementations of the `aster-core` platform and graphics
//! contracts: the desktop backend with its dedicated input thread, the
//! `winit` event pump, a headless pump for tests, and a recording graphics
//! backend.

#![warn(missing_docs)]

pub mod graphics;
pub mod platform;

pub use graphics::RecordingBackend;
pub use platform::{DesktopBackend, InputSnapshot, PumpBootstrap, WinitPump};
