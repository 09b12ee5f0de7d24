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

//! Platform abstraction contracts: windowing surfaces and the event-pump
//! interface consumed by the desktop input backend.
//!
//! The windowing protocol bindings themselves (display connection, window
//! creation, blocking event retrieval) live behind these traits; concrete
//! implementations are provided by `aster-infra`.

pub mod error;
pub mod event;
pub mod window;

pub use error::PlatformError;
pub use event::{EventPump, KeySym, KeyboardState, PlatformEvent, PointerButton, PumpWaker};
pub use window::{SurfaceHandle, WindowConfig, WindowSurface};
