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

//! The desktop platform backend and its event pumps.

pub mod backend;
pub mod headless;
pub mod keymap;
pub mod keysym;
pub mod snapshot;
pub mod winit_pump;

pub use backend::{DesktopBackend, PumpBootstrap, PumpFactory};
pub use headless::{HeadlessController, HeadlessPump};
pub use snapshot::InputSnapshot;
pub use winit_pump::WinitPump;
