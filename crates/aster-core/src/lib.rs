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

//! # Aster Core
//!
//! Foundational crate containing traits, core types, and interface contracts
//! that define the SDK's architecture: math primitives, asset handles, input
//! and tracking contracts, XR runtime capability contracts, and the
//! backend-agnostic rendering and platform interfaces.

#![warn(missing_docs)]

pub mod asset;
pub mod input;
pub mod math;
pub mod platform;
pub mod renderer;
pub mod xr;
