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

//! The asset handle layer: shared-ownership handles and a string-keyed cache.
//!
//! GPU-backed resources (meshes, materials, textures, models) are owned
//! through [`AssetHandle`], a reference-counted smart pointer. Replacing a
//! handle in engine state follows acquire-before-release ordering by
//! construction: the new handle is cloned into place before the old value
//! is dropped.

mod handle;
mod storage;

pub use handle::AssetHandle;
pub use storage::Assets;

use std::fmt;

/// A marker trait for types that can be managed as assets.
pub trait Asset: Send + Sync + 'static {}

/// An error produced while constructing an asset from source data.
#[derive(Debug)]
pub enum AssetError {
    /// The source bytes could not be interpreted as the expected format.
    InvalidData {
        /// A descriptive label for the asset being constructed.
        label: String,
        /// What was wrong with the data.
        reason: String,
    },
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetError::InvalidData { label, reason } => {
                write!(f, "Invalid asset data for '{label}': {reason}")
            }
        }
    }
}

impl std::error::Error for AssetError {}
