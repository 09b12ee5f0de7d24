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

use super::Asset;
use std::{ops::Deref, sync::Arc};

/// A thread-safe, reference-counted handle to a loaded asset.
///
/// This acts as a smart pointer, providing shared ownership of an asset's
/// data. Cloning a handle is cheap, as it only increments the reference
/// count and does not duplicate the underlying asset data.
///
/// The asset data is deallocated when the last handle is dropped.
#[derive(Debug)]
pub struct AssetHandle<T: Asset>(Arc<T>);

impl<T: Asset> AssetHandle<T> {
    /// Creates a new `AssetHandle` that takes ownership of the asset data.
    pub fn new(asset: T) -> Self {
        Self(Arc::new(asset))
    }

    /// Returns `true` if both handles point at the same asset data.
    ///
    /// Used to skip redundant replace operations: storing a handle that is
    /// pointer-equal to the one already stored would only churn the
    /// reference count.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }

    /// Returns the number of live handles to this asset.
    pub fn strong_count(handle: &Self) -> usize {
        Arc::strong_count(&handle.0)
    }
}

impl<T: Asset> Clone for AssetHandle<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T: Asset> Deref for AssetHandle<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Dummy(#[allow(dead_code)] u32);
    impl Asset for Dummy {}

    #[test]
    fn test_clone_shares_data() {
        let a = AssetHandle::new(Dummy(7));
        let b = a.clone();
        assert!(AssetHandle::ptr_eq(&a, &b));
        assert_eq!(AssetHandle::strong_count(&a), 2);
    }

    #[test]
    fn test_drop_decrements_count() {
        let a = AssetHandle::new(Dummy(7));
        let b = a.clone();
        drop(b);
        assert_eq!(AssetHandle::strong_count(&a), 1);
    }

    #[test]
    fn test_distinct_assets_are_not_ptr_eq() {
        let a = AssetHandle::new(Dummy(1));
        let b = AssetHandle::new(Dummy(1));
        assert!(!AssetHandle::ptr_eq(&a, &b));
    }
}
