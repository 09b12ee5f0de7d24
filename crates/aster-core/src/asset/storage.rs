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

//! A generic, type-safe cache for loaded asset handles.

use super::{Asset, AssetHandle};
use std::collections::HashMap;

/// An in-memory cache for a specific type of asset `A`, keyed by string id.
///
/// This ensures a given asset is constructed only once: subsequent lookups
/// with the same id receive a clone of the cached handle. The controller
/// model cache keys entries by the stringified runtime model key.
#[derive(Default)]
pub struct Assets<A: Asset> {
    storage: HashMap<String, AssetHandle<A>>,
}

impl<A: Asset> Assets<A> {
    /// Creates a new, empty asset cache.
    pub fn new() -> Self {
        Self {
            storage: HashMap::new(),
        }
    }

    /// Inserts an asset handle into the cache, associated with its id.
    /// If an asset with the same id already exists, it is replaced.
    pub fn insert(&mut self, id: impl Into<String>, handle: AssetHandle<A>) {
        self.storage.insert(id.into(), handle);
    }

    /// Looks up the asset handle associated with the given id.
    pub fn find(&self, id: &str) -> Option<&AssetHandle<A>> {
        self.storage.get(id)
    }

    /// Checks if an asset with the specified id exists in the cache.
    pub fn contains(&self, id: &str) -> bool {
        self.storage.contains_key(id)
    }

    /// Removes every cached handle.
    pub fn clear(&mut self) {
        self.storage.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Dummy;
    impl Asset for Dummy {}

    #[test]
    fn test_insert_and_find() {
        let mut assets: Assets<Dummy> = Assets::new();
        let handle = AssetHandle::new(Dummy);
        assets.insert("42", handle.clone());
        assert!(assets.contains("42"));
        let found = assets.find("42").expect("inserted asset should be found");
        assert!(AssetHandle::ptr_eq(found, &handle));
    }

    #[test]
    fn test_find_missing_is_none() {
        let assets: Assets<Dummy> = Assets::new();
        assert!(assets.find("nope").is_none());
    }
}
