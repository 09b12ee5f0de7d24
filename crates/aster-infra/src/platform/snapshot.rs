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

//! The lock-free input snapshot shared between the input thread and the
//! main thread.

use aster_core::input::Key;
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};

/// The pressed-key, cursor, and scroll state maintained by the input
/// thread and read by the main thread without locking.
///
/// The input thread is the sole writer; readers observe each field
/// independently. Relaxed ordering is sufficient because no reader derives
/// cross-field invariants from the snapshot.
pub struct InputSnapshot {
    keys: [AtomicBool; Key::COUNT],
    cursor_x: AtomicI32,
    cursor_y: AtomicI32,
    scroll: AtomicI32,
}

impl Default for InputSnapshot {
    fn default() -> Self {
        Self::new()
    }
}

impl InputSnapshot {
    /// Creates a snapshot with no keys pressed, the cursor at the origin,
    /// and zero accumulated scroll.
    pub fn new() -> Self {
        const UP: AtomicBool = AtomicBool::new(false);
        Self {
            keys: [UP; Key::COUNT],
            cursor_x: AtomicI32::new(0),
            cursor_y: AtomicI32::new(0),
            scroll: AtomicI32::new(0),
        }
    }

    /// Sets whether `key` is pressed.
    pub fn set_key(&self, key: Key, down: bool) {
        self.keys[key.index()].store(down, Ordering::Relaxed);
    }

    /// Returns whether `key` is pressed.
    pub fn key_down(&self, key: Key) -> bool {
        self.keys[key.index()].load(Ordering::Relaxed)
    }

    /// Sets the cursor position in window coordinates.
    pub fn set_cursor(&self, x: i32, y: i32) {
        self.cursor_x.store(x, Ordering::Relaxed);
        self.cursor_y.store(y, Ordering::Relaxed);
    }

    /// Returns the cursor position in window coordinates.
    pub fn cursor(&self) -> (i32, i32) {
        (
            self.cursor_x.load(Ordering::Relaxed),
            self.cursor_y.load(Ordering::Relaxed),
        )
    }

    /// Accumulates signed scroll detents. One wheel notch is 120 detents.
    pub fn add_scroll(&self, detents: i32) {
        self.scroll.fetch_add(detents, Ordering::Relaxed);
    }

    /// Returns the total accumulated scroll in detents.
    pub fn scroll(&self) -> i32 {
        self.scroll.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_independent() {
        let snapshot = InputSnapshot::new();
        snapshot.set_key(Key::W, true);
        assert!(snapshot.key_down(Key::W));
        assert!(!snapshot.key_down(Key::A));
        snapshot.set_key(Key::W, false);
        assert!(!snapshot.key_down(Key::W));
    }

    #[test]
    fn test_scroll_accumulates_signed() {
        let snapshot = InputSnapshot::new();
        snapshot.add_scroll(120);
        snapshot.add_scroll(120);
        snapshot.add_scroll(-120);
        assert_eq!(snapshot.scroll(), 120);
    }

    #[test]
    fn test_cursor_round_trips() {
        let snapshot = InputSnapshot::new();
        snapshot.set_cursor(640, -12);
        assert_eq!(snapshot.cursor(), (640, -12));
    }
}
