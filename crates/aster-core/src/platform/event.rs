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

//! The event-pump contract between the desktop backend's input thread and
//! a concrete windowing protocol implementation.
//!
//! The pump is owned by the dedicated input thread and blocked on in
//! [`EventPump::next_event`]; a paired [`PumpWaker`] lets other threads
//! break that wait with a synthetic [`PlatformEvent::Wakeup`].

/// A platform key symbol.
///
/// Keysyms are more specific than engine key codes: capital and lowercase
/// letters are distinct symbols, and left/right shift are separate symbols
/// that both map to the single engine shift key.
pub type KeySym = u32;

/// A bitmap of pressed physical key codes, one bit per code, as reported
/// by a full keyboard state query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyboardState {
    bits: [u8; 32],
}

impl KeyboardState {
    /// Creates a state with every key up.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether the physical key `code` is down.
    pub fn set(&mut self, code: u8, down: bool) {
        let byte = usize::from(code >> 3);
        let bit = 1 << (code & 7);
        if down {
            self.bits[byte] |= bit;
        } else {
            self.bits[byte] &= !bit;
        }
    }

    /// Returns whether the physical key `code` is down.
    pub fn is_down(&self, code: u8) -> bool {
        self.bits[usize::from(code >> 3)] & (1 << (code & 7)) != 0
    }
}

/// A discrete pointer button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// The primary button.
    Left,
    /// The secondary button.
    Right,
    /// The middle button or wheel click.
    Center,
    /// The forward side button.
    Forward,
    /// The back side button.
    Back,
}

/// An event delivered by the windowing protocol to the input thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformEvent {
    /// A key was pressed or released. The event carries no key identity:
    /// the receiver re-derives the whole pressed-key snapshot from
    /// [`EventPump::keyboard_state`].
    Keyboard,
    /// A pointer button was pressed.
    PointerPressed(PointerButton),
    /// A pointer button was released.
    PointerReleased(PointerButton),
    /// The scroll wheel moved by a number of signed detents.
    Scroll(i32),
    /// The pointer moved to window coordinates `(x, y)`.
    PointerMoved {
        /// X in window coordinates.
        x: i32,
        /// Y in window coordinates.
        y: i32,
    },
    /// The window was resized.
    Resized {
        /// New inner width.
        width: u32,
        /// New inner height.
        height: u32,
    },
    /// The window-close protocol fired, or the process received a
    /// termination signal (treated as equivalent).
    CloseRequested,
    /// A synthetic event posted through a [`PumpWaker`], used to break the
    /// blocking wait during shutdown.
    Wakeup,
}

/// The blocking event source owned by the input thread.
pub trait EventPump {
    /// Blocks until the next event arrives and returns it.
    fn next_event(&mut self) -> PlatformEvent;

    /// Queries the full pressed state of the keyboard.
    fn keyboard_state(&self) -> KeyboardState;

    /// Maps a key symbol to the physical key code it currently occupies,
    /// if the symbol exists on this keyboard.
    fn keycode_for(&self, sym: KeySym) -> Option<u8>;

    /// Queries whether the caps-lock latch/LED is currently on.
    fn capslock_led(&self) -> bool;

    /// Creates a waker that can interrupt [`Self::next_event`] from
    /// another thread.
    fn waker(&self) -> Box<dyn PumpWaker>;
}

/// Interrupts a blocked [`EventPump`] from another thread by posting a
/// synthetic [`PlatformEvent::Wakeup`].
pub trait PumpWaker: Send {
    /// Posts the wakeup. Must never block.
    fn wake(&self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyboard_state_set_and_query() {
        let mut state = KeyboardState::new();
        state.set(50, true);
        state.set(7, true);
        assert!(state.is_down(50));
        assert!(state.is_down(7));
        assert!(!state.is_down(51));
        state.set(50, false);
        assert!(!state.is_down(50));
    }
}
