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

//! The engine keymap: which platform key symbols activate which engine
//! key, and the full-snapshot re-derivation that applies it.

use super::keysym::*;
use super::snapshot::InputSnapshot;
use aster_core::input::Key;
use aster_core::platform::{EventPump, KeySym, PointerButton};

/// Maps one engine key to every platform symbol that activates it.
pub struct KeyMapEntry {
    /// The engine key.
    pub key: Key,
    /// The symbols that activate it. Symmetric physical keys list both
    /// sides; letters list both cases.
    pub syms: &'static [KeySym],
}

macro_rules! entry {
    ($key:ident, $($sym:expr),+) => {
        KeyMapEntry { key: Key::$key, syms: &[$($sym),+] }
    };
}

// Letters activate on either case; which case the platform reports depends
// on the live modifier state, so both must be listed.
macro_rules! letter {
    ($key:ident, $upper:literal) => {
        KeyMapEntry {
            key: Key::$key,
            syms: &[$upper, $upper + 0x20],
        }
    };
}

/// Every keyboard-driven engine key and its activating symbols.
///
/// Mouse buttons and caps lock are absent: buttons are driven by pointer
/// events and caps lock is re-queried from the platform latch each pump
/// iteration.
pub static KEYMAP: &[KeyMapEntry] = &[
    entry!(Backspace, XK_BACKSPACE),
    entry!(Tab, XK_TAB),
    entry!(Return, XK_RETURN),
    entry!(Shift, XK_SHIFT_L, XK_SHIFT_R),
    entry!(Ctrl, XK_CONTROL_L, XK_CONTROL_R),
    entry!(Alt, XK_ALT_L, XK_ALT_R),
    entry!(Esc, XK_ESCAPE),
    entry!(Space, XK_SPACE),
    entry!(End, XK_END),
    entry!(Home, XK_HOME),
    entry!(Left, XK_LEFT),
    entry!(Up, XK_UP),
    entry!(Right, XK_RIGHT),
    entry!(Down, XK_DOWN),
    entry!(PrintScreen, XK_PRINT),
    entry!(Insert, XK_INSERT),
    entry!(Del, XK_DELETE),
    entry!(Key0, 0x30),
    entry!(Key1, 0x31),
    entry!(Key2, 0x32),
    entry!(Key3, 0x33),
    entry!(Key4, 0x34),
    entry!(Key5, 0x35),
    entry!(Key6, 0x36),
    entry!(Key7, 0x37),
    entry!(Key8, 0x38),
    entry!(Key9, 0x39),
    letter!(A, 0x41),
    letter!(B, 0x42),
    letter!(C, 0x43),
    letter!(D, 0x44),
    letter!(E, 0x45),
    letter!(F, 0x46),
    letter!(G, 0x47),
    letter!(H, 0x48),
    letter!(I, 0x49),
    letter!(J, 0x4A),
    letter!(K, 0x4B),
    letter!(L, 0x4C),
    letter!(M, 0x4D),
    letter!(N, 0x4E),
    letter!(O, 0x4F),
    letter!(P, 0x50),
    letter!(Q, 0x51),
    letter!(R, 0x52),
    letter!(S, 0x53),
    letter!(T, 0x54),
    letter!(U, 0x55),
    letter!(V, 0x56),
    letter!(W, 0x57),
    letter!(X, 0x58),
    letter!(Y, 0x59),
    letter!(Z, 0x5A),
    entry!(LCmd, XK_SUPER_L),
    entry!(RCmd, XK_SUPER_R),
    entry!(Num0, XK_KP_0),
    entry!(Num1, XK_KP_1),
    entry!(Num2, XK_KP_2),
    entry!(Num3, XK_KP_3),
    entry!(Num4, XK_KP_4),
    entry!(Num5, XK_KP_5),
    entry!(Num6, XK_KP_6),
    entry!(Num7, XK_KP_7),
    entry!(Num8, XK_KP_8),
    entry!(Num9, XK_KP_9),
    entry!(Multiply, XK_KP_MULTIPLY),
    entry!(Add, XK_KP_ADD),
    entry!(Subtract, XK_KP_SUBTRACT),
    entry!(Decimal, XK_KP_DECIMAL),
    entry!(Divide, XK_KP_DIVIDE),
    entry!(F1, XK_F1),
    entry!(F2, XK_F2),
    entry!(F3, XK_F3),
    entry!(F4, XK_F4),
    entry!(F5, XK_F5),
    entry!(F6, XK_F6),
    entry!(F7, XK_F7),
    entry!(F8, XK_F8),
    entry!(F9, XK_F9),
    entry!(F10, XK_F10),
    entry!(F11, XK_F11),
    entry!(F12, XK_F12),
];

/// Re-derives the snapshot's keyboard keys from a full keyboard state
/// query.
///
/// Key events carry no key identity, so every keyboard key is recomputed
/// from scratch each time. This also recovers keys whose release was
/// delivered to another window: the query reflects reality, not event
/// history.
pub fn derive_key_snapshot(pump: &dyn EventPump, snapshot: &InputSnapshot) {
    let keyboard = pump.keyboard_state();
    for entry in KEYMAP {
        let down = entry.syms.iter().any(|&sym| {
            pump.keycode_for(sym)
                .is_some_and(|code| keyboard.is_down(code))
        });
        snapshot.set_key(entry.key, down);
    }
}

/// Maps a pointer button to the engine key that mirrors it.
pub fn pointer_key(button: PointerButton) -> Key {
    match button {
        PointerButton::Left => Key::MouseLeft,
        PointerButton::Right => Key::MouseRight,
        PointerButton::Center => Key::MouseCenter,
        PointerButton::Forward => Key::MouseForward,
        PointerButton::Back => Key::MouseBack,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_each_engine_key_mapped_once() {
        let keys: HashSet<usize> = KEYMAP.iter().map(|e| e.key.index()).collect();
        assert_eq!(keys.len(), KEYMAP.len());
    }

    #[test]
    fn test_symmetric_keys_list_both_sides() {
        let shift = KEYMAP.iter().find(|e| e.key == Key::Shift).unwrap();
        assert!(shift.syms.contains(&XK_SHIFT_L));
        assert!(shift.syms.contains(&XK_SHIFT_R));
    }

    #[test]
    fn test_letters_list_both_cases() {
        let w = KEYMAP.iter().find(|e| e.key == Key::W).unwrap();
        assert!(w.syms.contains(&0x57));
        assert!(w.syms.contains(&0x77));
    }

    #[test]
    fn test_no_entry_for_snapshot_driven_keys() {
        assert!(!KEYMAP.iter().any(|e| e.key == Key::CapsLock));
        assert!(!KEYMAP.iter().any(|e| e.key == Key::MouseLeft));
    }
}
