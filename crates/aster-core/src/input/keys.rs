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

//! Engine key codes.
//!
//! One code covers a whole engine-level key: symmetric physical keys such
//! as left and right shift both map to [`Key::Shift`], and mouse buttons
//! occupy the low codes so the pressed-key snapshot covers keyboard and
//! pointer uniformly.

/// An engine key code. Discriminants are stable and index directly into
/// the pressed-key snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
#[allow(missing_docs)]
pub enum Key {
    MouseLeft = 0x01,
    MouseRight = 0x02,
    MouseCenter = 0x04,
    MouseForward = 0x05,
    MouseBack = 0x06,
    Backspace = 0x08,
    Tab = 0x09,
    Return = 0x0D,
    Shift = 0x10,
    Ctrl = 0x11,
    Alt = 0x12,
    CapsLock = 0x14,
    Esc = 0x1B,
    Space = 0x20,
    End = 0x23,
    Home = 0x24,
    Left = 0x25,
    Up = 0x26,
    Right = 0x27,
    Down = 0x28,
    PrintScreen = 0x2A,
    Insert = 0x2D,
    Del = 0x2E,
    Key0 = 0x30,
    Key1 = 0x31,
    Key2 = 0x32,
    Key3 = 0x33,
    Key4 = 0x34,
    Key5 = 0x35,
    Key6 = 0x36,
    Key7 = 0x37,
    Key8 = 0x38,
    Key9 = 0x39,
    A = 0x41,
    B = 0x42,
    C = 0x43,
    D = 0x44,
    E = 0x45,
    F = 0x46,
    G = 0x47,
    H = 0x48,
    I = 0x49,
    J = 0x4A,
    K = 0x4B,
    L = 0x4C,
    M = 0x4D,
    N = 0x4E,
    O = 0x4F,
    P = 0x50,
    Q = 0x51,
    R = 0x52,
    S = 0x53,
    T = 0x54,
    U = 0x55,
    V = 0x56,
    W = 0x57,
    X = 0x58,
    Y = 0x59,
    Z = 0x5A,
    LCmd = 0x5B,
    RCmd = 0x5C,
    Num0 = 0x60,
    Num1 = 0x61,
    Num2 = 0x62,
    Num3 = 0x63,
    Num4 = 0x64,
    Num5 = 0x65,
    Num6 = 0x66,
    Num7 = 0x67,
    Num8 = 0x68,
    Num9 = 0x69,
    Multiply = 0x6A,
    Add = 0x6B,
    Subtract = 0x6D,
    Decimal = 0x6E,
    Divide = 0x6F,
    F1 = 0x70,
    F2 = 0x71,
    F3 = 0x72,
    F4 = 0x73,
    F5 = 0x74,
    F6 = 0x75,
    F7 = 0x76,
    F8 = 0x77,
    F9 = 0x78,
    F10 = 0x79,
    F11 = 0x7A,
    F12 = 0x7B,
}

impl Key {
    /// The size of the pressed-key snapshot indexed by key code.
    pub const COUNT: usize = 256;

    /// Returns the snapshot index for this key.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Every defined key, in code order.
    pub const ALL: &'static [Key] = &[
        Key::MouseLeft,
        Key::MouseRight,
        Key::MouseCenter,
        Key::MouseForward,
        Key::MouseBack,
        Key::Backspace,
        Key::Tab,
        Key::Return,
        Key::Shift,
        Key::Ctrl,
        Key::Alt,
        Key::CapsLock,
        Key::Esc,
        Key::Space,
        Key::End,
        Key::Home,
        Key::Left,
        Key::Up,
        Key::Right,
        Key::Down,
        Key::PrintScreen,
        Key::Insert,
        Key::Del,
        Key::Key0,
        Key::Key1,
        Key::Key2,
        Key::Key3,
        Key::Key4,
        Key::Key5,
        Key::Key6,
        Key::Key7,
        Key::Key8,
        Key::Key9,
        Key::A,
        Key::B,
        Key::C,
        Key::D,
        Key::E,
        Key::F,
        Key::G,
        Key::H,
        Key::I,
        Key::J,
        Key::K,
        Key::L,
        Key::M,
        Key::N,
        Key::O,
        Key::P,
        Key::Q,
        Key::R,
        Key::S,
        Key::T,
        Key::U,
        Key::V,
        Key::W,
        Key::X,
        Key::Y,
        Key::Z,
        Key::LCmd,
        Key::RCmd,
        Key::Num0,
        Key::Num1,
        Key::Num2,
        Key::Num3,
        Key::Num4,
        Key::Num5,
        Key::Num6,
        Key::Num7,
        Key::Num8,
        Key::Num9,
        Key::Multiply,
        Key::Add,
        Key::Subtract,
        Key::Decimal,
        Key::Divide,
        Key::F1,
        Key::F2,
        Key::F3,
        Key::F4,
        Key::F5,
        Key::F6,
        Key::F7,
        Key::F8,
        Key::F9,
        Key::F10,
        Key::F11,
        Key::F12,
    ];
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_indices_fit_snapshot() {
        for key in Key::ALL {
            assert!(key.index() < Key::COUNT);
        }
    }

    #[test]
    fn test_codes_are_unique() {
        let codes: HashSet<usize> = Key::ALL.iter().map(|k| k.index()).collect();
        assert_eq!(codes.len(), Key::ALL.len());
    }
}
