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

//! Key symbol constants, following the X11 keysym values.
//!
//! Symbols are finer grained than engine key codes: left and right shift
//! are distinct symbols, as are upper and lower case letters. The keymap
//! lists every symbol that should activate an engine key.

#![allow(missing_docs)]

use aster_core::platform::KeySym;

pub const XK_BACKSPACE: KeySym = 0xff08;
pub const XK_TAB: KeySym = 0xff09;
pub const XK_RETURN: KeySym = 0xff0d;
pub const XK_ESCAPE: KeySym = 0xff1b;
pub const XK_SPACE: KeySym = 0x20;

pub const XK_SHIFT_L: KeySym = 0xffe1;
pub const XK_SHIFT_R: KeySym = 0xffe2;
pub const XK_CONTROL_L: KeySym = 0xffe3;
pub const XK_CONTROL_R: KeySym = 0xffe4;
pub const XK_CAPS_LOCK: KeySym = 0xffe5;
pub const XK_ALT_L: KeySym = 0xffe9;
pub const XK_ALT_R: KeySym = 0xffea;
pub const XK_SUPER_L: KeySym = 0xffeb;
pub const XK_SUPER_R: KeySym = 0xffec;

pub const XK_HOME: KeySym = 0xff50;
pub const XK_LEFT: KeySym = 0xff51;
pub const XK_UP: KeySym = 0xff52;
pub const XK_RIGHT: KeySym = 0xff53;
pub const XK_DOWN: KeySym = 0xff54;
pub const XK_END: KeySym = 0xff57;
pub const XK_PRINT: KeySym = 0xff61;
pub const XK_INSERT: KeySym = 0xff63;
pub const XK_DELETE: KeySym = 0xffff;

pub const XK_KP_MULTIPLY: KeySym = 0xffaa;
pub const XK_KP_ADD: KeySym = 0xffab;
pub const XK_KP_SUBTRACT: KeySym = 0xffad;
pub const XK_KP_DECIMAL: KeySym = 0xffae;
pub const XK_KP_DIVIDE: KeySym = 0xffaf;
pub const XK_KP_0: KeySym = 0xffb0;
pub const XK_KP_1: KeySym = 0xffb1;
pub const XK_KP_2: KeySym = 0xffb2;
pub const XK_KP_3: KeySym = 0xffb3;
pub const XK_KP_4: KeySym = 0xffb4;
pub const XK_KP_5: KeySym = 0xffb5;
pub const XK_KP_6: KeySym = 0xffb6;
pub const XK_KP_7: KeySym = 0xffb7;
pub const XK_KP_8: KeySym = 0xffb8;
pub const XK_KP_9: KeySym = 0xffb9;

pub const XK_F1: KeySym = 0xffbe;
pub const XK_F2: KeySym = 0xffbf;
pub const XK_F3: KeySym = 0xffc0;
pub const XK_F4: KeySym = 0xffc1;
pub const XK_F5: KeySym = 0xffc2;
pub const XK_F6: KeySym = 0xffc3;
pub const XK_F7: KeySym = 0xffc4;
pub const XK_F8: KeySym = 0xffc5;
pub const XK_F9: KeySym = 0xffc6;
pub const XK_F10: KeySym = 0xffc7;
pub const XK_F11: KeySym = 0xffc8;
pub const XK_F12: KeySym = 0xffc9;

// Digits and letters are their ASCII values.
pub const XK_0: KeySym = 0x30;
pub const XK_9: KeySym = 0x39;
pub const XK_A_UPPER: KeySym = 0x41;
pub const XK_A_LOWER: KeySym = 0x61;
