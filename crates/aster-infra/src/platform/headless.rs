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

//! A scriptable, windowless event pump for tests.
//!
//! The pump blocks on a channel the paired [`HeadlessController`] feeds
//! from the test thread, and exposes a shared keyboard state the
//! controller mutates directly. This lets tests exercise the backend's
//! input thread against exact event sequences.

use super::keysym;
use aster_core::platform::{
    EventPump, KeySym, KeyboardState, PlatformEvent, PumpWaker, SurfaceHandle, WindowSurface,
};
use raw_window_handle::{
    DisplayHandle, HandleError, HasDisplayHandle, HasWindowHandle, WindowHandle,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Shared state between the pump (input thread) and controller (test
/// thread).
#[derive(Default)]
struct Shared {
    keyboard: Mutex<KeyboardState>,
    sym_to_code: Mutex<HashMap<KeySym, u8>>,
    capslock: AtomicBool,
}

/// A window stand-in whose handles are unavailable. Paired with a graphics
/// backend that never dereferences them.
#[derive(Debug)]
pub struct HeadlessWindow;

impl HasWindowHandle for HeadlessWindow {
    fn window_handle(&self) -> Result<WindowHandle<'_>, HandleError> {
        Err(HandleError::Unavailable)
    }
}

impl HasDisplayHandle for HeadlessWindow {
    fn display_handle(&self) -> Result<DisplayHandle<'_>, HandleError> {
        Err(HandleError::Unavailable)
    }
}

/// The windowless event pump. Owned by the backend's input thread.
pub struct HeadlessPump {
    events: flume::Receiver<PlatformEvent>,
    wake_tx: flume::Sender<PlatformEvent>,
    shared: Arc<Shared>,
}

/// The test-side controller scripting a [`HeadlessPump`].
#[derive(Clone)]
pub struct HeadlessController {
    events: flume::Sender<PlatformEvent>,
    shared: Arc<Shared>,
    next_code: Arc<Mutex<u8>>,
}

impl HeadlessPump {
    /// Creates a pump/controller pair.
    pub fn new() -> (Self, HeadlessController) {
        let (tx, rx) = flume::unbounded();
        let shared = Arc::new(Shared::default());
        let pump = Self {
            events: rx,
            wake_tx: tx.clone(),
            shared: shared.clone(),
        };
        let controller = HeadlessController {
            events: tx,
            shared,
            // Key codes start in the X11 keyboard range.
            next_code: Arc::new(Mutex::new(8)),
        };
        (pump, controller)
    }

    /// Returns the window stand-in for this pump.
    pub fn window() -> SurfaceHandle {
        Arc::new(HeadlessWindow) as Arc<dyn WindowSurface + Send + Sync>
    }
}

impl EventPump for HeadlessPump {
    fn next_event(&mut self) -> PlatformEvent {
        // A closed channel means the controller is gone; shut the thread
        // down cleanly.
        self.events.recv().unwrap_or(PlatformEvent::Wakeup)
    }

    fn keyboard_state(&self) -> KeyboardState {
        *self.shared.keyboard.lock().unwrap()
    }

    fn keycode_for(&self, sym: KeySym) -> Option<u8> {
        self.shared.sym_to_code.lock().unwrap().get(&sym).copied()
    }

    fn capslock_led(&self) -> bool {
        self.shared.capslock.load(Ordering::Relaxed)
    }

    fn waker(&self) -> Box<dyn PumpWaker> {
        Box::new(HeadlessWaker {
            events: self.wake_tx.clone(),
        })
    }
}

struct HeadlessWaker {
    events: flume::Sender<PlatformEvent>,
}

impl PumpWaker for HeadlessWaker {
    fn wake(&self) {
        let _ = self.events.send(PlatformEvent::Wakeup);
    }
}

impl HeadlessController {
    /// Sends a raw event to the pump.
    pub fn send(&self, event: PlatformEvent) {
        let _ = self.events.send(event);
    }

    /// Assigns a key code to `sym` if it has none yet, and returns it.
    pub fn bind_sym(&self, sym: KeySym) -> u8 {
        let mut map = self.shared.sym_to_code.lock().unwrap();
        if let Some(&code) = map.get(&sym) {
            return code;
        }
        let mut next = self.next_code.lock().unwrap();
        let code = *next;
        *next += 1;
        // Letters occupy one physical key for both cases.
        if (keysym::XK_A_UPPER..=keysym::XK_A_UPPER + 25).contains(&sym) {
            map.insert(sym + 0x20, code);
        }
        if (keysym::XK_A_LOWER..=keysym::XK_A_LOWER + 25).contains(&sym) {
            map.insert(sym - 0x20, code);
        }
        map.insert(sym, code);
        code
    }

    /// Marks `sym`'s key as pressed and delivers a key event.
    pub fn press_sym(&self, sym: KeySym) {
        let code = self.bind_sym(sym);
        self.shared.keyboard.lock().unwrap().set(code, true);
        self.send(PlatformEvent::Keyboard);
    }

    /// Marks `sym`'s key as released and delivers a key event.
    pub fn release_sym(&self, sym: KeySym) {
        let code = self.bind_sym(sym);
        self.shared.keyboard.lock().unwrap().set(code, false);
        self.send(PlatformEvent::Keyboard);
    }

    /// Clears the whole keyboard state without delivering any event, as
    /// happens when releases go to another window.
    pub fn drop_all_keys_silently(&self) {
        *self.shared.keyboard.lock().unwrap() = KeyboardState::new();
    }

    /// Sets the platform caps-lock latch.
    pub fn set_capslock(&self, on: bool) {
        self.shared.capslock.store(on, Ordering::Relaxed);
    }
}
