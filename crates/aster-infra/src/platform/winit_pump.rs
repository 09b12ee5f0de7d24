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

//! The `winit`-backed event pump.
//!
//! Runs a `winit` event loop on the backend's input thread and translates
//! its events into the engine's platform events. The pump maintains its
//! own full keyboard state and symbol-to-code mapping so the generic
//! snapshot re-derivation works the same as against a native protocol
//! query.

use super::keysym;
use aster_core::platform::{
    EventPump, KeySym, KeyboardState, PlatformError, PlatformEvent, PointerButton, PumpWaker,
    SurfaceHandle, WindowConfig, WindowSurface,
};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop, EventLoopProxy};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Window, WindowId};

/// The user event posted by a waker to break a blocking pump.
#[derive(Debug)]
struct Wake;

/// Physical keys the pump tracks, each listing the symbols it produces.
/// The table index plus 8 is the key's stable code, mirroring the usual
/// keyboard code range.
static KEYCODE_TABLE: &[(KeyCode, &[KeySym])] = &[
    (KeyCode::Backspace, &[keysym::XK_BACKSPACE]),
    (KeyCode::Tab, &[keysym::XK_TAB]),
    (KeyCode::Enter, &[keysym::XK_RETURN]),
    (KeyCode::ShiftLeft, &[keysym::XK_SHIFT_L]),
    (KeyCode::ShiftRight, &[keysym::XK_SHIFT_R]),
    (KeyCode::ControlLeft, &[keysym::XK_CONTROL_L]),
    (KeyCode::ControlRight, &[keysym::XK_CONTROL_R]),
    (KeyCode::AltLeft, &[keysym::XK_ALT_L]),
    (KeyCode::AltRight, &[keysym::XK_ALT_R]),
    (KeyCode::CapsLock, &[keysym::XK_CAPS_LOCK]),
    (KeyCode::Escape, &[keysym::XK_ESCAPE]),
    (KeyCode::Space, &[keysym::XK_SPACE]),
    (KeyCode::End, &[keysym::XK_END]),
    (KeyCode::Home, &[keysym::XK_HOME]),
    (KeyCode::ArrowLeft, &[keysym::XK_LEFT]),
    (KeyCode::ArrowUp, &[keysym::XK_UP]),
    (KeyCode::ArrowRight, &[keysym::XK_RIGHT]),
    (KeyCode::ArrowDown, &[keysym::XK_DOWN]),
    (KeyCode::PrintScreen, &[keysym::XK_PRINT]),
    (KeyCode::Insert, &[keysym::XK_INSERT]),
    (KeyCode::Delete, &[keysym::XK_DELETE]),
    (KeyCode::Digit0, &[0x30]),
    (KeyCode::Digit1, &[0x31]),
    (KeyCode::Digit2, &[0x32]),
    (KeyCode::Digit3, &[0x33]),
    (KeyCode::Digit4, &[0x34]),
    (KeyCode::Digit5, &[0x35]),
    (KeyCode::Digit6, &[0x36]),
    (KeyCode::Digit7, &[0x37]),
    (KeyCode::Digit8, &[0x38]),
    (KeyCode::Digit9, &[0x39]),
    (KeyCode::KeyA, &[0x41, 0x61]),
    (KeyCode::KeyB, &[0x42, 0x62]),
    (KeyCode::KeyC, &[0x43, 0x63]),
    (KeyCode::KeyD, &[0x44, 0x64]),
    (KeyCode::KeyE, &[0x45, 0x65]),
    (KeyCode::KeyF, &[0x46, 0x66]),
    (KeyCode::KeyG, &[0x47, 0x67]),
    (KeyCode::KeyH, &[0x48, 0x68]),
    (KeyCode::KeyI, &[0x49, 0x69]),
    (KeyCode::KeyJ, &[0x4A, 0x6A]),
    (KeyCode::KeyK, &[0x4B, 0x6B]),
    (KeyCode::KeyL, &[0x4C, 0x6C]),
    (KeyCode::KeyM, &[0x4D, 0x6D]),
    (KeyCode::KeyN, &[0x4E, 0x6E]),
    (KeyCode::KeyO, &[0x4F, 0x6F]),
    (KeyCode::KeyP, &[0x50, 0x70]),
    (KeyCode::KeyQ, &[0x51, 0x71]),
    (KeyCode::KeyR, &[0x52, 0x72]),
    (KeyCode::KeyS, &[0x53, 0x73]),
    (KeyCode::KeyT, &[0x54, 0x74]),
    (KeyCode::KeyU, &[0x55, 0x75]),
    (KeyCode::KeyV, &[0x56, 0x76]),
    (KeyCode::KeyW, &[0x57, 0x77]),
    (KeyCode::KeyX, &[0x58, 0x78]),
    (KeyCode::KeyY, &[0x59, 0x79]),
    (KeyCode::KeyZ, &[0x5A, 0x7A]),
    (KeyCode::SuperLeft, &[keysym::XK_SUPER_L]),
    (KeyCode::SuperRight, &[keysym::XK_SUPER_R]),
    (KeyCode::Numpad0, &[keysym::XK_KP_0]),
    (KeyCode::Numpad1, &[keysym::XK_KP_1]),
    (KeyCode::Numpad2, &[keysym::XK_KP_2]),
    (KeyCode::Numpad3, &[keysym::XK_KP_3]),
    (KeyCode::Numpad4, &[keysym::XK_KP_4]),
    (KeyCode::Numpad5, &[keysym::XK_KP_5]),
    (KeyCode::Numpad6, &[keysym::XK_KP_6]),
    (KeyCode::Numpad7, &[keysym::XK_KP_7]),
    (KeyCode::Numpad8, &[keysym::XK_KP_8]),
    (KeyCode::Numpad9, &[keysym::XK_KP_9]),
    (KeyCode::NumpadMultiply, &[keysym::XK_KP_MULTIPLY]),
    (KeyCode::NumpadAdd, &[keysym::XK_KP_ADD]),
    (KeyCode::NumpadSubtract, &[keysym::XK_KP_SUBTRACT]),
    (KeyCode::NumpadDecimal, &[keysym::XK_KP_DECIMAL]),
    (KeyCode::NumpadDivide, &[keysym::XK_KP_DIVIDE]),
    (KeyCode::F1, &[keysym::XK_F1]),
    (KeyCode::F2, &[keysym::XK_F2]),
    (KeyCode::F3, &[keysym::XK_F3]),
    (KeyCode::F4, &[keysym::XK_F4]),
    (KeyCode::F5, &[keysym::XK_F5]),
    (KeyCode::F6, &[keysym::XK_F6]),
    (KeyCode::F7, &[keysym::XK_F7]),
    (KeyCode::F8, &[keysym::XK_F8]),
    (KeyCode::F9, &[keysym::XK_F9]),
    (KeyCode::F10, &[keysym::XK_F10]),
    (KeyCode::F11, &[keysym::XK_F11]),
    (KeyCode::F12, &[keysym::XK_F12]),
];

fn code_for_keycode(keycode: KeyCode) -> Option<u8> {
    KEYCODE_TABLE
        .iter()
        .position(|(kc, _)| *kc == keycode)
        .map(|i| (i + 8) as u8)
}

/// The `winit` application state driven by `pump_app_events`.
struct PumpApp {
    config: WindowConfig,
    window: Option<Arc<Window>>,
    creation_error: Option<PlatformError>,
    queue: VecDeque<PlatformEvent>,
    keyboard: KeyboardState,
    // winit does not expose the platform's caps-lock LED; the latch is
    // tracked by toggling on each press.
    capslock: bool,
}

impl ApplicationHandler<Wake> for PumpApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let attributes = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height))
            .with_min_inner_size(LogicalSize::new(
                self.config.min_width,
                self.config.min_height,
            ))
            .with_visible(true);
        match event_loop.create_window(attributes) {
            Ok(window) => {
                log::info!("Window created (id: {:?})", window.id());
                self.window = Some(Arc::new(window));
            }
            Err(err) => {
                self.creation_error = Some(PlatformError::WindowCreation {
                    details: err.to_string(),
                });
            }
        }
    }

    fn window_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::KeyboardInput {
                event: key_event, ..
            } => {
                let PhysicalKey::Code(keycode) = key_event.physical_key else {
                    return;
                };
                let Some(code) = code_for_keycode(keycode) else {
                    return;
                };
                match key_event.state {
                    ElementState::Pressed if !key_event.repeat => {
                        self.keyboard.set(code, true);
                        if keycode == KeyCode::CapsLock {
                            self.capslock = !self.capslock;
                        }
                        self.queue.push_back(PlatformEvent::Keyboard);
                    }
                    ElementState::Released => {
                        self.keyboard.set(code, false);
                        self.queue.push_back(PlatformEvent::Keyboard);
                    }
                    _ => {}
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let Some(button) = map_pointer_button(button) else {
                    return;
                };
                self.queue.push_back(match state {
                    ElementState::Pressed => PlatformEvent::PointerPressed(button),
                    ElementState::Released => PlatformEvent::PointerReleased(button),
                });
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let detents = match delta {
                    MouseScrollDelta::LineDelta(_, y) => (y * 120.0) as i32,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as i32,
                };
                if detents != 0 {
                    self.queue.push_back(PlatformEvent::Scroll(detents));
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.queue.push_back(PlatformEvent::PointerMoved {
                    x: position.x as i32,
                    y: position.y as i32,
                });
            }
            WindowEvent::Resized(size) => {
                self.queue.push_back(PlatformEvent::Resized {
                    width: size.width,
                    height: size.height,
                });
            }
            WindowEvent::CloseRequested => {
                self.queue.push_back(PlatformEvent::CloseRequested);
            }
            _ => {}
        }
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, _event: Wake) {
        self.queue.push_back(PlatformEvent::Wakeup);
    }
}

fn map_pointer_button(button: MouseButton) -> Option<PointerButton> {
    match button {
        MouseButton::Left => Some(PointerButton::Left),
        MouseButton::Right => Some(PointerButton::Right),
        MouseButton::Middle => Some(PointerButton::Center),
        MouseButton::Forward => Some(PointerButton::Forward),
        MouseButton::Back => Some(PointerButton::Back),
        MouseButton::Other(_) => None,
    }
}

/// A blocking event pump backed by a `winit` event loop.
///
/// Must be created and driven on the thread that owns it; the event loop
/// is built with `with_any_thread` so that thread can be the backend's
/// input thread rather than the process main thread.
pub struct WinitPump {
    event_loop: EventLoop<Wake>,
    app: PumpApp,
    sym_to_code: HashMap<KeySym, u8>,
}

impl WinitPump {
    /// Builds the event loop, creates the window, and returns the pump
    /// with the window surface and its initial inner size.
    pub fn start(config: &WindowConfig) -> Result<(Self, SurfaceHandle, u32, u32), PlatformError> {
        let mut builder = EventLoop::<Wake>::with_user_event();
        #[cfg(all(unix, not(target_os = "macos")))]
        {
            winit::platform::x11::EventLoopBuilderExtX11::with_any_thread(&mut builder, true);
            winit::platform::wayland::EventLoopBuilderExtWayland::with_any_thread(
                &mut builder,
                true,
            );
        }
        let mut event_loop = builder
            .build()
            .map_err(|err| PlatformError::DisplayUnavailable {
                details: err.to_string(),
            })?;

        let mut app = PumpApp {
            config: config.clone(),
            window: None,
            creation_error: None,
            queue: VecDeque::new(),
            keyboard: KeyboardState::new(),
            capslock: false,
        };

        // Pump until `resumed` has run and the window exists.
        for _ in 0..100 {
            event_loop.pump_app_events(Some(Duration::from_millis(10)), &mut app);
            if let Some(err) = app.creation_error.take() {
                return Err(err);
            }
            if app.window.is_some() {
                break;
            }
        }
        let window = app.window.clone().ok_or(PlatformError::WindowCreation {
            details: "event loop never resumed".to_string(),
        })?;
        let size = window.inner_size();

        let mut sym_to_code = HashMap::new();
        for (i, (_, syms)) in KEYCODE_TABLE.iter().enumerate() {
            for &sym in *syms {
                sym_to_code.insert(sym, (i + 8) as u8);
            }
        }

        let surface = window as Arc<dyn WindowSurface + Send + Sync>;
        Ok((
            Self {
                event_loop,
                app,
                sym_to_code,
            },
            surface,
            size.width,
            size.height,
        ))
    }
}

impl EventPump for WinitPump {
    fn next_event(&mut self) -> PlatformEvent {
        loop {
            if let Some(event) = self.app.queue.pop_front() {
                return event;
            }
            let status = self.event_loop.pump_app_events(None, &mut self.app);
            if let PumpStatus::Exit(_) = status {
                return PlatformEvent::Wakeup;
            }
        }
    }

    fn keyboard_state(&self) -> KeyboardState {
        self.app.keyboard
    }

    fn keycode_for(&self, sym: KeySym) -> Option<u8> {
        self.sym_to_code.get(&sym).copied()
    }

    fn capslock_led(&self) -> bool {
        self.app.capslock
    }

    fn waker(&self) -> Box<dyn PumpWaker> {
        Box::new(WinitWaker {
            proxy: self.event_loop.create_proxy(),
        })
    }
}

struct WinitWaker {
    proxy: EventLoopProxy<Wake>,
}

impl PumpWaker for WinitWaker {
    fn wake(&self) {
        // Fails only when the loop is already gone, which is fine.
        let _ = self.proxy.send_event(Wake);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keycode_table_codes_start_at_eight() {
        assert_eq!(code_for_keycode(KeyCode::Backspace), Some(8));
        assert!(code_for_keycode(KeyCode::Fn).is_none());
    }

    #[test]
    fn test_letter_keycode_covers_both_cases() {
        let code = code_for_keycode(KeyCode::KeyA).unwrap();
        let (_, syms) = KEYCODE_TABLE[usize::from(code) - 8];
        assert!(syms.contains(&0x41));
        assert!(syms.contains(&0x61));
    }

    #[test]
    fn test_pump_boxes_into_a_bootstrap_factory() {
        use crate::platform::backend::{PumpBootstrap, PumpFactory};

        // The event loop is not thread-safe, so the bootstrap must accept
        // the pump without one. The closure is never invoked; building the
        // factory is the check.
        let factory: PumpFactory = Box::new(|config: &WindowConfig| {
            let (pump, window, width, height) = WinitPump::start(config)?;
            Ok(PumpBootstrap {
                pump: Box::new(pump),
                window,
                width,
                height,
            })
        });
        drop(factory);
    }

    #[test]
    fn test_pointer_button_mapping() {
        assert_eq!(
            map_pointer_button(MouseButton::Middle),
            Some(PointerButton::Center)
        );
        assert_eq!(map_pointer_button(MouseButton::Other(9)), None);
    }
}
