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

//! Tests for the desktop backend's input thread and frame orchestration,
//! driven through the headless event pump.

use aster_core::input::{
    ControllerState, HandSource, HandState, Handed, Key, TrackingProvider,
};
use aster_core::platform::{PlatformError, PlatformEvent, WindowConfig};
use aster_core::renderer::{Model, RenderQueue};
use aster_infra::graphics::GfxOp;
use aster_infra::platform::keysym;
use aster_infra::platform::{HeadlessController, HeadlessPump, PumpBootstrap};
use aster_infra::{DesktopBackend, RecordingBackend};
use std::sync::Arc;
use std::time::Duration;

struct NullTracking {
    hand: HandState,
    controller: ControllerState,
}

impl NullTracking {
    fn new() -> Self {
        Self {
            hand: HandState::default(),
            controller: ControllerState::default(),
        }
    }
}

impl TrackingProvider for NullTracking {
    fn hand(&self, _hand: Handed) -> &HandState {
        &self.hand
    }

    fn controller(&self, _hand: Handed) -> &ControllerState {
        &self.controller
    }

    fn hand_source(&self, _hand: Handed) -> HandSource {
        HandSource::None
    }
}

fn start_backend() -> (DesktopBackend, RecordingBackend, HeadlessController) {
    let mut gfx = RecordingBackend::new();
    let (pump, controller) = HeadlessPump::new();
    let factory = Box::new(move |_config: &WindowConfig| {
        Ok(PumpBootstrap {
            pump: Box::new(pump) as _,
            window: HeadlessPump::window(),
            width: 1280,
            height: 720,
        })
    });
    let backend = DesktopBackend::start(&mut gfx, WindowConfig::default(), factory)
        .expect("headless backend must start");
    (backend, gfx, controller)
}

fn wait_for(mut cond: impl FnMut() -> bool) {
    for _ in 0..400 {
        if cond() {
            return;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    panic!("input thread did not reach the expected state in time");
}

/// Delivers a cursor move and waits for it, proving every earlier event
/// on the channel has been processed.
fn sync(backend: &DesktopBackend, controller: &HeadlessController, x: i32) {
    controller.send(PlatformEvent::PointerMoved { x, y: -1 });
    wait_for(|| backend.cursor() == (x, -1));
}

#[test]
fn unchanged_resize_does_not_touch_the_swapchain() {
    let (mut backend, mut gfx, controller) = start_backend();

    controller.send(PlatformEvent::Resized {
        width: 1280,
        height: 720,
    });
    sync(&backend, &controller, 11);
    backend.step_begin(&mut gfx).unwrap();
    assert_eq!(gfx.resize_count(), 0);

    controller.send(PlatformEvent::Resized {
        width: 800,
        height: 600,
    });
    sync(&backend, &controller, 12);
    backend.step_begin(&mut gfx).unwrap();
    assert_eq!(gfx.resize_count(), 1);

    backend.shutdown(&mut gfx);
}

#[test]
fn either_shift_side_activates_the_shift_key() {
    let (backend, mut gfx, controller) = start_backend();

    controller.press_sym(keysym::XK_SHIFT_R);
    wait_for(|| backend.key_down(Key::Shift));
    controller.release_sym(keysym::XK_SHIFT_R);
    wait_for(|| !backend.key_down(Key::Shift));

    controller.press_sym(keysym::XK_SHIFT_L);
    wait_for(|| backend.key_down(Key::Shift));

    backend.shutdown(&mut gfx);
}

#[test]
fn lowercase_symbol_activates_the_letter_key() {
    let (backend, mut gfx, controller) = start_backend();

    // 'w' as typed without shift.
    controller.press_sym(0x77);
    wait_for(|| backend.key_down(Key::W));

    backend.shutdown(&mut gfx);
}

#[test]
fn scroll_detents_accumulate_signed() {
    let (backend, mut gfx, controller) = start_backend();

    controller.send(PlatformEvent::Scroll(120));
    controller.send(PlatformEvent::Scroll(120));
    controller.send(PlatformEvent::Scroll(-120));
    sync(&backend, &controller, 21);
    assert_eq!(backend.scroll(), 120);

    backend.shutdown(&mut gfx);
}

#[test]
fn close_request_raises_quit() {
    let (mut backend, mut gfx, controller) = start_backend();

    controller.send(PlatformEvent::CloseRequested);
    wait_for(|| {
        backend.step_begin(&mut gfx).unwrap();
        backend.quit_requested()
    });

    backend.shutdown(&mut gfx);
}

#[test]
fn silently_dropped_keys_recover_on_next_event() {
    let (backend, mut gfx, controller) = start_backend();

    controller.press_sym(0x77);
    wait_for(|| backend.key_down(Key::W));

    // The release goes to another window: no event arrives, but the next
    // state query no longer shows the key.
    controller.drop_all_keys_silently();
    sync(&backend, &controller, 31);
    assert!(!backend.key_down(Key::W));

    backend.shutdown(&mut gfx);
}

#[test]
fn capslock_latch_is_requeried_every_iteration() {
    let (backend, mut gfx, controller) = start_backend();

    controller.set_capslock(true);
    sync(&backend, &controller, 41);
    assert!(backend.key_down(Key::CapsLock));

    controller.set_capslock(false);
    sync(&backend, &controller, 42);
    assert!(!backend.key_down(Key::CapsLock));

    backend.shutdown(&mut gfx);
}

#[test]
fn pointer_buttons_mirror_into_mouse_keys() {
    use aster_core::platform::PointerButton;
    let (backend, mut gfx, controller) = start_backend();

    controller.send(PlatformEvent::PointerPressed(PointerButton::Left));
    wait_for(|| backend.key_down(Key::MouseLeft));
    controller.send(PlatformEvent::PointerReleased(PointerButton::Left));
    wait_for(|| !backend.key_down(Key::MouseLeft));

    backend.shutdown(&mut gfx);
}

#[test]
fn frame_orchestration_binds_draws_and_presents_in_order() {
    let (mut backend, mut gfx, _controller) = start_backend();
    let mut tracking = NullTracking::new();
    let mut queue = RenderQueue::new();
    queue.add_model(
        aster_core::asset::AssetHandle::new(Model::placeholder("test/model")),
        aster_core::math::Mat4::IDENTITY,
    );

    backend.step_begin(&mut gfx).unwrap();
    backend.step_end(&mut gfx, &mut tracking, &mut queue);
    backend.present(&mut gfx);

    assert!(queue.is_empty());
    let tail: Vec<&GfxOp> = gfx.ops().iter().rev().take(4).collect();
    assert!(matches!(tail[3], GfxOp::BeginFrame));
    assert!(matches!(tail[2], GfxOp::BindSwapchain(..)));
    assert!(matches!(tail[1], GfxOp::DrawPass(1)));
    assert!(matches!(tail[0], GfxOp::Present(_)));

    backend.shutdown(&mut gfx);
}

#[test]
fn shutdown_stops_the_thread_and_destroys_the_swapchain() {
    let (backend, mut gfx, _controller) = start_backend();
    backend.shutdown(&mut gfx);
    assert!(matches!(
        gfx.ops().last(),
        Some(GfxOp::DestroySwapchain(_))
    ));
}

#[test]
fn shutdown_releases_the_window_handle_even_when_xr_owns_it() {
    let mut gfx = RecordingBackend::new();
    let (pump, _controller) = HeadlessPump::new();
    let window = HeadlessPump::window();
    let session_window = window.clone();
    let factory = Box::new(move |_config: &WindowConfig| {
        Ok(PumpBootstrap {
            pump: Box::new(pump) as _,
            window,
            width: 1280,
            height: 720,
        })
    });
    let mut backend = DesktopBackend::start(&mut gfx, WindowConfig::default(), factory)
        .expect("headless backend must start");

    backend.notify_xr_took_window();
    backend.shutdown(&mut gfx);

    // The session's clone is now the sole owner; the window is destroyed
    // whenever the session drops it, not leaked.
    assert_eq!(Arc::strong_count(&session_window), 1);
}

#[test]
fn rejected_swapchain_config_fails_start_and_stops_the_thread() {
    let mut gfx = RecordingBackend::new();
    gfx.reject_swapchain_configs();
    let (pump, _controller) = HeadlessPump::new();
    let factory = Box::new(move |_config: &WindowConfig| {
        Ok(PumpBootstrap {
            pump: Box::new(pump) as _,
            window: HeadlessPump::window(),
            width: 1280,
            height: 720,
        })
    });

    let err = DesktopBackend::start(&mut gfx, WindowConfig::default(), factory)
        .expect_err("start must fail without a usable config");
    assert!(matches!(err, PlatformError::NoFramebufferConfig));
}
