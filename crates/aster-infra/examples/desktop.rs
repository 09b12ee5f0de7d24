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

//! Opens a window, runs the frame loop against the recording graphics
//! backend, and submits simulated hand visuals until the window closes or
//! Esc is pressed.
//!
//! ```sh
//! RUST_LOG=debug cargo run --example desktop
//! ```

use aster_core::input::{
    ButtonState, ControllerState, HandSource, HandState, Handed, Key, TrackingProvider,
};
use aster_core::math::{Pose, Vec3};
use aster_core::platform::WindowConfig;
use aster_core::renderer::RenderQueue;
use aster_core::xr::XrExtensions;
use aster_infra::platform::backend::PumpBootstrap;
use aster_infra::platform::WinitPump;
use aster_infra::{DesktopBackend, RecordingBackend};
use aster_systems::InputVisuals;
use std::time::Duration;

/// Pretends both hands hold a tracked controller at a fixed pose.
struct DemoTracking {
    hand: HandState,
    controllers: [ControllerState; 2],
}

impl DemoTracking {
    fn new() -> Self {
        let mut controllers = [ControllerState::default(); 2];
        for (i, controller) in controllers.iter_mut().enumerate() {
            controller.pose = Pose {
                position: Vec3::new(if i == 0 { -0.2 } else { 0.2 }, 1.3, -0.4),
                ..Pose::IDENTITY
            };
            controller.tracked = ButtonState::ACTIVE;
        }
        Self {
            hand: HandState::default(),
            controllers,
        }
    }
}

impl TrackingProvider for DemoTracking {
    fn hand(&self, _hand: Handed) -> &HandState {
        &self.hand
    }

    fn controller(&self, hand: Handed) -> &ControllerState {
        &self.controllers[hand.index()]
    }

    fn hand_source(&self, _hand: Handed) -> HandSource {
        HandSource::Simulated
    }
}

fn main() {
    env_logger::init();

    let mut gfx = RecordingBackend::new();
    let config = WindowConfig {
        title: "Aster desktop demo".to_string(),
        ..WindowConfig::default()
    };
    let factory = Box::new(|config: &WindowConfig| {
        let (pump, window, width, height) = WinitPump::start(config)?;
        Ok(PumpBootstrap {
            pump: Box::new(pump),
            window,
            width,
            height,
        })
    });

    let mut backend = match DesktopBackend::start(&mut gfx, config, factory) {
        Ok(backend) => backend,
        Err(err) => {
            log::error!("Backend start failed: {err}");
            return;
        }
    };

    let mut visuals = InputVisuals::new(XrExtensions::none());
    let mut tracking = DemoTracking::new();
    let mut queue = RenderQueue::new();

    while !backend.quit_requested() && !backend.key_down(Key::Esc) {
        if let Err(err) = backend.step_begin(&mut gfx) {
            log::error!("Frame begin failed: {err}");
            break;
        }
        visuals.step();
        visuals.submit_step(
            &tracking,
            aster_core::input::AppFocus::Active,
            &mut queue,
        );
        backend.step_end(&mut gfx, &mut tracking, &mut queue);
        backend.present(&mut gfx);
        std::thread::sleep(Duration::from_millis(16));
    }

    visuals.shutdown();
    backend.shutdown(&mut gfx);
    log::info!("Recorded {} backend calls", gfx.ops().len());
}
