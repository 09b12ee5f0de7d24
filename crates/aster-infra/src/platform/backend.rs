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

//! The desktop platform backend.
//!
//! Owns the window, the swapchain, and a dedicated input thread that
//! blocks on the event pump and maintains the lock-free input snapshot.
//! The main thread drives the frame through `step_begin`, `step_end`, and
//! `present`.

use super::keymap;
use super::snapshot::InputSnapshot;
use aster_core::input::{Key, TrackingProvider};
use aster_core::platform::{
    EventPump, PlatformError, PlatformEvent, PumpWaker, SurfaceHandle, WindowConfig,
};
use aster_core::renderer::{
    DepthFormat, GraphicsBackend, RenderQueue, SwapchainDescriptor, SwapchainId, TexFormat,
};
use aster_systems::RenderGlobals;
use std::sync::Arc;
use std::thread::JoinHandle;

/// What a pump factory returns: the pump itself plus the window surface it
/// created and that window's initial inner size.
pub struct PumpBootstrap {
    /// The event pump. Created on the input thread by the factory and
    /// never leaving it, so it needs no thread-safety bound; only the
    /// factory closure and the waker cross threads.
    pub pump: Box<dyn EventPump>,
    /// The window surface, handed back to the main thread for swapchain
    /// creation.
    pub window: SurfaceHandle,
    /// Initial inner width.
    pub width: u32,
    /// Initial inner height.
    pub height: u32,
}

/// Creates the pump on the input thread. Runs exactly once, on that
/// thread, because event loops must live where they are polled.
pub type PumpFactory =
    Box<dyn FnOnce(&WindowConfig) -> Result<PumpBootstrap, PlatformError> + Send>;

/// A frame-relevant signal forwarded from the input thread to the main
/// thread, applied at the next `step_begin`.
enum PumpSignal {
    Resized { width: u32, height: u32 },
    Quit,
}

/// What the input thread hands back once its pump is running.
struct Bootstrapped {
    window: SurfaceHandle,
    waker: Box<dyn PumpWaker>,
    width: u32,
    height: u32,
}

/// The desktop backend: window, swapchain, input thread, render globals.
pub struct DesktopBackend {
    snapshot: Arc<InputSnapshot>,
    signals: flume::Receiver<PumpSignal>,
    waker: Box<dyn PumpWaker>,
    thread: Option<JoinHandle<()>>,
    window: Option<SurfaceHandle>,
    window_taken_by_xr: bool,
    swapchain: SwapchainId,
    swapchain_size: (u32, u32),
    globals: RenderGlobals,
    quit_requested: bool,
}

impl std::fmt::Debug for DesktopBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DesktopBackend")
            .field("swapchain", &self.swapchain)
            .field("swapchain_size", &self.swapchain_size)
            .field("window_taken_by_xr", &self.window_taken_by_xr)
            .field("quit_requested", &self.quit_requested)
            .finish_non_exhaustive()
    }
}

impl DesktopBackend {
    /// Starts the backend: spawns the input thread, waits for its pump
    /// bootstrap, and creates the swapchain on the resulting window.
    ///
    /// Fatal here, by contract: a failed display connection, window
    /// creation, or swapchain setup aborts startup and propagates.
    pub fn start(
        gfx: &mut dyn GraphicsBackend,
        config: WindowConfig,
        factory: PumpFactory,
    ) -> Result<Self, PlatformError> {
        let snapshot = Arc::new(InputSnapshot::new());
        let (boot_tx, boot_rx) = flume::bounded::<Result<Bootstrapped, PlatformError>>(1);
        let (signal_tx, signal_rx) = flume::unbounded();

        let thread_snapshot = snapshot.clone();
        let thread = std::thread::Builder::new()
            .name("aster-platform-input".to_string())
            .spawn(move || {
                let mut bootstrap = match factory(&config) {
                    Ok(bootstrap) => bootstrap,
                    Err(err) => {
                        let _ = boot_tx.send(Err(err));
                        return;
                    }
                };
                let handoff = Bootstrapped {
                    window: bootstrap.window.clone(),
                    waker: bootstrap.pump.waker(),
                    width: bootstrap.width,
                    height: bootstrap.height,
                };
                if boot_tx.send(Ok(handoff)).is_err() {
                    return;
                }
                pump_loop(bootstrap.pump.as_mut(), &thread_snapshot, &signal_tx);
                log::debug!("Input thread exiting");
            })
            .map_err(PlatformError::ThreadSpawn)?;

        let booted = match boot_rx.recv() {
            Ok(result) => result?,
            Err(_) => return Err(PlatformError::BootstrapFailed),
        };

        let descriptor = SwapchainDescriptor {
            width: booted.width,
            height: booted.height,
            color_format: TexFormat::Rgba32Linear,
            depth_format: DepthFormat::Depth16,
        };
        let swapchain = match gfx.create_swapchain(booted.window.clone(), &descriptor) {
            Ok(id) => id,
            Err(err) => {
                // Fatal; stop the pump before propagating so the input
                // thread is not left blocking forever.
                booted.waker.wake();
                let _ = thread.join();
                return Err(err.into());
            }
        };

        let mut globals = RenderGlobals::new();
        globals.update_projection(booted.width, booted.height);
        log::info!(
            "Desktop backend started at {}x{}",
            booted.width,
            booted.height
        );

        Ok(Self {
            snapshot,
            signals: signal_rx,
            waker: booted.waker,
            thread: Some(thread),
            window: Some(booted.window),
            window_taken_by_xr: false,
            swapchain,
            swapchain_size: (booted.width, booted.height),
            globals,
            quit_requested: false,
        })
    }

    /// Applies signals from the input thread: swapchain resizes and quit
    /// requests. Called at the top of each frame.
    pub fn step_begin(&mut self, gfx: &mut dyn GraphicsBackend) -> Result<(), PlatformError> {
        let pending: Vec<PumpSignal> = self.signals.try_iter().collect();
        for signal in pending {
            match signal {
                PumpSignal::Resized { width, height } => self.apply_resize(gfx, width, height)?,
                PumpSignal::Quit => self.quit_requested = true,
            }
        }
        Ok(())
    }

    fn apply_resize(
        &mut self,
        gfx: &mut dyn GraphicsBackend,
        width: u32,
        height: u32,
    ) -> Result<(), PlatformError> {
        // Spurious resize events are common during window-manager
        // negotiation; an unchanged size must not recreate backbuffers.
        if (width, height) == self.swapchain_size {
            return Ok(());
        }
        log::debug!(
            "Swapchain resize {}x{} -> {width}x{height}",
            self.swapchain_size.0,
            self.swapchain_size.1
        );
        gfx.resize_swapchain(self.swapchain, width, height)?;
        self.swapchain_size = (width, height);
        self.globals.update_projection(width, height);
        Ok(())
    }

    /// Ends the frame: binds and clears the swapchain, refreshes predicted
    /// poses, draws the queue, and leaves the queue empty for the next
    /// frame.
    pub fn step_end(
        &mut self,
        gfx: &mut dyn GraphicsBackend,
        tracking: &mut dyn TrackingProvider,
        queue: &mut RenderQueue,
    ) {
        gfx.begin_frame();
        gfx.bind_swapchain(self.swapchain, self.globals.clear_color);
        tracking.update_predicted();
        gfx.draw_pass(&self.globals.view_matrix(), &self.globals.projection(), queue);
        queue.clear();
    }

    /// Presents the frame.
    pub fn present(&mut self, gfx: &mut dyn GraphicsBackend) {
        gfx.present(self.swapchain);
    }

    /// Returns whether the user asked to close the window or the process
    /// received a termination signal.
    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Returns whether `key` is pressed in the current input snapshot.
    pub fn key_down(&self, key: Key) -> bool {
        self.snapshot.key_down(key)
    }

    /// Returns the cursor position in window coordinates.
    pub fn cursor(&self) -> (i32, i32) {
        self.snapshot.cursor()
    }

    /// Returns the total accumulated scroll in detents.
    pub fn scroll(&self) -> i32 {
        self.snapshot.scroll()
    }

    /// Returns a shared handle to the input snapshot.
    pub fn snapshot(&self) -> Arc<InputSnapshot> {
        self.snapshot.clone()
    }

    /// Returns the backend's window surface.
    pub fn window(&self) -> Option<&SurfaceHandle> {
        self.window.as_ref()
    }

    /// The render globals the frame is drawn with.
    pub fn globals(&self) -> &RenderGlobals {
        &self.globals
    }

    /// Mutable access to the render globals.
    pub fn globals_mut(&mut self) -> &mut RenderGlobals {
        &mut self.globals
    }

    /// Records that an XR session has taken ownership of the window's
    /// lifetime; shutdown will no longer drop it.
    pub fn notify_xr_took_window(&mut self) {
        self.window_taken_by_xr = true;
    }

    /// Shuts the backend down: stops the input thread, destroys the
    /// swapchain, and releases the backend's window handle. The window
    /// itself is destroyed by whichever owner drops last, so an XR
    /// session holding its own handle keeps it alive past shutdown.
    pub fn shutdown(mut self, gfx: &mut dyn GraphicsBackend) {
        self.stop_input_thread();
        gfx.destroy_swapchain(self.swapchain);
        if self.window_taken_by_xr {
            log::debug!("Window lifetime handed to the XR session");
        }
        self.window = None;
    }

    fn stop_input_thread(&mut self) {
        if let Some(thread) = self.thread.take() {
            self.waker.wake();
            if thread.join().is_err() {
                log::error!("Input thread panicked during shutdown");
            }
        }
    }
}

impl Drop for DesktopBackend {
    fn drop(&mut self) {
        self.stop_input_thread();
    }
}

/// The input thread's main loop: block on the pump, fold events into the
/// snapshot, and re-derive the full keyboard state every iteration.
fn pump_loop(
    pump: &mut dyn EventPump,
    snapshot: &InputSnapshot,
    signals: &flume::Sender<PumpSignal>,
) {
    loop {
        match pump.next_event() {
            PlatformEvent::Keyboard => {}
            PlatformEvent::PointerPressed(button) => {
                snapshot.set_key(keymap::pointer_key(button), true);
            }
            PlatformEvent::PointerReleased(button) => {
                snapshot.set_key(keymap::pointer_key(button), false);
            }
            PlatformEvent::Scroll(detents) => snapshot.add_scroll(detents),
            PlatformEvent::PointerMoved { x, y } => snapshot.set_cursor(x, y),
            PlatformEvent::Resized { width, height } => {
                let _ = signals.send(PumpSignal::Resized { width, height });
            }
            PlatformEvent::CloseRequested => {
                let _ = signals.send(PumpSignal::Quit);
            }
            PlatformEvent::Wakeup => break,
        }
        // Key events carry no identity and releases can be delivered to
        // another window, so the whole keyboard snapshot is recomputed
        // from a fresh state query after every event.
        keymap::derive_key_snapshot(&*pump, snapshot);
        snapshot.set_key(Key::CapsLock, pump.capslock_led());
    }
}
