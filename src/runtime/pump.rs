//=========================================================================
// Message Pump
//=========================================================================
//
// Drives the bound application until the backend terminates or a
// permitted shutdown is signaled.
//
// Per iteration (one frame):
//   1. Backend::pump_events()           → native notifications, in order
//   2. GamepadEventCollector            → marshaled gamepad notifications
//   3. GamepadManager::poll_all()       → polling backends only
//   4. Game::frame(elapsed_ms)         (skipped once the native loop ended)
//   5. termination check, then pacing to the target frame rate
//
// `initialize` runs once before the first iteration and `finalize` once
// after the last, regardless of how the pump ended.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::thread;
use std::time::{Duration, Instant};

//=== External Dependencies ===============================================

use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use super::Platform;
use crate::core::application::Game;
use crate::core::platform_bridge::{BackendStatus, NativeEvent};

impl<G: Game> Platform<G> {
    /// Runs the message pump and returns the process exit code.
    ///
    /// The pump runs once per binding; calling it again after it returned
    /// does nothing and returns `0`.
    pub fn enter_message_pump(&mut self) -> i32 {
        if self.initialized {
            warn!(target: "platform::pump", "Message pump already ran for this application");
            return 0;
        }

        info!(
            target: "platform::pump",
            "Entering message pump ({:?}, {:?} per frame)",
            self.services.capabilities.kind, self.frame_duration
        );

        self.services.time.restart();
        self.initialized = true;
        self.game.initialize(&mut self.services);

        let mut native = Vec::with_capacity(64);
        let mut last_frame = self.services.time.absolute_time();
        let mut exit_blocked_logged = false;

        let exit_code = loop {
            let frame_start = Instant::now();

            //--- Native notifications --------------------------------------
            let status = self.services.backend.pump_events(&mut native, Duration::ZERO);
            for event in native.drain(..) {
                self.dispatch_native(event);
            }

            //--- Marshaled gamepad notifications ---------------------------
            if self.collector.collect_frame() > 0 {
                for notification in self.collector.take_batch() {
                    self.gamepad_notification_internal(notification);
                }
            }

            //--- Polled gamepads -------------------------------------------
            self.services.poll_gamepads();

            if let BackendStatus::Terminated(code) = status {
                info!(target: "platform::pump", "Backend terminated (code {})", code);
                break code;
            }

            //--- Frame -----------------------------------------------------
            let now = self.services.time.absolute_time();
            let elapsed_ms = (now - last_frame).max(0.0);
            last_frame = now;
            self.game.frame(&mut self.services, elapsed_ms);

            //--- Termination -----------------------------------------------
            if self.terminated {
                info!(target: "platform::pump", "Terminated by OS");
                break 0;
            }
            if self.services.shutdown_requested {
                if self.services.capabilities.can_exit {
                    info!(target: "platform::pump", "Shutdown signaled by application");
                    break 0;
                }
                if !exit_blocked_logged {
                    debug!(
                        target: "platform::pump",
                        "Shutdown pending until the OS terminates the application"
                    );
                    exit_blocked_logged = true;
                }
            }

            //--- Pacing ----------------------------------------------------
            let spent = frame_start.elapsed();
            if spent < self.frame_duration {
                thread::sleep(self.frame_duration - spent);
            }
        };

        self.finalize();
        info!(target: "platform::pump", "Message pump exited with code {}", exit_code);
        exit_code
    }

    fn dispatch_native(&mut self, event: NativeEvent) {
        match event {
            NativeEvent::Touch { kind, x, y, contact_index } => {
                self.touch_event_internal(kind, x, y, contact_index, false)
            }
            NativeEvent::Key { kind, key } => self.key_event_internal(kind, key),
            NativeEvent::Mouse {
                kind,
                x,
                y,
                wheel_delta,
                touch_fallback,
            } => {
                let consumed = self.mouse_event_internal(kind, x, y, wheel_delta);
                if let (false, Some(touch)) = (consumed, touch_fallback) {
                    self.touch_event_internal(touch, x, y, 0, true);
                }
            }
            NativeEvent::Gesture(gesture) => self.gesture_event_internal(gesture),
            NativeEvent::Resize { width, height } => self.resize_event_internal(width, height),
            NativeEvent::Gamepad(notification) => self.gamepad_notification_internal(notification),
            NativeEvent::Shutdown => self.shutdown_internal(),
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
