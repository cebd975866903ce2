//=========================================================================
// Platform Services
//=========================================================================
//
// Everything the application may call on the platform.
//
// Architecture:
//   Game callbacks ──&mut PlatformServices──> TimeService
//                                             DisplayConfig
//                                             InputEventRouter (capture, gestures)
//                                             GamepadManager (read-only)
//                                             Backend (cursor, dialogs, URLs, ...)
//
// State changes that the native side must see (vsync, cursor, gesture
// recognizers) are forwarded to the backend here, after the core state
// is updated.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::path::PathBuf;
use std::time::Duration;

//=== External Dependencies ===============================================

use log::{debug, info};

//=== Internal Dependencies ===============================================

use crate::core::display::DisplayConfig;
use crate::core::gamepad::{GamepadHandle, GamepadManager};
use crate::core::gesture::GestureKind;
use crate::core::input::InputEventRouter;
use crate::core::platform_bridge::{
    Backend, Capabilities, FileDialogRequest, Orientation, SensorValues,
};
use crate::core::time::TimeService;

//=== PlatformServices ====================================================

/// Platform state and native operations available to the application.
pub struct PlatformServices {
    pub(crate) backend: Box<dyn Backend>,
    pub(crate) capabilities: Capabilities,
    pub(crate) time: TimeService,
    pub(crate) display: DisplayConfig,
    pub(crate) router: InputEventRouter,
    pub(crate) gamepads: GamepadManager,
    pub(crate) arguments: Vec<String>,
    pub(crate) poll_budget: Duration,
    pub(crate) shutdown_requested: bool,
}

impl PlatformServices {
    //--- Capabilities -----------------------------------------------------

    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    pub fn has_mouse(&self) -> bool {
        self.capabilities.has_mouse
    }

    pub fn has_accelerometer(&self) -> bool {
        self.capabilities.has_accelerometer
    }

    /// Whether [`signal_shutdown`](Self::signal_shutdown) can end the pump.
    pub fn can_exit(&self) -> bool {
        self.capabilities.can_exit
    }

    //--- Time -------------------------------------------------------------

    /// Milliseconds since pump start (or since the last rebind).
    pub fn absolute_time(&self) -> f64 {
        self.time.absolute_time()
    }

    pub fn set_absolute_time(&mut self, time_ms: f64) {
        self.time.set_absolute_time(time_ms);
    }

    pub fn sleep(&self, ms: u64) {
        self.time.sleep(ms);
    }

    //--- Display ----------------------------------------------------------

    pub fn display(&self) -> &DisplayConfig {
        &self.display
    }

    pub fn display_width(&self) -> u32 {
        self.display.width()
    }

    pub fn display_height(&self) -> u32 {
        self.display.height()
    }

    pub fn is_vsync(&self) -> bool {
        self.display.is_vsync()
    }

    pub fn set_vsync(&mut self, enabled: bool) {
        self.display.set_vsync(enabled);
        self.backend.set_vsync(enabled);
    }

    pub fn is_multi_sampling(&self) -> bool {
        self.display.is_multi_sampling()
    }

    /// Requests multi-sampling; the getter reports whether it took effect.
    pub fn set_multi_sampling(&mut self, enabled: bool) {
        self.display.set_multi_sampling(enabled);
    }

    pub fn is_multi_touch(&self) -> bool {
        self.display.is_multi_touch()
    }

    /// Requests multi-touch; the getter reports whether it took effect.
    pub fn set_multi_touch(&mut self, enabled: bool) {
        self.display.set_multi_touch(enabled);
    }

    /// Presentation hook, delegated to the backend.
    pub fn swap_buffers(&mut self) {
        self.backend.swap_buffers();
    }

    //--- Mouse ------------------------------------------------------------

    /// Enables or disables mouse capture.
    ///
    /// Capturing hides the cursor and switches mouse events to deltas.
    /// Releasing recenters and shows the cursor. No-op without a mouse.
    pub fn set_mouse_captured(&mut self, captured: bool) {
        if !self.capabilities.has_mouse {
            debug!(target: "platform::input", "No mouse, capture request ignored");
            return;
        }

        let center = self.display.center();
        if !self.router.set_mouse_captured(captured, center) {
            return;
        }

        debug!(target: "platform::input", "Mouse captured: {}", captured);
        self.backend.set_cursor_captured(captured);
        self.backend.set_cursor_visible(!captured);
        if !captured {
            self.backend.warp_cursor(center.0, center.1);
        }
    }

    pub fn is_mouse_captured(&self) -> bool {
        self.router.capture().is_captured()
    }

    /// Shows or hides the cursor; ignored while captured.
    pub fn set_cursor_visible(&mut self, visible: bool) {
        if self.router.set_cursor_visible(visible) {
            self.backend.set_cursor_visible(visible);
        }
    }

    pub fn is_cursor_visible(&self) -> bool {
        self.router.capture().is_cursor_visible()
    }

    //--- Sensors ----------------------------------------------------------

    /// Device orientation; zeroed without an accelerometer.
    pub fn accelerometer_values(&mut self) -> Orientation {
        if !self.capabilities.has_accelerometer {
            return Orientation::default();
        }
        self.backend.accelerometer().unwrap_or_default()
    }

    /// Raw sensor readings; zeroed where unsupported.
    pub fn sensor_values(&mut self) -> SensorValues {
        self.backend.sensors().unwrap_or_default()
    }

    //--- Gestures ---------------------------------------------------------

    pub fn is_gesture_supported(&self, kind: GestureKind) -> bool {
        self.router.gestures().is_supported(kind)
    }

    /// Registers a gesture kind for delivery (idempotent).
    ///
    /// Registration does not depend on support; native recognition is
    /// only switched on for kinds the backend supports.
    pub fn register_gesture(&mut self, kind: GestureKind) {
        if self.router.gestures_mut().register(kind) {
            debug!(target: "platform::input", "Gesture {:?} registered", kind);
            if self.is_gesture_supported(kind) {
                self.backend.set_gesture_recognition(kind, true);
            }
        }
    }

    /// Unregisters a gesture kind (idempotent).
    pub fn unregister_gesture(&mut self, kind: GestureKind) {
        if self.router.gestures_mut().unregister(kind) {
            debug!(target: "platform::input", "Gesture {:?} unregistered", kind);
            if self.is_gesture_supported(kind) {
                self.backend.set_gesture_recognition(kind, false);
            }
        }
    }

    pub fn is_gesture_registered(&self, kind: GestureKind) -> bool {
        self.router.gestures().is_registered(kind)
    }

    //--- Gamepads ---------------------------------------------------------

    /// Connected gamepads (read-only).
    pub fn gamepads(&self) -> &GamepadManager {
        &self.gamepads
    }

    /// Polls one gamepad through the backend; `false` if unknown, not
    /// pollable or unchanged.
    pub(crate) fn poll_gamepad_state(&mut self, handle: GamepadHandle) -> bool {
        match self.backend.gamepad_poller() {
            Some(poller) => self.gamepads.poll_gamepad_state(handle, poller, self.poll_budget),
            None => false,
        }
    }

    /// Polls every gamepad on backends that require it.
    pub(crate) fn poll_gamepads(&mut self) -> usize {
        if !self.capabilities.gamepad_polling {
            return 0;
        }
        match self.backend.gamepad_poller() {
            Some(poller) => self.gamepads.poll_all(poller, self.poll_budget),
            None => 0,
        }
    }

    //--- Process ----------------------------------------------------------

    /// Command-line arguments; empty where the OS provides none.
    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    /// Shows or hides the virtual keyboard, where supported.
    pub fn display_keyboard(&mut self, display: bool) {
        self.backend.display_keyboard(display);
    }

    /// Shows a native file dialog; `None` means the user cancelled (or
    /// no dialog is available).
    pub fn display_file_dialog(&mut self, request: &FileDialogRequest) -> Option<PathBuf> {
        self.backend.display_file_dialog(request)
    }

    /// Opens `url` in an external browser.
    pub fn launch_url(&mut self, url: &str) -> bool {
        self.backend.launch_url(url)
    }

    //--- Shutdown ---------------------------------------------------------

    /// Requests termination of the message pump.
    ///
    /// Always accepted. Where [`can_exit`](Self::can_exit) is `false` the
    /// pump keeps running until the OS terminates the process.
    pub fn signal_shutdown(&mut self) {
        if self.shutdown_requested {
            return;
        }
        self.shutdown_requested = true;

        if self.capabilities.can_exit {
            info!(target: "platform::pump", "Shutdown requested");
            self.backend.request_exit();
        } else {
            info!(
                target: "platform::pump",
                "Shutdown requested; backend forbids programmatic exit, waiting for OS"
            );
        }
    }

    pub fn is_shutdown_requested(&self) -> bool {
        self.shutdown_requested
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
