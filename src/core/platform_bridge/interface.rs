//=========================================================================
// Platform Bridge Interface
//=========================================================================
//
// Contract between concrete backends and the core.
//
// Backends own the OS-specific plumbing (windows, message queues, device
// drivers). The core depends only on this module:
// - `Backend`: the polymorphic backend trait
// - `Capabilities`: static description of what a backend can do
// - `NativeEvent`: raw notifications produced while pumping
// - `GamepadNotification`: hotplug/state notifications, possibly from
//   another thread
// - `PlatformError`: construction failures
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::path::PathBuf;
use std::time::Duration;

//=== External Dependencies ===============================================

use thiserror::Error;

//=== Internal Dependencies ===============================================

use super::event_collector::GamepadNotifier;
use crate::core::gamepad::{ButtonMapping, GamepadHandle, GamepadPoller};
use crate::core::gesture::{GestureEvent, GestureKind, GestureSet};
use crate::core::input::{KeyCode, KeyEventKind, MouseEventKind, TouchEventKind};

//=== BackendKind =========================================================

/// Family of native platform a backend targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// Windowed desktop OS with mouse and keyboard.
    Desktop,

    /// Touch-first sandboxed OS.
    Mobile,

    /// Fixed-function device driven by gamepads.
    Console,
}

//=== Capabilities ========================================================

/// Static capability descriptor reported by a backend.
///
/// Absent capabilities surface as `false`, zeroed values or ignored
/// requests, never as errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capabilities {
    pub kind: BackendKind,
    pub has_mouse: bool,
    pub has_accelerometer: bool,
    pub multi_touch: bool,
    pub multi_sampling: bool,

    /// Whether the application may terminate the pump itself.
    pub can_exit: bool,

    /// Whether the OS exposes a command line.
    pub has_arguments: bool,

    /// Whether gamepad state must be polled each frame.
    pub gamepad_polling: bool,

    /// Gesture kinds the backend can recognize.
    pub gestures: GestureSet,
}

impl Capabilities {
    pub fn desktop() -> Self {
        Self {
            kind: BackendKind::Desktop,
            has_mouse: true,
            has_accelerometer: false,
            multi_touch: false,
            multi_sampling: true,
            can_exit: true,
            has_arguments: true,
            gamepad_polling: false,
            gestures: GestureSet::EMPTY,
        }
    }

    pub fn mobile() -> Self {
        Self {
            kind: BackendKind::Mobile,
            has_mouse: false,
            has_accelerometer: true,
            multi_touch: true,
            multi_sampling: true,
            can_exit: false,
            has_arguments: false,
            gamepad_polling: false,
            gestures: GestureSet::ALL,
        }
    }

    pub fn console() -> Self {
        Self {
            kind: BackendKind::Console,
            has_mouse: false,
            has_accelerometer: false,
            multi_touch: false,
            multi_sampling: false,
            can_exit: true,
            has_arguments: false,
            gamepad_polling: true,
            gestures: GestureSet::EMPTY,
        }
    }
}

//=== Sensor Records ======================================================

/// Device orientation derived from the accelerometer (degrees).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Orientation {
    pub pitch: f32,
    pub roll: f32,
}

/// Raw accelerometer and gyroscope readings.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SensorValues {
    pub accel: [f32; 3],
    pub gyro: [f32; 3],
}

//=== File Dialog =========================================================

/// Whether a file dialog opens an existing file or picks a save target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileDialogMode {
    Open,
    Save,
}

/// Parameters for a native file dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDialogRequest {
    pub mode: FileDialogMode,
    pub title: String,
    pub filter_description: String,

    /// Extensions without dots, e.g. `["png", "jpg"]`.
    pub filter_extensions: Vec<String>,

    /// Starting directory; the executable directory when `None`.
    pub initial_directory: Option<PathBuf>,
}

impl FileDialogRequest {
    /// Builds a request from a semicolon-delimited extension list
    /// (`"png;jpg;bmp"`).
    pub fn new(
        mode: FileDialogMode,
        title: impl Into<String>,
        filter_description: impl Into<String>,
        filter_extensions: &str,
    ) -> Self {
        Self {
            mode,
            title: title.into(),
            filter_description: filter_description.into(),
            filter_extensions: filter_extensions
                .split(';')
                .map(|ext| ext.trim().trim_start_matches('.'))
                .filter(|ext| !ext.is_empty())
                .map(str::to_owned)
                .collect(),
            initial_directory: None,
        }
    }

    pub fn with_initial_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.initial_directory = Some(directory.into());
        self
    }
}

//=== GamepadNotification =================================================

/// Raw gamepad notification as produced by a backend.
#[derive(Debug, Clone, PartialEq)]
pub enum GamepadNotification {
    Connected {
        handle: GamepadHandle,
        button_count: u32,
        joystick_count: u32,
        trigger_count: u32,
        name: String,
    },
    Disconnected(GamepadHandle),
    ButtonPressed(GamepadHandle, ButtonMapping),
    ButtonReleased(GamepadHandle, ButtonMapping),
    TriggerChanged { handle: GamepadHandle, index: u32, value: f32 },
    JoystickChanged { handle: GamepadHandle, index: u32, x: f32, y: f32 },
}

//=== NativeEvent =========================================================

/// Raw notification produced by [`Backend::pump_events`].
///
/// The pump feeds each one, in order, to the matching `*_internal`
/// entry point on [`crate::Platform`].
#[derive(Debug, Clone, PartialEq)]
pub enum NativeEvent {
    Touch {
        kind: TouchEventKind,
        x: i32,
        y: i32,
        contact_index: u32,
    },

    Key {
        kind: KeyEventKind,
        key: KeyCode,
    },

    /// Mouse input.
    ///
    /// If the application does not consume the event and `touch_fallback`
    /// is set, the pump re-delivers it as a contact-0 touch event marked
    /// `actually_mouse`.
    Mouse {
        kind: MouseEventKind,
        x: i32,
        y: i32,
        wheel_delta: i32,
        touch_fallback: Option<TouchEventKind>,
    },

    Gesture(GestureEvent),

    Resize {
        width: u32,
        height: u32,
    },

    Gamepad(GamepadNotification),

    /// The OS is terminating the application.
    Shutdown,
}

//=== BackendStatus =======================================================

/// Result of one [`Backend::pump_events`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendStatus {
    Continue,

    /// The native loop has ended; carries the exit code.
    Terminated(i32),
}

//=== Backend =============================================================

/// Polymorphic native backend.
///
/// Every method except [`capabilities`] and [`pump_events`] has a default
/// that treats the feature as absent.
///
/// [`capabilities`]: Backend::capabilities
/// [`pump_events`]: Backend::pump_events
pub trait Backend {
    /// Static capability descriptor.
    fn capabilities(&self) -> &Capabilities;

    /// Services pending native notifications, appending them to `events`
    /// in production order. May wait up to `timeout` for the first one.
    fn pump_events(&mut self, events: &mut Vec<NativeEvent>, timeout: Duration) -> BackendStatus;

    /// Hands the backend a sender for notifications raised off the pump
    /// thread.
    fn bind_gamepad_notifier(&mut self, _notifier: GamepadNotifier) {}

    /// Requested display size at bind time; the backend reports the size
    /// it actually got through `NativeEvent::Resize`.
    fn set_display_size(&mut self, _width: u32, _height: u32) {}

    /// Per-frame presentation hook.
    fn swap_buffers(&mut self) {}

    fn set_vsync(&mut self, _enabled: bool) {}

    fn set_cursor_visible(&mut self, _visible: bool) {}

    fn set_cursor_captured(&mut self, _captured: bool) {}

    /// Moves the OS cursor to window coordinates.
    fn warp_cursor(&mut self, _x: i32, _y: i32) {}

    /// Enables or disables native recognition of a gesture kind.
    fn set_gesture_recognition(&mut self, _kind: GestureKind, _enabled: bool) {}

    /// Shows or hides the virtual keyboard.
    fn display_keyboard(&mut self, _display: bool) {}

    fn accelerometer(&mut self) -> Option<Orientation> {
        None
    }

    fn sensors(&mut self) -> Option<SensorValues> {
        None
    }

    /// Shows a native file dialog; `None` means cancelled or unavailable.
    fn display_file_dialog(&mut self, _request: &FileDialogRequest) -> Option<PathBuf> {
        None
    }

    /// Opens `url` externally; `false` if unavailable or the OS call failed.
    fn launch_url(&mut self, _url: &str) -> bool {
        false
    }

    /// Poller for backends that do not push gamepad deltas.
    fn gamepad_poller(&mut self) -> Option<&mut dyn GamepadPoller> {
        None
    }

    /// Asks the native loop to wind down after a permitted shutdown.
    fn request_exit(&mut self) {}
}

//=== PlatformError =======================================================

/// Platform construction errors.
///
/// Nothing inside the running pump produces these.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// Another application is already bound in this process.
    #[error("an application is already bound to the platform layer")]
    AlreadyBound,

    /// Native event loop creation failed (OS-level issue).
    #[error("event loop creation failed: {0}")]
    EventLoopCreation(String),
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_differ_by_kind() {
        assert_eq!(Capabilities::desktop().kind, BackendKind::Desktop);
        assert_eq!(Capabilities::mobile().kind, BackendKind::Mobile);
        assert_eq!(Capabilities::console().kind, BackendKind::Console);
    }

    #[test]
    fn mobile_cannot_exit_programmatically() {
        assert!(!Capabilities::mobile().can_exit);
        assert!(!Capabilities::mobile().has_arguments);
        assert!(Capabilities::desktop().can_exit);
    }

    #[test]
    fn file_dialog_request_parses_extensions() {
        let request = FileDialogRequest::new(
            FileDialogMode::Open,
            "Select File",
            "Image Files",
            "png; .jpg;;bmp",
        );
        assert_eq!(request.filter_extensions, vec!["png", "jpg", "bmp"]);
        assert!(request.initial_directory.is_none());

        let request = request.with_initial_directory("res");
        assert_eq!(request.initial_directory, Some(PathBuf::from("res")));
    }

    #[test]
    fn platform_error_display_format() {
        assert_eq!(
            PlatformError::AlreadyBound.to_string(),
            "an application is already bound to the platform layer"
        );
        assert_eq!(
            PlatformError::EventLoopCreation("no display".into()).to_string(),
            "event loop creation failed: no display"
        );
    }

    #[test]
    fn platform_error_is_error_trait() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<PlatformError>();
    }
}
