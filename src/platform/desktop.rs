//=========================================================================
// Desktop Backend
//=========================================================================
//
// Winit-based backend for Windows, macOS and Linux.
//
// Architecture:
// ```text
//  Pump Thread (main):
//  ┌────────────────────────────────────────────┐
//  │  Platform::enter_message_pump()            │
//  │   ↓                                        │
//  │  DesktopBackend::pump_events()             │
//  │   ├─ EventLoop::pump_app_events()          │
//  │   │    ↓                                   │
//  │   │  DesktopApp (ApplicationHandler)       │
//  │   │   ├─ InputProcessor (Winit → Native)   │
//  │   │   └─ pending: Vec<NativeEvent>         │
//  │   ├─ GilrsGamepads::drain() [gilrs]        │
//  │   └─ pending → caller, in order            │
//  └────────────────────────────────────────────┘
// ```
//
// Notes:
// - The window is created lazily on the first `resumed()` with the
//   display size requested at bind time; its actual size is reported as
//   a resize.
// - Winit requires the event loop on the main thread (macOS), so the
//   pump must run there.
// - Close requests end the loop; the pump sees `Terminated(0)`.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::path::PathBuf;
use std::time::Duration;

//=== External Crates =====================================================

use log::*;
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalPosition},
    event::{DeviceEvent, DeviceId, TouchPhase, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    platform::pump_events::{EventLoopExtPumpEvents, PumpStatus},
    window::{CursorGrabMode, Window, WindowAttributes, WindowId},
};

//=== Internal Imports ====================================================

use super::input_processor::InputProcessor;
use crate::core::gesture::{GestureEvent, GestureKind, GestureSet};
use crate::core::platform_bridge::{
    Backend, BackendStatus, Capabilities, FileDialogRequest, NativeEvent, PlatformError,
};

#[cfg(feature = "gilrs")]
use super::gilrs_gamepads::GilrsGamepads;

//=== DesktopBackend ======================================================

/// Window and input backend for desktop operating systems.
///
/// # Thread Safety
///
/// This type is NOT Send/Sync; create it and run the pump on the main
/// thread.
pub struct DesktopBackend {
    capabilities: Capabilities,
    event_loop: EventLoop<()>,
    app: DesktopApp,

    #[cfg(feature = "gilrs")]
    gamepads: Option<GilrsGamepads>,
}

impl DesktopBackend {
    //--- Construction -----------------------------------------------------

    /// Creates the event loop; the window follows on the first pump.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::EventLoopCreation`] if the OS refuses an
    /// event loop (no display server, or called twice in one process).
    pub fn new(title: impl Into<String>) -> Result<Self, PlatformError> {
        let event_loop =
            EventLoop::new().map_err(|e| PlatformError::EventLoopCreation(e.to_string()))?;

        let mut capabilities = Capabilities::desktop();
        if cfg!(target_os = "macos") {
            capabilities.gestures = GestureSet::of(&[GestureKind::Pinch]);
        }

        info!(target: "platform", "Desktop backend initialized");
        Ok(Self {
            capabilities,
            event_loop,
            app: DesktopApp::new(title.into()),

            #[cfg(feature = "gilrs")]
            gamepads: GilrsGamepads::new(),
        })
    }
}

impl Backend for DesktopBackend {
    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    fn pump_events(&mut self, events: &mut Vec<NativeEvent>, timeout: Duration) -> BackendStatus {
        let status = self.event_loop.pump_app_events(Some(timeout), &mut self.app);
        events.append(&mut self.app.pending);

        #[cfg(feature = "gilrs")]
        if let Some(gamepads) = self.gamepads.as_mut() {
            gamepads.drain(events);
        }

        match status {
            PumpStatus::Continue => BackendStatus::Continue,
            PumpStatus::Exit(code) => {
                info!(target: "platform", "Event loop exited (code {})", code);
                BackendStatus::Terminated(code)
            }
        }
    }

    fn set_display_size(&mut self, width: u32, height: u32) {
        self.app.requested_size = (width, height);
    }

    fn swap_buffers(&mut self) {
        if let Some(window) = &self.app.window {
            window.pre_present_notify();
            window.request_redraw();
        }
    }

    fn set_vsync(&mut self, enabled: bool) {
        // Presentation mode belongs to the renderer's surface.
        debug!(target: "platform", "VSync preference: {}", enabled);
    }

    fn set_cursor_visible(&mut self, visible: bool) {
        if let Some(window) = &self.app.window {
            window.set_cursor_visible(visible);
        }
    }

    fn set_cursor_captured(&mut self, captured: bool) {
        let center = self.app.center();
        self.app.processor.set_captured(captured, center);

        let Some(window) = &self.app.window else {
            return;
        };
        let result = if captured {
            window
                .set_cursor_grab(CursorGrabMode::Confined)
                .or_else(|_| window.set_cursor_grab(CursorGrabMode::Locked))
        } else {
            window.set_cursor_grab(CursorGrabMode::None)
        };
        if let Err(e) = result {
            warn!(target: "platform::input", "Cursor grab change failed: {}", e);
        }
    }

    fn warp_cursor(&mut self, x: i32, y: i32) {
        if let Some(window) = &self.app.window {
            if let Err(e) = window.set_cursor_position(PhysicalPosition::new(x, y)) {
                debug!(target: "platform::input", "Cursor warp unsupported: {}", e);
            }
        }
    }

    fn set_gesture_recognition(&mut self, kind: GestureKind, enabled: bool) {
        if enabled {
            self.app.recognized.insert(kind);
        } else {
            self.app.recognized.remove(kind);
        }
    }

    fn display_keyboard(&mut self, display: bool) {
        if let Some(window) = &self.app.window {
            window.set_ime_allowed(display);
        }
    }

    #[cfg(feature = "file-dialog")]
    fn display_file_dialog(&mut self, request: &FileDialogRequest) -> Option<PathBuf> {
        use crate::core::platform_bridge::FileDialogMode;

        let directory = request.initial_directory.clone().or_else(|| {
            std::env::current_exe()
                .ok()
                .and_then(|exe| exe.parent().map(PathBuf::from))
        });

        let mut dialog = rfd::FileDialog::new().set_title(request.title.as_str());
        if !request.filter_extensions.is_empty() {
            dialog = dialog.add_filter(
                request.filter_description.as_str(),
                request.filter_extensions.as_slice(),
            );
        }
        if let Some(directory) = directory {
            dialog = dialog.set_directory(directory);
        }

        let selection = match request.mode {
            FileDialogMode::Open => dialog.pick_file(),
            FileDialogMode::Save => dialog.save_file(),
        };
        debug!(target: "platform", "File dialog '{}' returned {:?}", request.title, selection);
        selection
    }

    #[cfg(not(feature = "file-dialog"))]
    fn display_file_dialog(&mut self, request: &FileDialogRequest) -> Option<PathBuf> {
        debug!(
            target: "platform",
            "File dialog '{}' unavailable (built without `file-dialog`)",
            request.title
        );
        None
    }

    fn launch_url(&mut self, url: &str) -> bool {
        match open::that(url) {
            Ok(()) => true,
            Err(e) => {
                warn!(target: "platform", "Failed to launch '{}': {}", url, e);
                false
            }
        }
    }

    fn request_exit(&mut self) {
        self.app.exit_requested = true;
    }
}

//=== DesktopApp ==========================================================

/// Winit application state; collects native notifications while the
/// event loop is pumped.
struct DesktopApp {
    title: String,
    requested_size: (u32, u32),
    window: Option<Window>,
    processor: InputProcessor,
    recognized: GestureSet,
    pending: Vec<NativeEvent>,
    exit_requested: bool,
}

impl DesktopApp {
    fn new(title: String) -> Self {
        Self {
            title,
            requested_size: (1280, 720),
            window: None,
            processor: InputProcessor::new(),
            recognized: GestureSet::EMPTY,
            pending: Vec::with_capacity(64),
            exit_requested: false,
        }
    }

    fn center(&self) -> (i32, i32) {
        let (width, height) = match &self.window {
            Some(window) => {
                let size = window.inner_size();
                (size.width, size.height)
            }
            None => self.requested_size,
        };
        ((width / 2) as i32, (height / 2) as i32)
    }

    fn push_resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            trace!(target: "platform", "Zero-sized resize ignored (minimized)");
            return;
        }
        self.pending.push(NativeEvent::Resize { width, height });
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for DesktopApp {
    /// Called when the app becomes active (startup or mobile resume).
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (resume)");
            return;
        }

        let (width, height) = self.requested_size;
        let attrs = WindowAttributes::default()
            .with_title(self.title.as_str())
            .with_inner_size(LogicalSize::new(width, height));

        match event_loop.create_window(attrs) {
            Ok(window) => {
                let size = window.inner_size();
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    size.width,
                    size.height,
                    window.scale_factor()
                );
                window.request_redraw();
                self.window = Some(window);
                self.push_resize(size.width, size.height);
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                self.pending.push(NativeEvent::Shutdown);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                event_loop.exit();
            }

            WindowEvent::Resized(size) => self.push_resize(size.width, size.height),

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                self.processor.process_key(
                    key_event.physical_key,
                    key_event.state,
                    key_event.text.as_deref(),
                    &mut self.pending,
                );
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.processor
                    .process_cursor_moved(position.x, position.y, &mut self.pending);
            }

            WindowEvent::MouseInput { state, button, .. } => {
                self.processor
                    .process_mouse_button(button, state, &mut self.pending);
            }

            WindowEvent::MouseWheel { delta, .. } => {
                self.processor.process_wheel(delta, &mut self.pending);
            }

            WindowEvent::Touch(touch) => {
                self.processor.process_touch(
                    touch.id,
                    touch.phase,
                    touch.location.x,
                    touch.location.y,
                    &mut self.pending,
                );
            }

            WindowEvent::PinchGesture { delta, phase, .. } => {
                if !self.recognized.contains(GestureKind::Pinch) || phase != TouchPhase::Moved {
                    return;
                }
                let (x, y) = self.processor.cursor();
                self.pending.push(NativeEvent::Gesture(GestureEvent::Pinch {
                    x,
                    y,
                    scale: 1.0 + delta as f32,
                }));
            }

            WindowEvent::RedrawRequested => {
                trace!(target: "platform", "Redraw requested");
            }

            _ => {
                // Ignore: Focused, Moved, ScaleFactorChanged, etc.
            }
        }
    }

    fn device_event(&mut self, _event_loop: &ActiveEventLoop, _device_id: DeviceId, event: DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event {
            self.processor.process_mouse_motion(dx, dy, &mut self.pending);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            debug!(target: "platform", "Exiting event loop on application request");
            event_loop.exit();
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_starts_without_window() {
        let app = DesktopApp::new("Test".into());
        assert!(app.window.is_none(), "Window should be created lazily");
        assert!(app.pending.is_empty());
    }

    #[test]
    fn center_uses_requested_size_before_window_exists() {
        let mut app = DesktopApp::new("Test".into());
        app.requested_size = (800, 600);
        assert_eq!(app.center(), (400, 300));
    }

    #[test]
    fn zero_sized_resize_is_dropped() {
        let mut app = DesktopApp::new("Test".into());
        app.push_resize(0, 600);
        app.push_resize(800, 600);
        assert_eq!(app.pending, vec![NativeEvent::Resize { width: 800, height: 600 }]);
    }
}
