//=========================================================================
// Platform Runtime
//=========================================================================
//
// Binds one application to one backend and drives it.
//
// Architecture:
//   PlatformBuilder::build(backend, game)
//        ↓
//   Platform<G>
//     ├─ game: G                      (the bound application)
//     ├─ services: PlatformServices   (time, display, router, gamepads, backend)
//     ├─ collector                    (marshaled gamepad notifications)
//     └─ binding guard                (one application per process)
//        ↓
//   Platform::enter_message_pump() → exit code
//
// Backends deliver notifications through the `*_internal` entry points;
// nothing else on `Platform` mutates input or gamepad state.
//
//=========================================================================

//=== Module Declarations =================================================

mod binding;
mod pump;
mod services;

//=== Standard Library Imports ============================================

use std::time::Duration;

//=== External Dependencies ===============================================

use log::{debug, info};

//=== Internal Dependencies ===============================================

use crate::core::application::Game;
use crate::core::display::DisplayConfig;
use crate::core::gamepad::{ButtonMapping, GamepadHandle, GamepadManager};
use crate::core::gesture::{GestureEvent, SwipeDirection};
use crate::core::input::{
    InputEventRouter, KeyCode, KeyEventKind, MouseEventKind, TouchEventKind,
};
use crate::core::platform_bridge::{
    gamepad_channel, Backend, GamepadEventCollector, GamepadNotification, GamepadNotifier,
    PlatformError,
};
use crate::core::time::TimeService;
use binding::ApplicationBinding;

//=== Public API ==========================================================

pub use services::PlatformServices;

//=== PlatformBuilder =====================================================

/// Builder for configuring and binding a [`Platform`].
///
/// # Examples
///
/// ```no_run
/// use aetheric_platform::prelude::*;
/// use aetheric_platform::platform::headless::HeadlessBackend;
///
/// struct Idle;
///
/// impl Game for Idle {
///     fn frame(&mut self, platform: &mut PlatformServices, _elapsed_ms: f64) {
///         platform.signal_shutdown();
///     }
/// }
///
/// let backend = HeadlessBackend::new(Capabilities::desktop());
/// let mut platform = PlatformBuilder::new()
///     .with_display_size(1920, 1080)
///     .with_frame_rate(120)
///     .build(backend, Idle)
///     .expect("no other application bound");
///
/// std::process::exit(platform.enter_message_pump());
/// ```
#[derive(Debug, Clone)]
pub struct PlatformBuilder {
    width: u32,
    height: u32,
    vsync: bool,
    multi_sampling: bool,
    multi_touch: bool,
    frame_rate: u32,
    gamepad_queue_capacity: usize,
    gamepad_poll_budget: Duration,
    arguments: Option<Vec<String>>,
}

impl PlatformBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            width: 1280,
            height: 720,
            vsync: true,
            multi_sampling: false,
            multi_touch: false,
            frame_rate: 60,
            gamepad_queue_capacity: 128,
            gamepad_poll_budget: Duration::from_millis(4),
            arguments: None,
        }
    }

    /// Sets the initial display size in pixels.
    ///
    /// Default: 1280x720
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn with_display_size(mut self, width: u32, height: u32) -> Self {
        assert!(
            width > 0 && height > 0,
            "Display size must be positive, got {}x{}",
            width,
            height
        );
        self.width = width;
        self.height = height;
        self
    }

    /// Default: true
    pub fn with_vsync(mut self, enabled: bool) -> Self {
        self.vsync = enabled;
        self
    }

    /// Requests multi-sampling at startup; ignored if the backend lacks it.
    pub fn with_multi_sampling(mut self, enabled: bool) -> Self {
        self.multi_sampling = enabled;
        self
    }

    /// Requests multi-touch at startup; ignored if the backend lacks it.
    pub fn with_multi_touch(mut self, enabled: bool) -> Self {
        self.multi_touch = enabled;
        self
    }

    /// Sets the target frame rate of the message pump.
    ///
    /// Default: 60
    ///
    /// # Panics
    ///
    /// Panics if `fps == 0`.
    pub fn with_frame_rate(mut self, fps: u32) -> Self {
        assert!(fps > 0, "Frame rate must be positive, got {}", fps);
        self.frame_rate = fps;
        self
    }

    /// Sets the capacity of the cross-thread gamepad notification queue.
    ///
    /// `notify` blocks while the queue is full; `try_notify` drops instead.
    ///
    /// Default: 128
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_gamepad_queue_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Gamepad queue capacity must be positive");
        self.gamepad_queue_capacity = capacity;
        self
    }

    /// Sets the time allowed for a single gamepad poll.
    ///
    /// Default: 4ms
    ///
    /// # Panics
    ///
    /// Panics if `budget` is zero.
    pub fn with_gamepad_poll_budget(mut self, budget: Duration) -> Self {
        assert!(!budget.is_zero(), "Gamepad poll budget must be positive");
        self.gamepad_poll_budget = budget;
        self
    }

    /// Overrides the command-line arguments reported to the application.
    ///
    /// By default the process arguments are used where the backend
    /// exposes a command line.
    pub fn with_arguments<I, S>(mut self, arguments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.arguments = Some(arguments.into_iter().map(Into::into).collect());
        self
    }

    /// Binds `game` to `backend`.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::AlreadyBound`] if another `Platform` is
    /// alive in this process.
    pub fn build<B, G>(self, backend: B, game: G) -> Result<Platform<G>, PlatformError>
    where
        B: Backend + 'static,
        G: Game,
    {
        let binding = ApplicationBinding::acquire()?;
        let mut backend: Box<dyn Backend> = Box::new(backend);
        let capabilities = backend.capabilities().clone();

        let mut display = DisplayConfig::new(&capabilities, self.width, self.height);
        display.set_vsync(self.vsync);
        display.set_multi_sampling(self.multi_sampling);
        display.set_multi_touch(self.multi_touch);
        backend.set_display_size(self.width, self.height);
        backend.set_vsync(display.is_vsync());

        let (notifier, collector) = gamepad_channel(self.gamepad_queue_capacity);
        backend.bind_gamepad_notifier(notifier.clone());

        let arguments = match self.arguments {
            Some(arguments) => arguments,
            None if capabilities.has_arguments => std::env::args().collect(),
            None => Vec::new(),
        };

        info!(
            target: "platform",
            "Building platform ({:?}, {}x{}, {} fps)",
            capabilities.kind, self.width, self.height, self.frame_rate
        );

        let router = InputEventRouter::new(capabilities.gestures);
        let services = PlatformServices {
            backend,
            capabilities,
            time: TimeService::new(),
            display,
            router,
            gamepads: GamepadManager::new(),
            arguments,
            poll_budget: self.gamepad_poll_budget,
            shutdown_requested: false,
        };

        Ok(Platform {
            game,
            services,
            collector,
            notifier,
            frame_duration: Duration::from_secs_f64(1.0 / f64::from(self.frame_rate)),
            terminated: false,
            initialized: false,
            finalized: false,
            _binding: binding,
        })
    }
}

impl Default for PlatformBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Platform ============================================================

/// An application bound to a backend.
///
/// Dropping the platform (or calling [`teardown`](Self::teardown))
/// releases the process-wide binding.
pub struct Platform<G: Game> {
    game: G,
    services: PlatformServices,
    collector: GamepadEventCollector,
    notifier: GamepadNotifier,
    frame_duration: Duration,
    terminated: bool,
    initialized: bool,
    finalized: bool,
    _binding: ApplicationBinding,
}

impl<G: Game> Platform<G> {
    //--- Accessors --------------------------------------------------------

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut G {
        &mut self.game
    }

    pub fn services(&self) -> &PlatformServices {
        &self.services
    }

    pub fn services_mut(&mut self) -> &mut PlatformServices {
        &mut self.services
    }

    /// Sender for gamepad notifications raised on other threads.
    pub fn gamepad_notifier(&self) -> GamepadNotifier {
        self.notifier.clone()
    }

    /// Finalizes the application if the pump initialized it and has not
    /// finalized it yet, releases the binding and hands the application
    /// back.
    pub fn teardown(mut self) -> G {
        self.finalize();
        let Platform { game, .. } = self;
        game
    }

    //--- Input Entry Points -----------------------------------------------

    pub fn touch_event_internal(
        &mut self,
        kind: TouchEventKind,
        x: i32,
        y: i32,
        contact_index: u32,
        actually_mouse: bool,
    ) {
        self.services.router.touch_event_internal(
            &mut self.game,
            &self.services.display,
            kind,
            x,
            y,
            contact_index,
            actually_mouse,
        );
    }

    pub fn key_event_internal(&mut self, kind: KeyEventKind, key: KeyCode) {
        self.services.router.key_event_internal(&mut self.game, kind, key);
    }

    /// Returns whether the application consumed the event.
    pub fn mouse_event_internal(
        &mut self,
        kind: MouseEventKind,
        x: i32,
        y: i32,
        wheel_delta: i32,
    ) -> bool {
        self.services
            .router
            .mouse_event_internal(&mut self.game, kind, x, y, wheel_delta)
    }

    pub fn resize_event_internal(&mut self, width: u32, height: u32) {
        self.services.router.resize_event_internal(
            &mut self.game,
            &mut self.services.display,
            width,
            height,
        );
    }

    //--- Gesture Entry Points ---------------------------------------------

    pub fn gesture_swipe_event_internal(&mut self, x: i32, y: i32, direction: SwipeDirection) {
        self.gesture_event_internal(GestureEvent::Swipe { x, y, direction });
    }

    pub fn gesture_pinch_event_internal(&mut self, x: i32, y: i32, scale: f32) {
        self.gesture_event_internal(GestureEvent::Pinch { x, y, scale });
    }

    pub fn gesture_tap_event_internal(&mut self, x: i32, y: i32) {
        self.gesture_event_internal(GestureEvent::Tap { x, y });
    }

    /// `duration` is in milliseconds.
    pub fn gesture_long_tap_event_internal(&mut self, x: i32, y: i32, duration: f32) {
        self.gesture_event_internal(GestureEvent::LongTap { x, y, duration });
    }

    pub fn gesture_drag_event_internal(&mut self, x: i32, y: i32) {
        self.gesture_event_internal(GestureEvent::Drag { x, y });
    }

    pub fn gesture_drop_event_internal(&mut self, x: i32, y: i32) {
        self.gesture_event_internal(GestureEvent::Drop { x, y });
    }

    pub(crate) fn gesture_event_internal(&mut self, event: GestureEvent) {
        self.services.router.gesture_event_internal(&mut self.game, event);
    }

    //--- Gamepad Entry Points ---------------------------------------------

    pub fn gamepad_event_connected_internal(
        &mut self,
        handle: GamepadHandle,
        button_count: u32,
        joystick_count: u32,
        trigger_count: u32,
        name: &str,
    ) {
        self.services.gamepads.connected(
            &mut self.game,
            handle,
            button_count,
            joystick_count,
            trigger_count,
            name,
        );
    }

    pub fn gamepad_event_disconnected_internal(&mut self, handle: GamepadHandle) {
        self.services.gamepads.disconnected(&mut self.game, handle);
    }

    pub fn gamepad_button_pressed_event_internal(
        &mut self,
        handle: GamepadHandle,
        button: ButtonMapping,
    ) {
        self.services
            .gamepads
            .button_pressed(&mut self.game, handle, button);
    }

    pub fn gamepad_button_released_event_internal(
        &mut self,
        handle: GamepadHandle,
        button: ButtonMapping,
    ) {
        self.services
            .gamepads
            .button_released(&mut self.game, handle, button);
    }

    pub fn gamepad_trigger_changed_event_internal(
        &mut self,
        handle: GamepadHandle,
        index: u32,
        value: f32,
    ) {
        self.services
            .gamepads
            .trigger_changed(&mut self.game, handle, index, value);
    }

    pub fn gamepad_joystick_changed_event_internal(
        &mut self,
        handle: GamepadHandle,
        index: u32,
        x: f32,
        y: f32,
    ) {
        self.services
            .gamepads
            .joystick_changed(&mut self.game, handle, index, x, y);
    }

    /// Re-reads one device through the backend's poller.
    ///
    /// Returns `true` if the stored state was replaced.
    pub fn poll_gamepad_state(&mut self, handle: GamepadHandle) -> bool {
        self.services.poll_gamepad_state(handle)
    }

    pub(crate) fn gamepad_notification_internal(&mut self, notification: GamepadNotification) {
        match notification {
            GamepadNotification::Connected {
                handle,
                button_count,
                joystick_count,
                trigger_count,
                name,
            } => self.gamepad_event_connected_internal(
                handle,
                button_count,
                joystick_count,
                trigger_count,
                &name,
            ),
            GamepadNotification::Disconnected(handle) => {
                self.gamepad_event_disconnected_internal(handle)
            }
            GamepadNotification::ButtonPressed(handle, button) => {
                self.gamepad_button_pressed_event_internal(handle, button)
            }
            GamepadNotification::ButtonReleased(handle, button) => {
                self.gamepad_button_released_event_internal(handle, button)
            }
            GamepadNotification::TriggerChanged { handle, index, value } => {
                self.gamepad_trigger_changed_event_internal(handle, index, value)
            }
            GamepadNotification::JoystickChanged { handle, index, x, y } => {
                self.gamepad_joystick_changed_event_internal(handle, index, x, y)
            }
        }
    }

    //--- Lifecycle Entry Points -------------------------------------------

    /// The OS is terminating the application; the pump finishes the
    /// current frame, finalizes and returns.
    pub fn shutdown_internal(&mut self) {
        debug!(target: "platform::pump", "OS shutdown received");
        self.terminated = true;
    }

    pub(crate) fn finalize(&mut self) {
        if !self.initialized || self.finalized {
            return;
        }
        self.finalized = true;
        self.game.finalize();
        info!(target: "platform", "Application finalized");
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
