//=========================================================================
// Application Binding
//=========================================================================
//
// Callback surface implemented by the application the platform serves.
//
// Architecture:
//   Backend → *_internal entry points → InputEventRouter / GamepadManager
//                                              ↓
//                                         Game callbacks
//
// Exactly one `Game` is bound per process. All callbacks run on the pump
// thread; none may assume parallelism between frames.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::gamepad::GamepadEvent;
use crate::core::gesture::GestureEvent;
use crate::core::input::{KeyEvent, MouseEvent, TouchEvent};
use crate::runtime::PlatformServices;

//=== Game ================================================================

/// Application callbacks driven by the message pump.
///
/// Only [`Game::frame`] is required; every event callback defaults to
/// ignoring the event.
///
/// # Examples
///
/// ```no_run
/// use aetheric_platform::prelude::*;
///
/// struct Demo;
///
/// impl Game for Demo {
///     fn initialize(&mut self, platform: &mut PlatformServices) {
///         platform.register_gesture(GestureKind::Tap);
///     }
///
///     fn frame(&mut self, platform: &mut PlatformServices, _elapsed_ms: f64) {
///         platform.swap_buffers();
///     }
///
///     fn key_event(&mut self, _event: KeyEvent) {}
/// }
/// ```
pub trait Game {
    /// Called once when the pump starts, before the first frame.
    fn initialize(&mut self, _platform: &mut PlatformServices) {}

    /// Per-frame update; `elapsed_ms` is time since the previous frame.
    fn frame(&mut self, platform: &mut PlatformServices, elapsed_ms: f64);

    /// Called once when the pump stops.
    fn finalize(&mut self) {}

    fn touch_event(&mut self, _event: TouchEvent) {}

    fn key_event(&mut self, _event: KeyEvent) {}

    /// Returns `true` if the event was consumed.
    ///
    /// Unconsumed mouse events may be re-delivered as touch events.
    fn mouse_event(&mut self, _event: MouseEvent) -> bool {
        false
    }

    /// Receives only kinds currently registered.
    fn gesture_event(&mut self, _event: GestureEvent) {}

    /// Called when the display dimensions change.
    fn resize_event(&mut self, _width: u32, _height: u32) {}

    fn gamepad_event(&mut self, _event: &GamepadEvent) {}
}

//=========================================================================
// Test Support
//=========================================================================

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Everything a [`RecordingGame`] observed, in delivery order.
    #[derive(Debug, Clone, PartialEq)]
    pub(crate) enum Recorded {
        Initialize,
        Frame,
        Finalize,
        Touch(TouchEvent),
        Key(KeyEvent),
        Mouse(MouseEvent),
        Gesture(GestureEvent),
        Resize(u32, u32),
        Gamepad(GamepadEvent),
    }

    type FrameHook = Box<dyn FnMut(&mut PlatformServices, u32)>;

    /// Game that records every callback.
    #[derive(Default)]
    pub(crate) struct RecordingGame {
        pub(crate) events: Vec<Recorded>,
        pub(crate) consume_mouse: bool,
        pub(crate) frames: u32,
        on_frame: Option<FrameHook>,
    }

    impl RecordingGame {
        pub(crate) fn new() -> Self {
            Self::default()
        }

        /// Runs `hook` at every frame with the zero-based frame number.
        pub(crate) fn on_frame<F>(mut self, hook: F) -> Self
        where
            F: FnMut(&mut PlatformServices, u32) + 'static,
        {
            self.on_frame = Some(Box::new(hook));
            self
        }

        pub(crate) fn gestures(&self) -> Vec<GestureEvent> {
            self.events
                .iter()
                .filter_map(|e| match e {
                    Recorded::Gesture(g) => Some(*g),
                    _ => None,
                })
                .collect()
        }

        pub(crate) fn touches(&self) -> Vec<TouchEvent> {
            self.events
                .iter()
                .filter_map(|e| match e {
                    Recorded::Touch(t) => Some(*t),
                    _ => None,
                })
                .collect()
        }

        pub(crate) fn mice(&self) -> Vec<MouseEvent> {
            self.events
                .iter()
                .filter_map(|e| match e {
                    Recorded::Mouse(m) => Some(*m),
                    _ => None,
                })
                .collect()
        }

        pub(crate) fn gamepad_events(&self) -> Vec<GamepadEvent> {
            self.events
                .iter()
                .filter_map(|e| match e {
                    Recorded::Gamepad(g) => Some(g.clone()),
                    _ => None,
                })
                .collect()
        }

        pub(crate) fn count(&self, wanted: &Recorded) -> usize {
            self.events.iter().filter(|e| *e == wanted).count()
        }
    }

    impl Game for RecordingGame {
        fn initialize(&mut self, _platform: &mut PlatformServices) {
            self.events.push(Recorded::Initialize);
        }

        fn frame(&mut self, platform: &mut PlatformServices, _elapsed_ms: f64) {
            self.events.push(Recorded::Frame);
            if let Some(hook) = self.on_frame.as_mut() {
                hook(platform, self.frames);
            }
            self.frames += 1;
        }

        fn finalize(&mut self) {
            self.events.push(Recorded::Finalize);
        }

        fn touch_event(&mut self, event: TouchEvent) {
            self.events.push(Recorded::Touch(event));
        }

        fn key_event(&mut self, event: KeyEvent) {
            self.events.push(Recorded::Key(event));
        }

        fn mouse_event(&mut self, event: MouseEvent) -> bool {
            self.events.push(Recorded::Mouse(event));
            self.consume_mouse
        }

        fn gesture_event(&mut self, event: GestureEvent) {
            self.events.push(Recorded::Gesture(event));
        }

        fn resize_event(&mut self, width: u32, height: u32) {
            self.events.push(Recorded::Resize(width, height));
        }

        fn gamepad_event(&mut self, event: &GamepadEvent) {
            self.events.push(Recorded::Gamepad(event.clone()));
        }
    }
}
