//=========================================================================
// Input Event Router
//=========================================================================
//
// Normalizes native input notifications and forwards them to the bound
// application.
//
// Architecture:
//   *_internal(native params)
//        ↓ validate (unidentified keys, secondary contacts w/o multi-touch)
//        ↓ policy   (capture → deltas, gesture registration, resize → display)
//        ↓
//   Game::{touch,key,mouse,gesture,resize}_event
//
// All dispatch is synchronous. Mouse forwarding reports whether the
// application consumed the event; everything else is fire-and-forget.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, trace};

//=== Internal Dependencies ===============================================

use super::event::{
    KeyCode, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind, TouchEvent, TouchEventKind,
};
use super::mouse_capture::MouseCaptureState;
use crate::core::application::Game;
use crate::core::display::DisplayConfig;
use crate::core::gesture::{GestureEvent, GestureRegistry, GestureSet};

//=== InputEventRouter ====================================================

/// Converts native notifications into normalized events and applies
/// capture and gesture-registration policy.
#[derive(Debug, Clone)]
pub struct InputEventRouter {
    gestures: GestureRegistry,
    capture: MouseCaptureState,

    /// Reference point for delta encoding while captured.
    last_mouse: (i32, i32),
}

impl InputEventRouter {
    //--- Construction -----------------------------------------------------

    /// Creates a router for a backend that can recognize `supported`.
    pub fn new(supported: GestureSet) -> Self {
        Self {
            gestures: GestureRegistry::new(supported),
            capture: MouseCaptureState::new(),
            last_mouse: (0, 0),
        }
    }

    //--- State Access -----------------------------------------------------

    pub fn gestures(&self) -> &GestureRegistry {
        &self.gestures
    }

    pub(crate) fn gestures_mut(&mut self) -> &mut GestureRegistry {
        &mut self.gestures
    }

    pub fn capture(&self) -> &MouseCaptureState {
        &self.capture
    }

    /// Toggles capture; `center` becomes the delta reference point.
    ///
    /// Returns `true` if the capture state changed.
    pub(crate) fn set_mouse_captured(&mut self, captured: bool, center: (i32, i32)) -> bool {
        let changed = self.capture.set_captured(captured);
        if changed {
            self.last_mouse = center;
        }
        changed
    }

    pub(crate) fn set_cursor_visible(&mut self, visible: bool) -> bool {
        self.capture.set_cursor_visible(visible)
    }

    //--- Touch ------------------------------------------------------------

    /// Forwards a touch contact.
    ///
    /// Secondary contacts are dropped while multi-touch is disabled.
    pub fn touch_event_internal<G: Game + ?Sized>(
        &mut self,
        game: &mut G,
        display: &DisplayConfig,
        kind: TouchEventKind,
        x: i32,
        y: i32,
        contact_index: u32,
        actually_mouse: bool,
    ) {
        if contact_index != 0 && !display.is_multi_touch() {
            trace!(
                target: "platform::input",
                "Touch contact {} dropped (multi-touch disabled)",
                contact_index
            );
            return;
        }

        trace!(target: "platform::input", "Touch {:?} #{} at ({}, {})", kind, contact_index, x, y);
        game.touch_event(TouchEvent {
            kind,
            x,
            y,
            contact_index,
            actually_mouse,
        });
    }

    //--- Keyboard ---------------------------------------------------------

    /// Forwards a key event; malformed kind/key pairs are dropped.
    pub fn key_event_internal<G: Game + ?Sized>(
        &mut self,
        game: &mut G,
        kind: KeyEventKind,
        key: KeyCode,
    ) {
        let event = KeyEvent { kind, key };
        if !event.is_well_formed() {
            trace!(target: "platform::input", "Malformed key event dropped: {:?}", event);
            return;
        }

        trace!(target: "platform::input", "Key {:?} {:?}", kind, key);
        game.key_event(event);
    }

    //--- Mouse ------------------------------------------------------------

    /// Forwards a mouse event and returns whether the application
    /// consumed it.
    ///
    /// While captured, `x`/`y` are re-encoded as deltas from the previous
    /// mouse position.
    pub fn mouse_event_internal<G: Game + ?Sized>(
        &mut self,
        game: &mut G,
        kind: MouseEventKind,
        x: i32,
        y: i32,
        wheel_delta: i32,
    ) -> bool {
        let relative = self.capture.is_captured();
        let (out_x, out_y) = if relative {
            (x.saturating_sub(self.last_mouse.0), y.saturating_sub(self.last_mouse.1))
        } else {
            (x, y)
        };
        self.last_mouse = (x, y);

        let event = MouseEvent {
            kind,
            x: out_x,
            y: out_y,
            wheel_delta,
            relative,
        };
        trace!(target: "platform::input", "Mouse {:?}", event);
        game.mouse_event(event)
    }

    //--- Gestures ---------------------------------------------------------

    /// Forwards a gesture if its kind is registered.
    ///
    /// Returns `true` if the application received it.
    pub fn gesture_event_internal<G: Game + ?Sized>(
        &mut self,
        game: &mut G,
        event: GestureEvent,
    ) -> bool {
        if !self.gestures.is_registered(event.kind()) {
            trace!(target: "platform::input", "Unregistered {:?} suppressed", event.kind());
            return false;
        }

        trace!(target: "platform::input", "Gesture {:?}", event);
        game.gesture_event(event);
        true
    }

    //--- Window -----------------------------------------------------------

    /// Updates the display dimensions and notifies the application if
    /// they changed.
    pub fn resize_event_internal<G: Game + ?Sized>(
        &mut self,
        game: &mut G,
        display: &mut DisplayConfig,
        width: u32,
        height: u32,
    ) {
        if !display.apply_resize(width, height) {
            trace!(target: "platform::input", "Resize to same size {}x{} ignored", width, height);
            return;
        }

        debug!(target: "platform", "Display resized to {}x{}", width, height);
        game.resize_event(width, height);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::application::test_support::{Recorded, RecordingGame};
    use crate::core::gesture::{GestureKind, SwipeDirection};
    use crate::core::input::MouseButton;
    use crate::core::platform_bridge::Capabilities;

    fn router() -> InputEventRouter {
        InputEventRouter::new(GestureSet::ALL)
    }

    fn display(capabilities: &Capabilities) -> DisplayConfig {
        DisplayConfig::new(capabilities, 800, 600)
    }

    //=====================================================================
    // Gesture Tests
    //=====================================================================

    #[test]
    fn tap_delivered_once_while_registered_then_suppressed() {
        let mut router = router();
        let mut game = RecordingGame::new();
        let tap = GestureEvent::Tap { x: 10, y: 20 };

        router.gestures_mut().register(GestureKind::Tap);
        assert!(router.gesture_event_internal(&mut game, tap));
        assert_eq!(game.gestures(), vec![GestureEvent::Tap { x: 10, y: 20 }]);

        router.gestures_mut().unregister(GestureKind::Tap);
        assert!(!router.gesture_event_internal(&mut game, tap));
        assert_eq!(game.gestures().len(), 1, "Unregistered tap must not reach the game");
    }

    #[test]
    fn unregistered_gestures_never_reach_application() {
        let mut router = router();
        let mut game = RecordingGame::new();

        let events = [
            GestureEvent::Swipe { x: 0, y: 0, direction: SwipeDirection::Up },
            GestureEvent::Pinch { x: 0, y: 0, scale: 2.0 },
            GestureEvent::Tap { x: 0, y: 0 },
            GestureEvent::LongTap { x: 0, y: 0, duration: 500.0 },
            GestureEvent::Drag { x: 0, y: 0 },
            GestureEvent::Drop { x: 0, y: 0 },
        ];
        for event in events {
            router.gesture_event_internal(&mut game, event);
        }

        assert!(game.events.is_empty());
    }

    #[test]
    fn only_registered_kind_passes() {
        let mut router = router();
        let mut game = RecordingGame::new();
        router.gestures_mut().register(GestureKind::Pinch);

        router.gesture_event_internal(&mut game, GestureEvent::Drag { x: 1, y: 1 });
        router.gesture_event_internal(&mut game, GestureEvent::Pinch { x: 2, y: 2, scale: 0.5 });

        assert_eq!(game.gestures(), vec![GestureEvent::Pinch { x: 2, y: 2, scale: 0.5 }]);
    }

    //=====================================================================
    // Mouse Tests
    //=====================================================================

    #[test]
    fn mouse_is_absolute_when_released() {
        let mut router = router();
        let mut game = RecordingGame::new();

        router.mouse_event_internal(&mut game, MouseEventKind::Move, 100, 200, 0);

        let event = game.mice()[0];
        assert_eq!((event.x, event.y), (100, 200));
        assert!(!event.relative);
    }

    #[test]
    fn mouse_is_delta_encoded_when_captured() {
        let mut router = router();
        let mut game = RecordingGame::new();

        router.set_mouse_captured(true, (400, 300));
        router.mouse_event_internal(&mut game, MouseEventKind::Move, 410, 295, 0);
        router.mouse_event_internal(&mut game, MouseEventKind::Move, 415, 295, 0);

        let mice = game.mice();
        assert_eq!((mice[0].x, mice[0].y), (10, -5));
        assert_eq!((mice[1].x, mice[1].y), (5, 0));
        assert!(mice.iter().all(|m| m.relative));
    }

    #[test]
    fn releasing_capture_restores_absolute_mode() {
        let mut router = router();
        let mut game = RecordingGame::new();

        router.set_mouse_captured(true, (400, 300));
        router.set_mouse_captured(false, (400, 300));
        router.mouse_event_internal(&mut game, MouseEventKind::Move, 7, 9, 0);

        let event = game.mice()[0];
        assert_eq!((event.x, event.y), (7, 9));
        assert!(!event.relative);
        assert!(router.capture().is_cursor_visible());
    }

    #[test]
    fn captured_deltas_saturate_at_extreme_coordinates() {
        let mut router = router();
        let mut game = RecordingGame::new();

        router.set_mouse_captured(true, (400, 300));
        router.mouse_event_internal(&mut game, MouseEventKind::Move, i32::MIN, 0, 0);
        router.mouse_event_internal(&mut game, MouseEventKind::Move, i32::MAX, 0, 0);

        let mice = game.mice();
        assert_eq!(mice[0].x, i32::MIN);
        assert_eq!(mice[1].x, i32::MAX);
        assert!(mice[1].relative);
    }

    #[test]
    fn mouse_returns_consumed_flag() {
        let mut router = router();
        let mut game = RecordingGame::new();

        let press = MouseEventKind::Press(MouseButton::Left);
        assert!(!router.mouse_event_internal(&mut game, press, 1, 1, 0));

        game.consume_mouse = true;
        assert!(router.mouse_event_internal(&mut game, press, 1, 1, 0));
    }

    #[test]
    fn wheel_delta_is_forwarded() {
        let mut router = router();
        let mut game = RecordingGame::new();

        router.mouse_event_internal(&mut game, MouseEventKind::Wheel, 5, 5, -3);
        assert_eq!(game.mice()[0].wheel_delta, -3);
    }

    //=====================================================================
    // Touch Tests
    //=====================================================================

    #[test]
    fn primary_touch_is_forwarded() {
        let mut router = router();
        let mut game = RecordingGame::new();
        let display = display(&Capabilities::desktop());

        router.touch_event_internal(&mut game, &display, TouchEventKind::Press, 3, 4, 0, true);

        let touch = game.touches()[0];
        assert_eq!(touch.kind, TouchEventKind::Press);
        assert_eq!((touch.x, touch.y, touch.contact_index), (3, 4, 0));
        assert!(touch.actually_mouse);
    }

    #[test]
    fn secondary_contact_dropped_without_multi_touch() {
        let mut router = router();
        let mut game = RecordingGame::new();
        let display = display(&Capabilities::mobile());

        router.touch_event_internal(&mut game, &display, TouchEventKind::Press, 3, 4, 1, false);
        assert!(game.touches().is_empty());
    }

    #[test]
    fn secondary_contact_forwarded_with_multi_touch() {
        let mut router = router();
        let mut game = RecordingGame::new();
        let mut display = display(&Capabilities::mobile());
        display.set_multi_touch(true);

        router.touch_event_internal(&mut game, &display, TouchEventKind::Move, 3, 4, 2, false);
        assert_eq!(game.touches()[0].contact_index, 2);
    }

    //=====================================================================
    // Keyboard Tests
    //=====================================================================

    #[test]
    fn key_events_are_forwarded_in_order() {
        let mut router = router();
        let mut game = RecordingGame::new();

        router.key_event_internal(&mut game, KeyEventKind::Press, KeyCode::KeyW);
        router.key_event_internal(&mut game, KeyEventKind::Char, KeyCode::Char('w'));
        router.key_event_internal(&mut game, KeyEventKind::Release, KeyCode::KeyW);

        assert_eq!(
            game.events,
            vec![
                Recorded::Key(KeyEvent { kind: KeyEventKind::Press, key: KeyCode::KeyW }),
                Recorded::Key(KeyEvent { kind: KeyEventKind::Char, key: KeyCode::Char('w') }),
                Recorded::Key(KeyEvent { kind: KeyEventKind::Release, key: KeyCode::KeyW }),
            ]
        );
    }

    #[test]
    fn unidentified_key_is_dropped() {
        let mut router = router();
        let mut game = RecordingGame::new();

        router.key_event_internal(&mut game, KeyEventKind::Press, KeyCode::Unidentified);
        assert!(game.events.is_empty());
    }

    //=====================================================================
    // Resize Tests
    //=====================================================================

    #[test]
    fn resize_updates_display_before_forwarding() {
        let mut router = router();
        let mut game = RecordingGame::new();
        let mut display = display(&Capabilities::desktop());

        router.resize_event_internal(&mut game, &mut display, 1920, 1080);

        assert_eq!((display.width(), display.height()), (1920, 1080));
        assert_eq!(game.events, vec![Recorded::Resize(1920, 1080)]);
    }

    #[test]
    fn resize_to_same_size_is_not_forwarded() {
        let mut router = router();
        let mut game = RecordingGame::new();
        let mut display = display(&Capabilities::desktop());

        router.resize_event_internal(&mut game, &mut display, 800, 600);
        assert!(game.events.is_empty());
    }
}
