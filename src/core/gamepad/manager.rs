//=========================================================================
// Gamepad Manager
//=========================================================================
//
// Owns every connected gamepad and applies connect/disconnect and state
// notifications on the pump thread.
//
// Architecture:
//   NativeEvent::Gamepad / marshaled notification
//        ↓
//   GamepadManager (HashMap<GamepadHandle, Gamepad>)
//        ├─ mutate descriptor / state
//        └─ forward GamepadEvent → Game::gamepad_event
//
// Notifications for unknown handles (never connected, or raced with a
// disconnect) are dropped. A duplicate connect for a live handle is a
// backend bug: it is logged and ignored.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::collections::HashMap;
use std::time::{Duration, Instant};

//=== External Dependencies ===============================================

use log::{debug, info, trace, warn};

//=== Internal Dependencies ===============================================

use super::device::{
    ButtonMapping, Gamepad, GamepadDescriptor, GamepadEvent, GamepadHandle, GamepadPoll,
    GamepadPoller,
};
use crate::core::application::Game;

//=== GamepadManager ======================================================

/// Set of connected gamepads keyed by handle.
#[derive(Debug, Default)]
pub struct GamepadManager {
    devices: HashMap<GamepadHandle, Gamepad>,

    /// Handles in connection order (stable enumeration).
    order: Vec<GamepadHandle>,
}

impl GamepadManager {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Queries ----------------------------------------------------------

    pub fn get(&self, handle: GamepadHandle) -> Option<&Gamepad> {
        self.devices.get(&handle)
    }

    pub fn contains(&self, handle: GamepadHandle) -> bool {
        self.devices.contains_key(&handle)
    }

    /// Connected handles in connection order.
    pub fn handles(&self) -> &[GamepadHandle] {
        &self.order
    }

    /// Connected gamepads in connection order.
    pub fn iter(&self) -> impl Iterator<Item = &Gamepad> + '_ {
        self.order.iter().filter_map(|handle| self.devices.get(handle))
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    //--- Lifecycle --------------------------------------------------------

    /// Registers a newly connected device.
    ///
    /// Returns `false` (and changes nothing) if `handle` is already live.
    pub fn connected<G: Game + ?Sized>(
        &mut self,
        game: &mut G,
        handle: GamepadHandle,
        button_count: u32,
        joystick_count: u32,
        trigger_count: u32,
        name: &str,
    ) -> bool {
        if self.devices.contains_key(&handle) {
            warn!(
                target: "platform::gamepad",
                "Duplicate connect for live {} ignored (backend bug)",
                handle
            );
            return false;
        }

        let descriptor =
            GamepadDescriptor::new(handle, button_count, joystick_count, trigger_count, name);
        info!(
            target: "platform::gamepad",
            "{} connected: '{}' ({} buttons, {} joysticks, {} triggers)",
            handle, name, button_count, joystick_count, trigger_count
        );

        self.devices.insert(handle, Gamepad::connect(descriptor.clone()));
        self.order.push(handle);

        game.gamepad_event(&GamepadEvent::Connected(descriptor));
        true
    }

    /// Destroys the device registered under `handle`.
    ///
    /// Returns `false` if the handle is unknown.
    pub fn disconnected<G: Game + ?Sized>(&mut self, game: &mut G, handle: GamepadHandle) -> bool {
        let Some(gamepad) = self.devices.remove(&handle) else {
            debug!(target: "platform::gamepad", "Disconnect for unknown {} dropped", handle);
            return false;
        };
        self.order.retain(|h| *h != handle);

        info!(target: "platform::gamepad", "{} disconnected", handle);
        game.gamepad_event(&GamepadEvent::Disconnected(gamepad.descriptor().clone()));
        true
    }

    //--- Incremental Updates ----------------------------------------------

    pub fn button_pressed<G: Game + ?Sized>(
        &mut self,
        game: &mut G,
        handle: GamepadHandle,
        button: ButtonMapping,
    ) -> bool {
        self.set_button(game, handle, button, true)
    }

    pub fn button_released<G: Game + ?Sized>(
        &mut self,
        game: &mut G,
        handle: GamepadHandle,
        button: ButtonMapping,
    ) -> bool {
        self.set_button(game, handle, button, false)
    }

    pub fn trigger_changed<G: Game + ?Sized>(
        &mut self,
        game: &mut G,
        handle: GamepadHandle,
        index: u32,
        value: f32,
    ) -> bool {
        let Some(gamepad) = self.live_mut(handle) else {
            return false;
        };
        if !gamepad.state.set_trigger(index as usize, value) {
            debug!(target: "platform::gamepad", "{} has no trigger {}", handle, index);
            return false;
        }

        trace!(target: "platform::gamepad", "{} trigger {} = {}", handle, index, value);
        game.gamepad_event(&GamepadEvent::TriggerChanged { handle, index, value });
        true
    }

    pub fn joystick_changed<G: Game + ?Sized>(
        &mut self,
        game: &mut G,
        handle: GamepadHandle,
        index: u32,
        x: f32,
        y: f32,
    ) -> bool {
        let Some(gamepad) = self.live_mut(handle) else {
            return false;
        };
        if !gamepad.state.set_joystick(index as usize, x, y) {
            debug!(target: "platform::gamepad", "{} has no joystick {}", handle, index);
            return false;
        }

        trace!(target: "platform::gamepad", "{} joystick {} = ({}, {})", handle, index, x, y);
        game.gamepad_event(&GamepadEvent::JoystickChanged { handle, index, x, y });
        true
    }

    //--- Polling ----------------------------------------------------------

    /// Re-reads one device through `poller`.
    ///
    /// Results arriving after `budget`, or reported as timed out, are
    /// discarded and the state is left unchanged. Returns `true` if the
    /// state was replaced.
    pub fn poll_gamepad_state(
        &mut self,
        handle: GamepadHandle,
        poller: &mut dyn GamepadPoller,
        budget: Duration,
    ) -> bool {
        let Some(gamepad) = self.devices.get_mut(&handle) else {
            return false;
        };

        let mut scratch = gamepad.state.clone();
        let started = Instant::now();
        let outcome = poller.poll_gamepad(gamepad.descriptor(), &mut scratch, budget);
        let elapsed = started.elapsed();

        match outcome {
            GamepadPoll::Updated if elapsed <= budget => {
                gamepad.state = scratch;
                true
            }
            GamepadPoll::Updated | GamepadPoll::TimedOut => {
                warn!(
                    target: "platform::gamepad",
                    "Poll of {} exceeded budget ({:?} > {:?}), treated as no change",
                    handle, elapsed, budget
                );
                false
            }
            GamepadPoll::Unchanged => false,
        }
    }

    /// Polls every connected device; returns how many were updated.
    pub fn poll_all(&mut self, poller: &mut dyn GamepadPoller, budget: Duration) -> usize {
        let handles = self.order.clone();
        handles
            .into_iter()
            .filter(|handle| self.poll_gamepad_state(*handle, poller, budget))
            .count()
    }

    //--- Internal Helpers -------------------------------------------------

    fn live_mut(&mut self, handle: GamepadHandle) -> Option<&mut Gamepad> {
        let gamepad = self.devices.get_mut(&handle);
        if gamepad.is_none() {
            debug!(target: "platform::gamepad", "Event for unknown {} dropped", handle);
        }
        gamepad
    }

    fn set_button<G: Game + ?Sized>(
        &mut self,
        game: &mut G,
        handle: GamepadHandle,
        button: ButtonMapping,
        pressed: bool,
    ) -> bool {
        let Some(gamepad) = self.live_mut(handle) else {
            return false;
        };
        gamepad.state.set_pressed(button, pressed);

        trace!(target: "platform::gamepad", "{} {:?} pressed={}", handle, button, pressed);
        let event = if pressed {
            GamepadEvent::ButtonPressed { handle, button }
        } else {
            GamepadEvent::ButtonReleased { handle, button }
        };
        game.gamepad_event(&event);
        true
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::application::test_support::RecordingGame;
    use crate::core::gamepad::GamepadState;
    use std::thread;

    const PAD: GamepadHandle = GamepadHandle::new(1);

    fn connect_standard(manager: &mut GamepadManager, game: &mut RecordingGame) {
        assert!(manager.connected(game, PAD, 8, 2, 2, "Standard Pad"));
    }

    //--- Pollers ----------------------------------------------------------

    struct FixedPoller {
        trigger: f32,
        outcome: GamepadPoll,
        delay: Duration,
    }

    impl GamepadPoller for FixedPoller {
        fn poll_gamepad(
            &mut self,
            _descriptor: &GamepadDescriptor,
            state: &mut GamepadState,
            _budget: Duration,
        ) -> GamepadPoll {
            thread::sleep(self.delay);
            state.set_trigger(0, self.trigger);
            self.outcome
        }
    }

    fn poller(outcome: GamepadPoll, delay: Duration) -> FixedPoller {
        FixedPoller { trigger: 0.75, outcome, delay }
    }

    //=====================================================================
    // Lifecycle Tests
    //=====================================================================

    #[test]
    fn connect_creates_zeroed_state_and_notifies() {
        let mut manager = GamepadManager::new();
        let mut game = RecordingGame::new();

        connect_standard(&mut manager, &mut game);

        let pad = manager.get(PAD).expect("pad should be live");
        assert_eq!(pad.descriptor().name(), "Standard Pad");
        assert_eq!(pad.descriptor().button_count(), 8);
        assert_eq!(pad.state().buttons(), 0);
        assert_eq!(pad.state().joystick_count(), 2);

        match game.gamepad_events().as_slice() {
            [GamepadEvent::Connected(descriptor)] => assert_eq!(descriptor.handle(), PAD),
            other => panic!("Expected one Connected event, got {:?}", other),
        }
    }

    #[test]
    fn duplicate_connect_is_ignored() {
        let mut manager = GamepadManager::new();
        let mut game = RecordingGame::new();

        connect_standard(&mut manager, &mut game);
        manager.button_pressed(&mut game, PAD, ButtonMapping::A);

        assert!(!manager.connected(&mut game, PAD, 4, 1, 0, "Impostor"));

        let pad = manager.get(PAD).unwrap();
        assert_eq!(pad.descriptor().name(), "Standard Pad");
        assert!(pad.state().is_pressed(ButtonMapping::A), "State must survive");
        assert_eq!(manager.len(), 1);
    }

    #[test]
    fn connect_then_disconnect_leaves_no_state() {
        let mut manager = GamepadManager::new();
        let mut game = RecordingGame::new();

        connect_standard(&mut manager, &mut game);
        assert!(manager.disconnected(&mut game, PAD));

        assert!(manager.get(PAD).is_none());
        assert!(manager.handles().is_empty());
        assert!(matches!(
            game.gamepad_events().last(),
            Some(GamepadEvent::Disconnected(d)) if d.handle() == PAD
        ));
    }

    #[test]
    fn disconnect_unknown_handle_is_noop() {
        let mut manager = GamepadManager::new();
        let mut game = RecordingGame::new();

        assert!(!manager.disconnected(&mut game, PAD));
        assert!(game.events.is_empty());
    }

    #[test]
    fn handles_are_independent() {
        let mut manager = GamepadManager::new();
        let mut game = RecordingGame::new();
        let other = GamepadHandle::new(2);

        connect_standard(&mut manager, &mut game);
        manager.disconnected(&mut game, PAD);
        manager.connected(&mut game, other, 4, 1, 1, "Other");
        manager.button_pressed(&mut game, other, ButtonMapping::B);

        assert!(manager.get(PAD).is_none());
        assert!(manager.get(other).unwrap().state().is_pressed(ButtonMapping::B));
    }

    #[test]
    fn handle_can_be_reused_after_disconnect() {
        let mut manager = GamepadManager::new();
        let mut game = RecordingGame::new();

        connect_standard(&mut manager, &mut game);
        manager.button_pressed(&mut game, PAD, ButtonMapping::X);
        manager.disconnected(&mut game, PAD);

        assert!(manager.connected(&mut game, PAD, 8, 2, 2, "Reconnected"));
        assert_eq!(manager.get(PAD).unwrap().state().buttons(), 0, "Fresh state");
    }

    #[test]
    fn enumeration_follows_connection_order() {
        let mut manager = GamepadManager::new();
        let mut game = RecordingGame::new();

        for raw in [5, 2, 9] {
            manager.connected(&mut game, GamepadHandle::new(raw), 4, 1, 1, "Pad");
        }
        manager.disconnected(&mut game, GamepadHandle::new(2));

        let raws: Vec<_> = manager.iter().map(|g| g.descriptor().handle().raw()).collect();
        assert_eq!(raws, vec![5, 9]);
    }

    //=====================================================================
    // Incremental Update Tests
    //=====================================================================

    #[test]
    fn button_press_and_release() {
        let mut manager = GamepadManager::new();
        let mut game = RecordingGame::new();
        connect_standard(&mut manager, &mut game);

        let button = ButtonMapping::from_index(3).unwrap();
        assert!(manager.button_pressed(&mut game, PAD, button));
        assert!(manager.get(PAD).unwrap().state().is_pressed(button));

        assert!(manager.button_released(&mut game, PAD, button));
        assert!(!manager.get(PAD).unwrap().state().is_pressed(button));
    }

    #[test]
    fn updates_before_connect_are_dropped() {
        let mut manager = GamepadManager::new();
        let mut game = RecordingGame::new();

        assert!(!manager.button_pressed(&mut game, PAD, ButtonMapping::A));
        assert!(!manager.trigger_changed(&mut game, PAD, 0, 1.0));
        assert!(!manager.joystick_changed(&mut game, PAD, 0, 1.0, 1.0));

        assert!(manager.get(PAD).is_none());
        assert!(game.events.is_empty());
    }

    #[test]
    fn updates_after_disconnect_are_dropped() {
        let mut manager = GamepadManager::new();
        let mut game = RecordingGame::new();
        connect_standard(&mut manager, &mut game);
        manager.disconnected(&mut game, PAD);
        let before = game.events.len();

        assert!(!manager.button_pressed(&mut game, PAD, ButtonMapping::A));
        assert!(!manager.trigger_changed(&mut game, PAD, 1, 0.2));

        assert!(manager.get(PAD).is_none());
        assert_eq!(game.events.len(), before);
    }

    #[test]
    fn trigger_and_joystick_mutate_only_named_field() {
        let mut manager = GamepadManager::new();
        let mut game = RecordingGame::new();
        connect_standard(&mut manager, &mut game);

        manager.trigger_changed(&mut game, PAD, 1, 0.5);
        manager.joystick_changed(&mut game, PAD, 0, -0.25, 0.75);

        let state = manager.get(PAD).unwrap().state();
        assert_eq!(state.trigger(0), Some(0.0));
        assert_eq!(state.trigger(1), Some(0.5));
        assert_eq!(state.joystick(0), Some((-0.25, 0.75)));
        assert_eq!(state.joystick(1), Some((0.0, 0.0)));
        assert_eq!(state.buttons(), 0);
    }

    #[test]
    fn out_of_range_trigger_is_dropped() {
        let mut manager = GamepadManager::new();
        let mut game = RecordingGame::new();
        connect_standard(&mut manager, &mut game);
        let before = game.events.len();

        assert!(!manager.trigger_changed(&mut game, PAD, 7, 1.0));
        assert_eq!(game.events.len(), before);
    }

    //=====================================================================
    // Polling Tests
    //=====================================================================

    #[test]
    fn poll_commits_updated_state() {
        let mut manager = GamepadManager::new();
        let mut game = RecordingGame::new();
        connect_standard(&mut manager, &mut game);

        let mut poller = poller(GamepadPoll::Updated, Duration::ZERO);
        assert!(manager.poll_gamepad_state(PAD, &mut poller, Duration::from_millis(50)));
        assert_eq!(manager.get(PAD).unwrap().state().trigger(0), Some(0.75));
    }

    #[test]
    fn poll_timeout_is_no_change() {
        let mut manager = GamepadManager::new();
        let mut game = RecordingGame::new();
        connect_standard(&mut manager, &mut game);

        let mut poller = poller(GamepadPoll::TimedOut, Duration::ZERO);
        assert!(!manager.poll_gamepad_state(PAD, &mut poller, Duration::from_millis(50)));
        assert_eq!(manager.get(PAD).unwrap().state().trigger(0), Some(0.0));
    }

    #[test]
    fn late_poll_result_is_discarded() {
        let mut manager = GamepadManager::new();
        let mut game = RecordingGame::new();
        connect_standard(&mut manager, &mut game);

        let mut poller = poller(GamepadPoll::Updated, Duration::from_millis(20));
        assert!(!manager.poll_gamepad_state(PAD, &mut poller, Duration::from_millis(1)));
        assert_eq!(manager.get(PAD).unwrap().state().trigger(0), Some(0.0));
    }

    #[test]
    fn poll_unknown_handle_is_noop() {
        let mut manager = GamepadManager::new();
        let mut poller = poller(GamepadPoll::Updated, Duration::ZERO);
        assert!(!manager.poll_gamepad_state(PAD, &mut poller, Duration::from_millis(50)));
    }

    #[test]
    fn poll_all_counts_updates() {
        let mut manager = GamepadManager::new();
        let mut game = RecordingGame::new();
        connect_standard(&mut manager, &mut game);
        manager.connected(&mut game, GamepadHandle::new(2), 4, 0, 1, "Second");

        let mut poller = poller(GamepadPoll::Updated, Duration::ZERO);
        assert_eq!(manager.poll_all(&mut poller, Duration::from_millis(50)), 2);
    }
}
