//=========================================================================
// Gamepad Device Types
//=========================================================================
//
// Per-connection identity, capability descriptor and live state.
//
// Lifecycle:
//   Disconnected ──connect──> Connected ──disconnect──> Disconnected
//
// The descriptor is captured at connect time and never changes. The state
// is zeroed at connect, mutated by discrete notifications and polling,
// and destroyed at disconnect.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::fmt;

//=== GamepadHandle =======================================================

/// Opaque per-connection device identifier.
///
/// Unique among connected devices. A backend may reuse a value only after
/// the previous owner's disconnect has been processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GamepadHandle(u64);

impl GamepadHandle {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for GamepadHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gamepad#{}", self.0)
    }
}

//=== ButtonMapping =======================================================

/// Logical gamepad button.
///
/// Declaration order defines the bit index in [`GamepadState::buttons`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonMapping {
    A,
    B,
    X,
    Y,
    L1,
    L2,
    L3,
    R1,
    R2,
    R3,
    Up,
    Down,
    Left,
    Right,
    Menu1,
    Menu2,
    Menu3,
}

impl ButtonMapping {
    pub const COUNT: usize = 17;

    pub const ALL: [ButtonMapping; Self::COUNT] = [
        ButtonMapping::A,
        ButtonMapping::B,
        ButtonMapping::X,
        ButtonMapping::Y,
        ButtonMapping::L1,
        ButtonMapping::L2,
        ButtonMapping::L3,
        ButtonMapping::R1,
        ButtonMapping::R2,
        ButtonMapping::R3,
        ButtonMapping::Up,
        ButtonMapping::Down,
        ButtonMapping::Left,
        ButtonMapping::Right,
        ButtonMapping::Menu1,
        ButtonMapping::Menu2,
        ButtonMapping::Menu3,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    fn bit(self) -> u32 {
        1 << self as u32
    }
}

//=== GamepadDescriptor ===================================================

/// Capabilities of a connected gamepad, fixed for the connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GamepadDescriptor {
    handle: GamepadHandle,
    button_count: u32,
    joystick_count: u32,
    trigger_count: u32,
    name: String,
}

impl GamepadDescriptor {
    pub fn new(
        handle: GamepadHandle,
        button_count: u32,
        joystick_count: u32,
        trigger_count: u32,
        name: impl Into<String>,
    ) -> Self {
        Self {
            handle,
            button_count,
            joystick_count,
            trigger_count,
            name: name.into(),
        }
    }

    pub fn handle(&self) -> GamepadHandle {
        self.handle
    }

    pub fn button_count(&self) -> u32 {
        self.button_count
    }

    pub fn joystick_count(&self) -> u32 {
        self.joystick_count
    }

    pub fn trigger_count(&self) -> u32 {
        self.trigger_count
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

//=== GamepadState ========================================================

/// Live button, joystick and trigger values.
///
/// Joystick axes are clamped to `[-1, 1]`, triggers to `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct GamepadState {
    buttons: u32,
    joysticks: Vec<(f32, f32)>,
    triggers: Vec<f32>,
}

impl GamepadState {
    /// Creates a zeroed state sized for `descriptor`.
    pub fn zeroed(descriptor: &GamepadDescriptor) -> Self {
        Self {
            buttons: 0,
            joysticks: vec![(0.0, 0.0); descriptor.joystick_count as usize],
            triggers: vec![0.0; descriptor.trigger_count as usize],
        }
    }

    //--- Queries ----------------------------------------------------------

    /// Raw button bitmap, bit `n` = [`ButtonMapping::from_index`]`(n)`.
    pub fn buttons(&self) -> u32 {
        self.buttons
    }

    pub fn is_pressed(&self, button: ButtonMapping) -> bool {
        self.buttons & button.bit() != 0
    }

    pub fn joystick(&self, index: usize) -> Option<(f32, f32)> {
        self.joysticks.get(index).copied()
    }

    pub fn trigger(&self, index: usize) -> Option<f32> {
        self.triggers.get(index).copied()
    }

    pub fn joystick_count(&self) -> usize {
        self.joysticks.len()
    }

    pub fn trigger_count(&self) -> usize {
        self.triggers.len()
    }

    //--- Mutation ---------------------------------------------------------

    pub fn set_pressed(&mut self, button: ButtonMapping, pressed: bool) {
        if pressed {
            self.buttons |= button.bit();
        } else {
            self.buttons &= !button.bit();
        }
    }

    /// Sets joystick `index`; returns `false` if out of range.
    pub fn set_joystick(&mut self, index: usize, x: f32, y: f32) -> bool {
        match self.joysticks.get_mut(index) {
            Some(axis) => {
                *axis = (x.clamp(-1.0, 1.0), y.clamp(-1.0, 1.0));
                true
            }
            None => false,
        }
    }

    /// Sets trigger `index`; returns `false` if out of range.
    pub fn set_trigger(&mut self, index: usize, value: f32) -> bool {
        match self.triggers.get_mut(index) {
            Some(trigger) => {
                *trigger = value.clamp(0.0, 1.0);
                true
            }
            None => false,
        }
    }
}

//=== Gamepad =============================================================

/// A connected gamepad: descriptor plus live state.
#[derive(Debug, Clone)]
pub struct Gamepad {
    descriptor: GamepadDescriptor,
    pub(crate) state: GamepadState,
}

impl Gamepad {
    pub(crate) fn connect(descriptor: GamepadDescriptor) -> Self {
        let state = GamepadState::zeroed(&descriptor);
        Self { descriptor, state }
    }

    pub fn descriptor(&self) -> &GamepadDescriptor {
        &self.descriptor
    }

    pub fn state(&self) -> &GamepadState {
        &self.state
    }
}

//=== GamepadEvent ========================================================

/// Gamepad notification delivered to the application.
#[derive(Debug, Clone, PartialEq)]
pub enum GamepadEvent {
    Connected(GamepadDescriptor),
    Disconnected(GamepadDescriptor),
    ButtonPressed { handle: GamepadHandle, button: ButtonMapping },
    ButtonReleased { handle: GamepadHandle, button: ButtonMapping },
    TriggerChanged { handle: GamepadHandle, index: u32, value: f32 },
    JoystickChanged { handle: GamepadHandle, index: u32, x: f32, y: f32 },
}

impl GamepadEvent {
    pub fn handle(&self) -> GamepadHandle {
        match self {
            Self::Connected(descriptor) | Self::Disconnected(descriptor) => descriptor.handle(),
            Self::ButtonPressed { handle, .. }
            | Self::ButtonReleased { handle, .. }
            | Self::TriggerChanged { handle, .. }
            | Self::JoystickChanged { handle, .. } => *handle,
        }
    }
}

//=== Polling =============================================================

/// Outcome of a single device poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamepadPoll {
    /// State was re-read into the supplied container.
    Updated,

    /// Device reported no change.
    Unchanged,

    /// Device I/O did not complete in time; treated as no change.
    TimedOut,
}

/// Backend hook for devices whose state is not pushed as deltas.
pub trait GamepadPoller {
    /// Re-reads the device into `state`.
    ///
    /// Must return within `budget`; the manager discards results that
    /// arrive late.
    fn poll_gamepad(
        &mut self,
        descriptor: &GamepadDescriptor,
        state: &mut GamepadState,
        budget: std::time::Duration,
    ) -> GamepadPoll;
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor() -> GamepadDescriptor {
        GamepadDescriptor::new(GamepadHandle::new(1), 8, 2, 2, "Test Pad")
    }

    #[test]
    fn button_mapping_indices_round_trip_in_order() {
        for (index, button) in ButtonMapping::ALL.iter().enumerate() {
            assert_eq!(button.index(), index);
            assert_eq!(ButtonMapping::from_index(index), Some(*button));
        }
        assert_eq!(ButtonMapping::from_index(ButtonMapping::COUNT), None);
    }

    #[test]
    fn zeroed_state_matches_descriptor() {
        let state = GamepadState::zeroed(&descriptor());
        assert_eq!(state.buttons(), 0);
        assert_eq!(state.joystick_count(), 2);
        assert_eq!(state.trigger_count(), 2);
        assert_eq!(state.joystick(1), Some((0.0, 0.0)));
        assert_eq!(state.trigger(0), Some(0.0));
    }

    #[test]
    fn set_pressed_touches_only_named_bit() {
        let mut state = GamepadState::zeroed(&descriptor());
        state.set_pressed(ButtonMapping::Y, true);

        assert!(state.is_pressed(ButtonMapping::Y));
        assert_eq!(state.buttons(), 1 << 3);

        state.set_pressed(ButtonMapping::Y, false);
        assert_eq!(state.buttons(), 0);
    }

    #[test]
    fn joystick_and_trigger_are_clamped() {
        let mut state = GamepadState::zeroed(&descriptor());
        assert!(state.set_joystick(0, 2.0, -3.0));
        assert!(state.set_trigger(1, 1.5));

        assert_eq!(state.joystick(0), Some((1.0, -1.0)));
        assert_eq!(state.trigger(1), Some(1.0));
    }

    #[test]
    fn out_of_range_indices_are_rejected() {
        let mut state = GamepadState::zeroed(&descriptor());
        assert!(!state.set_joystick(2, 0.5, 0.5));
        assert!(!state.set_trigger(5, 0.5));
        assert_eq!(state.joystick(2), None);
    }

    #[test]
    fn event_handle_accessor() {
        let event = GamepadEvent::Connected(descriptor());
        assert_eq!(event.handle(), GamepadHandle::new(1));

        let event = GamepadEvent::TriggerChanged {
            handle: GamepadHandle::new(9),
            index: 0,
            value: 0.5,
        };
        assert_eq!(event.handle(), GamepadHandle::new(9));
    }

    #[test]
    fn handle_display() {
        assert_eq!(GamepadHandle::new(7).to_string(), "gamepad#7");
    }
}
