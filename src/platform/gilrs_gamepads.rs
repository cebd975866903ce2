//=========================================================================
// Gilrs Gamepads
//=========================================================================
//
// Hotplug and state notifications for desktop gamepads, read from gilrs
// on the pump thread.
//
// Layout mapping (gilrs → platform):
//   South/East/West/North      → A/B/X/Y
//   LeftTrigger/RightTrigger   → L1/R1
//   LeftTrigger2/RightTrigger2 → L2/R2 (and analog triggers 0/1)
//   LeftThumb/RightThumb       → L3/R3
//   DPad                       → Up/Down/Left/Right
//   Select/Start/Mode          → Menu1/Menu2/Menu3
//   Left/right stick           → joysticks 0/1
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::collections::HashSet;

//=== External Dependencies ===============================================

use gilrs::{Axis, Button, EventType, GamepadId, Gilrs};
use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use crate::core::gamepad::{ButtonMapping, GamepadHandle};
use crate::core::platform_bridge::{GamepadNotification, NativeEvent};

const BUTTON_COUNT: u32 = ButtonMapping::COUNT as u32;
const JOYSTICK_COUNT: u32 = 2;
const TRIGGER_COUNT: u32 = 2;

//=== GilrsGamepads =======================================================

pub(crate) struct GilrsGamepads {
    gilrs: Gilrs,
    started: bool,

    /// Pads announced at startup whose queued `Connected` is still due.
    announced: AnnouncedPads,
}

impl GilrsGamepads {
    /// Opens the gilrs context; `None` if no gamepad API is available.
    pub(crate) fn new() -> Option<Self> {
        match Gilrs::new() {
            Ok(gilrs) => {
                info!(target: "platform::gamepad", "Gilrs gamepad support initialized");
                Some(Self { gilrs, started: false, announced: AnnouncedPads::default() })
            }
            Err(e) => {
                warn!(target: "platform::gamepad", "Gamepad support unavailable: {}", e);
                None
            }
        }
    }

    /// Appends notifications for everything gilrs reported since the
    /// last call.
    ///
    /// The first call also announces pads that were connected before the
    /// platform started.
    pub(crate) fn drain(&mut self, out: &mut Vec<NativeEvent>) {
        if !self.started {
            self.started = true;
            let connected: Vec<_> = self
                .gilrs
                .gamepads()
                .filter(|(_, pad)| pad.is_connected())
                .map(|(id, _)| id)
                .collect();
            for id in connected {
                self.announced.insert(usize::from(id));
                out.push(self.connected(id));
            }
        }

        while let Some(event) = self.gilrs.next_event() {
            let id = event.id;
            let handle = handle_of(id);

            let notification = match event.event {
                EventType::Connected => {
                    if self.announced.take(usize::from(id)) {
                        debug!(target: "platform::gamepad", "{} already announced", handle);
                        continue;
                    }
                    self.connected(id)
                }
                EventType::Disconnected => {
                    self.announced.take(usize::from(id));
                    info!(target: "platform::gamepad", "Gilrs reported {} disconnected", handle);
                    NativeEvent::Gamepad(GamepadNotification::Disconnected(handle))
                }
                EventType::ButtonPressed(button, _) => match map_button(button) {
                    Some(mapped) => {
                        NativeEvent::Gamepad(GamepadNotification::ButtonPressed(handle, mapped))
                    }
                    None => continue,
                },
                EventType::ButtonReleased(button, _) => match map_button(button) {
                    Some(mapped) => {
                        NativeEvent::Gamepad(GamepadNotification::ButtonReleased(handle, mapped))
                    }
                    None => continue,
                },
                EventType::ButtonChanged(button, value, _) => match trigger_index(button) {
                    Some(index) => NativeEvent::Gamepad(GamepadNotification::TriggerChanged {
                        handle,
                        index,
                        value,
                    }),
                    None => continue,
                },
                EventType::AxisChanged(axis, _, _) => match stick_of(axis) {
                    Some((index, x_axis, y_axis)) => {
                        let pad = self.gilrs.gamepad(id);
                        NativeEvent::Gamepad(GamepadNotification::JoystickChanged {
                            handle,
                            index,
                            x: pad.value(x_axis),
                            y: pad.value(y_axis),
                        })
                    }
                    None => continue,
                },
                other => {
                    debug!(target: "platform::gamepad", "Ignoring gilrs event {:?}", other);
                    continue;
                }
            };
            out.push(notification);
        }
    }

    fn connected(&self, id: GamepadId) -> NativeEvent {
        NativeEvent::Gamepad(GamepadNotification::Connected {
            handle: handle_of(id),
            button_count: BUTTON_COUNT,
            joystick_count: JOYSTICK_COUNT,
            trigger_count: TRIGGER_COUNT,
            name: self.gilrs.gamepad(id).name().to_owned(),
        })
    }
}

//=== AnnouncedPads =======================================================

/// Gilrs ids announced before their queued `Connected` event arrived.
#[derive(Debug, Default)]
struct AnnouncedPads(HashSet<usize>);

impl AnnouncedPads {
    fn insert(&mut self, id: usize) {
        self.0.insert(id);
    }

    /// Returns `true` once for an announced id.
    fn take(&mut self, id: usize) -> bool {
        self.0.remove(&id)
    }
}

//=== Mapping =============================================================

fn handle_of(id: GamepadId) -> GamepadHandle {
    GamepadHandle::new(usize::from(id) as u64)
}

fn map_button(button: Button) -> Option<ButtonMapping> {
    let mapped = match button {
        Button::South => ButtonMapping::A,
        Button::East => ButtonMapping::B,
        Button::West => ButtonMapping::X,
        Button::North => ButtonMapping::Y,
        Button::LeftTrigger => ButtonMapping::L1,
        Button::LeftTrigger2 => ButtonMapping::L2,
        Button::LeftThumb => ButtonMapping::L3,
        Button::RightTrigger => ButtonMapping::R1,
        Button::RightTrigger2 => ButtonMapping::R2,
        Button::RightThumb => ButtonMapping::R3,
        Button::DPadUp => ButtonMapping::Up,
        Button::DPadDown => ButtonMapping::Down,
        Button::DPadLeft => ButtonMapping::Left,
        Button::DPadRight => ButtonMapping::Right,
        Button::Select => ButtonMapping::Menu1,
        Button::Start => ButtonMapping::Menu2,
        Button::Mode => ButtonMapping::Menu3,
        _ => return None,
    };
    Some(mapped)
}

fn trigger_index(button: Button) -> Option<u32> {
    match button {
        Button::LeftTrigger2 => Some(0),
        Button::RightTrigger2 => Some(1),
        _ => None,
    }
}

fn stick_of(axis: Axis) -> Option<(u32, Axis, Axis)> {
    match axis {
        Axis::LeftStickX | Axis::LeftStickY => Some((0, Axis::LeftStickX, Axis::LeftStickY)),
        Axis::RightStickX | Axis::RightStickY => Some((1, Axis::RightStickX, Axis::RightStickY)),
        _ => None,
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn announced_pad_skips_one_queued_connect() {
        let mut announced = AnnouncedPads::default();
        announced.insert(2);

        assert!(!announced.take(1));
        assert!(announced.take(2));
        assert!(!announced.take(2), "later reconnects are reported");
    }

    #[test]
    fn face_buttons_follow_positional_layout() {
        assert_eq!(map_button(Button::South), Some(ButtonMapping::A));
        assert_eq!(map_button(Button::East), Some(ButtonMapping::B));
        assert_eq!(map_button(Button::West), Some(ButtonMapping::X));
        assert_eq!(map_button(Button::North), Some(ButtonMapping::Y));
    }

    #[test]
    fn menu_buttons_map_in_order() {
        assert_eq!(map_button(Button::Select), Some(ButtonMapping::Menu1));
        assert_eq!(map_button(Button::Start), Some(ButtonMapping::Menu2));
        assert_eq!(map_button(Button::Mode), Some(ButtonMapping::Menu3));
        assert_eq!(map_button(Button::C), None);
    }

    #[test]
    fn analog_triggers_have_indices() {
        assert_eq!(trigger_index(Button::LeftTrigger2), Some(0));
        assert_eq!(trigger_index(Button::RightTrigger2), Some(1));
        assert_eq!(trigger_index(Button::LeftTrigger), None);
    }

    #[test]
    fn stick_axes_pair_up() {
        assert_eq!(stick_of(Axis::LeftStickY), Some((0, Axis::LeftStickX, Axis::LeftStickY)));
        assert_eq!(stick_of(Axis::RightStickX), Some((1, Axis::RightStickX, Axis::RightStickY)));
        assert_eq!(stick_of(Axis::LeftZ), None);
    }
}
