//=========================================================================
// Input Processor
//=========================================================================
//
// Converts Winit events into native platform notifications.
//
// Architecture:
//   Winit Events → InputProcessor → NativeEvent → DesktopBackend::pump_events
//
// Stateful tracking:
// - cursor position (absolute, or virtual while captured)
// - left button state, for the mouse → touch fallback on drags
// - touch id → contact index slots (lowest free index wins)
//
// Unmapped physical keys (F13-F24, media keys, ...) are filtered.
//
//=========================================================================

//=== External Dependencies ===============================================

use winit::{
    event::{ElementState, MouseButton as WinitMouseButton, MouseScrollDelta, TouchPhase},
    keyboard::{KeyCode as WinitKeyCode, PhysicalKey},
};

//=== Internal Dependencies ===============================================

use crate::core::input::{KeyCode, KeyEventKind, MouseButton, MouseEventKind, TouchEventKind};
use crate::core::platform_bridge::NativeEvent;

/// Pixel scroll distance reported as one wheel notch.
const PIXELS_PER_NOTCH: f64 = 120.0;

//=== InputProcessor ======================================================

/// Converts Winit events to native notifications with cursor and touch
/// slot tracking.
#[derive(Debug, Default)]
pub(crate) struct InputProcessor {
    cursor: (f64, f64),
    left_held: bool,
    captured: bool,

    /// Winit touch id per contact index; `None` marks a free slot.
    touch_slots: Vec<Option<u64>>,
}

impl InputProcessor {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new() -> Self {
        Self::default()
    }

    //--- Cursor State Management ------------------------------------------

    /// Switches between absolute and captured cursor tracking.
    ///
    /// Captured motion accumulates from `center`.
    pub(crate) fn set_captured(&mut self, captured: bool, center: (i32, i32)) {
        self.captured = captured;
        self.cursor = (f64::from(center.0), f64::from(center.1));
    }

    pub(crate) fn cursor(&self) -> (i32, i32) {
        (self.cursor.0.round() as i32, self.cursor.1.round() as i32)
    }

    //--- Keyboard ---------------------------------------------------------

    /// Converts a key transition, then any text it produced.
    ///
    /// Unmapped physical keys produce no press/release, but their text is
    /// still delivered as `Char` events.
    pub(crate) fn process_key(
        &self,
        physical_key: PhysicalKey,
        state: ElementState,
        text: Option<&str>,
        out: &mut Vec<NativeEvent>,
    ) {
        let key = match physical_key {
            PhysicalKey::Code(code) => KeyCode::from(code),
            PhysicalKey::Unidentified(_) => KeyCode::Unidentified,
        };

        if key != KeyCode::Unidentified {
            let kind = match state {
                ElementState::Pressed => KeyEventKind::Press,
                ElementState::Released => KeyEventKind::Release,
            };
            out.push(NativeEvent::Key { kind, key });
        }

        if state == ElementState::Pressed {
            let chars = text.unwrap_or_default().chars().filter(|c| !c.is_control());
            out.extend(chars.map(|c| NativeEvent::Key {
                kind: KeyEventKind::Char,
                key: KeyCode::Char(c),
            }));
        }
    }

    //--- Mouse ------------------------------------------------------------

    /// Converts a button transition at the current cursor position.
    ///
    /// Left button transitions carry a touch fallback.
    pub(crate) fn process_mouse_button(
        &mut self,
        button: WinitMouseButton,
        state: ElementState,
        out: &mut Vec<NativeEvent>,
    ) {
        let button = MouseButton::from(button);
        let is_left = button == MouseButton::Left;

        let (kind, touch) = match state {
            ElementState::Pressed => (MouseEventKind::Press(button), TouchEventKind::Press),
            ElementState::Released => (MouseEventKind::Release(button), TouchEventKind::Release),
        };
        if is_left {
            self.left_held = state == ElementState::Pressed;
        }

        let (x, y) = self.cursor();
        out.push(NativeEvent::Mouse {
            kind,
            x,
            y,
            wheel_delta: 0,
            touch_fallback: is_left.then_some(touch),
        });
    }

    /// Absolute cursor movement; ignored while captured.
    pub(crate) fn process_cursor_moved(&mut self, x: f64, y: f64, out: &mut Vec<NativeEvent>) {
        if self.captured {
            return;
        }
        self.cursor = (x, y);
        self.push_move(out);
    }

    /// Raw device motion; only tracked while captured.
    pub(crate) fn process_mouse_motion(&mut self, dx: f64, dy: f64, out: &mut Vec<NativeEvent>) {
        if !self.captured {
            return;
        }
        self.cursor.0 += dx;
        self.cursor.1 += dy;
        self.push_move(out);
    }

    /// Converts a scroll into whole wheel notches; sub-notch pixel
    /// scrolls are dropped.
    pub(crate) fn process_wheel(&self, delta: MouseScrollDelta, out: &mut Vec<NativeEvent>) {
        let notches = match delta {
            MouseScrollDelta::LineDelta(_, y) => y.round() as i32,
            MouseScrollDelta::PixelDelta(position) => (position.y / PIXELS_PER_NOTCH).round() as i32,
        };
        if notches == 0 {
            return;
        }

        let (x, y) = self.cursor();
        out.push(NativeEvent::Mouse {
            kind: MouseEventKind::Wheel,
            x,
            y,
            wheel_delta: notches,
            touch_fallback: None,
        });
    }

    //--- Touch ------------------------------------------------------------

    /// Converts a touch phase for Winit touch `id`.
    ///
    /// Contacts are numbered by the lowest free slot, so the first finger
    /// down is always contact 0.
    pub(crate) fn process_touch(
        &mut self,
        id: u64,
        phase: TouchPhase,
        x: f64,
        y: f64,
        out: &mut Vec<NativeEvent>,
    ) {
        let (kind, contact_index) = match phase {
            TouchPhase::Started => (TouchEventKind::Press, self.claim_slot(id)),
            TouchPhase::Moved => match self.slot_of(id) {
                Some(index) => (TouchEventKind::Move, index),
                None => return,
            },
            TouchPhase::Ended | TouchPhase::Cancelled => match self.release_slot(id) {
                Some(index) => (TouchEventKind::Release, index),
                None => return,
            },
        };

        out.push(NativeEvent::Touch {
            kind,
            x: x.round() as i32,
            y: y.round() as i32,
            contact_index,
        });
    }

    //--- Internal Helpers -------------------------------------------------

    fn push_move(&self, out: &mut Vec<NativeEvent>) {
        let (x, y) = self.cursor();
        out.push(NativeEvent::Mouse {
            kind: MouseEventKind::Move,
            x,
            y,
            wheel_delta: 0,
            touch_fallback: self.left_held.then_some(TouchEventKind::Move),
        });
    }

    fn slot_of(&self, id: u64) -> Option<u32> {
        self.touch_slots
            .iter()
            .position(|slot| *slot == Some(id))
            .map(|index| index as u32)
    }

    fn claim_slot(&mut self, id: u64) -> u32 {
        if let Some(index) = self.slot_of(id) {
            return index;
        }
        match self.touch_slots.iter().position(Option::is_none) {
            Some(index) => {
                self.touch_slots[index] = Some(id);
                index as u32
            }
            None => {
                self.touch_slots.push(Some(id));
                (self.touch_slots.len() - 1) as u32
            }
        }
    }

    fn release_slot(&mut self, id: u64) -> Option<u32> {
        let index = self.slot_of(id)?;
        self.touch_slots[index as usize] = None;
        Some(index)
    }
}

//=========================================================================
// Winit Conversions
//=========================================================================

/// Converts Winit physical key codes to platform key codes.
///
/// Left/right modifier variants collapse to one code. Unmapped keys
/// (F13-F24, numpad, media keys) return `KeyCode::Unidentified`.
impl From<WinitKeyCode> for KeyCode {
    fn from(code: WinitKeyCode) -> Self {
        use WinitKeyCode::*;
        match code {
            //--- Digits -------------------------------------------------------

            Digit0 => KeyCode::Digit0,
            Digit1 => KeyCode::Digit1,
            Digit2 => KeyCode::Digit2,
            Digit3 => KeyCode::Digit3,
            Digit4 => KeyCode::Digit4,
            Digit5 => KeyCode::Digit5,
            Digit6 => KeyCode::Digit6,
            Digit7 => KeyCode::Digit7,
            Digit8 => KeyCode::Digit8,
            Digit9 => KeyCode::Digit9,

            //--- Letters ------------------------------------------------------

            KeyA => KeyCode::KeyA,
            KeyB => KeyCode::KeyB,
            KeyC => KeyCode::KeyC,
            KeyD => KeyCode::KeyD,
            KeyE => KeyCode::KeyE,
            KeyF => KeyCode::KeyF,
            KeyG => KeyCode::KeyG,
            KeyH => KeyCode::KeyH,
            KeyI => KeyCode::KeyI,
            KeyJ => KeyCode::KeyJ,
            KeyK => KeyCode::KeyK,
            KeyL => KeyCode::KeyL,
            KeyM => KeyCode::KeyM,
            KeyN => KeyCode::KeyN,
            KeyO => KeyCode::KeyO,
            KeyP => KeyCode::KeyP,
            KeyQ => KeyCode::KeyQ,
            KeyR => KeyCode::KeyR,
            KeyS => KeyCode::KeyS,
            KeyT => KeyCode::KeyT,
            KeyU => KeyCode::KeyU,
            KeyV => KeyCode::KeyV,
            KeyW => KeyCode::KeyW,
            KeyX => KeyCode::KeyX,
            KeyY => KeyCode::KeyY,
            KeyZ => KeyCode::KeyZ,

            //--- Function Keys ------------------------------------------------

            F1 => KeyCode::F1,
            F2 => KeyCode::F2,
            F3 => KeyCode::F3,
            F4 => KeyCode::F4,
            F5 => KeyCode::F5,
            F6 => KeyCode::F6,
            F7 => KeyCode::F7,
            F8 => KeyCode::F8,
            F9 => KeyCode::F9,
            F10 => KeyCode::F10,
            F11 => KeyCode::F11,
            F12 => KeyCode::F12,

            //--- Navigation ---------------------------------------------------

            ArrowUp => KeyCode::ArrowUp,
            ArrowDown => KeyCode::ArrowDown,
            ArrowLeft => KeyCode::ArrowLeft,
            ArrowRight => KeyCode::ArrowRight,
            Home => KeyCode::Home,
            End => KeyCode::End,
            PageUp => KeyCode::PageUp,
            PageDown => KeyCode::PageDown,
            Insert => KeyCode::Insert,

            //--- Modifiers ----------------------------------------------------

            ShiftLeft | ShiftRight => KeyCode::Shift,
            ControlLeft | ControlRight => KeyCode::Control,
            AltLeft | AltRight => KeyCode::Alt,
            SuperLeft | SuperRight => KeyCode::Super,
            CapsLock => KeyCode::CapsLock,

            //--- Special ------------------------------------------------------

            Space => KeyCode::Space,
            Enter => KeyCode::Enter,
            Escape => KeyCode::Escape,
            Tab => KeyCode::Tab,
            Backspace => KeyCode::Backspace,
            Delete => KeyCode::Delete,

            //--- Unmapped (return Unidentified) -------------------------------

            _ => KeyCode::Unidentified,
        }
    }
}

/// Converts Winit mouse buttons to platform buttons.
///
/// Left/Right/Middle mapped directly; Back/Forward/Other → Other.
impl From<WinitMouseButton> for MouseButton {
    fn from(button: WinitMouseButton) -> Self {
        match button {
            WinitMouseButton::Left => MouseButton::Left,
            WinitMouseButton::Right => MouseButton::Right,
            WinitMouseButton::Middle => MouseButton::Middle,
            _ => MouseButton::Other,
        }
    }
}

//=========================================================================
// Tests
//=========================================================================
