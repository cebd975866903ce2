//=========================================================================
// Input Event Types
//
// Defines the normalized representation of touch, keyboard and mouse
// input delivered to the application.
//
// This module abstracts away platform-specific input (e.g. Winit, a
// mobile touch surface, a console pad driver) into a small, portable
// vocabulary.
//
// Responsibilities:
// - Represent keys and mouse buttons in a stable, portable way
// - Carry event kind, position and payload for each input family
// - Stay cheap to copy (no heap allocations)
//
// Event Flow:
// ```text
// Backend (Winit / headless / ...)
//         ↓
//    NativeEvent / *_internal entry points
//         ↓
//    InputEventRouter (validation + capture policy)
//         ↓
//    TouchEvent / KeyEvent / MouseEvent (this module)
//         ↓
//    Game callbacks
// ```
//
//=========================================================================

//=== MouseButton =========================================================

/// Physical mouse button identifier.
///
/// The `Other` variant covers side buttons, macro buttons, and any
/// non-standard inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button (typically left).
    Left,

    /// Secondary button (typically right).
    Right,

    /// Middle button (wheel click).
    Middle,

    /// Any other button (side buttons, thumb buttons, macro keys).
    Other
}

//=== KeyCode =============================================================

/// Keyboard key identifier.
///
/// Press/release events carry the physical key location, not the
/// character produced. Text input arrives separately as
/// [`KeyEventKind::Char`] events carrying [`KeyCode::Char`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    //--- Numeric Keys -----------------------------------------------------

    /// Number row: 0-9
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    //--- Alphabetic Keys --------------------------------------------------

    /// Letter keys: A-Z (physical location, not character)
    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    //--- Function Keys ----------------------------------------------------

    F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,

    //--- Navigation -------------------------------------------------------

    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    Home,
    End,
    PageUp,
    PageDown,
    Insert,

    //--- Modifiers --------------------------------------------------------

    Shift,
    Control,
    Alt,
    Super,
    CapsLock,

    //--- Special Keys -----------------------------------------------------

    Space,
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,

    /// Text input character (only valid with [`KeyEventKind::Char`]).
    Char(char),

    /// Fallback for keys not explicitly mapped by the backend.
    ///
    /// Press/release events with this code are dropped by the router.
    Unidentified
}

//=== Touch ===============================================================

/// Phase of a single touch contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TouchEventKind {
    Press,
    Release,
    Move,
}

/// Normalized touch event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TouchEvent {
    pub kind: TouchEventKind,
    pub x: i32,
    pub y: i32,

    /// Distinguishes simultaneous contacts; always 0 without multi-touch.
    pub contact_index: u32,

    /// `true` when synthesized from an unconsumed mouse event.
    pub actually_mouse: bool,
}

//=== Keyboard ============================================================

/// Keyboard event kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyEventKind {
    Press,
    Release,

    /// Text input; repeats while the key is held.
    Char,
}

/// Normalized keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub kind: KeyEventKind,
    pub key: KeyCode,
}

impl KeyEvent {
    /// Returns `true` if kind and key code agree.
    ///
    /// `Char` events must carry a character; press/release must carry an
    /// identified physical key.
    pub fn is_well_formed(&self) -> bool {
        match (self.kind, self.key) {
            (KeyEventKind::Char, KeyCode::Char(_)) => true,
            (KeyEventKind::Char, _) => false,
            (_, KeyCode::Char(_)) | (_, KeyCode::Unidentified) => false,
            _ => true,
        }
    }
}

//=== Mouse ===============================================================

/// Mouse event kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseEventKind {
    Press(MouseButton),
    Release(MouseButton),
    Move,
    Wheel,
}

/// Normalized mouse event.
///
/// While the mouse is captured, `x`/`y` are deltas since the previous
/// mouse event and `relative` is set; otherwise they are absolute window
/// coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    pub kind: MouseEventKind,
    pub x: i32,
    pub y: i32,
    pub wheel_delta: i32,
    pub relative: bool,
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn key(kind: KeyEventKind, key: KeyCode) -> KeyEvent {
        KeyEvent { kind, key }
    }

    #[test]
    fn press_and_release_with_physical_key_are_well_formed() {
        assert!(key(KeyEventKind::Press, KeyCode::KeyA).is_well_formed());
        assert!(key(KeyEventKind::Release, KeyCode::Escape).is_well_formed());
    }

    #[test]
    fn unidentified_press_is_malformed() {
        assert!(!key(KeyEventKind::Press, KeyCode::Unidentified).is_well_formed());
        assert!(!key(KeyEventKind::Release, KeyCode::Unidentified).is_well_formed());
    }

    #[test]
    fn char_kind_requires_character() {
        assert!(key(KeyEventKind::Char, KeyCode::Char('x')).is_well_formed());
        assert!(!key(KeyEventKind::Char, KeyCode::KeyX).is_well_formed());
        assert!(!key(KeyEventKind::Press, KeyCode::Char('x')).is_well_formed());
    }

    #[test]
    fn mouse_kinds_compare_by_button() {
        assert_eq!(
            MouseEventKind::Press(MouseButton::Left),
            MouseEventKind::Press(MouseButton::Left)
        );
        assert_ne!(
            MouseEventKind::Press(MouseButton::Left),
            MouseEventKind::Release(MouseButton::Left)
        );
    }
}
