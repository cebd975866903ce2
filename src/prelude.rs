//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use aetheric_platform::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Application binding
pub use crate::core::application::Game;
pub use crate::runtime::{Platform, PlatformBuilder, PlatformServices};

// Backend contract
pub use crate::core::platform_bridge::{
    Backend, BackendKind, Capabilities, FileDialogMode, FileDialogRequest, NativeEvent,
    Orientation, PlatformError, SensorValues,
};

// Input
pub use crate::core::input::{
    KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind, TouchEvent,
    TouchEventKind,
};

// Gestures
pub use crate::core::gesture::{GestureEvent, GestureKind, SwipeDirection};

// Gamepads
pub use crate::core::gamepad::{ButtonMapping, GamepadEvent, GamepadHandle};
