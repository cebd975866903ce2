//=========================================================================
// Input Subsystem
//
// Normalized input vocabulary and the router that delivers it.
//
// Responsibilities:
// - Define touch, keyboard and mouse events independent of any backend
// - Track mouse capture and cursor visibility
// - Validate native notifications and forward them to the application
//
//=========================================================================

//=== Submodules ==========================================================

pub mod event;
mod mouse_capture;
mod router;

//=== Public API ==========================================================

pub use event::{
    KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind, TouchEvent,
    TouchEventKind,
};
pub use mouse_capture::MouseCaptureState;
pub use router::InputEventRouter;
