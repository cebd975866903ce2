//=========================================================================
// Platform Bridge
//=========================================================================
//
// Bridges native backends (winit, headless, ...) with core systems.
//
// This module defines the contract between backend implementations and
// core logic, so backends can be swapped without changing core code.
//
// Components:
// - `interface`: Backend trait, capability descriptor, native event
//   vocabulary and error definitions (the contract)
// - `event_collector`: cross-thread gamepad notification marshaling
//
//=========================================================================

//=== Module Declarations =================================================

pub(crate) mod event_collector;
pub(crate) mod interface;

//=== Public API ==========================================================

pub use event_collector::GamepadNotifier;
pub use interface::{
    Backend, BackendKind, BackendStatus, Capabilities, FileDialogMode, FileDialogRequest,
    GamepadNotification, NativeEvent, Orientation, PlatformError, SensorValues,
};

//=== Internal API ========================================================

pub(crate) use event_collector::{gamepad_channel, GamepadEventCollector};
